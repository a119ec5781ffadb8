use std::collections::HashMap;
use std::sync::{Arc, Weak};

/// Identifier of one underwater effect instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(u64);

/// Proof that an instance is alive. The owner holds it for as long as the
/// instance exists; once dropped, the registry treats the instance as gone.
#[derive(Debug)]
pub struct InstanceLease {
    id: InstanceId,
    _alive: Arc<()>,
}

impl InstanceLease {
    pub fn id(&self) -> InstanceId {
        self.id
    }
}

/// Tracks which effect instance drives the passes. Owned by the host's
/// pipeline integration and handed to each frame; created at subsystem init
/// and cleared with [`reset`](Self::reset) at teardown.
///
/// The last instance the host enabled wins. A newly enabled instance only
/// attaches once the previous one has released its hooks, so two instances
/// never drive passes at the same time. An instance whose lease was dropped
/// counts as released.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    next_id: u64,
    latest_enabled: Option<InstanceId>,
    current: Option<InstanceId>,
    live: HashMap<InstanceId, Weak<()>>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id for a new instance. The instance stays alive while the
    /// returned lease does.
    pub fn register(&mut self) -> InstanceLease {
        self.live.retain(|_, alive| alive.strong_count() > 0);

        let id = InstanceId(self.next_id);
        self.next_id += 1;
        let alive = Arc::new(());
        self.live.insert(id, Arc::downgrade(&alive));
        InstanceLease { id, _alive: alive }
    }

    /// Record that the host enabled `id`. Returns the instance it supersedes, if any.
    pub fn enable(&mut self, id: InstanceId) -> Option<InstanceId> {
        self.latest_enabled
            .replace(id)
            .filter(|previous| *previous != id)
    }

    /// Record that the host disabled `id`. Later enables are unaffected.
    pub fn disable(&mut self, id: InstanceId) {
        if self.latest_enabled == Some(id) {
            self.latest_enabled = None;
        }
        self.clear_current(id);
    }

    pub fn is_latest_enabled(&self, id: InstanceId) -> bool {
        self.latest_enabled == Some(id)
    }

    /// Whether `id` may attach its passes now.
    pub fn can_become_current(&self, id: InstanceId) -> bool {
        self.is_latest_enabled(id) && self.current().map_or(true, |c| c == id)
    }

    /// Mark `id` as the instance driving passes. Refused while another live
    /// instance holds it.
    pub fn make_current(&mut self, id: InstanceId) -> bool {
        match self.current() {
            Some(other) if other != id => false,
            _ => {
                if let Some(stale) = self.current.filter(|c| *c != id) {
                    log::info!("Underwater instance {stale:?} was dropped while current, releasing");
                }
                self.current = Some(id);
                true
            }
        }
    }

    /// Release `id` if it is current.
    pub fn clear_current(&mut self, id: InstanceId) {
        if self.current == Some(id) {
            self.current = None;
        }
    }

    /// The live instance driving passes, if any.
    pub fn current(&self) -> Option<InstanceId> {
        self.current.filter(|id| self.is_alive(*id))
    }

    pub fn is_current(&self, id: InstanceId) -> bool {
        self.current() == Some(id)
    }

    /// Whether the lease for `id` is still held.
    pub fn is_alive(&self, id: InstanceId) -> bool {
        self.live
            .get(&id)
            .is_some_and(|alive| alive.strong_count() > 0)
    }

    /// Forget all instance state, as on subsystem teardown. Ids keep increasing.
    pub fn reset(&mut self) {
        self.latest_enabled = None;
        self.current = None;
    }
}
