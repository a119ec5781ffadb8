use crate::pipeline::{HostPipeline, InjectionPoint, PassId};

/// Attaches the mask and effect passes to a host pipeline and detaches them,
/// without ever registering a pass twice.
#[derive(Debug, Clone)]
pub struct PassRegistrar {
    mask: PassId,
    effect: PassId,
    /// Injection point of the effect pass while attached.
    attached_at: Option<InjectionPoint>,
}

impl Default for PassRegistrar {
    fn default() -> Self {
        Self::new(PassId::OceanMask, PassId::UnderwaterEffect)
    }
}

impl PassRegistrar {
    pub fn new(mask: PassId, effect: PassId) -> Self {
        Self {
            mask,
            effect,
            attached_at: None,
        }
    }

    /// Register the mask before the transparent stage and the effect either
    /// before it (`before_transparent`) or after it. The choice holds until
    /// the next [`detach`](Self::detach). Returns false if already attached.
    ///
    /// Hooks for the same passes left behind by a registrar that was dropped
    /// while attached are removed first, so the pipeline ends up with exactly
    /// one mask and one effect hook.
    pub fn attach(&mut self, pipeline: &mut dyn HostPipeline, before_transparent: bool) -> bool {
        if let Some(point) = self.attached_at {
            log::debug!(
                "{} already attached at {:?}, ignoring attach",
                self.effect.label(),
                point
            );
            return false;
        }

        let effect_point = if before_transparent {
            InjectionPoint::BeforeTransparent
        } else {
            InjectionPoint::AfterTransparent
        };

        self.remove_all(pipeline);

        // Mask first: with both at the same point, insertion order decides execution order.
        pipeline.add_pass(InjectionPoint::BeforeTransparent, self.mask);
        pipeline.add_pass(effect_point, self.effect);
        self.attached_at = Some(effect_point);
        true
    }

    /// Remove both passes from every injection point, since the host may
    /// have seen either. Returns false if nothing was attached.
    ///
    /// A registrar that is not attached leaves the pipeline untouched: hooks
    /// found there may belong to another live instance. Stale hooks are
    /// cleared by the next [`attach`](Self::attach) instead.
    pub fn detach(&mut self, pipeline: &mut dyn HostPipeline) -> bool {
        if self.attached_at.take().is_none() {
            log::debug!("{} not attached, ignoring detach", self.effect.label());
            return false;
        }

        self.remove_all(pipeline);
        true
    }

    fn remove_all(&self, pipeline: &mut dyn HostPipeline) {
        for point in InjectionPoint::ALL {
            pipeline.remove_pass(point, self.mask);
            pipeline.remove_pass(point, self.effect);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached_at.is_some()
    }

    /// Where the effect pass currently sits, if attached.
    pub fn effect_point(&self) -> Option<InjectionPoint> {
        self.attached_at
    }
}
