pub mod orchestrator;
pub mod registry;

pub use orchestrator::{
    EffectState, FrameHost, FrameInput, FrameOrchestrator, FrameOutcome, FrameReport,
    InactiveReason,
};
pub use registry::{InstanceId, InstanceLease, InstanceRegistry};

#[cfg(test)]
mod test_harness;
