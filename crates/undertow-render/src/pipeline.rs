//! Host render pipeline surface: named injection points around the
//! transparent stage, and an in-process pipeline that records submission order.

use serde::{Deserialize, Serialize};

/// Where a custom pass is inserted relative to the built-in transparent stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InjectionPoint {
    BeforeTransparent,
    AfterTransparent,
}

impl InjectionPoint {
    pub const ALL: [InjectionPoint; 2] = [Self::BeforeTransparent, Self::AfterTransparent];
}

/// The two full-screen passes this crate registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassId {
    /// Writes the per-pixel underwater mask and depth.
    OceanMask,
    /// Composites fog using the mask and reconstructed world position.
    UnderwaterEffect,
}

impl PassId {
    pub const fn label(self) -> &'static str {
        match self {
            Self::OceanMask => "ocean-mask-pass",
            Self::UnderwaterEffect => "underwater-effect-pass",
        }
    }
}

/// Pass registration interface exposed by the host pipeline for one camera.
pub trait HostPipeline {
    /// Append `pass` at `point`. Adding twice registers it twice.
    fn add_pass(&mut self, point: InjectionPoint, pass: PassId);
    /// Remove every registration of `pass` at `point`. Absent passes are ignored.
    fn remove_pass(&mut self, point: InjectionPoint, pass: PassId);
}

/// Built-in stages the host draws around the injection points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuiltinStage {
    Opaque,
    Transparent,
}

/// One unit of GPU work submitted while executing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Submission {
    Stage(BuiltinStage),
    Pass(PassId),
}

/// In-process host pipeline. Keeps hooks per injection point in insertion
/// order and executes them in stage order.
#[derive(Debug, Default, Clone)]
pub struct RecordingPipeline {
    before_transparent: Vec<PassId>,
    after_transparent: Vec<PassId>,
}

impl RecordingPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hooks registered at `point`, in insertion order.
    pub fn hooks(&self, point: InjectionPoint) -> &[PassId] {
        match point {
            InjectionPoint::BeforeTransparent => &self.before_transparent,
            InjectionPoint::AfterTransparent => &self.after_transparent,
        }
    }

    /// Total number of registered hooks across both points.
    pub fn hook_count(&self) -> usize {
        self.before_transparent.len() + self.after_transparent.len()
    }

    /// Execute one frame: opaque, hooks before transparent, transparent, hooks
    /// after transparent. `run` is asked per hook whether it has work this
    /// frame; hooks that decline are not submitted.
    pub fn execute_frame<F: FnMut(PassId) -> bool>(&self, mut run: F) -> Vec<Submission> {
        let mut submitted = vec![Submission::Stage(BuiltinStage::Opaque)];
        for &pass in &self.before_transparent {
            if run(pass) {
                submitted.push(Submission::Pass(pass));
            }
        }
        submitted.push(Submission::Stage(BuiltinStage::Transparent));
        for &pass in &self.after_transparent {
            if run(pass) {
                submitted.push(Submission::Pass(pass));
            }
        }
        submitted
    }

    fn hooks_mut(&mut self, point: InjectionPoint) -> &mut Vec<PassId> {
        match point {
            InjectionPoint::BeforeTransparent => &mut self.before_transparent,
            InjectionPoint::AfterTransparent => &mut self.after_transparent,
        }
    }
}

impl HostPipeline for RecordingPipeline {
    fn add_pass(&mut self, point: InjectionPoint, pass: PassId) {
        self.hooks_mut(point).push(pass);
    }

    fn remove_pass(&mut self, point: InjectionPoint, pass: PassId) {
        self.hooks_mut(point).retain(|&p| p != pass);
    }
}

/// Position of `pass` in a submission list, if it was submitted.
pub fn submission_index(submitted: &[Submission], pass: PassId) -> Option<usize> {
    submitted.iter().position(|s| *s == Submission::Pass(pass))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pipeline_draws_builtin_stages_only() {
        let pipeline = RecordingPipeline::new();
        let submitted = pipeline.execute_frame(|_| true);
        assert_eq!(
            submitted,
            vec![
                Submission::Stage(BuiltinStage::Opaque),
                Submission::Stage(BuiltinStage::Transparent),
            ]
        );
    }

    #[test]
    fn test_hooks_run_in_stage_then_insertion_order() {
        let mut pipeline = RecordingPipeline::new();
        pipeline.add_pass(InjectionPoint::AfterTransparent, PassId::UnderwaterEffect);
        pipeline.add_pass(InjectionPoint::BeforeTransparent, PassId::OceanMask);
        let submitted = pipeline.execute_frame(|_| true);
        assert_eq!(
            submitted,
            vec![
                Submission::Stage(BuiltinStage::Opaque),
                Submission::Pass(PassId::OceanMask),
                Submission::Stage(BuiltinStage::Transparent),
                Submission::Pass(PassId::UnderwaterEffect),
            ]
        );
    }

    #[test]
    fn test_add_twice_duplicates_and_remove_clears_all() {
        let mut pipeline = RecordingPipeline::new();
        pipeline.add_pass(InjectionPoint::BeforeTransparent, PassId::OceanMask);
        pipeline.add_pass(InjectionPoint::BeforeTransparent, PassId::OceanMask);
        assert_eq!(pipeline.hook_count(), 2);
        pipeline.remove_pass(InjectionPoint::BeforeTransparent, PassId::OceanMask);
        assert_eq!(pipeline.hook_count(), 0);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut pipeline = RecordingPipeline::new();
        pipeline.add_pass(InjectionPoint::BeforeTransparent, PassId::OceanMask);
        pipeline.remove_pass(InjectionPoint::AfterTransparent, PassId::OceanMask);
        pipeline.remove_pass(InjectionPoint::BeforeTransparent, PassId::UnderwaterEffect);
        assert_eq!(pipeline.hooks(InjectionPoint::BeforeTransparent), &[PassId::OceanMask]);
    }

    #[test]
    fn test_declined_hooks_not_submitted() {
        let mut pipeline = RecordingPipeline::new();
        pipeline.add_pass(InjectionPoint::BeforeTransparent, PassId::OceanMask);
        pipeline.add_pass(InjectionPoint::AfterTransparent, PassId::UnderwaterEffect);
        let submitted = pipeline.execute_frame(|p| p == PassId::OceanMask);
        assert!(submission_index(&submitted, PassId::OceanMask).is_some());
        assert!(submission_index(&submitted, PassId::UnderwaterEffect).is_none());
    }
}
