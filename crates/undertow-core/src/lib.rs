pub mod config;
pub mod constants;
pub mod error;
pub mod math;
pub mod types;

pub use config::{DebugOverrides, UnderwaterConfig};
pub use error::UnderwaterError;
pub use types::{Eye, EyeTransforms, RenderCamera, StereoContext, StereoMode};
