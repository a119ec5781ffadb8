pub mod activation;
pub mod ocean;

pub use activation::is_active;
pub use ocean::{OceanMaterialParams, OceanProvider, OceanSnapshot};
