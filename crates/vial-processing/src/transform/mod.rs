//! Column transformations applied after imputation.

mod binary;
mod features;

pub use binary::BinaryMapper;
pub use features::FeatureDeriver;
