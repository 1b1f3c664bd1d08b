mod license_normalization;
mod violation_policy;

pub use license_normalization::LicenseNormalization;
pub use violation_policy::{FailPolicy, PolicyConfig, VulnerabilityPolicy};
