use crate::sbom_generation::domain::RunMetadata;
use chrono::Utc;
use uuid::Uuid;

/// MetadataGenerator service stamping each run with a time and a serial number
pub struct MetadataGenerator;

impl MetadataGenerator {
    /// Current UTC time (RFC 3339) and a fresh `urn:uuid:` serial
    pub fn generate(tool_name: &str, tool_version: &str) -> RunMetadata {
        RunMetadata::new(
            Utc::now().to_rfc3339(),
            tool_name.to_string(),
            tool_version.to_string(),
            format!("urn:uuid:{}", Uuid::new_v4()),
        )
    }

    /// Metadata naming this crate and its compile-time version
    pub fn generate_default() -> RunMetadata {
        Self::generate(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}
