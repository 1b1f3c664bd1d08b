use serde::Serialize;

/// License resolved for one dependency.
///
/// `id` is the canonical SPDX-style identifier when the declared name or URL
/// could be matched, otherwise the declared name verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseRecord {
    id: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl LicenseRecord {
    pub fn new(id: String, name: String, url: Option<String>) -> Self {
        Self { id, name, url }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}
