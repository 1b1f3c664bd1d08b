use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    License,
    Vulnerability,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::License => write!(f, "license"),
            ViolationKind::Vulnerability => write!(f, "vulnerability"),
        }
    }
}

/// A single policy breach. Created only by the violation evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    kind: ViolationKind,
    subject_id: String,
    detail: String,
}

impl Violation {
    pub(crate) fn new(kind: ViolationKind, subject_id: String, detail: String) -> Self {
        Self {
            kind,
            subject_id,
            detail,
        }
    }

    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.subject_id, self.detail)
    }
}
