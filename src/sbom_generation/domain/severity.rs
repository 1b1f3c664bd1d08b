use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Vulnerability severity, declared from least to most severe so that the
/// derived ordering gives `Critical > High > Medium > Low > None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeverityLevel {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityLevel {
    pub const ALL: [SeverityLevel; 5] = [
        SeverityLevel::Critical,
        SeverityLevel::High,
        SeverityLevel::Medium,
        SeverityLevel::Low,
        SeverityLevel::None,
    ];

    /// Maps a CVSS base score onto the qualitative rating scale
    pub fn from_cvss_score(score: f64) -> Self {
        if score >= 9.0 {
            SeverityLevel::Critical
        } else if score >= 7.0 {
            SeverityLevel::High
        } else if score >= 4.0 {
            SeverityLevel::Medium
        } else if score > 0.0 {
            SeverityLevel::Low
        } else {
            SeverityLevel::None
        }
    }

    /// Lenient mapping of advisory severity labels; unknown labels map to `None`
    pub fn from_advisory_label(label: &str) -> Self {
        label.parse().unwrap_or(SeverityLevel::None)
    }

    pub fn is_more_severe_than(self, other: SeverityLevel) -> bool {
        self > other
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityLevel::Critical => "CRITICAL",
            SeverityLevel::High => "HIGH",
            SeverityLevel::Medium => "MEDIUM",
            SeverityLevel::Low => "LOW",
            SeverityLevel::None => "NONE",
        }
    }
}

impl FromStr for SeverityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CRITICAL" => Ok(SeverityLevel::Critical),
            "HIGH" => Ok(SeverityLevel::High),
            "MEDIUM" | "MODERATE" => Ok(SeverityLevel::Medium),
            "LOW" => Ok(SeverityLevel::Low),
            "NONE" => Ok(SeverityLevel::None),
            _ => Err(format!(
                "Invalid severity: {}. Expected one of CRITICAL, HIGH, MEDIUM, LOW, NONE",
                s
            )),
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
