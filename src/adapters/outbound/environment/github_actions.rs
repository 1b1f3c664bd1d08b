use crate::ports::outbound::CiEnvironment;

/// Event names GitHub Actions uses for pull-request triggered workflows
const PULL_REQUEST_EVENTS: [&str; 2] = ["pull_request", "pull_request_target"];

/// GitHubActionsEnvironment adapter reading the GitHub Actions variables
///
/// The values are captured once at construction, so a run sees a stable
/// answer even if the process environment changes later.
#[derive(Debug, Clone, Default)]
pub struct GitHubActionsEnvironment {
    github_actions: Option<String>,
    event_name: Option<String>,
}

impl GitHubActionsEnvironment {
    /// Reads `GITHUB_ACTIONS` and `GITHUB_EVENT_NAME` from the process environment
    pub fn from_process_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the environment from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            github_actions: lookup("GITHUB_ACTIONS"),
            event_name: lookup("GITHUB_EVENT_NAME"),
        }
    }
}

impl CiEnvironment for GitHubActionsEnvironment {
    fn is_ci(&self) -> bool {
        self.github_actions.as_deref() == Some("true")
    }

    fn is_pull_request(&self) -> bool {
        self.is_ci()
            && self
                .event_name
                .as_deref()
                .is_some_and(|event| PULL_REQUEST_EVENTS.contains(&event))
    }
}
