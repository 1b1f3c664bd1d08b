/// Environment adapters - CI system detection
mod github_actions;

pub use github_actions::GitHubActionsEnvironment;
