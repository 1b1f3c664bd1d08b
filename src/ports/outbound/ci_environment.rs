use crate::sbom_generation::services::CiContext;

/// CiEnvironment port exposing the signals the pull-request fail policy needs
pub trait CiEnvironment {
    /// True when running under the recognized CI system
    fn is_ci(&self) -> bool;

    /// True when the CI run was triggered by a pull request
    fn is_pull_request(&self) -> bool;

    fn context(&self) -> CiContext {
        CiContext {
            is_ci: self.is_ci(),
            is_pull_request: self.is_pull_request(),
        }
    }
}
