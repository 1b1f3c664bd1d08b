use crate::sbom_generation::domain::{BuildModule, Scope};

/// Name markers of scopes that never reach a shipped artifact
const EXCLUDED_MARKERS: &[&str] = &[
    "compileonly",
    "annotationprocessor",
    "kapt",
    "ksp",
    "provided",
];

/// ScopeFilter - Selects which scopes of a module feed the graph collector
///
/// Rules are applied in order:
/// 1. the scope must be resolvable
/// 2. its name must match the target platform
/// 3. compile-only, annotation-processor and provided scopes are excluded
/// 4. test/debug/release scopes are gated by their toggle; anything else passes
///
/// All name matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFilter {
    platform: String,
    include_debug: bool,
    include_release: bool,
    include_test: bool,
}

impl ScopeFilter {
    pub fn new(
        platform: &str,
        include_debug: bool,
        include_release: bool,
        include_test: bool,
    ) -> Self {
        Self {
            platform: platform.trim().to_lowercase(),
            include_debug,
            include_release,
            include_test,
        }
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Returns the module's eligible scopes in declaration order
    pub fn select<'a>(&self, module: &'a BuildModule) -> Vec<&'a Scope> {
        module
            .scopes()
            .iter()
            .filter(|scope| self.is_eligible(scope))
            .collect()
    }

    pub fn is_eligible(&self, scope: &Scope) -> bool {
        if !scope.is_resolvable() {
            return false;
        }

        let name = scope.name().to_lowercase();

        if !self.matches_platform(&name) {
            return false;
        }

        if EXCLUDED_MARKERS.iter().any(|marker| name.contains(marker)) {
            return false;
        }

        if name.contains("test") {
            self.include_test
        } else if name.contains("debug") {
            self.include_debug
        } else if name.contains("release") {
            self.include_release
        } else {
            true
        }
    }

    /// An empty platform matches every scope
    fn matches_platform(&self, name: &str) -> bool {
        match self.platform.as_str() {
            "android" => name.contains("android") || name.contains("jvm"),
            "ios" => name.contains("ios"),
            other => name.contains(other),
        }
    }
}
