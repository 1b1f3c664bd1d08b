mod cli;
mod config;

use clap::Parser;
use cli::Args;
use config::{discover_config, load_config_from_path, ConfigFile};
use depgraph_sbom::adapters::outbound::console::StderrProgressReporter;
use depgraph_sbom::adapters::outbound::environment::GitHubActionsEnvironment;
use depgraph_sbom::adapters::outbound::filesystem::{
    FileSystemReader, FileSystemWriter, LocalCacheLicenseSource, StdoutPresenter,
};
use depgraph_sbom::adapters::outbound::network::{
    build_http_client, CachingLicenseSource, GitHubLicenseSource, MavenRepositoryLicenseSource,
    OsvClient,
};
use depgraph_sbom::application::dto::GenerationRequest;
use depgraph_sbom::application::use_cases::{GenerateSbomUseCase, LicenseResolver};
use depgraph_sbom::ports::outbound::{LicenseSource, OutputPresenter, ProgressReporter};
use depgraph_sbom::sbom_generation::domain::ModuleId;
use depgraph_sbom::sbom_generation::policies::{FailPolicy, PolicyConfig, VulnerabilityPolicy};
use depgraph_sbom::sbom_generation::services::ScopeFilter;
use depgraph_sbom::shared::error::ExitCode;
use depgraph_sbom::shared::Result;
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    let code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };

    process::exit(code.as_i32());
}

async fn run(args: Args) -> Result<ExitCode> {
    let reporter = StderrProgressReporter::new();

    let config = load_config(&args)?.unwrap_or_default();
    for warning in config.unknown_field_warnings() {
        reporter.report_warning(&warning);
    }

    let settings = Settings::resolve(&args, &config)?;
    for warning in &settings.warnings {
        reporter.report_warning(warning);
    }

    let client = if settings.offline {
        None
    } else {
        Some(build_http_client()?)
    };

    let resolver = LicenseResolver::new(license_sources(&settings, client.as_ref()));

    let vulnerability_repository = match (&client, settings.check_cve) {
        (Some(client), true) => Some(OsvClient::new(client.clone())),
        (None, true) => {
            reporter.report_warning("Vulnerability check skipped: offline mode is enabled");
            None
        }
        _ => None,
    };

    let request = GenerationRequest::new(
        args.snapshot.clone(),
        settings.scope_filter.clone(),
        settings.policy.clone(),
    )
    .with_root_module(settings.root_module.clone())
    .with_pins_path(settings.pins_path.clone())
    .with_check_cve(vulnerability_repository.is_some());

    let use_case = GenerateSbomUseCase::new(
        FileSystemReader::new(),
        FileSystemReader::new(),
        resolver,
        reporter,
        vulnerability_repository,
        GitHubActionsEnvironment::from_process_env(),
    );

    let response = use_case.execute(request).await?;

    let presenter: Box<dyn OutputPresenter> = match &args.output {
        Some(path) => Box::new(FileSystemWriter::new(path.clone())),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&response.to_json()?)?;

    if response.policy.should_fail() {
        eprintln!("\n❌ {}\n", response.policy.to_error());
        return Ok(ExitCode::PolicyViolation);
    }

    Ok(ExitCode::Success)
}

/// An explicit `--config` must exist; otherwise look next to the snapshot.
fn load_config(args: &Args) -> Result<Option<ConfigFile>> {
    if let Some(path) = &args.config {
        return load_config_from_path(path).map(Some);
    }
    let dir = match args.snapshot.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    discover_config(dir)
}

/// Local cache first, then the remote sources in a fixed order
fn license_sources(
    settings: &Settings,
    client: Option<&reqwest::Client>,
) -> Vec<Box<dyn LicenseSource>> {
    let mut sources: Vec<Box<dyn LicenseSource>> = Vec::new();

    if let Some(cache_dir) = settings
        .license_cache_dir
        .clone()
        .or_else(LocalCacheLicenseSource::default_root)
    {
        sources.push(Box::new(LocalCacheLicenseSource::new(cache_dir)));
    }

    if let Some(client) = client {
        sources.push(Box::new(CachingLicenseSource::new(
            MavenRepositoryLicenseSource::maven_central(client.clone()),
        )));
        sources.push(Box::new(CachingLicenseSource::new(
            MavenRepositoryLicenseSource::google_maven(client.clone()),
        )));
        sources.push(Box::new(CachingLicenseSource::new(GitHubLicenseSource::new(
            client.clone(),
        ))));
    }

    sources
}

/// Effective run settings: command-line flags over config file over defaults
#[derive(Debug)]
struct Settings {
    root_module: Option<ModuleId>,
    scope_filter: ScopeFilter,
    pins_path: Option<PathBuf>,
    license_cache_dir: Option<PathBuf>,
    policy: PolicyConfig,
    check_cve: bool,
    offline: bool,
    warnings: Vec<String>,
}

impl Settings {
    fn resolve(args: &Args, config: &ConfigFile) -> Result<Self> {
        let mut warnings = Vec::new();

        let platform = args
            .platform
            .as_deref()
            .or(config.target_platform.as_deref())
            .unwrap_or("");
        let scope_filter = ScopeFilter::new(
            platform,
            args.include_debug || config.include_debug.unwrap_or(false),
            !args.exclude_release && config.include_release.unwrap_or(true),
            args.include_test || config.include_test.unwrap_or(false),
        );

        let allowed_licenses = if args.allowed_licenses.is_empty() {
            config.allowed_licenses.clone().unwrap_or_default()
        } else {
            args.allowed_licenses.clone()
        };

        let vulnerability_policy = match args
            .max_severity
            .as_deref()
            .or(config.max_allowed_severity.as_deref())
        {
            Some(raw) => VulnerabilityPolicy::parse(raw)?,
            None => VulnerabilityPolicy::default(),
        };

        let fail_policy = match args
            .fail_on_violation
            .as_deref()
            .or(config.fail_on_violation.as_deref())
        {
            Some(raw) => {
                let (policy, warning) = FailPolicy::parse_lenient(raw);
                warnings.extend(warning);
                policy
            }
            None => FailPolicy::default(),
        };

        Ok(Self {
            root_module: args
                .root_module
                .clone()
                .or_else(|| config.root_module.clone())
                .map(ModuleId::new),
            scope_filter,
            pins_path: args
                .pins
                .clone()
                .or_else(|| config.pinned_dependencies.clone()),
            license_cache_dir: args
                .license_cache
                .clone()
                .or_else(|| config.license_cache_dir.clone()),
            policy: PolicyConfig::new(allowed_licenses, vulnerability_policy, fail_policy)?,
            check_cve: args.check_cve || config.check_cve.unwrap_or(false),
            offline: args.offline || config.offline.unwrap_or(false),
            warnings,
        })
    }
}
