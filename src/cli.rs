use clap::Parser;
use std::path::PathBuf;

/// Collapse a multi-module build's resolved dependencies into one
/// deduplicated graph, resolve licenses and enforce dependency policy
#[derive(Parser, Debug)]
#[command(name = "depgraph-sbom")]
#[command(version)]
#[command(about = "Dependency inventory and policy check for multi-module builds", long_about = None)]
pub struct Args {
    /// Path to the project snapshot exported by the build
    #[arg(short, long, default_value = "build/depgraph-snapshot.json")]
    pub snapshot: PathBuf,

    /// Path to a config file (defaults to depgraph-sbom.config.yml next to the snapshot)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Root module to start from, overriding the snapshot's root (e.g. ":app")
    #[arg(long, value_name = "MODULE")]
    pub root_module: Option<String>,

    /// Target platform whose scopes are collected (e.g. android, ios, jvm)
    #[arg(long)]
    pub platform: Option<String>,

    /// Include debug scopes
    #[arg(long)]
    pub include_debug: bool,

    /// Exclude release scopes
    #[arg(long)]
    pub exclude_release: bool,

    /// Include test scopes
    #[arg(long)]
    pub include_test: bool,

    /// Pinned-dependency descriptor (e.g. Package.resolved)
    #[arg(long, value_name = "PATH")]
    pub pins: Option<PathBuf>,

    /// Local artifact cache searched for license descriptors
    #[arg(long, value_name = "DIR")]
    pub license_cache: Option<PathBuf>,

    /// Allowed license id; repeat for several: --allowed-license MIT --allowed-license Apache-2.0
    #[arg(long = "allowed-license", value_name = "ID")]
    pub allowed_licenses: Vec<String>,

    /// Most severe vulnerability allowed: NONE, LOW, MEDIUM, HIGH, CRITICAL or DISABLED
    #[arg(long, value_name = "LEVEL")]
    pub max_severity: Option<String>,

    /// When violations fail the run: always, pull-request or never
    #[arg(long, value_name = "POLICY")]
    pub fail_on_violation: Option<String>,

    /// Query OSV for known vulnerabilities
    #[arg(long)]
    pub check_cve: bool,

    /// Never touch the network (local cache only, no vulnerability check)
    #[arg(long)]
    pub offline: bool,
}
