/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console,
/// CI environment).
pub mod ci_environment;
pub mod license_source;
pub mod output_presenter;
pub mod pinned_dependency_reader;
pub mod progress_reporter;
pub mod snapshot_reader;
pub mod vulnerability_repository;

pub use ci_environment::CiEnvironment;
pub use license_source::LicenseSource;
pub use output_presenter::OutputPresenter;
pub use pinned_dependency_reader::{PinnedDependencies, PinnedDependencyReader};
pub use progress_reporter::ProgressReporter;
pub use snapshot_reader::ProjectSnapshotReader;
pub use vulnerability_repository::VulnerabilityRepository;
