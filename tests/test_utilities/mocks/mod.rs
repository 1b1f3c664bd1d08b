/// Mock implementations for testing
mod mock_ci_environment;
mod mock_license_source;
mod mock_pin_reader;
mod mock_progress_reporter;
mod mock_snapshot_reader;
mod mock_vulnerability_repository;

pub use mock_ci_environment::MockCiEnvironment;
pub use mock_license_source::MockLicenseSource;
pub use mock_pin_reader::MockPinReader;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_snapshot_reader::MockSnapshotReader;
pub use mock_vulnerability_repository::MockVulnerabilityRepository;
