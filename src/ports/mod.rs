/// Ports module defining interfaces for hexagonal architecture
///
/// The application core drives the outside world (host snapshot, license
/// sources, vulnerability database, CI environment, console) only through
/// the outbound ports declared here.
pub mod outbound;
