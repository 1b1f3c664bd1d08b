/// Use cases module containing application business logic orchestration
mod generate_sbom;
mod license_resolver;

pub use generate_sbom::GenerateSbomUseCase;
pub use license_resolver::{LicenseLookup, LicenseResolver};
