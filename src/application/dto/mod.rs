/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod generation_request;
mod generation_response;

pub use generation_request::GenerationRequest;
pub use generation_response::{ComponentEntry, GenerationResponse};
