pub mod failure;
pub mod prompt;
pub mod request;
pub mod service;

pub use failure::{FailureKind, GenerationFailure};
pub use request::{GenerationRequest, GenerationResult};
pub use service::EmailGenerator;
