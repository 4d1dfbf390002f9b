pub mod generation;

pub use generation::{GenerationRequest, GenerationResponse, first_validation_message};
