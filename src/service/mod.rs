pub mod document;
pub mod extraction;
pub mod intake;
pub mod llm;
pub mod routing;

pub use extraction::{ExtractionCoordinator, ModelExtractor};
pub use intake::ClaimIntakeService;
pub use llm::LlmClient;
