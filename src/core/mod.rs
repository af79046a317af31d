pub mod engine;
pub mod normalizer;
pub mod prompt;

pub use crate::domain::model::{
    FieldValue, ParsedFields, Prompt, SimplificationRequest, SimplificationResult,
};
pub use crate::domain::ports::{CompletionService, ConfigProvider};
pub use crate::utils::error::Result;
