// Adapters layer: concrete implementations for external systems (the completion API).

pub mod openai;

pub use openai::OpenAiClient;
