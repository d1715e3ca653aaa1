pub mod providers;

pub use providers::{MockFailure, MockVision, OpenAiVision, ProviderRegistry};
