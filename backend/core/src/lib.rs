pub mod error;
pub mod prompt;
pub mod traits;
pub mod types;

pub use error::LumenError;
pub use prompt::AnalysisPrompt;
pub use traits::VisionProvider;
pub use types::{
    AnalysisRequest, HistoryEntry, NormalizedImage, UploadedImage, VisionResponse,
};
