pub mod error;
pub mod traits;
pub mod types;

pub use error::InkError;
pub use traits::{GenerateReply, GenerateRequest, ImagePart, VisionModel};
pub use types::{
    AnalysisRecord, AnalysisRequest, ApiResponse, QuizItem, QuizRequest, ResponseStatus,
};
