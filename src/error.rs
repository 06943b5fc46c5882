use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HighlightError>;

#[derive(Error, Debug)]
pub enum HighlightError {
    /// `process` was called before any image was loaded.
    #[error("No image loaded")]
    NoImageLoaded,

    /// The segmentation model failed or returned output that cannot be used at all.
    #[error("Model '{model}' failed: {reason}")]
    ModelInvocation { model: String, reason: String },

    #[error("Failed to read label table {path}: {source}")]
    LabelTable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Label table is empty")]
    EmptyLabelTable,

    #[error("Failed to load predictions from {path}: {reason}")]
    PredictionFile { path: PathBuf, reason: String },
}

impl HighlightError {
    pub fn model_invocation(model: impl Into<String>, reason: impl ToString) -> Self {
        Self::ModelInvocation {
            model: model.into(),
            reason: reason.to_string(),
        }
    }
}
