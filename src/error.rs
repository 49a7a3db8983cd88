use thiserror::Error;

/// Convenience result type for fallible parsing operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type returned when external text is turned into records or pipeline descriptors.
///
/// The factories and the runner never fail; only ingestion and descriptor parsing do.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Malformed JSON input.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed CSV input.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The JSON was well-formed but is not a valid pipeline descriptor.
    #[error("invalid descriptor: {message}")]
    Descriptor { message: String },

    /// The input parsed but does not have the shape of a record collection.
    #[error("ingestion error: {message}")]
    Ingestion { message: String },
}
