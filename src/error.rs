use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A registry record failed its post-load validation pass.
    #[error("invalid {type_name} definition `{name}`: {reason}")]
    InvalidDefinition {
        name: String,
        type_name: &'static str,
        reason: String,
    },

    /// Programming defect, never a recoverable runtime condition.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
