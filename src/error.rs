pub type ChartResult<T> = Result<T, ChartError>;

#[derive(thiserror::Error, Debug)]
pub enum ChartError {
    #[error("malformed date: {0}")]
    MalformedDate(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("invalid span: {0}")]
    InvalidSpan(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("output write error: {0}")]
    OutputWrite(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChartError {
    pub fn malformed_date(msg: impl Into<String>) -> Self {
        Self::MalformedDate(msg.into())
    }

    pub fn unknown_category(msg: impl Into<String>) -> Self {
        Self::UnknownCategory(msg.into())
    }

    pub fn invalid_span(msg: impl Into<String>) -> Self {
        Self::InvalidSpan(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn output_write(msg: impl Into<String>) -> Self {
        Self::OutputWrite(msg.into())
    }
}
