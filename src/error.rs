use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Range,
    Domain,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("node count {n} outside {min}..={max}")]
    NodeCount { n: usize, min: usize, max: usize },
    #[error("source and sink must differ (both are {0})")]
    SourceIsSink(usize),
    #[error("{role} {index} outside 0..{n}")]
    TerminalOutOfRange {
        role: &'static str,
        index: usize,
        n: usize,
    },
    #[error("edge {from}→{to} outside 0..{n}")]
    EndpointOutOfRange { from: usize, to: usize, n: usize },
    #[error("line {line}: negative node index {value}")]
    NegativeEndpoint { line: usize, value: i64 },
    #[error("negative capacity {capacity} on edge {from}→{to}")]
    NegativeCapacity {
        from: usize,
        to: usize,
        capacity: i64,
    },
    #[error("duplicate edge {from}→{to}")]
    DuplicateEdge { from: usize, to: usize },
    #[error("line {line}: expected `u v capacity`, got `{text}`")]
    MalformedEdge { line: usize, text: String },
    #[error("capacity range {min}..={max} is empty or negative")]
    CapacityRange { min: i64, max: i64 },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::TerminalOutOfRange { .. }
            | ValidationError::EndpointOutOfRange { .. }
            | ValidationError::NegativeEndpoint { .. } => ErrorKind::Range,
            _ => ErrorKind::Domain,
        }
    }
}

/// Any failure talking to the computation service.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service responded {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("invalid service url: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("a request is already pending")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("nothing to animate, solve the network first")]
    NothingToAnimate,
    #[error("an animation is already running")]
    AlreadyRunning,
}
