use thiserror::Error;

/// Errors raised while validating an index space, a blocking, an iteration
/// order or a worker rank. All of them are raised before any work is done.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    #[error("indices must be defined by integers or integer ranges, got `{0}`")]
    NotAnInteger(String),

    #[error("range stop must not be omitted")]
    MissingStop,

    #[error("range step must be a positive integer, got {0}")]
    NonPositiveStep(i64),

    #[error("at least one axis is required")]
    NoAxes,

    #[error("number of block dimensions ({blocks}) must match number of axes ({axes})")]
    BlockingMismatch { blocks: usize, axes: usize },

    #[error("block size along axis {axis} must be positive")]
    InvalidBlockSize { axis: usize },

    #[error("iteration order must be one of 'C' or 'F', got `{0}`")]
    UnknownOrder(String),

    #[error("iteration order '{0}' is not supported (only 'C' is currently supported)")]
    UnsupportedOrder(char),

    #[error("worker count must be greater than 0")]
    InvalidWorkerCount,

    #[error("rank {rank} out of range for {size} workers")]
    RankOutOfRange { rank: usize, size: usize },
}

/// The two failure classes callers can distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong element type or a missing mandatory bound.
    MalformedInput,
    /// Unsupported order, blocking arity mismatch or an invalid rank/size pair.
    ConfigMismatch,
}

impl TileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TileError::NotAnInteger(_)
            | TileError::MissingStop
            | TileError::NonPositiveStep(_)
            | TileError::NoAxes => ErrorKind::MalformedInput,
            TileError::BlockingMismatch { .. }
            | TileError::InvalidBlockSize { .. }
            | TileError::UnknownOrder(_)
            | TileError::UnsupportedOrder(_)
            | TileError::InvalidWorkerCount
            | TileError::RankOutOfRange { .. } => ErrorKind::ConfigMismatch,
        }
    }
}

pub type Result<T> = std::result::Result<T, TileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_offending_values() {
        let e = TileError::BlockingMismatch { blocks: 2, axes: 1 };
        assert_eq!(
            e.to_string(),
            "number of block dimensions (2) must match number of axes (1)"
        );

        let e = TileError::RankOutOfRange { rank: 5, size: 5 };
        assert_eq!(e.to_string(), "rank 5 out of range for 5 workers");
    }

    #[test]
    fn kinds_split_input_from_configuration() {
        assert_eq!(TileError::MissingStop.kind(), ErrorKind::MalformedInput);
        assert_eq!(
            TileError::NotAnInteger("x".into()).kind(),
            ErrorKind::MalformedInput
        );
        assert_eq!(TileError::UnsupportedOrder('F').kind(), ErrorKind::ConfigMismatch);
        assert_eq!(TileError::InvalidWorkerCount.kind(), ErrorKind::ConfigMismatch);
    }
}
