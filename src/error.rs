use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{name} must be greater than {floor} (current value is {value})")]
    InvalidArgument {
        name: &'static str,
        value: usize,
        floor: usize,
    },
    #[error("queue underflow")]
    Underflow,
    #[error("queue is empty")]
    Empty,
    #[error("queue overflow (capacity {capacity})")]
    Overflow { capacity: usize },
    #[error("queue capacity exhausted at {capacity} slots")]
    CapacityExhausted { capacity: usize },
    #[error("target too small: need {required} slots, have {available}")]
    TargetTooSmall { required: usize, available: usize },
    #[error("unknown queue kind: {0}")]
    UnknownKind(String),
    #[error("invalid queue config: {0}")]
    InvalidConfig(String),
    #[cfg(feature = "serde")]
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// True for the two "nothing to take" errors, `Underflow` and `Empty`.
    pub fn is_empty_queue(&self) -> bool {
        matches!(self, Error::Underflow | Error::Empty)
    }

    /// Rejects `value` unless it is strictly greater than `floor`.
    pub(crate) fn check_above(name: &'static str, value: usize, floor: usize) -> Result<usize> {
        if value <= floor {
            return Err(Error::InvalidArgument { name, value, floor });
        }
        Ok(value)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
