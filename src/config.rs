//! Engine selection by name.
//!
//! Lets a caller (a benchmark harness, a config file) pick an engine and its
//! sizing parameter without naming the concrete type. The textual form is
//! `<Kind>[-<size>]`, e.g. `ChunkedQueue-128` or `linked`.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::engines::{ChunkedQueue, CyclicQueue, DynamicCyclicQueue, LinkedQueue};
use crate::error::{Error, Result};
use crate::queue::Queue;

/// The four queue engines. Serialized as the canonical type name, parsed with
/// the same rules as `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum QueueKind {
    Linked,
    Cyclic,
    DynamicCyclic,
    Chunked,
}

impl QueueKind {
    pub const ALL: [QueueKind; 4] = [
        QueueKind::Linked,
        QueueKind::Cyclic,
        QueueKind::DynamicCyclic,
        QueueKind::Chunked,
    ];

    /// Canonical type name, as accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            QueueKind::Linked => "LinkedQueue",
            QueueKind::Cyclic => "CyclicQueue",
            QueueKind::DynamicCyclic => "DynamicCyclicQueue",
            QueueKind::Chunked => "ChunkedQueue",
        }
    }

    pub fn is_bounded(self) -> bool {
        matches!(self, QueueKind::Cyclic)
    }
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QueueKind {
    type Err = Error;

    /// Case-insensitive; accepts the type name with or without the `Queue`
    /// suffix, and underscores anywhere (`dynamic_cyclic`).
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        let stem = normalized.strip_suffix("queue").unwrap_or(&normalized);
        match stem {
            "linked" => Ok(QueueKind::Linked),
            "cyclic" => Ok(QueueKind::Cyclic),
            "dynamiccyclic" => Ok(QueueKind::DynamicCyclic),
            "chunked" => Ok(QueueKind::Chunked),
            _ => Err(Error::UnknownKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for QueueKind {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<QueueKind> for String {
    fn from(kind: QueueKind) -> String {
        kind.name().to_string()
    }
}

/// An engine plus its optional sizing parameter.
///
/// `size` is the chunk size for `Chunked`, the capacity for `Cyclic`, the
/// initial capacity for `DynamicCyclic`, and must be `None` for `Linked`.
/// `None` picks the engine's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QueueConfig {
    pub kind: QueueKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub size: Option<usize>,
}

impl QueueConfig {
    pub fn new(kind: QueueKind) -> Self {
        Self { kind, size: None }
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Constructs the configured engine behind the common contract.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument`: `size` is below the engine's floor
    /// - `Error::InvalidConfig`: a size was given for `Linked`
    pub fn build<T: 'static>(&self) -> Result<Box<dyn Queue<T>>> {
        let queue: Box<dyn Queue<T>> = match (self.kind, self.size) {
            (QueueKind::Linked, None) => Box::new(LinkedQueue::new()),
            (QueueKind::Linked, Some(size)) => {
                return Err(Error::InvalidConfig(format!(
                    "LinkedQueue takes no size (got {size})"
                )))
            }
            (QueueKind::Cyclic, None) => Box::new(CyclicQueue::default()),
            (QueueKind::Cyclic, Some(size)) => Box::new(CyclicQueue::new(size)?),
            (QueueKind::DynamicCyclic, None) => Box::new(DynamicCyclicQueue::default()),
            (QueueKind::DynamicCyclic, Some(size)) => Box::new(DynamicCyclicQueue::new(size)?),
            (QueueKind::Chunked, None) => Box::new(ChunkedQueue::default()),
            (QueueKind::Chunked, Some(size)) => Box::new(ChunkedQueue::new(size)?),
        };
        Ok(queue)
    }
}

impl fmt::Display for QueueConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.size {
            Some(size) => write!(f, "{}-{}", self.kind, size),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl FromStr for QueueConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, size) = match s.split_once('-') {
            Some((kind, size)) => (kind, Some(size)),
            None => (s, None),
        };
        let kind = kind.parse::<QueueKind>()?;
        let size = match size {
            Some(raw) => Some(raw.trim().parse::<usize>().map_err(|err| {
                Error::InvalidConfig(format!("bad size {raw:?} in {s:?}: {err}"))
            })?),
            None => None,
        };
        Ok(Self { kind, size })
    }
}
