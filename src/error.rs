use std::fmt;

use thiserror::Error;

use crate::element::ElementKind;

/// What a range check counts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Elements,
    Bytes,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Elements => f.write_str("elements"),
            Unit::Bytes => f.write_str("bytes"),
        }
    }
}

/// Where a view's elements live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackingKind {
    Direct,
    Array,
}

impl fmt::Display for BackingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackingKind::Direct => f.write_str("direct"),
            BackingKind::Array => f.write_str("array"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Fewer elements or bytes are available than a native call needs.
    #[error("required {required} remaining {unit}, only had {available}")]
    OutOfBounds {
        required: usize,
        available: usize,
        unit: Unit,
    },

    /// A backing-specific accessor was used on the other kind of storage.
    #[error("{operation} is not supported on a {backing} {kind} buffer")]
    UnsupportedBackingStore {
        kind: ElementKind,
        backing: BackingKind,
        operation: &'static str,
    },

    /// A raw element tag outside the known set.
    #[error("unexpected buffer element tag {0}")]
    UnsupportedVariant(u8),

    /// A cursor update would break `position <= limit <= capacity`.
    #[error("invalid cursor: position {position}, limit {limit}, capacity {capacity}")]
    InvalidCursor {
        position: usize,
        limit: usize,
        capacity: usize,
    },
}

impl BufferError {
    pub(crate) fn out_of_bounds(required: usize, available: usize, unit: Unit) -> Self {
        Self::OutOfBounds {
            required,
            available,
            unit,
        }
    }
}
