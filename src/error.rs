// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for reading and combining EOP series.

use std::fmt;
use std::path::PathBuf;

/// Result type for EOP operations.
pub type EopResult<T> = Result<T, EopError>;

/// Which input feed an I/O failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    /// IERS C04 finalized series.
    Reference,
    /// USNO `finals` rapid service / prediction series.
    Provisional,
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKind::Reference => f.write_str("reference (C04)"),
            SeriesKind::Provisional => f.write_str("provisional (finals)"),
        }
    }
}

/// Error type for EOP operations.
///
/// The `Display` output is the diagnostic handed to batch callers: it names
/// the source path and the underlying cause.
#[derive(Debug, thiserror::Error)]
pub enum EopError {
    #[error("failed to read {kind} series from {}: {source}", .path.display())]
    Read {
        kind: SeriesKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read leap-second table from {}: {source}", .path.display())]
    LeapSecondRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed leap-second entry on line {line}: {content:?}")]
    MalformedLeapSecond { line: usize, content: String },

    #[error(
        "cannot combine: the reference series, the provisional series and the leap-second table are all empty"
    )]
    NothingToCombine,

    #[error("cannot combine: the reference series is empty")]
    EmptyReference,

    #[error("cannot combine: the provisional series is empty")]
    EmptyProvisional,

    #[error(
        "cannot combine: the provisional series must supply {needed} days past the reference series but holds only {available} records"
    )]
    ProvisionalTooShort { needed: usize, available: usize },
}
