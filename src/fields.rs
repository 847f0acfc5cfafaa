// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Numeric field primitives shared by the series parsers.
//!
//! Two ways of locating a value in a line exist:
//!
//! - **Delimited tokens** (C04): [`parse_decimal`] on each whitespace-separated
//!   token.
//! - **Fixed columns** (finals): [`Column::extract`], where the column's start
//!   and width are the only place the file layout is encoded.

/// Parse a token as a finite real number.
///
/// The convention is locale-invariant: `.` is the decimal separator, no
/// digit grouping is accepted, and an optional sign or exponent is allowed.
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected.
#[inline]
pub fn parse_decimal(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit() || b"+-.eE".contains(&b)) {
        return None;
    }
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A fixed-width field in a column-formatted line.
///
/// Offsets count bytes from the start of the record body; the formats read
/// here are plain ASCII.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Zero-based index of the first character.
    pub start: usize,
    /// Number of characters.
    pub width: usize,
}

impl Column {
    pub const fn new(start: usize, width: usize) -> Self {
        Self { start, width }
    }

    /// One past the last character; the minimum line length holding the column.
    #[inline]
    pub const fn end(&self) -> usize {
        self.start + self.width
    }

    /// Raw text of the column, or `None` if the line is too short.
    #[inline]
    pub fn slice<'a>(&self, line: &'a str) -> Option<&'a str> {
        line.get(self.start..self.end())
    }

    /// Numeric value of the column.
    ///
    /// Blank-padded zero columns mean "no data" in these formats, so a column
    /// that is absent, unparseable, or reads exactly `0.0` is `None`.
    pub fn extract(&self, line: &str) -> Option<f64> {
        self.slice(line)
            .and_then(parse_decimal)
            .filter(|v| *v != 0.0)
    }
}
