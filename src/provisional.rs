// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Reader for the USNO rapid service / prediction series (`finals.data`,
//! `finals2000A.data`).
//!
//! The format packs fields into fixed character columns with no reliable
//! delimiter, so values are located by position.  Each line starts with a
//! `YYMMDD` date prefix; the column offsets below are counted from the end
//! of that prefix (the *record body*):
//!
//! | Field | Body columns | Unit |
//! |-------|--------------|------|
//! | MJD | 0..9 | d |
//! | x | 11..21 | ″ |
//! | y | 30..40 | ″ |
//! | UT1−UTC | 52..62 | s |
//! | LOD | 72..80 | ms |
//!
//! A blank or zero column means "no data".  MJD, x, y and UT1−UTC are
//! required; rows past the end of the measured LOD simply carry `None`.
//! Any `P` in the body marks the row as a prediction.

use std::io::{self, BufRead};
use std::path::Path;

use qtty::{Arcseconds, Seconds};

use crate::error::{EopResult, SeriesKind};
use crate::reader::{read_series_file, scan_lines};
use crate::records::ProvisionalRecord;
use crate::ModifiedJulianDate;

/// Body column layout of the `finals` format.
pub mod columns {
    use crate::fields::Column;

    pub const MJD: Column = Column::new(0, 9);
    pub const X: Column = Column::new(11, 10);
    pub const Y: Column = Column::new(30, 10);
    pub const UT1_UTC: Column = Column::new(52, 10);
    pub const LOD: Column = Column::new(72, 8);
}

/// Marker character of predicted rows.
const PREDICTION_FLAG: char = 'P';

const MILLISECONDS_PER_SECOND: f64 = 1_000.0;

/// How a `finals` line maps onto the record body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionalFormat {
    /// Characters stripped from the start of a line before column lookup.
    ///
    /// Only applied to lines longer than the prefix itself.
    pub date_prefix: usize,
}

impl ProvisionalFormat {
    /// Published `finals` files: six-character `YYMMDD` prefix.
    pub const FINALS: Self = Self { date_prefix: 6 };

    /// Lines that already start at the MJD column.
    pub const BARE: Self = Self { date_prefix: 0 };

    fn body<'a>(&self, line: &'a str) -> Option<&'a str> {
        if line.len() > self.date_prefix {
            line.get(self.date_prefix..)
        } else {
            Some(line)
        }
    }

    /// Parse one line, or `None` if a required field is missing.
    pub fn parse_line(&self, line: &str) -> Option<ProvisionalRecord> {
        let body = self.body(line)?;

        let mjd = ModifiedJulianDate::new(columns::MJD.extract(body)?);
        let x = columns::X.extract(body)?;
        let y = columns::Y.extract(body)?;
        let ut1_utc = columns::UT1_UTC.extract(body)?;
        let lod = columns::LOD
            .extract(body)
            .map(|ms| Seconds::new(ms / MILLISECONDS_PER_SECOND));

        Some(ProvisionalRecord {
            mjd,
            time: mjd.civil_midnight()?,
            x: Arcseconds::new(x),
            y: Arcseconds::new(y),
            ut1_utc: Seconds::new(ut1_utc),
            lod,
            predicted: body.contains(PREDICTION_FLAG),
        })
    }
}

impl Default for ProvisionalFormat {
    fn default() -> Self {
        Self::FINALS
    }
}

impl ProvisionalRecord {
    /// Parse one line of a published `finals` file.
    #[inline]
    pub fn from_line(line: &str) -> Option<Self> {
        ProvisionalFormat::FINALS.parse_line(line)
    }
}

/// Parse `finals` records from an in-memory string.
pub fn parse_provisional_str(text: &str) -> Vec<ProvisionalRecord> {
    parse_provisional_str_with(text, &ProvisionalFormat::FINALS)
}

/// Parse records from an in-memory string with an explicit layout.
pub fn parse_provisional_str_with(text: &str, format: &ProvisionalFormat) -> Vec<ProvisionalRecord> {
    text.lines().filter_map(|line| format.parse_line(line)).collect()
}

/// Parse `finals` records from any buffered reader.
pub fn parse_provisional<R: BufRead>(reader: R) -> io::Result<Vec<ProvisionalRecord>> {
    parse_provisional_with(reader, &ProvisionalFormat::FINALS)
}

/// Parse records from a buffered reader with an explicit layout.
pub fn parse_provisional_with<R: BufRead>(
    reader: R,
    format: &ProvisionalFormat,
) -> io::Result<Vec<ProvisionalRecord>> {
    scan_lines(reader, |line| format.parse_line(line)).map(|scan| scan.records)
}

/// Parse a `finals` file from disk.
///
/// Fails only if the file cannot be opened or read; the error names the path.
pub fn read_provisional_file(path: impl AsRef<Path>) -> EopResult<Vec<ProvisionalRecord>> {
    read_provisional_file_with(path, &ProvisionalFormat::FINALS)
}

/// Parse a file from disk with an explicit layout.
pub fn read_provisional_file_with(
    path: impl AsRef<Path>,
    format: &ProvisionalFormat,
) -> EopResult<Vec<ProvisionalRecord>> {
    read_series_file(path.as_ref(), SeriesKind::Provisional, |line| {
        format.parse_line(line)
    })
}
