// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Reader for the IERS C04 series (`eopc04.62-now` and successors).
//!
//! Each data line carries exactly sixteen whitespace-separated numbers:
//!
//! ```text
//! year month day MJD  x y UT1-UTC LOD dPsi dEps  σx σy σUT1-UTC σLOD σdPsi σdEps
//! ```
//!
//! Header lines and anything else that does not match this shape are
//! skipped without aborting the file.

use std::io::{self, BufRead};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use qtty::{Arcseconds, Seconds};

use crate::error::{EopResult, SeriesKind};
use crate::fields::parse_decimal;
use crate::reader::{read_series_file, scan_lines};
use crate::records::{ReferenceRecord, ReferenceSigmas};
use crate::ModifiedJulianDate;

/// Number of tokens in a C04 data line.
pub const REFERENCE_FIELDS: usize = 16;

impl ReferenceRecord {
    /// Parse one C04 line, or `None` if the line is not a data row.
    pub fn from_line(line: &str) -> Option<Self> {
        let mut values = [0.0_f64; REFERENCE_FIELDS];
        let mut tokens = line.split_whitespace();
        for slot in values.iter_mut() {
            *slot = parse_decimal(tokens.next()?)?;
        }
        if tokens.next().is_some() {
            return None;
        }

        let [year, month, day, mjd, x, y, ut1_utc, lod, dpsi, deps, sx, sy, sut1, slod, sdpsi, sdeps] =
            values;

        Some(Self {
            mjd: ModifiedJulianDate::new(mjd),
            time: midnight(year, month, day)?,
            x: Arcseconds::new(x),
            y: Arcseconds::new(y),
            ut1_utc: Seconds::new(ut1_utc),
            lod: Seconds::new(lod),
            dpsi: Arcseconds::new(dpsi),
            deps: Arcseconds::new(deps),
            sigma: ReferenceSigmas {
                x: Arcseconds::new(sx),
                y: Arcseconds::new(sy),
                ut1_utc: Seconds::new(sut1),
                lod: Seconds::new(slod),
                dpsi: Arcseconds::new(sdpsi),
                deps: Arcseconds::new(sdeps),
            },
        })
    }
}

/// Civil date from the numeric year/month/day columns (truncated), at 0h.
fn midnight(year: f64, month: f64, day: f64) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)?.and_hms_opt(0, 0, 0)
}

/// Parse C04 records from an in-memory string.
pub fn parse_reference_str(text: &str) -> Vec<ReferenceRecord> {
    text.lines().filter_map(ReferenceRecord::from_line).collect()
}

/// Parse C04 records from any buffered reader.
pub fn parse_reference<R: BufRead>(reader: R) -> io::Result<Vec<ReferenceRecord>> {
    scan_lines(reader, ReferenceRecord::from_line).map(|scan| scan.records)
}

/// Parse a C04 file from disk.
///
/// Fails only if the file cannot be opened or read; the error names the path.
pub fn read_reference_file(path: impl AsRef<Path>) -> EopResult<Vec<ReferenceRecord>> {
    read_series_file(path.as_ref(), SeriesKind::Reference, ReferenceRecord::from_line)
}
