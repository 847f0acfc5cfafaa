// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Earth Orientation Parameter series
//!
//! Readers for the two public EOP products and a merger that splices them
//! into one continuous daily series with TAI−UT1 attached.
//!
//! # Inputs
//!
//! | Feed | Reader | Format |
//! |------|--------|--------|
//! | IERS C04 (finalized) | [`read_reference_file`] | 16 whitespace-delimited numbers per line |
//! | USNO `finals` (rapid + predicted) | [`read_provisional_file`] | fixed columns after a `YYMMDD` prefix |
//! | IERS `Leap_Second.dat` | [`LeapSecondTable::read_file`] | MJD, date, TAI−UTC |
//!
//! Malformed lines are skipped; only I/O failures surface as [`EopError`].
//!
//! # Combining
//!
//! [`combine`] keeps every reference day, appends the provisional days past
//! the last reference day, derives TAI−UT1 from a [`LeapSeconds`] source and
//! zero-fills provisional days without LOD.  [`combine_passthrough`] does the
//! same without the fill.
//!
//! ```no_run
//! use eop_series::{combine_files, LeapSecondTable};
//!
//! let series = combine_files("eopc04.1962-now", "finals.data", &LeapSecondTable::iers())?;
//! println!("{} days, LOD reliable until {:?}", series.len(), series.last_reliable_lod);
//! # Ok::<(), eop_series::EopError>(())
//! ```
//!
//! # Day keys
//!
//! Rows are keyed by [`ModifiedJulianDate`], a [`Time<MJD>`] instant.  Civil
//! dates are [`chrono::NaiveDateTime`] values at 0h UTC.

mod civil;
mod error;
mod fields;
pub(crate) mod instant;
mod leap_seconds;
mod merge;
mod provisional;
mod reader;
mod records;
mod reference;
pub(crate) mod scales;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use error::{EopError, EopResult, SeriesKind};
pub use fields::{parse_decimal, Column};
pub use instant::{Time, TimeScale};
pub use leap_seconds::{LeapSecondEntry, LeapSecondTable, LeapSeconds, PRE_LEAP_TAI_MINUS_UTC};
pub use merge::{
    combine, combine_files, combine_passthrough, combine_with, overlap_extension, tai_minus_ut1,
    CombinedSeries, LodPolicy,
};
pub use provisional::{
    columns as provisional_columns, parse_provisional, parse_provisional_str,
    parse_provisional_str_with, parse_provisional_with, read_provisional_file,
    read_provisional_file_with, ProvisionalFormat,
};
pub use records::{MergedRecord, ProvisionalRecord, RecordSource, ReferenceRecord, ReferenceSigmas};
pub use reference::{parse_reference, parse_reference_str, read_reference_file, REFERENCE_FIELDS};
pub use scales::MJD;

// ── Type alias ──────────────────────────────────────────────────────────

/// Modified Julian Date, `JD − 2 400 000.5`.
///
/// The key of every EOP row.
pub type ModifiedJulianDate = Time<MJD>;
