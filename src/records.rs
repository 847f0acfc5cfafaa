// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Earth orientation record types.
//!
//! | Type | Produced by | Units |
//! |------|-------------|-------|
//! | [`ReferenceRecord`] | [`crate::reference`] | x, y, dψ, dε in ″; UT1−UTC, LOD in s |
//! | [`ProvisionalRecord`] | [`crate::provisional`] | x, y in ″; UT1−UTC, LOD in s |
//! | [`MergedRecord`] | [`crate::merge`] | x, y in ″; UT1−UTC, TAI−UT1, LOD in s |
//!
//! All records are plain `Copy` values built once from one input line (or
//! one merge step) and never mutated afterwards.

use chrono::NaiveDateTime;
use qtty::{Arcseconds, Seconds};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ModifiedJulianDate;

/// 1-sigma uncertainties published next to each C04 quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReferenceSigmas {
    pub x: Arcseconds,
    pub y: Arcseconds,
    pub ut1_utc: Seconds,
    pub lod: Seconds,
    pub dpsi: Arcseconds,
    pub deps: Arcseconds,
}

/// One day of the finalized IERS C04 series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReferenceRecord {
    pub mjd: ModifiedJulianDate,
    /// Civil date of the row at 0h.
    pub time: NaiveDateTime,
    /// Pole coordinate x.
    pub x: Arcseconds,
    /// Pole coordinate y.
    pub y: Arcseconds,
    pub ut1_utc: Seconds,
    /// Excess length of day.
    pub lod: Seconds,
    /// Celestial pole offset in longitude.
    pub dpsi: Arcseconds,
    /// Celestial pole offset in obliquity.
    pub deps: Arcseconds,
    pub sigma: ReferenceSigmas,
}

/// One day of the USNO `finals` rapid service / prediction series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProvisionalRecord {
    pub mjd: ModifiedJulianDate,
    /// Civil date of the row at 0h, derived from `mjd`.
    pub time: NaiveDateTime,
    pub x: Arcseconds,
    pub y: Arcseconds,
    pub ut1_utc: Seconds,
    /// Excess length of day; `None` when the file carries no value.
    pub lod: Option<Seconds>,
    /// `true` for forecast rows, `false` for measured ones.
    pub predicted: bool,
}

/// Which feed a [`MergedRecord`] was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RecordSource {
    Reference,
    Provisional { predicted: bool },
}

/// One day of the combined series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MergedRecord {
    pub mjd: ModifiedJulianDate,
    pub time: NaiveDateTime,
    pub x: Arcseconds,
    pub y: Arcseconds,
    pub ut1_utc: Seconds,
    /// TAI−UT1, derived from the leap-second table and `ut1_utc`.
    pub tai_ut1: Seconds,
    /// Excess length of day.
    ///
    /// Under [`LodPolicy::ZeroFill`](crate::LodPolicy::ZeroFill) this is always
    /// `Some`, with `0 s` standing in for days the provisional feed left blank.
    pub lod: Option<Seconds>,
    pub source: RecordSource,
}

impl MergedRecord {
    pub(crate) fn from_reference(record: &ReferenceRecord, tai_ut1: Seconds) -> Self {
        Self {
            mjd: record.mjd,
            time: record.time,
            x: record.x,
            y: record.y,
            ut1_utc: record.ut1_utc,
            tai_ut1,
            lod: Some(record.lod),
            source: RecordSource::Reference,
        }
    }

    pub(crate) fn from_provisional(
        record: &ProvisionalRecord,
        tai_ut1: Seconds,
        lod: Option<Seconds>,
    ) -> Self {
        Self {
            mjd: record.mjd,
            time: record.time,
            x: record.x,
            y: record.y,
            ut1_utc: record.ut1_utc,
            tai_ut1,
            lod,
            source: RecordSource::Provisional {
                predicted: record.predicted,
            },
        }
    }

    /// `true` when the row is a forecast rather than a measurement.
    #[inline]
    pub fn is_predicted(&self) -> bool {
        matches!(self.source, RecordSource::Provisional { predicted: true })
    }
}
