// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Modified Julian Date (`Time<MJD>`) specific extensions.
//!
//! Converts between day keys and proleptic-Gregorian civil dates.  Only the
//! integer part of the MJD is used: EOP rows are tabulated at 0h UTC and the
//! civil stamp carried by every record is the date at midnight.

use chrono::{NaiveDate, NaiveDateTime};

use super::instant::Time;
use super::scales::MJD;

/// `NaiveDate::num_days_from_ce()` of MJD 0 (1858-11-17).
const MJD_ZERO_DAYS_FROM_CE: i64 = 678_576;

impl Time<MJD> {
    /// Integer day number (floor of the MJD).
    ///
    /// Returns `None` for non-finite values.
    #[inline]
    pub fn day_number(&self) -> Option<i64> {
        let v = self.value();
        v.is_finite().then(|| v.floor() as i64)
    }

    /// Civil calendar date containing this MJD.
    ///
    /// Returns `None` if the value is not finite or falls outside chrono's
    /// representable range.
    pub fn civil_date(&self) -> Option<NaiveDate> {
        let days_from_ce = self.day_number()?.checked_add(MJD_ZERO_DAYS_FROM_CE)?;
        NaiveDate::from_num_days_from_ce_opt(i32::try_from(days_from_ce).ok()?)
    }

    /// Civil date at 00:00:00, the time stamp EOP rows are tabulated at.
    #[inline]
    pub fn civil_midnight(&self) -> Option<NaiveDateTime> {
        self.civil_date()?.and_hms_opt(0, 0, 0)
    }
}
