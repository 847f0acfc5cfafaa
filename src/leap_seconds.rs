// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Leap seconds — TAI−UTC lookup
//!
//! TAI−UT1 is not published by either EOP feed; it is derived as
//! `(TAI−UTC) − (UT1−UTC)`, where TAI−UTC is the cumulative integer
//! leap-second offset in effect on the row's day.
//!
//! [`LeapSeconds`] is the interface the merger consumes.  [`LeapSecondTable`]
//! implements it over an ascending list of thresholds, either the built-in
//! IERS Bulletin C history ([`LeapSecondTable::iers`]) or an IERS
//! `Leap_Second.dat` file ([`LeapSecondTable::read_file`]).
//!
//! Before 1972-01-01 there is no applicable entry; callers fall back to
//! [`PRE_LEAP_TAI_MINUS_UTC`].
//!
//! ## References
//! * IERS Bulletin C (leap second announcements)
//! * <https://hpiers.obspm.fr/iers/bul/bulc/Leap_Second.dat>

use std::path::Path;

use qtty::Seconds;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{EopError, EopResult};
use crate::fields::parse_decimal;
use crate::ModifiedJulianDate;

/// TAI−UTC adopted on 1972-01-01, used where no table entry applies.
pub const PRE_LEAP_TAI_MINUS_UTC: Seconds = Seconds::new(10.0);

/// Source of the cumulative TAI−UTC offset.
pub trait LeapSeconds {
    /// TAI−UTC of the latest entry whose threshold is `<= mjd`, or `None`
    /// if no entry applies.
    fn tai_minus_utc(&self, mjd: ModifiedJulianDate) -> Option<Seconds>;

    /// `true` when the source holds no entries at all.
    fn is_empty(&self) -> bool;
}

/// TAI−UTC in effect at and after `mjd`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LeapSecondEntry {
    pub mjd: ModifiedJulianDate,
    pub tai_minus_utc: Seconds,
}

impl LeapSecondEntry {
    pub const fn new(mjd: f64, tai_minus_utc: f64) -> Self {
        Self {
            mjd: ModifiedJulianDate::new(mjd),
            tai_minus_utc: Seconds::new(tai_minus_utc),
        }
    }
}

/// IERS Bulletin C history: (MJD of 0h UTC on the first day the offset
/// applies, cumulative TAI−UTC after it).
const IERS_LEAP_SECONDS: [(f64, f64); 28] = [
    (41_317.0, 10.0), // 1972-01-01
    (41_499.0, 11.0), // 1972-07-01
    (41_683.0, 12.0), // 1973-01-01
    (42_048.0, 13.0), // 1974-01-01
    (42_413.0, 14.0), // 1975-01-01
    (42_778.0, 15.0), // 1976-01-01
    (43_144.0, 16.0), // 1977-01-01
    (43_509.0, 17.0), // 1978-01-01
    (43_874.0, 18.0), // 1979-01-01
    (44_239.0, 19.0), // 1980-01-01
    (44_786.0, 20.0), // 1981-07-01
    (45_151.0, 21.0), // 1982-07-01
    (45_516.0, 22.0), // 1983-07-01
    (46_247.0, 23.0), // 1985-07-01
    (47_161.0, 24.0), // 1988-01-01
    (47_892.0, 25.0), // 1990-01-01
    (48_257.0, 26.0), // 1991-01-01
    (48_804.0, 27.0), // 1992-07-01
    (49_169.0, 28.0), // 1993-07-01
    (49_534.0, 29.0), // 1994-07-01
    (50_083.0, 30.0), // 1996-01-01
    (50_630.0, 31.0), // 1997-07-01
    (51_179.0, 32.0), // 1999-01-01
    (53_736.0, 33.0), // 2006-01-01
    (54_832.0, 34.0), // 2009-01-01
    (56_109.0, 35.0), // 2012-07-01
    (57_204.0, 36.0), // 2015-07-01
    (57_754.0, 37.0), // 2017-01-01
];

/// Ordered table of leap-second thresholds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeapSecondTable {
    entries: Vec<LeapSecondEntry>,
}

impl LeapSecondTable {
    /// Build a table; entries are ordered by threshold (stable for ties).
    pub fn new(mut entries: Vec<LeapSecondEntry>) -> Self {
        entries.sort_by(|a, b| a.mjd.value().total_cmp(&b.mjd.value()));
        Self { entries }
    }

    /// The leap seconds announced in IERS Bulletin C from 1972 to 2017.
    pub fn iers() -> Self {
        Self {
            entries: IERS_LEAP_SECONDS
                .iter()
                .map(|&(mjd, offset)| LeapSecondEntry::new(mjd, offset))
                .collect(),
        }
    }

    #[inline]
    pub fn entries(&self) -> &[LeapSecondEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Parse the IERS `Leap_Second.dat` layout.
    ///
    /// Lines starting with `#` are comments; every other non-blank line must
    /// read `MJD day month year TAI-UTC`.
    pub fn parse_str(text: &str) -> EopResult<Self> {
        let mut entries = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let entry = parse_entry(line).ok_or_else(|| EopError::MalformedLeapSecond {
                line: index + 1,
                content: raw.to_string(),
            })?;
            entries.push(entry);
        }
        Ok(Self::new(entries))
    }

    /// Read an IERS `Leap_Second.dat` file.
    pub fn read_file(path: impl AsRef<Path>) -> EopResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EopError::LeapSecondRead {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse_str(&text)?;
        log::info!(
            "read {} leap-second entries from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }
}

fn parse_entry(line: &str) -> Option<LeapSecondEntry> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [mjd, _day, _month, _year, offset] = tokens.as_slice() else {
        return None;
    };
    Some(LeapSecondEntry::new(
        parse_decimal(mjd)?,
        parse_decimal(offset)?,
    ))
}

impl FromIterator<LeapSecondEntry> for LeapSecondTable {
    fn from_iter<I: IntoIterator<Item = LeapSecondEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl LeapSeconds for LeapSecondTable {
    #[inline]
    fn tai_minus_utc(&self, mjd: ModifiedJulianDate) -> Option<Seconds> {
        let after = self.entries.partition_point(|entry| entry.mjd <= mjd);
        after
            .checked_sub(1)
            .map(|last| self.entries[last].tai_minus_utc)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
