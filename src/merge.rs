// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Combination of the C04 reference series with the `finals` provisional
//! series into one continuous daily series.
//!
//! ## Splice
//!
//! Every reference row is kept.  The provisional series contributes the
//! days it extends past the last reference day:
//!
//! ```text
//! extension = max(0, ⌊MJD_last(provisional) − MJD_last(reference)⌋)
//! ```
//!
//! taken from the **tail** of the provisional series.  The splice point is
//! pure day-count arithmetic; MJDs of the two inputs are never matched
//! against each other.
//!
//! ## TAI−UT1
//!
//! For every row, `TAI−UT1 = (TAI−UTC) − (UT1−UTC)` with TAI−UTC taken from
//! the latest leap-second threshold at or before the row's MJD, or
//! [`PRE_LEAP_TAI_MINUS_UTC`] if none applies.
//!
//! ## LOD gaps
//!
//! The rapid series stops publishing LOD some days before its end.
//! [`combine`] writes `0 s` for those days and reports in
//! [`CombinedSeries::last_reliable_lod`] the civil date of the day before the
//! first gap; [`combine_passthrough`] leaves the provisional value untouched.

use std::path::Path;

use chrono::NaiveDateTime;
use qtty::Seconds;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{EopError, EopResult};
use crate::leap_seconds::{LeapSeconds, PRE_LEAP_TAI_MINUS_UTC};
use crate::provisional::read_provisional_file;
use crate::records::{MergedRecord, ProvisionalRecord, ReferenceRecord};
use crate::reference::read_reference_file;
use crate::ModifiedJulianDate;

/// LOD written for days the provisional series leaves blank.
const ZERO_FILLED_LOD: Seconds = Seconds::new(0.0);

/// Treatment of missing provisional LOD values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LodPolicy {
    /// Substitute `0 s` and record where reliable LOD ends ([`combine`]).
    #[default]
    ZeroFill,
    /// Keep the provisional value as read ([`combine_passthrough`]).
    PassThrough,
}

/// Output of a merge.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CombinedSeries {
    /// One row per day, reference rows first.
    pub records: Vec<MergedRecord>,
    /// Civil date of the last day with a published LOD, when later days were
    /// zero-filled. Always `None` under [`LodPolicy::PassThrough`].
    pub last_reliable_lod: Option<NaiveDateTime>,
}

impl CombinedSeries {
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Days the provisional series adds after the last reference day.
#[inline]
pub fn overlap_extension(last_reference: ModifiedJulianDate, last_provisional: ModifiedJulianDate) -> usize {
    last_provisional.whole_days_since(last_reference)
}

/// `(TAI−UTC) − (UT1−UTC)` for a row at `mjd`.
#[inline]
pub fn tai_minus_ut1<L: LeapSeconds + ?Sized>(
    leap: &L,
    mjd: ModifiedJulianDate,
    ut1_utc: Seconds,
) -> Seconds {
    leap.tai_minus_utc(mjd).unwrap_or(PRE_LEAP_TAI_MINUS_UTC) - ut1_utc
}

/// The validated split between reference rows and the provisional tail.
struct Splice<'a> {
    reference: &'a [ReferenceRecord],
    provisional: &'a [ProvisionalRecord],
    last_reference: &'a ReferenceRecord,
    tail_start: usize,
}

impl<'a> Splice<'a> {
    fn new<L: LeapSeconds + ?Sized>(
        reference: &'a [ReferenceRecord],
        provisional: &'a [ProvisionalRecord],
        leap: &L,
    ) -> EopResult<Self> {
        if reference.is_empty() && provisional.is_empty() && leap.is_empty() {
            return Err(EopError::NothingToCombine);
        }
        let last_reference = reference.last().ok_or(EopError::EmptyReference)?;
        let last_provisional = provisional.last().ok_or(EopError::EmptyProvisional)?;

        let extension = overlap_extension(last_reference.mjd, last_provisional.mjd);
        if extension > provisional.len() {
            return Err(EopError::ProvisionalTooShort {
                needed: extension,
                available: provisional.len(),
            });
        }

        let offset = (last_provisional.mjd - last_reference.mjd).value();
        if offset.fract() != 0.0 {
            log::warn!(
                "reference and provisional day grids are offset by {:.6} d; splicing {} days by day count",
                offset.fract().abs(),
                extension
            );
        }

        Ok(Self {
            reference,
            provisional,
            last_reference,
            tail_start: provisional.len() - extension,
        })
    }

    fn len(&self) -> usize {
        self.reference.len() + self.provisional.len() - self.tail_start
    }

    /// Civil date of the row preceding provisional row `index`.
    fn day_before(&self, index: usize) -> NaiveDateTime {
        match index.checked_sub(1) {
            Some(previous) => self.provisional[previous].time,
            None => self.last_reference.time,
        }
    }

    /// Merged rows; `lod` decides the LOD of each spliced provisional row.
    fn rows<L, F>(&self, leap: &L, mut lod: F) -> Vec<MergedRecord>
    where
        L: LeapSeconds + ?Sized,
        F: FnMut(usize, &ProvisionalRecord) -> Option<Seconds>,
    {
        let mut rows = Vec::with_capacity(self.len());
        rows.extend(self.reference.iter().map(|record| {
            MergedRecord::from_reference(record, tai_minus_ut1(leap, record.mjd, record.ut1_utc))
        }));
        for (index, record) in self.provisional.iter().enumerate().skip(self.tail_start) {
            let tai_ut1 = tai_minus_ut1(leap, record.mjd, record.ut1_utc);
            rows.push(MergedRecord::from_provisional(record, tai_ut1, lod(index, record)));
        }

        log::info!(
            "combined {} reference and {} provisional days into {} rows",
            self.reference.len(),
            self.provisional.len() - self.tail_start,
            rows.len()
        );
        rows
    }
}

/// Combine both series, zero-filling missing provisional LOD.
///
/// The first spliced-in day without LOD sets
/// [`CombinedSeries::last_reliable_lod`] to the civil date of the day before
/// it; later gaps are zero-filled without moving the marker.
pub fn combine<L: LeapSeconds + ?Sized>(
    reference: &[ReferenceRecord],
    provisional: &[ProvisionalRecord],
    leap: &L,
) -> EopResult<CombinedSeries> {
    let splice = Splice::new(reference, provisional, leap)?;

    let mut last_reliable_lod = None;
    let records = splice.rows(leap, |index, record| {
        if record.lod.is_none() && last_reliable_lod.is_none() {
            let marker = splice.day_before(index);
            log::warn!(
                "provisional LOD missing from {}; zero-filling after {}",
                record.mjd,
                marker.date()
            );
            last_reliable_lod = Some(marker);
        }
        Some(record.lod.unwrap_or(ZERO_FILLED_LOD))
    });

    Ok(CombinedSeries {
        records,
        last_reliable_lod,
    })
}

/// Combine both series, passing provisional LOD through unmodified.
pub fn combine_passthrough<L: LeapSeconds + ?Sized>(
    reference: &[ReferenceRecord],
    provisional: &[ProvisionalRecord],
    leap: &L,
) -> EopResult<Vec<MergedRecord>> {
    let splice = Splice::new(reference, provisional, leap)?;
    Ok(splice.rows(leap, |_, record| record.lod))
}

/// Combine both series under the given LOD policy.
pub fn combine_with<L: LeapSeconds + ?Sized>(
    reference: &[ReferenceRecord],
    provisional: &[ProvisionalRecord],
    leap: &L,
    policy: LodPolicy,
) -> EopResult<CombinedSeries> {
    match policy {
        LodPolicy::ZeroFill => combine(reference, provisional, leap),
        LodPolicy::PassThrough => Ok(CombinedSeries {
            records: combine_passthrough(reference, provisional, leap)?,
            last_reliable_lod: None,
        }),
    }
}

/// Read a C04 file and a `finals` file and combine them with [`combine`].
pub fn combine_files<L: LeapSeconds + ?Sized>(
    reference: impl AsRef<Path>,
    provisional: impl AsRef<Path>,
    leap: &L,
) -> EopResult<CombinedSeries> {
    let reference = read_reference_file(reference)?;
    let provisional = read_provisional_file(provisional)?;
    combine(&reference, &provisional, leap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leap_seconds::{LeapSecondEntry, LeapSecondTable};
    use crate::records::{RecordSource, ReferenceSigmas};
    use qtty::Arcseconds;

    fn midnight(mjd: f64) -> NaiveDateTime {
        ModifiedJulianDate::new(mjd).civil_midnight().unwrap()
    }

    fn reference(mjd: f64, ut1_utc: f64) -> ReferenceRecord {
        let zero = Arcseconds::new(0.0);
        ReferenceRecord {
            mjd: ModifiedJulianDate::new(mjd),
            time: midnight(mjd),
            x: Arcseconds::new(0.1),
            y: Arcseconds::new(0.3),
            ut1_utc: Seconds::new(ut1_utc),
            lod: Seconds::new(0.0012),
            dpsi: zero,
            deps: zero,
            sigma: ReferenceSigmas {
                x: zero,
                y: zero,
                ut1_utc: Seconds::new(0.0),
                lod: Seconds::new(0.0),
                dpsi: zero,
                deps: zero,
            },
        }
    }

    fn provisional(mjd: f64, ut1_utc: f64, lod: Option<f64>) -> ProvisionalRecord {
        ProvisionalRecord {
            mjd: ModifiedJulianDate::new(mjd),
            time: midnight(mjd),
            x: Arcseconds::new(0.2),
            y: Arcseconds::new(0.4),
            ut1_utc: Seconds::new(ut1_utc),
            lod: lod.map(Seconds::new),
            predicted: lod.is_none(),
        }
    }

    fn reference_days(first: f64, last: f64) -> Vec<ReferenceRecord> {
        let mut days = Vec::new();
        let mut mjd = first;
        while mjd <= last {
            days.push(reference(mjd, 0.2));
            mjd += 1.0;
        }
        days
    }

    fn provisional_days(first: f64, last: f64, lod_until: f64) -> Vec<ProvisionalRecord> {
        let mut days = Vec::new();
        let mut mjd = first;
        while mjd <= last {
            let lod = (mjd <= lod_until).then_some(0.0008);
            days.push(provisional(mjd, 0.19, lod));
            mjd += 1.0;
        }
        days
    }

    fn table_37() -> LeapSecondTable {
        LeapSecondTable::new(vec![
            LeapSecondEntry::new(57_204.0, 36.0),
            LeapSecondEntry::new(57_754.0, 37.0),
        ])
    }

    fn close(a: Seconds, b: f64) -> bool {
        (a.value() - b).abs() < 1e-12
    }

    #[test]
    fn reference_tai_ut1_uses_leap_table() {
        let refs = vec![reference(59_000.0, 0.2)];
        let prov = vec![provisional(59_000.0, 0.2, Some(0.001))];
        let out = combine(&refs, &prov, &table_37()).unwrap();
        assert_eq!(out.len(), 1);
        assert!(close(out.records[0].tai_ut1, 36.8), "{:?}", out.records[0].tai_ut1);
    }

    #[test]
    fn latest_applicable_threshold_wins() {
        let refs = vec![reference(57_500.0, -0.3), reference(57_754.0, 0.5)];
        let prov = vec![provisional(57_754.0, 0.5, Some(0.001))];
        let out = combine(&refs, &prov, &table_37()).unwrap();
        assert!(close(out.records[0].tai_ut1, 36.3));
        assert!(close(out.records[1].tai_ut1, 36.5));
    }

    #[test]
    fn no_applicable_threshold_falls_back_to_ten_seconds() {
        let refs = vec![reference(40_000.0, 0.05)];
        let prov = vec![provisional(40_001.0, 0.04, Some(0.001))];
        let out = combine(&refs, &prov, &table_37()).unwrap();
        assert!(close(out.records[0].tai_ut1, 9.95));
        assert!(close(out.records[1].tai_ut1, 9.96));

        let empty = LeapSecondTable::default();
        let out = combine(&refs, &prov, &empty).unwrap();
        assert!(close(out.records[0].tai_ut1, 9.95));
    }

    #[test]
    fn reference_rows_are_copied_unchanged() {
        let refs = reference_days(58_990.0, 59_000.0);
        let prov = provisional_days(58_995.0, 59_002.0, 59_002.0);
        let out = combine(&refs, &prov, &table_37()).unwrap();
        for (merged, source) in out.records.iter().zip(&refs) {
            assert_eq!(merged.mjd, source.mjd);
            assert_eq!(merged.time, source.time);
            assert_eq!(merged.x, source.x);
            assert_eq!(merged.y, source.y);
            assert_eq!(merged.ut1_utc, source.ut1_utc);
            assert_eq!(merged.lod, Some(source.lod));
            assert_eq!(merged.source, RecordSource::Reference);
        }
    }

    #[test]
    fn provisional_tail_is_spliced_after_reference() {
        let refs = reference_days(58_990.0, 59_000.0);
        let prov = provisional_days(58_995.0, 59_004.0, 59_010.0);
        let out = combine(&refs, &prov, &table_37()).unwrap();

        assert_eq!(out.len(), refs.len() + 4);
        let tail: Vec<f64> = out.records[refs.len()..].iter().map(|r| r.mjd.value()).collect();
        assert_eq!(tail, vec![59_001.0, 59_002.0, 59_003.0, 59_004.0]);
        assert!(out.records[refs.len()..]
            .iter()
            .all(|r| matches!(r.source, RecordSource::Provisional { .. })));
        assert!(close(out.records[refs.len()].tai_ut1, 37.0 - 0.19));
        assert_eq!(out.last_reliable_lod, None);
    }

    #[test]
    fn provisional_not_extending_adds_nothing() {
        let refs = reference_days(58_990.0, 59_000.0);
        let prov = provisional_days(58_980.0, 58_999.0, 59_000.0);
        let out = combine(&refs, &prov, &table_37()).unwrap();
        assert_eq!(out.len(), refs.len());
    }

    #[test]
    fn fractional_extension_is_truncated() {
        let refs = reference_days(58_998.0, 59_000.0);
        let prov = vec![
            provisional(59_000.5, 0.1, Some(0.001)),
            provisional(59_001.5, 0.1, Some(0.001)),
            provisional(59_002.5, 0.1, Some(0.001)),
        ];
        assert_eq!(
            overlap_extension(refs[2].mjd, prov[2].mjd),
            2
        );
        let out = combine(&refs, &prov, &table_37()).unwrap();
        assert_eq!(out.len(), refs.len() + 2);
        assert_eq!(out.records[3].mjd.value(), 59_001.5);
    }

    #[test]
    fn missing_lod_on_last_day_is_zero_filled_and_marked() {
        let refs = reference_days(58_990.0, 59_000.0);
        let prov = provisional_days(58_995.0, 59_003.0, 59_002.0);
        let out = combine(&refs, &prov, &table_37()).unwrap();

        assert_eq!(out.len(), refs.len() + 3);
        let last = out.records.last().unwrap();
        assert_eq!(last.mjd.value(), 59_003.0);
        assert_eq!(last.lod, Some(Seconds::new(0.0)));
        assert_eq!(out.last_reliable_lod, Some(midnight(59_002.0)));
    }

    #[test]
    fn marker_is_set_once_at_first_gap() {
        let refs = reference_days(58_990.0, 59_000.0);
        let prov = provisional_days(58_995.0, 59_006.0, 59_002.0);
        let out = combine(&refs, &prov, &table_37()).unwrap();

        let tail = &out.records[refs.len()..];
        assert_eq!(tail.len(), 6);
        assert!(tail[..2].iter().all(|r| r.lod == Some(Seconds::new(0.0008))));
        assert!(tail[2..].iter().all(|r| r.lod == Some(Seconds::new(0.0))));
        assert_eq!(out.last_reliable_lod, Some(midnight(59_002.0)));
    }

    #[test]
    fn gap_at_head_of_provisional_marks_last_reference_day() {
        let refs = reference_days(58_998.0, 59_000.0);
        let prov = provisional_days(59_001.0, 59_003.0, 0.0);
        let out = combine(&refs, &prov, &table_37()).unwrap();
        assert_eq!(out.len(), 6);
        assert_eq!(out.last_reliable_lod, Some(midnight(59_000.0)));
    }

    #[test]
    fn passthrough_keeps_missing_lod_and_has_no_marker() {
        let refs = reference_days(58_990.0, 59_000.0);
        let prov = provisional_days(58_995.0, 59_003.0, 59_002.0);
        let plain = combine_passthrough(&refs, &prov, &table_37()).unwrap();
        let filled = combine(&refs, &prov, &table_37()).unwrap();

        assert_eq!(plain.len(), filled.len());
        assert_eq!(plain.last().unwrap().lod, None);
        assert_eq!(plain[refs.len()].lod, Some(Seconds::new(0.0008)));
        for (a, b) in plain.iter().zip(&filled.records) {
            assert_eq!(a.mjd, b.mjd);
            assert_eq!(a.tai_ut1, b.tai_ut1);
        }

        let via_policy = combine_with(&refs, &prov, &table_37(), LodPolicy::PassThrough).unwrap();
        assert_eq!(via_policy.records, plain);
        assert_eq!(via_policy.last_reliable_lod, None);
    }

    #[test]
    fn default_policy_is_zero_fill() {
        let refs = reference_days(58_990.0, 59_000.0);
        let prov = provisional_days(58_995.0, 59_003.0, 59_002.0);
        let via_policy = combine_with(&refs, &prov, &table_37(), LodPolicy::default()).unwrap();
        assert_eq!(via_policy, combine(&refs, &prov, &table_37()).unwrap());
    }

    #[test]
    fn predicted_flag_is_carried() {
        let refs = reference_days(58_999.0, 59_000.0);
        let prov = provisional_days(59_000.0, 59_002.0, 59_001.0);
        let out = combine(&refs, &prov, &table_37()).unwrap();
        assert!(!out.records[2].is_predicted());
        assert!(out.records[3].is_predicted());
    }

    #[test]
    fn repeated_merge_is_bit_identical() {
        let refs = reference_days(58_990.0, 59_000.0);
        let prov = provisional_days(58_995.0, 59_005.0, 59_003.0);
        let table = LeapSecondTable::iers();
        let a = combine(&refs, &prov, &table).unwrap();
        let b = combine(&refs, &prov, &table).unwrap();
        assert_eq!(a.last_reliable_lod, b.last_reliable_lod);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.records.iter().zip(&b.records) {
            assert_eq!(x.mjd.value().to_bits(), y.mjd.value().to_bits());
            assert_eq!(x.tai_ut1.value().to_bits(), y.tai_ut1.value().to_bits());
            assert_eq!(
                x.lod.map(|l| l.value().to_bits()),
                y.lod.map(|l| l.value().to_bits())
            );
        }
    }

    #[test]
    fn everything_empty_is_an_error() {
        let err = combine(&[], &[], &LeapSecondTable::default()).unwrap_err();
        assert!(matches!(err, EopError::NothingToCombine));
    }

    #[test]
    fn one_empty_series_is_an_error() {
        let refs = reference_days(58_990.0, 59_000.0);
        let prov = provisional_days(58_995.0, 59_003.0, 59_002.0);
        let table = LeapSecondTable::iers();
        assert!(matches!(
            combine(&[], &prov, &table),
            Err(EopError::EmptyReference)
        ));
        assert!(matches!(
            combine_passthrough(&refs, &[], &table),
            Err(EopError::EmptyProvisional)
        ));
    }

    #[test]
    fn sparse_provisional_tail_is_an_error() {
        let refs = reference_days(58_998.0, 59_000.0);
        let prov = vec![provisional(59_005.0, 0.1, Some(0.001))];
        let err = combine(&refs, &prov, &table_37()).unwrap_err();
        match err {
            EopError::ProvisionalTooShort { needed, available } => {
                assert_eq!(needed, 5);
                assert_eq!(available, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
