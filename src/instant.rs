// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Generic scale-parameterised instant used as the series key.
//!
//! [`Time<S>`] stores a scalar quantity in [`Days`] whose *meaning* is
//! determined by the compile-time marker `S: TimeScale`.  Earth orientation
//! products are tabulated on Modified Julian Days, so the type that shows up
//! everywhere in this crate is [`Time<MJD>`](super::scales::MJD), aliased as
//! [`ModifiedJulianDate`](crate::ModifiedJulianDate).
//!
//! Civil-date helpers live in an inherent `impl Time<MJD>` block.

use qtty::Days;
use std::marker::PhantomData;
use std::ops::Sub;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Marker trait for day-count scales.
///
/// EOP files publish MJD values on the UTC axis and the series keeps them
/// exactly as read, so a scale carries nothing beyond its display label.
pub trait TimeScale: Copy + Clone + std::fmt::Debug + PartialEq + PartialOrd + 'static {
    /// Display label used by [`Time`] formatting.
    const LABEL: &'static str;
}

/// A point on day-count scale `S`.
///
/// Layout-identical to [`Days`] (a single `f64`); `PhantomData` is zero-sized.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Time<S: TimeScale> {
    quantity: Days,
    _scale: PhantomData<S>,
}

impl<S: TimeScale> Time<S> {
    /// Create from a raw scalar (days since the scale's epoch).
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
            _scale: PhantomData,
        }
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Whole days elapsed from `earlier` to `self`, truncated towards zero.
    ///
    /// Returns `0` when `self` is not after `earlier`.
    #[inline]
    pub fn whole_days_since(&self, earlier: Self) -> usize {
        let span = (*self - earlier).value();
        if span > 0.0 {
            span.trunc() as usize
        } else {
            0
        }
    }
}

impl<S: TimeScale> std::fmt::Display for Time<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", S::LABEL, self.quantity)
    }
}

#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for Time<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for Time<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

/// Signed span between two instants on the same scale.
impl<S: TimeScale> Sub for Time<S> {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}
