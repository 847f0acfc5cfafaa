// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Day-count scale markers.

use super::instant::TimeScale;

/// Modified Julian Date: Julian Date minus 2 400 000.5, epoch 1858-11-17 0h.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct MJD;

impl TimeScale for MJD {
    const LABEL: &'static str = "MJD";
}
