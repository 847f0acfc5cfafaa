// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Line-oriented scanning shared by both series parsers.
//!
//! A line either yields one record or is skipped; only I/O failures abort a
//! scan.  Bytes that are not valid UTF-8 are replaced so that a single
//! corrupt line is skipped like any other malformed one.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{EopError, EopResult, SeriesKind};

/// Records kept from a scan, with the number of non-blank lines dropped.
#[derive(Debug)]
pub(crate) struct LineScan<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

pub(crate) fn scan_lines<R, T, F>(mut reader: R, mut parse_line: F) -> io::Result<LineScan<T>>
where
    R: BufRead,
    F: FnMut(&str) -> Option<T>,
{
    let mut records = Vec::new();
    let mut skipped = 0usize;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line: Cow<'_, str> = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        match parse_line(line) {
            Some(record) => records.push(record),
            None if line.trim().is_empty() => {}
            None => skipped += 1,
        }
    }

    Ok(LineScan { records, skipped })
}

/// Scan a whole file; the handle is released on every return path.
pub(crate) fn read_series_file<T, F>(path: &Path, kind: SeriesKind, parse_line: F) -> EopResult<Vec<T>>
where
    F: FnMut(&str) -> Option<T>,
{
    let wrap = |source: io::Error| EopError::Read {
        kind,
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(wrap)?;
    let scan = scan_lines(BufReader::new(file), parse_line).map_err(wrap)?;

    if scan.skipped > 0 {
        log::debug!(
            "{}: skipped {} malformed {} lines",
            path.display(),
            scan.skipped,
            kind
        );
    }
    log::info!(
        "read {} {} records from {}",
        scan.records.len(),
        kind,
        path.display()
    );

    Ok(scan.records)
}
