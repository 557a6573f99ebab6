//! Problem-file loader and writer.
//!
//! # File format
//!
//! Space-separated, one record per line:
//!
//! ```text
//! T D W G                 time limit, interaction range, band count, gift count
//! max_weight max_accel    × W   (bands, cumulative from weight 0)
//! name score weight x y   × G   (gifts)
//! ```
//!
//! Example:
//!
//! ```text
//! 15 3 2 1
//! 15 8
//! 30 6
//! Kacper 1 10 5 1
//! ```
//!
//! Runs of spaces are tolerated and blank lines are skipped.  The header
//! counts must match the number of records that follow exactly.

use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use sleigh_core::{Coordinate, Tick};

use crate::band::{ranges_from_limits, validate_ranges};
use crate::{Gift, GiftCatalog, Problem, ProblemError, ProblemResult};

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`Problem`] from a file on disk.
pub fn load_problem(path: &Path) -> ProblemResult<Problem> {
    let file = std::fs::File::open(path).map_err(ProblemError::Io)?;
    load_problem_reader(file)
}

/// Like [`load_problem`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for embedded inputs.
pub fn load_problem_reader<R: Read>(reader: R) -> ProblemResult<Problem> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    // ── Collect non-blank lines ───────────────────────────────────────────
    let mut lines: Vec<Line> = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = Line::from_record(&record);
        if !line.fields.is_empty() {
            lines.push(line);
        }
    }

    let mut lines = lines.into_iter();
    let header = lines.next().ok_or(ProblemError::Empty)?;
    header.expect_fields(4)?;
    let time_limit = header.parse::<u64>(0)?;
    let range      = header.parse::<u64>(1)?;
    let band_count = header.parse::<usize>(2)?;
    let gift_count = header.parse::<usize>(3)?;

    let rest: Vec<Line> = lines.collect();
    if rest.len() < band_count {
        return Err(ProblemError::CountMismatch {
            what:     "acceleration bands",
            expected: band_count,
            got:      rest.len(),
        });
    }
    let (band_lines, gift_lines) = rest.split_at(band_count);
    if gift_lines.len() != gift_count {
        return Err(ProblemError::CountMismatch {
            what:     "gifts",
            expected: gift_count,
            got:      gift_lines.len(),
        });
    }

    // ── Bands ─────────────────────────────────────────────────────────────
    let limits = band_lines
        .iter()
        .map(|l| {
            l.expect_fields(2)?;
            Ok((l.parse::<u64>(0)?, l.parse::<u64>(1)?))
        })
        .collect::<ProblemResult<Vec<_>>>()?;
    let ranges = ranges_from_limits(&limits);
    validate_ranges(&ranges).map_err(ProblemError::Bands)?;

    // ── Gifts ─────────────────────────────────────────────────────────────
    let gifts = gift_lines
        .iter()
        .map(|l| {
            l.expect_fields(5)?;
            Ok(Gift {
                name:        l.fields[0].clone(),
                score:       l.parse(1)?,
                weight:      l.parse(2)?,
                destination: Coordinate::new(l.parse(3)?, l.parse(4)?),
            })
        })
        .collect::<ProblemResult<Vec<_>>>()?;

    Ok(Problem {
        time_limit: Tick(time_limit),
        range,
        ranges,
        catalog: GiftCatalog::new(gifts)?,
    })
}

/// Serialise `problem` in the same format [`load_problem_reader`] accepts.
pub fn write_problem<W: Write>(problem: &Problem, writer: W) -> ProblemResult<()> {
    let mut w = WriterBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .flexible(true)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    let (t, d, bands, gifts) = problem.header();
    w.write_record([t.to_string(), d.to_string(), bands.to_string(), gifts.to_string()])?;
    for band in &problem.ranges {
        w.write_record([band.max_weight_inclusive.to_string(), band.max_accel.to_string()])?;
    }
    for gift in &problem.catalog {
        w.write_record([
            gift.name.clone(),
            gift.score.to_string(),
            gift.weight.to_string(),
            gift.destination.c.to_string(),
            gift.destination.r.to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// One non-blank input line with empty fields (from repeated spaces) removed.
struct Line {
    number: u64,
    fields: Vec<String>,
}

impl Line {
    fn from_record(record: &StringRecord) -> Self {
        Self {
            number: record.position().map_or(0, |p| p.line()),
            fields: record
                .iter()
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    fn expect_fields(&self, n: usize) -> ProblemResult<()> {
        if self.fields.len() == n {
            Ok(())
        } else {
            Err(self.error(format!("expected {n} fields, found {}", self.fields.len())))
        }
    }

    fn parse<T>(&self, i: usize) -> ProblemResult<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = &self.fields[i];
        raw.parse::<T>()
            .map_err(|e| self.error(format!("field {} ({raw:?}): {e}", i + 1)))
    }

    fn error(&self, msg: String) -> ProblemError {
        ProblemError::Parse { line: self.number, msg }
    }
}
