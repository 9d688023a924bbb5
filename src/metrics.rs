//! Series derived from a [`Dataset`] on demand. Nothing here is cached.

use std::collections::BTreeMap;

use plotters::style::RGBColor;

use crate::dataset::Dataset;
use crate::error::{Error, Result};

/// Default spacing between labelled `n` values on categorical axes.
pub const DEFAULT_TICK_STEP: u32 = 10;

/// Ratio below which a run counts as cheap.
pub const LOW_RATIO_LIMIT: f64 = 20.0;
/// Ratio at or above which a run counts as expensive.
pub const HIGH_RATIO_LIMIT: f64 = 100.0;

/// `time_ms[i] / time_ms[0]` for every record.
pub fn baseline_ratios(dataset: &Dataset) -> Result<Vec<f64>> {
    ratios_against_first(&dataset.times())
}

/// Ratio of every value to the first one. The first value must be positive
/// and small enough not to push any ratio past `f64::MAX`.
pub fn ratios_against_first(times: &[f64]) -> Result<Vec<f64>> {
    let Some(&base) = times.first() else {
        return Ok(Vec::new());
    };
    if !(base > 0.0) {
        return Err(Error::InvalidBaseline(base));
    }
    let ratios: Vec<f64> = times.iter().map(|t| t / base).collect();
    if ratios.iter().any(|r| !r.is_finite()) {
        return Err(Error::InvalidBaseline(base));
    }
    Ok(ratios)
}

/// Three fixed cost classes for a baseline ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioBucket {
    Low,
    Mid,
    High,
}

impl RatioBucket {
    pub fn classify(ratio: f64) -> Self {
        if ratio < LOW_RATIO_LIMIT {
            Self::Low
        } else if ratio < HIGH_RATIO_LIMIT {
            Self::Mid
        } else {
            Self::High
        }
    }

    /// Bar fill used by the ratio chart.
    pub fn color(self) -> RGBColor {
        match self {
            Self::Low => RGBColor(0x2e, 0xcc, 0x71),
            Self::Mid => RGBColor(0xf3, 0x9c, 0x12),
            Self::High => RGBColor(0xe7, 0x4c, 0x3c),
        }
    }
}

pub fn buckets(ratios: &[f64]) -> Vec<RatioBucket> {
    ratios.iter().map(|&r| RatioBucket::classify(r)).collect()
}

/// A labelled position on a categorical `n` axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Position of the first record with this `n`.
    pub index: usize,
    pub n: u32,
}

/// Every `step`-th `n` from the smallest one up to the largest, keeping only
/// values that actually occur in `ns`. Ticks come out in ascending `n`.
pub fn tick_subset(ns: &[u32], step: u32) -> Vec<Tick> {
    let Some(&min) = ns.iter().min() else {
        return Vec::new();
    };
    let step = step.max(1);
    let mut first_seen: BTreeMap<u32, usize> = BTreeMap::new();
    for (index, &n) in ns.iter().enumerate() {
        if (n - min) % step == 0 {
            first_seen.entry(n).or_insert(index);
        }
    }
    first_seen
        .into_iter()
        .map(|(n, index)| Tick { index, n })
        .collect()
}

/// Closed polygons covering the area between a curve and `threshold`
/// wherever the curve is at or above it.
///
/// Each point owns the x-range halfway to its neighbours (the first and last
/// points stop at their own x), so a run of qualifying points becomes a
/// stepped band centred on those points.
pub fn threshold_spans(points: &[(f64, f64)], threshold: f64) -> Vec<Vec<(f64, f64)>> {
    let left_edge = |i: usize| {
        if i == 0 {
            points[0].0
        } else {
            0.5 * (points[i - 1].0 + points[i].0)
        }
    };
    let right_edge = |i: usize| {
        if i + 1 == points.len() {
            points[i].0
        } else {
            0.5 * (points[i].0 + points[i + 1].0)
        }
    };

    let mut spans = Vec::new();
    let mut i = 0;
    while i < points.len() {
        if points[i].1 < threshold {
            i += 1;
            continue;
        }
        let start = i;
        while i < points.len() && points[i].1 >= threshold {
            i += 1;
        }
        let end = i - 1;

        let mut poly = Vec::with_capacity(2 * (end - start + 1) + 2);
        for j in start..=end {
            poly.push((left_edge(j), points[j].1));
            poly.push((right_edge(j), points[j].1));
        }
        poly.push((right_edge(end), threshold));
        poly.push((left_edge(start), threshold));
        spans.push(poly);
    }
    spans
}

/// `2^n - 1`, or `None` when it does not fit in a `u64`.
pub fn theoretical_moves(n: u32) -> Option<u64> {
    match n {
        0..=63 => Some((1u64 << n) - 1),
        64 => Some(u64::MAX),
        _ => None,
    }
}

/// A record whose reported theoretical move count disagrees with `2^n - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TheoryMismatch {
    pub n: u32,
    pub recorded: u64,
    pub expected: Option<u64>,
}

pub fn theory_mismatches(dataset: &Dataset) -> Vec<TheoryMismatch> {
    dataset
        .records()
        .iter()
        .filter_map(|r| {
            let expected = theoretical_moves(r.n);
            (expected != Some(r.moves_theory)).then_some(TheoryMismatch {
                n: r.n,
                recorded: r.moves_theory,
                expected,
            })
        })
        .collect()
}
