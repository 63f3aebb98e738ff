use core::fmt;
use std::ops::{Range, RangeTo};
use std::str::FromStr;

use crate::error::{Result, TileError};

/// One axis of an index space: `start, start + step, ...` strictly below `stop`.
///
/// `start >= stop` is allowed and denotes an empty axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DimRange {
    start: i64,
    stop: i64,
    step: i64,
}

impl DimRange {
    /// Construct a range, rejecting a non-positive step.
    pub fn new(start: i64, stop: i64, step: i64) -> Result<Self> {
        if step <= 0 {
            return Err(TileError::NonPositiveStep(step));
        }
        Ok(Self { start, stop, step })
    }

    /// The range `[0, n)` with unit step.
    pub fn extent(n: usize) -> Self {
        Self {
            start: 0,
            stop: i64::try_from(n).unwrap_or(i64::MAX),
            step: 1,
        }
    }

    /// Built by the block extractor; the step is already known to be positive.
    pub(crate) fn clipped(start: i64, stop: i64, step: i64) -> Self {
        Self { start, stop, step }
    }

    #[inline(always)]
    pub fn start(&self) -> i64 {
        self.start
    }

    #[inline(always)]
    pub fn stop(&self) -> i64 {
        self.stop
    }

    #[inline(always)]
    pub fn step(&self) -> i64 {
        self.step
    }

    /// Number of points on this axis
    pub fn len(&self) -> usize {
        if self.start >= self.stop {
            return 0;
        }
        let span = self.stop as i128 - self.start as i128;
        let step = self.step as i128;
        ((span + step - 1) / step) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.stop
    }

    /// Iterate the points of this axis in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = i64> {
        let DimRange { start, step, .. } = *self;
        // every point lies in [start, stop), only the offset needs headroom
        (0..self.len()).map(move |k| (start as i128 + k as i128 * step as i128) as i64)
    }
}

/// Display format: `start:stop:step`
impl fmt::Display for DimRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.start, self.stop, self.step)
    }
}

/* ============================================================
   Axis specification (caller-facing)
   ============================================================ */

/// How a caller describes one axis before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSpec {
    /// Bare extent `N`, sugar for `[0, N)` with step 1
    Extent(usize),

    /// Range-like value; `stop` is mandatory, `start` defaults to 0 and `step` to 1
    Range {
        start: Option<i64>,
        stop: Option<i64>,
        step: Option<i64>,
    },
}

impl AxisSpec {
    pub fn range(start: i64, stop: i64, step: i64) -> Self {
        AxisSpec::Range {
            start: Some(start),
            stop: Some(stop),
            step: Some(step),
        }
    }

    /// Fill in defaults and check the bounds.
    pub fn normalize(&self) -> Result<DimRange> {
        match *self {
            AxisSpec::Extent(n) => Ok(DimRange::extent(n)),
            AxisSpec::Range { start, stop, step } => {
                let stop = stop.ok_or(TileError::MissingStop)?;
                DimRange::new(start.unwrap_or(0), stop, step.unwrap_or(1))
            }
        }
    }
}

impl From<usize> for AxisSpec {
    fn from(n: usize) -> Self {
        AxisSpec::Extent(n)
    }
}

impl From<Range<i64>> for AxisSpec {
    fn from(r: Range<i64>) -> Self {
        AxisSpec::Range {
            start: Some(r.start),
            stop: Some(r.end),
            step: None,
        }
    }
}

impl From<RangeTo<i64>> for AxisSpec {
    fn from(r: RangeTo<i64>) -> Self {
        AxisSpec::Range {
            start: None,
            stop: Some(r.end),
            step: None,
        }
    }
}

impl From<(i64, i64, i64)> for AxisSpec {
    fn from((start, stop, step): (i64, i64, i64)) -> Self {
        AxisSpec::range(start, stop, step)
    }
}

impl From<DimRange> for AxisSpec {
    fn from(r: DimRange) -> Self {
        AxisSpec::range(r.start, r.stop, r.step)
    }
}

/// Parses `N`, `start:stop` or `start:stop:step`; `start` and `step` may be left empty.
impl FromStr for AxisSpec {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if !s.contains(':') {
            return s
                .parse::<usize>()
                .map(AxisSpec::Extent)
                .map_err(|_| TileError::NotAnInteger(s.to_string()));
        }

        let fields: Vec<&str> = s.split(':').collect();
        if fields.len() > 3 {
            return Err(TileError::NotAnInteger(s.to_string()));
        }

        fn field(f: Option<&&str>) -> Result<Option<i64>> {
            match f.map(|f| f.trim()) {
                None | Some("") => Ok(None),
                Some(f) => f
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| TileError::NotAnInteger(f.to_string())),
            }
        }

        Ok(AxisSpec::Range {
            start: field(fields.first())?,
            stop: field(fields.get(1))?,
            step: field(fields.get(2))?,
        })
    }
}
