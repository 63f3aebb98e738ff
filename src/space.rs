use crate::dim_range::{AxisSpec, DimRange};
use crate::error::{Result, TileError};

/// Ordered list of axes; axis 0 is the outermost (slowest varying).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpace {
    axes: Vec<DimRange>,
}

impl IndexSpace {
    /// Normalize every axis specification, failing on the first malformed one.
    pub fn new<I>(specs: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<AxisSpec>,
    {
        let axes = specs
            .into_iter()
            .map(|s| s.into().normalize())
            .collect::<Result<Vec<_>>>()?;
        Self::from_ranges(axes)
    }

    pub fn from_ranges(axes: Vec<DimRange>) -> Result<Self> {
        if axes.is_empty() {
            return Err(TileError::NoAxes);
        }
        Ok(Self { axes })
    }

    /// Number of axes
    pub fn rank(&self) -> usize {
        self.axes.len()
    }

    pub fn axes(&self) -> &[DimRange] {
        &self.axes
    }

    pub fn axis(&self, i: usize) -> &DimRange {
        &self.axes[i]
    }

    /// True when any axis is empty, which empties the whole product.
    pub fn is_empty(&self) -> bool {
        self.axes.iter().any(DimRange::is_empty)
    }

    /// Total number of points in the Cartesian product, `None` if it
    /// does not fit in a usize.
    pub fn num_points(&self) -> Option<usize> {
        checked_product(self.axes.iter().map(DimRange::len))
    }

    /// Number of blocks needed to tile the space with `blocks`.
    pub fn num_tiles(&self, blocks: &BlockShape) -> Option<usize> {
        checked_product(
            self.axes
                .iter()
                .zip(blocks.sizes())
                .map(|(r, &b)| r.len().div_ceil(b)),
        )
    }
}

/// Product of `factors`; any zero factor wins over an overflow.
pub(crate) fn checked_product(factors: impl Iterator<Item = usize>) -> Option<usize> {
    let mut acc = Some(1usize);
    for f in factors {
        if f == 0 {
            return Some(0);
        }
        acc = acc.and_then(|a| a.checked_mul(f));
    }
    acc
}

/// Per-axis block sizes, one positive entry per axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockShape {
    sizes: Vec<usize>,
}

impl BlockShape {
    pub fn new(sizes: Vec<usize>, rank: usize) -> Result<Self> {
        if sizes.len() != rank {
            return Err(TileError::BlockingMismatch {
                blocks: sizes.len(),
                axes: rank,
            });
        }
        if let Some(axis) = sizes.iter().position(|&b| b == 0) {
            return Err(TileError::InvalidBlockSize { axis });
        }
        Ok(Self { sizes })
    }

    /// All-ones blocking, i.e. plain point iteration.
    pub fn unit(rank: usize) -> Self {
        Self {
            sizes: vec![1; rank],
        }
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn rank(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_unit(&self) -> bool {
        self.sizes.iter().all(|&b| b == 1)
    }
}
