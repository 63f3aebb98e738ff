//! Row-major odometer over a (possibly blocked) index space.
//!
//! The cursor starts at every axis' `start`. After each emitted tile the last
//! axis moves by `block * step`; any axis that reaches its stop is reset and
//! carries one block into the axis before it. Iteration ends when axis 0
//! reaches its stop.

use std::iter::FusedIterator;

use log::{debug, trace};

use crate::dim_range::{AxisSpec, DimRange};
use crate::error::Result;
use crate::order::Order;
use crate::space::{checked_product, BlockShape, IndexSpace};

/* ============================================================
   Engine
   ============================================================ */

/// Shared cursor state behind [`Points`] and [`Blocks`].
#[derive(Debug, Clone)]
struct Odometer {
    space: IndexSpace,
    blocks: BlockShape,
    // distance moved per block along each axis: block * step
    strides: Vec<i64>,
    origin: Vec<i64>,
    tiles: Vec<usize>,
    // `None` when the tile count does not fit in a usize
    total: Option<usize>,
    done: bool,
}

impl Odometer {
    fn new(space: IndexSpace, blocks: BlockShape) -> Self {
        debug_assert_eq!(space.rank(), blocks.rank());

        let strides = space
            .axes()
            .iter()
            .zip(blocks.sizes())
            .map(|(r, &b)| i64::try_from(b).unwrap_or(i64::MAX).saturating_mul(r.step()))
            .collect();
        let origin = space.axes().iter().map(DimRange::start).collect();
        let tiles: Vec<usize> = space
            .axes()
            .iter()
            .zip(blocks.sizes())
            .map(|(r, &b)| r.len().div_ceil(b))
            .collect();
        let total = space.num_tiles(&blocks);

        let mut odo = Self {
            done: space.is_empty(),
            space,
            blocks,
            strides,
            origin,
            tiles,
            total,
        };
        odo.carry();
        odo
    }

    /// Reset every trailing axis that ran past its stop and carry into the
    /// axis before it. Axis 0 is never reset.
    fn carry(&mut self) {
        for i in (1..self.origin.len()).rev() {
            let axis = self.space.axis(i);
            if self.origin[i] >= axis.stop() {
                self.origin[i] = axis.start();
                self.origin[i - 1] = self.origin[i - 1].saturating_add(self.strides[i - 1]);
                trace!("carry from axis {} into axis {}", i, i - 1);
            }
        }
    }

    fn exhausted(&self) -> bool {
        self.done || self.origin[0] >= self.space.axis(0).stop()
    }

    fn advance(&mut self) {
        let last = self.origin.len() - 1;
        self.origin[last] = self.origin[last].saturating_add(self.strides[last]);
        self.carry();
        if self.origin[0] >= self.space.axis(0).stop() {
            self.done = true;
        }
    }

    /// Block anchored at the cursor, clipped so it never crosses an axis stop.
    fn block(&self) -> Vec<DimRange> {
        self.origin
            .iter()
            .zip(self.space.axes())
            .zip(&self.strides)
            .map(|((&o, r), &stride)| {
                DimRange::clipped(o, o.saturating_add(stride).min(r.stop()), r.step())
            })
            .collect()
    }

    /// Tiles not yet emitted, or `None` if the count overflows a usize.
    fn remaining(&self) -> Option<usize> {
        if self.exhausted() {
            return Some(0);
        }
        let total = self.total?;
        let mut visited = 0usize;
        for ((&o, r), (&stride, &n)) in self
            .origin
            .iter()
            .zip(self.space.axes())
            .zip(self.strides.iter().zip(&self.tiles))
        {
            let pos = ((o as i128 - r.start() as i128) / stride as i128) as usize;
            visited = visited.checked_mul(n)?.checked_add(pos)?;
        }
        Some(total - visited)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining() {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

/* ============================================================
   Point iterator
   ============================================================ */

/// Yields every coordinate of an index space once, last axis fastest.
#[derive(Debug, Clone)]
pub struct Points {
    odo: Odometer,
}

impl Points {
    pub fn new(space: IndexSpace) -> Self {
        let blocks = BlockShape::unit(space.rank());
        let odo = Odometer::new(space, blocks);
        debug!("point iteration over {} axes, {:?} points", odo.space.rank(), odo.total);
        Self { odo }
    }

    pub fn space(&self) -> &IndexSpace {
        &self.odo.space
    }

    /// Points not yet yielded; `None` if the count does not fit in a usize.
    pub fn remaining(&self) -> Option<usize> {
        self.odo.remaining()
    }
}

impl Iterator for Points {
    type Item = Vec<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.odo.exhausted() {
            return None;
        }
        let point = self.odo.origin.clone();
        self.odo.advance();
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.odo.size_hint()
    }
}

impl FusedIterator for Points {}

/* ============================================================
   Block iterator
   ============================================================ */

/// Yields per-axis sub-ranges that tile an index space, last axis fastest.
///
/// Blocks touching an axis stop may be narrower than the requested size.
#[derive(Debug, Clone)]
pub struct Blocks {
    odo: Odometer,
}

impl Blocks {
    pub fn new(space: IndexSpace, blocks: BlockShape) -> Self {
        let odo = Odometer::new(space, blocks);
        debug!(
            "block iteration over {} axes with blocking {:?}, {:?} blocks",
            odo.space.rank(),
            odo.blocks.sizes(),
            odo.total
        );
        Self { odo }
    }

    pub fn space(&self) -> &IndexSpace {
        &self.odo.space
    }

    pub fn block_shape(&self) -> &BlockShape {
        &self.odo.blocks
    }

    /// Blocks not yet yielded; `None` if the count does not fit in a usize.
    pub fn remaining(&self) -> Option<usize> {
        self.odo.remaining()
    }
}

impl Iterator for Blocks {
    type Item = Vec<DimRange>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.odo.exhausted() {
            return None;
        }
        let block = self.odo.block();
        self.odo.advance();
        Some(block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.odo.size_hint()
    }
}

impl FusedIterator for Blocks {}

/* ============================================================
   Unified entry point
   ============================================================ */

/// One item of [`CartesianIter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tile {
    Point(Vec<i64>),
    Block(Vec<DimRange>),
}

impl Tile {
    pub fn as_point(&self) -> Option<&[i64]> {
        match self {
            Tile::Point(p) => Some(p),
            Tile::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&[DimRange]> {
        match self {
            Tile::Block(b) => Some(b),
            Tile::Point(_) => None,
        }
    }

    /// Number of coordinates covered by this tile, `None` on usize overflow
    pub fn num_points(&self) -> Option<usize> {
        match self {
            Tile::Point(_) => Some(1),
            Tile::Block(b) => checked_product(b.iter().map(DimRange::len)),
        }
    }
}

/// Options for [`iter_cartesian`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IterOptions {
    /// Traversal order; only [`Order::RowMajor`] is accepted
    pub order: Order,

    /// Block size per axis; `None` yields plain coordinates
    pub blocking: Option<Vec<usize>>,
}

impl IterOptions {
    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn with_blocking(mut self, blocking: impl Into<Vec<usize>>) -> Self {
        self.blocking = Some(blocking.into());
        self
    }
}

/// Coordinates or blocks, depending on whether blocking was requested.
#[derive(Debug, Clone)]
pub enum CartesianIter {
    Points(Points),
    Blocks(Blocks),
}

impl Iterator for CartesianIter {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        match self {
            CartesianIter::Points(it) => it.next().map(Tile::Point),
            CartesianIter::Blocks(it) => it.next().map(Tile::Block),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            CartesianIter::Points(it) => it.size_hint(),
            CartesianIter::Blocks(it) => it.size_hint(),
        }
    }
}

impl CartesianIter {
    pub fn remaining(&self) -> Option<usize> {
        match self {
            CartesianIter::Points(it) => it.remaining(),
            CartesianIter::Blocks(it) => it.remaining(),
        }
    }
}

impl FusedIterator for CartesianIter {}

/// Iterate over the Cartesian product of `dims`.
///
/// Every coordinate of the product is covered exactly once. All validation
/// happens here, so an error surfaces even if the iterator is never polled.
pub fn iter_cartesian<I>(dims: I, options: IterOptions) -> Result<CartesianIter>
where
    I: IntoIterator,
    I::Item: Into<AxisSpec>,
{
    let space = IndexSpace::new(dims)?;
    options.order.ensure_supported()?;
    Ok(match options.blocking {
        None => CartesianIter::Points(Points::new(space)),
        Some(sizes) => {
            let blocks = BlockShape::new(sizes, space.rank())?;
            CartesianIter::Blocks(Blocks::new(space, blocks))
        }
    })
}

/// Row-major coordinates of the product of `dims`.
pub fn iter_points<I>(dims: I) -> Result<Points>
where
    I: IntoIterator,
    I::Item: Into<AxisSpec>,
{
    Ok(Points::new(IndexSpace::new(dims)?))
}

/// Row-major blocks of the product of `dims`.
pub fn iter_blocks<I>(dims: I, blocking: impl Into<Vec<usize>>) -> Result<Blocks>
where
    I: IntoIterator,
    I::Item: Into<AxisSpec>,
{
    let space = IndexSpace::new(dims)?;
    let blocks = BlockShape::new(blocking.into(), space.rank())?;
    Ok(Blocks::new(space, blocks))
}
