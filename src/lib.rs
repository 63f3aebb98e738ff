//! Index generation for blocked numerical work: row-major odometer iteration
//! over multi-dimensional index spaces, and rank-based splitting of linear
//! work across workers.

pub mod error;
pub mod dim_range;
pub mod space;
pub mod order;
pub mod odometer;

pub mod partition;

pub use dim_range::{AxisSpec, DimRange};
pub use error::{ErrorKind, Result, TileError};
pub use odometer::{
    iter_blocks, iter_cartesian, iter_points, Blocks, CartesianIter, IterOptions, Points, Tile,
};
pub use order::Order;
pub use partition::{
    contiguous_range, partition_contiguous, partition_striped, PartitionStrategy, WorkerRank,
};
pub use space::{BlockShape, IndexSpace};
