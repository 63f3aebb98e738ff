use core::fmt;
use std::str::FromStr;

use crate::error::{Result, TileError};

/// Traversal order of an index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// C order: last axis varies fastest
    #[default]
    RowMajor,

    /// Fortran order: first axis varies fastest. Not implemented yet.
    ColMajor,
}

impl Order {
    pub fn code(&self) -> char {
        match self {
            Order::RowMajor => 'C',
            Order::ColMajor => 'F',
        }
    }

    /// Fails for every order the odometer cannot walk.
    pub(crate) fn ensure_supported(self) -> Result<Self> {
        match self {
            Order::RowMajor => Ok(self),
            // column-major traversal is not implemented
            Order::ColMajor => Err(TileError::UnsupportedOrder(self.code())),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Order {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "C" => Ok(Order::RowMajor),
            "F" => Ok(Order::ColMajor),
            other => Err(TileError::UnknownOrder(other.to_string())),
        }
    }
}
