//! Allocation error types.

use std::error::Error;
use std::fmt;

/// Errors surfaced by the allocation boundary.
///
/// Both variants leave the requesting container untouched: an
/// allocation either succeeds wholesale or fails before any element
/// has been moved or constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The requested slot count does not fit in a single allocation
    /// (the byte size would exceed `isize::MAX`).
    CapacityOverflow {
        /// Number of element slots requested.
        requested: usize,
    },
    /// The underlying allocator refused the request.
    OutOfMemory {
        /// Size of the refused request in bytes.
        bytes: usize,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} slots exceed the maximum allocation size")
            }
            Self::OutOfMemory { bytes } => {
                write!(f, "out of memory: allocator refused a {bytes}-byte request")
            }
        }
    }
}

impl Error for AllocError {}
