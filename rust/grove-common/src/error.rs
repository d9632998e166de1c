use std::alloc::Layout;

use thiserror::Error;

/// Errors surfaced by the grove containers.
///
/// No variant carries heap-allocated data, so the type can be built on the
/// out-of-memory path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested number of slots does not fit into a valid memory layout
    /// (the byte size would exceed `isize::MAX`).
    #[error("capacity overflow: {requested} slots requested")]
    CapacityOverflow { requested: usize },

    /// The global allocator could not supply a block of the given size and alignment.
    #[error("memory allocation of {size} bytes (align {align}) failed")]
    AllocFailed { size: usize, align: usize },

    /// A checked accessor was given an index that is not less than the current length.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
}

impl Error {
    pub fn capacity_overflow(requested: usize) -> Error {
        Error::CapacityOverflow { requested }
    }

    pub fn alloc_failed(layout: Layout) -> Error {
        Error::AllocFailed {
            size: layout.size(),
            align: layout.align(),
        }
    }

    pub fn out_of_range(index: usize, len: usize) -> Error {
        Error::OutOfRange { index, len }
    }

    /// Returns the layout of the failed allocation, if this is an allocation failure.
    pub fn layout(&self) -> Option<Layout> {
        match *self {
            Error::AllocFailed { size, align } => Layout::from_size_align(size, align).ok(),
            _ => None,
        }
    }
}
