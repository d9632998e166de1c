//! Growable contiguous arrays with pluggable storage strategies.
//!
//! [`Vector`] is the user-facing array. How its storage grows, and how elements are
//! relocated when it does, is decided by its buffer type parameter:
//!
//! - [`MoveBuffer`] (the default) works for every element type and relocates
//!   elements one at a time.
//! - [`RelocateBuffer`] requires [`Relocatable`] elements and relocates whole runs
//!   with a single `realloc` or `memmove`. See [`RelocVector`].
//! - [`InlineBuffer`] keeps up to `N` elements inside the vector itself before
//!   spilling to either heap strategy. See [`SmallVector`].
//!
//! Every growing operation either completes or leaves the vector exactly as it
//! was. The `try_` forms report failures as [`Error`] values.
//!
//! ```
//! use grove_vec::{RelocVector, Vector};
//!
//! let mut names: Vector<String> = Vector::new();
//! names.push("b".to_string());
//! names.insert(0, "a".to_string());
//! assert_eq!(names, ["a", "b"]);
//!
//! let mut ids: RelocVector<u64> = (0..10).collect();
//! ids.insert_slice(5, &[100, 101]);
//! assert_eq!(ids.len(), 12);
//! assert_eq!(ids.at(5), Ok(&100));
//! ```

pub mod buffer;
pub mod growth;
mod into_iter;
mod raw_alloc;
mod small_vector;
mod vector;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

pub use buffer::{InlineBuffer, MoveBuffer, RawBuffer, RelocateBuffer, SlotState};
pub use grove_common::{Error, Result};
pub use grove_common_traits::Relocatable;
pub use into_iter::IntoIter;
pub use small_vector::{SmallRelocVector, SmallVector};
pub use vector::{RelocVector, Vector};
