//! `Relocatable`: a marker trait for types that may be moved by raw byte copy.

/// A marker trait for types whose values can change address by a plain byte copy.
///
/// Containers use this capability to pick a bulk storage strategy (a single
/// `realloc` when growing, a single `memmove` when opening a gap) instead of
/// relocating elements one at a time. The check happens entirely at compile time:
/// a buffer that relies on it is only nameable for relocatable element types.
///
/// Every `Copy` type is relocatable. Other types are treated as non-relocatable
/// until their author opts in.
///
/// # Safety
///
/// Implementors must guarantee that:
/// - Copying the bytes of a live value to a new, suitably aligned address produces
///   a value that behaves identically to the original.
/// - After such a copy, the original bytes can be discarded as plain memory,
///   without running any code for them.
/// - The value holds no pointer into its own storage, and nothing outside the value
///   retains the value's address in a way that a relocation would invalidate.
pub unsafe trait Relocatable {}

unsafe impl<T: Copy> Relocatable for T {}
