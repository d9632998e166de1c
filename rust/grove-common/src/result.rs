pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Verifies that `index` addresses a live element of a sequence of length `len`.
#[inline]
pub fn verify_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        out_of_range(index, len)
    }
}

#[cold]
pub fn out_of_range(index: usize, len: usize) -> Result<()> {
    Err(crate::error::Error::out_of_range(index, len))
}
