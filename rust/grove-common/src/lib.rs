//! Core definitions (error type and result alias), relied upon by all grove-* crates.

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
