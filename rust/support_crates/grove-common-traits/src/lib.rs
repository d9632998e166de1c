//! Traits and definitions used throughout the grove crates.
//!
//! This crate provides common traits that are shared across the grove containers
//! and by the code that stores its own types in them.
//!
//! # Modules
//!
//! - [`relocatable`]: The compile-time capability that lets a container move values
//!   between memory blocks by raw byte copy

pub mod relocatable;

pub use relocatable::Relocatable;
