//! Core domain primitives: errors and text utilities.

pub mod error;
pub mod text;
