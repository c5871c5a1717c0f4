//! Shared helpers to build test data in a terse way.

pub mod backend;
pub mod problem;

pub use self::backend::*;
pub use self::problem::*;
