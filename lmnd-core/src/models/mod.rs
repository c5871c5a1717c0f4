//! A collection of models to represent the two-echelon network design problem domain.

pub mod common;
pub mod problem;

mod scenario;
pub use self::scenario::*;
