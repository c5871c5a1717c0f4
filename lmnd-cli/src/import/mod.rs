//! Input readers for entities, distances and scenario realizations.

mod csv;
pub use self::csv::*;

mod scenario;
pub use self::scenario::*;
