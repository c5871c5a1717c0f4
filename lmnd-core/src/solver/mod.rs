//! Stochastic facility-location model building and solving.
//!
//! The [`DesignModel`] assembles decision variables, a scenario-weighted objective and
//! structural constraints from continuous-approximation outputs and facility cost tables,
//! then delegates optimization to an external mixed-integer solver behind [`MilpBackend`].

mod backend;
pub use self::backend::*;

mod capacity;
pub use self::capacity::*;

mod model;
pub use self::model::*;

mod variables;
pub use self::variables::*;
