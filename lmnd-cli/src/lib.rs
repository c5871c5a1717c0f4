//! A command line interface for the last-mile network design solver: reads entity,
//! distance and scenario data, assembles an instance, runs the continuous approximation,
//! builds the stochastic facility-location model and solves it with the HiGHS backend.

pub mod export;
pub mod import;
pub mod solve;

mod instance;
pub use self::instance::*;
