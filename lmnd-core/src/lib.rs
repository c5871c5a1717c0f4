//! Core crate contains the main building blocks to design a stochastic two-echelon
//! last-mile delivery network: which facilities to install at which capacity tier, and
//! whether delivery zones are served from a facility or directly from the central depot.
//!
//! The crate pairs a *continuous approximation* engine, which turns geographic and demand
//! data into closed-form routing cost and fleet size estimates, with a *facility location
//! model builder*, which assembles a scenario-weighted mixed-integer program from those
//! estimates and delegates optimization to an external solver behind the [`solver::MilpBackend`]
//! abstraction.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod approximation;
pub mod models;
pub mod prelude;
pub mod solver;
pub mod utils;
