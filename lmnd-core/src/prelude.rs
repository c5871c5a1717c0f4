//! This module reimports commonly used types.

pub use crate::models::common::{Cost, Distance, Float, GeoPoint, Period};
pub use crate::models::problem::{
    CapacityTier, DeliveryZone, Facility, FacilityBuilder, Vehicle, VehicleBuilder, VehicleKind, ZoneBuilder,
    ZoneDemand,
};
pub use crate::models::{Echelon, Scenario, ServingEstimate};

pub use crate::approximation::ContinuousApproximation;
pub use crate::approximation::DistanceMatrix;

pub use crate::solver::CapacityMode;
pub use crate::solver::DesignModel;
pub use crate::solver::MilpBackend;
pub use crate::solver::ModelConfig;
pub use crate::solver::ParamValue;
pub use crate::solver::SolveReport;
pub use crate::solver::SolveStatus;

pub use crate::utils::Environment;
pub use crate::utils::InfoLogger;
pub use crate::utils::ModelError;
pub use crate::utils::ModelResult;
