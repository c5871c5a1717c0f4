use crate::models::common::{Cost, Float, GeoPoint};

/// A discrete capacity option a facility can be installed or operated at.
#[derive(Clone, Debug)]
pub struct CapacityTier {
    /// A tier label as used in input data and variable names.
    pub label: String,
    /// Capacity of the tier, in fleet size units.
    pub capacity: Float,
    /// A one-time installation cost of the tier.
    pub cost_installation: Cost,
    /// An operating cost per period while the tier is active.
    pub cost_operation: Vec<Cost>,
}

/// Represents a candidate distribution facility or the central depot.
///
/// Constructed once from input data and immutable afterwards: all computed
/// continuous-approximation annotations live on [`crate::models::Scenario`] instead.
#[derive(Clone, Debug)]
pub struct Facility {
    /// A facility id.
    pub id: String,
    /// A facility location.
    pub location: GeoPoint,
    /// Capacity tiers the facility can be installed at; exactly one is selected by the model.
    pub tiers: Vec<CapacityTier>,
    /// A sourcing cost per item handled by the facility.
    pub cost_sourcing: Cost,
    /// Marks the line-haul origin rather than a satellite facility.
    pub is_depot: bool,
}

impl Facility {
    /// Returns a tier by its label.
    pub fn tier(&self, label: &str) -> Option<&CapacityTier> {
        self.tiers.iter().find(|tier| tier.label == label)
    }

    /// Returns the largest tier capacity.
    pub fn max_capacity(&self) -> Float {
        self.tiers.iter().map(|tier| tier.capacity).fold(0., Float::max)
    }
}
