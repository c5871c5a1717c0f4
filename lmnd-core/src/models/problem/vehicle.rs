use crate::models::common::{Cost, Float};

/// Distinguishes the depot-to-facility shuttle from zone-serving vehicle types.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VehicleKind {
    /// Replenishes satellite facilities from the central depot and never tours inside a zone.
    LineHaul,
    /// Serves delivery zones in last-mile tours.
    Delivery,
}

/// Represents a vehicle type with its routing time and cost structure.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// A vehicle type id.
    pub id: String,
    /// A vehicle kind.
    pub kind: VehicleKind,
    /// Carrying capacity in items.
    pub capacity: Float,
    /// A fixed cost per vehicle in the fleet.
    pub cost_fixed: Cost,
    /// Dispatch preparation time at the facility, in hours.
    pub time_prep: Float,
    /// Loading time per item, in hours.
    pub time_loading_per_item: Float,
    /// Set-up time per customer stop (e.g. parking), in hours.
    pub time_set_up: Float,
    /// Incremental service time per delivered item, in hours.
    pub time_service: Float,
    /// Line-haul travel speed, in km/h.
    pub speed_line_haul: Float,
    /// Inter-stop travel speed inside a zone, in km/h.
    pub speed_inter_stop: Float,
    /// Maximum route duration, in hours.
    pub t_max: Float,
    /// A cost per operating hour.
    pub cost_hour: Cost,
    /// A cost per traveled kilometer.
    pub cost_km: Cost,
    /// A cost per delivered item.
    pub cost_item: Cost,
    /// A circuit factor calibrating the tour-length approximation.
    pub k: Float,
}

impl Vehicle {
    /// Returns true for the line-haul (depot replenishment) vehicle type.
    pub fn is_line_haul(&self) -> bool {
        self.kind == VehicleKind::LineHaul
    }
}
