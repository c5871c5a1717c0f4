#[cfg(test)]
#[path = "../../tests/unit/approximation/formulas_test.rs"]
mod formulas_test;

use crate::models::common::{Cost, Distance, Float};
use crate::models::problem::Vehicle;
use crate::utils::{ModelError, ModelResult};

/// A threshold below which a fleet size denominator is considered degenerate.
const NEAR_ZERO: Float = 1E-9;

/// Inputs of a single continuous-approximation evaluation.
///
/// Callers are expected to evaluate only combinations with positive demand: non-positive
/// drop or customer density indicates a broken upstream guard and fails loudly here
/// instead of producing NaN or infinity silently.
#[derive(Clone, Copy, Debug)]
pub struct TupleInput<'a> {
    /// A vehicle type to evaluate.
    pub vehicle: &'a Vehicle,
    /// A circuit factor of the delivery zone.
    pub zone_circuit_factor: Float,
    /// A zone surface area in square kilometers.
    pub area: Float,
    /// Customer density in customers per square kilometer (stops divided by area).
    pub density: Float,
    /// Drop size in items per customer.
    pub drop: Float,
    /// Facility-to-zone distance for zone-serving types, facility-to-depot distance for
    /// the line-haul type, in kilometers.
    pub distance: Distance,
}

/// Intermediate quantities and cost decomposition produced for a single combination.
#[derive(Clone, Debug, Default)]
pub struct TupleEstimate {
    /// Customers servable per full vehicle load.
    pub effective_capacity: Float,
    /// Intra-tour travel time per customer, in hours.
    pub intra_tour_time_per_customer: Float,
    /// Total tour time per customer, in hours.
    pub tour_time_per_customer: Float,
    /// Average tour duration, in hours.
    pub average_tour_time: Float,
    /// The intra-route duration component entering the tour count denominator:
    /// zero for the line-haul type which only shuttles between depot and facility.
    pub tour_time_component: Float,
    /// Average number of fully loaded tours within the route duration limit.
    pub average_number_fully_loaded_tours: Float,
    /// Average number of customers visited per tour.
    pub average_number_customers_per_tour: Float,
    /// Average number of tours performed.
    pub average_number_tours: Float,
    /// Average number of vehicles required.
    pub average_fleet_size: Float,
    /// Cost of dispatch preparation and loading per tour.
    pub cost_tour_preparation: Cost,
    /// Cost of the line-haul legs per tour.
    pub cost_line_haul: Cost,
    /// Cost of intra-stop travel per tour, zero for the line-haul type.
    pub cost_intra_stop: Cost,
    /// Fixed fleet cost.
    pub cost_fixed: Cost,
    /// Variable touring cost.
    pub cost_variable: Cost,
    /// Total cost, the sum of fixed and variable parts.
    pub cost_total: Cost,
    /// The distance used in the evaluation, in kilometers.
    pub distance: Distance,
}

/// Computes routing cost and fleet size estimates for a single combination.
pub fn estimate_tuple(input: &TupleInput) -> ModelResult<TupleEstimate> {
    let TupleInput { vehicle, zone_circuit_factor, area, density, drop, distance } = *input;

    if drop <= 0. || density <= 0. {
        return Err(ModelError::DegenerateInput(format!(
            "vehicle '{}' evaluated with non-positive drop ({drop}) or density ({density})",
            vehicle.id
        )));
    }

    let effective_capacity = vehicle.capacity / drop;

    let intra_tour_time_per_customer =
        vehicle.k * zone_circuit_factor / (density.sqrt() * vehicle.speed_inter_stop);

    let tour_time_per_customer =
        vehicle.time_set_up + vehicle.time_service * drop + intra_tour_time_per_customer;

    let average_tour_time = effective_capacity * tour_time_per_customer;

    // line-haul vehicles shuttle between depot and facility without touring inside a zone
    let tour_time_component = if vehicle.is_line_haul() { 0. } else { average_tour_time };

    let average_number_fully_loaded_tours = vehicle.t_max
        / (tour_time_component
            + vehicle.time_prep
            + vehicle.time_loading_per_item * effective_capacity * drop
            + 2. * distance * vehicle.k / vehicle.speed_line_haul);

    let average_number_customers_per_tour = effective_capacity * average_number_fully_loaded_tours.min(1.);

    let average_number_tours = average_number_fully_loaded_tours.max(1.);

    let fleet_denominator = average_number_fully_loaded_tours * effective_capacity;
    if !(fleet_denominator > NEAR_ZERO) {
        return Err(ModelError::DegenerateInput(format!(
            "vehicle '{}' yields a degenerate fleet size denominator ({fleet_denominator})",
            vehicle.id
        )));
    }

    let average_fleet_size = area * density / fleet_denominator;

    let cost_tour_preparation = vehicle.cost_hour
        * (vehicle.time_prep + vehicle.time_loading_per_item * average_number_customers_per_tour * drop);

    let cost_line_haul = vehicle.cost_hour * (2. * distance * vehicle.k / vehicle.speed_line_haul)
        + vehicle.cost_km * (2. * distance * vehicle.k);

    let cost_intra_stop = if vehicle.is_line_haul() {
        0.
    } else {
        vehicle.cost_hour * (tour_time_per_customer * average_number_customers_per_tour)
            + vehicle.cost_km
                * (vehicle.k * zone_circuit_factor * average_number_customers_per_tour / density.sqrt())
    };

    let cost_fixed = average_fleet_size * vehicle.cost_fixed;
    let cost_variable =
        average_fleet_size * average_number_tours * (cost_tour_preparation + cost_line_haul + cost_intra_stop);
    let cost_total = cost_fixed + cost_variable;

    Ok(TupleEstimate {
        effective_capacity,
        intra_tour_time_per_customer,
        tour_time_per_customer,
        average_tour_time,
        tour_time_component,
        average_number_fully_loaded_tours,
        average_number_customers_per_tour,
        average_number_tours,
        average_fleet_size,
        cost_tour_preparation,
        cost_line_haul,
        cost_intra_stop,
        cost_fixed,
        cost_variable,
        cost_total,
        distance,
    })
}
