use crate::models::common::{round0, round_to, Float};
use crate::models::problem::Facility;
use crate::models::Scenario;
use crate::solver::{LinTerm, MilpBackend, RowSense, VarId, VariableStore};
use crate::utils::{ModelError, ModelResult};
use std::sync::Arc;

/// Capacity planning mode of the design model, selected once at model construction.
///
/// The two modes share one variable schema; activation variables `Z` and their
/// constraints exist only under [`CapacityMode::Flexible`]. All mode-specific constraint
/// logic dispatches through [`CapacityMode::build_constraints`] instead of scattering
/// mode checks through every constraint method.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CapacityMode {
    /// The installed tier fixes capacity and operating cost for the whole horizon.
    Fixed,
    /// A facility may operate each period and scenario at any tier whose capacity does
    /// not exceed the installed one.
    Flexible,
}

impl CapacityMode {
    /// Parses a capacity mode from its configuration value.
    pub fn parse(value: &str) -> ModelResult<Self> {
        match value {
            "fixed-capacity" => Ok(CapacityMode::Fixed),
            "flex-capacity" => Ok(CapacityMode::Flexible),
            other => Err(ModelError::InvalidConfiguration(format!("unknown capacity mode '{other}'"))),
        }
    }

    /// Returns the configuration value of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            CapacityMode::Fixed => "fixed-capacity",
            CapacityMode::Flexible => "flex-capacity",
        }
    }

    /// Returns true for the flexible mode.
    pub fn is_flexible(&self) -> bool {
        *self == CapacityMode::Flexible
    }

    /// Collects unweighted operating cost terms: on `Y` in fixed mode (the installed tier
    /// pays for every period and scenario), on `Z` in flexible mode (only activated tiers
    /// pay). The caller applies the scenario-average weight.
    pub(crate) fn operating_cost_terms(
        &self,
        satellites: &[Arc<Facility>],
        scenarios: &[Arc<Scenario>],
        periods: usize,
        store: &VariableStore,
    ) -> ModelResult<Vec<(VarId, Float)>> {
        let mut terms = Vec::default();

        for facility in satellites {
            for tier in facility.tiers.iter().filter(|tier| tier.capacity > 0.) {
                for period in 0..periods {
                    let cost = round0(tier.cost_operation[period]);
                    for scenario in scenarios {
                        let var = match self {
                            CapacityMode::Fixed => store.y(&facility.id, &tier.label)?,
                            CapacityMode::Flexible => {
                                store.z(&facility.id, &tier.label, period, scenario.id())?
                            }
                        };
                        terms.push((var, cost));
                    }
                }
            }
        }

        Ok(terms)
    }

    /// Builds the mode-specific constraint sets: tier activation (A.2) and activation
    /// ordering (A.3) under flexible mode, then the capacity limit (A.4) weighted by the
    /// installed (`Y`) or activated (`Z`) tier capacity.
    pub(crate) fn build_constraints(
        &self,
        backend: &mut dyn MilpBackend,
        store: &VariableStore,
        satellites: &[Arc<Facility>],
        scenarios: &[Arc<Scenario>],
        periods: usize,
    ) -> ModelResult<()> {
        if self.is_flexible() {
            self.add_activation_choice(backend, store, satellites, scenarios, periods)?;
            self.add_activation_ordering(backend, store, satellites, scenarios, periods)?;
        }

        self.add_capacity_limit(backend, store, satellites, scenarios, periods)
    }

    /// A.2: for each (facility, period, scenario), exactly one tier is activated.
    fn add_activation_choice(
        &self,
        backend: &mut dyn MilpBackend,
        store: &VariableStore,
        satellites: &[Arc<Facility>],
        scenarios: &[Arc<Scenario>],
        periods: usize,
    ) -> ModelResult<()> {
        for facility in satellites {
            for scenario in scenarios {
                for period in 0..periods {
                    let expr = facility
                        .tiers
                        .iter()
                        .map(|tier| {
                            store
                                .z(&facility.id, &tier.label, period, scenario.id())
                                .map(|var| LinTerm { var, coefficient: 1. })
                        })
                        .collect::<ModelResult<Vec<_>>>()?;

                    let name = format!("R_activation_f{}_t{}_s{}", facility.id, period, scenario.id());
                    backend.add_constraint(&name, expr, RowSense::Equal, 1.);
                }
            }
        }

        Ok(())
    }

    /// A.3: a facility installed at a tier cannot activate any strictly higher-capacity
    /// tier. Tiers are compared by capacity value, not by label order.
    fn add_activation_ordering(
        &self,
        backend: &mut dyn MilpBackend,
        store: &VariableStore,
        satellites: &[Arc<Facility>],
        scenarios: &[Arc<Scenario>],
        periods: usize,
    ) -> ModelResult<()> {
        for period in 0..periods {
            for scenario in scenarios {
                for facility in satellites {
                    let max_capacity = facility.max_capacity();
                    for tier in facility.tiers.iter().filter(|tier| tier.capacity < max_capacity) {
                        let mut expr = facility
                            .tiers
                            .iter()
                            .filter(|higher| higher.capacity > tier.capacity)
                            .map(|higher| {
                                store
                                    .z(&facility.id, &higher.label, period, scenario.id())
                                    .map(|var| LinTerm { var, coefficient: 1. })
                            })
                            .collect::<ModelResult<Vec<_>>>()?;

                        expr.push(LinTerm { var: store.y(&facility.id, &tier.label)?, coefficient: 1. });

                        let name =
                            format!("R_operating_f{}_q{}_t{}_s{}", facility.id, tier.label, period, scenario.id());
                        backend.add_constraint(&name, expr, RowSense::LessOrEqual, 1.);
                    }
                }
            }
        }

        Ok(())
    }

    /// A.4: for each (facility, period, scenario), the fleet-size-weighted assignment must
    /// not exceed the installed (fixed mode) or activated (flexible mode) capacity.
    fn add_capacity_limit(
        &self,
        backend: &mut dyn MilpBackend,
        store: &VariableStore,
        satellites: &[Arc<Facility>],
        scenarios: &[Arc<Scenario>],
        periods: usize,
    ) -> ModelResult<()> {
        for period in 0..periods {
            for facility in satellites {
                for scenario in scenarios {
                    let mut expr = Vec::default();

                    let mut zone_ids: Vec<&String> = scenario.zones().keys().collect();
                    zone_ids.sort();

                    for zone_id in zone_ids {
                        let zone = &scenario.zones()[zone_id];
                        if zone.demand_at(period) <= 0. {
                            continue;
                        }

                        let estimate = scenario.facility_estimate(&facility.id, zone_id, period)?;
                        expr.push(LinTerm {
                            var: store.x(&facility.id, zone_id, period, scenario.id())?,
                            coefficient: round_to(estimate.fleet_size, 1),
                        });
                    }

                    for tier in facility.tiers.iter().filter(|tier| tier.capacity > 0.) {
                        let var = match self {
                            CapacityMode::Fixed => store.y(&facility.id, &tier.label)?,
                            CapacityMode::Flexible => {
                                store.z(&facility.id, &tier.label, period, scenario.id())?
                            }
                        };
                        expr.push(LinTerm { var, coefficient: -tier.capacity });
                    }

                    let name = format!("R_capacity_f{}_t{}_s{}", facility.id, period, scenario.id());
                    backend.add_constraint(&name, expr, RowSense::LessOrEqual, 0.);
                }
            }
        }

        Ok(())
    }
}
