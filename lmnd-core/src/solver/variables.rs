//! Decision variable families and their composite keys.
//!
//! The tuple order convention is fixed across the whole crate: `(facility, tier-or-zone,
//! period, scenario)`. Keys render into variable names as `Y_f<F>_q<Q>`,
//! `Z_f<F>_q<Q>_t<T>_s<S>`, `X_f<F>_z<Z>_t<T>_s<S>` and `W_z<Z>_t<T>_s<S>`. Inserting a
//! key asserts that its rendered name parses back into the same key, so an index built
//! with a different field order cannot go unnoticed.

#[cfg(test)]
#[path = "../../tests/unit/solver/variables_test.rs"]
mod variables_test;

use crate::models::common::Period;
use crate::solver::VarId;
use crate::utils::{ModelError, ModelResult};
use rustc_hash::FxHashMap;

/// Key of an installation variable `Y[facility, tier]`: facility installed at that tier.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct InstallKey {
    /// A facility id.
    pub facility: String,
    /// A tier label.
    pub tier: String,
}

/// Key of an activation variable `Z[facility, tier, period, scenario]`: facility operating
/// at that tier in that period and scenario. Used only under flexible capacity.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ActivationKey {
    /// A facility id.
    pub facility: String,
    /// A tier label.
    pub tier: String,
    /// A period index.
    pub period: Period,
    /// A scenario id.
    pub scenario: String,
}

/// Key of an assignment variable `X[facility, zone, period, scenario]`: zone served from
/// that facility in that period and scenario.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct AssignKey {
    /// A facility id.
    pub facility: String,
    /// A zone id.
    pub zone: String,
    /// A period index.
    pub period: Period,
    /// A scenario id.
    pub scenario: String,
}

/// Key of a depot assignment variable `W[zone, period, scenario]`: zone served directly
/// from the depot in that period and scenario.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct DepotAssignKey {
    /// A zone id.
    pub zone: String,
    /// A period index.
    pub period: Period,
    /// A scenario id.
    pub scenario: String,
}

impl InstallKey {
    /// Renders the variable name of the key.
    pub fn name(&self) -> String {
        format!("Y_f{}_q{}", self.facility, self.tier)
    }

    /// Parses a variable name back into a key.
    pub fn parse(name: &str) -> Option<Self> {
        let rest = name.strip_prefix("Y_f")?;
        let (facility, tier) = rest.rsplit_once("_q")?;
        Some(Self { facility: facility.to_string(), tier: tier.to_string() })
    }
}

impl ActivationKey {
    /// Renders the variable name of the key.
    pub fn name(&self) -> String {
        format!("Z_f{}_q{}_t{}_s{}", self.facility, self.tier, self.period, self.scenario)
    }

    /// Parses a variable name back into a key.
    pub fn parse(name: &str) -> Option<Self> {
        let rest = name.strip_prefix("Z_f")?;
        let (rest, scenario) = rest.rsplit_once("_s")?;
        let (rest, period) = rest.rsplit_once("_t")?;
        let (facility, tier) = rest.rsplit_once("_q")?;
        Some(Self {
            facility: facility.to_string(),
            tier: tier.to_string(),
            period: period.parse().ok()?,
            scenario: scenario.to_string(),
        })
    }
}

impl AssignKey {
    /// Renders the variable name of the key.
    pub fn name(&self) -> String {
        format!("X_f{}_z{}_t{}_s{}", self.facility, self.zone, self.period, self.scenario)
    }

    /// Parses a variable name back into a key.
    pub fn parse(name: &str) -> Option<Self> {
        let rest = name.strip_prefix("X_f")?;
        let (rest, scenario) = rest.rsplit_once("_s")?;
        let (rest, period) = rest.rsplit_once("_t")?;
        let (facility, zone) = rest.rsplit_once("_z")?;
        Some(Self {
            facility: facility.to_string(),
            zone: zone.to_string(),
            period: period.parse().ok()?,
            scenario: scenario.to_string(),
        })
    }
}

impl DepotAssignKey {
    /// Renders the variable name of the key.
    pub fn name(&self) -> String {
        format!("W_z{}_t{}_s{}", self.zone, self.period, self.scenario)
    }

    /// Parses a variable name back into a key.
    pub fn parse(name: &str) -> Option<Self> {
        let rest = name.strip_prefix("W_z")?;
        let (rest, scenario) = rest.rsplit_once("_s")?;
        let (zone, period) = rest.rsplit_once("_t")?;
        Some(Self { zone: zone.to_string(), period: period.parse().ok()?, scenario: scenario.to_string() })
    }
}

/// Keeps backend variable ids of the four decision variable families, keyed by their
/// composite tuples.
#[derive(Default)]
pub struct VariableStore {
    y: FxHashMap<InstallKey, VarId>,
    z: FxHashMap<ActivationKey, VarId>,
    x: FxHashMap<AssignKey, VarId>,
    w: FxHashMap<DepotAssignKey, VarId>,
}

impl VariableStore {
    /// Registers an installation variable.
    pub fn insert_y(&mut self, key: InstallKey, id: VarId) {
        debug_assert_eq!(InstallKey::parse(&key.name()).as_ref(), Some(&key));
        self.y.insert(key, id);
    }

    /// Registers an activation variable.
    pub fn insert_z(&mut self, key: ActivationKey, id: VarId) {
        debug_assert_eq!(ActivationKey::parse(&key.name()).as_ref(), Some(&key));
        self.z.insert(key, id);
    }

    /// Registers an assignment variable.
    pub fn insert_x(&mut self, key: AssignKey, id: VarId) {
        debug_assert_eq!(AssignKey::parse(&key.name()).as_ref(), Some(&key));
        self.x.insert(key, id);
    }

    /// Registers a depot assignment variable.
    pub fn insert_w(&mut self, key: DepotAssignKey, id: VarId) {
        debug_assert_eq!(DepotAssignKey::parse(&key.name()).as_ref(), Some(&key));
        self.w.insert(key, id);
    }

    /// Returns an installation variable id.
    pub fn y(&self, facility: &str, tier: &str) -> ModelResult<VarId> {
        let key = InstallKey { facility: facility.to_string(), tier: tier.to_string() };
        self.y.get(&key).copied().ok_or_else(|| ModelError::MissingVariable(key.name()))
    }

    /// Returns an activation variable id.
    pub fn z(&self, facility: &str, tier: &str, period: Period, scenario: &str) -> ModelResult<VarId> {
        let key = ActivationKey {
            facility: facility.to_string(),
            tier: tier.to_string(),
            period,
            scenario: scenario.to_string(),
        };
        self.z.get(&key).copied().ok_or_else(|| ModelError::MissingVariable(key.name()))
    }

    /// Returns an assignment variable id.
    pub fn x(&self, facility: &str, zone: &str, period: Period, scenario: &str) -> ModelResult<VarId> {
        let key = AssignKey {
            facility: facility.to_string(),
            zone: zone.to_string(),
            period,
            scenario: scenario.to_string(),
        };
        self.x.get(&key).copied().ok_or_else(|| ModelError::MissingVariable(key.name()))
    }

    /// Returns a depot assignment variable id.
    pub fn w(&self, zone: &str, period: Period, scenario: &str) -> ModelResult<VarId> {
        let key = DepotAssignKey { zone: zone.to_string(), period, scenario: scenario.to_string() };
        self.w.get(&key).copied().ok_or_else(|| ModelError::MissingVariable(key.name()))
    }

    /// Returns amounts of variables per family as `(y, z, x, w)`.
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        (self.y.len(), self.z.len(), self.x.len(), self.w.len())
    }

    /// Iterates over all registered variables as `(name, id)` pairs.
    pub fn iter_names(&self) -> impl Iterator<Item = (String, VarId)> + '_ {
        self.y
            .iter()
            .map(|(key, &id)| (key.name(), id))
            .chain(self.z.iter().map(|(key, &id)| (key.name(), id)))
            .chain(self.x.iter().map(|(key, &id)| (key.name(), id)))
            .chain(self.w.iter().map(|(key, &id)| (key.name(), id)))
    }
}
