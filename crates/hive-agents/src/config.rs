//! Configuration for agent vital mechanics.
//!
//! [`VitalsConfig`] bundles the energy parameters so the tick cycle and
//! tests can override the defaults. `hive-core` builds one from the
//! `rules` section of `hive-config.yaml`.

/// Configuration for agent energy mechanics applied each tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VitalsConfig {
    /// Energy lost by every living agent at the start of its turn (default: 2).
    pub upkeep_per_tick: u32,

    /// Energy ceiling (default: 100).
    pub max_energy: u32,

    /// Energy a new agent starts with (default: 100).
    pub starting_energy: u32,

    /// Energy restored per unit of the `energy` resource gathered (default: 5).
    pub energy_per_unit: u32,

    /// Below this energy a resting agent prefers gathering (default: 80).
    pub comfort_threshold: u32,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            upkeep_per_tick: 2,
            max_energy: 100,
            starting_energy: 100,
            energy_per_unit: 5,
            comfort_threshold: 80,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = VitalsConfig::default();
        assert_eq!(config.upkeep_per_tick, 2);
        assert_eq!(config.max_energy, 100);
        assert_eq!(config.starting_energy, 100);
        assert_eq!(config.energy_per_unit, 5);
        assert_eq!(config.comfort_threshold, 80);
    }
}
