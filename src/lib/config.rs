use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::automaton::generate::AutomatonBounds;

/// Configuration as read from disk. The struct field names map to the
/// PascalCase keys of the configuration file; every missing field falls back
/// to its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RawNetGenConfig {
    pub min_num_states_per_automaton: i64,
    pub max_num_states_per_automaton: i64,
    pub min_num_goal_states_per_automaton: i64,
    pub max_num_goal_states_per_automaton: i64,
    pub min_num_labels_per_automaton: i64,
    pub max_num_labels_per_automaton: i64,
    pub min_num_private_labels_per_automaton: i64,
    pub max_num_private_labels_per_automaton: i64,
    pub min_num_transitions_per_state: i64,
    pub min_num_transitions_per_automaton: i64,
    pub num_automata: i64,
}

impl Default for RawNetGenConfig {
    fn default() -> Self {
        RawNetGenConfig {
            min_num_states_per_automaton: 5,
            max_num_states_per_automaton: 10,
            min_num_goal_states_per_automaton: 2,
            max_num_goal_states_per_automaton: 7,
            min_num_labels_per_automaton: 3,
            max_num_labels_per_automaton: 8,
            min_num_private_labels_per_automaton: 2,
            max_num_private_labels_per_automaton: 7,
            min_num_transitions_per_state: 2,
            min_num_transitions_per_automaton: 10,
            num_automata: 5,
        }
    }
}

impl RawNetGenConfig {
    /// Reads a configuration file, selecting the parser by file extension.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot open configuration file {}: {}", path, e))?;

        match Path::new(path).extension() {
            Some(ext) if ext == "json" => serde_json::from_str(&contents)
                .map_err(|e| anyhow::anyhow!("cannot parse configuration file {}: {}", path, e)),
            Some(ext) if ext == "toml" => toml::from_str(&contents)
                .map_err(|e| anyhow::anyhow!("cannot parse configuration file {}: {}", path, e)),
            _ => Err(anyhow::anyhow!(
                "unsupported configuration file extension: {:?}",
                Path::new(path).extension()
            )),
        }
    }

    /// Clamps every field to the nearest feasible value and returns the
    /// normalized configuration together with one warning per adjustment.
    /// The checks run in a fixed order, so each clamp sees the effect of the
    /// previous ones.
    pub fn normalize(self) -> (NetGenConfig, Vec<String>) {
        let mut warnings = Vec::new();
        let mut c = self;

        if c.min_num_states_per_automaton < 1 {
            warnings.push(format!(
                "MinNumStatesPerAutomaton ({}) should be at least 1, automatically set to 1",
                c.min_num_states_per_automaton
            ));
            c.min_num_states_per_automaton = 1;
        }

        if c.max_num_states_per_automaton < c.min_num_states_per_automaton {
            warnings.push(format!(
                "MaxNumStatesPerAutomaton ({}) should be at least equal to MinNumStatesPerAutomaton ({}), automatically set to {}",
                c.max_num_states_per_automaton,
                c.min_num_states_per_automaton,
                c.min_num_states_per_automaton
            ));
            c.max_num_states_per_automaton = c.min_num_states_per_automaton;
        }

        if c.min_num_goal_states_per_automaton < 1 {
            warnings.push(format!(
                "MinNumGoalStatesPerAutomaton ({}) should be at least 1, automatically set to 1",
                c.min_num_goal_states_per_automaton
            ));
            c.min_num_goal_states_per_automaton = 1;
        }

        if c.min_num_goal_states_per_automaton > c.max_num_states_per_automaton {
            warnings.push(format!(
                "MinNumGoalStatesPerAutomaton ({}) should be smaller or equal than MaxNumStatesPerAutomaton ({}), automatically set to {}",
                c.min_num_goal_states_per_automaton,
                c.max_num_states_per_automaton,
                c.max_num_states_per_automaton
            ));
            c.min_num_goal_states_per_automaton = c.max_num_states_per_automaton;
        }

        if c.max_num_goal_states_per_automaton < c.min_num_goal_states_per_automaton {
            warnings.push(format!(
                "MaxNumGoalStatesPerAutomaton ({}) should be at least equal to MinNumGoalStatesPerAutomaton ({}), automatically set to {}",
                c.max_num_goal_states_per_automaton,
                c.min_num_goal_states_per_automaton,
                c.min_num_goal_states_per_automaton
            ));
            c.max_num_goal_states_per_automaton = c.min_num_goal_states_per_automaton;
        }

        if c.max_num_goal_states_per_automaton > c.max_num_states_per_automaton {
            warnings.push(format!(
                "MaxNumGoalStatesPerAutomaton ({}) should be smaller or equal than MaxNumStatesPerAutomaton ({}), automatically set to {}",
                c.max_num_goal_states_per_automaton,
                c.max_num_states_per_automaton,
                c.max_num_states_per_automaton
            ));
            c.max_num_goal_states_per_automaton = c.max_num_states_per_automaton;
        }

        if c.min_num_labels_per_automaton < 1 {
            warnings.push(format!(
                "MinNumLabelsPerAutomaton ({}) should be at least 1, automatically set to 1",
                c.min_num_labels_per_automaton
            ));
            c.min_num_labels_per_automaton = 1;
        }

        if c.max_num_labels_per_automaton < c.min_num_labels_per_automaton {
            warnings.push(format!(
                "MaxNumLabelsPerAutomaton ({}) should be at least equal to MinNumLabelsPerAutomaton ({}), automatically set to {}",
                c.max_num_labels_per_automaton,
                c.min_num_labels_per_automaton,
                c.min_num_labels_per_automaton
            ));
            c.max_num_labels_per_automaton = c.min_num_labels_per_automaton;
        }

        if c.min_num_private_labels_per_automaton < 0 {
            warnings.push(format!(
                "MinNumPrivateLabelsPerAutomaton ({}) should not be negative, automatically set to 0",
                c.min_num_private_labels_per_automaton
            ));
            c.min_num_private_labels_per_automaton = 0;
        }

        if c.min_num_private_labels_per_automaton > c.max_num_labels_per_automaton - 1 {
            warnings.push(format!(
                "MinNumPrivateLabelsPerAutomaton ({}) should be strictly smaller than MaxNumLabelsPerAutomaton ({}), automatically set to {}",
                c.min_num_private_labels_per_automaton,
                c.max_num_labels_per_automaton,
                c.max_num_labels_per_automaton - 1
            ));
            c.min_num_private_labels_per_automaton = c.max_num_labels_per_automaton - 1;
        }

        if c.max_num_private_labels_per_automaton < c.min_num_private_labels_per_automaton {
            warnings.push(format!(
                "MaxNumPrivateLabelsPerAutomaton ({}) should be at least equal to MinNumPrivateLabelsPerAutomaton ({}), automatically set to {}",
                c.max_num_private_labels_per_automaton,
                c.min_num_private_labels_per_automaton,
                c.min_num_private_labels_per_automaton
            ));
            c.max_num_private_labels_per_automaton = c.min_num_private_labels_per_automaton;
        }

        if c.max_num_private_labels_per_automaton > c.max_num_labels_per_automaton - 1 {
            warnings.push(format!(
                "MaxNumPrivateLabelsPerAutomaton ({}) should be strictly smaller than MaxNumLabelsPerAutomaton ({}), automatically set to {}",
                c.max_num_private_labels_per_automaton,
                c.max_num_labels_per_automaton,
                c.max_num_labels_per_automaton - 1
            ));
            c.max_num_private_labels_per_automaton = c.max_num_labels_per_automaton - 1;
        }

        if c.min_num_transitions_per_state < 0 {
            warnings.push(format!(
                "MinNumTransitionsPerState ({}) should not be negative, automatically set to 0",
                c.min_num_transitions_per_state
            ));
            c.min_num_transitions_per_state = 0;
        }

        if c.min_num_transitions_per_state > c.max_num_labels_per_automaton {
            warnings.push(format!(
                "MinNumTransitionsPerState ({}) should be smaller or equal than MaxNumLabelsPerAutomaton ({}), automatically set to {}",
                c.min_num_transitions_per_state,
                c.max_num_labels_per_automaton,
                c.max_num_labels_per_automaton
            ));
            c.min_num_transitions_per_state = c.max_num_labels_per_automaton;
        }

        if c.min_num_transitions_per_automaton < 1 {
            warnings.push(format!(
                "MinNumTransitionsPerAutomaton ({}) should be at least 1, automatically set to 1",
                c.min_num_transitions_per_automaton
            ));
            c.min_num_transitions_per_automaton = 1;
        }

        let capacity = c.max_num_labels_per_automaton * c.max_num_states_per_automaton;
        if c.min_num_transitions_per_automaton > capacity {
            warnings.push(format!(
                "MinNumTransitionsPerAutomaton ({}) should be smaller or equal than MaxNumLabelsPerAutomaton * MaxNumStatesPerAutomaton ({} * {}), automatically set to {}",
                c.min_num_transitions_per_automaton,
                c.max_num_labels_per_automaton,
                c.max_num_states_per_automaton,
                capacity
            ));
            c.min_num_transitions_per_automaton = capacity;
        }

        let floor = c.min_num_transitions_per_state * c.min_num_states_per_automaton;
        if c.min_num_transitions_per_automaton < floor {
            warnings.push(format!(
                "MinNumTransitionsPerAutomaton ({}) should be greater or equal than MinNumTransitionsPerState * MinNumStatesPerAutomaton ({} * {}), automatically set to {}",
                c.min_num_transitions_per_automaton,
                c.min_num_transitions_per_state,
                c.min_num_states_per_automaton,
                floor
            ));
            c.min_num_transitions_per_automaton = floor;
        }

        if c.num_automata < 1 {
            warnings.push(format!(
                "NumAutomata ({}) should be at least 1, automatically set to 1",
                c.num_automata
            ));
            c.num_automata = 1;
        }

        let config = NetGenConfig {
            min_states: c.min_num_states_per_automaton as usize,
            max_states: c.max_num_states_per_automaton as usize,
            min_goal_states: c.min_num_goal_states_per_automaton as usize,
            max_goal_states: c.max_num_goal_states_per_automaton as usize,
            min_labels: c.min_num_labels_per_automaton as usize,
            max_labels: c.max_num_labels_per_automaton as usize,
            min_private_labels: c.min_num_private_labels_per_automaton as usize,
            max_private_labels: c.max_num_private_labels_per_automaton as usize,
            min_transitions_per_state: c.min_num_transitions_per_state as usize,
            min_transitions_per_automaton: c.min_num_transitions_per_automaton as usize,
            num_automata: c.num_automata as usize,
        };

        (config, warnings)
    }
}

/// Internally consistent generation bounds; the only configuration shape the
/// generation core accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetGenConfig {
    pub min_states: usize,
    pub max_states: usize,
    pub min_goal_states: usize,
    pub max_goal_states: usize,
    pub min_labels: usize,
    pub max_labels: usize,
    pub min_private_labels: usize,
    pub max_private_labels: usize,
    pub min_transitions_per_state: usize,
    pub min_transitions_per_automaton: usize,
    pub num_automata: usize,
}

impl NetGenConfig {
    pub fn automaton_bounds(&self) -> AutomatonBounds {
        AutomatonBounds {
            min_states: self.min_states,
            max_states: self.max_states,
            min_goal_states: self.min_goal_states,
            max_goal_states: self.max_goal_states,
            min_transitions_per_state: self.min_transitions_per_state,
            min_transitions: self.min_transitions_per_automaton,
        }
    }
}

impl Default for NetGenConfig {
    fn default() -> Self {
        RawNetGenConfig::default().normalize().0
    }
}
