use std::{env, fs};

use automata_netgen::config::{NetGenConfig, RawNetGenConfig};

fn to_raw(config: &NetGenConfig) -> RawNetGenConfig {
    RawNetGenConfig {
        min_num_states_per_automaton: config.min_states as i64,
        max_num_states_per_automaton: config.max_states as i64,
        min_num_goal_states_per_automaton: config.min_goal_states as i64,
        max_num_goal_states_per_automaton: config.max_goal_states as i64,
        min_num_labels_per_automaton: config.min_labels as i64,
        max_num_labels_per_automaton: config.max_labels as i64,
        min_num_private_labels_per_automaton: config.min_private_labels as i64,
        max_num_private_labels_per_automaton: config.max_private_labels as i64,
        min_num_transitions_per_state: config.min_transitions_per_state as i64,
        min_num_transitions_per_automaton: config.min_transitions_per_automaton as i64,
        num_automata: config.num_automata as i64,
    }
}

#[test]
fn test_default_config_normalizes_clean() {
    let (config, warnings) = RawNetGenConfig::default().normalize();

    assert!(warnings.is_empty());
    assert_eq!(config.min_states, 5);
    assert_eq!(config.max_states, 10);
    assert_eq!(config.min_goal_states, 2);
    assert_eq!(config.max_goal_states, 7);
    assert_eq!(config.min_labels, 3);
    assert_eq!(config.max_labels, 8);
    assert_eq!(config.min_private_labels, 2);
    assert_eq!(config.max_private_labels, 7);
    assert_eq!(config.min_transitions_per_state, 2);
    assert_eq!(config.min_transitions_per_automaton, 10);
    assert_eq!(config.num_automata, 5);
}

#[test]
fn test_state_bound_clamps_cascade() {
    let raw = RawNetGenConfig {
        min_num_states_per_automaton: 0,
        max_num_states_per_automaton: -1,
        ..Default::default()
    };
    let (config, warnings) = raw.normalize();

    // the state clamps pull the goal-state and transition bounds down with
    // them, one warning per adjusted field
    assert_eq!(warnings.len(), 5);
    assert_eq!(config.min_states, 1);
    assert_eq!(config.max_states, 1);
    assert_eq!(config.min_goal_states, 1);
    assert_eq!(config.max_goal_states, 1);
    assert_eq!(config.min_transitions_per_automaton, 8);
}

#[test]
fn test_private_label_clamp() {
    let raw = RawNetGenConfig {
        min_num_private_labels_per_automaton: 12,
        ..Default::default()
    };
    let (config, warnings) = raw.normalize();

    assert_eq!(warnings.len(), 1);
    assert_eq!(config.min_private_labels, config.max_labels - 1);
    assert_eq!(config.max_private_labels, config.max_labels - 1);
}

#[test]
fn test_transition_floor_clamp() {
    let raw = RawNetGenConfig {
        min_num_transitions_per_state: 5,
        min_num_transitions_per_automaton: 10,
        ..Default::default()
    };
    let (config, warnings) = raw.normalize();

    assert_eq!(warnings.len(), 1);
    assert_eq!(config.min_transitions_per_automaton, 25);
}

#[test]
fn test_normalize_is_idempotent() {
    let raw = RawNetGenConfig {
        min_num_states_per_automaton: -3,
        max_num_states_per_automaton: 0,
        min_num_private_labels_per_automaton: 100,
        min_num_transitions_per_automaton: 0,
        num_automata: 0,
        ..Default::default()
    };
    let (config, warnings) = raw.normalize();
    assert!(!warnings.is_empty());

    let (again, warnings) = to_raw(&config).normalize();
    assert!(warnings.is_empty());
    assert_eq!(again, config);
}

#[test]
fn test_partial_json_falls_back_to_defaults() {
    let raw: RawNetGenConfig = serde_json::from_str(r#"{"NumAutomata": 2}"#).unwrap();

    assert_eq!(raw.num_automata, 2);
    assert_eq!(raw.min_num_states_per_automaton, 5);
    assert_eq!(raw.max_num_labels_per_automaton, 8);
}

#[test]
fn test_from_file_json() {
    let path = env::temp_dir().join("netgen_config_test.json");
    fs::write(&path, r#"{"NumAutomata": 3, "MinNumStatesPerAutomaton": 2}"#).unwrap();

    let raw = RawNetGenConfig::from_file(path.to_str().unwrap()).unwrap();
    assert_eq!(raw.num_automata, 3);
    assert_eq!(raw.min_num_states_per_automaton, 2);
}

#[test]
fn test_from_file_toml() {
    let path = env::temp_dir().join("netgen_config_test.toml");
    fs::write(&path, "NumAutomata = 4\nMaxNumStatesPerAutomaton = 12\n").unwrap();

    let raw = RawNetGenConfig::from_file(path.to_str().unwrap()).unwrap();
    assert_eq!(raw.num_automata, 4);
    assert_eq!(raw.max_num_states_per_automaton, 12);
}

#[test]
fn test_from_file_errors() {
    assert!(RawNetGenConfig::from_file("does_not_exist.json").is_err());

    let path = env::temp_dir().join("netgen_config_test.yaml");
    fs::write(&path, "NumAutomata: 4\n").unwrap();
    assert!(RawNetGenConfig::from_file(path.to_str().unwrap()).is_err());

    let path = env::temp_dir().join("netgen_config_broken.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(RawNetGenConfig::from_file(path.to_str().unwrap()).is_err());
}
