use std::fmt;

use hashbrown::HashMap;
use petgraph::graph::NodeIndex;
use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{
    automaton::{Automaton, AutomatonState, Label},
    network::Network,
};

pub const AUTOMATON_PREFIX: &str = "A";
pub const STATE_PREFIX: &str = "s";
pub const ACTION_PREFIX: &str = "a";

/// External representation of one automaton, one entry of the network
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonDocument {
    pub name: String,
    pub states: Vec<String>,
    pub input_symbols: Vec<String>,
    pub transitions: TransitionTable,
    pub initial_state: String,
    pub final_states: Vec<String>,
}

/// Transitions grouped by source state, in first-appearance order. Each
/// source maps every label it uses to its single target state, matching the
/// per-state label uniqueness of generated automata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionTable {
    rows: Vec<(String, Vec<(String, String)>)>,
}

impl TransitionTable {
    pub fn insert(&mut self, from: String, label: String, to: String) {
        match self.rows.iter_mut().find(|(state, _)| *state == from) {
            Some((_, row)) => row.push((label, to)),
            None => self.rows.push((from, vec![(label, to)])),
        }
    }

    /// All entries as `(from, label, to)`, grouped by source.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> + '_ {
        self.rows.iter().flat_map(|(from, row)| {
            row.iter()
                .map(move |(label, to)| (from.as_str(), label.as_str(), to.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.rows.iter().map(|(_, row)| row.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

struct TransitionRow<'a>(&'a [(String, String)]);

impl Serialize for TransitionRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, to) in self.0 {
            map.serialize_entry(label, to)?;
        }
        map.end()
    }
}

impl Serialize for TransitionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (from, row) in &self.rows {
            map.serialize_entry(from, &TransitionRow(row))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TransitionTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = TransitionTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a map from source states to label-target maps")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut table = TransitionTable::default();
                while let Some((from, row)) =
                    access.next_entry::<String, HashMap<String, String>>()?
                {
                    for (label, to) in row {
                        table.insert(from.clone(), label, to);
                    }
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

pub fn state_name(state: usize) -> String {
    format!("{}{}", STATE_PREFIX, state)
}

pub fn action_name(label: Label) -> String {
    format!("{}{}", ACTION_PREFIX, label)
}

/// Maps an automaton to its external document. Pure; the component index
/// fixes the automaton name.
pub fn encode_automaton(automaton: &Automaton, index: usize) -> AutomatonDocument {
    let mut transitions = TransitionTable::default();
    for (from, to, label) in automaton.transitions() {
        transitions.insert(
            state_name(from.index()),
            action_name(label),
            state_name(to.index()),
        );
    }

    AutomatonDocument {
        name: format!("{}{}", AUTOMATON_PREFIX, index),
        states: (0..automaton.state_count()).map(state_name).collect(),
        input_symbols: automaton.alphabet().iter().map(|&l| action_name(l)).collect(),
        transitions,
        initial_state: state_name(automaton.initial_state().index()),
        final_states: automaton
            .goal_states()
            .iter()
            .map(|state| state_name(state.index()))
            .collect(),
    }
}

/// Encodes a whole network in component order.
pub fn encode_network(network: &Network) -> Vec<AutomatonDocument> {
    network
        .automata
        .iter()
        .enumerate()
        .map(|(index, automaton)| encode_automaton(automaton, index))
        .collect()
}

/// Rebuilds an automaton from its external document; the inverse of
/// [encode_automaton] up to transition order within a source state.
pub fn decode_automaton(document: &AutomatonDocument) -> anyhow::Result<Automaton> {
    let alphabet = document
        .input_symbols
        .iter()
        .map(|name| parse_name(name, ACTION_PREFIX))
        .collect::<anyhow::Result<Vec<Label>>>()?;

    let num_states = document.states.len();
    let mut goal = vec![false; num_states];
    for name in &document.final_states {
        let state = parse_name(name, STATE_PREFIX)?;
        if state >= num_states {
            return Err(anyhow::anyhow!("final state {} is out of range", name));
        }
        goal[state] = true;
    }

    let mut automaton = Automaton::new(alphabet);
    for (position, name) in document.states.iter().enumerate() {
        let state = parse_name(name, STATE_PREFIX)?;
        if state != position {
            return Err(anyhow::anyhow!(
                "state {} at position {} breaks the contiguous numbering",
                name,
                position
            ));
        }
        automaton.add_state(AutomatonState::new(goal[position]));
    }

    if document.initial_state != state_name(0) {
        return Err(anyhow::anyhow!(
            "initial state must be {}, got {}",
            state_name(0),
            document.initial_state
        ));
    }

    for (from, label, to) in document.transitions.iter() {
        let from = parse_name(from, STATE_PREFIX)?;
        let to = parse_name(to, STATE_PREFIX)?;
        if from >= num_states || to >= num_states {
            return Err(anyhow::anyhow!(
                "transition {} -> {} references a state out of range",
                from,
                to
            ));
        }
        automaton.add_transition(
            NodeIndex::new(from),
            NodeIndex::new(to),
            parse_name(label, ACTION_PREFIX)?,
        );
    }

    Ok(automaton)
}

fn parse_name(name: &str, prefix: &str) -> anyhow::Result<usize> {
    let digits = name
        .strip_prefix(prefix)
        .ok_or_else(|| anyhow::anyhow!("name {:?} does not start with {:?}", name, prefix))?;
    Ok(digits.parse()?)
}
