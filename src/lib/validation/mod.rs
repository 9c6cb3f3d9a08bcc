use hashbrown::HashSet;
use itertools::Itertools;

use crate::automaton::{generate::AutomatonBounds, Automaton, Label};

/// Asserts every structural invariant a generated automaton must satisfy
/// against the bounds it was generated with. Used by the test suite and by
/// the generator itself in debug builds.
pub fn assert_automaton_invariants(automaton: &Automaton, bounds: &AutomatonBounds) {
    let num_states = automaton.state_count();
    assert!(
        num_states >= bounds.min_states && num_states <= bounds.max_states,
        "state count {} outside [{}, {}]",
        num_states,
        bounds.min_states,
        bounds.max_states
    );

    // every state is reachable from the initial state
    let reachable = automaton.reachable_states();
    assert_eq!(
        reachable.len(),
        num_states,
        "only {} of {} states are reachable from the initial state",
        reachable.len(),
        num_states
    );

    // goal states stay within the clamped bounds and are never empty when at
    // least one is required
    let goal_upper = bounds.max_goal_states.min(num_states);
    let goal_lower = bounds.min_goal_states.min(goal_upper);
    let num_goal_states = automaton.goal_states().len();
    assert!(
        num_goal_states >= goal_lower && num_goal_states <= goal_upper,
        "goal state count {} outside [{}, {}]",
        num_goal_states,
        goal_lower,
        goal_upper
    );

    // the labels appearing on transitions are exactly the alphabet
    let used_labels = automaton
        .transitions()
        .map(|(_, _, label)| label)
        .unique()
        .sorted()
        .collect_vec();
    let alphabet = automaton.alphabet().iter().copied().sorted().collect_vec();
    assert_eq!(used_labels, alphabet, "unused or foreign labels on transitions");

    // at most one transition per (state, label) pair
    let mut pairs: HashSet<(usize, Label)> = HashSet::new();
    for (from, _, label) in automaton.transitions() {
        assert!(
            pairs.insert((from.index(), label)),
            "state {} uses label {} more than once",
            from.index(),
            label
        );
    }

    // per-state minimum of distinct outgoing labels, clamped to the alphabet
    let per_state_target = bounds
        .min_transitions_per_state
        .min(automaton.alphabet().len());
    for state in automaton.graph.node_indices() {
        let outgoing = automaton.outgoing_labels(state).len();
        assert!(
            outgoing >= per_state_target,
            "state {} has {} distinct outgoing labels, expected at least {}",
            state.index(),
            outgoing,
            per_state_target
        );
    }

    assert!(
        automaton.transition_count() >= bounds.min_transitions,
        "{} transitions, expected at least {}",
        automaton.transition_count(),
        bounds.min_transitions
    );
}
