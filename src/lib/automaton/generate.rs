use std::fmt::Display;

use petgraph::graph::NodeIndex;
use rand::{seq::SliceRandom, Rng};

use crate::{
    automaton::{Automaton, AutomatonState, Label},
    utils::random_prefix,
};

/// Bounds a single automaton is generated against. The caller must hand in
/// internally consistent values (see [crate::config::RawNetGenConfig::normalize]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutomatonBounds {
    pub min_states: usize,
    pub max_states: usize,
    pub min_goal_states: usize,
    pub max_goal_states: usize,
    pub min_transitions_per_state: usize,
    pub min_transitions: usize,
}

/// Returned when generation dead-ends: every remaining `(state, label)` pair
/// was consumed before all coverage targets were met, so no further
/// transition can be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfeasibleConstraints {
    pub num_states: usize,
    pub num_labels: usize,
    pub transitions_drawn: usize,
    pub min_transitions: usize,
}

impl Display for InfeasibleConstraints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "infeasible constraints: all (state, label) pairs of {} states and {} labels were used after {} transitions, but at least {} transitions are required",
            self.num_states, self.num_labels, self.transitions_drawn, self.min_transitions
        )
    }
}

impl std::error::Error for InfeasibleConstraints {}

/// Generates one automaton over `alphabet` by a randomized search from the
/// initial state.
///
/// The transition relation is drawn one transition per iteration until every
/// state is reachable from state 0, every label of the alphabet is used, every
/// state has at least the required number of distinct outgoing labels, and the
/// total transition count meets its minimum. Each state uses a label at most
/// once, so the loop consumes one unused `(state, label)` pair per iteration
/// and terminates after at most `states * labels` draws, either with a valid
/// automaton or with [InfeasibleConstraints].
pub fn generate_automaton<R: Rng>(
    alphabet: &[Label],
    bounds: &AutomatonBounds,
    rng: &mut R,
) -> Result<Automaton, InfeasibleConstraints> {
    assert!(!alphabet.is_empty(), "alphabet must not be empty");
    assert!(bounds.min_states >= 1, "automata must have at least one state");

    let num_labels = alphabet.len();
    let num_states = rng.gen_range(bounds.min_states..=bounds.max_states);

    // goal states, as the prefix of a random permutation of all states
    let goal_upper = bounds.max_goal_states.min(num_states);
    let goal_lower = bounds.min_goal_states.min(goal_upper);
    let num_goal_states = rng.gen_range(goal_lower..=goal_upper);

    let mut all_states: Vec<usize> = (0..num_states).collect();
    let mut goal = vec![false; num_states];
    for state in random_prefix(&mut all_states, num_goal_states, rng) {
        goal[state] = true;
    }

    let mut automaton = Automaton::new(alphabet.to_vec());
    for &is_goal in &goal {
        automaton.add_state(AutomatonState::new(is_goal));
    }

    // spanning order: state 0 first, the rest shuffled; the prefix of length
    // `reached` is always exactly the set of states proven reachable
    let mut order: Vec<usize> = (0..num_states).collect();
    order[1..].shuffle(rng);
    let mut reached = 1;

    let per_state_target = bounds.min_transitions_per_state.min(num_labels);

    // per-state label usage, indexed by position in the alphabet
    let mut used = vec![vec![false; num_labels]; num_states];
    let mut used_count = vec![0usize; num_states];

    // states that can still emit a fresh-label transition, with back-pointers
    // for O(1) swap-removal once a state has used its whole alphabet
    let mut open_states: Vec<usize> = (0..num_states).collect();
    let mut open_pos: Vec<Option<usize>> = (0..num_states).map(Some).collect();

    let mut label_used = vec![false; num_labels];
    let mut labels_used = 0;
    let mut states_below_target = if per_state_target == 0 { 0 } else { num_states };
    let mut transitions_drawn = 0;

    loop {
        let all_reached = reached == num_states;
        if all_reached
            && labels_used == num_labels
            && states_below_target == 0
            && transitions_drawn >= bounds.min_transitions
        {
            break;
        }

        let infeasible = InfeasibleConstraints {
            num_states,
            num_labels,
            transitions_drawn,
            min_transitions: bounds.min_transitions,
        };

        // source: among reached states while the frontier still grows, among
        // all states afterwards; blocked states are excluded either way
        let from = if all_reached {
            match open_states.choose(rng) {
                Some(&state) => state,
                None => return Err(infeasible),
            }
        } else {
            let candidates: Vec<usize> = order[..reached]
                .iter()
                .copied()
                .filter(|&state| used_count[state] < num_labels)
                .collect();
            match candidates.choose(rng) {
                Some(&state) => state,
                None => return Err(infeasible),
            }
        };

        // target: the next unreached state in spanning order while growing,
        // uniform among all states afterwards
        let to = if all_reached {
            rng.gen_range(0..num_states)
        } else {
            let next = order[reached];
            reached += 1;
            next
        };

        // label: uniform among the labels not yet used by `from`
        let free: Vec<usize> = (0..num_labels).filter(|&pos| !used[from][pos]).collect();
        let label_pos = *free.choose(rng).expect("open state has an unused label");

        used[from][label_pos] = true;
        used_count[from] += 1;
        if used_count[from] == per_state_target {
            states_below_target -= 1;
        }
        if used_count[from] == num_labels {
            if let Some(pos) = open_pos[from].take() {
                open_states.swap_remove(pos);
                if let Some(&moved) = open_states.get(pos) {
                    open_pos[moved] = Some(pos);
                }
            }
        }
        if !label_used[label_pos] {
            label_used[label_pos] = true;
            labels_used += 1;
        }

        automaton.add_transition(
            NodeIndex::new(from),
            NodeIndex::new(to),
            alphabet[label_pos],
        );
        transitions_drawn += 1;
    }

    #[cfg(debug_assertions)]
    crate::validation::assert_automaton_invariants(&automaton, bounds);

    Ok(automaton)
}
