use automata_netgen::{
    automaton::generate::{generate_automaton, AutomatonBounds},
    validation::assert_automaton_invariants,
};
use hashbrown::HashSet;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_generation_test(seed: u64, count: usize, bounds: AutomatonBounds) {
    let mut r = StdRng::seed_from_u64(seed);

    for _ in 0..count {
        let num_labels = r.gen_range(2..=8);
        let offset = r.gen_range(0..100);
        let alphabet: Vec<usize> = (offset..offset + num_labels).collect();

        let automaton =
            generate_automaton(&alphabet, &bounds, &mut r).expect("bounds are satisfiable");
        assert_automaton_invariants(&automaton, &bounds);
    }
}

#[test]
fn test_generation_invariants() {
    random_generation_test(
        1,
        50,
        AutomatonBounds {
            min_states: 5,
            max_states: 10,
            min_goal_states: 2,
            max_goal_states: 7,
            min_transitions_per_state: 2,
            min_transitions: 10,
        },
    );
    random_generation_test(
        2,
        50,
        AutomatonBounds {
            min_states: 1,
            max_states: 4,
            min_goal_states: 1,
            max_goal_states: 4,
            min_transitions_per_state: 0,
            min_transitions: 1,
        },
    );
    // per-state minimum above the alphabet size is clamped to the alphabet
    random_generation_test(
        3,
        50,
        AutomatonBounds {
            min_states: 4,
            max_states: 4,
            min_goal_states: 1,
            max_goal_states: 2,
            min_transitions_per_state: 20,
            min_transitions: 8,
        },
    );
}

#[test]
fn test_fixed_alphabet_scenario() {
    let alphabet = vec![1, 3, 12, 27, 5];
    let bounds = AutomatonBounds {
        min_states: 5,
        max_states: 5,
        min_goal_states: 1,
        max_goal_states: 5,
        min_transitions_per_state: 2,
        min_transitions: 10,
    };

    for seed in 0..20 {
        let mut r = StdRng::seed_from_u64(seed);
        let automaton = generate_automaton(&alphabet, &bounds, &mut r).unwrap();

        assert_eq!(automaton.state_count(), 5);
        assert_eq!(automaton.reachable_states().len(), 5);
        assert!(automaton.transition_count() >= 10);

        let used: HashSet<usize> = automaton.transitions().map(|(_, _, label)| label).collect();
        let expected: HashSet<usize> = alphabet.iter().copied().collect();
        assert_eq!(used, expected);

        for state in automaton.graph.node_indices() {
            assert!(automaton.outgoing_labels(state).len() >= 2);
        }
    }
}

#[test]
fn test_single_state_self_loops() {
    let mut r = StdRng::seed_from_u64(11);
    let alphabet = vec![0, 1, 2];
    let bounds = AutomatonBounds {
        min_states: 1,
        max_states: 1,
        min_goal_states: 1,
        max_goal_states: 1,
        min_transitions_per_state: 0,
        min_transitions: 3,
    };

    let automaton = generate_automaton(&alphabet, &bounds, &mut r).unwrap();

    assert_eq!(automaton.state_count(), 1);
    assert_eq!(automaton.transition_count(), 3);
    for (from, to, _) in automaton.transitions() {
        assert_eq!(from.index(), 0);
        assert_eq!(to.index(), 0);
    }
    assert!(automaton.is_goal_state(automaton.initial_state()));
}

#[test]
fn test_single_label_chain() {
    let alphabet = vec![7];
    let bounds = AutomatonBounds {
        min_states: 6,
        max_states: 6,
        min_goal_states: 1,
        max_goal_states: 6,
        min_transitions_per_state: 1,
        min_transitions: 6,
    };

    // with one label every state gets exactly one outgoing transition, so the
    // automaton is a function graph covering all six states from state 0
    for seed in 0..10 {
        let mut r = StdRng::seed_from_u64(seed);
        let automaton = generate_automaton(&alphabet, &bounds, &mut r).unwrap();

        assert_eq!(automaton.transition_count(), 6);
        assert_eq!(automaton.reachable_states().len(), 6);
        for state in automaton.graph.node_indices() {
            assert_eq!(automaton.outgoing_labels(state).len(), 1);
        }
    }
}

#[test]
fn test_goal_state_counts() {
    let alphabet: Vec<usize> = (0..4).collect();
    let bounds = AutomatonBounds {
        min_states: 3,
        max_states: 8,
        min_goal_states: 2,
        max_goal_states: 4,
        min_transitions_per_state: 1,
        min_transitions: 3,
    };

    for seed in 0..50 {
        let mut r = StdRng::seed_from_u64(seed);
        let automaton = generate_automaton(&alphabet, &bounds, &mut r).unwrap();

        let goals = automaton.goal_states().len();
        assert!(goals >= 2);
        assert!(goals <= automaton.state_count().min(4));
    }
}

#[test]
fn test_infeasible_transition_minimum() {
    let mut r = StdRng::seed_from_u64(3);
    let alphabet = vec![0, 1];
    let bounds = AutomatonBounds {
        min_states: 1,
        max_states: 1,
        min_goal_states: 1,
        max_goal_states: 1,
        min_transitions_per_state: 0,
        min_transitions: 5,
    };

    // a single state over two labels caps out at two transitions, so the
    // minimum of five must be reported as infeasible instead of looping
    let err = generate_automaton(&alphabet, &bounds, &mut r).unwrap_err();
    assert_eq!(err.num_states, 1);
    assert_eq!(err.num_labels, 2);
    assert_eq!(err.transitions_drawn, 2);
    assert_eq!(err.min_transitions, 5);
}
