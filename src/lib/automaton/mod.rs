use hashbrown::HashSet;
use petgraph::{
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::{Bfs, EdgeRef},
    Direction,
};

pub mod generate;

/// Identifier of an action. Unique across a whole network, so two automata
/// carrying the same label synchronize on the same action.
pub type Label = usize;

/// Node data of an automaton state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutomatonState {
    pub goal: bool,
}

impl AutomatonState {
    pub fn new(goal: bool) -> Self {
        AutomatonState { goal }
    }
}

/// A finite automaton over an integer alphabet.
///
/// States are the contiguous node indices `0..state_count()`; state 0 is
/// always the initial state. Transitions are edges in insertion order.
#[derive(Debug, Clone)]
pub struct Automaton {
    pub graph: DiGraph<AutomatonState, Label>,
    alphabet: Vec<Label>,
}

impl Automaton {
    pub fn new(alphabet: Vec<Label>) -> Self {
        Automaton {
            graph: DiGraph::new(),
            alphabet,
        }
    }

    pub fn alphabet(&self) -> &[Label] {
        &self.alphabet
    }

    pub fn initial_state(&self) -> NodeIndex {
        NodeIndex::new(0)
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn transition_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn add_state(&mut self, data: AutomatonState) -> NodeIndex {
        self.graph.add_node(data)
    }

    pub fn add_transition(&mut self, from: NodeIndex, to: NodeIndex, label: Label) -> EdgeIndex {
        self.graph.add_edge(from, to, label)
    }

    pub fn is_goal_state(&self, state: NodeIndex) -> bool {
        self.graph[state].goal
    }

    /// All goal states, in state order.
    pub fn goal_states(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&state| self.graph[state].goal)
            .collect()
    }

    /// All transitions as `(from, to, label)`, in insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, Label)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target(), *edge.weight()))
    }

    /// The successor of `state` under `label`, if such a transition exists.
    /// Per-state labels are unique, so the first match is the only one.
    pub fn successor(&self, state: NodeIndex, label: Label) -> Option<NodeIndex> {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .find(|edge| *edge.weight() == label)
            .map(|edge| edge.target())
    }

    /// The set of distinct labels on transitions leaving `state`.
    pub fn outgoing_labels(&self, state: NodeIndex) -> HashSet<Label> {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .map(|edge| *edge.weight())
            .collect()
    }

    /// All states reachable from the initial state.
    pub fn reachable_states(&self) -> HashSet<NodeIndex> {
        let mut reachable = HashSet::new();
        if self.graph.node_count() == 0 {
            return reachable;
        }

        let mut bfs = Bfs::new(&self.graph, self.initial_state());
        while let Some(state) = bfs.next(&self.graph) {
            reachable.insert(state);
        }

        reachable
    }
}
