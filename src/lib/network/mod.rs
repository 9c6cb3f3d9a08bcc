use rand::Rng;

use crate::{
    automaton::{
        generate::{generate_automaton, AutomatonBounds, InfeasibleConstraints},
        Automaton, Label,
    },
    config::NetGenConfig,
    logger::Logger,
    network::label_pool::LabelPool,
};

pub mod label_pool;

/// An ordered collection of automata over a shared, accumulating label space.
/// The position of an automaton is its component id and fixes its name in the
/// interchange format.
#[derive(Debug, Clone)]
pub struct Network {
    pub automata: Vec<Automaton>,
}

impl Network {
    pub fn len(&self) -> usize {
        self.automata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.automata.is_empty()
    }
}

/// Drives the per-component generation loop: splits each component's alphabet
/// into reused and freshly minted labels, mutates the label pool, and invokes
/// the automaton generator.
#[derive(Debug)]
pub struct NetworkAssembler<'a> {
    config: &'a NetGenConfig,
    pool: LabelPool,
}

impl<'a> NetworkAssembler<'a> {
    pub fn new(config: &'a NetGenConfig) -> Self {
        NetworkAssembler {
            config,
            pool: LabelPool::new(),
        }
    }

    pub fn pool(&self) -> &LabelPool {
        &self.pool
    }

    pub fn assemble<R: Rng>(
        &mut self,
        rng: &mut R,
        logger: Option<&Logger>,
    ) -> Result<Network, InfeasibleConstraints> {
        let bounds: AutomatonBounds = self.config.automaton_bounds();
        let mut automata = Vec::with_capacity(self.config.num_automata);

        for index in 0..self.config.num_automata {
            let (alphabet, num_shared) = self.draw_alphabet(rng);
            let automaton = generate_automaton(&alphabet, &bounds, rng)?;

            if let Some(logger) = logger {
                logger.debug(&format!(
                    "Generated automaton A{}: {} states, {} transitions, {} labels ({} shared)",
                    index,
                    automaton.state_count(),
                    automaton.transition_count(),
                    alphabet.len(),
                    num_shared
                ));
            }

            automata.push(automaton);
        }

        Ok(Network { automata })
    }

    /// Draws one component's alphabet: a shuffled-prefix draw from the
    /// sharable pool (skipped for the first component), then fresh mints for
    /// the remainder. Everything outside the private tail is published back
    /// to the pool. Returns the alphabet and the number of reused labels.
    fn draw_alphabet<R: Rng>(&mut self, rng: &mut R) -> (Vec<Label>, usize) {
        let config = self.config;
        let num_labels = rng.gen_range(config.min_labels..=config.max_labels);
        let mut num_private =
            rng.gen_range(config.min_private_labels..=config.max_private_labels);
        // at least one label must stay eligible for sharing
        if num_private > num_labels - 1 {
            num_private = num_labels - 1;
        }

        let mut labels = Vec::with_capacity(num_labels);

        if self.pool.allocated_count() > 0 {
            let share_budget = num_labels - num_private;
            let num_shared = rng
                .gen_range(1..=share_budget)
                .min(self.pool.sharable_count());
            labels.extend(self.pool.draw_sharable(num_shared, rng));
        }

        let num_shared = labels.len();
        let sharable_cutoff = num_labels - num_private;
        while labels.len() < num_labels {
            let label = self.pool.mint();
            if labels.len() < sharable_cutoff {
                self.pool.publish(label);
            }
            labels.push(label);
        }

        (labels, num_shared)
    }
}
