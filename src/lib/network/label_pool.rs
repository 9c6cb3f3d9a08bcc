use rand::Rng;

use crate::{automaton::Label, utils::random_prefix};

/// Network-wide record of the action identifiers minted so far.
///
/// Identifiers are handed out sequentially and never reused. Published
/// identifiers accumulate in the sharable pool, where later components draw
/// their shared actions from; identifiers minted as private never enter the
/// pool, and nothing is ever removed from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelPool {
    allocated: usize,
    sharable: Vec<Label>,
}

impl LabelPool {
    pub fn new() -> Self {
        LabelPool::default()
    }

    /// Number of identifiers minted so far across the whole network.
    pub fn allocated_count(&self) -> usize {
        self.allocated
    }

    pub fn sharable_count(&self) -> usize {
        self.sharable.len()
    }

    pub fn sharable(&self) -> &[Label] {
        &self.sharable
    }

    /// Mints a fresh identifier.
    pub fn mint(&mut self) -> Label {
        let label = self.allocated;
        self.allocated += 1;
        label
    }

    /// Makes a minted identifier available to later components.
    pub fn publish(&mut self, label: Label) {
        self.sharable.push(label);
    }

    /// Draws `count` distinct sharable identifiers as a shuffled prefix of
    /// the pool. Panics if `count` exceeds [LabelPool::sharable_count].
    pub fn draw_sharable<R: Rng>(&mut self, count: usize, rng: &mut R) -> Vec<Label> {
        random_prefix(&mut self.sharable, count, rng)
    }
}

#[test]
fn test_label_pool() {
    use rand::{rngs::StdRng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(3);
    let mut pool = LabelPool::new();

    assert_eq!(pool.mint(), 0);
    assert_eq!(pool.mint(), 1);
    assert_eq!(pool.mint(), 2);
    assert_eq!(pool.allocated_count(), 3);
    assert_eq!(pool.sharable_count(), 0);

    pool.publish(0);
    pool.publish(2);

    let drawn = pool.draw_sharable(1, &mut rng);
    assert_eq!(drawn.len(), 1);
    assert!(drawn[0] == 0 || drawn[0] == 2);
    // drawing never shrinks the pool
    assert_eq!(pool.sharable_count(), 2);
}
