use rand::{seq::SliceRandom, Rng};

/// Shuffles `items` in place and returns a copy of its first `count`
/// elements, i.e. a uniform random subset without replacement.
pub fn random_prefix<T: Copy, R: Rng>(items: &mut [T], count: usize, rng: &mut R) -> Vec<T> {
    items.shuffle(rng);
    items[..count].to_vec()
}

#[test]
fn test_random_prefix() {
    use rand::{rngs::StdRng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(7);
    let mut items = vec![1, 2, 3, 4, 5];
    let prefix = random_prefix(&mut items, 3, &mut rng);

    assert_eq!(prefix.len(), 3);
    assert!(prefix.iter().all(|x| (1..=5).contains(x)));

    let mut sorted = prefix.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), 3);
}
