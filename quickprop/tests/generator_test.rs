//! Tests for composing generators through the public API.

use quickprop::{
    Gen, Generator, arbitrary, choose, create_seeded_rng, elements, frequency, just, list_of,
    one_of, sample, sample_shrinks, sized, tuple_of,
};

#[test]
fn test_frequency_matches_weights() {
    let weights = [1usize, 3, 0, 6];
    let generator = frequency(
        weights
            .iter()
            .enumerate()
            .map(|(index, weight)| (*weight, just(index)))
            .collect(),
    );

    let draws = 30_000;
    let mut counts = [0usize; 4];
    let mut rng = create_seeded_rng(99);
    for _ in 0..draws {
        counts[*generator.generate(&mut rng, 10).unwrap().value()] += 1;
    }

    let total: usize = weights.iter().sum();
    for (index, weight) in weights.iter().enumerate() {
        let expected = *weight as f64 / total as f64;
        let observed = counts[index] as f64 / draws as f64;
        assert!(
            (expected - observed).abs() < 0.02,
            "branch {index}: expected {expected}, observed {observed}"
        );
    }
    assert_eq!(counts[2], 0);
}

#[test]
fn test_one_of_shrinks_within_chosen_branch() {
    let generator = one_of(vec![choose(100i32, 200), elements(vec![-1, -2, -3])]);

    for (value, shrinks) in sample_shrinks(&generator, 50, 12) {
        if value >= 100 {
            assert!(shrinks.iter().all(|x| (100..value).contains(x)));
        } else {
            assert!(shrinks.iter().all(|x| [-1, -2].contains(x)));
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Tree {
    Leaf(u8),
    Node(Box<Tree>, Box<Tree>),
}

impl Tree {
    fn depth(&self) -> usize {
        match self {
            Tree::Leaf(_) => 0,
            Tree::Node(left, right) => 1 + left.depth().max(right.depth()),
        }
    }
}

fn tree_of_depth(depth: usize) -> Gen<Tree> {
    let leaf = arbitrary::<u8>().map(|x: &u8| Tree::Leaf(*x));
    if depth == 0 {
        return leaf;
    }
    let node = tuple_of((tree_of_depth(depth - 1), tree_of_depth(depth - 1)))
        .map(|(left, right): &(Tree, Tree)| {
            Tree::Node(Box::new(left.clone()), Box::new(right.clone()))
        });
    frequency(vec![(1, leaf), (2, node)])
}

#[test]
fn test_sized_recursive_generator() {
    let trees = sized(|size| tree_of_depth(size.min(12) / 4));
    let samples = sample(&trees, 40, 3);

    assert_eq!(samples.len(), 40);
    for (size, tree) in samples.iter().enumerate() {
        assert!(tree.depth() <= size.min(12) / 4, "size {size}: {tree:?}");
    }
    assert!(samples.iter().any(|tree| tree.depth() > 0));
}

#[test]
fn test_samples_grow_with_size() {
    let lists = list_of(arbitrary::<u32>());
    let samples = sample(&lists, 100, 8);

    for (size, list) in samples.iter().enumerate() {
        assert!(list.len() <= size);
    }
    let early: usize = samples[..20].iter().map(Vec::len).sum();
    let late: usize = samples[80..].iter().map(Vec::len).sum();
    assert!(late > early);
}

#[test]
fn test_sample_is_reproducible() {
    let pairs = tuple_of((arbitrary::<i64>(), arbitrary::<String>()));
    assert_eq!(sample(&pairs, 25, 404), sample(&pairs, 25, 404));
    assert_ne!(sample(&pairs, 25, 404), sample(&pairs, 25, 405));
}
