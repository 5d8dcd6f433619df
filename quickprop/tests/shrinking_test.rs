//! Tests for the termination and coverage of the built-in shrinkers.

use quickprop::{
    Arbitrary, Generated, Generator, arbitrary, create_seeded_rng, list_of, list_of_non_empty,
    tuple_of,
};
use std::fmt::Debug;

const MAX_BATCH: usize = 1000;
const MAX_ROUNDS: usize = 1000;

/// Follow the candidate with the most candidates of its own, the first one
/// on ties, until nothing is left. Returns the number of rounds taken.
fn worst_branch_rounds<T, F>(start: T, shrink: F, max_rounds: usize) -> usize
where
    T: Clone + Debug,
    F: Fn(&T) -> Vec<T>,
{
    let mut current = start.clone();
    for round in 0..=max_rounds {
        let batch = shrink(&current);
        assert!(
            batch.len() < MAX_BATCH,
            "{start:?}: batch of {} at round {round}",
            batch.len()
        );
        let mut worst: Option<(usize, T)> = None;
        for candidate in batch {
            let width = shrink(&candidate).len();
            if worst.as_ref().is_none_or(|(best, _)| width > *best) {
                worst = Some((width, candidate));
            }
        }
        match worst {
            Some((_, next)) => current = next,
            None => return round,
        }
    }
    panic!("{start:?} still shrinking after {max_rounds} rounds");
}

fn assert_terminates<T: Arbitrary>(values: &[T], max_rounds: usize) {
    for value in values {
        worst_branch_rounds(value.clone(), T::shrink, max_rounds);
    }
}

macro_rules! integral_seeds {
    (signed $t:ty) => {
        [0, 1, -1, 3, -3, 100, <$t>::MIN, <$t>::MAX]
    };
    (unsigned $t:ty) => {
        [0, 1, 3, 100, <$t>::MAX]
    };
}

#[test]
fn test_integral_shrinking_terminates() {
    assert_terminates::<i8>(&integral_seeds!(signed i8), MAX_ROUNDS);
    assert_terminates::<u8>(&integral_seeds!(unsigned u8), MAX_ROUNDS);
    assert_terminates::<i16>(&integral_seeds!(signed i16), MAX_ROUNDS);
    assert_terminates::<u16>(&integral_seeds!(unsigned u16), MAX_ROUNDS);
    assert_terminates::<i32>(&integral_seeds!(signed i32), MAX_ROUNDS);
    assert_terminates::<u32>(&integral_seeds!(unsigned u32), MAX_ROUNDS);
    assert_terminates::<i64>(&integral_seeds!(signed i64), MAX_ROUNDS);
    assert_terminates::<u64>(&integral_seeds!(unsigned u64), MAX_ROUNDS);
    assert_terminates::<isize>(&integral_seeds!(signed isize), MAX_ROUNDS);
    assert_terminates::<usize>(&integral_seeds!(unsigned usize), MAX_ROUNDS);
    assert_terminates::<i32>(&[5555, -5555], MAX_ROUNDS);
}

#[test]
fn test_real_shrinking_terminates() {
    // Halving the largest finite f64 down to below 2 takes about 1024 rounds.
    let rounds = 2 * MAX_ROUNDS + 48;
    assert_terminates::<f64>(
        &[
            0.0,
            -0.0,
            1.0,
            -1.0,
            3.5,
            -5555.25,
            f64::MIN,
            f64::MAX,
            f64::MIN_POSITIVE,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NAN,
        ],
        rounds,
    );
    assert_terminates::<f32>(
        &[0.0, 1.0, -3.5, f32::MIN, f32::MAX, f32::INFINITY, f32::NAN],
        rounds,
    );
}

#[test]
fn test_char_and_string_shrinking_terminates() {
    let chars: Vec<char> = (0x20u8..=0x7f).map(char::from).chain(['\0', 'é', '\u{10FFFF}']).collect();
    assert_terminates(&chars, MAX_ROUNDS);
    assert_terminates(&["Hello, World!".to_string(), String::new()], MAX_ROUNDS);
    assert_terminates(&[true, false], MAX_ROUNDS);
}

#[test]
fn test_composite_shrinking_terminates() {
    assert_terminates(&[vec![i32::MAX, i32::MIN, 0, 5555, -3], Vec::new()], MAX_ROUNDS);
    assert_terminates(&[(u64::MAX, 'Z', -1.5f64)], 2 * MAX_ROUNDS);
    assert_terminates(&[vec![(true, -100i16), (false, 7)]], MAX_ROUNDS);
}

#[test]
fn test_generated_trees_terminate() {
    let mut rng = create_seeded_rng(31);
    let lists = list_of(arbitrary::<i16>());
    let pairs = tuple_of((arbitrary::<u8>(), list_of_non_empty(arbitrary::<char>())));

    for size in [0, 5, 20] {
        let list = lists.generate(&mut rng, size).unwrap();
        worst_branch_rounds(list, Generated::shrinks, MAX_ROUNDS);

        let pair = pairs.generate(&mut rng, size).unwrap();
        worst_branch_rounds(pair, Generated::shrinks, MAX_ROUNDS);
    }
}

#[test]
fn test_list_candidates_remove_each_element_first() {
    let elements: Vec<Generated<u32>> = [4u32, 0, 9]
        .into_iter()
        .map(|x| Generated::unfold(x, std::rc::Rc::new(|x: &u32| u32::shrink(x))))
        .collect();
    let candidates = quickprop::generated::list(elements).shrink_values();

    assert_eq!(&candidates[..3], &[vec![0, 9], vec![4, 9], vec![4, 0]]);
    for simpler in u32::shrink(&4) {
        assert!(candidates.contains(&vec![simpler, 0, 9]));
    }
    for simpler in u32::shrink(&9) {
        assert!(candidates.contains(&vec![4, 0, simpler]));
    }
    assert_eq!(candidates.len(), 3 + u32::shrink(&4).len() + u32::shrink(&9).len());
}

#[test]
fn test_non_empty_lists_never_shrink_to_empty() {
    let mut rng = create_seeded_rng(5);
    let lists = list_of_non_empty(arbitrary::<u8>());

    for size in 0..30 {
        let list = lists.generate(&mut rng, size).unwrap();
        assert!(!list.value().is_empty());

        let mut frontier = vec![list];
        for _ in 0..3 {
            frontier = frontier
                .iter()
                .flat_map(Generated::shrinks)
                .take(200)
                .collect();
            assert!(frontier.iter().all(|candidate| !candidate.value().is_empty()));
        }
    }
}

#[test]
fn test_shrink_candidates_are_simpler() {
    for value in [-40i32, 17, i32::MIN] {
        for candidate in value.shrink() {
            assert!(candidate.unsigned_abs() <= value.unsigned_abs(), "{value} -> {candidate}");
        }
    }
    for c in ['Z', 'q', '~'] {
        assert!(c.shrink().iter().all(|simpler| *simpler != c));
    }
    assert_eq!('A'.shrink(), vec!['a', '1', '2', '3', ' ', '\n', '\0']);
    assert_eq!('a'.shrink(), vec!['1', '2', '3', ' ', '\n', '\0']);
    assert!('\0'.shrink().is_empty());
    // Letters rank case-insensitively, lowercase first, not by code point.
    assert_eq!(
        'Q'.shrink(),
        vec!['a', 'b', 'c', 'A', 'B', 'C', '1', '2', '3', ' ', '\n', '\0', 'q']
    );
}
