//! Arbitrary instances for primitive types, strings, vectors and tuples,
//! plus the shrink functions they are built from.

use num_traits::{Float, PrimInt};
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Poisson};

use crate::arbitrary::Arbitrary;

/// Characters offered as simpler replacements when shrinking a `char`.
pub const SIMPLE_CHARS: [char; 12] = ['a', 'b', 'c', 'A', 'B', 'C', '1', '2', '3', ' ', '\n', '\0'];

/// Poisson-distributed magnitude with mean `size`, or 1 at size 0.
fn magnitude(rng: &mut dyn RngCore, size: usize) -> u64 {
    let mean = size.max(1) as f64;
    match Poisson::new(mean) {
        Ok(poisson) => {
            let draw: f64 = poisson.sample(rng);
            draw as u64
        }
        Err(_) => size as u64,
    }
}

/// Shrink candidates of an integer: its negation when negative (the type's
/// maximum for the minimum), then `x - x`, `x - x/2`, `x - x/4`, ... down
/// to `x - 1`.
pub fn shrink_integral<T: PrimInt>(x: T) -> Vec<T> {
    let zero = T::zero();
    let two = T::one() + T::one();

    let mut candidates = Vec::new();
    if x < zero {
        candidates.push(zero.checked_sub(&x).unwrap_or_else(T::max_value));
    }
    let mut step = x;
    while step != zero {
        candidates.push(x - step);
        step = step / two;
    }
    candidates
}

/// Shrink candidates of a float: its negation when negative, zero, and half
/// of it when finite with magnitude at least 2. Zero is minimal and NaN
/// shrinks only to zero.
pub fn shrink_real<T: Float>(x: T) -> Vec<T> {
    let zero = T::zero();
    let two = T::one() + T::one();
    if x == zero {
        return Vec::new();
    }
    if x.is_nan() {
        return vec![zero];
    }

    let mut candidates = Vec::new();
    if x < zero {
        candidates.push(-x);
    }
    candidates.push(zero);
    if x.is_finite() && x.abs() >= two {
        candidates.push(x / two);
    }
    candidates
}

// Orders by lowercase form, then uppercase after lowercase. This is not code
// point order: 'Q' ranks above 'a' and 'a' ranks below 'A'.
fn char_rank(c: char) -> (char, bool) {
    (c.to_ascii_lowercase(), c.is_ascii_uppercase())
}

/// Shrink candidates of a character: the members of [`SIMPLE_CHARS`] that
/// rank below it, plus its lowercase form when it is an uppercase letter.
///
/// Ranking compares ASCII letters case-insensitively with lowercase first,
/// so it deviates from code point order: `'Q'` is offered `'a'`, `'b'` and
/// `'c'`, while `'a'` is not offered `'A'`, `'B'` or `'C'`. Every candidate
/// ranks strictly below its input, so shrinking cannot cycle between cases.
pub fn shrink_char(c: char) -> Vec<char> {
    let rank = char_rank(c);
    let mut candidates: Vec<char> = SIMPLE_CHARS
        .iter()
        .copied()
        .filter(|simple| char_rank(*simple) < rank)
        .collect();
    if c.is_ascii_uppercase() {
        let lower = c.to_ascii_lowercase();
        if !candidates.contains(&lower) {
            candidates.push(lower);
        }
    }
    candidates
}

/// Every way of removing a single element.
fn removals<T: Clone>(values: &[T]) -> Vec<Vec<T>> {
    (0..values.len())
        .map(|index| {
            let mut shorter = values.to_vec();
            shorter.remove(index);
            shorter
        })
        .collect()
}

impl Arbitrary for bool {
    fn arbitrary(rng: &mut dyn RngCore, _size: usize) -> Self {
        rng.r#gen()
    }

    fn shrink(&self) -> Vec<Self> {
        if *self { vec![false] } else { Vec::new() }
    }
}

macro_rules! impl_arbitrary_signed {
    ($($t:ty),*) => {
        $(
            impl Arbitrary for $t {
                fn arbitrary(rng: &mut dyn RngCore, size: usize) -> Self {
                    let value = <$t>::try_from(magnitude(rng, size)).unwrap_or(<$t>::MAX);
                    if rng.r#gen::<bool>() { -value } else { value }
                }

                fn shrink(&self) -> Vec<Self> {
                    shrink_integral(*self)
                }
            }
        )*
    };
}

macro_rules! impl_arbitrary_unsigned {
    ($($t:ty),*) => {
        $(
            impl Arbitrary for $t {
                fn arbitrary(rng: &mut dyn RngCore, size: usize) -> Self {
                    <$t>::try_from(magnitude(rng, size)).unwrap_or(<$t>::MAX)
                }

                fn shrink(&self) -> Vec<Self> {
                    shrink_integral(*self)
                }
            }
        )*
    };
}

impl_arbitrary_signed!(i8, i16, i32, i64, isize);
impl_arbitrary_unsigned!(u8, u16, u32, u64, usize);

macro_rules! impl_arbitrary_float {
    ($($t:ty),*) => {
        $(
            impl Arbitrary for $t {
                fn arbitrary(rng: &mut dyn RngCore, size: usize) -> Self {
                    let bound = size as $t + 1.0;
                    rng.gen_range(-bound..=bound)
                }

                fn shrink(&self) -> Vec<Self> {
                    shrink_real(*self)
                }
            }
        )*
    };
}

impl_arbitrary_float!(f32, f64);

impl Arbitrary for char {
    fn arbitrary(rng: &mut dyn RngCore, _size: usize) -> Self {
        char::from(rng.gen_range(0x20u8..=0x7f))
    }

    fn shrink(&self) -> Vec<Self> {
        shrink_char(*self)
    }
}

impl Arbitrary for String {
    fn arbitrary(rng: &mut dyn RngCore, size: usize) -> Self {
        let len = rng.gen_range(0..=size);
        (0..len).map(|_| char::arbitrary(rng, size)).collect()
    }

    /// Removes one character at a time; characters themselves are kept.
    fn shrink(&self) -> Vec<Self> {
        let chars: Vec<char> = self.chars().collect();
        removals(&chars)
            .into_iter()
            .map(|shorter| shorter.into_iter().collect())
            .collect()
    }
}

impl<T: Arbitrary> Arbitrary for Vec<T> {
    fn arbitrary(rng: &mut dyn RngCore, size: usize) -> Self {
        let len = rng.gen_range(0..=size);
        (0..len).map(|_| T::arbitrary(rng, size)).collect()
    }

    fn shrink(&self) -> Vec<Self> {
        let mut candidates = removals(self);
        for (index, element) in self.iter().enumerate() {
            for simpler in element.shrink() {
                let mut replaced = self.clone();
                replaced[index] = simpler;
                candidates.push(replaced);
            }
        }
        candidates
    }
}

macro_rules! impl_arbitrary_tuple {
    ($($T:ident $idx:tt),+) => {
        impl<$($T: Arbitrary),+> Arbitrary for ($($T,)+) {
            fn arbitrary(rng: &mut dyn RngCore, size: usize) -> Self {
                ($($T::arbitrary(rng, size),)+)
            }

            fn shrink(&self) -> Vec<Self> {
                let mut candidates = Vec::new();
                $(
                    for simpler in self.$idx.shrink() {
                        let mut next = self.clone();
                        next.$idx = simpler;
                        candidates.push(next);
                    }
                )+
                candidates
            }
        }
    };
}

impl_arbitrary_tuple!(A 0);
impl_arbitrary_tuple!(A 0, B 1);
impl_arbitrary_tuple!(A 0, B 1, C 2);
impl_arbitrary_tuple!(A 0, B 1, C 2, D 3);
impl_arbitrary_tuple!(A 0, B 1, C 2, D 3, E 4);
