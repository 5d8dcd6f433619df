//! Arbitrary trait: the default generator and shrinker of a type.

use std::fmt;

use rand::RngCore;

use crate::generator::Gen;

/// Types with a default way to generate and shrink values.
///
/// A property that does not name a generator for its arguments uses the
/// `Arbitrary` instance of each argument type. Asking for the instance of a
/// type that has none is a compile error.
pub trait Arbitrary: Clone + fmt::Debug + 'static {
    /// Draw a value whose magnitude or length scales with `size`.
    fn arbitrary(rng: &mut dyn RngCore, size: usize) -> Self;

    /// Strictly simpler candidates, simplest first.
    ///
    /// Repeatedly shrinking must reach a value with no candidates after
    /// finitely many steps.
    fn shrink(&self) -> Vec<Self> {
        Vec::new()
    }
}

/// The default generator for `T`.
pub fn arbitrary<T: Arbitrary>() -> Gen<T> {
    Gen::from_fns(T::arbitrary, |value: &T| value.shrink())
}
