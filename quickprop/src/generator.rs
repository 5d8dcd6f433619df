//! Core generator infrastructure: the `Generator` trait, the type-erased
//! `Gen<T>` handle and sampling helpers.

use std::rc::Rc;

use rand::RngCore;

use crate::combinators;
use crate::error::GenError;
use crate::generated::Generated;
use crate::rng::create_seeded_rng;

/// Outcome of a single generate call.
pub type GenResult<T> = Result<Generated<T>, GenError>;

/// Core generator trait for creating random test data
///
/// `generate` must be deterministic given the RNG state and `size`. The
/// returned [`Generated`] carries the shrink candidates of the value, so a
/// generator never needs to remember what it produced.
pub trait Generator<T> {
    fn generate(&self, rng: &mut dyn RngCore, size: usize) -> GenResult<T>;
}

/// Internal trait for type-erased generators
trait ErasedGenerator<T> {
    fn generate_boxed(&self, rng: &mut dyn RngCore, size: usize) -> GenResult<T>;
    fn clone_boxed(&self) -> Box<dyn ErasedGenerator<T>>;
}

impl<T, G> ErasedGenerator<T> for G
where
    G: Generator<T> + Clone + 'static,
{
    fn generate_boxed(&self, rng: &mut dyn RngCore, size: usize) -> GenResult<T> {
        self.generate(rng, size)
    }

    fn clone_boxed(&self) -> Box<dyn ErasedGenerator<T>> {
        Box::new(self.clone())
    }
}

/// A type-erased generator with value semantics.
///
/// Cloning a `Gen` clones the generator it wraps, so copies never share
/// mutable state.
pub struct Gen<T> {
    inner: Box<dyn ErasedGenerator<T>>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_boxed(),
        }
    }
}

impl<T> std::fmt::Debug for Gen<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Gen<{}>", std::any::type_name::<T>())
    }
}

impl<T> Generator<T> for Gen<T> {
    fn generate(&self, rng: &mut dyn RngCore, size: usize) -> GenResult<T> {
        self.inner.generate_boxed(rng, size)
    }
}

impl<T: Clone + 'static> Gen<T> {
    /// Wrap any cloneable generator.
    pub fn new<G: Generator<T> + Clone + 'static>(generator: G) -> Self {
        Self {
            inner: Box::new(generator),
        }
    }

    /// A generator from a pair of plain functions. `shrink` is applied
    /// recursively to build the candidate tree.
    pub fn from_fns<G, S>(generate: G, shrink: S) -> Self
    where
        G: Fn(&mut dyn RngCore, usize) -> T + 'static,
        S: Fn(&T) -> Vec<T> + 'static,
    {
        Self::new(StatelessGenerator {
            generate: Rc::new(generate),
            shrink: Rc::new(shrink),
        })
    }

    pub fn map<U, F>(self, f: F) -> Gen<U>
    where
        U: Clone + 'static,
        F: Fn(&T) -> U + 'static,
    {
        combinators::convert(f, self)
    }

    pub fn such_that<P>(self, predicate: P) -> Gen<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        combinators::such_that(self, predicate)
    }

    pub fn no_shrink(self) -> Gen<T> {
        combinators::no_shrink(self)
    }

    pub fn resize(self, size: usize) -> Gen<T> {
        combinators::resize(size, self)
    }
}

/// Generator built from a generate function and a value-level shrinker.
struct StatelessGenerator<T> {
    generate: Rc<dyn Fn(&mut dyn RngCore, usize) -> T>,
    shrink: Rc<dyn Fn(&T) -> Vec<T>>,
}

impl<T> Clone for StatelessGenerator<T> {
    fn clone(&self) -> Self {
        Self {
            generate: Rc::clone(&self.generate),
            shrink: Rc::clone(&self.shrink),
        }
    }
}

impl<T: Clone + 'static> Generator<T> for StatelessGenerator<T> {
    fn generate(&self, rng: &mut dyn RngCore, size: usize) -> GenResult<T> {
        let value = (self.generate)(rng, size);
        Ok(Generated::unfold(value, Rc::clone(&self.shrink)))
    }
}

/// A simple generator that always produces the same value
#[derive(Debug, Clone)]
pub struct ConstantGenerator<T> {
    value: T,
}

impl<T: Clone> ConstantGenerator<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone + 'static> Generator<T> for ConstantGenerator<T> {
    fn generate(&self, _rng: &mut dyn RngCore, _size: usize) -> GenResult<T> {
        Ok(Generated::leaf(self.value.clone()))
    }
}

/// Draw up to `num` values, the i-th at size i.
///
/// Stops early once the generator is exhausted; values rejected by a filter
/// are skipped.
pub fn sample<T, G>(generator: &G, num: usize, seed: u32) -> Vec<T>
where
    G: Generator<T> + ?Sized,
{
    sample_generated(generator, num, seed)
        .into_iter()
        .map(Generated::into_value)
        .collect()
}

/// Like [`sample`], pairing each value with its immediate shrink candidates.
pub fn sample_shrinks<T, G>(generator: &G, num: usize, seed: u32) -> Vec<(T, Vec<T>)>
where
    T: Clone + 'static,
    G: Generator<T> + ?Sized,
{
    sample_generated(generator, num, seed)
        .into_iter()
        .map(|generated| {
            let shrinks = generated.shrink_values();
            (generated.into_value(), shrinks)
        })
        .collect()
}

fn sample_generated<T, G>(generator: &G, num: usize, seed: u32) -> Vec<Generated<T>>
where
    G: Generator<T> + ?Sized,
{
    let mut rng = create_seeded_rng(seed);
    let mut samples = Vec::with_capacity(num);
    for size in 0..num {
        match generator.generate(&mut rng, size) {
            Ok(generated) => samples.push(generated),
            Err(GenError::Unsatisfied) => continue,
            Err(GenError::Exhausted(_)) => break,
        }
    }
    samples
}
