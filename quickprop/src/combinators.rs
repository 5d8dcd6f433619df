//! Combinators building new generators from existing ones.
//!
//! Every constructor returns a [`Gen`]. Shrinking follows whatever branch
//! actually produced a value, because the branch's candidates travel with
//! the [`Generated`] result.

use std::cell::Cell;
use std::rc::Rc;

use num_traits::PrimInt;
use rand::distributions::uniform::SampleUniform;
use rand::{Rng, RngCore};

use crate::error::GenError;
use crate::generated::{self, Generated, ZipGenerated};
use crate::generator::{ConstantGenerator, Gen, GenResult, Generator};

/// Always produce `value`; nothing to shrink.
pub fn just<T: Clone + 'static>(value: T) -> Gen<T> {
    Gen::new(ConstantGenerator::new(value))
}

#[derive(Clone)]
struct ChooseGenerator<T> {
    min: T,
    max: T,
}

impl<T> Generator<T> for ChooseGenerator<T>
where
    T: PrimInt + SampleUniform + 'static,
{
    fn generate(&self, rng: &mut dyn RngCore, _size: usize) -> GenResult<T> {
        let value = rng.gen_range(self.min..=self.max);
        let (min, max) = (self.min, self.max);
        Ok(Generated::unfold(
            value,
            Rc::new(move |x: &T| choose_shrinks(min, max, *x)),
        ))
    }
}

/// Uniform integer in `[min, max]`.
///
/// Shrink candidates are every integer from the bound nearer to zero up to
/// (excluding) the current value.
///
/// # Panics
///
/// Panics if `min > max`.
pub fn choose<T>(min: T, max: T) -> Gen<T>
where
    T: PrimInt + SampleUniform + 'static,
{
    assert!(min <= max, "choose: min must not exceed max");
    Gen::new(ChooseGenerator { min, max })
}

fn choose_shrinks<T: PrimInt>(min: T, max: T, x: T) -> Vec<T> {
    let mut candidates = Vec::new();
    if min_is_nearer_zero(min, max) {
        let mut next = min;
        while next < x {
            candidates.push(next);
            next = next + T::one();
        }
    } else {
        let mut next = max;
        while next > x {
            candidates.push(next);
            next = next - T::one();
        }
    }
    candidates
}

fn min_is_nearer_zero<T: PrimInt>(min: T, max: T) -> bool {
    let zero = T::zero();
    if min >= zero {
        true
    } else if max <= zero {
        false
    } else {
        // -min overflows only for the type minimum, which is never nearer.
        match zero.checked_sub(&min) {
            Some(magnitude) => magnitude <= max,
            None => false,
        }
    }
}

#[derive(Clone)]
struct OneOfGenerator<T> {
    generators: Vec<Gen<T>>,
}

impl<T: Clone + 'static> Generator<T> for OneOfGenerator<T> {
    fn generate(&self, rng: &mut dyn RngCore, size: usize) -> GenResult<T> {
        let index = rng.gen_range(0..self.generators.len());
        self.generators[index].generate(rng, size)
    }
}

/// Pick one of `generators` uniformly.
///
/// # Panics
///
/// Panics if `generators` is empty.
pub fn one_of<T: Clone + 'static>(generators: Vec<Gen<T>>) -> Gen<T> {
    assert!(
        !generators.is_empty(),
        "one_of requires at least one generator"
    );
    Gen::new(OneOfGenerator { generators })
}

#[derive(Clone)]
struct FrequencyGenerator<T> {
    // (cumulative weight, generator), zero-weight entries removed
    table: Vec<(usize, Gen<T>)>,
    total: usize,
}

impl<T: Clone + 'static> Generator<T> for FrequencyGenerator<T> {
    fn generate(&self, rng: &mut dyn RngCore, size: usize) -> GenResult<T> {
        let draw = rng.gen_range(1..=self.total);
        let index = self
            .table
            .partition_point(|(cumulative, _)| *cumulative < draw);
        self.table[index].1.generate(rng, size)
    }
}

/// Pick a generator with probability proportional to its weight. Entries
/// with weight 0 are never picked.
///
/// # Panics
///
/// Panics if the weights sum to 0.
pub fn frequency<T: Clone + 'static>(weighted: Vec<(usize, Gen<T>)>) -> Gen<T> {
    let mut total = 0usize;
    let mut table = Vec::with_capacity(weighted.len());
    for (weight, generator) in weighted {
        if weight == 0 {
            continue;
        }
        total += weight;
        table.push((total, generator));
    }
    assert!(total > 0, "frequency: all generators have weight 0");
    Gen::new(FrequencyGenerator { table, total })
}

#[derive(Clone)]
struct ElementsGenerator<T> {
    choices: Rc<[T]>,
}

impl<T: Clone + 'static> Generator<T> for ElementsGenerator<T> {
    fn generate(&self, rng: &mut dyn RngCore, _size: usize) -> GenResult<T> {
        let index = rng.gen_range(0..self.choices.len());
        Ok(generated::element(Rc::clone(&self.choices), index))
    }
}

/// Pick one of `choices` uniformly, shrinking toward earlier entries.
///
/// # Panics
///
/// Panics if `choices` is empty.
pub fn elements<T: Clone + 'static>(choices: Vec<T>) -> Gen<T> {
    assert!(!choices.is_empty(), "elements requires at least one value");
    Gen::new(ElementsGenerator {
        choices: Rc::from(choices),
    })
}

struct SuchThatGenerator<T> {
    generator: Gen<T>,
    predicate: Rc<dyn Fn(&T) -> bool>,
}

impl<T> Clone for SuchThatGenerator<T> {
    fn clone(&self) -> Self {
        Self {
            generator: self.generator.clone(),
            predicate: Rc::clone(&self.predicate),
        }
    }
}

impl<T: Clone + 'static> Generator<T> for SuchThatGenerator<T> {
    fn generate(&self, rng: &mut dyn RngCore, size: usize) -> GenResult<T> {
        let generated = self.generator.generate(rng, size)?;
        if !(self.predicate)(generated.value()) {
            return Err(GenError::Unsatisfied);
        }
        Ok(generated.filter(Rc::clone(&self.predicate)))
    }
}

/// Values of `generator` satisfying `predicate`.
///
/// A rejected value is reported as [`GenError::Unsatisfied`], which the
/// driver counts as a discard. Shrink candidates that break the predicate
/// are dropped.
pub fn such_that<T, P>(generator: Gen<T>, predicate: P) -> Gen<T>
where
    T: Clone + 'static,
    P: Fn(&T) -> bool + 'static,
{
    Gen::new(SuchThatGenerator {
        generator,
        predicate: Rc::new(predicate),
    })
}

#[derive(Clone)]
struct ListOfGenerator<T> {
    element: Gen<T>,
    non_empty: bool,
}

impl<T: Clone + 'static> Generator<Vec<T>> for ListOfGenerator<T> {
    fn generate(&self, rng: &mut dyn RngCore, size: usize) -> GenResult<Vec<T>> {
        let min_len = usize::from(self.non_empty);
        let len = rng.gen_range(min_len..=size.max(min_len));
        let mut elements = Vec::with_capacity(len);
        for _ in 0..len {
            elements.push(self.element.generate(rng, size)?);
        }
        Ok(if self.non_empty {
            generated::non_empty_list(elements)
        } else {
            generated::list(elements)
        })
    }
}

/// Lists of length `0..=size`, shrinking by removing elements and by
/// simplifying them in place.
pub fn list_of<T: Clone + 'static>(element: Gen<T>) -> Gen<Vec<T>> {
    Gen::new(ListOfGenerator {
        element,
        non_empty: false,
    })
}

/// Lists of length `1..=max(1, size)` that never shrink to empty.
pub fn list_of_non_empty<T: Clone + 'static>(element: Gen<T>) -> Gen<Vec<T>> {
    Gen::new(ListOfGenerator {
        element,
        non_empty: true,
    })
}

#[derive(Clone)]
struct ArrayOfGenerator<T, const N: usize> {
    element: Gen<T>,
}

impl<T: Clone + 'static, const N: usize> Generator<[T; N]> for ArrayOfGenerator<T, N> {
    fn generate(&self, rng: &mut dyn RngCore, size: usize) -> GenResult<[T; N]> {
        let mut elements = Vec::with_capacity(N);
        for _ in 0..N {
            elements.push(self.element.generate(rng, size)?);
        }
        let elements: [Generated<T>; N] = match elements.try_into() {
            Ok(elements) => elements,
            Err(_) => unreachable!("exactly N elements were generated"),
        };
        Ok(generated::array(elements))
    }
}

/// Arrays of exactly `N` elements, shrinking each element in place.
pub fn array_of<T: Clone + 'static, const N: usize>(element: Gen<T>) -> Gen<[T; N]> {
    Gen::new(ArrayOfGenerator::<T, N> { element })
}

#[derive(Clone)]
struct VectorOfGenerator<T> {
    len: usize,
    element: Gen<T>,
}

impl<T: Clone + 'static> Generator<Vec<T>> for VectorOfGenerator<T> {
    fn generate(&self, rng: &mut dyn RngCore, size: usize) -> GenResult<Vec<T>> {
        let mut values = Vec::with_capacity(self.len);
        for _ in 0..self.len {
            values.push(self.element.generate(rng, size)?.into_value());
        }
        Ok(Generated::leaf(values))
    }
}

/// Vectors of exactly `len` elements. These are never shrunk; prefer
/// [`list_of`] unless the exact length matters more than small
/// counterexamples.
pub fn vector_of<T: Clone + 'static>(len: usize, element: Gen<T>) -> Gen<Vec<T>> {
    Gen::new(VectorOfGenerator { len, element })
}

/// Conversion of one generator or a tuple of up to five generators into a
/// generator of tuples.
pub trait TupleOf<Out> {
    fn into_tuple_gen(self) -> Gen<Out>;
}

#[derive(Clone)]
struct TupleGenerator<G> {
    parts: G,
}

macro_rules! impl_tuple_of {
    ($($T:ident $idx:tt),+) => {
        impl<$($T: Clone + 'static),+> Generator<($($T,)+)> for TupleGenerator<($(Gen<$T>,)+)> {
            fn generate(&self, rng: &mut dyn RngCore, size: usize) -> GenResult<($($T,)+)> {
                let parts = ($(self.parts.$idx.generate(rng, size)?,)+);
                Ok(parts.zip())
            }
        }

        impl<$($T: Clone + 'static),+> TupleOf<($($T,)+)> for ($(Gen<$T>,)+) {
            fn into_tuple_gen(self) -> Gen<($($T,)+)> {
                Gen::new(TupleGenerator { parts: self })
            }
        }
    };
}

impl_tuple_of!(A 0);
impl_tuple_of!(A 0, B 1);
impl_tuple_of!(A 0, B 1, C 2);
impl_tuple_of!(A 0, B 1, C 2, D 3);
impl_tuple_of!(A 0, B 1, C 2, D 3, E 4);

impl<A: Clone + 'static> TupleOf<(A,)> for Gen<A> {
    fn into_tuple_gen(self) -> Gen<(A,)> {
        (self,).into_tuple_gen()
    }
}

/// Generate each component independently. A shrink candidate simplifies
/// exactly one component.
pub fn tuple_of<Out, G: TupleOf<Out>>(generators: G) -> Gen<Out> {
    generators.into_tuple_gen()
}

struct SizedGenerator<T> {
    resolve: Rc<dyn Fn(usize) -> Gen<T>>,
}

impl<T> Clone for SizedGenerator<T> {
    fn clone(&self) -> Self {
        Self {
            resolve: Rc::clone(&self.resolve),
        }
    }
}

impl<T: Clone + 'static> Generator<T> for SizedGenerator<T> {
    fn generate(&self, rng: &mut dyn RngCore, size: usize) -> GenResult<T> {
        (self.resolve)(size).generate(rng, size)
    }
}

/// Build the generator from the current size on every call.
pub fn sized<T, F>(resolve: F) -> Gen<T>
where
    T: Clone + 'static,
    F: Fn(usize) -> Gen<T> + 'static,
{
    Gen::new(SizedGenerator {
        resolve: Rc::new(resolve),
    })
}

#[derive(Clone)]
struct ResizeGenerator<T> {
    size: usize,
    generator: Gen<T>,
}

impl<T: Clone + 'static> Generator<T> for ResizeGenerator<T> {
    fn generate(&self, rng: &mut dyn RngCore, _size: usize) -> GenResult<T> {
        self.generator.generate(rng, self.size)
    }
}

/// Run `generator` at a fixed size, ignoring the driver's size.
pub fn resize<T: Clone + 'static>(size: usize, generator: Gen<T>) -> Gen<T> {
    Gen::new(ResizeGenerator { size, generator })
}

struct ConvertGenerator<U, T> {
    generator: Gen<U>,
    convert: Rc<dyn Fn(&U) -> T>,
}

impl<U, T> Clone for ConvertGenerator<U, T> {
    fn clone(&self) -> Self {
        Self {
            generator: self.generator.clone(),
            convert: Rc::clone(&self.convert),
        }
    }
}

impl<U, T> Generator<T> for ConvertGenerator<U, T>
where
    U: Clone + 'static,
    T: Clone + 'static,
{
    fn generate(&self, rng: &mut dyn RngCore, size: usize) -> GenResult<T> {
        let generated = self.generator.generate(rng, size)?;
        Ok(generated.map(Rc::clone(&self.convert)))
    }
}

/// Map generated values through `convert`. Shrinking happens on the source
/// values, so `T` needs no equality.
pub fn convert<T, U, F>(convert: F, generator: Gen<U>) -> Gen<T>
where
    T: Clone + 'static,
    U: Clone + 'static,
    F: Fn(&U) -> T + 'static,
{
    Gen::new(ConvertGenerator {
        generator,
        convert: Rc::new(convert),
    })
}

/// Combine two generators through `combine`, shrinking one source at a time.
pub fn combine<T, U1, U2, F>(combine: F, first: Gen<U1>, second: Gen<U2>) -> Gen<T>
where
    T: Clone + 'static,
    U1: Clone + 'static,
    U2: Clone + 'static,
    F: Fn(&U1, &U2) -> T + 'static,
{
    convert(
        move |(a, b): &(U1, U2)| combine(a, b),
        tuple_of((first, second)),
    )
}

#[derive(Clone)]
struct NoShrinkGenerator<T> {
    generator: Gen<T>,
}

impl<T: Clone + 'static> Generator<T> for NoShrinkGenerator<T> {
    fn generate(&self, rng: &mut dyn RngCore, size: usize) -> GenResult<T> {
        Ok(self.generator.generate(rng, size)?.without_shrinks())
    }
}

/// Same values as `generator`, without shrink candidates.
pub fn no_shrink<T: Clone + 'static>(generator: Gen<T>) -> Gen<T> {
    Gen::new(NoShrinkGenerator { generator })
}

#[derive(Clone)]
struct ChainGenerator<T> {
    generators: Vec<Gen<T>>,
}

impl<T: Clone + 'static> Generator<T> for ChainGenerator<T> {
    fn generate(&self, rng: &mut dyn RngCore, size: usize) -> GenResult<T> {
        for (index, generator) in self.generators.iter().enumerate() {
            match generator.generate(rng, size) {
                Ok(generated) => return Ok(generated),
                Err(error) => log::trace!("chain: generator {index} failed: {error}"),
            }
        }
        Err(GenError::Exhausted("chain"))
    }
}

/// The first of `generators` that succeeds.
///
/// # Panics
///
/// Panics if `generators` is empty.
pub fn chain<T: Clone + 'static>(generators: Vec<Gen<T>>) -> Gen<T> {
    assert!(!generators.is_empty(), "chain requires at least one generator");
    Gen::new(ChainGenerator { generators })
}

#[derive(Clone)]
struct FixedGenerator<T> {
    values: Rc<[T]>,
    next: Cell<usize>,
}

impl<T: Clone + 'static> Generator<T> for FixedGenerator<T> {
    fn generate(&self, _rng: &mut dyn RngCore, _size: usize) -> GenResult<T> {
        let index = self.next.get();
        match self.values.get(index) {
            Some(value) => {
                self.next.set(index + 1);
                Ok(Generated::leaf(value.clone()))
            }
            None => Err(GenError::Exhausted("fixed")),
        }
    }
}

/// Replay `values` once each, in order, then report exhaustion.
pub fn fixed<T: Clone + 'static>(values: Vec<T>) -> Gen<T> {
    Gen::new(FixedGenerator {
        values: Rc::from(values),
        next: Cell::new(0),
    })
}
