//! Closure-based property definitions.
//!
//! This module allows you to use closures directly as properties without
//! implementing the `Property` trait manually. Check closures take one
//! reference per argument:
//!
//! ```rust
//! use quickprop::{property, ResultType};
//!
//! let result = property("addition commutes", |a: &i32, b: &i32| {
//!     a.wrapping_add(*b) == b.wrapping_add(*a)
//! })
//! .check()
//! .unwrap();
//! assert_eq!(result.result, ResultType::Success);
//! ```

use std::io::Write;
use std::rc::Rc;

use rand::RngCore;

use crate::arbitrary::{Arbitrary, arbitrary};
use crate::combinators::TupleOf;
use crate::config::CheckConfig;
use crate::error::CheckError;
use crate::execution::{CheckResult, quick_check_output, quick_check_with};
use crate::generator::{Gen, GenResult, Generator};
use crate::property::{Property, PropertyInput};

/// Closures taking each element of the tuple `Args` by reference.
///
/// Implemented for every `Fn(&A) -> R` up to `Fn(&A, &B, &C, &D, &E) -> R`.
pub trait ArgsFn<Args, R> {
    fn call_with(&self, args: &Args) -> R;
}

macro_rules! impl_args_fn {
    ($($T:ident $idx:tt),+) => {
        impl<F, R, $($T),+> ArgsFn<($($T,)+), R> for F
        where
            F: Fn($(&$T),+) -> R,
        {
            fn call_with(&self, args: &($($T,)+)) -> R {
                self($(&args.$idx),+)
            }
        }
    };
}

impl_args_fn!(A 0);
impl_args_fn!(A 0, B 1);
impl_args_fn!(A 0, B 1, C 2);
impl_args_fn!(A 0, B 1, C 2, D 3);
impl_args_fn!(A 0, B 1, C 2, D 3, E 4);

/// A property assembled from closures
pub struct ClosureProperty<Args> {
    name: String,
    generator: Gen<Args>,
    check: Rc<dyn Fn(&Args) -> bool>,
    classify: Option<Rc<dyn Fn(&Args) -> String>>,
    trivial: Option<Rc<dyn Fn(&Args) -> bool>>,
    expect: bool,
}

impl<Args> Clone for ClosureProperty<Args> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            generator: self.generator.clone(),
            check: Rc::clone(&self.check),
            classify: self.classify.clone(),
            trivial: self.trivial.clone(),
            expect: self.expect,
        }
    }
}

impl<Args: PropertyInput> ClosureProperty<Args> {
    fn new<F>(name: String, generator: Gen<Args>, check: F) -> Self
    where
        F: ArgsFn<Args, bool> + 'static,
    {
        Self {
            name,
            generator,
            check: Rc::new(move |args: &Args| check.call_with(args)),
            classify: None,
            trivial: None,
            expect: true,
        }
    }

    /// Attach a label to every trial; the report shows how often each label
    /// occurred.
    pub fn classify<F, L>(mut self, classify: F) -> Self
    where
        F: ArgsFn<Args, L> + 'static,
        L: Into<String>,
    {
        self.classify = Some(Rc::new(move |args: &Args| classify.call_with(args).into()));
        self
    }

    /// Mark degenerate inputs; the report shows their percentage.
    pub fn trivial<F>(mut self, trivial: F) -> Self
    where
        F: ArgsFn<Args, bool> + 'static,
    {
        self.trivial = Some(Rc::new(move |args: &Args| trivial.call_with(args)));
        self
    }

    /// Declare that the property is expected to fail.
    pub fn expect_failure(mut self) -> Self {
        self.expect = false;
        self
    }

    /// Run with the default configuration, without output.
    pub fn check(&self) -> Result<CheckResult<Args>, CheckError> {
        quick_check_with(self, &CheckConfig::default())
    }

    pub fn check_with(&self, config: &CheckConfig) -> Result<CheckResult<Args>, CheckError> {
        quick_check_with(self, config)
    }

    /// Run with `config`, writing the report to `out`.
    pub fn check_output(
        &self,
        out: &mut dyn Write,
        config: &CheckConfig,
    ) -> Result<CheckResult<Args>, CheckError> {
        quick_check_output(self, out, config)
    }
}

impl<Args: PropertyInput> Property for ClosureProperty<Args> {
    type Input = Args;

    fn generate_input(&self, rng: &mut dyn RngCore, size: usize) -> GenResult<Args> {
        self.generator.generate(rng, size)
    }

    fn check_input(&self, input: &Args) -> bool {
        (self.check)(input)
    }

    fn trivial_input(&self, input: &Args) -> bool {
        self.trivial.as_ref().is_some_and(|trivial| trivial(input))
    }

    fn classify_input(&self, input: &Args) -> String {
        self.classify
            .as_ref()
            .map(|classify| classify(input))
            .unwrap_or_default()
    }

    fn expect(&self) -> bool {
        self.expect
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn describe_input(&self, input: &Args) -> Vec<String> {
        input.describe()
    }
}

/// A property whose arguments come from their [`Arbitrary`] instances.
pub fn property<Args, F>(name: impl Into<String>, check: F) -> ClosureProperty<Args>
where
    Args: Arbitrary + PropertyInput,
    F: ArgsFn<Args, bool> + 'static,
{
    ClosureProperty::new(name.into(), arbitrary::<Args>(), check)
}

/// A property with explicit generators: a single [`Gen`] or a tuple of them,
/// one per argument.
pub fn property_with<Args, G, F>(name: impl Into<String>, generators: G, check: F) -> ClosureProperty<Args>
where
    Args: PropertyInput,
    G: TupleOf<Args>,
    F: ArgsFn<Args, bool> + 'static,
{
    ClosureProperty::new(name.into(), generators.into_tuple_gen(), check)
}
