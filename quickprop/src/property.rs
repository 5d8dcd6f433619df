//! The contract between a property and the driver.

use std::fmt;

use rand::RngCore;

use crate::generated::Generated;
use crate::generator::GenResult;

/// A testable property over inputs of type `Input`.
///
/// Most properties are built with [`crate::property()`] or
/// [`crate::property_with()`]; implementing the trait directly gives full
/// control over generation and shrinking.
pub trait Property {
    /// The generated input, usually a tuple with one entry per argument.
    type Input: Clone + fmt::Debug + 'static;

    fn generate_input(&self, rng: &mut dyn RngCore, size: usize) -> GenResult<Self::Input>;

    /// Shrink candidates for a failing input, simplest first.
    fn shrink_input(&self, input: &Generated<Self::Input>) -> Vec<Generated<Self::Input>> {
        input.shrinks()
    }

    /// Whether the property holds for `input`.
    fn check_input(&self, input: &Self::Input) -> bool;

    /// Whether `input` is a degenerate case, counted in the report.
    fn trivial_input(&self, _input: &Self::Input) -> bool {
        false
    }

    /// A label grouping `input` in the report. Empty labels are not shown.
    fn classify_input(&self, _input: &Self::Input) -> String {
        String::new()
    }

    /// `false` for properties that are expected to fail.
    fn expect(&self) -> bool {
        true
    }

    fn name(&self) -> String {
        "no-name".to_string()
    }

    /// One rendered line per argument of `input`.
    fn describe_input(&self, input: &Self::Input) -> Vec<String> {
        vec![format!("{input:?}")]
    }
}

/// Inputs made of separately printed arguments.
pub trait PropertyInput: Clone + fmt::Debug + 'static {
    fn describe(&self) -> Vec<String>;
}

macro_rules! impl_property_input {
    ($($T:ident $idx:tt),+) => {
        impl<$($T: Clone + fmt::Debug + 'static),+> PropertyInput for ($($T,)+) {
            fn describe(&self) -> Vec<String> {
                vec![$(format!("{:?}", self.$idx)),+]
            }
        }
    };
}

impl_property_input!(A 0);
impl_property_input!(A 0, B 1);
impl_property_input!(A 0, B 1, C 2);
impl_property_input!(A 0, B 1, C 2, D 3);
impl_property_input!(A 0, B 1, C 2, D 3, E 4);
