//! # QuickProp - QuickCheck-style property testing for Rust
//!
//! QuickProp generates random inputs of growing size for a property, runs the
//! property against them and, when a trial fails, shrinks the failing input to
//! a simple counterexample. Runs are reproducible from a 32-bit seed.
//!
//! ## Quick Start
//!
//! ```rust
//! use quickprop::{CheckConfig, ResultType, choose, list_of, property, property_with};
//!
//! let reverse_twice = property("reverse twice", |xs: &Vec<i32>| {
//!     let mut ys = xs.clone();
//!     ys.reverse();
//!     ys.reverse();
//!     ys == *xs
//! });
//! assert!(reverse_twice.check().unwrap().is_success());
//!
//! // A false property is shrunk to a minimal counterexample.
//! let small_sums = property_with("small sums", list_of(choose(0u32, 100)), |xs: &Vec<u32>| {
//!     xs.iter().sum::<u32>() < 50
//! });
//! let result = small_sums
//!     .check_with(&CheckConfig::default().with_seed(42))
//!     .unwrap();
//! assert_eq!(result.result, ResultType::Failure);
//! let (minimal,) = result.counterexample.unwrap();
//! assert_eq!(minimal.iter().sum::<u32>(), 50);
//! ```
//!
//! Generators are plain values of type [`Gen`] and compose through the
//! functions in [`combinators`]:
//!
//! ```rust
//! use quickprop::{elements, frequency, just, sample};
//!
//! let letters = frequency(vec![(3, elements(vec!['a', 'b'])), (1, just('z'))]);
//! let values = sample(&letters, 10, 1);
//! assert_eq!(values.len(), 10);
//! assert!(values.iter().all(|c| "abz".contains(*c)));
//! ```

// Public modules
pub mod arbitrary;
pub mod combinators;
pub mod config;
pub mod ergonomic;
pub mod error;
pub mod execution;
pub mod generated;
pub mod generator;
pub mod primitives;
pub mod property;
pub mod rng;
pub mod shrink;
pub mod statistics;

// Re-export the main public API
pub use arbitrary::{Arbitrary, arbitrary};
pub use combinators::{
    TupleOf, array_of, chain, choose, combine, convert, elements, fixed, frequency, just, list_of,
    list_of_non_empty, no_shrink, one_of, resize, sized, such_that, tuple_of, vector_of,
};
pub use config::{CheckConfig, ConfigError, SEED_ENV_VAR, resolve_seed};
pub use ergonomic::{ClosureProperty, property, property_with};
pub use error::{CheckError, GenError};
pub use execution::{CheckResult, ResultType, quick_check, quick_check_output, quick_check_with};
pub use generated::Generated;
pub use generator::{ConstantGenerator, Gen, GenResult, Generator, sample, sample_shrinks};
pub use primitives::{SIMPLE_CHARS, shrink_char, shrink_integral, shrink_real};
pub use property::{Property, PropertyInput};
pub use rng::{RngEngine, create_seeded_rng};
pub use shrink::{ShrinkEngine, ShrinkResult};
pub use statistics::{LabelCollector, LabelHistogram};
