//! Ergonomic APIs for property-based testing
//!
//! Closure-based property definitions with a fluent builder for labels,
//! trivial cases and expected failures.
//!
//! # Examples
//!
//! ```rust
//! use quickprop::ergonomic::property;
//!
//! let result = property("length of concatenation", |a: &Vec<u8>, b: &Vec<u8>| {
//!     let mut joined = a.clone();
//!     joined.extend(b);
//!     joined.len() == a.len() + b.len()
//! })
//! .classify(|a: &Vec<u8>, _: &Vec<u8>| if a.is_empty() { "empty prefix" } else { "" })
//! .check()
//! .unwrap();
//! assert!(result.is_success());
//! ```

pub mod closure_property;

pub use closure_property::{ArgsFn, ClosureProperty, property, property_with};
