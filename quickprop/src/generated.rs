//! Generated values paired with their shrink continuations.
//!
//! A [`Generated<T>`] carries the value a generator produced and a lazily
//! evaluated function yielding its shrink candidates. Each candidate is again
//! a `Generated<T>`, so the whole shrink space forms a tree that is only
//! expanded along the path the shrinker actually walks.
//!
//! Combinators that pick a branch (`one_of`, `frequency`, `chain`, ...) do
//! not remember the branch anywhere: the continuation returned with the value
//! already closes over the chosen branch's shrinks. Shrinking a value is
//! therefore always safe, regardless of what the generator did since.

use std::fmt;
use std::rc::Rc;

type Expand<T> = Rc<dyn Fn() -> Vec<Generated<T>>>;

/// A generated value and the means to shrink it.
pub struct Generated<T> {
    value: T,
    expand: Option<Expand<T>>,
}

impl<T: Clone> Clone for Generated<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            expand: self.expand.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Generated<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generated")
            .field("value", &self.value)
            .field("shrinkable", &self.expand.is_some())
            .finish()
    }
}

impl<T> Generated<T> {
    /// A value with no shrink candidates.
    pub fn leaf(value: T) -> Self {
        Self {
            value,
            expand: None,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// Expand the next level of shrink candidates, simplest first.
    pub fn shrinks(&self) -> Vec<Generated<T>> {
        self.expand
            .as_ref()
            .map(|expand| expand())
            .unwrap_or_default()
    }

    /// Drop the shrink continuation, keeping the value.
    pub fn without_shrinks(self) -> Self {
        Self::leaf(self.value)
    }
}

impl<T: Clone + 'static> Generated<T> {
    /// A value whose candidates are computed by `expand` on demand.
    pub fn with_shrinks<F>(value: T, expand: F) -> Self
    where
        F: Fn() -> Vec<Generated<T>> + 'static,
    {
        Self {
            value,
            expand: Some(Rc::new(expand)),
        }
    }

    /// Build the shrink tree of `value` from a value-level shrink function.
    pub fn unfold(value: T, shrink: Rc<dyn Fn(&T) -> Vec<T>>) -> Self {
        let origin = value.clone();
        Self::with_shrinks(value, move || {
            shrink(&origin)
                .into_iter()
                .map(|candidate| Self::unfold(candidate, Rc::clone(&shrink)))
                .collect()
        })
    }

    /// The values of the immediate shrink candidates.
    pub fn shrink_values(&self) -> Vec<T> {
        self.shrinks()
            .into_iter()
            .map(Generated::into_value)
            .collect()
    }

    /// Apply `f` to the value and to every candidate in the tree.
    pub fn map<U: Clone + 'static>(&self, f: Rc<dyn Fn(&T) -> U>) -> Generated<U> {
        let value = f(&self.value);
        match &self.expand {
            None => Generated::leaf(value),
            Some(expand) => {
                let expand = Rc::clone(expand);
                Generated::with_shrinks(value, move || {
                    expand()
                        .iter()
                        .map(|candidate| candidate.map(Rc::clone(&f)))
                        .collect()
                })
            }
        }
    }

    /// Keep only candidates (at every depth) for which `keep` holds. The
    /// root value itself is not checked.
    pub fn filter(&self, keep: Rc<dyn Fn(&T) -> bool>) -> Self {
        match &self.expand {
            None => self.clone(),
            Some(expand) => {
                let expand = Rc::clone(expand);
                Self::with_shrinks(self.value.clone(), move || {
                    expand()
                        .into_iter()
                        .filter(|candidate| keep(candidate.value()))
                        .map(|candidate| candidate.filter(Rc::clone(&keep)))
                        .collect()
                })
            }
        }
    }
}

/// A list whose candidates first remove one element, then simplify one
/// element in place.
pub fn list<T: Clone + 'static>(elements: Vec<Generated<T>>) -> Generated<Vec<T>> {
    list_tree(elements, false)
}

/// Like [`list`], but never shrinks below one element. A single-element
/// list is not shrunk at all.
pub fn non_empty_list<T: Clone + 'static>(elements: Vec<Generated<T>>) -> Generated<Vec<T>> {
    list_tree(elements, true)
}

fn list_tree<T: Clone + 'static>(elements: Vec<Generated<T>>, non_empty: bool) -> Generated<Vec<T>> {
    let value: Vec<T> = elements.iter().map(|e| e.value.clone()).collect();
    if elements.is_empty() || (non_empty && elements.len() == 1) {
        return Generated::leaf(value);
    }

    Generated::with_shrinks(value, move || {
        let mut candidates = Vec::new();
        for index in 0..elements.len() {
            let mut shorter = elements.clone();
            shorter.remove(index);
            candidates.push(list_tree(shorter, non_empty));
        }
        for (index, element) in elements.iter().enumerate() {
            for simpler in element.shrinks() {
                let mut replaced = elements.clone();
                replaced[index] = simpler;
                candidates.push(list_tree(replaced, non_empty));
            }
        }
        candidates
    })
}

/// A fixed-length array shrunk one element at a time.
pub fn array<T: Clone + 'static, const N: usize>(elements: [Generated<T>; N]) -> Generated<[T; N]> {
    let value: [T; N] = std::array::from_fn(|i| elements[i].value.clone());
    Generated::with_shrinks(value, move || {
        let mut candidates = Vec::new();
        for (index, element) in elements.iter().enumerate() {
            for simpler in element.shrinks() {
                let mut replaced = elements.clone();
                replaced[index] = simpler;
                candidates.push(array(replaced));
            }
        }
        candidates
    })
}

/// The element at `index` of `choices`, shrinking toward earlier elements.
pub(crate) fn element<T: Clone + 'static>(choices: Rc<[T]>, index: usize) -> Generated<T> {
    let value = choices[index].clone();
    if index == 0 {
        return Generated::leaf(value);
    }
    Generated::with_shrinks(value, move || {
        (0..index)
            .map(|earlier| element(Rc::clone(&choices), earlier))
            .collect()
    })
}

/// Combine a tuple of independently generated components into one value.
///
/// Each candidate of the result shrinks exactly one component, with every
/// other component held at its current value.
pub trait ZipGenerated {
    type Output;

    fn zip(self) -> Generated<Self::Output>;
}

macro_rules! impl_zip_generated {
    ($($T:ident $idx:tt),+) => {
        impl<$($T: Clone + 'static),+> ZipGenerated for ($(Generated<$T>,)+) {
            type Output = ($($T,)+);

            fn zip(self) -> Generated<Self::Output> {
                let value = ($(self.$idx.value.clone(),)+);
                let parts = self;
                Generated::with_shrinks(value, move || {
                    let mut candidates = Vec::new();
                    $(
                        for simpler in parts.$idx.shrinks() {
                            let mut next = parts.clone();
                            next.$idx = simpler;
                            candidates.push(next.zip());
                        }
                    )+
                    candidates
                })
            }
        }
    };
}

impl_zip_generated!(A 0);
impl_zip_generated!(A 0, B 1);
impl_zip_generated!(A 0, B 1, C 2);
impl_zip_generated!(A 0, B 1, C 2, D 3);
impl_zip_generated!(A 0, B 1, C 2, D 3, E 4);
