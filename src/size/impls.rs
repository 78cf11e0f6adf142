//! Built-in estimators for std types.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::mem::size_of;
use std::rc::Rc;
use std::sync::Arc;

use super::{measure, Placement, SizeEstimable};
use crate::error::{CacheError, Result};

// == Helpers ==
/// Sums values that live in a heap buffer, headers included.
fn sum_standalone<'a, T, I>(items: I, depth: usize) -> Result<u64>
where
    T: SizeEstimable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut total = 0;
    for item in items {
        total += measure(item, Placement::Standalone, depth)?;
    }
    Ok(total)
}

/// Sums values whose width is already counted by their container.
fn sum_embedded<'a, T, I>(items: I, depth: usize) -> Result<u64>
where
    T: SizeEstimable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut total = 0;
    for item in items {
        total += measure(item, Placement::Embedded, depth)?;
    }
    Ok(total)
}

fn sequence_heap<'a, T, I>(items: I, len: usize, depth: usize) -> Result<u64>
where
    T: SizeEstimable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    if T::SCALAR {
        return Ok((len * size_of::<T>()) as u64);
    }
    sum_standalone(items, depth)
}

fn map_heap<'a, K, V, I>(pairs: I, len: usize, depth: usize) -> Result<u64>
where
    K: SizeEstimable + 'a,
    V: SizeEstimable + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    if K::SCALAR && V::SCALAR {
        return Ok(((size_of::<K>() + size_of::<V>()) * len) as u64);
    }
    let mut total = 0;
    for (key, value) in pairs {
        total += measure(key, Placement::Standalone, depth)?;
        total += measure(value, Placement::Standalone, depth)?;
    }
    Ok(total)
}

// == Scalars ==
macro_rules! scalar_estimators {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SizeEstimable for $ty {
                const SCALAR: bool = true;

                fn heap_size(&self, _depth: usize) -> Result<u64> {
                    Ok(0)
                }
            }
        )*
    };
}

scalar_estimators!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char, (),
);

// == Text ==
impl SizeEstimable for String {
    fn heap_size(&self, _depth: usize) -> Result<u64> {
        Ok(self.len() as u64)
    }
}

// The inline width of `str` is its byte length.
impl SizeEstimable for str {
    fn heap_size(&self, _depth: usize) -> Result<u64> {
        Ok(0)
    }
}

// == Sequences ==
impl<T: SizeEstimable> SizeEstimable for [T] {
    fn heap_size(&self, depth: usize) -> Result<u64> {
        if T::SCALAR {
            return Ok(0);
        }
        sum_embedded(self, depth)
    }
}

impl<T: SizeEstimable, const N: usize> SizeEstimable for [T; N] {
    fn heap_size(&self, depth: usize) -> Result<u64> {
        self.as_slice().heap_size(depth)
    }
}

impl<T: SizeEstimable> SizeEstimable for Vec<T> {
    fn heap_size(&self, depth: usize) -> Result<u64> {
        sequence_heap(self, self.len(), depth)
    }
}

impl<T: SizeEstimable> SizeEstimable for VecDeque<T> {
    fn heap_size(&self, depth: usize) -> Result<u64> {
        sequence_heap(self, self.len(), depth)
    }
}

// == Associative Containers ==
impl<K: SizeEstimable, V: SizeEstimable, S> SizeEstimable for HashMap<K, V, S> {
    fn heap_size(&self, depth: usize) -> Result<u64> {
        map_heap(self, self.len(), depth)
    }
}

impl<K: SizeEstimable, V: SizeEstimable> SizeEstimable for BTreeMap<K, V> {
    fn heap_size(&self, depth: usize) -> Result<u64> {
        map_heap(self, self.len(), depth)
    }
}

impl<T: SizeEstimable, S> SizeEstimable for HashSet<T, S> {
    fn heap_size(&self, depth: usize) -> Result<u64> {
        sequence_heap(self, self.len(), depth)
    }
}

impl<T: SizeEstimable> SizeEstimable for BTreeSet<T> {
    fn heap_size(&self, depth: usize) -> Result<u64> {
        sequence_heap(self, self.len(), depth)
    }
}

// == References ==
impl<T: SizeEstimable> SizeEstimable for Option<T> {
    fn heap_size(&self, depth: usize) -> Result<u64> {
        match self {
            Some(value) => measure(value, Placement::Embedded, depth),
            None => Ok(0),
        }
    }
}

impl<T: SizeEstimable + ?Sized> SizeEstimable for Box<T> {
    fn heap_size(&self, depth: usize) -> Result<u64> {
        measure(&**self, Placement::Standalone, depth)
    }
}

impl<T: SizeEstimable + ?Sized> SizeEstimable for Rc<T> {
    fn heap_size(&self, depth: usize) -> Result<u64> {
        measure(&**self, Placement::Standalone, depth)
    }
}

impl<T: SizeEstimable + ?Sized> SizeEstimable for Arc<T> {
    fn heap_size(&self, depth: usize) -> Result<u64> {
        measure(&**self, Placement::Standalone, depth)
    }
}

impl<T: SizeEstimable> SizeEstimable for RefCell<T> {
    fn heap_size(&self, depth: usize) -> Result<u64> {
        let inner = self
            .try_borrow()
            .map_err(|_| CacheError::Unmeasurable("value is mutably borrowed".to_string()))?;
        measure(&*inner, Placement::Embedded, depth)
    }
}

// == Tuples ==
macro_rules! tuple_estimators {
    ($(($($name:ident : $idx:tt),+)),* $(,)?) => {
        $(
            impl<$($name: SizeEstimable),+> SizeEstimable for ($($name,)+) {
                fn heap_size(&self, depth: usize) -> Result<u64> {
                    let mut total = 0;
                    $( total += measure(&self.$idx, Placement::Embedded, depth)?; )+
                    Ok(total)
                }
            }
        )*
    };
}

tuple_estimators!(
    (A: 0),
    (A: 0, B: 1),
    (A: 0, B: 1, C: 2),
    (A: 0, B: 1, C: 2, D: 3),
);
