//! Size Estimator Module
//!
//! Approximates how many bytes a value occupies so the cache can enforce a
//! byte budget. Values opt in by implementing [`SizeEstimable`]; estimators
//! for the common std scalars, strings, sequences, maps and smart pointers
//! live in `impls`, and user structs can derive one field-by-field with
//! [`impl_size_estimable!`](crate::impl_size_estimable).
//!
//! The estimate ignores allocator padding, spare capacity and sharing, so
//! cache capacity accounting is approximate by construction.

mod impls;

use crate::error::{CacheError, Result};

// == Public Constants ==
/// Maximum nesting depth walked before estimation gives up.
pub const MAX_DEPTH: usize = 1000;

// == Placement ==
/// Whether a value's own width still has to be counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Top level, or owned through a pointer or a collection buffer
    Standalone,
    /// Stored inline in a parent whose width already covers it
    Embedded,
}

// == Size Estimable ==
/// Capability for values that can report an estimate of their memory footprint.
///
/// An estimate is split into the inline width of the value and the bytes it
/// owns elsewhere. Implementors only provide [`heap_size`](Self::heap_size) and
/// must route every nested value through [`measure`] so the depth guard holds.
pub trait SizeEstimable {
    /// Fixed-width numeric types, for which collections skip per-element walks.
    const SCALAR: bool = false;

    /// Width of the value itself.
    fn inline_size(&self) -> u64 {
        std::mem::size_of_val(self) as u64
    }

    /// Bytes owned by the value beyond its inline width.
    fn heap_size(&self, depth: usize) -> Result<u64>;
}

// == Measure ==
/// Estimates a nested value one level below `depth`.
///
/// Fails with [`CacheError::DepthExceeded`] once nesting passes [`MAX_DEPTH`],
/// which is how reference cycles surface.
pub fn measure<T>(value: &T, placement: Placement, depth: usize) -> Result<u64>
where
    T: SizeEstimable + ?Sized,
{
    let depth = depth + 1;
    if depth > MAX_DEPTH {
        return Err(CacheError::DepthExceeded(MAX_DEPTH));
    }

    let header = match placement {
        Placement::Standalone => value.inline_size(),
        Placement::Embedded => 0,
    };
    Ok(header + value.heap_size(depth)?)
}

/// Estimates the footprint of a single value.
pub fn estimate_size<T>(value: &T) -> Result<u64>
where
    T: SizeEstimable + ?Sized,
{
    measure(value, Placement::Standalone, 0)
}

/// Estimates the combined footprint of zero or more values.
pub fn estimate_total<'a, T, I>(values: I) -> Result<u64>
where
    T: SizeEstimable + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut total = 0;
    for value in values {
        total += estimate_size(value)?;
    }
    Ok(total)
}

// == Struct Estimators ==
/// Implements [`SizeEstimable`] for a struct by summing its fields.
///
/// The struct's own width already covers each field inline, so fields only
/// contribute the bytes they own.
///
/// ```
/// use access_cache::{estimate_size, impl_size_estimable};
///
/// struct Person {
///     name: String,
///     age: i64,
/// }
///
/// impl_size_estimable!(Person { name, age });
///
/// let person = Person { name: "test".to_string(), age: 6 };
/// let size = estimate_size(&person).unwrap();
/// assert_eq!(size, std::mem::size_of::<Person>() as u64 + 4);
/// ```
#[macro_export]
macro_rules! impl_size_estimable {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::size::SizeEstimable for $ty {
            #[allow(unused_mut, unused_variables)]
            fn heap_size(&self, depth: usize) -> $crate::error::Result<u64> {
                let mut total = 0u64;
                $(
                    total += $crate::size::measure(
                        &self.$field,
                        $crate::size::Placement::Embedded,
                        depth,
                    )?;
                )*
                Ok(total)
            }
        }
    };
}
