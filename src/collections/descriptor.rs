//! Element type descriptors
//!
//! Every container carries a [`TypeDescriptor`] for its element type. The
//! capabilities a container needs (ordering, hashing, cleanup) are trait
//! bounds on `T`; the descriptor only records what the type looks like so it
//! can be reported in diagnostics and logs.

use std::fmt;
use std::hash::{BuildHasher, Hash};

/// Shape of a container's element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    element_size: usize,
    needs_drop: bool,
    type_name: &'static str,
}

impl TypeDescriptor {
    /// Describe `T`
    ///
    /// # Examples
    /// ```
    /// use wordle_stats::collections::TypeDescriptor;
    ///
    /// let desc = TypeDescriptor::of::<u32>();
    /// assert_eq!(desc.element_size(), 4);
    /// assert!(!desc.needs_drop());
    ///
    /// let desc = TypeDescriptor::of::<String>();
    /// assert!(desc.needs_drop());
    /// ```
    #[inline]
    #[must_use]
    pub fn of<T>() -> Self {
        Self {
            element_size: size_of::<T>(),
            needs_drop: std::mem::needs_drop::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Size in bytes of one element
    #[inline]
    #[must_use]
    pub const fn element_size(&self) -> usize {
        self.element_size
    }

    /// Whether dropping an element runs any cleanup code
    #[inline]
    #[must_use]
    pub const fn needs_drop(&self) -> bool {
        self.needs_drop
    }

    #[inline]
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.type_name, self.element_size)
    }
}

/// Hash a value through the container's hasher builder.
#[inline]
pub(crate) fn hash_one<S: BuildHasher, T: Hash + ?Sized>(build_hasher: &S, value: &T) -> u64 {
    build_hasher.hash_one(value)
}

/// Doubling growth shared by the array-backed containers.
///
/// Returns the capacity to grow to when `required` slots are needed, never
/// less than twice the current capacity.
#[inline]
pub(crate) const fn grown_capacity(current: usize, required: usize) -> usize {
    let doubled = current.saturating_mul(2);
    if required > doubled { required } else { doubled }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxBuildHasher;

    #[test]
    fn descriptor_of_plain_integer() {
        let desc = TypeDescriptor::of::<u64>();
        assert_eq!(desc.element_size(), 8);
        assert!(!desc.needs_drop());
        assert_eq!(desc.type_name(), "u64");
    }

    #[test]
    fn descriptor_of_owning_type() {
        let desc = TypeDescriptor::of::<Vec<u8>>();
        assert_eq!(desc.element_size(), size_of::<Vec<u8>>());
        assert!(desc.needs_drop());
    }

    #[test]
    fn descriptor_display() {
        let desc = TypeDescriptor::of::<u16>();
        assert_eq!(desc.to_string(), "u16 (2 bytes)");
    }

    #[test]
    fn hash_is_consistent_with_equality() {
        let a = String::from("TRACE");
        let b = String::from("TRACE");
        assert_eq!(hash_one(&FxBuildHasher, &a), hash_one(&FxBuildHasher, &b));
    }

    #[test]
    fn growth_doubles_with_floor() {
        assert_eq!(grown_capacity(16, 17), 32);
        assert_eq!(grown_capacity(16, 100), 100);
        assert_eq!(grown_capacity(0, 1), 1);
        assert_eq!(grown_capacity(0, 0), 0);
    }
}
