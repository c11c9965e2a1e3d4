//! Standard trait surface for [`Skep`].
//!
//! Everything here delegates to the live prefix as a slice; none of it
//! touches raw storage directly.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::container::Skep;

impl<T> Default for Skep<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Skep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: PartialEq<U>, U> PartialEq<Skep<U>> for Skep<T> {
    fn eq(&self, other: &Skep<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U> PartialEq<[U]> for Skep<T> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U> PartialEq<&[U]> for Skep<T> {
    fn eq(&self, other: &&[U]) -> bool {
        *self.as_slice() == **other
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for Skep<T> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: Eq> Eq for Skep<T> {}

impl<T: PartialOrd> PartialOrd for Skep<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for Skep<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for Skep<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> AsRef<[T]> for Skep<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for Skep<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Extend<T> for Skep<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(self.len().saturating_add(lower));
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for Skep<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut skep = Skep::new();
        skep.extend(iter);
        skep
    }
}

impl<T: Clone> From<&[T]> for Skep<T> {
    fn from(items: &[T]) -> Self {
        let mut skep = Skep::with_capacity(items.len());
        skep.extend_exact(items.len(), items.iter().cloned());
        skep
    }
}

impl<T, const N: usize> From<[T; N]> for Skep<T> {
    fn from(items: [T; N]) -> Self {
        let mut skep = Skep::with_capacity(N);
        skep.extend_exact(N, items.into_iter());
        skep
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use crate::Skep;

    #[test]
    fn equality_against_slices_and_arrays() {
        let skep = crate::skep![1, 2, 3];
        assert_eq!(skep, [1, 2, 3]);
        assert_eq!(skep, *[1, 2, 3].as_slice());
        assert_eq!(skep, crate::skep![1, 2, 3]);
        assert_ne!(skep, crate::skep![1, 2]);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = crate::skep![1, 2];
        let b = crate::skep![1, 2, 0];
        let c = crate::skep![1, 3];
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn debug_formats_like_a_slice() {
        let skep = crate::skep!["x", "y"];
        assert_eq!(format!("{skep:?}"), r#"["x", "y"]"#);
    }

    #[test]
    fn hash_matches_slice_hash() {
        fn hash_of(value: impl Hash) -> u64 {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            hasher.finish()
        }
        let skep = crate::skep![1u8, 2, 3];
        assert_eq!(hash_of(&skep), hash_of([1u8, 2, 3].as_slice()));
    }

    #[test]
    fn extend_and_collect() {
        let mut skep: Skep<i32> = (0..3).collect();
        skep.extend(3..6);
        assert_eq!(skep, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn from_slice_clones() {
        let source = [1, 2, 3];
        let skep = Skep::from(source.as_slice());
        assert_eq!(skep, source);
        assert_eq!(skep.capacity(), 3);
    }

    #[test]
    fn from_array_moves() {
        let skep = Skep::from([String::from("a"), String::from("b")]);
        assert_eq!(skep.as_slice(), ["a", "b"]);
    }

    #[test]
    fn default_is_empty() {
        let skep: Skep<u8> = Skep::default();
        assert!(skep.is_empty());
        assert_eq!(skep.capacity(), 0);
    }
}
