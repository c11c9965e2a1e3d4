//! A growable contiguous container with explicit panic-safety
//! guarantees.
//!
//! [`Skep<T>`] is a dynamic array built from first principles on top
//! of [`skep_raw::RawBlock`]: a raw storage block holds uninitialized
//! slots, and `Skep` tracks which prefix of those slots is live. Every
//! mutating operation either completes or unwinds with the container
//! back in a valid state — a panicking `Clone` or `Default` never
//! leaks elements and never leaves a half-constructed cell inside the
//! live range.
//!
//! # Architecture
//!
//! ```text
//! Skep<T> (live prefix [0, len) + orchestration)
//! ├── mutators: push / pop / insert / remove / resize / reserve
//! ├── IntoIter (owns the block after into_iter())
//! └── RawBlock<T> (bytes + capacity, from skep-raw)
//! ```
//!
//! # Quick start
//!
//! ```
//! use skep::Skep;
//!
//! let mut primes = Skep::new();
//! primes.push(2);
//! primes.push(3);
//! primes.push(5);
//! primes.insert(0, 1);
//!
//! assert_eq!(primes, [1, 2, 3, 5]);
//! assert_eq!(primes.remove(0), 1);
//! assert_eq!(primes.pop(), Some(5));
//! assert_eq!(primes.as_slice(), &[2, 3]);
//! ```
//!
//! Or with the [`skep!`] macro:
//!
//! ```
//! let squares = skep::skep![1, 4, 9];
//! assert_eq!(squares.len(), 3);
//!
//! let zeros = skep::skep![0u8; 4];
//! assert_eq!(zeros, [0, 0, 0, 0]);
//! ```
//!
//! # Safety
//!
//! Like its storage crate, this crate contains bounded `unsafe` code;
//! every `unsafe` block carries a `// SAFETY:` comment. The safe API
//! never exposes an uninitialized slot.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod container;
pub mod iter;
mod traits;

pub use container::Skep;
pub use iter::IntoIter;
pub use skep_raw::{AllocError, RawBlock};

/// Construct a [`Skep`] from a list of elements or a repeated value.
///
/// Mirrors the forms of `vec!`:
///
/// ```
/// let empty: skep::Skep<u8> = skep::skep![];
/// assert!(empty.is_empty());
///
/// let listed = skep::skep![7, 8, 9];
/// assert_eq!(listed, [7, 8, 9]);
///
/// let repeated = skep::skep!["ha"; 2];
/// assert_eq!(repeated, ["ha", "ha"]);
/// ```
#[macro_export]
macro_rules! skep {
    () => {
        $crate::Skep::new()
    };
    ($value:expr; $count:expr) => {{
        let value = $value;
        let count: usize = $count;
        let mut skep = $crate::Skep::with_capacity(count);
        for _ in 0..count {
            skep.push(::core::clone::Clone::clone(&value));
        }
        skep
    }};
    ($($element:expr),+ $(,)?) => {{
        let mut skep = $crate::Skep::new();
        $(skep.push($element);)+
        skep
    }};
}
