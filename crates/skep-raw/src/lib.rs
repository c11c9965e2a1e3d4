//! Raw uninitialized storage blocks for the skep container.
//!
//! This is the leaf crate of the skep workspace. It owns exactly one
//! concern: a contiguous, correctly-aligned block of heap memory sized
//! for a fixed number of element slots, with no knowledge of which
//! slots hold live values. The container crate (`skep`) layers element
//! lifetime management on top.
//!
//! # Architecture
//!
//! ```text
//! skep::Skep<T> (live-range owner: construct/destroy/relocate)
//! └── skep_raw::RawBlock<T> (bytes + capacity, nothing else)
//!     └── skep_raw::heap (the only caller of std::alloc)
//! ```
//!
//! # Safety
//!
//! This crate contains bounded `unsafe` code. Every `unsafe` block
//! carries a `// SAFETY:` comment stating the invariant it relies on.
//! The central contract: a `RawBlock` frees bytes on drop but never
//! runs element destructors — the owner must destroy every live
//! element before the block is dropped or swapped away.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod block;
pub mod error;
mod heap;

pub use block::RawBlock;
pub use error::AllocError;
