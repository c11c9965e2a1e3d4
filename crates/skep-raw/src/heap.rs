//! The single boundary through which raw bytes enter and leave.
//!
//! Nothing else in the workspace calls `std::alloc` directly. Keeping
//! the calls in one module keeps allocator concerns out of the block
//! and container logic and gives failure injection a single seam.

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use crate::error::AllocError;

/// Allocate `layout.size()` bytes with `layout.align()` alignment.
///
/// `layout` must have a non-zero size; zero-sized requests are handled
/// by the caller (they allocate nothing).
pub(crate) fn allocate(layout: Layout) -> Result<NonNull<u8>, AllocError> {
    debug_assert!(layout.size() > 0);
    // SAFETY: layout has non-zero size, checked above.
    let ptr = unsafe { alloc::alloc(layout) };
    NonNull::new(ptr).ok_or(AllocError::OutOfMemory {
        bytes: layout.size(),
    })
}

/// Return a block previously obtained from [`allocate`].
///
/// # Safety
///
/// `ptr` must have been returned by [`allocate`] with this exact
/// `layout`, and must not be used afterwards.
pub(crate) unsafe fn release(ptr: NonNull<u8>, layout: Layout) {
    // SAFETY: caller contract — ptr came from `allocate` with `layout`.
    unsafe { alloc::dealloc(ptr.as_ptr(), layout) }
}
