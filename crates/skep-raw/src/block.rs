//! Uninitialized, correctly-aligned storage for a fixed slot count.
//!
//! A [`RawBlock`] owns bytes, never values. It hands out slot
//! addresses and exchanges ownership with other blocks, but it has no
//! idea which slots hold live elements and its destructor only returns
//! the bytes to the allocator. The owner is solely responsible for
//! matching every element construction with exactly one destruction
//! before the block goes away.

use std::alloc::Layout;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use crate::error::AllocError;
use crate::heap;

/// A raw heap block with room for a fixed number of `T` slots.
///
/// Invariants:
/// - With `capacity() > 0` and a non-zero-sized `T`, the pointer is a
///   live allocation of `capacity * size_of::<T>()` bytes aligned for
///   `T`.
/// - Otherwise the pointer is dangling and no allocation exists:
///   requesting zero capacity costs nothing.
/// - No slot is ever live as far as the block is concerned.
///
/// Ownership is unique: there is no way to clone a block, only to
/// [`swap`](RawBlock::swap) or move it.
#[derive(Debug)]
pub struct RawBlock<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

impl<T> RawBlock<T> {
    /// An empty block: dangling pointer, no allocation.
    ///
    /// For zero-sized `T` the capacity is unbounded, since slots
    /// occupy no bytes.
    pub const fn new() -> Self {
        let cap = if mem::size_of::<T>() == 0 {
            usize::MAX
        } else {
            0
        };
        Self {
            ptr: NonNull::dangling(),
            cap,
            _marker: PhantomData,
        }
    }

    /// Allocate storage for `cap` slots.
    ///
    /// Zero requested capacity, or a zero-sized `T`, short-circuits to
    /// the empty block without touching the allocator.
    pub fn allocate(cap: usize) -> Result<Self, AllocError> {
        if cap == 0 || mem::size_of::<T>() == 0 {
            return Ok(Self::new());
        }
        let layout = Layout::array::<T>(cap)
            .map_err(|_| AllocError::CapacityOverflow { requested: cap })?;
        let ptr = heap::allocate(layout)?;
        Ok(Self {
            ptr: ptr.cast(),
            cap,
            _marker: PhantomData,
        })
    }

    /// Base address of the block.
    ///
    /// Dangling (but aligned) when nothing is allocated; valid for
    /// zero-length reads either way.
    pub fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Address of the `index`-th slot.
    ///
    /// `index == capacity()` is allowed to form a past-the-end address
    /// for range arithmetic; dereferencing that address is undefined
    /// behavior. `index > capacity()` is a contract violation, caught
    /// by a debug assertion.
    pub fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.cap, "slot index {index} out of bounds");
        // SAFETY: index <= cap, so the offset stays inside the
        // allocation (or is the past-the-end address). For zero-sized
        // T the byte offset is zero.
        unsafe { self.ptr.as_ptr().add(index) }
    }

    /// Number of slots the block can hold, constructed or not.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Size of the backing allocation in bytes.
    pub fn capacity_bytes(&self) -> usize {
        if mem::size_of::<T>() == 0 {
            0
        } else {
            self.cap * mem::size_of::<T>()
        }
    }

    /// Exchange ownership of the two blocks in constant time.
    ///
    /// Never fails and never touches slot contents; any live elements
    /// travel with their bytes and remain the respective owners'
    /// responsibility.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.cap, &mut other.cap);
    }
}

impl<T> Default for RawBlock<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBlock<T> {
    fn drop(&mut self) {
        if self.cap == 0 || mem::size_of::<T>() == 0 {
            return;
        }
        // The same arithmetic succeeded when the block was allocated.
        let layout = Layout::array::<T>(self.cap).expect("layout was validated at allocation");
        // SAFETY: cap > 0 and T is not zero-sized, so ptr came from
        // heap::allocate with this layout. Only bytes are freed; the
        // owner has already destroyed any live elements.
        unsafe { heap::release(self.ptr.cast(), layout) };
    }
}

// SAFETY: a RawBlock owns its allocation exclusively; transferring the
// block across threads transfers plain bytes. Element liveness is the
// owner's concern, so the bounds mirror the element type's.
unsafe impl<T: Send> Send for RawBlock<T> {}
// SAFETY: shared access to a RawBlock exposes only addresses and the
// capacity, never element values.
unsafe impl<T: Sync> Sync for RawBlock<T> {}

#[cfg(test)]
mod tests {
    use std::mem;
    use std::ptr;

    use super::*;

    #[test]
    fn empty_block_has_zero_capacity() {
        let block = RawBlock::<u64>::new();
        assert_eq!(block.capacity(), 0);
        assert_eq!(block.capacity_bytes(), 0);
    }

    #[test]
    fn zero_capacity_request_allocates_nothing() {
        let block = RawBlock::<u64>::allocate(0).unwrap();
        assert_eq!(block.capacity(), 0);
        // Dangling pointer is the alignment sentinel, not a heap address.
        assert_eq!(block.ptr() as usize, mem::align_of::<u64>());
    }

    #[test]
    fn allocate_reports_exact_capacity() {
        let block = RawBlock::<u32>::allocate(12).unwrap();
        assert_eq!(block.capacity(), 12);
        assert_eq!(block.capacity_bytes(), 48);
    }

    #[test]
    fn slots_are_contiguous() {
        let block = RawBlock::<u32>::allocate(4).unwrap();
        let base = block.ptr() as usize;
        for i in 0..=4 {
            assert_eq!(block.slot(i) as usize, base + i * mem::size_of::<u32>());
        }
    }

    #[test]
    fn written_slots_read_back() {
        let block = RawBlock::<u16>::allocate(3).unwrap();
        for i in 0..3 {
            unsafe { ptr::write(block.slot(i), i as u16 * 10) };
        }
        for i in 0..3 {
            assert_eq!(unsafe { ptr::read(block.slot(i)) }, i as u16 * 10);
        }
    }

    #[test]
    fn swap_exchanges_blocks() {
        let mut a = RawBlock::<u8>::allocate(2).unwrap();
        let mut b = RawBlock::<u8>::allocate(9).unwrap();
        let (a_ptr, b_ptr) = (a.ptr(), b.ptr());

        a.swap(&mut b);

        assert_eq!(a.capacity(), 9);
        assert_eq!(b.capacity(), 2);
        assert_eq!(a.ptr(), b_ptr);
        assert_eq!(b.ptr(), a_ptr);
    }

    #[test]
    fn zero_sized_elements_have_unbounded_capacity() {
        let block = RawBlock::<()>::allocate(5).unwrap();
        assert_eq!(block.capacity(), usize::MAX);
        assert_eq!(block.capacity_bytes(), 0);
    }

    #[test]
    fn oversized_request_is_capacity_overflow() {
        let err = RawBlock::<u64>::allocate(usize::MAX).unwrap_err();
        assert_eq!(
            err,
            AllocError::CapacityOverflow {
                requested: usize::MAX
            }
        );
    }

    #[test]
    fn high_alignment_is_respected() {
        #[repr(align(64))]
        struct Wide([u8; 64]);

        let block = RawBlock::<Wide>::allocate(3).unwrap();
        assert_eq!(block.ptr() as usize % 64, 0);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn allocation_reports_requested_capacity(cap in 0usize..4096) {
                let block = RawBlock::<u64>::allocate(cap).unwrap();
                prop_assert_eq!(block.capacity(), cap);
                prop_assert_eq!(block.capacity_bytes(), cap * 8);
            }

            #[test]
            fn slot_offsets_scale_with_element_size(cap in 1usize..256, index in 0usize..256) {
                let index = index % (cap + 1);
                let block = RawBlock::<u32>::allocate(cap).unwrap();
                let offset = block.slot(index) as usize - block.ptr() as usize;
                prop_assert_eq!(offset, index * mem::size_of::<u32>());
            }

            #[test]
            fn swap_is_an_involution(cap_a in 0usize..64, cap_b in 0usize..64) {
                let mut a = RawBlock::<u8>::allocate(cap_a).unwrap();
                let mut b = RawBlock::<u8>::allocate(cap_b).unwrap();
                let (ptr_a, ptr_b) = (a.ptr(), b.ptr());
                a.swap(&mut b);
                a.swap(&mut b);
                prop_assert_eq!(a.capacity(), cap_a);
                prop_assert_eq!(b.capacity(), cap_b);
                prop_assert_eq!(a.ptr(), ptr_a);
                prop_assert_eq!(b.ptr(), ptr_b);
            }
        }
    }
}
