//! The dynamic array built on raw storage blocks.
//!
//! [`Skep`] owns one [`RawBlock`] and a live-element count. Slots
//! `[0, len)` hold constructed values; slots `[len, capacity)` are
//! uninitialized bytes. Every mutating operation first decides whether
//! the current capacity suffices; if not, it allocates a larger block,
//! relocates the live prefix bitwise, swaps the blocks, and frees the
//! old bytes. Relocation by `ptr::copy` cannot fail, so the only
//! fallible step of a migration is the allocation itself — which
//! happens before any element is touched.
//!
//! Element "construction failure" here means a panic out of `Clone`,
//! `Default`, or a caller-supplied closure. Operations that construct
//! several elements route them through a drop guard (`TailGuard`): on
//! an unwind, cells built past the live prefix are destroyed before
//! the panic continues, so the container is left in its prior valid
//! state and nothing leaks.

use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use skep_raw::{AllocError, RawBlock};

/// Escalate an allocation failure on an infallible entry point.
#[cold]
#[inline(never)]
fn alloc_failed(err: AllocError) -> ! {
    panic!("skep allocation failed: {err}");
}

/// A growable contiguous container.
///
/// The API mirrors the familiar vector shape: amortized-constant
/// [`push`](Skep::push), positional [`insert`](Skep::insert) and
/// [`remove`](Skep::remove), capacity control via
/// [`reserve`](Skep::reserve) / [`try_reserve`](Skep::try_reserve),
/// and slice access for everything else — `Skep<T>` derefs to `[T]`,
/// so indexing, `get`, `iter`, sorting and slice patterns all apply to
/// the live prefix directly.
///
/// # Capacity
///
/// An empty `Skep` owns no allocation. Appending past capacity doubles
/// it (minimum one slot); capacity never shrinks. Zero-sized element
/// types never allocate and report unbounded capacity.
///
/// # Panic safety
///
/// A panic from an element's `Clone`, `Default`, or `Drop` leaves the
/// container valid: the live prefix covers exactly the fully
/// constructed elements, and anything built by the failing operation
/// has been destroyed. Growth paths that relocate elements do so
/// bitwise and cannot fail mid-migration.
pub struct Skep<T> {
    buf: RawBlock<T>,
    len: usize,
}

impl<T> Skep<T> {
    /// An empty container. Allocates nothing.
    pub const fn new() -> Self {
        Self {
            buf: RawBlock::new(),
            len: 0,
        }
    }

    /// An empty container with room for `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    pub fn with_capacity(capacity: usize) -> Self {
        match RawBlock::allocate(capacity) {
            Ok(buf) => Self { buf, len: 0 },
            Err(err) => alloc_failed(err),
        }
    }

    /// A container of `len` default-valued elements.
    ///
    /// If a `Default::default()` call panics, the partially
    /// constructed prefix is destroyed and the allocation freed before
    /// the panic continues.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails, or propagates a panic from
    /// `T::default()`.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let mut skep = Self::with_capacity(len);
        skep.extend_exact(len, std::iter::repeat_with(T::default));
        skep
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the container holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the current block can hold.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Size of the backing allocation in bytes.
    pub fn capacity_bytes(&self) -> usize {
        self.buf.capacity_bytes()
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        self
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    /// Raw pointer to the first slot. Valid for reads of `len()`
    /// elements; dangling when nothing is allocated.
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    /// Raw mutable pointer to the first slot.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    /// Ensure `capacity() >= min_capacity`, reallocating if needed.
    ///
    /// A no-op when the current capacity already suffices, so calling
    /// it twice with the same bound performs at most one reallocation.
    /// On reallocation the new capacity is exactly `min_capacity`.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails; the container is untouched in
    /// that case.
    pub fn reserve(&mut self, min_capacity: usize) {
        if let Err(err) = self.try_reserve(min_capacity) {
            alloc_failed(err);
        }
    }

    /// Fallible twin of [`reserve`](Skep::reserve).
    ///
    /// On `Err` the original block and every element are untouched.
    pub fn try_reserve(&mut self, min_capacity: usize) -> Result<(), AllocError> {
        if min_capacity <= self.capacity() {
            return Ok(());
        }
        let mut staging = RawBlock::allocate(min_capacity)?;
        // SAFETY: the blocks are distinct allocations and both hold at
        // least `len` slots; the live prefix relocates bitwise. The
        // vacated source cells are plain bytes afterwards, so dropping
        // the old block at the end of scope frees memory only.
        unsafe { ptr::copy_nonoverlapping(self.buf.ptr(), staging.ptr(), self.len) };
        self.buf.swap(&mut staging);
        Ok(())
    }

    /// Append an element.
    ///
    /// # Panics
    ///
    /// Panics if growth is needed and the allocation fails; the
    /// container is untouched in that case (the value is dropped
    /// during unwinding).
    pub fn push(&mut self, value: T) {
        if self.len == self.capacity() {
            self.grow_for_push();
        }
        // SAFETY: len < capacity after the growth check; the target
        // cell is uninitialized.
        unsafe { ptr::write(self.buf.slot(self.len), value) };
        self.len += 1;
    }

    /// Append an element constructed in place by `f`.
    ///
    /// Capacity is ensured first, then `f` runs and its result is
    /// written straight into the target cell. A panic in `f` leaves
    /// the container exactly as before the call. Returns a reference
    /// to the new element.
    pub fn push_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        if self.len == self.capacity() {
            self.grow_for_push();
        }
        let slot = self.buf.slot(self.len);
        // SAFETY: len < capacity; `f()` is evaluated before the write,
        // so a panic unwinds with len still covering only live cells.
        unsafe { ptr::write(slot, f()) };
        self.len += 1;
        // SAFETY: the cell was just initialized.
        unsafe { &mut *slot }
    }

    /// Remove and return the last element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the cell at the new len was live; ownership moves to
        // the caller and the cell leaves the live prefix.
        Some(unsafe { ptr::read(self.buf.slot(self.len)) })
    }

    /// Insert `value` at `index`, shifting the suffix one slot right.
    ///
    /// `index == len()` appends. Returns a reference to the inserted
    /// element.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`, or if growth is needed and the
    /// allocation fails (container untouched).
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        assert!(
            index <= self.len,
            "insert index {index} out of bounds for length {}",
            self.len
        );
        if self.len == self.capacity() {
            self.grow_for_push();
        }
        // SAFETY: capacity exceeds len, so the one-slot right shift of
        // [index, len) stays in bounds. The shift is a bitwise
        // relocation; the vacated cell at `index` is then overwritten
        // without being read.
        unsafe {
            let slot = self.buf.slot(index);
            ptr::copy(slot, slot.add(1), self.len - index);
            ptr::write(slot, value);
        }
        self.len += 1;
        // SAFETY: the cell at `index` was just initialized.
        unsafe { &mut *self.buf.slot(index) }
    }

    /// Remove and return the element at `index`, shifting the suffix
    /// one slot left.
    ///
    /// Never fails for a valid index: the shift is a bitwise
    /// relocation and the removed value's destructor runs in the
    /// caller's hands.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "remove index {index} out of bounds for length {}",
            self.len
        );
        // SAFETY: the cell at `index` is live; after reading it out,
        // the suffix shifts left bitwise over it, and the trailing
        // cell leaves the live prefix as vacated bytes.
        unsafe {
            let slot = self.buf.slot(index);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Destroy every element past `new_len`. No-op when
    /// `new_len >= len()`. Capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail_len = self.len - new_len;
        // Shrink len before dropping: if an element's Drop panics, the
        // remaining doomed cells are already outside the live prefix.
        self.len = new_len;
        // SAFETY: cells [new_len, new_len + tail_len) were live and
        // are now past the live prefix; each is destroyed exactly
        // once.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.slot(new_len),
                tail_len,
            ));
        }
    }

    /// Destroy every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Grow or shrink the live range to exactly `new_len` elements.
    ///
    /// Shrinking destroys the excess suffix. Growing reserves capacity
    /// and default-constructs the new suffix; if a `T::default()` call
    /// panics, the elements it already produced are destroyed and the
    /// container keeps its prior length and contents.
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        if new_len < self.len {
            self.truncate(new_len);
        } else if new_len > self.len {
            self.reserve(new_len);
            let additional = new_len - self.len;
            self.extend_exact(additional, std::iter::repeat_with(T::default));
        }
    }

    /// Exchange the entire contents of two containers in constant
    /// time: a block swap plus a length swap, never touching elements.
    pub fn swap_with(&mut self, other: &mut Self) {
        self.buf.swap(&mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Double the capacity (minimum one slot) for an append.
    fn grow_for_push(&mut self) {
        // capacity <= isize::MAX / size_of::<T>(), so the doubling
        // cannot overflow; ZSTs report unbounded capacity and never
        // reach this point.
        let target = if self.capacity() == 0 {
            1
        } else {
            self.capacity() * 2
        };
        self.reserve(target);
    }

    /// Construct `count` elements from `iter` onto the end of the live
    /// prefix. The caller must have reserved capacity for them.
    ///
    /// Cells are committed to the live prefix only once all `count`
    /// constructions succeed; on a panic the guard destroys the cells
    /// built so far and the length is unchanged.
    pub(crate) fn extend_exact<I>(&mut self, count: usize, iter: I)
    where
        I: Iterator<Item = T>,
    {
        debug_assert!(self.capacity() - self.len >= count);
        let base = self.len;
        let mut guard = TailGuard {
            skep: self,
            built: 0,
        };
        for value in iter.take(count) {
            // SAFETY: built < count and the caller reserved `count`
            // slots past the live prefix, so the target cell is in
            // capacity and uninitialized.
            unsafe { ptr::write(guard.skep.buf.slot(base + guard.built), value) };
            guard.built += 1;
        }
        debug_assert_eq!(guard.built, count);
        guard.commit();
    }

    /// Take the block and length out without running `Drop`.
    pub(crate) fn into_parts(self) -> (RawBlock<T>, usize) {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so block ownership moves
        // out exactly once and no element is destroyed here.
        let buf = unsafe { ptr::read(&this.buf) };
        (buf, this.len)
    }
}

/// Drop guard for multi-element construction past the live prefix.
///
/// While armed, cells `[skep.len, skep.len + built)` hold constructed
/// elements that are not yet part of the live prefix. On an unwind the
/// guard destroys them; on success [`commit`](TailGuard::commit) folds
/// them into the prefix.
struct TailGuard<'a, T> {
    skep: &'a mut Skep<T>,
    built: usize,
}

impl<T> TailGuard<'_, T> {
    fn commit(mut self) {
        self.skep.len += self.built;
        // Disarm: the trailing drop now covers zero cells.
        self.built = 0;
    }
}

impl<T> Drop for TailGuard<'_, T> {
    fn drop(&mut self) {
        let first = self.skep.len;
        // SAFETY: cells [first, first + built) were fully constructed
        // and never entered the live prefix; each is destroyed exactly
        // once.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.skep.buf.slot(first),
                self.built,
            ));
        }
    }
}

impl<T> Deref for Skep<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        // SAFETY: [0, len) is live and contiguous; the pointer is
        // aligned and non-null even when dangling.
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }
}

impl<T> DerefMut for Skep<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        // SAFETY: as for Deref, with exclusive access through &mut
        // self.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }
}

impl<T: Clone> Clone for Skep<T> {
    /// Elementwise copy with capacity exactly the source length.
    ///
    /// A panic from an element's `Clone` destroys the partially
    /// constructed prefix and frees the new allocation before
    /// propagating; the source is untouched either way.
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.len);
        out.extend_exact(self.len, self.iter().cloned());
        out
    }

    /// The reuse-aware assignment path.
    ///
    /// When the source does not fit in the current capacity, a full
    /// copy is staged and swapped in, giving the strong guarantee.
    /// Otherwise existing elements are `clone_from`ed in place over
    /// the shared prefix and the length difference is settled by
    /// destroying the excess suffix or cloning the source's tail into
    /// raw cells. On a panic in the in-place path the container stays
    /// valid but the prefix may hold a mix of old and new values.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.capacity() {
            let mut staged = source.clone();
            self.swap_with(&mut staged);
            // Old elements are destroyed when `staged` drops.
            return;
        }
        let shared = self.len.min(source.len);
        for (dst, src) in self.as_mut_slice()[..shared]
            .iter_mut()
            .zip(&source.as_slice()[..shared])
        {
            dst.clone_from(src);
        }
        if source.len < self.len {
            self.truncate(source.len);
        } else {
            let tail = &source.as_slice()[shared..];
            self.extend_exact(tail.len(), tail.iter().cloned());
        }
    }
}

impl<T> Drop for Skep<T> {
    fn drop(&mut self) {
        // SAFETY: exactly the live prefix [0, len) is constructed; the
        // block frees its bytes afterwards without touching elements.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.ptr(), self.len));
        }
    }
}
