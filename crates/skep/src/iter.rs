//! By-value iteration over a container's elements.
//!
//! [`IntoIter`] takes ownership of the storage block and walks the
//! live range with two cursors, reading elements out as it goes.
//! Whatever has not been yielded when the iterator drops is destroyed
//! there; the block then frees its bytes.

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;

use skep_raw::RawBlock;

use crate::container::Skep;

/// An iterator that moves elements out of a [`Skep`].
///
/// Created by [`IntoIterator::into_iter`] on an owned container.
pub struct IntoIter<T> {
    buf: RawBlock<T>,
    /// First not-yet-yielded cell.
    start: usize,
    /// One past the last not-yet-yielded cell.
    end: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: start < end, so the cell is live and unread;
        // ownership moves to the caller and the cursor passes it.
        let value = unsafe { ptr::read(self.buf.slot(self.start)) };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: the cell at the new end is live and unread.
        Some(unsafe { ptr::read(self.buf.slot(self.end)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = self.end - self.start;
        // SAFETY: cells [start, end) are live and were never yielded;
        // each is destroyed exactly once. The block frees its bytes
        // afterwards.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.slot(self.start),
                remaining,
            ));
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // SAFETY: the unyielded range [start, end) is live.
        let remaining = unsafe {
            std::slice::from_raw_parts(self.buf.slot(self.start), self.end - self.start)
        };
        f.debug_tuple("IntoIter").field(&remaining).finish()
    }
}

impl<T> IntoIterator for Skep<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let (buf, len) = self.into_parts();
        IntoIter {
            buf,
            start: 0,
            end: len,
        }
    }
}

impl<'a, T> IntoIterator for &'a Skep<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Skep<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
