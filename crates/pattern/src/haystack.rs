use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Storage capability of a linear, searchable sequence.
///
/// A haystack is turned into a copyable [`Haystack::Raw`] handle once and searchers only talk to
/// the storage through that handle, by offset. Shared slices and string slices use themselves as
/// the handle, exclusive slices use a pointer and length pair. The matching code is written once
/// against this trait and works for all of them.
///
/// # Safety
///
/// `elements` must return exactly the elements in `start..end` of the storage behind the handle,
/// `range_to_self` must return a haystack covering exactly `start..end` of that same storage and
/// `raw_len` must return the amount of elements behind the handle.
pub unsafe trait Haystack: Sized {
    type Element;
    type Raw: Copy;

    fn into_raw(self) -> Self::Raw;

    fn raw_len(raw: &Self::Raw) -> usize;

    /// Read-only view of `start..end`.
    ///
    /// # Safety
    ///
    /// Requires `start <= end <= raw_len(raw)`. For exclusive haystacks the range must not
    /// overlap any sub-haystack previously produced by `range_to_self` that is still alive.
    unsafe fn elements(raw: &Self::Raw, start: usize, end: usize) -> &[Self::Element];

    /// Rebuilds the sub-haystack `start..end`.
    ///
    /// # Safety
    ///
    /// Requires `start <= end <= raw_len(raw)` with both ends on a boundary. For exclusive
    /// haystacks every range handed out must be disjoint from all other live ranges.
    unsafe fn range_to_self(raw: Self::Raw, start: usize, end: usize) -> Self;

    /// Whether a match or split may begin or end at `position`.
    fn is_boundary(raw: &Self::Raw, position: usize) -> bool {
        let _ = (raw, position);
        true
    }
}

/// Haystacks where every offset is a valid boundary.
///
/// # Safety
///
/// `Haystack::is_boundary` must return `true` for every position in `0..=len`.
pub unsafe trait SliceHaystack: Haystack {}

unsafe impl<'a> Haystack for &'a str {
    type Element = u8;
    type Raw = &'a str;

    fn into_raw(self) -> Self::Raw {
        self
    }

    fn raw_len(raw: &Self::Raw) -> usize {
        raw.len()
    }

    unsafe fn elements(raw: &Self::Raw, start: usize, end: usize) -> &[u8] {
        &raw.as_bytes()[start..end]
    }

    unsafe fn range_to_self(raw: Self::Raw, start: usize, end: usize) -> Self {
        &raw[start..end]
    }

    fn is_boundary(raw: &Self::Raw, position: usize) -> bool {
        raw.is_char_boundary(position)
    }
}

unsafe impl<'a, T> Haystack for &'a [T] {
    type Element = T;
    type Raw = &'a [T];

    fn into_raw(self) -> Self::Raw {
        self
    }

    fn raw_len(raw: &Self::Raw) -> usize {
        raw.len()
    }

    unsafe fn elements(raw: &Self::Raw, start: usize, end: usize) -> &[T] {
        &raw[start..end]
    }

    unsafe fn range_to_self(raw: Self::Raw, start: usize, end: usize) -> Self {
        &raw[start..end]
    }
}

unsafe impl<'a, T> SliceHaystack for &'a [T] {}

/// Pointer and length of an exclusively borrowed slice.
///
/// Holding this does not keep a `&mut [T]` alive, which is what allows a search to hand out
/// disjoint mutable sub-slices while it keeps reading the part it has not searched yet.
pub struct RawSliceMut<'a, T> {
    ptr: NonNull<T>,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

impl<'a, T> RawSliceMut<'a, T> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<'a, T> From<&'a mut [T]> for RawSliceMut<'a, T> {
    fn from(slice: &'a mut [T]) -> Self {
        let len = slice.len();
        Self {
            ptr: NonNull::from(slice).cast::<T>(),
            len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Clone for RawSliceMut<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for RawSliceMut<'a, T> {}

impl<'a, T> fmt::Debug for RawSliceMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawSliceMut({:p}, {})", self.ptr, self.len)
    }
}

unsafe impl<'a, T> Haystack for &'a mut [T] {
    type Element = T;
    type Raw = RawSliceMut<'a, T>;

    fn into_raw(self) -> Self::Raw {
        RawSliceMut::from(self)
    }

    fn raw_len(raw: &Self::Raw) -> usize {
        raw.len
    }

    unsafe fn elements(raw: &Self::Raw, start: usize, end: usize) -> &[T] {
        debug_assert!(start <= end && end <= raw.len);
        std::slice::from_raw_parts(raw.ptr.as_ptr().add(start), end - start)
    }

    unsafe fn range_to_self(raw: Self::Raw, start: usize, end: usize) -> Self {
        debug_assert!(start <= end && end <= raw.len);
        std::slice::from_raw_parts_mut(raw.ptr.as_ptr().add(start), end - start)
    }
}

unsafe impl<'a, T> SliceHaystack for &'a mut [T] {}

/// First boundary strictly after `position`, clamped to `limit`.
pub(crate) fn next_boundary<H: Haystack>(raw: &H::Raw, position: usize, limit: usize) -> usize {
    let mut next = position + 1;
    while next < limit && !H::is_boundary(raw, next) {
        next += 1;
    }

    next.min(limit)
}

/// Last boundary strictly before `position`, clamped to `limit`.
pub(crate) fn previous_boundary<H: Haystack>(raw: &H::Raw, position: usize, limit: usize) -> usize {
    let mut previous = position.saturating_sub(1);
    while previous > limit && !H::is_boundary(raw, previous) {
        previous -= 1;
    }

    previous.max(limit)
}
