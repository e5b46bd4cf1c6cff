// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::type_name;
use std::num::NonZero;

use tracing::{Level, event};

use crate::{BufferOptions, DEFAULT_GROWTH_INCREMENT, Encoding, Error, Result};

/// Assembles a byte sequence in one contiguous, growable region of memory.
///
/// The buffer owns a backing region of [`capacity()`] bytes, of which the first [`size()`] bytes
/// have been written. Every write appends at the end of the written bytes. When a write needs more
/// room than the buffer has left, the backing region is reallocated to a larger size, growing by a
/// whole multiple of the [growth increment][Self::growth_increment].
///
/// The written bytes can be inspected via [`join()`], taken out via [`flush()`] or trimmed to a
/// window via [`slice_in_place()`].
///
/// # Memory layout
///
/// Bytes past [`size()`] are spare capacity. They may hold stale data from before a [`clear()`]
/// or [`flush()`] and are only reachable through [`slice()`], which addresses the backing region
/// directly.
///
/// # Example
///
/// ```
/// use growbuf::GrowableBuffer;
///
/// # fn main() -> growbuf::Result<()> {
/// let mut buf = GrowableBuffer::with_capacity(4, new_zealand::nz!(16));
///
/// buf.write_u32_be(0xDEAD_BEEF)?;
/// assert_eq!(buf.capacity(), 4);
///
/// // Not enough room left, so the buffer grows by one increment.
/// buf.write_u16_le(0x0102)?;
/// assert_eq!(buf.capacity(), 20);
///
/// assert_eq!(buf.join(), &[0xDE, 0xAD, 0xBE, 0xEF, 0x02, 0x01]);
/// # Ok(())
/// # }
/// ```
///
/// [`capacity()`]: Self::capacity
/// [`size()`]: Self::size
/// [`join()`]: Self::join
/// [`flush()`]: Self::flush
/// [`clear()`]: Self::clear
/// [`slice()`]: Self::slice
/// [`slice_in_place()`]: Self::slice_in_place
#[derive(Clone)]
pub struct GrowableBuffer {
    // Always fully initialized: `storage.len()` is the capacity of the buffer.
    storage: Vec<u8>,

    /// Number of bytes at the start of `storage` that have been written.
    len: usize,

    growth_increment: NonZero<usize>,

    encoding: Encoding,
}

impl GrowableBuffer {
    /// Creates a buffer with the default initial capacity and growth increment.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(BufferOptions::default())
    }

    /// Creates a buffer with the given initial capacity and growth increment.
    #[must_use]
    pub fn with_capacity(initial_capacity: usize, growth_increment: NonZero<usize>) -> Self {
        Self::with_options(
            BufferOptions::new()
                .with_initial_capacity(initial_capacity)
                .with_growth_increment(growth_increment),
        )
    }

    /// Creates a buffer from a full set of options.
    ///
    /// # Panics
    ///
    /// Panics if the initial capacity cannot be allocated, like any other `Vec` allocation.
    #[must_use]
    pub fn with_options(options: BufferOptions) -> Self {
        Self {
            storage: vec![0; options.initial_capacity],
            len: 0,
            growth_increment: options.growth_increment,
            encoding: options.encoding,
        }
    }

    /// Total size of the backing region, including spare capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Number of bytes written to the buffer.
    #[must_use]
    pub fn size(&self) -> usize {
        self.len
    }

    /// Whether no bytes have been written to the buffer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bytes that can be written before the buffer needs to grow.
    #[must_use]
    pub fn remaining_capacity(&self) -> usize {
        self.storage.len() - self.len
    }

    /// The minimum number of bytes by which the buffer grows.
    #[must_use]
    pub fn growth_increment(&self) -> NonZero<usize> {
        self.growth_increment
    }

    /// The text encoding used by text writes that do not name an encoding explicitly.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Discards the written bytes.
    ///
    /// The backing region is retained as-is for reuse; its contents are not zeroed.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Returns the written bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use growbuf::GrowableBuffer;
    ///
    /// # fn main() -> growbuf::Result<()> {
    /// let mut buf = GrowableBuffer::new();
    /// buf.write(b"abc")?;
    ///
    /// assert_eq!(buf.join(), b"abc");
    /// // Joining does not consume anything.
    /// assert_eq!(buf.size(), 3);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn join(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// Returns a copy of the written bytes and clears the buffer.
    ///
    /// The capacity of the buffer is unchanged, so it is ready to assemble the next message
    /// without reallocating.
    ///
    /// # Example
    ///
    /// ```
    /// use growbuf::GrowableBuffer;
    ///
    /// # fn main() -> growbuf::Result<()> {
    /// let mut buf = GrowableBuffer::new();
    ///
    /// buf.write_cstring(Some("first"))?;
    /// assert_eq!(buf.flush(), b"first\0");
    ///
    /// buf.write_cstring(Some("second"))?;
    /// assert_eq!(buf.flush(), b"second\0");
    ///
    /// assert!(buf.join().is_empty());
    /// # Ok(())
    /// # }
    /// ```
    #[must_use = "flushing discards the buffered bytes, which are only available via the return value"]
    pub fn flush(&mut self) -> Vec<u8> {
        let result = self.join().to_vec();
        self.clear();
        result
    }

    /// Returns bytes `begin..end` of the backing region, regardless of how many have been written.
    ///
    /// An `end` of `None` means the end of the backing region. Out-of-range indices are clamped:
    /// `begin` to the capacity and `end` to the range `begin..=capacity`, so this never panics.
    ///
    /// Unlike [`join()`][Self::join], this may expose spare capacity past [`size()`][Self::size].
    #[must_use]
    pub fn slice(&self, begin: usize, end: Option<usize>) -> &[u8] {
        let capacity = self.storage.len();

        let begin = begin.min(capacity);
        let end = end.unwrap_or(capacity).clamp(begin, capacity);

        &self.storage[begin..end]
    }

    /// Discards all written bytes outside the window `begin..end`, moving the window to the start
    /// of the buffer.
    ///
    /// The window bounds are normalized as follows:
    ///
    /// 1. A `begin` of `None` or `Some(0)` means the start of the written bytes.
    /// 1. An `end` of `None` or `Some(0)`, or one past [`size()`][Self::size], means the end of
    ///    the written bytes.
    /// 1. A negative `begin` or `end` counts back from the end of the written bytes, stopping at
    ///    the start.
    /// 1. A `begin` past `end` is moved to `end`, leaving an empty window.
    ///
    /// If the window starts at zero, the buffer is simply truncated. Otherwise, a new backing
    /// region of `capacity() - begin` bytes is allocated, the window is copied to its start and
    /// the old region is released. The capacity therefore shrinks by `begin` bytes, not down to
    /// the size of the window.
    ///
    /// # Example
    ///
    /// ```
    /// use growbuf::GrowableBuffer;
    ///
    /// # fn main() -> growbuf::Result<()> {
    /// let mut buf = GrowableBuffer::new();
    /// buf.write([0, 1, 2, 3, 4, 5, 6, 7, 8, 9])?;
    ///
    /// buf.slice_in_place(Some(3), Some(7))?;
    /// assert_eq!(buf.join(), &[3, 4, 5, 6]);
    ///
    /// buf.slice_in_place(Some(-2), None)?;
    /// assert_eq!(buf.join(), &[5, 6]);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the new backing region cannot be allocated. The
    /// buffer is left unchanged in that case.
    pub fn slice_in_place(&mut self, begin: Option<isize>, end: Option<isize>) -> Result<()> {
        let (begin, end) = self.normalize_window(begin, end);

        if begin == 0 {
            self.len = end;
            return Ok(());
        }

        let new_capacity = self.storage.len() - begin;

        let mut storage = try_allocate(new_capacity)?;
        storage[..end - begin].copy_from_slice(&self.storage[begin..end]);

        event!(
            Level::DEBUG,
            message = "sliced buffer in place",
            begin,
            end,
            old_capacity = self.storage.len(),
            new_capacity
        );

        self.storage = storage;
        self.len = end - begin;

        Ok(())
    }

    fn normalize_window(&self, begin: Option<isize>, end: Option<isize>) -> (usize, usize) {
        let len = self.len;

        let begin = begin.unwrap_or(0);
        let end = end.filter(|&end| end != 0 && isize_le_usize(end, len));

        let begin = resolve_index(begin, len);
        let end = end.map_or(len, |end| resolve_index(end, len));

        (begin.min(end), end)
    }

    /// Ensures that at least `additional` bytes can be written without exceeding the capacity.
    ///
    /// When growth is needed, the capacity grows by the smallest multiple of the growth increment
    /// that covers the shortfall, in a single reallocation. The whole old backing region is carried
    /// over, including spare capacity past the written bytes.
    pub(crate) fn ensure(&mut self, additional: usize) -> Result<()> {
        let remaining = self.remaining_capacity();

        if remaining >= additional {
            return Ok(());
        }

        let old_capacity = self.storage.len();
        let increment = self.growth_increment.get();
        let factor = (additional - remaining).div_ceil(increment);

        let new_capacity = increment
            .checked_mul(factor)
            .and_then(|growth| old_capacity.checked_add(growth))
            .ok_or(Error::AllocationFailed { requested: usize::MAX })?;

        let mut storage = try_allocate(new_capacity)?;
        storage[..old_capacity].copy_from_slice(&self.storage);

        event!(
            Level::DEBUG,
            message = "grew buffer",
            requested = additional,
            old_capacity,
            new_capacity
        );

        self.storage = storage;

        Ok(())
    }

    /// The spare capacity of the buffer, starting right after the written bytes.
    pub(crate) fn unfilled_mut(&mut self) -> &mut [u8] {
        &mut self.storage[self.len..]
    }

    /// Marks `count` more bytes as written.
    ///
    /// The caller must have written them into [`unfilled_mut()`][Self::unfilled_mut] first.
    pub(crate) fn advance(&mut self, count: usize) {
        debug_assert!(count <= self.remaining_capacity());

        self.len += count;
    }
}

impl std::fmt::Debug for GrowableBuffer {
    #[cfg_attr(coverage_nightly, coverage(off))] // We have no API contract here.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("len", &self.len)
            .field("capacity", &self.storage.len())
            .field("growth_increment", &self.growth_increment)
            .field("encoding", &self.encoding)
            .finish()
    }
}

impl Default for GrowableBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<u8>> for GrowableBuffer {
    /// Takes over a `Vec<u8>` as the written contents of a new buffer.
    ///
    /// The capacity of the buffer equals the length of the vector, so the next write grows it.
    fn from(value: Vec<u8>) -> Self {
        Self {
            len: value.len(),
            storage: value,
            growth_increment: DEFAULT_GROWTH_INCREMENT,
            encoding: Encoding::default(),
        }
    }
}

impl From<&[u8]> for GrowableBuffer {
    fn from(value: &[u8]) -> Self {
        Self::from(value.to_vec())
    }
}

impl Extend<u8> for GrowableBuffer {
    /// Appends each byte of the iterator.
    ///
    /// # Panics
    ///
    /// Panics if the buffer cannot grow, like `Vec::extend()`.
    fn extend<T: IntoIterator<Item = u8>>(&mut self, iter: T) {
        let iter = iter.into_iter();
        self.reserve_for_extend(iter.size_hint().0);

        for byte in iter {
            if self.remaining_capacity() == 0 {
                self.reserve_for_extend(1);
            }

            self.unfilled_mut()[0] = byte;
            self.advance(1);
        }
    }
}

impl GrowableBuffer {
    fn reserve_for_extend(&mut self, additional: usize) {
        self.ensure(additional).expect("buffer capacity overflow while extending");
    }
}

impl<'a> Extend<&'a u8> for GrowableBuffer {
    fn extend<T: IntoIterator<Item = &'a u8>>(&mut self, iter: T) {
        self.extend(iter.into_iter().copied());
    }
}

/// Allocates a zeroed region, reporting failure instead of aborting.
fn try_allocate(capacity: usize) -> Result<Vec<u8>> {
    let mut storage = Vec::new();

    if storage.try_reserve_exact(capacity).is_err() {
        return Err(Error::AllocationFailed { requested: capacity });
    }

    storage.resize(capacity, 0);

    Ok(storage)
}

/// Resolves an index that may count back from the end of `len` written bytes.
fn resolve_index(index: isize, len: usize) -> usize {
    if index >= 0 {
        index.unsigned_abs()
    } else {
        len.saturating_sub(index.unsigned_abs())
    }
}

fn isize_le_usize(value: isize, bound: usize) -> bool {
    value < 0 || value.unsigned_abs() <= bound
}
