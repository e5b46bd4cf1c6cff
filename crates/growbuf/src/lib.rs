// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! A growable byte buffer for incrementally assembling binary messages.
//!
//! [`GrowableBuffer`] owns one contiguous region of memory and a cursor marking how many bytes of
//! that region have been written. Every write appends at the cursor, growing the region in blocks
//! of a configurable size whenever the remaining capacity is insufficient. This makes it suitable
//! for building wire-protocol messages whose final size is not known up front.
//!
//! # Writing data
//!
//! Write methods append data and return the buffer again, so calls can be chained with `?`:
//!
//! * [`write()`] appends raw bytes.
//! * [`write_str()`] and [`write_cstring()`] append text, the latter followed by a `0x00` terminator.
//! * [`write_u16_le()`], [`write_i32_be()`], [`write_uint_le()`] and friends append integers of a
//!   specific width and byte order.
//! * [`write_f32_le()`] and [`write_f64_be()`] append IEEE-754 floating point numbers.
//!
//! ```
//! use growbuf::GrowableBuffer;
//!
//! # fn main() -> growbuf::Result<()> {
//! let mut buf = GrowableBuffer::new();
//!
//! buf.write_u8(i64::from(b'Q'))?
//!     .write_i32_be(13)?
//!     .write_cstring(Some("SELECT 1"))?;
//!
//! assert_eq!(buf.join(), b"Q\x00\x00\x00\x0DSELECT 1\x00");
//! # Ok(())
//! # }
//! ```
//!
//! Integer writes validate that the value fits in the requested width. Callers that have already
//! validated their values can use the `_wrapping` variants, which wrap out-of-range values
//! instead of rejecting them (see [`RangeCheck::Skip`]).
//!
//! # Extracting data
//!
//! * [`join()`] exposes the written bytes without changing the buffer.
//! * [`flush()`] returns the written bytes and resets the buffer for reuse, keeping its capacity.
//! * [`slice_in_place()`] discards everything outside a window of the written bytes.
//!
//! ```
//! use growbuf::GrowableBuffer;
//!
//! # fn main() -> growbuf::Result<()> {
//! let mut buf = GrowableBuffer::new();
//! buf.write(b"header:payload")?;
//!
//! buf.slice_in_place(Some(7), None)?;
//! assert_eq!(buf.flush(), b"payload");
//! assert!(buf.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! [`write()`]: GrowableBuffer::write
//! [`write_str()`]: GrowableBuffer::write_str
//! [`write_cstring()`]: GrowableBuffer::write_cstring
//! [`write_u16_le()`]: GrowableBuffer::write_u16_le
//! [`write_i32_be()`]: GrowableBuffer::write_i32_be
//! [`write_uint_le()`]: GrowableBuffer::write_uint_le
//! [`write_f32_le()`]: GrowableBuffer::write_f32_le
//! [`write_f64_be()`]: GrowableBuffer::write_f64_be
//! [`join()`]: GrowableBuffer::join
//! [`flush()`]: GrowableBuffer::flush
//! [`slice_in_place()`]: GrowableBuffer::slice_in_place

use std::num::NonZero;

use new_zealand::nz;

mod buffer;
mod buffer_write;
#[cfg(feature = "bytes-compat")]
mod bytes_compat;
mod encoding;
mod error;
mod options;
mod write_adapter;

#[cfg(test)]
mod testing;

pub use buffer::GrowableBuffer;
pub use error::{Error, Result};
pub use options::{BufferOptions, ByteOrder, Encoding, RangeCheck};

/// Capacity of a buffer created without an explicit initial capacity.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// Growth increment of a buffer created without an explicit growth increment.
pub const DEFAULT_GROWTH_INCREMENT: NonZero<usize> = nz!(1024);

/// The widest integer, in bytes, accepted by the variable-width integer writes.
pub const MAX_INT_BYTE_LENGTH: usize = 6;
