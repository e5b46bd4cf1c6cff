// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! We separate out the write functions for ease of maintenance.

use std::fmt::Display;

use num_traits::ToBytes;
use tracing::{Level, event};

use crate::{ByteOrder, Encoding, Error, GrowableBuffer, MAX_INT_BYTE_LENGTH, RangeCheck, Result};

impl GrowableBuffer {
    /// Appends raw bytes to the buffer.
    ///
    /// Accepts anything that can be viewed as a byte slice: slices, arrays, `Vec<u8>` and so on.
    ///
    /// # Example
    ///
    /// ```
    /// use growbuf::GrowableBuffer;
    ///
    /// # fn main() -> growbuf::Result<()> {
    /// let mut buf = GrowableBuffer::new();
    ///
    /// buf.write(b"Hello, ")?.write(vec![b'w', b'o'])?.write([b'r', b'l', b'd'])?;
    ///
    /// assert_eq!(buf.join(), b"Hello, world");
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the buffer cannot grow to fit the data.
    pub fn write(&mut self, data: impl AsRef<[u8]>) -> Result<&mut Self> {
        self.put_slice(data.as_ref())
    }

    /// Appends text under the buffer's default [encoding][Self::encoding].
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the buffer cannot grow to fit the encoded text.
    pub fn write_str(&mut self, text: &str) -> Result<&mut Self> {
        self.write_str_with(text, self.encoding())
    }

    /// Appends text under the given encoding.
    ///
    /// # Example
    ///
    /// ```
    /// use growbuf::{Encoding, GrowableBuffer};
    ///
    /// # fn main() -> growbuf::Result<()> {
    /// let mut buf = GrowableBuffer::new();
    ///
    /// buf.write_str_with("hi", Encoding::Utf16Le)?;
    /// buf.write_str_with("cafe", Encoding::Hex)?;
    ///
    /// assert_eq!(buf.join(), &[b'h', 0, b'i', 0, 0xCA, 0xFE]);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the buffer cannot grow to fit the encoded text.
    pub fn write_str_with(&mut self, text: &str, encoding: Encoding) -> Result<&mut Self> {
        let encoded = encoding.encode(text);
        self.put_slice(&encoded)
    }

    /// Appends the textual representation of a value under the buffer's default encoding.
    ///
    /// ```
    /// use growbuf::GrowableBuffer;
    ///
    /// # fn main() -> growbuf::Result<()> {
    /// let mut buf = GrowableBuffer::new();
    /// buf.write_display(42)?.write_display(true)?;
    ///
    /// assert_eq!(buf.join(), b"42true");
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the buffer cannot grow to fit the encoded text.
    pub fn write_display(&mut self, value: impl Display) -> Result<&mut Self> {
        self.write_str(&value.to_string())
    }

    /// Appends null-terminated text under the buffer's default encoding.
    ///
    /// `None` and the empty string both write just the `0x00` terminator.
    ///
    /// # Example
    ///
    /// ```
    /// use growbuf::GrowableBuffer;
    ///
    /// # fn main() -> growbuf::Result<()> {
    /// let mut buf = GrowableBuffer::new();
    ///
    /// buf.write_cstring(Some("abc"))?.write_cstring(None)?;
    ///
    /// assert_eq!(buf.join(), &[0x61, 0x62, 0x63, 0x00, 0x00]);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the buffer cannot grow to fit the encoded text and
    /// its terminator.
    pub fn write_cstring(&mut self, text: Option<&str>) -> Result<&mut Self> {
        self.write_cstring_with(text, self.encoding())
    }

    /// Appends null-terminated text under the given encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the buffer cannot grow to fit the encoded text and
    /// its terminator.
    pub fn write_cstring_with(&mut self, text: Option<&str>, encoding: Encoding) -> Result<&mut Self> {
        let encoded = encoding.encode(text.unwrap_or_default());
        self.put_terminated(&encoded)
    }

    /// Appends raw bytes followed by a `0x00` terminator.
    ///
    /// The bytes are written as-is; an embedded `0x00` is not escaped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the buffer cannot grow to fit the bytes and their
    /// terminator.
    pub fn write_cstring_bytes(&mut self, data: impl AsRef<[u8]>) -> Result<&mut Self> {
        self.put_terminated(data.as_ref())
    }

    /// Appends exactly one byte: the first byte of `c` under the buffer's default encoding.
    ///
    /// Characters that take more than one byte in that encoding are cut down to their first byte,
    /// e.g. `'é'` in UTF-8 writes `0xC3`. Under [`Encoding::Hex`] and [`Encoding::Base64`], which
    /// cannot represent a lone character, the character is taken as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the buffer cannot grow by one byte.
    pub fn write_char(&mut self, c: char) -> Result<&mut Self> {
        let byte = self.encoding().first_byte(c);
        self.put_slice(&[byte])
    }

    /// Appends an unsigned integer of `byte_length` bytes in the given byte order.
    ///
    /// This is the general form of the unsigned integer writes; `byte_length` may be 1 to
    /// [`MAX_INT_BYTE_LENGTH`] bytes.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidByteLength`] if `byte_length` is not supported, regardless of `check`.
    /// * [`Error::OutOfRange`] if `check` is [`RangeCheck::Enforce`] and `value` is negative or
    ///   does not fit in `byte_length` bytes.
    /// * [`Error::AllocationFailed`] if the buffer cannot grow to fit the integer.
    pub fn write_uint(&mut self, value: i64, byte_length: usize, order: ByteOrder, check: RangeCheck) -> Result<&mut Self> {
        self.put_int(value, byte_length, order, check, Signedness::Unsigned)
    }

    /// Appends a two's-complement signed integer of `byte_length` bytes in the given byte order.
    ///
    /// This is the general form of the signed integer writes; `byte_length` may be 1 to
    /// [`MAX_INT_BYTE_LENGTH`] bytes.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidByteLength`] if `byte_length` is not supported, regardless of `check`.
    /// * [`Error::OutOfRange`] if `check` is [`RangeCheck::Enforce`] and `value` does not fit in
    ///   `byte_length` bytes.
    /// * [`Error::AllocationFailed`] if the buffer cannot grow to fit the integer.
    pub fn write_int(&mut self, value: i64, byte_length: usize, order: ByteOrder, check: RangeCheck) -> Result<&mut Self> {
        self.put_int(value, byte_length, order, check, Signedness::Signed)
    }

    /// Appends a single-precision float in the given byte order.
    ///
    /// The value is taken as `f64` so that it can be validated: with [`RangeCheck::Enforce`], a
    /// finite value whose magnitude exceeds `f32::MAX` is rejected. Infinities and NaN are always
    /// accepted. Values are otherwise rounded to the nearest `f32`.
    ///
    /// # Errors
    ///
    /// * [`Error::FloatOutOfRange`] if `check` is [`RangeCheck::Enforce`] and `value` is finite but
    ///   too large in magnitude.
    /// * [`Error::AllocationFailed`] if the buffer cannot grow to fit the float.
    pub fn write_f32(&mut self, value: f64, order: ByteOrder, check: RangeCheck) -> Result<&mut Self> {
        if check == RangeCheck::Enforce && value.is_finite() && value.abs() > f64::from(f32::MAX) {
            event!(Level::TRACE, message = "rejected out-of-range float", value);
            return Err(Error::FloatOutOfRange { value });
        }

        #[expect(clippy::cast_possible_truncation, reason = "rounding to single precision is the point")]
        let value = value as f32;

        self.put_num(value, order)
    }

    /// Appends a double-precision float in the given byte order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the buffer cannot grow to fit the float.
    pub fn write_f64(&mut self, value: f64, order: ByteOrder) -> Result<&mut Self> {
        self.put_num(value, order)
    }

    /// Appends a single-precision float, least significant byte first.
    ///
    /// # Errors
    ///
    /// See [`write_f32()`][Self::write_f32].
    pub fn write_f32_le(&mut self, value: f64) -> Result<&mut Self> {
        self.write_f32(value, ByteOrder::Little, RangeCheck::Enforce)
    }

    /// Appends a single-precision float, most significant byte first.
    ///
    /// # Errors
    ///
    /// See [`write_f32()`][Self::write_f32].
    pub fn write_f32_be(&mut self, value: f64) -> Result<&mut Self> {
        self.write_f32(value, ByteOrder::Big, RangeCheck::Enforce)
    }

    /// Appends a double-precision float, least significant byte first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the buffer cannot grow to fit the float.
    pub fn write_f64_le(&mut self, value: f64) -> Result<&mut Self> {
        self.write_f64(value, ByteOrder::Little)
    }

    /// Appends a double-precision float, most significant byte first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the buffer cannot grow to fit the float.
    pub fn write_f64_be(&mut self, value: f64) -> Result<&mut Self> {
        self.write_f64(value, ByteOrder::Big)
    }

    pub(crate) fn put_slice(&mut self, src: &[u8]) -> Result<&mut Self> {
        self.ensure(src.len())?;

        self.unfilled_mut()[..src.len()].copy_from_slice(src);
        self.advance(src.len());

        Ok(self)
    }

    fn put_terminated(&mut self, content: &[u8]) -> Result<&mut Self> {
        let total = content
            .len()
            .checked_add(1)
            .ok_or(Error::AllocationFailed { requested: usize::MAX })?;

        // One reservation for content and terminator, so a failure writes neither.
        self.ensure(total)?;

        self.put_slice(content)?;
        self.put_slice(&[0])
    }

    #[expect(clippy::needless_pass_by_value, reason = "tiny numeric types, fine to always pass by value")]
    fn put_num<T: ToBytes>(&mut self, value: T, order: ByteOrder) -> Result<&mut Self> {
        let bytes = match order {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        };

        self.put_slice(bytes.as_ref())
    }

    fn put_int(
        &mut self,
        value: i64,
        byte_length: usize,
        order: ByteOrder,
        check: RangeCheck,
        signedness: Signedness,
    ) -> Result<&mut Self> {
        if !(1..=MAX_INT_BYTE_LENGTH).contains(&byte_length) {
            return Err(Error::InvalidByteLength(byte_length));
        }

        if check == RangeCheck::Enforce {
            let (min, max) = signedness.bounds(byte_length);

            if !(min..=max).contains(&value) {
                event!(Level::TRACE, message = "rejected out-of-range integer", value, min, max);
                return Err(Error::OutOfRange { value, min, max });
            }
        }

        // Reinterpreting as two's complement and keeping the low bytes wraps out-of-range values.
        #[expect(clippy::cast_sign_loss, reason = "two's complement reinterpretation is intended")]
        let bits = value as u64;

        match order {
            ByteOrder::Little => self.put_slice(&bits.to_le_bytes()[..byte_length]),
            ByteOrder::Big => self.put_slice(&bits.to_be_bytes()[size_of::<u64>() - byte_length..]),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Signedness {
    Unsigned,
    Signed,
}

impl Signedness {
    /// Inclusive range of values that fit in `byte_length` bytes (at most 6, so no overflow).
    fn bounds(self, byte_length: usize) -> (i64, i64) {
        let bits = byte_length * 8;

        match self {
            Self::Unsigned => (0, (1_i64 << bits) - 1),
            Self::Signed => (-(1_i64 << (bits - 1)), (1_i64 << (bits - 1)) - 1),
        }
    }
}

/// Generates the fixed-width integer writes, each in a validating and a wrapping flavor.
macro_rules! fixed_width_int_writes {
    ($($write:ident, $write_wrapping:ident => $general:ident, $byte_length:literal, $order:ident, $desc:literal;)*) => {
        impl GrowableBuffer {
            $(
                #[doc = concat!("Appends ", $desc, ".")]
                ///
                /// # Errors
                ///
                /// * [`Error::OutOfRange`] if `value` does not fit.
                /// * [`Error::AllocationFailed`] if the buffer cannot grow to fit the integer.
                pub fn $write(&mut self, value: i64) -> Result<&mut Self> {
                    self.$general(value, $byte_length, ByteOrder::$order, RangeCheck::Enforce)
                }

                #[doc = concat!("Appends ", $desc, ", wrapping `value` if it does not fit.")]
                ///
                /// See [`RangeCheck::Skip`] for how out-of-range values are written.
                ///
                /// # Errors
                ///
                /// Returns [`Error::AllocationFailed`] if the buffer cannot grow to fit the integer.
                pub fn $write_wrapping(&mut self, value: i64) -> Result<&mut Self> {
                    self.$general(value, $byte_length, ByteOrder::$order, RangeCheck::Skip)
                }
            )*
        }
    };
}

fixed_width_int_writes! {
    write_u8, write_u8_wrapping => write_uint, 1, Little, "an unsigned 8-bit integer";
    write_u16_le, write_u16_le_wrapping => write_uint, 2, Little, "an unsigned 16-bit integer, least significant byte first";
    write_u16_be, write_u16_be_wrapping => write_uint, 2, Big, "an unsigned 16-bit integer, most significant byte first";
    write_u32_le, write_u32_le_wrapping => write_uint, 4, Little, "an unsigned 32-bit integer, least significant byte first";
    write_u32_be, write_u32_be_wrapping => write_uint, 4, Big, "an unsigned 32-bit integer, most significant byte first";
    write_i8, write_i8_wrapping => write_int, 1, Little, "a signed 8-bit integer";
    write_i16_le, write_i16_le_wrapping => write_int, 2, Little, "a signed 16-bit integer, least significant byte first";
    write_i16_be, write_i16_be_wrapping => write_int, 2, Big, "a signed 16-bit integer, most significant byte first";
    write_i32_le, write_i32_le_wrapping => write_int, 4, Little, "a signed 32-bit integer, least significant byte first";
    write_i32_be, write_i32_be_wrapping => write_int, 4, Big, "a signed 32-bit integer, most significant byte first";
}

/// Generates the variable-width integer writes for one byte order and signedness.
macro_rules! variable_width_int_writes {
    ($($write:ident, $write_wrapping:ident => $general:ident, $order:ident, $desc:literal;)*) => {
        impl GrowableBuffer {
            $(
                #[doc = concat!("Appends ", $desc, " of `byte_length` bytes (1 to 6).")]
                ///
                /// # Errors
                ///
                /// * [`Error::InvalidByteLength`] if `byte_length` is not supported.
                /// * [`Error::OutOfRange`] if `value` does not fit in `byte_length` bytes.
                /// * [`Error::AllocationFailed`] if the buffer cannot grow to fit the integer.
                pub fn $write(&mut self, value: i64, byte_length: usize) -> Result<&mut Self> {
                    self.$general(value, byte_length, ByteOrder::$order, RangeCheck::Enforce)
                }

                #[doc = concat!("Appends ", $desc, " of `byte_length` bytes (1 to 6), wrapping `value` if it does not fit.")]
                ///
                /// See [`RangeCheck::Skip`] for how out-of-range values are written.
                ///
                /// # Errors
                ///
                /// * [`Error::InvalidByteLength`] if `byte_length` is not supported.
                /// * [`Error::AllocationFailed`] if the buffer cannot grow to fit the integer.
                pub fn $write_wrapping(&mut self, value: i64, byte_length: usize) -> Result<&mut Self> {
                    self.$general(value, byte_length, ByteOrder::$order, RangeCheck::Skip)
                }
            )*
        }
    };
}

variable_width_int_writes! {
    write_uint_le, write_uint_le_wrapping => write_uint, Little, "an unsigned integer, least significant byte first,";
    write_uint_be, write_uint_be_wrapping => write_uint, Big, "an unsigned integer, most significant byte first,";
    write_int_le, write_int_le_wrapping => write_int, Little, "a signed integer, least significant byte first,";
    write_int_be, write_int_be_wrapping => write_int, Big, "a signed integer, most significant byte first,";
}
