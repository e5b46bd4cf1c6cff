// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::num::NonZero;

use crate::{DEFAULT_GROWTH_INCREMENT, DEFAULT_INITIAL_CAPACITY};

/// Configuration used to construct a [`GrowableBuffer`][crate::GrowableBuffer].
///
/// # Examples
///
/// ```
/// use growbuf::{BufferOptions, Encoding, GrowableBuffer};
/// use new_zealand::nz;
///
/// let options = BufferOptions::new()
///     .with_initial_capacity(64)
///     .with_growth_increment(nz!(256))
///     .with_encoding(Encoding::Latin1);
///
/// let buf = GrowableBuffer::with_options(options);
/// assert_eq!(buf.capacity(), 64);
/// assert_eq!(buf.growth_increment().get(), 256);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferOptions {
    pub(crate) initial_capacity: usize,
    pub(crate) growth_increment: NonZero<usize>,
    pub(crate) encoding: Encoding,
}

impl BufferOptions {
    /// Creates options with the default initial capacity, growth increment and UTF-8 encoding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the capacity the buffer starts with.
    ///
    /// A capacity of zero is allowed; the first non-empty write will then grow the buffer.
    #[must_use]
    pub fn with_initial_capacity(self, initial_capacity: usize) -> Self {
        Self { initial_capacity, ..self }
    }

    /// Sets the minimum number of bytes by which the buffer grows when it runs out of capacity.
    #[must_use]
    pub fn with_growth_increment(self, growth_increment: NonZero<usize>) -> Self {
        Self { growth_increment, ..self }
    }

    /// Sets the text encoding used by text writes that do not name an encoding explicitly.
    #[must_use]
    pub fn with_encoding(self, encoding: Encoding) -> Self {
        Self { encoding, ..self }
    }

    /// The capacity the buffer starts with.
    #[must_use]
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// The minimum number of bytes by which the buffer grows.
    #[must_use]
    pub fn growth_increment(&self) -> NonZero<usize> {
        self.growth_increment
    }

    /// The default text encoding.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            growth_increment: DEFAULT_GROWTH_INCREMENT,
            encoding: Encoding::default(),
        }
    }
}

/// The order in which the bytes of a multi-byte number are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least significant byte first.
    Little,
    /// Most significant byte first, also known as network byte order.
    Big,
}

/// Whether a numeric write validates that its value fits the target representation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RangeCheck {
    /// Values that do not fit are rejected with [`Error::OutOfRange`][crate::Error::OutOfRange]
    /// or [`Error::FloatOutOfRange`][crate::Error::FloatOutOfRange] and nothing is written.
    #[default]
    Enforce,

    /// Values are written without validation.
    ///
    /// Integers that do not fit are wrapped: the low bytes of the value's 64-bit two's-complement
    /// representation are written, which is the value modulo `2^(8 * width)`. For example, writing
    /// `256` as a `u8` writes `0x00` and writing `-1` as a `u16` writes `0xFF 0xFF`.
    ///
    /// Single-precision floats are converted with an `as` cast, so finite values too large for
    /// `f32` are written as positive or negative infinity.
    ///
    /// The width itself is still validated: an unsupported byte length is always rejected.
    Skip,
}

/// A text encoding used to turn strings into bytes.
///
/// The set of encodings matches what binary protocol clients commonly need when talking to
/// servers that predate UTF-8 everywhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Encoding {
    /// UTF-8.
    #[default]
    Utf8,

    /// UTF-16 code units in little-endian byte order (also known as UCS-2).
    Utf16Le,

    /// One byte per character, keeping the low 8 bits of each code point (also known as "binary").
    Latin1,

    /// One byte per character, keeping the low 8 bits of each code point.
    ///
    /// Encoding is identical to [`Latin1`][Self::Latin1]; code points above `0x7F` are not
    /// masked down to seven bits.
    Ascii,

    /// The text is a sequence of hexadecimal digit pairs, each decoded into one byte.
    ///
    /// Decoding stops at the first pair that is not valid hexadecimal. A trailing unpaired digit is
    /// ignored.
    Hex,

    /// The text is base64, in either the standard or the URL-safe alphabet, with optional padding.
    ///
    /// Characters outside both alphabets, whitespace included, are skipped. Decoding stops at the
    /// first padding character.
    Base64,
}

impl Encoding {
    /// Parses a conventional encoding label, ignoring ASCII case.
    ///
    /// Returns `None` if the label is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::Encoding;
    ///
    /// assert_eq!(Encoding::from_label("UTF-8"), Some(Encoding::Utf8));
    /// assert_eq!(Encoding::from_label("ucs2"), Some(Encoding::Utf16Le));
    /// assert_eq!(Encoding::from_label("binary"), Some(Encoding::Latin1));
    /// assert_eq!(Encoding::from_label("ebcdic"), None);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.to_ascii_lowercase();

        match label.as_str() {
            "utf8" | "utf-8" => Some(Self::Utf8),
            "ucs2" | "ucs-2" | "utf16le" | "utf-16le" => Some(Self::Utf16Le),
            "latin1" | "binary" => Some(Self::Latin1),
            "ascii" => Some(Self::Ascii),
            "hex" => Some(Self::Hex),
            "base64" | "base64url" => Some(Self::Base64),
            _ => None,
        }
    }

    /// The canonical label of the encoding, accepted by [`from_label()`][Self::from_label].
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Utf16Le => "utf16le",
            Self::Latin1 => "latin1",
            Self::Ascii => "ascii",
            Self::Hex => "hex",
            Self::Base64 => "base64",
        }
    }
}
