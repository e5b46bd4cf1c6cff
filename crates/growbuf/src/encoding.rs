// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Conversion of text into bytes under each supported [`Encoding`].

use std::borrow::Cow;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::Encoding;

// Symbols are normalized to the standard alphabet and padding is stripped before decoding, so the
// engine only needs to tolerate missing padding and non-zero trailing bits.
const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

impl Encoding {
    /// Returns the number of bytes that `text` occupies when written under this encoding.
    ///
    /// # Examples
    ///
    /// ```
    /// use growbuf::Encoding;
    ///
    /// assert_eq!(Encoding::Utf8.encoded_len("héllo"), 6);
    /// assert_eq!(Encoding::Utf16Le.encoded_len("héllo"), 10);
    /// assert_eq!(Encoding::Latin1.encoded_len("héllo"), 5);
    /// assert_eq!(Encoding::Hex.encoded_len("cafe"), 2);
    /// assert_eq!(Encoding::Base64.encoded_len("aGk="), 2);
    /// ```
    #[must_use]
    pub fn encoded_len(self, text: &str) -> usize {
        match self {
            Self::Utf8 => text.len(),
            Self::Utf16Le => text.encode_utf16().count().saturating_mul(2),
            Self::Latin1 | Self::Ascii => text.chars().count(),
            Self::Hex => hex_pairs(text).count(),
            Self::Base64 => base64_decoded_len(base64_symbols(text).count()),
        }
    }

    /// Encodes `text` into bytes, borrowing when the text already has the right representation.
    pub(crate) fn encode(self, text: &str) -> Cow<'_, [u8]> {
        match self {
            Self::Utf8 => Cow::Borrowed(text.as_bytes()),
            Self::Utf16Le => Cow::Owned(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Self::Latin1 | Self::Ascii => Cow::Owned(text.chars().map(low_byte).collect()),
            Self::Hex => Cow::Owned(hex_pairs(text).collect()),
            Self::Base64 => Cow::Owned(decode_base64(text)),
        }
    }

    /// The first byte of `c` under this encoding.
    ///
    /// Binary-to-text encodings cannot represent a lone character, so for those the character is
    /// taken as UTF-8.
    pub(crate) fn first_byte(self, c: char) -> u8 {
        match self {
            Self::Utf8 | Self::Hex | Self::Base64 => {
                let mut scratch = [0_u8; 4];
                c.encode_utf8(&mut scratch);
                scratch[0]
            }
            Self::Utf16Le => {
                let mut scratch = [0_u16; 2];
                c.encode_utf16(&mut scratch);
                scratch[0].to_le_bytes()[0]
            }
            Self::Latin1 | Self::Ascii => low_byte(c),
        }
    }
}

#[expect(clippy::cast_possible_truncation, reason = "keeping only the low byte is the point")]
fn low_byte(c: char) -> u8 {
    u32::from(c) as u8
}

/// Decodes consecutive hex digit pairs, stopping at the first pair that is not valid.
fn hex_pairs(text: &str) -> impl Iterator<Item = u8> + '_ {
    text.as_bytes().chunks_exact(2).map_while(|pair| {
        let high = hex_digit(pair[0])?;
        let low = hex_digit(pair[1])?;
        Some((high << 4) | low)
    })
}

fn hex_digit(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

/// Yields the base64 symbols of `text` in the standard alphabet.
///
/// URL-safe symbols are mapped onto their standard counterparts and anything outside both
/// alphabets is skipped. The sequence ends at the first padding character.
fn base64_symbols(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().take_while(|&c| c != '=').filter_map(|c| match c {
        'A'..='Z' | 'a'..='z' | '0'..='9' | '+' | '/' => Some(c),
        '-' => Some('+'),
        '_' => Some('/'),
        _ => None,
    })
}

fn base64_decoded_len(symbols: usize) -> usize {
    // A lone trailing symbol carries fewer than 8 bits and decodes to nothing.
    let partial = match symbols % 4 {
        2 => 1,
        3 => 2,
        _ => 0,
    };

    symbols / 4 * 3 + partial
}

fn decode_base64(text: &str) -> Vec<u8> {
    let mut symbols: String = base64_symbols(text).collect();

    if symbols.len() % 4 == 1 {
        symbols.pop();
    }

    // Every remaining input is well-formed, so decoding cannot fail.
    BASE64_LENIENT.decode(symbols).unwrap_or_default()
}
