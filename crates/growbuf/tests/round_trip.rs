// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![expect(missing_docs, reason = "Test code")]

// Writes values and reads them back with independent decoders.

use growbuf::{ByteOrder, Error, GrowableBuffer, RangeCheck};
use new_zealand::nz;
use rstest::rstest;

fn read_uint(bytes: &[u8], order: ByteOrder) -> i64 {
    let mut padded = [0_u8; 8];

    match order {
        ByteOrder::Little => {
            padded[..bytes.len()].copy_from_slice(bytes);
            i64::from_le_bytes(padded)
        }
        ByteOrder::Big => {
            padded[8 - bytes.len()..].copy_from_slice(bytes);
            i64::from_be_bytes(padded)
        }
    }
}

fn read_int(bytes: &[u8], order: ByteOrder) -> i64 {
    let unused_bits = 64 - 8 * bytes.len();

    // Shift the value to the top and back to sign-extend it.
    (read_uint(bytes, order) << unused_bits) >> unused_bits
}

#[rstest]
#[case::u8_zero(0, 1)]
#[case::u8_max(255, 1)]
#[case::u16(0xBEEF, 2)]
#[case::u24(0x00AB_CDEF, 3)]
#[case::u32_max(0xFFFF_FFFF, 4)]
#[case::u40(0x12_3456_789A, 5)]
#[case::u48_max((1 << 48) - 1, 6)]
fn unsigned_round_trip(#[case] value: i64, #[case] byte_length: usize, #[values(ByteOrder::Little, ByteOrder::Big)] order: ByteOrder) {
    let mut buf = GrowableBuffer::new();

    buf.write_uint(value, byte_length, order, RangeCheck::Enforce).unwrap();

    assert_eq!(buf.size(), byte_length);
    assert_eq!(read_uint(buf.join(), order), value);
}

#[rstest]
#[case::i8_min(-128, 1)]
#[case::i8_max(127, 1)]
#[case::i16_negative(-12_345, 2)]
#[case::i24_min(-(1 << 23), 3)]
#[case::i32_min(i64::from(i32::MIN), 4)]
#[case::i40(-0x12_3456_789A, 5)]
#[case::i48_max((1 << 47) - 1, 6)]
#[case::minus_one(-1, 6)]
fn signed_round_trip(#[case] value: i64, #[case] byte_length: usize, #[values(ByteOrder::Little, ByteOrder::Big)] order: ByteOrder) {
    let mut buf = GrowableBuffer::new();

    buf.write_int(value, byte_length, order, RangeCheck::Enforce).unwrap();

    assert_eq!(buf.size(), byte_length);
    assert_eq!(read_int(buf.join(), order), value);
}

#[test]
fn named_integer_writes_match_std_encoding() {
    let mut buf = GrowableBuffer::new();

    buf.write_u16_le(0xA1B2)
        .unwrap()
        .write_u16_be(0xA1B2)
        .unwrap()
        .write_u32_le(0x0102_0304)
        .unwrap()
        .write_u32_be(0x0102_0304)
        .unwrap()
        .write_i16_le(-2)
        .unwrap()
        .write_i16_be(-2)
        .unwrap()
        .write_i32_le(-70_000)
        .unwrap()
        .write_i32_be(-70_000)
        .unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(&0xA1B2_u16.to_le_bytes());
    expected.extend_from_slice(&0xA1B2_u16.to_be_bytes());
    expected.extend_from_slice(&0x0102_0304_u32.to_le_bytes());
    expected.extend_from_slice(&0x0102_0304_u32.to_be_bytes());
    expected.extend_from_slice(&(-2_i16).to_le_bytes());
    expected.extend_from_slice(&(-2_i16).to_be_bytes());
    expected.extend_from_slice(&(-70_000_i32).to_le_bytes());
    expected.extend_from_slice(&(-70_000_i32).to_be_bytes());

    assert_eq!(buf.join(), &expected[..]);
}

#[rstest]
#[case::zero(0.0)]
#[case::negative_zero(-0.0)]
#[case::one_third(1.0 / 3.0)]
#[case::tiny(f64::MIN_POSITIVE)]
#[case::huge(f64::MAX)]
#[case::infinity(f64::NEG_INFINITY)]
fn double_round_trip_is_bit_identical(#[case] value: f64) {
    let mut buf = GrowableBuffer::new();

    buf.write_f64_le(value).unwrap().write_f64_be(value).unwrap();

    let (le, be) = buf.join().split_at(8);
    assert_eq!(f64::from_le_bytes(le.try_into().unwrap()).to_bits(), value.to_bits());
    assert_eq!(f64::from_be_bytes(be.try_into().unwrap()).to_bits(), value.to_bits());
}

#[rstest]
#[case::zero(0.0)]
#[case::pi(std::f32::consts::PI)]
#[case::max(f32::MAX)]
#[case::min_positive(f32::MIN_POSITIVE)]
#[case::negative(-1234.5)]
fn float_round_trip_is_bit_identical(#[case] value: f32) {
    let mut buf = GrowableBuffer::new();

    buf.write_f32_le(f64::from(value)).unwrap().write_f32_be(f64::from(value)).unwrap();

    let (le, be) = buf.join().split_at(4);
    assert_eq!(f32::from_le_bytes(le.try_into().unwrap()).to_bits(), value.to_bits());
    assert_eq!(f32::from_be_bytes(be.try_into().unwrap()).to_bits(), value.to_bits());
}

#[test]
fn nan_survives_round_trip() {
    let mut buf = GrowableBuffer::new();

    buf.write_f64_be(f64::NAN).unwrap().write_f32_le(f64::NAN).unwrap();

    assert!(f64::from_be_bytes(buf.join()[..8].try_into().unwrap()).is_nan());
    assert!(f32::from_le_bytes(buf.join()[8..].try_into().unwrap()).is_nan());
}

#[rstest]
#[case::u8(1, 256)]
#[case::u16(2, 65_536)]
#[case::u32(4, 1 << 32)]
#[case::negative(3, -1)]
fn unsigned_out_of_range_leaves_buffer_unchanged(#[case] byte_length: usize, #[case] value: i64) {
    let mut buf = GrowableBuffer::with_capacity(0, nz!(16));
    buf.write(b"kept").unwrap();

    let error = buf.write_uint(value, byte_length, ByteOrder::Big, RangeCheck::Enforce).unwrap_err();

    assert!(matches!(error, Error::OutOfRange { value: v, .. } if v == value));
    assert_eq!(buf.join(), b"kept");
    assert_eq!(buf.capacity(), 16);
}

#[test]
fn sequence_of_writes_accumulates_in_order() {
    let mut buf = GrowableBuffer::with_capacity(3, nz!(5));
    let mut expected: Vec<u8> = Vec::new();

    for i in 0..200_u8 {
        match i % 5 {
            0 => {
                buf.write_u8(i64::from(i)).unwrap();
                expected.push(i);
            }
            1 => {
                buf.write_u32_be(i64::from(i) * 1000).unwrap();
                expected.extend_from_slice(&(u32::from(i) * 1000).to_be_bytes());
            }
            2 => {
                buf.write_cstring(Some("row")).unwrap();
                expected.extend_from_slice(b"row\0");
            }
            3 => {
                buf.write_f64_le(f64::from(i)).unwrap();
                expected.extend_from_slice(&f64::from(i).to_le_bytes());
            }
            _ => {
                let chunk = vec![i; usize::from(i % 17)];
                buf.write(&chunk).unwrap();
                expected.extend_from_slice(&chunk);
            }
        }

        assert_eq!(buf.size(), expected.len());
        assert!(buf.capacity() >= buf.size());
    }

    assert_eq!(buf.join(), &expected[..]);
    assert_eq!(buf.flush(), expected);
    assert!(buf.join().is_empty());
}
