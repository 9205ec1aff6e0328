//! Fixed-offset big-endian field access.
//!
//! Every read returns `None` when the field would run past the end of the
//! buffer, so callers can chain them with `?` instead of checking lengths
//! up front.

#[inline]
pub fn read_u8(buf: &[u8], offset: usize) -> Option<u8> {
    buf.get(offset).copied()
}

#[inline]
pub fn read_u16_be(buf: &[u8], offset: usize) -> Option<u16> {
    let end = offset.checked_add(2)?;
    let bytes = buf.get(offset..end)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

#[inline]
pub fn read_u32_be(buf: &[u8], offset: usize) -> Option<u32> {
    let end = offset.checked_add(4)?;
    let bytes = buf.get(offset..end)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Borrow `len` bytes starting at `offset`.
#[inline]
pub fn slice_at(buf: &[u8], offset: usize, len: usize) -> Option<&[u8]> {
    let end = offset.checked_add(len)?;
    buf.get(offset..end)
}

/// Smallest multiple of `2^exp` that is `>= value`.
///
/// OpenFlow pads `ofp_match` to 8-byte alignment, i.e. `exp = 3`.
#[inline]
pub fn round_up_pow2(value: usize, exp: u32) -> usize {
    let mask = (1usize << exp) - 1;
    (value + mask) & !mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_reads_big_endian() {
        let buf = [0x04, 0x0a, 0x00, 0x60, 0xde, 0xad, 0xbe, 0xef];
        assert_eq!(read_u8(&buf, 1), Some(0x0a));
        assert_eq!(read_u16_be(&buf, 2), Some(0x0060));
        assert_eq!(read_u32_be(&buf, 4), Some(0xdead_beef));
    }

    #[rstest]
    #[case::u8_past_end(8, 1)]
    #[case::u16_straddles_end(7, 2)]
    #[case::u32_straddles_end(5, 4)]
    fn test_reads_past_end_fail(#[case] offset: usize, #[case] width: usize) {
        let buf = [0u8; 8];
        let actual = match width {
            1 => read_u8(&buf, offset).map(u32::from),
            2 => read_u16_be(&buf, offset).map(u32::from),
            _ => read_u32_be(&buf, offset),
        };
        assert_eq!(actual, None);
    }

    #[test]
    fn test_slice_at() {
        let buf = [1u8, 2, 3, 4];
        assert_eq!(slice_at(&buf, 1, 2), Some(&buf[1..3]));
        assert_eq!(slice_at(&buf, 3, 2), None);
        assert_eq!(slice_at(&buf, usize::MAX, 2), None);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 8)]
    #[case(4, 8)]
    #[case(8, 8)]
    #[case(9, 16)]
    #[case(22, 24)]
    fn test_round_up_to_eight(#[case] value: usize, #[case] expected: usize) {
        assert_eq!(round_up_pow2(value, 3), expected);
    }

    #[test]
    fn test_round_up_other_exponents() {
        assert_eq!(round_up_pow2(5, 0), 5);
        assert_eq!(round_up_pow2(5, 1), 6);
        assert_eq!(round_up_pow2(17, 4), 32);
    }
}
