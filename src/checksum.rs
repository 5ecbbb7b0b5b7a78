//! Checksum algorithms.
//!
//! The Amiga filesystem uses two deliberately different algorithms: the
//! standard checksum (a two's-complement negated word sum, used by every
//! block that carries one) and the boot block checksum (a ones'-complement
//! sum with end-around carry over both boot sectors). They are not
//! interchangeable.

use crate::constants::{BB_CHECKSUM, BOOT_BLOCK_SIZE, BSIZE};

/// Compute the standard checksum of a sector.
///
/// Sums all 128 big-endian longwords with 32-bit wraparound, treating the
/// word at `checksum_offset` as zero, and returns the two's-complement
/// negation of the sum. The caller's buffer is never modified. The bitmap
/// block stores its checksum at offset 0 rather than 0x14; callers must
/// pass the offset that matches the block type.
pub fn standard_sum(buf: &[u8; BSIZE], checksum_offset: usize) -> u32 {
    debug_assert!(
        checksum_offset.is_multiple_of(4),
        "checksum offset must be longword aligned"
    );

    let checksum_word = checksum_offset / 4;
    let mut sum: u32 = 0;

    for i in 0..BSIZE / 4 {
        if i != checksum_word {
            sum = sum.wrapping_add(read_u32_be(buf, i * 4));
        }
    }

    sum.wrapping_neg()
}

/// Verify a sector's standard checksum against its stored value.
pub fn check_standard(buf: &[u8; BSIZE], checksum_offset: usize) -> bool {
    read_u32_be(buf, checksum_offset) == standard_sum(buf, checksum_offset)
}

/// Compute the boot block checksum over both boot sectors.
///
/// Sums all 256 longwords of the 1024-byte boot block with end-around
/// carry, treating the checksum field as zero, and returns the bitwise
/// complement of the sum (ones'-complement negation, not two's-complement).
pub fn boot_sum(buf: &[u8; BOOT_BLOCK_SIZE]) -> u32 {
    let mut sum: u32 = 0;

    for i in 0..BOOT_BLOCK_SIZE / 4 {
        if i == BB_CHECKSUM / 4 {
            continue;
        }
        let word = read_u32_be_slice(buf, i * 4);
        let next = sum.wrapping_add(word);
        sum = next.wrapping_add((next < sum) as u32);
    }

    !sum
}

/// Verify the boot block checksum against its stored value.
pub fn check_boot(buf: &[u8; BOOT_BLOCK_SIZE]) -> bool {
    read_u32_be_slice(buf, BB_CHECKSUM) == boot_sum(buf)
}

/// Read a big-endian u32 from a sector.
#[inline]
pub(crate) const fn read_u32_be(buf: &[u8; BSIZE], offset: usize) -> u32 {
    read_u32_be_slice(buf, offset)
}

/// Read a big-endian u32 from a byte slice.
#[inline]
pub(crate) const fn read_u32_be_slice(buf: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

/// Read a big-endian i32 from a sector.
#[inline]
pub(crate) const fn read_i32_be(buf: &[u8; BSIZE], offset: usize) -> i32 {
    read_u32_be(buf, offset) as i32
}
