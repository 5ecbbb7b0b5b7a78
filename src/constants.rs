//! On-disk constants for the Amiga filesystem.
//!
//! All offsets are relative to the start of a sector unless derived from
//! `BSIZE`, in which case the field sits at a fixed distance from the end.

/// Logical sector size in bytes.
pub const BSIZE: usize = 512;

/// Boot block size (sectors 0 and 1 together).
pub const BOOT_BLOCK_SIZE: usize = 2 * BSIZE;

/// Hash table slots per directory block: (512 / 4) - 0x38.
pub const HT_SIZE: usize = BSIZE / 4 - 0x38;

/// Data block pointers per file header or extension block.
///
/// The table occupies the same region as a directory's hash table.
pub const MAX_DATABLK: usize = HT_SIZE;

/// Maximum name length (volume label, directory or file name).
pub const MAX_NAME_LEN: usize = 30;

/// Root block of a standard 3.5" DD floppy.
///
/// Used when the boot block's root pointer field is zero.
pub const DEFAULT_ROOT_BLOCK: u32 = 880;

// Primary block types.
/// Header block (root, directory, file or link).
pub const T_HEADER: u32 = 0x02;
/// OFS data block.
pub const T_DATA: u32 = 0x08;
/// List block (file extension).
pub const T_LIST: u32 = 0x10;

// Secondary types. The field is signed on disk; comparisons here are
// unsigned 32-bit to avoid sign-extension pitfalls.
/// Root block.
pub const ST_ROOT: u32 = 0x01;
/// User directory.
pub const ST_USERDIR: u32 = 0x02;
/// Soft link.
pub const ST_SOFTLINK: u32 = 0x03;
/// Hard link to a directory.
pub const ST_LINKDIR: u32 = 0x04;
/// File header (-3 on disk).
pub const ST_FILE: u32 = 0xFFFF_FFFD;
/// Hard link to a file (-4 on disk).
pub const ST_LINKFILE: u32 = 0xFFFF_FFFC;

// Boot block offsets.
/// Filesystem type code (one byte, 0-5).
pub const BB_FS_TYPE: usize = 0x03;
/// Boot block checksum.
pub const BB_CHECKSUM: usize = 0x04;
/// Root block pointer.
pub const BB_ROOTBLOCK: usize = 0x08;

// Offsets shared by all header blocks.
/// Primary type.
pub const OFF_TYPE: usize = 0x00;
/// This block's own sector number.
pub const OFF_HEADER_KEY: usize = 0x04;
/// Populated entries in the data block table.
pub const OFF_HIGH_SEQ: usize = 0x08;
/// First OFS data block pointer.
pub const OFF_FIRST_DATA: usize = 0x10;
/// Standard checksum.
pub const OFF_CHKSUM: usize = 0x14;
/// Hash table (directories) or data block table (files).
pub const OFF_TABLE: usize = 0x18;
/// Secondary type.
pub const OFF_SEC_TYPE: usize = BSIZE - 0x04;
/// Name length byte.
pub const OFF_NAME_LEN: usize = BSIZE - 0x50;
/// Name bytes (Latin-1).
pub const OFF_NAME: usize = BSIZE - 0x4F;
/// Next entry in the same hash chain.
pub const OFF_HASH_CHAIN: usize = BSIZE - 0x10;
/// Parent directory block.
pub const OFF_PARENT: usize = BSIZE - 0x0C;
/// Extension block pointer.
pub const OFF_EXTENSION: usize = BSIZE - 0x08;
/// Modification date (days/mins/ticks).
pub const OFF_DAYS: usize = BSIZE - 0x5C;

// Root block offsets.
/// Bitmap valid flag.
pub const ROOT_BM_FLAG: usize = BSIZE - 0xC8;
/// Bitmap block pointer table.
pub const ROOT_BM_PAGES: usize = BSIZE - 0xC4;
/// Volume creation date (days/mins/ticks).
pub const ROOT_V_DAYS: usize = BSIZE - 0x28;

/// Bitmap page pointers held in the root block.
pub const BM_PAGES_ROOT_SIZE: usize = 25;

/// Bitmap block checksum offset.
///
/// Unlike every other block type, the bitmap checksum sits at the start
/// of the block.
pub const BM_CHECKSUM: usize = 0x00;

// File header / OFS data block offsets.
/// Declared file size in bytes.
pub const FIL_BYTE_SIZE: usize = BSIZE - 0xBC;
/// Used byte count of an OFS data block.
pub const DATA_SIZE: usize = 0x0C;
/// Next OFS data block pointer.
pub const DATA_NEXT: usize = 0x10;
/// Payload start within an OFS data block.
pub const DATA_PAYLOAD: usize = 0x18;

/// OFS data block payload capacity.
pub const OFS_DATA_SIZE: usize = BSIZE - DATA_PAYLOAD;

/// FFS data block payload capacity (fully packed).
pub const FFS_DATA_SIZE: usize = BSIZE;

/// Sentinel in the root block's bm_flag field marking the bitmap as
/// trustworthy.
pub const BM_VALID: u32 = 0xFFFF_FFFF;
