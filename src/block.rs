//! Typed views of raw sectors.
//!
//! Each decoder checks the block's tags and checksum before any field is
//! trusted, and carries the sector number so failures can be reported with
//! context.

use crate::checksum::{boot_sum, check_standard, read_u32_be, read_u32_be_slice};
use crate::constants::*;
use crate::date::AmigaDate;
use crate::error::{AfsError, Result};
use crate::types::{EntryType, FsType};

/// Decoded boot block (sectors 0 and 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootBlock {
    /// Filesystem variant from the type code byte.
    pub fs_type: FsType,
    /// Stored checksum value.
    pub checksum: u32,
    /// Resolved root block number (880 when the field is zero).
    pub root_block: u32,
    /// Whether the ones'-complement checksum matches.
    pub bootable: bool,
}

impl BootBlock {
    /// Decode the 1024-byte boot block.
    ///
    /// Fails with `NotADosDisk` when the magic is missing and
    /// `UnknownFsType` for type codes above 5. A wrong checksum is not an
    /// error; it only clears the bootable flag.
    pub fn parse(buf: &[u8; BOOT_BLOCK_SIZE]) -> Result<Self> {
        if &buf[0..3] != b"DOS" {
            return Err(AfsError::NotADosDisk);
        }

        let code = buf[BB_FS_TYPE];
        let fs_type = FsType::from_code(code).ok_or(AfsError::UnknownFsType { code })?;

        let checksum = read_u32_be_slice(buf, BB_CHECKSUM);
        let bootable = checksum == boot_sum(buf);

        let root_block = match read_u32_be_slice(buf, BB_ROOTBLOCK) {
            0 => DEFAULT_ROOT_BLOCK,
            n => n,
        };

        Ok(Self {
            fs_type,
            checksum,
            root_block,
            bootable,
        })
    }
}

/// Decoded root block.
#[derive(Debug, Clone)]
pub struct RootBlock {
    /// Directory hash table.
    pub hash_table: [u32; HT_SIZE],
    /// Bitmap valid flag; trustworthy iff equal to `BM_VALID`.
    pub bm_flag: u32,
    /// Bitmap block pointer table.
    pub bm_pages: [u32; BM_PAGES_ROOT_SIZE],
    /// Root alteration date.
    pub altered: AmigaDate,
    /// Volume creation date.
    pub created: AmigaDate,
    pub(crate) name: [u8; MAX_NAME_LEN],
    pub(crate) name_len: u8,
}

impl RootBlock {
    /// Decode a root block.
    ///
    /// Requires primary type `T_HEADER`, secondary type `ST_ROOT` and a
    /// valid standard checksum at 0x14.
    pub fn parse(sector: u32, buf: &[u8; BSIZE]) -> Result<Self> {
        if !check_standard(buf, OFF_CHKSUM) {
            return Err(AfsError::ChecksumMismatch { sector });
        }

        if read_u32_be(buf, OFF_TYPE) != T_HEADER
            || read_u32_be(buf, OFF_SEC_TYPE) != ST_ROOT
        {
            return Err(AfsError::RootBlockInvalid { sector });
        }

        let mut hash_table = [0u32; HT_SIZE];
        for (i, slot) in hash_table.iter_mut().enumerate() {
            *slot = read_u32_be(buf, OFF_TABLE + i * 4);
        }

        let bm_flag = read_u32_be(buf, ROOT_BM_FLAG);

        let mut bm_pages = [0u32; BM_PAGES_ROOT_SIZE];
        for (i, page) in bm_pages.iter_mut().enumerate() {
            *page = read_u32_be(buf, ROOT_BM_PAGES + i * 4);
        }

        let altered = AmigaDate::read(buf, OFF_DAYS);
        let created = AmigaDate::read(buf, ROOT_V_DAYS);

        let (name, name_len) = read_name(sector, buf)?;

        Ok(Self {
            hash_table,
            bm_flag,
            bm_pages,
            altered,
            created,
            name,
            name_len,
        })
    }

    /// Volume label as raw Latin-1 bytes.
    #[inline]
    pub fn name(&self) -> &[u8] {
        &self.name[..self.name_len as usize]
    }

    /// Whether the used-block counts in the bitmap can be trusted.
    #[inline]
    pub const fn bitmap_valid(&self) -> bool {
        self.bm_flag == BM_VALID
    }
}

/// Hash-table view of a directory block (root or user directory).
///
/// The walker only needs the table and the parent pointer; the secondary
/// type is deliberately not enforced, since root and user directories
/// share this layout and target validation is lazy.
#[derive(Debug, Clone)]
pub struct DirBlock {
    /// Directory hash table.
    pub hash_table: [u32; HT_SIZE],
    /// Parent directory block (0 for the root).
    pub parent: u32,
}

impl DirBlock {
    /// Decode any checksummed header block as a directory.
    pub fn parse(sector: u32, buf: &[u8; BSIZE]) -> Result<Self> {
        if !check_standard(buf, OFF_CHKSUM) {
            return Err(AfsError::ChecksumMismatch { sector });
        }

        let found = read_u32_be(buf, OFF_TYPE);
        if found != T_HEADER {
            return Err(AfsError::BadBlockType {
                sector,
                expected: T_HEADER,
                found,
            });
        }

        let mut hash_table = [0u32; HT_SIZE];
        for (i, slot) in hash_table.iter_mut().enumerate() {
            *slot = read_u32_be(buf, OFF_TABLE + i * 4);
        }

        Ok(Self {
            hash_table,
            parent: read_u32_be(buf, OFF_PARENT),
        })
    }
}

/// Decoded header block of a directory entry (file, directory or link).
#[derive(Debug, Clone)]
pub struct HeaderBlock {
    /// This block's own sector number, as stored on disk.
    pub header_key: u32,
    /// Populated entries in the data block table (files).
    pub high_seq: u32,
    /// First OFS data block (files on OFS volumes).
    pub first_data: u32,
    /// Hash table (directories) or reversed data block table (files).
    pub table: [u32; HT_SIZE],
    /// Declared file size in bytes (files).
    pub byte_size: u32,
    /// Modification date.
    pub date: AmigaDate,
    /// Next entry in the same hash chain (0 terminates the chain).
    pub hash_chain: u32,
    /// Parent directory block.
    pub parent: u32,
    /// First file extension block (files on FFS volumes).
    pub extension: u32,
    /// Secondary type, compared unsigned.
    pub sec_type: u32,
    pub(crate) name: [u8; MAX_NAME_LEN],
    pub(crate) name_len: u8,
}

impl HeaderBlock {
    /// Decode an entry header block.
    ///
    /// Requires primary type `T_HEADER` and a valid standard checksum;
    /// the secondary type is decoded but classified by the caller.
    pub fn parse(sector: u32, buf: &[u8; BSIZE]) -> Result<Self> {
        if !check_standard(buf, OFF_CHKSUM) {
            return Err(AfsError::ChecksumMismatch { sector });
        }

        let found = read_u32_be(buf, OFF_TYPE);
        if found != T_HEADER {
            return Err(AfsError::BadBlockType {
                sector,
                expected: T_HEADER,
                found,
            });
        }

        let mut table = [0u32; HT_SIZE];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = read_u32_be(buf, OFF_TABLE + i * 4);
        }

        let (name, name_len) = read_name(sector, buf)?;

        Ok(Self {
            header_key: read_u32_be(buf, OFF_HEADER_KEY),
            high_seq: read_u32_be(buf, OFF_HIGH_SEQ),
            first_data: read_u32_be(buf, OFF_FIRST_DATA),
            table,
            byte_size: read_u32_be(buf, FIL_BYTE_SIZE),
            date: AmigaDate::read(buf, OFF_DAYS),
            hash_chain: read_u32_be(buf, OFF_HASH_CHAIN),
            parent: read_u32_be(buf, OFF_PARENT),
            extension: read_u32_be(buf, OFF_EXTENSION),
            sec_type: read_u32_be(buf, OFF_SEC_TYPE),
            name,
            name_len,
        })
    }

    /// Entry name as raw Latin-1 bytes.
    #[inline]
    pub fn name(&self) -> &[u8] {
        &self.name[..self.name_len as usize]
    }

    /// Classify this block's secondary type.
    #[inline]
    pub fn entry_type(&self) -> Option<EntryType> {
        EntryType::from_sec_type(self.sec_type)
    }

    /// True for plain file headers.
    #[inline]
    pub const fn is_file(&self) -> bool {
        self.sec_type == ST_FILE
    }

    /// True for user directories.
    #[inline]
    pub const fn is_dir(&self) -> bool {
        self.sec_type == ST_USERDIR
    }

    /// Data block pointer at file position `index`.
    ///
    /// The table is stored in reverse: position 0 lives in the last slot.
    #[inline]
    pub const fn data_block(&self, index: usize) -> u32 {
        if index < MAX_DATABLK {
            self.table[MAX_DATABLK - 1 - index]
        } else {
            0
        }
    }
}

/// Decoded file extension block (FFS continuation).
#[derive(Debug, Clone)]
pub struct FileExtBlock {
    /// Populated entries in the data block table.
    pub high_seq: u32,
    /// Reversed data block table.
    pub table: [u32; MAX_DATABLK],
    /// Next extension block (0 terminates the chain).
    pub extension: u32,
}

impl FileExtBlock {
    /// Decode a file extension block (primary type `T_LIST`).
    pub fn parse(sector: u32, buf: &[u8; BSIZE]) -> Result<Self> {
        if !check_standard(buf, OFF_CHKSUM) {
            return Err(AfsError::ChecksumMismatch { sector });
        }

        let found = read_u32_be(buf, OFF_TYPE);
        if found != T_LIST {
            return Err(AfsError::BadBlockType {
                sector,
                expected: T_LIST,
                found,
            });
        }

        let mut table = [0u32; MAX_DATABLK];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = read_u32_be(buf, OFF_TABLE + i * 4);
        }

        Ok(Self {
            high_seq: read_u32_be(buf, OFF_HIGH_SEQ),
            table,
            extension: read_u32_be(buf, OFF_EXTENSION),
        })
    }

    /// Data block pointer at position `index` within this block's table.
    #[inline]
    pub const fn data_block(&self, index: usize) -> u32 {
        if index < MAX_DATABLK {
            self.table[MAX_DATABLK - 1 - index]
        } else {
            0
        }
    }
}

/// Decoded OFS data block header.
#[derive(Debug, Clone, Copy)]
pub struct OfsDataBlock {
    /// Owning file header block.
    pub header_key: u32,
    /// 1-based position within the file.
    pub seq_num: u32,
    /// Used bytes in this block's payload.
    pub data_size: u32,
    /// Next data block (0 terminates the chain).
    pub next_data: u32,
}

impl OfsDataBlock {
    /// Decode an OFS data block (primary type `T_DATA`).
    pub fn parse(sector: u32, buf: &[u8; BSIZE]) -> Result<Self> {
        if !check_standard(buf, OFF_CHKSUM) {
            return Err(AfsError::ChecksumMismatch { sector });
        }

        let found = read_u32_be(buf, OFF_TYPE);
        if found != T_DATA {
            return Err(AfsError::BadBlockType {
                sector,
                expected: T_DATA,
                found,
            });
        }

        Ok(Self {
            header_key: read_u32_be(buf, OFF_HEADER_KEY),
            seq_num: read_u32_be(buf, OFF_HIGH_SEQ),
            data_size: read_u32_be(buf, DATA_SIZE),
            next_data: read_u32_be(buf, DATA_NEXT),
        })
    }

    /// The payload region of a raw OFS data sector.
    #[inline]
    pub fn payload(buf: &[u8; BSIZE]) -> &[u8] {
        &buf[DATA_PAYLOAD..]
    }
}

/// Decode a length-prefixed name field.
///
/// The length byte must be 0-30; anything larger is data corruption and
/// fails with `InvalidName`. Bytes are Latin-1, copied verbatim.
pub(crate) fn read_name(sector: u32, buf: &[u8; BSIZE]) -> Result<([u8; MAX_NAME_LEN], u8)> {
    let len = buf[OFF_NAME_LEN];
    if len as usize > MAX_NAME_LEN {
        return Err(AfsError::InvalidName { sector, len });
    }

    let mut name = [0u8; MAX_NAME_LEN];
    name[..len as usize].copy_from_slice(&buf[OFF_NAME..OFF_NAME + len as usize]);
    Ok((name, len))
}

/// Compute the hash table slot for a name.
///
/// `intl` selects the international uppercase table, which INTL volumes
/// use when placing entries; it must match the volume variant or lookups
/// land in the wrong slot.
#[inline]
pub fn hash_name(name: &[u8], intl: bool) -> usize {
    let mut hash = name.len() as u32;

    for &c in name {
        let upper = if intl {
            intl_to_upper(c)
        } else {
            ascii_to_upper(c)
        };
        hash = (hash.wrapping_mul(13).wrapping_add(upper as u32)) & 0x7FF;
    }

    (hash % HT_SIZE as u32) as usize
}

/// ASCII uppercase, leaving high bytes untouched.
#[inline]
const fn ascii_to_upper(c: u8) -> u8 {
    if c.is_ascii_lowercase() { c - 32 } else { c }
}

/// Uppercase with the Amiga international table.
///
/// Latin-1 lowercase letters (0xE0-0xFE, excluding the division sign
/// 0xF7) map to their uppercase forms 32 below.
#[inline]
pub const fn intl_to_upper(c: u8) -> u8 {
    if c.is_ascii_lowercase() || (c >= 0xE0 && c <= 0xFE && c != 0xF7) {
        c.wrapping_sub(32)
    } else {
        c
    }
}

/// ASCII case-insensitive name comparison.
///
/// International collation is deliberately not implemented; INTL volumes
/// still hash with the international table but compare as ASCII here.
#[inline]
pub fn names_equal(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|(&x, &y)| ascii_to_upper(x) == ascii_to_upper(y))
}
