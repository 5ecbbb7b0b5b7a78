//! Core types: the sector provider contract and derived volume data.

use crate::constants::{FFS_DATA_SIZE, MAX_NAME_LEN, OFS_DATA_SIZE};

/// Sector provider trait.
///
/// Implement this for your storage medium (file, memory, network endpoint).
/// The core issues one request at a time and never more than one
/// outstanding fetch per operation; retry policy for transient failures
/// belongs to the implementation, not the core.
pub trait SectorDevice {
    /// Fetch a single 512-byte sector.
    ///
    /// # Arguments
    /// * `sector` - Zero-based sector number
    /// * `buf` - Buffer receiving exactly 512 bytes
    ///
    /// # Returns
    /// `Ok(())` on success, `Err(())` on failure.
    #[allow(clippy::result_unit_err)]
    fn read_sector(&self, sector: u32, buf: &mut [u8; 512]) -> Result<(), ()>;
}

/// Filesystem variant, from the boot block's type code (0-5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsType {
    /// Original File System.
    Ofs,
    /// Fast File System.
    Ffs,
    /// OFS with international mode.
    OfsIntl,
    /// FFS with international mode.
    FfsIntl,
    /// OFS with directory cache and international mode.
    OfsDircacheIntl,
    /// FFS with directory cache and international mode.
    FfsDircacheIntl,
}

impl FsType {
    /// Map a boot block type code to a variant. Codes above 5 are unknown.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Ofs),
            1 => Some(Self::Ffs),
            2 => Some(Self::OfsIntl),
            3 => Some(Self::FfsIntl),
            4 => Some(Self::OfsDircacheIntl),
            5 => Some(Self::FfsDircacheIntl),
            _ => None,
        }
    }

    /// The boot block type code for this variant.
    pub const fn code(self) -> u8 {
        match self {
            Self::Ofs => 0,
            Self::Ffs => 1,
            Self::OfsIntl => 2,
            Self::FfsIntl => 3,
            Self::OfsDircacheIntl => 4,
            Self::FfsDircacheIntl => 5,
        }
    }

    /// True for the FFS variants (low bit of the type code).
    ///
    /// This bit selects the file content reconstruction algorithm.
    #[inline]
    pub const fn is_ffs(self) -> bool {
        self.code() & 1 != 0
    }

    /// True when international mode is enabled.
    #[inline]
    pub const fn is_intl(self) -> bool {
        self.code() >= 2
    }

    /// True when the directory cache extension is present.
    #[inline]
    pub const fn is_dircache(self) -> bool {
        self.code() >= 4
    }

    /// Data payload capacity per sector for this variant.
    #[inline]
    pub const fn data_block_size(self) -> usize {
        if self.is_ffs() {
            FFS_DATA_SIZE
        } else {
            OFS_DATA_SIZE
        }
    }

    /// Human-readable variant name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ofs => "OFS",
            Self::Ffs => "FFS",
            Self::OfsIntl => "OFS+INTL",
            Self::FfsIntl => "FFS+INTL",
            Self::OfsDircacheIntl => "OFS+DIRCACHE+INTL",
            Self::FfsDircacheIntl => "FFS+DIRCACHE+INTL",
        }
    }
}

/// Directory entry classification, from a header block's secondary type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// User directory.
    Dir,
    /// File.
    File,
    /// Soft or hard link. Link targets are reported, never followed.
    Link,
}

impl EntryType {
    /// Classify an unsigned secondary type value.
    pub const fn from_sec_type(sec_type: u32) -> Option<Self> {
        match sec_type {
            crate::ST_USERDIR => Some(Self::Dir),
            crate::ST_FILE => Some(Self::File),
            crate::ST_SOFTLINK | crate::ST_LINKFILE | crate::ST_LINKDIR => Some(Self::Link),
            _ => None,
        }
    }

    /// True for directories.
    #[inline]
    pub const fn is_dir(self) -> bool {
        matches!(self, Self::Dir)
    }

    /// True for files.
    #[inline]
    pub const fn is_file(self) -> bool {
        matches!(self, Self::File)
    }
}

/// Volume metadata, published once by a successful mount.
#[derive(Debug, Clone)]
pub struct VolumeInfo {
    /// Filesystem variant.
    pub fs_type: FsType,
    /// Whether the boot block checksum is intact (the disk would boot).
    pub bootable: bool,
    /// Resolved root block number.
    pub root_block: u32,
    /// Whether the root block's bm_flag marks the bitmap as trustworthy.
    pub bitmap_valid: bool,
    pub(crate) label: [u8; MAX_NAME_LEN],
    pub(crate) label_len: u8,
}

impl VolumeInfo {
    /// Volume label as raw Latin-1 bytes.
    #[inline]
    pub fn label(&self) -> &[u8] {
        &self.label[..self.label_len as usize]
    }

    /// Volume label as a string, when it happens to be valid UTF-8.
    #[inline]
    pub fn label_str(&self) -> Option<&str> {
        crate::utf8::from_utf8(self.label())
    }
}
