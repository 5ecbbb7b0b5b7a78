//! Error types for Amiga filesystem operations.

use core::fmt;

/// Error type for Amiga filesystem operations.
///
/// Variants carry the failing sector and the expected/found values where
/// applicable, so a corrupt or unsupported image can be diagnosed from the
/// error alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfsError {
    /// The sector provider failed to deliver a sector.
    SectorFetchFailed {
        /// Sector that could not be fetched.
        sector: u32,
    },
    /// The boot sector does not start with the "DOS" magic.
    NotADosDisk,
    /// The filesystem type code is outside the known range 0-5.
    UnknownFsType {
        /// Type code found in the boot block.
        code: u8,
    },
    /// The root block failed type or structure validation.
    RootBlockInvalid {
        /// Sector that was expected to hold the root block.
        sector: u32,
    },
    /// The bitmap block checksum does not match.
    BitmapInvalid {
        /// Sector holding the bitmap block.
        sector: u32,
    },
    /// A block's standard checksum does not match its stored value.
    ChecksumMismatch {
        /// Sector that failed verification.
        sector: u32,
    },
    /// A block's primary type is not the expected tag.
    BadBlockType {
        /// Sector holding the offending block.
        sector: u32,
        /// Expected primary type.
        expected: u32,
        /// Primary type found on disk.
        found: u32,
    },
    /// A name length field exceeds the 30-byte maximum.
    InvalidName {
        /// Sector holding the offending name.
        sector: u32,
        /// Length byte found on disk.
        len: u8,
    },
    /// An unrecognized secondary type was met in a directory chain.
    ///
    /// The whole listing is aborted; no partial results are returned.
    UnknownSecType {
        /// Sector holding the offending entry.
        sector: u32,
        /// Secondary type found on disk.
        sec_type: u32,
    },
    /// A file header block failed sanity checking.
    FileHeaderInvalid {
        /// Sector that was expected to hold a file header.
        sector: u32,
    },
    /// Reconstructed file content does not match the header's byte size.
    TruncatedFile {
        /// Byte size declared by the file header.
        expected: u32,
        /// Bytes actually accounted for.
        actual: u32,
    },
    /// No entry with the requested name exists.
    EntryNotFound,
    /// A lookup name is longer than 30 bytes.
    NameTooLong,
    /// The output buffer is smaller than the remaining file content.
    BufferTooSmall,
}

impl fmt::Display for AfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SectorFetchFailed { sector } => {
                write!(f, "failed to fetch sector {sector}")
            }
            Self::NotADosDisk => write!(f, "not a DOS disk"),
            Self::UnknownFsType { code } => {
                write!(f, "unrecognised filesystem type code {code}")
            }
            Self::RootBlockInvalid { sector } => {
                write!(f, "root block at sector {sector} failed sanity checking")
            }
            Self::BitmapInvalid { sector } => {
                write!(f, "bitmap block checksum invalid at sector {sector}")
            }
            Self::ChecksumMismatch { sector } => {
                write!(f, "checksum invalid for sector {sector}")
            }
            Self::BadBlockType {
                sector,
                expected,
                found,
            } => write!(
                f,
                "type for sector {sector} is {found:#x}, expected {expected:#x}"
            ),
            Self::InvalidName { sector, len } => {
                write!(f, "name length {len} at sector {sector} exceeds 30")
            }
            Self::UnknownSecType { sector, sec_type } => write!(
                f,
                "unknown sec_type {sec_type:#x} for sector {sector} in dir chain"
            ),
            Self::FileHeaderInvalid { sector } => {
                write!(f, "file header at sector {sector} failed sanity checking")
            }
            Self::TruncatedFile { expected, actual } => write!(
                f,
                "file content mismatch: header declares {expected} bytes, found {actual}"
            ),
            Self::EntryNotFound => write!(f, "entry not found"),
            Self::NameTooLong => write!(f, "name too long"),
            Self::BufferTooSmall => write!(f, "buffer too small"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AfsError {}

/// Result type for Amiga filesystem operations.
pub type Result<T> = core::result::Result<T, AfsError>;
