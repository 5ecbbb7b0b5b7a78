//! Directory traversal.

use crate::block::HeaderBlock;
use crate::constants::*;
use crate::date::AmigaDate;
use crate::error::{AfsError, Result};
use crate::types::{EntryType, SectorDevice};

/// One directory entry.
#[derive(Debug, Clone)]
pub struct DirEntry {
    /// Entry classification.
    pub entry_type: EntryType,
    /// Declared byte size (0 for directories).
    pub size: u32,
    /// Sector of this entry's header block.
    pub sector: u32,
    /// Modification date.
    pub date: AmigaDate,
    pub(crate) name: [u8; MAX_NAME_LEN],
    pub(crate) name_len: u8,
}

impl DirEntry {
    pub(crate) fn from_header(sector: u32, hdr: &HeaderBlock) -> Result<Self> {
        let entry_type = hdr.entry_type().ok_or(AfsError::UnknownSecType {
            sector,
            sec_type: hdr.sec_type,
        })?;

        Ok(Self {
            entry_type,
            size: hdr.byte_size,
            sector,
            date: hdr.date,
            name: hdr.name,
            name_len: hdr.name_len,
        })
    }

    /// The synthetic `..` entry pointing at the parent directory.
    pub(crate) fn parent_entry(parent: u32) -> Self {
        let mut name = [0u8; MAX_NAME_LEN];
        name[..2].copy_from_slice(b"..");
        Self {
            entry_type: EntryType::Dir,
            size: 0,
            sector: parent,
            date: AmigaDate::default(),
            name,
            name_len: 2,
        }
    }

    /// Entry name as raw Latin-1 bytes.
    #[inline]
    pub fn name(&self) -> &[u8] {
        &self.name[..self.name_len as usize]
    }

    /// Entry name as a string, when it happens to be valid UTF-8.
    #[inline]
    pub fn name_str(&self) -> Option<&str> {
        crate::utf8::from_utf8(self.name())
    }

    /// True for directories (including the synthetic `..`).
    #[inline]
    pub const fn is_dir(&self) -> bool {
        self.entry_type.is_dir()
    }

    /// True for files.
    #[inline]
    pub const fn is_file(&self) -> bool {
        self.entry_type.is_file()
    }

    /// True for links.
    #[inline]
    pub const fn is_link(&self) -> bool {
        matches!(self.entry_type, EntryType::Link)
    }
}

/// Lazy iterator over a directory's entries.
///
/// Emits the synthetic `..` entry first (unless the directory is the
/// volume root), then every hash table slot in ascending order, each
/// collision chain in link order. An unrecognized secondary type anywhere
/// yields an error and ends the iteration; callers wanting all-or-nothing
/// semantics collect through [`crate::Volume::list_dir`].
pub struct DirIter<'a, D: SectorDevice> {
    device: &'a D,
    hash_table: [u32; HT_SIZE],
    slot: usize,
    chain: u32,
    parent: Option<u32>,
    failed: bool,
    buf: [u8; BSIZE],
}

impl<'a, D: SectorDevice> DirIter<'a, D> {
    pub(crate) fn new(device: &'a D, hash_table: [u32; HT_SIZE], parent: Option<u32>) -> Self {
        Self {
            device,
            hash_table,
            slot: 0,
            chain: 0,
            parent,
            failed: false,
            buf: [0u8; BSIZE],
        }
    }

    fn next_entry(&mut self) -> Result<Option<DirEntry>> {
        loop {
            if self.chain != 0 {
                let sector = self.chain;
                self.device
                    .read_sector(sector, &mut self.buf)
                    .map_err(|()| AfsError::SectorFetchFailed { sector })?;

                let hdr = HeaderBlock::parse(sector, &self.buf)?;
                let entry = DirEntry::from_header(sector, &hdr)?;
                self.chain = hdr.hash_chain;
                return Ok(Some(entry));
            }

            // Chain exhausted, move to the next occupied slot.
            while self.slot < HT_SIZE {
                let head = self.hash_table[self.slot];
                self.slot += 1;
                if head != 0 {
                    self.chain = head;
                    break;
                }
            }

            if self.chain == 0 {
                return Ok(None);
            }
        }
    }
}

impl<D: SectorDevice> Iterator for DirIter<'_, D> {
    type Item = Result<DirEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if let Some(parent) = self.parent.take() {
            return Some(Ok(DirEntry::parent_entry(parent)));
        }

        match self.next_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
