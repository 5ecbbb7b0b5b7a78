//! File content reconstruction.

use crate::block::{FileExtBlock, HeaderBlock, OfsDataBlock};
use crate::constants::*;
use crate::error::{AfsError, Result};
use crate::types::SectorDevice;

/// Streaming file reader.
///
/// Reconstructs file content sequentially, selecting the OFS linked-chain
/// or the FFS block-table algorithm from the volume's filesystem variant.
/// The reconstructed length always equals the header's declared byte
/// size; any shortfall or excess on disk surfaces as `TruncatedFile`.
///
/// # Example
///
/// ```ignore
/// let mut reader = volume.read_file(file_sector)?;
/// let mut buf = [0u8; 1024];
/// loop {
///     let n = reader.read(&mut buf)?;
///     if n == 0 {
///         break; // EOF
///     }
///     // Process buf[..n]
/// }
/// ```
#[derive(Debug)]
pub struct FileReader<'a, D: SectorDevice> {
    device: &'a D,
    ffs: bool,
    header_sector: u32,
    size: u32,
    remaining: u32,
    /// Reversed data block table of the current header/extension block.
    table: [u32; MAX_DATABLK],
    /// Populated entries in `table`.
    high_seq: u32,
    /// Position within `table`.
    table_index: u32,
    /// Next extension block, 0 when the chain ends.
    next_extension: u32,
    /// Next OFS data block, 0 when the chain ends.
    next_data: u32,
    /// Payload start within `buf` for the loaded block.
    data_off: usize,
    /// Payload bytes available in `buf`.
    avail: usize,
    /// Read position within the loaded payload.
    pos: usize,
    buf: [u8; BSIZE],
    // Initial traversal state, kept for reset.
    init_table: [u32; MAX_DATABLK],
    init_high_seq: u32,
    init_extension: u32,
    init_first_data: u32,
}

impl<'a, D: SectorDevice> FileReader<'a, D> {
    /// Open a file from its header block sector.
    ///
    /// The header must pass sanity checking (valid checksum, primary type
    /// `T_HEADER`, secondary type `ST_FILE`), else `FileHeaderInvalid`.
    /// `ffs` selects the reconstruction algorithm.
    pub fn new(device: &'a D, ffs: bool, sector: u32) -> Result<Self> {
        let mut buf = [0u8; BSIZE];
        device
            .read_sector(sector, &mut buf)
            .map_err(|()| AfsError::SectorFetchFailed { sector })?;

        let hdr = match HeaderBlock::parse(sector, &buf) {
            Ok(hdr) => hdr,
            Err(AfsError::BadBlockType { .. }) => {
                return Err(AfsError::FileHeaderInvalid { sector });
            }
            Err(e) => return Err(e),
        };

        Self::from_header(device, ffs, sector, &hdr)
    }

    /// Open a file from an already-decoded header block.
    pub fn from_header(
        device: &'a D,
        ffs: bool,
        sector: u32,
        hdr: &HeaderBlock,
    ) -> Result<Self> {
        if !hdr.is_file() {
            return Err(AfsError::FileHeaderInvalid { sector });
        }

        Ok(Self {
            device,
            ffs,
            header_sector: sector,
            size: hdr.byte_size,
            remaining: hdr.byte_size,
            table: hdr.table,
            high_seq: hdr.high_seq,
            table_index: 0,
            next_extension: hdr.extension,
            next_data: hdr.first_data,
            data_off: 0,
            avail: 0,
            pos: 0,
            buf: [0u8; BSIZE],
            init_table: hdr.table,
            init_high_seq: hdr.high_seq,
            init_extension: hdr.extension,
            init_first_data: hdr.first_data,
        })
    }

    /// Total file size in bytes.
    #[inline]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Sector of the file header block.
    #[inline]
    pub const fn header_sector(&self) -> u32 {
        self.header_sector
    }

    /// Bytes left to read.
    #[inline]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// True once the whole file has been read.
    #[inline]
    pub const fn is_eof(&self) -> bool {
        self.remaining == 0
    }

    /// Current position in the file.
    #[inline]
    pub const fn position(&self) -> u32 {
        self.size - self.remaining
    }

    /// Rewind to the start of the file.
    pub fn reset(&mut self) {
        self.remaining = self.size;
        self.table = self.init_table;
        self.high_seq = self.init_high_seq;
        self.table_index = 0;
        self.next_extension = self.init_extension;
        self.next_data = self.init_first_data;
        self.avail = 0;
        self.pos = 0;
    }

    /// Read into `out`, returning the number of bytes read (0 at EOF).
    ///
    /// Zero-size files hit EOF immediately without fetching any data
    /// sector.
    pub fn read(&mut self, out: &mut [u8]) -> Result<usize> {
        if self.remaining == 0 || out.is_empty() {
            return Ok(0);
        }

        let mut total = 0;

        while total < out.len() && self.remaining > 0 {
            if self.pos >= self.avail {
                self.load_next_block()?;
            }

            let take = (self.avail - self.pos)
                .min(out.len() - total)
                .min(self.remaining as usize);

            let start = self.data_off + self.pos;
            out[total..total + take].copy_from_slice(&self.buf[start..start + take]);

            total += take;
            self.pos += take;
            self.remaining -= take as u32;
        }

        Ok(total)
    }

    /// Read the remaining content into `out`, which must be large enough.
    pub fn read_all(&mut self, out: &mut [u8]) -> Result<usize> {
        if out.len() < self.remaining as usize {
            return Err(AfsError::BufferTooSmall);
        }

        let mut total = 0;
        while self.remaining > 0 {
            let n = self.read(&mut out[total..])?;
            if n == 0 {
                break;
            }
            total += n;
        }
        Ok(total)
    }

    /// Read the remaining content into a fresh `Vec`.
    #[cfg(feature = "alloc")]
    pub fn read_to_vec(&mut self) -> Result<alloc::vec::Vec<u8>> {
        let mut out = alloc::vec![0u8; self.remaining as usize];
        self.read_all(&mut out)?;
        Ok(out)
    }

    /// Seek to an absolute position.
    ///
    /// Seeking backwards rewinds to the start and skips forward, which
    /// re-reads extension blocks on large FFS files.
    pub fn seek(&mut self, position: u32) -> Result<()> {
        if position > self.size {
            return Err(AfsError::TruncatedFile {
                expected: self.size,
                actual: position,
            });
        }

        if position < self.position() {
            self.reset();
        }

        let mut discard = [0u8; BSIZE];
        while self.position() < position {
            let gap = (position - self.position()).min(BSIZE as u32) as usize;
            let n = self.read(&mut discard[..gap])?;
            if n == 0 {
                break;
            }
        }

        Ok(())
    }

    fn load_next_block(&mut self) -> Result<()> {
        if self.ffs {
            self.load_next_ffs()
        } else {
            self.load_next_ofs()
        }
    }

    /// Follow the OFS linked chain one data block forward.
    fn load_next_ofs(&mut self) -> Result<()> {
        let sector = self.next_data;
        if sector == 0 {
            return Err(self.truncated(0));
        }

        self.device
            .read_sector(sector, &mut self.buf)
            .map_err(|()| AfsError::SectorFetchFailed { sector })?;

        let data = OfsDataBlock::parse(sector, &self.buf)?;
        let used = data.data_size;

        // The used-byte counts must add up to the declared file size; a
        // zero, oversized or excess count cannot.
        if used == 0 || used as usize > OFS_DATA_SIZE || used > self.remaining {
            return Err(self.truncated(used));
        }

        self.next_data = data.next_data;
        self.data_off = DATA_PAYLOAD;
        self.avail = used as usize;
        self.pos = 0;
        Ok(())
    }

    /// Advance the FFS table walk, loading the next extension block when
    /// the current table is exhausted.
    fn load_next_ffs(&mut self) -> Result<()> {
        if self.table_index >= self.high_seq {
            let ext_sector = self.next_extension;
            if ext_sector == 0 {
                return Err(self.truncated(0));
            }

            self.device
                .read_sector(ext_sector, &mut self.buf)
                .map_err(|()| AfsError::SectorFetchFailed { sector: ext_sector })?;

            let ext = FileExtBlock::parse(ext_sector, &self.buf)?;
            if ext.high_seq == 0 {
                return Err(self.truncated(0));
            }

            self.table = ext.table;
            self.high_seq = ext.high_seq;
            self.next_extension = ext.extension;
            self.table_index = 0;
        }

        // The table is stored in reverse: position i lives at the end.
        let idx = self.table_index as usize;
        let sector = if idx < MAX_DATABLK {
            self.table[MAX_DATABLK - 1 - idx]
        } else {
            0
        };
        if sector == 0 {
            return Err(self.truncated(0));
        }

        self.device
            .read_sector(sector, &mut self.buf)
            .map_err(|()| AfsError::SectorFetchFailed { sector })?;

        // FFS data blocks are raw payload, fully packed except the last.
        self.table_index += 1;
        self.data_off = 0;
        self.avail = (self.remaining as usize).min(FFS_DATA_SIZE);
        self.pos = 0;
        Ok(())
    }

    const fn truncated(&self, pending: u32) -> AfsError {
        AfsError::TruncatedFile {
            expected: self.size,
            actual: self.size - self.remaining + pending,
        }
    }
}
