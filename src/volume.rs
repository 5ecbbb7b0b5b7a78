//! Mounted volume interface.

use crate::block::{BootBlock, DirBlock, HeaderBlock, RootBlock, hash_name, names_equal};
use crate::checksum::check_standard;
use crate::constants::*;
use crate::dir::{DirEntry, DirIter};
use crate::error::{AfsError, Result};
use crate::file::FileReader;
use crate::types::{SectorDevice, VolumeInfo};

/// A mounted Amiga volume.
///
/// Mounting runs the loader once: boot block recognition, root block
/// validation and bitmap verification. On success the volume metadata is
/// immutable; directory listings and file reads are per-operation and
/// share nothing but that metadata and the device.
///
/// # Example
///
/// ```ignore
/// let volume = Volume::mount(&device)?;
/// println!("{} ({})", volume.info().label_str().unwrap_or("?"),
///          volume.info().fs_type.as_str());
///
/// for entry in volume.read_dir()? {
///     let entry = entry?;
///     println!("{:?}: {} bytes", entry.name_str(), entry.size);
/// }
/// ```
#[derive(Debug)]
pub struct Volume<'a, D: SectorDevice> {
    device: &'a D,
    info: VolumeInfo,
    current_dir: u32,
    force_ffs: bool,
}

impl<'a, D: SectorDevice> Volume<'a, D> {
    /// Mount a volume, resolving the root block from the boot block.
    ///
    /// A zero root pointer resolves to block 880, the standard 3.5" DD
    /// floppy location.
    pub fn mount(device: &'a D) -> Result<Self> {
        let boot = Self::read_boot(device)?;
        Self::finish_mount(device, boot, boot.root_block)
    }

    /// Mount with an explicit root block, overriding the boot pointer.
    ///
    /// For images whose root lives somewhere non-standard.
    pub fn with_root(device: &'a D, root_block: u32) -> Result<Self> {
        let boot = Self::read_boot(device)?;
        Self::finish_mount(device, boot, root_block)
    }

    fn read_boot(device: &D) -> Result<BootBlock> {
        // The boot "block" is sectors 0 and 1 back to back.
        let mut buf = [0u8; BOOT_BLOCK_SIZE];
        for sector in 0..2u32 {
            let half: &mut [u8; BSIZE] = (&mut buf
                [sector as usize * BSIZE..(sector as usize + 1) * BSIZE])
                .try_into()
                .expect("sector slice size");
            device
                .read_sector(sector, half)
                .map_err(|()| AfsError::SectorFetchFailed { sector })?;
        }
        BootBlock::parse(&buf)
    }

    fn finish_mount(device: &'a D, boot: BootBlock, root_sector: u32) -> Result<Self> {
        let mut buf = [0u8; BSIZE];
        device
            .read_sector(root_sector, &mut buf)
            .map_err(|()| AfsError::SectorFetchFailed { sector: root_sector })?;
        let root = RootBlock::parse(root_sector, &buf)?;

        // The bitmap must checksum cleanly even though the core never
        // consumes the map itself. Its checksum sits at offset 0.
        let bm_sector = root.bm_pages[0];
        device
            .read_sector(bm_sector, &mut buf)
            .map_err(|()| AfsError::SectorFetchFailed { sector: bm_sector })?;
        if !check_standard(&buf, BM_CHECKSUM) {
            return Err(AfsError::BitmapInvalid { sector: bm_sector });
        }

        Ok(Self {
            device,
            info: VolumeInfo {
                fs_type: boot.fs_type,
                bootable: boot.bootable,
                root_block: root_sector,
                bitmap_valid: root.bitmap_valid(),
                label: root.name,
                label_len: root.name_len,
            },
            current_dir: root_sector,
            force_ffs: false,
        })
    }

    /// Volume metadata, fixed for the lifetime of the mount.
    #[inline]
    pub const fn info(&self) -> &VolumeInfo {
        &self.info
    }

    /// Root block sector.
    #[inline]
    pub const fn root_block(&self) -> u32 {
        self.info.root_block
    }

    /// The current directory sector.
    #[inline]
    pub const fn current_dir(&self) -> u32 {
        self.current_dir
    }

    /// The sector device backing this volume.
    #[inline]
    pub const fn device(&self) -> &'a D {
        self.device
    }

    /// Change the current directory.
    ///
    /// A pure state update with no I/O; the target is validated lazily by
    /// the next listing.
    #[inline]
    pub fn change_dir(&mut self, sector: u32) {
        self.current_dir = sector;
    }

    /// Force the FFS content algorithm regardless of the volume variant.
    ///
    /// Diagnostic aid; normal reads derive the algorithm from the
    /// filesystem type's low bit.
    #[inline]
    pub fn set_force_ffs(&mut self, force: bool) {
        self.force_ffs = force;
    }

    /// Iterate over the current directory.
    pub fn read_dir(&self) -> Result<DirIter<'_, D>> {
        self.read_dir_at(self.current_dir)
    }

    /// Iterate over the directory at `sector`.
    ///
    /// The block must be a header block with a valid checksum. A `..`
    /// entry leads the iteration whenever `sector` is not the volume
    /// root.
    pub fn read_dir_at(&self, sector: u32) -> Result<DirIter<'_, D>> {
        let dir = self.dir_block(sector)?;
        let parent = (sector != self.info.root_block).then_some(dir.parent);
        Ok(DirIter::new(self.device, dir.hash_table, parent))
    }

    /// Collect the current directory into a `Vec`, all or nothing.
    #[cfg(feature = "alloc")]
    pub fn list_dir(&self) -> Result<alloc::vec::Vec<DirEntry>> {
        self.list_dir_at(self.current_dir)
    }

    /// Collect the directory at `sector` into a `Vec`, all or nothing.
    ///
    /// Any traversal failure (including `UnknownSecType`) discards the
    /// entries decoded so far.
    #[cfg(feature = "alloc")]
    pub fn list_dir_at(&self, sector: u32) -> Result<alloc::vec::Vec<DirEntry>> {
        self.read_dir_at(sector)?.collect()
    }

    /// Open the file whose header block lives at `sector`.
    ///
    /// The reconstruction algorithm comes from the volume's filesystem
    /// type low bit, unless forced to FFS.
    pub fn read_file(&self, sector: u32) -> Result<FileReader<'_, D>> {
        let ffs = self.info.fs_type.is_ffs() || self.force_ffs;
        FileReader::new(self.device, ffs, sector)
    }

    /// Read a whole file into a `Vec`.
    #[cfg(feature = "alloc")]
    pub fn read_file_to_vec(&self, sector: u32) -> Result<alloc::vec::Vec<u8>> {
        self.read_file(sector)?.read_to_vec()
    }

    /// Look up a name in the directory at `dir_sector`.
    ///
    /// Hashes the name to its slot (with the international table on INTL
    /// volumes) and scans that slot's chain. Comparison is ASCII
    /// case-insensitive.
    pub fn find_entry(&self, dir_sector: u32, name: &[u8]) -> Result<DirEntry> {
        if name.len() > MAX_NAME_LEN {
            return Err(AfsError::NameTooLong);
        }

        let dir = self.dir_block(dir_sector)?;
        let slot = hash_name(name, self.info.fs_type.is_intl());
        let mut sector = dir.hash_table[slot];
        let mut buf = [0u8; BSIZE];

        while sector != 0 {
            self.device
                .read_sector(sector, &mut buf)
                .map_err(|()| AfsError::SectorFetchFailed { sector })?;
            let hdr = HeaderBlock::parse(sector, &buf)?;

            if names_equal(hdr.name(), name) {
                return DirEntry::from_header(sector, &hdr);
            }
            sector = hdr.hash_chain;
        }

        Err(AfsError::EntryNotFound)
    }

    /// Resolve a `/`-separated path from the root directory.
    pub fn find_path(&self, path: &[u8]) -> Result<DirEntry> {
        let mut dir = self.info.root_block;
        let mut found = None;

        for component in path.split(|&b| b == b'/') {
            if component.is_empty() {
                continue;
            }

            let entry = self.find_entry(dir, component)?;
            if entry.is_dir() {
                dir = entry.sector;
            }
            found = Some(entry);
        }

        found.ok_or(AfsError::EntryNotFound)
    }

    fn dir_block(&self, sector: u32) -> Result<DirBlock> {
        let mut buf = [0u8; BSIZE];
        self.device
            .read_sector(sector, &mut buf)
            .map_err(|()| AfsError::SectorFetchFailed { sector })?;
        DirBlock::parse(sector, &buf)
    }
}
