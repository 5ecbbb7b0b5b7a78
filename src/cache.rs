//! Header-block sector cache.

use alloc::collections::BTreeMap;
use core::cell::RefCell;

use crate::checksum::read_u32_be;
use crate::constants::{BSIZE, OFF_TYPE, T_HEADER};
use crate::types::SectorDevice;

/// Caching decorator around a sector device.
///
/// Sectors whose first longword matches `T_HEADER` are kept, keyed by
/// sector number; the boot sectors are never cached. The cache is a pure
/// optimization: bytes are stored verbatim, so a hit is bit-identical to
/// a re-fetch, and decode semantics never depend on cache presence.
///
/// An FFS data block whose payload happens to begin with the header tag
/// produces a benign false-positive entry. This is an accepted
/// approximation of header recognition, not something callers need to
/// guard against.
///
/// The cache is for single-threaded use (interior mutability via
/// `RefCell`), matching the core's synchronous traversal model.
pub struct CachedDevice<D> {
    inner: D,
    sectors: RefCell<BTreeMap<u32, [u8; BSIZE]>>,
}

impl<D: SectorDevice> CachedDevice<D> {
    /// Wrap a device with an empty cache.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            sectors: RefCell::new(BTreeMap::new()),
        }
    }

    /// Number of cached sectors.
    pub fn len(&self) -> usize {
        self.sectors.borrow().len()
    }

    /// True when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.sectors.borrow().is_empty()
    }

    /// Drop all cached sectors.
    pub fn clear(&self) {
        self.sectors.borrow_mut().clear();
    }

    /// Whether a given sector is currently cached.
    pub fn contains(&self, sector: u32) -> bool {
        self.sectors.borrow().contains_key(&sector)
    }

    /// Access the wrapped device.
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Unwrap, discarding the cache.
    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: SectorDevice> SectorDevice for CachedDevice<D> {
    fn read_sector(&self, sector: u32, buf: &mut [u8; BSIZE]) -> Result<(), ()> {
        if let Some(hit) = self.sectors.borrow().get(&sector) {
            *buf = *hit;
            return Ok(());
        }

        self.inner.read_sector(sector, buf)?;

        // Cache only recognized header blocks, never the boot sectors.
        if sector > 1 && read_u32_be(buf, OFF_TYPE) == T_HEADER {
            self.sectors.borrow_mut().insert(sector, *buf);
        }

        Ok(())
    }
}
