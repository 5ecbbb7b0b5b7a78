//! # amifs
//!
//! A `no_std` compatible crate for reading Amiga filesystem disk images.
//!
//! This crate decodes the on-disk structures of the Amiga filesystem family
//! (OFS and FFS, with or without the international and dircache variants)
//! from 512-byte sectors and reconstructs volume metadata, directory
//! listings and file contents from them.
//!
//! ## Features
//!
//! - `no_std` compatible by default
//! - Boot block recognition and the two Amiga checksum algorithms
//! - Hash-table directory traversal with collision chains
//! - OFS linked data chains and FFS block tables with extension blocks
//! - Streaming file reading
//! - Optional header-block sector cache (`alloc`)
//!
//! ## Example
//!
//! ```ignore
//! use amifs::{SectorDevice, Volume};
//!
//! // Implement SectorDevice for your storage
//! struct MyDevice { /* ... */ }
//!
//! impl SectorDevice for MyDevice {
//!     fn read_sector(&self, sector: u32, buf: &mut [u8; 512]) -> Result<(), ()> {
//!         // Fetch the sector from storage
//!         Ok(())
//!     }
//! }
//!
//! let device = MyDevice { /* ... */ };
//! let volume = Volume::mount(&device)?;
//!
//! println!("volume: {:?}", volume.info().label_str());
//! for entry in volume.read_dir()? {
//!     let entry = entry?;
//!     println!("{:?}: {} bytes", entry.name_str(), entry.size);
//! }
//! ```

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

mod block;
#[cfg(feature = "alloc")]
mod cache;
mod checksum;
mod constants;
mod date;
mod dir;
mod error;
mod file;
mod types;
mod utf8;
mod volume;

pub use block::*;
#[cfg(feature = "alloc")]
pub use cache::CachedDevice;
pub use checksum::{boot_sum, check_boot, check_standard, standard_sum};
pub use constants::*;
pub use date::{AmigaDate, CalendarDate};
pub use dir::{DirEntry, DirIter};
pub use error::{AfsError, Result};
pub use file::FileReader;
pub use types::*;
pub use volume::Volume;
