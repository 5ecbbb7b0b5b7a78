#![no_main]

use amifs::{SectorDevice, Volume};
use libfuzzer_sys::fuzz_target;

/// A mock sector device backed by fuzzed data.
struct FuzzDevice<'a> {
    data: &'a [u8],
}

impl<'a> FuzzDevice<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl SectorDevice for FuzzDevice<'_> {
    fn read_sector(&self, sector: u32, buf: &mut [u8; 512]) -> Result<(), ()> {
        let offset = (sector as usize) * 512;
        if offset + 512 <= self.data.len() {
            buf.copy_from_slice(&self.data[offset..offset + 512]);
            Ok(())
        } else if offset < self.data.len() {
            // Partial sector - fill with zeros
            buf.fill(0);
            let available = self.data.len() - offset;
            buf[..available].copy_from_slice(&self.data[offset..]);
            Ok(())
        } else {
            Err(())
        }
    }
}

fuzz_target!(|data: &[u8]| {
    // Need at least the boot sectors plus a root block
    if data.len() < 1536 {
        return;
    }

    let device = FuzzDevice::new(data);

    // Fuzzed images rarely put the root at 880; mount at sector 2 so the
    // loader actually sees fuzzed bytes.
    let volume = match Volume::with_root(&device, 2) {
        Ok(v) => v,
        Err(_) => return,
    };

    let _ = volume.info().label_str();

    let iter = match volume.read_dir() {
        Ok(iter) => iter,
        Err(_) => return,
    };

    for entry in iter.flatten() {
        let _ = entry.name();
        let _ = entry.name_str();
        let _ = entry.date.to_calendar();

        // If it's a file, try to stream a bounded amount of it
        if entry.is_file() {
            if let Ok(mut reader) = volume.read_file(entry.sector) {
                let mut buf = [0u8; 512];
                for _ in 0..64 {
                    match reader.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(_) => {}
                    }
                }
            }
        }
    }
});
