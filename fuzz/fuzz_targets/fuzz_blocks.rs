#![no_main]

use amifs::{BootBlock, DirBlock, FileExtBlock, HeaderBlock, OfsDataBlock, RootBlock};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Boot block parsing (needs 1024 bytes)
    if data.len() >= 1024 {
        let boot_buf: &[u8; 1024] = data[..1024].try_into().unwrap();
        let _ = BootBlock::parse(boot_buf);
    }

    // Single block parsing (needs 512 bytes)
    if data.len() >= 512 {
        let block_buf: &[u8; 512] = data[..512].try_into().unwrap();

        // Try parsing as different block types
        let _ = RootBlock::parse(880, block_buf);
        let _ = DirBlock::parse(880, block_buf);
        let _ = HeaderBlock::parse(881, block_buf);
        let _ = FileExtBlock::parse(882, block_buf);
        let _ = OfsDataBlock::parse(883, block_buf);
    }
});
