#![no_main]

use amifs::{boot_sum, check_boot, check_standard, standard_sum};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // standard_sum needs 512 bytes
    if data.len() >= 512 {
        let block_buf: &[u8; 512] = data[..512].try_into().unwrap();

        // Try different checksum offsets, including the bitmap's 0
        for offset in [0, 4, 8, 12, 16, 20, 24, 508].iter() {
            let sum = standard_sum(block_buf, *offset);
            let _ = sum;
            let _ = check_standard(block_buf, *offset);
        }
    }

    // boot_sum needs 1024 bytes
    if data.len() >= 1024 {
        let boot_buf: &[u8; 1024] = data[..1024].try_into().unwrap();
        let _ = boot_sum(boot_buf);
        let _ = check_boot(boot_buf);
    }
});
