//! Integration tests over synthetic in-memory disk images.

use core::cell::RefCell;

use amifs::*;

/// Mock sector device holding an in-memory image and a fetch log.
#[derive(Debug)]
struct MockDevice {
    sectors: Vec<[u8; 512]>,
    fetched: RefCell<Vec<u32>>,
}

impl MockDevice {
    fn new(num_sectors: usize) -> Self {
        Self {
            sectors: vec![[0u8; 512]; num_sectors],
            fetched: RefCell::new(Vec::new()),
        }
    }

    fn set(&mut self, sector: u32, data: &[u8; 512]) {
        self.sectors[sector as usize] = *data;
    }

    fn sector_mut(&mut self, sector: u32) -> &mut [u8; 512] {
        &mut self.sectors[sector as usize]
    }

    fn fetched(&self) -> Vec<u32> {
        self.fetched.borrow().clone()
    }

    fn clear_log(&self) {
        self.fetched.borrow_mut().clear();
    }
}

impl SectorDevice for MockDevice {
    fn read_sector(&self, sector: u32, buf: &mut [u8; 512]) -> core::result::Result<(), ()> {
        self.fetched.borrow_mut().push(sector);
        let data = self.sectors.get(sector as usize).ok_or(())?;
        *buf = *data;
        Ok(())
    }
}

fn write_u32_be(buf: &mut [u8], offset: usize, val: u32) {
    buf[offset..offset + 4].copy_from_slice(&val.to_be_bytes());
}

/// Compute and store the standard checksum of a sector.
fn set_checksum(buf: &mut [u8; 512], checksum_offset: usize) {
    let mut scratch = *buf;
    scratch[checksum_offset..checksum_offset + 4].fill(0);
    let mut sum: u32 = 0;
    for i in 0..128 {
        let word = u32::from_be_bytes(scratch[i * 4..i * 4 + 4].try_into().unwrap());
        sum = sum.wrapping_add(word);
    }
    write_u32_be(buf, checksum_offset, sum.wrapping_neg());
}

/// Compute and store the boot block checksum across both sectors.
fn set_boot_checksum(sector0: &mut [u8; 512], sector1: &[u8; 512]) {
    write_u32_be(sector0, 4, 0);
    let mut sum: u32 = 0;
    for i in 0..256 {
        if i == 1 {
            continue;
        }
        let src = if i < 128 { &sector0[..] } else { &sector1[..] };
        let off = (i % 128) * 4;
        let word = u32::from_be_bytes(src[off..off + 4].try_into().unwrap());
        let next = sum.wrapping_add(word);
        sum = next.wrapping_add((next < sum) as u32);
    }
    write_u32_be(sector0, 4, !sum);
}

/// Boot sectors with the given filesystem type code and root pointer.
fn create_boot_block(fs_code: u8, root: u32) -> ([u8; 512], [u8; 512]) {
    let mut sector0 = [0u8; 512];
    let sector1 = [0u8; 512];

    sector0[0..3].copy_from_slice(b"DOS");
    sector0[3] = fs_code;
    write_u32_be(&mut sector0, 8, root);

    (sector0, sector1)
}

/// Root block with a label and hash table entries.
fn create_root_block(label: &[u8], bm_page: u32, hash_entries: &[(usize, u32)]) -> [u8; 512] {
    let mut buf = [0u8; 512];

    write_u32_be(&mut buf, 0, 2); // T_HEADER
    write_u32_be(&mut buf, 12, 72); // hash table size

    for &(slot, sector) in hash_entries {
        write_u32_be(&mut buf, 0x18 + slot * 4, sector);
    }

    write_u32_be(&mut buf, 0x138, 0xFFFF_FFFF); // bm_flag = valid
    write_u32_be(&mut buf, 0x13C, bm_page);

    buf[0x1B0] = label.len() as u8;
    buf[0x1B1..0x1B1 + label.len()].copy_from_slice(label);

    write_u32_be(&mut buf, 508, 1); // ST_ROOT
    set_checksum(&mut buf, 20);
    buf
}

/// Bitmap block; its checksum lives at offset 0.
fn create_bitmap_block() -> [u8; 512] {
    let mut buf = [0xFFu8; 512];
    set_checksum(&mut buf, 0);
    buf
}

/// User directory header block.
fn create_dir_header(
    name: &[u8],
    parent: u32,
    hash_entries: &[(usize, u32)],
    hash_chain: u32,
) -> [u8; 512] {
    let mut buf = [0u8; 512];

    write_u32_be(&mut buf, 0, 2); // T_HEADER
    for &(slot, sector) in hash_entries {
        write_u32_be(&mut buf, 0x18 + slot * 4, sector);
    }

    buf[0x1B0] = name.len() as u8;
    buf[0x1B1..0x1B1 + name.len()].copy_from_slice(name);

    write_u32_be(&mut buf, 0x1F0, hash_chain);
    write_u32_be(&mut buf, 0x1F4, parent);
    write_u32_be(&mut buf, 508, 2); // ST_USERDIR
    set_checksum(&mut buf, 20);
    buf
}

/// File header block. `data_table` is laid out in reverse on disk.
#[allow(clippy::too_many_arguments)]
fn create_file_header(
    name: &[u8],
    size: u32,
    parent: u32,
    first_data: u32,
    data_table: &[u32],
    extension: u32,
    hash_chain: u32,
    sec_type: u32,
) -> [u8; 512] {
    let mut buf = [0u8; 512];

    write_u32_be(&mut buf, 0, 2); // T_HEADER
    write_u32_be(&mut buf, 8, data_table.len() as u32); // high_seq
    write_u32_be(&mut buf, 16, first_data);

    for (i, &sector) in data_table.iter().enumerate() {
        write_u32_be(&mut buf, 0x18 + (71 - i) * 4, sector);
    }

    write_u32_be(&mut buf, 0x144, size);

    buf[0x1B0] = name.len() as u8;
    buf[0x1B1..0x1B1 + name.len()].copy_from_slice(name);

    write_u32_be(&mut buf, 0x1F0, hash_chain);
    write_u32_be(&mut buf, 0x1F4, parent);
    write_u32_be(&mut buf, 0x1F8, extension);
    write_u32_be(&mut buf, 508, sec_type);
    set_checksum(&mut buf, 20);
    buf
}

/// OFS data block carrying `data` and a next pointer.
fn create_ofs_data_block(header_key: u32, seq: u32, data: &[u8], next: u32) -> [u8; 512] {
    let mut buf = [0u8; 512];

    write_u32_be(&mut buf, 0, 8); // T_DATA
    write_u32_be(&mut buf, 4, header_key);
    write_u32_be(&mut buf, 8, seq);
    write_u32_be(&mut buf, 12, data.len() as u32);
    write_u32_be(&mut buf, 16, next);
    buf[0x18..0x18 + data.len()].copy_from_slice(data);

    set_checksum(&mut buf, 20);
    buf
}

/// FFS file extension block.
fn create_file_ext_block(data_table: &[u32], extension: u32) -> [u8; 512] {
    let mut buf = [0u8; 512];

    write_u32_be(&mut buf, 0, 16); // T_LIST
    write_u32_be(&mut buf, 8, data_table.len() as u32);

    for (i, &sector) in data_table.iter().enumerate() {
        write_u32_be(&mut buf, 0x18 + (71 - i) * 4, sector);
    }

    write_u32_be(&mut buf, 0x1F8, extension);
    write_u32_be(&mut buf, 508, 0xFFFF_FFFD); // ST_FILE
    set_checksum(&mut buf, 20);
    buf
}

/// Minimal valid disk: boot, root at 880, bitmap at 881.
fn base_disk(fs_code: u8, hash_entries: &[(usize, u32)]) -> MockDevice {
    let mut device = MockDevice::new(1760);
    let (s0, s1) = create_boot_block(fs_code, 880);
    device.set(0, &s0);
    device.set(1, &s1);
    device.set(880, &create_root_block(b"Workbench", 881, hash_entries));
    device.set(881, &create_bitmap_block());
    device
}

// ----- mounting -----

#[test]
fn mount_reads_volume_info() {
    let device = base_disk(1, &[]);
    let volume = Volume::mount(&device).unwrap();
    let info = volume.info();

    assert_eq!(info.fs_type, FsType::Ffs);
    assert!(info.fs_type.is_ffs());
    assert_eq!(info.root_block, 880);
    assert_eq!(info.label(), b"Workbench");
    assert_eq!(info.label_str(), Some("Workbench"));
    assert!(info.bitmap_valid);
    // No boot checksum was written, so the disk is not bootable.
    assert!(!info.bootable);
}

#[test]
fn mount_detects_bootable_disk() {
    let mut device = base_disk(3, &[]);
    let s1 = device.sectors[1];
    let mut s0 = device.sectors[0];
    s0[12] = 0x60; // some boot code
    set_boot_checksum(&mut s0, &s1);
    device.set(0, &s0);

    let volume = Volume::mount(&device).unwrap();
    assert!(volume.info().bootable);
    assert_eq!(volume.info().fs_type, FsType::FfsIntl);
}

#[test]
fn mount_rejects_non_dos_disk_without_further_reads() {
    let mut device = base_disk(1, &[]);
    device.sector_mut(0)[0..3].copy_from_slice(b"FAT");

    assert_eq!(Volume::mount(&device).unwrap_err(), AfsError::NotADosDisk);
    // Only the two boot sectors were touched.
    assert_eq!(device.fetched(), vec![0, 1]);
}

#[test]
fn mount_rejects_unknown_fs_type() {
    let mut device = base_disk(1, &[]);
    device.sector_mut(0)[3] = 6;

    assert_eq!(
        Volume::mount(&device).unwrap_err(),
        AfsError::UnknownFsType { code: 6 }
    );
}

#[test]
fn zero_root_pointer_defaults_to_880() {
    let mut device = base_disk(1, &[]);
    write_u32_be(device.sector_mut(0), 8, 0);

    let volume = Volume::mount(&device).unwrap();
    assert_eq!(volume.root_block(), 880);
}

#[test]
fn mount_rejects_corrupt_root_checksum() {
    let mut device = base_disk(1, &[]);
    device.sector_mut(880)[100] ^= 1;

    assert_eq!(
        Volume::mount(&device).unwrap_err(),
        AfsError::ChecksumMismatch { sector: 880 }
    );
}

#[test]
fn mount_rejects_wrong_root_sec_type() {
    let mut device = base_disk(1, &[]);
    let root = device.sector_mut(880);
    write_u32_be(root, 508, 2); // ST_USERDIR instead of ST_ROOT
    set_checksum(root, 20);

    assert_eq!(
        Volume::mount(&device).unwrap_err(),
        AfsError::RootBlockInvalid { sector: 880 }
    );
}

#[test]
fn mount_rejects_corrupt_bitmap() {
    let mut device = base_disk(1, &[]);
    device.sector_mut(881)[8] ^= 1;

    assert_eq!(
        Volume::mount(&device).unwrap_err(),
        AfsError::BitmapInvalid { sector: 881 }
    );
}

#[test]
fn mount_reports_untrusted_bitmap_flag() {
    let mut device = base_disk(1, &[]);
    let root = device.sector_mut(880);
    write_u32_be(root, 0x138, 0); // bm_flag cleared
    set_checksum(root, 20);

    let volume = Volume::mount(&device).unwrap();
    assert!(!volume.info().bitmap_valid);
}

// ----- directory traversal -----

#[test]
fn root_listing_has_no_parent_entry() {
    let slot = hash_name(b"Prefs", false);
    let mut device = base_disk(1, &[(slot, 90)]);
    device.set(90, &create_dir_header(b"Prefs", 880, &[], 0));

    let volume = Volume::mount(&device).unwrap();
    let entries = volume.list_dir().unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name(), b"Prefs");
    assert!(entries[0].is_dir());
    assert_eq!(entries[0].sector, 90);
}

#[test]
fn subdir_listing_starts_with_parent_entry() {
    let slot = hash_name(b"Prefs", false);
    let mut device = base_disk(1, &[(slot, 90)]);
    let inner = hash_name(b"Env-Archive", false);
    device.set(90, &create_dir_header(b"Prefs", 880, &[(inner, 91)], 0));
    device.set(91, &create_dir_header(b"Env-Archive", 90, &[], 0));

    let volume = Volume::mount(&device).unwrap();
    let entries = volume.list_dir_at(90).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name(), b"..");
    assert!(entries[0].is_dir());
    assert_eq!(entries[0].sector, 880);
    assert_eq!(entries[1].name(), b"Env-Archive");
}

#[test]
fn listing_follows_slot_order_then_chain_order() {
    // Two entries forced into slot 5 (chained), one in slot 40.
    let mut device = base_disk(1, &[(5, 60), (40, 62)]);
    device.set(
        60,
        &create_file_header(b"first", 10, 880, 0, &[], 0, 61, 0xFFFF_FFFD),
    );
    device.set(
        61,
        &create_file_header(b"second", 20, 880, 0, &[], 0, 0, 0xFFFF_FFFD),
    );
    device.set(62, &create_dir_header(b"later", 880, &[], 0));

    let volume = Volume::mount(&device).unwrap();
    let entries = volume.list_dir().unwrap();

    let names: Vec<&[u8]> = entries.iter().map(|e| e.name()).collect();
    assert_eq!(names, vec![&b"first"[..], &b"second"[..], &b"later"[..]]);
    assert_eq!(entries[0].size, 10);
    assert_eq!(entries[1].size, 20);
}

#[test]
fn link_entries_are_classified_not_followed() {
    let mut device = base_disk(1, &[(7, 70)]);
    device.set(
        70,
        &create_file_header(b"Ram Disk", 0, 880, 0, &[], 0, 0, 3), // ST_SOFTLINK
    );

    let volume = Volume::mount(&device).unwrap();
    let entries = volume.list_dir().unwrap();

    assert_eq!(entries.len(), 1);
    assert!(entries[0].is_link());
}

#[test]
fn unknown_sec_type_aborts_whole_listing() {
    let mut device = base_disk(1, &[(3, 60), (50, 62)]);
    device.set(
        60,
        &create_file_header(b"good", 1, 880, 0, &[], 0, 0, 0xFFFF_FFFD),
    );
    // Valid header block with a nonsense secondary type.
    device.set(62, &create_file_header(b"bad", 0, 880, 0, &[], 0, 0, 0x99));

    let volume = Volume::mount(&device).unwrap();

    // Collecting fails as a whole.
    assert_eq!(
        volume.list_dir().unwrap_err(),
        AfsError::UnknownSecType {
            sector: 62,
            sec_type: 0x99
        }
    );

    // The lazy iterator yields the good entry, the error, then fuses.
    let mut iter = volume.read_dir().unwrap();
    assert_eq!(iter.next().unwrap().unwrap().name(), b"good");
    assert!(iter.next().unwrap().is_err());
    assert!(iter.next().is_none());
}

#[test]
fn corrupt_entry_name_aborts_listing() {
    let mut device = base_disk(1, &[(3, 60)]);
    let mut entry = create_file_header(b"x", 1, 880, 0, &[], 0, 0, 0xFFFF_FFFD);
    entry[0x1B0] = 31;
    set_checksum(&mut entry, 20);
    device.set(60, &entry);

    let volume = Volume::mount(&device).unwrap();
    assert_eq!(
        volume.list_dir().unwrap_err(),
        AfsError::InvalidName { sector: 60, len: 31 }
    );
}

#[test]
fn change_dir_is_lazy() {
    let mut device = base_disk(1, &[]);
    device.set(90, &create_dir_header(b"Devs", 880, &[], 0));

    let mut volume = Volume::mount(&device).unwrap();
    device.clear_log();

    // No I/O happens on the state update itself, even for a bogus target.
    volume.change_dir(1759);
    assert!(device.fetched().is_empty());

    volume.change_dir(90);
    let entries = volume.list_dir().unwrap();
    assert_eq!(entries[0].name(), b"..");
}

// ----- name lookup -----

#[test]
fn find_entry_walks_the_hash_chain() {
    let slot = hash_name(b"S", false);
    let mut device = base_disk(1, &[(slot, 60)]);
    // A colliding entry sits in front of the one we want.
    device.set(60, &create_dir_header(b"decoy", 880, &[], 61));
    device.set(61, &create_dir_header(b"S", 880, &[], 0));

    let volume = Volume::mount(&device).unwrap();
    let entry = volume.find_entry(880, b"s").unwrap(); // case-insensitive
    assert_eq!(entry.sector, 61);

    assert_eq!(
        volume.find_entry(880, b"missing").unwrap_err(),
        AfsError::EntryNotFound
    );
    assert_eq!(
        volume.find_entry(880, &[b'x'; 31]).unwrap_err(),
        AfsError::NameTooLong
    );
}

#[test]
fn find_path_descends_directories() {
    let s_slot = hash_name(b"S", false);
    let mut device = base_disk(1, &[(s_slot, 90)]);
    let seq_slot = hash_name(b"Startup-Sequence", false);
    device.set(90, &create_dir_header(b"S", 880, &[(seq_slot, 91)], 0));
    device.set(
        91,
        &create_file_header(b"Startup-Sequence", 123, 90, 0, &[], 0, 0, 0xFFFF_FFFD),
    );

    let volume = Volume::mount(&device).unwrap();
    let entry = volume.find_path(b"S/Startup-Sequence").unwrap();
    assert_eq!(entry.sector, 91);
    assert!(entry.is_file());
    assert_eq!(entry.size, 123);
}

// ----- OFS file reading -----

fn ofs_disk_with_file(sizes: &[usize]) -> (MockDevice, u32, Vec<u8>) {
    let slot = hash_name(b"readme", false);
    let mut device = base_disk(0, &[(slot, 50)]);

    let total: usize = sizes.iter().sum();
    let mut expected = Vec::new();
    let first_data = 100u32;

    for (i, &size) in sizes.iter().enumerate() {
        let fill = (b'a' + i as u8) % 255;
        let data = vec![fill; size];
        expected.extend_from_slice(&data);
        let next = if i + 1 < sizes.len() {
            first_data + i as u32 + 1
        } else {
            0
        };
        device.set(
            first_data + i as u32,
            &create_ofs_data_block(50, i as u32 + 1, &data, next),
        );
    }

    device.set(
        50,
        &create_file_header(
            b"readme",
            total as u32,
            880,
            first_data,
            &[],
            0,
            0,
            0xFFFF_FFFD,
        ),
    );

    (device, 50, expected)
}

#[test]
fn ofs_file_spans_linked_data_blocks() {
    let (device, sector, expected) = ofs_disk_with_file(&[488, 488, 37]);
    let volume = Volume::mount(&device).unwrap();

    let content = volume.read_file_to_vec(sector).unwrap();
    assert_eq!(content.len(), 1013);
    assert_eq!(content, expected);
}

#[test]
fn ofs_single_partial_block() {
    let (device, sector, expected) = ofs_disk_with_file(&[37]);
    let volume = Volume::mount(&device).unwrap();
    assert_eq!(volume.read_file_to_vec(sector).unwrap(), expected);
}

#[test]
fn ofs_truncated_chain_is_detected() {
    let (mut device, sector, _) = ofs_disk_with_file(&[488, 488, 37]);
    // Cut the chain after the first block.
    let data = device.sectors[100];
    let mut cut = data;
    write_u32_be(&mut cut, 16, 0);
    set_checksum(&mut cut, 20);
    device.set(100, &cut);

    let volume = Volume::mount(&device).unwrap();
    assert_eq!(
        volume.read_file_to_vec(sector).unwrap_err(),
        AfsError::TruncatedFile {
            expected: 1013,
            actual: 488
        }
    );
}

#[test]
fn ofs_data_block_with_wrong_type_is_rejected() {
    let (mut device, sector, _) = ofs_disk_with_file(&[100]);
    let mut bad = device.sectors[100];
    write_u32_be(&mut bad, 0, 2); // T_HEADER instead of T_DATA
    set_checksum(&mut bad, 20);
    device.set(100, &bad);

    let volume = Volume::mount(&device).unwrap();
    assert_eq!(
        volume.read_file_to_vec(sector).unwrap_err(),
        AfsError::BadBlockType {
            sector: 100,
            expected: 8,
            found: 2
        }
    );
}

#[test]
fn partial_reads_hit_block_boundaries() {
    let (device, sector, expected) = ofs_disk_with_file(&[488, 100]);
    let volume = Volume::mount(&device).unwrap();
    let mut reader = volume.read_file(sector).unwrap();

    assert_eq!(reader.size(), 588);

    let mut out = Vec::new();
    let mut chunk = [0u8; 100];
    loop {
        let n = reader.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        out.extend_from_slice(&chunk[..n]);
    }
    assert_eq!(out, expected);
    assert!(reader.is_eof());

    reader.reset();
    assert_eq!(reader.remaining(), 588);
    reader.seek(490).unwrap();
    let n = reader.read(&mut chunk).unwrap();
    assert_eq!(&chunk[..n], &expected[490..490 + n]);
}

// ----- FFS file reading -----

fn ffs_disk_with_file(size: u32, data_sectors: &[u32], split: usize) -> (MockDevice, Vec<u8>) {
    let slot = hash_name(b"big", false);
    let mut device = base_disk(1, &[(slot, 50)]);

    let mut expected = Vec::new();
    let mut remaining = size as usize;
    for &sector in data_sectors {
        let fill = (sector & 0xFF) as u8;
        let used = remaining.min(512);
        device.set(sector, &[fill; 512]);
        expected.extend_from_slice(&vec![fill; used]);
        remaining -= used;
    }
    assert_eq!(remaining, 0);

    let (head, tail) = data_sectors.split_at(split.min(data_sectors.len()));
    let extension = if tail.is_empty() { 0 } else { 500 };
    if !tail.is_empty() {
        device.set(500, &create_file_ext_block(tail, 0));
    }

    device.set(
        50,
        &create_file_header(b"big", size, 880, 0, head, extension, 0, 0xFFFF_FFFD),
    );

    (device, expected)
}

#[test]
fn ffs_small_file_reads_partial_block() {
    let (device, expected) = ffs_disk_with_file(100, &[200], 1);
    let volume = Volume::mount(&device).unwrap();

    let content = volume.read_file_to_vec(50).unwrap();
    assert_eq!(content.len(), 100);
    assert_eq!(content, expected);
}

#[test]
fn ffs_file_follows_extension_chain() {
    // 72 table entries in the header, 3 more behind an extension block;
    // the last block is partial.
    let data_sectors: Vec<u32> = (200..275).collect();
    let size = 74 * 512 + 37;
    let (device, expected) = ffs_disk_with_file(size, &data_sectors, 72);

    let volume = Volume::mount(&device).unwrap();
    let content = volume.read_file_to_vec(50).unwrap();

    assert_eq!(content.len(), size as usize);
    assert_eq!(content, expected);
    // First byte served from the extension's first table entry.
    assert_eq!(content[72 * 512], (272u32 & 0xFF) as u8);
}

#[test]
fn ffs_missing_extension_is_truncation() {
    let data_sectors: Vec<u32> = (200..203).collect();
    let size = 3 * 512;
    let (mut device, _) = ffs_disk_with_file(size, &data_sectors, 2);
    // Drop the extension pointer from the header.
    let mut header = device.sectors[50];
    write_u32_be(&mut header, 0x1F8, 0);
    set_checksum(&mut header, 20);
    device.set(50, &header);

    let volume = Volume::mount(&device).unwrap();
    assert_eq!(
        volume.read_file_to_vec(50).unwrap_err(),
        AfsError::TruncatedFile {
            expected: size,
            actual: 2 * 512
        }
    );
}

#[test]
fn force_ffs_overrides_the_variant_bit() {
    // An OFS-typed volume whose file is laid out FFS style.
    let (mut device, expected) = ffs_disk_with_file(700, &[200, 201], 2);
    device.sector_mut(0)[3] = 0; // retype the volume as OFS

    let mut volume = Volume::mount(&device).unwrap();
    assert!(!volume.info().fs_type.is_ffs());

    volume.set_force_ffs(true);
    assert_eq!(volume.read_file_to_vec(50).unwrap(), expected);
}

// ----- empty files and header sanity -----

#[test]
fn empty_file_returns_no_bytes_without_data_fetch() {
    for fs_code in [0u8, 1] {
        let slot = hash_name(b"empty", false);
        let mut device = base_disk(fs_code, &[(slot, 50)]);
        device.set(
            50,
            &create_file_header(b"empty", 0, 880, 0, &[], 0, 0, 0xFFFF_FFFD),
        );

        let volume = Volume::mount(&device).unwrap();
        device.clear_log();

        let content = volume.read_file_to_vec(50).unwrap();
        assert!(content.is_empty());
        // Only the header itself was fetched.
        assert_eq!(device.fetched(), vec![50]);
    }
}

#[test]
fn reading_a_directory_as_file_fails_sanity_check() {
    let mut device = base_disk(1, &[(4, 90)]);
    device.set(90, &create_dir_header(b"Devs", 880, &[], 0));

    let volume = Volume::mount(&device).unwrap();
    assert_eq!(
        volume.read_file(90).unwrap_err(),
        AfsError::FileHeaderInvalid { sector: 90 }
    );
}

#[test]
fn corrupt_file_header_checksum_is_reported() {
    let (mut device, sector, _) = ofs_disk_with_file(&[10]);
    device.sector_mut(50)[200] ^= 1;

    let volume = Volume::mount(&device).unwrap();
    assert_eq!(
        volume.read_file(sector).unwrap_err(),
        AfsError::ChecksumMismatch { sector: 50 }
    );
}

// ----- sector cache -----

#[test]
fn cached_device_serves_identical_listings_with_fewer_fetches() {
    let slot = hash_name(b"Prefs", false);
    let mut device = base_disk(1, &[(slot, 90)]);
    device.set(90, &create_dir_header(b"Prefs", 880, &[], 0));

    let cached = CachedDevice::new(device);
    let volume = Volume::mount(&cached).unwrap();

    let first = volume.list_dir().unwrap();
    let fetches_after_first = cached.inner().fetched().len();
    let second = volume.list_dir().unwrap();

    assert_eq!(first.len(), second.len());
    assert_eq!(first[0].name(), second[0].name());
    // The root and the entry header both came from the cache.
    assert_eq!(cached.inner().fetched().len(), fetches_after_first);
    assert!(cached.contains(880));
    assert!(cached.contains(90));
    assert!(!cached.contains(0));
}

#[test]
fn with_root_mounts_non_standard_layouts() {
    let mut device = MockDevice::new(1760);
    let (s0, s1) = create_boot_block(1, 0); // pointer left zero
    device.set(0, &s0);
    device.set(1, &s1);
    device.set(700, &create_root_block(b"Odd", 701, &[]));
    device.set(701, &create_bitmap_block());

    let volume = Volume::with_root(&device, 700).unwrap();
    assert_eq!(volume.root_block(), 700);
    assert_eq!(volume.info().label(), b"Odd");
}
