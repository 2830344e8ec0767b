use super::*;

fn rom_with_type(byte: u8) -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];
    rom[CARTRIDGE_TYPE_OFFSET] = byte;
    rom
}

#[test]
fn header_byte_classification() {
    assert_eq!(RomType::from_header_byte(0x00), RomType::RomOnly);
    assert_eq!(RomType::from_header_byte(0x01), RomType::Mbc1);
    assert_eq!(RomType::from_header_byte(0x03), RomType::Mbc1);
    assert_eq!(RomType::from_header_byte(0x06), RomType::Mbc2);
    assert_eq!(RomType::from_header_byte(0x13), RomType::Mbc3);
    assert_eq!(RomType::from_header_byte(0x1B), RomType::Mbc5);
    assert_eq!(RomType::from_header_byte(0xFC), RomType::Other(0xFC));
}

#[test]
fn from_rom_reads_the_header() {
    assert_eq!(Cartridge::from_rom(rom_with_type(0x00)).rom_type(), RomType::RomOnly);
    assert_eq!(Cartridge::from_rom(rom_with_type(0x11)).rom_type(), RomType::Mbc3);
}

#[test]
fn short_images_are_rom_only() {
    let cartridge = Cartridge::from_rom(vec![0x00, 0x01, 0x02]);
    assert_eq!(cartridge.rom_type(), RomType::RomOnly);
    assert_eq!(cartridge.len(), 3);
    assert!(!cartridge.is_empty());
}

#[test]
fn reads_past_the_image_are_open_bus() {
    let cartridge = Cartridge::from_rom(vec![0x12, 0x34]);
    assert_eq!(cartridge.read8(0x0001), 0x34);
    assert_eq!(cartridge.read8(0x0002), OPEN_BUS);
    assert_eq!(cartridge.read8(0x7FFF), OPEN_BUS);
    assert!(Cartridge::from_rom(Vec::new()).is_empty());
}

#[test]
fn rom_only_drops_writes() {
    let mut cartridge = Cartridge::from_rom(rom_with_type(0x00));
    cartridge.write8(0x0100, 0xAB);
    assert_eq!(cartridge.read8(0x0100), 0x00);
}

#[test]
fn controller_types_write_into_the_image() {
    let mut cartridge = Cartridge::from_rom(rom_with_type(0x19));
    assert!(cartridge.rom_type().accepts_writes());
    cartridge.write8(0x0100, 0xAB);
    assert_eq!(cartridge.read8(0x0100), 0xAB);

    // Past the end: nowhere to store it.
    let mut short = Cartridge::with_type(vec![0u8; 4], RomType::Mbc5);
    short.write8(0x0010, 0xAB);
    assert_eq!(short.read8(0x0010), OPEN_BUS);
}
