/// Header offset of the cartridge hardware type byte.
const CARTRIDGE_TYPE_OFFSET: usize = 0x0147;

/// Byte returned for ROM addresses past the end of the loaded image.
const OPEN_BUS: u8 = 0xFF;

/// Cartridge hardware classification, read from header byte 0x0147.
///
/// Only the distinction between "plain ROM" and "has a controller" matters
/// to the bus; the controller families are kept for logging.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RomType {
    RomOnly,
    Mbc1,
    Mbc2,
    Mbc3,
    Mbc5,
    Other(u8),
}

impl RomType {
    pub fn from_header_byte(byte: u8) -> Self {
        match byte {
            0x00 => RomType::RomOnly,
            0x01..=0x03 => RomType::Mbc1,
            0x05 | 0x06 => RomType::Mbc2,
            0x0F..=0x13 => RomType::Mbc3,
            0x19..=0x1E => RomType::Mbc5,
            other => RomType::Other(other),
        }
    }

    #[inline]
    pub fn accepts_writes(self) -> bool {
        self != RomType::RomOnly
    }
}

/// A loaded cartridge image.
///
/// The bus forwards everything in 0x0000-0x7FFF here.
#[derive(Clone, Debug)]
pub struct Cartridge {
    rom: Vec<u8>,
    rom_type: RomType,
}

impl Cartridge {
    /// Wrap a ROM image, classifying it from its header. Images too short
    /// to carry a header are treated as ROM-only.
    pub fn from_rom(rom: Vec<u8>) -> Self {
        let rom_type = rom
            .get(CARTRIDGE_TYPE_OFFSET)
            .copied()
            .map_or(RomType::RomOnly, RomType::from_header_byte);
        Self::with_type(rom, rom_type)
    }

    /// Wrap a ROM image with an explicit classification, ignoring the
    /// header.
    pub fn with_type(rom: Vec<u8>, rom_type: RomType) -> Self {
        Self { rom, rom_type }
    }

    #[inline]
    pub fn rom_type(&self) -> RomType {
        self.rom_type
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rom.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rom.is_empty()
    }

    pub fn read8(&self, addr: u16) -> u8 {
        self.rom.get(addr as usize).copied().unwrap_or(OPEN_BUS)
    }

    /// Write into the image.
    ///
    /// ROM-only cartridges have nothing to write to; the write is dropped
    /// and logged. Controller cartridges store the byte in the image when
    /// it falls inside it (bank switching is not modelled).
    pub fn write8(&mut self, addr: u16, value: u8) {
        if !self.rom_type.accepts_writes() {
            log::debug!(
                "ROM-only cartridge ignored write of 0x{value:02X} to 0x{addr:04X}"
            );
            return;
        }

        match self.rom.get_mut(addr as usize) {
            Some(byte) => *byte = value,
            None => log::debug!(
                "{:?} cartridge write of 0x{value:02X} to 0x{addr:04X} is past the {}-byte image",
                self.rom_type,
                self.rom.len()
            ),
        }
    }
}

#[cfg(test)]
mod tests;
