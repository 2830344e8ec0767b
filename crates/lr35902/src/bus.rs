use std::ops::RangeInclusive;

use crate::cartridge::Cartridge;
use crate::error::AddressError;

/// The CPU's view of memory.
///
/// Every addressed access the CPU makes goes through this trait; a failed
/// access aborts the current instruction.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> Result<u8, AddressError>;
    fn write8(&mut self, addr: u16, value: u8) -> Result<(), AddressError>;
}

/// Named ranges of the 16-bit address space.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Region {
    RomBank0,
    RomBankN,
    VideoRam,
    ExternalRam,
    WorkRam0,
    WorkRam1,
    EchoRam,
    Oam,
    Io,
    HighRam,
    InterruptEnable,
}

/// Region table in routing order. The gap 0xFEA0-0xFEFF is deliberately
/// absent, as is everything above 0xFFFF.
const REGIONS: [(Region, RangeInclusive<u32>); 11] = [
    (Region::RomBank0, 0x0000..=0x3FFF),
    (Region::RomBankN, 0x4000..=0x7FFF),
    (Region::VideoRam, 0x8000..=0x9FFF),
    (Region::ExternalRam, 0xA000..=0xBFFF),
    (Region::WorkRam0, 0xC000..=0xCFFF),
    (Region::WorkRam1, 0xD000..=0xDFFF),
    (Region::EchoRam, 0xE000..=0xFDFF),
    (Region::Oam, 0xFE00..=0xFE9F),
    (Region::Io, 0xFF00..=0xFF7F),
    (Region::HighRam, 0xFF80..=0xFFFE),
    (Region::InterruptEnable, 0xFFFF..=0xFFFF),
];

impl Region {
    /// Find the region containing `addr`, first match wins.
    pub fn locate(addr: u32) -> Option<(Region, u32)> {
        REGIONS
            .iter()
            .find(|(_, range)| range.contains(&addr))
            .map(|(region, range)| (*region, *range.start()))
    }

    pub fn range(self) -> RangeInclusive<u32> {
        REGIONS
            .iter()
            .find(|(region, _)| *region == self)
            .map(|(_, range)| range.clone())
            .unwrap_or(0..=0)
    }

    /// Number of bytes the region spans.
    pub fn size(self) -> usize {
        let range = self.range();
        (range.end() - range.start() + 1) as usize
    }
}

/// Segmented memory bus.
///
/// Owns one buffer per RAM-like region, each exactly as large as the range
/// it serves, plus the interrupt-enable byte; ROM ranges are forwarded to
/// the cartridge. Echo RAM is its own buffer, not a mirror of work RAM.
pub struct MemoryBus {
    cartridge: Cartridge,
    video_ram: Box<[u8]>,
    external_ram: Box<[u8]>,
    work_ram0: Box<[u8]>,
    work_ram1: Box<[u8]>,
    echo_ram: Box<[u8]>,
    oam: Box<[u8]>,
    io: Box<[u8]>,
    high_ram: Box<[u8]>,
    interrupt_enable: u8,
}

impl MemoryBus {
    pub fn new(cartridge: Cartridge) -> Self {
        let buffer = |region: Region| vec![0u8; region.size()].into_boxed_slice();
        Self {
            cartridge,
            video_ram: buffer(Region::VideoRam),
            external_ram: buffer(Region::ExternalRam),
            work_ram0: buffer(Region::WorkRam0),
            work_ram1: buffer(Region::WorkRam1),
            echo_ram: buffer(Region::EchoRam),
            oam: buffer(Region::Oam),
            io: buffer(Region::Io),
            high_ram: buffer(Region::HighRam),
            interrupt_enable: 0,
        }
    }

    #[inline]
    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    #[inline]
    pub fn interrupt_enable(&self) -> u8 {
        self.interrupt_enable
    }

    /// Read one byte. Fails for the unusable gap and for addresses above
    /// 0xFFFF.
    pub fn read(&self, addr: u32) -> Result<u8, AddressError> {
        let (region, start) = Region::locate(addr).ok_or(AddressError::read(addr))?;
        let value = match region {
            Region::RomBank0 | Region::RomBankN => self.cartridge.read8(addr as u16),
            Region::InterruptEnable => self.interrupt_enable,
            _ => self.buffer(region)[(addr - start) as usize],
        };
        Ok(value)
    }

    /// Write one byte. Fails for the unusable gap and for addresses above
    /// 0xFFFF; writes into ROM are up to the cartridge.
    pub fn write(&mut self, addr: u32, value: u8) -> Result<(), AddressError> {
        let (region, start) = Region::locate(addr).ok_or(AddressError::write(addr))?;
        match region {
            Region::RomBank0 | Region::RomBankN => self.cartridge.write8(addr as u16, value),
            Region::InterruptEnable => self.interrupt_enable = value,
            _ => self.buffer_mut(region)[(addr - start) as usize] = value,
        }
        Ok(())
    }

    fn buffer(&self, region: Region) -> &[u8] {
        match region {
            Region::VideoRam => &self.video_ram,
            Region::ExternalRam => &self.external_ram,
            Region::WorkRam0 => &self.work_ram0,
            Region::WorkRam1 => &self.work_ram1,
            Region::EchoRam => &self.echo_ram,
            Region::Oam => &self.oam,
            Region::Io => &self.io,
            Region::HighRam => &self.high_ram,
            Region::RomBank0 | Region::RomBankN | Region::InterruptEnable => &[],
        }
    }

    fn buffer_mut(&mut self, region: Region) -> &mut [u8] {
        match region {
            Region::VideoRam => &mut self.video_ram,
            Region::ExternalRam => &mut self.external_ram,
            Region::WorkRam0 => &mut self.work_ram0,
            Region::WorkRam1 => &mut self.work_ram1,
            Region::EchoRam => &mut self.echo_ram,
            Region::Oam => &mut self.oam,
            Region::Io => &mut self.io,
            Region::HighRam => &mut self.high_ram,
            Region::RomBank0 | Region::RomBankN | Region::InterruptEnable => &mut [],
        }
    }
}

impl Bus for MemoryBus {
    #[inline]
    fn read8(&mut self, addr: u16) -> Result<u8, AddressError> {
        self.read(addr.into())
    }

    #[inline]
    fn write8(&mut self, addr: u16, value: u8) -> Result<(), AddressError> {
        self.write(addr.into(), value)
    }
}
