use bitflags::bitflags;

/// A single 8-bit register cell.
///
/// Values are always masked to 8 bits on write, so callers can hand in
/// wider intermediate results straight from arithmetic.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Register(u8);

impl Register {
    #[inline]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(&self) -> u8 {
        self.0
    }

    #[inline]
    pub fn set(&mut self, value: u32) {
        self.0 = (value & 0xFF) as u8;
    }

    /// Signed view of the stored byte, used for relative offsets.
    #[inline]
    pub const fn raw(&self) -> i8 {
        self.0 as i8
    }

    /// Combine two registers into a big-endian 16-bit value.
    #[inline]
    pub const fn combine(high: Register, low: Register) -> u16 {
        u16::from_be_bytes([high.0, low.0])
    }

    /// Write bits 8-15 of `value` into `high` and bits 0-7 into `low`.
    #[inline]
    pub fn split(value: u16, high: &mut Register, low: &mut Register) {
        let [h, l] = value.to_be_bytes();
        high.0 = h;
        low.0 = l;
    }

    #[inline]
    pub fn increment(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    #[inline]
    pub fn decrement(&mut self) {
        self.0 = self.0.wrapping_sub(1);
    }
}

impl From<u8> for Register {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

bitflags! {
    /// Flag bits in the F register.
    ///
    /// Layout (bit index in the byte, from MSB to LSB):
    /// - bit 7: Z (zero)
    /// - bit 6: N (subtract)
    /// - bit 5: H (half carry)
    /// - bit 4: C (carry)
    /// - bits 0–3 are always zero.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct Flags: u8 {
        const ZERO = 1 << 7;
        const SUBTRACT = 1 << 6;
        const HALF_CARRY = 1 << 5;
        const CARRY = 1 << 4;
    }
}

/// The F register.
///
/// Only the four flag bits are ever stored; anything written to the low
/// nibble is dropped.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FlagRegister(Flags);

impl Default for FlagRegister {
    fn default() -> Self {
        Self(Flags::empty())
    }
}

impl FlagRegister {
    #[inline]
    pub const fn get(&self) -> u8 {
        self.0.bits()
    }

    #[inline]
    pub fn set(&mut self, value: u32) {
        self.0 = Flags::from_bits_truncate((value & 0xFF) as u8);
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0 = Flags::empty();
    }

    #[inline]
    pub fn is_set(&self, flag: Flags) -> bool {
        self.0.contains(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flags, enabled: bool) {
        self.0.set(flag, enabled);
    }

    #[inline]
    pub fn zero(&self) -> bool {
        self.is_set(Flags::ZERO)
    }

    #[inline]
    pub fn subtract(&self) -> bool {
        self.is_set(Flags::SUBTRACT)
    }

    #[inline]
    pub fn half_carry(&self) -> bool {
        self.is_set(Flags::HALF_CARRY)
    }

    #[inline]
    pub fn carry(&self) -> bool {
        self.is_set(Flags::CARRY)
    }

    #[inline]
    pub fn set_zero(&mut self, enabled: bool) {
        self.set_flag(Flags::ZERO, enabled);
    }

    #[inline]
    pub fn set_subtract(&mut self, enabled: bool) {
        self.set_flag(Flags::SUBTRACT, enabled);
    }

    #[inline]
    pub fn set_half_carry(&mut self, enabled: bool) {
        self.set_flag(Flags::HALF_CARRY, enabled);
    }

    #[inline]
    pub fn set_carry(&mut self, enabled: bool) {
        self.set_flag(Flags::CARRY, enabled);
    }
}
