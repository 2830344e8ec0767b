use super::register::{FlagRegister, Register};
use crate::instruction::RegisterType;

/// Register file of the LR35902.
///
/// The eight 8-bit registers are stored individually; the 16-bit pairs
/// (AF, BC, DE, HL) only exist as computed views over them, so writing a
/// pair always updates both halves together.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Registers {
    pub a: Register,
    pub f: FlagRegister,
    pub b: Register,
    pub c: Register,
    pub d: Register,
    pub e: Register,
    pub h: Register,
    pub l: Register,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    #[inline]
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a.get(), self.f.get()])
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a.set(a.into());
        // Lower 4 bits of F are always zero.
        self.f.set(f.into());
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        Register::combine(self.b, self.c)
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        Register::split(value, &mut self.b, &mut self.c);
    }

    #[inline]
    pub fn de(&self) -> u16 {
        Register::combine(self.d, self.e)
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        Register::split(value, &mut self.d, &mut self.e);
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        Register::combine(self.h, self.l)
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        Register::split(value, &mut self.h, &mut self.l);
    }

    /// Read any register by type. 8-bit registers are zero-extended.
    pub fn get(&self, register: RegisterType) -> u16 {
        match register {
            RegisterType::A => self.a.get().into(),
            RegisterType::B => self.b.get().into(),
            RegisterType::C => self.c.get().into(),
            RegisterType::D => self.d.get().into(),
            RegisterType::E => self.e.get().into(),
            RegisterType::F => self.f.get().into(),
            RegisterType::H => self.h.get().into(),
            RegisterType::L => self.l.get().into(),
            RegisterType::AF => self.af(),
            RegisterType::BC => self.bc(),
            RegisterType::DE => self.de(),
            RegisterType::HL => self.hl(),
            RegisterType::SP => self.sp,
            RegisterType::PC => self.pc,
        }
    }

    /// Write any register by type. 8-bit registers keep the low byte.
    pub fn set(&mut self, register: RegisterType, value: u16) {
        let byte = u32::from(value);
        match register {
            RegisterType::A => self.a.set(byte),
            RegisterType::B => self.b.set(byte),
            RegisterType::C => self.c.set(byte),
            RegisterType::D => self.d.set(byte),
            RegisterType::E => self.e.set(byte),
            RegisterType::F => self.f.set(byte),
            RegisterType::H => self.h.set(byte),
            RegisterType::L => self.l.set(byte),
            RegisterType::AF => self.set_af(value),
            RegisterType::BC => self.set_bc(value),
            RegisterType::DE => self.set_de(value),
            RegisterType::HL => self.set_hl(value),
            RegisterType::SP => self.sp = value,
            RegisterType::PC => self.pc = value,
        }
    }
}
