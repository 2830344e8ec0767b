mod alu;
mod exec;
mod helpers;
pub mod register;
mod regs;

pub use register::{FlagRegister, Flags, Register};
pub use regs::Registers;

use crate::bus::Bus;
use crate::error::{AddressError, StepError};
use crate::instruction::{self, RegisterType};

/// LR35902 CPU core.
///
/// Holds the register file, the halted latch, the interrupt master enable
/// latch and a running cycle counter. It owns no memory: every addressed
/// access goes through the [`Bus`] handed to [`Cpu::step`].
///
/// One cycle is counted per bus access and per register-pair write, so an
/// instruction's cost is the sum of what it touches rather than a value
/// looked up per opcode.
#[derive(Clone, Debug, Default)]
pub struct Cpu {
    pub regs: Registers,
    halted: bool,
    ime: bool,
    cycles: u64,
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the CPU to its power-on state: every register zero, running,
    /// no cycles counted.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fetch, decode and execute one instruction.
    ///
    /// Returns the number of cycles the instruction consumed. A halted CPU
    /// does nothing and reports zero cycles.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u64, StepError> {
        if self.halted {
            return Ok(0);
        }

        let start = self.cycles;
        let pc = self.regs.pc;
        let opcode = self.fetch8(bus)?;
        let instruction = instruction::decode(opcode)?;
        let operands = self.fetch_operands(bus, instruction.mode)?;
        debug_assert_eq!(
            usize::from(self.regs.pc.wrapping_sub(pc)),
            instruction.size(),
            "{} fetched the wrong number of operand bytes",
            instruction.mnemonic
        );

        log::trace!(
            "PC=0x{pc:04X} {opcode:02X} {mnemonic:<12} {operands:02X?} AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X} SP=0x{sp:04X}",
            mnemonic = instruction.mnemonic,
            operands = operands.as_slice(),
            af = self.regs.af(),
            bc = self.regs.bc(),
            de = self.regs.de(),
            hl = self.regs.hl(),
            sp = self.regs.sp,
        );

        self.execute(bus, instruction, operands)?;
        Ok(self.cycles - start)
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Interrupt master enable latch, toggled by DI/EI/RETI.
    #[inline]
    pub fn ime(&self) -> bool {
        self.ime
    }

    /// Total cycles consumed since construction or the last reset.
    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Read a register or register pair. 8-bit registers are zero-extended.
    #[inline]
    pub fn value_from_register(&self, register: RegisterType) -> u16 {
        self.regs.get(register)
    }

    /// Write a register or register pair; 8-bit targets keep the low byte.
    ///
    /// This is the driver-facing setter and costs no cycles.
    #[inline]
    pub fn set_value_in_register(&mut self, value: u16, register: RegisterType) {
        self.regs.set(register, value);
    }

    /// Write a register from operand bytes in fetch order (low byte
    /// first). Missing bytes read as zero.
    pub fn set_register_from_bytes(&mut self, bytes: &[u8], register: RegisterType) {
        let low = bytes.first().copied().unwrap_or(0);
        let high = bytes.get(1).copied().unwrap_or(0);
        self.regs.set(register, u16::from_le_bytes([low, high]));
    }

    #[inline]
    pub fn get_flag(&self, flag: Flags) -> bool {
        self.regs.f.is_set(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flags, value: bool) {
        self.regs.f.set_flag(flag, value);
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.f.clear();
    }

    /// Read one byte through the bus on behalf of a driver. Costs one cycle.
    pub fn read_byte_from_address<B: Bus>(
        &mut self,
        bus: &mut B,
        addr: u16,
    ) -> Result<u8, AddressError> {
        self.read_cycle(bus, addr)
    }

    /// Write one byte through the bus on behalf of a driver. Costs one cycle.
    pub fn write_byte_to_address<B: Bus>(
        &mut self,
        bus: &mut B,
        value: u8,
        addr: u16,
    ) -> Result<(), AddressError> {
        self.write_cycle(bus, addr, value)
    }
}

#[cfg(test)]
mod tests;
