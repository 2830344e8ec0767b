use super::Cpu;
use crate::bus::Bus;
use crate::error::{AddressError, ExecutionError};
use crate::instruction::{AddressMode, Condition, Instruction, Operands, RegisterType};

impl Cpu {
    /// Perform a single bus read and count one cycle.
    #[inline]
    pub(super) fn read_cycle<B: Bus>(&mut self, bus: &mut B, addr: u16) -> Result<u8, AddressError> {
        let value = bus.read8(addr)?;
        self.cycles += 1;
        Ok(value)
    }

    /// Perform a single bus write and count one cycle.
    #[inline]
    pub(super) fn write_cycle<B: Bus>(
        &mut self,
        bus: &mut B,
        addr: u16,
        value: u8,
    ) -> Result<(), AddressError> {
        bus.write8(addr, value)?;
        self.cycles += 1;
        Ok(())
    }

    /// Spend one cycle without touching the bus (PC writes on taken
    /// branches, SP adjustment before a push, ...).
    #[inline]
    pub(super) fn idle_cycle(&mut self) {
        self.cycles += 1;
    }

    /// Write a 16-bit register or pair and count the one cycle the pair
    /// write costs.
    #[inline]
    pub(super) fn write_pair_cycle(&mut self, register: RegisterType, value: u16) {
        self.regs.set(register, value);
        self.cycles += 1;
    }

    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> Result<u8, AddressError> {
        let value = self.read_cycle(bus, self.regs.pc)?;
        self.regs.pc = self.regs.pc.wrapping_add(1);
        Ok(value)
    }

    /// Fetch the operand bytes that follow the opcode for `mode`.
    pub(super) fn fetch_operands<B: Bus>(
        &mut self,
        bus: &mut B,
        mode: AddressMode,
    ) -> Result<Operands, AddressError> {
        let mut operands = Operands::default();
        for _ in 0..mode.operand_len() {
            operands.push(self.fetch8(bus)?);
        }
        Ok(operands)
    }

    /// Push a 16-bit value: high byte at SP-1, low byte at SP-2.
    ///
    /// The SP adjustment counts as one pair write, each byte as one bus
    /// write.
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) -> Result<(), AddressError> {
        let [hi, lo] = value.to_be_bytes();
        let sp = self.regs.sp.wrapping_sub(2);
        self.write_pair_cycle(RegisterType::SP, sp);
        self.write_cycle(bus, sp.wrapping_add(1), hi)?;
        self.write_cycle(bus, sp, lo)?;
        Ok(())
    }

    /// Pop a 16-bit value: low byte at SP, high byte at SP+1.
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> Result<u16, AddressError> {
        let sp = self.regs.sp;
        let lo = self.read_cycle(bus, sp)?;
        let hi = self.read_cycle(bus, sp.wrapping_add(1))?;
        self.regs.sp = sp.wrapping_add(2);
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Read an 8-bit register.
    #[inline]
    pub(super) fn reg8(&self, register: RegisterType) -> u8 {
        self.regs.get(register) as u8
    }

    #[inline]
    pub(super) fn set_reg8(&mut self, register: RegisterType, value: u8) {
        self.regs.set(register, value.into());
    }

    /// Whether `condition` holds; an absent condition always holds.
    #[inline]
    pub(super) fn condition_met(&self, condition: Option<Condition>) -> bool {
        match condition {
            None => true,
            Some(Condition::NotZero) => !self.regs.f.zero(),
            Some(Condition::Zero) => self.regs.f.zero(),
            Some(Condition::NotCarry) => !self.regs.f.carry(),
            Some(Condition::Carry) => self.regs.f.carry(),
        }
    }
}

/// Source register of `instruction`, required to be 8 bits wide.
pub(super) fn source8(instruction: &Instruction) -> Result<RegisterType, ExecutionError> {
    narrow(instruction, instruction.source, "source")
}

/// Destination register of `instruction`, required to be 8 bits wide.
pub(super) fn destination8(instruction: &Instruction) -> Result<RegisterType, ExecutionError> {
    narrow(instruction, instruction.destination, "destination")
}

/// Source register of `instruction`, required to be a 16-bit register.
pub(super) fn source16(instruction: &Instruction) -> Result<RegisterType, ExecutionError> {
    wide(instruction, instruction.source, "source")
}

/// Destination register of `instruction`, required to be a 16-bit register.
pub(super) fn destination16(instruction: &Instruction) -> Result<RegisterType, ExecutionError> {
    wide(instruction, instruction.destination, "destination")
}

pub(super) fn unsupported(instruction: &Instruction) -> ExecutionError {
    ExecutionError::UnsupportedMode {
        kind: instruction.kind,
        mode: instruction.mode,
    }
}

fn narrow(
    instruction: &Instruction,
    register: Option<RegisterType>,
    operand: &'static str,
) -> Result<RegisterType, ExecutionError> {
    let register = register.ok_or(ExecutionError::MissingRegister {
        kind: instruction.kind,
        operand,
    })?;
    if register.is_wide() {
        return Err(ExecutionError::RegisterWidth {
            kind: instruction.kind,
            register,
        });
    }
    Ok(register)
}

fn wide(
    instruction: &Instruction,
    register: Option<RegisterType>,
    operand: &'static str,
) -> Result<RegisterType, ExecutionError> {
    let register = register.ok_or(ExecutionError::MissingRegister {
        kind: instruction.kind,
        operand,
    })?;
    if !register.is_wide() {
        return Err(ExecutionError::RegisterWidth {
            kind: instruction.kind,
            register,
        });
    }
    Ok(register)
}
