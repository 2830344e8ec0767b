use crate::cpu::helpers::{destination16, destination8, source16, source8, unsupported};
use crate::cpu::{Bus, Cpu};
use crate::error::{AddressError, StepError};
use crate::instruction::{AddressMode, Instruction, Operands, RegisterType};

/// Base of the high page used by LDH and LD (C).
const HIGH_PAGE: u16 = 0xFF00;

impl Cpu {
    pub(super) fn exec_load<B: Bus>(
        &mut self,
        bus: &mut B,
        instruction: &Instruction,
        operands: Operands,
    ) -> Result<(), StepError> {
        match instruction.mode {
            AddressMode::Immediate16ToRegister => {
                let dst = destination16(instruction)?;
                self.regs.set(dst, operands.word());
            }
            AddressMode::Immediate8ToRegister => {
                let dst = destination8(instruction)?;
                self.set_reg8(dst, operands.byte());
            }
            AddressMode::RegisterToRegister => {
                let src = source8(instruction)?;
                let dst = destination8(instruction)?;
                let value = self.reg8(src);
                self.set_reg8(dst, value);
            }
            AddressMode::RegisterPairToRegisterPair => {
                let src = source16(instruction)?;
                let dst = destination16(instruction)?;
                let value = self.regs.get(src);
                self.write_pair_cycle(dst, value);
            }
            AddressMode::MemoryToRegister => {
                let addr = self.regs.get(source16(instruction)?);
                let dst = destination8(instruction)?;
                let value = self.read_cycle(bus, addr)?;
                self.set_reg8(dst, value);
            }
            AddressMode::RegisterToMemory => {
                let value = self.reg8(source8(instruction)?);
                let addr = self.regs.get(destination16(instruction)?);
                self.write_cycle(bus, addr, value)?;
            }
            AddressMode::MemoryToRegisterIncrement | AddressMode::MemoryToRegisterDecrement => {
                let pair = source16(instruction)?;
                let dst = destination8(instruction)?;
                let addr = self.regs.get(pair);
                let value = self.read_cycle(bus, addr)?;
                self.set_reg8(dst, value);
                self.step_address_pair(pair, addr, instruction.mode);
            }
            AddressMode::RegisterToMemoryIncrement | AddressMode::RegisterToMemoryDecrement => {
                let value = self.reg8(source8(instruction)?);
                let pair = destination16(instruction)?;
                let addr = self.regs.get(pair);
                self.write_cycle(bus, addr, value)?;
                self.step_address_pair(pair, addr, instruction.mode);
            }
            AddressMode::Immediate8ToMemory => {
                let addr = self.regs.get(destination16(instruction)?);
                self.write_cycle(bus, addr, operands.byte())?;
            }
            AddressMode::RegisterToImmediateAddress => {
                let src = instruction.source.ok_or_else(|| unsupported(instruction))?;
                let addr = operands.word();
                if src.is_wide() {
                    // Low byte first. The second byte must not wrap around
                    // the end of the address space.
                    let [hi, lo] = self.regs.get(src).to_be_bytes();
                    self.write_cycle(bus, addr, lo)?;
                    let next = addr
                        .checked_add(1)
                        .ok_or(AddressError::write(u32::from(addr) + 1))?;
                    self.write_cycle(bus, next, hi)?;
                } else {
                    let value = self.reg8(src);
                    self.write_cycle(bus, addr, value)?;
                }
            }
            AddressMode::ImmediateAddressToRegister => {
                let dst = destination8(instruction)?;
                let value = self.read_cycle(bus, operands.word())?;
                self.set_reg8(dst, value);
            }
            AddressMode::RegisterToHighImmediate => {
                let value = self.reg8(source8(instruction)?);
                let addr = HIGH_PAGE | u16::from(operands.byte());
                self.write_cycle(bus, addr, value)?;
            }
            AddressMode::HighImmediateToRegister => {
                let dst = destination8(instruction)?;
                let addr = HIGH_PAGE | u16::from(operands.byte());
                let value = self.read_cycle(bus, addr)?;
                self.set_reg8(dst, value);
            }
            AddressMode::RegisterToHighRegister => {
                let value = self.reg8(source8(instruction)?);
                let addr = HIGH_PAGE | u16::from(self.regs.c.get());
                self.write_cycle(bus, addr, value)?;
            }
            AddressMode::HighRegisterToRegister => {
                let dst = destination8(instruction)?;
                let addr = HIGH_PAGE | u16::from(self.regs.c.get());
                let value = self.read_cycle(bus, addr)?;
                self.set_reg8(dst, value);
            }
            AddressMode::StackOffsetToRegister => {
                let dst = destination16(instruction)?;
                let value = self.alu_add16_signed(self.regs.sp, operands.byte());
                self.write_pair_cycle(dst, value);
            }
            _ => return Err(unsupported(instruction).into()),
        }

        Ok(())
    }

    /// Post-access HL+/HL- adjustment; costs one pair write.
    fn step_address_pair(&mut self, pair: RegisterType, addr: u16, mode: AddressMode) {
        let next = match mode {
            AddressMode::MemoryToRegisterIncrement | AddressMode::RegisterToMemoryIncrement => {
                addr.wrapping_add(1)
            }
            _ => addr.wrapping_sub(1),
        };
        self.write_pair_cycle(pair, next);
    }
}
