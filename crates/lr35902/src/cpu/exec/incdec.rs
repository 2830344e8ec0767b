use crate::cpu::helpers::{destination16, unsupported};
use crate::cpu::{Bus, Cpu};
use crate::error::StepError;
use crate::instruction::{AddressMode, Instruction, OperationKind};

impl Cpu {
    pub(super) fn exec_inc_dec<B: Bus>(
        &mut self,
        bus: &mut B,
        instruction: &Instruction,
    ) -> Result<(), StepError> {
        let increment = match instruction.kind {
            OperationKind::Increment => true,
            OperationKind::Decrement => false,
            _ => return Err(unsupported(instruction).into()),
        };

        match instruction.mode {
            AddressMode::Register => {
                let reg = instruction
                    .destination
                    .ok_or_else(|| unsupported(instruction))?;
                if reg.is_wide() {
                    // 16-bit INC/DEC rr: wraps, flags untouched.
                    let value = self.regs.get(reg);
                    let result = if increment {
                        value.wrapping_add(1)
                    } else {
                        value.wrapping_sub(1)
                    };
                    self.write_pair_cycle(reg, result);
                } else {
                    let value = self.reg8(reg);
                    let result = if increment {
                        self.alu_inc8(value)
                    } else {
                        self.alu_dec8(value)
                    };
                    self.set_reg8(reg, result);
                }
            }
            AddressMode::Memory => {
                // INC/DEC (HL): 8-bit read-modify-write with 8-bit flags.
                let addr = self.regs.get(destination16(instruction)?);
                let value = self.read_cycle(bus, addr)?;
                let result = if increment {
                    self.alu_inc8(value)
                } else {
                    self.alu_dec8(value)
                };
                self.write_cycle(bus, addr, result)?;
            }
            _ => return Err(unsupported(instruction).into()),
        }

        Ok(())
    }
}
