use crate::cpu::helpers::{destination16, source16, unsupported};
use crate::cpu::{Bus, Cpu};
use crate::error::StepError;
use crate::instruction::{AddressMode, Instruction};

impl Cpu {
    pub(super) fn exec_push<B: Bus>(
        &mut self,
        bus: &mut B,
        instruction: &Instruction,
    ) -> Result<(), StepError> {
        if instruction.mode != AddressMode::Register {
            return Err(unsupported(instruction).into());
        }
        let value = self.regs.get(source16(instruction)?);
        self.push_u16(bus, value)?;
        Ok(())
    }

    pub(super) fn exec_pop<B: Bus>(
        &mut self,
        bus: &mut B,
        instruction: &Instruction,
    ) -> Result<(), StepError> {
        if instruction.mode != AddressMode::Register {
            return Err(unsupported(instruction).into());
        }
        let dst = destination16(instruction)?;
        let value = self.pop_u16(bus)?;
        // POP AF goes through `set_af`, which drops the low nibble of F.
        self.regs.set(dst, value);
        Ok(())
    }
}
