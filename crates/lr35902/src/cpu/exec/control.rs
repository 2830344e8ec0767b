use crate::cpu::helpers::{source16, unsupported};
use crate::cpu::{Bus, Cpu};
use crate::error::StepError;
use crate::instruction::{AddressMode, Instruction, Operands};

impl Cpu {
    /// JR / JR cc.
    ///
    /// The displacement is a signed 8-bit offset relative to the address
    /// following the operand. A taken branch pays one extra cycle for the
    /// PC write.
    pub(super) fn exec_jr(&mut self, instruction: &Instruction, operands: Operands) {
        if self.condition_met(instruction.condition) {
            let offset = operands.byte() as i8;
            self.regs.pc = self.regs.pc.wrapping_add_signed(offset.into());
            self.idle_cycle();
        }
    }

    /// JP a16 / JP cc,a16 / JP (HL).
    pub(super) fn exec_jp(
        &mut self,
        instruction: &Instruction,
        operands: Operands,
    ) -> Result<(), StepError> {
        match instruction.mode {
            AddressMode::Immediate16 => {
                if self.condition_met(instruction.condition) {
                    self.regs.pc = operands.word();
                    self.idle_cycle();
                }
            }
            // JP (HL) loads PC straight from the pair, no extra cycle.
            AddressMode::Register => self.regs.pc = self.regs.get(source16(instruction)?),
            _ => return Err(unsupported(instruction).into()),
        }
        Ok(())
    }

    /// CALL a16 / CALL cc,a16.
    pub(super) fn exec_call<B: Bus>(
        &mut self,
        bus: &mut B,
        instruction: &Instruction,
        operands: Operands,
    ) -> Result<(), StepError> {
        if instruction.mode != AddressMode::Immediate16 {
            return Err(unsupported(instruction).into());
        }
        if self.condition_met(instruction.condition) {
            let ret = self.regs.pc;
            self.push_u16(bus, ret)?;
            self.regs.pc = operands.word();
        }
        Ok(())
    }

    /// RET / RET cc.
    ///
    /// The conditional form spends one cycle evaluating the condition.
    pub(super) fn exec_ret<B: Bus>(
        &mut self,
        bus: &mut B,
        instruction: &Instruction,
    ) -> Result<(), StepError> {
        if instruction.condition.is_some() {
            self.idle_cycle();
        }
        if self.condition_met(instruction.condition) {
            self.pop_pc(bus)?;
        }
        Ok(())
    }

    /// RETI: RET that also sets IME immediately.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        self.pop_pc(bus)?;
        self.ime = true;
        Ok(())
    }

    /// RST n: call to the fixed vector carried by the instruction.
    pub(super) fn exec_rst<B: Bus>(
        &mut self,
        bus: &mut B,
        instruction: &Instruction,
    ) -> Result<(), StepError> {
        let vector = instruction
            .parameter
            .ok_or_else(|| unsupported(instruction))?;
        let ret = self.regs.pc;
        self.push_u16(bus, ret)?;
        self.regs.pc = u16::from(vector);
        Ok(())
    }

    fn pop_pc<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        let addr = self.pop_u16(bus)?;
        self.regs.pc = addr;
        self.idle_cycle();
        Ok(())
    }
}
