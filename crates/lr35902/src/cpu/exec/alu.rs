use crate::cpu::helpers::{destination16, destination8, source16, source8, unsupported};
use crate::cpu::{Bus, Cpu, Flags};
use crate::error::StepError;
use crate::instruction::{AddressMode, Instruction, OperationKind, Operands, RegisterType};

impl Cpu {
    pub(super) fn exec_alu<B: Bus>(
        &mut self,
        bus: &mut B,
        instruction: &Instruction,
        operands: Operands,
    ) -> Result<(), StepError> {
        let value = match instruction.mode {
            AddressMode::RegisterToRegister => {
                destination8(instruction)?;
                self.reg8(source8(instruction)?)
            }
            AddressMode::MemoryToRegister => {
                destination8(instruction)?;
                let addr = self.regs.get(source16(instruction)?);
                self.read_cycle(bus, addr)?
            }
            AddressMode::Immediate8ToRegister
                if instruction.kind == OperationKind::Add
                    && instruction.destination == Some(RegisterType::SP) =>
            {
                // ADD SP,e8: pair write plus one internal cycle.
                let value = self.alu_add16_signed(self.regs.sp, operands.byte());
                self.write_pair_cycle(RegisterType::SP, value);
                self.idle_cycle();
                return Ok(());
            }
            AddressMode::Immediate8ToRegister => {
                destination8(instruction)?;
                operands.byte()
            }
            AddressMode::RegisterPairToRegisterPair if instruction.kind == OperationKind::Add => {
                let src = source16(instruction)?;
                let dst = destination16(instruction)?;
                let result = self.alu_add16(self.regs.get(dst), self.regs.get(src));
                self.write_pair_cycle(dst, result);
                return Ok(());
            }
            _ => return Err(unsupported(instruction).into()),
        };

        match instruction.kind {
            OperationKind::Add => self.alu_add(value, false),
            OperationKind::AddWithCarry => self.alu_add(value, true),
            OperationKind::Subtract => self.alu_sub(value, false),
            OperationKind::SubtractWithCarry => self.alu_sub(value, true),
            OperationKind::And => self.alu_and(value),
            OperationKind::Xor => self.alu_xor(value),
            OperationKind::Or => self.alu_or(value),
            OperationKind::Compare => self.alu_cp(value),
            _ => return Err(unsupported(instruction).into()),
        }

        Ok(())
    }

    pub(in crate::cpu) fn exec_rotate_a(&mut self, instruction: &Instruction) -> Result<(), StepError> {
        let a = self.regs.a.get();
        let (result, carry_out) = match instruction.kind {
            // RLCA: rotate A left. C mirrors bit 7 of the result, so eight
            // rotations leave C equal to the starting MSB.
            OperationKind::RotateLeftCircularA => {
                let result = a.rotate_left(1);
                (result, (result & 0x80) != 0)
            }
            // RRCA: rotate A right. Bit 0 to Carry and bit 7.
            OperationKind::RotateRightCircularA => (a.rotate_right(1), (a & 0x01) != 0),
            // RLA: rotate A left through Carry.
            OperationKind::RotateLeftA => {
                let carry_in = u8::from(self.get_flag(Flags::CARRY));
                ((a << 1) | carry_in, (a & 0x80) != 0)
            }
            // RRA: rotate A right through Carry.
            OperationKind::RotateRightA => {
                let carry_in = if self.get_flag(Flags::CARRY) { 0x80 } else { 0 };
                ((a >> 1) | carry_in, (a & 0x01) != 0)
            }
            _ => return Err(unsupported(instruction).into()),
        };

        self.regs.a.set(result.into());
        self.clear_flags();
        self.set_flag(Flags::CARRY, carry_out);
        Ok(())
    }

    /// CPL: A = !A. N and H are cleared; Z and C are left alone.
    pub(super) fn exec_cpl(&mut self) {
        let a = !self.regs.a.get();
        self.regs.a.set(a.into());
        self.set_flag(Flags::SUBTRACT, false);
        self.set_flag(Flags::HALF_CARRY, false);
    }

    /// SCF only forces Carry; N and H are left as they were.
    pub(super) fn exec_scf(&mut self) {
        self.set_flag(Flags::CARRY, true);
    }

    pub(super) fn exec_ccf(&mut self) {
        let carry = self.get_flag(Flags::CARRY);
        self.set_flag(Flags::CARRY, !carry);
        self.set_flag(Flags::HALF_CARRY, false);
        self.set_flag(Flags::SUBTRACT, false);
    }
}
