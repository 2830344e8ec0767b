mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::{Bus, Cpu};
use crate::error::StepError;
use crate::instruction::{Instruction, OperationKind as K, Operands};

impl Cpu {
    /// Run the body of a decoded instruction.
    ///
    /// The opcode and its operand bytes have already been fetched; each
    /// family below only pays for the register pair writes and memory
    /// accesses it performs itself.
    pub(super) fn execute<B: Bus>(
        &mut self,
        bus: &mut B,
        instruction: &Instruction,
        operands: Operands,
    ) -> Result<(), StepError> {
        match instruction.kind {
            K::Nop => Ok(()),

            K::Load => self.exec_load(bus, instruction, operands),

            K::Increment | K::Decrement => self.exec_inc_dec(bus, instruction),

            K::Add
            | K::AddWithCarry
            | K::Subtract
            | K::SubtractWithCarry
            | K::And
            | K::Xor
            | K::Or
            | K::Compare => self.exec_alu(bus, instruction, operands),

            K::RotateLeftCircularA
            | K::RotateRightCircularA
            | K::RotateLeftA
            | K::RotateRightA => self.exec_rotate_a(instruction),

            K::DecimalAdjust => {
                self.alu_daa();
                Ok(())
            }
            K::Complement => {
                self.exec_cpl();
                Ok(())
            }
            K::SetCarry => {
                self.exec_scf();
                Ok(())
            }
            K::ComplementCarry => {
                self.exec_ccf();
                Ok(())
            }

            K::JumpRelative => {
                self.exec_jr(instruction, operands);
                Ok(())
            }
            K::Jump => self.exec_jp(instruction, operands),
            K::Call => self.exec_call(bus, instruction, operands),
            K::Return => self.exec_ret(bus, instruction),
            K::ReturnFromInterrupt => self.exec_reti(bus),
            K::Restart => self.exec_rst(bus, instruction),

            K::Push => self.exec_push(bus, instruction),
            K::Pop => self.exec_pop(bus, instruction),

            K::DisableInterrupts => {
                self.exec_di();
                Ok(())
            }
            K::EnableInterrupts => {
                self.exec_ei();
                Ok(())
            }
            K::Stop | K::Halt => {
                self.exec_halt(instruction);
                Ok(())
            }
        }
    }
}
