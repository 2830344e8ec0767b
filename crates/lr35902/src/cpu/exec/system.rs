use crate::cpu::Cpu;
use crate::instruction::Instruction;

impl Cpu {
    /// STOP and HALT both park the CPU for good: nothing in this core wakes
    /// it up again, so `step` becomes a no-op afterwards.
    pub(super) fn exec_halt(&mut self, instruction: &Instruction) {
        log::debug!(
            "CPU halted by {} at PC=0x{:04X} after {} cycles",
            instruction.mnemonic,
            self.regs.pc,
            self.cycles
        );
        self.halted = true;
    }

    pub(super) fn exec_di(&mut self) {
        self.ime = false;
    }

    pub(super) fn exec_ei(&mut self) {
        self.ime = true;
    }
}
