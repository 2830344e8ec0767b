use crate::bus::MemoryBus;
use crate::cartridge::Cartridge;
use crate::cpu::Cpu;
use crate::error::StepError;

/// Why a `GameBoy::run` loop returned.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StopReason {
    /// STOP or HALT executed.
    Halted,
    /// The step budget ran out first.
    StepLimit,
}

/// Outcome of a `GameBoy::run` call.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RunSummary {
    pub steps: u64,
    pub cycles: u64,
    pub reason: StopReason,
}

/// One emulated machine: a CPU wired to its own memory bus and cartridge.
///
/// Machines share nothing; run several by building several.
pub struct GameBoy {
    pub cpu: Cpu,
    pub bus: MemoryBus,
}

impl GameBoy {
    pub fn new(cartridge: Cartridge) -> Self {
        Self {
            cpu: Cpu::new(),
            bus: MemoryBus::new(cartridge),
        }
    }

    /// Execute one instruction and return the cycles it took.
    #[inline]
    pub fn step(&mut self) -> Result<u64, StepError> {
        self.cpu.step(&mut self.bus)
    }

    /// Step until the CPU halts or `max_steps` instructions have run.
    ///
    /// A failing step ends the run; the error is logged with the CPU state
    /// at the point of failure and handed back to the caller.
    pub fn run(&mut self, max_steps: u64) -> Result<RunSummary, StepError> {
        let start_cycles = self.cpu.cycles();
        let mut steps = 0;

        while steps < max_steps {
            if self.cpu.is_halted() {
                return Ok(self.summary(steps, start_cycles, StopReason::Halted));
            }
            if let Err(err) = self.step() {
                log::error!(
                    "step {steps} failed at PC=0x{pc:04X}: {err}",
                    pc = self.cpu.regs.pc,
                );
                return Err(err);
            }
            steps += 1;
        }

        let reason = if self.cpu.is_halted() {
            StopReason::Halted
        } else {
            StopReason::StepLimit
        };
        Ok(self.summary(steps, start_cycles, reason))
    }

    fn summary(&self, steps: u64, start_cycles: u64, reason: StopReason) -> RunSummary {
        RunSummary {
            steps,
            cycles: self.cpu.cycles() - start_cycles,
            reason,
        }
    }
}
