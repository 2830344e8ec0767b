//! Instruction core of the Sharp LR35902, the CPU of the original Game Boy.
//!
//! - `cpu` - register file, flags, fetch/decode/execute and cycle counting
//! - `instruction` - instruction vocabulary and the opcode table
//! - `bus` - address-space routing over fixed RAM regions and the cartridge
//! - `cartridge` - ROM image access gated by cartridge hardware type
//! - `machine` - a CPU and bus wired together

pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod error;
pub mod instruction;
pub mod machine;

pub use bus::{Bus, MemoryBus, Region};
pub use cartridge::{Cartridge, RomType};
pub use cpu::{Cpu, FlagRegister, Flags, Register, Registers};
pub use error::{Access, AddressError, DecodeError, ExecutionError, StepError};
pub use instruction::{AddressMode, Condition, Instruction, OperationKind, RegisterType};
pub use machine::{GameBoy, RunSummary, StopReason};
