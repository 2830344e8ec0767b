use std::fmt;

use crate::instruction::{AddressMode, OperationKind, RegisterType};

/// Direction of a failed bus access.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Access::Read => f.write_str("read"),
            Access::Write => f.write_str("write"),
        }
    }
}

/// The opcode fetched at PC has no entry in the opcode table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DecodeError {
    pub opcode: u8,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "opcode 0x{:02X} is not in the opcode table", self.opcode)
    }
}

impl std::error::Error for DecodeError {}

/// An instruction was built with a combination its operation body cannot
/// execute.
///
/// These are table defects rather than guest program faults: every row in
/// the opcode table is expected to be executable.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ExecutionError {
    /// The operation kind has no implementation for the addressing mode.
    UnsupportedMode {
        kind: OperationKind,
        mode: AddressMode,
    },
    /// A source or destination register the mode needs was left empty.
    MissingRegister {
        kind: OperationKind,
        operand: &'static str,
    },
    /// The register has the wrong width for the mode (e.g. a pair where an
    /// 8-bit register is needed).
    RegisterWidth {
        kind: OperationKind,
        register: RegisterType,
    },
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExecutionError::UnsupportedMode { kind, mode } => {
                write!(f, "{kind:?} does not support address mode {mode:?}")
            }
            ExecutionError::MissingRegister { kind, operand } => {
                write!(f, "{kind:?} is missing its {operand} register")
            }
            ExecutionError::RegisterWidth { kind, register } => {
                write!(f, "{kind:?} cannot operate on register {register:?}")
            }
        }
    }
}

impl std::error::Error for ExecutionError {}

/// Bus access outside every mapped region.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AddressError {
    /// Faulting address. Wider than 16 bits so that accesses running off
    /// the end of the address space (e.g. 0xFFFF + 1) can be reported.
    pub address: u32,
    pub access: Access,
}

impl AddressError {
    pub fn read(address: u32) -> Self {
        Self {
            address,
            access: Access::Read,
        }
    }

    pub fn write(address: u32) -> Self {
        Self {
            address,
            access: Access::Write,
        }
    }
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} at unmapped address 0x{:04X}",
            self.access, self.address
        )
    }
}

impl std::error::Error for AddressError {}

/// Everything that can stop a single `Cpu::step`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StepError {
    Decode(DecodeError),
    Execution(ExecutionError),
    Address(AddressError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StepError::Decode(err) => write!(f, "decode failed: {err}"),
            StepError::Execution(err) => write!(f, "execution failed: {err}"),
            StepError::Address(err) => write!(f, "bus access failed: {err}"),
        }
    }
}

impl std::error::Error for StepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StepError::Decode(err) => Some(err),
            StepError::Execution(err) => Some(err),
            StepError::Address(err) => Some(err),
        }
    }
}

impl From<DecodeError> for StepError {
    fn from(err: DecodeError) -> Self {
        StepError::Decode(err)
    }
}

impl From<ExecutionError> for StepError {
    fn from(err: ExecutionError) -> Self {
        StepError::Execution(err)
    }
}

impl From<AddressError> for StepError {
    fn from(err: AddressError) -> Self {
        StepError::Address(err)
    }
}
