//! Instruction vocabulary and the opcode table.
//!
//! Every opcode the core understands is a row in [`table::OPCODE_TABLE`]:
//! an [`Instruction`] value carrying an operation kind, an addressing mode
//! and the registers/condition it works on. Execution dispatches on the
//! kind, so adding an opcode means adding a row, not a new code path.

mod table;

pub use table::{decode, OPCODE_TABLE};

/// Register operand of an instruction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RegisterType {
    A,
    B,
    C,
    D,
    E,
    F,
    H,
    L,
    AF,
    BC,
    DE,
    HL,
    SP,
    PC,
}

impl RegisterType {
    /// True for the 16-bit registers and register pairs.
    #[inline]
    pub const fn is_wide(self) -> bool {
        matches!(
            self,
            RegisterType::AF
                | RegisterType::BC
                | RegisterType::DE
                | RegisterType::HL
                | RegisterType::SP
                | RegisterType::PC
        )
    }
}

/// How an instruction finds its operands.
///
/// The mode also fixes how many operand bytes follow the opcode, which the
/// CPU fetches before running the operation body.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AddressMode {
    /// No operands (NOP, DAA, rotates on A, ...).
    Implied,
    /// Single register operand, read and written in place (INC B, PUSH BC).
    Register,
    /// 8-bit immediate into a register (LD B,d8; ADD A,d8).
    Immediate8ToRegister,
    /// 16-bit immediate into a register pair (LD BC,d16).
    Immediate16ToRegister,
    /// 8-bit register to 8-bit register (LD B,C; ADD A,B).
    RegisterToRegister,
    /// 16-bit register to 16-bit register (LD SP,HL; ADD HL,BC).
    RegisterPairToRegisterPair,
    /// Byte at the address held in a pair into a register (LD A,(BC)).
    MemoryToRegister,
    /// Register into the byte at the address held in a pair (LD (BC),A).
    RegisterToMemory,
    /// `MemoryToRegister`, then increment the address pair (LD A,(HL+)).
    MemoryToRegisterIncrement,
    /// `MemoryToRegister`, then decrement the address pair (LD A,(HL-)).
    MemoryToRegisterDecrement,
    /// `RegisterToMemory`, then increment the address pair (LD (HL+),A).
    RegisterToMemoryIncrement,
    /// `RegisterToMemory`, then decrement the address pair (LD (HL-),A).
    RegisterToMemoryDecrement,
    /// Read-modify-write of the byte at the address held in a pair
    /// (INC (HL)).
    Memory,
    /// 8-bit immediate into the byte at the address held in a pair
    /// (LD (HL),d8).
    Immediate8ToMemory,
    /// Register into a 16-bit immediate address. Pairs store low byte
    /// first (LD (a16),SP; LD (a16),A).
    RegisterToImmediateAddress,
    /// Byte at a 16-bit immediate address into a register (LD A,(a16)).
    ImmediateAddressToRegister,
    /// Register into 0xFF00 + 8-bit immediate (LDH (a8),A).
    RegisterToHighImmediate,
    /// Byte at 0xFF00 + 8-bit immediate into a register (LDH A,(a8)).
    HighImmediateToRegister,
    /// Register into 0xFF00 + C (LD (C),A).
    RegisterToHighRegister,
    /// Byte at 0xFF00 + C into a register (LD A,(C)).
    HighRegisterToRegister,
    /// SP plus a signed 8-bit immediate into a pair (LD HL,SP+e8).
    StackOffsetToRegister,
    /// Signed 8-bit offset relative to the next instruction (JR).
    Relative,
    /// 16-bit immediate target address (JP a16, CALL a16).
    Immediate16,
    /// One padding byte that is fetched and ignored (STOP).
    Padding8,
}

impl AddressMode {
    /// Number of operand bytes that follow the opcode.
    pub const fn operand_len(self) -> usize {
        match self {
            AddressMode::Immediate8ToRegister
            | AddressMode::Immediate8ToMemory
            | AddressMode::RegisterToHighImmediate
            | AddressMode::HighImmediateToRegister
            | AddressMode::StackOffsetToRegister
            | AddressMode::Relative
            | AddressMode::Padding8 => 1,
            AddressMode::Immediate16ToRegister
            | AddressMode::RegisterToImmediateAddress
            | AddressMode::ImmediateAddressToRegister
            | AddressMode::Immediate16 => 2,
            _ => 0,
        }
    }
}

/// Branch predicate for conditional jumps, calls and returns.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Condition {
    NotZero,
    Zero,
    NotCarry,
    Carry,
}

/// What an instruction does, independent of where its operands come from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum OperationKind {
    Nop,
    Load,
    Increment,
    Decrement,
    Add,
    AddWithCarry,
    Subtract,
    SubtractWithCarry,
    And,
    Xor,
    Or,
    Compare,
    RotateLeftCircularA,
    RotateRightCircularA,
    RotateLeftA,
    RotateRightA,
    DecimalAdjust,
    Complement,
    SetCarry,
    ComplementCarry,
    JumpRelative,
    Jump,
    Call,
    Return,
    ReturnFromInterrupt,
    Restart,
    Push,
    Pop,
    DisableInterrupts,
    EnableInterrupts,
    Stop,
    Halt,
}

/// One decoded instruction.
///
/// Rows of the opcode table are built once and only ever read afterwards.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Instruction {
    pub mnemonic: &'static str,
    pub kind: OperationKind,
    pub mode: AddressMode,
    pub source: Option<RegisterType>,
    pub destination: Option<RegisterType>,
    pub condition: Option<Condition>,
    /// Constant baked into the opcode itself (the RST vector).
    pub parameter: Option<u8>,
}

impl Instruction {
    pub const fn new(mnemonic: &'static str, kind: OperationKind, mode: AddressMode) -> Self {
        Self {
            mnemonic,
            kind,
            mode,
            source: None,
            destination: None,
            condition: None,
            parameter: None,
        }
    }

    pub const fn source(mut self, register: RegisterType) -> Self {
        self.source = Some(register);
        self
    }

    pub const fn destination(mut self, register: RegisterType) -> Self {
        self.destination = Some(register);
        self
    }

    pub const fn condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub const fn parameter(mut self, value: u8) -> Self {
        self.parameter = Some(value);
        self
    }

    /// Total encoded length in bytes, opcode included.
    #[inline]
    pub const fn size(&self) -> usize {
        1 + self.mode.operand_len()
    }
}

/// Operand bytes fetched after the opcode, in fetch order.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Operands {
    bytes: [u8; 2],
    len: usize,
}

impl Operands {
    pub fn push(&mut self, byte: u8) {
        debug_assert!(self.len < self.bytes.len(), "at most two operand bytes");
        self.bytes[self.len] = byte;
        self.len += 1;
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// First operand byte.
    #[inline]
    pub fn byte(&self) -> u8 {
        self.bytes[0]
    }

    /// Operand bytes read as a little-endian 16-bit word.
    #[inline]
    pub fn word(&self) -> u16 {
        u16::from_le_bytes(self.bytes)
    }
}
