use lazy_static::lazy_static;

use super::{AddressMode, Condition, Instruction, OperationKind, RegisterType};
use crate::error::DecodeError;

use AddressMode as M;
use OperationKind as K;
use RegisterType as R;

lazy_static! {
    /// Opcode → instruction table for the unprefixed opcode space.
    ///
    /// `None` marks opcodes the core does not decode: the 0xCB prefix and
    /// the hardware "holes" (D3, DB, DD, E3, E4, EB, EC, ED, F4, FC, FD).
    pub static ref OPCODE_TABLE: [Option<Instruction>; 256] = build_table();
}

/// Look up the instruction for `opcode`.
pub fn decode(opcode: u8) -> Result<&'static Instruction, DecodeError> {
    OPCODE_TABLE[opcode as usize]
        .as_ref()
        .ok_or(DecodeError { opcode })
}

/// Operand encoding shared by the LD r,r', INC r, DEC r and ALU groups:
/// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A. `None` stands for (HL).
const REG8: [Option<RegisterType>; 8] = [
    Some(R::B),
    Some(R::C),
    Some(R::D),
    Some(R::E),
    Some(R::H),
    Some(R::L),
    None,
    Some(R::A),
];

/// 16-bit operands selected by bits 4-5 in the LD rr / INC rr / ADD HL group.
const REG16_SP: [RegisterType; 4] = [R::BC, R::DE, R::HL, R::SP];

/// 16-bit operands selected by bits 4-5 in the PUSH / POP group.
const REG16_AF: [RegisterType; 4] = [R::BC, R::DE, R::HL, R::AF];

/// Conditions selected by bits 3-4 in JR cc / JP cc / CALL cc / RET cc.
const CONDITIONS: [Condition; 4] = [
    Condition::NotZero,
    Condition::Zero,
    Condition::NotCarry,
    Condition::Carry,
];

fn build_table() -> [Option<Instruction>; 256] {
    let mut table = [None; 256];
    let mut put = |opcode: u8, instruction: Instruction| {
        debug_assert!(
            table[opcode as usize].is_none(),
            "opcode 0x{opcode:02X} defined twice"
        );
        table[opcode as usize] = Some(instruction);
    };

    // 0x00-0x3F: loads, 16-bit arithmetic, INC/DEC, rotates and JR.
    put(0x00, Instruction::new("NOP", K::Nop, M::Implied));
    put(0x10, Instruction::new("STOP", K::Stop, M::Padding8));

    const LD_RR_D16: [&str; 4] = ["LD BC,d16", "LD DE,d16", "LD HL,d16", "LD SP,d16"];
    const INC_RR: [&str; 4] = ["INC BC", "INC DE", "INC HL", "INC SP"];
    const DEC_RR: [&str; 4] = ["DEC BC", "DEC DE", "DEC HL", "DEC SP"];
    const ADD_HL_RR: [&str; 4] = ["ADD HL,BC", "ADD HL,DE", "ADD HL,HL", "ADD HL,SP"];
    for (index, &pair) in REG16_SP.iter().enumerate() {
        let row = (index as u8) << 4;
        put(
            row | 0x01,
            Instruction::new(LD_RR_D16[index], K::Load, M::Immediate16ToRegister)
                .destination(pair),
        );
        put(
            row | 0x03,
            Instruction::new(INC_RR[index], K::Increment, M::Register).destination(pair),
        );
        put(
            row | 0x09,
            Instruction::new(ADD_HL_RR[index], K::Add, M::RegisterPairToRegisterPair)
                .source(pair)
                .destination(R::HL),
        );
        put(
            row | 0x0B,
            Instruction::new(DEC_RR[index], K::Decrement, M::Register).destination(pair),
        );
    }

    put(
        0x02,
        Instruction::new("LD (BC),A", K::Load, M::RegisterToMemory)
            .source(R::A)
            .destination(R::BC),
    );
    put(
        0x12,
        Instruction::new("LD (DE),A", K::Load, M::RegisterToMemory)
            .source(R::A)
            .destination(R::DE),
    );
    put(
        0x22,
        Instruction::new("LD (HL+),A", K::Load, M::RegisterToMemoryIncrement)
            .source(R::A)
            .destination(R::HL),
    );
    put(
        0x32,
        Instruction::new("LD (HL-),A", K::Load, M::RegisterToMemoryDecrement)
            .source(R::A)
            .destination(R::HL),
    );
    put(
        0x0A,
        Instruction::new("LD A,(BC)", K::Load, M::MemoryToRegister)
            .source(R::BC)
            .destination(R::A),
    );
    put(
        0x1A,
        Instruction::new("LD A,(DE)", K::Load, M::MemoryToRegister)
            .source(R::DE)
            .destination(R::A),
    );
    put(
        0x2A,
        Instruction::new("LD A,(HL+)", K::Load, M::MemoryToRegisterIncrement)
            .source(R::HL)
            .destination(R::A),
    );
    put(
        0x3A,
        Instruction::new("LD A,(HL-)", K::Load, M::MemoryToRegisterDecrement)
            .source(R::HL)
            .destination(R::A),
    );

    const INC_R: [&str; 8] = [
        "INC B", "INC C", "INC D", "INC E", "INC H", "INC L", "INC (HL)", "INC A",
    ];
    const DEC_R: [&str; 8] = [
        "DEC B", "DEC C", "DEC D", "DEC E", "DEC H", "DEC L", "DEC (HL)", "DEC A",
    ];
    const LD_R_D8: [&str; 8] = [
        "LD B,d8", "LD C,d8", "LD D,d8", "LD E,d8", "LD H,d8", "LD L,d8", "LD (HL),d8",
        "LD A,d8",
    ];
    for (index, &reg) in REG8.iter().enumerate() {
        let column = (index as u8) << 3;
        match reg {
            Some(reg) => {
                put(
                    column | 0x04,
                    Instruction::new(INC_R[index], K::Increment, M::Register).destination(reg),
                );
                put(
                    column | 0x05,
                    Instruction::new(DEC_R[index], K::Decrement, M::Register).destination(reg),
                );
                put(
                    column | 0x06,
                    Instruction::new(LD_R_D8[index], K::Load, M::Immediate8ToRegister)
                        .destination(reg),
                );
            }
            None => {
                put(
                    column | 0x04,
                    Instruction::new(INC_R[index], K::Increment, M::Memory).destination(R::HL),
                );
                put(
                    column | 0x05,
                    Instruction::new(DEC_R[index], K::Decrement, M::Memory).destination(R::HL),
                );
                put(
                    column | 0x06,
                    Instruction::new(LD_R_D8[index], K::Load, M::Immediate8ToMemory)
                        .destination(R::HL),
                );
            }
        }
    }

    put(0x07, Instruction::new("RLCA", K::RotateLeftCircularA, M::Implied));
    put(0x0F, Instruction::new("RRCA", K::RotateRightCircularA, M::Implied));
    put(0x17, Instruction::new("RLA", K::RotateLeftA, M::Implied));
    put(0x1F, Instruction::new("RRA", K::RotateRightA, M::Implied));
    put(
        0x08,
        Instruction::new("LD (a16),SP", K::Load, M::RegisterToImmediateAddress).source(R::SP),
    );

    put(0x18, Instruction::new("JR e8", K::JumpRelative, M::Relative));
    const JR_CC: [&str; 4] = ["JR NZ,e8", "JR Z,e8", "JR NC,e8", "JR C,e8"];
    for (index, &condition) in CONDITIONS.iter().enumerate() {
        put(
            0x20 | ((index as u8) << 3),
            Instruction::new(JR_CC[index], K::JumpRelative, M::Relative).condition(condition),
        );
    }

    put(0x27, Instruction::new("DAA", K::DecimalAdjust, M::Implied));
    put(0x2F, Instruction::new("CPL", K::Complement, M::Implied));
    put(0x37, Instruction::new("SCF", K::SetCarry, M::Implied));
    put(0x3F, Instruction::new("CCF", K::ComplementCarry, M::Implied));

    // 0x40-0x7F: LD r,r' with HALT in the (HL),(HL) slot.
    for dst in 0..8u8 {
        for src in 0..8u8 {
            let opcode = 0x40 | (dst << 3) | src;
            let name = LD_NAMES[opcode as usize - 0x40];
            let instruction = match (REG8[dst as usize], REG8[src as usize]) {
                (None, None) => Instruction::new("HALT", K::Halt, M::Implied),
                (Some(d), Some(s)) => Instruction::new(name, K::Load, M::RegisterToRegister)
                    .source(s)
                    .destination(d),
                (Some(d), None) => Instruction::new(name, K::Load, M::MemoryToRegister)
                    .source(R::HL)
                    .destination(d),
                (None, Some(s)) => Instruction::new(name, K::Load, M::RegisterToMemory)
                    .source(s)
                    .destination(R::HL),
            };
            put(opcode, instruction);
        }
    }

    // 0x80-0xBF: ALU on A with register or (HL) operand.
    const ALU_KINDS: [OperationKind; 8] = [
        K::Add,
        K::AddWithCarry,
        K::Subtract,
        K::SubtractWithCarry,
        K::And,
        K::Xor,
        K::Or,
        K::Compare,
    ];
    for (op, &kind) in ALU_KINDS.iter().enumerate() {
        for (src, &reg) in REG8.iter().enumerate() {
            let opcode = 0x80 | ((op as u8) << 3) | src as u8;
            let name = ALU_NAMES[op * 8 + src];
            let instruction = match reg {
                Some(reg) => Instruction::new(name, kind, M::RegisterToRegister)
                    .source(reg)
                    .destination(R::A),
                None => Instruction::new(name, kind, M::MemoryToRegister)
                    .source(R::HL)
                    .destination(R::A),
            };
            put(opcode, instruction);
        }
    }

    // 0xC0-0xFF: ALU immediates, stack, calls, jumps, high-page loads.
    const ALU_D8: [&str; 8] = [
        "ADD A,d8", "ADC A,d8", "SUB d8", "SBC A,d8", "AND d8", "XOR d8", "OR d8", "CP d8",
    ];
    for (op, &kind) in ALU_KINDS.iter().enumerate() {
        put(
            0xC6 | ((op as u8) << 3),
            Instruction::new(ALU_D8[op], kind, M::Immediate8ToRegister).destination(R::A),
        );
    }

    const RET_CC: [&str; 4] = ["RET NZ", "RET Z", "RET NC", "RET C"];
    const JP_CC: [&str; 4] = ["JP NZ,a16", "JP Z,a16", "JP NC,a16", "JP C,a16"];
    const CALL_CC: [&str; 4] = ["CALL NZ,a16", "CALL Z,a16", "CALL NC,a16", "CALL C,a16"];
    for (index, &condition) in CONDITIONS.iter().enumerate() {
        let column = (index as u8) << 3;
        put(
            0xC0 | column,
            Instruction::new(RET_CC[index], K::Return, M::Implied).condition(condition),
        );
        put(
            0xC2 | column,
            Instruction::new(JP_CC[index], K::Jump, M::Immediate16).condition(condition),
        );
        put(
            0xC4 | column,
            Instruction::new(CALL_CC[index], K::Call, M::Immediate16).condition(condition),
        );
    }

    const POP_RR: [&str; 4] = ["POP BC", "POP DE", "POP HL", "POP AF"];
    const PUSH_RR: [&str; 4] = ["PUSH BC", "PUSH DE", "PUSH HL", "PUSH AF"];
    for (index, &pair) in REG16_AF.iter().enumerate() {
        let row = (index as u8) << 4;
        put(
            0xC1 | row,
            Instruction::new(POP_RR[index], K::Pop, M::Register).destination(pair),
        );
        put(
            0xC5 | row,
            Instruction::new(PUSH_RR[index], K::Push, M::Register).source(pair),
        );
    }

    const RST: [&str; 8] = [
        "RST 00H", "RST 08H", "RST 10H", "RST 18H", "RST 20H", "RST 28H", "RST 30H", "RST 38H",
    ];
    for (index, &name) in RST.iter().enumerate() {
        let vector = (index as u8) << 3;
        put(
            0xC7 | vector,
            Instruction::new(name, K::Restart, M::Implied).parameter(vector),
        );
    }

    put(0xC3, Instruction::new("JP a16", K::Jump, M::Immediate16));
    put(0xC9, Instruction::new("RET", K::Return, M::Implied));
    put(0xCD, Instruction::new("CALL a16", K::Call, M::Immediate16));
    put(0xD9, Instruction::new("RETI", K::ReturnFromInterrupt, M::Implied));
    put(
        0xE9,
        Instruction::new("JP (HL)", K::Jump, M::Register).source(R::HL),
    );

    put(
        0xE0,
        Instruction::new("LDH (a8),A", K::Load, M::RegisterToHighImmediate).source(R::A),
    );
    put(
        0xF0,
        Instruction::new("LDH A,(a8)", K::Load, M::HighImmediateToRegister).destination(R::A),
    );
    put(
        0xE2,
        Instruction::new("LD (C),A", K::Load, M::RegisterToHighRegister).source(R::A),
    );
    put(
        0xF2,
        Instruction::new("LD A,(C)", K::Load, M::HighRegisterToRegister).destination(R::A),
    );
    put(
        0xEA,
        Instruction::new("LD (a16),A", K::Load, M::RegisterToImmediateAddress).source(R::A),
    );
    put(
        0xFA,
        Instruction::new("LD A,(a16)", K::Load, M::ImmediateAddressToRegister).destination(R::A),
    );

    put(
        0xE8,
        Instruction::new("ADD SP,e8", K::Add, M::Immediate8ToRegister).destination(R::SP),
    );
    put(
        0xF8,
        Instruction::new("LD HL,SP+e8", K::Load, M::StackOffsetToRegister).destination(R::HL),
    );
    put(
        0xF9,
        Instruction::new("LD SP,HL", K::Load, M::RegisterPairToRegisterPair)
            .source(R::HL)
            .destination(R::SP),
    );

    put(0xF3, Instruction::new("DI", K::DisableInterrupts, M::Implied));
    put(0xFB, Instruction::new("EI", K::EnableInterrupts, M::Implied));

    table
}

/// Mnemonics for 0x40-0x7F, row-major.
#[rustfmt::skip]
const LD_NAMES: [&str; 64] = [
    "LD B,B", "LD B,C", "LD B,D", "LD B,E", "LD B,H", "LD B,L", "LD B,(HL)", "LD B,A",
    "LD C,B", "LD C,C", "LD C,D", "LD C,E", "LD C,H", "LD C,L", "LD C,(HL)", "LD C,A",
    "LD D,B", "LD D,C", "LD D,D", "LD D,E", "LD D,H", "LD D,L", "LD D,(HL)", "LD D,A",
    "LD E,B", "LD E,C", "LD E,D", "LD E,E", "LD E,H", "LD E,L", "LD E,(HL)", "LD E,A",
    "LD H,B", "LD H,C", "LD H,D", "LD H,E", "LD H,H", "LD H,L", "LD H,(HL)", "LD H,A",
    "LD L,B", "LD L,C", "LD L,D", "LD L,E", "LD L,H", "LD L,L", "LD L,(HL)", "LD L,A",
    "LD (HL),B", "LD (HL),C", "LD (HL),D", "LD (HL),E", "LD (HL),H", "LD (HL),L", "HALT", "LD (HL),A",
    "LD A,B", "LD A,C", "LD A,D", "LD A,E", "LD A,H", "LD A,L", "LD A,(HL)", "LD A,A",
];

/// Mnemonics for 0x80-0xBF, row-major.
#[rustfmt::skip]
const ALU_NAMES: [&str; 64] = [
    "ADD A,B", "ADD A,C", "ADD A,D", "ADD A,E", "ADD A,H", "ADD A,L", "ADD A,(HL)", "ADD A,A",
    "ADC A,B", "ADC A,C", "ADC A,D", "ADC A,E", "ADC A,H", "ADC A,L", "ADC A,(HL)", "ADC A,A",
    "SUB B", "SUB C", "SUB D", "SUB E", "SUB H", "SUB L", "SUB (HL)", "SUB A",
    "SBC A,B", "SBC A,C", "SBC A,D", "SBC A,E", "SBC A,H", "SBC A,L", "SBC A,(HL)", "SBC A,A",
    "AND B", "AND C", "AND D", "AND E", "AND H", "AND L", "AND (HL)", "AND A",
    "XOR B", "XOR C", "XOR D", "XOR E", "XOR H", "XOR L", "XOR (HL)", "XOR A",
    "OR B", "OR C", "OR D", "OR E", "OR H", "OR L", "OR (HL)", "OR A",
    "CP B", "CP C", "CP D", "CP E", "CP H", "CP L", "CP (HL)", "CP A",
];
