use super::*;
use crate::error::{Access, DecodeError, ExecutionError};
use crate::instruction::{AddressMode, Instruction, OperationKind};

struct TestBus {
    memory: [u8; 0x10000],
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> Result<u8, AddressError> {
        Ok(self.memory[addr as usize])
    }

    fn write8(&mut self, addr: u16, value: u8) -> Result<(), AddressError> {
        self.memory[addr as usize] = value;
        Ok(())
    }
}

/// Fresh CPU with `program` placed at 0x0000, where PC starts.
fn load(program: &[u8]) -> (Cpu, TestBus) {
    let mut bus = TestBus::default();
    bus.memory[..program.len()].copy_from_slice(program);
    (Cpu::new(), bus)
}

#[test]
fn register_set_masks_to_eight_bits() {
    let mut reg = Register::default();
    for v in [0u32, 1, 0x7F, 0x80, 0xFF, 0x100, 0x1234, 0xFFFF_FFFF] {
        reg.set(v);
        assert_eq!(u32::from(reg.get()), v & 0xFF);
    }
}

#[test]
fn register_raw_is_signed_view() {
    let mut reg = Register::default();
    reg.set(0xFE);
    assert_eq!(reg.raw(), -2);
    reg.set(0x7F);
    assert_eq!(reg.raw(), 127);
}

#[test]
fn register_combine_split_round_trips() {
    for high in 0..=0xFFu8 {
        for low in [0x00u8, 0x01, 0x0F, 0x80, 0xFF, high] {
            let value = Register::combine(Register::new(high), Register::new(low));
            assert_eq!(value, u16::from(high) << 8 | u16::from(low));

            let (mut h, mut l) = (Register::default(), Register::default());
            Register::split(value, &mut h, &mut l);
            assert_eq!((h.get(), l.get()), (high, low));
        }
    }
}

#[test]
fn register_increment_and_decrement_wrap() {
    let mut reg = Register::new(0xFF);
    reg.increment();
    assert_eq!(reg.get(), 0x00);
    reg.decrement();
    assert_eq!(reg.get(), 0xFF);
}

#[test]
fn flag_register_low_nibble_is_always_zero() {
    let mut f = FlagRegister::default();
    for v in 0..=0xFFu32 {
        f.set(v);
        assert_eq!(f.get() & 0x0F, 0, "after set(0x{v:02X})");
        assert_eq!(f.get(), (v as u8) & 0xF0);
    }

    f.clear();
    f.set_zero(true);
    f.set_carry(true);
    f.set_half_carry(true);
    f.set_subtract(true);
    f.set_half_carry(false);
    assert_eq!(f.get(), 0xD0);
    assert!(f.zero() && f.subtract() && !f.half_carry() && f.carry());
}

#[test]
fn pair_writes_update_both_halves() {
    let mut cpu = Cpu::new();
    cpu.set_value_in_register(0xBEEF, RegisterType::BC);
    assert_eq!(cpu.regs.b.get(), 0xBE);
    assert_eq!(cpu.regs.c.get(), 0xEF);
    assert_eq!(cpu.value_from_register(RegisterType::BC), 0xBEEF);

    cpu.set_value_in_register(0x12FF, RegisterType::AF);
    assert_eq!(cpu.value_from_register(RegisterType::AF), 0x12F0);
    assert_eq!(cpu.value_from_register(RegisterType::F), 0xF0);

    cpu.set_register_from_bytes(&[0x34, 0x12], RegisterType::HL);
    assert_eq!(cpu.value_from_register(RegisterType::HL), 0x1234);
    cpu.set_register_from_bytes(&[0xAB], RegisterType::E);
    assert_eq!(cpu.value_from_register(RegisterType::E), 0xAB);
    assert_eq!(cpu.cycles(), 0);
}

#[test]
fn nop_costs_one_cycle() {
    let (mut cpu, mut bus) = load(&[0x00]);
    assert_eq!(cpu.step(&mut bus), Ok(1));
    assert_eq!(cpu.regs.pc, 1);
}

#[test]
fn ld_rr_d16_stores_little_endian_operand() {
    let (mut cpu, mut bus) = load(&[0x01, 0x34, 0x12, 0x31, 0xFE, 0xFF]);
    assert_eq!(cpu.step(&mut bus), Ok(3));
    assert_eq!(cpu.regs.bc(), 0x1234);
    assert_eq!(cpu.step(&mut bus), Ok(3));
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn ld_a16_sp_writes_low_then_high() {
    let (mut cpu, mut bus) = load(&[0x08, 0x00, 0xC0]);
    cpu.regs.sp = 0xBEEF;
    assert_eq!(cpu.step(&mut bus), Ok(5));
    assert_eq!(bus.memory[0xC000], 0xEF);
    assert_eq!(bus.memory[0xC001], 0xBE);
}

#[test]
fn ld_a16_sp_at_top_of_memory_fails_on_second_byte() {
    let (mut cpu, mut bus) = load(&[0x08, 0xFF, 0xFF]);
    cpu.regs.sp = 0x1234;
    let err = cpu.step(&mut bus).unwrap_err();
    assert_eq!(
        err,
        StepError::Address(AddressError {
            address: 0x10000,
            access: Access::Write,
        })
    );
    assert_eq!(bus.memory[0xFFFF], 0x34);
}

#[test]
fn ld_r_r_costs_nothing_beyond_fetch() {
    // LD B,0x42 ; LD C,B
    let (mut cpu, mut bus) = load(&[0x06, 0x42, 0x48]);
    assert_eq!(cpu.step(&mut bus), Ok(2));
    assert_eq!(cpu.step(&mut bus), Ok(1));
    assert_eq!(cpu.regs.c.get(), 0x42);
}

#[test]
fn ld_indirect_through_pairs() {
    // LD (BC),A ; LD A,(DE)
    let (mut cpu, mut bus) = load(&[0x02, 0x1A]);
    cpu.regs.a.set(0x99);
    cpu.regs.set_bc(0xC100);
    cpu.regs.set_de(0xC200);
    bus.memory[0xC200] = 0x55;

    assert_eq!(cpu.step(&mut bus), Ok(2));
    assert_eq!(bus.memory[0xC100], 0x99);
    assert_eq!(cpu.step(&mut bus), Ok(2));
    assert_eq!(cpu.regs.a.get(), 0x55);
}

#[test]
fn ld_hl_increment_and_decrement_pay_for_the_pair_write() {
    // LD A,(HL+) ; LD (HL-),A
    let (mut cpu, mut bus) = load(&[0x2A, 0x32]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x77;

    assert_eq!(cpu.step(&mut bus), Ok(3));
    assert_eq!(cpu.regs.a.get(), 0x77);
    assert_eq!(cpu.regs.hl(), 0xC001);

    assert_eq!(cpu.step(&mut bus), Ok(3));
    assert_eq!(bus.memory[0xC001], 0x77);
    assert_eq!(cpu.regs.hl(), 0xC000);
}

#[test]
fn ld_hl_d8_writes_memory() {
    let (mut cpu, mut bus) = load(&[0x36, 0x5A]);
    cpu.regs.set_hl(0xD000);
    assert_eq!(cpu.step(&mut bus), Ok(3));
    assert_eq!(bus.memory[0xD000], 0x5A);
}

#[test]
fn ldh_and_ld_c_use_the_high_page() {
    // LDH (0x80),A ; LD A,(C)
    let (mut cpu, mut bus) = load(&[0xE0, 0x80, 0xF2]);
    cpu.regs.a.set(0x11);
    cpu.regs.c.set(0x81);
    bus.memory[0xFF81] = 0x22;

    assert_eq!(cpu.step(&mut bus), Ok(3));
    assert_eq!(bus.memory[0xFF80], 0x11);
    assert_eq!(cpu.step(&mut bus), Ok(2));
    assert_eq!(cpu.regs.a.get(), 0x22);
}

#[test]
fn inc_r_sets_half_carry_and_keeps_carry() {
    let (mut cpu, mut bus) = load(&[0x04, 0x04]);
    cpu.regs.b.set(0x0F);
    cpu.set_flag(Flags::CARRY, true);

    assert_eq!(cpu.step(&mut bus), Ok(1));
    assert_eq!(cpu.regs.b.get(), 0x10);
    assert!(cpu.get_flag(Flags::HALF_CARRY));
    assert!(!cpu.get_flag(Flags::SUBTRACT));
    assert!(!cpu.get_flag(Flags::ZERO));
    assert!(cpu.get_flag(Flags::CARRY));

    cpu.regs.b.set(0xFF);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b.get(), 0x00);
    assert!(cpu.get_flag(Flags::ZERO));
}

#[test]
fn dec_r_flags_borrow_into_bit_four() {
    let (mut cpu, mut bus) = load(&[0x05, 0x05]);
    cpu.regs.b.set(0x10);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b.get(), 0x0F);
    assert!(cpu.get_flag(Flags::HALF_CARRY));
    assert!(cpu.get_flag(Flags::SUBTRACT));

    cpu.regs.b.set(0x01);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b.get(), 0x00);
    assert!(cpu.get_flag(Flags::ZERO));
    assert!(!cpu.get_flag(Flags::HALF_CARRY));
}

#[test]
fn inc_dec_rr_wrap_without_touching_flags() {
    // INC BC ; DEC DE
    let (mut cpu, mut bus) = load(&[0x03, 0x1B]);
    cpu.regs.set_bc(0xFFFF);
    cpu.regs.set_de(0x0000);
    cpu.regs.f.set(0xF0);

    assert_eq!(cpu.step(&mut bus), Ok(2));
    assert_eq!(cpu.regs.bc(), 0x0000);
    assert_eq!(cpu.step(&mut bus), Ok(2));
    assert_eq!(cpu.regs.de(), 0xFFFF);
    assert_eq!(cpu.regs.f.get(), 0xF0);
}

#[test]
fn inc_dec_hl_indirect_is_an_eight_bit_operation() {
    // INC (HL) ; DEC (HL)
    let (mut cpu, mut bus) = load(&[0x34, 0x35]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0xFF;

    assert_eq!(cpu.step(&mut bus), Ok(3));
    assert_eq!(bus.memory[0xC000], 0x00);
    assert!(cpu.get_flag(Flags::ZERO));
    assert!(cpu.get_flag(Flags::HALF_CARRY));
    assert_eq!(cpu.regs.hl(), 0xC000);

    assert_eq!(cpu.step(&mut bus), Ok(3));
    assert_eq!(bus.memory[0xC000], 0xFF);
    assert!(cpu.get_flag(Flags::SUBTRACT));
    assert!(!cpu.get_flag(Flags::ZERO));
}

#[test]
fn add_hl_bc_half_carry_out_of_low_byte() {
    let (mut cpu, mut bus) = load(&[0x09]);
    cpu.regs.set_hl(0x00FF);
    cpu.regs.set_bc(0x0001);
    cpu.set_flag(Flags::SUBTRACT, true);

    assert_eq!(cpu.step(&mut bus), Ok(2));
    assert_eq!(cpu.regs.hl(), 0x0100);
    assert!(!cpu.get_flag(Flags::SUBTRACT));
    assert!(cpu.get_flag(Flags::HALF_CARRY));
    assert!(!cpu.get_flag(Flags::CARRY));
}

#[test]
fn add_hl_bc_carry_out_of_bit_fifteen() {
    let (mut cpu, mut bus) = load(&[0x09]);
    cpu.regs.set_hl(0xFFFF);
    cpu.regs.set_bc(0x0001);
    cpu.set_flag(Flags::ZERO, false);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.hl(), 0x0000);
    assert!(cpu.get_flag(Flags::HALF_CARRY));
    assert!(cpu.get_flag(Flags::CARRY));
    // Z is left alone by 16-bit adds.
    assert!(!cpu.get_flag(Flags::ZERO));
}

#[test]
fn add_a_r_sets_zero_half_and_carry() {
    // ADD A,B
    let (mut cpu, mut bus) = load(&[0x80]);
    cpu.regs.a.set(0xF8);
    cpu.regs.b.set(0x08);

    assert_eq!(cpu.step(&mut bus), Ok(1));
    assert_eq!(cpu.regs.a.get(), 0x00);
    assert!(cpu.get_flag(Flags::ZERO));
    assert!(cpu.get_flag(Flags::HALF_CARRY));
    assert!(cpu.get_flag(Flags::CARRY));
    assert!(!cpu.get_flag(Flags::SUBTRACT));
}

#[test]
fn alu_group_covers_memory_and_immediate_operands() {
    // SUB (HL) ; XOR A ; OR d8 ; CP d8 ; ADC A,d8
    let (mut cpu, mut bus) = load(&[0x96, 0xAF, 0xF6, 0x0F, 0xFE, 0x0F, 0xCE, 0x01]);
    cpu.regs.a.set(0x10);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x01;

    assert_eq!(cpu.step(&mut bus), Ok(2));
    assert_eq!(cpu.regs.a.get(), 0x0F);
    assert!(cpu.get_flag(Flags::SUBTRACT));
    assert!(cpu.get_flag(Flags::HALF_CARRY));
    assert!(!cpu.get_flag(Flags::CARRY));

    assert_eq!(cpu.step(&mut bus), Ok(1));
    assert_eq!(cpu.regs.a.get(), 0x00);
    assert_eq!(cpu.regs.f.get(), Flags::ZERO.bits());

    assert_eq!(cpu.step(&mut bus), Ok(2));
    assert_eq!(cpu.regs.a.get(), 0x0F);

    assert_eq!(cpu.step(&mut bus), Ok(2));
    assert_eq!(cpu.regs.a.get(), 0x0F);
    assert!(cpu.get_flag(Flags::ZERO));

    cpu.set_flag(Flags::CARRY, true);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a.get(), 0x11);
}

#[test]
fn rlca_eight_times_returns_to_start() {
    let (mut cpu, mut bus) = load(&[0x07; 8]);
    cpu.regs.a.set(0x01);
    let expected = [0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x01];

    for want in expected {
        assert_eq!(cpu.step(&mut bus), Ok(1));
        assert_eq!(cpu.regs.a.get(), want);
        assert!(!cpu.get_flag(Flags::ZERO));
        assert!(!cpu.get_flag(Flags::SUBTRACT));
        assert!(!cpu.get_flag(Flags::HALF_CARRY));
    }
    // Carry ends equal to the MSB of the starting value.
    assert!(!cpu.get_flag(Flags::CARRY));
}

#[test]
fn rlca_carry_mirrors_bit_seven_of_the_result() {
    let (mut cpu, mut bus) = load(&[0x07; 8]);
    let start = 0b1011_0010u8;
    cpu.regs.a.set(start.into());

    for i in 0..8 {
        cpu.step(&mut bus).unwrap();
        let msb = cpu.regs.a.get() & 0x80 != 0;
        assert_eq!(cpu.get_flag(Flags::CARRY), msb, "rotation {i}");
    }
    assert_eq!(cpu.regs.a.get(), start);
    assert!(cpu.get_flag(Flags::CARRY));
}

#[test]
fn rlca_eight_times_leaves_carry_at_the_starting_msb() {
    for start in [0x00u8, 0x01, 0x7F, 0x80, 0xA5, 0xFF] {
        let (mut cpu, mut bus) = load(&[0x07; 8]);
        cpu.regs.a.set(start.into());
        for _ in 0..8 {
            cpu.step(&mut bus).unwrap();
        }
        assert_eq!(cpu.regs.a.get(), start);
        assert_eq!(cpu.get_flag(Flags::CARRY), start & 0x80 != 0, "start 0x{start:02X}");
    }
}

#[test]
fn rotate_body_rejects_other_kinds() {
    let mut cpu = Cpu::new();
    cpu.regs.a.set(0x42);
    let nop = Instruction::new("NOP", OperationKind::Nop, AddressMode::Implied);

    assert_eq!(
        cpu.exec_rotate_a(&nop),
        Err(StepError::Execution(ExecutionError::UnsupportedMode {
            kind: OperationKind::Nop,
            mode: AddressMode::Implied,
        }))
    );
    assert_eq!(cpu.regs.a.get(), 0x42);
}

#[test]
fn rrca_eight_times_returns_to_start() {
    let (mut cpu, mut bus) = load(&[0x0F; 8]);
    cpu.regs.a.set(0x01);
    let expected = [0x80, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01];

    for want in expected {
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.regs.a.get(), want);
    }
    assert!(!cpu.get_flag(Flags::CARRY));
}

#[test]
fn rla_and_rra_rotate_through_carry() {
    // RLA ; RRA
    let (mut cpu, mut bus) = load(&[0x17, 0x1F]);
    cpu.regs.a.set(0x80);
    cpu.set_flag(Flags::ZERO, true);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a.get(), 0x00);
    assert!(cpu.get_flag(Flags::CARRY));
    assert!(!cpu.get_flag(Flags::ZERO));

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a.get(), 0x80);
    assert!(!cpu.get_flag(Flags::CARRY));
}

#[test]
fn daa_adjusts_after_addition_overflow() {
    let (mut cpu, mut bus) = load(&[0x27]);
    cpu.regs.a.set(0x9A);

    assert_eq!(cpu.step(&mut bus), Ok(1));
    assert_eq!(cpu.regs.a.get(), 0x00);
    assert!(cpu.get_flag(Flags::ZERO));
    assert!(cpu.get_flag(Flags::CARRY));
    assert!(!cpu.get_flag(Flags::HALF_CARRY));
}

#[test]
fn daa_after_bcd_addition_and_subtraction() {
    // A = 0x15 + 0x27 ; DAA -> 0x42
    let (mut cpu, mut bus) = load(&[0xC6, 0x27, 0x27, 0xD6, 0x13, 0x27]);
    cpu.regs.a.set(0x15);
    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a.get(), 0x42);
    assert!(!cpu.get_flag(Flags::CARRY));

    // 0x42 - 0x13 ; DAA -> 0x29
    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a.get(), 0x29);
    assert!(cpu.get_flag(Flags::SUBTRACT));
}

#[test]
fn cpl_inverts_a_and_clears_n_and_h() {
    let (mut cpu, mut bus) = load(&[0x2F]);
    cpu.regs.a.set(0x35);
    cpu.regs.f.set(0xF0);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a.get(), 0xCA);
    assert!(!cpu.get_flag(Flags::SUBTRACT));
    assert!(!cpu.get_flag(Flags::HALF_CARRY));
    assert!(cpu.get_flag(Flags::ZERO));
    assert!(cpu.get_flag(Flags::CARRY));
}

#[test]
fn scf_only_forces_carry() {
    let (mut cpu, mut bus) = load(&[0x37, 0x3F]);
    cpu.set_flag(Flags::SUBTRACT, true);
    cpu.set_flag(Flags::HALF_CARRY, true);

    cpu.step(&mut bus).unwrap();
    assert!(cpu.get_flag(Flags::CARRY));
    assert!(cpu.get_flag(Flags::SUBTRACT));
    assert!(cpu.get_flag(Flags::HALF_CARRY));

    // CCF flips it back and clears N/H.
    cpu.step(&mut bus).unwrap();
    assert!(!cpu.get_flag(Flags::CARRY));
    assert!(!cpu.get_flag(Flags::SUBTRACT));
    assert!(!cpu.get_flag(Flags::HALF_CARRY));
}

#[test]
fn jr_unconditional_adds_offset_and_costs_three() {
    let (mut cpu, mut bus) = load(&[0x18, 10]);
    assert_eq!(cpu.step(&mut bus), Ok(3));
    assert_eq!(cpu.regs.pc, 2 + 10);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn jr_backwards_with_negative_offset() {
    let mut bus = TestBus::default();
    bus.memory[0x0100] = 0x18;
    bus.memory[0x0101] = (-4i8) as u8;
    let mut cpu = Cpu::new();
    cpu.regs.pc = 0x0100;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0102 - 4);
}

#[test]
fn jr_nz_not_taken_when_zero_set() {
    let (mut cpu, mut bus) = load(&[0x20, 10]);
    cpu.set_flag(Flags::ZERO, true);
    assert_eq!(cpu.step(&mut bus), Ok(2));
    assert_eq!(cpu.regs.pc, 2);
}

#[test]
fn jr_nz_taken_when_zero_clear() {
    let (mut cpu, mut bus) = load(&[0x20, 10]);
    assert_eq!(cpu.step(&mut bus), Ok(3));
    assert_eq!(cpu.regs.pc, 12);
}

#[test]
fn jr_carry_conditions_follow_carry_flag() {
    // JR C,+4 taken ; then at 6: JR NC,+4 not taken
    let mut bus = TestBus::default();
    bus.memory[0x00] = 0x38;
    bus.memory[0x01] = 4;
    bus.memory[0x06] = 0x30;
    bus.memory[0x07] = 4;
    let mut cpu = Cpu::new();
    cpu.set_flag(Flags::CARRY, true);

    assert_eq!(cpu.step(&mut bus), Ok(3));
    assert_eq!(cpu.regs.pc, 6);
    assert_eq!(cpu.step(&mut bus), Ok(2));
    assert_eq!(cpu.regs.pc, 8);
}

#[test]
fn jp_variants() {
    // JP 0x0010 ; at 0x10: JP Z,0x0020 (not taken) ; JP (HL)
    let mut bus = TestBus::default();
    bus.memory[..3].copy_from_slice(&[0xC3, 0x10, 0x00]);
    bus.memory[0x10..0x14].copy_from_slice(&[0xCA, 0x20, 0x00, 0xE9]);
    let mut cpu = Cpu::new();
    cpu.regs.set_hl(0x4000);

    assert_eq!(cpu.step(&mut bus), Ok(4));
    assert_eq!(cpu.regs.pc, 0x0010);
    assert_eq!(cpu.step(&mut bus), Ok(3));
    assert_eq!(cpu.regs.pc, 0x0013);
    assert_eq!(cpu.step(&mut bus), Ok(1));
    assert_eq!(cpu.regs.pc, 0x4000);
}

#[test]
fn call_and_ret_round_trip_through_the_stack() {
    // CALL 0x0010 ; at 0x10: RET
    let mut bus = TestBus::default();
    bus.memory[..3].copy_from_slice(&[0xCD, 0x10, 0x00]);
    bus.memory[0x10] = 0xC9;
    let mut cpu = Cpu::new();
    cpu.regs.sp = 0xFFFE;

    assert_eq!(cpu.step(&mut bus), Ok(6));
    assert_eq!(cpu.regs.pc, 0x0010);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFC], 0x03);
    assert_eq!(bus.memory[0xFFFD], 0x00);

    assert_eq!(cpu.step(&mut bus), Ok(4));
    assert_eq!(cpu.regs.pc, 0x0003);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn conditional_call_and_ret_timing() {
    // CALL NZ,0x0010 (not taken) ; RET Z (taken, returns to 0x1234)
    let (mut cpu, mut bus) = load(&[0xC4, 0x10, 0x00, 0xC8]);
    cpu.set_flag(Flags::ZERO, true);
    cpu.regs.sp = 0xC000;
    bus.memory[0xC000] = 0x34;
    bus.memory[0xC001] = 0x12;

    assert_eq!(cpu.step(&mut bus), Ok(3));
    assert_eq!(cpu.regs.pc, 3);
    assert_eq!(cpu.step(&mut bus), Ok(5));
    assert_eq!(cpu.regs.pc, 0x1234);
}

#[test]
fn rst_jumps_to_vector() {
    let mut bus = TestBus::default();
    bus.memory[0x0200] = 0xEF; // RST 28H
    let mut cpu = Cpu::new();
    cpu.regs.pc = 0x0200;
    cpu.regs.sp = 0xD000;

    assert_eq!(cpu.step(&mut bus), Ok(4));
    assert_eq!(cpu.regs.pc, 0x0028);
    assert_eq!(bus.memory[0xCFFE], 0x01);
    assert_eq!(bus.memory[0xCFFF], 0x02);
}

#[test]
fn push_pop_af_masks_flag_low_nibble() {
    // PUSH BC ; POP AF
    let (mut cpu, mut bus) = load(&[0xC5, 0xF1]);
    cpu.regs.sp = 0xD000;
    cpu.regs.set_bc(0x12FF);

    assert_eq!(cpu.step(&mut bus), Ok(4));
    assert_eq!(cpu.step(&mut bus), Ok(3));
    assert_eq!(cpu.regs.af(), 0x12F0);
    assert_eq!(cpu.regs.sp, 0xD000);
}

#[test]
fn add_sp_and_ld_hl_sp_offset() {
    // ADD SP,-1 ; LD HL,SP+2 ; LD SP,HL
    let (mut cpu, mut bus) = load(&[0xE8, 0xFF, 0xF8, 0x02, 0xF9]);
    cpu.regs.sp = 0x1000;

    assert_eq!(cpu.step(&mut bus), Ok(4));
    assert_eq!(cpu.regs.sp, 0x0FFF);
    assert!(!cpu.get_flag(Flags::ZERO));

    assert_eq!(cpu.step(&mut bus), Ok(3));
    assert_eq!(cpu.regs.hl(), 0x1001);
    assert!(cpu.get_flag(Flags::HALF_CARRY));
    assert!(cpu.get_flag(Flags::CARRY));

    cpu.regs.set_hl(0xABCD);
    assert_eq!(cpu.step(&mut bus), Ok(2));
    assert_eq!(cpu.regs.sp, 0xABCD);
}

#[test]
fn di_ei_and_reti_drive_ime() {
    // EI ; DI ; RETI
    let (mut cpu, mut bus) = load(&[0xFB, 0xF3, 0xD9]);
    cpu.regs.sp = 0xC000;

    cpu.step(&mut bus).unwrap();
    assert!(cpu.ime());
    cpu.step(&mut bus).unwrap();
    assert!(!cpu.ime());
    assert_eq!(cpu.step(&mut bus), Ok(4));
    assert!(cpu.ime());
    assert_eq!(cpu.regs.pc, 0x0000);
}

#[test]
fn stop_and_halt_are_terminal() {
    let (mut cpu, mut bus) = load(&[0x10, 0x00, 0x00]);
    assert_eq!(cpu.step(&mut bus), Ok(2));
    assert!(cpu.is_halted());
    assert_eq!(cpu.regs.pc, 2);

    assert_eq!(cpu.step(&mut bus), Ok(0));
    assert_eq!(cpu.regs.pc, 2);
    assert_eq!(cpu.cycles(), 2);

    let (mut cpu, mut bus) = load(&[0x76]);
    assert_eq!(cpu.step(&mut bus), Ok(1));
    assert!(cpu.is_halted());
}

#[test]
fn undefined_opcodes_fail_to_decode() {
    for opcode in [0xCB, 0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD] {
        let (mut cpu, mut bus) = load(&[opcode]);
        assert_eq!(
            cpu.step(&mut bus),
            Err(StepError::Decode(DecodeError { opcode })),
            "opcode 0x{opcode:02X}"
        );
    }
}

#[test]
fn driver_memory_access_costs_one_cycle_each() {
    let mut bus = TestBus::default();
    let mut cpu = Cpu::new();
    cpu.write_byte_to_address(&mut bus, 0xAB, 0xC000).unwrap();
    assert_eq!(cpu.read_byte_from_address(&mut bus, 0xC000), Ok(0xAB));
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn reset_returns_to_power_on_state() {
    let (mut cpu, mut bus) = load(&[0x3E, 0x42, 0x10, 0x00]);
    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    cpu.reset();
    assert_eq!(cpu.regs, Registers::default());
    assert!(!cpu.is_halted());
    assert_eq!(cpu.cycles(), 0);
}
