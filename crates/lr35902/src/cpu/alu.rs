use super::{Cpu, Flags};

impl Cpu {
    /// Core 8-bit ADD/ADC operation on A.
    ///
    /// `use_carry` selects between ADD (false) and ADC (true).
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a.get();
        let carry_in = u8::from(use_carry && self.get_flag(Flags::CARRY));

        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let full = u16::from(a) + u16::from(value) + u16::from(carry_in);

        self.regs.a.set(full.into());
        let result = self.regs.a.get();

        // Flags: Z N H C
        self.clear_flags();
        self.set_flag(Flags::ZERO, result == 0);
        self.set_flag(Flags::HALF_CARRY, (half & 0x10) != 0);
        self.set_flag(Flags::CARRY, full > 0xFF);
    }

    /// Core 8-bit SUB/SBC operation on A.
    ///
    /// `use_carry` selects between SUB (false) and SBC (true).
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let result = self.alu_compare(value, use_carry);
        self.regs.a.set(result.into());
    }

    /// Compare A with `value`, setting flags as if `A - value` was performed.
    /// A itself is not modified.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.alu_compare(value, false);
    }

    fn alu_compare(&mut self, value: u8, use_carry: bool) -> u8 {
        let a = self.regs.a.get();
        let carry_in = i16::from(use_carry && self.get_flag(Flags::CARRY));

        let half = i16::from(a & 0x0F) - i16::from(value & 0x0F) - carry_in;
        let full = i16::from(a) - i16::from(value) - carry_in;
        let result = full as u8;

        self.clear_flags();
        self.set_flag(Flags::ZERO, result == 0);
        self.set_flag(Flags::SUBTRACT, true);
        self.set_flag(Flags::HALF_CARRY, half < 0);
        self.set_flag(Flags::CARRY, full < 0);
        result
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a.get() & value;
        self.regs.a.set(result.into());

        self.clear_flags();
        self.set_flag(Flags::ZERO, result == 0);
        self.set_flag(Flags::HALF_CARRY, true);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a.get() | value;
        self.regs.a.set(result.into());

        self.clear_flags();
        self.set_flag(Flags::ZERO, result == 0);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a.get() ^ value;
        self.regs.a.set(result.into());

        self.clear_flags();
        self.set_flag(Flags::ZERO, result == 0);
    }

    /// Decimal adjust accumulator after BCD addition/subtraction.
    ///
    /// - After an addition (N clear): add 0x06 when H is set or the low
    ///   nibble exceeds 9, add 0x60 when C is set or A exceeds 0x99.
    /// - After a subtraction (N set): subtract 0x06 when H is set and 0x60
    ///   when C is set.
    ///
    /// C ends up set whenever the 0x60 correction applied; H is always
    /// cleared; Z follows the result; N is left alone.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a.get();
        let mut adjust: u8 = if self.get_flag(Flags::CARRY) { 0x60 } else { 0x00 };
        if self.get_flag(Flags::HALF_CARRY) {
            adjust |= 0x06;
        }

        if !self.get_flag(Flags::SUBTRACT) {
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            a = a.wrapping_sub(adjust);
        }

        self.set_flag(Flags::CARRY, adjust >= 0x60);
        self.set_flag(Flags::HALF_CARRY, false);
        self.set_flag(Flags::ZERO, a == 0);
        self.regs.a.set(a.into());
    }

    /// 8-bit increment helper used by INC r and INC (HL).
    ///
    /// Updates Z, N, H while leaving C unchanged.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flags::ZERO, result == 0);
        self.set_flag(Flags::SUBTRACT, false);
        self.set_flag(Flags::HALF_CARRY, (value & 0x0F) + 1 > 0x0F);
        result
    }

    /// 8-bit decrement helper used by DEC r and DEC (HL).
    ///
    /// Updates Z, N, H while leaving C unchanged. H signals a borrow into
    /// bit 4.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flags::ZERO, result == 0);
        self.set_flag(Flags::SUBTRACT, true);
        self.set_flag(Flags::HALF_CARRY, (value & 0x0F) == 0);
        result
    }

    /// 16-bit add helper for `ADD HL,rr`.
    ///
    /// Z is unaffected and N is cleared. H reports a carry out of the low
    /// byte, C a carry out of bit 15.
    #[inline]
    pub(super) fn alu_add16(&mut self, base: u16, value: u16) -> u16 {
        let half = (base & 0x00FF) + (value & 0x00FF);
        let full = u32::from(base) + u32::from(value);

        self.set_flag(Flags::SUBTRACT, false);
        self.set_flag(Flags::HALF_CARRY, (half & 0x0100) != 0);
        self.set_flag(Flags::CARRY, full > 0xFFFF);

        full as u16
    }

    /// 16-bit add helper for instructions that add a signed 8-bit immediate
    /// to a 16-bit base (ADD SP,e8 and LD HL,SP+e8).
    ///
    /// Z is cleared; N is cleared; H and C are computed from the low byte.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        self.set_flag(Flags::SUBTRACT, false);
        self.set_flag(Flags::ZERO, false);
        self.set_flag(Flags::HALF_CARRY, (base & 0x000F) + (offset & 0x000F) > 0x000F);
        self.set_flag(Flags::CARRY, (base & 0x00FF) + (offset & 0x00FF) > 0x00FF);
        base.wrapping_add(offset)
    }
}
