use typed_builder::TypedBuilder;

use crate::error::{CoreError, Result};
use crate::opcodes::OPCODES;
use crate::MEMORY_SIZE;

/// Construction-time parameters for the CPU core.
#[derive(TypedBuilder, Clone, Copy, Debug)]
pub struct CpuConfig {
    /// Size of the interpreter-owned memory image, capped at 64 KiB.
    #[builder(default = MEMORY_SIZE)]
    pub memory_size: usize,
    /// Address the program image is copied to; PC and SP start here.
    #[builder(default = 0)]
    pub load_offset: u16,
}

impl Default for CpuConfig {
    fn default() -> Self {
        CpuConfig::builder().build()
    }
}

/// CPU flags for the Intel 8080.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub z: bool,  // zero
    pub s: bool,  // sign
    pub p: bool,  // parity
    pub cy: bool, // carry
    pub ac: bool, // auxiliary carry
}

impl Flags {
    /// Pack into the architectural flags byte. Bits 1, 3 and 5 are fixed
    /// at 1, 0 and 0 on the 8080, so the packed form always carries them
    /// that way.
    pub fn to_u8(self) -> u8 {
        let mut f = 0u8;
        if self.s {
            f |= 0x80;
        }
        if self.z {
            f |= 0x40;
        }
        if self.ac {
            f |= 0x10;
        }
        if self.p {
            f |= 0x04;
        }
        // Bit 1 is always set.
        f |= 0x02;
        if self.cy {
            f |= 0x01;
        }
        f
    }

    /// Unpack from a flags byte, ignoring the fixed bits.
    pub fn from_u8(&mut self, v: u8) {
        self.s = (v & 0x80) != 0;
        self.z = (v & 0x40) != 0;
        self.ac = (v & 0x10) != 0;
        self.p = (v & 0x04) != 0;
        self.cy = (v & 0x01) != 0;
    }
}

/// What an executed instruction did, from the scheduler's point of view.
enum Outcome {
    /// Retired on the primary duration.
    Done,
    /// Conditional fell through; the alternate duration applies.
    NotTaken,
    /// HLT retired; the CPU stops.
    Halted,
}

/// Intel 8080 CPU core with an interpreter-owned memory image.
///
/// The core is single-threaded and synchronous: callers own the stepping
/// loop and can break out of it whenever they choose. [`Cpu8080::step`]
/// costs one machine cycle per call, so a caller pacing `step()` against a
/// 2 MHz clock reproduces original hardware speed.
pub struct Cpu8080 {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
    pub flags: Flags,
    pub interrupts_enabled: bool,
    halted: bool,
    /// Cycles still owed to the previously retired instruction.
    wait: u8,
    memory: Vec<u8>,
    config: CpuConfig,
}

/// Register-pair selector embedded in bits 4..=5 of an opcode.
fn pair_code(op: u8) -> u8 {
    (op >> 4) & 0x3
}

/// Destination-register selector embedded in bits 3..=5 of an opcode.
fn dst_code(op: u8) -> u8 {
    (op >> 3) & 0x7
}

/// Source-register selector embedded in bits 0..=2 of an opcode.
fn src_code(op: u8) -> u8 {
    op & 0x7
}

/// Condition-code selector for Jcc/Ccc/Rcc (same bits as `dst_code`).
fn cond_code(op: u8) -> u8 {
    (op >> 3) & 0x7
}

impl Cpu8080 {
    /// Create a CPU with the default configuration (full 64 KiB image,
    /// load offset 0).
    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    pub fn with_config(config: CpuConfig) -> Self {
        let size = config.memory_size.min(MEMORY_SIZE);
        Self {
            a: 0,
            b: 0,
            c: 0,
            d: 0,
            e: 0,
            h: 0,
            l: 0,
            sp: config.load_offset,
            pc: config.load_offset,
            flags: Flags::default(),
            interrupts_enabled: false,
            halted: false,
            wait: 0,
            memory: vec![0; size],
            config,
        }
    }

    /// Reset registers and scheduling state to power-on values, keeping
    /// the memory contents intact.
    pub fn reset(&mut self) {
        let memory = std::mem::take(&mut self.memory);
        *self = Self::with_config(self.config);
        self.memory = memory;
    }

    /// Copy a program image into memory at the configured load offset and
    /// point PC (and SP) at it. An image that does not fit is truncated.
    pub fn load_image(&mut self, image: &[u8]) {
        let start = usize::from(self.config.load_offset);
        let room = self.memory.len().saturating_sub(start);
        let len = image.len().min(room);
        if len < image.len() {
            log::warn!(
                "program image truncated: {} of {} bytes fit at {:#06x}",
                len,
                image.len(),
                start
            );
        }
        if len > 0 {
            self.memory[start..start + len].copy_from_slice(&image[..len]);
        }
        self.pc = self.config.load_offset;
        self.sp = self.config.load_offset;
    }

    /// Read-only view of the memory image for outside observers.
    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Advance the CPU by one machine cycle.
    ///
    /// Returns `Ok(true)` while the CPU keeps running and `Ok(false)` once
    /// it has halted. An instruction retires on the call that fetches it;
    /// the remaining cycles of its duration are consumed by the following
    /// calls, so across any run of calls the cycle totals match the
    /// opcode table exactly.
    pub fn step(&mut self) -> Result<bool> {
        if self.halted {
            return Ok(false);
        }
        if self.wait > 0 {
            self.wait -= 1;
            return Ok(true);
        }

        let op = self.fetch_byte();
        log::trace!("{:#06x}: op {:#04x}", self.pc.wrapping_sub(1), op);
        let entry = OPCODES[usize::from(op)];
        match self.execute(op)? {
            Outcome::Done => self.wait = entry.dur.saturating_sub(1),
            Outcome::NotTaken => self.wait = entry.alt.saturating_sub(1),
            Outcome::Halted => {
                self.halted = true;
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Step until the CPU halts.
    pub fn run(&mut self) -> Result<()> {
        while self.step()? {}
        Ok(())
    }

    fn mem_read(&self, addr: u16) -> u8 {
        // Addresses beyond a smaller configured image read as open bus.
        self.memory.get(usize::from(addr)).copied().unwrap_or(0)
    }

    fn mem_write(&mut self, addr: u16, value: u8) {
        if let Some(byte) = self.memory.get_mut(usize::from(addr)) {
            *byte = value;
        }
    }

    fn fetch_byte(&mut self) -> u8 {
        let b = self.mem_read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        b
    }

    fn fetch_word(&mut self) -> u16 {
        let lo = u16::from(self.fetch_byte());
        let hi = u16::from(self.fetch_byte());
        hi << 8 | lo
    }

    fn hl(&self) -> u16 {
        u16::from(self.h) << 8 | u16::from(self.l)
    }

    fn set_hl(&mut self, value: u16) {
        self.h = (value >> 8) as u8;
        self.l = value as u8;
    }

    /// Read a register pair. Index 3 is the full stack pointer.
    fn read_rp(&self, rp: u8) -> u16 {
        match rp & 0x3 {
            0 => u16::from(self.b) << 8 | u16::from(self.c),
            1 => u16::from(self.d) << 8 | u16::from(self.e),
            2 => self.hl(),
            _ => self.sp,
        }
    }

    /// Write a register pair: high byte to the high slot, low byte to the
    /// low slot. Index 3 writes the full stack pointer.
    fn write_rp(&mut self, rp: u8, value: u16) {
        let hi = (value >> 8) as u8;
        let lo = value as u8;
        match rp & 0x3 {
            0 => {
                self.b = hi;
                self.c = lo;
            }
            1 => {
                self.d = hi;
                self.e = lo;
            }
            2 => {
                self.h = hi;
                self.l = lo;
            }
            _ => self.sp = value,
        }
    }

    /// Read a register by its 3-bit code; code 6 is the memory byte at
    /// H:L.
    fn read_reg(&self, index: u8) -> u8 {
        match index & 0x7 {
            0 => self.b,
            1 => self.c,
            2 => self.d,
            3 => self.e,
            4 => self.h,
            5 => self.l,
            6 => self.mem_read(self.hl()),
            _ => self.a,
        }
    }

    fn write_reg(&mut self, index: u8, value: u8) {
        match index & 0x7 {
            0 => self.b = value,
            1 => self.c = value,
            2 => self.d = value,
            3 => self.e = value,
            4 => self.h = value,
            5 => self.l = value,
            6 => {
                let addr = self.hl();
                self.mem_write(addr, value);
            }
            _ => self.a = value,
        }
    }

    fn set_szp(&mut self, value: u8) {
        self.flags.z = value == 0;
        self.flags.s = (value & 0x80) != 0;
        self.flags.p = value.count_ones() % 2 == 0;
    }

    fn add(&mut self, value: u8) {
        let a = self.a;
        let res = a.wrapping_add(value);
        self.flags.ac = ((a & 0x0f) + (value & 0x0f)) & 0x10 != 0;
        self.flags.cy = (a as u16 + value as u16) > 0xff;
        self.set_szp(res);
        self.a = res;
    }

    fn adc(&mut self, value: u8) {
        let carry = u8::from(self.flags.cy);
        let a = self.a;
        let res = a.wrapping_add(value).wrapping_add(carry);
        self.flags.ac = (a & 0x0f) + (value & 0x0f) + carry > 0x0f;
        self.flags.cy = (a as u16) + (value as u16) + (carry as u16) > 0xff;
        self.set_szp(res);
        self.a = res;
    }

    // Carry after a subtract is the borrow, the complement of the raw
    // 9-bit carry-out.
    fn sub(&mut self, value: u8) {
        let a = self.a;
        let res = a.wrapping_sub(value);
        self.flags.ac = (a & 0x0f) < (value & 0x0f);
        self.flags.cy = a < value;
        self.set_szp(res);
        self.a = res;
    }

    fn sbb(&mut self, value: u8) {
        let carry = u8::from(self.flags.cy);
        let a = self.a;
        let res = a.wrapping_sub(value).wrapping_sub(carry);
        self.flags.ac = (a & 0x0f) < ((value & 0x0f) + carry);
        self.flags.cy = (a as u16) < (value as u16) + (carry as u16);
        self.set_szp(res);
        self.a = res;
    }

    // Logical ops clear both carries.
    fn ana(&mut self, value: u8) {
        let res = self.a & value;
        self.flags.cy = false;
        self.flags.ac = false;
        self.set_szp(res);
        self.a = res;
    }

    fn xra(&mut self, value: u8) {
        let res = self.a ^ value;
        self.flags.cy = false;
        self.flags.ac = false;
        self.set_szp(res);
        self.a = res;
    }

    fn ora(&mut self, value: u8) {
        let res = self.a | value;
        self.flags.cy = false;
        self.flags.ac = false;
        self.set_szp(res);
        self.a = res;
    }

    /// SUB that discards the result, keeping the flags.
    fn cmp(&mut self, value: u8) {
        let a = self.a;
        let res = a.wrapping_sub(value);
        self.flags.ac = (a & 0x0f) < (value & 0x0f);
        self.flags.cy = a < value;
        self.set_szp(res);
    }

    fn inr(&mut self, value: u8) -> u8 {
        let r = value.wrapping_add(1);
        self.flags.ac = (value & 0x0f) + 1 > 0x0f;
        // Carry flag is not affected by INR.
        self.set_szp(r);
        r
    }

    fn dcr(&mut self, value: u8) -> u8 {
        let r = value.wrapping_sub(1);
        self.flags.ac = (r & 0x0f) != 0x0f;
        // Carry flag is not affected by DCR.
        self.set_szp(r);
        r
    }

    /// 16-bit add into HL; only the carry flag is touched.
    fn dad(&mut self, value: u16) {
        let hl = self.hl();
        let res = (hl as u32).wrapping_add(value as u32);
        self.flags.cy = res > 0xffff;
        self.set_hl(res as u16);
    }

    /// Evaluate a 3-bit condition code against the flags.
    fn condition(&self, code: u8) -> bool {
        match code & 0x7 {
            0 => !self.flags.z,  // NZ
            1 => self.flags.z,   // Z
            2 => !self.flags.cy, // NC
            3 => self.flags.cy,  // C
            4 => !self.flags.p,  // PO
            5 => self.flags.p,   // PE
            6 => !self.flags.s,  // P
            _ => self.flags.s,   // M
        }
    }

    /// Push a 16-bit value: predecrement SP by 2, then high byte at SP+2
    /// and low byte at SP+1. Fails closed instead of wrapping SP.
    fn push_word(&mut self, value: u16) -> Result<()> {
        if self.sp <= 1 {
            log::error!("stack underflow at {:#06x} (sp = {:#06x})", self.pc, self.sp);
            return Err(CoreError::StackUnderflow {
                pc: self.pc,
                sp: self.sp,
            });
        }
        self.sp -= 2;
        self.mem_write(self.sp.wrapping_add(2), (value >> 8) as u8);
        self.mem_write(self.sp.wrapping_add(1), value as u8);
        Ok(())
    }

    /// Exact inverse of [`Cpu8080::push_word`].
    fn pop_word(&mut self) -> u16 {
        self.sp = self.sp.wrapping_add(2);
        let hi = u16::from(self.mem_read(self.sp));
        let lo = u16::from(self.mem_read(self.sp.wrapping_sub(1)));
        hi << 8 | lo
    }

    /// Execute one fetched opcode. The returned [`Outcome`] tells the
    /// scheduler which duration column applies.
    fn execute(&mut self, raw: u8) -> Result<Outcome> {
        // Undocumented aliases behave as their primary counterparts.
        let opcode = match raw {
            0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => 0x00, // *NOP
            0xcb => 0xc3,               // *JMP
            0xd9 => 0xc9,               // *RET
            0xdd | 0xed | 0xfd => 0xcd, // *CALL
            _ => raw,
        };

        let outcome = match opcode {
            // NOP
            0x00 => Outcome::Done,

            // LXI rp,d16
            0x01 | 0x11 | 0x21 | 0x31 => {
                let value = self.fetch_word();
                self.write_rp(pair_code(opcode), value);
                Outcome::Done
            }

            // STAX B / STAX D
            0x02 | 0x12 => {
                let addr = self.read_rp(pair_code(opcode));
                self.mem_write(addr, self.a);
                Outcome::Done
            }

            // LDAX B / LDAX D
            0x0a | 0x1a => {
                let addr = self.read_rp(pair_code(opcode));
                self.a = self.mem_read(addr);
                Outcome::Done
            }

            // INX rp
            0x03 | 0x13 | 0x23 | 0x33 => {
                let rp = pair_code(opcode);
                let value = self.read_rp(rp).wrapping_add(1);
                self.write_rp(rp, value);
                Outcome::Done
            }

            // DCX rp
            0x0b | 0x1b | 0x2b | 0x3b => {
                let rp = pair_code(opcode);
                let value = self.read_rp(rp).wrapping_sub(1);
                self.write_rp(rp, value);
                Outcome::Done
            }

            // INR r / INR M
            0x04 | 0x0c | 0x14 | 0x1c | 0x24 | 0x2c | 0x34 | 0x3c => {
                let reg = dst_code(opcode);
                let r = self.inr(self.read_reg(reg));
                self.write_reg(reg, r);
                Outcome::Done
            }

            // DCR r / DCR M
            0x05 | 0x0d | 0x15 | 0x1d | 0x25 | 0x2d | 0x35 | 0x3d => {
                let reg = dst_code(opcode);
                let r = self.dcr(self.read_reg(reg));
                self.write_reg(reg, r);
                Outcome::Done
            }

            // MVI r,d8 / MVI M,d8
            0x06 | 0x0e | 0x16 | 0x1e | 0x26 | 0x2e | 0x36 | 0x3e => {
                let value = self.fetch_byte();
                self.write_reg(dst_code(opcode), value);
                Outcome::Done
            }

            // DAD rp
            0x09 | 0x19 | 0x29 | 0x39 => {
                let value = self.read_rp(pair_code(opcode));
                self.dad(value);
                Outcome::Done
            }

            // RLC
            0x07 => {
                let bit7 = (self.a & 0x80) != 0;
                self.a = (self.a << 1) | u8::from(bit7);
                self.flags.cy = bit7;
                Outcome::Done
            }

            // RRC
            0x0f => {
                let bit0 = (self.a & 0x01) != 0;
                self.a = (self.a >> 1) | if bit0 { 0x80 } else { 0 };
                self.flags.cy = bit0;
                Outcome::Done
            }

            // RAL
            0x17 => {
                let bit7 = (self.a & 0x80) != 0;
                self.a = (self.a << 1) | u8::from(self.flags.cy);
                self.flags.cy = bit7;
                Outcome::Done
            }

            // RAR
            0x1f => {
                let bit0 = (self.a & 0x01) != 0;
                self.a = (self.a >> 1) | if self.flags.cy { 0x80 } else { 0 };
                self.flags.cy = bit0;
                Outcome::Done
            }

            // SHLD a16
            0x22 => {
                let addr = self.fetch_word();
                self.mem_write(addr, self.l);
                self.mem_write(addr.wrapping_add(1), self.h);
                Outcome::Done
            }

            // LHLD a16
            0x2a => {
                let addr = self.fetch_word();
                self.l = self.mem_read(addr);
                self.h = self.mem_read(addr.wrapping_add(1));
                Outcome::Done
            }

            // DAA
            0x27 => {
                let mut adjust: u8 = 0;
                let mut carry = self.flags.cy;
                let low = self.a & 0x0f;
                let high = self.a >> 4;

                if low > 9 || self.flags.ac {
                    adjust |= 0x06;
                }
                if high > 9 || self.flags.cy || (high >= 9 && low > 9) {
                    adjust |= 0x60;
                    carry = true;
                }

                if adjust != 0 {
                    self.add(adjust);
                    self.flags.cy = carry;
                }
                Outcome::Done
            }

            // CMA
            0x2f => {
                self.a = !self.a;
                Outcome::Done
            }

            // STA a16
            0x32 => {
                let addr = self.fetch_word();
                self.mem_write(addr, self.a);
                Outcome::Done
            }

            // LDA a16
            0x3a => {
                let addr = self.fetch_word();
                self.a = self.mem_read(addr);
                Outcome::Done
            }

            // STC
            0x37 => {
                self.flags.cy = true;
                Outcome::Done
            }

            // CMC
            0x3f => {
                self.flags.cy = !self.flags.cy;
                Outcome::Done
            }

            // HLT
            0x76 => Outcome::Halted,

            // MOV r,r' (0x40..0x7f excluding HLT)
            0x40..=0x7f => {
                let value = self.read_reg(src_code(opcode));
                self.write_reg(dst_code(opcode), value);
                Outcome::Done
            }

            // ADD r / ADD M
            0x80..=0x87 => {
                let value = self.read_reg(src_code(opcode));
                self.add(value);
                Outcome::Done
            }

            // ADC r / ADC M
            0x88..=0x8f => {
                let value = self.read_reg(src_code(opcode));
                self.adc(value);
                Outcome::Done
            }

            // SUB r / SUB M
            0x90..=0x97 => {
                let value = self.read_reg(src_code(opcode));
                self.sub(value);
                Outcome::Done
            }

            // SBB r / SBB M
            0x98..=0x9f => {
                let value = self.read_reg(src_code(opcode));
                self.sbb(value);
                Outcome::Done
            }

            // ANA r / ANA M
            0xa0..=0xa7 => {
                let value = self.read_reg(src_code(opcode));
                self.ana(value);
                Outcome::Done
            }

            // XRA r / XRA M
            0xa8..=0xaf => {
                let value = self.read_reg(src_code(opcode));
                self.xra(value);
                Outcome::Done
            }

            // ORA r / ORA M
            0xb0..=0xb7 => {
                let value = self.read_reg(src_code(opcode));
                self.ora(value);
                Outcome::Done
            }

            // CMP r / CMP M
            0xb8..=0xbf => {
                let value = self.read_reg(src_code(opcode));
                self.cmp(value);
                Outcome::Done
            }

            // Rcc
            0xc0 | 0xc8 | 0xd0 | 0xd8 | 0xe0 | 0xe8 | 0xf0 | 0xf8 => {
                if self.condition(cond_code(opcode)) {
                    self.pc = self.pop_word();
                    Outcome::Done
                } else {
                    Outcome::NotTaken
                }
            }

            // POP rp / POP PSW
            0xc1 | 0xd1 | 0xe1 | 0xf1 => {
                let value = self.pop_word();
                match pair_code(opcode) {
                    3 => {
                        self.a = (value >> 8) as u8;
                        self.flags.from_u8(value as u8);
                    }
                    rp => self.write_rp(rp, value),
                }
                Outcome::Done
            }

            // Jcc a16: the operand bytes are consumed on both paths and
            // both paths cost the primary duration.
            0xc2 | 0xca | 0xd2 | 0xda | 0xe2 | 0xea | 0xf2 | 0xfa => {
                let addr = self.fetch_word();
                if self.condition(cond_code(opcode)) {
                    self.pc = addr;
                }
                Outcome::Done
            }

            // JMP a16
            0xc3 => {
                let addr = self.fetch_word();
                self.pc = addr;
                Outcome::Done
            }

            // Ccc a16
            0xc4 | 0xcc | 0xd4 | 0xdc | 0xe4 | 0xec | 0xf4 | 0xfc => {
                let addr = self.fetch_word();
                if self.condition(cond_code(opcode)) {
                    self.push_word(self.pc)?;
                    self.pc = addr;
                    Outcome::Done
                } else {
                    Outcome::NotTaken
                }
            }

            // PUSH rp / PUSH PSW
            0xc5 | 0xd5 | 0xe5 | 0xf5 => {
                let value = match pair_code(opcode) {
                    3 => u16::from(self.a) << 8 | u16::from(self.flags.to_u8()),
                    rp => self.read_rp(rp),
                };
                self.push_word(value)?;
                Outcome::Done
            }

            // ADI d8
            0xc6 => {
                let imm = self.fetch_byte();
                self.add(imm);
                Outcome::Done
            }

            // ACI d8
            0xce => {
                let imm = self.fetch_byte();
                self.adc(imm);
                Outcome::Done
            }

            // SUI d8
            0xd6 => {
                let imm = self.fetch_byte();
                self.sub(imm);
                Outcome::Done
            }

            // SBI d8
            0xde => {
                let imm = self.fetch_byte();
                self.sbb(imm);
                Outcome::Done
            }

            // ANI d8
            0xe6 => {
                let imm = self.fetch_byte();
                self.ana(imm);
                Outcome::Done
            }

            // XRI d8
            0xee => {
                let imm = self.fetch_byte();
                self.xra(imm);
                Outcome::Done
            }

            // ORI d8
            0xf6 => {
                let imm = self.fetch_byte();
                self.ora(imm);
                Outcome::Done
            }

            // CPI d8
            0xfe => {
                let imm = self.fetch_byte();
                self.cmp(imm);
                Outcome::Done
            }

            // RST n: software restart to vector n * 8.
            0xc7 | 0xcf | 0xd7 | 0xdf | 0xe7 | 0xef | 0xf7 | 0xff => {
                let vector = u16::from(opcode & 0x38);
                self.push_word(self.pc)?;
                self.pc = vector;
                Outcome::Done
            }

            // RET
            0xc9 => {
                self.pc = self.pop_word();
                Outcome::Done
            }

            // CALL a16: the pushed return address is the byte after the
            // operand.
            0xcd => {
                let target = self.fetch_word();
                self.push_word(self.pc)?;
                self.pc = target;
                Outcome::Done
            }

            // OUT d8: no port hardware is wired up, so consume and drop.
            0xd3 => {
                let port = self.fetch_byte();
                log::trace!("OUT {:#04x} <- {:#04x}", port, self.a);
                Outcome::Done
            }

            // IN d8: open ports read as zero.
            0xdb => {
                let _port = self.fetch_byte();
                self.a = 0;
                Outcome::Done
            }

            // XTHL: exchange HL with the word on top of the stack, using
            // the same SP+1/SP+2 layout as PUSH/POP.
            0xe3 => {
                let lo_addr = self.sp.wrapping_add(1);
                let hi_addr = self.sp.wrapping_add(2);
                let lo = self.mem_read(lo_addr);
                let hi = self.mem_read(hi_addr);
                self.mem_write(lo_addr, self.l);
                self.mem_write(hi_addr, self.h);
                self.l = lo;
                self.h = hi;
                Outcome::Done
            }

            // PCHL
            0xe9 => {
                self.pc = self.hl();
                Outcome::Done
            }

            // XCHG
            0xeb => {
                std::mem::swap(&mut self.d, &mut self.h);
                std::mem::swap(&mut self.e, &mut self.l);
                Outcome::Done
            }

            // DI / EI
            0xf3 => {
                self.interrupts_enabled = false;
                Outcome::Done
            }
            0xfb => {
                self.interrupts_enabled = true;
                Outcome::Done
            }

            // SPHL
            0xf9 => {
                self.sp = self.hl();
                Outcome::Done
            }

            // No handler installed. Unreachable with the full table above,
            // kept as the fail-closed path.
            op => {
                let pc = self.pc.wrapping_sub(1);
                log::error!("undefined opcode {:#04x} at {:#06x}", op, pc);
                return Err(CoreError::UndefinedOpcode { pc, opcode: op });
            }
        };
        Ok(outcome)
    }
}

impl Default for Cpu8080 {
    fn default() -> Self {
        Self::new()
    }
}
