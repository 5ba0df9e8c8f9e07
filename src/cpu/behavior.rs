// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Contains implementations for each Chip-8 [Insn]
//!
//! By the time an instruction executes, pc already points at the next one.
//! Instructions which read registers read all of them before writing any,
//! and ALU instructions write vF before the destination register.
//!
//! This differs from the legacy interpreter when vF is an operand: `8XF5`, `8XF7`
//! and `FF1E` see vF as it was before the instruction, where the legacy interpreter
//! reads back the flag it has just written.

use super::{mem::FONT_START, mem::GLYPH_SIZE, *};
use rand::{random, Rng};

impl CPU {
    /// Executes a single [Insn]
    #[rustfmt::skip]
    #[inline(always)]
    pub(super) fn execute(&mut self, instruction: Insn) -> Exec {
        match instruction {
            Insn::cls               => self.clear_screen(),
            Insn::ret               => return self.ret(),
            Insn::jmp   {       A } => self.jump(A),
            Insn::call  {       A } => return self.call(A),
            Insn::seb   {    x, B } => self.skip_equals_immediate(x, B),
            Insn::sneb  {    x, B } => self.skip_not_equals_immediate(x, B),
            Insn::se    { y, x    } => self.skip_equals(x, y),
            Insn::movb  {    x, B } => self.load_immediate(x, B),
            Insn::addb  {    x, B } => self.add_immediate(x, B),
            Insn::mov   { y, x    } => self.load(x, y),
            Insn::or    { y, x    } => self.or(x, y),
            Insn::and   { y, x    } => self.and(x, y),
            Insn::xor   { y, x    } => self.xor(x, y),
            Insn::add   { y, x    } => self.add(x, y),
            Insn::sub   { y, x    } => self.sub(x, y),
            Insn::shr   { y, x    } => self.shift_right(x, y),
            Insn::bsub  { y, x    } => self.backwards_sub(x, y),
            Insn::shl   { y, x    } => self.shift_left(x, y),
            Insn::sne   { y, x    } => self.skip_not_equals(x, y),
            Insn::movI  {       A } => self.load_i_immediate(A),
            Insn::jmpr  {       A } => self.jump_indexed(A),
            Insn::rand  {    x, B } => self.rand(x, B),
            Insn::draw  { y, x, n } => return self.draw(x, y, n),
            Insn::sek   {    x    } => self.skip_key_equals(x),
            Insn::snek  {    x    } => self.skip_key_not_equals(x),
            Insn::getdt {    x    } => self.load_delay_timer(x),
            Insn::waitk {    x    } => self.wait_for_key(x),
            Insn::setdt {    x    } => self.store_delay_timer(x),
            Insn::movst {    x    } => self.store_sound_timer(x),
            Insn::addI  {    x    } => self.add_i(x),
            Insn::font  {    x    } => self.load_sprite(x),
            Insn::bcd   {    x    } => return self.bcd_convert(x),
            Insn::dmao  {    x    } => return self.store_dma(x),
            Insn::dmai  {    x    } => return self.load_dma(x),
        }
        Ok(())
    }
}

/// |`0aaa`| Issues a "System call" (ML routine)
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`00e0`| Clear screen memory to all 0       |
/// |`00ee`| Return from subroutine             |
impl CPU {
    /// |`00e0`| Clears the screen memory to 0
    #[inline(always)]
    pub(super) fn clear_screen(&mut self) {
        self.screen.clear();
    }
    /// |`00ee`| Returns from subroutine
    ///
    /// The stack holds the address of the call, so execution resumes just past it.
    #[inline(always)]
    pub(super) fn ret(&mut self) -> Exec {
        let addr = self.here();
        let call = self.stack.pop().ok_or(Fault::StackUnderflow { addr })?;
        self.pc = call.wrapping_add(2);
        Ok(())
    }
}

/// |`1aaa`| Sets pc to an absolute address
impl CPU {
    /// |`1aaa`| Sets the program counter to an absolute address
    #[inline(always)]
    pub(super) fn jump(&mut self, a: Adr) {
        self.pc = a;
    }
}

/// |`2aaa`| Pushes pc onto the stack, then jumps to a
impl CPU {
    /// |`2aaa`| Pushes the address of this instruction onto the stack, then jumps to a
    #[inline(always)]
    pub(super) fn call(&mut self, a: Adr) -> Exec {
        let addr = self.here();
        self.stack
            .push(addr)
            .ok_or(Fault::StackOverflow { addr })?;
        self.pc = a;
        Ok(())
    }
}

/// |`3xbb`| Skips next instruction if register X == b
impl CPU {
    /// |`3xbb`| Skips the next instruction if register X == b
    #[inline(always)]
    pub(super) fn skip_equals_immediate(&mut self, x: Reg, b: u8) {
        if self.v[x] == b {
            self.pc = self.pc.wrapping_add(2);
        }
    }
}

/// |`4xbb`| Skips next instruction if register X != b
impl CPU {
    /// |`4xbb`| Skips the next instruction if register X != b
    #[inline(always)]
    pub(super) fn skip_not_equals_immediate(&mut self, x: Reg, b: u8) {
        if self.v[x] != b {
            self.pc = self.pc.wrapping_add(2);
        }
    }
}

/// |`5xyn`| Performs a register-register comparison
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`5XY0`| Skip next instruction if vX == vY  |
impl CPU {
    /// |`5xy0`| Skips the next instruction if register X == register Y
    #[inline(always)]
    pub(super) fn skip_equals(&mut self, x: Reg, y: Reg) {
        if self.v[x] == self.v[y] {
            self.pc = self.pc.wrapping_add(2);
        }
    }
}

/// |`6xbb`| Loads immediate byte b into register vX
impl CPU {
    /// |`6xbb`| Loads immediate byte b into register vX
    #[inline(always)]
    pub(super) fn load_immediate(&mut self, x: Reg, b: u8) {
        self.v[x] = b;
    }
}

/// |`7xbb`| Adds immediate byte b to register vX
impl CPU {
    /// |`7xbb`| Adds immediate byte b to register vX. vF is untouched.
    #[inline(always)]
    pub(super) fn add_immediate(&mut self, x: Reg, b: u8) {
        self.v[x] = self.v[x].wrapping_add(b);
    }
}

/// |`8xyn`| Performs ALU operation
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`8xy0`| X = Y                              |
/// |`8xy1`| X = X | Y                          |
/// |`8xy2`| X = X & Y                          |
/// |`8xy3`| X = X ^ Y                          |
/// |`8xy4`| X = X + Y; Set vF=carry            |
/// |`8xy5`| X = X - Y; Set vF=!borrow          |
/// |`8xy6`| X = X >> 1; Set vF=shifted out bit |
/// |`8xy7`| X = Y - X; Set vF=!borrow          |
/// |`8xyE`| X = X << 1; Set vF=shifted out bit |
impl CPU {
    /// |`8xy0`| Loads the value of y into x
    #[inline(always)]
    pub(super) fn load(&mut self, x: Reg, y: Reg) {
        self.v[x] = self.v[y];
    }
    /// |`8xy1`| Performs bitwise or of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn or(&mut self, x: Reg, y: Reg) {
        self.v[x] |= self.v[y];
    }
    /// |`8xy2`| Performs bitwise and of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn and(&mut self, x: Reg, y: Reg) {
        self.v[x] &= self.v[y];
    }
    /// |`8xy3`| Performs bitwise xor of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn xor(&mut self, x: Reg, y: Reg) {
        self.v[x] ^= self.v[y];
    }
    /// |`8xy4`| Performs addition of vX and vY, and stores the result in vX
    ///
    /// vF is set to 1 if the sum exceeds 255, else 0
    #[inline(always)]
    pub(super) fn add(&mut self, x: Reg, y: Reg) {
        let (sum, carry) = self.v[x].overflowing_add(self.v[y]);
        self.v[0xf] = carry.into();
        self.v[x] = sum;
    }
    /// |`8xy5`| Performs subtraction of vX and vY, and stores the result in vX
    ///
    /// vF is set to 0 if vX < vY (a borrow occurred), else 1
    #[inline(always)]
    pub(super) fn sub(&mut self, x: Reg, y: Reg) {
        let (difference, borrow) = self.v[x].overflowing_sub(self.v[y]);
        self.v[0xf] = (!borrow).into();
        self.v[x] = difference;
    }
    /// |`8xy6`| Performs bitwise right shift of vX
    ///
    /// vF is set to the bit shifted out. vY is ignored.
    #[inline(always)]
    pub(super) fn shift_right(&mut self, x: Reg, _y: Reg) {
        let shift_out = self.v[x] & 1;
        let result = self.v[x] >> 1;
        self.v[0xf] = shift_out;
        self.v[x] = result;
    }
    /// |`8xy7`| Performs subtraction of vY and vX, and stores the result in vX
    ///
    /// vF is set to 0 if vY < vX (a borrow occurred), else 1
    #[inline(always)]
    pub(super) fn backwards_sub(&mut self, x: Reg, y: Reg) {
        let (difference, borrow) = self.v[y].overflowing_sub(self.v[x]);
        self.v[0xf] = (!borrow).into();
        self.v[x] = difference;
    }
    /// |`8xyE`| Performs bitwise left shift of vX
    ///
    /// vF is set to the bit shifted out. vY is ignored.
    #[inline(always)]
    pub(super) fn shift_left(&mut self, x: Reg, _y: Reg) {
        let shift_out = self.v[x] >> 7;
        let result = self.v[x] << 1;
        self.v[0xf] = shift_out;
        self.v[x] = result;
    }
}

/// |`9xyn`| Performs a register-register comparison
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`9XY0`| Skip next instruction if vX != vY  |
impl CPU {
    /// |`9xy0`| Skip next instruction if X != y
    #[inline(always)]
    pub(super) fn skip_not_equals(&mut self, x: Reg, y: Reg) {
        if self.v[x] != self.v[y] {
            self.pc = self.pc.wrapping_add(2);
        }
    }
}

/// |`Aaaa`| Load address #a into register I
impl CPU {
    /// |`Aadr`| Load address #adr into register I
    #[inline(always)]
    pub(super) fn load_i_immediate(&mut self, a: Adr) {
        self.i = a;
    }
}

/// |`Baaa`| Jump to &adr + v0
impl CPU {
    /// |`Badr`| Jump to &adr + v0
    #[inline(always)]
    pub(super) fn jump_indexed(&mut self, a: Adr) {
        self.pc = a.wrapping_add(self.v[0] as Adr);
    }
}

/// |`Cxbb`| Stores a random number & the provided byte into vX
impl CPU {
    /// |`Cxbb`| Stores a random number & the provided byte into vX
    ///
    /// # Quirk
    /// The legacy interpreter takes its random number `% 255`, so it never rolls `0xff`
    #[inline(always)]
    pub(super) fn rand(&mut self, x: Reg, b: u8) {
        let roll: u8 = if self.flags.quirks.legacy_rand {
            rand::thread_rng().gen_range(0..=254)
        } else {
            random()
        };
        self.v[x] = roll & b;
    }
}

/// |`Dxyn`| Draws n-byte sprite to the screen at coordinates (vX, vY)
impl CPU {
    /// |`Dxyn`| Draws n-byte sprite to the screen at coordinates (vX, vY)
    ///
    /// vF is set to 1 if any lit pixel was turned off, else 0.
    ///
    /// # Quirk
    /// Off-screen pixels are clipped, or wrapped around when
    /// [Quirks::screen_wrap] is set
    #[inline(always)]
    pub(super) fn draw(&mut self, x: Reg, y: Reg, n: Nib) -> Exec {
        let (x, y) = (self.v[x] as usize, self.v[y] as usize);
        let start = self.i as usize;
        let sprite = self
            .mem
            .grab(start..start + n as usize)
            .ok_or_else(|| invalid_address(self.here(), start))?;
        let collision = self
            .screen
            .draw_sprite(x, y, sprite, self.flags.quirks.screen_wrap);
        self.v[0xf] = collision.into();
        Ok(())
    }
}

/// |`Exbb`| Skips instruction on value of keypress
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`eX9e`| Skip next instruction if key vX is held     |
/// |`eXa1`| Skip next instruction if key vX is not held |
impl CPU {
    /// |`Ex9E`| Skip next instruction if key vX is held
    #[inline(always)]
    pub(super) fn skip_key_equals(&mut self, x: Reg) {
        if self.keypad.is_pressed(self.v[x]) {
            self.pc = self.pc.wrapping_add(2);
        }
    }
    /// |`ExA1`| Skip next instruction if key vX is not held
    #[inline(always)]
    pub(super) fn skip_key_not_equals(&mut self, x: Reg) {
        if !self.keypad.is_pressed(self.v[x]) {
            self.pc = self.pc.wrapping_add(2);
        }
    }
}

/// |`Fxbb`| Performs IO
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`fX07`| Set vX to value in delay timer     |
/// |`fX0a`| Wait for input, store key in vX    |
/// |`fX15`| Set delay timer to the value in vX |
/// |`fX18`| Set sound timer to the value in vX |
/// |`fX1e`| Add vX to I                        |
/// |`fX29`| Load sprite for character x into I |
/// |`fX33`| BCD convert X into I[0..3]         |
/// |`fX55`| DMA Stor from I to registers 0..=X |
/// |`fX65`| DMA Load from I to registers 0..=X |
impl CPU {
    /// |`Fx07`| Get the current DT, and put it in vX
    /// ```py
    /// vX = DT
    /// ```
    #[inline(always)]
    pub(super) fn load_delay_timer(&mut self, x: Reg) {
        self.v[x] = self.timers.delay();
    }
    /// |`Fx0A`| Wait for key, then vX = K
    ///
    /// Takes the lowest-numbered held key. With no key held, pc is rewound,
    /// so this instruction runs again on the next step.
    #[inline(always)]
    pub(super) fn wait_for_key(&mut self, x: Reg) {
        if let Some(key) = self.keypad.first_pressed() {
            self.v[x] = key;
        } else {
            self.pc = self.here();
        }
    }
    /// |`Fx15`| Load vX into DT
    /// ```py
    /// DT = vX
    /// ```
    #[inline(always)]
    pub(super) fn store_delay_timer(&mut self, x: Reg) {
        self.timers.set_delay(self.v[x]);
    }
    /// |`Fx18`| Load vX into ST
    /// ```py
    /// ST = vX;
    /// ```
    #[inline(always)]
    pub(super) fn store_sound_timer(&mut self, x: Reg) {
        self.timers.set_sound(self.v[x]);
    }
    /// |`Fx1e`| Add vX to I,
    /// ```py
    /// vF = I + vX > 0xfff
    /// I += vX;
    /// ```
    #[inline(always)]
    pub(super) fn add_i(&mut self, x: Reg) {
        let sum = self.i as u32 + self.v[x] as u32;
        self.v[0xf] = (sum > 0xfff).into();
        self.i = sum as Adr;
    }
    /// |`Fx29`| Load sprite for character x into I
    /// ```py
    /// I = sprite(X);
    /// ```
    #[inline(always)]
    pub(super) fn load_sprite(&mut self, x: Reg) {
        self.i = FONT_START + GLYPH_SIZE * self.v[x] as Adr;
    }
    /// |`Fx33`| BCD convert X into I`[0..3]`
    #[inline(always)]
    pub(super) fn bcd_convert(&mut self, x: Reg) -> Exec {
        let (x, start) = (self.v[x], self.i as usize);
        let fault = invalid_address(self.here(), start);
        let digits = self.mem.grab_mut(start..start + 3).ok_or(fault)?;
        digits.copy_from_slice(&[x / 100, x / 10 % 10, x % 10]);
        Ok(())
    }
    /// |`Fx55`| DMA Stor from I to registers 0..=X
    ///
    /// Leaves I as I+X+1 after the transfer is done.
    #[inline(always)]
    pub(super) fn store_dma(&mut self, x: Reg) -> Exec {
        let start = self.i as usize;
        let fault = invalid_address(self.here(), start);
        self.mem
            .grab_mut(start..=start + x)
            .ok_or(fault)?
            .copy_from_slice(&self.v[..=x]);
        self.i = self.i.wrapping_add(x as Adr + 1);
        Ok(())
    }
    /// |`Fx65`| DMA Load from I to registers 0..=X
    ///
    /// Leaves I as I+X+1 after the transfer is done.
    #[inline(always)]
    pub(super) fn load_dma(&mut self, x: Reg) -> Exec {
        let start = self.i as usize;
        let fault = invalid_address(self.here(), start);
        let values = self.mem.grab(start..=start + x).ok_or(fault)?;
        self.v[..=x].copy_from_slice(values);
        self.i = self.i.wrapping_add(x as Adr + 1);
        Ok(())
    }
}
