// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)
#![allow(clippy::bad_bit_mask)]
//! Decoding and mnemonics for chipvm's [Insn]

pub mod disassembler;

use imperative_rs::InstructionSet;
use std::fmt::Display;

#[allow(non_camel_case_types, non_snake_case, missing_docs)]
#[derive(Clone, Copy, Debug, InstructionSet, PartialEq, Eq, Hash)]
/// One decoded Chip-8 instruction word
///
/// Variants are named after their mnemonics. Operands are named after the letters in
/// each `#[opcode]` pattern: `A` holds an address, `B` a byte, `n` a nibble, and
/// `x`/`y` select registers.
pub enum Insn {
    /// `00E0`: blank the framebuffer
    #[opcode = "0x00e0"]
    cls,
    /// `00EE`: pop a call address and resume just past it
    #[opcode = "0x00ee"]
    ret,
    /// `1NNN`: continue at `A`
    #[opcode = "0x1AAA"]
    jmp { A: u16 },
    /// `2NNN`: push this instruction's address, continue at `A`
    #[opcode = "0x2AAA"]
    call { A: u16 },
    /// `3XNN`: skip one instruction when `vX == B`
    #[opcode = "0x3xBB"]
    seb { B: u8, x: usize },
    /// `4XNN`: skip one instruction when `vX != B`
    #[opcode = "0x4xBB"]
    sneb { B: u8, x: usize },
    /// `5XY0`: skip one instruction when `vX == vY`
    #[opcode = "0x5xy0"]
    se { y: usize, x: usize },
    /// `6XNN`: `vX = B`
    #[opcode = "0x6xBB"]
    movb { B: u8, x: usize },
    /// `7XNN`: `vX += B`, wrapping, flag untouched
    #[opcode = "0x7xBB"]
    addb { B: u8, x: usize },
    /// `8XY0`: `vX = vY`
    #[opcode = "0x8xy0"]
    mov { x: usize, y: usize },
    /// `8XY1`: `vX |= vY`
    #[opcode = "0x8xy1"]
    or { y: usize, x: usize },
    /// `8XY2`: `vX &= vY`
    #[opcode = "0x8xy2"]
    and { y: usize, x: usize },
    /// `8XY3`: `vX ^= vY`
    #[opcode = "0x8xy3"]
    xor { y: usize, x: usize },
    /// `8XY4`: `vX += vY`, carry into vF
    #[opcode = "0x8xy4"]
    add { y: usize, x: usize },
    /// `8XY5`: `vX -= vY`, no-borrow into vF
    #[opcode = "0x8xy5"]
    sub { y: usize, x: usize },
    /// `8XY6`: `vX >>= 1`, the dropped bit into vF
    #[opcode = "0x8xy6"]
    shr { y: usize, x: usize },
    /// `8XY7`: `vX = vY - vX`, no-borrow into vF
    #[opcode = "0x8xy7"]
    bsub { y: usize, x: usize },
    /// `8XYE`: `vX <<= 1`, the dropped bit into vF
    #[opcode = "0x8xye"]
    shl { y: usize, x: usize },
    /// `9XY0`: skip one instruction when `vX != vY`
    #[opcode = "0x9xy0"]
    sne { y: usize, x: usize },
    /// `ANNN`: `I = A`
    #[opcode = "0xaAAA"]
    movI { A: u16 },
    /// `BNNN`: continue at `A + v0`
    #[opcode = "0xbAAA"]
    jmpr { A: u16 },
    /// `CXNN`: `vX` = random byte masked by `B`
    #[opcode = "0xcxBB"]
    rand { B: u8, x: usize },
    /// `DXYN`: XOR an `n`-row sprite from `I` onto the screen at (vX, vY), collision into vF
    #[opcode = "0xdxyn"]
    draw { y: usize, x: usize, n: u8 },
    /// `EX9E`: skip one instruction while key vX is held
    #[opcode = "0xex9e"]
    sek { x: usize },
    /// `EXA1`: skip one instruction unless key vX is held
    #[opcode = "0xexa1"]
    snek { x: usize },
    /// `FX07`: `vX = DT`
    #[opcode = "0xfx07"]
    getdt { x: usize },
    /// `FX0A`: stall until a key is held, then put it in vX
    #[opcode = "0xfx0a"]
    waitk { x: usize },
    /// `FX15`: `DT = vX`
    #[opcode = "0xfx15"]
    setdt { x: usize },
    /// `FX18`: `ST = vX`
    #[opcode = "0xfx18"]
    movst { x: usize },
    /// `FX1E`: `I += vX`, vF set when the sum passes `0xfff`
    #[opcode = "0xfx1e"]
    addI { x: usize },
    /// `FX29`: point I at the font glyph for vX
    #[opcode = "0xfx29"]
    font { x: usize },
    /// `FX33`: write vX as three decimal digits at `I`
    #[opcode = "0xfx33"]
    bcd { x: usize },
    /// `FX55`: copy `v0..=vX` out to memory at `I`
    #[opcode = "0xfx55"]
    dmao { x: usize },
    /// `FX65`: copy memory at `I` into `v0..=vX`
    #[opcode = "0xfx65"]
    dmai { x: usize },
}

/// Prints the mnemonic with its operands, source before destination
impl Display for Insn {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Insn::cls               => write!(f, "cls    "),
            Insn::ret               => write!(f, "ret    "),
            Insn::jmp { A }         => write!(f, "jmp    {A:03x}"),
            Insn::call { A }        => write!(f, "call   {A:03x}"),
            Insn::seb { B, x }      => write!(f, "se     #{B:02x}, v{x:X}"),
            Insn::sneb { B, x }     => write!(f, "sne    #{B:02x}, v{x:X}"),
            Insn::se { y, x }       => write!(f, "se     v{y:X}, v{x:X}"),
            Insn::movb { B, x }     => write!(f, "mov    #{B:02x}, v{x:X}"),
            Insn::addb { B, x }     => write!(f, "add    #{B:02x}, v{x:X}"),
            Insn::mov { x, y }      => write!(f, "mov    v{y:X}, v{x:X}"),
            Insn::or { y, x }       => write!(f, "or     v{y:X}, v{x:X}"),
            Insn::and { y, x }      => write!(f, "and    v{y:X}, v{x:X}"),
            Insn::xor { y, x }      => write!(f, "xor    v{y:X}, v{x:X}"),
            Insn::add { y, x }      => write!(f, "add    v{y:X}, v{x:X}"),
            Insn::sub { y, x }      => write!(f, "sub    v{y:X}, v{x:X}"),
            Insn::shr { y, x }      => write!(f, "shr    v{y:X}, v{x:X}"),
            Insn::bsub { y, x }     => write!(f, "bsub   v{y:X}, v{x:X}"),
            Insn::shl { y, x }      => write!(f, "shl    v{y:X}, v{x:X}"),
            Insn::sne { y, x }      => write!(f, "sne    v{y:X}, v{x:X}"),
            Insn::movI { A }        => write!(f, "mov    ${A:03x}, I"),
            Insn::jmpr { A }        => write!(f, "jmp    ${A:03x}+v0"),
            Insn::rand { B, x }     => write!(f, "rand   #{B:02x}, v{x:X}"),
            Insn::draw { y, x, n }  => write!(f, "draw   #{n:x}, v{x:X}, v{y:X}"),
            Insn::sek { x }         => write!(f, "sek    v{x:X}"),
            Insn::snek { x }        => write!(f, "snek   v{x:X}"),
            Insn::getdt { x }       => write!(f, "mov    DT, v{x:X}"),
            Insn::waitk { x }       => write!(f, "waitk  v{x:X}"),
            Insn::setdt { x }       => write!(f, "mov    v{x:X}, DT"),
            Insn::movst { x }       => write!(f, "mov    v{x:X}, ST"),
            Insn::addI { x }        => write!(f, "add    v{x:X}, I"),
            Insn::font { x }        => write!(f, "font   v{x:X}, I"),
            Insn::bcd { x }         => write!(f, "bcd    v{x:X}, &I"),
            Insn::dmao { x }        => write!(f, "dmao   v{x:X}"),
            Insn::dmai { x }        => write!(f, "dmai   v{x:X}"),
        }
    }
}
