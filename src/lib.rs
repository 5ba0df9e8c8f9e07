// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! This crate implements the core of a Chip-8 interpreter: 4 KiB of memory, sixteen
//! byte registers, a call stack, two countdown timers, a hex keypad, and a 64x32
//! monochrome framebuffer, driven one instruction at a time by its host.
//!
//! The host decides how fast to [step](CPU::step), what to do with the
//! [screen](CPU::screen) and the [sound edge](CPU::sound_edge), and which keys are held.
//!
//! ```rust
//! # use chipvm::*;
//! let mut cpu = CPU::default();
//! cpu.load_program_bytes(&[
//!     0x60, 0x05, // mov #05, v0
//!     0xf0, 0x29, // font v0, I
//!     0xd1, 0x15, // draw #5, v1, v1
//! ])?;
//! cpu.multistep(3)?;
//! assert_eq!(0x19, cpu.i());
//! assert!(cpu.screen().needs_redraw());
//! # Ok::<(), chipvm::error::Error>(())
//! ```

#![warn(missing_docs)]

pub mod cpu;
pub mod error;
pub mod screen;

pub use cpu::{
    mem::{CHARSET, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START},
    stack::STACK_DEPTH,
    Adr, Dis, Disassembler, Flags, Insn, Keypad, Mem, Quirks, Region, Stack, State, Timers,
    CPU,
};
pub use error::{Error, Fault, Result};
pub use screen::{Screen, HEIGHT, WIDTH};
