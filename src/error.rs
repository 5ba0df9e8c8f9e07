// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for chipvm

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for chipvm.
#[derive(Debug, Error)]
pub enum Error {
    /// The interpreter halted while executing an instruction
    #[error(transparent)]
    Fault(#[from] Fault),
    /// Tried to load a program that does not fit in program memory
    #[error("program is {size} bytes, but only {max} bytes of program memory exist")]
    ProgramTooLarge {
        /// The size of the offending program
        size: usize,
        /// The largest program that fits
        max: usize,
    },
    /// Tried to press a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "minifb")]
    /// Error originated in [minifb]
    #[error(transparent)]
    MinifbError(#[from] minifb::Error),
}

/// The reason the interpreter stopped executing.
///
/// A fault is latched in [State::Halted](crate::cpu::State::Halted) until the
/// interpreter is reset.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Fault {
    /// The word at `addr` is not a Chip-8 instruction
    #[error("opcode {word:04x} at {addr:03x} not recognized")]
    UnknownOpcode {
        /// The offending word
        word: u16,
        /// The address it was fetched from
        addr: u16,
    },
    /// A call was made with all 16 stack slots in use
    #[error("call at {addr:03x} overflowed the stack")]
    StackOverflow {
        /// The address of the call
        addr: u16,
    },
    /// A return was made with nothing on the stack
    #[error("return at {addr:03x} underflowed the stack")]
    StackUnderflow {
        /// The address of the return
        addr: u16,
    },
    /// An instruction touched memory past the end of the address space
    #[error("instruction at {addr:03x} accessed {target:04x}, which is outside of memory")]
    InvalidAddress {
        /// The address of the instruction
        addr: u16,
        /// The first address that could not be accessed
        target: usize,
    },
}
