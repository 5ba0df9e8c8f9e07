// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The Mem represents the CPU's memory
//!
//! Contains some handy utils for reading and writing

use super::Adr;
use crate::error::{Error, Result};
use owo_colors::{OwoColorize, Style};
use std::{
    fmt::{Debug, Display, Formatter},
    ops::Range,
    slice::SliceIndex,
};

/// Size of the Chip-8 address space, in bytes
pub const MEMORY_SIZE: usize = 0x1000;
/// Address at which programs are loaded, and execution begins
pub const PROGRAM_START: Adr = 0x200;
/// Largest program which fits in memory
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;
/// Address of the first font glyph
pub const FONT_START: Adr = 0x000;
/// Number of bytes in each font glyph
pub const GLYPH_SIZE: Adr = 5;

/// The built-in 4x5 hexadecimal font, glyphs `0` through `F`
#[rustfmt::skip]
pub const CHARSET: [u8; 80] = [
    0xf0, 0x90, 0x90, 0x90, 0xf0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xf0, 0x10, 0xf0, 0x80, 0xf0, // 2
    0xf0, 0x10, 0xf0, 0x10, 0xf0, // 3
    0x90, 0x90, 0xf0, 0x10, 0x10, // 4
    0xf0, 0x80, 0xf0, 0x10, 0xf0, // 5
    0xf0, 0x80, 0xf0, 0x90, 0xf0, // 6
    0xf0, 0x10, 0x20, 0x40, 0x40, // 7
    0xf0, 0x90, 0xf0, 0x90, 0xf0, // 8
    0xf0, 0x90, 0xf0, 0x10, 0xf0, // 9
    0xf0, 0x90, 0xf0, 0x90, 0x90, // A
    0xe0, 0x90, 0xe0, 0x90, 0xe0, // B
    0xf0, 0x80, 0x80, 0x80, 0xf0, // C
    0xe0, 0x90, 0x90, 0x90, 0xe0, // D
    0xf0, 0x80, 0xf0, 0x80, 0xf0, // E
    0xf0, 0x80, 0xf0, 0x80, 0x80, // F
];

/// Represents a named region in memory
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// Character ROM (but writable!)
    Charset,
    /// Program memory
    Program,
}

impl Region {
    /// Gets the range of addresses covered by this [Region]
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// assert_eq!(0x000..0x050, Region::Charset.range());
    /// assert_eq!(0x200..0x1000, Region::Program.range());
    /// ```
    pub fn range(self) -> Range<usize> {
        match self {
            Region::Charset => FONT_START as usize..FONT_START as usize + CHARSET.len(),
            Region::Program => PROGRAM_START as usize..MEMORY_SIZE,
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Region::Charset => "Charset",
                Region::Program => "Program",
            }
        )
    }
}

/// Stores the 4 KiB address space of the Chip-8
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Mem {
    memory: [u8; MEMORY_SIZE],
}

impl Mem {
    /// Constructs a new mem, with the charset loaded and nothing else
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let mem = Mem::new();
    /// assert_eq!(&CHARSET[..], mem.get_region(Region::Charset));
    /// assert!(mem.get_region(Region::Program).iter().all(|&b| b == 0));
    /// ```
    pub fn new() -> Self {
        let mut mem = Mem {
            memory: [0; MEMORY_SIZE],
        };
        mem.load_charset();
        mem
    }

    /// Gets the length of the backing memory
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Returns true if the backing memory contains no elements. It never does.
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Zeroes all of memory, then restores the charset
    pub fn reset(&mut self) {
        self.memory.fill(0);
        self.load_charset();
    }

    /// Copies the built-in font into [Region::Charset]
    pub fn load_charset(&mut self) {
        self.memory[Region::Charset.range()].copy_from_slice(&CHARSET);
    }

    /// Copies a program into [Region::Program], leaving the rest of memory alone.
    ///
    /// Returns [Error::ProgramTooLarge] without touching memory if the program doesn't fit.
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let mut mem = Mem::new();
    /// mem.load_program(&[0x00, 0xe0]).unwrap();
    /// assert_eq!(Some(0x00e0), mem.fetch(0x200));
    ///
    /// assert!(mem.load_program(&[0; MAX_PROGRAM_SIZE + 1]).is_err());
    /// ```
    pub fn load_program(&mut self, program: &[u8]) -> Result<&mut Self> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Error::ProgramTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        Ok(self)
    }

    /// Gets the contents of a named [Region]
    pub fn get_region(&self, region: Region) -> &[u8] {
        &self.memory[region.range()]
    }

    /// Gets a slice of memory, or None if the index is out of bounds
    #[inline(always)]
    pub fn grab<I>(&self, index: I) -> Option<&<I as SliceIndex<[u8]>>::Output>
    where
        I: SliceIndex<[u8]>,
    {
        self.memory.get(index)
    }

    /// Gets a mutable slice of memory, or None if the index is out of bounds
    #[inline(always)]
    pub fn grab_mut<I>(&mut self, index: I) -> Option<&mut <I as SliceIndex<[u8]>>::Output>
    where
        I: SliceIndex<[u8]>,
    {
        self.memory.get_mut(index)
    }

    /// Reads the big-endian word at `addr`, if both of its bytes are in memory
    #[inline(always)]
    pub fn fetch(&self, addr: Adr) -> Option<u16> {
        let addr = addr as usize;
        match self.memory.get(addr..addr + 2)? {
            &[hi, lo] => Some(u16::from_be_bytes([hi, lo])),
            _ => None,
        }
    }

    /// Gets a [MemWindow] over part of memory, which [Display]s as a hexdump
    ///
    /// The range is clamped to the address space.
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let mem = Mem::new();
    /// println!("{}", mem.window(0x000..0x050));
    /// ```
    pub fn window(&self, range: Range<usize>) -> MemWindow<'_> {
        let end = range.end.min(MEMORY_SIZE);
        let start = range.start.min(end);
        MemWindow {
            base: start,
            mem: &self.memory[start..end],
        }
    }
}

impl Default for Mem {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Mem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mem")
            .field("len", &self.memory.len())
            .finish_non_exhaustive()
    }
}

impl Display for Mem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.window(0..MEMORY_SIZE))
    }
}

/// A hexdump view over a slice of [Mem]
pub struct MemWindow<'a> {
    base: usize,
    mem: &'a [u8],
}

impl<'a> Display for MemWindow<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Green phosphor style formatting, for taste
        let term: Style = Style::new().bold().green().on_black();
        for (index, byte) in self.mem.iter().enumerate() {
            if index % 16 == 0 {
                write!(f, "{:>03x}{} ", (self.base + index).style(term), ":".style(term))?
            }
            write!(f, "{byte:02x}")?;
            write!(
                f,
                "{}",
                match index % 16 {
                    0xf => "\n",
                    0x7 => "  ",
                    _ if index % 2 == 1 => " ",
                    _ => "",
                }
            )?
        }
        Ok(())
    }
}
