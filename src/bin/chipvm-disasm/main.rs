// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Disassembles a Chip-8 ROM, one word per line

use chipvm::{error::Result, *};
use gumdrop::*;
use owo_colors::OwoColorize;
use std::{fs::read, path::PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Show help text")]
    help: bool,
    #[options(help = "Load a ROM to disassemble", free, required)]
    pub file: PathBuf,
    #[options(help = "Start disassembling at byte offset...")]
    pub offset: usize,
    #[options(help = "Disable colored output")]
    pub plain: bool,
}

fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    let contents = read(&options.file)?;
    let disassembler = if options.plain {
        Dis::plain()
    } else {
        Dis::default()
    };
    let rom = contents.get(options.offset..).unwrap_or_default();
    for (index, word) in rom.chunks_exact(2).enumerate() {
        let word = u16::from_be_bytes([word[0], word[1]]);
        let addr = PROGRAM_START as usize + options.offset + 2 * index;
        if options.plain {
            println!("{addr:03x}: {} {word:04x}", disassembler.once(word));
        } else {
            println!(
                "{:03x}: {} {:04x}",
                addr,
                disassembler.once(word),
                word.bright_black()
            );
        }
    }
    // odd trailing byte
    if let [last] = rom.chunks_exact(2).remainder() {
        let addr = PROGRAM_START as usize + options.offset + rom.len() - 1;
        println!("{addr:03x}: {last:02x}");
    }
    Ok(())
}
