// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Runs a Chip-8 ROM without a window, then reports on what it did

use chipvm::{error::Result, *};
use env_logger::Env;
use gumdrop::*;
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Log every instruction as it executes.")]
    pub debug: bool,

    #[options(help = "Set the number of instructions to run.", default = "1000", meta = "N")]
    pub cycles: usize,
    #[options(
        help = "Hold a key (0-f) for the whole run. May be repeated.",
        parse(try_from_str = "parse_hex"),
        meta = "KEY"
    )]
    pub key: Vec<usize>,

    #[options(help = "Wrap sprites around the edges of the screen.")]
    pub wrap: bool,
    #[options(
        short = "l",
        help = "Roll random numbers in 0..=254, like the original interpreter."
    )]
    pub legacy_rand: bool,

    #[options(short = "r", help = "Dump the registers after the run.")]
    pub registers: bool,
    #[options(short = "m", help = "Dump program memory after the run.")]
    pub memory: bool,
}

/// Parses a hexadecimal string into a usize
fn parse_hex(value: &str) -> std::result::Result<usize, std::num::ParseIntError> {
    usize::from_str_radix(value, 16)
}

fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    env_logger::Builder::from_env(Env::default().default_filter_or(if options.debug {
        "debug"
    } else {
        "info"
    }))
    .init();

    let mut cpu = CPU::new(
        &options.file,
        Flags {
            debug: options.debug,
            quirks: Quirks {
                screen_wrap: options.wrap,
                legacy_rand: options.legacy_rand,
            },
        },
    )?;
    for &key in &options.key {
        cpu.press(key)?;
    }

    let mut beeps = 0;
    for _ in 0..options.cycles {
        if let Err(e) = cpu.step() {
            eprintln!("{}", e.bold().red());
            break;
        }
        if cpu.take_sound_edge() {
            beeps += 1;
            println!("Beep (cycle {})", cpu.cycle());
        }
    }

    cpu.screen().print_screen();
    println!(
        "Ran {} cycles, beeped {beeps} times. {:?}",
        cpu.cycle(),
        cpu.state()
    );
    if options.registers {
        cpu.dump();
    }
    if options.memory {
        println!("{}", cpu.mem().window(Region::Program.range()));
    }
    Ok(())
}
