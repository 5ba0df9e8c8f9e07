// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! chipvm: a Chip-8 interpreter, in a window

#[cfg(test)]
mod tests;
mod ui;

use chipvm::{error::Result, *};
use env_logger::Env;
use gumdrop::*;
use owo_colors::OwoColorize;
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};
use ui::*;

pub fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    env_logger::Builder::from_env(Env::default().default_filter_or(if options.debug {
        "debug"
    } else {
        "info"
    }))
    .init();
    let state = Frontend::new(options)?;
    for result in state {
        if let Err(e) = result {
            eprintln!("{}", e.bold().red());
            break;
        }
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Enable debug mode at startup.")]
    pub debug: bool,
    #[options(help = "Enable pause mode at startup.")]
    pub pause: bool,

    #[options(help = "Set the instructions-per-frame rate.", default = "10", meta = "IPF")]
    pub speed: usize,
    #[options(help = "Set the target framerate.", default = "60", meta = "FR")]
    pub frame_rate: u64,

    #[options(help = "Wrap sprites around the edges of the screen.")]
    pub wrap: bool,
    #[options(
        short = "l",
        help = "Roll random numbers in 0..=254, like the original interpreter."
    )]
    pub legacy_rand: bool,
}

/// Everything the UI can reach in and change
#[derive(Debug)]
pub struct Machine {
    pub cpu: CPU,
    pub paused: bool,
    pub rom: PathBuf,
}

#[derive(Debug)]
struct Frontend {
    pub speed: usize,
    pub rate: u64,
    pub machine: Machine,
    pub ui: UI,
    pub ft: Instant,
}

impl Frontend {
    fn new(options: Arguments) -> Result<Self> {
        let flags = Flags {
            debug: options.debug,
            quirks: Quirks {
                screen_wrap: options.wrap,
                legacy_rand: options.legacy_rand,
            },
        };
        Ok(Frontend {
            speed: options.speed,
            rate: options.frame_rate.max(1),
            machine: Machine {
                cpu: CPU::new(&options.file, flags)?,
                paused: options.pause,
                rom: options.file,
            },
            ui: UIBuilder::default().build()?,
            ft: Instant::now(),
        })
    }
    fn keys(&mut self) -> Result<bool> {
        self.ui.keys(&mut self.machine)
    }
    fn frame(&mut self) -> Result<bool> {
        self.ui.frame(&mut self.machine)
    }
    fn tick_cpu(&mut self) {
        let cpu = &mut self.machine.cpu;
        if !self.machine.paused {
            // a fault is latched in the cpu, and shown in the title bar
            if let Err(e) = cpu.multistep(self.speed) {
                eprintln!("{}", e.bold().red());
            }
        }
        if cpu.take_sound_edge() {
            eprintln!("Beep");
        }
    }
    fn wait_for_next_frame(&mut self) {
        let rate = Duration::from_nanos(1_000_000_000 / self.rate + 1);
        std::thread::sleep(rate.saturating_sub(self.ft.elapsed()));
        self.ft += rate;
    }
}

impl Iterator for Frontend {
    type Item = Result<()>;

    fn next(&mut self) -> Option<Self::Item> {
        self.wait_for_next_frame();
        match self.keys() {
            Ok(opt) if !opt => return None,
            Err(e) => return Some(Err(e)),
            _ => (),
        }
        self.tick_cpu();
        match self.frame() {
            Ok(opt) if !opt => return None,
            Err(e) => return Some(Err(e)),
            _ => (),
        }
        Some(Ok(()))
    }
}
