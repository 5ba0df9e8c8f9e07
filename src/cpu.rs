// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


pub mod behavior;
pub mod flags;
pub mod instruction;
pub mod keypad;
pub mod mem;
pub mod quirks;
pub mod stack;
pub mod timers;

pub use self::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    keypad::Keypad,
    mem::{Mem, Region},
    quirks::Quirks,
    stack::Stack,
    timers::Timers,
};
use self::{
    keypad::KEY_COUNT,
    mem::{MEMORY_SIZE, PROGRAM_START},
};
use crate::{
    error::{Error, Fault, Result},
    screen::Screen,
};
use imperative_rs::InstructionSet;
use log::{debug, error, info};
use owo_colors::OwoColorize;
use std::fmt::Debug;

type Reg = usize;
/// A 12-bit Chip-8 address, stored in a u16
pub type Adr = u16;
type Nib = u8;
/// The outcome of executing one instruction
type Exec = std::result::Result<(), Fault>;

/// Whether the interpreter is still making progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum State {
    /// Each [CPU::step] executes one instruction
    #[default]
    Running,
    /// A [Fault] was hit; [CPU::step] does nothing until [CPU::reset]
    Halted(Fault),
}

/// Represents the internal state of the CPU interpreter
#[derive(Clone, PartialEq)]
pub struct CPU {
    /// Flags that control how the CPU behaves, but which aren't inherent to the
    /// chip-8. Includes [Quirks] and live disassembly.
    pub flags: Flags,
    // memory
    mem: Mem,
    screen: Screen,
    stack: Stack,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    timers: Timers,
    // I/O
    keypad: Keypad,
    // Execution data
    state: State,
    cycle: usize,
    disassembler: Dis,
}

// public interface
impl CPU {
    /// Constructs a new CPU with the given [Flags], and loads a ROM from disk
    /// # Examples
    /// ```rust,no_run
    /// # use chipvm::*;
    /// let cpu = CPU::new("roms/IBM Logo.ch8", Flags::default())?;
    /// dbg!(cpu);
    /// # Ok::<(), chipvm::error::Error>(())
    /// ```
    pub fn new(rom: impl AsRef<std::path::Path>, flags: Flags) -> Result<Self> {
        let mut cpu = CPU {
            flags,
            ..Default::default()
        };
        // load the provided rom
        cpu.load_program(rom)?;
        Ok(cpu)
    }

    /// Loads a program into the CPU's program space
    pub fn load_program(&mut self, rom: impl AsRef<std::path::Path>) -> Result<&mut Self> {
        self.load_program_bytes(&std::fs::read(rom)?)
    }

    /// Loads bytes into the CPU's program space, starting at `0x200`.
    ///
    /// Programs larger than `0x1000 - 0x200` bytes are rejected with
    /// [Error::ProgramTooLarge], and memory is left untouched.
    /// Registers, stack, and timers are never touched.
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[0x00, 0xe0]).unwrap();
    /// assert_eq!(&[0x00, 0xe0], &cpu.mem().get_region(Region::Program)[..2]);
    /// ```
    pub fn load_program_bytes(&mut self, rom: &[u8]) -> Result<&mut Self> {
        self.mem.load_program(rom)?;
        info!("loaded {} byte program at {PROGRAM_START:03x}", rom.len());
        Ok(self)
    }

    /// Resets the whole machine to its power-on state.
    ///
    /// Memory is zeroed (so the program must be loaded again), the charset is restored,
    /// all registers, timers, keys, and the stack are cleared, the screen is blanked, and
    /// the CPU resumes [State::Running] at `0x200`. [Flags] are kept.
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[0xff, 0xff]).unwrap();
    /// assert!(cpu.step().is_err());
    /// assert!(cpu.is_halted());
    /// cpu.reset();
    /// assert_eq!(State::Running, cpu.state());
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn reset(&mut self) {
        self.mem.reset();
        self.screen = Screen::default();
        self.stack.clear();
        self.pc = PROGRAM_START;
        self.i = 0;
        self.v = [0; 16];
        self.timers = Timers::default();
        self.keypad.release_all();
        self.state = State::Running;
        self.cycle = 0;
        debug!("reset");
    }

    /// Presses a key, and reports whether the key's state changed.
    /// If key does not exist, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let mut cpu = CPU::default();
    ///
    /// // press key `7`
    /// let did_press = cpu.press(0x7).unwrap();
    /// assert!(did_press);
    ///
    /// // press key `7` again, even though it's already pressed
    /// let did_press = cpu.press(0x7).unwrap();
    /// // it was already pressed, so nothing's changed.
    /// assert!(!did_press);
    /// ```
    pub fn press(&mut self, key: usize) -> Result<bool> {
        self.keypad.press(key)
    }

    /// Releases a key, and reports whether the key's state changed.
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let mut cpu = CPU::default();
    /// // press key `7`
    /// cpu.press(0x7).unwrap();
    /// // release key `7`
    /// let changed = cpu.release(0x7).unwrap();
    /// assert!(changed); // key released
    /// // try releasing `7` again
    /// let changed = cpu.release(0x7).unwrap();
    /// assert!(!changed); // key was not held
    /// ```
    pub fn release(&mut self, key: usize) -> Result<bool> {
        self.keypad.release(key)
    }

    /// Replaces the state of all 16 keys at once
    pub fn set_keys(&mut self, keys: [bool; KEY_COUNT]) {
        self.keypad.set_all(keys)
    }

    /// Releases every key
    pub fn release_all(&mut self) {
        self.keypad.release_all()
    }

    /// Gets the [Keypad]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Sets a general purpose register in the CPU.
    /// If the register doesn't exist, returns [Error::InvalidRegister]
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// // Create a new CPU, and set v4 to 0x41
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x4, 0x41).unwrap();
    /// assert_eq!(0x41, cpu.v()[4]);
    /// assert!(cpu.set_v(0x10, 0).is_err());
    /// ```
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        if let Some(gpr) = self.v.get_mut(reg) {
            *gpr = value;
            Ok(())
        } else {
            Err(Error::InvalidRegister { reg })
        }
    }

    /// Gets a slice of the entire general purpose registers
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// // Create a new CPU, and set v0 to 0x41
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x0, 0x41).unwrap();
    /// assert_eq!(
    ///     cpu.v(),
    ///     [0x41, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    /// )
    /// ```
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let cpu = CPU::default();
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the I register
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let cpu = CPU::default();
    /// assert_eq!(0, cpu.i());
    /// ```
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the stack pointer (the number of return addresses on the stack)
    pub fn sp(&self) -> usize {
        self.stack.sp()
    }

    /// Gets the return addresses on the stack, oldest first
    pub fn stack(&self) -> &[Adr] {
        self.stack.as_slice()
    }

    /// Gets the value in the Sound Timer register
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let cpu = CPU::default();
    /// assert_eq!(0, cpu.sound());
    /// ```
    pub fn sound(&self) -> u8 {
        self.timers.sound()
    }

    /// Gets the value in the Delay Timer register
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let cpu = CPU::default();
    /// assert_eq!(0, cpu.delay());
    /// ```
    pub fn delay(&self) -> u8 {
        self.timers.delay()
    }

    /// Returns true if the sound timer has run out since the sound edge was last cleared.
    ///
    /// Whoever plays sound should beep once, then [clear](CPU::clear_sound_edge) it.
    pub fn sound_edge(&self) -> bool {
        self.timers.beep()
    }

    /// Clears the sound edge
    pub fn clear_sound_edge(&mut self) {
        self.timers.clear_beep()
    }

    /// Clears the sound edge, returning whether it was set
    pub fn take_sound_edge(&mut self) -> bool {
        self.timers.take_beep()
    }

    /// Gets the [Screen]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Clears the screen's redraw flag, after the screen has been rendered
    pub fn clear_redraw(&mut self) {
        self.screen.clear_redraw()
    }

    /// Clears the screen's redraw flag, returning whether it was set
    pub fn take_redraw(&mut self) -> bool {
        self.screen.take_redraw()
    }

    /// Gets the CPU's memory
    pub fn mem(&self) -> &Mem {
        &self.mem
    }

    /// Gets the current [State]
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns true if the CPU has hit a [Fault], and won't execute until reset
    pub fn is_halted(&self) -> bool {
        matches!(self.state, State::Halted(_))
    }

    /// Gets the number of cycles the CPU has executed
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let cpu = CPU::default();
    /// assert_eq!(0x0, cpu.cycle());
    /// ```
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Steps the CPU up to `steps` times, stopping at the first [Fault]
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// cpu.multistep(0x20)
    ///     .expect("The program should only have valid opcodes.");
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(0x20, cpu.cycle());
    /// ```
    pub fn multistep(&mut self, steps: usize) -> Result<State> {
        for _ in 0..steps {
            if let State::Halted(fault) = self.step()? {
                return Ok(State::Halted(fault));
            }
        }
        Ok(self.state)
    }

    /// Executes a single instruction, then ticks the timers.
    ///
    /// Returns [Error::Fault] on the step that halts the CPU. Once halted,
    /// each step does nothing, and returns `Ok(State::Halted(_))`.
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// cpu.step()
    ///     .expect("0x00e0 (cls) should be a valid opcode.");
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// ```
    /// Returns [Error::Fault] if the instruction is not implemented.
    /// ```rust
    /// # use chipvm::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0xff, 0xff, // invalid!
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// dbg!(cpu.step())
    ///     .expect_err("Should return Fault::UnknownOpcode { 0xffff }");
    /// assert_eq!(
    ///     State::Halted(Fault::UnknownOpcode { word: 0xffff, addr: 0x200 }),
    ///     cpu.state()
    /// );
    /// ```
    pub fn step(&mut self) -> Result<State> {
        if self.is_halted() {
            return Ok(self.state);
        }
        self.cycle += 1;
        let executed = self.fetch_execute();
        self.timers.tick();
        if let Err(fault) = executed {
            error!("halted on cycle {}: {fault}", self.cycle);
            self.state = State::Halted(fault);
            return Err(fault.into());
        }
        Ok(self.state)
    }

    /// Dumps the current state of all CPU registers, and the cycle count
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let cpu = CPU::default();
    /// cpu.dump();
    /// ```
    /// outputs
    /// ```text
    /// PC: 0200, SP: 0000, I: 0000
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// DLY: 0, SND: 0, CYC:      0
    /// ```
    pub fn dump(&self) {
        std::println!(
            "PC: {:04x}, SP: {:04x}, I: {:04x}\n{}DLY: {}, SND: {}, CYC: {:6}",
            self.pc,
            self.stack.sp(),
            self.i,
            self.v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "v{i:X}: {gpr:02x} {}",
                        match i % 4 {
                            3 => "\n",
                            _ => "",
                        }
                    )
                })
                .collect::<String>(),
            self.timers.delay(),
            self.timers.sound(),
            self.cycle,
        );
    }
}

// private interface
impl CPU {
    /// Fetches, decodes, and executes the instruction at pc.
    ///
    /// On a fault, pc is left pointing at the offending instruction.
    fn fetch_execute(&mut self) -> Exec {
        let addr = self.pc;
        let word = self
            .mem
            .fetch(addr)
            .ok_or_else(|| invalid_address(addr, addr as usize))?;

        // Print opcode disassembly:
        if self.flags.debug {
            debug!(
                "{:3} {:03x}: {:<36}",
                self.cycle.bright_black(),
                addr,
                self.disassembler.once(word)
            );
        }

        // decode opcode
        let (inc, insn) = Insn::decode(&word.to_be_bytes())
            .map_err(|_| Fault::UnknownOpcode { word, addr })?;
        self.pc = addr.wrapping_add(inc as Adr);
        self.execute(insn).map_err(|fault| {
            self.pc = addr;
            fault
        })
    }

    /// Gets the address of the instruction being executed.
    ///
    /// Only meaningful inside [CPU::execute], after pc has moved past the instruction.
    #[inline(always)]
    fn here(&self) -> Adr {
        self.pc.wrapping_sub(2)
    }
}

/// Builds a [Fault::InvalidAddress] for an access at `start` from the instruction at `addr`
fn invalid_address(addr: Adr, start: usize) -> Fault {
    Fault::InvalidAddress {
        addr,
        target: start.max(MEMORY_SIZE),
    }
}

impl Debug for CPU {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("flags", &self.flags)
            .field("state", &self.state)
            .field("stack", &self.stack.as_slice())
            .field("pc", &self.pc)
            .field("i", &self.i)
            .field("v", &self.v)
            .field("timers", &self.timers)
            .field("keypad", &self.keypad)
            .field("cycle", &self.cycle)
            .field("disassembler", &self.disassembler)
            .finish_non_exhaustive()
    }
}

impl Default for CPU {
    /// Constructs a new CPU with the charset loaded, and no program
    ///
    /// | value  | default | description
    /// |--------|---------|------------
    /// | font   |`0x0000` | Location of font memory.
    /// | pc     |`0x0200` | Start location.
    ///
    /// # Examples
    /// ```rust
    /// use chipvm::*;
    /// let mut cpu = CPU::default();
    /// ```
    fn default() -> Self {
        CPU {
            flags: Flags::default(),
            mem: Mem::new(),
            screen: Screen::default(),
            stack: Stack::default(),
            pc: PROGRAM_START,
            i: 0,
            v: [0; 16],
            timers: Timers::default(),
            keypad: Keypad::default(),
            state: State::Running,
            cycle: 0,
            disassembler: Dis::default(),
        }
    }
}
