//! Testing methods on chipvm's structs
use chipvm::*;
use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

fn hash(value: impl Hash) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn cpu() {
    let cpu = CPU::default(); // Default
    let cpu2 = cpu.clone(); // Clone
    assert!(cpu == cpu2); // PartialEq
    println!("{cpu:?}"); // Debug
}

mod error {
    use super::*;
    #[test]
    fn display() {
        let errors = [
            Error::from(Fault::UnknownOpcode { word: 0xffff, addr: 0x200 }),
            Error::ProgramTooLarge { size: 4000, max: MAX_PROGRAM_SIZE },
            Error::InvalidKey { key: 0x10 },
            Error::InvalidRegister { reg: 0x10 },
            Error::from(std::io::Error::from(std::io::ErrorKind::NotFound)),
        ];
        for error in errors {
            println!("{error} {error:?}");
        }
    }
    #[test]
    fn fault_is_transparent() {
        let fault = Fault::StackOverflow { addr: 0x2fe };
        assert_eq!(fault.to_string(), Error::from(fault).to_string());
        assert_eq!("call at 2fe overflowed the stack", fault.to_string());
    }
    #[test]
    fn fault() {
        let fault = Fault::InvalidAddress { addr: 0x202, target: 0x1000 };
        #[allow(clippy::clone_on_copy)]
        let fault2 = fault.clone();
        assert_eq!(fault, fault2);
        assert_eq!(hash(fault), hash(fault2));
        assert_ne!(fault, Fault::StackUnderflow { addr: 0x202 });
    }
}

mod state {
    use super::*;
    #[test]
    fn default() {
        assert_eq!(State::Running, State::default());
    }
    #[test]
    fn debug() {
        println!("{:?}", State::Halted(Fault::StackUnderflow { addr: 0x200 }));
    }
    #[test]
    fn hash() {
        assert_ne!(
            super::hash(State::Running),
            super::hash(State::Halted(Fault::StackUnderflow { addr: 0x200 }))
        );
    }
}

mod region {
    use super::*;
    //  #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[test]
    fn copy() {
        let r1 = Region::Charset;
        let r2 = r1;
        assert_eq!(r1, r2);
    }
    #[test]
    fn display() {
        assert_eq!("Charset Program", format!("{} {}", Region::Charset, Region::Program));
    }
    #[test]
    fn debug() {
        println!("{:?}{:?}", Region::Charset, Region::Program);
    }
    #[test]
    fn ord() {
        assert!(Region::Charset < Region::Program);
        assert_eq!(Region::Program, Region::Charset.max(Region::Program));
    }
    #[test]
    fn ranges_dont_overlap() {
        assert!(Region::Charset.range().end <= Region::Program.range().start);
        assert_eq!(MEMORY_SIZE, Region::Program.range().end);
    }
}

mod flags {
    use super::*;
    #[test]
    fn debug_toggles() {
        let mut flags = Flags::default();
        flags.debug();
        assert!(flags.debug);
        flags.debug();
        assert!(!flags.debug);
    }
    #[test]
    fn clone() {
        let flags = Flags {
            debug: true,
            quirks: Quirks::from(true),
        };
        assert_eq!(flags, flags.clone());
        assert_eq!(hash(&flags), hash(flags.clone()));
    }
}

mod quirks {
    use super::*;
    #[test]
    fn from_bool() {
        assert_eq!(
            Quirks {
                screen_wrap: true,
                legacy_rand: true
            },
            Quirks::from(true)
        );
        assert_eq!(Quirks::default(), Quirks::from(false));
    }
    #[test]
    fn ord() {
        assert!(Quirks::from(false) < Quirks::from(true));
    }
}

mod screen {
    use super::*;
    #[test]
    fn default_is_blank() {
        let screen = Screen::default();
        assert_eq!(0, screen.lit().count());
        assert!(screen.rows().iter().all(|&row| row == 0));
        assert!(screen.needs_redraw());
    }
    #[test]
    fn display() {
        let mut screen = Screen::default();
        screen.draw_sprite(0, 0, &[0xc0], false);
        let text = screen.to_string();
        assert_eq!(HEIGHT, text.lines().count());
        assert!(text.starts_with("██ "));
        assert_eq!(2, text.matches('█').count());
    }
    #[test]
    fn to_bytes() {
        let mut screen = Screen::default();
        screen.draw_sprite(8, 1, &[0xa5], false);
        let bytes = screen.to_bytes();
        assert_eq!(0xa5, bytes[WIDTH / 8 + 1]);
        assert_eq!(1, bytes.iter().filter(|&&b| b != 0).count());
    }
    #[test]
    fn take_redraw() {
        let mut screen = Screen::default();
        assert!(screen.take_redraw());
        assert!(!screen.take_redraw());
        screen.clear();
        assert!(screen.needs_redraw());
    }
    #[test]
    fn print_screen() {
        let mut screen = Screen::default();
        screen.draw_sprite(30, 14, &[0xff, 0x81, 0xff], false);
        screen.print_screen();
    }
    #[test]
    fn hash() {
        let mut screen = Screen::default();
        let blank = super::hash(screen);
        screen.draw_sprite(0, 0, &[0x80], false);
        assert_ne!(blank, super::hash(screen));
    }
}

mod mem {
    use super::*;
    #[test]
    fn debug_display() {
        let mem = Mem::default();
        println!("{mem:?}");
        let dump = mem.window(0x000..0x020).to_string();
        assert_eq!(2, dump.lines().count());
        assert!(dump.contains("f090"));
    }
    #[test]
    fn window_clamps() {
        let mem = Mem::default();
        assert_eq!("", mem.window(0x2000..0x3000).to_string());
        assert_eq!(1, mem.window(0xff0..0x2000).to_string().lines().count());
    }
    #[test]
    fn len() {
        let mem = Mem::default();
        assert_eq!(MEMORY_SIZE, mem.len());
        assert!(!mem.is_empty());
    }
}

mod disassembler {
    use super::*;
    #[test]
    fn insn_display() {
        for (word, text) in [
            (0x00e0u16, "cls"),
            (0x00ee, "ret"),
            (0x1234, "jmp    234"),
            (0x8ab4, "add    vB, vA"),
            (0xd125, "draw   #5, v1, v2"),
            (0xf30a, "waitk  v3"),
        ] {
            let (_, insn) = <Insn as imperative_rs::InstructionSet>::decode(&word.to_be_bytes())
                .expect("should decode");
            assert_eq!(text, insn.to_string().trim_end());
        }
    }
    #[test]
    fn dis_default() {
        let dis = Dis::default();
        assert_ne!(dis.invalid, dis.normal);
        assert!(dis.once(0x00e0).contains("cls"));
        assert!(dis.once(0x5001).contains("inval  5001"));
    }
}

mod peripherals {
    use super::*;
    #[test]
    fn stack() {
        let mut stack = Stack::default();
        stack.push(0x200).unwrap().push(0x300).unwrap();
        assert_eq!(&[0x200, 0x300], stack.as_slice());
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack, Stack::default());
    }
    #[test]
    fn keypad() {
        let mut keypad = Keypad::default();
        keypad.set_all([true; 16]);
        assert_eq!(Some(0), keypad.first_pressed());
        keypad.release_all();
        assert_eq!(Keypad::default(), keypad);
    }
    #[test]
    fn timers() {
        let mut timers = Timers::default();
        timers.set_sound(1);
        timers.tick();
        assert!(timers.take_beep());
        assert_eq!(Timers::default(), timers);
    }
}
