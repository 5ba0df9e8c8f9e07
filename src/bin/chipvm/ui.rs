// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)
#![allow(missing_docs)]
//! Window, framebuffer, and keyboard handling for the minifb frontend

use crate::Machine;
use chipvm::{error::Result, Screen, State, HEIGHT, WIDTH};
use minifb::*;
use std::time::Instant;

#[derive(Clone, Debug)]
pub struct UIBuilder {
    pub width: usize,
    pub height: usize,
    pub name: &'static str,
    pub window_options: WindowOptions,
}

impl UIBuilder {
    pub fn build(&self) -> Result<UI> {
        let ui = UI {
            window: Window::new(self.name, self.width, self.height, self.window_options)?,
            keyboard: Default::default(),
            fb: FrameBuffer::new(self.width, self.height),
            time: Instant::now(),
        };
        Ok(ui)
    }
}

impl Default for UIBuilder {
    fn default() -> Self {
        UIBuilder {
            width: WIDTH,
            height: HEIGHT,
            name: "chipvm",
            window_options: WindowOptions {
                title: true,
                resize: false,
                scale: Scale::X16,
                scale_mode: ScaleMode::AspectRatioStretch,
                none: true,
                ..Default::default()
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameBufferFormat {
    pub fg: u32,
    pub bg: u32,
}

impl Default for FrameBufferFormat {
    fn default() -> Self {
        FrameBufferFormat {
            fg: 0x0011a434,
            bg: 0x001e2431,
        }
    }
}

/// Holds one u32 color per pixel, scaled to fit the window
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameBuffer {
    buffer: Vec<u32>,
    width: usize,
    height: usize,
    format: FrameBufferFormat,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            buffer: vec![FrameBufferFormat::default().bg; width * height],
            width,
            height,
            format: Default::default(),
        }
    }
    /// Paints the [Screen] into the buffer, nearest-neighbor scaled
    pub fn draw(&mut self, screen: &Screen) {
        for (idx, pixel) in self.buffer.iter_mut().enumerate() {
            let (x, y) = (
                idx % self.width * WIDTH / self.width,
                idx / self.width * HEIGHT / self.height,
            );
            *pixel = if screen.pixel(x, y).unwrap_or_default() {
                self.format.fg
            } else {
                self.format.bg
            };
        }
    }
    pub fn buffer(&self) -> &[u32] {
        &self.buffer
    }
    pub fn render(&mut self, window: &mut Window, screen: &Screen) -> Result<()> {
        self.draw(screen);
        window.update_with_buffer(self.buffer(), self.width, self.height)?;
        Ok(())
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

#[derive(Debug)]
pub struct UI {
    window: Window,
    keyboard: Vec<Key>,
    fb: FrameBuffer,
    time: Instant,
}

impl UI {
    pub fn frame(&mut self, machine: &mut Machine) -> Result<bool> {
        if !self.window.is_open() {
            return Ok(false);
        }
        match machine.cpu.state() {
            State::Halted(fault) => self.window.set_title(&format!("chipvm ⏹ {fault}")),
            State::Running if machine.paused => self.window.set_title("chipvm ⏸"),
            State::Running => self.window.set_title(&format!(
                "chipvm ▶ {:02.02}",
                (1.0 / self.time.elapsed().as_secs_f64())
            )),
        }
        self.time = Instant::now();
        // only repaint when the screen changed
        if machine.cpu.take_redraw() {
            self.fb.render(&mut self.window, machine.cpu.screen())?;
        } else {
            self.window.update();
        }
        Ok(true)
    }

    pub fn keys(&mut self, machine: &mut Machine) -> Result<bool> {
        // minifb's get_keys_pressed/released drop keys, so diff against the last frame
        let held = self.window.get_keys();
        let released: Vec<Key> = self
            .keyboard
            .iter()
            .filter(|key| !held.contains(key))
            .copied()
            .collect();
        let pressed: Vec<Key> = held
            .iter()
            .filter(|key| !self.keyboard.contains(key))
            .copied()
            .collect();
        for key in released {
            if let Some(key) = identify_key(key) {
                machine.cpu.release(key)?;
            }
        }
        // handle keybinds for the UI
        for key in pressed {
            use Key::*;
            let cpu = &mut machine.cpu;
            match key {
                F1 | Comma => cpu.dump(),
                F2 | Period => cpu.screen().print_screen(),
                F4 | Slash => eprintln!("Debug {}.", {
                    cpu.flags.debug();
                    if cpu.flags.debug {
                        "enabled"
                    } else {
                        "disabled"
                    }
                }),
                F5 | Backslash => eprintln!("{}.", {
                    machine.paused = !machine.paused;
                    if machine.paused {
                        "Paused"
                    } else {
                        "Unpaused"
                    }
                }),
                F6 | Enter => {
                    eprintln!("Step {:03x}", cpu.pc());
                    if let Err(e) = cpu.step() {
                        eprintln!("{e}");
                    }
                }
                F9 | Delete => {
                    eprintln!("Reset, reloading {}", machine.rom.display());
                    cpu.reset();
                    cpu.load_program(&machine.rom)?;
                }
                Escape => return Ok(false),
                key => {
                    if let Some(key) = identify_key(key) {
                        cpu.press(key)?;
                    }
                }
            }
        }
        self.keyboard = held;
        Ok(true)
    }
}

/// Maps the left side of a QWERTY keyboard onto the Chip-8's hex keypad
pub fn identify_key(key: Key) -> Option<usize> {
    match key {
        Key::Key1 => Some(0x1),
        Key::Key2 => Some(0x2),
        Key::Key3 => Some(0x3),
        Key::Key4 => Some(0xc),
        Key::Q => Some(0x4),
        Key::W => Some(0x5),
        Key::E => Some(0x6),
        Key::R => Some(0xd),
        Key::A => Some(0x7),
        Key::S => Some(0x8),
        Key::D => Some(0x9),
        Key::F => Some(0xe),
        Key::Z => Some(0xa),
        Key::X => Some(0x0),
        Key::C => Some(0xb),
        Key::V => Some(0xf),
        _ => None,
    }
}
