// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Stores and displays the Chip-8's screen memory

use std::fmt::{Display, Formatter, Result};

/// Width of the screen, in pixels
pub const WIDTH: usize = 64;
/// Height of the screen, in pixels
pub const HEIGHT: usize = 32;

/// The 64x32 monochrome framebuffer.
///
/// Each row is packed into a [u64], with the leftmost pixel in the most significant bit.
/// Any change to the pixels raises the redraw flag, which stays up until the renderer
/// clears it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Screen {
    rows: [u64; HEIGHT],
    redraw: bool,
}

impl Screen {
    /// Gets a single pixel, or None if (x, y) is off-screen
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let screen = Screen::default();
    /// assert_eq!(Some(false), screen.pixel(63, 31));
    /// assert_eq!(None, screen.pixel(64, 0));
    /// ```
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        if x >= WIDTH {
            return None;
        }
        self.rows.get(y).map(|row| row & Self::mask(x) != 0)
    }

    /// Gets the packed rows of the screen, top to bottom
    pub fn rows(&self) -> &[u64; HEIGHT] {
        &self.rows
    }

    /// Iterates over the coordinates of every lit pixel, row by row
    pub fn lit(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, &row)| {
            (0..WIDTH).filter_map(move |x| (row & Self::mask(x) != 0).then_some((x, y)))
        })
    }

    /// Packs the screen into bytes, eight pixels per byte, row by row
    pub fn to_bytes(&self) -> [u8; WIDTH * HEIGHT / 8] {
        let mut bytes = [0; WIDTH * HEIGHT / 8];
        for (chunk, row) in bytes.chunks_exact_mut(WIDTH / 8).zip(self.rows.iter()) {
            chunk.copy_from_slice(&row.to_be_bytes());
        }
        bytes
    }

    /// Turns every pixel off
    pub fn clear(&mut self) {
        self.rows = [0; HEIGHT];
        self.redraw = true;
    }

    /// XORs an 8-pixel-wide sprite onto the screen with its top left corner at (x, y),
    /// and reports whether any lit pixel was turned off.
    ///
    /// Pixels which land off-screen are clipped, unless `wrap` is set, in which case they
    /// wrap around to the opposite edge.
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let mut screen = Screen::default();
    /// assert!(!screen.draw_sprite(60, 0, &[0xff], false));
    /// assert_eq!(4, screen.lit().count());
    /// // drawing it again erases it, and collides
    /// assert!(screen.draw_sprite(60, 0, &[0xff], false));
    /// assert_eq!(0, screen.lit().count());
    /// ```
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8], wrap: bool) -> bool {
        let mut collision = false;
        for (line, &byte) in sprite.iter().enumerate() {
            let (mut py, bits) = (y + line, (0..8).filter(|bit| byte & (0x80 >> bit) != 0));
            if wrap {
                py %= HEIGHT;
            } else if py >= HEIGHT {
                break;
            }
            for bit in bits {
                let mut px = x + bit;
                if wrap {
                    px %= WIDTH;
                } else if px >= WIDTH {
                    break;
                }
                let mask = Self::mask(px);
                collision |= self.rows[py] & mask != 0;
                self.rows[py] ^= mask;
            }
        }
        self.redraw = true;
        collision
    }

    /// Returns true if the screen has changed since the redraw flag was last cleared
    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    /// Clears the redraw flag
    pub fn clear_redraw(&mut self) {
        self.redraw = false;
    }

    /// Clears the redraw flag, returning whether it was set
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Prints the screen to stdout
    ///
    /// Uses braille characters when the `drawille` feature is enabled
    pub fn print_screen(&self) {
        // draw with the drawille library, if available
        #[cfg(feature = "drawille")]
        {
            use drawille::Canvas;
            let mut canvas = Canvas::new(WIDTH as u32, HEIGHT as u32);
            self.lit()
                .for_each(|(x, y)| canvas.set(x as u32, y as u32));
            println!("{}", canvas.frame());
        }
        #[cfg(not(feature = "drawille"))]
        print!("{self}");
    }

    #[inline(always)]
    fn mask(x: usize) -> u64 {
        1 << (WIDTH - 1 - x)
    }
}

impl Default for Screen {
    /// A blank screen, which has yet to be drawn
    fn default() -> Self {
        Screen {
            rows: [0; HEIGHT],
            redraw: true,
        }
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for row in self.rows {
            for x in 0..WIDTH {
                write!(f, "{}", if row & Self::mask(x) != 0 { '█' } else { ' ' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
