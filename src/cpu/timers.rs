// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The delay and sound timers

/// Two countdown timers, decremented once per executed cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Timers {
    delay: u8,
    sound: u8,
    beep: bool,
}

impl Timers {
    /// Counts both timers down by one, saturating at zero.
    ///
    /// Raises the sound edge when the sound timer goes from 1 to 0.
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let mut timers = Timers::default();
    /// timers.set_sound(1);
    /// timers.tick();
    /// assert_eq!(0, timers.sound());
    /// assert!(timers.take_beep());
    /// timers.tick();
    /// assert!(!timers.beep());
    /// ```
    #[inline(always)]
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        if self.sound > 0 {
            if self.sound == 1 {
                self.beep = true;
            }
            self.sound -= 1;
        }
    }

    /// Gets the value of the delay timer
    pub fn delay(&self) -> u8 {
        self.delay
    }

    /// Gets the value of the sound timer
    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Sets the delay timer
    pub fn set_delay(&mut self, value: u8) {
        self.delay = value;
    }

    /// Sets the sound timer
    pub fn set_sound(&mut self, value: u8) {
        self.sound = value;
    }

    /// Returns true if the sound timer has run out since the edge was last cleared
    pub fn beep(&self) -> bool {
        self.beep
    }

    /// Clears the sound edge
    pub fn clear_beep(&mut self) {
        self.beep = false;
    }

    /// Clears the sound edge, returning whether it was set
    pub fn take_beep(&mut self) -> bool {
        std::mem::take(&mut self.beep)
    }
}
