// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The hexadecimal keypad

use crate::error::{Error, Result};

/// Number of keys on the keypad
pub const KEY_COUNT: usize = 16;

/// The pressed/released state of keys `0`..=`F`
///
/// Written by whatever collects input, read by the interpreter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    /// Presses a key, and reports whether the key's state changed.
    /// If key does not exist, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let mut keypad = Keypad::default();
    /// assert!(keypad.press(0x7).unwrap());
    /// // it was already pressed, so nothing's changed.
    /// assert!(!keypad.press(0x7).unwrap());
    /// assert!(keypad.press(0x10).is_err());
    /// ```
    pub fn press(&mut self, key: usize) -> Result<bool> {
        self.set(key, true)
    }

    /// Releases a key, and reports whether the key's state changed.
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    pub fn release(&mut self, key: usize) -> Result<bool> {
        self.set(key, false)
    }

    /// Sets the state of a key, and reports whether it changed
    pub fn set(&mut self, key: usize, pressed: bool) -> Result<bool> {
        let keyref = self.keys.get_mut(key).ok_or(Error::InvalidKey { key })?;
        let changed = *keyref != pressed;
        *keyref = pressed;
        Ok(changed)
    }

    /// Replaces the state of every key at once
    pub fn set_all(&mut self, keys: [bool; KEY_COUNT]) {
        self.keys = keys;
    }

    /// Releases every key
    pub fn release_all(&mut self) {
        self.keys = [false; KEY_COUNT];
    }

    /// Returns true if the key is held. Only the low nibble of `key` is significant.
    #[inline(always)]
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xf) as usize]
    }

    /// Gets the lowest-numbered key being held, if any
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let mut keypad = Keypad::default();
    /// assert_eq!(None, keypad.first_pressed());
    /// keypad.press(0xc).unwrap();
    /// keypad.press(0x3).unwrap();
    /// assert_eq!(Some(0x3), keypad.first_pressed());
    /// ```
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&held| held).map(|key| key as u8)
    }

    /// Gets the state of every key
    pub fn keys(&self) -> &[bool; KEY_COUNT] {
        &self.keys
    }
}
