// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The call stack: a fixed number of return addresses

use super::Adr;

/// Number of nested calls the stack can hold
pub const STACK_DEPTH: usize = 16;

/// Fixed-capacity stack of return addresses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Stack {
    frames: [Adr; STACK_DEPTH],
    sp: usize,
}

impl Stack {
    /// Pushes an address, or returns None if every slot is full
    /// # Examples
    /// ```rust
    /// # use chipvm::*;
    /// let mut stack = Stack::default();
    /// for _ in 0..STACK_DEPTH {
    ///     assert!(stack.push(0x200).is_some());
    /// }
    /// assert!(stack.push(0x200).is_none());
    /// ```
    pub fn push(&mut self, adr: Adr) -> Option<&mut Self> {
        let slot = self.frames.get_mut(self.sp)?;
        *slot = adr;
        self.sp += 1;
        Some(self)
    }

    /// Pops the most recently pushed address, or None if the stack is empty
    pub fn pop(&mut self) -> Option<Adr> {
        self.sp = self.sp.checked_sub(1)?;
        Some(self.frames[self.sp])
    }

    /// Gets the stack pointer: the number of addresses currently on the stack
    pub fn sp(&self) -> usize {
        self.sp
    }

    /// Gets the addresses currently on the stack, oldest first
    pub fn as_slice(&self) -> &[Adr] {
        &self.frames[..self.sp]
    }

    /// Returns true if nothing is on the stack
    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }

    /// Returns true if another push would overflow
    pub fn is_full(&self) -> bool {
        self.sp == STACK_DEPTH
    }

    /// Empties the stack and zeroes every slot
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
