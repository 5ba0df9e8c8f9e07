//! Controls the [Quirks] behavior of the CPU on a granular level.

/// Controls the quirk behavior of the CPU on a granular level.
///
/// `false` is the default behavior described in [crate::cpu::behavior]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quirks {
    /// Draw operations should wrap from bottom to top and side to side, instead of clipping
    pub screen_wrap: bool,
    /// `Cxbb` should draw its random byte from `0..=254`, like the legacy `rand() % 255`
    pub legacy_rand: bool,
}

impl From<bool> for Quirks {
    fn from(value: bool) -> Self {
        Quirks {
            screen_wrap: value,
            legacy_rand: value,
        }
    }
}
