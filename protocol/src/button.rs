use core::fmt::{self, Display};

/// Buttons reported in the 16-bit button field of an input report.
///
/// The discriminant is the bit position in that field. Bit 11 has no
/// known meaning on this firmware and is not mapped.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(test, derive(strum::EnumIter))]
pub enum Button {
    DpadUp = 0,
    DpadDown,
    DpadLeft,
    DpadRight,
    Menu,
    View,
    // Left stick click.
    Ls,
    // Right stick click.
    Rs,
    Lb,
    Rb,
    Xbox,
    A = 12,
    B,
    X,
    Y,
}

impl Button {
    /// Looks up the button mapped to `bit`.
    ///
    /// Returns [`None`] for bits without a semantic name, including
    /// the unused bit 11 and anything past bit 15.
    #[must_use]
    pub const fn from_bit(bit: u8) -> Option<Self> {
        let button = match bit {
            0 => Self::DpadUp,
            1 => Self::DpadDown,
            2 => Self::DpadLeft,
            3 => Self::DpadRight,
            4 => Self::Menu,
            5 => Self::View,
            6 => Self::Ls,
            7 => Self::Rs,
            8 => Self::Lb,
            9 => Self::Rb,
            10 => Self::Xbox,
            12 => Self::A,
            13 => Self::B,
            14 => Self::X,
            15 => Self::Y,
            _ => return None,
        };

        Some(button)
    }

    #[inline]
    #[must_use]
    pub const fn bit(self) -> u8 {
        self as u8
    }

    #[inline]
    #[must_use]
    pub const fn mask(self) -> u16 {
        1 << self.bit()
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DpadUp => "DPAD_UP",
            Self::DpadDown => "DPAD_DOWN",
            Self::DpadLeft => "DPAD_LEFT",
            Self::DpadRight => "DPAD_RIGHT",
            Self::Menu => "MENU",
            Self::View => "VIEW",
            Self::Ls => "LS",
            Self::Rs => "RS",
            Self::Lb => "LB",
            Self::Rb => "RB",
            Self::Xbox => "XBOX",
            Self::A => "A",
            Self::B => "B",
            Self::X => "X",
            Self::Y => "Y",
        }
    }
}

impl Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw button bitmask as found at offset 4 of an input report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Buttons(u16);

impl Buttons {
    #[inline]
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_pressed(self, button: Button) -> bool {
        self.0 & button.mask() != 0
    }

    /// Pressed buttons in ascending bit order. Set bits without a
    /// mapped [`Button`] are skipped.
    #[must_use]
    pub fn pressed(self) -> PressedButtons {
        PressedButtons { raw: self.0, bit: 0 }
    }
}

impl From<u16> for Buttons {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Buttons> for u16 {
    fn from(value: Buttons) -> Self {
        value.0
    }
}

/// Iterator returned by [`Buttons::pressed`].
#[derive(Clone, Debug)]
pub struct PressedButtons {
    raw: u16,
    bit: u8,
}

impl Iterator for PressedButtons {
    type Item = Button;

    fn next(&mut self) -> Option<Self::Item> {
        while u32::from(self.bit) < u16::BITS {
            let bit = self.bit;
            self.bit += 1;

            if self.raw & (1 << bit) == 0 {
                continue;
            }

            if let Some(button) = Button::from_bit(bit) {
                return Some(button);
            }
        }

        None
    }
}

/// Renders as `[A, B, ...]`.
impl Display for PressedButtons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;

        for (i, button) in self.clone().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            Display::fmt(&button, f)?;
        }

        f.write_str("]")
    }
}
