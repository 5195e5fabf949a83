//! [`InputBank`] adapter for `embedded-hal` input pins.
//!
//! `embedded-hal` pins carry their electrical configuration in their type, so
//! [`PinBank`] ignores the requested [`InputMode`]: configure pull resistors
//! with your HAL before handing the pins over. Channel `i` reads `pins[i]`;
//! bind the pin identifiers with [`PinBank::indices`].
//!
//! Pins of different concrete types can share one bank through
//! `&mut dyn InputPin<Error = Infallible>`.

use core::convert::Infallible;

use embedded_hal::digital::InputPin;

use crate::input::{InputBank, InputMode};

/// Array of infallible `embedded-hal` input pins.
pub struct PinBank<P, const N: usize> {
    pins: [P; N],
}

impl<P, const N: usize> PinBank<P, N>
where
    P: InputPin<Error = Infallible>,
{
    /// Wraps `pins`; pin identifier `i` refers to `pins[i]`.
    pub fn new(pins: [P; N]) -> Self {
        Self { pins }
    }

    /// Pin identifiers `0..N`, ready for [`DebouncerBuilder::pins`](crate::DebouncerBuilder::pins).
    pub fn indices(&self) -> [usize; N] {
        core::array::from_fn(|idx| idx)
    }

    /// Returns the wrapped pins.
    pub fn release(self) -> [P; N] {
        self.pins
    }
}

impl<P, const N: usize> InputBank for PinBank<P, N>
where
    P: InputPin<Error = Infallible>,
{
    type Pin = usize;

    fn set_input_mode(&mut self, _pin: usize, _mode: InputMode) {}

    fn read_level(&mut self, pin: usize) -> bool {
        match self.pins[pin].is_high() {
            Ok(level) => level,
            Err(never) => match never {},
        }
    }
}
