//! GPIO abstraction for the input bank being debounced.

/// Electrical configuration requested for each input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputMode {
    /// Plain high-impedance input.
    #[default]
    Floating,
    /// Input with the internal pull-up resistor enabled.
    PullUp,
    /// Input with the internal pull-down resistor enabled.
    PullDown,
}

/// Trait for abstracting the digital inputs behind a debouncer.
///
/// Implement this for your hardware (direct register access, a HAL, an I/O
/// expander, a simulation) so the debouncer can configure and read the lines
/// it owns. Pin identifiers are opaque to the debouncer; it only stores them
/// and hands them back.
pub trait InputBank {
    /// Identifier of a single input line.
    type Pin: Copy + PartialEq;

    /// Configures `pin` as a digital input.
    ///
    /// Called once per channel from [`Debouncer::configure`](crate::Debouncer::configure).
    /// Handle any hardware errors internally - this method cannot fail.
    fn set_input_mode(&mut self, pin: Self::Pin, mode: InputMode);

    /// Returns the instantaneous raw logic level of `pin` (`true` = high).
    fn read_level(&mut self, pin: Self::Pin) -> bool;
}
