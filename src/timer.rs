//! Per-channel timing registers.
//!
//! Two interchangeable strategies implement [`TimingRegister`]:
//!
//! - [`Narrow`] stores the *remaining* duration of the current window in a
//!   `u8` or `u16`. Every tick the elapsed time since the previous tick is
//!   clamped to the register width and subtracted, saturating at zero.
//! - [`Wide`] stores an *absolute deadline* in a `u32` and compares it against
//!   the current clock reading.
//!
//! Both report the same observable debounce/lockout behavior for any interval
//! that fits the register. The narrow variant trades one shared "last tick"
//! timestamp and a clamped subtraction per channel for 2 or 3 bytes of RAM
//! saved per channel.

use core::fmt::Debug;

/// Timing storage for a single channel.
pub trait TimingRegister: Copy + Default + Debug {
    /// Time reference computed once per sample and shared by all channels.
    type Tick: Copy;

    /// Largest interval (in milliseconds) the register can represent.
    const MAX_INTERVAL: u32;

    /// Computes the time reference for a sample taken at `now`, given the
    /// clock reading of the previous sample.
    fn tick(last: u32, now: u32) -> Self::Tick;

    /// Returns a register whose window expires `interval` ms after `tick`.
    fn armed(tick: Self::Tick, interval: u32) -> Self;

    /// Consumes the time that passed during `tick`.
    fn advance(&mut self, tick: Self::Tick);

    /// Returns true once the window has fully elapsed.
    fn expired(&self, tick: Self::Tick) -> bool;
}

/// Unsigned widths usable as a [`Narrow`] register.
pub trait NarrowWidth: Copy + Default + Debug + sealed::Sealed {
    /// Register maximum as milliseconds.
    const MAX: u32;

    /// Converts `millis` to the register type, saturating at `MAX`.
    fn clamp_from(millis: u32) -> Self;

    /// Saturating subtraction.
    fn saturating_sub(self, other: Self) -> Self;

    /// Returns true if the register is zero.
    fn is_zero(self) -> bool;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! impl_narrow_width {
    ($($ty:ty),*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl NarrowWidth for $ty {
                const MAX: u32 = <$ty>::MAX as u32;

                #[inline]
                fn clamp_from(millis: u32) -> Self {
                    if millis > <Self as NarrowWidth>::MAX {
                        <$ty>::MAX
                    } else {
                        millis as $ty
                    }
                }

                #[inline]
                fn saturating_sub(self, other: Self) -> Self {
                    <$ty>::saturating_sub(self, other)
                }

                #[inline]
                fn is_zero(self) -> bool {
                    self == 0
                }
            }
        )*
    };
}

impl_narrow_width!(u8, u16);

/// Remaining-duration register (8 or 16 bits per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Narrow<W: NarrowWidth>(W);

impl<W: NarrowWidth> Narrow<W> {
    /// Milliseconds left in the current window.
    pub fn remaining(&self) -> W {
        self.0
    }
}

impl<W: NarrowWidth> TimingRegister for Narrow<W> {
    /// Elapsed milliseconds since the previous sample, clamped to `W::MAX`.
    type Tick = W;

    const MAX_INTERVAL: u32 = W::MAX;

    #[inline]
    fn tick(last: u32, now: u32) -> W {
        // Unsigned wrapping difference survives a clock rollover.
        W::clamp_from(now.wrapping_sub(last))
    }

    #[inline]
    fn armed(_tick: W, interval: u32) -> Self {
        Narrow(W::clamp_from(interval))
    }

    #[inline]
    fn advance(&mut self, elapsed: W) {
        self.0 = self.0.saturating_sub(elapsed);
    }

    #[inline]
    fn expired(&self, _tick: W) -> bool {
        self.0.is_zero()
    }
}

/// Absolute-deadline register (32 bits per channel).
///
/// Samples must be taken less than 2^31 ms (~24.8 days) apart. After a longer
/// gap a pending window reads as unexpired until the clock reaches the
/// deadline again, where a narrow register would simply expire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Wide(u32);

impl Wide {
    /// Clock reading at which the current window ends.
    pub fn deadline(&self) -> u32 {
        self.0
    }
}

impl TimingRegister for Wide {
    /// Current clock reading.
    type Tick = u32;

    // Deadlines are compared through a signed difference, so windows must
    // stay within half the clock range.
    const MAX_INTERVAL: u32 = i32::MAX as u32;

    #[inline]
    fn tick(_last: u32, now: u32) -> u32 {
        now
    }

    #[inline]
    fn armed(now: u32, interval: u32) -> Self {
        Wide(now.wrapping_add(interval))
    }

    #[inline]
    fn advance(&mut self, _now: u32) {}

    #[inline]
    fn expired(&self, now: u32) -> bool {
        (now.wrapping_sub(self.0) as i32) >= 0
    }
}
