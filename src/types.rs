//! Core types shared by the debouncer API.

/// Direction of a confirmed level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high.
    Rising,

    /// High to low.
    Falling,
}

impl Edge {
    /// Returns the edge that leads to `level`.
    #[inline]
    pub fn from_level(level: bool) -> Self {
        if level { Edge::Rising } else { Edge::Falling }
    }
}

/// A confirmed transition on one channel during the last sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelEvent {
    /// Channel index (position in the pin list).
    pub channel: usize,

    /// Direction of the change.
    pub edge: Edge,
}

/// Lifecycle state of a debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebouncerState {
    /// Built, inputs not configured yet. Sampling is rejected.
    Unconfigured,

    /// Inputs configured and initial levels captured.
    Running,
}

/// Construction errors reported by [`DebouncerBuilder`](crate::DebouncerBuilder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// More pins were added than the debouncer has channels.
    CapacityExceeded,

    /// The pin is already bound to `channel`.
    DuplicatePin {
        /// Channel the pin was first bound to.
        channel: usize,
    },

    /// The number of pins does not match the channel count.
    PinCountMismatch {
        /// Channel count of the debouncer type.
        expected: usize,
        /// Number of pins supplied.
        actual: usize,
    },

    /// Both intervals are zero, which disables filtering entirely.
    NoFiltering,

    /// An interval does not fit the chosen timing register.
    IntervalOutOfRange {
        /// Requested interval in milliseconds.
        interval: u32,
        /// Largest interval the register can hold.
        max: u32,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::CapacityExceeded => {
                write!(f, "pin list capacity exceeded")
            }
            ConfigError::DuplicatePin { channel } => {
                write!(f, "pin is already bound to channel {}", channel)
            }
            ConfigError::PinCountMismatch { expected, actual } => {
                write!(f, "expected {} pins, got {}", expected, actual)
            }
            ConfigError::NoFiltering => {
                write!(
                    f,
                    "debounce and lockout intervals are both zero (use allow_unfiltered for passthrough)"
                )
            }
            ConfigError::IntervalOutOfRange { interval, max } => {
                write!(
                    f,
                    "interval of {} ms exceeds timing register maximum of {} ms",
                    interval, max
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Runtime errors reported by [`Debouncer`](crate::Debouncer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceError {
    /// Operation called from an invalid state.
    InvalidState {
        /// The state the operation requires.
        expected: DebouncerState,
        /// The actual current state.
        actual: DebouncerState,
    },
}

impl core::fmt::Display for DebounceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DebounceError::InvalidState { expected, actual } => {
                write!(
                    f,
                    "invalid state: expected {:?}, but debouncer is {:?}",
                    expected, actual
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DebounceError {}
