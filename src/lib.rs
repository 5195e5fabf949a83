#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Debouncer`**: Debounces a fixed bank of N inputs, sampled once per control-loop tick
//! - **`DebouncerBuilder`**: Binds pins to channels and validates the timing configuration
//! - **`InputBank`**: Trait to implement for your GPIO hardware
//! - **`TimeSource`**: Trait to implement for your millisecond clock
//! - **`BitMask`**: Integer type packing one flag per channel (`u8` .. `u64`)
//! - **`TimingRegister`**: Per-channel timer strategy, `Narrow<u8>`/`Narrow<u16>` or `Wide`
//! - **`ChannelEvent`**: A confirmed rising or falling edge on one channel
//!
//! Every channel owns one bit in each of three masks (debounced level, change
//! during the last sample, lockout active) plus one timing register. Whole-bank
//! queries are a single integer operation.

#[macro_use]
mod fmt;

pub mod time;
pub mod input;
pub mod mask;
pub mod timer;
pub mod types;
pub mod debouncer;
#[cfg(feature = "embedded-hal")]
pub mod hal;

pub use debouncer::{DEFAULT_DEBOUNCE_MS, DEFAULT_LOCKOUT_MS, Debouncer, DebouncerBuilder, Events};
pub use input::{InputBank, InputMode};
pub use mask::BitMask;
pub use time::TimeSource;
pub use timer::{Narrow, NarrowWidth, TimingRegister, Wide};
pub use types::{ChannelEvent, ConfigError, DebounceError, DebouncerState, Edge};
#[cfg(feature = "embedded-hal")]
pub use hal::PinBank;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_compile() {
        let _ = Edge::Rising;
        let _ = Edge::Falling;
        let _ = InputMode::default();
        let _ = DebouncerState::Unconfigured;
        assert_eq!(Edge::from_level(true), Edge::Rising);
        assert_eq!(Edge::from_level(false), Edge::Falling);
    }
}
