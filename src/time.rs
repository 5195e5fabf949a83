//! Time abstraction trait for platform-agnostic timing.

/// Trait for abstracting the controller's millisecond clock.
///
/// The counter is expected to be monotonic and to wrap around at `u32::MAX`
/// (roughly every 49.7 days). The debouncer computes all ages as unsigned
/// wrapping differences, so a wrap between two samples is harmless.
pub trait TimeSource {
    /// Returns the current time in milliseconds.
    fn now_millis(&self) -> u32;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    #[inline]
    fn now_millis(&self) -> u32 {
        (**self).now_millis()
    }
}
