//! Bank debouncer with bitmask state, edge detection and post-transition lockout.
//!
//! Provides [`Debouncer`] which owns N input channels, samples them once per
//! control-loop tick and reports confirmed level changes, plus the
//! [`DebouncerBuilder`] used to bind pins and validate timing.
//!
//! # Timing model
//!
//! Each channel is either *watching* or *locked out*:
//!
//! - While watching, the timer is re-armed with the debounce interval on every
//!   sample where the raw level agrees with the debounced level. A difference is
//!   accepted only once it has been observed with the timer expired, i.e. the
//!   input has disagreed continuously for at least the debounce interval. A
//!   single sample back at the old level restarts the clock.
//! - A confirmed change flips the debounced level, sets the channel's change bit
//!   for exactly one sample and starts the lockout window. While locked out the
//!   channel is not evaluated at all. When the window elapses the channel goes
//!   back to watching with a fresh debounce window.

use core::iter::FusedIterator;
use core::marker::PhantomData;

use heapless::Vec;

use crate::input::{InputBank, InputMode};
use crate::mask::BitMask;
use crate::time::TimeSource;
use crate::timer::{TimingRegister, Wide};
use crate::types::{ChannelEvent, ConfigError, DebounceError, DebouncerState, Edge};

/// Default debounce interval used by [`DebouncerBuilder`].
pub const DEFAULT_DEBOUNCE_MS: u32 = 20;

/// Default lockout interval used by [`DebouncerBuilder`].
pub const DEFAULT_LOCKOUT_MS: u32 = 50;

/// Debounces a fixed bank of N digital inputs.
///
/// Call [`configure`](Self::configure) once, then [`sample`](Self::sample) once
/// per control-loop tick. Edge queries describe the most recent sample only and
/// stay valid (and stable) until the next one.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `B` - GPIO bank implementation
/// * `T` - Time source implementation
/// * `N` - Number of channels (must not exceed `M::BITS`)
/// * `M` - Bitmask type, `u32` by default
/// * `R` - Timing register strategy, [`Wide`] by default
///
/// # Misuse
/// Queries before `configure` report every channel low and unchanged. Channel
/// indices outside `0..N` panic.
pub struct Debouncer<
    't,
    B: InputBank,
    T: TimeSource,
    const N: usize,
    M: BitMask = u32,
    R: TimingRegister = Wide,
> {
    bank: B,
    time_source: &'t T,
    pins: Vec<B::Pin, N>,
    timers: [R; N],
    last_tick: u32,
    levels: M,
    changes: M,
    lockouts: M,
    debounce_ms: u32,
    lockout_ms: u32,
    state: DebouncerState,
}

impl<'t, B, T, const N: usize, M, R> Debouncer<'t, B, T, N, M, R>
where
    B: InputBank,
    T: TimeSource,
    M: BitMask,
    R: TimingRegister,
{
    /// Creates a new debouncer builder.
    pub fn builder() -> DebouncerBuilder<'t, B, T, N, M, R> {
        DebouncerBuilder::new()
    }

    /// Configures every input and captures its initial level.
    ///
    /// No change is reported for the initial read. Every channel starts
    /// watching with a full debounce window. Must be called exactly once,
    /// before the first [`sample`](Self::sample).
    ///
    /// # Errors
    /// * `InvalidState` - The debouncer is already configured
    pub fn configure(&mut self, mode: InputMode) -> Result<(), DebounceError> {
        if self.state != DebouncerState::Unconfigured {
            return Err(DebounceError::InvalidState {
                expected: DebouncerState::Unconfigured,
                actual: self.state,
            });
        }

        let now = self.time_source.now_millis();
        let tick = R::tick(now, now);

        let mut levels = M::EMPTY;
        for (idx, (pin, timer)) in self.pins.iter().zip(self.timers.iter_mut()).enumerate() {
            self.bank.set_input_mode(*pin, mode);
            if self.bank.read_level(*pin) {
                levels = levels.with(idx);
            }
            *timer = R::armed(tick, self.debounce_ms);
        }

        self.levels = levels;
        self.changes = M::EMPTY;
        self.lockouts = M::EMPTY;
        self.last_tick = now;
        self.state = DebouncerState::Running;

        debug!(
            "configured {} inputs: debounce {} ms, lockout {} ms",
            N,
            self.debounce_ms,
            self.lockout_ms
        );
        Ok(())
    }

    /// Samples every input once and updates levels, changes and lockouts.
    ///
    /// Call once per control-loop tick. The change mask is overwritten, not
    /// accumulated: a transition is visible through the edge queries until the
    /// next call only.
    ///
    /// # Errors
    /// * `InvalidState` - [`configure`](Self::configure) has not been called
    pub fn sample(&mut self) -> Result<(), DebounceError> {
        if self.state != DebouncerState::Running {
            return Err(DebounceError::InvalidState {
                expected: DebouncerState::Running,
                actual: self.state,
            });
        }

        let now = self.time_source.now_millis();
        let tick = R::tick(self.last_tick, now);
        self.last_tick = now;

        let mut changes = M::EMPTY;
        let mut lockouts = self.lockouts;

        for (idx, (pin, timer)) in self.pins.iter().zip(self.timers.iter_mut()).enumerate() {
            timer.advance(tick);

            if lockouts.is_set(idx) {
                if !timer.expired(tick) {
                    continue;
                }
                *timer = R::armed(tick, self.debounce_ms);
                lockouts = lockouts.without(idx);
            }

            if self.bank.read_level(*pin) != self.levels.is_set(idx) {
                if !timer.expired(tick) {
                    // bounce
                    continue;
                }
                *timer = R::armed(tick, self.lockout_ms);
                changes = changes.with(idx);
                continue;
            }

            *timer = R::armed(tick, self.debounce_ms);
        }

        // Flip every confirmed channel at once and lock it out.
        self.levels = self.levels ^ changes;
        self.lockouts = lockouts | changes;
        self.changes = changes;

        for event in self.events() {
            trace!(
                "channel {} changed, level {}",
                event.channel,
                event.edge == Edge::Rising
            );
        }

        Ok(())
    }

    #[inline]
    fn check_channel(idx: usize) {
        assert!(idx < N, "channel index {} out of range for {} channels", idx, N);
    }

    /// Returns true if channel `idx` changed to high during the last sample.
    pub fn rose(&self, idx: usize) -> bool {
        Self::check_channel(idx);
        self.rising().is_set(idx)
    }

    /// Returns true if channel `idx` changed to low during the last sample.
    pub fn fell(&self, idx: usize) -> bool {
        Self::check_channel(idx);
        self.falling().is_set(idx)
    }

    /// Returns true if channel `idx` changed in either direction during the last sample.
    pub fn changed(&self, idx: usize) -> bool {
        Self::check_channel(idx);
        self.changes.is_set(idx)
    }

    /// Returns the debounced level of channel `idx`.
    pub fn level(&self, idx: usize) -> bool {
        Self::check_channel(idx);
        self.levels.is_set(idx)
    }

    /// Returns true while channel `idx` is inside its lockout window.
    pub fn locked_out(&self, idx: usize) -> bool {
        Self::check_channel(idx);
        self.lockouts.is_set(idx)
    }

    /// Debounced levels of all channels.
    pub fn levels(&self) -> M {
        self.levels
    }

    /// Channels that changed during the last sample.
    pub fn changes(&self) -> M {
        self.changes
    }

    /// Channels that changed to high during the last sample.
    pub fn rising(&self) -> M {
        self.levels & self.changes
    }

    /// Channels that changed to low during the last sample.
    pub fn falling(&self) -> M {
        !self.levels & self.changes
    }

    /// Channels currently inside their lockout window.
    pub fn lockouts(&self) -> M {
        self.lockouts
    }

    /// Iterates over the transitions of the last sample in channel order.
    pub fn events(&self) -> Events<M> {
        Events {
            pending: self.changes,
            levels: self.levels,
        }
    }

    /// Returns the pin bound to channel `idx`.
    pub fn pin(&self, idx: usize) -> B::Pin {
        Self::check_channel(idx);
        self.pins[idx]
    }

    /// Returns all pins in channel order.
    pub fn pins(&self) -> &[B::Pin] {
        &self.pins
    }

    /// Returns the channel bound to `pin`, if any.
    pub fn channel_of(&self, pin: B::Pin) -> Option<usize> {
        self.pins.iter().position(|p| *p == pin)
    }

    /// Returns the timing register of channel `idx`.
    pub fn timer(&self, idx: usize) -> R {
        Self::check_channel(idx);
        self.timers[idx]
    }

    /// Number of channels.
    pub const fn channel_count(&self) -> usize {
        N
    }

    /// Debounce interval in milliseconds.
    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }

    /// Lockout interval in milliseconds.
    pub fn lockout_ms(&self) -> u32 {
        self.lockout_ms
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> DebouncerState {
        self.state
    }

    /// Returns true once [`configure`](Self::configure) has run.
    pub fn is_running(&self) -> bool {
        self.state == DebouncerState::Running
    }

    /// Returns a reference to the GPIO bank.
    pub fn bank(&self) -> &B {
        &self.bank
    }

    /// Returns a mutable reference to the GPIO bank.
    pub fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }

    /// Consumes the debouncer and returns the GPIO bank.
    pub fn release(self) -> B {
        self.bank
    }
}

/// Iterator over the transitions of the last sample.
///
/// Created by [`Debouncer::events`].
#[derive(Debug, Clone)]
pub struct Events<M: BitMask> {
    pending: M,
    levels: M,
}

impl<M: BitMask> Iterator for Events<M> {
    type Item = ChannelEvent;

    fn next(&mut self) -> Option<ChannelEvent> {
        let channel = self.pending.lowest()?;
        self.pending = self.pending.without(channel);
        Some(ChannelEvent {
            channel,
            edge: Edge::from_level(self.levels.is_set(channel)),
        })
    }
}

impl<M: BitMask> FusedIterator for Events<M> {}

/// Builder for constructing validated debouncers.
///
/// Pins are bound in the order they are added; that order defines the channel
/// indices.
pub struct DebouncerBuilder<
    't,
    B: InputBank,
    T: TimeSource,
    const N: usize,
    M: BitMask,
    R: TimingRegister,
> {
    pins: Vec<B::Pin, N>,
    debounce_ms: u32,
    lockout_ms: u32,
    allow_unfiltered: bool,
    _marker: PhantomData<(&'t T, M, R)>,
}

impl<'t, B, T, const N: usize, M, R> DebouncerBuilder<'t, B, T, N, M, R>
where
    B: InputBank,
    T: TimeSource,
    M: BitMask,
    R: TimingRegister,
{
    const CHANNELS_FIT: () = assert!(N <= M::BITS, "channel count exceeds bitmask width");

    /// Creates a new builder with no pins and the default intervals.
    pub fn new() -> Self {
        Self {
            pins: Vec::new(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            lockout_ms: DEFAULT_LOCKOUT_MS,
            allow_unfiltered: false,
            _marker: PhantomData,
        }
    }

    /// Binds `pin` to the next channel.
    ///
    /// # Errors
    /// * `DuplicatePin` - The pin is already bound
    /// * `CapacityExceeded` - All N channels are already bound
    pub fn pin(mut self, pin: B::Pin) -> Result<Self, ConfigError> {
        if let Some(channel) = self.pins.iter().position(|p| *p == pin) {
            return Err(ConfigError::DuplicatePin { channel });
        }
        self.pins
            .push(pin)
            .map_err(|_| ConfigError::CapacityExceeded)?;
        Ok(self)
    }

    /// Binds several pins in order. Same errors as [`pin`](Self::pin).
    pub fn pins<I>(self, pins: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = B::Pin>,
    {
        pins.into_iter().try_fold(self, |builder, pin| builder.pin(pin))
    }

    /// Sets how long a raw difference must persist before it is accepted.
    ///
    /// Default is 20 ms.
    pub fn debounce_ms(mut self, millis: u32) -> Self {
        self.debounce_ms = millis;
        self
    }

    /// Sets how long a channel ignores its input after a confirmed change.
    ///
    /// Default is 50 ms.
    pub fn lockout_ms(mut self, millis: u32) -> Self {
        self.lockout_ms = millis;
        self
    }

    /// Accepts both intervals being zero.
    ///
    /// The debouncer then passes every raw change through on the sample it is
    /// seen, without any filtering.
    pub fn allow_unfiltered(mut self) -> Self {
        self.allow_unfiltered = true;
        self
    }

    /// Builds and validates the debouncer. Performs no I/O.
    ///
    /// # Errors
    /// * `PinCountMismatch` - Fewer than N pins were bound
    /// * `NoFiltering` - Both intervals are zero without `allow_unfiltered`
    /// * `IntervalOutOfRange` - An interval does not fit the timing register
    ///
    /// A channel count wider than the bitmask is rejected at compile time:
    ///
    /// ```compile_fail
    /// use core::cell::Cell;
    /// use dbounce::{Debouncer, InputBank, InputMode, TimeSource, Wide};
    ///
    /// struct Clock(Cell<u32>);
    ///
    /// impl TimeSource for Clock {
    ///     fn now_millis(&self) -> u32 {
    ///         self.0.get()
    ///     }
    /// }
    ///
    /// struct Port;
    ///
    /// impl InputBank for Port {
    ///     type Pin = u8;
    ///
    ///     fn set_input_mode(&mut self, _pin: u8, _mode: InputMode) {}
    ///
    ///     fn read_level(&mut self, _pin: u8) -> bool {
    ///         false
    ///     }
    /// }
    ///
    /// let clock = Clock(Cell::new(0));
    /// // nine channels, eight mask bits
    /// let _ = Debouncer::<Port, Clock, 9, u8, Wide>::builder()
    ///     .pins(0..9)
    ///     .unwrap()
    ///     .build(Port, &clock);
    /// ```
    pub fn build(
        self,
        bank: B,
        time_source: &'t T,
    ) -> Result<Debouncer<'t, B, T, N, M, R>, ConfigError> {
        #[allow(clippy::let_unit_value)]
        let () = Self::CHANNELS_FIT;

        if self.pins.len() != N {
            return Err(ConfigError::PinCountMismatch {
                expected: N,
                actual: self.pins.len(),
            });
        }

        if self.debounce_ms == 0 && self.lockout_ms == 0 && !self.allow_unfiltered {
            return Err(ConfigError::NoFiltering);
        }

        for interval in [self.debounce_ms, self.lockout_ms] {
            if interval > R::MAX_INTERVAL {
                return Err(ConfigError::IntervalOutOfRange {
                    interval,
                    max: R::MAX_INTERVAL,
                });
            }
        }

        Ok(Debouncer {
            bank,
            time_source,
            pins: self.pins,
            timers: [R::default(); N],
            last_tick: 0,
            levels: M::EMPTY,
            changes: M::EMPTY,
            lockouts: M::EMPTY,
            debounce_ms: self.debounce_ms,
            lockout_ms: self.lockout_ms,
            state: DebouncerState::Unconfigured,
        })
    }
}

impl<'t, B, T, const N: usize, M, R> Default for DebouncerBuilder<'t, B, T, N, M, R>
where
    B: InputBank,
    T: TimeSource,
    M: BitMask,
    R: TimingRegister,
{
    fn default() -> Self {
        Self::new()
    }
}
