//! Shared test infrastructure for dbounce integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use dbounce::{BitMask, Debouncer, InputBank, InputMode, TimeSource, TimingRegister};

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<u32>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(millis: u32) -> Self {
        Self {
            current_time: core::cell::Cell::new(millis),
        }
    }

    /// Advance time by the given number of milliseconds (wrapping like a hardware counter)
    pub fn advance(&self, millis: u32) {
        let current = self.current_time.get();
        self.current_time.set(current.wrapping_add(millis));
    }

    pub fn set_time(&self, millis: u32) {
        self.current_time.set(millis);
    }
}

impl TimeSource for MockTimeSource {
    fn now_millis(&self) -> u32 {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Inputs
// ============================================================================

pub const MOCK_PINS: usize = 16;

/// Simulated GPIO bank that records configuration and read counts
pub struct MockInputs {
    levels: [bool; MOCK_PINS],
    modes: [Option<InputMode>; MOCK_PINS],
    reads: [usize; MOCK_PINS],
}

impl MockInputs {
    pub fn new() -> Self {
        Self {
            levels: [false; MOCK_PINS],
            modes: [None; MOCK_PINS],
            reads: [0; MOCK_PINS],
        }
    }

    pub fn set(&mut self, pin: u8, level: bool) {
        self.levels[pin as usize] = level;
    }

    pub fn mode(&self, pin: u8) -> Option<InputMode> {
        self.modes[pin as usize]
    }

    pub fn reads(&self, pin: u8) -> usize {
        self.reads[pin as usize]
    }
}

impl InputBank for MockInputs {
    type Pin = u8;

    fn set_input_mode(&mut self, pin: u8, mode: InputMode) {
        self.modes[pin as usize] = Some(mode);
    }

    fn read_level(&mut self, pin: u8) -> bool {
        self.reads[pin as usize] += 1;
        self.levels[pin as usize]
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TestDebouncer<'t, const N: usize, M, R> =
    Debouncer<'t, MockInputs, MockTimeSource, N, M, R>;

/// Two channels on pins 0 and 1, 20 ms debounce, 50 ms lockout, configured at
/// the clock's current time
pub fn two_channels<R: TimingRegister>(clock: &MockTimeSource) -> TestDebouncer<'_, 2, u8, R> {
    let mut debouncer = TestDebouncer::<2, u8, R>::builder()
        .pins([0, 1])
        .unwrap()
        .debounce_ms(20)
        .lockout_ms(50)
        .build(MockInputs::new(), clock)
        .unwrap();
    debouncer.configure(InputMode::PullUp).unwrap();
    debouncer
}

/// Advance the clock and take one sample
pub fn tick<const N: usize, M: BitMask, R: TimingRegister>(
    debouncer: &mut TestDebouncer<'_, N, M, R>,
    clock: &MockTimeSource,
    millis: u32,
) {
    clock.advance(millis);
    debouncer.sample().unwrap();
}

/// Sample every millisecond until `until` ms have passed, returning the ms
/// offsets (1-based) at which channel `idx` reported a change
pub fn changes_over<const N: usize, M: BitMask, R: TimingRegister>(
    debouncer: &mut TestDebouncer<'_, N, M, R>,
    clock: &MockTimeSource,
    idx: usize,
    until: u32,
) -> heapless::Vec<u32, 16> {
    let mut seen = heapless::Vec::new();
    for offset in 1..=until {
        tick(debouncer, clock, 1);
        if debouncer.changed(idx) {
            seen.push(offset).unwrap();
        }
    }
    seen
}
