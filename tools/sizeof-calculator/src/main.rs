//! Memory calculator for dbounce
//!
//! Calculates the exact memory footprint of `Debouncer` instances for different
//! channel counts, bitmask types and timing register strategies. Run it to see
//! what the narrow registers save over the wide ones on your host.
//!
//! Usage:
//!   cd tools/sizeof-calculator
//!   cargo run --release
//!   cat report.md

use dbounce::{BitMask, Debouncer, InputBank, InputMode, Narrow, TimeSource, TimingRegister, Wide};
use std::fs::File;
use std::io::Write;
use std::mem::size_of;

// ============================================================================
// Mock Hardware
// ============================================================================

/// Port-register style bank: pins are bit positions, no per-pin state.
struct PortBank;

impl InputBank for PortBank {
    type Pin = u8;

    fn set_input_mode(&mut self, _pin: u8, _mode: InputMode) {}

    fn read_level(&mut self, _pin: u8) -> bool {
        false
    }
}

struct MillisCounter;

impl TimeSource for MillisCounter {
    fn now_millis(&self) -> u32 {
        0
    }
}

type Bank<'t, const N: usize, M, R> = Debouncer<'t, PortBank, MillisCounter, N, M, R>;

// ============================================================================
// Report Generation Functions
// ============================================================================

fn write_header(f: &mut File) -> std::io::Result<()> {
    writeln!(f, "# dbounce Memory Footprint Analysis")?;
    writeln!(f)?;
    writeln!(
        f,
        "**Generated:** {}  ",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(
        f,
        "**Architecture:** {}-bit host",
        size_of::<usize>() * 8
    )?;
    writeln!(f)?;
    Ok(())
}

fn write_register_sizes(f: &mut File) -> std::io::Result<()> {
    writeln!(f, "## Timing Register Sizes")?;
    writeln!(f)?;
    writeln!(f, "| Register | Size | Max Interval |")?;
    writeln!(f, "|----------|------|--------------|")?;
    writeln!(
        f,
        "| `Narrow<u8>` | {} B | {} ms |",
        size_of::<Narrow<u8>>(),
        Narrow::<u8>::MAX_INTERVAL
    )?;
    writeln!(
        f,
        "| `Narrow<u16>` | {} B | {} ms |",
        size_of::<Narrow<u16>>(),
        Narrow::<u16>::MAX_INTERVAL
    )?;
    writeln!(
        f,
        "| `Wide` | {} B | {} ms |",
        size_of::<Wide>(),
        Wide::MAX_INTERVAL
    )?;
    writeln!(f)?;
    Ok(())
}

fn row<const N: usize, M: BitMask, R: TimingRegister>(
    f: &mut File,
    mask_name: &str,
    register_name: &str,
) -> std::io::Result<()> {
    let total = size_of::<Bank<'static, N, M, R>>();
    let per_channel = size_of::<R>() + size_of::<u8>();
    writeln!(
        f,
        "| {} | `{}` | `{}` | {} B | {} B |",
        N,
        mask_name,
        register_name,
        total,
        total - per_channel * N
    )
}

fn write_debouncer_table(f: &mut File) -> std::io::Result<()> {
    writeln!(f, "## `Debouncer<PortBank, MillisCounter, N, M, R>`")?;
    writeln!(f)?;
    writeln!(f, "| Channels | Mask | Register | Total Size | Fixed Overhead |")?;
    writeln!(f, "|----------|------|----------|------------|----------------|")?;

    row::<4, u8, Narrow<u8>>(f, "u8", "Narrow<u8>")?;
    row::<4, u8, Narrow<u16>>(f, "u8", "Narrow<u16>")?;
    row::<4, u8, Wide>(f, "u8", "Wide")?;
    row::<8, u8, Narrow<u8>>(f, "u8", "Narrow<u8>")?;
    row::<8, u8, Narrow<u16>>(f, "u8", "Narrow<u16>")?;
    row::<8, u8, Wide>(f, "u8", "Wide")?;
    row::<16, u16, Narrow<u8>>(f, "u16", "Narrow<u8>")?;
    row::<16, u16, Narrow<u16>>(f, "u16", "Narrow<u16>")?;
    row::<16, u16, Wide>(f, "u16", "Wide")?;
    row::<32, u32, Narrow<u8>>(f, "u32", "Narrow<u8>")?;
    row::<32, u32, Narrow<u16>>(f, "u32", "Narrow<u16>")?;
    row::<32, u32, Wide>(f, "u32", "Wide")?;

    writeln!(f)?;
    writeln!(
        f,
        "Per channel: one pin identifier (`u8` here) plus one timing register. \
         The fixed overhead covers the time source reference, the three bitmasks, \
         the intervals and the last-tick timestamp."
    )?;
    writeln!(f)?;
    Ok(())
}

fn main() -> std::io::Result<()> {
    let mut f = File::create("report.md")?;

    write_header(&mut f)?;
    write_register_sizes(&mut f)?;
    write_debouncer_table(&mut f)?;

    println!("Report written to report.md");
    Ok(())
}
