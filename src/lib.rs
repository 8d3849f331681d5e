#![deny(clippy::all, clippy::cargo, clippy::expect_used, clippy::unwrap_used)]
#![deny(clippy::pedantic, clippy::nursery, unsafe_code)]
#![warn(clippy::unimplemented, clippy::redundant_type_annotations)]

use anyhow::Result;
use std::io::BufRead;

pub mod algo;
pub mod core;
pub mod data;

/// Runs the given sequencer on the instance read from reader and writes the
/// processing order to stdout. Also writes the completion value to stdout.
/// Returns an error if the instance could not be read.
///
/// # Errors
/// - If the instance could not be read from the reader.
///
/// # Panics
/// - If the schedule is invalid in debug mode.
pub fn run_reader(sequencer: &mut dyn core::Sequencer, reader: &mut impl BufRead) -> Result<()> {
    let instance: core::Instance = data::deserialize(reader)?;
    let schedule = sequencer.sequence(&instance);

    debug_assert!(schedule.verify(), "Schedule is invalid: {schedule:?}");

    println!("{schedule}");
    println!("{}", schedule.value());

    Ok(())
}

#[cfg(not(target_pointer_width = "64"))]
compile_error!("Must be 64-bit system!");

/// Casts the given value to `u64`.
/// It never fails on 64-bit systems.
#[must_use]
pub fn cast_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or_else(|_| unreachable!("Must be 64-bit system!"))
}
