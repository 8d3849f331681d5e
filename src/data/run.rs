use crate::core::Sequencer;
use crate::data::deserialize;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};
use std::fs::File;
use std::io::BufReader;

/// Report of running a directory of samples.
#[derive(Debug, Deserialize, Serialize)]
pub struct Report {
    sequencer: String,
    entries: Vec<ReportEntry>,
}

impl Report {
    /// Create a new report.
    fn new(sequencer: String) -> Self {
        let entries = Vec::new();
        Self { sequencer, entries }
    }

    /// Get the sequencer name.
    #[must_use]
    pub fn sequencer_name(&self) -> &str {
        &self.sequencer
    }

    /// Get the entries.
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Sequencer: {}", self.sequencer)?;
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        writeln!(f, "-------------------")
    }
}

/// Report of running a single sample.
#[non_exhaustive]
#[derive(Debug, Deserialize, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub value: u64,
    pub time: f64,
}

impl Display for ReportEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}: {} in {:.2} sec", self.name, self.value, self.time)
    }
}

/// Run all samples in the `samples` directory.
/// Print the report to stdout.
///
/// # Arguments
/// - `valid` is true, check the value against the recorded optimum.
/// - `solver` is the sequencer to run.
///
/// # Errors
/// - If a file cannot be read.
/// - If no samples are found.
///
/// # Panics
/// - If the schedule is invalid.
/// - If the value beats the recorded optimum and `valid` is true.
pub fn samples(valid: bool, solver: &mut dyn Sequencer) -> anyhow::Result<()> {
    run("samples", valid, solver).and_then(|report| {
        if report.entries.is_empty() {
            Err(anyhow!("No samples found"))
        } else {
            println!("{report}");
            Ok(())
        }
    })
}

/// Run all samples in the `dir` directory.
/// Each run is wrapped in a stopwatch; timing never changes the schedule.
///
/// # Arguments
/// - `valid` is true, check the value against the recorded optimum.
/// - `solver` is the sequencer to run.
///
/// # Errors
/// - If a file cannot be read.
///
/// # Panics
/// - If the schedule is invalid.
/// - If the value beats the recorded optimum and `valid` is true.
pub fn run(dir: &str, valid: bool, solver: &mut dyn Sequencer) -> anyhow::Result<Report> {
    let mut report = Report::new(solver.name().into());

    for file in std::fs::read_dir(dir)? {
        let file = file?;
        let (name, jobs, best) = parse_filename(&file.file_name())?;

        if jobs <= solver.maximum_jobs() {
            let instance = deserialize(&mut BufReader::new(File::open(file.path())?))?;

            let time = std::time::Instant::now();
            let schedule = solver.sequence(&instance);
            let time = time.elapsed().as_secs_f64();

            assert!(schedule.verify(), "Invalid schedule created");

            let value = schedule.value();
            if valid {
                assert!(value >= best, "Value beats the optimum on {name}");
            }

            report.entries.push(ReportEntry { name, value, time });
        }
    }

    Ok(report)
}

fn parse_filename(filename: &std::ffi::OsString) -> anyhow::Result<(String, usize, u64)> {
    static NAME_ERR: &str = "Cannot read filename";

    let name = filename.to_str().ok_or_else(|| anyhow!(NAME_ERR))?;
    let mut parts = name.split('.');
    let mut parts = parts.next().ok_or_else(|| anyhow!(NAME_ERR))?.split('_');
    let jobs = parts.next().ok_or_else(|| anyhow!(NAME_ERR))?.parse()?;
    let best = parts.next().ok_or_else(|| anyhow!(NAME_ERR))?.parse()?;
    let _: usize = parts.next().ok_or_else(|| anyhow!(NAME_ERR))?.parse()?;
    Ok((name.into(), jobs, best))
}
