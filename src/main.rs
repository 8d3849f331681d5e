use clap::{Parser, ValueEnum};
use rand::prelude::*;
use rpq_sequencing::core::{Instance, Job, Sequencer};
use rpq_sequencing::{algo, cast_u64, data, run_reader};
use std::io::Write;
use std::num::NonZero;

#[derive(Copy, Clone, Debug)]
struct Algorithm(usize, &'static str);

impl From<Algorithm> for Box<dyn Sequencer> {
    fn from(value: Algorithm) -> Box<dyn Sequencer> {
        algo::SEQUENCERS[value.0]()
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.1)
    }
}

impl ValueEnum for Algorithm {
    fn value_variants<'a>() -> &'a [Self] {
        static ALGORITHMS: std::sync::LazyLock<Vec<Algorithm>> = std::sync::LazyLock::new(|| {
            let iter = algo::SEQUENCERS.iter().enumerate();
            iter.map(|(i, init)| Algorithm(i, init().name())).collect()
        });

        ALGORITHMS.as_slice()
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.1))
    }
}

/// Application sequencing jobs with release and delivery times on one machine.
#[derive(Debug, Parser)]
enum Application {
    /// Run one of the implemented algorithms on an instance read from stdin.
    Run { algorithm: Algorithm },
    /// Run benchmarks on a directory of instances.
    Bench {
        /// The input directory.
        input: String,
        /// Exclude sequencing algorithms.
        #[clap(short, long, value_delimiter = ',')]
        exclude: Vec<Algorithm>,
    },
    /// Generate test instances for the sequencing problem.
    Gen {
        /// The number of jobs.
        jobs: NonZero<usize>,
        /// The maximum processing time of a job.
        max_processing: NonZero<u64>,
        /// The maximum delivery time of a job.
        #[clap(short = 'd', long, default_value = "50")]
        max_delivery: u64,
        /// Release spread ratio.
        /// Releases are drawn from 0 to `max_processing` * `jobs` * `release_ratio` / 2.
        #[clap(short, long, default_value = "1.0")]
        release_ratio: f64,
        /// Number of test cases to generate.
        #[clap(short, long, default_value = "1")]
        amount: NonZero<u64>,
        /// Path to output the generated instances. If the directory does not exist, it will be created.
        #[clap(short, long, default_value = "output")]
        output: String,
    },
}

fn sequencers(exclude: &[Algorithm]) -> impl Iterator<Item = Box<dyn Sequencer>> + '_ {
    let iter = algo::SEQUENCERS.iter().map(|init| init());
    iter.filter(|sequencer| !exclude.iter().any(|name| name.1 == sequencer.name()))
}

fn compute_horizon(max_processing: u64, jobs: usize, ratio: f64) -> u64 {
    ((max_processing * cast_u64(jobs)) as f64 * ratio / 2.0).ceil() as u64
}

fn gen_jobs(jobs: usize, max_processing: u64, max_delivery: u64, horizon: u64) -> Vec<Job> {
    let mut rng = thread_rng();
    let mut generated = Vec::with_capacity(jobs);
    for _ in 0..jobs {
        let release = rng.gen_range(0..=horizon);
        let processing = rng.gen_range(1..=max_processing);
        let delivery = rng.gen_range(0..=max_delivery);
        generated.push(Job {
            release,
            processing,
            delivery,
        });
    }
    generated
}

fn main() -> anyhow::Result<()> {
    match Application::parse() {
        Application::Run { algorithm } => {
            let mut sequencer = Box::<dyn Sequencer>::from(algorithm);
            run_reader(sequencer.as_mut(), &mut std::io::stdin().lock())
        }
        Application::Bench { input, exclude } => {
            for mut sequencer in sequencers(&exclude) {
                println!("{}", data::run(&input, false, sequencer.as_mut())?);
            }
            Ok(())
        }
        Application::Gen {
            jobs,
            max_processing,
            max_delivery,
            release_ratio,
            amount,
            output,
        } => {
            let jobs = jobs.get();
            let max_processing = max_processing.get();

            let output = std::path::Path::new(&output);
            if !output.try_exists()? {
                std::fs::create_dir_all(output)?;
            }

            let horizon = compute_horizon(max_processing, jobs, release_ratio);
            for i in 0..amount.get() {
                let instance =
                    Instance::new(gen_jobs(jobs, max_processing, max_delivery, horizon));
                let filename = format!("{jobs}_0_{i}.in");
                std::fs::File::create(output.join(filename))?
                    .write_all(data::to_string(&instance)?.as_bytes())?;
            }
            Ok(())
        }
    }
}
