mod brute;
mod greedy;
mod preemptive;
mod simulation;
mod sort;

pub use brute::BruteForce;
pub use greedy::Greedy;
pub use preemptive::Preemptive;
pub use simulation::Simulation;
pub use sort::{DeliverySort, ReleaseSort};

/// Registry of every sequencing algorithm of the crate.
#[allow(unsafe_code)]
#[linkme::distributed_slice]
pub static SEQUENCERS: [fn() -> Box<dyn crate::core::Sequencer>];
