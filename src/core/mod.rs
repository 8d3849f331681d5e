mod evaluate;
mod problem;
mod solution;
mod util;

pub use evaluate::*;
pub use problem::*;
pub use solution::*;
pub use util::*;

/// Sequences the jobs of an instance.
pub trait Sequencer {
    /// Sequences the jobs of the given instance.
    fn sequence<'a>(&mut self, instance: &'a Instance) -> Schedule<'a>;

    /// Returns the largest job count the sequencer accepts in reasonable time.
    fn maximum_jobs(&self) -> usize {
        usize::MAX
    }

    /// Returns the name of the sequencer.
    fn name(&self) -> &'static str;
}
