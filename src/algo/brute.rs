use crate::core::{evaluate, next_permutation, Instance, JobWithId, Schedule, Sequencer};

/// Exhaustive search over every processing order.
/// Keeps the first optimal order in lexicographic enumeration order.
pub(super) fn sequence(instance: &Instance) -> Schedule<'_> {
    let mut order: Vec<usize> = (0..instance.jobs.len()).collect();
    let mut best: Option<(Vec<usize>, u64)> = None;

    loop {
        let sequence: Vec<JobWithId> = order.iter().map(|&id| (id, instance.jobs[id])).collect();
        let value = evaluate(&sequence, true);

        if best.as_ref().map_or(true, |&(_, best_value)| value < best_value) {
            best = Some((order.clone(), value));
        }

        if !next_permutation(&mut order) {
            break;
        }
    }

    let mut schedule = Schedule::new(instance);

    if let Some((order, _)) = best {
        for id in order {
            schedule.push_completed(id, instance.jobs[id].processing);
        }
    }

    schedule
}

/// Optimal sequencing by full permutation enumeration.
/// A baseline oracle; factorial time caps it to small instances.
#[derive(Clone, Copy, Debug, Default)]
pub struct BruteForce;

impl Sequencer for BruteForce {
    fn sequence<'a>(&mut self, instance: &'a Instance) -> Schedule<'a> {
        sequence(instance)
    }

    fn maximum_jobs(&self) -> usize {
        10
    }

    fn name(&self) -> &'static str {
        "BruteForce"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SEQUENCERS)]
static INSTANCE: fn() -> Box<dyn Sequencer> = || Box::new(BruteForce);

#[cfg(test)]
mod test {
    use super::*;
    use crate::algo::{Greedy, Simulation};
    use crate::data::{deserialize, samples};

    const REFERENCE: &str = "6\n0 4 14\n5 6 8\n3 3 10\n8 4 5\n2 5 12\n10 5 5\n";

    #[test]
    fn confirms_the_reference_optimum() -> anyhow::Result<()> {
        let instance: Instance = deserialize(&mut REFERENCE.as_bytes())?;
        let schedule = BruteForce.sequence(&instance);

        assert!(schedule.verify());
        assert_eq!(schedule.value(), 32);

        Ok(())
    }

    #[test]
    fn heuristics_never_beat_the_oracle() -> anyhow::Result<()> {
        let instance: Instance = deserialize(&mut "4\n1 5 9\n2 2 4\n0 1 1\n3 3 6\n".as_bytes())?;
        let optimum = BruteForce.sequence(&instance).value();

        assert!(Greedy.sequence(&instance).value() >= optimum);
        assert!(Simulation.sequence(&instance).value() >= optimum);

        Ok(())
    }

    #[test]
    fn empty_instance_yields_an_empty_schedule() {
        let instance = Instance::new(Vec::new());
        let schedule = BruteForce.sequence(&instance);

        assert!(schedule.verify());
        assert!(schedule.segments().is_empty());
        assert_eq!(schedule.value(), 0);
    }

    #[test]
    fn test_brute_force() {
        assert!(samples(true, &mut BruteForce).is_ok());
    }
}
