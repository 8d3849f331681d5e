use crate::core::{
    evaluate, release_order, schrage_priority, Instance, JobWithId, Schedule, Sequencer,
};

/// Schrage list sequencing.
/// Repeatedly runs the already released job with the largest delivery time;
/// when nothing has been released yet the machine waits for the earliest
/// release. The very first pick falls out of the same rule: with the clock
/// at zero nothing is available, so the earliest released job seeds the order.
pub(super) fn sequence(instance: &Instance) -> Schedule<'_> {
    let mut schedule = Schedule::new(instance);
    let mut remaining: Vec<JobWithId> = instance.jobs.iter().copied().enumerate().collect();
    let mut output: Vec<JobWithId> = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        let clock = evaluate(&output, false);

        let available = remaining
            .iter()
            .enumerate()
            .filter(|&(_, job)| job.1.release < clock)
            .max_by(|&(_, first), &(_, second)| schrage_priority(first, second))
            .map(|(position, _)| position);

        let position = available.unwrap_or_else(|| {
            let earliest = remaining
                .iter()
                .enumerate()
                .min_by(|&(_, first), &(_, second)| release_order(first, second));

            earliest.map_or_else(|| unreachable!("The remaining pool is non-empty"), |(position, _)| position)
        });

        let job = remaining.swap_remove(position);
        schedule.push_completed(job.0, job.1.processing);
        output.push(job);
    }

    schedule
}

/// Schrage list sequencing without preemption.
#[derive(Clone, Copy, Debug, Default)]
pub struct Greedy;

impl Sequencer for Greedy {
    fn sequence<'a>(&mut self, instance: &'a Instance) -> Schedule<'a> {
        sequence(instance)
    }

    fn name(&self) -> &'static str {
        "Greedy"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SEQUENCERS)]
static INSTANCE: fn() -> Box<dyn Sequencer> = || Box::new(Greedy);

#[cfg(test)]
mod test {
    use super::*;
    use crate::data::{deserialize, samples};

    const REFERENCE: &str = "6\n0 4 14\n5 6 8\n3 3 10\n8 4 5\n2 5 12\n10 5 5\n";

    #[test]
    fn reference_instance_reaches_the_optimum() -> anyhow::Result<()> {
        let instance: Instance = deserialize(&mut REFERENCE.as_bytes())?;
        let schedule = Greedy.sequence(&instance);

        assert!(schedule.verify());
        assert_eq!(format!("{schedule}"), "1 5 3 2 4 6");
        assert_eq!(schedule.value(), 32);

        Ok(())
    }

    #[test]
    fn empty_instance_yields_an_empty_schedule() {
        let instance = Instance::new(Vec::new());
        let schedule = Greedy.sequence(&instance);

        assert!(schedule.verify());
        assert!(schedule.segments().is_empty());
        assert_eq!(schedule.value(), 0);
    }

    #[test]
    fn test_greedy() {
        assert!(samples(true, &mut Greedy).is_ok());
    }
}
