use crate::core::{release_order, Instance, JobWithId, Schedule, Sequencer};
use std::cmp::Ordering;

/// Runs the jobs in the order produced by the comparator.
fn sequence_by(instance: &Instance, compare: fn(&JobWithId, &JobWithId) -> Ordering) -> Schedule<'_> {
    let mut jobs: Vec<JobWithId> = instance.jobs.iter().copied().enumerate().collect();
    jobs.sort_unstable_by(compare);

    let mut schedule = Schedule::new(instance);
    for (id, job) in jobs {
        schedule.push_completed(id, job.processing);
    }

    schedule
}

/// Orders jobs by delivery time ascending, smaller index first on ties.
fn delivery_order(first: &JobWithId, second: &JobWithId) -> Ordering {
    match first.1.delivery.cmp(&second.1.delivery) {
        Ordering::Equal => first.0.cmp(&second.0),
        order => order,
    }
}

/// Baseline running jobs in release time order.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReleaseSort;

impl Sequencer for ReleaseSort {
    fn sequence<'a>(&mut self, instance: &'a Instance) -> Schedule<'a> {
        sequence_by(instance, release_order)
    }

    fn name(&self) -> &'static str {
        "ReleaseSort"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SEQUENCERS)]
static RELEASE: fn() -> Box<dyn Sequencer> = || Box::new(ReleaseSort);

/// Baseline running jobs in delivery time order.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeliverySort;

impl Sequencer for DeliverySort {
    fn sequence<'a>(&mut self, instance: &'a Instance) -> Schedule<'a> {
        sequence_by(instance, delivery_order)
    }

    fn name(&self) -> &'static str {
        "DeliverySort"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SEQUENCERS)]
static DELIVERY: fn() -> Box<dyn Sequencer> = || Box::new(DeliverySort);
