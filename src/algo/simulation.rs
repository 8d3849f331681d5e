use crate::core::{Instance, PendingEntry, ReadyEntry, Schedule, Sequencer};
use std::collections::BinaryHeap;

/// Discrete-tick simulation of the machine.
/// Jobs move from the pending heap into the ready heap at their release
/// time, the machine always works the ready job with the largest delivery
/// time, and ticks with nothing released and nothing running jump straight
/// to the next release. The running job is never replaced before it
/// finishes, so the produced order matches the greedy list construction.
pub(super) fn sequence(instance: &Instance) -> Schedule<'_> {
    let mut schedule = Schedule::new(instance);
    let mut pending: BinaryHeap<PendingEntry> = instance
        .jobs
        .iter()
        .copied()
        .enumerate()
        .map(PendingEntry)
        .collect();
    let mut ready = BinaryHeap::new();
    let mut current: Option<ReadyEntry> = None;
    let mut time = 0;

    while current.is_some() || !pending.is_empty() || !ready.is_empty() {
        while pending
            .peek()
            .is_some_and(|&PendingEntry((_, job))| job.release <= time)
        {
            if let Some(PendingEntry(job)) = pending.pop() {
                ready.push(ReadyEntry::new(job));
            }
        }

        if current.is_none() && ready.is_empty() {
            if let Some(&PendingEntry((_, job))) = pending.peek() {
                time = job.release;
            }
            continue;
        }

        let Some(mut running) = current.take().or_else(|| ready.pop()) else {
            unreachable!("The idle branch above catches this state")
        };

        running.remaining = running.remaining.saturating_sub(1);

        if running.remaining == 0 {
            schedule.push_completed(running.job.0, running.job.1.processing);
        } else {
            current = Some(running);
        }

        time += 1;
    }

    schedule
}

/// Schrage sequencing restated as an event-driven simulation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Simulation;

impl Sequencer for Simulation {
    fn sequence<'a>(&mut self, instance: &'a Instance) -> Schedule<'a> {
        sequence(instance)
    }

    fn name(&self) -> &'static str {
        "Simulation"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SEQUENCERS)]
static INSTANCE: fn() -> Box<dyn Sequencer> = || Box::new(Simulation);
