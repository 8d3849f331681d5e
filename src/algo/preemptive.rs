use crate::core::{
    schrage_priority, Instance, JobWithId, PendingEntry, ReadyEntry, Schedule, Sequencer,
};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// The job occupying the machine and the progress of its current stint.
#[derive(Clone, Copy, Debug)]
struct Running {
    job: JobWithId,
    remaining: u64,
    done: u64,
}

impl Running {
    const fn resume(entry: ReadyEntry) -> Self {
        Self {
            job: entry.job,
            remaining: entry.remaining,
            done: 0,
        }
    }
}

/// Advances the running job by one unit of work.
/// Emits its final, delivery-charged segment once nothing remains.
fn advance(mut running: Running, schedule: &mut Schedule<'_>) -> Option<Running> {
    if running.remaining > 0 {
        running.remaining -= 1;
        running.done += 1;
    }

    if running.remaining == 0 {
        schedule.push_completed(running.job.0, running.done);
        None
    } else {
        Some(running)
    }
}

/// Schrage sequencing with expropriation.
/// The simulation of the non-preemptive variant, except that a newly
/// released job with a strictly larger delivery time than the running job
/// takes the machine at once. The interrupted stint becomes an uncharged
/// segment and the remainder re-enters the ready heap under its unchanged
/// delivery key.
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
    let mut current: Option<Running> = None;
    let mut time = 0;

    while current.is_some() || !pending.is_empty() || !ready.is_empty() {
        let head = ready.peek().map(|entry: &ReadyEntry| entry.job.0);

        while pending
            .peek()
            .is_some_and(|&PendingEntry((_, job))| job.release <= time)
        {
            if let Some(PendingEntry(job)) = pending.pop() {
                ready.push(ReadyEntry::new(job));
            }
        }

        let admitted_head = ready.peek().map(|entry| entry.job.0);

        let preempting = match (&current, ready.peek()) {
            (Some(running), Some(entry)) => {
                admitted_head != head
                    && schrage_priority(&entry.job, &running.job) == Ordering::Greater
            }
            _ => false,
        };

        if preempting {
            let Some(running) = current.take() else {
                unreachable!("Preemption requires a running job")
            };

            schedule.push_interrupted(running.job.0, running.done);
            ready.push(ReadyEntry {
                job: running.job,
                remaining: running.remaining,
            });

            let Some(entry) = ready.pop() else {
                unreachable!("The interrupted job was just pushed")
            };

            // The tick that caused the preemption already advances the winner.
            current = advance(Running::resume(entry), &mut schedule);
            time += 1;
            continue;
        }

        if current.is_none() && ready.is_empty() {
            if let Some(&PendingEntry((_, job))) = pending.peek() {
                time = job.release;
            }
            continue;
        }

        let running = match current.take() {
            Some(running) => running,
            None => {
                let Some(entry) = ready.pop() else {
                    unreachable!("The idle branch above catches this state")
                };
                Running::resume(entry)
            }
        };

        current = advance(running, &mut schedule);
        time += 1;
    }

    schedule
}

/// Schrage sequencing with expropriation of the running job.
#[derive(Clone, Copy, Debug, Default)]
pub struct Preemptive;

impl Sequencer for Preemptive {
    fn sequence<'a>(&mut self, instance: &'a Instance) -> Schedule<'a> {
        sequence(instance)
    }

    fn name(&self) -> &'static str {
        "Preemptive"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SEQUENCERS)]
static INSTANCE: fn() -> Box<dyn Sequencer> = || Box::new(Preemptive);
