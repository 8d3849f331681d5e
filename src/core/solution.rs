use super::{evaluate::fold, Instance};
use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};
use std::fmt::{Display, Formatter};

/// A contiguous run of processing attributed to one job.
/// Only a job's final segment carries its delivery charge.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Segment {
    pub job: usize,
    pub amount: u64,
    pub delivery_charged: bool,
}

/// An ordered sequence of segments produced by one sequencer run.
#[derive(Clone, Debug)]
pub struct Schedule<'a> {
    instance: &'a Instance,
    segments: Vec<Segment>,
}

impl<'a> Schedule<'a> {
    /// Creates an empty schedule for the given instance.
    #[must_use]
    pub const fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            segments: Vec::new(),
        }
    }

    /// Appends the final segment of a job and charges its delivery.
    pub fn push_completed(&mut self, job: usize, amount: u64) {
        self.segments.push(Segment {
            job,
            amount,
            delivery_charged: true,
        });
    }

    /// Appends a partial segment of an interrupted job.
    /// The delivery charge stays with the job's final segment.
    pub fn push_interrupted(&mut self, job: usize, amount: u64) {
        self.segments.push(Segment {
            job,
            amount,
            delivery_charged: false,
        });
    }

    /// Returns the segments in execution order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Calculates the completion value of the schedule, delivery included.
    #[must_use]
    pub fn value(&self) -> u64 {
        fold(self.parts(), true)
    }

    /// Calculates the machine completion time of the last segment, tails ignored.
    #[must_use]
    pub fn makespan(&self) -> u64 {
        fold(self.parts(), false)
    }

    fn parts(&self) -> impl Iterator<Item = (u64, u64, u64)> + '_ {
        self.segments.iter().map(|segment| {
            let job = self.instance.jobs[segment.job];
            let tail = if segment.delivery_charged {
                job.delivery
            } else {
                0
            };
            (job.release, segment.amount, tail)
        })
    }

    /// Verifies the segment invariants of the schedule:
    /// every job of the instance is fully processed across its segments,
    /// and its delivery is charged on exactly its last segment.
    #[must_use]
    pub fn verify(&self) -> bool {
        let mut processed = HashMap::new();
        let mut charged = HashSet::new();

        for segment in &self.segments {
            if segment.job >= self.instance.jobs.len() || charged.contains(&segment.job) {
                return false;
            }

            *processed.entry(segment.job).or_insert(0) += segment.amount;

            if segment.delivery_charged {
                charged.insert(segment.job);
            }
        }

        self.instance.jobs.iter().enumerate().all(|(id, job)| {
            processed.get(&id) == Some(&job.processing) && charged.contains(&id)
        })
    }
}

impl Display for Schedule<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut ids = self.segments.iter().map(|segment| segment.job + 1);

        if let Some(first) = ids.next() {
            write!(f, "{first}")?;
            for id in ids {
                write!(f, " {id}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::Job;

    fn instance() -> Instance {
        Instance::new(vec![
            Job {
                release: 0,
                processing: 10,
                delivery: 1,
            },
            Job {
                release: 2,
                processing: 3,
                delivery: 9,
            },
        ])
    }

    #[test]
    fn split_schedule_evaluates_and_verifies() {
        let instance = instance();
        let mut schedule = Schedule::new(&instance);
        schedule.push_interrupted(0, 2);
        schedule.push_completed(1, 3);
        schedule.push_completed(0, 8);

        assert!(schedule.verify());
        assert_eq!(schedule.makespan(), 13);
        assert_eq!(schedule.value(), 14);
        assert_eq!(format!("{schedule}"), "1 2 1");
    }

    #[test]
    fn missing_job_fails_verification() {
        let instance = instance();
        let mut schedule = Schedule::new(&instance);
        schedule.push_completed(0, 10);

        assert!(!schedule.verify());
    }

    #[test]
    fn lost_work_fails_verification() {
        let instance = instance();
        let mut schedule = Schedule::new(&instance);
        schedule.push_interrupted(0, 2);
        schedule.push_completed(1, 3);
        schedule.push_completed(0, 7);

        assert!(!schedule.verify());
    }

    #[test]
    fn segment_after_the_charged_one_fails_verification() {
        let instance = instance();
        let mut schedule = Schedule::new(&instance);
        schedule.push_completed(0, 10);
        schedule.push_completed(1, 3);
        schedule.push_interrupted(0, 0);

        assert!(!schedule.verify());
    }

    #[test]
    fn uncharged_job_fails_verification() {
        let instance = instance();
        let mut schedule = Schedule::new(&instance);
        schedule.push_interrupted(0, 10);
        schedule.push_completed(1, 3);

        assert!(!schedule.verify());
    }

    #[test]
    fn empty_schedule_of_empty_instance_is_valid() {
        let instance = Instance::new(Vec::new());
        let schedule = Schedule::new(&instance);

        assert!(schedule.verify());
        assert_eq!(schedule.value(), 0);
        assert_eq!(schedule.makespan(), 0);
        assert_eq!(format!("{schedule}"), "");
    }
}
