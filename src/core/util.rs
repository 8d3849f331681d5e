use super::Job;
use std::cmp::Ordering;

/// Job with its index in the instance.
pub type JobWithId = (usize, Job);

/// Orders jobs by release time ascending. The smaller index wins ties.
#[must_use]
pub fn release_order(first: &JobWithId, second: &JobWithId) -> Ordering {
    match first.1.release.cmp(&second.1.release) {
        Ordering::Equal => first.0.cmp(&second.0),
        order => order,
    }
}

/// The Schrage priority rule shared by all sequencers: among released jobs
/// the one with the largest delivery time runs first, since its tail is the
/// most costly to defer. The smaller index wins ties.
/// `Greater` means `first` has the higher priority.
#[must_use]
pub fn schrage_priority(first: &JobWithId, second: &JobWithId) -> Ordering {
    match first.1.delivery.cmp(&second.1.delivery) {
        Ordering::Equal => second.0.cmp(&first.0),
        order => order,
    }
}

/// A job waiting for its release time.
/// Binary heap entry inverted so the earliest release is popped first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PendingEntry(pub JobWithId);

impl PartialOrd<Self> for PendingEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        release_order(&other.0, &self.0)
    }
}

/// A released job competing for the machine, keyed by the Schrage rule.
/// Carries the unprocessed remainder so an interrupted job re-competes
/// under its unchanged delivery key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReadyEntry {
    pub job: JobWithId,
    pub remaining: u64,
}

impl ReadyEntry {
    /// Creates an entry for a job that has not run yet.
    #[must_use]
    pub const fn new(job: JobWithId) -> Self {
        Self {
            remaining: job.1.processing,
            job,
        }
    }
}

impl PartialOrd<Self> for ReadyEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ReadyEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        schrage_priority(&self.job, &other.job)
    }
}

/// Transforms the slice into its next lexicographic permutation.
/// Returns false once the last permutation is reached, leaving the slice in
/// its first (ascending) permutation again.
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    if items.len() < 2 {
        return false;
    }

    let mut pivot = items.len() - 1;
    while pivot > 0 && items[pivot - 1] >= items[pivot] {
        pivot -= 1;
    }

    if pivot == 0 {
        items.reverse();
        return false;
    }

    let mut successor = items.len() - 1;
    while items[successor] <= items[pivot - 1] {
        successor -= 1;
    }

    items.swap(pivot - 1, successor);
    items[pivot..].reverse();
    true
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::BinaryHeap;

    const fn job(release: u64, processing: u64, delivery: u64) -> Job {
        Job {
            release,
            processing,
            delivery,
        }
    }

    #[test]
    fn release_order_breaks_ties_by_index() {
        let first = (0, job(3, 1, 1));
        let second = (1, job(3, 9, 9));

        assert_eq!(release_order(&first, &second), Ordering::Less);
        assert_eq!(release_order(&second, &first), Ordering::Greater);
        assert_eq!(release_order(&first, &(1, job(2, 1, 1))), Ordering::Greater);
    }

    #[test]
    fn schrage_priority_prefers_large_delivery_then_small_index() {
        let short_tail = (0, job(0, 1, 2));
        let long_tail = (1, job(0, 1, 7));
        let long_tail_later = (2, job(0, 1, 7));

        assert_eq!(schrage_priority(&long_tail, &short_tail), Ordering::Greater);
        assert_eq!(
            schrage_priority(&long_tail, &long_tail_later),
            Ordering::Greater
        );
    }

    #[test]
    fn pending_heap_pops_earliest_release_first() {
        let mut pending: BinaryHeap<_> = [(0, job(5, 1, 1)), (1, job(2, 1, 1)), (2, job(2, 1, 1))]
            .into_iter()
            .map(PendingEntry)
            .collect();

        assert_eq!(pending.pop().map(|entry| entry.0 .0), Some(1));
        assert_eq!(pending.pop().map(|entry| entry.0 .0), Some(2));
        assert_eq!(pending.pop().map(|entry| entry.0 .0), Some(0));
        assert_eq!(pending.pop(), None);
    }

    #[test]
    fn ready_heap_pops_largest_delivery_first() {
        let mut ready: BinaryHeap<_> = [(0, job(0, 1, 4)), (1, job(0, 1, 8)), (2, job(0, 1, 8))]
            .into_iter()
            .map(ReadyEntry::new)
            .collect();

        assert_eq!(ready.pop().map(|entry| entry.job.0), Some(1));
        assert_eq!(ready.pop().map(|entry| entry.job.0), Some(2));
        assert_eq!(ready.pop().map(|entry| entry.job.0), Some(0));
        assert_eq!(ready.pop(), None);
    }

    #[test]
    fn next_permutation_cycles_lexicographically() {
        let mut items = [0, 1, 2];
        let mut seen = vec![items.to_vec()];

        while next_permutation(&mut items) {
            seen.push(items.to_vec());
        }

        assert_eq!(
            seen,
            [
                [0, 1, 2],
                [0, 2, 1],
                [1, 0, 2],
                [1, 2, 0],
                [2, 0, 1],
                [2, 1, 0]
            ]
        );
        assert_eq!(items, [0, 1, 2]);
    }

    #[test]
    fn next_permutation_of_short_slices_is_exhausted() {
        assert!(!next_permutation::<usize>(&mut []));
        assert!(!next_permutation(&mut [7]));
    }
}
