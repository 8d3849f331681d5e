use super::JobWithId;

/// Evaluates an ordered job sequence into its completion value.
///
/// The first pass advances the machine clock job by job, waiting out
/// unreleased jobs, and records each job's post-delivery exit time. With
/// `include_delivery` the exit times are folded, in sequence order, on top of
/// the final clock, yielding the criterion value. Without it the raw makespan
/// is returned, which is what the sequencers use to track how far the machine
/// has advanced before any tail is due.
///
/// An empty sequence evaluates to `0`.
#[must_use]
pub fn evaluate(sequence: &[JobWithId], include_delivery: bool) -> u64 {
    fold(
        sequence
            .iter()
            .map(|&(_, job)| (job.release, job.processing, job.delivery)),
        include_delivery,
    )
}

/// Two-pass fold shared by [`evaluate`] and segment-level evaluation.
/// Parts are `(release, amount, tail)` triples in execution order.
pub(super) fn fold(
    parts: impl Iterator<Item = (u64, u64, u64)>,
    include_delivery: bool,
) -> u64 {
    let mut clock = 0;
    let mut exits = Vec::new();

    for (release, amount, tail) in parts {
        clock = clock.max(release) + amount;
        exits.push(clock + tail);
    }

    if include_delivery {
        exits.into_iter().fold(clock, u64::max)
    } else {
        clock
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::Job;

    fn sequence() -> Vec<JobWithId> {
        [(1, 5, 9), (2, 2, 4), (0, 1, 1)]
            .into_iter()
            .map(|(release, processing, delivery)| Job {
                release,
                processing,
                delivery,
            })
            .enumerate()
            .collect()
    }

    #[test]
    fn worked_example() {
        let sequence = sequence();

        assert_eq!(evaluate(&sequence, false), 9);
        assert_eq!(evaluate(&sequence, true), 15);
    }

    #[test]
    fn delivery_never_lowers_the_value() {
        let sequence = sequence();

        assert!(evaluate(&sequence, true) >= evaluate(&sequence, false));
    }

    #[test]
    fn evaluation_is_pure() {
        let sequence = sequence();

        assert_eq!(evaluate(&sequence, true), evaluate(&sequence, true));
        assert_eq!(evaluate(&sequence, false), evaluate(&sequence, false));
    }

    #[test]
    fn empty_sequence_evaluates_to_zero() {
        assert_eq!(evaluate(&[], false), 0);
        assert_eq!(evaluate(&[], true), 0);
    }
}
