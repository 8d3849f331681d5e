use serde::{Deserialize, Serialize};

/// A job. Contains the release, processing and delivery times of the job.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Serialize, PartialEq)]
pub struct Job {
    pub release: u64,
    pub processing: u64,
    pub delivery: u64,
}

/// An instance of the sequencing problem.
/// Jobs are stored in input order and identified by their index.
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Eq, Serialize, PartialEq)]
pub struct Instance {
    pub jobs: Vec<Job>,
}

impl Instance {
    /// Creates a new instance of the sequencing problem.
    #[must_use]
    pub const fn new(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn instance_should_serialize() -> anyhow::Result<()> {
        let instance = Instance::new(vec![
            Job {
                release: 1,
                processing: 5,
                delivery: 9,
            },
            Job {
                release: 0,
                processing: 2,
                delivery: 4,
            },
        ]);

        let serialized = crate::data::to_string(&instance)?;
        let mut reader = std::io::Cursor::new(serialized);
        let deserialized: Instance = crate::data::deserialize(&mut reader)?;

        assert_eq!(instance, deserialized);

        Ok(())
    }
}
