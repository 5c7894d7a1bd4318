pub mod client;
pub mod model;

pub use client::{CodeforcesClient, CodeforcesError, PROBLEMSET_URL};
pub use model::{ProblemDescriptor, ProblemStatistics, ProblemsetResult};
