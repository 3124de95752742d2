pub mod client;
pub mod model;

pub use client::{CodeforcesClient, ContestSource, FetchError};
pub use model::{ContestRecord, Phase};
