pub mod candidate;
pub mod interest;
pub mod job;
pub mod matching;
