pub mod category;
pub mod engine;
pub mod handlers;
pub mod heuristic;
pub mod insights;
pub mod models;
pub mod profile;
pub mod prompts;
pub mod repository;
pub mod requirements;
pub mod scorer;

pub use engine::TalentMatcher;
