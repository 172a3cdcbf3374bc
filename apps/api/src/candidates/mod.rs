pub mod handlers;
pub mod linkedin;
pub mod prompts;
pub mod repository;
pub mod resume;
pub mod skills;
