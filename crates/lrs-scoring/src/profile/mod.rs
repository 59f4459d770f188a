//! Profile Assembler and the request-facing engine that runs the full
//! answers → scores → ranked records pipeline.

mod assemble;
mod engine;

pub use assemble::{assemble, round_score, ScoredSchemaRecord};
pub use engine::{ProfileEngine, ProfileError};
