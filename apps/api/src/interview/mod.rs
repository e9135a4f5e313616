// Mock interview endpoints: resume parsing, question generation,
// answer scoring and speech synthesis.
// All provider calls go through a `ModelProvider`; nothing here holds state
// between requests.

pub mod evaluation;
pub mod handlers;
pub mod prompts;
pub mod questions;
pub mod resume;
pub mod speech;
