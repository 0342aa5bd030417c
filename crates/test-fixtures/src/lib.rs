//! Shared test doubles and transcript fixtures for the minutes workspace.
//!
//! Provides a manual clock, scripted providers, an in-memory sink, and typed
//! loading of the JSON transcripts under `fixtures/`.

mod clock;
mod provider;
mod sink;
mod transcripts;

pub use clock::ManualClock;
pub use provider::{Outcome, ScriptedProvider};
pub use sink::MemorySink;
pub use transcripts::{
    chunks, fixture_path, load_fixture, load_transcript, TranscriptFixture, TranscriptLine,
};
