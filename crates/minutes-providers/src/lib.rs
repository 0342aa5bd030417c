//! # minutes-providers
//!
//! Text-generation providers and the orchestrator that tries them in order.
//!
//! - [`prompts`]: one instruction template per summary type
//! - [`clients`]: OpenAI-compatible and Anthropic HTTP clients
//! - [`ProviderOrchestrator`]: ordered fallback with timeouts and degradation events
//! - [`build_orchestrator`]: construct everything from configuration

pub mod clients;
pub mod factory;
pub mod orchestrator;
pub mod prompts;

pub use factory::{build_orchestrator, resolve_credentials};
pub use orchestrator::{ProviderOrchestrator, ProviderSignal, SummaryOutcome};
