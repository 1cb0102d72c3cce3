// Core typing-test engine: sessions, metrics, windowing and the score ledger.
// The terminal front end in main.rs builds on these modules.

pub mod config;
pub mod engine;
pub mod generator;
pub mod logging;
pub mod session;
pub mod store;
