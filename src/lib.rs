//! kite, a lightweight keyboard-driven web browser shell.
//!
//! The embedded rendering engine, its network stack, and the window
//! chrome live in a separate engine host process; this crate drives it
//! over newline-delimited JSON. The shell owns the tab model, address
//! and search handling, the ad/tracker filter, persisted settings and
//! history, downloads, and hint-mode link activation.

pub mod adblock;
pub mod cli;
pub mod engine;
pub mod error;
pub mod hints;
pub mod shell;
pub mod storage;
