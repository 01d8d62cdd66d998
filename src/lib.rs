//! Tycho — Rust client for the OpenAI Assistants API
//!
//! Typed CRUD and list operations over assistants, threads, messages, runs,
//! and files, on top of one request pipeline with bounded retry and uniform
//! error classification. All state lives in the remote service; the client
//! holds transient, read-only projections.
//!
//! # Quick Start
//!
//! ```no_run
//! use tycho::prelude::*;
//!
//! # async fn example() -> tycho::error::Result<()> {
//! let client = Client::from_env()?;
//!
//! let thread = client
//!     .threads()
//!     .create(ThreadParams::new(vec![MessageParams::user("Hello!")]))
//!     .await?;
//!
//! let run = client
//!     .runs(&thread.id)
//!     .create(RunParams::new("asst_abc123"))
//!     .await?;
//! println!("run {} is {}", run.id, run.status());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod prelude;
pub mod types;
pub mod util;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{Result, TychoError};
