//! Mudlark Engine library.
//!
//! This crate contains all server-side code for the MUD.
//!
//! ## Structure
//!
//! - `use_cases/` - Game actions, one module per verb family
//! - `interpreter` - Command line in, addressed messages out
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP and WebSocket entry points, session routing
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod interpreter;
pub mod use_cases;

pub use app::App;
pub use interpreter::{Interpreter, Outcome};
