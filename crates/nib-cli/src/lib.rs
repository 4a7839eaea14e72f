//! nib command-line interface.
//!
//! - [`cli`] - clap definitions
//! - `commands` - one module per command
//! - [`settings`] - out/public dirs, bundler command and `NODE_ENV`, layered
//!   with figment
//! - [`error`] - [`CliError`] and its miette report
//! - [`logger`] / [`ui`] - tracing subscriber and status lines

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod settings;
pub mod ui;

pub use error::{CliError, Result};
