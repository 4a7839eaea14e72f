//! Command implementations. Each exposes an `execute` function taking the
//! parsed arguments. Commands that load the config also take the name they
//! were invoked as, which selects the config's `commands.<name>` overrides.

pub mod build;
pub mod check;
pub mod clean;
pub(crate) mod utils;

pub use build::{
    execute as build_execute, execute_react_app as build_react_app_execute,
    execute_web_app as build_web_app_execute,
};
pub use check::execute as check_execute;
pub use clean::execute as clean_app_execute;
