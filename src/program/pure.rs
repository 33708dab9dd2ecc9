//! Pure command-line helpers

mod command;

pub use command::{shell_join, shell_quote};
