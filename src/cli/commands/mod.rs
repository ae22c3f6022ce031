//! CLI command implementations.

pub trait Command {
    fn execute(self);
}

pub mod compare;
pub mod search;

// Shared arguments for commands
pub(crate) mod util;
