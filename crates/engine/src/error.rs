use events::Slot;
use thiserror::Error;

/// A command was issued before the stage it depends on succeeded.
///
/// Returned synchronously; the session is left exactly as it was and no call is made.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("`{command}` requires a successful {requires} result")]
pub struct PreconditionError {
    pub command: &'static str,
    pub requires: Slot,
}

impl PreconditionError {
    pub fn new(command: &'static str, requires: Slot) -> Self {
        Self { command, requires }
    }
}
