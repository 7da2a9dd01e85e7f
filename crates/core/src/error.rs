use thiserror::Error;

use crate::types::GameStatus;

/// Out-of-contract calls into the engine or the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// `tick` was invoked on a state that is not `Running`.
    #[error("tick requires a running session (status: {})", .status.as_str())]
    NotRunning { status: GameStatus },

    /// A lifecycle command was issued from a status that does not allow it.
    #[error("cannot {action} a session that is {}", .from.as_str())]
    InvalidTransition {
        action: &'static str,
        from: GameStatus,
    },
}
