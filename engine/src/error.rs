use thiserror::Error;

/// Failure modes the engine can return. Ordinary rule violations are never
/// panics: every public entry point returns one of these and leaves the
/// `GameState` unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("no game or player matching {0}")]
    NotFound(String),

    #[error("illegal state: {0}")]
    IllegalState(String),

    #[error("illegal action: {0}")]
    IllegalAction(String),

    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("precondition not met: {0}")]
    PrecondUnmet(String),

    /// An internal invariant (pot nesting, chip conservation, ...) broke.
    /// Fatal for the hand; the caller logs `action_history` before this is
    /// ever constructed (spec §7).
    #[error("internal invariant breach: {0}")]
    Internal(String),
}

pub type GameResult<T> = Result<T, GameError>;
