use thiserror::Error;

/// The failure taxonomy of the engine. Everything here is a programmer
/// error at the call site; ordinary gameplay impossibilities (a blocked
/// rotation, a hold while `can_hold` is down) are silent no-ops instead.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("cannot act when dead")]
    GameOver,

    #[error("hold is not available for this placement")]
    HoldRefused,

    #[error("invalid command `{0}`")]
    InvalidCommand(String),

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}
