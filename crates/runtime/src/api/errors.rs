//! Unified error types surfaced by the runtime API.
//!
//! Wraps refusals from the combat engine and failures from worker
//! coordination so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The encounter could not be assembled from the supplied rosters.
    #[error(transparent)]
    Session(#[from] combat_core::SessionError),

    /// A turn operation was refused by the combat engine. State is
    /// unchanged; the caller may retry once preconditions hold.
    #[error(transparent)]
    Turn(#[from] combat_core::TurnError),

    #[error("encounter worker command channel closed")]
    CommandChannelClosed,

    #[error("encounter worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("encounter worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}
