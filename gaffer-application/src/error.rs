use gaffer_domain::model::PlayerId;
use thiserror::Error;

/// Caller errors: rejected before any model is built, never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("current squad references player {0}, which is not in the catalog")]
    UnknownSquadPlayer(PlayerId),
    #[error("horizon must be at least 1")]
    ZeroHorizon,
}

/// Non-optimal solver outcome. Not an exception at the operation boundary:
/// the planner folds it into a fallback plan with a diagnostic instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OptimizationFailure {
    #[error("infeasible")]
    Infeasible,
    #[error("unbounded")]
    Unbounded,
    #[error("timed out")]
    TimedOut,
    #[error("undefined")]
    Undefined,
}
