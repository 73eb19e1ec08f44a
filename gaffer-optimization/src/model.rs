use std::fmt;

use fxhash::FxHashSet;
use gaffer_domain::model::{Player, PlayerId};

/// Inputs to one solve, already reduced to a candidate pool.
#[derive(Debug, Clone, Copy)]
pub struct SquadProblem<'a> {
    pub candidates: &'a [Player],
    pub owned: &'a FxHashSet<PlayerId>,
    /// Cash available for net spend; selling prices count towards it.
    pub bank: f64,
    pub free_transfers: u32,
    pub horizon: usize,
    pub max_transfers: u32,
}

/// Id-level result of an optimal solve. Callers join these back onto full
/// player records themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct SquadSelection {
    pub squad: Vec<PlayerId>,
    pub transfers_in: Vec<PlayerId>,
    pub transfers_out: Vec<PlayerId>,
    pub total_transfers: u32,
    pub point_hit: u32,
    pub expected_points: f64,
}

/// Normalized non-optimal solver outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Infeasible,
    Unbounded,
    TimedOut,
    Undefined,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::TimedOut => "timed out",
            SolveStatus::Undefined => "undefined",
        };
        f.write_str(label)
    }
}
