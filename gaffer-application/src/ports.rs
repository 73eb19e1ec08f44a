use fxhash::FxHashSet;
use gaffer_domain::model::{Player, PlayerId};

use crate::{error::OptimizationFailure, model::TransferPlan};

/// A reduced, solver-ready problem: the candidate pool plus the request
/// parameters the model needs.
#[derive(Debug, Clone, Copy)]
pub struct CandidateProblem<'a> {
    pub pool: &'a [Player],
    pub owned: &'a FxHashSet<PlayerId>,
    pub bank: f64,
    pub free_transfers: u32,
    pub horizon: usize,
    pub max_transfers: u32,
}

/// The integer-programming collaborator behind the planner.
pub trait TransferOptimizer: Send + Sync {
    fn optimize(&self, problem: &CandidateProblem<'_>)
        -> Result<TransferPlan, OptimizationFailure>;
}
