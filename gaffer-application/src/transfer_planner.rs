use fxhash::{FxHashMap, FxHashSet};
use gaffer_domain::{
    model::{position_counts, Player, PlayerId},
    CandidateFilter,
};

use crate::{
    error::{OptimizationFailure, RequestError},
    model::{OptimizationRequest, PlanOutcome, TransferPlan},
    ports::{CandidateProblem, TransferOptimizer},
};

/// Orchestrates one optimization request: validate, reduce the catalog,
/// hand the pool to the optimizer, and shape the outcome.
pub struct TransferPlanner<'a> {
    optimizer: &'a dyn TransferOptimizer,
    filter: CandidateFilter,
}

impl<'a> TransferPlanner<'a> {
    pub fn new(optimizer: &'a dyn TransferOptimizer) -> Self {
        Self {
            optimizer,
            filter: CandidateFilter,
        }
    }

    pub fn plan(&self, request: &OptimizationRequest) -> Result<PlanOutcome, RequestError> {
        if request.horizon == 0 {
            return Err(RequestError::ZeroHorizon);
        }

        let by_id: FxHashMap<PlayerId, &Player> = request
            .catalog
            .iter()
            .map(|player| (player.id, player))
            .collect();
        for id in &request.current_squad {
            if !by_id.contains_key(id) {
                return Err(RequestError::UnknownSquadPlayer(*id));
            }
        }

        let owned: FxHashSet<PlayerId> = request.current_squad.iter().copied().collect();
        let horizon = request.capped_horizon();
        let pool = self
            .filter
            .reduce(&request.catalog, &owned, request.budget, horizon);

        let problem = CandidateProblem {
            pool: &pool,
            owned: &owned,
            bank: request.effective_bank(),
            free_transfers: request.free_transfers,
            horizon,
            max_transfers: request.max_transfers,
        };

        match self.optimizer.optimize(&problem) {
            Ok(plan) => Ok(PlanOutcome::Optimal(plan)),
            Err(failure) => {
                let diagnostic = describe_failure(request, &by_id, failure);
                tracing::warn!(
                    failure = %failure,
                    budget = request.budget,
                    pool_size = pool.len(),
                    "optimization did not reach an optimal solution"
                );
                Ok(PlanOutcome::Failed {
                    fallback: TransferPlan::unchanged(&request.current_squad),
                    diagnostic,
                })
            }
        }
    }
}

/// Human-readable triage line for a non-optimal outcome: the status, the
/// supplied budget, and the shape of the current squad, so an operator can
/// spot an underfunded formation or an already-invalid squad at a glance.
fn describe_failure(
    request: &OptimizationRequest,
    by_id: &FxHashMap<PlayerId, &Player>,
    failure: OptimizationFailure,
) -> String {
    let squad_players: Vec<&Player> = request
        .current_squad
        .iter()
        .filter_map(|id| by_id.get(id).copied())
        .collect();
    let squad_value: f64 = squad_players.iter().map(|player| player.price).sum();
    let counts = position_counts(squad_players.iter().copied());

    format!(
        "optimization failed with status {failure}: budget {budget}, squad value {squad_value}, \
         positions GK={gk} DEF={def} MID={mid} FWD={fwd}",
        budget = request.budget,
        gk = counts[0],
        def = counts[1],
        mid = counts[2],
        fwd = counts[3],
    )
}
