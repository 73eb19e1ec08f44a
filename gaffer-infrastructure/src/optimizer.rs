use gaffer_application::{
    CandidateProblem, OptimizationFailure, TransferOptimizer, TransferPlan,
};
use gaffer_optimization::{
    optimize_transfers, OptimizeError, SolveStatus, SolverBackend, SquadProblem,
};

/// MILP-backed implementation of the planner's optimizer port. The backend
/// is picked once at construction, never per call.
pub struct MilpTransferOptimizer {
    backend: SolverBackend,
}

impl MilpTransferOptimizer {
    pub fn new() -> Self {
        let backend = SolverBackend::select();
        tracing::debug!(backend = backend.name(), "selected solver backend");
        Self { backend }
    }
}

impl Default for MilpTransferOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

fn map_status(status: SolveStatus) -> OptimizationFailure {
    match status {
        SolveStatus::Infeasible => OptimizationFailure::Infeasible,
        SolveStatus::Unbounded => OptimizationFailure::Unbounded,
        SolveStatus::TimedOut => OptimizationFailure::TimedOut,
        SolveStatus::Undefined => OptimizationFailure::Undefined,
    }
}

impl TransferOptimizer for MilpTransferOptimizer {
    fn optimize(
        &self,
        problem: &CandidateProblem<'_>,
    ) -> Result<TransferPlan, OptimizationFailure> {
        let squad_problem = SquadProblem {
            candidates: problem.pool,
            owned: problem.owned,
            bank: problem.bank,
            free_transfers: problem.free_transfers,
            horizon: problem.horizon,
            max_transfers: problem.max_transfers,
        };

        match optimize_transfers(&squad_problem, self.backend) {
            Ok(selection) => Ok(TransferPlan {
                squad: selection.squad,
                transfers_in: selection.transfers_in,
                transfers_out: selection.transfers_out,
                total_transfers: selection.total_transfers,
                point_hit: selection.point_hit,
                expected_points: selection.expected_points,
            }),
            Err(OptimizeError::NotOptimal(status)) => Err(map_status(status)),
        }
    }
}
