use gaffer_domain::model::{Player, PlayerId, MAX_HORIZON};

/// One squad optimization request. Built fresh per call, discarded after
/// the response is produced; nothing is shared across requests.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationRequest {
    /// Ordered list of currently owned player ids; each must resolve in the
    /// catalog.
    pub current_squad: Vec<PlayerId>,
    pub catalog: Vec<Player>,
    /// Total budget ceiling (squad value plus cash).
    pub budget: f64,
    /// Cash available for net spend; defaults to the budget when absent.
    pub bank: Option<f64>,
    pub free_transfers: u32,
    pub horizon: usize,
    pub max_transfers: u32,
}

impl OptimizationRequest {
    pub fn effective_bank(&self) -> f64 {
        self.bank.unwrap_or(self.budget)
    }

    pub fn capped_horizon(&self) -> usize {
        self.horizon.min(MAX_HORIZON)
    }
}

/// The transfer plan handed back across the operation boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPlan {
    pub squad: Vec<PlayerId>,
    pub transfers_in: Vec<PlayerId>,
    pub transfers_out: Vec<PlayerId>,
    pub total_transfers: u32,
    pub point_hit: u32,
    pub expected_points: f64,
}

impl TransferPlan {
    /// The do-nothing plan around an unchanged squad, used when the solver
    /// reports a non-optimal status.
    pub fn unchanged(current_squad: &[PlayerId]) -> Self {
        Self {
            squad: current_squad.to_vec(),
            transfers_in: Vec::new(),
            transfers_out: Vec::new(),
            total_transfers: 0,
            point_hit: 0,
            expected_points: 0.0,
        }
    }
}

/// Result of planning: either an optimal plan or the structured failure
/// payload built around the unchanged current squad.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    Optimal(TransferPlan),
    Failed {
        fallback: TransferPlan,
        diagnostic: String,
    },
}
