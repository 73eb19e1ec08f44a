#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod ports;
pub mod transfer_planner;

pub use error::{OptimizationFailure, RequestError};
pub use model::{OptimizationRequest, PlanOutcome, TransferPlan};
pub use ports::{CandidateProblem, TransferOptimizer};
pub use transfer_planner::TransferPlanner;
