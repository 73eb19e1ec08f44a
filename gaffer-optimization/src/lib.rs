#![warn(clippy::uninlined_format_args)]

mod backend;
mod model;

use gaffer_domain::model::{Position, MAX_PER_TEAM, POINT_HIT_PENALTY, SQUAD_SIZE};
use good_lp::{
    variable, variables, Constraint, Expression, ProblemVariables, ResolutionError, Solution,
    SolutionStatus, SolverModel, Variable, WithTimeLimit,
};
use thiserror::Error;

pub use backend::SolverBackend;
pub use model::{SolveStatus, SquadProblem, SquadSelection};

/// Hard ceiling on one solve; reaching it surfaces as `TimedOut`.
const SOLVE_TIME_LIMIT_SECONDS: f64 = 30.0;

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("solver finished with non-optimal status: {0}")]
    NotOptimal(SolveStatus),
}

/// Build the transfer MILP over a reduced candidate pool, solve it, and
/// read the assignment back into a transfer plan.
///
/// Transfer variables are sparse on purpose: an in-variable exists only for
/// candidates not currently owned and an out-variable only for owned ones,
/// which roughly halves the binary variable count against a naive layout.
pub fn optimize_transfers(
    problem: &SquadProblem<'_>,
    backend: SolverBackend,
) -> Result<SquadSelection, OptimizeError> {
    let mut vars = variables!();

    let select: Vec<Variable> = problem
        .candidates
        .iter()
        .map(|_| vars.add(variable().binary()))
        .collect();
    let transfer_in: Vec<Option<Variable>> = problem
        .candidates
        .iter()
        .map(|candidate| {
            (!problem.owned.contains(&candidate.id)).then(|| vars.add(variable().binary()))
        })
        .collect();
    let transfer_out: Vec<Option<Variable>> = problem
        .candidates
        .iter()
        .map(|candidate| {
            problem
                .owned
                .contains(&candidate.id)
                .then(|| vars.add(variable().binary()))
        })
        .collect();
    let transfer_count = vars.add(variable().integer().min(0.0));
    let hits = vars.add(variable().integer().min(0.0));

    let weighted: Vec<f64> = problem
        .candidates
        .iter()
        .map(|candidate| candidate.weighted_projection(problem.horizon))
        .collect();

    // Maximize discounted projected points net of the point-hit penalty.
    // The penalty coefficient is strictly negative, so together with the
    // lower bound below the solver drives `hits` to its minimum at optimum.
    let mut objective = Expression::with_capacity(select.len() + 1);
    for (var, weight) in select.iter().zip(&weighted) {
        objective.add_mul(*weight, *var);
    }
    objective.add_mul(-f64::from(POINT_HIT_PENALTY), hits);

    let mut constraints: Vec<Constraint> = Vec::new();

    // 1. Exactly a full squad is selected.
    let mut squad_size = Expression::with_capacity(select.len());
    for var in &select {
        squad_size.add_mul(1.0, *var);
    }
    constraints.push(squad_size.eq(SQUAD_SIZE as f64));

    // 2. Formation: selected count per position equals the requirement.
    for position in Position::ALL {
        let mut expr = Expression::default();
        for (candidate, var) in problem.candidates.iter().zip(&select) {
            if candidate.position == position {
                expr.add_mul(1.0, *var);
            }
        }
        constraints.push(expr.eq(f64::from(position.required_count())));
    }

    // 3. Net spend: purchases at price, sales at selling price, bounded by
    // the bank.
    let mut net_spend = Expression::default();
    for (candidate, var) in problem.candidates.iter().zip(&transfer_in) {
        if let Some(var) = var {
            net_spend.add_mul(candidate.price, *var);
        }
    }
    for (candidate, var) in problem.candidates.iter().zip(&transfer_out) {
        if let Some(var) = var {
            net_spend.add_mul(-candidate.sale_value(), *var);
        }
    }
    constraints.push(net_spend.leq(problem.bank));

    // 4. Per-team cap.
    let mut teams: Vec<_> = problem.candidates.iter().map(|c| c.team).collect();
    teams.sort_unstable();
    teams.dedup();
    for team in teams {
        let mut expr = Expression::default();
        for (candidate, var) in problem.candidates.iter().zip(&select) {
            if candidate.team == team {
                expr.add_mul(1.0, *var);
            }
        }
        constraints.push(expr.leq(f64::from(MAX_PER_TEAM)));
    }

    // 5. Transfer linkage, two-sided on each side's sparse variable:
    // owned candidates leave exactly when deselected, outsiders enter
    // exactly when selected.
    for (idx, select_var) in select.iter().enumerate() {
        if let Some(out_var) = transfer_out[idx] {
            let mut expr = Expression::default();
            expr.add_mul(1.0, out_var);
            expr.add_mul(1.0, *select_var);
            constraints.push(expr.clone().geq(1.0));
            constraints.push(expr.leq(1.0));
        }
        if let Some(in_var) = transfer_in[idx] {
            let mut expr = Expression::default();
            expr.add_mul(1.0, in_var);
            expr.add_mul(-1.0, *select_var);
            constraints.push(expr.clone().geq(0.0));
            constraints.push(expr.leq(0.0));
        }
    }

    // 6. Every transfer is a swap: squad size is conserved.
    let mut balance = Expression::default();
    for var in transfer_in.iter().flatten() {
        balance.add_mul(1.0, *var);
    }
    for var in transfer_out.iter().flatten() {
        balance.add_mul(-1.0, *var);
    }
    constraints.push(balance.eq(0.0));

    // 7. Transfer count definition.
    let mut count_def = Expression::default();
    count_def.add_mul(1.0, transfer_count);
    for var in transfer_in.iter().flatten() {
        count_def.add_mul(-1.0, *var);
    }
    constraints.push(count_def.eq(0.0));

    // 8. Transfer cap.
    let mut count_cap = Expression::default();
    count_cap.add_mul(1.0, transfer_count);
    constraints.push(count_cap.leq(f64::from(problem.max_transfers)));

    // 9. hits >= transfer_count - free_transfers; hits >= 0 from its domain.
    let mut hits_bound = Expression::default();
    hits_bound.add_mul(1.0, hits);
    hits_bound.add_mul(-1.0, transfer_count);
    constraints.push(hits_bound.geq(-f64::from(problem.free_transfers)));

    let layout = VariableLayout {
        select,
        transfer_in,
        transfer_out,
        transfer_count,
        hits,
    };

    let assignment = solve_model(vars, objective, constraints, &layout, backend).map_err(
        |status| {
            tracing::warn!(
                status = %status,
                backend = backend.name(),
                candidates = problem.candidates.len(),
                "solver returned a non-optimal status"
            );
            OptimizeError::NotOptimal(status)
        },
    )?;

    Ok(extract_selection(problem, &weighted, &assignment))
}

struct VariableLayout {
    select: Vec<Variable>,
    transfer_in: Vec<Option<Variable>>,
    transfer_out: Vec<Option<Variable>>,
    transfer_count: Variable,
    hits: Variable,
}

struct Assignment {
    select: Vec<f64>,
    transfer_in: Vec<Option<f64>>,
    transfer_out: Vec<Option<f64>>,
    transfer_count: f64,
    hits: f64,
}

fn solve_model(
    vars: ProblemVariables,
    objective: Expression,
    constraints: Vec<Constraint>,
    layout: &VariableLayout,
    backend: SolverBackend,
) -> Result<Assignment, SolveStatus> {
    match backend {
        #[cfg(feature = "highs")]
        SolverBackend::Highs => {
            let mut model = vars
                .maximise(objective)
                .using(good_lp::solvers::highs::highs)
                .with_time_limit(SOLVE_TIME_LIMIT_SECONDS);
            for constraint in constraints {
                model = model.with(constraint);
            }
            match model.solve() {
                Ok(solution) => finish_solve(&solution, layout),
                Err(err) => Err(normalize_status(err)),
            }
        }
        #[cfg(feature = "coin_cbc")]
        SolverBackend::CoinCbc => {
            let mut model = vars
                .maximise(objective)
                .using(good_lp::solvers::coin_cbc::coin_cbc)
                .with_time_limit(SOLVE_TIME_LIMIT_SECONDS);
            model.set_parameter("log", "0");
            for constraint in constraints {
                model = model.with(constraint);
            }
            match model.solve() {
                Ok(solution) => finish_solve(&solution, layout),
                Err(err) => Err(normalize_status(err)),
            }
        }
    }
}

/// A successful solve is only accepted as optimal if the backend says so:
/// hitting the time limit with a feasible incumbent still comes back as
/// `Ok`, and that incumbent must not be passed off as an optimal plan.
fn finish_solve<S: Solution>(
    solution: &S,
    layout: &VariableLayout,
) -> Result<Assignment, SolveStatus> {
    accept_status(solution.status())?;
    Ok(read_assignment(solution, layout))
}

fn accept_status(status: SolutionStatus) -> Result<(), SolveStatus> {
    match status {
        SolutionStatus::TimeLimit => Err(SolveStatus::TimedOut),
        _ => Ok(()),
    }
}

fn read_assignment<S: Solution>(solution: &S, layout: &VariableLayout) -> Assignment {
    Assignment {
        select: layout
            .select
            .iter()
            .map(|var| solution.value(*var))
            .collect(),
        transfer_in: layout
            .transfer_in
            .iter()
            .map(|var| var.map(|var| solution.value(var)))
            .collect(),
        transfer_out: layout
            .transfer_out
            .iter()
            .map(|var| var.map(|var| solution.value(var)))
            .collect(),
        transfer_count: solution.value(layout.transfer_count),
        hits: solution.value(layout.hits),
    }
}

fn normalize_status(err: ResolutionError) -> SolveStatus {
    match err {
        ResolutionError::Infeasible => SolveStatus::Infeasible,
        ResolutionError::Unbounded => SolveStatus::Unbounded,
        ResolutionError::Other(message) => classify_message(message),
        ResolutionError::Str(message) => classify_message(&message),
    }
}

// The time limit is the only stop criterion configured on either backend,
// so a run reported as stopped without an incumbent is a timeout.
fn classify_message(message: &str) -> SolveStatus {
    let message = message.to_ascii_lowercase();
    if message.contains("time") || message.contains("stop") || message.contains("nosolutionfound")
    {
        SolveStatus::TimedOut
    } else {
        SolveStatus::Undefined
    }
}

fn extract_selection(
    problem: &SquadProblem<'_>,
    weighted: &[f64],
    assignment: &Assignment,
) -> SquadSelection {
    // Binary readout above 0.5 compensates for solver floating-point slack.
    let mut squad = Vec::with_capacity(SQUAD_SIZE);
    let mut gross_points = 0.0;
    for ((candidate, value), weight) in problem
        .candidates
        .iter()
        .zip(&assignment.select)
        .zip(weighted)
    {
        if *value > 0.5 {
            squad.push(candidate.id);
            gross_points += *weight;
        }
    }

    let transfers_in: Vec<_> = problem
        .candidates
        .iter()
        .zip(&assignment.transfer_in)
        .filter(|(_, value)| matches!(value, Some(v) if *v > 0.5))
        .map(|(candidate, _)| candidate.id)
        .collect();
    let transfers_out: Vec<_> = problem
        .candidates
        .iter()
        .zip(&assignment.transfer_out)
        .filter(|(_, value)| matches!(value, Some(v) if *v > 0.5))
        .map(|(candidate, _)| candidate.id)
        .collect();

    let total_transfers = assignment.transfer_count.round() as u32;
    let point_hit = assignment.hits.round() as u32 * POINT_HIT_PENALTY;
    let expected_points = round_half_cent(gross_points - f64::from(point_hit));

    SquadSelection {
        squad,
        transfers_in,
        transfers_out,
        total_transfers,
        point_hit,
        expected_points,
    }
}

/// Two-decimal presentation rounding for net expected points.
fn round_half_cent(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
