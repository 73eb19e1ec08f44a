#![warn(clippy::uninlined_format_args)]

use std::collections::HashMap;
use std::io::{self, Read};
use std::process;

use gaffer_application::{PlanOutcome, TransferPlan, TransferPlanner};
use gaffer_domain::model::PlayerId;
use gaffer_infrastructure::{parse_request, MilpTransferOptimizer};
use serde_json::{json, Value};

type CliResult<T> = Result<T, String>;

fn main() {
    tracing_subscriber::fmt::init();

    if let Err(message) = run() {
        // Errors still produce a JSON body so transport callers never have
        // to parse free-form text.
        println!("{}", json!({ "error": message }));
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let mut body = String::new();
    io::stdin()
        .read_to_string(&mut body)
        .map_err(|err| format!("failed to read request body: {err}"))?;

    // A no-body probe gets the static operation descriptor.
    if body.trim().is_empty() {
        println!("{}", render(&operation_descriptor()));
        return Ok(());
    }

    let value: Value =
        serde_json::from_str(&body).map_err(|err| format!("invalid JSON input: {err}"))?;
    let request = parse_request(&value).map_err(|err| err.to_string())?;

    let optimizer = MilpTransferOptimizer::new();
    let planner = TransferPlanner::new(&optimizer);
    let outcome = planner.plan(&request).map_err(|err| err.to_string())?;

    let records = records_by_id(&value);
    println!("{}", render(&outcome_to_json(&outcome, &records)));
    Ok(())
}

fn render(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn operation_descriptor() -> Value {
    json!({
        "operation": "optimize",
        "method": "POST",
        "required": ["current_squad", "all_players", "budget"],
        "optional": ["bank", "free_transfers", "horizon", "max_transfers"],
    })
}

/// Index the raw catalog records so transfer lists can echo the caller's
/// own player objects back, not just ids.
fn records_by_id(body: &Value) -> HashMap<PlayerId, Value> {
    let mut records = HashMap::new();
    if let Some(catalog) = body.get("all_players").and_then(Value::as_array) {
        for record in catalog {
            if let Some(id) = record
                .get("id")
                .and_then(Value::as_u64)
                .and_then(|id| u32::try_from(id).ok())
            {
                records.insert(PlayerId(id), record.clone());
            }
        }
    }
    records
}

fn outcome_to_json(outcome: &PlanOutcome, records: &HashMap<PlayerId, Value>) -> Value {
    match outcome {
        PlanOutcome::Optimal(plan) => plan_to_json(plan, records),
        PlanOutcome::Failed {
            fallback,
            diagnostic,
        } => {
            let mut payload = plan_to_json(fallback, records);
            payload["error"] = Value::from(diagnostic.as_str());
            payload
        }
    }
}

fn plan_to_json(plan: &TransferPlan, records: &HashMap<PlayerId, Value>) -> Value {
    let full_records = |ids: &[PlayerId]| -> Vec<Value> {
        ids.iter()
            .filter_map(|id| records.get(id).cloned())
            .collect()
    };

    json!({
        "squad": plan.squad.iter().map(|id| id.0).collect::<Vec<u32>>(),
        "transfers_in": full_records(&plan.transfers_in),
        "transfers_out": full_records(&plan.transfers_out),
        "total_transfers": plan.total_transfers,
        "point_hit": plan.point_hit,
        "expected_points": plan.expected_points,
    })
}
