//! End-to-end flow over the real solver backend: JSON body -> request
//! parser -> planner -> MILP optimizer -> outcome.

use gaffer_application::{PlanOutcome, TransferPlanner};
use gaffer_domain::model::PlayerId;
use gaffer_infrastructure::{parse_request, MilpTransferOptimizer};
use serde_json::{json, Value};

/// A valid 15-player squad as JSON records: ids 1..=15, formation 2/5/5/3,
/// three players per team, flat price 5.0, one projected point per gameweek.
fn squad_records() -> Vec<Value> {
    let codes = [1, 1, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 4, 4, 4];
    codes
        .iter()
        .enumerate()
        .map(|(idx, code)| {
            json!({
                "id": idx + 1,
                "position": code,
                "team": idx / 3,
                "price": 5.0,
                "ep_gw1": 1.0,
                "ep_gw2": 1.0,
                "ep_gw3": 1.0,
            })
        })
        .collect()
}

fn plan(body: &Value) -> PlanOutcome {
    let request = parse_request(body).expect("request should parse");
    let optimizer = MilpTransferOptimizer::new();
    let planner = TransferPlanner::new(&optimizer);
    planner.plan(&request).expect("request should be accepted")
}

#[test]
fn a_self_contained_catalog_keeps_the_squad() {
    let body = json!({
        "current_squad": (1..=15).collect::<Vec<u32>>(),
        "all_players": squad_records(),
        "budget": 75.0,
        "max_transfers": 2,
    });

    match plan(&body) {
        PlanOutcome::Optimal(plan) => {
            let mut squad = plan.squad.clone();
            squad.sort_unstable();
            let expected: Vec<PlayerId> = (1..=15).map(PlayerId).collect();
            assert_eq!(squad, expected);
            assert_eq!(plan.total_transfers, 0);
            assert_eq!(plan.point_hit, 0);
        }
        other => panic!("expected an optimal plan, got {other:?}"),
    }
}

#[test]
fn a_strict_upgrade_is_taken_through_the_whole_stack() {
    let mut records = squad_records();
    // Blank midfielder 8, then offer a same-position, same-price upgrade.
    records[7] = json!({
        "id": 8, "position": 3, "team": 2, "price": 5.0,
    });
    records.push(json!({
        "id": 16, "position": 3, "team": 9, "price": 5.0,
        "ep_gw1": 3.0, "ep_gw2": 3.0, "ep_gw3": 3.0,
    }));

    let body = json!({
        "current_squad": (1..=15).collect::<Vec<u32>>(),
        "all_players": records,
        "budget": 75.0,
        "bank": 1.0,
        "free_transfers": 1,
        "max_transfers": 1,
    });

    match plan(&body) {
        PlanOutcome::Optimal(plan) => {
            assert_eq!(plan.transfers_in, vec![PlayerId(16)]);
            assert_eq!(plan.transfers_out, vec![PlayerId(8)]);
            assert_eq!(plan.total_transfers, 1);
            assert_eq!(plan.point_hit, 0);
        }
        other => panic!("expected an optimal plan, got {other:?}"),
    }
}

#[test]
fn an_undersized_catalog_surfaces_as_a_diagnosed_fallback() {
    let records: Vec<Value> = squad_records().into_iter().take(14).collect();
    let body = json!({
        "current_squad": (1..=14).collect::<Vec<u32>>(),
        "all_players": records,
        "budget": 70.0,
    });

    match plan(&body) {
        PlanOutcome::Failed {
            fallback,
            diagnostic,
        } => {
            let expected: Vec<PlayerId> = (1..=14).map(PlayerId).collect();
            assert_eq!(fallback.squad, expected);
            assert!(fallback.transfers_in.is_empty());
            assert!(fallback.transfers_out.is_empty());
            assert_eq!(fallback.expected_points, 0.0);
            assert!(diagnostic.contains("infeasible"));
            assert!(diagnostic.contains("budget 70"));
        }
        other => panic!("expected a fallback outcome, got {other:?}"),
    }
}
