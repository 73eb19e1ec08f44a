use gaffer_application::OptimizationRequest;
use gaffer_domain::model::{Player, PlayerId, Position, TeamId, MAX_HORIZON};
use serde_json::Value;
use thiserror::Error;

const DEFAULT_FREE_TRANSFERS: u32 = 1;
const DEFAULT_HORIZON: usize = 3;
const DEFAULT_MAX_TRANSFERS: u32 = 2;

/// Caller errors raised while decoding a request body, before any model
/// work happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestParseError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` has the wrong type")]
    InvalidField(&'static str),
    #[error("player record {index} is missing `{field}`")]
    MissingPlayerField { index: usize, field: &'static str },
    #[error("player record {index} has an ill-typed `{field}`")]
    InvalidPlayerField { index: usize, field: &'static str },
    #[error("player {id}: unknown position code {code}")]
    UnknownPosition { id: u32, code: u64 },
}

/// Decode a JSON request body into the application request. `current_squad`,
/// `all_players`, and `budget` are required; the remaining parameters take
/// their documented defaults.
pub fn parse_request(body: &Value) -> Result<OptimizationRequest, RequestParseError> {
    let current_squad = required(body, "current_squad")?
        .as_array()
        .ok_or(RequestParseError::InvalidField("current_squad"))?
        .iter()
        .map(|entry| {
            entry
                .as_u64()
                .and_then(|id| u32::try_from(id).ok())
                .map(PlayerId)
                .ok_or(RequestParseError::InvalidField("current_squad"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let records = required(body, "all_players")?
        .as_array()
        .ok_or(RequestParseError::InvalidField("all_players"))?;
    let catalog = records
        .iter()
        .enumerate()
        .map(|(index, record)| parse_player(index, record))
        .collect::<Result<Vec<_>, _>>()?;

    let budget = required(body, "budget")?
        .as_f64()
        .ok_or(RequestParseError::InvalidField("budget"))?;

    let bank = match body.get("bank") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            value
                .as_f64()
                .ok_or(RequestParseError::InvalidField("bank"))?,
        ),
    };

    let free_transfers = optional_count(body, "free_transfers")?
        .map_or(DEFAULT_FREE_TRANSFERS, |count| count as u32);
    let horizon =
        optional_count(body, "horizon")?.map_or(DEFAULT_HORIZON, |count| count as usize);
    let max_transfers = optional_count(body, "max_transfers")?
        .map_or(DEFAULT_MAX_TRANSFERS, |count| count as u32);

    Ok(OptimizationRequest {
        current_squad,
        catalog,
        budget,
        bank,
        free_transfers,
        horizon,
        max_transfers,
    })
}

fn required<'a>(body: &'a Value, field: &'static str) -> Result<&'a Value, RequestParseError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(RequestParseError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn optional_count(body: &Value, field: &'static str) -> Result<Option<u64>, RequestParseError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .filter(|&count| count <= u64::from(u32::MAX))
            .map(Some)
            .ok_or(RequestParseError::InvalidField(field)),
    }
}

fn parse_player(index: usize, record: &Value) -> Result<Player, RequestParseError> {
    let id = record
        .get("id")
        .ok_or(RequestParseError::MissingPlayerField { index, field: "id" })?
        .as_u64()
        .and_then(|id| u32::try_from(id).ok())
        .ok_or(RequestParseError::InvalidPlayerField { index, field: "id" })?;

    let code = record
        .get("position")
        .ok_or(RequestParseError::MissingPlayerField {
            index,
            field: "position",
        })?
        .as_u64()
        .ok_or(RequestParseError::InvalidPlayerField {
            index,
            field: "position",
        })?;
    let position = u8::try_from(code)
        .ok()
        .and_then(|code| Position::from_code(code).ok())
        .ok_or(RequestParseError::UnknownPosition { id, code })?;

    let team = record
        .get("team")
        .ok_or(RequestParseError::MissingPlayerField {
            index,
            field: "team",
        })?
        .as_u64()
        .and_then(|team| u32::try_from(team).ok())
        .map(TeamId)
        .ok_or(RequestParseError::InvalidPlayerField {
            index,
            field: "team",
        })?;

    let price = record
        .get("price")
        .ok_or(RequestParseError::MissingPlayerField {
            index,
            field: "price",
        })?
        .as_f64()
        .ok_or(RequestParseError::InvalidPlayerField {
            index,
            field: "price",
        })?;

    let selling_price = match record.get("selling_price") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            value
                .as_f64()
                .ok_or(RequestParseError::InvalidPlayerField {
                    index,
                    field: "selling_price",
                })?,
        ),
    };

    // Sparse projections arrive as ep_gw1..ep_gw8; absent or null entries
    // mean zero projected points for that gameweek.
    let mut projected = vec![0.0; MAX_HORIZON];
    for (offset, slot) in projected.iter_mut().enumerate() {
        let key = format!("ep_gw{}", offset + 1);
        if let Some(value) = record.get(&key) {
            if !value.is_null() {
                *slot = value
                    .as_f64()
                    .ok_or(RequestParseError::InvalidPlayerField {
                        index,
                        field: "ep_gw",
                    })?;
            }
        }
    }

    Ok(Player::new(
        PlayerId(id),
        position,
        team,
        price,
        selling_price,
        projected,
    ))
}
