#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    position_counts, Player, PlayerId, Position, TeamId, UnknownPositionCode, HORIZON_WEIGHTS,
    MAX_HORIZON, MAX_PER_TEAM, POINT_HIT_PENALTY, SQUAD_SIZE,
};
pub use services::CandidateFilter;
