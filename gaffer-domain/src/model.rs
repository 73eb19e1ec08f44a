use std::fmt;

use thiserror::Error;

/// A valid squad always holds exactly this many players.
pub const SQUAD_SIZE: usize = 15;

/// At most this many players may come from any single team.
pub const MAX_PER_TEAM: u32 = 3;

/// Points forfeited for every transfer beyond the free allowance.
/// Must stay strictly positive: the solver relies on the negative objective
/// term to drive the hit count to its minimal feasible value.
pub const POINT_HIT_PENALTY: u32 = 4;

/// Projections further out than this are never fed to the solver.
pub const MAX_HORIZON: usize = 8;

/// Per-gameweek discount applied to projected points, front gameweek first.
/// Later gameweeks carry less weight because projections grow less reliable.
pub const HORIZON_WEIGHTS: [f64; MAX_HORIZON] = [1.0, 0.85, 0.70, 0.55, 0.40, 0.30, 0.20, 0.15];

const FALLBACK_WEIGHT: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown position code {0}")]
pub struct UnknownPositionCode(pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    /// Wire codes run 1..=4 in catalog order GK, DEF, MID, FWD.
    pub fn from_code(code: u8) -> Result<Self, UnknownPositionCode> {
        match code {
            1 => Ok(Position::Goalkeeper),
            2 => Ok(Position::Defender),
            3 => Ok(Position::Midfielder),
            4 => Ok(Position::Forward),
            other => Err(UnknownPositionCode(other)),
        }
    }

    pub fn code(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn index(self) -> usize {
        match self {
            Position::Goalkeeper => 0,
            Position::Defender => 1,
            Position::Midfielder => 2,
            Position::Forward => 3,
        }
    }

    /// Formation requirement: a squad selects exactly this many per position.
    pub fn required_count(self) -> u32 {
        match self {
            Position::Goalkeeper => 2,
            Position::Defender => 5,
            Position::Midfielder => 5,
            Position::Forward => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable catalog entry. Projections are sparse: a missing gameweek
/// entry means zero projected points for that gameweek.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub position: Position,
    pub team: TeamId,
    pub price: f64,
    pub selling_price: Option<f64>,
    projected: Vec<f64>,
}

impl Player {
    pub fn new(
        id: PlayerId,
        position: Position,
        team: TeamId,
        price: f64,
        selling_price: Option<f64>,
        projected: Vec<f64>,
    ) -> Self {
        Self {
            id,
            position,
            team,
            price,
            selling_price,
            projected,
        }
    }

    /// Price the owner can liquidate this player for. Falls back to the
    /// purchase price when no separate selling price applies.
    pub fn sale_value(&self) -> f64 {
        self.selling_price.unwrap_or(self.price)
    }

    /// Projected points for a 1-based future gameweek, zero when absent.
    pub fn projected_points(&self, gameweek: usize) -> f64 {
        gameweek
            .checked_sub(1)
            .and_then(|idx| self.projected.get(idx))
            .copied()
            .unwrap_or(0.0)
    }

    /// Plain sum of projections over the first `min(horizon, MAX_HORIZON)`
    /// gameweeks. Used for candidate ranking, not for the objective.
    pub fn summed_projection(&self, horizon: usize) -> f64 {
        (1..=horizon.min(MAX_HORIZON))
            .map(|gameweek| self.projected_points(gameweek))
            .sum()
    }

    /// Discounted projection sum over the same truncated horizon; this is
    /// the per-player coefficient of the solver objective.
    pub fn weighted_projection(&self, horizon: usize) -> f64 {
        (1..=horizon.min(MAX_HORIZON))
            .map(|gameweek| self.projected_points(gameweek) * horizon_weight(gameweek))
            .sum()
    }
}

/// Discount weight for a 1-based gameweek. Gameweeks past the table but
/// still inside the horizon get a flat residual weight.
pub fn horizon_weight(gameweek: usize) -> f64 {
    gameweek
        .checked_sub(1)
        .and_then(|idx| HORIZON_WEIGHTS.get(idx))
        .copied()
        .unwrap_or(FALLBACK_WEIGHT)
}

/// Per-position head count in `Position::ALL` order, for diagnostics.
pub fn position_counts<'a>(players: impl IntoIterator<Item = &'a Player>) -> [u32; 4] {
    let mut counts = [0u32; 4];
    for player in players {
        counts[player.position.index()] += 1;
    }
    counts
}
