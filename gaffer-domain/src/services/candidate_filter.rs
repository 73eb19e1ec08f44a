use fxhash::FxHashSet;

use crate::model::{Player, PlayerId};

/// Never keep fewer than this many non-owned candidates per position.
const POSITION_KEEP_FLOOR: usize = 30;

/// Candidate pool reduction service.
///
/// Shrinks the full catalog to a pool the integer program can solve quickly
/// without dropping anyone who could plausibly appear in an optimal squad:
/// every currently owned player survives unconditionally (the solver needs
/// their transfer-out variables), and each position keeps its strongest half
/// of the affordable outsiders, with a fixed floor so thin positions retain
/// enough alternatives.
pub struct CandidateFilter;

impl CandidateFilter {
    pub fn reduce(
        &self,
        catalog: &[Player],
        owned: &FxHashSet<PlayerId>,
        budget: f64,
        horizon: usize,
    ) -> Vec<Player> {
        let mut pool: Vec<Player> = catalog
            .iter()
            .filter(|player| owned.contains(&player.id))
            .cloned()
            .collect();

        // Non-owned candidates, grouped by position; anyone priced above the
        // full budget could never be bought even after liquidating the squad.
        let mut by_position: [Vec<(usize, f64)>; 4] = Default::default();
        for (idx, player) in catalog.iter().enumerate() {
            if owned.contains(&player.id) || player.price > budget {
                continue;
            }
            by_position[player.position.index()].push((idx, player.summed_projection(horizon)));
        }

        for group in &mut by_position {
            // Stable sort: candidates with equal projections keep catalog order.
            group.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
            let keep = POSITION_KEEP_FLOOR.max(group.len() / 2);
            for &(idx, _) in group.iter().take(keep) {
                pool.push(catalog[idx].clone());
            }
        }

        tracing::debug!(
            catalog_size = catalog.len(),
            pool_size = pool.len(),
            owned = owned.len(),
            horizon,
            "reduced candidate pool"
        );

        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Position, TeamId};
    use rstest::{fixture, rstest};

    #[fixture]
    fn filter() -> CandidateFilter {
        CandidateFilter
    }

    fn player(id: u32, position: Position, price: f64, per_gameweek: f64) -> Player {
        Player::new(
            PlayerId(id),
            position,
            TeamId(id % 10),
            price,
            None,
            vec![per_gameweek; 3],
        )
    }

    fn owned_set(ids: &[u32]) -> FxHashSet<PlayerId> {
        ids.iter().map(|&id| PlayerId(id)).collect()
    }

    #[rstest]
    fn owned_players_survive_regardless_of_price_and_projection(filter: CandidateFilter) {
        let catalog = vec![
            player(1, Position::Goalkeeper, 99.0, 0.0),
            player(2, Position::Defender, 4.0, 5.0),
        ];
        let pool = filter.reduce(&catalog, &owned_set(&[1]), 10.0, 3);

        assert!(pool.iter().any(|p| p.id == PlayerId(1)));
    }

    #[rstest]
    fn unaffordable_outsiders_are_dropped(filter: CandidateFilter) {
        let catalog = vec![
            player(1, Position::Forward, 15.0, 9.0),
            player(2, Position::Forward, 8.0, 1.0),
        ];
        let pool = filter.reduce(&catalog, &owned_set(&[]), 10.0, 3);

        assert!(!pool.iter().any(|p| p.id == PlayerId(1)));
        assert!(pool.iter().any(|p| p.id == PlayerId(2)));
    }

    #[rstest]
    fn price_exactly_at_budget_is_still_affordable(filter: CandidateFilter) {
        let catalog = vec![player(1, Position::Midfielder, 10.0, 2.0)];
        let pool = filter.reduce(&catalog, &owned_set(&[]), 10.0, 3);

        assert_eq!(pool.len(), 1);
    }

    #[rstest]
    fn keeps_top_half_when_a_position_exceeds_the_floor(filter: CandidateFilter) {
        // 62 defenders with strictly decreasing projections: keep max(30, 31).
        let catalog: Vec<Player> = (0..62)
            .map(|i| player(i, Position::Defender, 5.0, f64::from(100 - i)))
            .collect();
        let pool = filter.reduce(&catalog, &owned_set(&[]), 10.0, 3);

        assert_eq!(pool.len(), 31);
        // The strongest defender is retained, the weakest is not.
        assert!(pool.iter().any(|p| p.id == PlayerId(0)));
        assert!(!pool.iter().any(|p| p.id == PlayerId(61)));
    }

    #[rstest]
    fn keeps_the_whole_group_under_the_floor(filter: CandidateFilter) {
        let catalog: Vec<Player> = (0..20)
            .map(|i| player(i, Position::Goalkeeper, 5.0, 0.0))
            .collect();
        let pool = filter.reduce(&catalog, &owned_set(&[]), 10.0, 3);

        assert_eq!(pool.len(), 20);
    }

    #[rstest]
    fn ties_are_broken_by_catalog_order(filter: CandidateFilter) {
        // 64 equal midfielders: the first 32 in catalog order survive.
        let catalog: Vec<Player> = (0..64)
            .map(|i| player(i, Position::Midfielder, 5.0, 3.0))
            .collect();
        let pool = filter.reduce(&catalog, &owned_set(&[]), 10.0, 3);

        assert_eq!(pool.len(), 32);
        for kept in 0..32 {
            assert!(pool.iter().any(|p| p.id == PlayerId(kept)));
        }
    }

    #[rstest]
    fn empty_catalog_yields_empty_pool(filter: CandidateFilter) {
        let pool = filter.reduce(&[], &owned_set(&[1, 2, 3]), 100.0, 3);
        assert!(pool.is_empty());
    }
}
