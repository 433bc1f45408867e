/// Salary of the rank-1 contestant
pub const MAX_COST: u64 = 150_000;
/// Salary floor, reached at rank 15
pub const MIN_COST: u64 = 10_000;
const COST_STEP: u64 = 10_000;

/// Salary of the contestant at 1-based `rank` in a roster of `roster_size`.
///
/// Each rank below first costs $10,000 less, floored at $10,000.
/// Returns `None` when the rank does not exist in the roster.
pub fn contestant_cost(rank: usize, roster_size: usize) -> Option<u64> {
    if rank == 0 || rank > roster_size {
        return None;
    }
    let discount = (rank as u64 - 1).saturating_mul(COST_STEP);
    Some(MAX_COST.saturating_sub(discount).max(MIN_COST))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_rank_is_max_cost() {
        assert_eq!(contestant_cost(1, 15), Some(150_000));
    }

    #[test]
    fn test_linear_steps() {
        assert_eq!(contestant_cost(2, 15), Some(140_000));
        assert_eq!(contestant_cost(10, 15), Some(60_000));
        assert_eq!(contestant_cost(15, 15), Some(10_000));
    }

    #[test]
    fn test_small_roster_keeps_step() {
        assert_eq!(contestant_cost(2, 2), Some(140_000));
    }

    #[test]
    fn test_floor_beyond_rank_15() {
        assert_eq!(contestant_cost(16, 20), Some(MIN_COST));
        assert_eq!(contestant_cost(20, 20), Some(MIN_COST));
    }

    #[test]
    fn test_out_of_range_rank() {
        assert_eq!(contestant_cost(0, 15), None);
        assert_eq!(contestant_cost(16, 15), None);
        assert_eq!(contestant_cost(1, 0), None);
    }
}
