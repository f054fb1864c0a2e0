/// Elo rating arithmetic.
///
/// Pure functions, no state, no IO. The session layer decides when to
/// apply them; this module only knows the math.
use crate::constants::RATING_SCALE;

/// Expected score (win probability) for a player against an opponent.
///
/// Logistic curve over the rating gap: 0.5 at equal ratings, approaching
/// 1.0 as the player's advantage grows. Complements are symmetric:
/// `expected_score(a, b) + expected_score(b, a) == 1` up to float error.
pub fn expected_score(rating_self: f64, rating_opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_opponent - rating_self) / RATING_SCALE))
}

/// Apply a decided outcome to the two participants' ratings.
///
/// Actual score is 1 for the winner and 0 for the loser. Each new rating
/// is rounded to the nearest integer (ties away from zero) on every call,
/// matching how ratings are stored. Because rounding happens per update
/// rather than at display time, reversing a comparison with a second call
/// does not always land exactly on the prior values; undo callers accept
/// that drift.
pub fn apply_outcome(rating_winner: i32, rating_loser: i32, k_factor: f64) -> (i32, i32) {
    let expected_winner = expected_score(rating_winner as f64, rating_loser as f64);
    let expected_loser = expected_score(rating_loser as f64, rating_winner as f64);

    let new_winner = rating_winner as f64 + k_factor * (1.0 - expected_winner);
    let new_loser = rating_loser as f64 + k_factor * (0.0 - expected_loser);

    (new_winner.round() as i32, new_loser.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::K_FACTOR;

    #[test]
    fn test_expected_score_equal_ratings() {
        assert!((expected_score(1400.0, 1400.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_expected_score_complements_sum_to_one() {
        for (a, b) in [(1400.0, 1400.0), (1600.0, 1400.0), (900.0, 2100.0), (1412.0, 1389.0)] {
            let sum = expected_score(a, b) + expected_score(b, a);
            assert!((sum - 1.0).abs() < 1e-12, "complements for ({a}, {b}) sum to {sum}");
        }
    }

    #[test]
    fn test_expected_score_favors_higher_rating() {
        let p = expected_score(1600.0, 1400.0);
        assert!(p > 0.5 && p < 1.0);
        // 200 points of gap is 10^0.5 : 1 odds, about 0.76.
        assert!((p - 0.7597).abs() < 1e-3);
    }

    #[test]
    fn test_apply_outcome_equal_ratings() {
        let (winner, loser) = apply_outcome(1400, 1400, K_FACTOR);
        assert_eq!(winner, 1416);
        assert_eq!(loser, 1384);
    }

    #[test]
    fn test_apply_outcome_favorite_wins_small_transfer() {
        let (winner, loser) = apply_outcome(1600, 1400, K_FACTOR);
        assert_eq!(winner, 1608);
        assert_eq!(loser, 1392);
    }

    #[test]
    fn test_apply_outcome_underdog_wins_large_transfer() {
        let (winner, loser) = apply_outcome(1400, 1600, K_FACTOR);
        // The underdog gains what the favorite would have gained plus the
        // rest of the K budget.
        assert!(winner - 1400 > 16);
        assert!(1600 - loser > 16);
    }

    #[test]
    fn test_apply_outcome_change_bounded_by_k() {
        for (w, l) in [(1400, 1400), (2400, 800), (800, 2400), (1500, 1460)] {
            let (new_w, new_l) = apply_outcome(w, l, K_FACTOR);
            assert!((new_w - w).abs() as f64 <= K_FACTOR, "winner delta exceeds K for ({w}, {l})");
            assert!((new_l - l).abs() as f64 <= K_FACTOR, "loser delta exceeds K for ({w}, {l})");
            assert!(new_w >= w, "winner never loses points");
            assert!(new_l <= l, "loser never gains points");
        }
    }
}
