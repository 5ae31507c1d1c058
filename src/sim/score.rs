//! Score accrual for cleared obstacles

use super::obstacle::ObstaclePair;

/// Mark every pair the player has fully cleared and return how many were new.
///
/// A pair counts once its trailing edge is left of `player_x`. Each pair is
/// counted at most once over its lifetime.
pub fn score_increment(obstacles: &mut [ObstaclePair], player_x: f32) -> u32 {
    let mut gained = 0;
    for pair in obstacles.iter_mut().filter(|p| !p.passed) {
        if pair.right() < player_x {
            pair.passed = true;
            gained += 1;
        }
    }
    gained
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::ObstacleId;

    fn pair(id: u32, x: f32) -> ObstaclePair {
        ObstaclePair {
            id: ObstacleId(id),
            x,
            width: 50.0,
            gap_center_y: 300.0,
            gap_size: 70.0,
            upper_height: 265.0,
            lower_height: 265.0,
            passed: false,
        }
    }

    #[test]
    fn test_counts_cleared_pair_once() {
        let mut pairs = [pair(1, -45.0)];
        assert_eq!(score_increment(&mut pairs, 10.0), 1);
        assert!(pairs[0].passed);
        assert_eq!(score_increment(&mut pairs, 10.0), 0);
    }

    #[test]
    fn test_trailing_edge_must_be_strictly_behind() {
        let mut pairs = [pair(1, -40.0)];
        assert_eq!(score_increment(&mut pairs, 10.0), 0);
        assert!(!pairs[0].passed);
    }

    #[test]
    fn test_counts_several_when_polled_late() {
        let mut pairs = [pair(1, -200.0), pair(2, -100.0), pair(3, 300.0)];
        assert_eq!(score_increment(&mut pairs, 10.0), 2);
        assert!(!pairs[2].passed);
    }
}
