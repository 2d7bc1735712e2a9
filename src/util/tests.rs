//! Unit tests for numeric helpers

use super::*;

#[test]
fn test_round2() {
    assert_eq!(round2(12.3456), 12.35);
    assert_eq!(round2(-1.005_1), -1.01);
    assert_eq!(round2(18.0), 18.0);
}

#[test]
fn test_mean_and_variance() {
    let values = [10.0, 12.0, 11.0, 13.0, 9.0];
    assert_eq!(mean(&values), 11.0);
    assert_eq!(population_variance(&values), 2.0);
    assert_eq!(mean(&[]), 0.0);
    assert_eq!(population_variance(&[]), 0.0);
}

#[test]
fn test_consistency_score_low_variance_is_high() {
    let score = consistency_score(&[10.0, 12.0, 11.0, 13.0, 9.0]);
    assert!(score > 80.0, "expected > 80, got {score}");
    assert!(score <= 100.0);
}

#[test]
fn test_consistency_score_high_variance_is_low() {
    let score = consistency_score(&[2.0, 30.0, 5.0, 28.0, 3.0]);
    assert!(score < 30.0, "expected < 30, got {score}");
    assert!(score >= 0.0);
}

#[test]
fn test_consistency_score_is_clamped_at_zero() {
    // std dev far above the mean would push the raw score negative
    assert_eq!(consistency_score(&[0.0, 0.0, 0.0, 0.0, 50.0]), 0.0);
    assert_eq!(consistency_score(&[0.0, 0.0]), 0.0);
    assert_eq!(consistency_score(&[-2.0, -4.0]), 0.0);
}

#[test]
fn test_nearest_rank_does_not_interpolate() {
    let sorted = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    assert_eq!(nearest_rank(&sorted, 0.9), 10.0);
    assert_eq!(nearest_rank(&sorted, 0.1), 2.0);

    let five = [2.0, 3.0, 5.0, 28.0, 30.0];
    // floor(5 * 0.9) = 4, floor(5 * 0.1) = 0
    assert_eq!(nearest_rank(&five, 0.9), 30.0);
    assert_eq!(nearest_rank(&five, 0.1), 2.0);

    assert_eq!(nearest_rank(&[7.5], 0.9), 7.5);
    assert_eq!(nearest_rank(&[], 0.9), 0.0);
}

#[test]
fn test_index_slope() {
    assert_eq!(index_slope(&[1.0, 2.0, 3.0, 4.0]), 1.0);
    assert_eq!(index_slope(&[10.0, 8.0, 6.0]), -2.0);
    assert_eq!(index_slope(&[5.0, 5.0, 5.0]), 0.0);
    assert_eq!(index_slope(&[5.0]), 0.0);
    assert_eq!(index_slope(&[]), 0.0);
}

#[test]
fn test_sigmoid() {
    assert_eq!(sigmoid(0.0), 0.5);
    assert!(sigmoid(10.0) > 0.99);
    assert!(sigmoid(-10.0) < 0.01);
}
