//! Tier ordering under seeded round robins

use opponent::{AiConfig, Difficulty, Opponent};
use tournament::{EloTracker, MatchConfig, MatchRunner};

#[test]
fn test_searching_tiers_outrate_random_play() {
    let config = MatchConfig {
        num_games: 10,
        budget_ms: Some(300),
        seed: Some(2024),
        ..Default::default()
    };
    let mut opponent = Opponent::with_seed(AiConfig::default(), 2024).unwrap();
    let mut runner = MatchRunner::new(config);
    let mut tracker = EloTracker::new();

    for tier in [Difficulty::Hard, Difficulty::VeryHard] {
        let result = runner
            .run_match(&mut opponent, tier, Difficulty::Easy)
            .unwrap();
        assert_eq!(result.losses, 0, "{tier} lost to easy");
        tracker.update_ratings(tier.as_str(), Difficulty::Easy.as_str(), &result);
    }

    let easy = tracker.get_rating("easy");
    assert!(tracker.get_rating("hard") > easy);
    assert!(tracker.get_rating("very-hard") > easy);

    let ranking = runner.scoreboard().ranking();
    assert_eq!(ranking.last().map(|(name, _)| *name), Some("easy"));
}

#[test]
fn test_perfect_tiers_draw_each_other() {
    let config = MatchConfig {
        num_games: 2,
        budget_ms: Some(1000),
        seed: Some(1),
        ..Default::default()
    };
    let mut opponent = Opponent::with_seed(AiConfig::default(), 1).unwrap();
    let result = MatchRunner::new(config)
        .run_match(&mut opponent, Difficulty::Hard, Difficulty::VeryHard)
        .unwrap();
    assert_eq!(result.draws, 2);
}
