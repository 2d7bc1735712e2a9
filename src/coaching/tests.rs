//! Unit tests for the coaching engine

use super::analytics::*;
use super::lineup::*;
use super::models::*;
use super::rules::*;
use super::sport::*;
use super::*;
use crate::{
    config::EngineConfig,
    error::CoachError,
    history::{source::SampleSource, HistoricalPatternStore},
    Position, TeamCode,
};
use async_trait::async_trait;

fn player(id: &str, name: &str, position: Position, team: &str) -> PlayerAnalytics {
    PlayerAnalytics {
        player_id: PlayerId::new(id),
        player_name: name.to_string(),
        position,
        team: TeamCode::new(team),
        left_side_rushing_percentage: None,
        right_side_rushing_percentage: None,
        red_zone_target_share: None,
        third_down_conversion_rate: None,
        projected_points: None,
        last_five_games: Vec::new(),
    }
}

fn defense(team: &str) -> DefensiveAnalytics {
    DefensiveAnalytics {
        team: TeamCode::new(team),
        left_side_rushing_yards_allowed: None,
        right_side_rushing_yards_allowed: None,
        red_zone_defense_rank: None,
        pass_rush_pressure_rate: None,
        vs_wide_receivers: None,
    }
}

fn wr_defense(team: &str, red_zone_targets: f64) -> DefensiveAnalytics {
    DefensiveAnalytics {
        vs_wide_receivers: Some(VsWideReceivers {
            red_zone_targets: Some(red_zone_targets),
            rank: Some(31),
            ..VsWideReceivers::default()
        }),
        ..defense(team)
    }
}

fn engine() -> CoachingEngine {
    let store = Arc::new(HistoricalPatternStore::with_source(SampleSource));
    let trainer = Arc::new(ModelTrainer::new(store, &EngineConfig::default()));
    CoachingEngine::new(trainer)
}

fn with_confidence(id: &str, confidence: u8) -> CoachingInsight {
    let mut insight = generic_insight(&PlayerId::new(id), id, None, None);
    insight.confidence = confidence;
    insight
}

fn slot(id: &str, position: Position, team: &str) -> LineupSlot {
    LineupSlot {
        id: PlayerId::new(id),
        name: format!("{id} name"),
        position,
        team: TeamCode::new(team),
    }
}

#[cfg(test)]
mod rule_tests {
    use super::*;

    #[test]
    fn test_left_side_thresholds() {
        let mut rb = player("rb", "Runner", Position::RB, "DET");
        rb.left_side_rushing_percentage = Some(70.0);
        let mut def = defense("CHI");
        def.left_side_rushing_yards_allowed = Some(121.0);
        assert!(InsightRule::LeftSideRush.matches(&rb, &def));

        def.left_side_rushing_yards_allowed = Some(120.0);
        assert!(!InsightRule::LeftSideRush.matches(&rb, &def));

        def.left_side_rushing_yards_allowed = Some(150.0);
        rb.left_side_rushing_percentage = Some(69.9);
        assert!(!InsightRule::LeftSideRush.matches(&rb, &def));
    }

    #[test]
    fn test_red_zone_thresholds() {
        let mut wr = player("wr", "Catcher", Position::WR, "LAR");
        wr.red_zone_target_share = Some(25.5);
        assert!(InsightRule::RedZoneShare.matches(&wr, &wr_defense("SF", 8.0)));
        assert!(!InsightRule::RedZoneShare.matches(&wr, &wr_defense("SF", 7.5)));
        assert!(!InsightRule::RedZoneShare.matches(&wr, &defense("SF")));

        wr.red_zone_target_share = Some(25.0);
        assert!(!InsightRule::RedZoneShare.matches(&wr, &wr_defense("SF", 12.0)));
    }

    #[test]
    fn test_clean_pocket_only_for_quarterbacks() {
        let mut def = defense("NYG");
        def.pass_rush_pressure_rate = Some(15.0);
        let qb = player("qb", "Passer", Position::QB, "BUF");
        let wr = player("wr", "Catcher", Position::WR, "BUF");
        assert!(InsightRule::CleanPocket.matches(&qb, &def));
        assert!(!InsightRule::CleanPocket.matches(&wr, &def));

        def.pass_rush_pressure_rate = Some(20.0);
        assert!(!InsightRule::CleanPocket.matches(&qb, &def));
    }

    #[test]
    fn test_first_match_wins() {
        let mut rb = player("rb", "Runner", Position::RB, "DET");
        rb.left_side_rushing_percentage = Some(80.0);
        rb.red_zone_target_share = Some(30.0);
        let mut def = wr_defense("CHI", 10.0);
        def.left_side_rushing_yards_allowed = Some(140.0);

        assert_eq!(first_match(&rb, &def), Some(InsightRule::LeftSideRush));
        def.left_side_rushing_yards_allowed = Some(90.0);
        assert_eq!(first_match(&rb, &def), Some(InsightRule::RedZoneShare));
        rb.red_zone_target_share = None;
        assert_eq!(first_match(&rb, &def), None);
    }

    #[test]
    fn test_rule_narratives() {
        let mut wr = player("wr", "Puka Nacua", Position::WR, "LAR");
        wr.red_zone_target_share = Some(28.0);
        let insight = InsightRule::RedZoneShare.build(&wr, &wr_defense("SF", 9.0), &TeamCode::new("SF"));
        assert_eq!(insight.confidence, 78);
        assert_eq!(insight.risk_level, RiskLevel::Medium);
        assert_eq!(insight.kind, InsightKind::MatchupAdvantage);
        assert!(insight.insight.contains("Puka Nacua commands 28% of red zone targets"));
        assert_eq!(insight.supporting_data["defenseRank"], "31th vs WRs");
    }

    #[test]
    fn test_generic_insight_without_pattern() {
        let insight = generic_insight(&PlayerId::new("x"), "Player X", None, None);
        assert_eq!(insight.confidence, GENERIC_CONFIDENCE);
        assert_eq!(insight.recommendation, "MONITOR CLOSELY");
        assert_eq!(insight.risk_level, RiskLevel::Medium);
        assert!(insight.insight.contains("Player X vs Unknown opponent"));
        assert!(insight.historical_analysis.is_none());
    }
}

#[cfg(test)]
mod lineup_tests {
    use super::*;

    fn nine(confidences: [u8; 9]) -> Vec<CoachingInsight> {
        confidences
            .iter()
            .enumerate()
            .map(|(i, c)| with_confidence(&format!("p{i}"), *c))
            .collect()
    }

    #[test]
    fn test_aggressive_week() {
        let insights = nine([85, 85, 82, 90, 65, 65, 70, 72, 65]);
        assert_eq!(overall_strategy(&insights), AGGRESSIVE_STRATEGY);
        assert_eq!(assess_risk(&insights), "LOW RISK - High floor lineup");
    }

    #[test]
    fn test_calculated_risk() {
        let insights = nine([55, 50, 58, 65, 65, 85, 70, 72, 65]);
        assert_eq!(overall_strategy(&insights), CALCULATED_RISK_STRATEGY);
        assert_eq!(assess_risk(&insights), "HIGH RISK - Boom or bust potential");
    }

    #[test]
    fn test_balanced_and_moderate() {
        let insights = nine([65; 9]);
        assert_eq!(overall_strategy(&insights), BALANCED_STRATEGY);
        assert_eq!(assess_risk(&insights), "MODERATE RISK - Balanced ceiling and floor");
    }

    #[test]
    fn test_summary_confidence_and_pivots() {
        let lineup: Vec<LineupSlot> = (0..3).map(|i| slot(&format!("p{i}"), Position::RB, "KC")).collect();
        let insights = vec![with_confidence("p0", 85), with_confidence("p1", 65), with_confidence("p2", 69)];
        let coaching = summarize_lineup(&lineup, insights);

        assert!((coaching.confidence - 73.0).abs() < 1e-9);
        assert_eq!(coaching.pivots.len(), 2);
        assert_eq!(coaching.pivots[0].original_player, PlayerId::new("p1"));
        assert_eq!(coaching.pivots[0].confidence, 75);
        assert_eq!(coaching.player_insights.len(), 3);
    }

    #[test]
    fn test_empty_lineup() {
        let coaching = summarize_lineup(&[], Vec::new());
        assert_eq!(coaching.confidence, 0.0);
        assert_eq!(coaching.overall_strategy, BALANCED_STRATEGY);
        assert!(coaching.pivots.is_empty());
        assert_eq!(
            coaching.stack_recommendations,
            vec!["Consider stacking QB with WR for correlation upside"]
        );
    }

    #[test]
    fn test_stack_detection() {
        let lineup = vec![
            slot("qb", Position::QB, "KC"),
            slot("rb", Position::RB, "DET"),
            slot("wr", Position::WR, "KC"),
        ];
        let recs = stack_recommendations(&lineup);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0], "🔗 STACK ALERT: qb name + teammate WR in high-pace matchup");
        assert_eq!(recs[1], "🎯 GAME STACK: Multiple players from KC in projected shootout");

        // a same-team TE is a game stack but not a QB/WR stack
        let lineup = vec![slot("qb", Position::QB, "BUF"), slot("te", Position::TE, "BUF")];
        let recs = stack_recommendations(&lineup);
        assert_eq!(recs, vec!["🎯 GAME STACK: Multiple players from BUF in projected shootout"]);
    }

    #[test]
    fn test_game_stack_reports_first_repeated_team() {
        let lineup = vec![
            slot("a", Position::RB, "SF"),
            slot("b", Position::WR, "DET"),
            slot("c", Position::TE, "DET"),
            slot("d", Position::WR, "SF"),
        ];
        let recs = stack_recommendations(&lineup);
        assert_eq!(recs, vec!["🎯 GAME STACK: Multiple players from DET in projected shootout"]);
    }
}

#[cfg(test)]
mod live_tests {
    use super::*;

    fn stats() -> LiveGameStats {
        LiveGameStats {
            player_name: "Jahmyr Gibbs".to_string(),
            points: 12.4,
            ..LiveGameStats::default()
        }
    }

    #[test]
    fn test_trend_confirmed_takes_priority() {
        let live = LiveGameStats {
            left_side_carries: 3,
            left_side_yards: 45,
            red_zone_targets: 3,
            receptions: 4,
            ..stats()
        };
        let text = live_insight_text(&live);
        assert!(text.starts_with("🚨 TREND CONFIRMED: Jahmyr Gibbs"));
        assert!(text.contains("3 carries to the left for 45 yards"));
    }

    #[test]
    fn test_red_zone_then_pocket() {
        let red_zone = LiveGameStats {
            red_zone_targets: 2,
            receptions: 2,
            ..stats()
        };
        assert!(live_insight_text(&red_zone).starts_with("🎯 RED ZONE DOMINATION"));

        let pocket = LiveGameStats {
            passing_yards: 245,
            time_in_pocket: 3.2,
            ..stats()
        };
        let text = live_insight_text(&pocket);
        assert!(text.starts_with("⚡ CLEAN POCKET MAGIC"));
        assert!(text.contains("245 passing yards with 3.2s"));
    }

    #[test]
    fn test_default_update() {
        let thin = LiveGameStats {
            left_side_carries: 3,
            left_side_yards: 35,
            ..stats()
        };
        assert_eq!(
            live_insight_text(&thin),
            "📊 Game Update: Jahmyr Gibbs has 12.4 fantasy points. Tracking as expected based on our pre-game analysis."
        );
    }

    fn live_insight_text(stats: &LiveGameStats) -> String {
        engine().generate_live_insight(&PlayerId::new("gibbs_jahmyr"), stats)
    }
}

#[cfg(test)]
mod sport_tests {
    use super::*;

    struct FixedPicker {
        index: usize,
        confidence: u8,
    }

    impl TemplatePicker for FixedPicker {
        fn pick(&self, _len: usize) -> usize {
            self.index
        }

        fn confidence(&self, _range: std::ops::RangeInclusive<u8>) -> u8 {
            self.confidence
        }
    }

    #[test]
    fn test_stubbed_picker_is_deterministic() {
        let engine = engine().with_picker(Box::new(FixedPicker {
            index: 1,
            confidence: 88,
        }));
        let first = engine.generate_sport_analysis("nfl", "Puka Nacua", "WR", "LAR");
        let second = engine.generate_sport_analysis("NFL", "Puka Nacua", "WR", "LAR");
        assert_eq!(first, second);
        assert_eq!(first.confidence, 88);
        assert_eq!(first.sport, "NFL");
        assert_eq!(
            first.insight,
            "🏈 Puka Nacua (LAR) leads the team in air yards and red zone looks"
        );
    }

    #[test]
    fn test_picker_output_is_bounded() {
        let analysis = analyze(
            Sport::Nhl,
            "Skater",
            "C",
            "EDM",
            &FixedPicker {
                index: 99,
                confidence: 10,
            },
        );
        assert_eq!(analysis.confidence, 70);
        assert!(analysis.insight.contains("Skater (EDM)"));
    }

    #[test]
    fn test_random_confidence_in_range() {
        for _ in 0..50 {
            let analysis = analyze(Sport::Nba, "Guard", "PG", "BOS", &ThreadRngPicker);
            assert!(CONFIDENCE_RANGE.contains(&analysis.confidence));
        }
    }

    #[test]
    fn test_unknown_sport_defaults() {
        let analysis = engine().generate_sport_analysis("cricket", "Batter", "BAT", "MI");
        assert_eq!(analysis.confidence, 75);
        assert_eq!(analysis.recommendation, "MONITOR CLOSELY");
        assert_eq!(analysis.sport, "CRICKET");

        match "cricket".parse::<Sport>() {
            Err(CoachError::InvalidSport { sport }) => assert_eq!(sport, "cricket"),
            other => panic!("Expected InvalidSport, got {:?}", other),
        }
    }
}

#[cfg(test)]
mod engine_tests {
    use super::*;

    struct BrokenStore;

    #[async_trait]
    impl AnalyticsStore for BrokenStore {
        async fn get_player_analytics(&self, _: &PlayerId) -> crate::Result<Option<PlayerAnalytics>> {
            Err(CoachError::Storage {
                message: "connection reset".to_string(),
            })
        }

        async fn get_upcoming_opponent(&self, _: &PlayerId, _: Week) -> crate::Result<Option<TeamCode>> {
            Ok(Some(TeamCode::new("CHI")))
        }

        async fn get_defensive_analytics(&self, _: &TeamCode) -> crate::Result<Option<DefensiveAnalytics>> {
            Err(CoachError::Storage {
                message: "connection reset".to_string(),
            })
        }

        async fn get_coaching_insight(&self, _: &str) -> crate::Result<Option<StoredInsight>> {
            Err(CoachError::Storage {
                message: "connection reset".to_string(),
            })
        }

        async fn update_coaching_insight(&self, _: &str, _: InsightPatch) -> crate::Result<Option<StoredInsight>> {
            Err(CoachError::Storage {
                message: "connection reset".to_string(),
            })
        }
    }

    fn analytics() -> MemoryAnalyticsStore {
        let store = MemoryAnalyticsStore::new();

        let mut gibbs = player("gibbs_jahmyr", "Jahmyr Gibbs", Position::RB, "DET");
        gibbs.left_side_rushing_percentage = Some(75.0);
        gibbs.projected_points = Some(18.0);
        store.insert_player(gibbs);
        store.set_opponent(PlayerId::new("gibbs_jahmyr"), Week::new(9), TeamCode::new("CHI"));

        let mut chi = defense("CHI");
        chi.left_side_rushing_yards_allowed = Some(132.0);
        store.insert_defense(chi);

        let mut allen = player("allen_josh", "Josh Allen", Position::QB, "BUF");
        allen.left_side_rushing_percentage = Some(10.0);
        store.insert_player(allen);
        store.set_opponent(PlayerId::new("allen_josh"), Week::new(9), TeamCode::new("NYG"));
        let mut nyg = defense("NYG");
        nyg.pass_rush_pressure_rate = Some(16.5);
        store.insert_defense(nyg);

        store.insert_insight(StoredInsight {
            id: "ins-1".to_string(),
            user_id: "u1".to_string(),
            player_id: PlayerId::new("gibbs_jahmyr"),
            week: Week::new(9),
            insight_type: InsightKind::BreakoutPotential,
            confidence_score: 85.0,
            title: "Gibbs Poised for Big Game".to_string(),
            recommendation: "START WITH HIGH CONFIDENCE".to_string(),
            supporting_stats: Some(SupportingStats {
                key_metric: "projection".to_string(),
                player_value: Some(20.0),
                league_average: None,
                percentage_difference: None,
            }),
            risk_level: RiskLevel::Low,
            actual_outcome: None,
        });
        store.insert_insight(StoredInsight {
            id: "ins-2".to_string(),
            supporting_stats: None,
            ..store_insight_template()
        });
        store
    }

    fn store_insight_template() -> StoredInsight {
        StoredInsight {
            id: String::new(),
            user_id: "u1".to_string(),
            player_id: PlayerId::new("allen_josh"),
            week: Week::new(9),
            insight_type: InsightKind::DefensiveWeakness,
            confidence_score: 82.0,
            title: "Clean pocket".to_string(),
            recommendation: "STRONG QB START".to_string(),
            supporting_stats: None,
            risk_level: RiskLevel::Low,
            actual_outcome: None,
        }
    }

    #[tokio::test]
    async fn test_left_side_insight_merges_projection() {
        let engine = engine();
        let store = analytics();
        let insight = engine
            .generate_player_insight(&PlayerId::new("gibbs_jahmyr"), Week::new(9), &store)
            .await
            .unwrap();

        assert!(engine.trainer().is_initialized());
        assert_eq!(insight.confidence, 85);
        assert_eq!(insight.recommendation, "START WITH HIGH CONFIDENCE");
        assert_eq!(insight.risk_level, RiskLevel::Low);
        assert!(insight.insight.contains("runs to the left side 75% of the time"));
        assert!(insight.insight.contains("CHI's defense allows 132 yards"));

        let ml = insight.ml_enhancement.as_ref().unwrap();
        assert!(ml.ml_projection.is_some());
        assert!(ml.confidence <= 95);
        assert!(insight.supporting_data.contains_key("projection"));
        assert_eq!(insight.historical_analysis.as_ref().unwrap().games_played, 6);
    }

    #[tokio::test]
    async fn test_clean_pocket_insight() {
        let insight = engine()
            .generate_player_insight(&PlayerId::new("allen_josh"), Week::new(9), &analytics())
            .await
            .unwrap();
        assert_eq!(insight.confidence, 82);
        assert_eq!(insight.kind, InsightKind::DefensiveWeakness);
        assert!(insight.ml_enhancement.is_none());
    }

    #[tokio::test]
    async fn test_missing_defense_falls_back_with_history() {
        let store = analytics();
        let insight = engine()
            .generate_player_insight(&PlayerId::new("gibbs_jahmyr"), Week::new(10), &store)
            .await
            .unwrap();
        assert_eq!(insight.confidence, 65);
        assert_eq!(insight.recommendation, "MONITOR CLOSELY");
        assert!(insight.insight.contains("Jahmyr Gibbs vs Unknown opponent"));
        assert!(insight.historical_analysis.is_some());
        assert!(insight.insight.contains("Historically"));
    }

    #[tokio::test]
    async fn test_unknown_player_generic_insight() {
        let insight = engine()
            .generate_player_insight(&PlayerId::new("ghost"), Week::new(1), &analytics())
            .await
            .unwrap();
        assert_eq!(insight.player_name, "ghost");
        assert_eq!(insight.confidence, 65);
        assert!(insight.historical_analysis.is_none());
    }

    #[tokio::test]
    async fn test_store_errors_degrade_to_generic() {
        let insight = engine()
            .generate_player_insight(&PlayerId::new("gibbs_jahmyr"), Week::new(9), &BrokenStore)
            .await
            .unwrap();
        assert_eq!(insight.confidence, 65);
        assert!(insight.insight.contains("gibbs_jahmyr vs CHI"));
    }

    #[tokio::test]
    async fn test_lineup_coaching_over_store() {
        let lineup = vec![
            LineupSlot {
                id: PlayerId::new("allen_josh"),
                name: "Josh Allen".to_string(),
                position: Position::QB,
                team: TeamCode::new("BUF"),
            },
            LineupSlot {
                id: PlayerId::new("gibbs_jahmyr"),
                name: "Jahmyr Gibbs".to_string(),
                position: Position::RB,
                team: TeamCode::new("DET"),
            },
            LineupSlot {
                id: PlayerId::new("ghost"),
                name: "Ghost".to_string(),
                position: Position::WR,
                team: TeamCode::new("BUF"),
            },
        ];
        let coaching = engine()
            .generate_lineup_coaching("u1", &lineup, Week::new(9), &analytics())
            .await
            .unwrap();

        assert_eq!(coaching.player_insights.len(), 3);
        assert!((coaching.confidence - (82.0 + 85.0 + 65.0) / 3.0).abs() < 1e-9);
        assert_eq!(coaching.overall_strategy, BALANCED_STRATEGY);
        assert_eq!(coaching.risk_assessment, "LOW RISK - High floor lineup");
        assert_eq!(coaching.pivots.len(), 1);
        assert_eq!(
            coaching.stack_recommendations[0],
            "🔗 STACK ALERT: Josh Allen + teammate WR in high-pace matchup"
        );
    }

    #[tokio::test]
    async fn test_prediction_accuracy_recorded() {
        let store = analytics();
        let engine = engine();

        let accuracy = engine
            .update_prediction_accuracy("ins-1", Some(18.0), &store)
            .await
            .unwrap();
        assert_eq!(accuracy, Some(90.0));
        let saved = store.get_coaching_insight("ins-1").await.unwrap().unwrap();
        let outcome = saved.actual_outcome.unwrap();
        assert_eq!(outcome.actual_points, Some(18.0));
        assert_eq!(outcome.prediction_accuracy, 90.0);

        let unscored = engine
            .update_prediction_accuracy("ins-2", Some(30.0), &store)
            .await
            .unwrap();
        assert_eq!(unscored, Some(50.0));

        assert_eq!(
            engine.update_prediction_accuracy("missing", Some(3.0), &store).await.unwrap(),
            None
        );
        assert_eq!(
            engine.update_prediction_accuracy("ins-1", None, &BrokenStore).await.unwrap(),
            None
        );
    }

    #[test]
    fn test_prediction_accuracy_formula() {
        assert_eq!(prediction_accuracy(Some(20.0), Some(20.0)), 100.0);
        assert_eq!(prediction_accuracy(Some(20.0), Some(25.0)), 75.0);
        assert_eq!(prediction_accuracy(Some(5.0), Some(40.0)), 0.0);
        assert_eq!(prediction_accuracy(None, Some(12.0)), 50.0);
        assert_eq!(prediction_accuracy(Some(12.0), None), 50.0);
    }

    #[test]
    fn test_zero_values_score_as_unknown() {
        assert_eq!(prediction_accuracy(Some(0.0), Some(12.0)), 50.0);
        assert_eq!(prediction_accuracy(Some(12.0), Some(0.0)), 50.0);
        assert_eq!(prediction_accuracy(Some(0.0), Some(0.0)), 50.0);
        assert_eq!(prediction_accuracy(Some(0.5), Some(1.5)), 95.0);
    }

    #[tokio::test]
    async fn test_memory_store_from_json() {
        let json = r#"{
            "players": [{"playerId": "nacua_puka", "playerName": "Puka Nacua",
                         "position": "WR", "team": "lar", "redZoneTargetShare": 28.0}],
            "schedule": [{"playerId": "nacua_puka", "week": 3, "opponent": "sf"}],
            "defenses": [{"team": "SF", "vsWideReceivers": {"redZoneTargets": 9, "rank": 30}}]
        }"#;
        let store = MemoryAnalyticsStore::from_json(json).unwrap();

        let opponent = store
            .get_upcoming_opponent(&PlayerId::new("nacua_puka"), Week::new(3))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(opponent, TeamCode::new("SF"));
        let defense = store.get_defensive_analytics(&opponent).await.unwrap().unwrap();
        assert_eq!(defense.vs_wide_receivers.unwrap().red_zone_targets, Some(9.0));
        let player = store
            .get_player_analytics(&PlayerId::new("nacua_puka"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(player.team, TeamCode::new("LAR"));
    }
}
