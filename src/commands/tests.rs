//! Unit tests for command helpers

use super::coaching::{insight_output, lineup_output};
use super::common::{apply_history_args, read_json, CommandContext};
use super::ingest::ingest_json;
use super::projection::{pattern_output, project_output, train_status_output, ProjectParams};
use crate::{
    cli::HistoryArgs,
    config::{EngineConfig, HistorySourceKind},
    history::{models::HistoricalRecord, sample::sample_records},
    storage::HistoryDatabase,
    PlayerId, Position, TeamCode, Week,
};
use std::io::Write;
use std::path::PathBuf;

fn sample_json() -> String {
    serde_json::to_string(&sample_records()).unwrap()
}

mod history_args_tests {
    use super::*;

    #[test]
    fn test_no_flags_keep_env_source() {
        let config = EngineConfig {
            history: HistorySourceKind::Url("https://example.com/h.json".to_string()),
            ..EngineConfig::default()
        };
        let config = apply_history_args(config, &HistoryArgs::default());
        assert_eq!(
            config.history,
            HistorySourceKind::Url("https://example.com/h.json".to_string())
        );
    }

    #[test]
    fn test_flags_override_env() {
        let config = EngineConfig {
            history: HistorySourceKind::Url("https://example.com/h.json".to_string()),
            ..EngineConfig::default()
        };
        let args = HistoryArgs {
            history_file: Some(PathBuf::from("/tmp/games.json")),
            ..HistoryArgs::default()
        };
        let config = apply_history_args(config, &args);
        assert_eq!(
            config.history,
            HistorySourceKind::File(PathBuf::from("/tmp/games.json"))
        );
    }

    #[test]
    fn test_use_sample_wins() {
        let args = HistoryArgs {
            history_file: Some(PathBuf::from("/tmp/games.json")),
            history_url: None,
            use_sample: true,
        };
        let config = apply_history_args(EngineConfig::default(), &args);
        assert_eq!(config.history, HistorySourceKind::Sample);
    }
}

mod ingest_tests {
    use super::*;

    #[test]
    fn test_ingest_archives_every_record() {
        let mut db = HistoryDatabase::new_in_memory().unwrap();
        let summary = ingest_json(&mut db, &sample_json(), false, false).unwrap();

        assert_eq!(summary.read, 48);
        assert_eq!(summary.written, 48);
        assert_eq!(summary.archived, 48);
    }

    #[test]
    fn test_reingest_skips_existing_unless_forced() {
        let mut db = HistoryDatabase::new_in_memory().unwrap();
        ingest_json(&mut db, &sample_json(), false, false).unwrap();

        let again = ingest_json(&mut db, &sample_json(), false, false).unwrap();
        assert_eq!(again.written, 0);
        assert_eq!(again.archived, 48);

        let forced = ingest_json(&mut db, &sample_json(), true, false).unwrap();
        assert_eq!(forced.written, 48);
        assert_eq!(forced.archived, 48);
    }

    #[test]
    fn test_clear_before_ingest() {
        let mut db = HistoryDatabase::new_in_memory().unwrap();
        ingest_json(&mut db, &sample_json(), false, false).unwrap();

        let one: Vec<HistoricalRecord> = sample_records().into_iter().take(1).collect();
        let json = serde_json::to_string(&one).unwrap();
        let summary = ingest_json(&mut db, &json, false, true).unwrap();

        assert_eq!(summary.written, 1);
        assert_eq!(summary.archived, 1);
    }

    #[test]
    fn test_malformed_json_leaves_archive_untouched() {
        let mut db = HistoryDatabase::new_in_memory().unwrap();
        ingest_json(&mut db, &sample_json(), false, false).unwrap();

        assert!(ingest_json(&mut db, "{not json", false, true).is_err());
        assert_eq!(db.count_records().unwrap(), 48);
    }
}

mod context_tests {
    use super::*;

    fn params(weather: Option<&str>) -> ProjectParams {
        ProjectParams {
            player_id: PlayerId::new("gibbs_jahmyr"),
            position: Position::RB,
            opponent: TeamCode::new("chi"),
            week: Week::new(9),
            base_projection: 17.5,
            is_home: true,
            weather: weather.map(str::to_string),
            as_json: false,
        }
    }

    #[test]
    fn test_project_params_context() {
        let context = params(Some("heavy rain")).context();
        assert_eq!(context.opponent, TeamCode::new("CHI"));
        assert_eq!(context.week, Week::new(9));
        assert!(context.is_home);
        assert_eq!(context.weather.as_deref(), Some("heavy rain"));

        assert_eq!(params(None).context().weather, None);
    }

    #[tokio::test]
    async fn test_sample_context_trains_default_positions() {
        let ctx = CommandContext::new(EngineConfig {
            history: HistorySourceKind::Sample,
            ..EngineConfig::default()
        })
        .unwrap();

        ctx.load_and_train().await.unwrap();

        assert!(ctx.store.is_initialized());
        assert_eq!(ctx.trainer.training_status().models_count, 8);
    }

    #[tokio::test]
    async fn test_missing_history_file_degrades() {
        let ctx = CommandContext::new(EngineConfig {
            history: HistorySourceKind::File(PathBuf::from("/nonexistent/games.json")),
            ..EngineConfig::default()
        })
        .unwrap();

        assert!(!ctx.load_history().await);
        ctx.trainer.initialize_training().await.unwrap();
        assert_eq!(ctx.trainer.training_status().models_count, 0);
    }

    #[tokio::test]
    async fn test_read_json_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"playerName": "Josh Allen", "passingYards": 280}}"#).unwrap();

        let stats: crate::coaching::models::LiveGameStats = read_json(file.path()).await.unwrap();
        assert_eq!(stats.player_name, "Josh Allen");
        assert_eq!(stats.passing_yards, 280);
        assert_eq!(stats.receptions, 0);
    }
}

mod json_output_tests {
    use super::*;
    use crate::coaching::{
        analytics::MemoryAnalyticsStore,
        models::{CoachingInsight, LineupCoaching, LineupSlot},
    };
    use crate::training::model::{MlEnhancedProjection, TrainingStatus};
    use serde_json::Value;

    fn context(history: HistorySourceKind) -> CommandContext {
        CommandContext::new(EngineConfig {
            history,
            ..EngineConfig::default()
        })
        .unwrap()
    }

    fn sample_context() -> CommandContext {
        context(HistorySourceKind::Sample)
    }

    #[tokio::test]
    async fn test_pattern_json_is_the_whole_output() {
        let ctx = sample_context();
        let out = pattern_output(&ctx, &PlayerId::new("mccaffrey_christian"), true)
            .await
            .unwrap();

        let report: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(report["pattern"]["playerId"], "mccaffrey_christian");
        assert_eq!(report["pattern"]["gamesPlayed"], 6);
        assert!(report["insights"]["consistency"].is_string());
    }

    #[tokio::test]
    async fn test_pattern_json_for_unknown_player() {
        let ctx = sample_context();
        let out = pattern_output(&ctx, &PlayerId::new("nobody"), true).await.unwrap();
        assert_eq!(serde_json::from_str::<Value>(&out).unwrap(), Value::Null);

        let text = pattern_output(&ctx, &PlayerId::new("nobody"), false).await.unwrap();
        assert_eq!(text, "No historical games found for nobody\n");
    }

    #[tokio::test]
    async fn test_project_json_parses() {
        let ctx = sample_context();
        let params = ProjectParams {
            player_id: PlayerId::new("gibbs_jahmyr"),
            position: Position::RB,
            opponent: TeamCode::new("CHI"),
            week: Week::new(9),
            base_projection: 17.5,
            is_home: false,
            weather: None,
            as_json: true,
        };

        let out = project_output(&ctx, &params).await.unwrap();
        let projection: MlEnhancedProjection = serde_json::from_str(&out).unwrap();
        assert!(projection.ml_projection.is_some());
        assert!(projection.confidence <= 95);
    }

    #[tokio::test]
    async fn test_train_status_json_parses_even_without_history() {
        let ctx = context(HistorySourceKind::File(PathBuf::from("/nonexistent/games.json")));
        let out = train_status_output(&ctx, true).await.unwrap();

        let status: TrainingStatus = serde_json::from_str(&out).unwrap();
        assert_eq!(status.models_count, 0);
        assert!(status.last_training_date.is_none());

        let text = train_status_output(&ctx, false).await.unwrap();
        assert!(text.starts_with("✓ 0 models trained"));
    }

    #[tokio::test]
    async fn test_insight_and_lineup_json_parse() {
        let ctx = sample_context();
        let storage = MemoryAnalyticsStore::new();

        let out = insight_output(&ctx, &PlayerId::new("kelce_travis"), Week::new(9), &storage, true)
            .await
            .unwrap();
        let insight: CoachingInsight = serde_json::from_str(&out).unwrap();
        assert_eq!(insight.confidence, 65);
        assert!(insight.historical_analysis.is_some());

        let slots = vec![LineupSlot {
            id: PlayerId::new("kelce_travis"),
            name: "Travis Kelce".to_string(),
            position: Position::TE,
            team: TeamCode::new("KC"),
        }];
        let out = lineup_output(&ctx, "coach-1", &slots, Week::new(9), &storage, true)
            .await
            .unwrap();
        let coaching: LineupCoaching = serde_json::from_str(&out).unwrap();
        assert_eq!(coaching.player_insights.len(), 1);
        assert_eq!(coaching.pivots.len(), 1);
    }
}
