//! Pattern derivation and historical projection enhancement.
//!
//! Everything here is a pure function of its inputs; the store in
//! [`super::HistoricalPatternStore`] only owns the resulting maps.

use super::models::*;
use crate::{
    cli::types::{ids::PlayerId, ids::TeamCode, time::SeasonPhase},
    util::{consistency_score, index_slope, mean, nearest_rank, population_variance, round2},
};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};

/// Games against one opponent needed before the matchup adjusts a projection.
pub const MIN_MATCHUP_SAMPLE: usize = 3;

const WEATHER_PENALTY: f64 = 0.9;
const WEATHER_SENSITIVITY_THRESHOLD: f64 = 20.0;
const BASE_CONFIDENCE: f64 = 75.0;
const MAX_CONFIDENCE: f64 = 95.0;
const NO_PATTERN_CONFIDENCE: u8 = 70;

const DEFAULT_INJURY_RECOVERY: f64 = 85.0;
const DEFAULT_WEATHER_IMPACT: f64 = 15.0;
const DEFAULT_GAME_SCRIPT_DEPENDENCY: f64 = 50.0;
const PLAYOFF_MULTIPLIER: f64 = 1.05;
const AGE_ADJUSTMENT: f64 = 1.0;

/// Week gap that counts as a missed stretch rather than a bye.
const INJURY_GAP_WEEKS: u16 = 3;

/// Group records by player, each group in chronological (season, week) order.
pub fn group_by_player(records: &[HistoricalRecord]) -> HashMap<PlayerId, Vec<&HistoricalRecord>> {
    let mut groups: HashMap<PlayerId, Vec<&HistoricalRecord>> = HashMap::new();
    for record in records {
        groups
            .entry(record.player_id.clone())
            .or_default()
            .push(record);
    }
    for games in groups.values_mut() {
        games.sort_by_key(|r| (r.season, r.week));
    }
    groups
}

/// Derive one pattern per player from the full corpus.
pub fn build_patterns(records: &[HistoricalRecord]) -> HashMap<PlayerId, PlayerPattern> {
    group_by_player(records)
        .into_par_iter()
        .filter_map(|(player_id, games)| {
            calculate_player_pattern(&games).map(|pattern| (player_id, pattern))
        })
        .collect()
}

/// Derive a pattern from one player's games, given in chronological order.
///
/// Returns `None` for an empty slice.
pub fn calculate_player_pattern(games: &[&HistoricalRecord]) -> Option<PlayerPattern> {
    let first = games.first()?;
    let points: Vec<f64> = games.iter().map(|g| g.fantasy_points()).collect();

    let mut sorted = points.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let average_points = mean(&points);
    let by_opponent = points_by_opponent(games);

    Some(PlayerPattern {
        player_id: first.player_id.clone(),
        name: first.name.clone(),
        position: first.position,
        team: first.team.clone(),
        games_played: games.len(),
        average_points,
        historical_metrics: HistoricalMetrics {
            consistency_score: consistency_score(&points),
            ceiling_score: nearest_rank(&sorted, 0.9),
            floor_score: nearest_rank(&sorted, 0.1),
            trend_slope: index_slope(&points),
            injury_recovery_pattern: injury_recovery(games, average_points),
            matchup_sensitivity: matchup_sensitivity(&by_opponent),
            weather_impact: weather_impact(games),
            game_script_dependency: game_script_dependency(games),
            age_adjustment: AGE_ADJUSTMENT,
        },
        seasonal_patterns: seasonal_patterns(games, average_points),
        matchup_history: matchup_history(&by_opponent),
    })
}

fn points_by_opponent(games: &[&HistoricalRecord]) -> BTreeMap<TeamCode, Vec<f64>> {
    let mut by_opponent: BTreeMap<TeamCode, Vec<f64>> = BTreeMap::new();
    for game in games {
        by_opponent
            .entry(game.game_context.opponent.clone())
            .or_default()
            .push(game.fantasy_points());
    }
    by_opponent
}

fn matchup_history(by_opponent: &BTreeMap<TeamCode, Vec<f64>>) -> BTreeMap<TeamCode, MatchupRecord> {
    by_opponent
        .iter()
        .map(|(team, points)| {
            (
                team.clone(),
                MatchupRecord {
                    average_points: mean(points),
                    consistency: consistency_score(points),
                    sample_size: points.len(),
                },
            )
        })
        .collect()
}

/// Average within-opponent variance, doubled and capped at 100.
fn matchup_sensitivity(by_opponent: &BTreeMap<TeamCode, Vec<f64>>) -> f64 {
    if by_opponent.is_empty() {
        return 0.0;
    }
    let variances: Vec<f64> = by_opponent.values().map(|p| population_variance(p)).collect();
    (mean(&variances) * 2.0).min(100.0)
}

fn seasonal_patterns(games: &[&HistoricalRecord], average_points: f64) -> SeasonalPatterns {
    let window = |phase: SeasonPhase| -> f64 {
        let points: Vec<f64> = games
            .iter()
            .filter(|g| g.week.phase() == phase)
            .map(|g| g.fantasy_points())
            .collect();
        // No games in the window, or nothing to compare against: neutral.
        if points.is_empty() || average_points == 0.0 {
            1.0
        } else {
            mean(&points) / average_points
        }
    };

    SeasonalPatterns {
        early_season_multiplier: window(SeasonPhase::Early),
        mid_season_multiplier: window(SeasonPhase::Mid),
        late_season_multiplier: window(SeasonPhase::Late),
        playoff_multiplier: PLAYOFF_MULTIPLIER,
    }
}

/// True when the weather string mentions rain or wind.
pub fn is_rain_or_wind(weather: &str) -> bool {
    let weather = weather.to_lowercase();
    weather.contains("rain") || weather.contains("wind")
}

fn is_adverse_weather(weather: &str) -> bool {
    is_rain_or_wind(weather) || weather.to_lowercase().contains("snow")
}

/// Relative gap (0-100) between fair-weather and adverse-weather averages.
fn weather_impact(games: &[&HistoricalRecord]) -> f64 {
    let (adverse, fair): (Vec<&HistoricalRecord>, Vec<&HistoricalRecord>) = games
        .iter()
        .copied()
        .partition(|g| g.game_context.weather.as_deref().is_some_and(is_adverse_weather));

    if adverse.is_empty() || fair.is_empty() {
        return DEFAULT_WEATHER_IMPACT;
    }
    let adverse_avg = mean(&adverse.iter().map(|g| g.fantasy_points()).collect::<Vec<_>>());
    let fair_avg = mean(&fair.iter().map(|g| g.fantasy_points()).collect::<Vec<_>>());
    relative_gap(fair_avg, adverse_avg)
}

fn game_script_dependency(games: &[&HistoricalRecord]) -> f64 {
    let script_points = |script: GameScript| -> Vec<f64> {
        games
            .iter()
            .filter(|g| g.game_context.game_script == script)
            .map(|g| g.fantasy_points())
            .collect()
    };
    let positive = script_points(GameScript::Positive);
    let negative = script_points(GameScript::Negative);

    if positive.is_empty() || negative.is_empty() {
        return DEFAULT_GAME_SCRIPT_DEPENDENCY;
    }
    relative_gap(mean(&positive), mean(&negative))
}

/// `|a - b| / max(a, b) * 100`, capped to 0-100.
fn relative_gap(a: f64, b: f64) -> f64 {
    let larger = a.max(b);
    if larger <= 0.0 {
        return 0.0;
    }
    ((a - b).abs() / larger * 100.0).min(100.0)
}

/// Output in games right after a multi-week absence, relative to the mean.
fn injury_recovery(games: &[&HistoricalRecord], average_points: f64) -> f64 {
    let returns: Vec<f64> = games
        .windows(2)
        .filter_map(|pair| {
            let (prev, next) = (pair[0], pair[1]);
            let gap = next.week.as_u16().saturating_sub(prev.week.as_u16());
            (prev.season == next.season && gap >= INJURY_GAP_WEEKS).then(|| next.fantasy_points())
        })
        .collect();

    if returns.is_empty() || average_points <= 0.0 {
        return DEFAULT_INJURY_RECOVERY;
    }
    (mean(&returns) / average_points * 100.0).clamp(0.0, 100.0)
}

/// Adjust `base_projection` using only the player's historical pattern.
///
/// Applies, in order, the opponent matchup multiplier (only with at least
/// [`MIN_MATCHUP_SAMPLE`] games against that opponent), the seasonal multiplier
/// for the context week, and a 10% weather penalty for rain or wind when the
/// player is weather sensitive.
pub fn enhance_with_pattern(
    pattern: Option<&PlayerPattern>,
    base_projection: f64,
    context: &ProjectionContext,
) -> HistoricalEnhancement {
    let Some(pattern) = pattern else {
        return HistoricalEnhancement {
            enhanced_projection: base_projection,
            confidence: NO_PATTERN_CONFIDENCE,
            explanation: vec!["No historical pattern data available".to_string()],
        };
    };

    let mut adjusted = base_projection;
    let mut explanation = Vec::new();
    let mut confidence_boost = 0.0;

    if let Some(matchup) = pattern.matchup_history.get(&context.opponent) {
        if matchup.sample_size >= MIN_MATCHUP_SAMPLE {
            if let Some(multiplier) = pattern.matchup_ratio(&context.opponent) {
                adjusted *= multiplier;
                explanation.push(format!(
                    "Matchup history vs {}: {}",
                    context.opponent,
                    if multiplier > 1.0 { "favorable" } else { "challenging" }
                ));
                confidence_boost += matchup.consistency * 0.1;
            }
        }
    }

    let seasonal = pattern.seasonal_multiplier(context.week);
    explanation.push(match context.week.phase() {
        SeasonPhase::Early => format!(
            "Early season performance: {} start",
            if seasonal > 1.0 { "strong" } else { "slow" }
        ),
        SeasonPhase::Mid => format!(
            "Mid-season form: {} performance",
            if seasonal > 1.0 { "peak" } else { "average" }
        ),
        SeasonPhase::Late => format!(
            "Late season: {} finish",
            if seasonal > 1.0 { "strong" } else { "fading" }
        ),
    });
    adjusted *= seasonal;

    let weather_sensitive =
        pattern.historical_metrics.weather_impact > WEATHER_SENSITIVITY_THRESHOLD;
    if weather_sensitive && context.weather.as_deref().is_some_and(is_rain_or_wind) {
        adjusted *= WEATHER_PENALTY;
        explanation.push("Weather conditions may impact performance".to_string());
    }

    let confidence = (BASE_CONFIDENCE
        + pattern.historical_metrics.consistency_score * 0.2
        + confidence_boost)
        .clamp(0.0, MAX_CONFIDENCE);

    HistoricalEnhancement {
        enhanced_projection: round2(adjusted),
        confidence: confidence.round() as u8,
        explanation,
    }
}

/// Qualitative labels for a pattern's metrics.
pub fn describe_pattern(pattern: &PlayerPattern) -> PlayerInsights {
    let m = &pattern.historical_metrics;

    let consistency = if m.consistency_score > 80.0 {
        "Very Reliable"
    } else if m.consistency_score > 60.0 {
        "Fairly Consistent"
    } else {
        "Volatile"
    };
    let ceiling = if m.ceiling_score > 25.0 {
        "Elite Upside"
    } else if m.ceiling_score > 18.0 {
        "High Upside"
    } else {
        "Limited Upside"
    };
    let floor = if m.floor_score > 8.0 {
        "Safe Floor"
    } else if m.floor_score > 4.0 {
        "Risky Floor"
    } else {
        "Very Risky"
    };
    let trend = if m.trend_slope > 0.5 {
        "Improving"
    } else if m.trend_slope < -0.5 {
        "Declining"
    } else {
        "Stable"
    };

    let mut strengths = Vec::new();
    if m.consistency_score > 80.0 {
        strengths.push("High consistency".to_string());
    }
    if m.ceiling_score > 25.0 {
        strengths.push("Elite ceiling".to_string());
    }
    if m.matchup_sensitivity < 20.0 {
        strengths.push("Matchup proof".to_string());
    }
    if m.weather_impact < 15.0 {
        strengths.push("Weather resistant".to_string());
    }
    if m.trend_slope > 0.3 {
        strengths.push("Positive trend".to_string());
    }

    let mut weaknesses = Vec::new();
    if m.consistency_score < 50.0 {
        weaknesses.push("High volatility".to_string());
    }
    if m.floor_score < 5.0 {
        weaknesses.push("Low floor".to_string());
    }
    if m.matchup_sensitivity > 40.0 {
        weaknesses.push("Matchup dependent".to_string());
    }
    if m.weather_impact > 25.0 {
        weaknesses.push("Weather sensitive".to_string());
    }
    if m.trend_slope < -0.3 {
        weaknesses.push("Declining trend".to_string());
    }

    PlayerInsights {
        consistency: consistency.to_string(),
        ceiling: ceiling.to_string(),
        floor: floor.to_string(),
        trend: trend.to_string(),
        strengths,
        weaknesses,
    }
}

/// Corpus-wide summary over a set of patterns.
pub fn summarize_patterns<'a, I>(patterns: I, total_games: usize) -> DataInsights
where
    I: IntoIterator<Item = &'a PlayerPattern>,
{
    let patterns: Vec<&PlayerPattern> = patterns.into_iter().collect();
    let avg_consistency = mean(
        &patterns
            .iter()
            .map(|p| p.historical_metrics.consistency_score)
            .collect::<Vec<_>>(),
    );

    let mut top: Vec<&PlayerPattern> = patterns
        .iter()
        .copied()
        .filter(|p| p.historical_metrics.ceiling_score > 25.0)
        .collect();
    top.sort_by(|a, b| {
        b.historical_metrics
            .ceiling_score
            .total_cmp(&a.historical_metrics.ceiling_score)
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut sleepers: Vec<&PlayerPattern> = patterns
        .iter()
        .copied()
        .filter(|p| {
            p.historical_metrics.trend_slope > 0.5 && p.historical_metrics.ceiling_score > 15.0
        })
        .collect();
    sleepers.sort_by(|a, b| {
        b.historical_metrics
            .trend_slope
            .total_cmp(&a.historical_metrics.trend_slope)
            .then_with(|| a.name.cmp(&b.name))
    });

    DataInsights {
        total_players: patterns.len(),
        total_games,
        avg_consistency,
        top_performers: top.into_iter().take(10).map(|p| p.name.clone()).collect(),
        sleepers: sleepers.into_iter().take(5).map(|p| p.name.clone()).collect(),
    }
}
