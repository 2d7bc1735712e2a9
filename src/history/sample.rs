//! Small built-in corpus used when no archive or remote feed is configured.

use super::models::*;
use super::models::GameScript::{Negative as Neg, Neutral as Neu, Positive as Pos};
use crate::{PlayerId, Position, Season, TeamCode, Week};

type SampleGame = (
    &'static str,         // player id
    &'static str,         // name
    Position,
    &'static str,         // team
    u16,                  // week
    &'static str,         // opponent
    bool,                 // home
    f64,                  // fantasy points
    GameScript,
    Option<&'static str>, // weather
);

#[rustfmt::skip]
const SAMPLE_GAMES: &[SampleGame] = &[
    ("mahomes_patrick", "Patrick Mahomes", Position::QB, "KC", 1, "BAL", true, 28.1, Pos, None),
    ("mahomes_patrick", "Patrick Mahomes", Position::QB, "KC", 3, "ATL", false, 19.4, Neu, None),
    ("mahomes_patrick", "Patrick Mahomes", Position::QB, "KC", 5, "NO", true, 17.2, Pos, Some("clear")),
    ("mahomes_patrick", "Patrick Mahomes", Position::QB, "KC", 8, "LV", false, 21.6, Pos, Some("windy")),
    ("mahomes_patrick", "Patrick Mahomes", Position::QB, "KC", 11, "BUF", false, 24.8, Neg, None),
    ("mahomes_patrick", "Patrick Mahomes", Position::QB, "KC", 14, "LV", true, 15.9, Neu, Some("light rain")),
    ("allen_josh", "Josh Allen", Position::QB, "BUF", 1, "ARI", true, 31.2, Neg, None),
    ("allen_josh", "Josh Allen", Position::QB, "BUF", 2, "MIA", false, 26.4, Pos, None),
    ("allen_josh", "Josh Allen", Position::QB, "BUF", 6, "NYJ", false, 14.8, Neg, Some("windy")),
    ("allen_josh", "Josh Allen", Position::QB, "BUF", 9, "MIA", true, 22.9, Pos, Some("clear")),
    ("allen_josh", "Josh Allen", Position::QB, "BUF", 11, "KC", true, 27.3, Pos, None),
    ("allen_josh", "Josh Allen", Position::QB, "BUF", 15, "DET", false, 33.5, Neu, Some("snow")),
    ("gibbs_jahmyr", "Jahmyr Gibbs", Position::RB, "DET", 1, "LAR", true, 9.8, Neu, None),
    ("gibbs_jahmyr", "Jahmyr Gibbs", Position::RB, "DET", 3, "ARI", false, 18.3, Pos, None),
    ("gibbs_jahmyr", "Jahmyr Gibbs", Position::RB, "DET", 7, "MIN", false, 21.9, Pos, None),
    ("gibbs_jahmyr", "Jahmyr Gibbs", Position::RB, "DET", 10, "HOU", false, 14.1, Neg, Some("clear")),
    ("gibbs_jahmyr", "Jahmyr Gibbs", Position::RB, "DET", 13, "CHI", true, 25.4, Pos, None),
    ("gibbs_jahmyr", "Jahmyr Gibbs", Position::RB, "DET", 16, "CHI", false, 30.2, Pos, Some("windy")),
    ("mccaffrey_christian", "Christian McCaffrey", Position::RB, "SF", 1, "PIT", false, 27.2, Pos, None),
    ("mccaffrey_christian", "Christian McCaffrey", Position::RB, "SF", 2, "LAR", true, 24.9, Pos, None),
    ("mccaffrey_christian", "Christian McCaffrey", Position::RB, "SF", 6, "SEA", true, 22.7, Neu, Some("rain")),
    ("mccaffrey_christian", "Christian McCaffrey", Position::RB, "SF", 10, "TB", false, 19.6, Neg, None),
    ("mccaffrey_christian", "Christian McCaffrey", Position::RB, "SF", 11, "SEA", false, 21.3, Pos, Some("rain")),
    ("mccaffrey_christian", "Christian McCaffrey", Position::RB, "SF", 14, "SEA", true, 23.8, Pos, None),
    ("nacua_puka", "Puka Nacua", Position::WR, "LAR", 1, "DET", false, 21.5, Neg, None),
    ("nacua_puka", "Puka Nacua", Position::WR, "LAR", 4, "CHI", false, 4.2, Neu, Some("windy")),
    ("nacua_puka", "Puka Nacua", Position::WR, "LAR", 8, "MIN", true, 19.6, Pos, None),
    ("nacua_puka", "Puka Nacua", Position::WR, "LAR", 9, "SEA", false, 11.4, Neg, Some("rain")),
    ("nacua_puka", "Puka Nacua", Position::WR, "LAR", 12, "NO", true, 26.7, Pos, None),
    ("nacua_puka", "Puka Nacua", Position::WR, "LAR", 13, "ARI", false, 17.3, Neu, None),
    ("chase_jamarr", "Ja'Marr Chase", Position::WR, "CIN", 1, "NE", true, 8.3, Neg, None),
    ("chase_jamarr", "Ja'Marr Chase", Position::WR, "CIN", 5, "BAL", false, 41.3, Neg, None),
    ("chase_jamarr", "Ja'Marr Chase", Position::WR, "CIN", 6, "NYG", false, 11.7, Pos, Some("clear")),
    ("chase_jamarr", "Ja'Marr Chase", Position::WR, "CIN", 10, "BAL", false, 44.4, Neg, None),
    ("chase_jamarr", "Ja'Marr Chase", Position::WR, "CIN", 11, "LAC", false, 25.7, Neg, None),
    ("chase_jamarr", "Ja'Marr Chase", Position::WR, "CIN", 15, "TEN", false, 19.1, Pos, Some("windy")),
    ("kelce_travis", "Travis Kelce", Position::TE, "KC", 1, "BAL", true, 3.4, Pos, None),
    ("kelce_travis", "Travis Kelce", Position::TE, "KC", 3, "ATL", false, 7.9, Neu, None),
    ("kelce_travis", "Travis Kelce", Position::TE, "KC", 5, "NO", true, 12.0, Pos, None),
    ("kelce_travis", "Travis Kelce", Position::TE, "KC", 8, "LV", false, 20.0, Pos, Some("windy")),
    ("kelce_travis", "Travis Kelce", Position::TE, "KC", 11, "BUF", false, 9.2, Neg, None),
    ("kelce_travis", "Travis Kelce", Position::TE, "KC", 14, "LV", true, 11.5, Neu, Some("light rain")),
    ("laporta_sam", "Sam LaPorta", Position::TE, "DET", 1, "LAR", true, 4.4, Neu, None),
    ("laporta_sam", "Sam LaPorta", Position::TE, "DET", 2, "TB", true, 7.1, Neg, None),
    ("laporta_sam", "Sam LaPorta", Position::TE, "DET", 7, "MIN", false, 14.2, Pos, None),
    ("laporta_sam", "Sam LaPorta", Position::TE, "DET", 10, "HOU", false, 2.8, Neg, None),
    ("laporta_sam", "Sam LaPorta", Position::TE, "DET", 13, "CHI", true, 11.6, Pos, None),
    ("laporta_sam", "Sam LaPorta", Position::TE, "DET", 16, "CHI", false, 16.3, Pos, Some("windy")),
];

fn scores_for(script: GameScript) -> (u16, u16) {
    match script {
        GameScript::Positive => (27, 20),
        GameScript::Negative => (17, 24),
        GameScript::Neutral => (21, 21),
    }
}

/// The inline 2024 corpus: two players per trained position, six games each.
pub fn sample_records() -> Vec<HistoricalRecord> {
    SAMPLE_GAMES
        .iter()
        .map(
            |&(id, name, position, team, week, opponent, is_home, points, script, weather)| {
                let (team_score, opponent_score) = scores_for(script);
                HistoricalRecord {
                    player_id: PlayerId::new(id),
                    name: name.to_string(),
                    position,
                    team: TeamCode::new(team),
                    season: Season::new(2024),
                    week: Week::new(week),
                    stats: GameStats::points_only(points),
                    game_context: GameContext {
                        opponent: TeamCode::new(opponent),
                        is_home,
                        weather: weather.map(str::to_string),
                        game_script: script,
                        team_score,
                        opponent_score,
                    },
                }
            },
        )
        .collect()
}
