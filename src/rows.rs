//! Row types for the tables the data source serves. Counting stats are
//! normalized here at the boundary: a null count deserializes to zero,
//! while rates, innings text, and identity fields keep their absence.
//! Aggregation code downstream never sees a raw null.
//!
//! Several wire names carry scraper-era misspellings (`plate_apperance`,
//! `oponent_error`, `shotout`); the renames pin them in one place.

use crate::percentage::PLACEHOLDER;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

fn null_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Team {
    pub team: Option<String>,
    pub team_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Player {
    pub team: Option<String>,
    pub player_number: Option<u32>,
    pub player_name: Option<String>,
    pub nickname: Option<String>,
}

/// One game from the schedule scrape. Only the fields the stats pages
/// consume are modeled; the per-inning line score stays on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameInfo {
    pub team: Option<String>,
    pub url: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub place: Option<String>,
    pub top_or_bottom: Option<String>,
    pub top_team: Option<String>,
    pub top_team_score: Option<u32>,
    pub bottom_team: Option<String>,
    pub bottom_team_score: Option<u32>,
    pub result: Option<String>,
    pub win_pitcher: Option<String>,
    pub lose_pitcher: Option<String>,
    pub save_pitcher: Option<String>,
    pub hr_player: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamSeason {
    pub team: Option<String>,
    pub year: Option<u16>,
    #[serde(default, deserialize_with = "null_u32")]
    pub games: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub wins: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub losses: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub draws: u32,
    pub winning_percentage: Option<f64>,
    #[serde(default, deserialize_with = "null_u32")]
    pub runs_scored: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub runs_allowed: u32,
    pub batting_average: Option<f64>,
    #[serde(default, deserialize_with = "null_u32")]
    pub home_runs: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub stolen_bases: u32,
    pub earned_run_average: Option<f64>,
}

/// Season batting line, one per player per year.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonBatting {
    pub team: Option<String>,
    pub year: Option<u16>,
    pub player_number: Option<u32>,
    pub player: Option<String>,
    #[serde(default, deserialize_with = "null_u32")]
    pub games_played: u32,
    pub batting_average: Option<f64>,
    #[serde(rename = "plate_appearance", default, deserialize_with = "null_u32")]
    pub plate_appearances: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub at_bats: u32,
    #[serde(rename = "hit", default, deserialize_with = "null_u32")]
    pub hits: u32,
    #[serde(rename = "hr", default, deserialize_with = "null_u32")]
    pub home_runs: u32,
    #[serde(rename = "rbi", default, deserialize_with = "null_u32")]
    pub runs_batted_in: u32,
    #[serde(rename = "run", default, deserialize_with = "null_u32")]
    pub runs: u32,
    #[serde(rename = "stolen_base", default, deserialize_with = "null_u32")]
    pub stolen_bases: u32,
    pub on_base_percentage: Option<f64>,
    pub slugging_percentage: Option<f64>,
    #[serde(rename = "average_in_scoring")]
    pub scoring_average: Option<f64>,
    pub ops: Option<f64>,
    #[serde(rename = "double", default, deserialize_with = "null_u32")]
    pub doubles: u32,
    #[serde(rename = "triple", default, deserialize_with = "null_u32")]
    pub triples: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub total_bases: u32,
    #[serde(rename = "strikeout", default, deserialize_with = "null_u32")]
    pub strikeouts: u32,
    #[serde(rename = "walk", default, deserialize_with = "null_u32")]
    pub walks: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub hit_by_pitch: u32,
    #[serde(rename = "sacrifice_bunt", default, deserialize_with = "null_u32")]
    pub sacrifice_bunts: u32,
    #[serde(rename = "sacrifice_fly", default, deserialize_with = "null_u32")]
    pub sacrifice_flies: u32,
    #[serde(rename = "double_play", default, deserialize_with = "null_u32")]
    pub double_plays: u32,
    #[serde(rename = "opponent_error", default, deserialize_with = "null_u32")]
    pub opponent_errors: u32,
    #[serde(rename = "own_error", default, deserialize_with = "null_u32")]
    pub own_errors: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub caught_stealing: u32,
}

/// Season pitching line. `innings_pitched` stays in the recorded
/// `N回F/3` text form; parse on demand.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonPitching {
    pub team: Option<String>,
    pub year: Option<u16>,
    pub player_number: Option<u32>,
    pub player: Option<String>,
    #[serde(default, deserialize_with = "null_u32")]
    pub games_played: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub wins: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub losses: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub holds: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub saves: u32,
    pub win_percentage: Option<f64>,
    pub era: Option<f64>,
    pub innings_pitched: Option<String>,
    #[serde(default, deserialize_with = "null_u32")]
    pub pitches_thrown: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub runs_allowed: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub earned_runs_allowed: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub complete_games: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub shutouts: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub hits_allowed: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub home_runs_allowed: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub strikeouts: u32,
    pub strikeout_rate: Option<f64>,
    #[serde(default, deserialize_with = "null_u32")]
    pub walks_allowed: u32,
    #[serde(rename = "hit_batters", default, deserialize_with = "null_u32")]
    pub hit_batsmen: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub balks: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub wild_pitches: u32,
    pub k_bb: Option<f64>,
    pub whip: Option<f64>,
}

/// Per-game batting line. `order` and `position` keep their absence so
/// the breakdown frames can drop unknown slots.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameBatting {
    pub team: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub url: Option<String>,
    pub player_number: Option<u32>,
    pub player: Option<String>,
    pub order: Option<u32>,
    pub position: Option<String>,
    #[serde(rename = "plate_apperance", default, deserialize_with = "null_u32")]
    pub plate_appearances: u32,
    #[serde(rename = "at_bat", default, deserialize_with = "null_u32")]
    pub at_bats: u32,
    #[serde(rename = "hit", default, deserialize_with = "null_u32")]
    pub hits: u32,
    #[serde(rename = "hr", default, deserialize_with = "null_u32")]
    pub home_runs: u32,
    #[serde(rename = "rbi", default, deserialize_with = "null_u32")]
    pub runs_batted_in: u32,
    #[serde(rename = "run", default, deserialize_with = "null_u32")]
    pub runs: u32,
    #[serde(rename = "stolen_base", default, deserialize_with = "null_u32")]
    pub stolen_bases: u32,
    #[serde(rename = "double", default, deserialize_with = "null_u32")]
    pub doubles: u32,
    #[serde(rename = "triple", default, deserialize_with = "null_u32")]
    pub triples: u32,
    #[serde(rename = "at_bat_in_scoring", default, deserialize_with = "null_u32")]
    pub scoring_at_bats: u32,
    #[serde(rename = "hit_in_scoring", default, deserialize_with = "null_u32")]
    pub scoring_hits: u32,
    #[serde(rename = "strikeout", default, deserialize_with = "null_u32")]
    pub strikeouts: u32,
    #[serde(rename = "walk", default, deserialize_with = "null_u32")]
    pub walks: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub hit_by_pitch: u32,
    #[serde(rename = "sacrifice_bunt", default, deserialize_with = "null_u32")]
    pub sacrifice_bunts: u32,
    #[serde(rename = "sacrifice_fly", default, deserialize_with = "null_u32")]
    pub sacrifice_flies: u32,
    #[serde(rename = "double_play", default, deserialize_with = "null_u32")]
    pub double_plays: u32,
    #[serde(rename = "oponent_error", default, deserialize_with = "null_u32")]
    pub opponent_errors: u32,
    #[serde(rename = "own_error", default, deserialize_with = "null_u32")]
    pub own_errors: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub caught_stealing: u32,
}

/// Per-game pitching line. `result` is the decision token (勝/敗/H/S or
/// free text); `order` is 1 for the starter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GamePitching {
    pub team: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub url: Option<String>,
    pub player_number: Option<u32>,
    pub player: Option<String>,
    pub result: Option<String>,
    pub inning: Option<String>,
    #[serde(default, deserialize_with = "null_u32")]
    pub pitches: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub runs_allowed: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub earned_runs: u32,
    pub complete_game: Option<String>,
    #[serde(rename = "shotout")]
    pub shutout: Option<String>,
    #[serde(default, deserialize_with = "null_u32")]
    pub hits_allowed: u32,
    #[serde(rename = "hr_allowed", default, deserialize_with = "null_u32")]
    pub home_runs_allowed: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub strikeouts: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub walks_allowed: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub hit_batsmen: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub balks: u32,
    #[serde(default, deserialize_with = "null_u32")]
    pub wild_pitches: u32,
    pub order: Option<u32>,
}

/// A leaderboard entry is only real if the row names somebody: a number
/// other than zero, or a non-blank name.
pub fn has_identity(player_number: Option<u32>, player: Option<&str>) -> bool {
    player_number.map_or(false, |n| n != 0)
        || player.map_or(false, |name| !name.trim().is_empty())
}

/// `12 山田` style label, falling back to the dash when the row names
/// nobody.
pub fn display_name(player_number: Option<u32>, player: Option<&str>) -> String {
    let mut parts = Vec::new();
    if let Some(number) = player_number.filter(|n| *n != 0) {
        parts.push(number.to_string());
    }
    if let Some(name) = player.map(str::trim).filter(|name| !name.is_empty()) {
        parts.push(name.to_string());
    }
    if parts.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        parts.join(" ")
    }
}

/// Team label for headings: the text inside parentheses when the scraped
/// name carries a short form, upper-cased either way.
pub fn display_team_name(team_name: Option<&str>, team: Option<&str>) -> String {
    let name = match team_name.filter(|n| !n.is_empty()) {
        Some(name) => name,
        None => match team.filter(|t| !t.is_empty()) {
            Some(team) => team,
            None => return PLACEHOLDER.to_string(),
        },
    };
    let short = name
        .split_once('(')
        .or_else(|| name.split_once('（'))
        .and_then(|(_, rest)| rest.split_once(')').or_else(|| rest.split_once('）')))
        .map(|(inner, _)| inner)
        .filter(|inner| !inner.is_empty());
    short.unwrap_or(name).to_uppercase()
}

/// Bucket label for rows whose game has no recorded venue.
pub const UNREGISTERED: &str = "未登録";

/// Venue lookup for the ground breakdowns: scrape url → place. Stat rows
/// carry the game url, not the venue, so grouping joins through this map.
pub fn places_by_url(games: &[GameInfo]) -> HashMap<String, Option<String>> {
    games
        .iter()
        .map(|game| {
            (
                game.url.clone().unwrap_or_default(),
                game.place.clone(),
            )
        })
        .collect()
}

pub fn place_label(place: Option<&str>) -> String {
    match place.map(str::trim).filter(|p| !p.is_empty()) {
        Some(place) => place.to_string(),
        None => UNREGISTERED.to_string(),
    }
}

/// `20250412` → `2025/04/12`. Dates in any other shape pass through
/// as-is; a missing date is the dash.
pub fn format_date(date: Option<&str>) -> String {
    let date = match date {
        Some(date) => date,
        None => return PLACEHOLDER.to_string(),
    };
    match (date.len(), date.get(..4), date.get(4..6), date.get(6..8)) {
        (8, Some(year), Some(month), Some(day)) => format!("{}/{}/{}", year, month, day),
        _ => date.to_string(),
    }
}

pub fn year_of(date: Option<&str>) -> Option<u16> {
    date?.get(..4)?.parse().ok()
}

pub fn month_of(date: Option<&str>) -> Option<u32> {
    let date = date?;
    if date.len() < 6 {
        return None;
    }
    let month: u32 = date.get(4..6)?.parse().ok()?;
    (1..=12).contains(&month).then_some(month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_counts_are_zero() {
        let row: GameBatting = serde_json::from_value(json!({
            "team": "hawks",
            "date": "20250412",
            "player_number": 12,
            "player": "山田",
            "order": 3,
            "position": "遊",
            "plate_apperance": 4,
            "at_bat": null,
            "hit": 2,
            "oponent_error": null
        }))
        .unwrap();
        assert_eq!(row.plate_appearances, 4);
        assert_eq!(row.at_bats, 0);
        assert_eq!(row.hits, 2);
        assert_eq!(row.opponent_errors, 0);
        assert_eq!(row.order, Some(3));
    }

    #[test]
    fn rates_keep_their_absence() {
        let row: SeasonPitching = serde_json::from_value(json!({
            "year": 2025,
            "player_number": 18,
            "player": "佐藤",
            "wins": 4,
            "era": null,
            "innings_pitched": "34回1/3",
            "hit_batters": 2
        }))
        .unwrap();
        assert_eq!(row.era, None);
        assert_eq!(row.innings_pitched.as_deref(), Some("34回1/3"));
        assert_eq!(row.hit_batsmen, 2);
        assert_eq!(row.losses, 0);
    }

    #[test]
    fn identity() {
        assert!(has_identity(Some(12), None));
        assert!(has_identity(None, Some("山田")));
        assert!(!has_identity(Some(0), Some("  ")));
        assert!(!has_identity(None, None));

        assert_eq!(display_name(Some(12), Some("山田")), "12 山田");
        assert_eq!(display_name(None, Some("山田")), "山田");
        assert_eq!(display_name(Some(0), None), "—");
    }

    #[test]
    fn team_labels() {
        assert_eq!(
            display_team_name(Some("スワローズファン友の会(スワ友)"), None),
            "スワ友"
        );
        assert_eq!(display_team_name(Some("hawks"), None), "HAWKS");
        assert_eq!(display_team_name(None, Some("eagles")), "EAGLES");
        assert_eq!(display_team_name(None, None), "—");
    }

    #[test]
    fn places() {
        let games = vec![
            GameInfo {
                url: Some("g1".into()),
                place: Some("多摩川G".into()),
                ..Default::default()
            },
            GameInfo {
                url: Some("g2".into()),
                place: None,
                ..Default::default()
            },
        ];
        let places = places_by_url(&games);
        let lookup = |url: &str| places.get(url).and_then(|p| p.as_deref());
        assert_eq!(place_label(lookup("g1")), "多摩川G");
        assert_eq!(place_label(lookup("g2")), "未登録");
        assert_eq!(place_label(Some("  ")), "未登録");
        assert_eq!(place_label(None), "未登録");
    }

    #[test]
    fn date_parts() {
        assert_eq!(year_of(Some("20250412")), Some(2025));
        assert_eq!(year_of(Some("bad")), None);
        assert_eq!(year_of(None), None);
        assert_eq!(month_of(Some("20250412")), Some(4));
        assert_eq!(month_of(Some("202513xx")), None);
        assert_eq!(month_of(Some("2025")), None);
    }

    #[test]
    fn dates_format_only_when_eight_digits() {
        assert_eq!(format_date(Some("20250412")), "2025/04/12");
        assert_eq!(format_date(Some("2025春")), "2025春");
        assert_eq!(format_date(Some("日程未定")), "日程未定");
        assert_eq!(format_date(None), "—");
    }
}
