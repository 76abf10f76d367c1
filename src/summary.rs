//! Team-level summary tables: the season and career records and the
//! recent-games strip at the top of the team page.

use crate::percentage::{Fixed, Pct, PLACEHOLDER};
use crate::rows::{format_date, GameInfo, TeamSeason};
use crate::table::{row, Table, Value};
use std::collections::HashMap;

const RECORD_COLUMNS: [&str; 11] = [
    "試合",
    "勝",
    "負",
    "分",
    "勝率",
    "得点",
    "失点",
    "打率",
    "本塁打",
    "盗塁",
    "防御率",
];

fn record_row(stats: &mut Table<11>, season: &TeamSeason) {
    stats.push(row![
        season.games,
        season.wins,
        season.losses,
        season.draws,
        Pct::<3>(season.winning_percentage),
        season.runs_scored,
        season.runs_allowed,
        Pct::<3>(season.batting_average),
        season.home_runs,
        season.stolen_bases,
        Fixed::<2>(season.earned_run_average),
    ]);
}

/// The selected season's record.
pub fn season_table(rows: &[TeamSeason]) -> Table<12> {
    let mut years = Table::new(["年"], "text-left");
    let mut stats = Table::new(RECORD_COLUMNS, "text-right");
    for season in rows {
        years.push(row![season.year.map(u32::from)]);
        record_row(&mut stats, season);
    }
    stats.insert(0, years)
}

/// Every recorded season, newest first. The career header writes the
/// loss column as 敗.
pub fn career_table(rows: &[TeamSeason]) -> Table<12> {
    let mut sorted: Vec<&TeamSeason> = rows.iter().collect();
    sorted.sort_by(|a, b| b.year.unwrap_or(0).cmp(&a.year.unwrap_or(0)));

    let mut years = Table::new(["年"], "text-left");
    let mut columns = RECORD_COLUMNS;
    columns[2] = "敗";
    let mut stats = Table::new(columns, "text-right");
    for season in sorted {
        years.push(row![season.year.map(u32::from)]);
        record_row(&mut stats, season);
    }
    stats.insert(0, years)
}

fn our_side(game: &GameInfo) -> (Option<u32>, Option<u32>, Option<&str>) {
    if game.top_or_bottom.as_deref() == Some("top") {
        (
            game.top_team_score,
            game.bottom_team_score,
            game.bottom_team.as_deref(),
        )
    } else {
        (
            game.bottom_team_score,
            game.top_team_score,
            game.top_team.as_deref(),
        )
    }
}

fn score_text(score: Option<u32>) -> String {
    score.map_or_else(|| PLACEHOLDER.to_string(), |score| score.to_string())
}

fn result_cell(game: &GameInfo) -> String {
    let symbol = match game.result.as_deref() {
        Some("勝ち") => "◯",
        Some("負け") => "⚫︎",
        _ => PLACEHOLDER,
    };
    let (ours, theirs, _) = our_side(game);
    format!("{} {}-{}", symbol, score_text(ours), score_text(theirs))
}

fn named(name: Option<&str>) -> Value {
    Value::from(name.filter(|name| !name.is_empty()).unwrap_or(PLACEHOLDER))
}

/// The recent-games strip. Pitcher names only appear on the side the
/// result credits, and the opponent key goes through the roster map
/// before falling back to the raw key.
pub fn recent_games_table(games: &[GameInfo], team_names: &HashMap<String, String>) -> Table<7> {
    let mut table = Table::new(
        [
            "日付",
            "グラウンド",
            "結果",
            "対戦相手",
            "勝利投手",
            "敗戦投手",
            "ホームラン",
        ],
        "text-left",
    );
    for game in games {
        let (_, _, opponent_key) = our_side(game);
        let opponent = match opponent_key {
            Some(key) => team_names
                .get(key)
                .cloned()
                .unwrap_or_else(|| key.to_string()),
            None => PLACEHOLDER.to_string(),
        };
        let won = game.result.as_deref() == Some("勝ち");
        let lost = game.result.as_deref() == Some("負け");
        table.push(row![
            format_date(game.date.as_deref()),
            named(game.place.as_deref()),
            result_cell(game),
            opponent,
            if won {
                named(game.win_pitcher.as_deref())
            } else {
                Value::from(PLACEHOLDER)
            },
            if lost {
                named(game.lose_pitcher.as_deref())
            } else {
                Value::from(PLACEHOLDER)
            },
            named(game.hr_player.as_deref()),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season(year: u16, wins: u32) -> TeamSeason {
        TeamSeason {
            year: Some(year),
            games: 20,
            wins,
            losses: 20 - wins,
            winning_percentage: Some(f64::from(wins) / 20.0),
            batting_average: Some(0.275),
            earned_run_average: Some(2.45),
            ..Default::default()
        }
    }

    #[test]
    fn record_tables_differ_only_in_the_loss_header() {
        let rows = vec![season(2024, 12), season(2025, 15)];
        let current = season_table(&rows[1..]);
        assert_eq!(current.header[0], "年");
        assert_eq!(current.header[3], "負");
        assert_eq!(current.rows.len(), 1);
        let cells: Vec<String> = current.rows[0]
            .data
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            cells,
            ["2025", "20", "15", "5", "0", ".750", "0", "0", ".275", "0", "0", "2.45"]
        );

        let career = career_table(&rows);
        assert_eq!(career.header[3], "敗");
        assert_eq!(career.rows[0].data[0].to_string(), "2025");
        assert_eq!(career.rows[1].data[0].to_string(), "2024");
    }

    fn game(result: &str, side: &str) -> GameInfo {
        GameInfo {
            date: Some("20250412".to_string()),
            place: Some("多摩川G".to_string()),
            top_or_bottom: Some(side.to_string()),
            top_team: Some("hawks".to_string()),
            top_team_score: Some(5),
            bottom_team: Some("eagles".to_string()),
            bottom_team_score: Some(3),
            result: Some(result.to_string()),
            win_pitcher: Some("田中".to_string()),
            lose_pitcher: Some("相手".to_string()),
            hr_player: Some("山田".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn result_cell_reads_from_our_side() {
        let mut names = HashMap::new();
        names.insert("eagles".to_string(), "イーグルス".to_string());

        let table = recent_games_table(&[game("勝ち", "top")], &names);
        let cells: Vec<String> = table.rows[0].data.iter().map(ToString::to_string).collect();
        assert_eq!(
            cells,
            ["2025/04/12", "多摩川G", "◯ 5-3", "イーグルス", "田中", "—", "山田"]
        );

        let table = recent_games_table(&[game("負け", "bottom")], &names);
        let cells: Vec<String> = table.rows[0].data.iter().map(ToString::to_string).collect();
        assert_eq!(cells[2], "⚫︎ 3-5");
        assert_eq!(cells[3], "hawks");
        assert_eq!(cells[4], "—");
        assert_eq!(cells[5], "相手");
    }

    #[test]
    fn draws_and_blanks_fall_back_to_dashes() {
        let mut game = game("分", "top");
        game.top_team_score = None;
        game.bottom_team_score = None;
        game.hr_player = None;
        let table = recent_games_table(&[game], &HashMap::new());
        let cells: Vec<String> = table.rows[0].data.iter().map(ToString::to_string).collect();
        assert_eq!(cells[2], "— —-—");
        // no roster entry, the raw key shows
        assert_eq!(cells[3], "eagles");
        assert_eq!(cells[4], "—");
        assert_eq!(cells[5], "—");
        assert_eq!(cells[6], "—");
    }
}
