//! Month-by-month team trend for a season: record, batting average,
//! and ERA per calendar month, dense across the whole year.

use crate::innings::parse_innings;
use crate::percentage::{Fixed, Pct};
use crate::rates;
use crate::rows::{GameBatting, GameInfo, GamePitching};
use crate::table::{row, Table};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MonthTrend {
    pub month: u32,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub winning_percentage: Option<f64>,
    pub batting_average: Option<f64>,
    pub era: Option<f64>,
}

fn in_month(date: Option<&str>, prefix: &str) -> bool {
    date.map_or(false, |date| date.starts_with(prefix))
}

/// Builds the twelve-month trend for one season. Game results count by
/// their exact token (勝ち/負け/分); the batting and pitching sums come
/// from the raw per-player game rows of the same months.
pub fn team_trend(
    year: u16,
    games: &[GameInfo],
    batting: &[GameBatting],
    pitching: &[GamePitching],
) -> Vec<MonthTrend> {
    (1..=12)
        .map(|month| {
            let prefix = format!("{}{:02}", year, month);

            let mut trend = MonthTrend {
                month,
                ..Default::default()
            };
            for game in games {
                if !in_month(game.date.as_deref(), &prefix) {
                    continue;
                }
                trend.games += 1;
                match game.result.as_deref() {
                    Some("勝ち") => trend.wins += 1,
                    Some("負け") => trend.losses += 1,
                    Some("分") => trend.draws += 1,
                    _ => {}
                }
            }
            if trend.games > 0 {
                trend.winning_percentage = rates::winning_percentage(trend.wins, trend.losses);
            }

            let (mut hits, mut at_bats) = (0, 0);
            for row in batting {
                if in_month(row.date.as_deref(), &prefix) {
                    hits += row.hits;
                    at_bats += row.at_bats;
                }
            }
            trend.batting_average = rates::batting_average(hits, at_bats);

            let (mut earned_runs, mut innings) = (0, 0.0);
            for row in pitching {
                if in_month(row.date.as_deref(), &prefix) {
                    earned_runs += row.earned_runs;
                    innings += parse_innings(row.inning.as_deref()).unwrap_or(0.0);
                }
            }
            trend.era = rates::era9(earned_runs, innings);

            trend
        })
        .collect()
}

/// The trend rendered as a table, one row per month.
pub fn trend_table(trends: &[MonthTrend]) -> Table<8> {
    let mut labels = Table::new(["月"], "text-left");
    let mut stats = Table::new(
        ["試合数", "勝", "負", "分", "勝率", "打率", "防御率"],
        "text-right",
    );
    for trend in trends {
        labels.push(row![format!("{}月", trend.month)]);
        stats.push(row![
            trend.games,
            trend.wins,
            trend.losses,
            trend.draws,
            Pct::<3>(trend.winning_percentage),
            Pct::<3>(trend.batting_average),
            Fixed::<2>(trend.era),
        ]);
    }
    stats.insert(0, labels)
}
