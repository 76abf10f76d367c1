//! Batting aggregation: season tables for the team pages, the player
//! dashboard and career table, and the per-game breakdowns by batting
//! order, fielding position, month, and ground.

use crate::percentage::{Fixed, Pct, PLACEHOLDER};
use crate::rates;
use crate::rows::{
    display_name, format_date, has_identity, month_of, place_label, GameBatting, SeasonBatting,
    UNREGISTERED,
};
use crate::table::{row, Table};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::ops::AddAssign;

/// Canonical fielding positions, in table order.
pub const POSITIONS: [&str; 10] = ["投", "捕", "一", "二", "三", "遊", "左", "中", "右", "DH"];

/// Collapses scraped position text onto the canonical set: exact match
/// first, then the leading character (`投手` → `投`, `指名打者` → `DH`).
/// Anything else drops out of the position breakdown.
pub fn normalize_position(raw: &str) -> Option<&'static str> {
    if let Some(position) = POSITIONS.iter().find(|p| **p == raw) {
        return Some(position);
    }
    match raw.chars().next()? {
        '投' => Some("投"),
        '捕' => Some("捕"),
        '一' => Some("一"),
        '二' => Some("二"),
        '三' => Some("三"),
        '遊' => Some("遊"),
        '左' => Some("左"),
        '中' => Some("中"),
        '右' => Some("右"),
        '指' => Some("DH"),
        _ => None,
    }
}

/// Sums of the batting columns the breakdown tables show.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BattingTotals {
    pub plate_appearances: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub home_runs: u32,
    pub runs_batted_in: u32,
    pub stolen_bases: u32,
    pub scoring_at_bats: u32,
    pub scoring_hits: u32,
}

impl AddAssign<&GameBatting> for BattingTotals {
    fn add_assign(&mut self, game: &GameBatting) {
        self.plate_appearances += game.plate_appearances;
        self.at_bats += game.at_bats;
        self.hits += game.hits;
        self.home_runs += game.home_runs;
        self.runs_batted_in += game.runs_batted_in;
        self.stolen_bases += game.stolen_bases;
        self.scoring_at_bats += game.scoring_at_bats;
        self.scoring_hits += game.scoring_hits;
    }
}

impl BattingTotals {
    /// A slot that has data renders `.000` with no at-bats, not a dash.
    pub fn average(&self) -> f64 {
        rates::batting_average(self.hits, self.at_bats).unwrap_or(0.0)
    }

    pub fn scoring_average(&self) -> Option<f64> {
        rates::batting_average(self.scoring_hits, self.scoring_at_bats)
    }
}

/// Batting-order breakdown over a fixed 1..9 frame. Slots nobody batted
/// in stay `None` and render as placeholder rows.
pub fn by_order(rows: &[GameBatting]) -> Vec<(String, Option<BattingTotals>)> {
    let mut frame: [Option<BattingTotals>; 9] = [None; 9];
    for row in rows {
        if let Some(slot) = row.order.filter(|order| (1..=9).contains(order)) {
            *frame[(slot - 1) as usize].get_or_insert_with(Default::default) += row;
        }
    }
    frame
        .into_iter()
        .enumerate()
        .map(|(i, totals)| (format!("{}番", i + 1), totals))
        .collect()
}

/// Position breakdown over the canonical ten positions.
pub fn by_position(rows: &[GameBatting]) -> Vec<(String, Option<BattingTotals>)> {
    let mut buckets: HashMap<&'static str, BattingTotals> = HashMap::new();
    for row in rows {
        if let Some(position) = normalize_position(row.position.as_deref().unwrap_or_default()) {
            *buckets.entry(position).or_default() += row;
        }
    }
    POSITIONS
        .iter()
        .map(|position| (position.to_string(), buckets.get(position).copied()))
        .collect()
}

/// Month breakdown over a fixed 1..12 frame. A month only counts as
/// having data once somebody actually came to the plate in it.
pub fn by_month(rows: &[GameBatting]) -> Vec<(String, Option<BattingTotals>)> {
    let mut frame = [BattingTotals::default(); 12];
    for row in rows {
        if let Some(month) = month_of(row.date.as_deref()) {
            frame[(month - 1) as usize] += row;
        }
    }
    frame
        .into_iter()
        .enumerate()
        .map(|(i, totals)| {
            let has_data = totals.plate_appearances > 0 || totals.at_bats > 0;
            (format!("{}月", i + 1), has_data.then_some(totals))
        })
        .collect()
}

/// Ground breakdown. Groups are whatever venues appear in the rows, via
/// the url → place join; unresolvable venues pool under 未登録, which
/// always sorts last.
pub fn by_ground(
    rows: &[GameBatting],
    places: &HashMap<String, Option<String>>,
) -> Vec<(String, Option<BattingTotals>)> {
    let mut buckets: IndexMap<String, BattingTotals> = IndexMap::new();
    for row in rows {
        let place = row
            .url
            .as_deref()
            .and_then(|url| places.get(url))
            .and_then(|place| place.as_deref());
        *buckets.entry(place_label(place)).or_default() += row;
    }
    let mut groups: Vec<(String, Option<BattingTotals>)> = buckets
        .into_iter()
        .map(|(label, totals)| (label, Some(totals)))
        .collect();
    groups.sort_by(|(a, _), (b, _)| match (a == UNREGISTERED, b == UNREGISTERED) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => a.cmp(b),
    });
    groups
}

/// Renders a breakdown as a table, whatever the grouping key was.
pub fn group_table(label: &str, groups: &[(String, Option<BattingTotals>)]) -> Table<11> {
    let mut labels = Table::new([label], "text-left");
    let mut stats = Table::new(
        [
            "打率",
            "打席",
            "打数",
            "安打",
            "本塁打",
            "打点",
            "盗塁",
            "得点圏打率",
            "得点圏打数",
            "得点圏安打",
        ],
        "text-right",
    );
    for (name, totals) in groups {
        labels.push(row![name.as_str()]);
        match totals {
            Some(t) => {
                // scoring columns stay dashed until a scoring at-bat exists
                let scoring = |value: u32| (t.scoring_at_bats > 0).then_some(value);
                stats.push(row![
                    Pct::<3>(Some(t.average())),
                    t.plate_appearances,
                    t.at_bats,
                    t.hits,
                    t.home_runs,
                    t.runs_batted_in,
                    t.stolen_bases,
                    Pct::<3>(t.scoring_average()),
                    scoring(t.scoring_at_bats),
                    scoring(t.scoring_hits),
                ]);
            }
            None => stats.push(row![
                Pct::<3>(None),
                None::<u32>,
                None::<u32>,
                None::<u32>,
                None::<u32>,
                None::<u32>,
                None::<u32>,
                Pct::<3>(None),
                None::<u32>,
                None::<u32>,
            ]),
        }
    }
    stats.insert(0, labels)
}

fn ordered(rows: &[SeasonBatting]) -> Vec<&SeasonBatting> {
    let mut rows: Vec<&SeasonBatting> = rows
        .iter()
        .filter(|row| has_identity(row.player_number, row.player.as_deref()))
        .collect();
    rows.sort_by(|a, b| {
        b.year
            .unwrap_or(0)
            .cmp(&a.year.unwrap_or(0))
            .then(a.player_number.unwrap_or(0).cmp(&b.player_number.unwrap_or(0)))
    });
    rows
}

const LIST_HEADERS: [&str; 25] = [
    "試合",
    "打率",
    "打席",
    "打数",
    "安打",
    "本塁打",
    "打点",
    "得点",
    "盗塁",
    "出塁率",
    "長打率",
    "OPS",
    "得点圏打率",
    "二塁打",
    "三塁打",
    "塁打数",
    "三振",
    "四球",
    "死球",
    "犠打",
    "犠飛",
    "併殺打",
    "敵失",
    "失策",
    "盗塁阻止",
];

fn list_row(stats: &mut Table<25>, row: &SeasonBatting) {
    stats.push(row![
        row.games_played,
        Pct::<3>(row.batting_average),
        row.plate_appearances,
        row.at_bats,
        row.hits,
        row.home_runs,
        row.runs_batted_in,
        row.runs,
        row.stolen_bases,
        Pct::<3>(row.on_base_percentage),
        Pct::<3>(row.slugging_percentage),
        Fixed::<3>(row.ops),
        Pct::<3>(row.scoring_average),
        row.doubles,
        row.triples,
        row.total_bases,
        row.strikeouts,
        row.walks,
        row.hit_by_pitch,
        row.sacrifice_bunts,
        row.sacrifice_flies,
        row.double_plays,
        row.opponent_errors,
        row.own_errors,
        row.caught_stealing,
    ]);
}

/// One season of every hitter on the roster, linked to their player
/// pages. Rows that name nobody are dropped.
pub fn list_table(rows: &[SeasonBatting], team: &str) -> Table<26> {
    let mut players = Table::new(["選手"], "text-left");
    let mut stats = Table::new(LIST_HEADERS, "text-right");
    for row in ordered(rows) {
        players.push(row![display_name(row.player_number, row.player.as_deref())]);
        if let Some(number) = row.player_number {
            players.set_href(0, format!("/team/{}/player/{}", team, number));
        }
        list_row(&mut stats, row);
    }
    stats.insert(0, players)
}

/// Career variant of [`list_table`] with a year column, newest first.
pub fn list_table_with_years(rows: &[SeasonBatting], team: &str) -> Table<27> {
    let mut years = Table::new(["年"], "text-left");
    for row in ordered(rows) {
        years.push(row![row.year.map(u32::from)]);
    }
    list_table(rows, team).insert(0, years)
}

/// Year-by-year batting table on the player page.
pub fn career_table(rows: &[SeasonBatting]) -> Table<15> {
    let mut sorted: Vec<&SeasonBatting> = rows.iter().collect();
    sorted.sort_by(|a, b| b.year.unwrap_or(0).cmp(&a.year.unwrap_or(0)));

    let mut years = Table::new(["年度"], "text-left");
    let mut stats = Table::new(
        [
            "試合",
            "打率",
            "打席",
            "打数",
            "安打",
            "本塁打",
            "打点",
            "得点",
            "盗塁",
            "出塁率",
            "長打率",
            "OPS",
            "三振",
            "四球",
        ],
        "text-right",
    );
    for row in sorted {
        years.push(row![row.year.map(u32::from)]);
        stats.push(row![
            row.games_played,
            Pct::<3>(row.batting_average),
            row.plate_appearances,
            row.at_bats,
            row.hits,
            row.home_runs,
            row.runs_batted_in,
            row.runs,
            row.stolen_bases,
            Pct::<3>(row.on_base_percentage),
            Pct::<3>(row.slugging_percentage),
            Fixed::<3>(row.ops),
            row.strikeouts,
            row.walks,
        ]);
    }
    stats.insert(0, years)
}

/// The player's three most recent games, in the order fetched.
pub fn recent_table(rows: &[GameBatting]) -> Table<9> {
    let mut dates = Table::new(["日付"], "text-left");
    let mut stats = Table::new(
        ["打順", "守備位置", "打席", "打数", "安打", "本塁打", "打点", "盗塁"],
        "text-right",
    );
    for game in rows.iter().take(3) {
        dates.push(row![format_date(game.date.as_deref())]);
        stats.push(row![
            game.order,
            game.position.as_deref().unwrap_or(PLACEHOLDER),
            game.plate_appearances,
            game.at_bats,
            game.hits,
            game.home_runs,
            game.runs_batted_in,
            game.stolen_bases,
        ]);
    }
    stats.insert(0, dates)
}

/// The season-summary card on the player page: label/value pairs in
/// display order.
pub fn dashboard(row: &SeasonBatting) -> Vec<(&'static str, String)> {
    vec![
        ("試合", row.games_played.to_string()),
        ("打率", Pct::<3>(row.batting_average).to_string()),
        ("打席", row.plate_appearances.to_string()),
        ("打数", row.at_bats.to_string()),
        ("安打", row.hits.to_string()),
        ("本塁打", row.home_runs.to_string()),
        ("打点", row.runs_batted_in.to_string()),
        ("盗塁", row.stolen_bases.to_string()),
        ("得点圏打率", Pct::<3>(row.scoring_average).to_string()),
        ("出塁率", Pct::<3>(row.on_base_percentage).to_string()),
        ("長打率", Pct::<3>(row.slugging_percentage).to_string()),
        ("OPS", Fixed::<3>(row.ops).to_string()),
        ("得点", row.runs.to_string()),
        ("三振", row.strikeouts.to_string()),
        ("二塁打", row.doubles.to_string()),
        ("三塁打", row.triples.to_string()),
        ("塁打数", row.total_bases.to_string()),
        ("四球", row.walks.to_string()),
        ("死球", row.hit_by_pitch.to_string()),
        ("犠打", row.sacrifice_bunts.to_string()),
        ("犠飛", row.sacrifice_flies.to_string()),
        ("併殺打", row.double_plays.to_string()),
        ("敵失", row.opponent_errors.to_string()),
        ("盗塁阻止", row.caught_stealing.to_string()),
        ("エラー", row.own_errors.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(
        date: &str,
        order: Option<u32>,
        position: Option<&str>,
        pa: u32,
        ab: u32,
        hits: u32,
    ) -> GameBatting {
        GameBatting {
            date: Some(date.to_string()),
            order,
            position: position.map(str::to_string),
            plate_appearances: pa,
            at_bats: ab,
            hits,
            ..Default::default()
        }
    }

    #[test]
    fn position_normalization() {
        assert_eq!(normalize_position("遊"), Some("遊"));
        assert_eq!(normalize_position("遊撃手"), Some("遊"));
        assert_eq!(normalize_position("DH"), Some("DH"));
        assert_eq!(normalize_position("指名打者"), Some("DH"));
        assert_eq!(normalize_position("ファースト"), None);
        assert_eq!(normalize_position(""), None);
    }

    #[test]
    fn order_frame() {
        let rows = vec![
            game("20250412", Some(3), None, 4, 4, 2),
            game("20250419", Some(3), None, 3, 2, 1),
            game("20250419", Some(12), None, 3, 3, 3),
            game("20250419", None, None, 3, 3, 3),
        ];
        let groups = by_order(&rows);
        assert_eq!(groups.len(), 9);
        assert_eq!(groups[0].0, "1番");
        assert_eq!(groups[0].1, None);
        let third = groups[2].1.unwrap();
        assert_eq!(third.plate_appearances, 7);
        assert_eq!(third.hits, 3);
        // out-of-range and missing orders land nowhere
        let total: u32 = groups.iter().filter_map(|(_, t)| *t).map(|t| t.hits).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn position_frame_covers_every_slot() {
        let rows = vec![
            game("20250412", None, Some("遊撃手"), 4, 4, 1),
            game("20250419", None, Some("遊"), 4, 3, 2),
            game("20250419", None, Some("指名打者"), 2, 2, 0),
        ];
        let groups = by_position(&rows);
        let labels: Vec<&str> = groups.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, POSITIONS.to_vec());
        let shortstop = groups[5].1.unwrap();
        assert_eq!(shortstop.at_bats, 7);
        assert_eq!(shortstop.hits, 3);
        assert_eq!(groups[9].1.unwrap().plate_appearances, 2);
        assert_eq!(groups[0].1, None);
    }

    #[test]
    fn month_frame_is_dense() {
        let rows = vec![
            game("20250412", None, None, 4, 4, 2),
            game("20250811", None, None, 5, 4, 1),
        ];
        let groups = by_month(&rows);
        assert_eq!(groups.len(), 12);
        assert_eq!(groups[2].0, "3月");
        assert_eq!(groups[2].1, None);
        assert_eq!(groups[3].1.unwrap().hits, 2);
        assert_eq!(groups[7].1.unwrap().plate_appearances, 5);
    }

    #[test]
    fn ground_groups_pool_unregistered_last() {
        let mut places = HashMap::new();
        places.insert("g1".to_string(), Some("多摩川G".to_string()));
        places.insert("g2".to_string(), Some("".to_string()));
        places.insert("g3".to_string(), Some("府中G".to_string()));

        let with_url = |url: &str| GameBatting {
            url: Some(url.to_string()),
            at_bats: 3,
            hits: 1,
            ..Default::default()
        };
        let rows = vec![
            with_url("g1"),
            with_url("g2"),
            with_url("g3"),
            with_url("unknown"),
        ];
        let groups = by_ground(&rows, &places);
        let labels: Vec<&str> = groups.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["多摩川G", "府中G", "未登録"]);
        // blank place and unresolved url pool together
        assert_eq!(groups[2].1.unwrap().at_bats, 6);
    }

    #[test]
    fn group_table_cells() {
        let touched = BattingTotals {
            plate_appearances: 3,
            ..Default::default()
        };
        let groups = vec![
            ("1番".to_string(), Some(touched)),
            ("2番".to_string(), None),
        ];
        let table = group_table("打順", &groups);
        assert_eq!(table.header[0], "打順");
        let first: Vec<String> = table.rows[0].data.iter().map(ToString::to_string).collect();
        // zero at-bats in a touched slot is a real .000, scoring stays dashed
        assert_eq!(
            first,
            ["1番", ".000", "3", "0", "0", "0", "0", "0", "—", "—", "—"]
        );
        let second: Vec<String> = table.rows[1].data.iter().map(ToString::to_string).collect();
        assert_eq!(second[0], "2番");
        assert!(second.iter().skip(1).all(|cell| cell == "—"));
    }

    #[test]
    fn list_table_links_and_filters() {
        let rows = vec![
            SeasonBatting {
                player_number: Some(12),
                player: Some("山田".to_string()),
                hits: 20,
                ..Default::default()
            },
            SeasonBatting {
                player_number: None,
                player: Some("  ".to_string()),
                hits: 99,
                ..Default::default()
            },
        ];
        let table = list_table(&rows, "hawks");
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].data[0].to_string(), "12 山田");
        assert_eq!(table.rows[0].href[0], "/team/hawks/player/12");
    }

    #[test]
    fn recent_table_takes_three() {
        let mut rows = vec![
            game("20250426", Some(3), Some("遊"), 4, 4, 2),
            game("20250419", None, None, 3, 3, 1),
            game("20250412", Some(5), Some("一"), 4, 3, 0),
            game("20250405", Some(5), Some("一"), 4, 4, 1),
        ];
        rows[0].runs_batted_in = 2;
        let table = recent_table(&rows);
        assert_eq!(table.rows.len(), 3);
        let first: Vec<String> = table.rows[0].data.iter().map(ToString::to_string).collect();
        assert_eq!(
            first,
            ["2025/04/26", "3", "遊", "4", "4", "2", "0", "2", "0"]
        );
        let second: Vec<String> = table.rows[1].data.iter().map(ToString::to_string).collect();
        assert_eq!(second[1], "—");
        assert_eq!(second[2], "—");
    }

    #[test]
    fn career_rows_sort_newest_first() {
        let year = |y: u16| SeasonBatting {
            year: Some(y),
            ..Default::default()
        };
        let table = career_table(&[year(2023), year(2025), year(2024)]);
        let years: Vec<String> = table
            .rows
            .iter()
            .map(|row| row.data[0].to_string())
            .collect();
        assert_eq!(years, ["2025", "2024", "2023"]);
    }
}
