//! Pitching aggregation: season tables, the player dashboard, the
//! month and ground breakdowns, and the career fallback that rebuilds
//! missing season lines from raw game rows.

use crate::innings::{format_innings, parse_innings};
use crate::percentage::{Fixed, Pct, PLACEHOLDER};
use crate::rates;
use crate::rows::{
    display_name, format_date, has_identity, month_of, place_label, year_of, GamePitching,
    SeasonPitching, UNREGISTERED,
};
use crate::table::{row, Table, Value};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::AddAssign;

/// Sums of the pitching columns the breakdown tables show. Innings
/// accumulate as fractional values; a row whose inning text does not
/// parse contributes nothing.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PitchingTotals {
    pub innings: f64,
    pub earned_runs: u32,
    pub hits_allowed: u32,
    pub strikeouts: u32,
    pub walks_allowed: u32,
    pub hit_batsmen: u32,
}

impl AddAssign<&GamePitching> for PitchingTotals {
    fn add_assign(&mut self, game: &GamePitching) {
        self.innings += parse_innings(game.inning.as_deref()).unwrap_or(0.0);
        self.earned_runs += game.earned_runs;
        self.hits_allowed += game.hits_allowed;
        self.strikeouts += game.strikeouts;
        self.walks_allowed += game.walks_allowed;
        self.hit_batsmen += game.hit_batsmen;
    }
}

impl PitchingTotals {
    pub fn has_innings(&self) -> bool {
        self.innings > 0.0
    }
}

/// Month breakdown over a fixed 1..12 frame. Months without innings
/// still get a row; their cells come out dashed.
pub fn by_month(rows: &[GamePitching]) -> Vec<(String, PitchingTotals)> {
    let mut frame = [PitchingTotals::default(); 12];
    for row in rows {
        if let Some(month) = month_of(row.date.as_deref()) {
            frame[(month - 1) as usize] += row;
        }
    }
    frame
        .into_iter()
        .enumerate()
        .map(|(i, totals)| (format!("{}月", i + 1), totals))
        .collect()
}

/// Ground breakdown via the url → place join, 未登録 last. The whole
/// view is suppressed unless at least one ground has recorded innings.
pub fn by_ground(
    rows: &[GamePitching],
    places: &HashMap<String, Option<String>>,
) -> Vec<(String, PitchingTotals)> {
    let mut buckets: IndexMap<String, PitchingTotals> = IndexMap::new();
    for row in rows {
        let place = row
            .url
            .as_deref()
            .and_then(|url| places.get(url))
            .and_then(|place| place.as_deref());
        *buckets.entry(place_label(place)).or_default() += row;
    }
    if !buckets.values().any(PitchingTotals::has_innings) {
        return Vec::new();
    }
    let mut groups: Vec<(String, PitchingTotals)> = buckets.into_iter().collect();
    groups.sort_by(|(a, _), (b, _)| match (a == UNREGISTERED, b == UNREGISTERED) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => a.cmp(b),
    });
    groups
}

/// Renders a breakdown as a table. Grouped views score by the
/// seven-inning ERA and show every rate at two decimals.
pub fn group_table(label: &str, groups: &[(String, PitchingTotals)]) -> Table<9> {
    let mut labels = Table::new([label], "text-left");
    let mut stats = Table::new(
        [
            "防御率",
            "投球回",
            "被安打",
            "奪三振",
            "四球",
            "奪三振率",
            "WHIP",
            "K/BB",
        ],
        "text-right",
    );
    for (name, t) in groups {
        labels.push(row![name.as_str()]);
        let count = |value: u32| t.has_innings().then_some(value);
        stats.push(row![
            Fixed::<2>(rates::era7(t.earned_runs, t.innings)),
            format_innings(t.innings),
            count(t.hits_allowed),
            count(t.strikeouts),
            count(t.walks_allowed),
            Fixed::<2>(rates::strikeout_rate(t.strikeouts, t.innings)),
            Fixed::<2>(rates::whip(t.hits_allowed, t.walks_allowed, t.innings)),
            Fixed::<2>(if t.has_innings() {
                rates::strikeouts_per_walk(t.strikeouts, t.walks_allowed)
            } else {
                None
            }),
        ]);
    }
    stats.insert(0, labels)
}

#[derive(Debug, Default)]
struct CareerYear {
    games: u32,
    wins: u32,
    losses: u32,
    holds: u32,
    saves: u32,
    innings: f64,
    runs_allowed: u32,
    earned_runs: u32,
    hits_allowed: u32,
    strikeouts: u32,
    walks_allowed: u32,
    hit_batsmen: u32,
}

impl CareerYear {
    fn into_season(self, year: u16) -> SeasonPitching {
        let innings = self.innings;
        SeasonPitching {
            year: Some(year),
            games_played: self.games,
            wins: self.wins,
            losses: self.losses,
            holds: self.holds,
            saves: self.saves,
            win_percentage: rates::winning_percentage(self.wins, self.losses),
            era: rates::era9(self.earned_runs, innings).map(|era| rates::round_to(era, 2)),
            innings_pitched: Some(if innings > 0.0 {
                format!("{:.2}", innings)
            } else {
                "0".to_string()
            }),
            runs_allowed: self.runs_allowed,
            earned_runs_allowed: self.earned_runs,
            hits_allowed: self.hits_allowed,
            strikeouts: self.strikeouts,
            walks_allowed: self.walks_allowed,
            hit_batsmen: self.hit_batsmen,
            whip: rates::whip(self.hits_allowed, self.walks_allowed, innings)
                .map(|whip| rates::round_to(whip, 3)),
            ..Default::default()
        }
    }
}

/// Season lines rebuilt from raw game rows, one per year. Decisions
/// come from the recorded token; anything other than 勝/敗/H/S is
/// ignored.
fn seasons_from_games(games: &[GamePitching]) -> BTreeMap<u16, CareerYear> {
    let mut years: BTreeMap<u16, CareerYear> = BTreeMap::new();
    for game in games {
        let year = match year_of(game.date.as_deref()) {
            Some(year) => year,
            None => continue,
        };
        let totals = years.entry(year).or_default();
        totals.games += 1;
        match game.result.as_deref().map(str::trim) {
            Some("勝") => totals.wins += 1,
            Some("敗") => totals.losses += 1,
            Some("H") => totals.holds += 1,
            Some("S") => totals.saves += 1,
            _ => {}
        }
        totals.innings += parse_innings(game.inning.as_deref()).unwrap_or(0.0);
        totals.runs_allowed += game.runs_allowed;
        totals.earned_runs += game.earned_runs;
        totals.hits_allowed += game.hits_allowed;
        totals.strikeouts += game.strikeouts;
        totals.walks_allowed += game.walks_allowed;
        totals.hit_batsmen += game.hit_batsmen;
    }
    years
}

/// Fills the years the source career table is missing with lines
/// rebuilt from game rows. Years the source already covers win; when
/// nothing is missing the source rows pass through untouched.
pub fn merge_career(
    mut source: Vec<SeasonPitching>,
    games: &[GamePitching],
) -> Vec<SeasonPitching> {
    let covered: HashSet<u16> = source.iter().filter_map(|row| row.year).collect();
    let missing: Vec<SeasonPitching> = seasons_from_games(games)
        .into_iter()
        .filter(|(year, _)| !covered.contains(year))
        .map(|(year, totals)| totals.into_season(year))
        .collect();
    if missing.is_empty() {
        return source;
    }
    source.extend(missing);
    source.sort_by(|a, b| b.year.unwrap_or(0).cmp(&a.year.unwrap_or(0)));
    source
}

fn ordered(rows: &[SeasonPitching]) -> Vec<&SeasonPitching> {
    let mut rows: Vec<&SeasonPitching> = rows
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

fn innings_cell(row: &SeasonPitching) -> Value {
    Value::from(row.innings_pitched.as_deref().unwrap_or(PLACEHOLDER))
}

const LIST_HEADERS: [&str; 23] = [
    "試合",
    "防御率",
    "勝",
    "負",
    "ホールド",
    "セーブ",
    "勝率",
    "投球回",
    "投球数",
    "失点",
    "自責点",
    "完投",
    "完封",
    "被安打",
    "被本塁打",
    "奪三振",
    "奪三振率",
    "与四球",
    "与死球",
    "ボーク",
    "暴投",
    "K/BB",
    "WHIP",
];

fn list_row(stats: &mut Table<23>, row: &SeasonPitching) {
    stats.push(row![
        row.games_played,
        Fixed::<2>(row.era),
        row.wins,
        row.losses,
        row.holds,
        row.saves,
        Pct::<3>(row.win_percentage),
        innings_cell(row),
        row.pitches_thrown,
        row.runs_allowed,
        row.earned_runs_allowed,
        row.complete_games,
        row.shutouts,
        row.hits_allowed,
        row.home_runs_allowed,
        row.strikeouts,
        Fixed::<3>(row.strikeout_rate),
        row.walks_allowed,
        row.hit_batsmen,
        row.balks,
        row.wild_pitches,
        Fixed::<3>(row.k_bb),
        Fixed::<3>(row.whip),
    ]);
}

/// One season of every pitcher on the roster, linked to their player
/// pages.
pub fn list_table(rows: &[SeasonPitching], team: &str) -> Table<24> {
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
pub fn list_table_with_years(rows: &[SeasonPitching], team: &str) -> Table<25> {
    let mut years = Table::new(["年"], "text-left");
    for row in ordered(rows) {
        years.push(row![row.year.map(u32::from)]);
    }
    list_table(rows, team).insert(0, years)
}

/// Year-by-year pitching table on the player page.
pub fn career_table(rows: &[SeasonPitching]) -> Table<16> {
    let mut sorted: Vec<&SeasonPitching> = rows.iter().collect();
    sorted.sort_by(|a, b| b.year.unwrap_or(0).cmp(&a.year.unwrap_or(0)));

    let mut years = Table::new(["年度"], "text-left");
    let mut stats = Table::new(
        [
            "登板",
            "勝",
            "敗",
            "H",
            "S",
            "勝率",
            "防御率",
            "投球回",
            "投球数",
            "失点",
            "自責点",
            "被本塁打",
            "奪三振",
            "与四球",
            "WHIP",
        ],
        "text-right",
    );
    for row in sorted {
        years.push(row![row.year.map(u32::from)]);
        stats.push(row![
            row.games_played,
            row.wins,
            row.losses,
            row.holds,
            row.saves,
            Pct::<3>(row.win_percentage),
            Fixed::<2>(row.era),
            innings_cell(row),
            row.pitches_thrown,
            row.runs_allowed,
            row.earned_runs_allowed,
            row.home_runs_allowed,
            row.strikeouts,
            row.walks_allowed,
            Fixed::<3>(row.whip),
        ]);
    }
    stats.insert(0, years)
}

/// The player's three most recent appearances, in the order fetched.
/// The first pitcher of a game is the starter; everyone after is
/// relief.
pub fn recent_table(rows: &[GamePitching]) -> Table<9> {
    let mut dates = Table::new(["試合日"], "text-left");
    let mut stats = Table::new(
        [
            "登板順",
            "勝敗",
            "投球回",
            "失点",
            "自責点",
            "被安打",
            "奪三振",
            "与四死球",
        ],
        "text-right",
    );
    for game in rows.iter().take(3) {
        dates.push(row![format_date(game.date.as_deref())]);
        let role = match game.order {
            None => PLACEHOLDER,
            Some(1) => "先発",
            Some(_) => "救援",
        };
        stats.push(row![
            role,
            game.result.as_deref().unwrap_or(PLACEHOLDER),
            game.inning.as_deref().unwrap_or(PLACEHOLDER),
            game.runs_allowed,
            game.earned_runs,
            game.hits_allowed,
            game.strikeouts,
            game.walks_allowed + game.hit_batsmen,
        ]);
    }
    stats.insert(0, dates)
}

/// The season-summary card on the player page.
pub fn dashboard(row: &SeasonPitching) -> Vec<(&'static str, String)> {
    vec![
        ("登板", row.games_played.to_string()),
        ("防御率", Fixed::<2>(row.era).to_string()),
        ("勝率", Pct::<3>(row.win_percentage).to_string()),
        ("WHIP", Fixed::<3>(row.whip).to_string()),
        ("勝", row.wins.to_string()),
        ("敗", row.losses.to_string()),
        ("H", row.holds.to_string()),
        ("S", row.saves.to_string()),
        (
            "投球回",
            row.innings_pitched
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        ),
        ("投球数", row.pitches_thrown.to_string()),
        ("失点", row.runs_allowed.to_string()),
        ("自責点", row.earned_runs_allowed.to_string()),
        ("被本塁打", row.home_runs_allowed.to_string()),
        ("奪三振", row.strikeouts.to_string()),
        ("与四球", row.walks_allowed.to_string()),
    ]
}
