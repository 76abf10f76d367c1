//! Season leaderboards for the team page: the qualified batting-average
//! board, the counting-stat boards, and the pitching boards gated on a
//! minimum of recorded innings.

use crate::innings::parse_innings;
use crate::percentage::{Fixed, Pct, PLACEHOLDER};
use crate::rates;
use crate::rows::{display_name, has_identity, SeasonBatting, SeasonPitching};
use crate::table::Value;

pub struct Board {
    pub title: &'static str,
    pub columns: Vec<&'static str>,
    pub entries: Vec<Entry>,
    pub empty_text: String,
}

pub struct Entry {
    pub rank: usize,
    pub player: String,
    pub href: String,
    pub cells: Vec<Value>,
}

/// Plate appearances needed to qualify for the batting-average board.
pub fn batting_threshold(games: u32) -> u32 {
    (f64::from(games) * 1.25).floor() as u32
}

/// Innings needed to appear on any pitching board.
pub fn innings_threshold(games: u32) -> u32 {
    (f64::from(games) * 0.6).floor() as u32
}

fn entry(rank: usize, team: &str, row_number: Option<u32>, player: Option<&str>, cells: Vec<Value>) -> Entry {
    Entry {
        rank,
        player: display_name(row_number, player),
        href: row_number
            .map(|number| format!("/team/{}/player/{}", team, number))
            .unwrap_or_default(),
        cells,
    }
}

/// Ties share a rank; the next distinct value drops to its position.
fn ranked<'a, T>(sorted: Vec<&'a T>, value: impl Fn(&T) -> f64) -> Vec<(usize, &'a T)> {
    let mut out: Vec<(usize, &T)> = Vec::with_capacity(sorted.len());
    for (i, row) in sorted.into_iter().enumerate() {
        let rank = match out.last() {
            Some((prev_rank, prev)) if value(prev) == value(row) => *prev_rank,
            Some(_) => i + 1,
            None => 1,
        };
        out.push((rank, row));
    }
    out
}

/// The batting-average board. Averages compare at four digits, ties
/// break toward more hits, and only players past the plate-appearance
/// threshold appear at all.
pub fn batting_average_board(rows: &[SeasonBatting], team: &str, games: u32) -> Board {
    let threshold = batting_threshold(games);
    let avg4 = |row: &SeasonBatting| {
        row.batting_average
            .map_or(-1.0, |avg| rates::round_to(avg, 4))
    };
    let mut qualified: Vec<&SeasonBatting> = rows
        .iter()
        .filter(|row| has_identity(row.player_number, row.player.as_deref()))
        .filter(|row| row.plate_appearances >= threshold)
        .collect();
    qualified.sort_by(|a, b| avg4(b).total_cmp(&avg4(a)).then(b.hits.cmp(&a.hits)));
    qualified.truncate(5);

    let entries = ranked(qualified, avg4)
        .into_iter()
        .map(|(rank, row)| {
            entry(
                rank,
                team,
                row.player_number,
                row.player.as_deref(),
                vec![
                    Pct::<3>(row.batting_average).into(),
                    row.plate_appearances.into(),
                    row.at_bats.into(),
                    row.hits.into(),
                ],
            )
        })
        .collect();

    Board {
        title: "首位打者",
        columns: vec!["打率", "打席", "打数", "安打"],
        entries,
        empty_text: format!(
            "規定打席（{}打席）に到達している選手はいません。",
            threshold
        ),
    }
}

fn hitter_board(
    title: &'static str,
    columns: Vec<&'static str>,
    rows: &[SeasonBatting],
    team: &str,
    value: impl Fn(&SeasonBatting) -> f64,
    cells: impl Fn(&SeasonBatting) -> Vec<Value>,
) -> Board {
    let mut qualified: Vec<&SeasonBatting> = rows
        .iter()
        .filter(|row| has_identity(row.player_number, row.player.as_deref()))
        .filter(|row| value(row) > 0.0)
        .collect();
    qualified.sort_by(|a, b| value(b).total_cmp(&value(a)));
    qualified.truncate(5);

    let entries = ranked(qualified, &value)
        .into_iter()
        .map(|(rank, row)| entry(rank, team, row.player_number, row.player.as_deref(), cells(row)))
        .collect();

    Board {
        title,
        columns,
        entries,
        empty_text: "該当者なし".to_string(),
    }
}

/// The eight counting-stat boards, in page order. Zero never ranks.
pub fn hitter_boards(rows: &[SeasonBatting], team: &str) -> Vec<Board> {
    vec![
        hitter_board(
            "安打",
            vec!["安打", "打席", "打数"],
            rows,
            team,
            |row| f64::from(row.hits),
            |row| vec![row.hits.into(), row.plate_appearances.into(), row.at_bats.into()],
        ),
        hitter_board(
            "本塁打",
            vec!["本塁打", "打席", "打数"],
            rows,
            team,
            |row| f64::from(row.home_runs),
            |row| {
                vec![
                    row.home_runs.into(),
                    row.plate_appearances.into(),
                    row.at_bats.into(),
                ]
            },
        ),
        hitter_board(
            "打点",
            vec!["打点", "打席", "打数"],
            rows,
            team,
            |row| f64::from(row.runs_batted_in),
            |row| {
                vec![
                    row.runs_batted_in.into(),
                    row.plate_appearances.into(),
                    row.at_bats.into(),
                ]
            },
        ),
        hitter_board(
            "得点",
            vec!["得点", "出塁率"],
            rows,
            team,
            |row| f64::from(row.runs),
            |row| vec![row.runs.into(), Pct::<3>(row.on_base_percentage).into()],
        ),
        hitter_board(
            "盗塁",
            vec!["盗塁", "出塁率"],
            rows,
            team,
            |row| f64::from(row.stolen_bases),
            |row| {
                vec![
                    row.stolen_bases.into(),
                    Pct::<3>(row.on_base_percentage).into(),
                ]
            },
        ),
        hitter_board(
            "出塁率",
            vec!["出塁率", "安打", "四死球", "犠飛"],
            rows,
            team,
            |row| row.on_base_percentage.unwrap_or(0.0),
            |row| {
                vec![
                    Pct::<3>(row.on_base_percentage).into(),
                    row.hits.into(),
                    (row.walks + row.hit_by_pitch).into(),
                    row.sacrifice_flies.into(),
                ]
            },
        ),
        hitter_board(
            "犠打",
            vec!["犠打", "打席"],
            rows,
            team,
            |row| f64::from(row.sacrifice_bunts),
            |row| vec![row.sacrifice_bunts.into(), row.plate_appearances.into()],
        ),
        hitter_board(
            "犠飛",
            vec!["犠飛", "打席"],
            rows,
            team,
            |row| f64::from(row.sacrifice_flies),
            |row| vec![row.sacrifice_flies.into(), row.plate_appearances.into()],
        ),
    ]
}

fn innings_text(row: &SeasonPitching) -> Value {
    Value::from(row.innings_pitched.as_deref().unwrap_or(PLACEHOLDER))
}

fn pitcher_board(
    title: &'static str,
    columns: Vec<&'static str>,
    rows: &[SeasonPitching],
    team: &str,
    threshold: u32,
    ascending: bool,
    exclude_zero: bool,
    value: impl Fn(&SeasonPitching) -> Option<f64>,
    cells: impl Fn(&SeasonPitching) -> Vec<Value>,
) -> Board {
    // a missing stat sorts last in either direction
    let missing = if ascending {
        f64::INFINITY
    } else {
        f64::NEG_INFINITY
    };
    let sort_value = |row: &SeasonPitching| value(row).unwrap_or(missing);
    let mut qualified: Vec<&SeasonPitching> = rows
        .iter()
        .filter(|row| has_identity(row.player_number, row.player.as_deref()))
        .filter(|row| {
            parse_innings(row.innings_pitched.as_deref()).unwrap_or(0.0) >= f64::from(threshold)
        })
        .filter(|row| !exclude_zero || sort_value(row) > 0.0)
        .collect();
    qualified.sort_by(|a, b| {
        if ascending {
            sort_value(a).total_cmp(&sort_value(b))
        } else {
            sort_value(b).total_cmp(&sort_value(a))
        }
    });
    qualified.truncate(5);

    let entries = ranked(qualified, &sort_value)
        .into_iter()
        .map(|(rank, row)| entry(rank, team, row.player_number, row.player.as_deref(), cells(row)))
        .collect();

    Board {
        title,
        columns,
        entries,
        empty_text: "該当者なし".to_string(),
    }
}

/// The six pitching boards, in page order. Every board shares the
/// innings threshold; 防御率 ranks ascending and, like 投球回, keeps its
/// zero entries.
pub fn pitcher_boards(rows: &[SeasonPitching], team: &str, games: u32) -> Vec<Board> {
    let threshold = innings_threshold(games);
    vec![
        pitcher_board(
            "勝利",
            vec!["勝利", "試合", "投球回"],
            rows,
            team,
            threshold,
            false,
            true,
            |row| Some(f64::from(row.wins)),
            |row| vec![row.wins.into(), row.games_played.into(), innings_text(row)],
        ),
        pitcher_board(
            "勝率",
            vec!["勝率", "試合", "勝", "負"],
            rows,
            team,
            threshold,
            false,
            true,
            |row| row.win_percentage,
            |row| {
                vec![
                    Pct::<3>(row.win_percentage).into(),
                    row.games_played.into(),
                    row.wins.into(),
                    row.losses.into(),
                ]
            },
        ),
        pitcher_board(
            "防御率",
            vec!["防御率", "試合", "投球回"],
            rows,
            team,
            threshold,
            true,
            false,
            |row| row.era,
            |row| {
                vec![
                    Fixed::<2>(row.era).into(),
                    row.games_played.into(),
                    innings_text(row),
                ]
            },
        ),
        pitcher_board(
            "奪三振",
            vec!["奪三振", "投球回", "奪三振率"],
            rows,
            team,
            threshold,
            false,
            true,
            |row| Some(f64::from(row.strikeouts)),
            |row| {
                vec![
                    row.strikeouts.into(),
                    innings_text(row),
                    Fixed::<3>(row.strikeout_rate).into(),
                ]
            },
        ),
        pitcher_board(
            "投球回",
            vec!["投球回", "試合"],
            rows,
            team,
            threshold,
            false,
            false,
            |row| parse_innings(row.innings_pitched.as_deref()),
            |row| vec![innings_text(row), row.games_played.into()],
        ),
        pitcher_board(
            "セーブ",
            vec!["セーブ", "試合"],
            rows,
            team,
            threshold,
            false,
            true,
            |row| Some(f64::from(row.saves)),
            |row| vec![row.saves.into(), row.games_played.into()],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hitter(number: u32, pa: u32, avg: Option<f64>, hits: u32) -> SeasonBatting {
        SeasonBatting {
            player_number: Some(number),
            player: Some(format!("選手{}", number)),
            plate_appearances: pa,
            batting_average: avg,
            hits,
            ..Default::default()
        }
    }

    fn pitcher(number: u32, innings: &str) -> SeasonPitching {
        SeasonPitching {
            player_number: Some(number),
            player: Some(format!("投手{}", number)),
            innings_pitched: Some(innings.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn thresholds_floor() {
        assert_eq!(batting_threshold(40), 50);
        assert_eq!(batting_threshold(39), 48);
        assert_eq!(batting_threshold(0), 0);
        assert_eq!(innings_threshold(10), 6);
        assert_eq!(innings_threshold(9), 5);
    }

    #[test]
    fn average_board_qualification_is_strict() {
        let rows = vec![
            hitter(1, 50, Some(0.250), 10),
            hitter(2, 49, Some(0.400), 18),
        ];
        let board = batting_average_board(&rows, "hawks", 40);
        assert_eq!(board.entries.len(), 1);
        assert_eq!(board.entries[0].player, "1 選手1");
        assert_eq!(board.entries[0].href, "/team/hawks/player/1");
    }

    #[test]
    fn average_board_ranks_share_on_rounded_ties() {
        let rows = vec![
            hitter(1, 60, Some(0.30001), 28),
            hitter(2, 60, Some(0.30004), 30),
            hitter(3, 60, Some(0.250), 12),
        ];
        let board = batting_average_board(&rows, "hawks", 40);
        let ranks: Vec<usize> = board.entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, [1, 1, 3]);
        // equal at four digits, so more hits comes first
        assert_eq!(board.entries[0].player, "2 選手2");
        assert_eq!(board.entries[1].player, "1 選手1");
    }

    #[test]
    fn average_board_empty_message_names_the_threshold() {
        let board = batting_average_board(&[], "hawks", 40);
        assert!(board.entries.is_empty());
        assert_eq!(
            board.empty_text,
            "規定打席（50打席）に到達している選手はいません。"
        );
    }

    #[test]
    fn count_boards_drop_zeroes_and_cap_at_five() {
        let mut rows: Vec<SeasonBatting> = (1..=7)
            .map(|n| SeasonBatting {
                player_number: Some(n),
                player: Some(format!("選手{}", n)),
                home_runs: n,
                ..Default::default()
            })
            .collect();
        rows.push(SeasonBatting {
            player_number: Some(8),
            player: Some("選手8".to_string()),
            home_runs: 0,
            ..Default::default()
        });
        let boards = hitter_boards(&rows, "hawks");
        let homers = &boards[1];
        assert_eq!(homers.title, "本塁打");
        assert_eq!(homers.entries.len(), 5);
        assert_eq!(homers.entries[0].cells[0].to_string(), "7");
        assert_eq!(homers.entries[4].cells[0].to_string(), "3");
    }

    #[test]
    fn on_base_board_treats_missing_as_zero() {
        let rows = vec![
            SeasonBatting {
                player_number: Some(1),
                player: Some("選手1".to_string()),
                on_base_percentage: None,
                ..Default::default()
            },
            SeasonBatting {
                player_number: Some(2),
                player: Some("選手2".to_string()),
                on_base_percentage: Some(0.45),
                ..Default::default()
            },
        ];
        let boards = hitter_boards(&rows, "hawks");
        let on_base = &boards[5];
        assert_eq!(on_base.title, "出塁率");
        assert_eq!(on_base.entries.len(), 1);
        assert_eq!(on_base.entries[0].cells[0].to_string(), ".450");
    }

    #[test]
    fn pitcher_boards_gate_on_parsed_innings() {
        let mut qualifies = pitcher(18, "6回");
        qualifies.wins = 3;
        let mut falls_short = pitcher(21, "5回2/3");
        falls_short.wins = 9;
        let boards = pitcher_boards(&[qualifies, falls_short], "hawks", 10);
        let wins = &boards[0];
        assert_eq!(wins.title, "勝利");
        assert_eq!(wins.entries.len(), 1);
        assert_eq!(wins.entries[0].player, "18 投手18");
    }

    #[test]
    fn era_board_ranks_ascending_with_missing_last() {
        let mut a = pitcher(1, "10回");
        a.era = Some(3.10);
        let mut b = pitcher(2, "10回");
        b.era = Some(2.50);
        let mut c = pitcher(3, "10回");
        c.era = None;
        let mut d = pitcher(4, "10回");
        d.era = Some(0.0);
        let boards = pitcher_boards(&[a, b, c, d], "hawks", 0);
        let era = &boards[2];
        assert_eq!(era.title, "防御率");
        let order: Vec<&str> = era.entries.iter().map(|e| e.player.as_str()).collect();
        // a zero ERA still ranks, a missing one sorts to the bottom
        assert_eq!(order, ["4 投手4", "2 投手2", "1 投手1", "3 投手3"]);
        assert_eq!(era.entries[0].cells[0].to_string(), "0.00");
        assert_eq!(era.entries[3].cells[0].to_string(), "—");
    }

    #[test]
    fn innings_board_sorts_parsed_not_lexical() {
        let boards = pitcher_boards(&[pitcher(1, "2回"), pitcher(2, "10回")], "hawks", 0);
        let innings = &boards[4];
        assert_eq!(innings.title, "投球回");
        let order: Vec<String> = innings
            .entries
            .iter()
            .map(|e| e.cells[0].to_string())
            .collect();
        assert_eq!(order, ["10回", "2回"]);
    }

    #[test]
    fn win_board_excludes_zero() {
        let boards = pitcher_boards(&[pitcher(1, "10回")], "hawks", 0);
        assert!(boards[0].entries.is_empty());
        assert_eq!(boards[0].empty_text, "該当者なし");
    }
}
