use crate::leaders::{self, Board};
use crate::routes::export::{
    rocket_uri_macro_team_batting_csv, rocket_uri_macro_team_batting_json,
    rocket_uri_macro_team_pitching_csv, rocket_uri_macro_team_pitching_json,
};
use crate::routes::{selected_year, ResponseResult};
use crate::rows::{
    GameBatting, GameInfo, GamePitching, SeasonBatting, SeasonPitching, Team,
    TeamSeason,
};
use crate::table::Table;
use crate::{batting, monthly, pitching, source, summary, ResultExt};
use anyhow::Result;
use askama::Template;
use rocket::response::content::RawHtml;
use rocket::{get, tokio, uri};
use std::collections::HashMap;

#[get("/team/<team>?<year>")]
pub async fn team(team: String, year: Option<u16>) -> ResponseResult<Option<RawHtml<String>>> {
    Ok(match load_team(&team, selected_year(year)).await? {
        Some(page) => Some(RawHtml(page.render().map_err(anyhow::Error::from)?)),
        None => None,
    })
}

async fn load_team(team: &str, year: u16) -> Result<Option<TeamPage>> {
    let info = match source::table(source::TEAMS)
        .eq("team", team)
        .fetch::<Team>()
        .await?
        .into_iter()
        .next()
    {
        Some(info) => info,
        None => return Ok(None),
    };

    let (record, hitters, pitchers, teams, career_hitters, career_pitchers, games, recent, game_batting, game_pitching) =
        tokio::join!(
            source::table(source::TEAM_STATS)
                .eq("team", team)
                .order_desc("year")
                .fetch::<TeamSeason>(),
            source::table(source::HITTER_STATS)
                .eq("team", team)
                .eq("year", year)
                .fetch::<SeasonBatting>(),
            source::table(source::PITCHER_STATS)
                .eq("team", team)
                .eq("year", year)
                .fetch::<SeasonPitching>(),
            source::table(source::TEAMS).fetch::<Team>(),
            source::table(source::HITTER_STATS)
                .eq("team", team)
                .fetch::<SeasonBatting>(),
            source::table(source::PITCHER_STATS)
                .eq("team", team)
                .fetch::<SeasonPitching>(),
            source::table(source::GAME_INFO)
                .eq("team", team)
                .starts_with("date", year)
                .order_asc("date")
                .fetch::<GameInfo>(),
            source::table(source::GAME_INFO)
                .eq("team", team)
                .starts_with("date", year)
                .order_desc("date")
                .order_desc("start_time")
                .limit(3)
                .fetch::<GameInfo>(),
            source::table(source::GAME_HITTER_STATS)
                .eq("team", team)
                .starts_with("date", year)
                .fetch::<GameBatting>(),
            source::table(source::GAME_PITCHER_STATS)
                .eq("team", team)
                .starts_with("date", year)
                .fetch::<GamePitching>(),
        );
    let record = record?;
    let hitters = hitters?;
    let pitchers = pitchers?;
    let teams = teams.log_err().unwrap_or_default();
    let career_hitters = career_hitters.log_err().unwrap_or_default();
    let career_pitchers = career_pitchers.log_err().unwrap_or_default();
    let games = games.log_err().unwrap_or_default();
    let recent = recent.log_err().unwrap_or_default();
    let game_batting = game_batting.log_err().unwrap_or_default();
    let game_pitching = game_pitching.log_err().unwrap_or_default();

    // opponents show their full registered name, not the short nav label
    let team_names: HashMap<String, String> = teams
        .iter()
        .filter_map(|row| Some((row.team.clone()?, row.team_name.clone()?)))
        .collect();

    let current: Vec<TeamSeason> = record
        .iter()
        .filter(|row| row.year == Some(year))
        .cloned()
        .collect();
    let games_count = current.first().map(|row| row.games).unwrap_or(0);

    let mut years: Vec<u16> = record.iter().filter_map(|row| row.year).collect();
    years.push(year);
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    let seasons = years
        .into_iter()
        .map(|y| SeasonEntry {
            selected: if y == year { "selected" } else { "" },
            display: format!("{}年", y),
            path: uri!(team(team = team, year = Some(y))).to_string(),
        })
        .collect();

    let trend = monthly::team_trend(year, &games, &game_batting, &game_pitching);

    Ok(Some(TeamPage {
        name: info.team_name.clone().unwrap_or_else(|| team.to_owned()),
        year,
        seasons,
        record: summary::season_table(&current),
        recent: summary::recent_games_table(&recent, &team_names),
        trend: monthly::trend_table(&trend),
        batting_rule: format!("規定打席：{}", leaders::batting_threshold(games_count)),
        batting_board: leaders::batting_average_board(&hitters, team, games_count),
        hitter_boards: leaders::hitter_boards(&hitters, team),
        pitching_rule: format!("規定投球回：{}", leaders::innings_threshold(games_count)),
        pitcher_boards: leaders::pitcher_boards(&pitchers, team, games_count),
        hitters: batting::list_table(&hitters, team),
        pitchers: pitching::list_table(&pitchers, team),
        career_record: summary::career_table(&record),
        career_hitters: batting::list_table_with_years(&career_hitters, team),
        career_pitchers: pitching::list_table_with_years(&career_pitchers, team),
        exports: vec![
            (
                "打撃成績 CSV",
                uri!(team_batting_csv(team = team, year = Some(year))).to_string(),
            ),
            (
                "打撃成績 JSON",
                uri!(team_batting_json(team = team, year = Some(year))).to_string(),
            ),
            (
                "投手成績 CSV",
                uri!(team_pitching_csv(team = team, year = Some(year))).to_string(),
            ),
            (
                "投手成績 JSON",
                uri!(team_pitching_json(team = team, year = Some(year))).to_string(),
            ),
        ],
    }))
}

#[derive(Template)]
#[template(path = "team.html")]
struct TeamPage {
    name: String,
    year: u16,
    seasons: Vec<SeasonEntry>,
    record: Table<12>,
    recent: Table<7>,
    trend: Table<8>,
    batting_rule: String,
    batting_board: Board,
    hitter_boards: Vec<Board>,
    pitching_rule: String,
    pitcher_boards: Vec<Board>,
    hitters: Table<26>,
    pitchers: Table<24>,
    career_record: Table<12>,
    career_hitters: Table<27>,
    career_pitchers: Table<25>,
    exports: Vec<(&'static str, String)>,
}

// =^..^=   =^..^=   =^..^=   =^..^=   =^..^=   =^..^=   =^..^=   =^..^=   =^..^=   =^..^=   =^..^=

pub(crate) struct SeasonEntry {
    pub(crate) path: String,
    pub(crate) selected: &'static str,
    pub(crate) display: String,
}
