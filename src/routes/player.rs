use crate::routes::export::{
    rocket_uri_macro_player_batting_csv, rocket_uri_macro_player_batting_json,
    rocket_uri_macro_player_pitching_csv, rocket_uri_macro_player_pitching_json,
};
use crate::routes::team::rocket_uri_macro_team;
use crate::routes::{selected_year, ResponseResult};
use crate::rows::{
    display_name, places_by_url, GameBatting, GameInfo, GamePitching, Player, SeasonBatting,
    SeasonPitching,
};
use crate::table::Table;
use crate::{batting, pitching, source, ResultExt};
use anyhow::Result;
use askama::Template;
use rocket::response::content::RawHtml;
use rocket::{get, tokio, uri};

#[get("/team/<team>/player/<number>?<year>")]
pub async fn player(
    team: String,
    number: u32,
    year: Option<u16>,
) -> ResponseResult<Option<RawHtml<String>>> {
    Ok(match load_player(&team, number, selected_year(year)).await? {
        Some(page) => Some(RawHtml(page.render().map_err(anyhow::Error::from)?)),
        None => None,
    })
}

/// Master lookup shared with the export routes. Game logs key on the player's
/// name, so anything serving them has to resolve the number first.
pub(crate) async fn lookup(team: &str, number: u32) -> Result<Option<Player>> {
    Ok(source::table(source::PLAYERS)
        .eq("team", team)
        .eq("player_number", number)
        .fetch::<Player>()
        .await?
        .into_iter()
        .next())
}

async fn load_player(team: &str, number: u32, year: u16) -> Result<Option<PlayerPage>> {
    let info = match lookup(team, number).await? {
        Some(info) => info,
        None => return Ok(None),
    };
    let name = info.player_name.clone().unwrap_or_default();

    let (season_batting, season_pitching, career_batting, career_pitching, game_batting, game_pitching, career_game_pitching, games) =
        tokio::join!(
            source::table(source::HITTER_STATS)
                .eq("team", team)
                .eq("player_number", number)
                .eq("year", year)
                .fetch::<SeasonBatting>(),
            source::table(source::PITCHER_STATS)
                .eq("team", team)
                .eq("player_number", number)
                .eq("year", year)
                .fetch::<SeasonPitching>(),
            source::table(source::HITTER_STATS)
                .eq("team", team)
                .eq("player_number", number)
                .fetch::<SeasonBatting>(),
            source::table(source::PITCHER_STATS)
                .eq("team", team)
                .eq("player_number", number)
                .fetch::<SeasonPitching>(),
            source::table(source::GAME_HITTER_STATS)
                .eq("team", team)
                .eq("player", &name)
                .starts_with("date", year)
                .order_desc("date")
                .order_desc("start_time")
                .fetch::<GameBatting>(),
            source::table(source::GAME_PITCHER_STATS)
                .eq("team", team)
                .eq("player", &name)
                .starts_with("date", year)
                .order_desc("date")
                .order_desc("start_time")
                .fetch::<GamePitching>(),
            source::table(source::GAME_PITCHER_STATS)
                .eq("team", team)
                .eq("player", &name)
                .fetch::<GamePitching>(),
            source::table(source::GAME_INFO)
                .eq("team", team)
                .starts_with("date", year)
                .fetch::<GameInfo>(),
        );
    let season_batting = season_batting?.into_iter().next();
    let season_pitching = season_pitching?.into_iter().next();
    let career_batting = career_batting?;
    let career_pitching = career_pitching?;
    let game_batting = game_batting.log_err().unwrap_or_default();
    let game_pitching = game_pitching.log_err().unwrap_or_default();
    let career_game_pitching = career_game_pitching.log_err().unwrap_or_default();
    let games = games.log_err().unwrap_or_default();

    let has_pitching = season_pitching.is_some()
        || !game_pitching.is_empty()
        || !career_pitching.is_empty()
        || !career_game_pitching.is_empty();
    let places = places_by_url(&games);

    Ok(Some(PlayerPage {
        name: display_name(info.player_number, info.player_name.as_deref()),
        nickname: info.nickname,
        team_path: uri!(team(team = team, year = Some(year))).to_string(),
        year,
        batting: season_batting.as_ref().map(batting::dashboard),
        batting_recent: batting::recent_table(&game_batting),
        by_order: batting::group_table("打順", &batting::by_order(&game_batting)),
        by_position: batting::group_table("ポジション", &batting::by_position(&game_batting)),
        by_ground: batting::group_table("グラウンド", &batting::by_ground(&game_batting, &places)),
        by_month: batting::group_table("月", &batting::by_month(&game_batting)),
        batting_career: batting::career_table(&career_batting),
        has_pitching,
        pitching: season_pitching.as_ref().map(pitching::dashboard),
        pitching_recent: pitching::recent_table(&game_pitching),
        pitching_by_month: pitching::group_table("月", &pitching::by_month(&game_pitching)),
        pitching_by_ground: pitching::group_table(
            "グラウンド",
            &pitching::by_ground(&game_pitching, &places),
        ),
        pitching_career: pitching::career_table(&pitching::merge_career(
            career_pitching,
            &career_game_pitching,
        )),
        exports: vec![
            (
                "打撃成績 CSV",
                uri!(player_batting_csv(team = team, number = number, year = Some(year)))
                    .to_string(),
            ),
            (
                "打撃成績 JSON",
                uri!(player_batting_json(team = team, number = number, year = Some(year)))
                    .to_string(),
            ),
            (
                "投手成績 CSV",
                uri!(player_pitching_csv(team = team, number = number, year = Some(year)))
                    .to_string(),
            ),
            (
                "投手成績 JSON",
                uri!(player_pitching_json(team = team, number = number, year = Some(year)))
                    .to_string(),
            ),
        ],
    }))
}

#[derive(Template)]
#[template(path = "player.html")]
struct PlayerPage {
    name: String,
    nickname: Option<String>,
    team_path: String,
    year: u16,
    batting: Option<Vec<(&'static str, String)>>,
    batting_recent: Table<9>,
    by_order: Table<11>,
    by_position: Table<11>,
    by_ground: Table<11>,
    by_month: Table<11>,
    batting_career: Table<15>,
    has_pitching: bool,
    pitching: Option<Vec<(&'static str, String)>>,
    pitching_recent: Table<9>,
    pitching_by_month: Table<9>,
    pitching_by_ground: Table<9>,
    pitching_career: Table<16>,
    exports: Vec<(&'static str, String)>,
}
