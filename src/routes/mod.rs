pub mod export;
pub mod player;
pub mod team;

use self::team::rocket_uri_macro_team;
use crate::rows::{display_team_name, Team};
use crate::source;
use askama::Template;
use chrono::Datelike;
use rocket::http::ContentType;
use rocket::response::content::RawHtml;
use rocket::response::Debug;
use rocket::{get, uri};

pub(crate) type ResponseResult<T> = Result<T, Debug<anyhow::Error>>;

/// The season a request without `?year` means.
pub(crate) fn selected_year(year: Option<u16>) -> u16 {
    year.unwrap_or_else(|| chrono::Local::now().year() as u16)
}

#[get("/styles.css")]
pub fn css() -> (ContentType, &'static str) {
    (
        ContentType::CSS,
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/styles.css")),
    )
}

#[get("/")]
pub async fn index() -> ResponseResult<RawHtml<String>> {
    let mut teams: Vec<Team> = source::table(source::TEAMS).order_asc("team").fetch().await?;
    teams.retain(|team| team.team.is_some());
    let page = IndexPage {
        teams: teams
            .into_iter()
            .map(|team| {
                let name = display_team_name(team.team_name.as_deref(), team.team.as_deref());
                let key = team.team.unwrap_or_default();
                TeamEntry {
                    path: uri!(team(team = &key, year = _)).to_string(),
                    name,
                }
            })
            .collect(),
    };
    Ok(RawHtml(page.render().map_err(anyhow::Error::from)?))
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage {
    teams: Vec<TeamEntry>,
}

struct TeamEntry {
    path: String,
    name: String,
}
