mod batting;
mod csv;
mod export;
mod innings;
mod leaders;
mod monthly;
mod percentage;
mod pitching;
mod rates;
mod routes;
mod rows;
mod source;
mod summary;
mod table;

use reqwest::Client;
use rocket::{launch, routes};

lazy_static::lazy_static! {
    static ref CLIENT: Client = Client::builder()
        .user_agent(concat!("sandlot/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap();
}

trait ResultExt<T, E> {
    fn log_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T, E> for Result<T, E> {
    fn log_err(self) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(err) => {
                log::error!("{}", err);
                None
            }
        }
    }
}

#[launch]
fn rocket() -> _ {
    dotenv::dotenv().ok();
    rocket::build().mount(
        "/",
        routes![
            routes::css,
            routes::index,
            routes::team::team,
            routes::player::player,
            routes::export::team_batting_csv,
            routes::export::team_batting_json,
            routes::export::team_pitching_csv,
            routes::export::team_pitching_json,
            routes::export::player_batting_csv,
            routes::export::player_batting_json,
            routes::export::player_pitching_csv,
            routes::export::player_pitching_json,
        ],
    )
}
