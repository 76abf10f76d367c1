use crate::csv::Csv;
use crate::export::Export;
use crate::routes::{player, selected_year, ResponseResult};
use crate::rows::{GameBatting, GamePitching, SeasonBatting, SeasonPitching};
use crate::source;
use rocket::get;
use rocket::serde::json::Json;

// One body, two routes. The block can `return Ok(None)` for a missing player
// and it type-checks in either flavor.
//
// The `?<year>` query parameter sits after a `;` and its fn-argument name is
// spelled inside the macro rather than captured: rocket's query codegen
// resolves its internal bindings against the parameter's type span, so the
// name and type tokens must both carry this macro's hygiene. The
// `let $year = year;` line hands the value back to the caller-written body.
macro_rules! export {
    (
        $csv_fn:ident => $csv_uri:expr,
        $json_fn:ident => $json_uri:expr,
        |$( $ident:ident: $ty:ty ),* ; $year:ident: $year_ty:ty $(,)?| -> $value:ty {
            $( $body:tt )*
        }
    ) => {
        #[get($csv_uri)]
        pub async fn $csv_fn(
            $( $ident: $ty , )* year: $year_ty,
        ) -> ResponseResult<Option<Csv<Vec<Export<$value>>>>> {
            let $year = year;
            let rows: Vec<$value> = { $( $body )* };
            Ok(Some(Csv(rows.into_iter().map(Export).collect())))
        }

        #[get($json_uri)]
        pub async fn $json_fn(
            $( $ident: $ty , )* year: $year_ty,
        ) -> ResponseResult<Option<Json<Vec<Export<$value>>>>> {
            let $year = year;
            let rows: Vec<$value> = { $( $body )* };
            Ok(Some(Json(rows.into_iter().map(Export).collect())))
        }
    };
}

export! {
    team_batting_csv => "/team/<team>/batting/export.csv?<year>",
    team_batting_json => "/team/<team>/batting/export.json?<year>",
    |team: String; year: Option<u16>| -> SeasonBatting {
        source::table(source::HITTER_STATS)
            .eq("team", &team)
            .eq("year", selected_year(year))
            .order_asc("player_number")
            .fetch()
            .await?
    }
}

export! {
    team_pitching_csv => "/team/<team>/pitching/export.csv?<year>",
    team_pitching_json => "/team/<team>/pitching/export.json?<year>",
    |team: String; year: Option<u16>| -> SeasonPitching {
        source::table(source::PITCHER_STATS)
            .eq("team", &team)
            .eq("year", selected_year(year))
            .order_asc("player_number")
            .fetch()
            .await?
    }
}

export! {
    player_batting_csv => "/team/<team>/player/<number>/batting/export.csv?<year>",
    player_batting_json => "/team/<team>/player/<number>/batting/export.json?<year>",
    |team: String, number: u32; year: Option<u16>| -> GameBatting {
        let name = match player::lookup(&team, number).await? {
            Some(info) => info.player_name.unwrap_or_default(),
            None => return Ok(None),
        };
        source::table(source::GAME_HITTER_STATS)
            .eq("team", &team)
            .eq("player", &name)
            .starts_with("date", selected_year(year))
            .order_asc("date")
            .order_asc("start_time")
            .fetch()
            .await?
    }
}

export! {
    player_pitching_csv => "/team/<team>/player/<number>/pitching/export.csv?<year>",
    player_pitching_json => "/team/<team>/player/<number>/pitching/export.json?<year>",
    |team: String, number: u32; year: Option<u16>| -> GamePitching {
        let name = match player::lookup(&team, number).await? {
            Some(info) => info.player_name.unwrap_or_default(),
            None => return Ok(None),
        };
        source::table(source::GAME_PITCHER_STATS)
            .eq("team", &team)
            .eq("player", &name)
            .starts_with("date", selected_year(year))
            .order_asc("date")
            .order_asc("start_time")
            .fetch()
            .await?
    }
}
