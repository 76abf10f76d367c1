//! Read-only access to the league data source (a PostgREST endpoint fed
//! by the schedule scraper). Every query carries the `delete_flg=eq.0`
//! filter; soft-deleted scrape rows never reach the engine.

use crate::CLIENT;
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use serde::de::DeserializeOwned;
use std::env;
use std::fmt::Display;

pub const TEAMS: &str = "master_teams_info";
pub const PLAYERS: &str = "master_players_info";
pub const TEAM_STATS: &str = "transaction_team_stats";
pub const HITTER_STATS: &str = "transaction_hitter_stats";
pub const PITCHER_STATS: &str = "transaction_pitcher_stats";
pub const GAME_INFO: &str = "transaction_game_info";
pub const GAME_HITTER_STATS: &str = "transaction_game_hitter_stats";
pub const GAME_PITCHER_STATS: &str = "transaction_game_pitcher_stats";

struct Config {
    url: String,
    key: String,
}

lazy_static! {
    static ref CONFIG: Config = Config {
        url: env::var("SANDLOT_DATA_URL").expect("SANDLOT_DATA_URL is not set"),
        key: env::var("SANDLOT_DATA_KEY").expect("SANDLOT_DATA_KEY is not set"),
    };
}

#[derive(Debug, Clone)]
pub struct Query {
    table: &'static str,
    filters: Vec<(String, String)>,
    order: Vec<String>,
    limit: Option<u32>,
}

pub fn table(table: &'static str) -> Query {
    Query {
        table,
        filters: vec![("delete_flg".into(), "eq.0".into())],
        order: Vec::new(),
        limit: None,
    }
}

impl Query {
    pub fn eq(mut self, column: &str, value: impl Display) -> Query {
        self.filters.push((column.into(), format!("eq.{}", value)));
        self
    }

    /// Prefix match; `starts_with("date", "2025")` selects one season of
    /// YYYYMMDD dates, `"202504"` one month.
    pub fn starts_with(mut self, column: &str, prefix: impl Display) -> Query {
        self.filters.push((column.into(), format!("like.{}%", prefix)));
        self
    }

    pub fn order_asc(mut self, column: &str) -> Query {
        self.order.push(format!("{}.asc", column));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Query {
        self.order.push(format!("{}.desc", column));
        self
    }

    pub fn limit(mut self, limit: u32) -> Query {
        self.limit = Some(limit);
        self
    }

    fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(self.filters.iter().cloned());
        if !self.order.is_empty() {
            params.push(("order".to_string(), self.order.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let query = serde_urlencoded::to_string(self.params())?;
        let url = format!("{}/rest/v1/{}?{}", CONFIG.url, self.table, query);
        CLIENT
            .get(url)
            .header("apikey", &CONFIG.key)
            .header("Authorization", format!("Bearer {}", CONFIG.key))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .with_context(|| format!("failed to fetch rows from {}", self.table))
    }
}
