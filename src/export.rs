//! Flat export serialization for the CSV and JSON endpoints. Rows keep
//! their cleaned-up column names on the way out, whatever the upstream
//! schema called them.

use crate::rows::{GameBatting, GamePitching, SeasonBatting, SeasonPitching};
use serde::ser::{Serialize, SerializeStruct, Serializer};

pub struct Export<T: Exportable>(pub T);

impl<T: Exportable> Serialize for Export<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // `serialize_map` would fit better but the csv crate rejects it;
        // serialize_struct with a blank name suits both csv and serde_json.
        let mut s = serializer.serialize_struct("", 1)?;
        self.0.export(&mut s)?;
        s.end()
    }
}

pub trait Exportable {
    fn export<S>(&self, serializer: &mut S) -> Result<(), S::Error>
    where
        S: SerializeStruct;
}

macro_rules! fields {
    ($s:ident, $self:ident, $( $ident:ident ),* $(,)?) => {
        $( $s.serialize_field(stringify!($ident), &$self.$ident)?; )*
    };
}

impl Exportable for SeasonBatting {
    fn export<S>(&self, s: &mut S) -> Result<(), S::Error>
    where
        S: SerializeStruct,
    {
        fields!(
            s,
            self,
            team,
            year,
            player_number,
            player,
            games_played,
            batting_average,
            plate_appearances,
            at_bats,
            hits,
            home_runs,
            runs_batted_in,
            runs,
            stolen_bases,
            on_base_percentage,
            slugging_percentage,
            scoring_average,
            ops,
            doubles,
            triples,
            total_bases,
            strikeouts,
            walks,
            hit_by_pitch,
            sacrifice_bunts,
            sacrifice_flies,
            double_plays,
            opponent_errors,
            own_errors,
            caught_stealing,
        );
        Ok(())
    }
}

impl Exportable for SeasonPitching {
    fn export<S>(&self, s: &mut S) -> Result<(), S::Error>
    where
        S: SerializeStruct,
    {
        fields!(
            s,
            self,
            team,
            year,
            player_number,
            player,
            games_played,
            wins,
            losses,
            holds,
            saves,
            win_percentage,
            era,
            innings_pitched,
            pitches_thrown,
            runs_allowed,
            earned_runs_allowed,
            complete_games,
            shutouts,
            hits_allowed,
            home_runs_allowed,
            strikeouts,
            strikeout_rate,
            walks_allowed,
            hit_batsmen,
            balks,
            wild_pitches,
            k_bb,
            whip,
        );
        Ok(())
    }
}

impl Exportable for GameBatting {
    fn export<S>(&self, s: &mut S) -> Result<(), S::Error>
    where
        S: SerializeStruct,
    {
        fields!(
            s,
            self,
            team,
            date,
            url,
            player_number,
            player,
            order,
            position,
            plate_appearances,
            at_bats,
            hits,
            home_runs,
            runs_batted_in,
            runs,
            stolen_bases,
            doubles,
            triples,
            scoring_at_bats,
            scoring_hits,
            strikeouts,
            walks,
            hit_by_pitch,
            sacrifice_bunts,
            sacrifice_flies,
            double_plays,
            opponent_errors,
            own_errors,
            caught_stealing,
        );
        Ok(())
    }
}

impl Exportable for GamePitching {
    fn export<S>(&self, s: &mut S) -> Result<(), S::Error>
    where
        S: SerializeStruct,
    {
        fields!(
            s,
            self,
            team,
            date,
            url,
            player_number,
            player,
            order,
            result,
            inning,
            pitches,
            runs_allowed,
            earned_runs,
            complete_game,
            shutout,
            hits_allowed,
            home_runs_allowed,
            strikeouts,
            walks_allowed,
            hit_batsmen,
            balks,
            wild_pitches,
        );
        Ok(())
    }
}
