use csv::Writer;
use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder};
use rocket::Request;
use serde::Serialize;
use std::io::Cursor;

pub struct Csv<T>(pub T);

impl<'r, T: Serialize> Responder<'r, 'static> for Csv<Vec<T>> {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let string = write_csv(self.0).map_err(|e| {
            log::error!("csv export failed to serialize: {:?}", e);
            Status::InternalServerError
        })?;
        (ContentType::CSV, string).respond_to(req)
    }
}

fn write_csv<T: Serialize>(rows: Vec<T>) -> anyhow::Result<String> {
    let mut writer = Writer::from_writer(Cursor::new(Vec::new()));
    for row in rows {
        writer.serialize(row)?;
    }
    let buf = writer.into_inner()?.into_inner();
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::write_csv;
    use crate::export::Export;
    use crate::rows::SeasonPitching;

    #[test]
    fn header_comes_from_the_export_field_names() {
        let row = SeasonPitching {
            team: Some("hawks".to_string()),
            year: Some(2025),
            player_number: Some(18),
            player: Some("田中".to_string()),
            wins: 6,
            innings_pitched: Some("45回1/3".to_string()),
            ..Default::default()
        };
        let text = write_csv(vec![Export(row)]).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("team,year,player_number,player,games_played,wins"));
        let line = lines.next().unwrap();
        assert!(line.starts_with("hawks,2025,18,田中,0,6"));
        assert!(line.contains("45回1/3"));
    }

    #[test]
    fn no_rows_serialize_to_nothing() {
        let text = write_csv(Vec::<Export<SeasonPitching>>::new()).unwrap();
        assert!(text.is_empty());
    }
}
