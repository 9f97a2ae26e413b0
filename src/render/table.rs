//! Terminal rendering of the song list.

use crate::controller::SongListView;
use crate::foundation::utils::fit_to_width;
use crate::foundation::SongCollection;
use crate::render::{bind_row, ImageElement, RowElements};
use crate::song_client::FetchError;
use std::io::{self, Write};
use tracing::warn;

const INDEX_WIDTH: usize = 4;
const TITLE_WIDTH: usize = 32;
const ARTIST_WIDTH: usize = 24;
const TRACK_ID_WIDTH: usize = 12;
const DATE_WIDTH: usize = 17;

/// Terminals cannot draw the artwork, so the cell keeps the URL and prints it.
#[derive(Default)]
struct ArtworkCell {
    url: String,
}

impl ImageElement for ArtworkCell {
    fn load(&mut self, url: &str) {
        self.url = url.to_string();
    }
}

#[derive(Default)]
struct RowCells {
    title: String,
    artist: String,
    track_id: String,
    release_date: String,
    artwork: ArtworkCell,
}

/// Prints the whole list every time it is replaced.
pub struct SongTable<W: Write> {
    out: W,
    date_format: String,
}

impl<W: Write> SongTable<W> {
    pub fn new(out: W, date_format: &str) -> Self {
        Self {
            out,
            date_format: date_format.to_string(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, songs: &SongCollection) -> io::Result<()> {
        writeln!(
            self.out,
            "\x1b[1m{}{}  {}  {}  {}  {}\x1b[0m",
            fit_to_width("#", INDEX_WIDTH),
            fit_to_width("Title", TITLE_WIDTH),
            fit_to_width("Artist", ARTIST_WIDTH),
            fit_to_width("Track", TRACK_ID_WIDTH),
            fit_to_width("Released", DATE_WIDTH),
            "Artwork"
        )?;

        if songs.is_empty() {
            writeln!(self.out, "\x1b[33mNo songs in the feed.\x1b[0m")?;
        }

        let mut cells = RowCells::default();
        for index in 0..songs.len() {
            let Some(song) = songs.get(index) else {
                break;
            };

            let mut row = RowElements {
                title: &mut cells.title,
                artist: &mut cells.artist,
                track_id: &mut cells.track_id,
                release_date: &mut cells.release_date,
                artwork: &mut cells.artwork,
            };
            bind_row(song, &mut row, &self.date_format);

            writeln!(
                self.out,
                "{}{}  {}  {}  {}  \x1b[34m{}\x1b[0m",
                fit_to_width(&format!("{}", index + 1), INDEX_WIDTH),
                fit_to_width(&cells.title, TITLE_WIDTH),
                fit_to_width(&cells.artist, ARTIST_WIDTH),
                fit_to_width(&cells.track_id, TRACK_ID_WIDTH),
                fit_to_width(&cells.release_date, DATE_WIDTH),
                cells.artwork.url
            )?;
        }

        writeln!(self.out, "\x1b[32m{} song(s) loaded.\x1b[0m", songs.len())?;
        self.out.flush()
    }
}

impl<W: Write> SongListView for SongTable<W> {
    fn songs_replaced(&mut self, songs: &SongCollection) {
        if let Err(e) = self.render(songs) {
            warn!(error = %e, "Failed to draw the song list");
        }
    }

    fn show_failure(&mut self, error: &FetchError) {
        let notice = writeln!(self.out, "\x1b[1m\x1b[31mCould not load songs: {}\x1b[0m", error)
            .and_then(|_| self.out.flush());
        if let Err(e) = notice {
            warn!(error = %e, "Failed to draw the failure notice");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::SongRecord;
    use chrono::{TimeZone, Utc};

    fn output(table: SongTable<Vec<u8>>) -> String {
        String::from_utf8(table.into_inner()).unwrap()
    }

    #[test]
    fn test_renders_one_line_per_song() {
        let date = Utc.with_ymd_and_hms(1997, 4, 7, 9, 30, 0).unwrap();
        let songs = SongCollection::new(vec![
            SongRecord::new("Song 2", "Blur", "t-2", date, "http://img/2.png"),
            SongRecord::new("Creep", "Radiohead", "t-1", date, "http://img/1.png"),
        ]);

        let mut table = SongTable::new(Vec::new(), "%Y-%m-%d %H:%M");
        table.songs_replaced(&songs);
        let text = output(table);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Title"));
        assert!(lines[1].starts_with("1   Song 2"));
        assert!(lines[1].contains("Blur"));
        assert!(lines[1].contains("1997-04-07 09:30"));
        assert!(lines[1].contains("http://img/2.png"));
        assert!(lines[2].starts_with("2   Creep"));
        assert!(lines[3].contains("2 song(s) loaded."));
    }

    #[test]
    fn test_renders_empty_collection() {
        let mut table = SongTable::new(Vec::new(), "%Y");
        table.songs_replaced(&SongCollection::default());
        let text = output(table);

        assert!(text.contains("No songs in the feed."));
        assert!(text.contains("0 song(s) loaded."));
    }

    #[test]
    fn test_truncates_long_titles() {
        let date = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let title = "A".repeat(50);
        let songs = SongCollection::new(vec![SongRecord::new(&title, "B", "1", date, "u")]);

        let mut table = SongTable::new(Vec::new(), "%Y");
        table.songs_replaced(&songs);
        let text = output(table);

        assert!(text.contains(&format!("{}…", "A".repeat(TITLE_WIDTH - 1))));
        assert!(!text.contains(&title));
    }

    #[test]
    fn test_show_failure() {
        let error: FetchError = serde_json::from_str::<Vec<SongRecord>>("{not json")
            .unwrap_err()
            .into();

        let mut table = SongTable::new(Vec::new(), "%Y");
        table.show_failure(&error);

        assert!(output(table).contains("Could not load songs: JSON parse error"));
    }
}
