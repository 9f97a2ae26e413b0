use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer};

/// One entry of the remote song feed.
///
/// Records are immutable: they are built in bulk when a feed response is parsed
/// and are only ever replaced wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SongRecord {
    #[serde(rename = "title", alias = "Title")]
    title: String,
    #[serde(rename = "artist", alias = "Artist")]
    artist: String,
    #[serde(rename = "trackId", alias = "TrackId")]
    track_id: String,
    #[serde(
        rename = "songDate",
        alias = "SongDate",
        deserialize_with = "deserialize_song_date"
    )]
    song_date: DateTime<Utc>,
    #[serde(rename = "trackImage", alias = "TrackImage")]
    track_image: String,
}

impl SongRecord {
    pub fn new(
        title: &str,
        artist: &str,
        track_id: &str,
        song_date: DateTime<Utc>,
        track_image: &str,
    ) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
            track_id: track_id.to_string(),
            song_date,
            track_image: track_image.to_string(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn track_id(&self) -> &str {
        &self.track_id
    }

    pub fn song_date(&self) -> DateTime<Utc> {
        self.song_date
    }

    /// URL of the artwork image for this song.
    pub fn track_image(&self) -> &str {
        &self.track_image
    }
}

/// Parses a feed timestamp.
///
/// Accepts RFC 3339 (`2020-01-01T00:00:00Z`, any offset, normalized to UTC) and
/// offset-less ISO-8601 date-times (`2020-01-01T00:00:00`), which are taken as UTC.
///
/// # Examples
///
/// ```
/// use songlist::foundation::models::parse_song_date;
///
/// let date = parse_song_date("2020-01-01T02:00:00+02:00").unwrap();
/// assert_eq!(date.to_rfc3339(), "2020-01-01T00:00:00+00:00");
/// ```
pub fn parse_song_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn deserialize_song_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_song_date(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid songDate value `{}`", raw)))
}
