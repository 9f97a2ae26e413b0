use crate::foundation::models::SongRecord;
use crate::foundation::utils::format_song_date;

/// A display element that shows a single line of text.
pub trait TextElement {
    fn set_text(&mut self, text: &str);
}

/// A display element that shows an image loaded from a URL.
///
/// Loading, caching and placeholders belong to the implementation; a load that
/// fails is simply never shown.
pub trait ImageElement {
    fn load(&mut self, url: &str);
}

impl TextElement for String {
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

/// The display elements of one visible row.
pub struct RowElements<'a> {
    pub title: &'a mut dyn TextElement,
    pub artist: &'a mut dyn TextElement,
    pub track_id: &'a mut dyn TextElement,
    pub release_date: &'a mut dyn TextElement,
    pub artwork: &'a mut dyn ImageElement,
}

/// Binds a song to the elements of a row.
pub fn bind_row(song: &SongRecord, row: &mut RowElements<'_>, date_format: &str) {
    row.title.set_text(song.title());
    row.artist.set_text(song.artist());
    row.track_id.set_text(song.track_id());
    row.release_date.set_text(&format_song_date(&song.song_date(), date_format));
    row.artwork.load(song.track_image());
}
