mod text_utils;

pub use text_utils::{fit_to_width, format_song_date};
