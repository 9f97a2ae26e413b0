use chrono::{DateTime, Utc};
use std::fmt::Write;
use unicode_segmentation::UnicodeSegmentation;

/// Fits text into a fixed-width terminal column.
///
/// Width is counted in grapheme clusters, so accented and combined characters
/// are never split. Text that is too long is cut and ends with `…`; shorter
/// text is padded with spaces.
///
/// # Examples
///
/// ```
/// use songlist::foundation::utils::fit_to_width;
///
/// assert_eq!(fit_to_width("Björk", 8), "Björk   ");
/// assert_eq!(fit_to_width("Dark Side of the Moon", 8), "Dark Si…");
/// ```
pub fn fit_to_width(text: &str, width: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();

    if graphemes.len() <= width {
        let padding = width - graphemes.len();
        return format!("{}{}", text, " ".repeat(padding));
    }

    if width == 0 {
        return String::new();
    }

    let mut fitted: String = graphemes[..width - 1].concat();
    fitted.push('…');
    fitted
}

/// Formats a release date with a strftime pattern.
///
/// Falls back to RFC 3339 if the pattern is not a valid format string.
pub fn format_song_date(date: &DateTime<Utc>, pattern: &str) -> String {
    let mut formatted = String::new();
    if write!(formatted, "{}", date.format(pattern)).is_err() {
        return date.to_rfc3339();
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fit_to_width_pads_short_text() {
        assert_eq!(fit_to_width("abc", 5), "abc  ");
        assert_eq!(fit_to_width("", 2), "  ");
    }

    #[test]
    fn test_fit_to_width_truncates_long_text() {
        assert_eq!(fit_to_width("abcdef", 4), "abc…");
        assert_eq!(fit_to_width("abcdef", 0), "");
    }

    #[test]
    fn test_fit_to_width_counts_graphemes() {
        // "e" followed by a combining acute accent is one grapheme
        let text = "Cafe\u{301} Tacvba";
        assert_eq!(fit_to_width(text, 5), "Cafe\u{301}…");
    }

    #[test]
    fn test_format_song_date() {
        let date = Utc.with_ymd_and_hms(2020, 1, 31, 18, 5, 0).unwrap();

        assert_eq!(format_song_date(&date, "%Y-%m-%d %H:%M"), "2020-01-31 18:05");
        assert_eq!(format_song_date(&date, "%d/%m/%Y"), "31/01/2020");
    }

    #[test]
    fn test_format_song_date_invalid_pattern() {
        let date = Utc.with_ymd_and_hms(2020, 1, 31, 18, 5, 0).unwrap();
        assert_eq!(format_song_date(&date, "%Q"), "2020-01-31T18:05:00+00:00");
    }
}
