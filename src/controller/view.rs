use crate::foundation::SongCollection;
use crate::song_client::FetchError;

/// Observer of the song list owned by the controller.
///
/// Called only from the task that drives the screen.
#[cfg_attr(test, mockall::automock)]
pub trait SongListView {
    /// The collection was swapped for a new one; re-query count and rows.
    fn songs_replaced(&mut self, songs: &SongCollection);

    /// A refresh failed. The previous collection is still current.
    fn show_failure(&mut self, error: &FetchError);
}
