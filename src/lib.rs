pub mod configuration;
pub mod controller;
pub mod foundation;
pub mod render;
pub mod song_client;
pub mod startup;

pub use configuration::*;
pub use controller::{RefreshOutcome, RefreshState, SongListController};
pub use foundation::{SongCollection, SongRecord};
pub use song_client::{fetch_songs, FetchError, HttpSongFetcher, SongSource};
