//! Refresh orchestration for the song list screen.
//!
//! A refresh cycle goes Idle -> Loading -> Idle. The fetch runs on a spawned
//! task and its result comes back as a message on a channel, so the collection
//! and the view are only ever touched by whoever owns the controller.

use crate::controller::{BusyIndicator, SongListView};
use crate::foundation::{SongCollection, SongRecord};
use crate::song_client::{FetchError, SongSource};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// Result of one fetch, handed back from the worker task.
pub type FetchResult = Result<Vec<SongRecord>, FetchError>;

const LOADING_MESSAGE: &str = "Loading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The collection now holds `count` freshly fetched songs.
    Replaced { count: usize },
    /// The refresh failed; the message is what the user was shown.
    Failed(String),
    /// Nothing happened: a refresh was already running, or no refresh was pending.
    Ignored,
}

pub struct SongListController<V, I> {
    source: Arc<dyn SongSource>,
    view: V,
    indicator: I,
    songs: SongCollection,
    state: RefreshState,
    cycle: u64,
    results_tx: UnboundedSender<FetchResult>,
}

impl<V, I> SongListController<V, I>
where
    V: SongListView,
    I: BusyIndicator,
{
    /// Creates an idle controller with an empty collection.
    ///
    /// The returned receiver carries fetch results back to the caller's loop,
    /// which passes each one to [`SongListController::complete_refresh`].
    pub fn new(
        source: Arc<dyn SongSource>,
        view: V,
        indicator: I,
    ) -> (Self, UnboundedReceiver<FetchResult>) {
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        let controller = Self {
            source,
            view,
            indicator,
            songs: SongCollection::default(),
            state: RefreshState::Idle,
            cycle: 0,
            results_tx,
        };

        (controller, results_rx)
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }

    pub fn songs(&self) -> &SongCollection {
        &self.songs
    }

    /// Starts a refresh cycle.
    ///
    /// Returns `false` without doing anything if a refresh is already running,
    /// so overlapping fetches are impossible.
    pub fn request_refresh(&mut self) -> bool {
        if self.state == RefreshState::Loading {
            debug!(cycle = self.cycle, "Refresh already in progress, ignoring request");
            return false;
        }

        self.cycle += 1;
        self.state = RefreshState::Loading;
        self.indicator.show(LOADING_MESSAGE);
        info!(cycle = self.cycle, "Refreshing song list");

        let source = Arc::clone(&self.source);
        let results_tx = self.results_tx.clone();
        tokio::spawn(async move {
            let fetch = tokio::spawn(async move { source.fetch_songs().await });
            let result = match fetch.await {
                Ok(result) => result,
                Err(e) => Err(FetchError::from(e)),
            };

            if results_tx.send(result).is_err() {
                debug!("Song list closed before the fetch finished");
            }
        });

        true
    }

    /// Applies a fetch result and ends the current refresh cycle.
    pub fn complete_refresh(&mut self, result: FetchResult) -> RefreshOutcome {
        if self.state != RefreshState::Loading {
            warn!("Received a fetch result with no refresh pending, dropping it");
            return RefreshOutcome::Ignored;
        }

        self.state = RefreshState::Idle;

        match result {
            Ok(fetched) => {
                let count = fetched.len();
                self.songs = SongCollection::new(fetched);
                self.view.songs_replaced(&self.songs);
                self.indicator.dismiss();
                info!(cycle = self.cycle, count, "Song list replaced");
                RefreshOutcome::Replaced { count }
            }
            Err(e) => {
                self.indicator.dismiss();
                warn!(cycle = self.cycle, error = %e, "Refresh failed");
                self.view.show_failure(&e);
                RefreshOutcome::Failed(e.to_string())
            }
        }
    }

    /// Runs one whole refresh cycle, waiting for the result on `results`.
    pub async fn refresh(
        &mut self,
        results: &mut UnboundedReceiver<FetchResult>,
    ) -> RefreshOutcome {
        if !self.request_refresh() {
            return RefreshOutcome::Ignored;
        }

        match results.recv().await {
            Some(result) => self.complete_refresh(result),
            None => {
                self.state = RefreshState::Idle;
                self.indicator.dismiss();
                RefreshOutcome::Failed("Refresh channel closed".to_string())
            }
        }
    }
}
