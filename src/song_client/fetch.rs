//! Retrieval of the remote song feed.
//!
//! The network request runs on the async runtime; the JSON body is decoded on a
//! blocking worker so a large feed never stalls the task driving the screen.

use crate::foundation::models::SongRecord;
use crate::song_client::FetchError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Anything able to produce the current list of songs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SongSource: Send + Sync {
    async fn fetch_songs(&self) -> Result<Vec<SongRecord>, FetchError>;
}

/// Fetches songs from a fixed HTTP(S) endpoint.
pub struct HttpSongFetcher {
    client: Client,
    url: String,
}

impl HttpSongFetcher {
    /// Builds a fetcher for `url`. A `timeout` bounds the whole request,
    /// body included.
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SongSource for HttpSongFetcher {
    async fn fetch_songs(&self) -> Result<Vec<SongRecord>, FetchError> {
        fetch_songs(&self.client, &self.url).await
    }
}

/// Downloads the feed at `url` and decodes it into songs, preserving order.
///
/// # Example
///
/// ```no_run
/// use reqwest::Client;
/// use songlist::fetch_songs;
///
/// async fn example() {
///     let client = Client::new();
///     match fetch_songs(&client, "https://example.com/songs.json").await {
///         Ok(songs) => println!("Fetched {} songs", songs.len()),
///         Err(e) => eprintln!("Error: {}", e),
///     }
/// }
/// ```
pub async fn fetch_songs(client: &Client, url: &str) -> Result<Vec<SongRecord>, FetchError> {
    debug!(url, "Requesting song feed");

    let response = client
        .get(url)
        .header(CONTENT_TYPE, "application/json")
        .send()
        .await?
        .error_for_status()?;

    // Consumes the response; the connection is released here on every path.
    let body = response.bytes().await?;

    debug!(bytes = body.len(), "Deserializing JSON");
    let songs = tokio::task::spawn_blocking(move || parse_songs(&body)).await??;
    debug!(count = songs.len(), "JSON deserialized");

    Ok(songs)
}

/// Decodes a feed body: a JSON array of song objects.
pub fn parse_songs(body: &[u8]) -> Result<Vec<SongRecord>, FetchError> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const TWO_SONGS: &str = r#"[
        {"title":"Song 2","artist":"Blur","trackId":"t-2","songDate":"1997-04-07T00:00:00Z","trackImage":"http://img/2.png"},
        {"title":"Creep","artist":"Radiohead","trackId":"t-1","songDate":"1992-09-21T00:00:00Z","trackImage":"http://img/1.png","extra":true}
    ]"#;

    /// Serves a single canned HTTP response and hands back the raw request.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).into_owned();

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (format!("http://{}/songs.json", addr), handle)
    }

    #[test]
    fn test_parse_songs_preserves_order() {
        let songs = parse_songs(TWO_SONGS.as_bytes()).unwrap();

        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].title(), "Song 2");
        assert_eq!(songs[1].title(), "Creep");
        assert_eq!(songs[1].artist(), "Radiohead");
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_songs(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_body() {
        let err = parse_songs(b"{not json").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_parse_object_instead_of_array() {
        let err = parse_songs(br#"{"title":"A"}"#).unwrap_err();
        assert!(err.is_parse());
    }

    #[tokio::test]
    async fn test_fetch_songs_over_http() {
        let (url, server) = serve_once("HTTP/1.1 200 OK", TWO_SONGS).await;
        let fetcher = HttpSongFetcher::new(&url, Some(Duration::from_secs(5))).unwrap();

        let songs = fetcher.fetch_songs().await.unwrap();
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].track_id(), "t-2");

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /songs.json http/1.1"));
        assert!(request.contains("content-type: application/json"));
    }

    #[tokio::test]
    async fn test_fetch_songs_malformed_body() {
        let (url, server) = serve_once("HTTP/1.1 200 OK", "{not json").await;
        let fetcher = HttpSongFetcher::new(&url, None).unwrap();

        let err = fetcher.fetch_songs().await.unwrap_err();
        assert!(err.is_parse());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_songs_error_status() {
        let (url, server) = serve_once("HTTP/1.1 404 Not Found", "[]").await;
        let fetcher = HttpSongFetcher::new(&url, None).unwrap();

        let err = fetcher.fetch_songs().await.unwrap_err();
        assert!(err.is_transport());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_songs_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Accepts the connection and never answers
        let server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let url = format!("http://{}/songs.json", addr);
        let fetcher = HttpSongFetcher::new(&url, Some(Duration::from_millis(200))).unwrap();

        let err = fetcher.fetch_songs().await.unwrap_err();
        assert!(err.is_transport());
        server.abort();
    }

    #[tokio::test]
    async fn test_fetch_songs_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = HttpSongFetcher::new(&format!("http://{}/songs.json", addr), None).unwrap();
        let err = fetcher.fetch_songs().await.unwrap_err();
        assert!(err.is_transport());
    }
}
