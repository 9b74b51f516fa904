//! Adapter over the Spotify Web API.
//!
//! Satisfies all three capability traits so a single [`SpotifyService`] can
//! back both the [`Generator`](crate::Generator) and the
//! [`ListenerSnapshot`](crate::ListenerSnapshot). Session establishment is
//! out of scope; the adapter takes an already-obtained OAuth access token.

use crate::artist::Artist;
use crate::error::ScoutError;
use crate::playlist::{Playlist, User};
use crate::seed::{Seed, SeedKind};
use crate::service::{MusicService, PlaylistService, Recommender};
use crate::track::Track;
use crate::Result;
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use serde::Deserialize;
use std::sync::Arc;

const API_BASE: &str = "https://api.spotify.com/v1";

// Recommendation tuning: steer the provider away from chart-toppers so the
// results skew toward lesser-known artists.
const TARGET_POPULARITY: u32 = 40;
const MAX_POPULARITY: u32 = 50;

const PLAYLIST_PUBLIC: bool = true;
const PLAYLIST_DESCRIPTION: &str = "Fresh tracks picked from your listening";

/// Spotify Web API client implementing [`MusicService`], [`Recommender`] and
/// [`PlaylistService`].
///
/// Stateless apart from the access token; cloning is cheap and clones share
/// the underlying HTTP client.
#[derive(Clone)]
pub struct SpotifyService {
    client: Arc<dyn HttpClient + Send + Sync>,
    access_token: String,
}

impl SpotifyService {
    pub fn new(
        client: Box<dyn HttpClient + Send + Sync>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            client: Arc::from(client),
            access_token: access_token.into(),
        }
    }

    async fn send(&self, mut request: Request) -> Result<String> {
        request.insert_header("Authorization", format!("Bearer {}", self.access_token));
        request.insert_header("Accept", "application/json");

        log::debug!("{} {}", request.method(), request.url());

        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| ScoutError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ScoutError::Http(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        response
            .body_string()
            .await
            .map_err(|e| ScoutError::Http(e.to_string()))
    }

    async fn get(&self, url: &str) -> Result<String> {
        self.send(Request::new(Method::Get, url.parse::<Url>().unwrap()))
            .await
    }

    async fn post(&self, url: &str, body: serde_json::Value) -> Result<String> {
        let mut request = Request::new(Method::Post, url.parse::<Url>().unwrap());
        request.insert_header("Content-Type", "application/json");
        request.set_body(body.to_string());
        self.send(request).await
    }
}

fn parse<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| ScoutError::Parse(e.to_string()))
}

#[derive(Deserialize)]
struct ArtistPayload {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
}

impl ArtistPayload {
    fn into_artist(self) -> Artist {
        Artist {
            id: self.id,
            name: self.name,
        }
    }
}

#[derive(Deserialize)]
struct TrackPayload {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    // Spotify reports every contributing artist; the first one is credited.
    #[serde(default)]
    artists: Vec<ArtistPayload>,
}

impl TrackPayload {
    fn into_track(self) -> Track {
        let artist = self
            .artists
            .into_iter()
            .next()
            .map(ArtistPayload::into_artist)
            .unwrap_or_default();

        Track {
            id: self.id,
            name: self.name,
            artist,
        }
    }
}

#[derive(Deserialize)]
struct TopArtistsPayload {
    items: Vec<ArtistPayload>,
}

#[derive(Deserialize)]
struct RecentlyPlayedPayload {
    items: Vec<PlayHistoryPayload>,
}

#[derive(Deserialize)]
struct PlayHistoryPayload {
    track: TrackPayload,
}

#[derive(Deserialize)]
struct RecommendationsPayload {
    tracks: Vec<TrackPayload>,
}

#[derive(Deserialize)]
struct UserPayload {
    #[serde(default)]
    id: String,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct PlaylistPayload {
    id: String,
    name: String,
}

#[async_trait(?Send)]
impl MusicService for SpotifyService {
    async fn top_artists(&self) -> Result<Vec<Artist>> {
        let body = self
            .get(&format!("{API_BASE}/me/top/artists"))
            .await
            .map_err(|e| ScoutError::upstream("cannot fetch top artists", e))?;

        let payload: TopArtistsPayload = parse(&body)?;
        if payload.items.is_empty() {
            return Err(ScoutError::InvalidData);
        }

        Ok(payload
            .items
            .into_iter()
            .map(ArtistPayload::into_artist)
            .collect())
    }

    async fn recent_tracks(&self) -> Result<Vec<Track>> {
        let body = self
            .get(&format!("{API_BASE}/me/player/recently-played"))
            .await
            .map_err(|e| ScoutError::upstream("cannot fetch recently played tracks", e))?;

        let payload: RecentlyPlayedPayload = parse(&body)?;
        if payload.items.is_empty() {
            return Err(ScoutError::InvalidData);
        }

        Ok(payload
            .items
            .into_iter()
            .map(|item| item.track.into_track())
            .collect())
    }
}

#[async_trait(?Send)]
impl Recommender for SpotifyService {
    async fn recommendations(&self, count: usize, seeds: &[Seed]) -> Result<Vec<Track>> {
        if seeds.is_empty() {
            return Err(ScoutError::MissingSeeds);
        }

        // The provider caps the number of seeds per request, so seeds are
        // fetched one at a time and the batches aggregated in seed order.
        let mut tracks = Vec::new();
        for seed in seeds {
            let param = match seed.kind() {
                SeedKind::Artist => "seed_artists",
                SeedKind::Track => "seed_tracks",
            };
            let url = format!(
                "{API_BASE}/recommendations?limit={count}&{param}={}&target_popularity={TARGET_POPULARITY}&max_popularity={MAX_POPULARITY}",
                urlencoding::encode(seed.id()),
            );

            let body = self
                .get(&url)
                .await
                .map_err(|e| ScoutError::upstream("cannot fetch recommendations", e))?;

            let payload: RecommendationsPayload = parse(&body)?;
            tracks.extend(payload.tracks.into_iter().map(TrackPayload::into_track));
        }

        Ok(tracks)
    }
}

#[async_trait(?Send)]
impl PlaylistService for SpotifyService {
    async fn current_user(&self) -> Result<User> {
        let body = self
            .get(&format!("{API_BASE}/me"))
            .await
            .map_err(|e| ScoutError::upstream("cannot fetch user", e))?;

        let payload: UserPayload = parse(&body)?;
        if payload.id.is_empty() {
            return Err(ScoutError::InvalidData);
        }

        Ok(User {
            id: payload.id,
            display_name: payload.display_name.unwrap_or_default(),
        })
    }

    async fn create_playlist(&self, name: &str, tracks: &[Track]) -> Result<Playlist> {
        let user = self.current_user().await?;

        let body = self
            .post(
                &format!(
                    "{API_BASE}/users/{}/playlists",
                    urlencoding::encode(&user.id)
                ),
                serde_json::json!({
                    "name": name,
                    "description": PLAYLIST_DESCRIPTION,
                    "public": PLAYLIST_PUBLIC,
                }),
            )
            .await
            .map_err(|e| ScoutError::upstream("cannot create playlist", e))?;

        let payload: PlaylistPayload = parse(&body)?;

        let uris: Vec<String> = tracks
            .iter()
            .map(|t| format!("spotify:track:{}", t.id))
            .collect();

        self.post(
            &format!(
                "{API_BASE}/playlists/{}/tracks",
                urlencoding::encode(&payload.id)
            ),
            serde_json::json!({ "uris": uris }),
        )
        .await
        .map_err(|e| ScoutError::upstream("cannot add tracks to playlist", e))?;

        Ok(Playlist {
            id: payload.id,
            name: payload.name,
            tracks: tracks.to_vec(),
        })
    }
}
