//! Personalized music discovery.
//!
//! `soundscout` turns a listener's listening history into a list of *novel*
//! track recommendations: tracks by artists the listener does not already
//! follow. It derives recommendation seeds from recent tracks or top artists,
//! asks a recommendation provider for candidates, and filters out every
//! candidate whose artist the listener already knows.
//!
//! The engine is defined over two small capability traits ([`MusicService`]
//! and [`Recommender`]) so any provider — or test double — can be plugged in.
//! A ready-made adapter for the Spotify Web API is included as
//! [`SpotifyService`].
//!
//! # Example
//!
//! ```rust,no_run
//! use soundscout::{Generator, SpotifyService};
//!
//! # tokio_test::block_on(async {
//! let spotify = SpotifyService::new(
//!     Box::new(http_client::native::NativeClient::new()),
//!     "access-token",
//! );
//!
//! let generator = Generator::builder()
//!     .catalogue(spotify.clone())
//!     .recommender(spotify)
//!     .build()?;
//!
//! // Tracks adjacent to what the listener just played, minus known artists.
//! let tracks = generator.tracklist(30).await?;
//! for track in tracks {
//!     println!("{} — {}", track.artist.name, track.name);
//! }
//! # Ok::<(), soundscout::ScoutError>(())
//! # });
//! ```

pub mod artist;
pub mod error;
pub mod generator;
pub mod playlist;
pub mod seed;
pub mod service;
pub mod snapshot;
pub mod spotify;
pub mod track;

pub use artist::Artist;
pub use error::ScoutError;
pub use generator::{Generator, GeneratorBuilder};
pub use playlist::{Playlist, User};
pub use seed::{Seed, SeedError, SeedKind};
pub use service::{MusicService, PlaylistService, Recommender};
pub use snapshot::ListenerSnapshot;
pub use spotify::SpotifyService;
pub use track::Track;

#[cfg(feature = "mock")]
pub use service::{MockMusicService, MockPlaylistService, MockRecommender};

pub type Result<T> = std::result::Result<T, ScoutError>;
