use crate::seed::SeedError;
use thiserror::Error;

/// Error types for recommendation generation and provider access.
///
/// Covers the generator's own contract failures (construction, range, seed
/// derivation) as well as failures surfaced by the collaborating services.
/// Upstream failures keep their original error reachable through
/// [`std::error::Error::source`].
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use soundscout::{Generator, ScoutError, SpotifyService};
///
/// # tokio_test::block_on(async {
/// let spotify = SpotifyService::new(
///     Box::new(http_client::native::NativeClient::new()),
///     "access-token",
/// );
/// let generator = Generator::builder()
///     .catalogue(spotify.clone())
///     .recommender(spotify)
///     .build()?;
///
/// match generator.tracklist(30).await {
///     Ok(tracks) => println!("{} new tracks", tracks.len()),
///     Err(ScoutError::Upstream { context, source }) => {
///         eprintln!("{context}: {source}");
///     }
///     Err(e) => eprintln!("generation failed: {e}"),
/// }
/// # Ok::<(), soundscout::ScoutError>(())
/// # });
/// ```
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Generator construction was attempted without a required collaborator.
    ///
    /// Fatal; the caller wired the generator incorrectly. No retry will help.
    #[error("cannot build generator: no {0} was supplied")]
    Configuration(&'static str),

    /// The requested track count was zero.
    ///
    /// Reported before any collaborator is contacted.
    #[error("track count must be greater than zero")]
    Range,

    /// An entity in a seed batch lacked the identifier required for seeding.
    ///
    /// A single bad entity aborts the whole generation call; partial seed
    /// lists are never submitted.
    #[error("{context}")]
    Seed {
        /// Which batch failed ("one or more tracks/artists are invalid seeds").
        context: &'static str,
        #[source]
        source: SeedError,
    },

    /// A collaborator fetch or recommendation request failed.
    ///
    /// `context` is a stable phrase identifying the step ("cannot fetch
    /// recent tracks", "cannot fetch top artists", ...); the collaborator's
    /// own error is preserved as the cause.
    #[error("{context}")]
    Upstream {
        /// Which step failed.
        context: &'static str,
        #[source]
        source: Box<ScoutError>,
    },

    /// A collaborator call succeeded but returned an empty payload where
    /// content was expected.
    #[error("invalid or empty data returned")]
    InvalidData,

    /// A recommendation request was attempted with no seeds at all.
    #[error("missing seed input")]
    MissingSeeds,

    /// HTTP/network related errors.
    ///
    /// Connection failures, timeouts, and non-success status codes from the
    /// underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a provider response body.
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl ScoutError {
    /// Wraps a collaborator failure with the phrase naming the step that
    /// issued it.
    pub(crate) fn upstream(context: &'static str, source: ScoutError) -> Self {
        ScoutError::Upstream {
            context,
            source: Box::new(source),
        }
    }
}
