use crate::artist::Artist;
use crate::error::ScoutError;
use crate::seed::Seed;
use crate::service::{MusicService, Recommender};
use crate::track::Track;
use crate::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// The recommendation engine.
///
/// Bound at construction to a catalogue collaborator ([`MusicService`]) and a
/// recommendation collaborator ([`Recommender`]), it offers two generation
/// strategies:
///
/// - [`tracklist`](Generator::tracklist) — *history-seeded*: seeds come from
///   the listener's recently played tracks, favoring discovery adjacent to
///   what was just played.
/// - [`limited_tracklist`](Generator::limited_tracklist) — *taste-seeded*:
///   seeds come from the listener's top artists, favoring discovery adjacent
///   to long-term taste.
///
/// Both strategies drop every candidate whose artist appears among the
/// listener's top artists, and keep at most one track per artist, so the
/// result is a list of genuinely new-to-the-listener music.
///
/// The generator is immutable after construction and holds no state across
/// calls; every invocation fetches fresh data. Failures are never retried and
/// are returned to the caller with the failing step named, see
/// [`ScoutError`].
pub struct Generator {
    catalogue: Arc<dyn MusicService>,
    recommender: Arc<dyn Recommender>,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator").finish_non_exhaustive()
    }
}

/// Builder for [`Generator`].
///
/// [`build`](GeneratorBuilder::build) fails with
/// [`ScoutError::Configuration`] if either collaborator was never supplied.
#[derive(Default)]
pub struct GeneratorBuilder {
    catalogue: Option<Arc<dyn MusicService>>,
    recommender: Option<Arc<dyn Recommender>>,
}

impl GeneratorBuilder {
    pub fn catalogue(mut self, catalogue: impl MusicService + 'static) -> Self {
        self.catalogue = Some(Arc::new(catalogue));
        self
    }

    pub fn recommender(mut self, recommender: impl Recommender + 'static) -> Self {
        self.recommender = Some(Arc::new(recommender));
        self
    }

    pub fn build(self) -> Result<Generator> {
        let catalogue = self
            .catalogue
            .ok_or(ScoutError::Configuration("catalogue"))?;
        let recommender = self
            .recommender
            .ok_or(ScoutError::Configuration("recommender"))?;

        Ok(Generator {
            catalogue,
            recommender,
        })
    }
}

impl Generator {
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::default()
    }

    /// Generates up to `count` recommendations seeded by the listener's
    /// recently played tracks.
    ///
    /// Every recent track must yield a valid seed; a single track with an
    /// empty id aborts the call. Top artists are fetched *after* the
    /// recommendation request, so a top-artists failure still spends the
    /// recommendation call.
    pub async fn tracklist(&self, count: usize) -> Result<Vec<Track>> {
        if count == 0 {
            return Err(ScoutError::Range);
        }

        let recent = self
            .catalogue
            .recent_tracks()
            .await
            .map_err(|e| ScoutError::upstream("cannot fetch recent tracks", e))?;

        let seeds = recent
            .iter()
            .map(Track::seed)
            .collect::<std::result::Result<Vec<Seed>, _>>()
            .map_err(|e| ScoutError::Seed {
                context: "one or more tracks are invalid seeds",
                source: e,
            })?;

        let candidates = self
            .recommender
            .recommendations(count, &seeds)
            .await
            .map_err(|e| ScoutError::upstream("cannot fetch recommendations", e))?;

        let top = self
            .catalogue
            .top_artists()
            .await
            .map_err(|e| ScoutError::upstream("cannot fetch top artists", e))?;

        Ok(filter(candidates, known_artists(&top)))
    }

    /// Generates up to `count` recommendations seeded by the listener's top
    /// artists.
    ///
    /// Top artists are fetched once and reused both as the seed source and as
    /// the exclusion set.
    pub async fn limited_tracklist(&self, count: usize) -> Result<Vec<Track>> {
        if count == 0 {
            return Err(ScoutError::Range);
        }

        let top = self
            .catalogue
            .top_artists()
            .await
            .map_err(|e| ScoutError::upstream("cannot fetch top artists", e))?;

        let seeds = top
            .iter()
            .map(Artist::seed)
            .collect::<std::result::Result<Vec<Seed>, _>>()
            .map_err(|e| ScoutError::Seed {
                context: "one or more artists are invalid seeds",
                source: e,
            })?;

        let candidates = self
            .recommender
            .recommendations(count, &seeds)
            .await
            .map_err(|e| ScoutError::upstream("cannot fetch recommendations", e))?;

        Ok(filter(candidates, known_artists(&top)))
    }
}

/// Builds the known-artist index: a name-keyed map used as the initial
/// exclusion set.
///
/// Returns `None` for an empty input so callers can tell "no exclusions"
/// apart from "some exclusions"; an absent index short-circuits [`filter`].
/// Duplicate names keep the last-listed artist.
fn known_artists(artists: &[Artist]) -> Option<HashMap<String, Artist>> {
    if artists.is_empty() {
        return None;
    }

    Some(
        artists
            .iter()
            .map(|a| (a.name.clone(), a.clone()))
            .collect(),
    )
}

/// Drops every candidate whose artist name is in the exclusion index.
///
/// Kept tracks keep their relative order, and each kept track's artist is
/// inserted into the index as the pass proceeds, so a later candidate by the
/// same artist is dropped as well: first occurrence per artist wins.
///
/// An absent or empty index means "pass through": the candidate vector is
/// returned as-is, untouched.
fn filter(candidates: Vec<Track>, exclusions: Option<HashMap<String, Artist>>) -> Vec<Track> {
    if candidates.is_empty() {
        return candidates;
    }

    let mut exclusions = match exclusions {
        Some(map) if !map.is_empty() => map,
        _ => return candidates,
    };

    let mut kept = Vec::new();
    for track in candidates {
        if exclusions.contains_key(&track.artist.name) {
            continue;
        }

        exclusions.insert(track.artist.name.clone(), track.artist.clone());
        kept.push(track);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    fn artist(id: &str, name: &str) -> Artist {
        Artist::new(id, name)
    }

    fn track(id: &str, name: &str, by: Artist) -> Track {
        Track::new(id, name, by)
    }

    struct FakeCatalogue {
        artists: Vec<Artist>,
        artist_err: bool,
        tracks: Vec<Track>,
        track_err: bool,
    }

    impl FakeCatalogue {
        fn new(artists: Vec<Artist>, tracks: Vec<Track>) -> Self {
            Self {
                artists,
                artist_err: false,
                tracks,
                track_err: false,
            }
        }
    }

    #[async_trait(?Send)]
    impl MusicService for FakeCatalogue {
        async fn top_artists(&self) -> Result<Vec<Artist>> {
            if self.artist_err {
                return Err(ScoutError::Http("top artists unavailable".into()));
            }
            Ok(self.artists.clone())
        }

        async fn recent_tracks(&self) -> Result<Vec<Track>> {
            if self.track_err {
                return Err(ScoutError::Http("recent tracks unavailable".into()));
            }
            Ok(self.tracks.clone())
        }
    }

    struct FakeRecommender {
        tracks: Vec<Track>,
        err: bool,
    }

    impl FakeRecommender {
        fn new(tracks: Vec<Track>) -> Self {
            Self {
                tracks,
                err: false,
            }
        }
    }

    #[async_trait(?Send)]
    impl Recommender for FakeRecommender {
        async fn recommendations(&self, _count: usize, _seeds: &[Seed]) -> Result<Vec<Track>> {
            if self.err {
                return Err(ScoutError::Http("recommendations unavailable".into()));
            }
            Ok(self.tracks.clone())
        }
    }

    struct PanickingCatalogue;

    #[async_trait(?Send)]
    impl MusicService for PanickingCatalogue {
        async fn top_artists(&self) -> Result<Vec<Artist>> {
            panic!("catalogue must not be called");
        }

        async fn recent_tracks(&self) -> Result<Vec<Track>> {
            panic!("catalogue must not be called");
        }
    }

    struct PanickingRecommender;

    #[async_trait(?Send)]
    impl Recommender for PanickingRecommender {
        async fn recommendations(&self, _: usize, _: &[Seed]) -> Result<Vec<Track>> {
            panic!("recommender must not be called");
        }
    }

    #[test]
    fn build_requires_both_collaborators() {
        let err = Generator::builder()
            .recommender(FakeRecommender::new(vec![]))
            .build()
            .unwrap_err();
        assert!(matches!(err, ScoutError::Configuration("catalogue")));

        let err = Generator::builder()
            .catalogue(FakeCatalogue::new(vec![], vec![]))
            .build()
            .unwrap_err();
        assert!(matches!(err, ScoutError::Configuration("recommender")));

        let err = Generator::builder().build().unwrap_err();
        assert!(matches!(err, ScoutError::Configuration(_)));
    }

    #[test]
    fn known_artists_is_absent_for_empty_input() {
        assert!(known_artists(&[]).is_none());
    }

    #[test]
    fn known_artists_keeps_last_duplicate() {
        let index = known_artists(&[artist("0", "foo"), artist("1", "foo")]).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index["foo"].id, "1");
    }

    #[test]
    fn filter_passes_candidates_through_without_exclusions() {
        let candidates = vec![
            track("10", "baz", artist("0", "foo")),
            track("11", "quux", artist("1", "bar")),
        ];

        let out = filter(candidates.clone(), None);
        assert_eq!(out, candidates);

        let out = filter(candidates.clone(), Some(HashMap::new()));
        assert_eq!(out, candidates);
    }

    #[test]
    fn filter_of_nothing_is_nothing() {
        let index = known_artists(&[artist("0", "foo")]);
        assert!(filter(vec![], index).is_empty());
    }

    #[test]
    fn filter_drops_every_track_by_a_known_artist() {
        let foo = artist("0", "foo");
        let candidates = vec![
            track("10", "baz", foo.clone()),
            track("11", "quux", artist("1", "bar")),
            track("12", "corge", foo.clone()),
        ];

        let out = filter(candidates, known_artists(&[foo]));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "quux");
    }

    #[test]
    fn filter_keeps_only_the_first_track_per_artist() {
        let garply = artist("2", "garply");
        let candidates = vec![
            track("10", "baz", garply.clone()),
            track("11", "quux", garply.clone()),
            track("12", "corge", artist("3", "fred")),
        ];

        // Exclusion set present but initially holds an unrelated artist, so
        // the dedup comes entirely from growth during the pass.
        let out = filter(candidates, known_artists(&[artist("9", "waldo")]));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name, "baz");
        assert_eq!(out[1].name, "corge");
    }

    #[tokio::test]
    async fn tracklist_returns_novel_tracks() {
        let foo = artist("0", "foo");
        let catalogue = FakeCatalogue::new(
            vec![foo.clone(), artist("1", "bar")],
            vec![track("10", "baz", foo)],
        );
        let recommender = FakeRecommender::new(vec![track("21", "qux", Artist::default())]);

        let generator = Generator::builder()
            .catalogue(catalogue)
            .recommender(recommender)
            .build()
            .unwrap();

        let list = generator.tracklist(30).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "qux");
    }

    #[tokio::test]
    async fn limited_tracklist_excludes_known_and_repeated_artists() {
        let foo = artist("0", "foo");
        let catalogue = FakeCatalogue::new(vec![foo.clone(), artist("1", "bar")], vec![]);
        let recommender = FakeRecommender::new(vec![
            track("20", "plugh", foo.clone()),
            track("21", "xyzzy", artist("2", "garply")),
            track("22", "thud", foo),
            track("23", "waldo", artist("3", "fred")),
        ]);

        let generator = Generator::builder()
            .catalogue(catalogue)
            .recommender(recommender)
            .build()
            .unwrap();

        let list = generator.limited_tracklist(30).await.unwrap();
        let names: Vec<&str> = list.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["xyzzy", "waldo"]);
    }

    #[tokio::test]
    async fn zero_count_fails_before_any_collaborator_call() {
        let generator = Generator::builder()
            .catalogue(PanickingCatalogue)
            .recommender(PanickingRecommender)
            .build()
            .unwrap();

        assert!(matches!(
            generator.tracklist(0).await.unwrap_err(),
            ScoutError::Range
        ));
        assert!(matches!(
            generator.limited_tracklist(0).await.unwrap_err(),
            ScoutError::Range
        ));
    }

    #[tokio::test]
    async fn invalid_track_seed_aborts_tracklist() {
        let foo = artist("0", "foo");
        let catalogue = FakeCatalogue::new(
            vec![foo.clone()],
            vec![
                track("10", "baz", foo.clone()),
                track("", "unplayable", foo),
            ],
        );
        let recommender = FakeRecommender::new(vec![track("21", "qux", Artist::default())]);

        let generator = Generator::builder()
            .catalogue(catalogue)
            .recommender(recommender)
            .build()
            .unwrap();

        let err = generator.tracklist(30).await.unwrap_err();
        assert!(matches!(
            err,
            ScoutError::Seed {
                context: "one or more tracks are invalid seeds",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn invalid_artist_seed_aborts_limited_tracklist() {
        let catalogue =
            FakeCatalogue::new(vec![artist("0", "foo"), artist("", "nameless")], vec![]);
        let recommender = FakeRecommender::new(vec![]);

        let generator = Generator::builder()
            .catalogue(catalogue)
            .recommender(recommender)
            .build()
            .unwrap();

        let err = generator.limited_tracklist(30).await.unwrap_err();
        assert!(matches!(
            err,
            ScoutError::Seed {
                context: "one or more artists are invalid seeds",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn recent_tracks_failure_is_wrapped() {
        let mut catalogue = FakeCatalogue::new(vec![], vec![]);
        catalogue.track_err = true;

        let generator = Generator::builder()
            .catalogue(catalogue)
            .recommender(FakeRecommender::new(vec![]))
            .build()
            .unwrap();

        let err = generator.tracklist(30).await.unwrap_err();
        assert!(matches!(
            err,
            ScoutError::Upstream {
                context: "cannot fetch recent tracks",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn recommendation_failure_is_wrapped() {
        let foo = artist("0", "foo");
        let catalogue = FakeCatalogue::new(vec![foo.clone()], vec![track("10", "baz", foo)]);
        let mut recommender = FakeRecommender::new(vec![]);
        recommender.err = true;

        let generator = Generator::builder()
            .catalogue(catalogue)
            .recommender(recommender)
            .build()
            .unwrap();

        let err = generator.tracklist(30).await.unwrap_err();
        assert!(matches!(
            err,
            ScoutError::Upstream {
                context: "cannot fetch recommendations",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn top_artists_failure_fails_both_strategies() {
        let foo = artist("0", "foo");

        let mut catalogue = FakeCatalogue::new(vec![], vec![track("10", "baz", foo)]);
        catalogue.artist_err = true;
        let generator = Generator::builder()
            .catalogue(catalogue)
            .recommender(FakeRecommender::new(vec![]))
            .build()
            .unwrap();
        let err = generator.tracklist(30).await.unwrap_err();
        assert!(matches!(
            err,
            ScoutError::Upstream {
                context: "cannot fetch top artists",
                ..
            }
        ));

        // In the taste-seeded strategy the artists are needed before seeds can
        // be derived, so the recommender must never be contacted.
        let mut catalogue = FakeCatalogue::new(vec![], vec![]);
        catalogue.artist_err = true;
        let generator = Generator::builder()
            .catalogue(catalogue)
            .recommender(PanickingRecommender)
            .build()
            .unwrap();
        let err = generator.limited_tracklist(30).await.unwrap_err();
        assert!(matches!(
            err,
            ScoutError::Upstream {
                context: "cannot fetch top artists",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn upstream_error_keeps_its_cause() {
        let mut catalogue = FakeCatalogue::new(vec![], vec![]);
        catalogue.track_err = true;

        let generator = Generator::builder()
            .catalogue(catalogue)
            .recommender(FakeRecommender::new(vec![]))
            .build()
            .unwrap();

        let err = generator.tracklist(30).await.unwrap_err();
        assert_eq!(err.to_string(), "cannot fetch recent tracks");

        let source = std::error::Error::source(&err).expect("cause preserved");
        assert_eq!(source.to_string(), "HTTP error: recent tracks unavailable");
    }
}
