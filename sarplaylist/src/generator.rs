//! Génération de playlists
//!
//! Deux algorithmes :
//!
//! - **musique** : pour chaque morceau du catalogue, un jingle éventuel, un
//!   segment parlé éventuel, le morceau (avec variantes d'intro/outro tirées),
//!   puis une publicité éventuelle ;
//! - **radio parlée** : les émissions dans l'ordre des épisodes, un bulletin
//!   d'information toutes les `news_interval` émissions, les bulletins
//!   restants en fin de playlist.
//!
//! Chaque appel à `generate` travaille sur ses propres copies des listes du
//! catalogue (les « pools ») : un élément tiré n'est plus disponible pour le
//! reste de la passe.

use crate::item::{PlaylistItem, PlaylistStats};
use crate::talk;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use sarcatalog::{Advertisement, Segment, SegmentType, Song, Station};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default key of the talk-radio station
pub const DEFAULT_TALK_RADIO_KEY: &str = "wctr";

/// Catégories optionnelles incluses dans une passe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub include_ads: bool,
    pub include_weather: bool,
    pub include_bridges: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            include_ads: true,
            include_weather: true,
            include_bridges: true,
        }
    }
}

/// Probabilités de tirage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    /// Jingle avant chaque morceau ou émission
    pub jingle: f64,
    /// Publicité après un morceau (stations musicales)
    pub ad: f64,
    /// Publicité après une émission (radio parlée)
    pub talk_ad: f64,
    /// Nombre d'émissions entre deux bulletins d'information
    pub news_interval: usize,
}

impl Default for Probabilities {
    fn default() -> Self {
        Self {
            jingle: 0.7,
            ad: 0.35,
            talk_ad: 0.5,
            news_interval: 2,
        }
    }
}

/// Working copy of a catalog list, drained without replacement
#[derive(Debug)]
pub(crate) struct Pool<T> {
    items: Vec<T>,
}

impl<T> Pool<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    /// Removes and returns a uniformly chosen entry
    pub(crate) fn pick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.items.len());
        Some(self.items.swap_remove(index))
    }
}

/// Bernoulli draw that tolerates out-of-range configuration values
fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    if probability.is_nan() || probability <= 0.0 {
        false
    } else if probability >= 1.0 {
        true
    } else {
        rng.random_bool(probability)
    }
}

/// Générateur de playlists
///
/// La source aléatoire est injectée : `StdRng::seed_from_u64` rend une
/// génération reproductible.
///
/// # Exemple
///
/// ```
/// use sarcatalog::{Song, Station};
/// use sarplaylist::{GenerationOptions, PlaylistGenerator};
///
/// let station = Station::new("x", "X")
///     .with_song(Song::new(vec!["A".into()], "One"))
///     .with_song(Song::new(vec!["B".into()], "Two"));
///
/// let mut generator = PlaylistGenerator::with_seed(42);
/// let playlist = generator.generate(&station, &[], GenerationOptions::default());
/// assert_eq!(playlist.iter().filter(|i| i.is_song()).count(), 2);
/// ```
#[derive(Debug)]
pub struct PlaylistGenerator<R = StdRng> {
    rng: R,
    probabilities: Probabilities,
    talk_radio_key: String,
}

impl PlaylistGenerator<StdRng> {
    /// Générateur reproductible
    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Générateur initialisé depuis l'entropie du système
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> PlaylistGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            probabilities: Probabilities::default(),
            talk_radio_key: DEFAULT_TALK_RADIO_KEY.to_string(),
        }
    }

    pub fn with_probabilities(mut self, probabilities: Probabilities) -> Self {
        self.probabilities = probabilities;
        self
    }

    pub fn with_talk_radio_key(mut self, key: impl Into<String>) -> Self {
        self.talk_radio_key = key.into();
        self
    }

    pub fn probabilities(&self) -> &Probabilities {
        &self.probabilities
    }

    pub fn talk_radio_key(&self) -> &str {
        &self.talk_radio_key
    }

    pub fn is_talk_radio(&self, station: &Station) -> bool {
        station.key == self.talk_radio_key
    }

    /// Génère une playlist complète pour `station`
    ///
    /// Tous les morceaux de la station apparaissent exactement une fois ; une
    /// station sans morceau donne une playlist vide.
    pub fn generate(
        &mut self,
        station: &Station,
        ads: &[Advertisement],
        options: GenerationOptions,
    ) -> Vec<PlaylistItem> {
        let playlist = if self.is_talk_radio(station) {
            self.generate_talk(station, ads, options)
        } else {
            self.generate_music(station, ads, options)
        };

        debug!(
            station = %station.key,
            talk = self.is_talk_radio(station),
            items = playlist.len(),
            stats = %PlaylistStats::from_items(&playlist),
            "Playlist generated"
        );
        playlist
    }

    fn generate_music(
        &mut self,
        station: &Station,
        ads: &[Advertisement],
        options: GenerationOptions,
    ) -> Vec<PlaylistItem> {
        let rng = &mut self.rng;
        let probabilities = self.probabilities;

        let mut songs = Pool::new(station.songs.clone());
        let mut jingles = Pool::new(station.segments(SegmentType::StationJingle).to_vec());
        let mut ads = Pool::new(ads.to_vec());

        // Catégories de segments pouvant précéder un morceau
        let mut talk_pools: Vec<Pool<Segment>> = [
            (SegmentType::BridgeAnnouncement, options.include_bridges),
            (SegmentType::Weather, options.include_weather),
            (SegmentType::DjTalk, true),
            (SegmentType::Caller, true),
            (SegmentType::Story, true),
        ]
        .into_iter()
        .filter(|(_, enabled)| *enabled)
        .map(|(kind, _)| Pool::new(station.segments(kind).to_vec()))
        .collect();

        let iterations = songs.len();
        let mut playlist = Vec::with_capacity(iterations * 3);

        for _ in 0..iterations {
            if songs.is_empty() {
                break;
            }

            // 1. Jingle
            if !jingles.is_empty() && chance(rng, probabilities.jingle) {
                if let Some(jingle) = jingles.pick(rng) {
                    playlist.push(PlaylistItem::jingle(station, jingle));
                }
            }

            // 2. Segment parlé, catégorie tirée parmi les pools non vides
            let available: Vec<usize> = talk_pools
                .iter()
                .enumerate()
                .filter(|(_, pool)| !pool.is_empty())
                .map(|(index, _)| index)
                .collect();
            if let Some(&index) = available.choose(rng) {
                if let Some(segment) = talk_pools[index].pick(rng) {
                    playlist.push(PlaylistItem::segment(station, segment));
                }
            }

            // 3. Morceau
            let Some(song) = songs.pick(rng) else {
                break;
            };
            let intro = pick_variant(rng, song.intro_count);
            let outro = pick_variant(rng, song.outro_count);
            playlist.push(PlaylistItem::song(station, song, intro, outro));

            // 4. Publicité
            if options.include_ads && !ads.is_empty() && chance(rng, probabilities.ad) {
                if let Some(ad) = ads.pick(rng) {
                    playlist.push(PlaylistItem::ad(ad));
                }
            }
        }

        playlist
    }

    fn generate_talk(
        &mut self,
        station: &Station,
        ads: &[Advertisement],
        options: GenerationOptions,
    ) -> Vec<PlaylistItem> {
        let rng = &mut self.rng;
        let probabilities = self.probabilities;
        let news_interval = probabilities.news_interval.max(1);

        let (news, shows): (Vec<Song>, Vec<Song>) = station
            .songs
            .iter()
            .cloned()
            .partition(|song| talk::is_news(&song.title));
        let shows = talk::episode_order(shows, rng);
        let mut news = talk::episode_order(news, rng).into_iter();

        let mut jingles = Pool::new(station.segments(SegmentType::StationJingle).to_vec());
        let mut ads = Pool::new(ads.to_vec());

        let mut playlist = Vec::with_capacity(station.songs.len() * 3);
        let mut shows_since_news = 0;

        for show in shows {
            if !jingles.is_empty() && chance(rng, probabilities.jingle) {
                if let Some(jingle) = jingles.pick(rng) {
                    playlist.push(PlaylistItem::jingle(station, jingle));
                }
            }

            // Pas de variantes pour les émissions
            playlist.push(PlaylistItem::song(station, show, 0, 0));
            shows_since_news += 1;

            if options.include_ads && !ads.is_empty() && chance(rng, probabilities.talk_ad) {
                if let Some(ad) = ads.pick(rng) {
                    playlist.push(PlaylistItem::ad(ad));
                }
            }

            if shows_since_news >= news_interval {
                if let Some(bulletin) = news.next() {
                    playlist.push(PlaylistItem::song(station, bulletin, 0, 0));
                    shows_since_news = 0;
                }
            }
        }

        // Bulletins restants
        for bulletin in news {
            playlist.push(PlaylistItem::song(station, bulletin, 0, 0));
        }

        playlist
    }
}

/// Variant number in `[0, count]`, or 0 when the song has no variant
fn pick_variant<R: Rng + ?Sized>(rng: &mut R, count: u32) -> u32 {
    if count > 0 {
        rng.random_range(0..=count)
    } else {
        0
    }
}
