//! Session de lecture
//!
//! Regroupe l'état d'une écoute : station courante, pool de publicités,
//! options de génération, générateur et séquenceur. Toutes les opérations
//! de navigation passent par cet objet.

use crate::error::Result;
use crate::generator::{GenerationOptions, PlaylistGenerator};
use crate::item::PlaylistItem;
use crate::resolver::ItemResolver;
use crate::sequencer::{EndOfListPolicy, Sequencer, Transition};
use rand::rngs::StdRng;
use rand::Rng;
use sarcatalog::{Advertisement, Catalog, Station};
use tracing::{debug, info, warn};

/// Session d'écoute d'une station
#[derive(Debug)]
pub struct Session<R = StdRng> {
    station: Station,
    ads: Vec<Advertisement>,
    options: GenerationOptions,
    generator: PlaylistGenerator<R>,
    sequencer: Sequencer,
}

impl<R: Rng> Session<R> {
    /// Ouvre une session et génère une première playlist
    pub fn new(
        station: Station,
        ads: Vec<Advertisement>,
        options: GenerationOptions,
        mut generator: PlaylistGenerator<R>,
        policy: EndOfListPolicy,
    ) -> Self {
        let items = generator.generate(&station, &ads, options);
        info!(station = %station.key, items = items.len(), "Session opened");
        Self {
            station,
            ads,
            options,
            generator,
            sequencer: Sequencer::new(items, policy),
        }
    }

    /// Ouvre une session sur une station du catalogue
    pub fn from_catalog(
        catalog: &Catalog,
        station_key: &str,
        options: GenerationOptions,
        generator: PlaylistGenerator<R>,
        policy: EndOfListPolicy,
    ) -> Result<Self> {
        let station = catalog.station(station_key)?.clone();
        Ok(Self::new(station, catalog.ads.clone(), options, generator, policy))
    }

    pub fn station(&self) -> &Station {
        &self.station
    }

    pub fn options(&self) -> GenerationOptions {
        self.options
    }

    pub fn playlist(&self) -> &[PlaylistItem] {
        self.sequencer.items()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.sequencer.current_index()
    }

    pub fn current_item(&self) -> Option<&PlaylistItem> {
        self.sequencer.current_item()
    }

    /// Les nouvelles options s'appliquent à la prochaine génération
    pub fn set_options(&mut self, options: GenerationOptions) {
        self.options = options;
    }

    pub fn set_policy(&mut self, policy: EndOfListPolicy) {
        self.sequencer.set_policy(policy);
    }

    /// Remplace la playlist par une nouvelle génération
    pub fn regenerate(&mut self) -> usize {
        let items = self
            .generator
            .generate(&self.station, &self.ads, self.options);
        let len = items.len();
        self.sequencer.replace(items);
        debug!(station = %self.station.key, items = len, "Playlist regenerated");
        len
    }

    /// Change de station et régénère
    pub fn switch_station(&mut self, station: Station) -> usize {
        info!(from = %self.station.key, to = %station.key, "Switching station");
        self.station = station;
        self.regenerate()
    }

    /// Passe à l'élément suivant
    ///
    /// En fin de liste, selon la politique, revient au début ou régénère.
    pub fn next(&mut self) -> Option<usize> {
        match self.sequencer.next() {
            Transition::Moved(index) | Transition::Wrapped(index) => Some(index),
            Transition::EndOfList => {
                self.regenerate();
                self.sequencer.current_index()
            }
            Transition::Empty => None,
        }
    }

    /// Revient à l'élément précédent (depuis le premier : le dernier)
    pub fn previous(&mut self) -> Option<usize> {
        self.sequencer.previous().index()
    }

    pub fn jump_to(&mut self, index: usize) -> Result<usize> {
        self.sequencer.jump_to(index)
    }

    /// Identifiant jouable de l'élément courant
    pub fn resolve_current(&self, resolver: &dyn ItemResolver) -> Option<Result<String>> {
        self.current_item()
            .map(|item| resolver.resolve(item, &self.station))
    }

    /// Avance jusqu'au premier élément résolvable à partir de l'index courant
    ///
    /// Les éléments en échec sont sautés (au plus un tour de playlist).
    /// Retourne l'index et l'identifiant trouvés.
    pub fn skip_failed(&mut self, resolver: &dyn ItemResolver) -> Option<(usize, String)> {
        let attempts = self.sequencer.len();
        for _ in 0..attempts {
            let index = self.current_index()?;
            match self.resolve_current(resolver)? {
                Ok(identifier) => return Some((index, identifier)),
                Err(err) => {
                    warn!(index, error = %err, "Skipping unplayable item");
                    self.next()?;
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::resolver::FileResolver;
    use rand::{RngCore, SeedableRng};
    use sarcatalog::{Segment, Song};
    use std::cell::Cell;
    use std::rc::Rc;

    fn station() -> Station {
        Station::new("x", "X")
            .with_song(Song::new(vec!["A".into()], "One"))
            .with_song(Song::new(vec!["B".into()], "Two"))
            .with_song(Song::new(vec!["C".into()], "Three"))
    }

    fn options() -> GenerationOptions {
        GenerationOptions {
            include_ads: false,
            ..GenerationOptions::default()
        }
    }

    fn session(policy: EndOfListPolicy) -> Session {
        Session::new(station(), Vec::new(), options(), PlaylistGenerator::with_seed(8), policy)
    }

    /// StdRng that counts the values it hands out
    struct CountingRng {
        inner: StdRng,
        draws: Rc<Cell<usize>>,
    }

    impl CountingRng {
        fn new(seed: u64) -> (Self, Rc<Cell<usize>>) {
            let draws = Rc::new(Cell::new(0));
            let rng = Self {
                inner: StdRng::seed_from_u64(seed),
                draws: Rc::clone(&draws),
            };
            (rng, draws)
        }

        fn count(&self) {
            self.draws.set(self.draws.get() + 1);
        }
    }

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.count();
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.count();
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            self.count();
            self.inner.fill_bytes(dst)
        }
    }

    fn counted_session(policy: EndOfListPolicy) -> (Session<CountingRng>, Rc<Cell<usize>>) {
        let (rng, draws) = CountingRng::new(8);
        let generator = PlaylistGenerator::new(rng);
        let session = Session::new(station(), Vec::new(), options(), generator, policy);
        (session, draws)
    }

    /// Rejects one song title, accepts everything else
    struct Picky(String);

    impl ItemResolver for Picky {
        fn song(&self, station: &Station, song: &Song, intro: u32, outro: u32) -> Result<String> {
            if song.title == self.0 {
                Err(Error::InvalidLiveQuery(song.title.clone()))
            } else {
                FileResolver.song(station, song, intro, outro)
            }
        }

        fn segment(&self, station: &Station, segment: &Segment) -> Result<String> {
            FileResolver.segment(station, segment)
        }

        fn ad(&self, station: &Station, ad: &Advertisement) -> Result<String> {
            FileResolver.ad(station, ad)
        }
    }

    #[test]
    fn test_session_generates_on_open() {
        let session = session(EndOfListPolicy::Wrap);
        assert_eq!(session.playlist().len(), 3);
        assert_eq!(session.current_index(), Some(0));
    }

    #[test]
    fn test_wrap_policy() {
        let (mut session, draws) = counted_session(EndOfListPolicy::Wrap);
        let first = session.playlist().to_vec();
        let before = draws.get();

        session.jump_to(2).unwrap();
        assert_eq!(session.next(), Some(0));
        assert_eq!(session.previous(), Some(2));

        // Pas de nouvelle passe : même playlist, aucun tirage
        assert_eq!(draws.get(), before);
        assert_eq!(session.playlist(), first.as_slice());
    }

    #[test]
    fn test_regenerate_policy_replaces_playlist() {
        // Le générateur de référence suit la même suite aléatoire que la session
        let mut reference = PlaylistGenerator::with_seed(8);
        let first_pass = reference.generate(&station(), &[], options());
        let second_pass = reference.generate(&station(), &[], options());

        let (mut session, draws) = counted_session(EndOfListPolicy::Regenerate);
        assert_eq!(session.playlist(), first_pass.as_slice());

        session.jump_to(2).unwrap();
        let before = draws.get();
        assert_eq!(session.next(), Some(0));

        assert!(draws.get() > before, "no generation pass on end of list");
        assert_eq!(session.current_index(), Some(0));
        assert_eq!(session.playlist(), second_pass.as_slice());
    }

    #[test]
    fn test_skip_failed_moves_past_bad_item() {
        let mut session = session(EndOfListPolicy::Wrap);
        let first = session.current_item().unwrap().clone();
        let PlaylistItem::Song(song) = &first else {
            panic!("only songs expected");
        };

        let picky = Picky(song.song.title.clone());
        let (index, identifier) = session.skip_failed(&picky).unwrap();
        assert_eq!(index, 1);
        assert_eq!(identifier, session.playlist()[1].path());
    }

    #[test]
    fn test_skip_failed_gives_up_after_one_lap() {
        struct Broken;
        impl ItemResolver for Broken {
            fn song(&self, _: &Station, s: &Song, _: u32, _: u32) -> Result<String> {
                Err(Error::InvalidLiveQuery(s.title.clone()))
            }
            fn segment(&self, _: &Station, s: &Segment) -> Result<String> {
                Err(Error::InvalidLiveQuery(s.title.clone()))
            }
            fn ad(&self, _: &Station, a: &Advertisement) -> Result<String> {
                Err(Error::InvalidLiveQuery(a.title.clone()))
            }
        }

        let mut session = session(EndOfListPolicy::Wrap);
        assert_eq!(session.skip_failed(&Broken), None);
    }

    #[test]
    fn test_from_catalog_unknown_station() {
        let catalog = Catalog::default();
        let result = Session::from_catalog(
            &catalog,
            "nope",
            GenerationOptions::default(),
            PlaylistGenerator::with_seed(1),
            EndOfListPolicy::Wrap,
        );
        assert!(matches!(result, Err(Error::Catalog(_))));
    }
}
