//! # sarplaylist - Génération et lecture des playlists de radio
//!
//! Cette crate construit, à partir du catalogue `sarcatalog`, des playlists
//! imitant les radios du jeu :
//! - Génération aléatoire (source injectable, donc reproductible) des
//!   stations musicales et de la radio parlée
//! - Résolution de chaque élément vers un chemin de fichier ou une URL live
//! - Export M3U étendu
//! - Séquencement (suivant, précédent, accès direct, fin de liste)
//!
//! # Architecture
//!
//! - **PlaylistGenerator** : produit une `Vec<PlaylistItem>` pour une station
//! - **ItemResolver** : `FileResolver` (arborescence locale) ou `LiveResolver`
//!   (requêtes HTTP vers un service de lecture)
//! - **Sequencer** : position courante dans une playlist
//! - **Session** : station + générateur + séquenceur
//!
//! # Exemple d'utilisation
//!
//! ```no_run
//! use sarcatalog::Catalog;
//! use sarplaylist::{EndOfListPolicy, FileResolver, GenerationOptions, PlaylistGenerator, Session};
//!
//! # fn main() -> sarplaylist::Result<()> {
//! let catalog = Catalog::load("data.json", "ads.json")?;
//! let mut session = Session::from_catalog(
//!     &catalog,
//!     "radio_los_santos",
//!     GenerationOptions::default(),
//!     PlaylistGenerator::from_os_rng(),
//!     EndOfListPolicy::Wrap,
//! )?;
//!
//! if let Some(path) = session.resolve_current(&FileResolver) {
//!     println!("Now playing: {}", path?);
//! }
//! session.next();
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod item;
pub mod m3u;
pub mod resolver;
pub mod sequencer;
pub mod session;
pub mod talk;

#[cfg(feature = "sarconfig")]
pub mod config_ext;

// Réexports publics
pub use error::{Error, Result};
pub use generator::{GenerationOptions, PlaylistGenerator, Probabilities, DEFAULT_TALK_RADIO_KEY};
pub use item::{AdItem, ItemKind, PlaylistItem, PlaylistStats, SegmentItem, SongItem};
pub use m3u::{playlist_filename, to_m3u, write_m3u};
pub use resolver::{FileResolver, ItemResolver, LiveQuery, LiveResolver};
pub use sequencer::{EndOfListPolicy, Sequencer, Transition};
pub use session::Session;

#[cfg(feature = "sarconfig")]
pub use config_ext::{RadioConfigExt, DEFAULT_LIVE_BASE_URL};
