//! Éléments d'une playlist générée
//!
//! Un `PlaylistItem` est créé pendant la génération puis n'est plus modifié.
//! Chaque élément porte son nom d'affichage et son chemin de fichier ; les
//! morceaux portent en plus les variantes d'intro/outro tirées.

use crate::error::{Error, Result};
use crate::resolver::FileResolver;
use sarcatalog::{Advertisement, Segment, SegmentType, Song, Station};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Type logique d'un élément de playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Song,
    Jingle,
    Ad,
    Segment,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Song => "song",
            ItemKind::Jingle => "jingle",
            ItemKind::Ad => "ad",
            ItemKind::Segment => "segment",
        }
    }

    /// Kind under which a segment of the given category is played
    pub fn for_segment(kind: SegmentType) -> Self {
        match kind {
            SegmentType::StationJingle => ItemKind::Jingle,
            _ => ItemKind::Segment,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "song" => Ok(ItemKind::Song),
            "jingle" => Ok(ItemKind::Jingle),
            "ad" => Ok(ItemKind::Ad),
            "segment" => Ok(ItemKind::Segment),
            _ => Err(Error::UnresolvedItemKind(s.to_string())),
        }
    }
}

/// Morceau avec les variantes choisies
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongItem {
    pub song: Song,
    /// Variante d'intro tirée (0 = pas de variante)
    pub intro: u32,
    /// Variante d'outro tirée (0 = pas de variante)
    pub outro: u32,
    pub name: String,
    pub path: String,
}

/// Jingle ou segment parlé
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentItem {
    pub segment: Segment,
    pub name: String,
    pub path: String,
}

/// Publicité
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdItem {
    pub ad: Advertisement,
    pub name: String,
    pub path: String,
}

/// Élément d'une playlist générée
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlaylistItem {
    Song(SongItem),
    Jingle(SegmentItem),
    Ad(AdItem),
    Segment(SegmentItem),
}

impl PlaylistItem {
    /// Crée un élément morceau
    pub fn song(station: &Station, song: Song, intro: u32, outro: u32) -> Self {
        let path = FileResolver::song_path(station, &song, intro, outro);
        PlaylistItem::Song(SongItem {
            name: song.display_name(),
            song,
            intro,
            outro,
            path,
        })
    }

    /// Crée un élément jingle (nom affiché sans étiquette)
    pub fn jingle(station: &Station, segment: Segment) -> Self {
        let path = FileResolver::segment_path(station, &segment);
        PlaylistItem::Jingle(SegmentItem {
            name: segment.title.clone(),
            segment,
            path,
        })
    }

    /// Crée un élément segment, affiché `[Tag] titre`
    pub fn segment(station: &Station, segment: Segment) -> Self {
        let path = FileResolver::segment_path(station, &segment);
        PlaylistItem::Segment(SegmentItem {
            name: format!("[{}] {}", segment.kind.tag(), segment.title),
            segment,
            path,
        })
    }

    /// Crée un élément publicité
    pub fn ad(ad: Advertisement) -> Self {
        let path = FileResolver::ad_path(&ad);
        PlaylistItem::Ad(AdItem {
            name: ad.title.clone(),
            ad,
            path,
        })
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            PlaylistItem::Song(_) => ItemKind::Song,
            PlaylistItem::Jingle(_) => ItemKind::Jingle,
            PlaylistItem::Ad(_) => ItemKind::Ad,
            PlaylistItem::Segment(_) => ItemKind::Segment,
        }
    }

    /// Nom d'affichage
    pub fn name(&self) -> &str {
        match self {
            PlaylistItem::Song(item) => &item.name,
            PlaylistItem::Jingle(item) | PlaylistItem::Segment(item) => &item.name,
            PlaylistItem::Ad(item) => &item.name,
        }
    }

    /// Chemin relatif du fichier audio
    pub fn path(&self) -> &str {
        match self {
            PlaylistItem::Song(item) => &item.path,
            PlaylistItem::Jingle(item) | PlaylistItem::Segment(item) => &item.path,
            PlaylistItem::Ad(item) => &item.path,
        }
    }

    /// Catégorie du segment, pour les jingles et segments
    pub fn segment_type(&self) -> Option<SegmentType> {
        match self {
            PlaylistItem::Jingle(item) | PlaylistItem::Segment(item) => Some(item.segment.kind),
            PlaylistItem::Song(_) | PlaylistItem::Ad(_) => None,
        }
    }

    pub fn is_song(&self) -> bool {
        matches!(self, PlaylistItem::Song(_))
    }
}

/// Compteurs par type d'élément
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlaylistStats {
    pub songs: usize,
    pub jingles: usize,
    pub ads: usize,
    pub segments: usize,
}

impl PlaylistStats {
    pub fn from_items(items: &[PlaylistItem]) -> Self {
        let mut stats = Self::default();
        for item in items {
            match item.kind() {
                ItemKind::Song => stats.songs += 1,
                ItemKind::Jingle => stats.jingles += 1,
                ItemKind::Ad => stats.ads += 1,
                ItemKind::Segment => stats.segments += 1,
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.songs + self.jingles + self.ads + self.segments
    }
}

impl fmt::Display for PlaylistStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} songs, {} jingles, {} ads, {} segments",
            self.songs, self.jingles, self.ads, self.segments
        )
    }
}
