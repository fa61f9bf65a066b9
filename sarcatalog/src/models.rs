//! Data models for the radio catalog
//!
//! This module contains the structures loaded from the catalog files
//! (`data.json` for stations, `ads.json` for advertisements). Field names on
//! the wire follow those files: titles are stored under `name`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Segment categories
// ============================================================================

/// Category of a non-song station segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentType {
    StationJingle,
    Caller,
    Weather,
    BridgeAnnouncement,
    DjTalk,
    Story,
}

impl SegmentType {
    /// Every category, in catalog order
    pub const ALL: [SegmentType; 6] = [
        SegmentType::StationJingle,
        SegmentType::Caller,
        SegmentType::Weather,
        SegmentType::BridgeAnnouncement,
        SegmentType::DjTalk,
        SegmentType::Story,
    ];

    /// Catalog key (e.g. `"bridge_announcement"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentType::StationJingle => "station_jingle",
            SegmentType::Caller => "caller",
            SegmentType::Weather => "weather",
            SegmentType::BridgeAnnouncement => "bridge_announcement",
            SegmentType::DjTalk => "dj_talk",
            SegmentType::Story => "story",
        }
    }

    /// Folder holding the audio files of this category
    ///
    /// Both the file and the live resolvers label segments with this value.
    pub fn folder_label(&self) -> &'static str {
        match self {
            SegmentType::StationJingle => "Jingles",
            SegmentType::Caller => "Callers",
            SegmentType::Weather => "Weather",
            SegmentType::BridgeAnnouncement => "Bridge Announcements",
            SegmentType::DjTalk => "DJ Talk",
            SegmentType::Story => "Story",
        }
    }

    /// Short tag used in playlist display names (`[Tag] title`)
    pub fn tag(&self) -> &'static str {
        match self {
            SegmentType::StationJingle => "Jingle",
            SegmentType::Caller => "Caller",
            SegmentType::Weather => "Weather",
            SegmentType::BridgeAnnouncement => "Bridge",
            SegmentType::DjTalk => "DJ",
            SegmentType::Story => "Story",
        }
    }
}

impl fmt::Display for SegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SegmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SegmentType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown segment type '{}'", s))
    }
}

// ============================================================================
// Catalog entries
// ============================================================================

/// A song of a station
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Song {
    /// Performing artists, in credit order (never empty)
    pub artists: Vec<String>,
    /// Song title
    #[serde(rename = "name")]
    pub title: String,
    /// Number of recorded intro variants (0 = none)
    #[serde(default)]
    pub intro_count: u32,
    /// Number of recorded outro variants (0 = none)
    #[serde(default)]
    pub outro_count: u32,
}

impl Song {
    pub fn new(artists: Vec<String>, title: impl Into<String>) -> Self {
        Self {
            artists,
            title: title.into(),
            intro_count: 0,
            outro_count: 0,
        }
    }

    /// Sets the number of intro/outro variants
    pub fn with_variants(mut self, intro_count: u32, outro_count: u32) -> Self {
        self.intro_count = intro_count;
        self.outro_count = outro_count;
        self
    }

    /// Artists joined the way they appear in file names
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }

    /// `"Artist, Other - Title"`
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.artist_line(), self.title)
    }
}

/// A non-song audio item of a station
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Segment {
    #[serde(rename = "name")]
    pub title: String,
    #[serde(rename = "type")]
    pub kind: SegmentType,
}

impl Segment {
    pub fn new(kind: SegmentType, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind,
        }
    }
}

/// An advertisement, shared by every station
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Advertisement {
    #[serde(rename = "name")]
    pub title: String,
}

impl Advertisement {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

// ============================================================================
// Stations
// ============================================================================

/// A radio station with its songs and segments
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Station {
    /// Unique key (e.g. `"radio_los_santos"`)
    pub key: String,
    /// Display name, also used as the file namespace
    pub name: String,
    pub songs: Vec<Song>,
    pub segments: BTreeMap<SegmentType, Vec<Segment>>,
}

impl Station {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            songs: Vec::new(),
            segments: BTreeMap::new(),
        }
    }

    /// Appends a song
    pub fn with_song(mut self, song: Song) -> Self {
        self.songs.push(song);
        self
    }

    /// Appends a segment to its category
    pub fn with_segment(mut self, kind: SegmentType, title: impl Into<String>) -> Self {
        self.segments
            .entry(kind)
            .or_default()
            .push(Segment::new(kind, title));
        self
    }

    /// Segments of one category (empty when the station has none)
    pub fn segments(&self, kind: SegmentType) -> &[Segment] {
        self.segments.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// The full catalog: every station plus the global advertisement pool
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Catalog {
    pub stations: Vec<Station>,
    pub ads: Vec<Advertisement>,
}

impl Catalog {
    /// Looks a station up by key
    pub fn station(&self, key: &str) -> crate::Result<&Station> {
        self.stations
            .iter()
            .find(|s| s.key == key)
            .ok_or_else(|| crate::Error::StationNotFound(key.to_string()))
    }

    /// Stations offered for music playlists (everything but the talk station)
    pub fn music_stations<'a>(
        &'a self,
        talk_radio_key: &'a str,
    ) -> impl Iterator<Item = &'a Station> {
        self.stations.iter().filter(move |s| s.key != talk_radio_key)
    }

    pub fn station_keys(&self) -> Vec<&str> {
        self.stations.iter().map(|s| s.key.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_type_round_trips_through_its_key() {
        for kind in SegmentType::ALL {
            assert_eq!(kind.as_str().parse::<SegmentType>().unwrap(), kind);
        }
        assert!("news".parse::<SegmentType>().is_err());
    }

    #[test]
    fn test_segment_labels() {
        assert_eq!(SegmentType::BridgeAnnouncement.folder_label(), "Bridge Announcements");
        assert_eq!(SegmentType::BridgeAnnouncement.tag(), "Bridge");
        assert_eq!(SegmentType::DjTalk.folder_label(), "DJ Talk");
        assert_eq!(SegmentType::DjTalk.tag(), "DJ");
    }

    #[test]
    fn test_song_display_name_joins_artists() {
        let song = Song::new(vec!["Ice Cube".into(), "Dr. Dre".into()], "Natural Born Killaz");
        assert_eq!(song.display_name(), "Ice Cube, Dr. Dre - Natural Born Killaz");
    }

    #[test]
    fn test_station_segments_default_to_empty() {
        let station = Station::new("x", "X").with_segment(SegmentType::Caller, "Caller 1");
        assert_eq!(station.segments(SegmentType::Caller).len(), 1);
        assert!(station.segments(SegmentType::Weather).is_empty());
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = Catalog {
            stations: vec![Station::new("k_rose", "K-Rose"), Station::new("wctr", "WCTR")],
            ads: vec![],
        };
        assert_eq!(catalog.station("k_rose").unwrap().name, "K-Rose");
        assert!(matches!(
            catalog.station("nope"),
            Err(crate::Error::StationNotFound(_))
        ));
        let music: Vec<_> = catalog.music_stations("wctr").map(|s| s.key.as_str()).collect();
        assert_eq!(music, vec!["k_rose"]);
    }
}
