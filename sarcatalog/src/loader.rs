//! Chargement du catalogue depuis les fichiers JSON
//!
//! Deux fichiers alimentent le catalogue :
//! - la liste des stations (`data.json`) avec leurs morceaux et segments
//! - la liste globale des publicités (`ads.json`)
//!
//! Les catégories de segments inconnues sont ignorées (avec un warning),
//! les clés de station dupliquées et les morceaux sans artiste sont refusés.

use crate::error::{Error, Result};
use crate::models::{Advertisement, Catalog, Segment, SegmentType, Song, Station};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Station telle qu'écrite dans `data.json`
#[derive(Debug, Deserialize)]
struct RawStation {
    key: String,
    name: String,
    #[serde(default)]
    songs: Vec<Song>,
    #[serde(default)]
    segments: BTreeMap<String, Vec<RawSegment>>,
}

#[derive(Debug, Deserialize)]
struct RawSegment {
    name: String,
}

impl RawStation {
    fn into_station(self) -> Result<Station> {
        for song in &self.songs {
            if song.artists.is_empty() {
                return Err(Error::InvalidSong {
                    station: self.key.clone(),
                    title: song.title.clone(),
                    reason: "empty artist list".to_string(),
                });
            }
        }

        let mut segments = BTreeMap::new();
        for (key, entries) in self.segments {
            match key.parse::<SegmentType>() {
                Ok(kind) => {
                    let list: Vec<Segment> = entries
                        .into_iter()
                        .map(|raw| Segment::new(kind, raw.name))
                        .collect();
                    segments.insert(kind, list);
                }
                Err(_) => {
                    warn!(
                        station = %self.key,
                        category = %key,
                        count = entries.len(),
                        "Skipping unknown segment category"
                    );
                }
            }
        }

        Ok(Station {
            key: self.key,
            name: self.name,
            songs: self.songs,
            segments,
        })
    }
}

impl Catalog {
    /// Builds a catalog from the JSON documents of the station list and the ad list
    pub fn from_json(stations_json: &str, ads_json: &str) -> Result<Self> {
        let raw_stations: Vec<RawStation> = serde_json::from_str(stations_json)?;
        let ads: Vec<Advertisement> = serde_json::from_str(ads_json)?;

        let mut seen = HashSet::new();
        let mut stations = Vec::with_capacity(raw_stations.len());
        for raw in raw_stations {
            if !seen.insert(raw.key.clone()) {
                return Err(Error::DuplicateStation(raw.key));
            }
            stations.push(raw.into_station()?);
        }

        Ok(Self { stations, ads })
    }

    /// Reads and parses both catalog files
    pub fn load(stations_path: impl AsRef<Path>, ads_path: impl AsRef<Path>) -> Result<Self> {
        let stations_path = stations_path.as_ref();
        let ads_path = ads_path.as_ref();

        let stations_json = fs::read_to_string(stations_path)?;
        let ads_json = fs::read_to_string(ads_path)?;
        let catalog = Self::from_json(&stations_json, &ads_json)?;

        info!(
            stations_file = %stations_path.display(),
            ads_file = %ads_path.display(),
            stations = catalog.stations.len(),
            ads = catalog.ads.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATIONS: &str = r#"[
        {
            "key": "k_rose",
            "name": "K-Rose",
            "songs": [
                {"artists": ["Willie Nelson"], "name": "Crazy", "intro_count": 2, "outro_count": 1},
                {"artists": ["Merle Haggard"], "name": "Workin' Man Blues"}
            ],
            "segments": {
                "station_jingle": [{"name": "Jingle 1", "type": "station_jingle"}],
                "dj_talk": [{"name": "Mary-Beth 1"}],
                "news": [{"name": "Not a real category"}]
            }
        }
    ]"#;

    #[test]
    fn test_from_json_parses_stations_and_ads() {
        let catalog = Catalog::from_json(STATIONS, r#"[{"name": "Ad 1"}]"#).unwrap();

        let station = catalog.station("k_rose").unwrap();
        assert_eq!(station.songs.len(), 2);
        assert_eq!(station.songs[0].intro_count, 2);
        assert_eq!(station.songs[1].outro_count, 0);
        assert_eq!(station.segments(SegmentType::StationJingle)[0].title, "Jingle 1");
        assert_eq!(station.segments(SegmentType::DjTalk)[0].kind, SegmentType::DjTalk);
        // "news" n'est pas une catégorie connue
        assert_eq!(station.segments.len(), 2);
        assert_eq!(catalog.ads, vec![Advertisement::new("Ad 1")]);
    }

    #[test]
    fn test_duplicate_station_is_rejected() {
        let json = r#"[{"key": "x", "name": "X"}, {"key": "x", "name": "X bis"}]"#;
        assert!(matches!(
            Catalog::from_json(json, "[]"),
            Err(Error::DuplicateStation(key)) if key == "x"
        ));
    }

    #[test]
    fn test_song_without_artist_is_rejected() {
        let json = r#"[{"key": "x", "name": "X", "songs": [{"artists": [], "name": "Nobody"}]}]"#;
        assert!(matches!(
            Catalog::from_json(json, "[]"),
            Err(Error::InvalidSong { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(Catalog::from_json("{", "[]"), Err(Error::Json(_))));
    }
}
