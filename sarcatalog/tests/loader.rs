//! Chargement du catalogue depuis des fichiers

use sarcatalog::{Catalog, CatalogConfigExt, Error, SegmentType};
use std::fs;

const STATIONS: &str = r#"[
    {
        "key": "radio_los_santos",
        "name": "Radio Los Santos",
        "songs": [
            {
                "artists": ["Dr. Dre", "Snoop Dogg"],
                "name": "Nuthin' but a G Thang",
                "intro_count": 1,
                "outro_count": 2
            },
            {"artists": ["N.W.A"], "name": "Express Yourself"}
        ],
        "segments": {
            "station_jingle": [{"name": "RLS ID 1"}, {"name": "RLS ID 2"}],
            "caller": [{"name": "Caller 1"}],
            "weather": [{"name": "Sunny"}],
            "bridge_announcement": [{"name": "Bridges open"}],
            "dj_talk": [{"name": "Julio G 1"}],
            "story": [{"name": "Story 1"}]
        }
    },
    {
        "key": "wctr",
        "name": "West Coast Talk Radio",
        "songs": [
            {"artists": ["WCTR"], "name": "Lonely Hearts #1"},
            {"artists": ["WCTR"], "name": "WCTR News #1"}
        ]
    }
]"#;

const ADS: &str = r#"[{"name": "Ammu-Nation"}, {"name": "Cluckin' Bell"}]"#;

fn write_catalog(dir: &std::path::Path) {
    fs::write(dir.join("data.json"), STATIONS).unwrap();
    fs::write(dir.join("ads.json"), ADS).unwrap();
}

#[test]
fn load_from_files() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(dir.path());

    let catalog = Catalog::load(dir.path().join("data.json"), dir.path().join("ads.json")).unwrap();
    assert_eq!(catalog.station_keys(), vec!["radio_los_santos", "wctr"]);
    assert_eq!(catalog.ads.len(), 2);

    let station = catalog.station("radio_los_santos").unwrap();
    assert_eq!(station.songs[0].artist_line(), "Dr. Dre, Snoop Dogg");
    for kind in SegmentType::ALL {
        assert!(!station.segments(kind).is_empty(), "{} missing", kind);
    }

    let music: Vec<&str> = catalog.music_stations("wctr").map(|s| s.key.as_str()).collect();
    assert_eq!(music, vec!["radio_los_santos"]);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Catalog::load(dir.path().join("data.json"), dir.path().join("ads.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn unknown_station_lookup() {
    let catalog = Catalog::from_json(STATIONS, ADS).unwrap();
    assert!(matches!(
        catalog.station("k_dst"),
        Err(Error::StationNotFound(key)) if key == "k_dst"
    ));
}

#[test]
fn load_through_config() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(dir.path());

    let config = sarconfig::Config::load_config(dir.path().to_str().unwrap()).unwrap();
    let catalog = config.load_catalog().unwrap();
    assert_eq!(catalog.stations.len(), 2);
}
