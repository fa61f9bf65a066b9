//! Export au format M3U étendu
//!
//! ```text
//! #EXTM3U
//! #PLAYLIST:Radio Los Santos
//!
//! #EXTINF:-1,Station ID
//! /music/gtasa/segments/Radio Los Santos/Jingles/Station ID.ogg
//! ```

use crate::error::Result;
use crate::item::PlaylistItem;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::info;

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").expect("valid whitespace regex");
}

/// Rend la playlist au format M3U étendu
///
/// `base_path` préfixe chaque chemin ; un `/` final est ajouté s'il manque.
/// Une base vide laisse les chemins relatifs.
pub fn to_m3u(title: &str, items: &[PlaylistItem], base_path: &str) -> String {
    let base = base_path.trim();
    let prefix = if base.is_empty() {
        String::new()
    } else if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    };

    let mut content = String::from("#EXTM3U\n");
    content.push_str(&format!("#PLAYLIST:{}\n\n", title));

    for item in items {
        content.push_str(&format!("#EXTINF:-1,{}\n", item.name()));
        content.push_str(&prefix);
        content.push_str(item.path());
        content.push('\n');
    }

    content
}

/// Nom de fichier proposé pour une station (`Radio Los Santos` -> `Radio_Los_Santos.m3u`)
///
/// Chaque suite d'espaces, y compris en tête ou en fin, devient un `_`.
pub fn playlist_filename(station_name: &str) -> String {
    format!("{}.m3u", WHITESPACE_RE.replace_all(station_name, "_"))
}

/// Écrit la playlist dans un fichier
pub fn write_m3u(
    path: impl AsRef<Path>,
    title: &str,
    items: &[PlaylistItem],
    base_path: &str,
) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_m3u(title, items, base_path))?;
    info!(file = %path.display(), items = items.len(), "Playlist exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sarcatalog::{Advertisement, Segment, SegmentType, Song, Station};

    fn items() -> (Station, Vec<PlaylistItem>) {
        let station = Station::new("radio_los_santos", "Radio Los Santos");
        let items = vec![
            PlaylistItem::jingle(&station, Segment::new(SegmentType::StationJingle, "ID")),
            PlaylistItem::song(&station, Song::new(vec!["N.W.A".into()], "Express Yourself"), 0, 0),
            PlaylistItem::ad(Advertisement::new("Ammu-Nation")),
        ];
        (station, items)
    }

    #[test]
    fn test_m3u_without_base_path() {
        let (station, items) = items();
        let m3u = to_m3u(&station.name, &items, "");
        assert_eq!(
            m3u,
            "#EXTM3U\n\
             #PLAYLIST:Radio Los Santos\n\
             \n\
             #EXTINF:-1,ID\n\
             segments/Radio Los Santos/Jingles/ID.ogg\n\
             #EXTINF:-1,N.W.A - Express Yourself\n\
             songs/Radio Los Santos/N.W.A - Express Yourself.mp3\n\
             #EXTINF:-1,Ammu-Nation\n\
             advertisements/Ammu-Nation.ogg\n"
        );
    }

    #[test]
    fn test_m3u_base_path_gets_trailing_slash() {
        let (station, items) = items();
        let with_slash = to_m3u(&station.name, &items, "/music/gtasa/");
        let without_slash = to_m3u(&station.name, &items, "/music/gtasa");
        assert_eq!(with_slash, without_slash);
        assert!(with_slash.contains("\n/music/gtasa/advertisements/Ammu-Nation.ogg\n"));
    }

    #[test]
    fn test_playlist_filename() {
        assert_eq!(playlist_filename("Radio Los Santos"), "Radio_Los_Santos.m3u");
        assert_eq!(playlist_filename("K-DST"), "K-DST.m3u");
        assert_eq!(playlist_filename(" Bounce  FM\t"), "_Bounce_FM_.m3u");
    }

    #[test]
    fn test_write_m3u() {
        let (station, items) = items();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(playlist_filename(&station.name));
        write_m3u(&path, &station.name, &items, "").unwrap();
        let written = fs::read_to_string(path).unwrap();
        assert!(written.starts_with("#EXTM3U\n#PLAYLIST:Radio Los Santos\n"));
    }
}
