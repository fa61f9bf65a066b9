//! Ordonnancement des émissions de la radio parlée
//!
//! Les titres de la station parlée portent un numéro d'épisode (`... #3`).
//! Les bulletins d'information sont reconnus au mot `news` dans le titre.
//! Les émissions sont jouées par épisode croissant ; l'ordre au sein d'un
//! même épisode est aléatoire.

use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use sarcatalog::Song;
use std::collections::BTreeMap;

lazy_static! {
    static ref NEWS_RE: Regex = Regex::new(r"(?i)\bnews\b").expect("valid news regex");
    static ref EPISODE_RE: Regex = Regex::new(r"#\s*(\d+)").expect("valid episode regex");
}

/// Le titre désigne-t-il un bulletin d'information ?
pub fn is_news(title: &str) -> bool {
    NEWS_RE.is_match(title)
}

/// Numéro d'épisode extrait du titre (0 si absent)
pub fn episode_number(title: &str) -> u32 {
    EPISODE_RE
        .captures(title)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Regroupe par épisode, mélange chaque groupe puis concatène par épisode croissant
pub fn episode_order<R: Rng + ?Sized>(songs: Vec<Song>, rng: &mut R) -> Vec<Song> {
    let mut groups: BTreeMap<u32, Vec<Song>> = BTreeMap::new();
    for song in songs {
        groups
            .entry(episode_number(&song.title))
            .or_default()
            .push(song);
    }

    groups
        .into_values()
        .flat_map(|mut group| {
            group.shuffle(rng);
            group
        })
        .collect()
}
