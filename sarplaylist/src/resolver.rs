//! Resolution of catalog entries into playable identifiers
//!
//! Two resolvers share the [`ItemResolver`] trait:
//!
//! - [`FileResolver`] maps an entry to a relative file path (the layout of
//!   an extracted radio archive):
//!   - `songs/{station name}/{artists} - {title}.mp3`
//!   - `songs/{station name}/{artists} - {title} (Intro {i}, Outro {o}).mp3`
//!   - `segments/{station name}/{folder}/{title}.ogg`
//!   - `advertisements/{title}.ogg`
//! - [`LiveResolver`] maps it to a query URL against a streaming endpoint:
//!   `{base}/stations/{station key}/{category}?title=...&artists=...&type=...&intro=...&outro=...`
//!
//! Both label segments with [`SegmentType::folder_label`].

use crate::error::{Error, Result};
use crate::item::{ItemKind, PlaylistItem};
use sarcatalog::{Advertisement, Segment, SegmentType, Song, Station};
use percent_encoding::percent_decode_str;
use url::Url;

/// Maps playlist entries to playable identifiers
pub trait ItemResolver {
    fn song(&self, station: &Station, song: &Song, intro: u32, outro: u32) -> Result<String>;

    fn segment(&self, station: &Station, segment: &Segment) -> Result<String>;

    fn ad(&self, station: &Station, ad: &Advertisement) -> Result<String>;

    /// Resolves a generated item of `station`
    fn resolve(&self, item: &PlaylistItem, station: &Station) -> Result<String> {
        match item {
            PlaylistItem::Song(s) => self.song(station, &s.song, s.intro, s.outro),
            PlaylistItem::Jingle(s) | PlaylistItem::Segment(s) => {
                self.segment(station, &s.segment)
            }
            PlaylistItem::Ad(a) => self.ad(station, &a.ad),
        }
    }
}

// ============================================================================
// File paths
// ============================================================================

/// Relative file paths inside the radio archive
#[derive(Debug, Clone, Copy, Default)]
pub struct FileResolver;

impl FileResolver {
    pub fn song_path(station: &Station, song: &Song, intro: u32, outro: u32) -> String {
        let artists = song.artist_line();
        let filename = if intro == 0 && outro == 0 {
            format!("{} - {}.mp3", artists, song.title)
        } else {
            format!(
                "{} - {} (Intro {}, Outro {}).mp3",
                artists, song.title, intro, outro
            )
        };
        format!("songs/{}/{}", station.name, filename)
    }

    pub fn segment_path(station: &Station, segment: &Segment) -> String {
        format!(
            "segments/{}/{}/{}.ogg",
            station.name,
            segment.kind.folder_label(),
            segment.title
        )
    }

    pub fn ad_path(ad: &Advertisement) -> String {
        format!("advertisements/{}.ogg", ad.title)
    }
}

impl ItemResolver for FileResolver {
    fn song(&self, station: &Station, song: &Song, intro: u32, outro: u32) -> Result<String> {
        Ok(Self::song_path(station, song, intro, outro))
    }

    fn segment(&self, station: &Station, segment: &Segment) -> Result<String> {
        Ok(Self::segment_path(station, segment))
    }

    fn ad(&self, _station: &Station, ad: &Advertisement) -> Result<String> {
        Ok(Self::ad_path(ad))
    }
}

// ============================================================================
// Live queries
// ============================================================================

/// Parameters of a live playback request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveQuery {
    pub station: String,
    pub kind: ItemKind,
    pub title: String,
    /// Artist line (songs only)
    pub artists: Option<String>,
    /// Segment folder label (jingles and segments only)
    pub folder: Option<String>,
    pub intro: u32,
    pub outro: u32,
}

impl LiveQuery {
    pub fn song(station: &Station, song: &Song, intro: u32, outro: u32) -> Self {
        Self {
            station: station.key.clone(),
            kind: ItemKind::Song,
            title: song.title.clone(),
            artists: Some(song.artist_line()),
            folder: None,
            intro,
            outro,
        }
    }

    pub fn segment(station: &Station, segment: &Segment) -> Self {
        Self {
            station: station.key.clone(),
            kind: ItemKind::for_segment(segment.kind),
            title: segment.title.clone(),
            artists: None,
            folder: Some(segment.kind.folder_label().to_string()),
            intro: 0,
            outro: 0,
        }
    }

    pub fn ad(station: &Station, ad: &Advertisement) -> Self {
        Self {
            station: station.key.clone(),
            kind: ItemKind::Ad,
            title: ad.title.clone(),
            artists: None,
            folder: None,
            intro: 0,
            outro: 0,
        }
    }

    /// Builds the request URL below `base`
    pub fn to_url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidLiveQuery(format!("{} cannot be a base URL", base)))?
            .pop_if_empty()
            .extend(["stations", self.station.as_str(), self.kind.as_str()]);

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("title", &self.title);
            if let Some(artists) = &self.artists {
                query.append_pair("artists", artists);
            }
            if let Some(folder) = &self.folder {
                query.append_pair("type", folder);
            }
            if self.intro != 0 {
                query.append_pair("intro", &self.intro.to_string());
            }
            if self.outro != 0 {
                query.append_pair("outro", &self.outro.to_string());
            }
        }

        Ok(url)
    }

    /// Reads a live request URL back
    ///
    /// Fails with [`Error::UnresolvedItemKind`] when the category is not one
    /// of `song`, `jingle`, `ad`, `segment`.
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input)?;
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();

        let [.., marker, station, category] = segments.as_slice() else {
            return Err(Error::InvalidLiveQuery(input.to_string()));
        };
        if *marker != "stations" {
            return Err(Error::InvalidLiveQuery(input.to_string()));
        }

        let kind: ItemKind = category.parse()?;
        let station = percent_decode_str(station).decode_utf8_lossy().into_owned();

        let mut title = None;
        let mut artists = None;
        let mut folder = None;
        let mut intro = 0;
        let mut outro = 0;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "title" => title = Some(value.into_owned()),
                "artists" => artists = Some(value.into_owned()),
                "type" => folder = Some(value.into_owned()),
                "intro" => intro = parse_variant(input, &value)?,
                "outro" => outro = parse_variant(input, &value)?,
                _ => {}
            }
        }

        let title =
            title.ok_or_else(|| Error::InvalidLiveQuery(format!("{}: missing title", input)))?;

        Ok(Self {
            station,
            kind,
            title,
            artists,
            folder,
            intro,
            outro,
        })
    }

    /// Segment category named by the folder label, if any
    pub fn segment_type(&self) -> Option<SegmentType> {
        let folder = self.folder.as_deref()?;
        SegmentType::ALL
            .into_iter()
            .find(|kind| kind.folder_label() == folder)
    }
}

fn parse_variant(input: &str, value: &str) -> Result<u32> {
    value
        .parse()
        .map_err(|_| Error::InvalidLiveQuery(format!("{}: bad variant number '{}'", input, value)))
}

/// Query URLs against a live streaming endpoint
#[derive(Debug, Clone)]
pub struct LiveResolver {
    base: Url,
}

impl LiveResolver {
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base)?;
        if base.cannot_be_a_base() {
            return Err(Error::InvalidLiveQuery(format!("{} cannot be a base URL", base)));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }
}

impl ItemResolver for LiveResolver {
    fn song(&self, station: &Station, song: &Song, intro: u32, outro: u32) -> Result<String> {
        Ok(LiveQuery::song(station, song, intro, outro)
            .to_url(&self.base)?
            .into())
    }

    fn segment(&self, station: &Station, segment: &Segment) -> Result<String> {
        Ok(LiveQuery::segment(station, segment).to_url(&self.base)?.into())
    }

    fn ad(&self, station: &Station, ad: &Advertisement) -> Result<String> {
        Ok(LiveQuery::ad(station, ad).to_url(&self.base)?.into())
    }
}
