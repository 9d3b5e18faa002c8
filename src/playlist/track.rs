use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Label used when a track's length is unknown.
pub const UNKNOWN_DURATION_LABEL: &str = "0:00";

/// Stable identity of a track record for its whole lifetime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(u64);

impl TrackId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque reference to playable audio.
///
/// The playlist never opens it; it is handed back to whatever renders media.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaHandle(PathBuf);

impl MediaHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// A track stored in the playlist.
///
/// `id` is fixed at construction. The media handle may be attached later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    id: TrackId,
    name: String,
    artist: String,
    media: Option<MediaHandle>,
    duration_label: String,
}

impl TrackRecord {
    pub fn new(id: TrackId, name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            artist: artist.into(),
            media: None,
            duration_label: UNKNOWN_DURATION_LABEL.to_string(),
        }
    }

    /// Build a record from a draft, consuming it.
    pub fn from_draft(id: TrackId, draft: TrackDraft) -> Self {
        let duration_label = draft
            .duration
            .map(format_duration_label)
            .unwrap_or_else(|| UNKNOWN_DURATION_LABEL.to_string());
        Self {
            id,
            name: draft.name,
            artist: draft.artist,
            media: draft.media,
            duration_label,
        }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn media(&self) -> Option<&MediaHandle> {
        self.media.as_ref()
    }

    pub fn duration_label(&self) -> &str {
        &self.duration_label
    }

    /// `artist - name`, or just the name when the artist is blank.
    pub fn display(&self) -> String {
        let artist = self.artist.trim();
        if artist.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", artist, self.name)
        }
    }

    pub fn set_media(&mut self, media: MediaHandle) {
        self.media = Some(media);
    }

    pub fn with_media(mut self, media: MediaHandle) -> Self {
        self.media = Some(media);
        self
    }

    pub fn with_duration_label(mut self, label: impl Into<String>) -> Self {
        self.duration_label = label.into();
        self
    }

    /// Recover a draft carrying the same metadata (used to duplicate a track).
    pub fn to_draft(&self) -> TrackDraft {
        TrackDraft {
            name: self.name.clone(),
            artist: self.artist.clone(),
            duration: parse_duration_label(&self.duration_label),
            media: self.media.clone(),
        }
    }
}

/// Track metadata gathered by a collaborator before a record exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackDraft {
    pub name: String,
    pub artist: String,
    pub duration: Option<Duration>,
    pub media: Option<MediaHandle>,
}

impl TrackDraft {
    pub fn new(name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
            duration: None,
            media: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_media(mut self, media: MediaHandle) -> Self {
        self.media = Some(media);
        self
    }
}

/// Format a duration as `m:ss`, dropping partial seconds.
pub fn format_duration_label(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Parse an `m:ss` label back into a duration.
pub fn parse_duration_label(label: &str) -> Option<Duration> {
    let (minutes, seconds) = label.trim().split_once(':')?;
    let minutes: u64 = minutes.parse().ok()?;
    if seconds.len() != 2 {
        return None;
    }
    let seconds: u64 = seconds.parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    Some(Duration::from_secs(minutes * 60 + seconds))
}
