use std::path::Path;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::prelude::Accessor;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::playlist::{MediaHandle, TrackDraft};

pub(super) fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn non_blank(value: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Build a draft for one file. Tags win; otherwise the file stem names the
/// track and `unknown_artist` fills in the artist.
pub(super) fn read_draft(path: &Path, settings: &LibrarySettings) -> TrackDraft {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("Untitled")
        .to_string();

    let mut name = None;
    let mut artist = None;
    let mut duration = None;

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            duration = Some(tagged.properties().duration()).filter(|d| !d.is_zero());
            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                name = non_blank(tag.title());
                artist = non_blank(tag.artist());
            }
        }
        Err(e) => debug!(path = %path.display(), "no readable tags: {e}"),
    }

    let mut draft = TrackDraft::new(
        name.unwrap_or(stem),
        artist.unwrap_or_else(|| settings.unknown_artist.clone()),
    )
    .with_media(MediaHandle::new(path));
    if let Some(d) = duration {
        draft = draft.with_duration(d);
    }
    draft
}

fn sort_key(draft: &TrackDraft) -> String {
    format!("{} - {}", draft.artist, draft.name).to_lowercase()
}

/// Scan `dir` for audio files, sorted by "artist - name" ignoring case.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<TrackDraft> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut drafts: Vec<TrackDraft> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|entry| {
            let path = entry.path();
            path.is_file()
                && (settings.include_hidden || !is_hidden(path))
                && is_audio_file(path, settings)
        })
        .map(|entry| read_draft(entry.path(), settings))
        .collect();

    drafts.sort_by_cached_key(sort_key);
    info!(dir = %dir.display(), tracks = drafts.len(), "library scanned");
    drafts
}
