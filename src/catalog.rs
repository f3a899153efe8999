//! Song catalog: scans the music directory and reads tags
//!
//! Every audio file under the library root becomes one [`Track`]. Titles and
//! artists come from the file's tags; files without readable tags fall back to
//! the file name. The result is sorted by title, case-insensitively, with the
//! path as tie-breaker so ids stay stable across scans of an unchanged tree.

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::Accessor;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use walkdir::WalkDir;

use crate::model::{Artwork, Track, TrackId};

/// Supported audio file extensions
const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "wav", "m4a", "aac", "opus"];

/// Cover images looked up next to audio files, in order of preference
const COVER_FILE_NAMES: &[&str] = &["cover.jpg", "cover.png", "folder.jpg", "folder.png", "front.jpg"];

pub const UNKNOWN_ARTIST: &str = "Unknown artist";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("permission denied reading {0}")]
    PermissionDenied(PathBuf),

    #[error("music library not found: {0}")]
    NotFound(PathBuf),

    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CatalogError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => CatalogError::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::NotFound => CatalogError::NotFound(path.to_path_buf()),
            _ => CatalogError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Tag fields read from one file
#[derive(Debug, Default)]
struct TagInfo {
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    has_picture: bool,
    duration: Option<Duration>,
}

/// Scanner for a music directory
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    follow_links: bool,
}

impl Catalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: false,
        }
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Scan the library and build the track list.
    ///
    /// Fails only when the root itself cannot be read; unreadable entries
    /// below it are skipped with a warning.
    pub fn scan(&self) -> Result<Vec<Arc<Track>>, CatalogError> {
        let metadata =
            std::fs::metadata(&self.root).map_err(|e| CatalogError::from_io(&self.root, e))?;
        if !metadata.is_dir() {
            return Err(CatalogError::NotADirectory(self.root.clone()));
        }
        // Listing the root surfaces permission problems that metadata() does not.
        std::fs::read_dir(&self.root).map_err(|e| CatalogError::from_io(&self.root, e))?;

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(self.follow_links) {
            match entry {
                Ok(entry) if entry.file_type().is_file() && is_audio_file(entry.path()) => {
                    files.push(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Skipping unreadable library entry"),
            }
        }

        let mut covers: HashMap<PathBuf, Option<PathBuf>> = HashMap::new();
        let mut tracks: Vec<Track> = files
            .into_iter()
            .map(|path| {
                let tags = read_tags(&path);
                let artwork = if tags.has_picture {
                    Some(Artwork::Embedded)
                } else {
                    path.parent()
                        .and_then(|dir| {
                            covers
                                .entry(dir.to_path_buf())
                                .or_insert_with(|| find_cover(dir))
                                .clone()
                        })
                        .map(Artwork::File)
                };

                Track {
                    id: TrackId(0),
                    title: tags.title.unwrap_or_else(|| file_title(&path)),
                    artist: tags.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
                    album: tags.album,
                    artwork,
                    source: path,
                    duration: tags.duration,
                }
            })
            .collect();

        tracks.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.source.cmp(&b.source))
        });

        let tracks: Vec<Arc<Track>> = tracks
            .into_iter()
            .enumerate()
            .map(|(i, mut track)| {
                track.id = TrackId(i as u32);
                Arc::new(track)
            })
            .collect();

        tracing::info!(root = %self.root.display(), count = tracks.len(), "Catalog scanned");
        Ok(tracks)
    }
}

/// Check if a file has a supported audio extension
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn file_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn non_empty(value: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn read_tags(path: &Path) -> TagInfo {
    let tagged_file = match lofty::read_from_path(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "No readable tags, using file name");
            return TagInfo::default();
        }
    };

    let duration = Some(tagged_file.properties().duration()).filter(|d| !d.is_zero());
    let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) else {
        return TagInfo {
            duration,
            ..Default::default()
        };
    };

    TagInfo {
        title: non_empty(tag.title()),
        artist: non_empty(tag.artist()),
        album: non_empty(tag.album()),
        has_picture: !tag.pictures().is_empty(),
        duration,
    }
}

fn find_cover(dir: &Path) -> Option<PathBuf> {
    COVER_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn titles(tracks: &[Arc<Track>]) -> Vec<&str> {
        tracks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file(Path::new("a.mp3")));
        assert!(is_audio_file(Path::new("a.FLAC")));
        assert!(!is_audio_file(Path::new("cover.jpg")));
        assert!(!is_audio_file(Path::new("README")));
    }

    #[test]
    fn scan_finds_nested_audio_and_sorts_by_title() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        fs::write(base.join("zebra.mp3"), b"not really audio").unwrap();
        fs::write(base.join("Apple.ogg"), b"not really audio").unwrap();
        fs::write(base.join("notes.txt"), b"text").unwrap();
        fs::create_dir(base.join("album")).unwrap();
        fs::write(base.join("album").join("mango.flac"), b"not really audio").unwrap();

        let tracks = Catalog::new(base).scan().unwrap();

        assert_eq!(titles(&tracks), vec!["Apple", "mango", "zebra"]);
        assert!(tracks.iter().all(|t| t.artist == UNKNOWN_ARTIST));
        let ids: Vec<u32> = tracks.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn cover_file_is_used_as_artwork() {
        let temp = TempDir::new().unwrap();
        let album = temp.path().join("album");
        fs::create_dir(&album).unwrap();
        fs::write(album.join("one.mp3"), b"x").unwrap();
        fs::write(album.join("cover.jpg"), b"jpeg").unwrap();
        fs::write(temp.path().join("loose.mp3"), b"x").unwrap();

        let tracks = Catalog::new(temp.path()).scan().unwrap();
        let one = tracks.iter().find(|t| t.title == "one").unwrap();
        let loose = tracks.iter().find(|t| t.title == "loose").unwrap();

        assert_eq!(one.artwork, Some(Artwork::File(album.join("cover.jpg"))));
        assert_eq!(loose.artwork, None);
    }

    #[test]
    fn empty_directory_gives_empty_catalog() {
        let temp = TempDir::new().unwrap();
        assert!(Catalog::new(temp.path()).scan().unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        assert!(matches!(
            Catalog::new(&missing).scan(),
            Err(CatalogError::NotFound(path)) if path == missing
        ));
    }

    #[test]
    fn file_root_is_rejected() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("song.mp3");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(
            Catalog::new(&file).scan(),
            Err(CatalogError::NotADirectory(_))
        ));
    }
}
