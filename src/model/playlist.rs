//! Playlist ordering: the canonical catalog order plus the active ordering

use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

use super::types::{Track, TrackId};

/// Ordered tracks with an optional shuffled view.
///
/// `order` holds indices into `canonical`. When shuffle is off it is the
/// identity permutation.
#[derive(Clone, Debug, Default)]
pub struct Playlist {
    canonical: Vec<Arc<Track>>,
    order: Vec<usize>,
    shuffled: bool,
}

impl Playlist {
    pub fn new(tracks: Vec<Arc<Track>>) -> Self {
        let order = (0..tracks.len()).collect();
        Self {
            canonical: tracks,
            order,
            shuffled: false,
        }
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Tracks in catalog order, regardless of shuffle
    pub fn canonical(&self) -> &[Arc<Track>] {
        &self.canonical
    }

    /// Track at `position` in the active ordering
    pub fn get(&self, position: usize) -> Option<&Arc<Track>> {
        self.order.get(position).map(|&i| &self.canonical[i])
    }

    /// Tracks in the active ordering
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Track>> + '_ {
        self.order.iter().map(move |&i| &self.canonical[i])
    }

    /// Position of a track in the active ordering
    pub fn position_of(&self, id: TrackId) -> Option<usize> {
        self.order.iter().position(|&i| self.canonical[i].id == id)
    }

    pub fn next_position(&self, position: usize) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        Some((position + 1) % self.len())
    }

    pub fn previous_position(&self, position: usize) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let len = self.len();
        Some((position % len + len - 1) % len)
    }

    pub fn is_last(&self, position: usize) -> bool {
        !self.is_empty() && position + 1 == self.len()
    }

    /// Replace the active ordering with a fresh permutation of the canonical list
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.order = (0..self.canonical.len()).collect();
        self.order.shuffle(rng);
        self.shuffled = true;
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// Restore catalog order
    pub fn unshuffle(&mut self) {
        self.order = (0..self.canonical.len()).collect();
        self.shuffled = false;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::PathBuf;

    pub(crate) fn track(id: u32, title: &str, artist: &str) -> Arc<Track> {
        Arc::new(Track {
            id: TrackId(id),
            title: title.to_string(),
            artist: artist.to_string(),
            album: None,
            artwork: None,
            source: PathBuf::from(format!("/music/{id}.mp3")),
            duration: Some(std::time::Duration::from_secs(180)),
        })
    }

    pub(crate) fn sample_tracks(count: u32) -> Vec<Arc<Track>> {
        (0..count)
            .map(|i| track(i, &format!("Song {i}"), &format!("Artist {}", i % 3)))
            .collect()
    }

    fn ids(playlist: &Playlist) -> Vec<u32> {
        playlist.iter().map(|t| t.id.0).collect()
    }

    #[test]
    fn next_wraps_back_to_start_after_len_steps() {
        for len in 1..=6 {
            let playlist = Playlist::new(sample_tracks(len));
            for start in 0..len as usize {
                let mut position = start;
                for _ in 0..len {
                    position = playlist.next_position(position).unwrap();
                }
                assert_eq!(position, start, "len {len}, start {start}");
            }
        }
    }

    #[test]
    fn previous_wraps_from_first_to_last() {
        let playlist = Playlist::new(sample_tracks(4));
        assert_eq!(playlist.previous_position(0), Some(3));
        assert_eq!(playlist.previous_position(3), Some(2));
    }

    #[test]
    fn navigation_on_empty_playlist_is_none() {
        let playlist = Playlist::default();
        assert_eq!(playlist.next_position(0), None);
        assert_eq!(playlist.previous_position(0), None);
        assert!(!playlist.is_last(0));
    }

    #[test]
    fn shuffle_twice_restores_canonical_order() {
        let mut playlist = Playlist::new(sample_tracks(20));
        let before = ids(&playlist);

        playlist.shuffle_with(&mut StdRng::seed_from_u64(7));
        assert!(playlist.is_shuffled());
        playlist.unshuffle();

        assert!(!playlist.is_shuffled());
        assert_eq!(ids(&playlist), before);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut playlist = Playlist::new(sample_tracks(20));
        playlist.shuffle_with(&mut StdRng::seed_from_u64(42));

        let mut shuffled = ids(&playlist);
        shuffled.sort_unstable();
        assert_eq!(shuffled, (0..20).collect::<Vec<_>>());
        // canonical view is untouched
        assert_eq!(
            playlist.canonical().iter().map(|t| t.id.0).collect::<Vec<_>>(),
            (0..20).collect::<Vec<_>>()
        );
    }

    #[test]
    fn position_of_follows_active_ordering() {
        let mut playlist = Playlist::new(sample_tracks(10));
        playlist.shuffle_with(&mut StdRng::seed_from_u64(3));

        for position in 0..playlist.len() {
            let id = playlist.get(position).unwrap().id;
            assert_eq!(playlist.position_of(id), Some(position));
        }
        assert_eq!(playlist.position_of(TrackId(99)), None);
    }
}
