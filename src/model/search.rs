//! Search filter over the catalog

use std::sync::Arc;

use super::types::Track;

/// What the search results overlay shows
#[derive(Clone, Debug, Default)]
pub enum SearchView {
    /// Empty query: the overlay is not drawn at all
    #[default]
    Hidden,
    /// Non-empty query; may hold zero tracks
    Results(Vec<Arc<Track>>),
}

impl SearchView {
    pub fn is_visible(&self) -> bool {
        matches!(self, SearchView::Results(_))
    }

    pub fn tracks(&self) -> &[Arc<Track>] {
        match self {
            SearchView::Hidden => &[],
            SearchView::Results(tracks) => tracks,
        }
    }
}

/// Filter `catalog` by a case-insensitive substring match on title or artist.
///
/// The query is trimmed first; results keep catalog order.
pub fn filter(catalog: &[Arc<Track>], query: &str) -> SearchView {
    let query = query.trim();
    if query.is_empty() {
        return SearchView::Hidden;
    }

    let needle = query.to_lowercase();
    let results = catalog
        .iter()
        .filter(|track| {
            track.title.to_lowercase().contains(&needle)
                || track.artist.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    SearchView::Results(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::playlist::tests::track;

    fn catalog() -> Vec<Arc<Track>> {
        vec![
            track(1, "Blue in Green", "Miles Davis"),
            track(2, "So What", "Miles Davis"),
            track(3, "Naima", "John Coltrane"),
            track(4, "Giant Steps", "John Coltrane"),
        ]
    }

    fn titles(view: &SearchView) -> Vec<&str> {
        view.tracks().iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn empty_query_hides_results() {
        assert!(!filter(&catalog(), "").is_visible());
        assert!(!filter(&catalog(), "   ").is_visible());
    }

    #[test]
    fn unmatched_query_is_visible_but_empty() {
        let view = filter(&catalog(), "zeppelin");
        assert!(view.is_visible());
        assert!(view.tracks().is_empty());
    }

    #[test]
    fn matches_title_case_insensitively() {
        let view = filter(&catalog(), "GIANT");
        assert_eq!(titles(&view), vec!["Giant Steps"]);
    }

    #[test]
    fn matches_artist_and_keeps_catalog_order() {
        let view = filter(&catalog(), "miles");
        assert_eq!(titles(&view), vec!["Blue in Green", "So What"]);
    }

    #[test]
    fn query_is_trimmed() {
        let view = filter(&catalog(), "  naima ");
        assert_eq!(titles(&view), vec!["Naima"]);
    }
}
