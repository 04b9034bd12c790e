//! Navigation context
//!
//! Immutable record of how the user entered the current browsing list, plus
//! the ordered track-id list and an offset into it. Stepping never mutates;
//! it returns a new instance.

use chorus_core::types::TrackId;
use serde::{Deserialize, Serialize};

/// Where a browsing list came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextKind {
    /// Opened from a playlist
    Playlist,

    /// Opened from an artist/uploader profile
    Artist,

    /// Opened from search results
    Search,

    /// Opened from home/browse/recommendations
    #[default]
    General,
}

/// Provenance of the current browsing list
///
/// Created when the user starts playback from some screen; the queue keeps
/// it alongside the canonical ordering so "where did this track come from"
/// survives navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationContext {
    kind: ContextKind,
    title: String,
    track_ids: Vec<TrackId>,
    offset: usize,
    context_id: Option<i64>,
    search_query: Option<String>,
}

impl NavigationContext {
    /// Context for a playlist screen
    pub fn from_playlist(
        playlist_id: i64,
        playlist_name: impl Into<String>,
        track_ids: Vec<TrackId>,
        offset: usize,
    ) -> Self {
        Self {
            kind: ContextKind::Playlist,
            title: playlist_name.into(),
            context_id: Some(playlist_id),
            search_query: None,
            offset: Self::clamp_offset(offset, track_ids.len()),
            track_ids,
        }
    }

    /// Context for an artist/uploader profile screen
    pub fn from_artist(
        artist_id: i64,
        artist_name: impl Into<String>,
        track_ids: Vec<TrackId>,
        offset: usize,
    ) -> Self {
        Self {
            kind: ContextKind::Artist,
            title: artist_name.into(),
            context_id: Some(artist_id),
            search_query: None,
            offset: Self::clamp_offset(offset, track_ids.len()),
            track_ids,
        }
    }

    /// Context for a search-results screen
    pub fn from_search(query: impl Into<String>, track_ids: Vec<TrackId>, offset: usize) -> Self {
        let query = query.into();
        Self {
            kind: ContextKind::Search,
            title: format!("Search results: \"{query}\""),
            context_id: None,
            search_query: Some(query),
            offset: Self::clamp_offset(offset, track_ids.len()),
            track_ids,
        }
    }

    /// Context for any plain list screen (home, browse, liked songs, ...)
    pub fn from_general(title: impl Into<String>, track_ids: Vec<TrackId>, offset: usize) -> Self {
        Self {
            kind: ContextKind::General,
            title: title.into(),
            context_id: None,
            search_query: None,
            offset: Self::clamp_offset(offset, track_ids.len()),
            track_ids,
        }
    }

    fn clamp_offset(offset: usize, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            offset.min(len - 1)
        }
    }

    /// Provenance kind
    pub fn kind(&self) -> ContextKind {
        self.kind
    }

    /// Display title (playlist name, artist name, search banner, ...)
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The ordered browsing list
    pub fn track_ids(&self) -> &[TrackId] {
        &self.track_ids
    }

    /// Current offset into the browsing list
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Playlist/artist id when the kind carries one
    pub fn context_id(&self) -> Option<i64> {
        self.context_id
    }

    /// Search text when the kind is `Search`
    pub fn search_query(&self) -> Option<&str> {
        self.search_query.as_deref()
    }

    /// Whether a later entry exists
    pub fn has_next(&self) -> bool {
        !self.track_ids.is_empty() && self.offset < self.track_ids.len() - 1
    }

    /// Whether an earlier entry exists
    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    /// Track id at the current offset
    pub fn current_track_id(&self) -> Option<TrackId> {
        self.track_ids.get(self.offset).copied()
    }

    /// Track id one step forward, `None` at the end
    pub fn next_track_id(&self) -> Option<TrackId> {
        if self.has_next() {
            self.track_ids.get(self.offset + 1).copied()
        } else {
            None
        }
    }

    /// Track id one step back, `None` at the start
    pub fn previous_track_id(&self) -> Option<TrackId> {
        if self.has_previous() {
            self.track_ids.get(self.offset - 1).copied()
        } else {
            None
        }
    }

    /// A copy stepped one entry forward; unchanged copy at the end
    pub fn move_to_next(&self) -> Self {
        if self.has_next() {
            self.at_offset(self.offset + 1)
        } else {
            self.clone()
        }
    }

    /// A copy stepped one entry back; unchanged copy at the start
    pub fn move_to_previous(&self) -> Self {
        if self.has_previous() {
            self.at_offset(self.offset - 1)
        } else {
            self.clone()
        }
    }

    /// A copy at an explicit offset (clamped into range)
    pub(crate) fn at_offset(&self, offset: usize) -> Self {
        let mut next = self.clone();
        next.offset = Self::clamp_offset(offset, self.track_ids.len());
        next
    }

    /// "3 of 12 songs" display text, empty for an empty list
    pub fn position_text(&self) -> String {
        if self.track_ids.is_empty() {
            String::new()
        } else {
            format!("{} of {} songs", self.offset + 1, self.track_ids.len())
        }
    }

    /// Label for the "go back to where this came from" affordance
    pub fn action_label(&self) -> &'static str {
        match self.kind {
            ContextKind::Playlist => "View Playlist",
            ContextKind::Artist => "View Artist Profile",
            ContextKind::Search => "Back to Search Results",
            ContextKind::General => "Back to Browse",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_search_resolves_ids_by_offset() {
        let ctx = NavigationContext::from_search("jazz", vec![10, 20, 30], 1);
        assert_eq!(ctx.kind(), ContextKind::Search);
        assert_eq!(ctx.current_track_id(), Some(20));
        assert_eq!(ctx.previous_track_id(), Some(10));
        assert_eq!(ctx.next_track_id(), Some(30));
        assert_eq!(ctx.search_query(), Some("jazz"));
    }

    #[test]
    fn move_to_next_is_copy_on_write() {
        let ctx = NavigationContext::from_search("jazz", vec![10, 20, 30], 1);
        let stepped = ctx.move_to_next();

        assert_eq!(stepped.offset(), 2);
        assert_eq!(stepped.current_track_id(), Some(30));
        // original untouched
        assert_eq!(ctx.offset(), 1);
        assert_eq!(ctx.current_track_id(), Some(20));
    }

    #[test]
    fn stepping_past_either_end_stays_put() {
        let ctx = NavigationContext::from_general("Feed", vec![1, 2], 1);
        assert!(!ctx.move_to_next().has_next());
        assert_eq!(ctx.move_to_next().offset(), 1);

        let start = NavigationContext::from_general("Feed", vec![1, 2], 0);
        assert_eq!(start.move_to_previous().offset(), 0);
    }

    #[test]
    fn offset_clamped_into_list_bounds() {
        let ctx = NavigationContext::from_playlist(5, "Mix", vec![1, 2, 3], 99);
        assert_eq!(ctx.offset(), 2);

        let empty = NavigationContext::from_general("Empty", vec![], 4);
        assert_eq!(empty.offset(), 0);
        assert_eq!(empty.current_track_id(), None);
        assert!(!empty.has_next());
        assert!(!empty.has_previous());
    }

    #[test]
    fn resolution_out_of_range_returns_none() {
        let ctx = NavigationContext::from_general("Feed", vec![7], 0);
        assert_eq!(ctx.next_track_id(), None);
        assert_eq!(ctx.previous_track_id(), None);
        assert_eq!(ctx.current_track_id(), Some(7));
    }

    #[test]
    fn display_helpers() {
        let ctx = NavigationContext::from_playlist(1, "Morning Mix", vec![1, 2, 3], 0);
        assert_eq!(ctx.position_text(), "1 of 3 songs");
        assert_eq!(ctx.action_label(), "View Playlist");
        assert_eq!(ctx.title(), "Morning Mix");
    }
}
