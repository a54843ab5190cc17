//! Video library
//!
//! A read-only catalog of math videos filtered by two independent facets
//! (channel and concept), plus the detail overlay that embeds the player.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur while loading a video catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog document is malformed
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An entry has an unusable video identifier
    #[error("Invalid video id {id:?} for {title:?}")]
    InvalidId {
        /// Offending identifier
        id: String,
        /// Title of the entry
        title: String,
    },
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

const EMBED_BASE: &str = "https://www.youtube.com/embed/";
const THUMBNAIL_BASE: &str = "https://img.youtube.com/vi/";

// =============================================================================
// Facets
// =============================================================================

/// Channel a video comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Numberblocks
    Numberblocks,
    /// Sesame Street
    Sesame,
    /// Pinkfong!
    Pinkfong,
    /// Super Simple Songs
    SuperSimple,
    /// Jack Hartmann
    JackHartmann,
}

impl Channel {
    /// Every channel in tab order
    pub const ALL: [Channel; 5] = [
        Channel::Numberblocks,
        Channel::Sesame,
        Channel::Pinkfong,
        Channel::SuperSimple,
        Channel::JackHartmann,
    ];

    /// Identifier used in catalogs and filters
    pub fn id(&self) -> &'static str {
        match self {
            Channel::Numberblocks => "numberblocks",
            Channel::Sesame => "sesame",
            Channel::Pinkfong => "pinkfong",
            Channel::SuperSimple => "supersimple",
            Channel::JackHartmann => "jackhartmann",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Numberblocks => "Numberblocks",
            Channel::Sesame => "Sesame Street",
            Channel::Pinkfong => "Pinkfong!",
            Channel::SuperSimple => "Super Simple Songs",
            Channel::JackHartmann => "Jack Hartmann",
        }
    }

    /// Tab and badge color
    pub fn color(&self) -> &'static str {
        match self {
            Channel::Numberblocks => "#FF6B6B",
            Channel::Sesame => "#4ECDC4",
            Channel::Pinkfong => "#FFE66D",
            Channel::SuperSimple => "#2ECC71",
            Channel::JackHartmann => "#F39C12",
        }
    }
}

/// Math concept a video teaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Concept {
    /// Counting
    Counting,
    /// Shapes
    Shapes,
    /// Addition
    Addition,
    /// Patterns
    Patterns,
    /// Comparison
    Comparison,
}

impl Concept {
    /// Every concept in filter order
    pub const ALL: [Concept; 5] = [
        Concept::Counting,
        Concept::Shapes,
        Concept::Addition,
        Concept::Patterns,
        Concept::Comparison,
    ];

    /// Identifier used in catalogs and filters
    pub fn id(&self) -> &'static str {
        match self {
            Concept::Counting => "counting",
            Concept::Shapes => "shapes",
            Concept::Addition => "addition",
            Concept::Patterns => "patterns",
            Concept::Comparison => "comparison",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Concept::Counting => "Counting",
            Concept::Shapes => "Shapes",
            Concept::Addition => "Addition",
            Concept::Patterns => "Patterns",
            Concept::Comparison => "Comparison",
        }
    }
}

/// A filter value: everything, or one specific value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facet<T> {
    /// Matches every entry
    #[default]
    All,
    /// Matches entries with exactly this value
    Only(T),
}

impl<T: PartialEq> Facet<T> {
    /// Whether `value` passes this filter
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(wanted) => wanted == value,
        }
    }
}

impl Facet<Channel> {
    /// Parse a filter identifier; "all" selects every channel
    pub fn parse(id: &str) -> Option<Self> {
        if id == "all" {
            return Some(Facet::All);
        }
        Channel::ALL
            .into_iter()
            .find(|c| c.id() == id)
            .map(Facet::Only)
    }
}

impl Facet<Concept> {
    /// Parse a filter identifier; "all" selects every concept
    pub fn parse(id: &str) -> Option<Self> {
        if id == "all" {
            return Some(Facet::All);
        }
        Concept::ALL
            .into_iter()
            .find(|c| c.id() == id)
            .map(Facet::Only)
    }
}

/// A filter button with its active state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTab {
    /// Filter identifier ("all" or a channel/concept id)
    pub id: &'static str,
    /// Button label
    pub name: &'static str,
    /// Accent color, for channel tabs
    pub color: Option<&'static str>,
    /// Whether this filter is selected
    pub active: bool,
}

// =============================================================================
// Catalog
// =============================================================================

/// Difficulty level of a video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoLevel {
    /// For first-time learners
    Beginner,
    /// Builds on the basics
    Intermediate,
}

impl fmt::Display for VideoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoLevel::Beginner => f.write_str("Beginner"),
            VideoLevel::Intermediate => f.write_str("Intermediate"),
        }
    }
}

/// One video in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEntry {
    /// Video identifier on the hosting site; not unique across entries
    pub id: String,
    /// Title
    pub title: String,
    /// Short description
    pub description: String,
    /// Source channel
    pub channel: Channel,
    /// Concept taught
    pub concept: Concept,
    /// Difficulty level
    #[serde(rename = "difficulty")]
    pub level: VideoLevel,
    /// Tags in display order
    #[serde(default)]
    pub tags: Vec<String>,
    /// Step in the learning path
    pub learning_path: String,
}

impl VideoEntry {
    /// URL for the embedded player
    pub fn embed_url(&self) -> String {
        format!("{EMBED_BASE}{}?autoplay=1&rel=0&modestbranding=1", self.id)
    }

    /// URL of the thumbnail image
    pub fn thumbnail_url(&self) -> String {
        format!("{THUMBNAIL_BASE}{}/maxresdefault.jpg", self.id)
    }

    /// Channel, level, and learning path line for the detail overlay
    pub fn detail_line(&self) -> String {
        format!(
            "Channel: {} | Difficulty: {} | Learning Path: {}",
            self.channel.name(),
            self.level,
            self.learning_path
        )
    }

    // Catalogs copied from watch URLs carry a "v=" prefix.
    fn normalize(mut self) -> Result<Self> {
        if let Some(stripped) = self.id.strip_prefix("v=") {
            self.id = stripped.to_string();
        }
        let valid = !self.id.is_empty()
            && self
                .id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(CatalogError::InvalidId {
                id: self.id,
                title: self.title,
            });
        }
        Ok(self)
    }
}

/// The read-only list of videos
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoCatalog {
    entries: Vec<VideoEntry>,
}

impl VideoCatalog {
    /// Parse a catalog from a JSON array of entries
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Vec<VideoEntry> = serde_json::from_str(json)?;
        let entries = raw
            .into_iter()
            .map(VideoEntry::normalize)
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(entries = entries.len(), "Loaded video catalog");
        Ok(Self { entries })
    }

    /// The built-in catalog
    pub fn builtin() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }

    /// Entries in catalog order
    pub fn entries(&self) -> &[VideoEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn builtin_entries() -> Vec<VideoEntry> {
    fn entry(
        id: &str,
        title: &str,
        description: &str,
        channel: Channel,
        concept: Concept,
        level: VideoLevel,
        tags: [&str; 3],
        learning_path: &str,
    ) -> VideoEntry {
        VideoEntry {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            channel,
            concept,
            level,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            learning_path: learning_path.to_string(),
        }
    }

    use Channel::*;
    use Concept::*;
    use VideoLevel::*;

    const STEP_1: &str = "Step 1: Number Recognition";
    const STEP_2: &str = "Step 2: Simple Addition";
    const STEP_3: &str = "Step 3: Shapes & Patterns";
    const STEP_4: &str = "Step 4: Advanced Counting";
    const STEP_5: &str = "Step 5: Size Comparison";

    vec![
        entry(
            "8jOzLOACgxI",
            "Numberblocks - Counting 1-5",
            "Meet the Numberblocks! Learn to count from 1 to 5 with fun characters.",
            Numberblocks,
            Counting,
            Beginner,
            ["Counting", "Numbers", "Beginner"],
            STEP_1,
        ),
        entry(
            "2X-HAFPHBzg",
            "Numberblocks - Adding Together",
            "See how Numberblocks combine to make bigger numbers!",
            Numberblocks,
            Addition,
            Beginner,
            ["Addition", "Numbers", "Beginner"],
            STEP_2,
        ),
        entry(
            "7DjsD7S5EcM",
            "Numberblocks - Shapes & Patterns",
            "Learn shapes and patterns with the Numberblocks!",
            Numberblocks,
            Shapes,
            Beginner,
            ["Shapes", "Patterns", "Beginner"],
            STEP_3,
        ),
        entry(
            "oLU06V1qNWg",
            "Sesame Street - Count with Elmo",
            "Count to 10 with Elmo and friends!",
            Sesame,
            Counting,
            Beginner,
            ["Counting", "Numbers", "Beginner"],
            STEP_1,
        ),
        entry(
            "dJZXqhQJUyM",
            "Sesame Street - Shapes Song",
            "Learn about circles, squares, and triangles!",
            Sesame,
            Shapes,
            Beginner,
            ["Shapes", "Geometry", "Beginner"],
            STEP_3,
        ),
        entry(
            "8jOzLOACgxI",
            "Pinkfong! - Counting to 20",
            "High-energy counting song to 20!",
            Pinkfong,
            Counting,
            Intermediate,
            ["Counting", "Numbers", "Intermediate"],
            STEP_4,
        ),
        entry(
            "2X-HAFPHBzg",
            "Pinkfong! - Math Songs Compilation",
            "Fun math songs about numbers and shapes!",
            Pinkfong,
            Patterns,
            Beginner,
            ["Patterns", "Songs", "Beginner"],
            STEP_3,
        ),
        entry(
            "7DjsD7S5EcM",
            "Super Simple Songs - 10 Little Dinosaurs",
            "Gentle counting song with dinosaurs!",
            SuperSimple,
            Counting,
            Beginner,
            ["Counting", "Numbers", "Beginner"],
            STEP_1,
        ),
        entry(
            "oLU06V1qNWg",
            "Super Simple Songs - Shapes Song",
            "Calm and clear shapes learning song!",
            SuperSimple,
            Shapes,
            Beginner,
            ["Shapes", "Geometry", "Beginner"],
            STEP_3,
        ),
        entry(
            "dJZXqhQJUyM",
            "Jack Hartmann - Count and Workout",
            "Count and move with Jack Hartmann!",
            JackHartmann,
            Counting,
            Intermediate,
            ["Counting", "Movement", "Intermediate"],
            STEP_4,
        ),
        entry(
            "8jOzLOACgxI",
            "Jack Hartmann - Big and Small",
            "Learn about size comparison with movement!",
            JackHartmann,
            Comparison,
            Beginner,
            ["Comparison", "Movement", "Beginner"],
            STEP_5,
        ),
    ]
}

// =============================================================================
// Library Screen
// =============================================================================

/// Filter and overlay state for the video screen
#[derive(Debug, Clone)]
pub struct VideoLibrary {
    catalog: VideoCatalog,
    channel: Facet<Channel>,
    concept: Facet<Concept>,
    // Catalog position of the open entry; ids repeat across entries.
    selected: Option<usize>,
}

impl Default for VideoLibrary {
    fn default() -> Self {
        Self::new(VideoCatalog::builtin())
    }
}

impl VideoLibrary {
    /// Create a library over a catalog with both facets on "all"
    pub fn new(catalog: VideoCatalog) -> Self {
        Self {
            catalog,
            channel: Facet::All,
            concept: Facet::All,
            selected: None,
        }
    }

    /// The underlying catalog
    pub fn catalog(&self) -> &VideoCatalog {
        &self.catalog
    }

    /// Select the channel filter
    pub fn set_channel(&mut self, facet: Facet<Channel>) {
        self.channel = facet;
    }

    /// Select the concept filter
    pub fn set_concept(&mut self, facet: Facet<Concept>) {
        self.concept = facet;
    }

    /// Current channel filter
    pub fn channel(&self) -> Facet<Channel> {
        self.channel
    }

    /// Current concept filter
    pub fn concept(&self) -> Facet<Concept> {
        self.concept
    }

    /// Entries passing both filters, in catalog order
    pub fn visible(&self) -> Vec<&VideoEntry> {
        self.visible_positions()
            .map(|position| &self.catalog.entries[position])
            .collect()
    }

    fn visible_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.catalog
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| self.channel.matches(&e.channel) && self.concept.matches(&e.concept))
            .map(|(position, _)| position)
    }

    /// Open the detail overlay for the entry at `index` in the visible list
    pub fn open(&mut self, index: usize) -> Option<&VideoEntry> {
        let position = self.visible_positions().nth(index)?;
        self.selected = Some(position);
        let entry = &self.catalog.entries[position];
        tracing::debug!(title = %entry.title, "Opened video");
        Some(entry)
    }

    /// Close the detail overlay; returns whether one was open
    pub fn close(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// Entry shown in the detail overlay
    pub fn selected(&self) -> Option<&VideoEntry> {
        self.selected.and_then(|p| self.catalog.entries.get(p))
    }

    /// Channel filter buttons, "All Channels" first
    pub fn channel_tabs(&self) -> Vec<FilterTab> {
        let mut tabs = vec![FilterTab {
            id: "all",
            name: "All Channels",
            color: Some("#9B59B6"),
            active: self.channel == Facet::All,
        }];
        tabs.extend(Channel::ALL.into_iter().map(|c| FilterTab {
            id: c.id(),
            name: c.name(),
            color: Some(c.color()),
            active: self.channel == Facet::Only(c),
        }));
        tabs
    }

    /// Concept filter buttons, "All Concepts" first
    pub fn concept_filters(&self) -> Vec<FilterTab> {
        let mut tabs = vec![FilterTab {
            id: "all",
            name: "All Concepts",
            color: None,
            active: self.concept == Facet::All,
        }];
        tabs.extend(Concept::ALL.into_iter().map(|c| FilterTab {
            id: c.id(),
            name: c.name(),
            color: None,
            active: self.concept == Facet::Only(c),
        }));
        tabs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = VideoCatalog::builtin();
        assert_eq!(catalog.len(), 11);
        assert!(catalog.entries().iter().all(|e| e.tags.len() == 3));
        assert!(catalog.entries().iter().all(|e| !e.id.starts_with("v=")));
    }

    #[test]
    fn test_unfiltered_shows_everything() {
        let library = VideoLibrary::default();
        assert_eq!(library.visible().len(), 11);
    }

    #[test]
    fn test_channel_filter() {
        let mut library = VideoLibrary::default();
        library.set_channel(Facet::Only(Channel::Numberblocks));
        let titles: Vec<&str> = library.visible().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Numberblocks - Counting 1-5",
                "Numberblocks - Adding Together",
                "Numberblocks - Shapes & Patterns",
            ]
        );
    }

    #[test]
    fn test_facets_combine() {
        let mut library = VideoLibrary::default();
        library.set_concept(Facet::Only(Concept::Counting));
        assert_eq!(library.visible().len(), 5);

        library.set_channel(Facet::Only(Channel::Pinkfong));
        let visible = library.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Pinkfong! - Counting to 20");

        library.set_channel(Facet::Only(Channel::Sesame));
        library.set_concept(Facet::Only(Concept::Comparison));
        assert!(library.visible().is_empty());
    }

    #[test]
    fn test_open_uses_visible_position() {
        let mut library = VideoLibrary::default();
        library.set_channel(Facet::Only(Channel::JackHartmann));
        let opened = library.open(1).unwrap().title.clone();
        assert_eq!(opened, "Jack Hartmann - Big and Small");

        // Same id as the first Numberblocks entry, still a distinct selection.
        library.set_channel(Facet::All);
        assert_eq!(library.selected().unwrap().title, "Jack Hartmann - Big and Small");

        assert!(library.close());
        assert!(!library.close());
        assert!(library.selected().is_none());
    }

    #[test]
    fn test_open_out_of_range() {
        let mut library = VideoLibrary::default();
        library.set_concept(Facet::Only(Concept::Addition));
        assert!(library.open(1).is_none());
        assert!(library.selected().is_none());
    }

    #[test]
    fn test_urls() {
        let catalog = VideoCatalog::builtin();
        let entry = &catalog.entries()[0];
        assert_eq!(
            entry.embed_url(),
            "https://www.youtube.com/embed/8jOzLOACgxI?autoplay=1&rel=0&modestbranding=1"
        );
        assert_eq!(
            entry.thumbnail_url(),
            "https://img.youtube.com/vi/8jOzLOACgxI/maxresdefault.jpg"
        );
        assert_eq!(
            entry.detail_line(),
            "Channel: Numberblocks | Difficulty: Beginner | Learning Path: Step 1: Number Recognition"
        );
    }

    #[test]
    fn test_facet_parse() {
        assert_eq!(Facet::<Channel>::parse("all"), Some(Facet::All));
        assert_eq!(
            Facet::<Channel>::parse("supersimple"),
            Some(Facet::Only(Channel::SuperSimple))
        );
        assert_eq!(Facet::<Concept>::parse("patterns"), Some(Facet::Only(Concept::Patterns)));
        assert_eq!(Facet::<Concept>::parse("algebra"), None);
    }

    #[test]
    fn test_tabs_mark_active_filter() {
        let mut library = VideoLibrary::default();
        let tabs = library.channel_tabs();
        assert_eq!(tabs.len(), 6);
        assert!(tabs[0].active);
        assert_eq!(tabs[0].name, "All Channels");

        library.set_channel(Facet::Only(Channel::Sesame));
        let active: Vec<&str> = library
            .channel_tabs()
            .iter()
            .filter(|t| t.active)
            .map(|t| t.id)
            .collect();
        assert_eq!(active, vec!["sesame"]);
        assert_eq!(library.concept_filters()[0].name, "All Concepts");
    }

    #[test]
    fn test_catalog_from_json_strips_prefix() {
        let json = r#"[{
            "id": "v=8jOzLOACgxI",
            "title": "Counting",
            "description": "Count along",
            "channel": "numberblocks",
            "concept": "counting",
            "difficulty": "Beginner",
            "learningPath": "Step 1"
        }]"#;
        let catalog = VideoCatalog::from_json(json).unwrap();
        assert_eq!(catalog.entries()[0].id, "8jOzLOACgxI");
        assert!(catalog.entries()[0].tags.is_empty());
    }

    #[test]
    fn test_catalog_from_json_errors() {
        assert!(matches!(
            VideoCatalog::from_json("{}"),
            Err(CatalogError::Parse(_))
        ));

        let bad_id = r#"[{
            "id": "v=",
            "title": "Broken",
            "description": "",
            "channel": "sesame",
            "concept": "shapes",
            "difficulty": "Beginner",
            "learningPath": ""
        }]"#;
        assert!(matches!(
            VideoCatalog::from_json(bad_id),
            Err(CatalogError::InvalidId { .. })
        ));
    }
}
