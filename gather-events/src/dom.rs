//! Typed selector markers and the query capability the extractor runs on.
//!
//! The extractor never sees CSS strings. It asks a node for the first or all
//! descendants matching a [`Marker`], and for its normalized text. Any parsed
//! document representation can implement [`DomQuery`]; the `scraper` crate's
//! [`ElementRef`] is the one used at runtime.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

/// Element patterns on an event listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// One listed event; carries a `data-event-id` attribute.
    EventContainer,
    /// Event title heading.
    Name,
    /// Date/time line.
    DateTime,
    /// Small-screen info line: either the hosting group or the venue/format.
    LocationLine,
    /// Nested badge tagging a [`Marker::LocationLine`] as the group name.
    GroupBadge,
}

static EVENT_CONTAINER: LazyLock<Selector> = LazyLock::new(|| compile(Marker::EventContainer));
static NAME: LazyLock<Selector> = LazyLock::new(|| compile(Marker::Name));
static DATE_TIME: LazyLock<Selector> = LazyLock::new(|| compile(Marker::DateTime));
static LOCATION_LINE: LazyLock<Selector> = LazyLock::new(|| compile(Marker::LocationLine));
static GROUP_BADGE: LazyLock<Selector> = LazyLock::new(|| compile(Marker::GroupBadge));

impl Marker {
    pub const ALL: [Marker; 5] = [
        Marker::EventContainer,
        Marker::Name,
        Marker::DateTime,
        Marker::LocationLine,
        Marker::GroupBadge,
    ];

    /// CSS text of the marker.
    pub const fn css(self) -> &'static str {
        match self {
            Marker::EventContainer => "div[data-event-id]",
            Marker::Name => "h2.text-gray7",
            Marker::DateTime => "time",
            Marker::LocationLine => r"p.line-clamp-1.md\:hidden",
            Marker::GroupBadge => "span.s1uol3r6",
        }
    }

    /// Compiled selector, built once per process.
    pub fn selector(self) -> &'static Selector {
        match self {
            Marker::EventContainer => &EVENT_CONTAINER,
            Marker::Name => &NAME,
            Marker::DateTime => &DATE_TIME,
            Marker::LocationLine => &LOCATION_LINE,
            Marker::GroupBadge => &GROUP_BADGE,
        }
    }
}

fn compile(marker: Marker) -> Selector {
    Selector::parse(marker.css())
        .unwrap_or_else(|e| panic!("marker {marker:?} has invalid CSS `{}`: {e}", marker.css()))
}

/// Read-only element lookups scoped to one node's descendants.
pub trait DomQuery {
    type Node: DomQuery;

    /// First descendant matching `marker`, in document order.
    fn find_first(&self, marker: Marker) -> Option<Self::Node>;

    /// All descendants matching `marker`, in document order.
    fn find_all(&self, marker: Marker) -> Vec<Self::Node>;

    /// Text nodes trimmed, empties dropped, then concatenated.
    fn normalized_text(&self) -> String;
}

impl<'a> DomQuery for ElementRef<'a> {
    type Node = ElementRef<'a>;

    fn find_first(&self, marker: Marker) -> Option<ElementRef<'a>> {
        self.select(marker.selector()).next()
    }

    fn find_all(&self, marker: Marker) -> Vec<ElementRef<'a>> {
        self.select(marker.selector()).collect()
    }

    fn normalized_text(&self) -> String {
        normalize_text(self.text())
    }
}

/// Trim each text fragment, drop empty ones and join the rest.
pub fn normalize_text<'t>(fragments: impl IntoIterator<Item = &'t str>) -> String {
    fragments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
