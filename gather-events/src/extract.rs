//! Event Extractor: one container in, one [`EventRecord`] out.

use crate::dom::{DomQuery, Marker};
use crate::model::EventRecord;

/// Location used when a container has no venue line.
pub const ONLINE: &str = "Online";

/// Extract name, date and location from one event container.
///
/// Missing pieces degrade to `""` (name, date) or [`ONLINE`] (location).
/// Location lines tagged with a group badge name the organiser, not the
/// venue, and are skipped; among the rest the last one wins.
pub fn extract_event<C: DomQuery>(container: &C) -> EventRecord {
    let name = container
        .find_first(Marker::Name)
        .map(|el| el.normalized_text())
        .unwrap_or_default();

    let date = container
        .find_first(Marker::DateTime)
        .map(|el| el.normalized_text())
        .unwrap_or_default();

    let location = container
        .find_all(Marker::LocationLine)
        .into_iter()
        .filter(|line| line.find_first(Marker::GroupBadge).is_none())
        .last()
        .map(|line| line.normalized_text())
        .unwrap_or_else(|| ONLINE.to_string());

    EventRecord {
        name,
        date,
        location,
    }
}

/// Extract every container and keep only records that have a name.
pub fn extract_named<C: DomQuery>(containers: &[C]) -> Vec<EventRecord> {
    containers
        .iter()
        .map(extract_event)
        .filter(EventRecord::has_name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn container(inner: &str) -> EventRecord {
        let html = Html::parse_fragment(&format!(r#"<div data-event-id="e1">{inner}</div>"#));
        let root = html.root_element();
        let el = root
            .find_first(Marker::EventContainer)
            .expect("container in fixture");
        extract_event(&el)
    }

    const GROUP_LINE: &str =
        r#"<p class="line-clamp-1 md:hidden"><span class="s1uol3r6">Group name:</span>Group XYZ</p>"#;

    #[test]
    fn extracts_all_three_fields() {
        let rec = container(
            r#"
            <h2 class="text-gray7"> Rust Hong Kong Meetup </h2>
            <time datetime="2025-05-27T19:00:00+08:00">Tue, May 27 · 7:00 PM HKT</time>
            <p class="line-clamp-1 md:hidden">Central, Hong Kong</p>
            "#,
        );
        assert_eq!(rec.name, "Rust Hong Kong Meetup");
        assert_eq!(rec.date, "Tue, May 27 · 7:00 PM HKT");
        assert_eq!(rec.location, "Central, Hong Kong");
    }

    #[test]
    fn missing_name_and_date_degrade_to_empty() {
        let rec = container(r#"<p class="line-clamp-1 md:hidden">Wan Chai</p>"#);
        assert_eq!(rec.name, "");
        assert_eq!(rec.date, "");
        assert!(!rec.has_name());
    }

    #[test]
    fn no_location_lines_means_online() {
        let rec = container(r#"<h2 class="text-gray7">Remote Rust</h2>"#);
        assert_eq!(rec.location, ONLINE);
    }

    #[test]
    fn only_badge_lines_means_online() {
        let rec = container(&format!(r#"<h2 class="text-gray7">Talk</h2>{GROUP_LINE}"#));
        assert_eq!(rec.location, ONLINE);
    }

    #[test]
    fn badge_line_is_never_the_location() {
        let rec = container(&format!(
            r#"<h2 class="text-gray7">Talk</h2>
               <p class="line-clamp-1 md:hidden">Central, Hong Kong</p>
               {GROUP_LINE}"#
        ));
        assert_eq!(rec.location, "Central, Hong Kong");
        assert_ne!(rec.location, "Group name:Group XYZ");
    }

    #[test]
    fn last_surviving_line_wins() {
        let rec = container(&format!(
            r#"<h2 class="text-gray7">Talk</h2>
               <p class="line-clamp-1 md:hidden">Central, Hong Kong</p>
               {GROUP_LINE}
               <p class="line-clamp-1 md:hidden">Venue B</p>"#
        ));
        assert_eq!(rec.location, "Venue B");
    }

    #[test]
    fn desktop_only_lines_are_ignored() {
        let rec = container(
            r#"<h2 class="text-gray7">Talk</h2>
               <p class="line-clamp-1">Desktop copy of the venue</p>"#,
        );
        assert_eq!(rec.location, ONLINE);
    }

    #[test]
    fn extract_named_drops_nameless_and_keeps_order() {
        let html = Html::parse_document(
            r#"<html><body>
                <div data-event-id="1"><h2 class="text-gray7">First</h2></div>
                <div data-event-id="2"><time>Soon</time></div>
                <div data-event-id="3"><h2 class="text-gray7">Third</h2></div>
            </body></html>"#,
        );
        let containers = html.root_element().find_all(Marker::EventContainer);
        let events = extract_named(&containers);
        let names: Vec<_> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["First", "Third"]);
    }

    /// Minimal in-memory tree: the extractor only depends on [`DomQuery`].
    #[derive(Clone, Default)]
    struct FakeNode {
        marker: Option<Marker>,
        text: &'static str,
        children: Vec<FakeNode>,
    }

    impl FakeNode {
        fn leaf(marker: Marker, text: &'static str) -> Self {
            Self {
                marker: Some(marker),
                text,
                children: Vec::new(),
            }
        }

        fn descendants(&self) -> Vec<FakeNode> {
            let mut out = Vec::new();
            for child in &self.children {
                out.push(child.clone());
                out.extend(child.descendants());
            }
            out
        }
    }

    impl DomQuery for FakeNode {
        type Node = FakeNode;

        fn find_first(&self, marker: Marker) -> Option<FakeNode> {
            self.find_all(marker).into_iter().next()
        }

        fn find_all(&self, marker: Marker) -> Vec<FakeNode> {
            self.descendants()
                .into_iter()
                .filter(|n| n.marker == Some(marker))
                .collect()
        }

        fn normalized_text(&self) -> String {
            crate::dom::normalize_text([self.text])
        }
    }

    #[test]
    fn works_over_any_dom_representation() {
        let badge_line = FakeNode {
            marker: Some(Marker::LocationLine),
            text: "Group XYZ",
            children: vec![FakeNode::leaf(Marker::GroupBadge, "Group name:")],
        };
        let root = FakeNode {
            marker: Some(Marker::EventContainer),
            text: "",
            children: vec![
                FakeNode::leaf(Marker::Name, "  Ferris Fest "),
                FakeNode::leaf(Marker::LocationLine, "Central, Hong Kong"),
                badge_line,
                FakeNode::leaf(Marker::LocationLine, "Venue B"),
            ],
        };

        let rec = extract_event(&root);
        assert_eq!(rec.name, "Ferris Fest");
        assert_eq!(rec.date, "");
        assert_eq!(rec.location, "Venue B");
    }
}
