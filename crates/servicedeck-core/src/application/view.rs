//! Headless screen model.
//!
//! A rendered screen is a flat-ish tree of [`Node`]s, some of which carry a
//! stable accessibility identifier. Automation drivers locate controls by
//! those identifiers only; layout and styling never take part in lookup.

use serde::Serialize;

use crate::domain::{Service, ServiceId, Theme, Viewport};

/// Stable accessibility identifiers the end-to-end suite depends on.
pub mod accessibility {
    /// "Get Started": shows the confirmation.
    pub const PRIMARY_ACTION: &str = "get_started_button";
    /// "Learn More": seeds the catalog.
    pub const SECONDARY_ACTION: &str = "learn_more_button";
    /// "Our Services" heading above the grid.
    pub const SECTION_LABEL: &str = "our_services_label";

    pub const ALL: [&str; 3] = [PRIMARY_ACTION, SECONDARY_ACTION, SECTION_LABEL];
}

/// Text of the confirmation shown after the primary action.
pub const CONFIRMATION_MESSAGE: &str = "Button Pressed!";

pub const HERO_TITLE: &str = "Welcome to the Demo";
pub const HERO_DESCRIPTION: &str =
    "Explore AWS services for building exceptional mobile and web experiences";
pub const SECTION_TITLE: &str = "Our Services";
pub const FOOTER_TEXT: &str = "Built with AWS Amplify";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Heading,
    Text,
    Button,
    Card,
    Glyph,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub role: NodeRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility_id: Option<&'static str>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Service behind a card; `None` for chrome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<ServiceId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    fn plain(role: NodeRole, text: impl Into<String>) -> Self {
        Self {
            role,
            accessibility_id: None,
            text: text.into(),
            width: None,
            service_id: None,
            children: Vec::new(),
        }
    }

    fn labelled(role: NodeRole, id: &'static str, text: impl Into<String>) -> Self {
        Self {
            accessibility_id: Some(id),
            ..Self::plain(role, text)
        }
    }

    fn card(service: &Service, width: u32) -> Self {
        Self {
            width: Some(width),
            service_id: Some(service.id().clone()),
            children: vec![
                Self::plain(NodeRole::Glyph, service.glyph().to_string()),
                Self::plain(NodeRole::Heading, service.title()),
                Self::plain(NodeRole::Text, service.description()),
            ],
            ..Self::plain(NodeRole::Card, service.title())
        }
    }

    /// Glyph shown on a card.
    pub fn glyph(&self) -> Option<&str> {
        self.children
            .iter()
            .find(|c| c.role == NodeRole::Glyph)
            .map(|c| c.text.as_str())
    }
}

/// Everything the screen shows, in top-to-bottom order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenTree {
    pub theme: Theme,
    pub background: &'static str,
    pub card_background: &'static str,
    pub foreground: &'static str,
    pub nodes: Vec<Node>,
}

impl ScreenTree {
    /// Build the tree for a snapshot. Pure function of its inputs.
    pub fn build(services: &[Service], theme: Theme, viewport: Viewport, year: i32) -> Self {
        let card_width = viewport.card_width();

        let mut nodes = vec![
            Node::plain(NodeRole::Heading, HERO_TITLE),
            Node::plain(NodeRole::Text, HERO_DESCRIPTION),
            Node::labelled(NodeRole::Button, accessibility::PRIMARY_ACTION, "Get Started"),
            Node::labelled(NodeRole::Button, accessibility::SECONDARY_ACTION, "Learn More"),
            Node::labelled(NodeRole::Heading, accessibility::SECTION_LABEL, SECTION_TITLE),
        ];
        nodes.extend(services.iter().map(|s| Node::card(s, card_width)));
        nodes.push(Node::plain(NodeRole::Text, FOOTER_TEXT));
        nodes.push(Node::plain(
            NodeRole::Text,
            format!("\u{a9} {year} Amazon Web Services"),
        ));

        Self {
            theme,
            background: theme.background(),
            card_background: theme.card_background(),
            foreground: theme.text(),
            nodes,
        }
    }

    /// Look up a node by accessibility identifier.
    pub fn find(&self, accessibility_id: &str) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|n| n.accessibility_id == Some(accessibility_id))
    }

    pub fn cards(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.role == NodeRole::Card)
    }

    pub fn card_count(&self) -> usize {
        self.cards().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ServiceRecord;

    fn service(id: &str, title: &str) -> Service {
        ServiceRecord {
            id: id.into(),
            title: Some(title.into()),
            description: Some("d".into()),
            created_at: None,
            updated_at: None,
        }
        .into_service()
        .unwrap()
    }

    #[test]
    fn empty_screen_still_exposes_all_identifiers() {
        let tree = ScreenTree::build(&[], Theme::Light, Viewport::default(), 2026);

        for id in accessibility::ALL {
            assert!(tree.find(id).is_some(), "missing {id}");
        }
        assert_eq!(tree.card_count(), 0);
    }

    #[test]
    fn cards_follow_snapshot_order_with_glyphs() {
        let services = [service("1", "Pinpoint"), service("2", "Device Farm")];
        let tree = ScreenTree::build(&services, Theme::Light, Viewport::default(), 2026);

        let cards: Vec<_> = tree.cards().collect();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].text, "Pinpoint");
        assert_eq!(cards[0].glyph(), Some("P"));
        assert_eq!(cards[1].glyph(), Some("D"));
        assert_eq!(cards[1].service_id.as_ref().unwrap().as_str(), "2");
    }

    #[test]
    fn card_width_tracks_viewport() {
        let services = [service("1", "Amplify")];
        let tree = ScreenTree::build(
            &services,
            Theme::Dark,
            Viewport::try_new(400).unwrap(),
            2026,
        );

        assert_eq!(tree.cards().next().unwrap().width, Some(176));
        assert_eq!(tree.background, "#232F3E");
    }

    #[test]
    fn palette_follows_theme() {
        let dark = ScreenTree::build(&[], Theme::Dark, Viewport::default(), 2026);
        assert_eq!(dark.card_background, "#1A232E");
        assert_eq!(dark.foreground, "#FFFFFF");

        let light = ScreenTree::build(&[], Theme::Light, Viewport::default(), 2026);
        assert_eq!(light.background, light.card_background);
        assert_eq!(light.foreground, "#232F3E");
    }

    #[test]
    fn footer_carries_year() {
        let tree = ScreenTree::build(&[], Theme::Light, Viewport::default(), 2031);
        assert!(tree.nodes.last().unwrap().text.contains("2031"));
    }
}
