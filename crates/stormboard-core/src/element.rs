//! Diagram elements and connections.

use crate::geometry;
use crate::style::StyleRecord;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Unique identifier for connections.
pub type ConnectionId = Uuid;

/// Event-storming sticky categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StickyKind {
    #[default]
    DomainEvent,
    Command,
    Aggregate,
    Policy,
    Actor,
    ReadModel,
    Hotspot,
}

impl StickyKind {
    /// Cycle to the next sticky category.
    pub fn next(self) -> Self {
        match self {
            StickyKind::DomainEvent => StickyKind::Command,
            StickyKind::Command => StickyKind::Aggregate,
            StickyKind::Aggregate => StickyKind::Policy,
            StickyKind::Policy => StickyKind::Actor,
            StickyKind::Actor => StickyKind::ReadModel,
            StickyKind::ReadModel => StickyKind::Hotspot,
            StickyKind::Hotspot => StickyKind::DomainEvent,
        }
    }
}

/// The element palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    #[default]
    Rectangle,
    Ellipse,
    Diamond,
    Label,
    Sticky(StickyKind),
}

/// A positioned, sized, styled diagram element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    /// What the element looks like on the canvas.
    pub kind: ElementKind,
    /// Top-left corner position in world coordinates.
    pub position: Point,
    /// Width and height of the element.
    pub size: Size,
    /// Style properties.
    pub style: StyleRecord,
    /// Text content, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Element {
    /// Create a new element with a fresh id and default style.
    pub fn new(kind: ElementKind, position: Point, size: Size) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            size,
            style: StyleRecord::element_default(),
            text: None,
        }
    }

    /// Set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Replace the style record.
    pub fn with_style(mut self, style: StyleRecord) -> Self {
        self.style = style;
        self
    }

    /// Get the bounding box in world coordinates.
    pub fn bounds(&self) -> Rect {
        geometry::bounding_box(self.position, self.size)
    }
}

/// A connection between two elements.
///
/// Connections are referential only: they carry element ids, and the ids are
/// not guaranteed to resolve in every document the connection is read against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub source: ElementId,
    pub target: ElementId,
    /// Style properties.
    pub style: StyleRecord,
}

impl Connection {
    /// Create a new connection with a fresh id and default style.
    pub fn new(source: ElementId, target: ElementId) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            target,
            style: StyleRecord::connection_default(),
        }
    }

    /// Replace the style record.
    pub fn with_style(mut self, style: StyleRecord) -> Self {
        self.style = style;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_creation() {
        let elem = Element::new(
            ElementKind::Rectangle,
            Point::new(10.0, 20.0),
            Size::new(100.0, 50.0),
        );
        assert!((elem.position.x - 10.0).abs() < f64::EPSILON);
        assert!((elem.size.height - 50.0).abs() < f64::EPSILON);
        assert!(elem.text.is_none());
    }

    #[test]
    fn test_bounds() {
        let elem = Element::new(
            ElementKind::Sticky(StickyKind::DomainEvent),
            Point::new(10.0, 20.0),
            Size::new(100.0, 50.0),
        );
        let bounds = elem.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 110.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_connection_links_ids() {
        let a = Element::new(ElementKind::Rectangle, Point::ZERO, Size::new(10.0, 10.0));
        let b = Element::new(ElementKind::Ellipse, Point::new(50.0, 0.0), Size::new(10.0, 10.0));
        let conn = Connection::new(a.id, b.id);
        assert_eq!(conn.source, a.id);
        assert_eq!(conn.target, b.id);
        assert_ne!(conn.id, a.id);
    }
}
