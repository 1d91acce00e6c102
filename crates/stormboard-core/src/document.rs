//! Diagram document and structural invariants.

use crate::element::{Connection, ConnectionId, Element, ElementId};
use crate::geometry;
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::{Duration, SystemTime};
use thiserror::Error;
use uuid::Uuid;

/// Structural validation errors.
///
/// These can only arise at a boundary (deserialization, hand-built fixtures);
/// command execution preserves validity by construction.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("z-order references unknown element {0}")]
    UnknownZOrderId(ElementId),
    #[error("element {0} appears {1} times in the z-order")]
    ZOrderCount(ElementId, usize),
    #[error("duplicate connection id {0}")]
    DuplicateConnectionId(ConnectionId),
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    /// Last modification time. Strictly increases on every command execute.
    pub modified: SystemTime,
}

/// A diagram document: elements, connections, metadata.
///
/// Elements are keyed by id with a separate back-to-front z-order, so lookup
/// is O(1) and stacking stays explicit. Commands never mutate a document they
/// are given; they clone it and return the clone, which keeps every
/// previously-returned document valid as an undo reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// All elements in the document, keyed by id.
    pub elements: HashMap<ElementId, Element>,
    /// Z-order of elements (back to front).
    pub z_order: Vec<ElementId>,
    /// Connections between elements.
    pub connections: Vec<Connection>,
    /// Document metadata.
    pub metadata: DocumentMetadata,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            z_order: Vec::new(),
            connections: Vec::new(),
            metadata: DocumentMetadata {
                id: Uuid::new_v4().to_string(),
                name: "Untitled".to_string(),
                modified: SystemTime::now(),
            },
        }
    }

    /// Add an element on top of the stack.
    pub fn add_element(&mut self, element: Element) {
        let id = element.id;
        if self.elements.insert(id, element).is_none() {
            self.z_order.push(id);
        }
    }

    /// Insert an element at a specific z-index (clamped to the stack size).
    pub fn insert_element_at(&mut self, index: usize, element: Element) {
        let id = element.id;
        if self.elements.insert(id, element).is_none() {
            self.z_order.insert(index.min(self.z_order.len()), id);
        }
    }

    /// Remove an element, returning it with its former z-index.
    pub fn remove_element(&mut self, id: ElementId) -> Option<(usize, Element)> {
        let index = self.z_order.iter().position(|&e| e == id)?;
        self.z_order.remove(index);
        self.elements.remove(&id).map(|element| (index, element))
    }

    /// Get an element by id.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Get a mutable element by id.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    /// Elements in z-order (back to front).
    pub fn elements_ordered(&self) -> impl Iterator<Item = &Element> {
        self.z_order.iter().filter_map(|id| self.elements.get(id))
    }

    /// The element's position in the z-order, if present.
    pub fn z_index(&self, id: ElementId) -> Option<usize> {
        self.z_order.iter().position(|&e| e == id)
    }

    /// Bring an element to the front (topmost).
    pub fn bring_to_front(&mut self, id: ElementId) {
        if self.elements.contains_key(&id) {
            self.z_order.retain(|&e| e != id);
            self.z_order.push(id);
        }
    }

    /// Send an element to the back (bottommost).
    pub fn send_to_back(&mut self, id: ElementId) {
        if self.elements.contains_key(&id) {
            self.z_order.retain(|&e| e != id);
            self.z_order.insert(0, id);
        }
    }

    /// Move an element one layer forward (towards the front).
    pub fn bring_forward(&mut self, id: ElementId) -> bool {
        if let Some(pos) = self.z_index(id) {
            if pos + 1 < self.z_order.len() {
                self.z_order.swap(pos, pos + 1);
                return true;
            }
        }
        false
    }

    /// Move an element one layer backward (towards the back).
    pub fn send_backward(&mut self, id: ElementId) -> bool {
        if let Some(pos) = self.z_index(id) {
            if pos > 0 {
                self.z_order.swap(pos, pos - 1);
                return true;
            }
        }
        false
    }

    /// Add a connection.
    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    /// Remove a connection, returning it with its former list index.
    pub fn remove_connection(&mut self, id: ConnectionId) -> Option<(usize, Connection)> {
        let index = self.connections.iter().position(|c| c.id == id)?;
        Some((index, self.connections.remove(index)))
    }

    /// Get a connection by id.
    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    /// The bounding box of all elements, `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        geometry::selection_bounds(self.elements.values().map(Element::bounds))
    }

    /// Check if the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Advance the modification time.
    ///
    /// Monotonic even when `at` is not: repeated touches within clock
    /// resolution still strictly increase.
    pub(crate) fn touch(&mut self, at: SystemTime) {
        let bumped = self.metadata.modified + Duration::from_micros(1);
        self.metadata.modified = at.max(bumped);
    }

    /// Compare element, z-order, and connection content, ignoring metadata.
    pub fn content_eq(&self, other: &Document) -> bool {
        self.elements == other.elements
            && self.z_order == other.z_order
            && self.connections == other.connections
    }

    /// Verify structural invariants: the z-order and element map agree, and
    /// connection ids are unique.
    pub fn validate(&self) -> Result<(), DocumentError> {
        for &id in &self.z_order {
            if !self.elements.contains_key(&id) {
                return Err(DocumentError::UnknownZOrderId(id));
            }
        }
        for &id in self.elements.keys() {
            let count = self.z_order.iter().filter(|&&e| e == id).count();
            if count != 1 {
                return Err(DocumentError::ZOrderCount(id, count));
            }
        }
        let mut seen = HashSet::new();
        for connection in &self.connections {
            if !seen.insert(connection.id) {
                return Err(DocumentError::DuplicateConnectionId(connection.id));
            }
        }
        Ok(())
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use kurbo::{Point, Size};

    fn element_at(x: f64, y: f64) -> Element {
        Element::new(ElementKind::Rectangle, Point::new(x, y), Size::new(20.0, 20.0))
    }

    #[test]
    fn test_add_remove_preserves_z_order() {
        let mut doc = Document::new();
        let a = element_at(0.0, 0.0);
        let b = element_at(10.0, 0.0);
        let c = element_at(20.0, 0.0);
        let (a_id, b_id, c_id) = (a.id, b.id, c.id);
        doc.add_element(a);
        doc.add_element(b);
        doc.add_element(c);

        let (index, removed) = doc.remove_element(b_id).unwrap();
        assert_eq!(index, 1);
        assert_eq!(removed.id, b_id);
        assert_eq!(doc.z_order, vec![a_id, c_id]);

        doc.insert_element_at(index, removed);
        assert_eq!(doc.z_order, vec![a_id, b_id, c_id]);
        doc.validate().unwrap();
    }

    #[test]
    fn test_add_duplicate_id_keeps_single_z_entry() {
        let mut doc = Document::new();
        let a = element_at(0.0, 0.0);
        let mut dup = element_at(5.0, 5.0);
        dup.id = a.id;
        doc.add_element(a);
        doc.add_element(dup);
        assert_eq!(doc.z_order.len(), 1);
        doc.validate().unwrap();
    }

    #[test]
    fn test_reorder_operations() {
        let mut doc = Document::new();
        let a = element_at(0.0, 0.0);
        let b = element_at(10.0, 0.0);
        let c = element_at(20.0, 0.0);
        let (a_id, b_id, c_id) = (a.id, b.id, c.id);
        doc.add_element(a);
        doc.add_element(b);
        doc.add_element(c);

        doc.bring_to_front(a_id);
        assert_eq!(doc.z_order, vec![b_id, c_id, a_id]);

        doc.send_to_back(a_id);
        assert_eq!(doc.z_order, vec![a_id, b_id, c_id]);

        assert!(doc.bring_forward(a_id));
        assert_eq!(doc.z_order, vec![b_id, a_id, c_id]);

        assert!(doc.send_backward(a_id));
        assert_eq!(doc.z_order, vec![a_id, b_id, c_id]);

        // Already at the back.
        assert!(!doc.send_backward(a_id));
    }

    #[test]
    fn test_touch_is_strictly_monotonic() {
        let mut doc = Document::new();
        let start = doc.metadata.modified;
        doc.touch(start);
        let first = doc.metadata.modified;
        doc.touch(start);
        assert!(first > start);
        assert!(doc.metadata.modified > first);
    }

    #[test]
    fn test_validate_catches_dangling_z_entry() {
        let mut doc = Document::new();
        doc.z_order.push(Uuid::new_v4());
        assert!(matches!(
            doc.validate(),
            Err(DocumentError::UnknownZOrderId(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut doc = Document::new();
        let a = element_at(1.0, 2.0).with_text("Order placed");
        let b = element_at(40.0, 2.0);
        let conn = Connection::new(a.id, b.id);
        doc.add_element(a);
        doc.add_element(b);
        doc.add_connection(conn);

        let json = doc.to_json().unwrap();
        let parsed = Document::from_json(&json).unwrap();
        assert_eq!(parsed, doc);
        parsed.validate().unwrap();
    }
}
