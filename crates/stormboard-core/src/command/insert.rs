//! Insertion of new elements and connections.

use crate::document::Document;
use crate::element::{Connection, Element};
use std::time::SystemTime;

/// Add one element on top of the stack.
///
/// A no-op when the element's id already exists in the document, so replaying
/// the command after an external insert cannot clobber anything.
#[derive(Debug, Clone)]
pub struct InsertElementCommand {
    element: Element,
    timestamp: SystemTime,
    description: String,
    inserted: bool,
}

impl InsertElementCommand {
    pub fn new(element: Element) -> Self {
        Self::new_at(element, SystemTime::now())
    }

    pub fn new_at(element: Element, timestamp: SystemTime) -> Self {
        let description = match &element.text {
            Some(text) => format!("Insert \"{text}\""),
            None => "Insert element".to_string(),
        };
        Self {
            element,
            timestamp,
            description,
            inserted: false,
        }
    }

    pub(crate) fn execute(&mut self, document: &Document) -> Document {
        let mut next = document.clone();
        self.inserted = document.element(self.element.id).is_none();
        if self.inserted {
            next.add_element(self.element.clone());
        } else {
            log::warn!("element {} already exists, insert skipped", self.element.id);
        }
        next.touch(self.timestamp);
        next
    }

    pub(crate) fn undo(&self, document: &Document) -> Document {
        let mut next = document.clone();
        if self.inserted {
            next.remove_element(self.element.id);
        }
        next.touch(self.timestamp);
        next
    }

    pub(crate) fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    pub(crate) fn description(&self) -> &str {
        &self.description
    }
}

/// Add one connection between two existing elements.
///
/// A no-op unless both endpoints exist at execute time and the connection id
/// is unused.
#[derive(Debug, Clone)]
pub struct ConnectElementsCommand {
    connection: Connection,
    timestamp: SystemTime,
    description: String,
    inserted: bool,
}

impl ConnectElementsCommand {
    pub fn new(connection: Connection) -> Self {
        Self::new_at(connection, SystemTime::now())
    }

    pub fn new_at(connection: Connection, timestamp: SystemTime) -> Self {
        Self {
            connection,
            timestamp,
            description: "Connect elements".to_string(),
            inserted: false,
        }
    }

    pub(crate) fn execute(&mut self, document: &Document) -> Document {
        let mut next = document.clone();
        self.inserted = document.element(self.connection.source).is_some()
            && document.element(self.connection.target).is_some()
            && document.connection(self.connection.id).is_none();
        if self.inserted {
            next.add_connection(self.connection.clone());
        }
        next.touch(self.timestamp);
        next
    }

    pub(crate) fn undo(&self, document: &Document) -> Document {
        let mut next = document.clone();
        if self.inserted {
            next.remove_connection(self.connection.id);
        }
        next.touch(self.timestamp);
        next
    }

    pub(crate) fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    pub(crate) fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::test_fixtures::{at, rect_document};
    use crate::element::ElementKind;
    use kurbo::{Point, Size};

    #[test]
    fn test_insert_and_exact_inverse() {
        let (doc, _) = rect_document(&[(0.0, 0.0)]);
        let element = Element::new(
            ElementKind::Ellipse,
            Point::new(50.0, 50.0),
            Size::new(30.0, 30.0),
        );
        let id = element.id;
        let mut cmd = InsertElementCommand::new_at(element, at(100));

        let inserted = cmd.execute(&doc);
        assert!(inserted.element(id).is_some());
        assert_eq!(inserted.z_index(id), Some(1));

        let restored = cmd.undo(&inserted);
        assert!(restored.content_eq(&doc));
    }

    #[test]
    fn test_insert_existing_id_is_noop() {
        let (doc, ids) = rect_document(&[(0.0, 0.0)]);
        let mut clashing = Element::new(
            ElementKind::Diamond,
            Point::new(9.0, 9.0),
            Size::new(5.0, 5.0),
        );
        clashing.id = ids[0];
        let mut cmd = InsertElementCommand::new_at(clashing, at(100));

        let out = cmd.execute(&doc);
        assert!(out.content_eq(&doc));
        // Undo must not delete the pre-existing element.
        let restored = cmd.undo(&out);
        assert!(restored.element(ids[0]).is_some());
    }

    #[test]
    fn test_connect_requires_both_endpoints() {
        let (doc, ids) = rect_document(&[(0.0, 0.0)]);
        let dangling = Connection::new(ids[0], uuid::Uuid::new_v4());
        let mut cmd = ConnectElementsCommand::new_at(dangling, at(100));

        let out = cmd.execute(&doc);
        assert!(out.connections.is_empty());
        assert!(out.content_eq(&doc));
    }

    #[test]
    fn test_connect_and_undo() {
        let (doc, ids) = rect_document(&[(0.0, 0.0), (40.0, 0.0)]);
        let conn = Connection::new(ids[0], ids[1]);
        let mut cmd = ConnectElementsCommand::new_at(conn, at(100));

        let connected = cmd.execute(&doc);
        assert_eq!(connected.connections.len(), 1);

        let restored = cmd.undo(&connected);
        assert!(restored.content_eq(&doc));
    }
}
