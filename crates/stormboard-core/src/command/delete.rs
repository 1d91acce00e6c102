//! Deletion of elements and connections.

use crate::document::Document;
use crate::element::{Connection, ConnectionId, Element, ElementId};
use std::time::SystemTime;

/// Remove elements (and, optionally, connections) from the document.
///
/// Deleting an element does not cascade to its connections; the caller that
/// wants a cascade computes the affected connection ids and passes them in,
/// which keeps the whole removal one undo step. Undo reinserts everything at
/// its original z-order / list index.
#[derive(Debug, Clone)]
pub struct DeleteElementsCommand {
    element_ids: Vec<ElementId>,
    connection_ids: Vec<ConnectionId>,
    timestamp: SystemTime,
    description: String,
    removed_elements: Vec<(usize, Element)>,
    removed_connections: Vec<(usize, Connection)>,
}

impl DeleteElementsCommand {
    pub fn new(element_ids: Vec<ElementId>) -> Self {
        Self::new_at(element_ids, Vec::new(), SystemTime::now())
    }

    pub fn new_at(
        element_ids: Vec<ElementId>,
        connection_ids: Vec<ConnectionId>,
        timestamp: SystemTime,
    ) -> Self {
        let description = format!("Delete {}", super::element_count_label(element_ids.len()));
        Self {
            element_ids,
            connection_ids,
            timestamp,
            description,
            removed_elements: Vec::new(),
            removed_connections: Vec::new(),
        }
    }

    /// Include connections in the same undo step.
    pub fn with_connections(mut self, connection_ids: Vec<ConnectionId>) -> Self {
        self.connection_ids = connection_ids;
        self
    }

    pub(crate) fn execute(&mut self, document: &Document) -> Document {
        let mut next = document.clone();
        self.removed_elements.clear();
        self.removed_connections.clear();

        for &id in &self.connection_ids {
            if let Some(entry) = next.remove_connection(id) {
                self.removed_connections.push(entry);
            }
        }
        for &id in &self.element_ids {
            if let Some(entry) = next.remove_element(id) {
                self.removed_elements.push(entry);
            }
        }

        next.touch(self.timestamp);
        next
    }

    pub(crate) fn undo(&self, document: &Document) -> Document {
        let mut next = document.clone();
        // Each recorded index is relative to the state just before that
        // removal, so reinsertion must replay the removals in reverse.
        for (index, element) in self.removed_elements.iter().rev() {
            next.insert_element_at(*index, element.clone());
        }
        for (index, connection) in self.removed_connections.iter().rev() {
            let index = (*index).min(next.connections.len());
            next.connections.insert(index, connection.clone());
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
