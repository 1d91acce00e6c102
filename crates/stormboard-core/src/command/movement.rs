//! Batched position updates, the currency of drag gestures.

use super::{same_target_set, within_merge_window};
use crate::document::Document;
use crate::element::ElementId;
use kurbo::Point;
use std::collections::HashMap;
use std::time::SystemTime;

/// Set new positions for a batch of elements in one undo step.
///
/// Consecutive batches over the same selection merge within the merge
/// window, so a drag stream collapses into a single start-to-end move.
#[derive(Debug, Clone)]
pub struct MoveElementsCommand {
    moves: Vec<(ElementId, Point)>,
    timestamp: SystemTime,
    description: String,
    previous: HashMap<ElementId, Point>,
}

impl MoveElementsCommand {
    pub fn new(moves: Vec<(ElementId, Point)>) -> Self {
        Self::new_at(moves, SystemTime::now())
    }

    pub fn new_at(moves: Vec<(ElementId, Point)>, timestamp: SystemTime) -> Self {
        let description = format!("Move {}", super::element_count_label(moves.len()));
        Self {
            moves,
            timestamp,
            description,
            previous: HashMap::new(),
        }
    }

    fn target_ids(&self) -> Vec<ElementId> {
        self.moves.iter().map(|(id, _)| *id).collect()
    }

    pub(crate) fn execute(&mut self, document: &Document) -> Document {
        let mut next = document.clone();
        self.previous.clear();
        for &(id, position) in &self.moves {
            if let Some(element) = next.element_mut(id) {
                if element.position != position {
                    self.previous.insert(id, element.position);
                    element.position = position;
                }
            }
        }
        next.touch(self.timestamp);
        next
    }

    pub(crate) fn undo(&self, document: &Document) -> Document {
        let mut next = document.clone();
        for (&id, &position) in &self.previous {
            if let Some(element) = next.element_mut(id) {
                element.position = position;
            }
        }
        next.touch(self.timestamp);
        next
    }

    pub(crate) fn merge(&self, other: &Self) -> Option<Self> {
        if !same_target_set(&self.target_ids(), &other.target_ids())
            || !within_merge_window(self.timestamp, other.timestamp)
        {
            return None;
        }
        // "Self followed by other" over the same ids: the later batch's
        // positions are the ones that stand.
        Some(Self {
            moves: other.moves.clone(),
            timestamp: other.timestamp,
            description: self.description.clone(),
            previous: HashMap::new(),
        })
    }

    pub(crate) fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    pub(crate) fn description(&self) -> &str {
        &self.description
    }
}
