//! Alignment of a selection along a shared edge or center.

use super::{same_target_set, within_merge_window};
use crate::document::Document;
use crate::element::{Element, ElementId};
use crate::geometry::{self, AlignMode};
use kurbo::Point;
use std::collections::HashMap;
use std::time::SystemTime;

/// Align the targeted elements, changing only their positions.
///
/// A valid no-op when fewer than two targets exist in the document.
#[derive(Debug, Clone)]
pub struct AlignElementsCommand {
    targets: Vec<ElementId>,
    mode: AlignMode,
    timestamp: SystemTime,
    description: String,
    previous: HashMap<ElementId, Point>,
}

impl AlignElementsCommand {
    pub fn new(targets: Vec<ElementId>, mode: AlignMode) -> Self {
        Self::new_at(targets, mode, SystemTime::now())
    }

    pub fn new_at(targets: Vec<ElementId>, mode: AlignMode, timestamp: SystemTime) -> Self {
        let description = format!(
            "Align {} to {}",
            super::element_count_label(targets.len()),
            mode.label()
        );
        Self {
            targets,
            mode,
            timestamp,
            description,
            previous: HashMap::new(),
        }
    }

    pub(crate) fn execute(&mut self, document: &Document) -> Document {
        let mut next = document.clone();
        self.previous.clear();

        let existing: Vec<ElementId> = self
            .targets
            .iter()
            .copied()
            .filter(|id| document.element(*id).is_some())
            .collect();
        let boxes: Vec<_> = existing
            .iter()
            .filter_map(|id| document.element(*id))
            .map(Element::bounds)
            .collect();

        // align_positions returns the inputs unchanged below two boxes, so
        // the loop body never moves anything in that case.
        let new_positions = geometry::align_positions(&boxes, self.mode);
        for (&id, position) in existing.iter().zip(new_positions) {
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
        if self.mode != other.mode
            || !same_target_set(&self.targets, &other.targets)
            || !within_merge_window(self.timestamp, other.timestamp)
        {
            return None;
        }
        // Aligning an aligned selection is idempotent; keep the later stamp.
        Some(Self {
            targets: self.targets.clone(),
            mode: self.mode,
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
