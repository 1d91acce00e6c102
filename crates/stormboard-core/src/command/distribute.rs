//! Equal-spacing distribution of a selection along an axis.

use super::{same_target_set, within_merge_window};
use crate::document::Document;
use crate::element::{Element, ElementId};
use crate::geometry::{self, Axis};
use kurbo::Point;
use std::collections::HashMap;
use std::time::SystemTime;

/// Distribute the targeted elements at equal center-to-center spacing,
/// holding the two extremes fixed. Changes only positions.
///
/// A valid no-op when fewer than three targets exist in the document.
#[derive(Debug, Clone)]
pub struct DistributeElementsCommand {
    targets: Vec<ElementId>,
    axis: Axis,
    timestamp: SystemTime,
    description: String,
    previous: HashMap<ElementId, Point>,
}

impl DistributeElementsCommand {
    pub fn new(targets: Vec<ElementId>, axis: Axis) -> Self {
        Self::new_at(targets, axis, SystemTime::now())
    }

    pub fn new_at(targets: Vec<ElementId>, axis: Axis, timestamp: SystemTime) -> Self {
        let description = format!(
            "Distribute {} {}",
            super::element_count_label(targets.len()),
            axis.label()
        );
        Self {
            targets,
            axis,
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

        let new_positions = geometry::distribute_positions(&boxes, self.axis);
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
        if self.axis != other.axis
            || !same_target_set(&self.targets, &other.targets)
            || !within_merge_window(self.timestamp, other.timestamp)
        {
            return None;
        }
        Some(Self {
            targets: self.targets.clone(),
            axis: self.axis,
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
