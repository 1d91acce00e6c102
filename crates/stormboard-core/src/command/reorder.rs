//! Z-order changes.

use crate::document::Document;
use crate::element::ElementId;
use std::time::SystemTime;

/// Where to move an element in the stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderDirection {
    ToFront,
    ToBack,
    Forward,
    Backward,
}

impl ReorderDirection {
    fn label(&self) -> &'static str {
        match self {
            ReorderDirection::ToFront => "to front",
            ReorderDirection::ToBack => "to back",
            ReorderDirection::Forward => "forward",
            ReorderDirection::Backward => "backward",
        }
    }
}

/// Move one element within the z-order.
///
/// A no-op when the element is absent or already at the requested extreme.
#[derive(Debug, Clone)]
pub struct ReorderElementCommand {
    target: ElementId,
    direction: ReorderDirection,
    timestamp: SystemTime,
    description: String,
    previous_index: Option<usize>,
}

impl ReorderElementCommand {
    pub fn new(target: ElementId, direction: ReorderDirection) -> Self {
        Self::new_at(target, direction, SystemTime::now())
    }

    pub fn new_at(target: ElementId, direction: ReorderDirection, timestamp: SystemTime) -> Self {
        let description = format!("Move element {}", direction.label());
        Self {
            target,
            direction,
            timestamp,
            description,
            previous_index: None,
        }
    }

    pub(crate) fn execute(&mut self, document: &Document) -> Document {
        let mut next = document.clone();
        self.previous_index = None;
        if let Some(index) = next.z_index(self.target) {
            match self.direction {
                ReorderDirection::ToFront => next.bring_to_front(self.target),
                ReorderDirection::ToBack => next.send_to_back(self.target),
                ReorderDirection::Forward => {
                    next.bring_forward(self.target);
                }
                ReorderDirection::Backward => {
                    next.send_backward(self.target);
                }
            }
            if next.z_index(self.target) != Some(index) {
                self.previous_index = Some(index);
            }
        }
        next.touch(self.timestamp);
        next
    }

    pub(crate) fn undo(&self, document: &Document) -> Document {
        let mut next = document.clone();
        if let Some(index) = self.previous_index {
            if let Some(current) = next.z_index(self.target) {
                next.z_order.remove(current);
                next.z_order.insert(index.min(next.z_order.len()), self.target);
            }
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
