//! Bulk style updates across a selection.

use super::{same_target_set, within_merge_window};
use crate::document::Document;
use crate::element::ElementId;
use crate::style::{StyleProperty, StyleRecord, StyleValue, ValueKind};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::SystemTime;

/// How update values combine with an element's current style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleUpdateMode {
    /// Overwrite with the literal value.
    Replace,
    /// Multiply the current numeric value (`new = old * factor`).
    Relative,
    /// Add to the current numeric value (`new = old + delta`).
    Increment,
}

/// Per-element inverse data: the prior value of each property actually
/// changed, `None` when the property was previously unset.
type StyleSnapshot = BTreeMap<StyleProperty, Option<StyleValue>>;

/// Apply a partial style update to a set of elements.
///
/// An optional selected-property subset restricts the update to those names
/// even when the update record carries more. Missing target ids are skipped.
#[derive(Debug, Clone)]
pub struct BulkStyleCommand {
    targets: Vec<ElementId>,
    update: StyleRecord,
    selected: Option<BTreeSet<StyleProperty>>,
    mode: StyleUpdateMode,
    timestamp: SystemTime,
    description: String,
    previous: HashMap<ElementId, StyleSnapshot>,
}

impl BulkStyleCommand {
    pub fn new(targets: Vec<ElementId>, update: StyleRecord, mode: StyleUpdateMode) -> Self {
        Self::new_at(targets, update, mode, SystemTime::now())
    }

    pub fn new_at(
        targets: Vec<ElementId>,
        update: StyleRecord,
        mode: StyleUpdateMode,
        timestamp: SystemTime,
    ) -> Self {
        let description = format!("Restyle {}", super::element_count_label(targets.len()));
        Self {
            targets,
            update,
            selected: None,
            mode,
            timestamp,
            description,
            previous: HashMap::new(),
        }
    }

    /// Restrict the update to a subset of the record's properties.
    pub fn selected_properties(
        mut self,
        properties: impl IntoIterator<Item = StyleProperty>,
    ) -> Self {
        self.selected = Some(properties.into_iter().collect());
        self
    }

    fn applies_to(&self, property: StyleProperty) -> bool {
        self.selected
            .as_ref()
            .is_none_or(|selected| selected.contains(&property))
    }

    /// The value `property` should take on an element currently at `old`,
    /// or `None` when the pair is inert under this mode.
    fn updated_value(&self, old: Option<&StyleValue>, value: &StyleValue) -> Option<StyleValue> {
        match self.mode {
            StyleUpdateMode::Replace => Some(value.clone()),
            StyleUpdateMode::Relative => {
                let current = old.and_then(StyleValue::as_number)?;
                Some(StyleValue::Number(current * value.as_number()?))
            }
            StyleUpdateMode::Increment => {
                let current = old.and_then(StyleValue::as_number)?;
                Some(StyleValue::Number(current + value.as_number()?))
            }
        }
    }

    pub(crate) fn execute(&mut self, document: &Document) -> Document {
        let mut next = document.clone();
        self.previous.clear();

        if self.mode != StyleUpdateMode::Replace {
            for (property, value) in self.update.iter() {
                if self.applies_to(property) && value.kind() != ValueKind::Number {
                    log::warn!(
                        "non-numeric update for {property:?} is inert in {:?} mode",
                        self.mode
                    );
                }
            }
        }

        for &id in &self.targets {
            let Some(element) = next.element_mut(id) else {
                continue;
            };
            let mut captured = StyleSnapshot::new();
            for (property, value) in self.update.iter() {
                if !self.applies_to(property) {
                    continue;
                }
                let old = element.style.get(property).cloned();
                let Some(new) = self.updated_value(old.as_ref(), value) else {
                    continue;
                };
                if old.as_ref() != Some(&new) {
                    element.style.set_unchecked(property, new);
                    captured.insert(property, old);
                }
            }
            if !captured.is_empty() {
                self.previous.insert(id, captured);
            }
        }

        next.touch(self.timestamp);
        next
    }

    pub(crate) fn undo(&self, document: &Document) -> Document {
        let mut next = document.clone();
        for (id, captured) in &self.previous {
            let Some(element) = next.element_mut(*id) else {
                continue;
            };
            for (property, old) in captured {
                match old {
                    Some(value) => element.style.set_unchecked(*property, value.clone()),
                    None => {
                        element.style.remove(*property);
                    }
                }
            }
        }
        next.touch(self.timestamp);
        next
    }

    pub(crate) fn merge(&self, other: &Self) -> Option<Self> {
        if self.mode != other.mode
            || self.selected != other.selected
            || !same_target_set(&self.targets, &other.targets)
            || !within_merge_window(self.timestamp, other.timestamp)
        {
            return None;
        }

        let mut update = self.update.clone();
        for (property, value) in other.update.iter() {
            let combined = match self.mode {
                StyleUpdateMode::Replace => value.clone(),
                StyleUpdateMode::Relative => {
                    match (
                        update.get(property).and_then(StyleValue::as_number),
                        value.as_number(),
                    ) {
                        (Some(a), Some(b)) => StyleValue::Number(a * b),
                        _ => value.clone(),
                    }
                }
                StyleUpdateMode::Increment => {
                    match (
                        update.get(property).and_then(StyleValue::as_number),
                        value.as_number(),
                    ) {
                        (Some(a), Some(b)) => StyleValue::Number(a + b),
                        _ => value.clone(),
                    }
                }
            };
            update.set_unchecked(property, combined);
        }

        Some(Self {
            targets: self.targets.clone(),
            update,
            selected: self.selected.clone(),
            mode: self.mode,
            // Later timestamp keeps an interactive stream coalescing.
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
