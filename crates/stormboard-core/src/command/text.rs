//! Find/replace over element text.

use crate::document::Document;
use crate::element::ElementId;
use std::collections::HashMap;
use std::time::SystemTime;

/// Replace every occurrence of a needle in the text of the targeted elements
/// (all elements when no targets are given).
///
/// Elements without text, or whose text does not contain the needle, are
/// untouched. An empty needle is a no-op.
#[derive(Debug, Clone)]
pub struct ReplaceTextCommand {
    targets: Option<Vec<ElementId>>,
    find: String,
    replacement: String,
    timestamp: SystemTime,
    description: String,
    previous: HashMap<ElementId, String>,
}

impl ReplaceTextCommand {
    pub fn new(targets: Option<Vec<ElementId>>, find: String, replacement: String) -> Self {
        Self::new_at(targets, find, replacement, SystemTime::now())
    }

    pub fn new_at(
        targets: Option<Vec<ElementId>>,
        find: String,
        replacement: String,
        timestamp: SystemTime,
    ) -> Self {
        let description = format!("Replace \"{find}\" with \"{replacement}\"");
        Self {
            targets,
            find,
            replacement,
            timestamp,
            description,
            previous: HashMap::new(),
        }
    }

    fn target_ids(&self, document: &Document) -> Vec<ElementId> {
        match &self.targets {
            Some(ids) => ids.clone(),
            None => document.z_order.clone(),
        }
    }

    pub(crate) fn execute(&mut self, document: &Document) -> Document {
        let mut next = document.clone();
        self.previous.clear();

        if !self.find.is_empty() {
            for id in self.target_ids(document) {
                let Some(element) = next.element_mut(id) else {
                    continue;
                };
                let Some(text) = &element.text else {
                    continue;
                };
                if text.contains(&self.find) {
                    let replaced = text.replace(&self.find, &self.replacement);
                    self.previous.insert(id, text.clone());
                    element.text = Some(replaced);
                }
            }
        }

        next.touch(self.timestamp);
        next
    }

    pub(crate) fn undo(&self, document: &Document) -> Document {
        let mut next = document.clone();
        for (&id, text) in &self.previous {
            if let Some(element) = next.element_mut(id) {
                element.text = Some(text.clone());
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::test_fixtures::{at, rect_document};

    fn with_texts(texts: &[Option<&str>]) -> (Document, Vec<ElementId>) {
        let positions: Vec<(f64, f64)> =
            (0..texts.len()).map(|i| (i as f64 * 30.0, 0.0)).collect();
        let (mut doc, ids) = rect_document(&positions);
        for (&id, text) in ids.iter().zip(texts) {
            if let Some(text) = text {
                doc.element_mut(id).unwrap().text = Some(text.to_string());
            }
        }
        (doc, ids)
    }

    #[test]
    fn test_replace_all_elements() {
        let (doc, ids) = with_texts(&[Some("Order placed"), Some("Order shipped"), None]);
        let mut cmd = ReplaceTextCommand::new_at(
            None,
            "Order".to_string(),
            "Invoice".to_string(),
            at(100),
        );

        let replaced = cmd.execute(&doc);
        assert_eq!(
            replaced.element(ids[0]).unwrap().text.as_deref(),
            Some("Invoice placed")
        );
        assert_eq!(
            replaced.element(ids[1]).unwrap().text.as_deref(),
            Some("Invoice shipped")
        );
        assert!(replaced.element(ids[2]).unwrap().text.is_none());
    }

    #[test]
    fn test_replace_targeted_subset_and_undo() {
        let (doc, ids) = with_texts(&[Some("Order placed"), Some("Order shipped")]);
        let mut cmd = ReplaceTextCommand::new_at(
            Some(vec![ids[0]]),
            "Order".to_string(),
            "Invoice".to_string(),
            at(100),
        );

        let replaced = cmd.execute(&doc);
        assert_eq!(
            replaced.element(ids[1]).unwrap().text.as_deref(),
            Some("Order shipped")
        );

        let restored = cmd.undo(&replaced);
        assert!(restored.content_eq(&doc));
    }

    #[test]
    fn test_empty_needle_is_noop() {
        let (doc, _) = with_texts(&[Some("Order placed")]);
        let mut cmd =
            ReplaceTextCommand::new_at(None, String::new(), "x".to_string(), at(100));

        let out = cmd.execute(&doc);
        assert!(out.content_eq(&doc));
    }

    #[test]
    fn test_multiple_occurrences_replaced_and_restored() {
        let (doc, ids) = with_texts(&[Some("ha ha ha")]);
        let mut cmd =
            ReplaceTextCommand::new_at(None, "ha".to_string(), "ho".to_string(), at(100));

        let replaced = cmd.execute(&doc);
        assert_eq!(
            replaced.element(ids[0]).unwrap().text.as_deref(),
            Some("ho ho ho")
        );

        let restored = cmd.undo(&replaced);
        assert_eq!(
            restored.element(ids[0]).unwrap().text.as_deref(),
            Some("ha ha ha")
        );
    }
}
