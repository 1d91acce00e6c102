//! Bounded undo/redo history over document commands.

use crate::command::Command;
use crate::document::Document;

/// Maximum number of undo steps to keep.
pub const MAX_UNDO_HISTORY: usize = 50;

/// Undo/redo stack pair.
///
/// The history owns the commands but not the document: `apply`, `undo`, and
/// `redo` take the current document and return the replacement, which the
/// caller stores as the new current state. Past the depth bound the oldest
/// entry is evicted and its edit becomes permanently un-undoable; that is the
/// intended memory bound, not a failure.
#[derive(Debug)]
pub struct History {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create an empty history with the default depth bound.
    pub fn new() -> Self {
        Self::with_depth(MAX_UNDO_HISTORY)
    }

    /// Create an empty history with a custom depth bound.
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth.min(MAX_UNDO_HISTORY)),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Execute a command and record it, returning the replacement document.
    ///
    /// When the command merges with the top of the undo stack, the merged
    /// command replaces the top and is executed against the document state
    /// from before the original top ran, so the result is identical to never
    /// having applied the two halves separately. Either way the redo stack
    /// is cleared.
    pub fn apply(&mut self, mut command: Command, document: &Document) -> Document {
        if let Some(top) = self.undo_stack.pop() {
            if let Some(mut merged) = top.merge(&command) {
                log::debug!(
                    "merging '{}' into '{}'",
                    command.description(),
                    top.description()
                );
                let before = top.undo(document);
                let next = merged.execute(&before);
                self.undo_stack.push(merged);
                self.redo_stack.clear();
                return next;
            }
            self.undo_stack.push(top);
        }

        log::debug!("apply '{}'", command.description());
        let next = command.execute(document);
        self.undo_stack.push(command);
        if self.undo_stack.len() > self.max_depth {
            log::trace!("history full, evicting oldest entry");
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
        next
    }

    /// Undo the most recent command, or `None` when there is nothing to undo.
    pub fn undo(&mut self, document: &Document) -> Option<Document> {
        let command = self.undo_stack.pop()?;
        log::debug!("undo '{}'", command.description());
        let restored = command.undo(document);
        self.redo_stack.push(command);
        Some(restored)
    }

    /// Re-apply the most recently undone command, or `None` when there is
    /// nothing to redo.
    pub fn redo(&mut self, document: &Document) -> Option<Document> {
        let mut command = self.redo_stack.pop()?;
        log::debug!("redo '{}'", command.description());
        let next = command.execute(document);
        self.undo_stack.push(command);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        Some(next)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Description of the command the next undo would revert.
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(Command::description)
    }

    /// Description of the command the next redo would re-apply.
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(Command::description)
    }

    /// The number of undoable commands.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::test_fixtures::{at, at_millis, rect_document};
    use crate::command::{BulkStyleCommand, MoveElementsCommand, StyleUpdateMode};
    use crate::style::{StyleProperty, StyleRecord, StyleValue};
    use kurbo::Point;

    fn move_to(ids: &[crate::element::ElementId], x: f64, seconds: u64) -> Command {
        MoveElementsCommand::new_at(
            ids.iter().map(|&id| (id, Point::new(x, 0.0))).collect(),
            at(seconds),
        )
        .into()
    }

    #[test]
    fn test_apply_undo_redo_roundtrip() {
        let (doc, ids) = rect_document(&[(0.0, 0.0)]);
        let mut history = History::new();

        let moved = history.apply(move_to(&ids, 50.0, 100), &doc);
        assert_eq!(moved.element(ids[0]).unwrap().position, Point::new(50.0, 0.0));
        assert!(history.can_undo());
        assert!(!history.can_redo());

        let restored = history.undo(&moved).unwrap();
        assert!(restored.content_eq(&doc));
        assert!(!history.can_undo());
        assert!(history.can_redo());

        let again = history.redo(&restored).unwrap();
        assert!(again.content_eq(&moved));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_empty_are_noops() {
        let (doc, _) = rect_document(&[(0.0, 0.0)]);
        let mut history = History::new();
        assert!(history.undo(&doc).is_none());
        assert!(history.redo(&doc).is_none());
    }

    #[test]
    fn test_apply_clears_redo() {
        let (doc, ids) = rect_document(&[(0.0, 0.0)]);
        let mut history = History::new();

        let step1 = history.apply(move_to(&ids, 10.0, 100), &doc);
        let step0 = history.undo(&step1).unwrap();
        assert!(history.can_redo());

        // Far outside the merge window, so this cannot merge away.
        let _ = history.apply(move_to(&ids, 99.0, 500), &step0);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_history_bound_evicts_oldest() {
        let (mut doc, ids) = rect_document(&[(0.0, 0.0)]);
        let mut history = History::new();

        // 55 non-mergeable commands (spaced far apart in time).
        for i in 0..55u64 {
            doc = history.apply(move_to(&ids, i as f64, i * 10), &doc);
        }
        assert_eq!(history.undo_depth(), MAX_UNDO_HISTORY);

        let mut undo_count = 0;
        while let Some(previous) = history.undo(&doc) {
            doc = previous;
            undo_count += 1;
        }
        assert_eq!(undo_count, MAX_UNDO_HISTORY);
        assert!(!history.can_undo());
        // The earliest surviving state is the 5th move, not the origin.
        assert_eq!(doc.element(ids[0]).unwrap().position, Point::new(4.0, 0.0));
    }

    #[test]
    fn test_merge_replaces_top_without_double_apply() {
        let (doc, ids) = rect_document(&[(0.0, 0.0)]);
        let mut history = History::new();

        let update = |opacity: f64, millis: u64| -> Command {
            BulkStyleCommand::new_at(
                ids.clone(),
                StyleRecord::new().with(StyleProperty::Opacity, opacity),
                StyleUpdateMode::Replace,
                at_millis(millis),
            )
            .into()
        };

        let step1 = history.apply(update(0.8, 1_000), &doc);
        let step2 = history.apply(update(0.5, 1_400), &step1);
        assert_eq!(history.undo_depth(), 1);
        assert_eq!(
            step2
                .element(ids[0])
                .unwrap()
                .style
                .get(StyleProperty::Opacity),
            Some(&StyleValue::Number(0.5))
        );

        // One undo returns to the state before the first half-edit.
        let restored = history.undo(&step2).unwrap();
        assert!(restored.content_eq(&doc));
    }

    #[test]
    fn test_merged_increment_accumulates_once() {
        let (doc, ids) = rect_document(&[(0.0, 0.0)]);
        let mut history = History::new();

        let bump = |millis: u64| -> Command {
            BulkStyleCommand::new_at(
                ids.clone(),
                StyleRecord::new().with(StyleProperty::StrokeWidth, 1.0),
                StyleUpdateMode::Increment,
                at_millis(millis),
            )
            .into()
        };

        let step1 = history.apply(bump(1_000), &doc);
        let step2 = history.apply(bump(1_300), &step1);
        let step3 = history.apply(bump(1_600), &step2);
        assert_eq!(history.undo_depth(), 1);
        // Default stroke width 2.0 plus three unit increments, not six.
        assert_eq!(
            step3
                .element(ids[0])
                .unwrap()
                .style
                .get(StyleProperty::StrokeWidth),
            Some(&StyleValue::Number(5.0))
        );

        let restored = history.undo(&step3).unwrap();
        assert!(restored.content_eq(&doc));
    }

    #[test]
    fn test_commands_outside_window_stack_separately() {
        let (doc, ids) = rect_document(&[(0.0, 0.0)]);
        let mut history = History::new();

        let step1 = history.apply(move_to(&ids, 10.0, 100), &doc);
        let step2 = history.apply(move_to(&ids, 20.0, 200), &step1);
        assert_eq!(history.undo_depth(), 2);

        let mid = history.undo(&step2).unwrap();
        assert!(mid.content_eq(&step1));
        let start = history.undo(&mid).unwrap();
        assert!(start.content_eq(&doc));
    }

    #[test]
    fn test_clear_drops_both_stacks() {
        let (doc, ids) = rect_document(&[(0.0, 0.0)]);
        let mut history = History::new();

        let step1 = history.apply(move_to(&ids, 10.0, 100), &doc);
        history.undo(&step1);
        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_descriptions_surface_for_menus() {
        let (doc, ids) = rect_document(&[(0.0, 0.0)]);
        let mut history = History::new();

        let step1 = history.apply(move_to(&ids, 10.0, 100), &doc);
        assert_eq!(history.undo_description(), Some("Move 1 element"));
        history.undo(&step1);
        assert_eq!(history.redo_description(), Some("Move 1 element"));
    }
}
