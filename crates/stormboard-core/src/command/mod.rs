//! Reversible document commands.
//!
//! Every user-visible edit is a command: it executes against a document and
//! returns a replacement document, capturing on the way exactly the inverse
//! data it needs to undo itself later. Undo always restores from that
//! captured snapshot, never by recomputation.
//!
//! Commands have no error channel. Absent target ids are skipped, and an
//! operation whose precondition fails (too few elements to align, endpoint
//! missing for a connection) resolves to a valid unchanged document that is
//! still recorded in history.

mod align;
mod delete;
mod distribute;
mod insert;
mod movement;
mod reorder;
mod style;
mod text;

pub use align::AlignElementsCommand;
pub use delete::DeleteElementsCommand;
pub use distribute::DistributeElementsCommand;
pub use insert::{ConnectElementsCommand, InsertElementCommand};
pub use movement::MoveElementsCommand;
pub use reorder::{ReorderElementCommand, ReorderDirection};
pub use style::{BulkStyleCommand, StyleUpdateMode};
pub use text::ReplaceTextCommand;

use crate::document::Document;
use crate::element::ElementId;
use std::collections::HashSet;
use std::time::{Duration, SystemTime};

/// Maximum gap between two commands for them to coalesce into one undo step.
pub const MERGE_WINDOW: Duration = Duration::from_secs(1);

/// True when `later` falls within the merge window after `earlier`.
pub(crate) fn within_merge_window(earlier: SystemTime, later: SystemTime) -> bool {
    match later.duration_since(earlier) {
        Ok(delta) => delta <= MERGE_WINDOW,
        Err(_) => false,
    }
}

/// True when both slices name the same set of elements.
pub(crate) fn same_target_set(a: &[ElementId], b: &[ElementId]) -> bool {
    let a: HashSet<ElementId> = a.iter().copied().collect();
    let b: HashSet<ElementId> = b.iter().copied().collect();
    a == b
}

/// "1 element" / "n elements", for command descriptions.
pub(crate) fn element_count_label(count: usize) -> String {
    if count == 1 {
        "1 element".to_string()
    } else {
        format!("{count} elements")
    }
}

/// A reversible, replayable unit of document mutation.
#[derive(Debug, Clone)]
pub enum Command {
    BulkStyle(BulkStyleCommand),
    AlignElements(AlignElementsCommand),
    DistributeElements(DistributeElementsCommand),
    MoveElements(MoveElementsCommand),
    DeleteElements(DeleteElementsCommand),
    InsertElement(InsertElementCommand),
    ConnectElements(ConnectElementsCommand),
    ReorderElement(ReorderElementCommand),
    ReplaceText(ReplaceTextCommand),
}

impl Command {
    /// Apply the command, returning the replacement document.
    ///
    /// Captures the inverse snapshot for the entities actually changed, so a
    /// later [`Command::undo`] restores their exact prior values.
    pub fn execute(&mut self, document: &Document) -> Document {
        match self {
            Command::BulkStyle(c) => c.execute(document),
            Command::AlignElements(c) => c.execute(document),
            Command::DistributeElements(c) => c.execute(document),
            Command::MoveElements(c) => c.execute(document),
            Command::DeleteElements(c) => c.execute(document),
            Command::InsertElement(c) => c.execute(document),
            Command::ConnectElements(c) => c.execute(document),
            Command::ReorderElement(c) => c.execute(document),
            Command::ReplaceText(c) => c.execute(document),
        }
    }

    /// Restore every field the last `execute` changed, from the captured
    /// snapshot.
    pub fn undo(&self, document: &Document) -> Document {
        match self {
            Command::BulkStyle(c) => c.undo(document),
            Command::AlignElements(c) => c.undo(document),
            Command::DistributeElements(c) => c.undo(document),
            Command::MoveElements(c) => c.undo(document),
            Command::DeleteElements(c) => c.undo(document),
            Command::InsertElement(c) => c.undo(document),
            Command::ConnectElements(c) => c.undo(document),
            Command::ReorderElement(c) => c.undo(document),
            Command::ReplaceText(c) => c.undo(document),
        }
    }

    /// Combine with a later command when legal, yielding a single command
    /// equivalent to "self followed by other".
    ///
    /// Legal only for the same command kind over the same target set with
    /// matching operation parameters, and when `other` was created within
    /// [`MERGE_WINDOW`] after `self`. Structural edits and text replacement
    /// never merge.
    pub fn merge(&self, other: &Command) -> Option<Command> {
        match (self, other) {
            (Command::BulkStyle(a), Command::BulkStyle(b)) => {
                a.merge(b).map(Command::BulkStyle)
            }
            (Command::AlignElements(a), Command::AlignElements(b)) => {
                a.merge(b).map(Command::AlignElements)
            }
            (Command::DistributeElements(a), Command::DistributeElements(b)) => {
                a.merge(b).map(Command::DistributeElements)
            }
            (Command::MoveElements(a), Command::MoveElements(b)) => {
                a.merge(b).map(Command::MoveElements)
            }
            _ => None,
        }
    }

    /// Creation time, fixed at construction.
    pub fn timestamp(&self) -> SystemTime {
        match self {
            Command::BulkStyle(c) => c.timestamp(),
            Command::AlignElements(c) => c.timestamp(),
            Command::DistributeElements(c) => c.timestamp(),
            Command::MoveElements(c) => c.timestamp(),
            Command::DeleteElements(c) => c.timestamp(),
            Command::InsertElement(c) => c.timestamp(),
            Command::ConnectElements(c) => c.timestamp(),
            Command::ReorderElement(c) => c.timestamp(),
            Command::ReplaceText(c) => c.timestamp(),
        }
    }

    /// Human-readable description, e.g. for an "Undo …" menu entry.
    pub fn description(&self) -> &str {
        match self {
            Command::BulkStyle(c) => c.description(),
            Command::AlignElements(c) => c.description(),
            Command::DistributeElements(c) => c.description(),
            Command::MoveElements(c) => c.description(),
            Command::DeleteElements(c) => c.description(),
            Command::InsertElement(c) => c.description(),
            Command::ConnectElements(c) => c.description(),
            Command::ReorderElement(c) => c.description(),
            Command::ReplaceText(c) => c.description(),
        }
    }
}

impl From<BulkStyleCommand> for Command {
    fn from(c: BulkStyleCommand) -> Self {
        Command::BulkStyle(c)
    }
}

impl From<AlignElementsCommand> for Command {
    fn from(c: AlignElementsCommand) -> Self {
        Command::AlignElements(c)
    }
}

impl From<DistributeElementsCommand> for Command {
    fn from(c: DistributeElementsCommand) -> Self {
        Command::DistributeElements(c)
    }
}

impl From<MoveElementsCommand> for Command {
    fn from(c: MoveElementsCommand) -> Self {
        Command::MoveElements(c)
    }
}

impl From<DeleteElementsCommand> for Command {
    fn from(c: DeleteElementsCommand) -> Self {
        Command::DeleteElements(c)
    }
}

impl From<InsertElementCommand> for Command {
    fn from(c: InsertElementCommand) -> Self {
        Command::InsertElement(c)
    }
}

impl From<ConnectElementsCommand> for Command {
    fn from(c: ConnectElementsCommand) -> Self {
        Command::ConnectElements(c)
    }
}

impl From<ReorderElementCommand> for Command {
    fn from(c: ReorderElementCommand) -> Self {
        Command::ReorderElement(c)
    }
}

impl From<ReplaceTextCommand> for Command {
    fn from(c: ReplaceTextCommand) -> Self {
        Command::ReplaceText(c)
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use crate::document::Document;
    use crate::element::{Element, ElementId, ElementKind};
    use kurbo::{Point, Size};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    /// Deterministic timestamp for merge-window tests.
    pub fn at(seconds: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(seconds)
    }

    /// Timestamp with sub-second offset.
    pub fn at_millis(millis: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(millis)
    }

    /// A document of same-size rectangles at the given positions.
    /// Returns the document and the element ids in argument order.
    pub fn rect_document(positions: &[(f64, f64)]) -> (Document, Vec<ElementId>) {
        let mut doc = Document::new();
        let mut ids = Vec::new();
        for &(x, y) in positions {
            let elem = Element::new(
                ElementKind::Rectangle,
                Point::new(x, y),
                Size::new(20.0, 20.0),
            );
            ids.push(elem.id);
            doc.add_element(elem);
        }
        (doc, ids)
    }
}
