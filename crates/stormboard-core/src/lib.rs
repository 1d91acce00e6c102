//! Stormboard Core Library
//!
//! Document model and undo/redo engine for the Stormboard diagram editor.
//! Rendering, hit-testing, and input handling live in the host application;
//! this crate owns the document value, the reversible commands that mutate
//! it, and the bounded history that replays them.

pub mod command;
pub mod document;
pub mod element;
pub mod geometry;
pub mod history;
pub mod storage;
pub mod style;

pub use command::{
    AlignElementsCommand, BulkStyleCommand, Command, ConnectElementsCommand,
    DeleteElementsCommand, DistributeElementsCommand, InsertElementCommand, MERGE_WINDOW,
    MoveElementsCommand, ReorderDirection, ReorderElementCommand, ReplaceTextCommand,
    StyleUpdateMode,
};
pub use document::{Document, DocumentError, DocumentMetadata};
pub use element::{Connection, ConnectionId, Element, ElementId, ElementKind, StickyKind};
pub use geometry::{AlignMode, Axis};
pub use history::{History, MAX_UNDO_HISTORY};
pub use storage::{MemoryStorage, Storage, StorageError, StorageResult};
pub use style::{
    SerializableColor, StyleError, StyleProperty, StyleRecord, StyleValue, TextAlign, ValueKind,
};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
