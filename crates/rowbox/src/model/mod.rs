//! The sectioned list data model.
//!
//! This module provides everything a render adapter needs to drive a
//! sectioned list whose rows have different concrete types:
//!
//! - Rows of any type can be stored side by side
//! - Rows are grouped into sections with header and footer metadata
//! - Every structural change is described precisely, so views can animate it
//! - Rows can opt into interaction callbacks
//!
//! # Core Types
//!
//! - `Item`: The trait each row type implements
//! - `ErasedItem`: An owned, type-erased row
//! - `Section`: Ordered rows plus header/footer metadata
//! - `ListModel`: The sections, their mutators and lookups
//! - `ListSignals`/`ChangeSet`: Change notifications
//! - `Position`: A `(section, row)` address
//!
//! # Example
//!
//! ```
//! use rowbox::model::{
//!     Item, ListModel, Position, RenderArtifact, RenderKind, RowAnimation, Section,
//! };
//!
//! #[derive(Debug, PartialEq)]
//! struct Fruit(String);
//!
//! impl Item for Fruit {
//!     type Payload = String;
//!     fn identifier(&self) -> Option<&str> { Some(&self.0) }
//!     fn payload(&self) -> &String { &self.0 }
//!     fn render_kind(&self) -> RenderKind { RenderKind::new("fruit") }
//!     fn render(&self, position: Position) -> RenderArtifact {
//!         RenderArtifact::new(self.render_kind(), position).with_content(self.0.as_str())
//!     }
//! }
//!
//! let model = ListModel::new(vec![
//!     Section::new().with_header_title("Fruit").with_items([Fruit("apple".into())]),
//! ]);
//!
//! // Connect to change notifications
//! model.signals().changed.connect(|changes| {
//!     println!("model changed: {:?}", changes.changes());
//! });
//!
//! model.append_row(Fruit("pear".into()), 0, RowAnimation::Automatic);
//!
//! let artifact = model.render(Position::new(0, 1));
//! assert_eq!(artifact.content.as_string(), Some("pear"));
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  ListModel  │────>│ ListSignals │────>│   Adapter   │
//! │             │     │ (ChangeSet) │     │             │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!       │                                       │
//!       │         ┌─────────────┐               │
//!       └────────>│  Section    │<──────────────┘
//!                 │  ErasedItem │
//!                 │  Position   │
//!                 └─────────────┘
//! ```
//!
//! The adapter queries the model by `Position` and renders each row through
//! its `ErasedItem`. The model emits a `ChangeSet` for every structural
//! change, and the adapter replays it.

mod change;
mod erased;
mod item;
mod list_model;
mod position;
mod render;
mod responder;
mod section;

pub use change::{Change, ChangeSet, ListSignals, RowAnimation};
pub use erased::ErasedItem;
pub use item::Item;
pub use list_model::ListModel;
pub use position::Position;
pub use render::{ItemData, RenderArtifact, RenderKind};
pub use responder::{
    AppearanceResponder, DeselectionResponder, PositionCallback, PositionRedirect, Responders,
    SelectionResponder, SwipeAction, SwipeActionResponder, SwipeActionStyle,
};
pub use section::{
    HeaderFooter, HeaderFooterContent, Height, MIN_RENDERABLE_HEIGHT, ReuseTag, Section,
    SectionEdit, ViewId,
};
