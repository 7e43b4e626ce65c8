//! Glob-importable set of the types most users of rowbox touch.
//!
//! ```
//! use rowbox::prelude::*;
//! ```
//!
//! Brings in signals, the row trait and its box, sections, the model itself,
//! change descriptions and the responder traits.

pub use crate::config::ListConfig;
pub use crate::model::{
    AppearanceResponder, Change, ChangeSet, DeselectionResponder, ErasedItem, HeaderFooter,
    Height, Item, ItemData, ListModel, Position, RenderArtifact, RenderKind, Responders,
    RowAnimation, Section, SelectionResponder, SwipeAction, SwipeActionResponder,
};
pub use crate::signal::{ConnectionId, Signal};
