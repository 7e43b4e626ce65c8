//! The row contract.
//!
//! An [`Item`] is one logical row: a payload, an optional identifier, value
//! equality, and the knowledge of how to render itself. Items of different
//! concrete types live side by side in a section once wrapped in an
//! [`ErasedItem`](super::ErasedItem).

use std::any::Any;

use super::position::Position;
use super::render::{RenderArtifact, RenderKind};
use super::responder::{
    AppearanceResponder, DeselectionResponder, SelectionResponder, SwipeActionResponder,
};

/// A row that can be stored in a [`Section`](super::Section).
///
/// Equality comes from `PartialEq`. Most items compare their payload by value;
/// items whose payload is shared mutable state (an `Arc<Mutex<_>>`, say)
/// usually compare by pointer instead.
///
/// The `as_*` methods are capability queries. Return `Some(self)` from the
/// ones the item supports; the defaults declare no capability.
///
/// # Example
///
/// ```
/// use rowbox::model::{Item, ItemData, Position, RenderArtifact, RenderKind};
///
/// #[derive(Debug, PartialEq)]
/// struct TitleRow {
///     id: Option<String>,
///     title: String,
/// }
///
/// impl Item for TitleRow {
///     type Payload = String;
///
///     fn identifier(&self) -> Option<&str> {
///         self.id.as_deref()
///     }
///
///     fn payload(&self) -> &String {
///         &self.title
///     }
///
///     fn render_kind(&self) -> RenderKind {
///         RenderKind::new("title")
///     }
///
///     fn render(&self, position: Position) -> RenderArtifact {
///         RenderArtifact::new(self.render_kind(), position)
///             .with_content(ItemData::from(self.title.as_str()))
///     }
/// }
/// ```
pub trait Item: PartialEq + Send + Sync + 'static {
    /// The domain value the row represents.
    type Payload: Any + Send + Sync;

    /// Stable identifier for identity-based lookup. Uniqueness is not checked.
    fn identifier(&self) -> Option<&str> {
        None
    }

    /// Returns the payload.
    fn payload(&self) -> &Self::Payload;

    /// The widget kind this row renders into.
    fn render_kind(&self) -> RenderKind;

    /// Produces the artifact for the row at `position`.
    fn render(&self, position: Position) -> RenderArtifact;

    /// Appearance callbacks, if the row has any.
    fn as_appearance_responder(&self) -> Option<&dyn AppearanceResponder> {
        None
    }

    /// Selection callbacks, if the row has any.
    fn as_selection_responder(&self) -> Option<&dyn SelectionResponder> {
        None
    }

    /// Deselection callbacks, if the row has any.
    fn as_deselection_responder(&self) -> Option<&dyn DeselectionResponder> {
        None
    }

    /// Swipe actions, if the row has any.
    fn as_swipe_action_responder(&self) -> Option<&dyn SwipeActionResponder> {
        None
    }
}
