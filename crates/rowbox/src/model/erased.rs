//! Type-erased storage for heterogeneous rows.
//!
//! Items of unrelated concrete types cannot share a `Vec` directly.
//! [`ErasedItem`] owns one item behind a uniform interface: it can be
//! compared, rendered, queried for responder capabilities, and downcast back
//! to the concrete type it was built from.
//!
//! # Equality
//!
//! Two erased items are equal only if they wrap the same concrete type and
//! that type's `PartialEq` says so. The left operand's type is the probe: the
//! right operand is viewed as that type, and the comparison is `false` when
//! the view fails. Comparing across types is never an error.
//!
//! # Example
//!
//! ```
//! use rowbox::model::{ErasedItem, Item, Position, RenderArtifact, RenderKind};
//!
//! #[derive(Debug, PartialEq)]
//! struct Count(i64);
//!
//! impl Item for Count {
//!     type Payload = i64;
//!     fn payload(&self) -> &i64 { &self.0 }
//!     fn render_kind(&self) -> RenderKind { RenderKind::new("count") }
//!     fn render(&self, position: Position) -> RenderArtifact {
//!         RenderArtifact::new(self.render_kind(), position).with_content(self.0)
//!     }
//! }
//!
//! let erased = ErasedItem::new(Count(3));
//! assert_eq!(erased.downcast_ref::<Count>(), Some(&Count(3)));
//! assert!(erased.downcast_ref::<String>().is_none());
//! assert_eq!(erased, ErasedItem::new(Count(3)));
//! ```

use std::any::Any;
use std::fmt;

use super::item::Item;
use super::position::Position;
use super::render::{RenderArtifact, RenderKind};
use super::responder::{
    AppearanceResponder, DeselectionResponder, SelectionResponder, SwipeActionResponder,
};

/// Object-safe view of an item, implemented once per concrete item type.
trait ErasedBox: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn type_name(&self) -> &'static str;

    fn identifier(&self) -> Option<&str>;
    fn payload_any(&self) -> &dyn Any;
    fn is_equal(&self, other: &dyn ErasedBox) -> bool;

    fn render_kind(&self) -> RenderKind;
    fn render(&self, position: Position) -> RenderArtifact;

    fn appearance(&self) -> Option<&dyn AppearanceResponder>;
    fn selection(&self) -> Option<&dyn SelectionResponder>;
    fn deselection(&self) -> Option<&dyn DeselectionResponder>;
    fn swipe_actions(&self) -> Option<&dyn SwipeActionResponder>;
}

struct ConcreteBox<I: Item> {
    item: I,
}

impl<I: Item> ErasedBox for ConcreteBox<I> {
    fn as_any(&self) -> &dyn Any {
        &self.item
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.item
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        Box::new(self.item)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<I>()
    }

    fn identifier(&self) -> Option<&str> {
        self.item.identifier()
    }

    fn payload_any(&self) -> &dyn Any {
        self.item.payload()
    }

    fn is_equal(&self, other: &dyn ErasedBox) -> bool {
        other
            .as_any()
            .downcast_ref::<I>()
            .is_some_and(|other| self.item == *other)
    }

    fn render_kind(&self) -> RenderKind {
        self.item.render_kind()
    }

    fn render(&self, position: Position) -> RenderArtifact {
        self.item.render(position)
    }

    fn appearance(&self) -> Option<&dyn AppearanceResponder> {
        self.item.as_appearance_responder()
    }

    fn selection(&self) -> Option<&dyn SelectionResponder> {
        self.item.as_selection_responder()
    }

    fn deselection(&self) -> Option<&dyn DeselectionResponder> {
        self.item.as_deselection_responder()
    }

    fn swipe_actions(&self) -> Option<&dyn SwipeActionResponder> {
        self.item.as_swipe_action_responder()
    }
}

/// An owned, type-erased [`Item`].
///
/// The concrete type is fixed at construction. `ErasedItem` is deliberately
/// not `Clone`: each box exclusively owns its item, and moving a row between
/// positions moves the box (with any callbacks it carries) intact.
pub struct ErasedItem {
    inner: Box<dyn ErasedBox>,
}

impl ErasedItem {
    /// Wraps `item`.
    pub fn new<I: Item>(item: I) -> Self {
        Self {
            inner: Box::new(ConcreteBox { item }),
        }
    }

    /// The identifier of the wrapped item.
    pub fn identifier(&self) -> Option<&str> {
        self.inner.identifier()
    }

    /// The wrapped item's payload, type-erased.
    pub fn payload_any(&self) -> &dyn Any {
        self.inner.payload_any()
    }

    /// The wrapped item's payload, if it is a `P`.
    pub fn payload<P: Any>(&self) -> Option<&P> {
        self.payload_any().downcast_ref::<P>()
    }

    /// Returns `true` if the wrapped item is exactly a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Borrows the wrapped item as a `T`, or `None` if it is another type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref::<T>()
    }

    /// Mutably borrows the wrapped item as a `T`, or `None` if it is another type.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.inner.as_any_mut().downcast_mut::<T>()
    }

    /// Unwraps the item as a `T`, handing the box back if it is another type.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.inner.into_any().downcast::<T>() {
            Ok(item) => Ok(*item),
            Err(_) => unreachable!("type id was checked before unboxing"),
        }
    }

    /// Compares against a concrete item without boxing it.
    pub fn matches<I: Item>(&self, item: &I) -> bool {
        self.downcast_ref::<I>().is_some_and(|wrapped| wrapped == item)
    }

    /// Name of the wrapped concrete type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }

    /// The widget kind the wrapped item renders into.
    pub fn render_kind(&self) -> RenderKind {
        self.inner.render_kind()
    }

    /// Renders the wrapped item for `position`.
    pub fn render(&self, position: Position) -> RenderArtifact {
        self.inner.render(position)
    }

    /// Appearance callbacks of the wrapped item, if it declares them.
    pub fn as_appearance_responder(&self) -> Option<&dyn AppearanceResponder> {
        self.inner.appearance()
    }

    /// Selection callbacks of the wrapped item, if it declares them.
    pub fn as_selection_responder(&self) -> Option<&dyn SelectionResponder> {
        self.inner.selection()
    }

    /// Deselection callbacks of the wrapped item, if it declares them.
    pub fn as_deselection_responder(&self) -> Option<&dyn DeselectionResponder> {
        self.inner.deselection()
    }

    /// Swipe actions of the wrapped item, if it declares them.
    pub fn as_swipe_action_responder(&self) -> Option<&dyn SwipeActionResponder> {
        self.inner.swipe_actions()
    }
}

impl<I: Item> From<I> for ErasedItem {
    fn from(item: I) -> Self {
        Self::new(item)
    }
}

impl PartialEq for ErasedItem {
    fn eq(&self, other: &Self) -> bool {
        self.inner.is_equal(other.inner.as_ref())
    }
}

impl fmt::Debug for ErasedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedItem")
            .field("type", &self.type_name())
            .field("identifier", &self.identifier())
            .finish()
    }
}

static_assertions::assert_impl_all!(ErasedItem: Send, Sync);
static_assertions::assert_not_impl_any!(ErasedItem: Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::responder::Responders;
    use std::sync::Arc;

    use parking_lot::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Text(String);

    impl Item for Text {
        type Payload = String;

        fn identifier(&self) -> Option<&str> {
            Some(&self.0)
        }

        fn payload(&self) -> &String {
            &self.0
        }

        fn render_kind(&self) -> RenderKind {
            RenderKind::new("text")
        }

        fn render(&self, position: Position) -> RenderArtifact {
            RenderArtifact::new(self.render_kind(), position).with_content(self.0.as_str())
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Number(i64);

    impl Item for Number {
        type Payload = i64;

        fn payload(&self) -> &i64 {
            &self.0
        }

        fn render_kind(&self) -> RenderKind {
            RenderKind::new("number")
        }

        fn render(&self, position: Position) -> RenderArtifact {
            RenderArtifact::new(self.render_kind(), position).with_content(self.0)
        }
    }

    /// Compares by pointer, like a row over shared mutable state.
    #[derive(Clone)]
    struct Shared(Arc<Mutex<bool>>);

    impl PartialEq for Shared {
        fn eq(&self, other: &Self) -> bool {
            Arc::ptr_eq(&self.0, &other.0)
        }
    }

    impl Item for Shared {
        type Payload = Arc<Mutex<bool>>;

        fn payload(&self) -> &Self::Payload {
            &self.0
        }

        fn render_kind(&self) -> RenderKind {
            RenderKind::new("switch")
        }

        fn render(&self, position: Position) -> RenderArtifact {
            RenderArtifact::new(self.render_kind(), position).with_content(*self.0.lock())
        }
    }

    struct Selectable {
        responders: Responders,
    }

    impl PartialEq for Selectable {
        fn eq(&self, _other: &Self) -> bool {
            true
        }
    }

    impl Item for Selectable {
        type Payload = ();

        fn payload(&self) -> &() {
            &()
        }

        fn render_kind(&self) -> RenderKind {
            RenderKind::new("selectable")
        }

        fn render(&self, position: Position) -> RenderArtifact {
            RenderArtifact::new(self.render_kind(), position)
        }

        fn as_selection_responder(&self) -> Option<&dyn SelectionResponder> {
            Some(&self.responders)
        }
    }

    #[test]
    fn test_downcast_round_trip() {
        let erased = ErasedItem::new(Text("a".into()));

        assert!(erased.is::<Text>());
        assert!(!erased.is::<Number>());
        assert_eq!(erased.downcast_ref::<Text>(), Some(&Text("a".into())));
        assert!(erased.downcast_ref::<Number>().is_none());
        assert!(erased.downcast_ref::<String>().is_none());
    }

    #[test]
    fn test_downcast_by_value_returns_box_on_mismatch() {
        let erased = ErasedItem::new(Number(5));

        let erased = erased.downcast::<Text>().unwrap_err();
        assert_eq!(erased.downcast::<Number>().ok(), Some(Number(5)));
    }

    #[test]
    fn test_downcast_mut_edits_in_place() {
        let mut erased = ErasedItem::new(Number(1));
        erased.downcast_mut::<Number>().unwrap().0 = 9;
        assert!(erased.matches(&Number(9)));
        assert!(erased.downcast_mut::<Text>().is_none());
    }

    #[test]
    fn test_cross_type_equality_is_false() {
        let text = ErasedItem::new(Text("1".into()));
        let number = ErasedItem::new(Number(1));

        assert_ne!(text, number);
        assert_ne!(number, text);
    }

    #[test]
    fn test_same_type_equality_delegates() {
        assert_eq!(ErasedItem::new(Number(2)), ErasedItem::new(Number(2)));
        assert_ne!(ErasedItem::new(Number(2)), ErasedItem::new(Number(3)));
    }

    #[test]
    fn test_reference_equality_items() {
        let state = Arc::new(Mutex::new(false));
        let a = ErasedItem::new(Shared(state.clone()));
        let b = ErasedItem::new(Shared(state));
        let c = ErasedItem::new(Shared(Arc::new(Mutex::new(false))));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_payload_and_identifier() {
        let erased = ErasedItem::new(Text("row".into()));
        assert_eq!(erased.identifier(), Some("row"));
        assert_eq!(erased.payload::<String>().map(String::as_str), Some("row"));
        assert!(erased.payload::<i64>().is_none());

        let number = ErasedItem::new(Number(4));
        assert_eq!(number.identifier(), None);
        assert_eq!(number.payload::<i64>(), Some(&4));
    }

    #[test]
    fn test_render_delegates() {
        let erased = ErasedItem::new(Number(12));
        let artifact = erased.render(Position::new(0, 3));

        assert_eq!(artifact.kind, RenderKind::new("number"));
        assert_eq!(artifact.position, Position::new(0, 3));
        assert_eq!(artifact.content.as_int(), Some(12));
        assert_eq!(erased.render_kind(), RenderKind::new("number"));
    }

    #[test]
    fn test_capability_queries() {
        let plain = ErasedItem::new(Number(0));
        assert!(plain.as_selection_responder().is_none());
        assert!(plain.as_appearance_responder().is_none());

        let selectable = ErasedItem::new(Selectable {
            responders: Responders::new().with_will_select(|p| p.with_row(0)),
        });
        let redirect = selectable
            .as_selection_responder()
            .and_then(|r| r.on_will_select())
            .unwrap();
        assert_eq!(redirect(Position::new(1, 4)), Position::new(1, 0));
        assert!(selectable.as_deselection_responder().is_none());
    }

    #[test]
    fn test_debug_names_type() {
        let erased = ErasedItem::new(Text("x".into()));
        let debug = format!("{erased:?}");
        assert!(debug.contains("Text"), "{debug}");
        assert!(debug.contains("\"x\""), "{debug}");
    }
}
