//! Per-item interaction responders.
//!
//! Items opt into interaction callbacks by implementing one or more of the
//! capability traits below and returning themselves from the matching
//! `Item::as_*` query. When the adapter reports an interaction at a position,
//! [`ListModel`](super::ListModel) looks up the item there, asks for the
//! capability, and invokes the callback if one is set. A missing capability or
//! an unset callback is a silent no-op.
//!
//! Callbacks are handed out as shared closures so the model can release its
//! lock before running them; a callback is free to mutate the model.
//!
//! Most items do not need to implement the traits by hand: embed a
//! [`Responders`] value and forward to it.
//!
//! # Example
//!
//! ```
//! use rowbox::model::{Position, Responders, SelectionResponder};
//!
//! let responders = Responders::new()
//!     .with_will_select(|p: Position| p.with_row(0))
//!     .with_did_select(|p| println!("selected {p}"));
//!
//! let redirect = responders.on_will_select().unwrap();
//! assert_eq!(redirect(Position::new(0, 3)), Position::new(0, 0));
//! ```

use std::fmt;
use std::sync::Arc;

use super::position::Position;

/// A callback notified about a position.
pub type PositionCallback = Arc<dyn Fn(Position) + Send + Sync>;

/// A callback that receives a candidate position and returns the position to
/// actually use.
pub type PositionRedirect = Arc<dyn Fn(Position) -> Position + Send + Sync>;

/// Responds to a row coming on or going off screen.
pub trait AppearanceResponder {
    /// Called before the row at the position becomes visible.
    fn on_will_appear(&self) -> Option<PositionCallback>;

    /// Called after the row at the position became visible.
    fn on_did_appear(&self) -> Option<PositionCallback>;
}

/// Responds to a row being selected.
pub trait SelectionResponder {
    /// May redirect a selection to another position.
    fn on_will_select(&self) -> Option<PositionRedirect>;

    /// Called after the row was selected.
    fn on_did_select(&self) -> Option<PositionCallback>;
}

/// Responds to a row being deselected.
pub trait DeselectionResponder {
    /// May redirect a deselection to another position.
    fn on_will_deselect(&self) -> Option<PositionRedirect>;

    /// Called after the row was deselected.
    fn on_did_deselect(&self) -> Option<PositionCallback>;
}

/// Visual weight of a swipe action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwipeActionStyle {
    /// A regular action.
    #[default]
    Normal,
    /// An action that destroys data (usually drawn in red).
    Destructive,
}

/// A contextual action revealed by swiping a row.
#[derive(Clone)]
pub struct SwipeAction {
    /// Button title.
    pub title: String,
    /// Visual style.
    pub style: SwipeActionStyle,
    /// Invoked with the row's position when the action is triggered.
    pub handler: PositionCallback,
}

impl SwipeAction {
    /// Creates a normal swipe action.
    pub fn new<F>(title: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Position) + Send + Sync + 'static,
    {
        Self {
            title: title.into(),
            style: SwipeActionStyle::Normal,
            handler: Arc::new(handler),
        }
    }

    /// Creates a destructive swipe action.
    pub fn destructive<F>(title: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Position) + Send + Sync + 'static,
    {
        Self {
            style: SwipeActionStyle::Destructive,
            ..Self::new(title, handler)
        }
    }

    /// Runs the handler for `position`.
    pub fn trigger(&self, position: Position) {
        (self.handler)(position);
    }
}

impl fmt::Debug for SwipeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeAction")
            .field("title", &self.title)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

/// Provides swipe actions on either edge of a row.
pub trait SwipeActionResponder {
    /// Actions revealed by swiping from the leading edge.
    fn leading_swipe_actions(&self) -> Vec<SwipeAction> {
        Vec::new()
    }

    /// Actions revealed by swiping from the trailing edge.
    fn trailing_swipe_actions(&self) -> Vec<SwipeAction> {
        Vec::new()
    }
}

/// A bundle of optional interaction callbacks.
///
/// Implements [`AppearanceResponder`], [`SelectionResponder`] and
/// [`DeselectionResponder`]. Every slot starts unset.
#[derive(Clone, Default)]
pub struct Responders {
    will_appear: Option<PositionCallback>,
    did_appear: Option<PositionCallback>,
    will_select: Option<PositionRedirect>,
    did_select: Option<PositionCallback>,
    will_deselect: Option<PositionRedirect>,
    did_deselect: Option<PositionCallback>,
}

impl Responders {
    /// Creates an empty set of callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the will-appear callback.
    pub fn with_will_appear<F>(mut self, f: F) -> Self
    where
        F: Fn(Position) + Send + Sync + 'static,
    {
        self.will_appear = Some(Arc::new(f));
        self
    }

    /// Sets the did-appear callback.
    pub fn with_did_appear<F>(mut self, f: F) -> Self
    where
        F: Fn(Position) + Send + Sync + 'static,
    {
        self.did_appear = Some(Arc::new(f));
        self
    }

    /// Sets the will-select redirect.
    pub fn with_will_select<F>(mut self, f: F) -> Self
    where
        F: Fn(Position) -> Position + Send + Sync + 'static,
    {
        self.will_select = Some(Arc::new(f));
        self
    }

    /// Sets the did-select callback.
    pub fn with_did_select<F>(mut self, f: F) -> Self
    where
        F: Fn(Position) + Send + Sync + 'static,
    {
        self.did_select = Some(Arc::new(f));
        self
    }

    /// Sets the will-deselect redirect.
    pub fn with_will_deselect<F>(mut self, f: F) -> Self
    where
        F: Fn(Position) -> Position + Send + Sync + 'static,
    {
        self.will_deselect = Some(Arc::new(f));
        self
    }

    /// Sets the did-deselect callback.
    pub fn with_did_deselect<F>(mut self, f: F) -> Self
    where
        F: Fn(Position) + Send + Sync + 'static,
    {
        self.did_deselect = Some(Arc::new(f));
        self
    }

    /// Returns `true` if no callback is set.
    pub fn is_empty(&self) -> bool {
        self.will_appear.is_none()
            && self.did_appear.is_none()
            && self.will_select.is_none()
            && self.did_select.is_none()
            && self.will_deselect.is_none()
            && self.did_deselect.is_none()
    }
}

impl fmt::Debug for Responders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responders")
            .field("will_appear", &self.will_appear.is_some())
            .field("did_appear", &self.did_appear.is_some())
            .field("will_select", &self.will_select.is_some())
            .field("did_select", &self.did_select.is_some())
            .field("will_deselect", &self.will_deselect.is_some())
            .field("did_deselect", &self.did_deselect.is_some())
            .finish()
    }
}

impl AppearanceResponder for Responders {
    fn on_will_appear(&self) -> Option<PositionCallback> {
        self.will_appear.clone()
    }

    fn on_did_appear(&self) -> Option<PositionCallback> {
        self.did_appear.clone()
    }
}

impl SelectionResponder for Responders {
    fn on_will_select(&self) -> Option<PositionRedirect> {
        self.will_select.clone()
    }

    fn on_did_select(&self) -> Option<PositionCallback> {
        self.did_select.clone()
    }
}

impl DeselectionResponder for Responders {
    fn on_will_deselect(&self) -> Option<PositionRedirect> {
        self.will_deselect.clone()
    }

    fn on_did_deselect(&self) -> Option<PositionCallback> {
        self.did_deselect.clone()
    }
}
