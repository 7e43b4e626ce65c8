//! Render artifacts produced by items.
//!
//! The model never draws anything. When the render adapter asks for the row
//! at a position, the item answers with a [`RenderArtifact`]: the
//! [`RenderKind`] tag the adapter uses to pick (or reuse) a widget, plus the
//! content to configure it with as [`ItemData`].

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::position::Position;

/// Opaque tag naming how a row should be materialized.
///
/// Adapters typically key their widget reuse pools by this tag. Two items with
/// the same kind can share a recycled widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderKind(Cow<'static, str>);

impl RenderKind {
    /// Creates a kind from a static tag (usable in `const` contexts).
    pub const fn new(tag: &'static str) -> Self {
        Self(Cow::Borrowed(tag))
    }

    /// Creates a kind from a runtime string.
    pub fn owned(tag: impl Into<String>) -> Self {
        Self(Cow::Owned(tag.into()))
    }

    /// Returns the tag string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenderKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content handed to the adapter for one rendered row.
///
/// Covers the scalar values cells are usually configured with. Anything
/// richer goes through [`ItemData::Custom`].
///
/// ```
/// use rowbox::model::ItemData;
///
/// let title = ItemData::from("Wi-Fi");
/// assert_eq!(title.as_string(), Some("Wi-Fi"));
///
/// let badge = ItemData::new([1u8, 2, 3]);
/// assert_eq!(badge.downcast::<[u8; 3]>(), Some(&[1, 2, 3]));
/// ```
#[derive(Clone, Default)]
pub enum ItemData {
    #[default]
    None,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Any shared value; read it back with [`ItemData::downcast`].
    Custom(Arc<dyn Any + Send + Sync>),
}

impl fmt::Debug for ItemData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::String(s) => write!(f, "String({s:?})"),
            Self::Int(n) => write!(f, "Int({n})"),
            Self::Float(n) => write!(f, "Float({n})"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl ItemData {
    /// Wraps an arbitrary value as [`ItemData::Custom`].
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::Custom(Arc::new(value))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn as_string(&self) -> Option<&str> {
        if let Self::String(s) = self { Some(s) } else { None }
    }

    pub fn as_int(&self) -> Option<i64> {
        if let Self::Int(n) = *self { Some(n) } else { None }
    }

    pub fn as_float(&self) -> Option<f64> {
        if let Self::Float(n) = *self { Some(n) } else { None }
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(b) = *self { Some(b) } else { None }
    }

    /// The custom value, if it is a `T`.
    pub fn downcast<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Custom(value) => value.downcast_ref(),
            _ => None,
        }
    }
}

macro_rules! item_data_from {
    ($($ty:ty => $variant:ident($conv:expr)),* $(,)?) => {
        $(impl From<$ty> for ItemData {
            fn from(value: $ty) -> Self {
                Self::$variant($conv(value))
            }
        })*
    };
}

item_data_from! {
    String => String(std::convert::identity),
    &str => String(str::to_owned),
    i64 => Int(std::convert::identity),
    i32 => Int(i64::from),
    u32 => Int(i64::from),
    f64 => Float(std::convert::identity),
    bool => Bool(std::convert::identity),
}

/// What an item hands the adapter for one row.
#[derive(Debug, Clone)]
pub struct RenderArtifact {
    /// Which widget kind to materialize or reuse.
    pub kind: RenderKind,
    /// The position the artifact was rendered for.
    pub position: Position,
    /// Content to configure the widget with.
    pub content: ItemData,
}

impl RenderArtifact {
    /// Creates an artifact with no content.
    pub fn new(kind: RenderKind, position: Position) -> Self {
        Self {
            kind,
            position,
            content: ItemData::None,
        }
    }

    /// Sets the content.
    pub fn with_content(mut self, content: impl Into<ItemData>) -> Self {
        self.content = content.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_data_scalar_accessors() {
        let title = ItemData::from("Bluetooth");
        assert_eq!(title.as_string(), Some("Bluetooth"));
        assert!(title.as_int().is_none());
        assert_eq!(ItemData::from(3u32).as_int(), Some(3));
        assert_eq!(ItemData::from(true).as_bool(), Some(true));
        assert!(ItemData::default().is_none());
    }

    #[test]
    fn test_item_data_custom_survives_clone() {
        #[derive(PartialEq, Debug)]
        struct Detail(u32);

        let data = ItemData::new(Detail(42));
        let copy = data.clone();
        assert_eq!(copy.downcast::<Detail>(), Some(&Detail(42)));
        assert!(copy.downcast::<u32>().is_none());
    }

    #[test]
    fn test_render_kind_const_and_owned_compare_equal() {
        const TEXT: RenderKind = RenderKind::new("text");
        assert_eq!(TEXT, RenderKind::owned("text"));
        assert_eq!(TEXT.as_str(), "text");
    }

    #[test]
    fn test_artifact_builder() {
        let artifact = RenderArtifact::new(RenderKind::new("int"), Position::new(1, 2))
            .with_content(7i64);
        assert_eq!(artifact.content.as_int(), Some(7));
        assert_eq!(artifact.position, Position::new(1, 2));
    }
}
