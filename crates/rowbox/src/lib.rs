//! rowbox - sectioned list models with heterogeneous rows.
//!
//! This is the main crate. It re-exports the core signal and logging APIs
//! from `rowbox-core` and provides the list data model.
//!
//! # Example
//!
//! ```
//! use rowbox::prelude::*;
//!
//! #[derive(Debug, PartialEq)]
//! struct Setting {
//!     key: &'static str,
//!     enabled: bool,
//! }
//!
//! impl Item for Setting {
//!     type Payload = bool;
//!     fn identifier(&self) -> Option<&str> { Some(self.key) }
//!     fn payload(&self) -> &bool { &self.enabled }
//!     fn render_kind(&self) -> RenderKind { RenderKind::new("switch") }
//!     fn render(&self, position: Position) -> RenderArtifact {
//!         RenderArtifact::new(self.render_kind(), position).with_content(self.enabled)
//!     }
//! }
//!
//! let model = ListModel::new(vec![Section::new().with_header_title("General")]);
//! model.append_row(Setting { key: "wifi", enabled: true }, 0, RowAnimation::Automatic);
//!
//! assert_eq!(model.position_of_identifier("wifi"), Some(Position::new(0, 0)));
//! ```

pub use rowbox_core::*;

pub mod config;
mod error;
pub mod model;
pub mod prelude;

pub use config::ListConfig;
pub use error::{Error, Result};
