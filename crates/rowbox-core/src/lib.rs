//! Core systems for rowbox.
//!
//! This crate provides the pieces of rowbox that do not know about lists:
//!
//! - **Signal/Slot System**: type-safe change notification ([`Signal`])
//! - **Logging**: `tracing` target names and a timing guard ([`PerfSpan`])
//! - **Errors**: [`SignalError`]
//!
//! # Signal/Slot Example
//!
//! ```
//! use rowbox_core::Signal;
//!
//! let section_removed = Signal::<usize>::new();
//!
//! let conn_id = section_removed.connect(|index| {
//!     println!("section {index} removed");
//! });
//!
//! section_removed.emit(2);
//! assert!(section_removed.disconnect(conn_id));
//! ```

mod error;
pub mod logging;
pub mod signal;

pub use error::{Result, SignalError};
pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
