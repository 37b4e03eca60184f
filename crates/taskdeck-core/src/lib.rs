//! Core domain layer for the taskdeck synchronization client.
//!
//! Contains the domain models (tasks, attachments, session credentials),
//! the [`Envelope`] result wrapper every store returns, the [`ApiError`]
//! failure taxonomy, the remote-API traits implemented by the transport
//! crate, and the cross-panel selection state machine.

pub mod api;
pub mod attachment;
pub mod envelope;
pub mod error;
pub mod selection;
pub mod session;
pub mod task;

pub use attachment::{Attachment, FileUpload};
pub use envelope::Envelope;
pub use error::ApiError;
pub use selection::{ActiveView, Layout, SelectionController, SelectionState, Surface};
pub use session::Credentials;
pub use task::Task;
