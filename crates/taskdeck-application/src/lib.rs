//! Application layer for the taskdeck synchronization client.
//!
//! The stores own the UI-authoritative copies of tasks and attachments and
//! mediate every mutation through the remote API; the [`Workspace`] facade
//! wires them to the session and the selection controller.

pub mod attachment_store;
pub mod session_store;
pub mod task_store;
pub mod workspace;

pub use attachment_store::AttachmentStore;
pub use session_store::SessionStore;
pub use task_store::TaskStore;
pub use workspace::Workspace;

#[cfg(test)]
mod test_support;
