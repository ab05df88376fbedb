//! Client-side synchronization with the notes backend.
//!
//! [`ApiClient`] is the typed request layer, [`store`] holds the pure state
//! transitions, and [`Workspace`] ties both together behind the actions a
//! user can take.

pub mod api;
pub mod error;
pub mod store;
pub mod workspace;

pub use api::{ApiClient, RequestOptions};
pub use error::{ClientError, ClientResult};
pub use store::{ScopedList, Selection, WorkspaceState};
pub use workspace::Workspace;
