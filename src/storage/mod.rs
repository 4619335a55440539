//! Persistence of organization settings, knowledge and trainee sessions.

pub mod documents;
pub mod store;

pub use documents::{split_list, OrgSettings, SessionBook, UserSession};
pub use store::{DocumentStoreExt, JsonFileStore};
