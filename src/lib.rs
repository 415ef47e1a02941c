// Library root
// -----------
// This crate manages local publisher credentials for a package gallery.
// The binary (`main.rs`) parses the action and hands it to `dispatch`.
//
// Module responsibilities:
// - `store`: the JSON file holding every known publisher and its token.
// - `publisher`: create/login/logout/delete/list commands that combine
//   the store with gallery calls and confirmation prompts.
// - `api`: blocking HTTP client for the gallery's publisher endpoints.
// - `ui`: terminal prompts and the progress spinner.
// - `config`, `error`, `validate`: environment settings, the error type
//   and publisher name rules.
pub mod api;
pub mod config;
pub mod error;
pub mod publisher;
pub mod store;
pub mod ui;
pub mod validate;

pub use error::{PublisherError, Result};
