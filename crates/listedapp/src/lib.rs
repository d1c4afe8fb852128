//! # listedapp
//!
//! Domain core of the Listed app: named lists of checkable items, colored
//! tags for filtering lists, a trash with a fixed retention window, and user
//! preferences, persisted as JSON collections in a key-value store.
//!
//! ## Layers
//!
//! - [`api`]: [`ListedApi`], the facade a presentation layer talks to
//! - [`commands`]: business logic per operation
//! - [`query`]: pure filtering, sorting and aggregation over snapshots
//! - [`store`]: the [`store::EntityStore`] abstraction, its backends and the
//!   typed [`store::repository::Repository`]
//! - [`model`]: record types
//!
//! ## Example
//!
//! ```
//! use listedapp::clock::SystemClock;
//! use listedapp::config::ListedConfig;
//! use listedapp::model::{NewItem, NewList};
//! use listedapp::store::mem_backend::MemBackend;
//! use listedapp::ListedApi;
//!
//! let api = ListedApi::new(MemBackend::new(), SystemClock, ListedConfig::default());
//! let list = api.create_list(NewList::named("Groceries")).unwrap();
//! api.create_item(NewItem::new(list.id, "Milk")).unwrap();
//! assert_eq!(api.list_stats(list.id).unwrap().total, 1);
//! ```

pub mod api;
pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod store;
pub mod validation;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use api::ListedApi;
pub use error::{ListedError, Result};
