//! Domain core for the todo backend.
//!
//! # Overview
//! Holds the records, the storage port with its in-memory store, the
//! category classifier port with its wire client and simulated service, and
//! `TodoService`, which ties them together. Nothing here knows about the
//! HTTP server.
//!
//! # Design
//! - State lives in an explicit `InMemoryTodoRepository` built at startup;
//!   there are no globals.
//! - `TodoRepository` and `Classifier` are traits injected as `Arc<dyn _>`,
//!   so tests supply deterministic stubs and real backends slot in later.
//! - The classifier wire format is plain data (`HttpRequest` /
//!   `HttpResponse`) and the round-trip sits behind `Transport`.

pub mod classifier;
pub mod client;
pub mod error;
pub mod http;
pub mod repository;
pub mod seed;
pub mod service;
pub mod simulated;
pub mod types;

pub use classifier::{Classifier, RemoteClassifier};
pub use client::ClassifierClient;
pub use error::{ClassifierError, ErrorKind, TodoError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use repository::{InMemoryTodoRepository, TodoRepository};
pub use service::TodoService;
pub use simulated::SimulatedTransport;
pub use types::{Category, CategoryId, NewTodo, Todo, TodoId, User, UserId};
