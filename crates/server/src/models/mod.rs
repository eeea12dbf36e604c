//! Domain models for the server.

pub mod order;
pub mod service;
pub mod session;
pub mod user;

pub use order::{NewOrder, Order, OrderChanges};
pub use service::Service;
pub use session::{CurrentUser, session_keys};
pub use user::User;
