//! GreenWallet: a personal payment tracker backed by a single JSON file.

pub mod auth;
pub mod config;
pub mod error;
pub mod payments;
pub mod session;
pub mod shell;
pub mod state;
pub mod store;

pub use auth::{PasswordScheme, PublicUser, User};
pub use config::AppConfig;
pub use error::{PasswordError, ServiceError, StoreError};
pub use payments::Payment;
pub use session::Session;
pub use state::AppState;
pub use store::{Document, JsonStore, LoadPolicy};
