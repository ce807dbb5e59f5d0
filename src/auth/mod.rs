pub mod dto;
pub mod password;
mod repo;
pub mod repo_types;
pub mod services;

pub use dto::{LoginRequest, PublicUser, RegisterOutcome, RegisterRequest};
pub use password::{hash, PasswordScheme};
pub use repo_types::User;
