pub mod dto;
mod repo;
pub mod repo_types;
pub mod services;

pub use dto::{Dashboard, PaymentOutcome, PaymentRequest};
pub use repo_types::{parse_amount, Payment};
