use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::auth::dto::{LoginRequest, PublicUser, RegisterOutcome, RegisterRequest};
use crate::auth::password::PasswordScheme;
use crate::auth::repo_types::User;
use crate::error::ServiceError;
use crate::store::JsonStore;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(store, req), fields(username = %req.username))]
pub fn register(
    store: &mut JsonStore,
    scheme: PasswordScheme,
    req: RegisterRequest,
) -> Result<RegisterOutcome, ServiceError> {
    // Usernames are stored and matched exactly as typed.
    if req.username.trim().is_empty() {
        return Ok(RegisterOutcome::MissingField("username"));
    }
    if req.password.is_empty() {
        return Ok(RegisterOutcome::MissingField("password"));
    }
    if req.password != req.confirm_password {
        warn!("passwords do not match");
        return Ok(RegisterOutcome::PasswordMismatch);
    }
    if !is_valid_email(&req.email) {
        warn!(email = %req.email, "invalid email");
        return Ok(RegisterOutcome::InvalidEmail);
    }

    let user = User::with_scheme(req.username, req.email, &req.password, scheme)?;
    let public = PublicUser::from(&user);
    if !store.add_user(user)? {
        return Ok(RegisterOutcome::UsernameTaken);
    }

    info!(%scheme, "user registered");
    Ok(RegisterOutcome::Registered(public))
}

#[instrument(skip(store, req), fields(username = %req.username))]
pub fn login(store: &JsonStore, req: &LoginRequest) -> Option<PublicUser> {
    match store.authenticate(&req.username, &req.password) {
        Some(user) => {
            info!("user logged in");
            Some(PublicUser::from(user))
        }
        None => {
            warn!("login invalid credentials");
            None
        }
    }
}
