use tracing::{info, warn};

use crate::auth::password::verify_password;
use crate::auth::repo_types::User;
use crate::error::StoreError;
use crate::store::JsonStore;

impl JsonStore {
    /// Appends `user` unless the username is taken. Returns `false` without
    /// touching the file on a duplicate.
    pub fn add_user(&mut self, user: User) -> Result<bool, StoreError> {
        if self.find_user(&user.username).is_some() {
            warn!(username = %user.username, "username already exists");
            return Ok(false);
        }
        info!(username = %user.username, "user added");
        self.doc.users.push(user);
        self.persist()?;
        Ok(true)
    }

    /// First user whose username and password digest both match.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&User> {
        self.doc
            .users
            .iter()
            .find(|u| u.username == username && verify_password(password, &u.password_hash))
    }

    pub fn find_user(&self, username: &str) -> Option<&User> {
        self.doc.users.iter().find(|u| u.username == username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::PasswordScheme;
    use tempfile::TempDir;

    fn scratch_store() -> (TempDir, JsonStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStore::open(dir.path().join("data.json"));
        (dir, store)
    }

    #[test]
    fn test_add_user_rejects_duplicate_username() {
        let (_dir, mut store) = scratch_store();
        assert!(store.add_user(User::new("alice", "a@x.com", "secret1")).unwrap());
        assert!(!store.add_user(User::new("alice", "other@x.com", "secret2")).unwrap());

        let count = store
            .document()
            .users
            .iter()
            .filter(|u| u.username == "alice")
            .count();
        assert_eq!(count, 1);
        assert_eq!(store.find_user("alice").unwrap().email, "a@x.com");
    }

    #[test]
    fn test_add_user_persists() {
        let (_dir, mut store) = scratch_store();
        store.add_user(User::new("alice", "a@x.com", "secret1")).unwrap();

        let reopened = JsonStore::open(store.path());
        assert_eq!(reopened.document().users.len(), 1);
        assert!(reopened.authenticate("alice", "secret1").is_some());
    }

    #[test]
    fn test_duplicate_does_not_rewrite_file() {
        let (_dir, mut store) = scratch_store();
        store.add_user(User::new("alice", "a@x.com", "secret1")).unwrap();
        std::fs::remove_file(store.path()).unwrap();

        assert!(!store.add_user(User::new("alice", "a@x.com", "x")).unwrap());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_authenticate() {
        let (_dir, mut store) = scratch_store();
        store.add_user(User::new("alice", "a@x.com", "secret1")).unwrap();

        let user = store.authenticate("alice", "secret1").expect("valid credentials");
        assert_eq!(user.username, "alice");
        assert!(store.authenticate("alice", "secret2").is_none());
        assert!(store.authenticate("bob", "secret1").is_none());
        assert!(store.authenticate("ALICE", "secret1").is_none());
    }

    #[test]
    fn test_authenticate_argon2_user() {
        let (_dir, mut store) = scratch_store();
        let user = User::with_scheme("carol", "c@x.com", "pa55word", PasswordScheme::Argon2)
            .expect("argon2 hashing");
        store.add_user(user).unwrap();

        assert!(store.authenticate("carol", "pa55word").is_some());
        assert!(store.authenticate("carol", "password").is_none());
    }

    #[test]
    fn test_first_match_wins_on_hand_edited_duplicates() {
        let (_dir, mut store) = scratch_store();
        store.doc.users.push(User::new("dup", "first@x.com", "same"));
        store.doc.users.push(User::new("dup", "second@x.com", "same"));

        assert_eq!(store.authenticate("dup", "same").unwrap().email, "first@x.com");
    }
}
