//! User form.

use serde::{Deserialize, Serialize};

use super::{Cleaner, FormErrors};
use crate::entities::User;

const USERNAME_MAX: usize = 150;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct UserForm {
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserInput {
    pub username: String,
}

impl UserForm {
    #[must_use]
    pub fn overlay(self, user: &User) -> Self {
        Self {
            username: self.username.or_else(|| Some(user.username.clone())),
        }
    }

    /// Usernames may contain letters, digits and `@ . + - _`.
    ///
    /// # Errors
    ///
    /// Returns `FormErrors` for a missing, overlong, or malformed username.
    pub fn clean(&self) -> Result<UserInput, FormErrors> {
        let mut c = Cleaner::new();
        let username = c.text("username", self.username.as_deref(), USERNAME_MAX);
        if let Some(name) = &username {
            let valid = name
                .chars()
                .all(|ch| ch.is_alphanumeric() || matches!(ch, '@' | '.' | '+' | '-' | '_'));
            if !valid {
                c.error(
                    "username",
                    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
                );
            }
        }
        c.finish()?;

        let Some(username) = username else {
            return Err(Cleaner::incomplete());
        };
        Ok(UserInput { username })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rejects_spaces() {
        let form = UserForm {
            username: Some("field ranger".into()),
        };
        let errors = form.clean().unwrap_err();
        assert_eq!(errors.get("username").len(), 1);
    }

    #[test]
    fn username_accepts_email_like_values() {
        let form = UserForm {
            username: Some("ranger.one+kruger@example.org".into()),
        };
        assert_eq!(form.clean().unwrap().username, "ranger.one+kruger@example.org");
    }
}
