//! Identity providers.
//!
//! An identity provider only has to answer "who is playing", if anyone.
//! Scores are persisted under the returned [`UserProfile::id`].

use crate::error::IdentityError;
use crate::types::UserProfile;

/// Supplies the current player, if signed in.
pub trait IdentityProvider: Send {
    fn current_user(&self) -> Option<UserProfile>;

    fn sign_in(&mut self, display_name: &str) -> Result<UserProfile, IdentityError>;

    fn sign_out(&mut self);
}

/// No accounts at all; scores are never persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousIdentity;

impl IdentityProvider for AnonymousIdentity {
    fn current_user(&self) -> Option<UserProfile> {
        None
    }

    fn sign_in(&mut self, _display_name: &str) -> Result<UserProfile, IdentityError> {
        Err(IdentityError::Unsupported)
    }

    fn sign_out(&mut self) {}
}

/// A local, password-less profile keyed by a slug of the display name.
#[derive(Debug, Clone, Default)]
pub struct LocalIdentity {
    user: Option<UserProfile>,
}

impl LocalIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start signed in as `display_name`; stays signed out if the name has no usable characters.
    pub fn with_user(display_name: &str) -> Self {
        let mut identity = Self::new();
        if let Err(err) = identity.sign_in(display_name) {
            log::warn!("ignoring user name {:?}: {}", display_name, err);
        }
        identity
    }
}

impl IdentityProvider for LocalIdentity {
    fn current_user(&self) -> Option<UserProfile> {
        self.user.clone()
    }

    fn sign_in(&mut self, display_name: &str) -> Result<UserProfile, IdentityError> {
        let display_name = display_name.trim();
        let id = slugify(display_name);
        if id.is_empty() {
            return Err(IdentityError::EmptyName);
        }

        let profile = UserProfile {
            id,
            display_name: display_name.to_string(),
        };
        log::info!("signed in as {} ({})", profile.display_name, profile.id);
        self.user = Some(profile.clone());
        Ok(profile)
    }

    fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            log::info!("signed out {}", user.id);
        }
    }
}

/// Lowercase ASCII letters and digits; every other run of characters becomes one `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
