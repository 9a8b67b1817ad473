//! Explicit session context handed to fetch collaborators.

use std::fmt;

/// Who is asking. Passed into every collaborator call instead of being read
/// from ambient global state.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// A session without credentials.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session carrying a bearer token. An empty token is treated as none.
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.is_empty()).then_some(token),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_anonymous() {
        assert!(!Session::with_token("").is_authenticated());
        assert_eq!(Session::with_token("abc").token(), Some("abc"));
    }

    #[test]
    fn debug_does_not_leak_token() {
        let printed = format!("{:?}", Session::with_token("secret"));
        assert!(!printed.contains("secret"));
    }
}
