use subtle::ConstantTimeEq;

/// Passphrase lock in front of the attendance directory.
///
/// This is a soft deterrent: one shared secret, an exact case-sensitive
/// comparison, no lockout and no attempt counting.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectoryGate {
    authorized: bool,
    error: bool,
}

impl DirectoryGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    /// True after a failed attempt, until the next successful one.
    pub fn has_error(&self) -> bool {
        self.error
    }

    /// Checks `secret` against `passphrase`. The caller's input buffer is
    /// cleared on a mismatch. Once authorized, further attempts are ignored.
    pub fn attempt(&mut self, secret: &mut String, passphrase: &str) -> bool {
        if self.authorized {
            return true;
        }

        if passphrase_matches(secret, passphrase) {
            self.authorized = true;
            self.error = false;
        } else {
            self.error = true;
            secret.clear();
        }

        self.authorized
    }
}

fn passphrase_matches(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
