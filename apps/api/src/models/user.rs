use std::collections::HashMap;

/// The user directory document: email -> password.
///
/// Passwords are stored and compared in plaintext. That is the documented
/// contract of this demo backend, not an oversight; hardening is explicitly
/// out of scope.
pub type Users = HashMap<String, String>;
