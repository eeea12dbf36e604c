//! Session-stored authentication state.

use serde::{Deserialize, Serialize};

use smile_tailor_core::{PhoneNumber, UserId};

/// Session-stored identity of the logged-in customer.
///
/// Admin standing is not cached here: the phone allowlist is consulted on
/// every admin request, so allowlist changes take effect without re-login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// The principal's database ID.
    pub id: UserId,
    /// The verified phone number the session was established with.
    pub phone: PhoneNumber,
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
