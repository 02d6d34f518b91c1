//! Profiles.

use squadfeed_entity::user::User;

/// Own and viewed profiles.
#[derive(Debug, Clone, Default)]
pub struct UserState {
    /// The session's own profile.
    pub me: User,
    /// Last other profile pushed by the server.
    pub other: Option<User>,
}
