//! Role names carried in JWT claims.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Map the stored `admin` flag onto a role name.
pub fn role_for(admin: bool) -> &'static str {
    if admin {
        ROLE_ADMIN
    } else {
        ROLE_USER
    }
}
