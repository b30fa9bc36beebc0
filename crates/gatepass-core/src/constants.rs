/// Endpoints that must never trigger a token refresh on 401. A 401 from any
/// of these is a hard failure; retrying through the refresh path would loop.
pub const AUTH_LOGIN_PATH: &str = "/auth/login";
pub const AUTH_REGISTER_PATH: &str = "/auth/register";
pub const AUTH_REFRESH_PATH: &str = "/auth/refresh";
pub const AUTH_LOGOUT_PATH: &str = "/auth/logout";
pub const AUTH_PROFILE_PATH: &str = "/auth/profile";

pub const NO_REFRESH_PATHS: [&str; 3] =
    [AUTH_REFRESH_PATH, AUTH_LOGIN_PATH, AUTH_REGISTER_PATH];
