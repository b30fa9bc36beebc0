mod actions;
pub(crate) mod args;
mod keyring;

pub(crate) use actions::{handle_login_command, handle_logout, handle_register_command};
pub(crate) use keyring::{
    delete_access_token, delete_refresh_token, delete_session_token, store_access_token,
    KeyringStore,
};
#[cfg(test)]
pub(crate) use keyring::{
    clear_keyring_mock, load_access_token, load_refresh_token, lock_keyring_tests_async,
    lock_keyring_tests_sync, store_refresh_token,
};
