//! Session commands.

use lumizo_core::Username;
use lumizo_storefront::state::AppState;

/// Log in with a username and password.
///
/// The username is validated before the store is touched; an empty input
/// is a usage error, not a failed login.
///
/// # Errors
///
/// Returns an error if the username fails validation.
#[allow(clippy::print_stdout)]
pub async fn login(
    state: &mut AppState,
    username: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let username = Username::parse(username)?;

    if state.session_mut().login(username.as_str(), password).await {
        println!("Logged in as {username}");
    } else {
        println!("Login failed: invalid credentials");
    }
    Ok(())
}

/// Log in by password alone against the quick-login table.
#[allow(clippy::print_stdout)]
pub async fn quick_login(state: &mut AppState, password: &str) {
    if state.session_mut().quick_login(password).await {
        let username = state
            .session()
            .current_user()
            .map_or("?", |s| s.username.as_str());
        println!("Logged in as {username}");
    } else {
        println!("Login failed: invalid credentials");
    }
}

/// Log out and delete the persisted session.
#[allow(clippy::print_stdout)]
pub fn logout(state: &mut AppState) {
    state.session_mut().logout();
    println!("Logged out");
}

/// Show the authenticated identity.
#[allow(clippy::print_stdout)]
pub fn whoami(state: &AppState) {
    match state.session().current_user() {
        Some(session) => println!("{} ({})", session.username, session.role),
        None => println!("Not logged in"),
    }
}
