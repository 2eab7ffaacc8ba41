//! Interactive auth menu: sign in, sign up, or guest login.
//!
//! Blocking dialoguer prompts are fine here: nothing else runs while
//! the user is at the menu. A successful sign-up returns to the menu in
//! sign-in mode (the account needs email confirmation first), matching
//! the backend's flow.

use console::style;
use dialoguer::{Input, Password, Select, theme::ColorfulTheme};

use confab_core::auth::AuthProvider;
use confab_core::notify::NotificationSink;
use confab_types::error::AuthError;
use confab_types::identity::{GUEST_EMAIL, GUEST_PASSWORD, Identity};
use confab_types::notification::Notification;

use super::notify::TermNotifier;

/// Run the auth menu until an identity is established or the user quits.
///
/// Returns `None` when the user chooses to quit.
pub async fn run_auth_menu(
    auth: &impl AuthProvider,
    notifier: &TermNotifier,
) -> anyhow::Result<Option<Identity>> {
    loop {
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Welcome to Confab")
            .items(&["Sign in", "Sign up", "Use guest login", "Quit"])
            .default(0)
            .interact()?;

        match choice {
            0 => {
                let (email, password) = prompt_credentials()?;
                match auth.sign_in(&email, &password).await {
                    Ok(identity) => {
                        notifier.publish(Notification::info("Signed in successfully!"));
                        return Ok(Some(identity));
                    }
                    Err(err) => publish_auth_error(notifier, err),
                }
            }
            1 => {
                let (email, password) = prompt_credentials()?;
                match auth.sign_up(&email, &password).await {
                    Ok(()) => {
                        notifier.publish(Notification::info(
                            "Account created! Please check your email for confirmation.",
                        ));
                        // Back to the menu in sign-in mode.
                    }
                    Err(err) => publish_auth_error(notifier, err),
                }
            }
            2 => match auth.sign_in(GUEST_EMAIL, GUEST_PASSWORD).await {
                Ok(identity) => {
                    notifier.publish(Notification::info("Logged in as guest user!"));
                    return Ok(Some(identity));
                }
                Err(err) => publish_auth_error(notifier, err),
            },
            _ => return Ok(None),
        }
    }
}

fn prompt_credentials() -> anyhow::Result<(String, String)> {
    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .validate_with(|value: &String| {
            if value.contains('@') {
                Ok(())
            } else {
                Err("enter a valid email address")
            }
        })
        .interact_text()?;
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?;
    Ok((email, password))
}

/// Map an auth error to its user-facing notification.
pub fn publish_auth_error(notifier: &TermNotifier, err: AuthError) {
    let message = match err {
        AuthError::EmailAlreadyRegistered => {
            "Email already registered. Please sign in.".to_string()
        }
        AuthError::Rejected(message) => message,
        AuthError::Transport(detail) => {
            tracing::warn!(error = %detail, "auth request failed");
            format!("Could not reach the server: {detail}")
        }
    };
    notifier.publish(Notification::error(message));
}

/// Signed-in header line shown above the chat area.
pub fn identity_banner(identity: &Identity) -> String {
    match identity {
        Identity::Anonymous => String::new(),
        Identity::Guest { .. } => format!("Welcome, {}!", style("guest").bold()),
        Identity::Registered { email, .. } => format!("Welcome, {}!", style(email).bold()),
    }
}
