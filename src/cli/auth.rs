//! Authentication CLI commands
//!
//! Sign-up and login finish by running the profile gate, so a first login
//! also creates the user's profile.

use clap::Subcommand;

use crate::auth::{read_password, AuthProvider};
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::gate::require_profile;
use crate::storage::ProfileStore;

/// Authentication subcommands
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Create an account and sign in
    Signup {
        /// Email address
        email: String,
        /// Display name (defaults to the part of the email before '@')
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Sign in to an existing account
    Login {
        /// Email address
        email: String,
    },
    /// Sign out of the current session
    Logout,
    /// Show the signed-in user
    Whoami,
}

/// Handle an auth command
pub fn handle_auth_command<A, P>(auth: &A, profiles: &P, cmd: AuthCommands) -> SpendwiseResult<()>
where
    A: AuthProvider + ?Sized,
    P: ProfileStore + ?Sized,
{
    match cmd {
        AuthCommands::Signup { email, name } => {
            let password = read_password("Password: ")?;
            let confirm = read_password("Confirm password: ")?;
            if password.as_str() != confirm.as_str() {
                return Err(SpendwiseError::Validation("Passwords do not match".into()));
            }

            let user = auth.sign_up(&email, &password, name.as_deref().unwrap_or_default())?;
            let profile = require_profile(auth, profiles)?;
            println!("Account created for {}", user.email);
            println!("Welcome, {}!", profile.name);
        }

        AuthCommands::Login { email } => {
            let password = read_password("Password: ")?;
            auth.sign_in(&email, &password)?;
            let profile = require_profile(auth, profiles)?;
            println!("Signed in as {}", profile.email);
            println!("Welcome back, {}!", profile.name);
        }

        AuthCommands::Logout => {
            if auth.current_user()?.is_none() {
                println!("Not signed in.");
            } else {
                auth.sign_out()?;
                println!("Signed out.");
            }
        }

        AuthCommands::Whoami => match auth.current_user()? {
            Some(user) => {
                println!("Email:   {}", user.email);
                println!("User ID: {}", user.uid.as_uuid());
                match profiles.get_profile(user.uid)? {
                    Some(profile) => println!("Name:    {}", profile.name),
                    None => println!("Profile: not created yet"),
                }
            }
            None => println!("Not signed in."),
        },
    }

    Ok(())
}
