//! Profile CLI commands

use clap::Subcommand;

use crate::auth::AuthProvider;
use crate::display::profile::format_profile;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Currency, Theme};
use crate::services::ProfileService;
use crate::storage::Storage;

/// Profile subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show your profile
    Show,

    /// Change your display name
    SetName {
        /// New display name
        name: String,
    },

    /// Update preferences
    Prefs {
        /// Display currency (USD, EUR, GBP, JPY, INR)
        #[arg(short, long)]
        currency: Option<String>,

        /// Colour theme (light, dark, auto)
        #[arg(short, long)]
        theme: Option<String>,
    },

    /// Delete all of your transactions, budgets, categories and your profile
    ClearData {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Handle a profile command
pub fn handle_profile_command<A: AuthProvider + ?Sized>(
    storage: &Storage,
    auth: &A,
    cmd: ProfileCommands,
) -> SpendwiseResult<()> {
    let service = ProfileService::new(storage);

    match cmd {
        ProfileCommands::Show => {
            print!("{}", format_profile(&service.get()?));
        }

        ProfileCommands::SetName { name } => {
            let profile = service.update_name(&name)?;
            println!("Name updated to: {}", profile.name);
        }

        ProfileCommands::Prefs { currency, theme } => {
            let currency = currency
                .as_deref()
                .map(str::parse::<Currency>)
                .transpose()
                .map_err(SpendwiseError::Validation)?;
            let theme = theme
                .as_deref()
                .map(str::parse::<Theme>)
                .transpose()
                .map_err(SpendwiseError::Validation)?;

            let profile = service.update_preferences(currency, theme)?;
            println!("Preferences:");
            println!("  Currency: {}", profile.preferences.currency);
            println!("  Theme:    {}", profile.preferences.theme);
        }

        ProfileCommands::ClearData { yes } => {
            if !yes {
                println!("This permanently deletes all of your transactions, budgets,");
                println!("custom categories and your profile, then signs you out.");
                println!();
                println!("Use --yes to confirm");
                return Ok(());
            }

            let summary = service.delete_all_data(auth)?;
            println!(
                "Deleted {} transactions, {} budgets and {} custom categories.",
                summary.transactions, summary.budgets, summary.categories
            );
            println!("Your profile was removed and you have been signed out.");
        }
    }

    Ok(())
}
