//! Category CLI commands

use clap::Subcommand;

use crate::display::category::format_category_list;
use crate::error::SpendwiseResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List default and custom categories
    List,

    /// Add a custom category
    Add {
        /// Category name
        name: String,
    },

    /// Remove a custom category (only when nothing uses it)
    #[command(alias = "rm")]
    Remove {
        /// Category name
        name: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> SpendwiseResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(&service.list()?));
        }

        CategoryCommands::Add { name } => {
            let category = service.add(&name)?;
            println!("Added category: {}", category);
        }

        CategoryCommands::Remove { name } => {
            let category = service.remove(&name)?;
            println!("Removed category: {}", category);
        }
    }

    Ok(())
}
