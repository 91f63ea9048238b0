use clap::Subcommand;
use colored::Colorize;
use loadout_lib::{Repository, catalog::CatalogProvider, repository::Slot};
use sysexits::ExitCode;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the items that fit a slot
    Items { slot: Slot },
    /// List the mods that fit a slot
    Mods { slot: Slot },
}

pub fn handle(repo: &Repository, cmd: &Command) -> ExitCode {
    let dir = repo.config().read().catalog_dir.clone();
    let provider = CatalogProvider::from_dir(dir.as_deref());
    if provider == CatalogProvider::Unavailable {
        eprintln!("{}", "Catalog files not available, showing built-in data".dimmed());
    }
    let catalog = provider.catalog();

    match cmd {
        Command::Items { slot } => {
            for item in catalog.items_for(*slot) {
                println!("{item}");
            }
        }
        Command::Mods { slot } => {
            for mod_ in catalog.mods_for(*slot) {
                println!("{} {}", mod_.mod_name, format!("({})", mod_.mod_for).dimmed());
            }
        }
    }

    ExitCode::Ok
}
