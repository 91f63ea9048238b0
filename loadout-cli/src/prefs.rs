use clap::Subcommand;
use loadout_lib::{
    Repository,
    preferences::{Language, Theme},
};
use sysexits::ExitCode;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the current preferences
    Show,
    /// Set the theme (`dark` or `light`), or toggle it if none is given
    Theme { theme: Option<Theme> },
    /// Set the catalog table language (`en` or `th`)
    Language { language: Language },
}

pub fn handle(repo: &Repository, cmd: &Command) -> ExitCode {
    let prefs = repo.preferences();

    match cmd {
        Command::Show => {
            println!("theme: {}", prefs.theme());
            println!("language: {}", prefs.language());
        }
        Command::Theme { theme: Some(theme) } => {
            prefs.set_theme(*theme);
            println!("theme: {theme}");
        }
        Command::Theme { theme: None } => {
            println!("theme: {}", prefs.toggle_theme());
        }
        Command::Language { language } => {
            prefs.set_language(*language);
            println!("language: {language}");
        }
    }

    ExitCode::Ok
}
