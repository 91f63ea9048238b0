use std::{fs::create_dir_all, io, path::PathBuf};

use xdg::BaseDirectories;

/// Returns the path to the Loadout configuration directory. If it doesn't exist when this
/// function is called, it will be created.
pub fn config_dir() -> io::Result<PathBuf> {
    let path = xdg_prefix().get_config_home().ok_or_else(missing_home)?;

    create_dir_all(&path)?;

    Ok(path)
}

/// Returns the path to the Loadout data directory. If it doesn't exist when this function is
/// called, it will be created.
pub fn data_dir() -> io::Result<PathBuf> {
    let path = xdg_prefix().get_data_home().ok_or_else(missing_home)?;

    create_dir_all(&path)?;

    Ok(path)
}

fn missing_home() -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, "$HOME must exist")
}

fn xdg_prefix() -> BaseDirectories {
    xdg::BaseDirectories::with_prefix("loadout")
}
