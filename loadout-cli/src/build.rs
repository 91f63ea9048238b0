use std::io::{self, Read};

use clap::Subcommand;
use colored::Colorize;
use loadout_lib::{
    Build, BuildId, Equipment, GearSlot, Repository, Weapons,
    repository::{self, Slot},
};
use sysexits::ExitCode;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List builds
    List,
    /// Show every slot of a build
    Show { id: String },
    /// Create a new empty build
    New,
    /// Import a build string (read from stdin if not given)
    Import { token: Option<String> },
    /// Print the build string of a build
    Export { id: String },
    /// Edit a build's name and slots
    Edit {
        id: String,
        /// New name for the build
        #[arg(short, long)]
        name: Option<String>,
        /// Put an item in a slot, e.g. `--item helmet="Combat Helmet"`; `helmet=` unsets it
        #[arg(long = "item", value_parser = parse_assignment)]
        items: Vec<(Slot, Option<String>)>,
        /// Attach a mod to a slot, e.g. `--mod weapon1="Red Dot Sight"`; `weapon1=` unsets it
        #[arg(long = "mod", value_parser = parse_assignment)]
        mods: Vec<(Slot, Option<String>)>,
        /// Empty a slot entirely
        #[arg(long)]
        clear: Vec<Slot>,
    },
    /// Delete a build
    Delete { id: String },
}

pub fn handle(repo: &mut Repository, cmd: &Command) -> ExitCode {
    match cmd {
        Command::List => {
            for build in repo.builds() {
                print_summary(build);
            }
            ExitCode::Ok
        }
        Command::Show { id } => match repo.get(&BuildId::from(id.as_str())) {
            Some(build) => {
                print_details(build);
                ExitCode::Ok
            }
            None => not_found(id),
        },
        Command::New => {
            let build = repo.create_new();
            println!("{}", build.id());
            ExitCode::Ok
        }
        Command::Import { token } => {
            let token = match token {
                Some(token) => token.clone(),
                None => {
                    let mut buf = String::new();
                    if let Err(err) = io::stdin().read_to_string(&mut buf) {
                        eprintln!("Failed to read build string: {err}");
                        return ExitCode::IoErr;
                    }
                    buf
                }
            };

            match repo.import_token(&token) {
                Ok(build) => {
                    println!("{} {}", "Build imported:".green(), build.id());
                    ExitCode::Ok
                }
                Err(err) => report(err),
            }
        }
        Command::Export { id } => match repo.export_token(&BuildId::from(id.as_str())) {
            Ok(token) => {
                println!("{token}");
                ExitCode::Ok
            }
            Err(err) => report(err),
        },
        Command::Edit {
            id,
            name,
            items,
            mods,
            clear,
        } => {
            let id = BuildId::from(id.as_str());
            let Some(build) = repo.get(&id) else {
                return not_found(id.as_str());
            };

            let name = name.clone().unwrap_or_else(|| build.name().clone());
            let mut equipment = build.equipment().clone();
            let mut weapons = build.weapons().clone();

            for slot in clear {
                *slot_mut(&mut equipment, &mut weapons, *slot) = GearSlot::default();
            }
            for (slot, item) in items {
                slot_mut(&mut equipment, &mut weapons, *slot).item = item.clone();
            }
            for (slot, mod_) in mods {
                slot_mut(&mut equipment, &mut weapons, *slot).mod_ = mod_.clone();
            }

            match repo.save(&id, &name, equipment, weapons) {
                Ok(build) => {
                    println!("{} {}", "Build saved:".green(), build.name());
                    ExitCode::Ok
                }
                Err(err) => report(err),
            }
        }
        Command::Delete { id } => {
            repo.delete(&BuildId::from(id.as_str()));
            ExitCode::Ok
        }
    }
}

fn slot_mut<'a>(
    equipment: &'a mut Equipment,
    weapons: &'a mut Weapons,
    slot: Slot,
) -> &'a mut GearSlot {
    match slot {
        Slot::Equipment(s) => equipment.slot_mut(s),
        Slot::Weapon(s) => weapons.slot_mut(s),
    }
}

/// Parse `SLOT=VALUE`. An empty value leaves the slot unset.
fn parse_assignment(s: &str) -> Result<(Slot, Option<String>), String> {
    let (slot, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected SLOT=VALUE, got '{s}'"))?;
    let slot = slot
        .trim()
        .parse::<Slot>()
        .map_err(|_| format!("unknown slot '{slot}'"))?;

    let value = value.trim();

    Ok((slot, (!value.is_empty()).then(|| value.to_string())))
}

fn print_summary(build: &Build) {
    let summary = build.summary();
    println!("{} {}", build.name().bold(), format!("[{}]", build.id()).dimmed());
    println!("  Equipment: {}", summary.equipment);
    println!("  Weapons:   {}", summary.weapons);
    println!(
        "  {}",
        format!("Created: {}", build.created().format("%Y-%m-%d")).dimmed()
    );
}

fn print_details(build: &Build) {
    println!("{} {}", build.name().bold(), format!("[{}]", build.id()).dimmed());

    let equipment = build
        .equipment()
        .iter()
        .map(|(slot, gear)| (slot.to_string(), gear));
    let weapons = build
        .weapons()
        .iter()
        .map(|(slot, gear)| (slot.to_string(), gear));

    for (slot, gear) in equipment.chain(weapons) {
        let item = gear.item.as_deref().unwrap_or("Empty");
        match gear.mod_.as_deref() {
            Some(mod_) => println!("  {slot:<8} {item} {}", format!("+ {mod_}").cyan()),
            None => println!("  {slot:<8} {item}"),
        }
    }

    println!("  {}", format!("Modified: {}", build.modified()).dimmed());
    if let Some(imported) = build.imported() {
        println!("  {}", format!("Imported: {imported}").dimmed());
    }
}

fn not_found(id: &str) -> ExitCode {
    eprintln!("{} {id}", "Build not found:".red());
    ExitCode::NoInput
}

fn report(err: repository::Error) -> ExitCode {
    use repository::Error::*;

    match err {
        BadToken(_) | InvalidShape(_) => {
            tracing::debug!("Import failed: {err:?}");
            eprintln!("{}", "Invalid build string!".red());
            ExitCode::DataErr
        }
        NotFound(id) => not_found(id.as_str()),
        Encode(err) => {
            eprintln!("Failed to export build: {err}");
            ExitCode::Software
        }
    }
}

#[cfg(test)]
mod test {
    use loadout_lib::repository::{EquipmentSlot, WeaponSlot};

    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("helmet=Combat Helmet").unwrap(),
            (
                Slot::Equipment(EquipmentSlot::Helmet),
                Some("Combat Helmet".to_string())
            )
        );
        assert_eq!(
            parse_assignment(" weapon2 = 8x Scope ").unwrap(),
            (Slot::Weapon(WeaponSlot::Weapon2), Some("8x Scope".to_string()))
        );
        assert_eq!(
            parse_assignment("helmet=").unwrap(),
            (Slot::Equipment(EquipmentSlot::Helmet), None)
        );
        assert_eq!(
            parse_assignment("mask=   ").unwrap(),
            (Slot::Equipment(EquipmentSlot::Mask), None)
        );
        assert!(parse_assignment("helmet").is_err());
        assert!(parse_assignment("hat=Beanie").is_err());
    }

    #[test]
    fn test_slot_mut_routes_by_kind() {
        let mut equipment = Equipment::default();
        let mut weapons = Weapons::default();

        slot_mut(&mut equipment, &mut weapons, Slot::Weapon(WeaponSlot::Weapon3)).item =
            Some("SMG".into());

        assert_eq!(weapons.weapon3.item.as_deref(), Some("SMG"));
        assert!(equipment.iter().all(|(_, s)| s.is_empty()));
    }
}
