use anyhow::Context;
use arl_registry::{Registry, RegistryResult};
use arl_store::JsonFileStore;
use arl_types::{Marble, Owner, Part, Vehicle};
use colored::Colorize;
use serde::Serialize;

use crate::cli::*;
use crate::config::CliConfig;

type FileRegistry = Registry<JsonFileStore>;

pub fn run_command(cli: Cli, config: CliConfig) -> anyhow::Result<()> {
    let ledger_path = cli.ledger.clone().unwrap_or(config.ledger_path);
    let store = JsonFileStore::open(&ledger_path)
        .with_context(|| format!("opening ledger {}", ledger_path.display()))?;
    let registry = Registry::new(store).with_config(config.gate);
    let format = cli.format;

    match cli.command {
        Command::Init => cmd_init(&registry),
        Command::Owner { action } => cmd_owner(&registry, action, format),
        Command::Marble { action } => cmd_marble(&registry, action, format),
        Command::Vehicle { action } => cmd_vehicle(&registry, action, format),
        Command::Part { action } => cmd_part(&registry, action, format),
        Command::Read { key } => {
            let raw = checked(registry.read(&[key]))?;
            println!("{raw}");
            Ok(())
        }
    }
}

/// Prefix registry failures with their class so scripts can tell them apart.
fn checked<T>(result: RegistryResult<T>) -> anyhow::Result<T> {
    result.map_err(|e| anyhow::anyhow!("[{}] {e}", e.kind()))
}

fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce(&T)) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => text(value),
    }
    Ok(())
}

fn cmd_init(registry: &FileRegistry) -> anyhow::Result<()> {
    let seeded = checked(registry.seed_rosters())?;
    let path = registry.store().path().display().to_string();
    if seeded.is_empty() {
        println!("Ledger {} already initialized.", path.bold());
    } else {
        println!("{} Initialized ledger {}", "✓".green().bold(), path.bold());
        for key in seeded {
            println!("  Roster: {}", key.cyan());
        }
    }
    Ok(())
}

// ---- Owners ----

fn cmd_owner(registry: &FileRegistry, action: OwnerAction, format: OutputFormat) -> anyhow::Result<()> {
    match action {
        OwnerAction::Create { id, username, company } => {
            let owner = checked(registry.create_owner(&[id, username, company]))?;
            emit(format, &owner, |o| {
                println!("{} Created owner {}", "✓".green().bold(), o.id.yellow());
                print_owner(o);
            })
        }
        OwnerAction::Disable { id, company } => {
            let owner = checked(registry.disable_owner(&[id, company]))?;
            emit(format, &owner, |o| {
                println!("{} Disabled owner {}", "✓".green().bold(), o.id.yellow());
            })
        }
        OwnerAction::Show { id } => {
            let owner = checked(registry.get_owner(&[id]))?;
            emit(format, &owner, print_owner)
        }
    }
}

fn print_owner(owner: &Owner) {
    let state = if owner.enabled {
        "enabled".green()
    } else {
        "disabled".red()
    };
    println!("Owner {} ({})", owner.id.yellow().bold(), state);
    println!("  Username: {}", owner.username);
    println!("  Company: {}", owner.company.cyan());
}

// ---- Marbles ----

fn cmd_marble(registry: &FileRegistry, action: MarbleAction, format: OutputFormat) -> anyhow::Result<()> {
    match action {
        MarbleAction::Create { id, color, size, owner, company } => {
            let marble = checked(registry.create_marble(&[id, color, size, owner, company]))?;
            emit(format, &marble, |m| {
                println!("{} Created marble {}", "✓".green().bold(), m.id.yellow());
                print_marble(m);
            })
        }
        MarbleAction::Transfer { id, new_owner, company } => {
            let marble = checked(registry.transfer_marble(&[id, new_owner, company]))?;
            emit(format, &marble, |m| {
                println!(
                    "{} Transferred marble {} to {}",
                    "✓".green().bold(),
                    m.id.yellow(),
                    m.owner.id.bold()
                );
            })
        }
        MarbleAction::Delete { id, company } => {
            checked(registry.delete_marble(&[id.clone(), company]))?;
            emit(format, &serde_json::json!({ "deleted": id }), |_| {
                println!("{} Deleted marble {}", "✓".green().bold(), id.yellow());
            })
        }
        MarbleAction::Show { id } => {
            let marble = checked(registry.get_marble(&[id]))?;
            emit(format, &marble, print_marble)
        }
    }
}

fn print_marble(marble: &Marble) {
    println!("Marble {}", marble.id.yellow().bold());
    println!("  Color: {}", marble.color);
    println!("  Size: {}", marble.size);
    println!(
        "  Owner: {} ({} @ {})",
        marble.owner.id.bold(),
        marble.owner.username,
        marble.owner.company.cyan()
    );
}

// ---- Vehicles ----

fn cmd_vehicle(registry: &FileRegistry, action: VehicleAction, format: OutputFormat) -> anyhow::Result<()> {
    match action {
        VehicleAction::Create(args) => {
            let vehicle = checked(registry.create_vehicle(&args.to_args()))?;
            emit(format, &vehicle, |v| {
                println!("{} Registered vehicle {}", "✓".green().bold(), v.vehicle_id.yellow());
            })
        }
        VehicleAction::Update(args) => {
            let vehicle = checked(registry.update_vehicle(&args.to_args()))?;
            emit(format, &vehicle, |v| {
                println!("{} Updated vehicle {}", "✓".green().bold(), v.vehicle_id.yellow());
                if let Some(tx) = v.last_transaction() {
                    let summary = tx.tvalue.trim_start_matches(',');
                    if summary.is_empty() {
                        println!("  No tracked fields changed.");
                    } else {
                        for change in summary.split(',') {
                            println!("  {}", change);
                        }
                    }
                }
            })
        }
        VehicleAction::Show { id } => {
            let vehicle = checked(registry.get_vehicle(&[id]))?;
            emit(format, &vehicle, print_vehicle)
        }
        VehicleAction::List { owner } => {
            let vehicles = checked(registry.get_all_vehicles(&[owner]))?;
            emit(format, &vehicles, |vs| {
                if vs.is_empty() {
                    println!("No vehicles.");
                }
                for v in vs {
                    println!(
                        "{}  {} {}  VIN {}  {}",
                        v.vehicle_id.yellow(),
                        v.make,
                        v.variant,
                        v.vin.bold(),
                        v.owner.name.cyan()
                    );
                }
            })
        }
        VehicleAction::ByVin { vin } => {
            let vehicle = checked(registry.get_vehicle_by_vin(&[vin]))?;
            emit(format, &vehicle, print_vehicle)
        }
        VehicleAction::ByChassis { chassis_number } => {
            let vehicle = checked(registry.get_vehicle_by_chassis_number(&[chassis_number]))?;
            emit(format, &vehicle, print_vehicle)
        }
    }
}

fn print_vehicle(vehicle: &Vehicle) {
    println!("Vehicle {}", vehicle.vehicle_id.yellow().bold());
    println!("  {} {} ({}, {}, {})", vehicle.make, vehicle.variant, vehicle.engine, vehicle.gear_box, vehicle.color);
    println!("  VIN: {}  Chassis: {}", vehicle.vin.bold(), vehicle.chassis_number);
    println!("  Manufactured: {}", vehicle.date_of_manufacture);
    if !vehicle.owner.name.is_empty() {
        println!("  Owner: {} {} {}", vehicle.owner.name.cyan(), vehicle.owner.phone, vehicle.owner.email);
    }
    if !vehicle.dealer.name.is_empty() {
        println!("  Dealer: {} {} {}", vehicle.dealer.name, vehicle.dealer.phone, vehicle.dealer.email);
    }
    if !vehicle.license_plate_number.is_empty() {
        println!("  Plate: {}", vehicle.license_plate_number);
    }
    if !vehicle.warranty_start_date.is_empty() {
        println!("  Warranty: {} → {}", vehicle.warranty_start_date, vehicle.warranty_end_date);
    }
    for part in &vehicle.parts {
        println!("  Part: {} ({})", part.part_id.bold(), part.product_code);
    }
    println!("  History:");
    for tx in &vehicle.vehicle_transactions {
        println!("    {} {} by {} {}", tx.updated_on.dimmed(), tx.ttype.green(), tx.updated_by, tx.tvalue);
    }
    for service in &vehicle.vehicle_service {
        println!(
            "  Service {} by {}: {}",
            service.service_done_on.dimmed(),
            service.service_done_by,
            service.service_description
        );
    }
}

// ---- Parts ----

fn cmd_part(registry: &FileRegistry, action: PartAction, format: OutputFormat) -> anyhow::Result<()> {
    match action {
        PartAction::Create { part_id, product_code, manufacture_date, user } => {
            let part = checked(registry.create_part(&[part_id, product_code, manufacture_date, user]))?;
            emit(format, &part, |p| {
                println!("{} Registered part {}", "✓".green().bold(), p.part_id.yellow());
            })
        }
        PartAction::Update(args) => {
            let part = checked(registry.update_part(&args.to_args()))?;
            emit(format, &part, |p| {
                println!(
                    "{} Updated part {} ({} transactions)",
                    "✓".green().bold(),
                    p.part_id.yellow(),
                    p.transactions.len()
                );
            })
        }
        PartAction::Show { id } => {
            let part = checked(registry.get_part(&[id]))?;
            emit(format, &part, print_part)
        }
        PartAction::List { user } => {
            let parts = checked(registry.get_all_parts(&[user]))?;
            emit(format, &parts, |ps| {
                if ps.is_empty() {
                    println!("No parts.");
                }
                for p in ps {
                    println!("{}  {}  {} transactions", p.part_id.yellow(), p.product_code, p.transactions.len());
                }
            })
        }
    }
}

fn print_part(part: &Part) {
    println!("Part {} ({})", part.part_id.yellow().bold(), part.product_code);
    for tx in &part.transactions {
        let mut line = format!("  {} by {}", tx.ttype.green(), tx.user);
        if !tx.date_of_manufacture.is_empty() {
            line.push_str(&format!(", manufactured {}", tx.date_of_manufacture));
        }
        if !tx.vehicle_id.is_empty() {
            line.push_str(&format!(", vehicle {}", tx.vehicle_id));
        }
        if !tx.date_of_installation.is_empty() {
            line.push_str(&format!(", installed {}", tx.date_of_installation));
        }
        if !tx.warranty_start_date.is_empty() {
            line.push_str(&format!(", warranty {} → {}", tx.warranty_start_date, tx.warranty_end_date));
        }
        println!("{line}");
    }
}
