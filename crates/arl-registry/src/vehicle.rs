//! Vehicle Ledger: vehicles with change-tracked updates, an append-only
//! transaction history, and service records.

use arl_gate::ArgSpec;
use arl_types::{
    warranty_end_date, Contact, DocKind, PartRef, Vehicle, VehicleRoster, VehicleService,
    VehicleTransaction,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::context::Env;
use crate::error::{RegistryError, RegistryResult};
use crate::roster;
use crate::summary::{ChangeSummary, PartChange};

const CREATE_VEHICLE: &[ArgSpec] = &[
    ArgSpec::required_text("make"),
    ArgSpec::required_text("chassisNumber"),
    ArgSpec::required_text("vin"),
    ArgSpec::required_text("user"),
    ArgSpec::required_text("variant"),
    ArgSpec::required_text("engine"),
    ArgSpec::required_text("gearBox"),
    ArgSpec::required_text("color"),
    ArgSpec::optional_text("image"),
];

const UPDATE_VEHICLE: &[ArgSpec] = &[
    ArgSpec::required_text("vehicleId"),
    ArgSpec::required_text("transactionType"),
    ArgSpec::optional_text("ownerName"),
    ArgSpec::optional_text("ownerPhone"),
    ArgSpec::optional_text("ownerEmail"),
    ArgSpec::optional_text("dealerName"),
    ArgSpec::optional_text("dealerPhone"),
    ArgSpec::optional_text("dealerEmail"),
    ArgSpec::optional_text("licensePlateNumber"),
    ArgSpec::optional_text("dateOfDelivery"),
    ArgSpec::optional_text("warrantyStartDate"),
    ArgSpec::optional_text("warrantyEndDate"),
    ArgSpec::required_text("user"),
    ArgSpec::optional_text("parts"),
    ArgSpec::optional_text("serviceFlag"),
    ArgSpec::optional_text("serviceDescription"),
];

const GET_VEHICLE: &[ArgSpec] = &[ArgSpec::required_text("vehicleId")];
const GET_BY_VIN: &[ArgSpec] = &[ArgSpec::required_text("vin")];
const GET_BY_CHASSIS: &[ArgSpec] = &[ArgSpec::required_text("chassisNumber")];
const GET_ALL_VEHICLES: &[ArgSpec] = &[ArgSpec::optional_text("ownerName")];

/// Service flag value that records a service visit.
pub const SERVICE_FLAG: &str = "Y";

/// `[make, chassisNumber, vin, user, variant, engine, gearBox, color, image]`
///
/// The id is generated; the manufacture date is the current time.
pub fn create_vehicle(env: &Env<'_>, args: &[String]) -> RegistryResult<Vehicle> {
    env.check(CREATE_VEHICLE, args)?;
    let vehicle_id = Uuid::now_v7().to_string();
    debug!(vehicle_id = %vehicle_id, vin = %args[2], "create vehicle");
    env.ensure_vacant(DocKind::Vehicle, &vehicle_id)?;

    let now = env.now();
    let vehicle = Vehicle {
        vehicle_id: vehicle_id.clone(),
        make: args[0].clone(),
        chassis_number: args[1].clone(),
        vin: args[2].clone(),
        date_of_manufacture: now.clone(),
        variant: args[4].clone(),
        engine: args[5].clone(),
        gear_box: args[6].clone(),
        color: args[7].clone(),
        image: args[8].clone(),
        owner: Contact::default(),
        dealer: Contact::default(),
        vehicle_transactions: vec![VehicleTransaction::created(args[3].as_str(), now)],
        ..Default::default()
    };
    env.save(vehicle.clone())?;
    roster::append::<VehicleRoster>(env.store, &vehicle_id)?;
    info!(vehicle_id = %vehicle_id, "vehicle created");
    Ok(vehicle)
}

/// `[vehicleId, transactionType, ownerName, ownerPhone, ownerEmail,
/// dealerName, dealerPhone, dealerEmail, licensePlateNumber, dateOfDelivery,
/// warrantyStartDate, warrantyEndDate, user, parts, serviceFlag,
/// serviceDescription]`
///
/// Owner, plate, delivery and warranty fields are change-tracked into the
/// transaction's summary. Dealer fields are overwritten without tracking.
/// A non-empty warranty start date replaces the supplied end date with
/// start + 1 year.
pub fn update_vehicle(env: &Env<'_>, args: &[String]) -> RegistryResult<Vehicle> {
    env.check(UPDATE_VEHICLE, args)?;
    let vehicle_id = &args[0];
    let ttype = &args[1];
    let actor = &args[12];
    debug!(vehicle_id = %vehicle_id, ttype = %ttype, "update vehicle");

    let warranty_start = args[10].as_str();
    let warranty_end = if warranty_start.is_empty() {
        args[11].clone()
    } else {
        warranty_end_date(warranty_start)?
    };
    let new_parts = parse_parts(&args[13])?;

    let mut vehicle: Vehicle = env.load(vehicle_id)?;
    let mut summary = ChangeSummary::new();

    summary.track("Owner Name", &mut vehicle.owner.name, &args[2]);
    summary.track("Owner Phone", &mut vehicle.owner.phone, &args[3]);
    summary.track("Owner Email", &mut vehicle.owner.email, &args[4]);
    vehicle.dealer = Contact::new(args[5].as_str(), args[6].as_str(), args[7].as_str());
    summary.track(
        "License Plate Number",
        &mut vehicle.license_plate_number,
        &args[8],
    );
    summary.track("Date of Delivery", &mut vehicle.date_of_delivery, &args[9]);
    summary.track(
        "Warranty Start Date",
        &mut vehicle.warranty_start_date,
        warranty_start,
    );
    summary.track(
        "Warranty End Date",
        &mut vehicle.warranty_end_date,
        &warranty_end,
    );

    if !new_parts.is_empty() {
        summary.begin_parts();
        for part in &new_parts {
            // "Replaced" keeps the earlier reference; the list only grows.
            let change = if vehicle.has_part(&part.part_id) {
                PartChange::Replaced
            } else {
                PartChange::Added
            };
            summary.part(change, &part.part_id);
            vehicle.parts.push(part.clone());
        }
    }

    let now = env.now();
    vehicle.vehicle_transactions.push(VehicleTransaction {
        ttype: ttype.clone(),
        tvalue: summary.into_string(),
        updated_by: actor.clone(),
        updated_on: now.clone(),
        warranty_start_date: warranty_start.to_string(),
        warranty_end_date: warranty_end,
    });

    if args[14] == SERVICE_FLAG {
        vehicle.vehicle_service.push(VehicleService {
            service_description: args[15].clone(),
            service_done_by: actor.clone(),
            service_done_on: now,
            parts: new_parts,
        });
    }

    env.save(vehicle.clone())?;
    info!(
        vehicle_id = %vehicle.vehicle_id,
        transactions = vehicle.vehicle_transactions.len(),
        "vehicle updated"
    );
    Ok(vehicle)
}

/// Parse `partId-productCode[,partId-productCode...]`.
///
/// The product code is everything after the first `-`. Blank entries are
/// skipped; an empty spec yields no parts.
pub fn parse_parts(spec: &str) -> RegistryResult<Vec<PartRef>> {
    if spec.is_empty() {
        return Ok(Vec::new());
    }
    let mut parts = Vec::new();
    for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (part_id, product_code) = entry.split_once('-').ok_or_else(|| {
            RegistryError::invalid(format!(
                "part entry '{entry}' must be of the form partId-productCode"
            ))
        })?;
        if part_id.is_empty() {
            return Err(RegistryError::invalid(format!(
                "part entry '{entry}' has an empty part id"
            )));
        }
        parts.push(PartRef::new(part_id, product_code));
    }
    if parts.is_empty() {
        return Err(RegistryError::invalid(format!(
            "parts '{spec}' lists no part"
        )));
    }
    Ok(parts)
}

/// `[vehicleId]`
pub fn get_vehicle(env: &Env<'_>, args: &[String]) -> RegistryResult<Vehicle> {
    env.check(GET_VEHICLE, args)?;
    env.load(&args[0])
}

/// `[ownerName]`: every vehicle in roster order, or only those whose owner
/// name equals a non-empty filter.
pub fn get_all_vehicles(env: &Env<'_>, args: &[String]) -> RegistryResult<Vec<Vehicle>> {
    env.check(GET_ALL_VEHICLES, args)?;
    let filter = args[0].as_str();
    let vehicles = roster::resolve_all::<VehicleRoster, Vehicle>(env)?;
    if filter.is_empty() {
        return Ok(vehicles);
    }
    Ok(vehicles
        .into_iter()
        .filter(|v| v.owner.name == filter)
        .collect())
}

/// `[vin]`
pub fn get_vehicle_by_vin(env: &Env<'_>, args: &[String]) -> RegistryResult<Vehicle> {
    env.check(GET_BY_VIN, args)?;
    find_vehicle(env, &args[0], |v| v.vin == args[0])
}

/// `[chassisNumber]`
pub fn get_vehicle_by_chassis_number(env: &Env<'_>, args: &[String]) -> RegistryResult<Vehicle> {
    env.check(GET_BY_CHASSIS, args)?;
    find_vehicle(env, &args[0], |v| v.chassis_number == args[0])
}

fn find_vehicle(
    env: &Env<'_>,
    key: &str,
    matches: impl Fn(&Vehicle) -> bool,
) -> RegistryResult<Vehicle> {
    roster::resolve_all::<VehicleRoster, Vehicle>(env)?
        .into_iter()
        .find(|v| matches(v))
        .ok_or_else(|| RegistryError::not_found(DocKind::Vehicle, key))
}
