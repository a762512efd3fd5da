//! Part Ledger: parts with an append-only installation and warranty
//! history, indexed in `allParts`.

use arl_gate::ArgSpec;
use arl_types::{DocKind, Part, PartRoster, PartTransaction};
use tracing::{debug, info};

use crate::context::Env;
use crate::error::RegistryResult;
use crate::roster;

const CREATE_PART: &[ArgSpec] = &[
    ArgSpec::required("partId"),
    ArgSpec::required_text("productCode"),
    ArgSpec::required_text("dateOfManufacture"),
    ArgSpec::required_text("user"),
];

const UPDATE_PART: &[ArgSpec] = &[
    ArgSpec::required("partId"),
    ArgSpec::optional_text("vehicleId"),
    ArgSpec::optional_text("dateOfDelivery"),
    ArgSpec::optional_text("dateOfInstallation"),
    ArgSpec::required_text("user"),
    ArgSpec::optional_text("warrantyStartDate"),
    ArgSpec::optional_text("warrantyEndDate"),
    ArgSpec::required_text("transactionType"),
];

const GET_PART: &[ArgSpec] = &[ArgSpec::required_text("partId")];

const GET_ALL_PARTS: &[ArgSpec] = &[ArgSpec::optional_text("user")];

/// `[partId, productCode, dateOfManufacture, user]`
pub fn create_part(env: &Env<'_>, args: &[String]) -> RegistryResult<Part> {
    env.check(CREATE_PART, args)?;
    let part_id = &args[0];
    env.check_entity_id(part_id)?;
    debug!(part_id = %part_id, "create part");

    env.ensure_vacant(DocKind::Part, part_id)?;
    let part = Part::manufactured(
        part_id.as_str(),
        args[1].as_str(),
        args[2].as_str(),
        args[3].as_str(),
    );
    env.save(part.clone())?;
    roster::append::<PartRoster>(env.store, part_id)?;
    info!(part_id = %part_id, "part created");
    Ok(part)
}

/// `[partId, vehicleId, dateOfDelivery, dateOfInstallation, user,
/// warrantyStartDate, warrantyEndDate, transactionType]`
///
/// Appends exactly one transaction. The roster is untouched.
pub fn update_part(env: &Env<'_>, args: &[String]) -> RegistryResult<Part> {
    env.check(UPDATE_PART, args)?;
    let part_id = &args[0];
    debug!(part_id = %part_id, ttype = %args[7], "update part");

    let mut part: Part = env.load(part_id)?;
    part.transactions.push(PartTransaction {
        ttype: args[7].clone(),
        user: args[4].clone(),
        vehicle_id: args[1].clone(),
        date_of_delivery: args[2].clone(),
        date_of_installation: args[3].clone(),
        warranty_start_date: args[5].clone(),
        warranty_end_date: args[6].clone(),
        ..Default::default()
    });
    env.save(part.clone())?;
    info!(
        part_id = %part.part_id,
        transactions = part.transactions.len(),
        "part updated"
    );
    Ok(part)
}

/// `[partId]`
pub fn get_part(env: &Env<'_>, args: &[String]) -> RegistryResult<Part> {
    env.check(GET_PART, args)?;
    env.load(&args[0])
}

/// `[user]`: parts in roster order. An empty user lists every part,
/// otherwise only parts with a transaction recorded by that user.
pub fn get_all_parts(env: &Env<'_>, args: &[String]) -> RegistryResult<Vec<Part>> {
    env.check(GET_ALL_PARTS, args)?;
    let filter = args[0].as_str();
    let parts = roster::resolve_all::<PartRoster, Part>(env)?;
    if filter.is_empty() {
        return Ok(parts);
    }
    Ok(parts
        .into_iter()
        .filter(|p| p.transactions.iter().any(|tx| tx.user == filter))
        .collect())
}
