use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "arl",
    about = "Asset Registry Ledger: owners, marbles, vehicles and parts over a key-value ledger",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: ./arl.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Ledger file, overriding `ledger_path` from the config
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Seed the empty vehicle and part rosters
    Init,
    /// Create, disable, or show owners
    Owner {
        #[command(subcommand)]
        action: OwnerAction,
    },
    /// Create, transfer, delete, or show marbles
    Marble {
        #[command(subcommand)]
        action: MarbleAction,
    },
    /// Register, update, and query vehicles
    Vehicle {
        #[command(subcommand)]
        action: VehicleAction,
    },
    /// Register, update, and query parts
    Part {
        #[command(subcommand)]
        action: PartAction,
    },
    /// Print the raw JSON stored under a key
    Read { key: String },
}

#[derive(Subcommand)]
pub enum OwnerAction {
    /// Create an enabled owner
    Create {
        id: String,
        username: String,
        company: String,
    },
    /// Disable an owner
    Disable {
        id: String,
        /// Company authorizing the change
        #[arg(long)]
        company: String,
    },
    Show { id: String },
}

#[derive(Subcommand)]
pub enum MarbleAction {
    /// Create a marble owned by an existing owner
    Create {
        id: String,
        color: String,
        size: String,
        owner: String,
        /// Company authorizing the creation
        #[arg(long)]
        company: String,
    },
    /// Move a marble to another owner
    Transfer {
        id: String,
        new_owner: String,
        /// Company authorizing the transfer (the current owner's)
        #[arg(long)]
        company: String,
    },
    Delete {
        id: String,
        #[arg(long)]
        company: String,
    },
    Show { id: String },
}

#[derive(Subcommand)]
pub enum VehicleAction {
    /// Register a vehicle; prints its generated id
    Create(CreateVehicleArgs),
    /// Record an update against a vehicle
    Update(UpdateVehicleArgs),
    Show { id: String },
    /// List vehicles, optionally only those of one owner
    List {
        #[arg(long, default_value = "")]
        owner: String,
    },
    ByVin { vin: String },
    ByChassis { chassis_number: String },
}

#[derive(Args)]
pub struct CreateVehicleArgs {
    pub make: String,
    pub chassis_number: String,
    pub vin: String,
    pub variant: String,
    pub engine: String,
    pub gear_box: String,
    pub color: String,
    #[arg(long)]
    pub user: String,
    #[arg(long, default_value = "")]
    pub image: String,
}

impl CreateVehicleArgs {
    pub fn to_args(&self) -> Vec<String> {
        vec![
            self.make.clone(),
            self.chassis_number.clone(),
            self.vin.clone(),
            self.user.clone(),
            self.variant.clone(),
            self.engine.clone(),
            self.gear_box.clone(),
            self.color.clone(),
            self.image.clone(),
        ]
    }
}

/// Every field except the id, type and user defaults to empty. Owner,
/// plate, delivery and warranty fields replace the stored value even when
/// empty, so pass the current value to keep it.
#[derive(Args)]
pub struct UpdateVehicleArgs {
    pub vehicle_id: String,
    #[arg(long = "type")]
    pub ttype: String,
    #[arg(long)]
    pub user: String,
    #[arg(long, default_value = "")]
    pub owner_name: String,
    #[arg(long, default_value = "")]
    pub owner_phone: String,
    #[arg(long, default_value = "")]
    pub owner_email: String,
    #[arg(long, default_value = "")]
    pub dealer_name: String,
    #[arg(long, default_value = "")]
    pub dealer_phone: String,
    #[arg(long, default_value = "")]
    pub dealer_email: String,
    #[arg(long, default_value = "")]
    pub license_plate: String,
    #[arg(long, default_value = "")]
    pub delivery_date: String,
    /// `YYYY-Mon-DD`; sets the end date to one year later
    #[arg(long, default_value = "")]
    pub warranty_start: String,
    #[arg(long, default_value = "")]
    pub warranty_end: String,
    /// `partId-productCode[,partId-productCode...]`
    #[arg(long, default_value = "")]
    pub parts: String,
    /// Record a service visit
    #[arg(long)]
    pub service: bool,
    #[arg(long, default_value = "")]
    pub service_description: String,
}

impl UpdateVehicleArgs {
    pub fn to_args(&self) -> Vec<String> {
        vec![
            self.vehicle_id.clone(),
            self.ttype.clone(),
            self.owner_name.clone(),
            self.owner_phone.clone(),
            self.owner_email.clone(),
            self.dealer_name.clone(),
            self.dealer_phone.clone(),
            self.dealer_email.clone(),
            self.license_plate.clone(),
            self.delivery_date.clone(),
            self.warranty_start.clone(),
            self.warranty_end.clone(),
            self.user.clone(),
            self.parts.clone(),
            if self.service { "Y".into() } else { String::new() },
            self.service_description.clone(),
        ]
    }
}

#[derive(Subcommand)]
pub enum PartAction {
    /// Register a manufactured part
    Create {
        part_id: String,
        product_code: String,
        manufacture_date: String,
        #[arg(long)]
        user: String,
    },
    /// Record an installation or warranty event
    Update(UpdatePartArgs),
    Show { id: String },
    /// List parts, optionally only those touched by one user
    List {
        #[arg(long, default_value = "")]
        user: String,
    },
}

#[derive(Args)]
pub struct UpdatePartArgs {
    pub part_id: String,
    #[arg(long = "type")]
    pub ttype: String,
    #[arg(long)]
    pub user: String,
    #[arg(long, default_value = "")]
    pub vehicle: String,
    #[arg(long, default_value = "")]
    pub delivery_date: String,
    #[arg(long, default_value = "")]
    pub installation_date: String,
    #[arg(long, default_value = "")]
    pub warranty_start: String,
    #[arg(long, default_value = "")]
    pub warranty_end: String,
}

impl UpdatePartArgs {
    pub fn to_args(&self) -> Vec<String> {
        vec![
            self.part_id.clone(),
            self.vehicle.clone(),
            self.delivery_date.clone(),
            self.installation_date.clone(),
            self.user.clone(),
            self.warranty_start.clone(),
            self.warranty_end.clone(),
            self.ttype.clone(),
        ]
    }
}
