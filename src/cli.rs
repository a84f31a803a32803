use clap::{Parser, Subcommand};
use std::path::PathBuf;

use swan_registry::registry::Imei;

#[derive(Parser, Debug)]
#[command(name = "swanctl")]
#[command(about = "Manage swan devices in the device registry", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to $SWAN_CONFIG or config/swan.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a device by submitting the add-device form
    Add(AddArgs),
    /// Delete a device
    Delete(DeleteArgs),
    /// Show the full record of a device
    Show(ShowArgs),
    /// List registered devices
    List,
    /// Interactive session over one page
    Shell,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// IMEI of the new device
    pub imei: String,

    /// Extra form field, repeatable
    #[arg(long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    #[arg(value_parser = parse_imei)]
    pub imei: Imei,

    /// Do not ask for confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    #[arg(value_parser = parse_imei)]
    pub imei: Imei,
}

/// Parse `name=value`; the value may be empty, the name may not
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", raw)),
    }
}

fn parse_imei(raw: &str) -> Result<Imei, String> {
    Imei::new(raw).map_err(|e| e.to_string())
}
