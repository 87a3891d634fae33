//! Admin bootstrap CLI.
//!
//! Inserts an admin account into the configured database so the
//! verification endpoints are reachable on a fresh deployment.

use anyhow::{bail, Result};
use clap::Parser;
use dotenv::dotenv;

use clinic_backend::auth::{AccountStore, Role};
use clinic_backend::error::ApiError;

#[derive(Parser, Debug)]
#[command(name = "create_admin", about = "Create an admin account")]
struct Args {
    #[arg(long)]
    email: String,

    #[arg(long)]
    password: String,

    #[arg(long)]
    full_name: Option<String>,

    #[arg(long, env = "DATABASE_PATH", default_value = "clinic.db")]
    db_path: String,
}

fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    if args.password.len() < 8 {
        bail!("Password must be at least 8 characters");
    }

    let store = AccountStore::new(&args.db_path)
        .map_err(|e| anyhow::anyhow!("Failed to open database: {e}"))?;

    match store.create(
        &args.email,
        &args.password,
        args.full_name.as_deref(),
        Role::Admin,
    ) {
        Ok(account) => {
            println!("Admin account created: {} ({})", account.email, account.id);
            Ok(())
        }
        Err(ApiError::DuplicateEmail) => bail!("An account with this email already exists"),
        Err(e) => bail!("Failed to create admin: {e}"),
    }
}
