//! # catshop CLI
//!
//! Prices cart documents from the command line.
//!
//! ## Commands
//! ```text
//! catshop total cart.json              → 14580
//! catshop breakdown cart.json          → { "subtotal": 9000, ..., "total": 14580 }
//! catshop --now 2025-01-01T00:00:00Z total cart.json
//! cat cart.json | catshop total -
//! ```

pub mod config;
pub mod error;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use catshop_core::validation::CartDocument;
use catshop_core::{price_cart, Clock, FixedClock, PricingBreakdown, SystemClock};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use crate::config::CliConfig;
use crate::error::CliError;

/// Catshop cart pricing.
///
/// Reads a cart document (items plus an optional coupon) and prints what the
/// customer pays.
#[derive(Parser, Debug)]
#[command(name = "catshop", version, about)]
pub struct Cli {
    /// Price as of this RFC 3339 instant instead of the system clock.
    /// Overrides CATSHOP_NOW.
    #[arg(long, global = true)]
    pub now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the final amount due in minor units.
    Total(CartArgs),
    /// Print subtotal, coupon outcome, discount and total as JSON.
    Breakdown(CartArgs),
}

#[derive(Args, Debug)]
pub struct CartArgs {
    /// Path to the cart JSON document, or `-` for stdin.
    pub cart: PathBuf,
}

/// Executes a parsed command, writing results to `out`.
pub fn run<W: Write>(cli: &Cli, config: &CliConfig, out: &mut W) -> Result<(), CliError> {
    let clock: Box<dyn Clock> = match cli.now.or(config.fixed_now) {
        Some(instant) => {
            debug!(%instant, "using fixed clock");
            Box::new(FixedClock::new(instant))
        }
        None => Box::new(SystemClock),
    };

    match &cli.command {
        Command::Total(args) => {
            let breakdown = price_file(&args.cart, clock.as_ref())?;
            writeln!(out, "{}", breakdown.total)?;
        }
        Command::Breakdown(args) => {
            let breakdown = price_file(&args.cart, clock.as_ref())?;
            if config.pretty_json {
                serde_json::to_writer_pretty(&mut *out, &breakdown)?;
            } else {
                serde_json::to_writer(&mut *out, &breakdown)?;
            }
            writeln!(out)?;
        }
    }

    Ok(())
}

fn price_file(path: &Path, clock: &dyn Clock) -> Result<PricingBreakdown, CliError> {
    let json = read_document(path)?;
    let cart = CartDocument::from_json(&json)?;
    info!(
        path = %path.display(),
        items = cart.item_count(),
        coupon = cart.coupon.is_some(),
        "cart loaded"
    );

    let breakdown = price_cart(&cart.items, cart.coupon.as_ref(), clock);
    info!(
        subtotal = %breakdown.subtotal,
        total = %breakdown.total,
        "cart priced"
    );

    Ok(breakdown)
}

fn read_document(path: &Path) -> Result<String, CliError> {
    let read = || -> io::Result<String> {
        if path.as_os_str() == "-" {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        } else {
            fs::read_to_string(path)
        }
    };

    read().map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}
