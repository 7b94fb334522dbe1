use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::step::{cargo, OnFailure};
use crate::{DRIVER_CRATES, EMBEDDED_TARGET};

pub fn run(host_only: bool) -> Result<()> {
    println!();
    println!("{}", "🔍 Checking driver crates...".cyan().bold());
    println!();

    let total_start = Instant::now();

    // no_std: each driver on its own, with and without defmt logging.
    if !host_only {
        for krate in DRIVER_CRATES {
            cargo(
                &format!("Checking {krate} ({EMBEDDED_TARGET})"),
                &["check", "-p", krate, "--target", EMBEDDED_TARGET, "--no-default-features"],
                OnFailure::Abort,
            )?;
            cargo(
                &format!("Checking {krate} with defmt"),
                &["check", "-p", krate, "--target", EMBEDDED_TARGET, "--features", "defmt"],
                OnFailure::Abort,
            )?;
        }
    }

    cargo(
        "Checking workspace (host, all features)",
        &["check", "--workspace", "--all-targets", "--all-features"],
        OnFailure::Abort,
    )?;

    cargo(
        "Running clippy lints",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        OnFailure::Warn,
    )?;

    if cargo("Checking code formatting", &["fmt", "--all", "--check"], OnFailure::Warn)?.is_none() {
        eprintln!("     Run 'cargo fmt --all' to fix");
    }

    println!(
        "{}",
        format!("✓ All checks completed in {:.2}s", total_start.elapsed().as_secs_f64())
            .green()
            .bold()
    );
    println!();

    Ok(())
}
