use anyhow::Result;
use colored::Colorize;

use crate::step::{cargo, OnFailure};

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building documentation...".cyan().bold());
    println!();

    let mut args = vec!["doc", "--workspace", "--no-deps", "--exclude", "xtask", "--features", "platform/serde"];
    if open {
        args.push("--open");
    }
    cargo("Documentation build", &args, OnFailure::Abort)?;

    if !open {
        println!(
            "   {}",
            "Open target/doc/tm1628/index.html in your browser".dimmed()
        );
        println!("   {}", "Or run 'cargo run -p xtask -- doc --open'".dimmed());
        println!();
    }

    Ok(())
}
