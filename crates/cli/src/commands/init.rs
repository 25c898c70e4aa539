use anyhow::{Context, Result};

use crate::args::InitArgs;
use crate::printing::{print_header, print_parameters};

pub fn init_simulation(args: &InitArgs) -> Result<()> {
    print_header();

    let config = args.sim.build_config()?;
    print_parameters(&config);

    config
        .to_json_file(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("\n✓ Configuration written to {}", args.output.display());
    println!("  Run it with: sickle run --config {}", args.output.display());
    Ok(())
}
