use anyhow::{Context, Result};

use sickle_sim::simulation::SimulationBuilder;

use crate::args::LineageArgs;
use crate::printing::print_header;

/// Run without pacing, then print the family tree of one root ancestor.
pub fn show_lineage(args: &LineageArgs) -> Result<()> {
    let config = args.source.load()?;
    let generations = config.execution.total_generations;

    let mut sim = SimulationBuilder::from_configuration(&config)
        .build()
        .context("Invalid simulation parameters")?;
    sim.run_for(generations)
        .context("Simulation invariant violated")?;

    print_header();
    println!(
        "\n🌳 Lineage after {} generations ({} individuals ever lived, {} alive)",
        sim.generation(),
        sim.population().lineage().len(),
        sim.population().size()
    );

    let root = sim
        .root_ancestor()
        .context("Population is empty; no root ancestor")?;
    let lineage = sim.population().lineage();
    let tree = lineage
        .tree(root, args.depth)
        .context("Root ancestor missing from lineage")?;

    println!("  • Root Ancestor: {root}");
    println!("  • Descendants: {}", lineage.descendant_count(root));
    if let Some(first) = sim.population().ids().first() {
        if let Some(depth) = lineage.depth(*first) {
            println!("  • Generations from first live individual: {depth}");
        }
    }
    println!();
    print!("{}", tree.render());
    Ok(())
}
