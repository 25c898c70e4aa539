use sickle_analysis::PopulationSummary;
use sickle_sim::evolution::RemovalPolicy;
use sickle_sim::simulation::{Configuration, RegionPreset, TickStats};

pub fn print_header() {
    println!("🩸 Sickle - Sickle-Cell Allele Population Simulator");
    println!("===================================================");
}

pub fn print_parameters(config: &Configuration) {
    let exec = &config.execution;
    let evo = &config.evolution;

    println!("\n📋 Simulation Configuration");
    println!(
        "  • Population Size: {} [-n, --population-size]",
        exec.population_size
    );
    println!("  • Generations: {} [-g, --generations]", exec.total_generations);
    match exec.seed {
        Some(seed) => println!("  • Random Seed: {seed} [--seed]"),
        None => println!("  • Random Seed: Random [--seed]"),
    }
    println!("  • Tick Interval: {} ms [--tick-interval-ms]", exec.tick_interval_ms);
    println!("  • Population Floor: {}", exec.population_floor);

    println!("\n🧬 Founders");
    println!(
        "  • Sickle Start: {}% [-s, --sickle-start]",
        config.initialization.sickle_start_percent
    );

    println!("\n⚡ Mutation");
    println!("  • Rate: {} per tick [-m, --mutation-rate]", evo.mutation.rate());

    println!("\n👶 Reproduction");
    if evo.allow_growth {
        println!(
            "  • Rate: {} [--reproduction-rate], capped at {} births/tick [--max-births]",
            evo.reproduction.rate(),
            evo.reproduction.max_births_per_tick()
        );
        match evo.reproduction.mating_bias() {
            Some(bias) => println!(
                "  • Mating Bias: SS rejected {:.0}% of the time",
                bias.ss_rejection_probability * 100.0
            ),
            None => println!("  • Mating Bias: None"),
        }
    } else {
        println!("  • Growth: Disabled [--allow-growth]");
    }

    println!("\n💀 Mortality");
    println!("  • Death Rate: {} [-d, --death-rate]", evo.mortality.death_rate());
    println!(
        "  • Cap: {:.0}% of population per tick",
        evo.mortality.cap_fraction() * 100.0
    );
    println!("  • Removal: {} [--removal]", removal_label(evo.mortality.removal()));
    match &evo.drift {
        Some(drift) => println!(
            "  • Drift: Enabled, capped at {:.0}% per tick",
            drift.cap_fraction() * 100.0
        ),
        None => println!("  • Drift: Disabled [--drift]"),
    }

    println!("\n🌍 Environment");
    println!(
        "  • Healthcare: {}",
        yes_no(evo.environment.healthcare_available)
    );
    println!("  • Malaria Region: {}", yes_no(evo.environment.malaria_region));
}

pub fn print_regions() {
    println!("\n🌍 Region Presets");
    for preset in RegionPreset::ALL {
        match preset.parameters() {
            Some((percent, mutation_rate, healthcare, malaria)) => println!(
                "  • {:<14} sickle start {:>3}%, mutation {:<7} healthcare {:<3} malaria {}",
                preset.name(),
                percent,
                mutation_rate,
                yes_no(healthcare),
                yes_no(malaria)
            ),
            None => println!("  • {:<14} keep the current parameters", preset.name()),
        }
    }
}

pub fn table_header() -> String {
    format!(
        "{:>10} {:>8} {:>8} {:>8} {:>8}",
        "Generation", "AA", "AS", "SS", "Total"
    )
}

pub fn table_row(stats: &TickStats) -> String {
    format!(
        "{:>10} {:>8} {:>8} {:>8} {:>8}",
        stats.generation,
        stats.healthy,
        stats.carrier,
        stats.sickle,
        stats.population_size()
    )
}

pub fn print_summary(summary: &PopulationSummary) {
    println!("\n📊 Final Generation {}", summary.generation);
    println!(
        "  • Population: {} (AA {}, AS {}, SS {})",
        summary.population_size,
        summary.counts.healthy,
        summary.counts.carrier,
        summary.counts.sickle
    );
    println!(
        "  • Allele Frequencies: A {:.4}, S {:.4}",
        summary.allele_frequencies.a, summary.allele_frequencies.s
    );
    println!(
        "  • Heterozygosity: observed {:.4}, expected {:.4}",
        summary.observed_heterozygosity, summary.expected_heterozygosity
    );
    println!("  • Inbreeding Coefficient F: {:.4}", summary.inbreeding_coefficient);
    println!(
        "  • Hardy-Weinberg χ²: {:.3}{}",
        summary.hwe_chi_square,
        if summary.hwe_chi_square > 3.84 {
            " (departs from equilibrium)"
        } else {
            ""
        }
    );
}

fn removal_label(policy: RemovalPolicy) -> &'static str {
    match policy {
        RemovalPolicy::FirstHit => "first-hit",
        RemovalPolicy::UpToCap => "up-to-cap",
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
