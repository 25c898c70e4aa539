use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;
use tracing::info;

use sickle_analysis::{summarize, PopulationSummary};
use sickle_sim::genome::IndividualId;
use sickle_sim::simulation::{
    Configuration, Environment, SimulationController, StartParams, TickStats,
};

use crate::args::RunArgs;
use crate::printing::{print_header, print_parameters, print_summary, table_header, table_row};

/// Machine-readable result of `sickle run --json`.
#[derive(Debug, Serialize)]
struct RunOutput {
    summary: PopulationSummary,
    environment: Option<Environment>,
    root_ancestor: Option<IndividualId>,
    lineage_size: usize,
}

pub fn run_simulation(args: &RunArgs) -> Result<()> {
    let config = args.source.load()?;
    let total_generations = config.execution.total_generations;

    if !args.json {
        print_header();
        print_parameters(&config);
        println!();
    }

    let progress = if args.json || args.no_progress {
        None
    } else {
        let pb = ProgressBar::new(total_generations as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {per_sec}",
                )
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        Some(pb)
    };

    let mut controller = start_controller(&config, args, progress.clone())?;

    if args.fast {
        for _ in 0..total_generations {
            advance(&mut controller, progress.as_ref())?;
        }
    } else {
        run_on_clock(&mut controller, total_generations, progress.as_ref())?;
    }

    if let Some(pb) = &progress {
        pb.finish_with_message("Simulation complete");
    }

    let counts = controller
        .counts()
        .context("Simulation was not started")?;
    let summary = summarize(controller.generation(), &counts);
    info!(generation = summary.generation, "run finished");

    if args.json {
        let output = RunOutput {
            summary,
            environment: controller.environment(),
            root_ancestor: controller.root_ancestor(),
            lineage_size: controller
                .simulation()
                .map_or(0, |sim| sim.population().lineage().len()),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(&summary);
        if let Some(root) = controller.root_ancestor() {
            println!("  • Root Ancestor: {root}");
        }
    }

    Ok(())
}

/// Create the controller, wire the table printer and start the run.
fn start_controller(
    config: &Configuration,
    args: &RunArgs,
    progress: Option<ProgressBar>,
) -> Result<SimulationController> {
    let mut controller = SimulationController::new(config.clone());

    if !args.json && args.report_every > 0 {
        let every = args.report_every;
        // a hidden bar swallows println, so fall back to stdout
        let emit = move |line: String| match &progress {
            Some(pb) if !pb.is_hidden() => pb.println(line),
            _ => println!("{line}"),
        };
        emit(table_header());
        controller.subscribe(move |stats: &TickStats| {
            if stats.generation % every == 0 {
                emit(table_row(stats));
            }
        });
    }

    controller
        .start(StartParams::from(config))
        .context("Failed to start simulation")?;
    Ok(controller)
}

/// Pace ticks on a tokio interval honouring the controller's tick period.
fn run_on_clock(
    controller: &mut SimulationController,
    total_generations: usize,
    progress: Option<&ProgressBar>,
) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to create Tokio runtime")?;

    rt.block_on(async {
        let period = Duration::from_millis(controller.tick_interval());
        let mut clock = tokio::time::interval(period);
        for _ in 0..total_generations {
            clock.tick().await;
            advance(controller, progress)?;
        }
        Ok::<_, anyhow::Error>(())
    })
}

fn advance(controller: &mut SimulationController, progress: Option<&ProgressBar>) -> Result<()> {
    if controller
        .tick()
        .context("Simulation invariant violated")?
        .is_some()
    {
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }
    Ok(())
}
