//! Lifecycle facade for interactive front ends.
//!
//! [`SimulationController`] owns at most one [`Simulation`] and adds the
//! start/pause/resume/reset commands plus the tick period a clock should
//! use. It never runs a clock itself: the caller invokes [`tick`] on each
//! timer fire, and the controller decides whether the tick actually runs.
//!
//! [`tick`]: SimulationController::tick

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::base::GenotypeCounts;
use crate::errors::ControllerError;
use crate::genome::IndividualId;
use crate::simulation::{
    Configuration, Environment, Simulation, SimulationBuilder, TickReport, TickStats,
    RESET_SICKLE_START_PERCENT,
};

/// Receives the aggregate counts after every completed tick.
pub trait TickObserver {
    fn on_tick(&mut self, stats: &TickStats);
}

impl<F> TickObserver for F
where
    F: FnMut(&TickStats),
{
    fn on_tick(&mut self, stats: &TickStats) {
        self(stats)
    }
}

/// The parameters a front end passes to `start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StartParams {
    pub population_size: usize,
    pub sickle_start_percent: u32,
    pub allow_growth: bool,
    pub reproduction_rate: f64,
    pub death_rate: f64,
    pub mutation_rate: f64,
    pub healthcare_available: bool,
    pub malaria_region: bool,
}

impl Default for StartParams {
    fn default() -> Self {
        Self::from(&Configuration::default())
    }
}

impl From<&Configuration> for StartParams {
    fn from(config: &Configuration) -> Self {
        let evo = &config.evolution;
        Self {
            population_size: config.execution.population_size,
            sickle_start_percent: config.initialization.sickle_start_percent,
            allow_growth: evo.allow_growth,
            reproduction_rate: evo.reproduction.rate(),
            death_rate: evo.mortality.death_rate(),
            mutation_rate: evo.mutation.rate(),
            healthcare_available: evo.environment.healthcare_available,
            malaria_region: evo.environment.malaria_region,
        }
    }
}

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No simulation has been started yet
    Idle,
    Running,
    Paused,
}

/// Start/pause/reset facade over a [`Simulation`].
pub struct SimulationController {
    /// Settings not covered by [`StartParams`] (seed, floor, caps, drift)
    template: Configuration,
    simulation: Option<Simulation>,
    last_params: Option<StartParams>,
    state: ControllerState,
    tick_interval_ms: u64,
    observers: Vec<Box<dyn TickObserver>>,
}

impl Default for SimulationController {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}

impl std::fmt::Debug for SimulationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationController")
            .field("state", &self.state)
            .field("tick_interval_ms", &self.tick_interval_ms)
            .field("generation", &self.generation())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl SimulationController {
    /// Create an idle controller. `template` supplies everything a start
    /// request does not override.
    pub fn new(template: Configuration) -> Self {
        let tick_interval_ms = template.execution.tick_interval_ms.max(1);
        Self {
            template,
            simulation: None,
            last_params: None,
            state: ControllerState::Idle,
            tick_interval_ms,
            observers: Vec::new(),
        }
    }

    /// Register an observer for per-tick counts.
    pub fn subscribe(&mut self, observer: impl TickObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Discard any current run, seed fresh founders and begin ticking.
    ///
    /// Observers receive the generation-0 counts immediately.
    pub fn start(&mut self, params: StartParams) -> Result<(), ControllerError> {
        let simulation = SimulationBuilder::from_configuration(&self.template)
            .population_size(params.population_size)
            .sickle_start_percent(params.sickle_start_percent)
            .allow_growth(params.allow_growth)
            .reproduction_rate(params.reproduction_rate)
            .death_rate(params.death_rate)
            .mutation_rate(params.mutation_rate)
            .healthcare(params.healthcare_available)
            .malaria_region(params.malaria_region)
            .build()?;

        info!(
            population_size = params.population_size,
            sickle_start_percent = params.sickle_start_percent,
            allow_growth = params.allow_growth,
            healthcare = params.healthcare_available,
            malaria = params.malaria_region,
            "simulation started"
        );

        let stats = stats_of(0, simulation.counts());
        self.simulation = Some(simulation);
        self.last_params = Some(params);
        self.state = ControllerState::Running;
        self.notify(&stats);
        Ok(())
    }

    /// Restart with the last parameters and a 30% sickle start. Un-pauses.
    pub fn reset(&mut self) -> Result<(), ControllerError> {
        let mut params = self.last_params.ok_or(ControllerError::NotStarted)?;
        params.sickle_start_percent = RESET_SICKLE_START_PERCENT;
        info!("simulation reset");
        self.start(params)
    }

    pub fn pause(&mut self) {
        if self.state == ControllerState::Running {
            self.state = ControllerState::Paused;
            info!(generation = self.generation(), "simulation paused");
        }
    }

    pub fn resume(&mut self) {
        if self.state == ControllerState::Paused {
            self.state = ControllerState::Running;
            info!(generation = self.generation(), "simulation resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            ControllerState::Running => self.pause(),
            ControllerState::Paused => self.resume(),
            ControllerState::Idle => {}
        }
    }

    pub fn is_paused(&self) -> bool {
        self.state == ControllerState::Paused
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Change the clock period, clamped to at least 1 ms.
    pub fn set_tick_interval(&mut self, ms: u64) {
        self.tick_interval_ms = ms.max(1);
        info!(tick_interval_ms = self.tick_interval_ms, "tick interval changed");
    }

    pub fn tick_interval(&self) -> u64 {
        self.tick_interval_ms
    }

    /// Run one tick if the controller is running.
    ///
    /// Returns `Ok(None)` while idle or paused.
    pub fn tick(&mut self) -> Result<Option<TickReport>, ControllerError> {
        if self.state != ControllerState::Running {
            return Ok(None);
        }
        let Some(simulation) = self.simulation.as_mut() else {
            return Ok(None);
        };
        let report = simulation.step()?;
        self.notify(&report.stats());
        Ok(Some(report))
    }

    pub fn simulation(&self) -> Option<&Simulation> {
        self.simulation.as_ref()
    }

    pub fn generation(&self) -> usize {
        self.simulation.as_ref().map_or(0, Simulation::generation)
    }

    pub fn counts(&self) -> Option<GenotypeCounts> {
        self.simulation.as_ref().map(Simulation::counts)
    }

    /// A founder for lineage display.
    pub fn root_ancestor(&self) -> Option<IndividualId> {
        self.simulation.as_ref()?.root_ancestor()
    }

    /// Environment flags of the current run, for display.
    pub fn environment(&self) -> Option<Environment> {
        self.simulation.as_ref().map(Simulation::environment)
    }

    pub fn last_params(&self) -> Option<&StartParams> {
        self.last_params.as_ref()
    }

    fn notify(&mut self, stats: &TickStats) {
        for observer in &mut self.observers {
            observer.on_tick(stats);
        }
    }
}

fn stats_of(generation: usize, counts: GenotypeCounts) -> TickStats {
    TickStats {
        generation,
        healthy: counts.healthy,
        carrier: counts.carrier,
        sickle: counts.sickle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn seeded_controller() -> SimulationController {
        let mut template = Configuration::default();
        template.execution.seed = Some(42);
        SimulationController::new(template)
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut controller = seeded_controller();
        assert_eq!(controller.state(), ControllerState::Idle);
        assert!(controller.tick().unwrap().is_none());
        assert!(matches!(controller.reset(), Err(ControllerError::NotStarted)));
    }

    #[test]
    fn test_start_and_tick() {
        let mut controller = seeded_controller();
        controller.start(StartParams::default()).unwrap();
        assert_eq!(controller.state(), ControllerState::Running);
        assert_eq!(controller.counts().unwrap().total(), 100);

        let report = controller.tick().unwrap().unwrap();
        assert_eq!(report.generation, 1);
        assert_eq!(controller.generation(), 1);
    }

    #[test]
    fn test_pause_suspends_ticks() {
        let mut controller = seeded_controller();
        controller.start(StartParams::default()).unwrap();
        controller.tick().unwrap();

        controller.pause();
        assert!(controller.is_paused());
        for _ in 0..5 {
            assert!(controller.tick().unwrap().is_none());
        }
        assert_eq!(controller.generation(), 1);

        controller.toggle_pause();
        assert!(!controller.is_paused());
        assert!(controller.tick().unwrap().is_some());
        assert_eq!(controller.generation(), 2);
    }

    #[test]
    fn test_reset_uses_thirty_percent_and_unpauses() {
        let mut controller = seeded_controller();
        let params = StartParams {
            sickle_start_percent: 0,
            ..StartParams::default()
        };
        controller.start(params).unwrap();
        assert_eq!(controller.counts().unwrap().healthy, 100);
        controller.run_ticks(3);
        controller.pause();

        controller.reset().unwrap();
        assert!(!controller.is_paused());
        assert_eq!(controller.generation(), 0);
        assert_eq!(controller.last_params().unwrap().sickle_start_percent, 30);
        assert!(controller.counts().unwrap().healthy < 100);
    }

    #[test]
    fn test_tick_interval_clamped() {
        let mut controller = seeded_controller();
        assert_eq!(controller.tick_interval(), 100);
        controller.set_tick_interval(0);
        assert_eq!(controller.tick_interval(), 1);
        controller.set_tick_interval(250);
        assert_eq!(controller.tick_interval(), 250);
    }

    #[test]
    fn test_observers_receive_every_tick() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut controller = seeded_controller();
        controller.subscribe(move |stats: &TickStats| sink.borrow_mut().push(*stats));
        controller.start(StartParams::default()).unwrap();
        controller.run_ticks(4);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 5);
        let generations: Vec<usize> = seen.iter().map(|s| s.generation).collect();
        assert_eq!(generations, vec![0, 1, 2, 3, 4]);
        assert_eq!(seen[0].population_size(), 100);
    }

    #[test]
    fn test_invalid_start_leaves_controller_idle() {
        let mut controller = seeded_controller();
        let params = StartParams {
            death_rate: 3.0,
            ..StartParams::default()
        };
        assert!(controller.start(params).is_err());
        assert_eq!(controller.state(), ControllerState::Idle);
        assert!(controller.simulation().is_none());
    }

    #[test]
    fn test_environment_and_root_ancestor() {
        let mut controller = seeded_controller();
        assert!(controller.environment().is_none());
        controller.start(StartParams::default()).unwrap();
        assert!(controller.environment().unwrap().malaria_region);

        let root = controller.root_ancestor().unwrap();
        let sim = controller.simulation().unwrap();
        assert!(sim.population().individual(root).unwrap().is_founder());
    }

    impl SimulationController {
        fn run_ticks(&mut self, n: usize) {
            for _ in 0..n {
                self.tick().unwrap();
            }
        }
    }
}
