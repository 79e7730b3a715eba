//! The simulation engine — drives one frame at a time.
//!
//! FRAME ORDER (fixed, never reordered):
//!   0. Termination check (engine internal). A uniform arena ends the
//!      game before anything else happens this frame.
//!   1. Steering subsystem: every entity, in creation order, chases,
//!      flees or escapes, converting prey on contact.
//!
//! RULES:
//!   - Subsystems execute in registration order, every tick.
//!   - All randomness flows through the RngBank.
//!   - Subsystem events are recorded in the in-memory event log.

use crate::{
    arena::Arena,
    clock::SimClock,
    command::ControlCommand,
    config::SimConfig,
    error::SimResult,
    event::{EventLogEntry, SimEvent},
    kind::{Kind, KindCounts},
    rng::{RngBank, SubsystemSlot},
    snapshot::{FrameSink, FrameSnapshot},
    steering_subsystem::{SteeringStats, SteeringSubsystem},
    store::SimStore,
    subsystem::SimSubsystem,
    termination,
    types::{RunId, Tick},
};

/// Result of a single call to [`SimEngine::tick`].
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// A frame ran. Carries every event of the frame, engine markers included.
    Advanced { tick: Tick, events: Vec<SimEvent> },
    /// The arena is uniform; no frame ran.
    Concluded { winner: Kind },
    /// The clock is paused; no frame ran.
    Paused,
}

pub struct SimEngine {
    pub run_id:   RunId,
    pub clock:    SimClock,
    pub rng_bank: RngBank,
    pub store:    SimStore,
    config:       SimConfig,
    arena:        Arena,
    generation:   u64,
    subsystems:   Vec<(SubsystemSlot, Box<dyn SimSubsystem>)>,
    event_log:    Vec<EventLogEntry>,
    winner:       Option<Kind>,
}

impl SimEngine {
    /// Wire an engine around an already populated store.
    /// Used directly for hand-placed scenarios.
    pub fn new(run_id: RunId, seed: u64, config: SimConfig, store: SimStore) -> SimResult<Self> {
        config.validate()?;
        let arena = Arena::from_config(&config);
        let mut engine = Self {
            clock:      SimClock::new(run_id.clone()),
            rng_bank:   RngBank::new(seed),
            store,
            config,
            arena,
            generation: 0,
            subsystems: Vec::new(),
            event_log:  Vec::new(),
            winner:     None,
            run_id,
        };

        let steering = SteeringSubsystem::new(&engine.config);
        engine.register(SubsystemSlot::Steering, Box::new(steering));

        let init = SimEvent::RunInitialized {
            run_id:     engine.run_id.clone(),
            seed,
            population: engine.store.len(),
        };
        engine.record(0, "engine", &init)?;
        engine.clock.resume();

        log::info!(
            "run {} initialized: seed={seed} population={} arena={}x{}",
            engine.run_id,
            engine.store.len(),
            engine.arena.width,
            engine.arena.height
        );
        Ok(engine)
    }

    /// Build a fully wired engine with a randomly placed population.
    /// Call this instead of new() unless positions are hand-placed.
    pub fn build(run_id: RunId, seed: u64, config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let arena = Arena::from_config(&config);
        let mut rng = RngBank::new(seed).for_subsystem_at_tick(SubsystemSlot::Placement, 0);
        let mut store = SimStore::new();
        store.populate(config.population_per_kind, &arena, &mut rng);
        Self::new(run_id, seed, config, store)
    }

    /// Register a subsystem. Call in the documented frame order.
    pub fn register(&mut self, slot: SubsystemSlot, subsystem: Box<dyn SimSubsystem>) {
        self.subsystems.push((slot, subsystem));
    }

    /// Advance one frame. This is the core simulation step.
    pub fn tick(&mut self) -> SimResult<TickOutcome> {
        if let Some(winner) = self.winner {
            return Ok(TickOutcome::Concluded { winner });
        }
        if self.clock.paused {
            return Ok(TickOutcome::Paused);
        }
        if let Some(winner) = self.check_termination()? {
            return Ok(TickOutcome::Concluded { winner });
        }

        let current_tick = self.clock.advance();
        let mut tick_events: Vec<SimEvent> = vec![
            SimEvent::TickStarted { tick: current_tick }
        ];

        // Each subsystem sees all events emitted so far this tick.
        for (slot, subsystem) in &mut self.subsystems {
            let mut rng = self.rng_bank.for_subsystem_at_tick(*slot, current_tick);
            let new_events =
                subsystem.update(current_tick, &mut self.store, &tick_events, &mut rng)?;

            for event in &new_events {
                self.event_log.push(log_entry(
                    &self.run_id,
                    self.generation,
                    current_tick,
                    subsystem.name(),
                    event,
                )?);
            }
            tick_events.extend(new_events);
        }

        tick_events.push(SimEvent::TickCompleted { tick: current_tick });
        Ok(TickOutcome::Advanced { tick: current_tick, events: tick_events })
    }

    /// Run up to n frames, stopping early once a winner is known.
    /// Returns the winner, if any.
    pub fn run_ticks(&mut self, n: u64) -> SimResult<Option<Kind>> {
        for _ in 0..n {
            match self.tick()? {
                TickOutcome::Advanced { .. } => {}
                TickOutcome::Concluded { winner } => return Ok(Some(winner)),
                TickOutcome::Paused => break,
            }
        }
        Ok(self.winner)
    }

    /// Run frames until a winner emerges or `max_ticks` frames have run,
    /// handing every frame and the final result to `sink`.
    pub fn run_until_concluded(
        &mut self,
        max_ticks: u64,
        sink: &mut dyn FrameSink,
    ) -> SimResult<Option<Kind>> {
        let mut frames = 0;
        while frames < max_ticks {
            match self.tick()? {
                TickOutcome::Advanced { .. } => {
                    frames += 1;
                    sink.on_frame(&self.frame());
                }
                TickOutcome::Concluded { winner } => {
                    sink.on_winner(winner, &self.frame());
                    return Ok(Some(winner));
                }
                TickOutcome::Paused => return Ok(None),
            }
        }
        // The last frame may have been the deciding one.
        let winner = self.check_termination()?;
        if let Some(winner) = winner {
            sink.on_winner(winner, &self.frame());
        }
        Ok(winner)
    }

    /// Clear the arena and start a new game with a fresh layout.
    pub fn reset(&mut self) -> SimResult<()> {
        self.generation += 1;
        self.store.clear();
        self.winner = None;
        self.clock = SimClock::new(self.run_id.clone());
        for (_, subsystem) in &mut self.subsystems {
            subsystem.reset();
        }

        let mut rng = self
            .rng_bank
            .for_subsystem_at_tick(SubsystemSlot::Placement, self.generation);
        self.store.populate(self.config.population_per_kind, &self.arena, &mut rng);

        let event = SimEvent::SimulationReset {
            run_id:     self.run_id.clone(),
            generation: self.generation,
        };
        self.record(0, "engine", &event)?;
        self.clock.resume();

        log::info!("run {} restarted (generation {})", self.run_id, self.generation);
        Ok(())
    }

    /// Execute a control command. Returns the winner, if the game is over.
    pub fn apply_command(&mut self, command: &ControlCommand) -> SimResult<Option<Kind>> {
        log::debug!("command: {command:?}");
        match command {
            ControlCommand::Pause => self.clock.pause(),
            ControlCommand::Resume => {
                if self.winner.is_none() {
                    self.clock.resume();
                }
            }
            ControlCommand::Restart => self.reset()?,
            ControlCommand::Step { count } => {
                self.run_ticks(*count)?;
            }
        }
        Ok(self.winner)
    }

    /// Current positions and kinds, for the presentation layer.
    pub fn frame(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self.clock.current_tick, &self.store, self.winner)
    }

    pub fn winner(&self) -> Option<Kind> {
        self.winner
    }

    pub fn counts(&self) -> KindCounts {
        self.store.counts()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Number of restarts since the engine was built.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Every recorded event since the engine was built, across restarts.
    pub fn event_log(&self) -> &[EventLogEntry] {
        &self.event_log
    }

    /// Recorded events for `tick` of the current game.
    pub fn events_for_tick(&self, tick: Tick) -> Vec<&EventLogEntry> {
        self.event_log
            .iter()
            .filter(|e| e.generation == self.generation && e.tick == tick)
            .collect()
    }

    /// Query the SteeringSubsystem's running totals.
    /// Used by sim-runner to print end-of-run summaries.
    pub fn steering_stats(&self) -> Option<SteeringStats> {
        self.subsystems.iter().find_map(|(_, sub)| {
            sub.as_any()
                .downcast_ref::<SteeringSubsystem>()
                .map(|s| s.stats)
        })
    }

    /// Record the winner once the arena is uniform.
    fn check_termination(&mut self) -> SimResult<Option<Kind>> {
        if self.winner.is_some() {
            return Ok(self.winner);
        }
        let counts = self.store.counts();
        let Some(winner) = termination::detect(&counts) else {
            return Ok(None);
        };

        let tick = self.clock.current_tick;
        self.winner = Some(winner);
        self.clock.pause();
        self.record(tick, "engine", &SimEvent::GameConcluded { tick, winner, counts })?;
        log::info!("tick={tick} {} {winner} wins with {}", winner.glyph(), counts.total());
        Ok(Some(winner))
    }

    fn record(&mut self, tick: Tick, subsystem: &str, event: &SimEvent) -> SimResult<()> {
        let entry = log_entry(&self.run_id, self.generation, tick, subsystem, event)?;
        self.event_log.push(entry);
        Ok(())
    }
}

fn log_entry(
    run_id: &str,
    generation: u64,
    tick: Tick,
    subsystem: &str,
    event: &SimEvent,
) -> SimResult<EventLogEntry> {
    Ok(EventLogEntry {
        run_id:     run_id.to_string(),
        generation,
        tick,
        subsystem:  subsystem.to_string(),
        event_type: event.type_name().to_string(),
        payload:    serde_json::to_string(event)?,
    })
}
