//! This module contains the main game logic and state.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule};
use bevy_ecs::world::World;
use rand::rngs::SmallRng;
use tracing::{debug, error, info};

use crate::constants::mechanics;
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent};
use crate::map::builder::Map;
use crate::snapshot::Snapshot;
use crate::systems::{
    self, FireControl, GameStage, GhostBundle, GlobalState, PelletCount, PlayerBundle, PlayerLives, PowerState, Pursuit,
    PursuitPolicy, RestartRequested, RoseSpawner, ScoreResource, SpawnRng,
};
use crate::time::{GameTime, TimeSource};

/// Core game state manager built on the Bevy ECS architecture.
///
/// The `World` is the single owner of every piece of simulation state, and the
/// `Schedule` is the only thing that mutates it. Each call to [`Game::tick`] samples
/// the clock once and runs the gameplay systems in a fixed order.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
    clock: Box<dyn TimeSource>,
}

impl Game {
    /// Builds a game on `map`, spawning the player and one ghost per ghost spawn.
    ///
    /// `clock` drives every timed mechanic and `rng` every random one, so passing a
    /// manual clock and a seeded generator makes the simulation fully reproducible.
    pub fn new(map: Map, clock: impl TimeSource + 'static, rng: SmallRng) -> GameResult<Game> {
        info!("Starting game initialization");

        let mut world = World::default();
        let mut schedule = Schedule::default();

        debug!("Setting up ECS event registry");
        Self::setup_ecs(&mut world);

        debug!("Spawning player and ghosts");
        Self::spawn_entities(&mut world, &map)?;

        debug!("Inserting resources into ECS world");
        Self::insert_resources(&mut world, map, rng, clock.now());

        debug!("Configuring system execution schedule");
        Self::configure_schedule(&mut schedule);

        info!(pellets = world.resource::<PelletCount>().0, "Game initialization completed successfully");
        Ok(Game {
            world,
            schedule,
            clock: Box::new(clock),
        })
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameError>(world);
        EventRegistry::register_event::<GameEvent>(world);
    }

    fn spawn_entities(world: &mut World, map: &Map) -> GameResult<()> {
        world.spawn(PlayerBundle::new(map.player_start(), mechanics::START_DIRECTION));

        for (index, &start) in map.ghost_starts().iter().enumerate() {
            let index = u8::try_from(index)
                .map_err(|_| GameError::InvalidState(format!("Too many ghost spawns: {}", map.ghost_starts().len())))?;
            world.spawn(GhostBundle::new(index, start));
            debug!(ghost = index, position = %start, "Ghost spawned");
        }
        Ok(())
    }

    fn insert_resources(world: &mut World, map: Map, rng: SmallRng, now: std::time::Duration) {
        world.insert_resource(PelletCount(map.count_pellets()));
        world.insert_resource(map);
        world.insert_resource(GlobalState { exit: false });
        world.insert_resource(ScoreResource(0));
        world.insert_resource(PlayerLives::default());
        world.insert_resource(GameStage::default());
        world.insert_resource(PowerState::default());
        world.insert_resource(FireControl::default());
        world.insert_resource(RoseSpawner::default());
        world.insert_resource(RestartRequested::default());
        world.insert_resource(Pursuit::default());
        world.insert_resource(SpawnRng(rng));
        world.insert_resource(GameTime { now, ticks: 0 });
    }

    fn configure_schedule(schedule: &mut Schedule) {
        let gameplay_systems = (
            systems::rose_spawner_system,
            systems::player_movement_system,
            systems::pellet_system,
            systems::rose_collect_system,
            systems::heart_fire_system,
            systems::heart_movement_system,
            systems::heart_cleanup_system,
            systems::ghost_movement_system,
            systems::ghost_collision_system,
        )
            .chain()
            .distributive_run_if(systems::is_playing);

        schedule.add_systems(
            (
                systems::player_control_system,
                systems::restart_system.run_if(systems::restart_requested),
                gameplay_systems,
            )
                .chain(),
        );
    }

    /// Queues an input command. It is applied at the start of the next tick.
    pub fn send(&mut self, command: GameCommand) {
        self.world.send_event(GameEvent::from(command));
    }

    /// Resets the whole game right away, from any stage.
    pub fn restart(&mut self) {
        systems::reset_world(&mut self.world);
    }

    /// Replaces the policy the ghosts use to pick their direction.
    pub fn set_pursuit(&mut self, policy: impl PursuitPolicy + 'static) {
        self.world.insert_resource(Pursuit(Box::new(policy)));
    }

    /// Runs one simulation tick.
    ///
    /// Samples the clock once, runs the schedule, then rotates the event buffers and
    /// logs any errors the systems reported.
    ///
    /// # Returns
    ///
    /// `true` if the game should terminate (exit command received), `false` to continue
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        {
            let mut time = self.world.resource_mut::<GameTime>();
            time.now = now;
            time.ticks += 1;
        }

        self.schedule.run(&mut self.world);

        self.world.resource_mut::<Events<GameEvent>>().update();
        let mut errors = self.world.resource_mut::<Events<GameError>>();
        for error in errors.drain() {
            error!(%error, "System reported an error");
        }

        self.world.resource::<GlobalState>().exit
    }

    /// Copies the current state out for rendering.
    pub fn snapshot(&mut self) -> GameResult<Snapshot> {
        Snapshot::capture(&mut self.world)
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    pub fn score(&self) -> u32 {
        self.world.resource::<ScoreResource>().0
    }

    pub fn lives(&self) -> u8 {
        self.world.resource::<PlayerLives>().0
    }

    pub fn pellets_remaining(&self) -> u32 {
        self.world.resource::<PelletCount>().0
    }

    pub fn ticks(&self) -> u64 {
        self.world.resource::<GameTime>().ticks
    }

    pub fn map(&self) -> &Map {
        self.world.resource::<Map>()
    }
}
