//! The simulation aggregate.
//!
//! [`WorldState`] owns the grid, the inventory, and the player, and is the
//! only thing the host talks to. Construction follows a fixed order: the
//! block catalog is static, then the grid is created, the generator fills
//! it, and finally the player and inventory start out. Nothing happens at
//! startup outside [`WorldState::new`].

use std::f32::consts::{FRAC_PI_2, TAU};

use blockyard_core::{Resource, Result};
use blockyard_input::{FrameIntents, Intent};
use blockyard_physics::{
    GridRaycaster, PlayerController, PlayerState, RaycastHit, StepInput, StepReport,
};
use blockyard_world::{GenerationStats, InstanceData, WorldGenerator, WorldGrid};
use glam::Mat4;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::interaction::{self, InteractionEngine, MineOutcome, PlaceOutcome};
use crate::inventory::Inventory;
use crate::observer::GameObserver;

/// What happened during a tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Player integrator result.
    pub step: StepReport,
    /// Mining actions taken this tick, in order.
    pub mined: Vec<MineOutcome>,
    /// Placement actions taken this tick, in order.
    pub placed: Vec<PlaceOutcome>,
}

/// Grid, inventory, and player for one running world.
pub struct WorldState {
    config: GameConfig,
    grid: WorldGrid,
    inventory: Inventory,
    player: PlayerState,
    controller: PlayerController,
    interaction: InteractionEngine,
    inventory_open: bool,
    generation: GenerationStats,
}

impl WorldState {
    /// Validate `config`, generate the world, and spawn the player.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let mut grid = WorldGrid::new();
        let mut generator = WorldGenerator::new(config.generation.clone())?;
        let generation = generator.generate(&mut grid);

        let mut state = Self::assemble(config, grid);
        state.generation = generation;
        info!(
            blocks = state.grid.len(),
            spawn = ?state.player.position,
            "World ready"
        );
        Ok(state)
    }

    /// Use a prepared grid instead of generating one.
    pub fn with_grid(config: GameConfig, grid: WorldGrid) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, grid))
    }

    fn assemble(config: GameConfig, grid: WorldGrid) -> Self {
        let player = PlayerState::spawn(&config.physics);
        let controller = PlayerController::new(config.physics.clone());
        let interaction = InteractionEngine::new(
            config.interaction.clone(),
            &config.physics,
            config.generation.surface_y,
        );
        Self {
            config,
            grid,
            inventory: Inventory::new(),
            player,
            controller,
            interaction,
            inventory_open: false,
            generation: GenerationStats::default(),
        }
    }

    /// Get the configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Placed blocks.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &WorldGrid {
        &self.grid
    }

    /// Resource counters.
    #[inline]
    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Mutable resource counters.
    #[inline]
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Player state.
    #[inline]
    #[must_use]
    pub const fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Mutable player state.
    #[inline]
    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    /// What world generation produced. All zero for [`WorldState::with_grid`].
    #[inline]
    #[must_use]
    pub const fn generation_stats(&self) -> &GenerationStats {
        &self.generation
    }

    /// Returns true while the inventory screen is shown.
    #[inline]
    #[must_use]
    pub const fn is_inventory_open(&self) -> bool {
        self.inventory_open
    }

    /// Returns true if movement, mining, and placement are enabled.
    #[inline]
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.player.locked_to_view && !self.inventory_open
    }

    /// Per-block render records.
    #[must_use]
    pub fn instance_data(&self) -> Vec<InstanceData> {
        self.grid.instance_data()
    }

    /// Camera world transform: eye position and view rotation.
    #[must_use]
    pub fn camera_transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.player.orientation(), self.player.position)
    }

    /// Capture or release the pointer.
    ///
    /// Capturing is refused while the inventory screen is open. Returns the
    /// resulting lock state.
    pub fn set_pointer_locked(&mut self, locked: bool, observer: &mut dyn GameObserver) -> bool {
        let locked = locked && !self.inventory_open;
        if self.player.locked_to_view != locked {
            self.player.locked_to_view = locked;
            debug!(locked, "Pointer lock changed");
            observer.pointer_lock_changed(locked);
        }
        locked
    }

    /// Open or close the inventory screen. Opening releases the pointer.
    pub fn toggle_inventory(&mut self, observer: &mut dyn GameObserver) {
        self.inventory_open = !self.inventory_open;
        debug!(open = self.inventory_open, "Inventory screen toggled");
        observer.inventory_screen_changed(self.inventory_open);
        if self.inventory_open {
            self.set_pointer_locked(false, observer);
        }
    }

    /// Switch the build kind between wood and stone.
    pub fn toggle_build_kind(&mut self, observer: &mut dyn GameObserver) -> Resource {
        let kind = self.player.toggle_build_kind();
        debug!(kind = kind.label(), "Build kind toggled");
        observer.build_kind_changed(kind);
        kind
    }

    /// Turn the view by pointer motion, in radians. Ignored unless
    /// interactive. Pitch is clamped to straight up and straight down.
    pub fn look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        if !self.is_interactive() {
            return;
        }
        self.player.yaw = (self.player.yaw + yaw_delta).rem_euclid(TAU);
        self.player.pitch = (self.player.pitch + pitch_delta).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Block under the crosshair.
    #[must_use]
    pub fn target(&self) -> Option<RaycastHit> {
        let query = GridRaycaster::new(&self.grid, self.config.physics.block_size);
        self.interaction.target(&query, &self.player)
    }

    /// Hit the block described by `hit`, as reported by an external picking
    /// query. Does not check the pointer lock.
    pub fn mine_at(
        &mut self,
        hit: Option<&RaycastHit>,
        observer: &mut dyn GameObserver,
    ) -> MineOutcome {
        let outcome = interaction::mine(&mut self.grid, &mut self.inventory, hit);
        if outcome.credited().is_some() {
            observer.inventory_changed(&self.inventory);
        }
        outcome
    }

    /// Place against the face described by `hit`, as reported by an external
    /// picking query. Does not check the pointer lock.
    pub fn place_at(
        &mut self,
        hit: Option<&RaycastHit>,
        observer: &mut dyn GameObserver,
    ) -> PlaceOutcome {
        let outcome =
            self.interaction
                .place(&mut self.grid, &mut self.inventory, &self.player, hit);
        if outcome.is_placed() {
            observer.inventory_changed(&self.inventory);
        }
        outcome
    }

    /// Advance one frame.
    ///
    /// Triggers are applied in arrival order before the player moves, so
    /// mining and placement use the view from the end of the previous tick.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn tick(
        &mut self,
        intents: &FrameIntents,
        dt: f32,
        observer: &mut dyn GameObserver,
    ) -> TickReport {
        let mut report = TickReport::default();
        let mut jump = false;

        for &trigger in &intents.triggers {
            match trigger {
                Intent::ToggleInventory => self.toggle_inventory(observer),
                Intent::ToggleBuildKind => {
                    self.toggle_build_kind(observer);
                }
                Intent::Jump => jump = true,
                Intent::Mine if self.is_interactive() => {
                    let hit = self.target();
                    report.mined.push(self.mine_at(hit.as_ref(), observer));
                }
                Intent::Place if self.is_interactive() => {
                    let hit = self.target();
                    report.placed.push(self.place_at(hit.as_ref(), observer));
                }
                Intent::Mine
                | Intent::Place
                | Intent::MoveForward
                | Intent::MoveBackward
                | Intent::MoveLeft
                | Intent::MoveRight => {}
            }
        }

        let input = StepInput {
            moves: intents.moves,
            jump,
            active: self.is_interactive(),
        };
        report.step = self
            .controller
            .step(&self.grid, &mut self.player, input, dt);
        if report.step.respawned {
            info!(spawn = ?self.player.position, "Player respawned");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use blockyard_core::{BlockKind, Error};
    use blockyard_input::MoveFlags;
    use glam::Vec3;

    use crate::observer::NullObserver;

    #[derive(Default)]
    struct Recorder {
        inventories: Vec<Inventory>,
        kinds: Vec<Resource>,
        screens: Vec<bool>,
        locks: Vec<bool>,
    }

    impl GameObserver for Recorder {
        fn inventory_changed(&mut self, inventory: &Inventory) {
            self.inventories.push(*inventory);
        }
        fn build_kind_changed(&mut self, kind: Resource) {
            self.kinds.push(kind);
        }
        fn inventory_screen_changed(&mut self, open: bool) {
            self.screens.push(open);
        }
        fn pointer_lock_changed(&mut self, locked: bool) {
            self.locks.push(locked);
        }
    }

    /// One stone block under a player standing on it and looking down.
    fn stone_pad() -> WorldState {
        let mut grid = WorldGrid::new();
        grid.insert(BlockKind::Stone, Vec3::new(0.0, -1.5, 0.0));
        let mut state = WorldState::with_grid(GameConfig::default(), grid).unwrap();

        let player = state.player_mut();
        player.position = Vec3::new(0.2, -0.5, 0.3);
        player.velocity = Vec3::ZERO;
        player.grounded = true;
        player.pitch = -FRAC_PI_2;
        state.set_pointer_locked(true, &mut NullObserver);
        state
    }

    /// Stand back from the pad and look at the middle of its top face.
    fn facing_pad(state: &mut WorldState) {
        let player = state.player_mut();
        player.position = Vec3::new(0.2, -0.5, 1.3);
        player.pitch = -(0.5_f32 / 1.1).atan();
    }

    fn repeat(trigger: Intent, times: usize) -> FrameIntents {
        (0..times).fold(FrameIntents::idle(), |frame, _| frame.with(trigger))
    }

    #[test]
    fn generates_and_spawns() {
        let state = WorldState::new(GameConfig::with_seed(3)).unwrap();
        assert!(!state.grid().is_empty());
        assert_eq!(state.generation_stats().total_blocks, state.grid().len());
        assert_eq!(state.player().position, Vec3::new(0.0, 10.0, -15.0));
        assert_eq!(*state.inventory(), Inventory::new());
        assert!(!state.is_interactive());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GameConfig::default().world_size(-4);
        assert!(matches!(
            WorldState::new(config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn mining_stone_through_ticks() {
        let mut state = stone_pad();
        let mut recorder = Recorder::default();

        let report = state.tick(&repeat(Intent::Mine, 6), 1.0 / 60.0, &mut recorder);
        assert_eq!(report.mined.len(), 6);
        assert_eq!(
            report.mined.last(),
            Some(&MineOutcome::Damaged {
                kind: BlockKind::Stone,
                remaining: 1
            })
        );
        assert_eq!(*state.inventory(), Inventory::new());
        assert!(recorder.inventories.is_empty());

        let report = state.tick(&repeat(Intent::Mine, 1), 1.0 / 60.0, &mut recorder);
        assert_eq!(report.mined[0].credited(), Some(Resource::Stone));
        assert!(state.grid().is_empty());
        assert_eq!(recorder.inventories, vec![Inventory::with_counts(0, 1)]);
    }

    #[test]
    fn placing_without_wood_is_a_no_op() {
        let mut state = stone_pad();
        facing_pad(&mut state);
        let report = state.tick(&repeat(Intent::Place, 1), 1.0 / 60.0, &mut NullObserver);

        assert!(matches!(
            report.placed[..],
            [PlaceOutcome::OutOfStock {
                resource: Resource::Wood
            }]
        ));
        assert_eq!(state.grid().len(), 1);
        assert_eq!(*state.inventory(), Inventory::new());
    }

    #[test]
    fn placing_spends_and_notifies() {
        let mut state = stone_pad();
        *state.inventory_mut() = Inventory::with_counts(2, 0);
        facing_pad(&mut state);
        let mut recorder = Recorder::default();

        let report = state.tick(&repeat(Intent::Place, 1), 1.0 / 60.0, &mut recorder);
        let [PlaceOutcome::Placed { position, .. }] = report.placed[..] else {
            panic!("expected one placement, got {:?}", report.placed);
        };
        assert_eq!(position, Vec3::new(0.0, -0.5, 0.0));
        assert_eq!(state.grid().count_at(position), 1);
        assert_eq!(recorder.inventories, vec![Inventory::with_counts(1, 0)]);
    }

    #[test]
    fn actions_need_pointer_lock() {
        let mut state = stone_pad();
        state.set_pointer_locked(false, &mut NullObserver);

        let frame = repeat(Intent::Mine, 3).with(Intent::Jump);
        let report = state.tick(&frame, 0.1, &mut NullObserver);
        assert!(report.mined.is_empty());
        assert!(!report.step.jumped);
        assert_eq!(state.grid().durability(state.target().unwrap().handle), Some(7));
        assert_relative_eq!(state.player().position.y, -0.5);
    }

    #[test]
    fn inventory_screen_suspends_play() {
        let mut state = stone_pad();
        let mut recorder = Recorder::default();

        let frame = FrameIntents::moving(MoveFlags::FORWARD)
            .with(Intent::ToggleInventory)
            .with(Intent::Mine)
            .with(Intent::ToggleBuildKind);
        let report = state.tick(&frame, 0.1, &mut recorder);

        assert!(state.is_inventory_open());
        assert!(!state.player().locked_to_view);
        assert!(report.mined.is_empty());
        assert_eq!(state.player().position, Vec3::new(0.2, -0.5, 0.3));
        assert_eq!(state.player().selected_build_kind, Resource::Stone);
        assert_eq!(recorder.screens, vec![true]);
        assert_eq!(recorder.locks, vec![false]);
        assert_eq!(recorder.kinds, vec![Resource::Stone]);

        // Locking is refused until the screen closes.
        assert!(!state.set_pointer_locked(true, &mut recorder));
        state.tick(&repeat(Intent::ToggleInventory, 1), 0.1, &mut recorder);
        assert!(!state.is_inventory_open());
        assert!(!state.is_interactive());
        assert!(state.set_pointer_locked(true, &mut recorder));
        assert_eq!(recorder.locks, vec![false, true]);
    }

    #[test]
    fn respawns_after_falling_out() {
        let mut state = WorldState::with_grid(GameConfig::default(), WorldGrid::new()).unwrap();
        state.set_pointer_locked(true, &mut NullObserver);
        state.player_mut().position = Vec3::new(2.0, -11.0, 2.0);

        let report = state.tick(&FrameIntents::idle(), 1.0 / 60.0, &mut NullObserver);
        assert!(report.step.respawned);
        assert_eq!(state.player().position, Vec3::new(0.0, 10.0, -15.0));
        assert_eq!(state.player().velocity, Vec3::new(0.0, -55.0, 0.0));
    }

    #[test]
    fn look_clamps_pitch() {
        let mut state = stone_pad();
        state.look(0.5, -3.0);
        assert_relative_eq!(state.player().yaw, 0.5);
        assert_relative_eq!(state.player().pitch, -FRAC_PI_2);

        state.set_pointer_locked(false, &mut NullObserver);
        state.look(1.0, 1.0);
        assert_relative_eq!(state.player().yaw, 0.5);
    }

    #[test]
    fn camera_sits_at_the_eye() {
        let state = stone_pad();
        let camera = state.camera_transform();
        assert!(camera
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(Vec3::new(0.2, -0.5, 0.3), 1e-6));
        assert!(camera
            .transform_vector3(Vec3::NEG_Z)
            .abs_diff_eq(Vec3::NEG_Y, 1e-5));
    }
}
