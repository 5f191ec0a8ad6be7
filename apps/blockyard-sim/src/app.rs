//! Scripted session: parameters, observer, and the tick loop.

use blockyard_core::constants::WORLD_SIZE;
use blockyard_core::Resource;
use blockyard_game::{
    GameConfig, GameObserver, Inventory, MineOutcome, PlaceOutcome, TickReport, WorldState,
};
use blockyard_input::{Intent, IntentEvent, IntentState};
use blockyard_world::WorldSeed;
use tracing::{debug, info};

/// Fixed simulation step (60 Hz).
const DT: f32 = 1.0 / 60.0;

/// View turn applied while walking (radians per turn).
const WALK_TURN: f32 = 0.35;

/// Session configuration (from CLI or defaults).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimParams {
    pub seed: WorldSeed,
    pub ticks: u32,
    pub world_size: i32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            seed: 42,
            ticks: 600,
            world_size: WORLD_SIZE,
        }
    }
}

impl SimParams {
    /// Parse session parameters from command line arguments.
    pub fn from_args() -> Self {
        Self::parse(std::env::args())
    }

    /// Parse from an argument list whose first item is the program name.
    /// Unknown flags and unparsable values are ignored.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut params = Self::default();
        let args: Vec<String> = args.into_iter().collect();

        let mut i = 1;
        while i < args.len() {
            let value = args.get(i + 1);
            let consumed = match args[i].as_str() {
                "--seed" => value.and_then(|v| v.parse().ok()).map(|v| params.seed = v),
                "--ticks" => value.and_then(|v| v.parse().ok()).map(|v| params.ticks = v),
                "--world-size" => value
                    .and_then(|v| v.parse().ok())
                    .map(|v| params.world_size = v),
                _ => None,
            };
            if consumed.is_some() {
                i += 1;
            }
            i += 1;
        }

        params
    }
}

/// Forwards UI notifications to the log.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl GameObserver for LoggingObserver {
    fn inventory_changed(&mut self, inventory: &Inventory) {
        info!("{inventory}");
    }

    fn build_kind_changed(&mut self, kind: Resource) {
        info!("Build kind: {}", kind.label());
    }

    fn inventory_screen_changed(&mut self, open: bool) {
        info!("Inventory screen {}", if open { "opened" } else { "closed" });
    }

    fn pointer_lock_changed(&mut self, locked: bool) {
        debug!(locked, "Pointer lock");
    }
}

/// Totals gathered over a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub ticks: u32,
    pub hits: u32,
    pub destroyed: u32,
    pub credited: u32,
    pub placed: u32,
    pub rejected_placements: u32,
    pub jumps: u32,
    pub respawns: u32,
}

impl SessionSummary {
    fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        for outcome in &report.mined {
            match outcome {
                MineOutcome::Damaged { .. } => self.hits += 1,
                MineOutcome::Destroyed { credited, .. } => {
                    self.hits += 1;
                    self.destroyed += 1;
                    self.credited += u32::from(credited.is_some());
                }
                MineOutcome::NoTarget => {}
            }
        }
        for outcome in &report.placed {
            match outcome {
                PlaceOutcome::Placed { .. } => self.placed += 1,
                PlaceOutcome::InsidePlayer { .. }
                | PlaceOutcome::Occupied { .. }
                | PlaceOutcome::OutOfStock { .. } => {
                    self.rejected_placements += 1;
                }
                PlaceOutcome::NoTarget => {}
            }
        }
        self.jumps += u32::from(report.step.jumped);
        self.respawns += u32::from(report.step.respawned);
    }

    /// Log totals and the final world state.
    pub fn log(&self, world: &WorldState) {
        let player = world.player();
        info!(
            ticks = self.ticks,
            hits = self.hits,
            destroyed = self.destroyed,
            credited = self.credited,
            placed = self.placed,
            rejected = self.rejected_placements,
            jumps = self.jumps,
            respawns = self.respawns,
            "Session finished"
        );
        info!(
            position = ?player.position,
            grounded = player.grounded,
            build_kind = player.selected_build_kind.label(),
            blocks = world.grid().len(),
            "{}",
            world.inventory()
        );
    }
}

/// A world plus the input state feeding it.
pub struct Session {
    world: WorldState,
    input: IntentState,
    observer: LoggingObserver,
}

impl Session {
    /// Generate the world described by `params`.
    pub fn new(params: &SimParams) -> anyhow::Result<Self> {
        let config = GameConfig::with_seed(params.seed).world_size(params.world_size);
        let world = WorldState::new(config)?;
        info!(
            seed = params.seed,
            world_size = params.world_size,
            ticks = params.ticks,
            "Session started"
        );
        Ok(Self {
            world,
            input: IntentState::new(),
            observer: LoggingObserver,
        })
    }

    /// The simulated world.
    pub const fn world(&self) -> &WorldState {
        &self.world
    }

    /// Run `ticks` frames of the script.
    pub fn run(&mut self, ticks: u32) -> SessionSummary {
        let mut summary = SessionSummary::default();
        for tick in 0..ticks {
            self.script(tick);
            let frame = self.input.take_frame();
            let report = self.world.tick(&frame, DT, &mut self.observer);
            summary.record(&report);
        }
        summary
    }

    /// Feed this tick's scripted input.
    ///
    /// | Ticks     | Action                                        |
    /// |-----------|-----------------------------------------------|
    /// | 0         | capture pointer                               |
    /// | 60..180   | walk forward, turning every half second       |
    /// | 180..300  | look down and mine every 4th tick             |
    /// | 300..360  | look ahead-down and place every 10th tick     |
    /// | 400, 420  | open and close the inventory screen           |
    /// | 430..     | walk backward, jumping every 40 ticks         |
    fn script(&mut self, tick: u32) {
        match tick {
            0 | 421 => {
                self.world.set_pointer_locked(true, &mut self.observer);
            }
            60 => self.press(Intent::MoveForward),
            61..=179 if tick % 30 == 0 => self.world.look(WALK_TURN, 0.0),
            180 => {
                self.release(Intent::MoveForward);
                self.world.look(0.0, -std::f32::consts::PI);
            }
            181..=299 if tick % 4 == 0 => self.press(Intent::Mine),
            300 => {
                self.world.look(0.0, 0.6);
                let inventory = self.world.inventory();
                let selected = self.world.player().selected_build_kind;
                if inventory.count(selected) == 0 && inventory.count(selected.toggled()) > 0 {
                    self.press(Intent::ToggleBuildKind);
                }
            }
            301..=359 if tick % 10 == 0 => self.press(Intent::Place),
            400 | 420 => self.press(Intent::ToggleInventory),
            430 => {
                self.world.look(0.0, 1.0);
                self.press(Intent::MoveBackward);
            }
            431.. if tick % 40 == 0 => self.press(Intent::Jump),
            _ => {}
        }
    }

    fn press(&mut self, intent: Intent) {
        self.input.process(IntentEvent::Pressed(intent));
    }

    fn release(&mut self, intent: Intent) {
        self.input.process(IntentEvent::Released(intent));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("blockyard-sim")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parses_flags() {
        let params = SimParams::parse(args(&[
            "--seed",
            "7",
            "--ticks",
            "90",
            "--world-size",
            "48",
        ]));
        assert_eq!(
            params,
            SimParams {
                seed: 7,
                ticks: 90,
                world_size: 48
            }
        );
    }

    #[test]
    fn ignores_unknown_and_bad_values() {
        let params = SimParams::parse(args(&["--verbose", "--seed", "x", "--ticks"]));
        assert_eq!(params, SimParams::default());
    }

    #[test]
    fn scripted_session_runs() {
        let params = SimParams {
            seed: 5,
            ticks: 500,
            ..Default::default()
        };
        let mut session = Session::new(&params).unwrap();
        let summary = session.run(params.ticks);

        assert_eq!(summary.ticks, 500);
        assert!(!session.world().is_inventory_open());
        // Placement can only spend what mining produced.
        let inventory = session.world().inventory();
        assert!(summary.credited <= summary.destroyed);
        assert_eq!(
            inventory.wood() + inventory.stone() + summary.placed,
            summary.credited
        );
    }
}
