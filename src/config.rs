/// Start-up constants.  Nothing in here changes while a session runs.

// ── Play field ────────────────────────────────────────────────────────────────

pub const FIELD_WIDTH: i32 = 800;
pub const FIELD_HEIGHT: i32 = 200;
/// Distance from the bottom of the field up to the ground line.
pub const GROUND_OFFSET: i32 = 30;
pub const FPS: u32 = 60;

// ── Spawning ──────────────────────────────────────────────────────────────────

pub const OBSTACLE_SPAWN_CHANCE: f64 = 0.008;
pub const PURSUER_SPAWN_CHANCE: f64 = 0.002;

// ── Motion ────────────────────────────────────────────────────────────────────

pub const OBSTACLE_SPEED: i32 = 10;
pub const PURSUER_SPEED_X: i32 = 5;
pub const PURSUER_SPEED_Y: i32 = 5;
pub const GRAVITY: i32 = 1;
pub const JUMP_IMPULSE: i32 = 18;

// ── Health & damage ───────────────────────────────────────────────────────────

pub const PLAYER_MAX_HEALTH: i32 = 100;
pub const PURSUER_MAX_HEALTH: i32 = 200;
pub const OBSTACLE_DAMAGE: i32 = 10;
pub const PURSUER_DAMAGE: i32 = 20;

// ── Sizes ─────────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: i32 = 40;
pub const PLAYER_HEIGHT: i32 = 60;
pub const PLAYER_CROUCH_HEIGHT: i32 = 30;
pub const OBSTACLE_WIDTH: i32 = 20;
pub const OBSTACLE_HEIGHT: i32 = 40;
pub const PURSUER_WIDTH: i32 = 80;
pub const PURSUER_HEIGHT: i32 = 100;
/// The pursuer spawns with its bottom edge this far above the ground line.
pub const PURSUER_SPAWN_LIFT: i32 = 50;

/// Every tunable of a run, built once before the session starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub field_width: i32,
    pub field_height: i32,
    pub ground_offset: i32,
    pub fps: u32,
    pub obstacle_spawn_chance: f64,
    pub pursuer_spawn_chance: f64,
    pub obstacle_speed: i32,
    pub pursuer_speed_x: i32,
    pub pursuer_speed_y: i32,
    pub gravity: i32,
    pub jump_impulse: i32,
    pub player_max_health: i32,
    /// Stored on every pursuer; nothing damages a pursuer yet.
    pub pursuer_max_health: i32,
    pub obstacle_damage: i32,
    pub pursuer_damage: i32,
    pub player_width: i32,
    pub player_height: i32,
    pub player_crouch_height: i32,
    pub obstacle_width: i32,
    pub obstacle_height: i32,
    pub pursuer_width: i32,
    pub pursuer_height: i32,
    pub pursuer_spawn_lift: i32,
    /// Remove pursuers once they are fully past the left edge.  Off by
    /// default: a pursuer otherwise lives until the session resets.
    pub cull_offscreen_pursuers: bool,
}

impl Config {
    /// y-coordinate of the walkable surface.
    pub fn ground_y(&self) -> i32 {
        self.field_height - self.ground_offset
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_offset: GROUND_OFFSET,
            fps: FPS,
            obstacle_spawn_chance: OBSTACLE_SPAWN_CHANCE,
            pursuer_spawn_chance: PURSUER_SPAWN_CHANCE,
            obstacle_speed: OBSTACLE_SPEED,
            pursuer_speed_x: PURSUER_SPEED_X,
            pursuer_speed_y: PURSUER_SPEED_Y,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            player_max_health: PLAYER_MAX_HEALTH,
            pursuer_max_health: PURSUER_MAX_HEALTH,
            obstacle_damage: OBSTACLE_DAMAGE,
            pursuer_damage: PURSUER_DAMAGE,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_crouch_height: PLAYER_CROUCH_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            pursuer_width: PURSUER_WIDTH,
            pursuer_height: PURSUER_HEIGHT,
            pursuer_spawn_lift: PURSUER_SPAWN_LIFT,
            cull_offscreen_pursuers: false,
        }
    }
}
