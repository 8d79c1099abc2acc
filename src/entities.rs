/// Game entities: the player, ground obstacles and the pursuer.
///
/// Every entity owns its bounding rectangle and moves itself once per frame
/// through [`Entity::advance`].  Hazards carry their kind and contact damage
/// from construction, so collision code never has to inspect types.

use log::warn;

use crate::config::Config;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in play-field units.  Edges are half-open:
/// `right() == x + width`, `bottom() == y + height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    /// Build a rectangle from its bottom-left corner.
    pub fn from_bottom_left(left: i32, bottom: i32, width: i32, height: i32) -> Self {
        Rect { x: left, y: bottom - height, width, height }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Move vertically so the bottom edge sits at `bottom`.
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// The shared area of two rectangles, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.left().max(other.left());
        let y = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect::new(x, y, right - x, bottom - y))
    }
}

// ── Shared capability ─────────────────────────────────────────────────────────

/// Which piece of sprite art an entity is currently showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    PlayerStanding,
    PlayerCrouching,
    Obstacle,
    Pursuer,
}

pub trait Entity {
    /// Move one frame forward.
    fn advance(&mut self);

    fn rect(&self) -> Rect;

    fn sprite(&self) -> SpriteKind;

    /// `false` once the entity should no longer be simulated or drawn.
    fn is_alive(&self) -> bool {
        true
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    /// Positive is downward.
    pub velocity_y: i32,
    pub gravity: i32,
    pub is_crouching: bool,
    pub health: i32,
    /// y-coordinate of the walkable surface.
    pub ground_y: i32,
    jump_impulse: i32,
    standing_height: i32,
    crouch_height: i32,
}

impl Player {
    /// A fresh player standing on the ground at the left edge with full health.
    pub fn new(config: &Config) -> Self {
        let ground_y = config.ground_y();
        Player {
            rect: Rect::from_bottom_left(0, ground_y, config.player_width, config.player_height),
            velocity_y: 0,
            gravity: config.gravity,
            is_crouching: false,
            health: config.player_max_health,
            ground_y,
            jump_impulse: config.jump_impulse,
            standing_height: config.player_height,
            crouch_height: config.player_crouch_height,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.rect.bottom() == self.ground_y
    }

    /// Launch upward.  Ignored unless resting exactly on the ground.
    pub fn jump(&mut self) {
        if self.is_grounded() {
            self.velocity_y = -self.jump_impulse;
        }
    }

    /// Shrink to the crouching height with the feet kept on the ground.
    /// Ignored while airborne or already crouching.
    pub fn crouch(&mut self) {
        if !self.is_crouching && self.is_grounded() {
            self.is_crouching = true;
            self.rect.height = self.crouch_height;
            self.rect.set_bottom(self.ground_y);
        }
    }

    /// Back to full height, feet on the ground.  Works from any vertical
    /// position as long as the player is crouching.
    pub fn stand_up(&mut self) {
        if self.is_crouching {
            self.is_crouching = false;
            self.rect.height = self.standing_height;
            self.rect.set_bottom(self.ground_y);
        }
    }

    /// Health may go below zero; only `health <= 0` matters.
    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
        if self.health < 0 {
            warn!("player health over-subtracted to {}", self.health);
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

impl Entity for Player {
    fn advance(&mut self) {
        self.velocity_y += self.gravity;
        self.rect.y += self.velocity_y;
        if self.rect.bottom() >= self.ground_y {
            self.rect.set_bottom(self.ground_y);
            self.velocity_y = 0;
        }
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn sprite(&self) -> SpriteKind {
        if self.is_crouching {
            SpriteKind::PlayerCrouching
        } else {
            SpriteKind::PlayerStanding
        }
    }
}

// ── Ground obstacle ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GroundObstacle {
    pub rect: Rect,
    /// Negative is leftward.
    pub velocity_x: i32,
    pub damage: i32,
    alive: bool,
}

impl GroundObstacle {
    /// Enters at the right edge of the field, standing on the ground.
    pub fn new(config: &Config) -> Self {
        GroundObstacle {
            rect: Rect::from_bottom_left(
                config.field_width,
                config.ground_y(),
                config.obstacle_width,
                config.obstacle_height,
            ),
            velocity_x: -config.obstacle_speed,
            damage: config.obstacle_damage,
            alive: true,
        }
    }
}

impl Entity for GroundObstacle {
    fn advance(&mut self) {
        self.rect.x += self.velocity_x;
        if self.rect.right() < 0 {
            self.alive = false;
        }
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn sprite(&self) -> SpriteKind {
        SpriteKind::Obstacle
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

// ── Pursuer ───────────────────────────────────────────────────────────────────

/// Initial vertical heading of a pursuer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
}

#[derive(Clone, Debug)]
pub struct Pursuer {
    pub rect: Rect,
    /// Leftward speed, applied as `x -= speed_x`.
    pub speed_x: i32,
    /// Positive is downward.  Sign flips at the top/bottom of the field.
    pub velocity_y: i32,
    /// Carried for a future player-attack mechanic; nothing lowers it today.
    pub health: i32,
    pub damage: i32,
    field_height: i32,
    cull_offscreen: bool,
    alive: bool,
}

impl Pursuer {
    pub fn new(config: &Config, heading: Heading) -> Self {
        let sign = match heading {
            Heading::Up => -1,
            Heading::Down => 1,
        };
        Pursuer {
            rect: Rect::from_bottom_left(
                config.field_width,
                config.ground_y() - config.pursuer_spawn_lift,
                config.pursuer_width,
                config.pursuer_height,
            ),
            speed_x: config.pursuer_speed_x,
            velocity_y: sign * config.pursuer_speed_y,
            health: config.pursuer_max_health,
            damage: config.pursuer_damage,
            field_height: config.field_height,
            cull_offscreen: config.cull_offscreen_pursuers,
            alive: true,
        }
    }
}

impl Entity for Pursuer {
    fn advance(&mut self) {
        self.rect.x -= self.speed_x;
        self.rect.y += self.velocity_y;

        if self.rect.top() <= 0 || self.rect.bottom() >= self.field_height {
            self.velocity_y = -self.velocity_y;
        }

        if self.cull_offscreen && self.rect.right() < 0 {
            self.alive = false;
        }
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn sprite(&self) -> SpriteKind {
        SpriteKind::Pursuer
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

// ── Hazards ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HazardKind {
    Obstacle,
    Pursuer,
}

/// Anything that can hurt the player.
#[derive(Clone, Debug)]
pub enum Hazard {
    Obstacle(GroundObstacle),
    Pursuer(Pursuer),
}

impl Hazard {
    pub fn kind(&self) -> HazardKind {
        match self {
            Hazard::Obstacle(_) => HazardKind::Obstacle,
            Hazard::Pursuer(_) => HazardKind::Pursuer,
        }
    }

    /// Health removed from the player per frame of contact.
    pub fn damage(&self) -> i32 {
        match self {
            Hazard::Obstacle(o) => o.damage,
            Hazard::Pursuer(p) => p.damage,
        }
    }
}

impl Entity for Hazard {
    fn advance(&mut self) {
        match self {
            Hazard::Obstacle(o) => o.advance(),
            Hazard::Pursuer(p) => p.advance(),
        }
    }

    fn rect(&self) -> Rect {
        match self {
            Hazard::Obstacle(o) => o.rect(),
            Hazard::Pursuer(p) => p.rect(),
        }
    }

    fn sprite(&self) -> SpriteKind {
        match self {
            Hazard::Obstacle(o) => o.sprite(),
            Hazard::Pursuer(p) => p.sprite(),
        }
    }

    fn is_alive(&self) -> bool {
        match self {
            Hazard::Obstacle(o) => o.is_alive(),
            Hazard::Pursuer(p) => p.is_alive(),
        }
    }
}
