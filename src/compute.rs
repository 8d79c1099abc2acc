/// Per-frame game rules: hazard spawning and collision resolution.
///
/// Randomness only comes in through [`RandomSource`], so callers control
/// determinism (a seeded `StdRng` or a scripted source in tests).

use log::debug;
use rand::Rng;

use crate::config::Config;
use crate::entities::{
    Entity, GroundObstacle, Hazard, HazardKind, Heading, Player, Pursuer, Rect,
};
use crate::sprites::{Mask, SpriteSet};

// ── Randomness ────────────────────────────────────────────────────────────────

pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Fair coin.
    fn coin_flip(&mut self) -> bool {
        self.next_unit() < 0.5
    }
}

/// Adapts any `rand` generator.
pub struct RngSource<R: Rng>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    fn coin_flip(&mut self) -> bool {
        self.0.gen_bool(0.5)
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Memoryless per-frame spawn decisions.  Each frame draws once for an
/// obstacle and once for a pursuer; there is no cap and no cooldown.
#[derive(Clone, Debug)]
pub struct SpawnScheduler {
    config: Config,
    obstacles_spawned: u64,
    pursuers_spawned: u64,
}

impl SpawnScheduler {
    pub fn new(config: &Config) -> Self {
        SpawnScheduler {
            config: config.clone(),
            obstacles_spawned: 0,
            pursuers_spawned: 0,
        }
    }

    /// Hazards entering the field this frame, obstacle first.
    pub fn spawn(&mut self, rng: &mut impl RandomSource) -> Vec<Hazard> {
        let mut spawned = Vec::new();

        if rng.next_unit() < self.config.obstacle_spawn_chance {
            self.obstacles_spawned += 1;
            debug!("obstacle #{} spawned", self.obstacles_spawned);
            spawned.push(Hazard::Obstacle(GroundObstacle::new(&self.config)));
        }

        if rng.next_unit() < self.config.pursuer_spawn_chance {
            let heading = if rng.coin_flip() { Heading::Up } else { Heading::Down };
            self.pursuers_spawned += 1;
            debug!("pursuer #{} spawned heading {:?}", self.pursuers_spawned, heading);
            spawned.push(Hazard::Pursuer(Pursuer::new(&self.config, heading)));
        }

        spawned
    }

    pub fn obstacles_spawned(&self) -> u64 {
        self.obstacles_spawned
    }

    pub fn pursuers_spawned(&self) -> u64 {
        self.pursuers_spawned
    }
}

// ── Collision ─────────────────────────────────────────────────────────────────

/// Rectangle broad phase followed by an exact mask test.
pub fn masks_collide(a_rect: Rect, a_mask: &Mask, b_rect: Rect, b_mask: &Mask) -> bool {
    a_rect.intersects(&b_rect) && a_mask.overlap(b_mask, b_rect.x - a_rect.x, b_rect.y - a_rect.y)
}

/// Whether two entities' visible pixels touch, using their current sprites.
pub fn entities_collide(a: &impl Entity, b: &impl Entity, sprites: &SpriteSet) -> bool {
    masks_collide(a.rect(), sprites.mask(a.sprite()), b.rect(), sprites.mask(b.sprite()))
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionReport {
    /// One entry per hazard touching the player this frame.
    pub hits: Vec<HazardKind>,
    pub damage: i32,
    pub defeated: bool,
}

/// Apply contact damage from every hazard touching the player.  Contact that
/// lasts several frames hurts on every one of them.
pub fn resolve_collisions(
    player: &mut Player,
    hazards: &[Hazard],
    sprites: &SpriteSet,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    for hazard in hazards.iter().filter(|h| h.is_alive()) {
        if entities_collide(&*player, hazard, sprites) {
            let damage = hazard.damage();
            player.take_damage(damage);
            report.hits.push(hazard.kind());
            report.damage += damage;
            debug!(
                "{:?} hit player for {} (health {})",
                hazard.kind(),
                damage,
                player.health
            );
        }
    }

    report.defeated = player.is_defeated();
    report
}
