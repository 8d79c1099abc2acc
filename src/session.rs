/// The game session: owns every entity and drives the frame loop.
///
/// Drawing, frame pacing and input all come from injected collaborators
/// ([`Renderer`], [`Clock`], [`InputSource`]) so the loop runs the same
/// against a terminal or against test doubles.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::compute::{resolve_collisions, CollisionReport, RandomSource, SpawnScheduler};
use crate::config::Config;
use crate::entities::{Entity, Hazard, Player, Rect, SpriteKind};
use crate::sprites::{Mask, SpriteError, SpriteSet};

pub const GAME_OVER_TEXT: &str = "Game Over";
pub const RETRY_TEXT: &str = "Press R to Retry";

// ── Collaborators ─────────────────────────────────────────────────────────────

/// Discrete player commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Jump,
    CrouchStart,
    CrouchEnd,
    Retry,
    Quit,
}

pub trait InputSource {
    /// Everything queued since the last call, without blocking.
    fn poll(&mut self) -> Vec<InputEvent>;

    /// Block until the next event.  `None` means input has closed.
    fn wait(&mut self) -> Option<InputEvent>;
}

/// Drawing surface in play-field coordinates.
pub trait Renderer {
    fn clear(&mut self) -> io::Result<()>;

    fn draw_sprite(&mut self, kind: SpriteKind, mask: &Mask, rect: Rect) -> io::Result<()>;

    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> io::Result<()>;

    fn draw_text_centered(&mut self, text: &str, cx: i32, cy: i32) -> io::Result<()>;

    /// Show the finished frame.
    fn present(&mut self) -> io::Result<()>;
}

pub trait Clock {
    /// Block until the next frame boundary.
    fn wait_next_frame(&mut self);
}

/// Sleeps out whatever is left of each frame at a fixed rate.
pub struct FixedRateClock {
    frame: Duration,
    frame_start: Instant,
}

impl FixedRateClock {
    pub fn new(fps: u32) -> Self {
        FixedRateClock {
            frame: Duration::from_secs(1) / fps.max(1),
            frame_start: Instant::now(),
        }
    }
}

impl Clock for FixedRateClock {
    fn wait_next_frame(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        self.frame_start = Instant::now();
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    GameOverWaiting,
    /// Transient: the session is resetting before play resumes.
    Retrying,
    /// Terminal.
    Quitting,
}

/// What happened during one [`GameSession::step`].
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub spawned: usize,
    pub removed: usize,
    pub collisions: CollisionReport,
    pub state: SessionState,
}

pub struct GameSession {
    config: Config,
    sprites: SpriteSet,
    scheduler: SpawnScheduler,
    player: Player,
    hazards: Vec<Hazard>,
    state: SessionState,
    frame: u64,
    runs: u32,
}

impl GameSession {
    /// Fresh session: one player at full health, no hazards, playing.
    pub fn new(config: Config) -> Result<Self, SpriteError> {
        let sprites = SpriteSet::new(&config)?;
        let scheduler = SpawnScheduler::new(&config);
        let player = Player::new(&config);
        info!(
            "session start: field {}x{}, ground at {}",
            config.field_width,
            config.field_height,
            config.ground_y()
        );
        Ok(GameSession {
            config,
            sprites,
            scheduler,
            player,
            hazards: Vec::new(),
            state: SessionState::Playing,
            frame: 0,
            runs: 1,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sprites(&self) -> &SpriteSet {
        &self.sprites
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn hazards_mut(&mut self) -> &mut Vec<Hazard> {
        &mut self.hazards
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Frames simulated since the current run started.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// 1 for the first run, incremented by every retry.
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Apply one command.  Commands that make no sense in the current state
    /// are ignored; `Quit` is honoured from anywhere.  `Retry` only marks the
    /// session as retrying; the reset itself happens in [`GameSession::run`]
    /// or an explicit [`GameSession::reset`].
    pub fn handle_input(&mut self, event: InputEvent) {
        match (self.state, event) {
            (SessionState::Quitting, _) => {}
            (_, InputEvent::Quit) => {
                info!("quit requested on frame {}", self.frame);
                self.state = SessionState::Quitting;
            }
            (SessionState::Playing, InputEvent::Jump) => self.player.jump(),
            (SessionState::Playing, InputEvent::CrouchStart) => self.player.crouch(),
            (SessionState::Playing, InputEvent::CrouchEnd) => self.player.stand_up(),
            (SessionState::GameOverWaiting, InputEvent::Retry) => {
                info!("retry requested after run {}", self.runs);
                self.state = SessionState::Retrying;
            }
            (state, event) => debug!("ignored {:?} while {:?}", event, state),
        }
    }

    /// Drop every hazard and start over with a fresh player.
    pub fn reset(&mut self) {
        self.hazards.clear();
        self.player = Player::new(&self.config);
        self.frame = 0;
        self.runs += 1;
        self.state = SessionState::Playing;
        info!("run {} started", self.runs);
    }

    /// Advance one frame: physics, spawning, then collisions.  Does nothing
    /// unless the session is playing.
    pub fn step(&mut self, rng: &mut impl RandomSource) -> FrameReport {
        if self.state != SessionState::Playing {
            return FrameReport {
                frame: self.frame,
                spawned: 0,
                removed: 0,
                collisions: CollisionReport::default(),
                state: self.state,
            };
        }

        self.frame += 1;

        // ── 1. Physics ───────────────────────────────────────────────────────
        self.player.advance();
        for hazard in &mut self.hazards {
            hazard.advance();
        }
        let before = self.hazards.len();
        self.hazards.retain(|h| h.is_alive());
        let removed = before - self.hazards.len();

        // ── 2. Spawning ──────────────────────────────────────────────────────
        let spawned = self.scheduler.spawn(rng);
        let spawned_count = spawned.len();
        self.hazards.extend(spawned);

        // ── 3. Collisions ────────────────────────────────────────────────────
        let collisions = resolve_collisions(&mut self.player, &self.hazards, &self.sprites);
        if collisions.defeated {
            self.state = SessionState::GameOverWaiting;
            info!(
                "game over on frame {} (health {}, run {})",
                self.frame, self.player.health, self.runs
            );
        }

        FrameReport {
            frame: self.frame,
            spawned: spawned_count,
            removed,
            collisions,
            state: self.state,
        }
    }

    /// Draw the current state: the play field while playing, the game-over
    /// screen once the player has been defeated.
    pub fn render<D: Renderer>(&self, renderer: &mut D) -> io::Result<()> {
        renderer.clear()?;

        if self.state == SessionState::GameOverWaiting {
            let cx = self.config.field_width / 2;
            let cy = self.config.field_height / 2;
            renderer.draw_text_centered(GAME_OVER_TEXT, cx, cy - 20)?;
            renderer.draw_text_centered(RETRY_TEXT, cx, cy + 20)?;
        } else {
            for hazard in &self.hazards {
                let kind = hazard.sprite();
                renderer.draw_sprite(kind, self.sprites.mask(kind), hazard.rect())?;
            }
            let kind = self.player.sprite();
            renderer.draw_sprite(kind, self.sprites.mask(kind), self.player.rect())?;
            renderer.draw_text(&format!("HP {}", self.player.health.max(0)), 10, 10)?;
        }

        renderer.present()
    }

    /// Run until quit.  Each frame: apply pending input, step, render, then
    /// wait for the clock.  On the game-over screen the loop blocks on input
    /// until the player retries or quits.
    pub fn run<I, D, C, R>(
        &mut self,
        input: &mut I,
        renderer: &mut D,
        clock: &mut C,
        rng: &mut R,
    ) -> io::Result<()>
    where
        I: InputSource,
        D: Renderer,
        C: Clock,
        R: RandomSource,
    {
        loop {
            match self.state {
                SessionState::Quitting => break,
                SessionState::Retrying => self.reset(),
                SessionState::Playing => {
                    for event in input.poll() {
                        self.handle_input(event);
                    }
                    if self.state != SessionState::Playing {
                        continue;
                    }
                    self.step(rng);
                    self.render(renderer)?;
                    clock.wait_next_frame();
                }
                SessionState::GameOverWaiting => match input.wait() {
                    Some(event) => self.handle_input(event),
                    None => self.handle_input(InputEvent::Quit),
                },
            }
        }
        info!("session ended after {} run(s)", self.runs);
        Ok(())
    }
}
