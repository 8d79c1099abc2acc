/// Sprite art and per-pixel opacity masks.
///
/// The art is compiled in as small character grids (`#` opaque, anything
/// else transparent) and scaled nearest-neighbour to each entity's size.
/// Masks drive both collision precision and what the renderer paints.

use log::debug;

use crate::config::Config;
use crate::entities::SpriteKind;

const PLAYER_STANDING_ART: &[&str] = &[
    "....####",
    "...##.##",
    "...#####",
    "...###..",
    "#..####.",
    "##.####.",
    ".######.",
    "..#####.",
    "..####..",
    "...##...",
    "...#.#..",
    "...#.#..",
];

const PLAYER_CROUCHING_ART: &[&str] = &[
    "........",
    ".....###",
    "#...##.#",
    "########",
    ".######.",
    "..#..#..",
];

const PURSUER_ART: &[&str] = &[
    "..####..",
    ".######.",
    "##.##.##",
    "########",
    ".######.",
    "..####..",
    ".#.##.#.",
    "#..##..#",
    "...##...",
    "..#..#..",
];

// ── Errors ────────────────────────────────────────────────────────────────────

/// A sprite could not be built.  Fatal at start-up.
#[derive(Debug, Clone, PartialEq)]
pub enum SpriteError {
    /// The art grid has no rows or no columns.
    EmptyArt,
    /// A row of the art grid differs in width from the first row.
    RaggedArt { row: usize, expected: usize, found: usize },
    /// Requested a mask with a zero or negative dimension.
    BadSize { width: i32, height: i32 },
}

impl std::fmt::Display for SpriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpriteError::EmptyArt => write!(f, "sprite art is empty"),
            SpriteError::RaggedArt { row, expected, found } => write!(
                f,
                "sprite art row {} is {} wide, expected {}",
                row, found, expected
            ),
            SpriteError::BadSize { width, height } => {
                write!(f, "invalid sprite size {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for SpriteError {}

// ── Mask ──────────────────────────────────────────────────────────────────────

/// Per-pixel opacity bitmap, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl Mask {
    /// Every pixel opaque.
    pub fn filled(width: i32, height: i32) -> Result<Self, SpriteError> {
        if width <= 0 || height <= 0 {
            return Err(SpriteError::BadSize { width, height });
        }
        Ok(Mask {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        })
    }

    /// Scale a character grid to `width × height`.
    pub fn from_art(rows: &[&str], width: i32, height: i32) -> Result<Self, SpriteError> {
        if width <= 0 || height <= 0 {
            return Err(SpriteError::BadSize { width, height });
        }
        let grid: Vec<Vec<bool>> = rows
            .iter()
            .map(|row| row.chars().map(|c| c == '#').collect())
            .collect();
        let art_w = grid.first().map(|r| r.len()).unwrap_or(0);
        if art_w == 0 {
            return Err(SpriteError::EmptyArt);
        }
        if let Some((row, r)) = grid.iter().enumerate().find(|(_, r)| r.len() != art_w) {
            return Err(SpriteError::RaggedArt { row, expected: art_w, found: r.len() });
        }
        let art_h = grid.len();

        let mut bits = Vec::with_capacity((width * height) as usize);
        for py in 0..height as usize {
            let sy = py * art_h / height as usize;
            for px in 0..width as usize {
                let sx = px * art_w / width as usize;
                bits.push(grid[sy][sx]);
            }
        }
        Ok(Mask { width, height, bits })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Out-of-bounds pixels are transparent.
    pub fn is_opaque(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    pub fn opaque_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// True if any opaque pixel of `self` lands on an opaque pixel of
    /// `other`, with `other`'s top-left placed at `(dx, dy)` in `self`'s
    /// coordinates.
    pub fn overlap(&self, other: &Mask, dx: i32, dy: i32) -> bool {
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (dx + other.width).min(self.width);
        let y1 = (dy + other.height).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                if self.is_opaque(x, y) && other.is_opaque(x - dx, y - dy) {
                    return true;
                }
            }
        }
        false
    }
}

// ── Sprite set ────────────────────────────────────────────────────────────────

/// One mask per [`SpriteKind`], sized for the configured entities.
#[derive(Clone, Debug)]
pub struct SpriteSet {
    player_standing: Mask,
    player_crouching: Mask,
    obstacle: Mask,
    pursuer: Mask,
}

impl SpriteSet {
    pub fn new(config: &Config) -> Result<Self, SpriteError> {
        let set = SpriteSet {
            player_standing: Mask::from_art(
                PLAYER_STANDING_ART,
                config.player_width,
                config.player_height,
            )?,
            player_crouching: Mask::from_art(
                PLAYER_CROUCHING_ART,
                config.player_width,
                config.player_crouch_height,
            )?,
            obstacle: Mask::filled(config.obstacle_width, config.obstacle_height)?,
            pursuer: Mask::from_art(PURSUER_ART, config.pursuer_width, config.pursuer_height)?,
        };
        debug!(
            "sprites ready: player {} px, crouch {} px, obstacle {} px, pursuer {} px",
            set.player_standing.opaque_count(),
            set.player_crouching.opaque_count(),
            set.obstacle.opaque_count(),
            set.pursuer.opaque_count()
        );
        Ok(set)
    }

    pub fn mask(&self, kind: SpriteKind) -> &Mask {
        match kind {
            SpriteKind::PlayerStanding => &self.player_standing,
            SpriteKind::PlayerCrouching => &self.player_crouching,
            SpriteKind::Obstacle => &self.obstacle,
            SpriteKind::Pursuer => &self.pursuer,
        }
    }
}
