//! Obstacles scattered down the mountain
//!
//! Each obstacle gets a random kind at creation and is immutable from then
//! on. Obstacles are permanent terrain: they never die from collisions and
//! are only dropped once they scroll out of the retained region.

use glam::Vec2;
use rand::Rng;

use super::entity::{Entity, ImageName};
use super::geom::random_int;

/// The obstacle kinds that can be placed on the slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Tree,
    TreeCluster,
    RockSmall,
    RockLarge,
    JumpRamp,
    MuddyTerrain,
    SpeedBoost,
}

/// Static per-kind properties, fixed for the life of the game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleProperties {
    /// Height class: an airborne skier clears the obstacle only while
    /// strictly above this
    pub height: u8,
    /// Applied to the skier's baseline speed on contact (<1 slows, >1 boosts)
    pub speed_multiplier: f32,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 7] = [
        ObstacleKind::Tree,
        ObstacleKind::TreeCluster,
        ObstacleKind::RockSmall,
        ObstacleKind::RockLarge,
        ObstacleKind::JumpRamp,
        ObstacleKind::MuddyTerrain,
        ObstacleKind::SpeedBoost,
    ];

    /// Read-only property table
    pub fn properties(&self) -> ObstacleProperties {
        match self {
            ObstacleKind::Tree | ObstacleKind::TreeCluster => ObstacleProperties {
                height: 2,
                speed_multiplier: 1.0,
            },
            ObstacleKind::RockSmall | ObstacleKind::RockLarge => ObstacleProperties {
                height: 1,
                speed_multiplier: 1.0,
            },
            ObstacleKind::JumpRamp => ObstacleProperties {
                height: 0,
                speed_multiplier: 1.0,
            },
            ObstacleKind::MuddyTerrain => ObstacleProperties {
                height: 0,
                speed_multiplier: 0.6,
            },
            ObstacleKind::SpeedBoost => ObstacleProperties {
                height: 0,
                speed_multiplier: 1.3,
            },
        }
    }

    pub fn image(&self) -> ImageName {
        match self {
            ObstacleKind::Tree => ImageName::Tree,
            ObstacleKind::TreeCluster => ImageName::TreeCluster,
            ObstacleKind::RockSmall => ImageName::Rock1,
            ObstacleKind::RockLarge => ImageName::Rock2,
            ObstacleKind::JumpRamp => ImageName::JumpRamp,
            ObstacleKind::MuddyTerrain => ImageName::MuddyTerrain,
            ObstacleKind::SpeedBoost => ImageName::SpeedBoost,
        }
    }
}

/// A single placed obstacle.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pos: Vec2,
    kind: ObstacleKind,
}

impl Obstacle {
    /// Place an obstacle of a uniformly random kind at `pos`
    pub fn random<R: Rng>(pos: Vec2, rng: &mut R) -> Self {
        let idx = random_int(rng, 0, ObstacleKind::ALL.len() as i32 - 1);
        Self {
            pos,
            kind: ObstacleKind::ALL[idx as usize],
        }
    }

    pub fn new(pos: Vec2, kind: ObstacleKind) -> Self {
        Self { pos, kind }
    }

    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }

    pub fn properties(&self) -> ObstacleProperties {
        self.kind.properties()
    }
}

impl Entity for Obstacle {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    fn image(&self) -> ImageName {
        self.kind.image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_property_table() {
        assert_eq!(ObstacleKind::Tree.properties().height, 2);
        assert_eq!(ObstacleKind::TreeCluster.properties().height, 2);
        assert_eq!(ObstacleKind::RockSmall.properties().height, 1);
        assert_eq!(ObstacleKind::RockLarge.properties().height, 1);
        assert_eq!(ObstacleKind::JumpRamp.properties().height, 0);

        let muddy = ObstacleKind::MuddyTerrain.properties();
        assert!(muddy.speed_multiplier < 1.0);
        let boost = ObstacleKind::SpeedBoost.properties();
        assert!(boost.speed_multiplier > 1.0);
    }

    #[test]
    fn test_random_covers_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = [false; ObstacleKind::ALL.len()];
        for _ in 0..500 {
            let obstacle = Obstacle::random(Vec2::ZERO, &mut rng);
            let idx = ObstacleKind::ALL
                .iter()
                .position(|k| *k == obstacle.kind())
                .unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s), "all kinds reachable: {seen:?}");
    }
}
