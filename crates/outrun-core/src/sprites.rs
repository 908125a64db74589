//! Sprite-sheet catalogue
//!
//! Rectangles refer to two sheets: the background sheet (sky, hills, trees)
//! and the sprite sheet (scenery, cars, player variants).

/// Source rectangle in a sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl SpriteRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Every sprite on the sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    PalmTree,
    Billboard01,
    Billboard02,
    Billboard03,
    Billboard04,
    Billboard05,
    Billboard06,
    Billboard07,
    Billboard08,
    Billboard09,
    Tree1,
    Tree2,
    DeadTree1,
    DeadTree2,
    Boulder1,
    Boulder2,
    Boulder3,
    Column,
    Bush1,
    Bush2,
    Cactus,
    Stump,
    Semi,
    Truck,
    Car01,
    Car02,
    Car03,
    Car04,
    PlayerUphillLeft,
    PlayerUphillStraight,
    PlayerUphillRight,
    PlayerLeft,
    PlayerStraight,
    PlayerRight,
}

/// Broad sprite category, used by backends without a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Billboard,
    Plant,
    Rock,
    Column,
    Vehicle,
    Player,
}

impl SpriteId {
    pub fn rect(self) -> SpriteRect {
        use SpriteId::*;
        match self {
            PalmTree => SpriteRect::new(5, 5, 215, 540),
            Billboard08 => SpriteRect::new(230, 5, 385, 265),
            Tree1 => SpriteRect::new(625, 5, 360, 360),
            DeadTree1 => SpriteRect::new(5, 555, 135, 332),
            Billboard09 => SpriteRect::new(150, 555, 328, 282),
            Boulder3 => SpriteRect::new(230, 280, 320, 220),
            Column => SpriteRect::new(995, 5, 200, 315),
            Billboard01 => SpriteRect::new(625, 375, 300, 170),
            Billboard06 => SpriteRect::new(488, 555, 298, 190),
            Billboard05 => SpriteRect::new(5, 897, 298, 190),
            Billboard07 => SpriteRect::new(313, 897, 298, 190),
            Boulder2 => SpriteRect::new(621, 897, 298, 140),
            Tree2 => SpriteRect::new(1205, 5, 282, 295),
            Billboard04 => SpriteRect::new(1205, 310, 268, 170),
            DeadTree2 => SpriteRect::new(1205, 490, 150, 260),
            Boulder1 => SpriteRect::new(1205, 760, 168, 248),
            Bush1 => SpriteRect::new(5, 1097, 240, 155),
            Cactus => SpriteRect::new(929, 897, 235, 118),
            Bush2 => SpriteRect::new(255, 1097, 232, 152),
            Billboard03 => SpriteRect::new(5, 1262, 230, 220),
            Billboard02 => SpriteRect::new(245, 1262, 215, 220),
            Stump => SpriteRect::new(995, 330, 195, 140),
            Semi => SpriteRect::new(1365, 490, 122, 144),
            Truck => SpriteRect::new(1365, 644, 100, 78),
            Car03 => SpriteRect::new(1383, 760, 88, 55),
            Car02 => SpriteRect::new(1383, 825, 80, 59),
            Car04 => SpriteRect::new(1383, 894, 80, 57),
            Car01 => SpriteRect::new(1205, 1018, 80, 56),
            PlayerUphillLeft => SpriteRect::new(1383, 961, 80, 45),
            PlayerUphillStraight => SpriteRect::new(1295, 1018, 80, 45),
            PlayerUphillRight => SpriteRect::new(1385, 1018, 80, 45),
            PlayerLeft => SpriteRect::new(995, 480, 80, 41),
            PlayerStraight => SpriteRect::new(1085, 480, 80, 41),
            PlayerRight => SpriteRect::new(995, 531, 80, 41),
        }
    }

    pub fn kind(self) -> SpriteKind {
        use SpriteId::*;
        match self {
            Billboard01 | Billboard02 | Billboard03 | Billboard04 | Billboard05 | Billboard06
            | Billboard07 | Billboard08 | Billboard09 => SpriteKind::Billboard,
            PalmTree | Tree1 | Tree2 | DeadTree1 | DeadTree2 | Bush1 | Bush2 | Cactus | Stump => {
                SpriteKind::Plant
            }
            Boulder1 | Boulder2 | Boulder3 => SpriteKind::Rock,
            Column => SpriteKind::Column,
            Semi | Truck | Car01 | Car02 | Car03 | Car04 => SpriteKind::Vehicle,
            PlayerUphillLeft | PlayerUphillStraight | PlayerUphillRight | PlayerLeft
            | PlayerStraight | PlayerRight => SpriteKind::Player,
        }
    }

    /// Collision width in road-width units
    pub fn road_width(self) -> f32 {
        self.rect().w as f32 * SPRITE_SCALE
    }
}

/// World scale for sprites: the player car spans 0.3 of the road half-width.
pub const SPRITE_SCALE: f32 = 0.3 * (1.0 / 80.0);

pub const BILLBOARDS: [SpriteId; 9] = [
    SpriteId::Billboard01,
    SpriteId::Billboard02,
    SpriteId::Billboard03,
    SpriteId::Billboard04,
    SpriteId::Billboard05,
    SpriteId::Billboard06,
    SpriteId::Billboard07,
    SpriteId::Billboard08,
    SpriteId::Billboard09,
];

pub const PLANTS: [SpriteId; 12] = [
    SpriteId::Tree1,
    SpriteId::Tree2,
    SpriteId::DeadTree1,
    SpriteId::DeadTree2,
    SpriteId::PalmTree,
    SpriteId::Bush1,
    SpriteId::Bush2,
    SpriteId::Cactus,
    SpriteId::Stump,
    SpriteId::Boulder1,
    SpriteId::Boulder2,
    SpriteId::Boulder3,
];

pub const CARS: [SpriteId; 6] = [
    SpriteId::Car01,
    SpriteId::Car02,
    SpriteId::Car03,
    SpriteId::Car04,
    SpriteId::Semi,
    SpriteId::Truck,
];

// ---------------------------------------------------------------------------
// Background layers
// ---------------------------------------------------------------------------

/// Parallax layer on the background sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundLayer {
    Sky,
    Hills,
    Trees,
}

impl BackgroundLayer {
    pub fn rect(self) -> SpriteRect {
        match self {
            BackgroundLayer::Hills => SpriteRect::new(5, 5, 1280, 480),
            BackgroundLayer::Sky => SpriteRect::new(5, 495, 1280, 480),
            BackgroundLayer::Trees => SpriteRect::new(5, 985, 1280, 480),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_width_is_three_tenths() {
        assert!((SpriteId::PlayerStraight.road_width() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn catalogue_kinds() {
        assert!(BILLBOARDS.iter().all(|s| s.kind() == SpriteKind::Billboard));
        assert!(CARS.iter().all(|s| s.kind() == SpriteKind::Vehicle));
        assert!(PLANTS.iter().all(|s| matches!(s.kind(), SpriteKind::Plant | SpriteKind::Rock)));
    }
}
