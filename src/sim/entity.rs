//! Entity capability seam and the sprite catalog
//!
//! The sim never touches pixels. Entities carry an [`ImageName`] and ask an
//! [`ImageCatalog`] for extents when bounds are needed; drawing goes through
//! a [`DrawSurface`]. Both traits are implemented by the browser shell.

use glam::Vec2;

use super::geom::Rect;

/// Every sprite the game can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageName {
    SkierCrash,
    SkierLeft,
    SkierLeftDown,
    SkierDown,
    SkierRightDown,
    SkierRight,
    SkierJump1,
    SkierJump2,
    SkierJump3,
    SkierJump4,
    SkierJump5,
    Tree,
    TreeCluster,
    Rock1,
    Rock2,
    JumpRamp,
    MuddyTerrain,
    SpeedBoost,
    Rhino,
    RhinoRun1,
    RhinoRun2,
    RhinoEat1,
    RhinoEat2,
    RhinoEat3,
    RhinoEat4,
    RhinoCelebrate1,
    RhinoCelebrate2,
}

impl ImageName {
    /// All sprites, for the asset preloader
    pub const ALL: [ImageName; 27] = [
        ImageName::SkierCrash,
        ImageName::SkierLeft,
        ImageName::SkierLeftDown,
        ImageName::SkierDown,
        ImageName::SkierRightDown,
        ImageName::SkierRight,
        ImageName::SkierJump1,
        ImageName::SkierJump2,
        ImageName::SkierJump3,
        ImageName::SkierJump4,
        ImageName::SkierJump5,
        ImageName::Tree,
        ImageName::TreeCluster,
        ImageName::Rock1,
        ImageName::Rock2,
        ImageName::JumpRamp,
        ImageName::MuddyTerrain,
        ImageName::SpeedBoost,
        ImageName::Rhino,
        ImageName::RhinoRun1,
        ImageName::RhinoRun2,
        ImageName::RhinoEat1,
        ImageName::RhinoEat2,
        ImageName::RhinoEat3,
        ImageName::RhinoEat4,
        ImageName::RhinoCelebrate1,
        ImageName::RhinoCelebrate2,
    ];

    /// Asset path relative to the site root
    pub fn asset_path(&self) -> &'static str {
        match self {
            ImageName::SkierCrash => "img/skier_crash.png",
            ImageName::SkierLeft => "img/skier_left.png",
            ImageName::SkierLeftDown => "img/skier_left_down.png",
            ImageName::SkierDown => "img/skier_down.png",
            ImageName::SkierRightDown => "img/skier_right_down.png",
            ImageName::SkierRight => "img/skier_right.png",
            ImageName::SkierJump1 => "img/skier_jump_1.png",
            ImageName::SkierJump2 => "img/skier_jump_2.png",
            ImageName::SkierJump3 => "img/skier_jump_3.png",
            ImageName::SkierJump4 => "img/skier_jump_4.png",
            ImageName::SkierJump5 => "img/skier_jump_5.png",
            ImageName::Tree => "img/tree_1.png",
            ImageName::TreeCluster => "img/tree_cluster.png",
            ImageName::Rock1 => "img/rock_1.png",
            ImageName::Rock2 => "img/rock_2.png",
            ImageName::JumpRamp => "img/jump_ramp.png",
            ImageName::MuddyTerrain => "img/muddy_terrain.png",
            ImageName::SpeedBoost => "img/speed_boost.png",
            ImageName::Rhino => "img/rhino_default.png",
            ImageName::RhinoRun1 => "img/rhino_run_left.png",
            ImageName::RhinoRun2 => "img/rhino_run_left_2.png",
            ImageName::RhinoEat1 => "img/rhino_eat_1.png",
            ImageName::RhinoEat2 => "img/rhino_eat_2.png",
            ImageName::RhinoEat3 => "img/rhino_eat_3.png",
            ImageName::RhinoEat4 => "img/rhino_eat_4.png",
            ImageName::RhinoCelebrate1 => "img/rhino_celebrate_1.png",
            ImageName::RhinoCelebrate2 => "img/rhino_celebrate_2.png",
        }
    }
}

/// Lookup of loaded sprite extents.
///
/// `None` means the asset has not finished loading; callers must treat that
/// as "cannot collide / cannot draw this frame", never as an error.
pub trait ImageCatalog {
    fn size(&self, name: ImageName) -> Option<Vec2>;
}

/// Where sprites get drawn. `top_left` is already offset into screen space
/// by the caller; the surface knows nothing about world coordinates.
pub trait DrawSurface {
    fn draw_image(&mut self, name: ImageName, top_left: Vec2, size: Vec2);
}

/// Shared capability set of every placed object: a position, a current
/// sprite, derived bounds, and drawing.
pub trait Entity {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, pos: Vec2);
    fn image(&self) -> ImageName;

    /// Full-image bounds centered on the position. `None` until the sprite
    /// extent is known.
    fn bounds(&self, images: &dyn ImageCatalog) -> Option<Rect> {
        let size = images.size(self.image())?;
        Some(Rect::centered_on(self.position(), size))
    }

    /// Draw the sprite centered on the position, shifted by the viewport
    /// origin `offset`.
    fn draw(&self, surface: &mut dyn DrawSurface, images: &dyn ImageCatalog, offset: Vec2) {
        if let Some(size) = images.size(self.image()) {
            let top_left = self.position() - size / 2.0 - offset;
            surface.draw_image(self.image(), top_left, size);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Catalog that reports the same fixed size for every sprite
    pub struct FixedImages(pub Vec2);

    impl ImageCatalog for FixedImages {
        fn size(&self, _name: ImageName) -> Option<Vec2> {
            Some(self.0)
        }
    }

    /// Catalog with nothing loaded
    pub struct NoImages;

    impl ImageCatalog for NoImages {
        fn size(&self, _name: ImageName) -> Option<Vec2> {
            None
        }
    }

    /// Surface that records every draw call
    #[derive(Default)]
    pub struct RecordingSurface {
        pub calls: Vec<(ImageName, Vec2, Vec2)>,
    }

    impl DrawSurface for RecordingSurface {
        fn draw_image(&mut self, name: ImageName, top_left: Vec2, size: Vec2) {
            self.calls.push((name, top_left, size));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    struct Marker {
        pos: Vec2,
    }

    impl Entity for Marker {
        fn position(&self) -> Vec2 {
            self.pos
        }
        fn set_position(&mut self, pos: Vec2) {
            self.pos = pos;
        }
        fn image(&self) -> ImageName {
            ImageName::Tree
        }
    }

    #[test]
    fn test_all_lists_every_sprite_once() {
        let mut seen = std::collections::HashSet::new();
        for name in ImageName::ALL {
            assert!(seen.insert(name), "{name:?} listed twice");
        }
        // Every entry resolves to its own asset; the preloader relies on
        // one file per sprite
        let paths: std::collections::HashSet<_> =
            ImageName::ALL.iter().map(|n| n.asset_path()).collect();
        assert_eq!(paths.len(), ImageName::ALL.len());
    }

    #[test]
    fn test_default_bounds_centered() {
        let marker = Marker {
            pos: Vec2::new(100.0, 200.0),
        };
        let images = FixedImages(Vec2::new(40.0, 60.0));
        let bounds = marker.bounds(&images).unwrap();
        assert_eq!(bounds, Rect::new(80.0, 170.0, 120.0, 230.0));
    }

    #[test]
    fn test_bounds_none_until_loaded() {
        let marker = Marker { pos: Vec2::ZERO };
        assert!(marker.bounds(&NoImages).is_none());
    }

    #[test]
    fn test_draw_applies_viewport_offset() {
        let marker = Marker {
            pos: Vec2::new(100.0, 100.0),
        };
        let images = FixedImages(Vec2::new(20.0, 20.0));
        let mut surface = RecordingSurface::default();
        marker.draw(&mut surface, &images, Vec2::new(50.0, 25.0));
        assert_eq!(surface.calls.len(), 1);
        let (name, top_left, size) = surface.calls[0];
        assert_eq!(name, ImageName::Tree);
        assert_eq!(top_left, Vec2::new(40.0, 65.0));
        assert_eq!(size, Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_draw_skipped_when_not_loaded() {
        let marker = Marker { pos: Vec2::ZERO };
        let mut surface = RecordingSurface::default();
        marker.draw(&mut surface, &NoImages, Vec2::ZERO);
        assert!(surface.calls.is_empty());
    }
}
