//! Disc registry: the spatial pose of every disc, indexed by disc id.

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::geometry::Point3;
use super::types::DiscId;

/// Where a disc is and which way it faces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscPose {
    /// World position of the disc's center.
    pub position: Point3,
    /// Orientation axis. `(0, 0, 1)` means lying flat.
    pub normal: Point3,
}

impl DiscPose {
    /// A disc lying flat at `position`.
    pub fn resting(position: Point3) -> Self {
        Self {
            position,
            normal: Point3::UP,
        }
    }
}

/// Fill color of a disc. The six smallest discs get distinct hues, the rest
/// are white.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum DiscColor {
    /// Disc 0.
    Red,
    /// Disc 1.
    Green,
    /// Disc 2.
    Blue,
    /// Disc 3.
    Yellow,
    /// Disc 4.
    Cyan,
    /// Disc 5.
    Magenta,
    /// Disc 6 and up.
    White,
}

impl DiscColor {
    /// Palette entry for `disc`.
    pub fn for_disc(disc: DiscId) -> Self {
        match disc.index() {
            0 => DiscColor::Red,
            1 => DiscColor::Green,
            2 => DiscColor::Blue,
            3 => DiscColor::Yellow,
            4 => DiscColor::Cyan,
            5 => DiscColor::Magenta,
            _ => DiscColor::White,
        }
    }

    /// Linear RGB components.
    pub fn rgb(self) -> [f32; 3] {
        match self {
            DiscColor::Red => [1.0, 0.0, 0.0],
            DiscColor::Green => [0.0, 1.0, 0.0],
            DiscColor::Blue => [0.0, 0.0, 1.0],
            DiscColor::Yellow => [1.0, 1.0, 0.0],
            DiscColor::Cyan => [0.0, 1.0, 1.0],
            DiscColor::Magenta => [1.0, 0.0, 1.0],
            DiscColor::White => [1.0, 1.0, 1.0],
        }
    }
}

/// Poses of all discs. Index = disc id.
///
/// Read by renderers every frame; written only by the move executor and the
/// motion interpolator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscRegistry {
    poses: Vec<DiscPose>,
}

impl DiscRegistry {
    /// Places every disc flat in the slot the board records for it.
    pub fn from_board(board: &Board) -> Self {
        let mut poses = vec![DiscPose::resting(Point3::ZERO); board.disc_count()];
        for peg in board.pegs() {
            for (height, cell) in peg.occupancy().iter().enumerate() {
                if let (Some(disc), Some(slot)) = (cell, peg.slot_position(height)) {
                    poses[disc.index()] = DiscPose::resting(slot);
                }
            }
        }
        Self { poses }
    }

    /// Number of discs.
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Whether the registry holds no discs.
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Pose of `disc`.
    pub fn pose(&self, disc: DiscId) -> Option<&DiscPose> {
        self.poses.get(disc.index())
    }

    /// All poses, indexed by disc id.
    pub fn poses(&self) -> &[DiscPose] {
        &self.poses
    }

    /// Poses paired with their disc ids.
    pub fn iter(&self) -> impl Iterator<Item = (DiscId, &DiscPose)> {
        self.poses
            .iter()
            .enumerate()
            .map(|(i, pose)| (DiscId(i), pose))
    }

    pub(crate) fn pose_mut(&mut self, disc: DiscId) -> &mut DiscPose {
        &mut self.poses[disc.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardGeometry;
    use crate::types::PegId;

    #[test]
    fn test_discs_start_on_peg_zero() {
        let board = Board::new(3, &BoardGeometry::default());
        let discs = DiscRegistry::from_board(&board);
        assert_eq!(discs.len(), 3);

        let left = board.peg(PegId::Left);
        // largest disc at the bottom
        assert_eq!(
            discs.pose(DiscId(2)).unwrap().position,
            left.slot_position(0).unwrap()
        );
        assert_eq!(
            discs.pose(DiscId(0)).unwrap().position,
            left.slot_position(2).unwrap()
        );
        assert!(discs.iter().all(|(_, pose)| pose.normal == Point3::UP));
    }

    #[test]
    fn test_palette_wraps_to_white() {
        assert_eq!(DiscColor::for_disc(DiscId(0)), DiscColor::Red);
        assert_eq!(DiscColor::for_disc(DiscId(5)), DiscColor::Magenta);
        assert_eq!(DiscColor::for_disc(DiscId(9)), DiscColor::White);
        assert_eq!(DiscColor::Cyan.to_string(), "cyan");
    }

    #[test]
    fn test_unknown_disc_has_no_pose() {
        let board = Board::new(2, &BoardGeometry::default());
        let discs = DiscRegistry::from_board(&board);
        assert!(discs.pose(DiscId(2)).is_none());
    }
}
