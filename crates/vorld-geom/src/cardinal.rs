use serde::{Deserialize, Serialize};

use crate::Vec3;

/// Threshold under which a vector component counts as zero.
const AXIS_EPSILON: f32 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Unit directions. Forward is +Z, Up is +Y, Right is +X.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[repr(u8)]
pub enum Direction {
    Forward = 0,
    Back = 1,
    Up = 2,
    Down = 3,
    Right = 4,
    Left = 5,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Forward,
        Direction::Back,
        Direction::Up,
        Direction::Down,
        Direction::Right,
        Direction::Left,
    ];

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn from_index(i: u8) -> Option<Direction> {
        Self::ALL.get(i as usize).copied()
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Forward => Direction::Back,
            Direction::Back => Direction::Forward,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }

    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Direction::Forward | Direction::Back => Axis::Z,
            Direction::Up | Direction::Down => Axis::Y,
            Direction::Right | Direction::Left => Axis::X,
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        self.axis() != Axis::Y
    }

    /// Integer step `(dx, dy, dz)` of one voxel in this direction.
    #[inline]
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            Direction::Forward => (0, 0, 1),
            Direction::Back => (0, 0, -1),
            Direction::Up => (0, 1, 0),
            Direction::Down => (0, -1, 0),
            Direction::Right => (1, 0, 0),
            Direction::Left => (-1, 0, 0),
        }
    }

    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        let (x, y, z) = self.offset();
        Vec3::new(x as f32, y as f32, z as f32)
    }

    /// Picks the first component (X, then Y, then Z) that is clearly non-zero.
    pub fn try_from_vector(v: Vec3) -> Option<Direction> {
        let pick = |c: f32, pos: Direction, neg: Direction| {
            if c.abs() > AXIS_EPSILON {
                Some(if c > 0.0 { pos } else { neg })
            } else {
                None
            }
        };
        pick(v.x, Direction::Right, Direction::Left)
            .or_else(|| pick(v.y, Direction::Up, Direction::Down))
            .or_else(|| pick(v.z, Direction::Forward, Direction::Back))
    }

    /// Like [`Direction::try_from_vector`], but a vector with no usable component
    /// is a programming error.
    pub fn from_vector(v: Vec3) -> Direction {
        match Self::try_from_vector(v) {
            Some(d) => d,
            None => panic!("vector {v:?} is not aligned with any cardinal direction"),
        }
    }
}

/// The 24 axis-aligned orientations a block can take, named after the global
/// directions its local up and forward point to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[repr(u8)]
pub enum Rotation {
    #[default]
    UpForward = 0,
    UpRight,
    UpBack,
    UpLeft,
    RightForward,
    RightDown,
    RightBack,
    RightUp,
    DownForward,
    DownLeft,
    DownBack,
    DownRight,
    LeftForward,
    LeftUp,
    LeftBack,
    LeftDown,
    ForwardDown,
    ForwardRight,
    ForwardUp,
    ForwardLeft,
    BackUp,
    BackRight,
    BackDown,
    BackLeft,
}

impl Rotation {
    pub const ALL: [Rotation; 24] = [
        Rotation::UpForward,
        Rotation::UpRight,
        Rotation::UpBack,
        Rotation::UpLeft,
        Rotation::RightForward,
        Rotation::RightDown,
        Rotation::RightBack,
        Rotation::RightUp,
        Rotation::DownForward,
        Rotation::DownLeft,
        Rotation::DownBack,
        Rotation::DownRight,
        Rotation::LeftForward,
        Rotation::LeftUp,
        Rotation::LeftBack,
        Rotation::LeftDown,
        Rotation::ForwardDown,
        Rotation::ForwardRight,
        Rotation::ForwardUp,
        Rotation::ForwardLeft,
        Rotation::BackUp,
        Rotation::BackRight,
        Rotation::BackDown,
        Rotation::BackLeft,
    ];

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn from_index(i: u8) -> Option<Rotation> {
        Self::ALL.get(i as usize).copied()
    }

    /// Global direction of the block's local up.
    pub fn up(self) -> Direction {
        match self.index() / 4 {
            0 => Direction::Up,
            1 => Direction::Right,
            2 => Direction::Down,
            3 => Direction::Left,
            4 => Direction::Forward,
            _ => Direction::Back,
        }
    }

    /// Global direction of the block's local forward.
    pub fn forward(self) -> Direction {
        use Direction::*;
        const FORWARD: [Direction; 24] = [
            Forward, Right, Back, Left, // up
            Forward, Down, Back, Up, // right
            Forward, Left, Back, Right, // down
            Forward, Up, Back, Down, // left
            Down, Right, Up, Left, // forward
            Up, Right, Down, Left, // back
        ];
        FORWARD[self as usize]
    }

    /// Global direction of the block's local right, `up × forward`.
    pub fn right(self) -> Direction {
        Direction::from_vector(self.up().to_vec3().cross(self.forward().to_vec3()))
    }

    pub fn from_up_forward(up: Direction, forward: Direction) -> Option<Rotation> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.up() == up && r.forward() == forward)
    }

    /// Builds a rotation from any `up`/`forward` pair. A `forward` on the same
    /// axis as `up` is replaced by a direction on the next axis in
    /// forward/up/right order, negative when `up` is positive.
    pub fn normalized(up: Direction, forward: Direction) -> Rotation {
        let forward = if up.axis() == forward.axis() {
            let next_axis = (up.index() / 2 + 1) % 3;
            let flip = u8::from(up.index() % 2 == 0);
            Direction::from_index(next_axis * 2 + flip).unwrap_or(Direction::Forward)
        } else {
            forward
        };
        Self::from_up_forward(up, forward).unwrap_or_default()
    }

    /// Maps a direction in the block's local frame to the global frame.
    pub fn transform(self, local: Direction) -> Direction {
        match local {
            Direction::Up => self.up(),
            Direction::Down => self.up().opposite(),
            Direction::Forward => self.forward(),
            Direction::Back => self.forward().opposite(),
            Direction::Right => self.right(),
            Direction::Left => self.right().opposite(),
        }
    }

    /// The local direction that [`Rotation::transform`] maps onto `global`.
    pub fn inverse_transform(self, global: Direction) -> Direction {
        Direction::ALL
            .iter()
            .copied()
            .find(|&local| self.transform(local) == global)
            .unwrap_or(global)
    }

    /// Global axis the given local axis lies along.
    #[inline]
    pub fn global_axis(self, local: Axis) -> Axis {
        match local {
            Axis::Y => self.up().axis(),
            Axis::Z => self.forward().axis(),
            Axis::X => remaining_axis(self.up().axis(), self.forward().axis()),
        }
    }

    /// Local axis that lies along the given global axis.
    #[inline]
    pub fn local_axis(self, global: Axis) -> Axis {
        if self.up().axis() == global {
            Axis::Y
        } else if self.forward().axis() == global {
            Axis::Z
        } else {
            Axis::X
        }
    }
}

#[inline]
fn remaining_axis(a: Axis, b: Axis) -> Axis {
    match (a, b) {
        (Axis::X, Axis::Y) | (Axis::Y, Axis::X) => Axis::Z,
        (Axis::X, Axis::Z) | (Axis::Z, Axis::X) => Axis::Y,
        _ => Axis::X,
    }
}
