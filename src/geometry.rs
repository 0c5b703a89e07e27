//! Identity of the eight Union Jack measurement lines
//!
//! ```text
//!  NW ------- N ------- NE
//!   | \       |       / |
//!   |   \     |     /   |
//!   W ------- + ------- E
//!   |   /     |     \   |
//!   | /       |       \ |
//!  SW ------- S ------- SE
//! ```
//!
//! Each line runs from its start direction toward its end direction. The two
//! diagonals are reduced first, the four perimeter edges hang off the diagonal
//! endpoints and the two center lines hang off the perimeter midpoints.

use serde::Serialize;
use std::fmt;

/// A compass point on the plate footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Southeast,
    Southwest,
    Northwest,
}

impl Direction {
    /// Unit footprint coordinates of the point this direction names, with the
    /// origin at the southwest corner. Corners for the intercardinals, edge
    /// midpoints for the cardinals.
    pub fn unit_position(self) -> (f64, f64) {
        match self {
            Self::North     => (0.5, 1.),
            Self::South     => (0.5, 0.),
            Self::East      => (1., 0.5),
            Self::West      => (0., 0.5),
            Self::Northeast => (1., 1.),
            Self::Southeast => (1., 0.),
            Self::Southwest => (0., 0.),
            Self::Northwest => (0., 1.),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North     => "North",
            Self::South     => "South",
            Self::East      => "East",
            Self::West      => "West",
            Self::Northeast => "Northeast",
            Self::Southeast => "Southeast",
            Self::Southwest => "Southwest",
            Self::Northwest => "Northwest",
        };
        f.write_str(name)
    }
}

/// A measurement line identified by where it starts and ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LineSegment {
    pub start: Direction,
    pub end:   Direction,
    pub name:  &'static str,
}

impl LineSegment {
    /// `"{start} -> {end}"`
    pub fn display_name(&self) -> String {
        format!("{} -> {}", self.start, self.end)
    }
}

/// Which reduction a line goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineKind {
    Diagonal,
    Perimeter,
    Center(Orientation),
}

/// Orientation of a center line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    /// West to east, across the plate width
    Horizontal,

    /// North to south, across the plate height
    Vertical,
}

/// The eight fixed lines of the Union Jack pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Line {
    TopStartingDiagonal,
    BottomStartingDiagonal,
    NorthPerimeter,
    EastPerimeter,
    SouthPerimeter,
    WestPerimeter,
    HorizontalCenter,
    VerticalCenter,
}

impl Line {
    /// All lines, in reduction order
    pub const ALL: [Line; 8] = [
        Line::TopStartingDiagonal,
        Line::BottomStartingDiagonal,
        Line::NorthPerimeter,
        Line::EastPerimeter,
        Line::SouthPerimeter,
        Line::WestPerimeter,
        Line::HorizontalCenter,
        Line::VerticalCenter,
    ];

    /// Position of this line in [`Line::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn segment(self) -> LineSegment {
        use Direction::*;

        let (start, end, name) = match self {
            Self::TopStartingDiagonal    => (Northwest, Southeast, "Top-Starting Diagonal"),
            Self::BottomStartingDiagonal => (Northeast, Southwest, "Bottom-Starting Diagonal"),
            Self::NorthPerimeter         => (Northwest, Northeast, "North Perimeter"),
            Self::EastPerimeter          => (Northeast, Southeast, "East Perimeter"),
            Self::SouthPerimeter         => (Southwest, Southeast, "South Perimeter"),
            Self::WestPerimeter          => (Northwest, Southwest, "West Perimeter"),
            Self::HorizontalCenter       => (West, East, "Horizontal Center"),
            Self::VerticalCenter         => (North, South, "Vertical Center"),
        };

        LineSegment { start, end, name }
    }

    pub fn kind(self) -> LineKind {
        match self {
            Self::TopStartingDiagonal | Self::BottomStartingDiagonal => LineKind::Diagonal,
            Self::NorthPerimeter | Self::EastPerimeter | Self::SouthPerimeter |
                Self::WestPerimeter => LineKind::Perimeter,
            Self::HorizontalCenter => LineKind::Center(Orientation::Horizontal),
            Self::VerticalCenter   => LineKind::Center(Orientation::Vertical),
        }
    }

    /// Key used for this line in survey files
    pub fn key(self) -> &'static str {
        match self {
            Self::TopStartingDiagonal    => "top_starting_diagonal",
            Self::BottomStartingDiagonal => "bottom_starting_diagonal",
            Self::NorthPerimeter         => "north_perimeter",
            Self::EastPerimeter          => "east_perimeter",
            Self::SouthPerimeter         => "south_perimeter",
            Self::WestPerimeter          => "west_perimeter",
            Self::HorizontalCenter       => "horizontal_center",
            Self::VerticalCenter         => "vertical_center",
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segment = self.segment();
        write!(f, "{} ({})", segment.name, segment.display_name())
    }
}
