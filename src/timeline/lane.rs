//! Lane assignment for entries in the filtered sequence.

/// Side of the central rail an entry is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    Left,
    Right,
}

impl Lane {
    /// Even positions go left, odd positions go right.
    ///
    /// The position is the index within the current filtered sequence, so an
    /// entry can change sides when the filter changes.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Lane::Left
        } else {
            Lane::Right
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lane::Left => "left",
            Lane::Right => "right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lanes_alternate() {
        assert_eq!(Lane::for_index(0), Lane::Left);
        assert_eq!(Lane::for_index(1), Lane::Right);
        assert_eq!(Lane::for_index(2), Lane::Left);
        assert_eq!(Lane::for_index(7), Lane::Right);
    }

    #[test]
    fn test_lane_names() {
        assert_eq!(Lane::Left.as_str(), "left");
        assert_eq!(Lane::Right.as_str(), "right");
    }
}
