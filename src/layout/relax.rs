use serde::Serialize;

/// Relaxation state of one room instance.
///
/// Each state widens the search of the previous one; `Unplaced` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelaxState {
    /// Target size at the primary anchor site.
    Anchored,
    /// Smaller sizes, down to the room minimum, at the primary site.
    Shrinking,
    /// Every size at every sliding position along the primary site.
    Sliding,
    /// Every size at the remaining sites.
    FallbackZone,
    Unplaced,
}

impl RelaxState {
    /// The next, more relaxed state.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Anchored => Self::Shrinking,
            Self::Shrinking => Self::Sliding,
            Self::Sliding => Self::FallbackZone,
            Self::FallbackZone | Self::Unplaced => Self::Unplaced,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::Unplaced
    }
}
