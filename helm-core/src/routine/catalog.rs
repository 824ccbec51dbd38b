//! Routine catalog
//!
//! Maps the selector IDs the UI hands out to the routine variants this
//! robot knows, with the title and description shown on the selector.

/// Known autonomous routines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum RoutineId {
    /// Stay still for the whole period
    DoNothing = 0,
    /// Drive out and back while streaming tracker telemetry
    Odom = 1,
    /// Drive to a game object, capture it and score it
    Capture = 2,
}

/// Selector value that names no routine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownRoutine(pub u16);

impl RoutineId {
    /// Every routine, in selector order
    pub const ALL: [RoutineId; 3] = [RoutineId::DoNothing, RoutineId::Odom, RoutineId::Capture];

    /// Selector ID
    pub fn id(self) -> u16 {
        self as u16
    }

    /// Short title for the selector button
    pub fn title(self) -> &'static str {
        match self {
            RoutineId::DoNothing => "DO NOTHING!",
            RoutineId::Odom => "Odom",
            RoutineId::Capture => "Capture",
        }
    }

    /// One-line description for the selector
    pub fn description(self) -> &'static str {
        match self {
            RoutineId::DoNothing => "The robot will do nothing.",
            RoutineId::Odom => "Drive out and back, logging tracker readings.",
            RoutineId::Capture => "Grab the nearest object and score it.",
        }
    }

    /// Check if the routine commands any motion
    pub fn moves(self) -> bool {
        !matches!(self, RoutineId::DoNothing)
    }
}

impl TryFrom<u16> for RoutineId {
    type Error = UnknownRoutine;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        RoutineId::ALL
            .into_iter()
            .find(|r| r.id() == value)
            .ok_or(UnknownRoutine(value))
    }
}
