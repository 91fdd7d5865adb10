use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Per-line safety/role tag attached to every emitted source line.
///
/// Ordinals are stable: they are what the metadata record stores, and downstream
/// consumers index on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Label {
    /// Function-wrapping boilerplate.
    Other = 0,
    /// Body line that is not itself a labeled defect site.
    Body = 1,
    MemoryManagementUnsafe = 2,
    MemoryManagementSafe = 3,
    RaceCondUnsafe = 4,
    RaceCondSafe = 5,
    CondWaitUnsafe = 6,
    CondWaitSafe = 7,
    CondSignalUnsafe = 8,
    CondSignalSafe = 9,
    StrcpyUnsafe = 10,
    StrcpySafe = 11,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("No label has ordinal {0}")]
pub struct UnknownLabel(pub u8);

impl Label {
    pub const ALL: [Label; 12] = [
        Label::Other,
        Label::Body,
        Label::MemoryManagementUnsafe,
        Label::MemoryManagementSafe,
        Label::RaceCondUnsafe,
        Label::RaceCondSafe,
        Label::CondWaitUnsafe,
        Label::CondWaitSafe,
        Label::CondSignalUnsafe,
        Label::CondSignalSafe,
        Label::StrcpyUnsafe,
        Label::StrcpySafe,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Label::Other => "OTHER",
            Label::Body => "BODY",
            Label::MemoryManagementUnsafe => "MEMORY_MANAGEMENT_UNSAFE",
            Label::MemoryManagementSafe => "MEMORY_MANAGEMENT_SAFE",
            Label::RaceCondUnsafe => "RACE_COND_UNSAFE",
            Label::RaceCondSafe => "RACE_COND_SAFE",
            Label::CondWaitUnsafe => "COND_WAIT_UNSAFE",
            Label::CondWaitSafe => "COND_WAIT_SAFE",
            Label::CondSignalUnsafe => "COND_SIGNAL_UNSAFE",
            Label::CondSignalSafe => "COND_SIGNAL_SAFE",
            Label::StrcpyUnsafe => "STRCPY_UNSAFE",
            Label::StrcpySafe => "STRCPY_SAFE",
        }
    }

    /// `true` for the ten SAFE/UNSAFE defect-site labels.
    pub fn is_defect_site(self) -> bool {
        !matches!(self, Label::Other | Label::Body)
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        label.ordinal()
    }
}

impl TryFrom<u8> for Label {
    type Error = UnknownLabel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Label::ALL
            .get(value as usize)
            .copied()
            .ok_or(UnknownLabel(value))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
