//! User-facing messages the engine sends through the host's speech channel.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    LocationUnavailable,
    AlreadyThere,
    MonitoringCancelled,
    MonitoringAutoStopped,
    Entering,
    Exiting,
    LocationReached,
    PositionalTonesOn,
    PositionalTonesOff,
    ParentNotAvailable,
    Ancestor { level: u32 },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::LocationUnavailable => write!(f, "Location unavailable"),
            Notification::AlreadyThere => write!(f, "Mouse already there"),
            Notification::MonitoringCancelled => write!(f, "Mouse location monitoring cancelled"),
            Notification::MonitoringAutoStopped => write!(f, "Mouse location monitoring stopped"),
            Notification::Entering => write!(f, "Entering focused object"),
            Notification::Exiting => write!(f, "Exiting focused object"),
            Notification::LocationReached => write!(f, "Location reached"),
            Notification::PositionalTonesOn => write!(f, "Positional tones on"),
            Notification::PositionalTonesOff => write!(f, "Positional tones off"),
            Notification::ParentNotAvailable => write!(f, "Parent object not available"),
            Notification::Ancestor { level } => write!(f, "ancestor {}", level),
        }
    }
}
