//! Alert categories
//!
//! Each category owns one ranking pipeline and one message per cycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::pair::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertCategory {
    Gainers1h,
    Gainers6h,
    Gainers24h,
    NewLaunches,
}

impl AlertCategory {
    /// Delivery order within a cycle
    pub const ALL: [AlertCategory; 4] = [
        AlertCategory::Gainers1h,
        AlertCategory::Gainers6h,
        AlertCategory::Gainers24h,
        AlertCategory::NewLaunches,
    ];

    pub fn gainers(window: Window) -> Self {
        match window {
            Window::H1 => AlertCategory::Gainers1h,
            Window::H6 => AlertCategory::Gainers6h,
            Window::H24 => AlertCategory::Gainers24h,
        }
    }

    /// Price-change window for gainer categories, `None` for new launches
    pub fn gainer_window(&self) -> Option<Window> {
        match self {
            AlertCategory::Gainers1h => Some(Window::H1),
            AlertCategory::Gainers6h => Some(Window::H6),
            AlertCategory::Gainers24h => Some(Window::H24),
            AlertCategory::NewLaunches => None,
        }
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlertCategory::Gainers1h => "1h gainers",
            AlertCategory::Gainers6h => "6h gainers",
            AlertCategory::Gainers24h => "24h gainers",
            AlertCategory::NewLaunches => "new launches",
        };
        f.write_str(name)
    }
}

impl FromStr for AlertCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1h" | "h1" | "gainers1h" => Ok(AlertCategory::Gainers1h),
            "6h" | "h6" | "gainers6h" => Ok(AlertCategory::Gainers6h),
            "24h" | "h24" | "gainers24h" => Ok(AlertCategory::Gainers24h),
            "new" | "launches" | "newlaunches" => Ok(AlertCategory::NewLaunches),
            other => Err(format!(
                "unknown category '{}' (expected 1h, 6h, 24h or new)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gainer_windows() {
        for window in Window::ALL {
            assert_eq!(AlertCategory::gainers(window).gainer_window(), Some(window));
        }
        assert_eq!(AlertCategory::NewLaunches.gainer_window(), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("1h".parse::<AlertCategory>(), Ok(AlertCategory::Gainers1h));
        assert_eq!("H24".parse::<AlertCategory>(), Ok(AlertCategory::Gainers24h));
        assert_eq!("new".parse::<AlertCategory>(), Ok(AlertCategory::NewLaunches));
        assert!("weekly".parse::<AlertCategory>().is_err());
    }
}
