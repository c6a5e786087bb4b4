use std::fmt;
use std::str::FromStr;

use super::errors::GameError;

/// Selectable starfighter classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipClass {
    Interceptor,
    Fighter,
    Assault,
    Destroyer,
    Corvette,
}

/// Multipliers applied to the base settings when a ship is launched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipStats {
    pub speed_mult: f32,
    pub fire_rate_mult: f32,
    pub health_mult: f32,
}

impl ShipClass {
    pub const ALL: [ShipClass; 5] = [
        ShipClass::Interceptor,
        ShipClass::Fighter,
        ShipClass::Assault,
        ShipClass::Destroyer,
        ShipClass::Corvette,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShipClass::Interceptor => "Interceptor",
            ShipClass::Fighter => "Fighter",
            ShipClass::Assault => "Assault",
            ShipClass::Destroyer => "Destroyer",
            ShipClass::Corvette => "Corvette",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ShipClass::Interceptor => "Lightning-fast scout with superior agility",
            ShipClass::Fighter => "Balanced combat vessel for versatile missions",
            ShipClass::Assault => "Heavy gunship designed for frontline combat",
            ShipClass::Destroyer => "Massive dreadnought with thick armor",
            ShipClass::Corvette => "Multi-role vessel combining speed and firepower",
        }
    }

    pub fn stats(&self) -> ShipStats {
        let (speed_mult, fire_rate_mult, health_mult) = match self {
            ShipClass::Interceptor => (1.3, 1.0, 0.8),
            ShipClass::Fighter => (1.1, 1.2, 1.0),
            ShipClass::Assault => (0.9, 1.3, 1.2),
            ShipClass::Destroyer => (0.8, 1.5, 1.5),
            ShipClass::Corvette => (1.2, 1.1, 1.0),
        };
        ShipStats {
            speed_mult,
            fire_rate_mult,
            health_mult,
        }
    }

    /// Next class in selection order, wrapping around.
    pub fn next(&self) -> ShipClass {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous class in selection order, wrapping around.
    pub fn prev(&self) -> ShipClass {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or(0)
    }
}

impl fmt::Display for ShipClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShipClass {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShipClass::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownShip(s.to_string()))
    }
}
