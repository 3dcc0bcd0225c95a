//! Colorblindness simulation.
//!
//! [`simulate`] predicts how a color appears to a dichromat. The transform
//! itself sits behind the [`Simulator`] trait; [`MachadoSimulator`] applies
//! the full-severity matrices of Machado, Oliveira & Fernandes (2009) in
//! linear RGB.
//!
//! Simulation is advisory. A failing model never aborts a palette: the
//! failure is logged and the color degrades to black.
//!
//! ```
//! use hueforge::color::Color;
//! use hueforge::simulate::{simulate, SimulationType};
//!
//! let red = Color::from_rgb(255, 0, 0);
//! assert_eq!(simulate(red, SimulationType::Normal), red);
//! assert_ne!(simulate(red, SimulationType::Protan), red);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::color::Color;

/// Identity or one of the three dichromacy approximations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum SimulationType {
    #[default]
    Normal = 0,
    /// Missing L cones (red-blind).
    Protan = 1,
    /// Missing M cones (green-blind).
    Deutan = 2,
    /// Missing S cones (blue-blind).
    Tritan = 3,
}

/// The three deficiencies a palette has to survive.
pub const ALL_DEFICIENCIES: [SimulationType; 3] = [
    SimulationType::Protan,
    SimulationType::Deutan,
    SimulationType::Tritan,
];

impl SimulationType {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Protan => "protan",
            Self::Deutan => "deutan",
            Self::Tritan => "tritan",
        }
    }
}

impl fmt::Display for SimulationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimulationType {
    type Err = UnknownSimulationType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "none" => Ok(Self::Normal),
            "protan" | "protanopia" => Ok(Self::Protan),
            "deutan" | "deuteranopia" => Ok(Self::Deutan),
            "tritan" | "tritanopia" => Ok(Self::Tritan),
            _ => Err(UnknownSimulationType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSimulationType(pub String);

impl fmt::Display for UnknownSimulationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown simulation type: {:?}", self.0)
    }
}

impl std::error::Error for UnknownSimulationType {}

/// Failure reported by a [`Simulator`] implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// The transform produced NaN or infinite channels.
    NonFinite {
        kind: SimulationType,
        input: Color,
    },
    /// Model-specific failure.
    Model(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { kind, input } => {
                write!(f, "{kind} simulation of {input} produced non-finite channels")
            }
            Self::Model(msg) => write!(f, "simulation model failed: {msg}"),
        }
    }
}

impl std::error::Error for SimulationError {}

/// A dichromacy model.
pub trait Simulator {
    /// Transform `color` as seen under `kind`.
    ///
    /// Implementations are never asked to handle [`SimulationType::Normal`].
    ///
    /// # Errors
    ///
    /// Returns a [`SimulationError`] when the model cannot produce a color.
    fn try_simulate(&self, color: Color, kind: SimulationType) -> Result<Color, SimulationError>;
}

impl<S: Simulator + ?Sized> Simulator for &S {
    fn try_simulate(&self, color: Color, kind: SimulationType) -> Result<Color, SimulationError> {
        (**self).try_simulate(color, kind)
    }
}

const PROTAN: [[f64; 3]; 3] = [
    [0.152_286, 1.052_583, -0.204_868],
    [0.114_503, 0.786_281, 0.099_216],
    [-0.003_882, -0.048_116, 1.051_998],
];

const DEUTAN: [[f64; 3]; 3] = [
    [0.367_322, 0.860_646, -0.227_968],
    [0.280_085, 0.672_501, 0.047_413],
    [-0.011_820, 0.042_940, 0.968_881],
];

const TRITAN: [[f64; 3]; 3] = [
    [1.255_528, -0.076_749, -0.178_779],
    [-0.078_411, 0.930_809, 0.147_602],
    [0.004_733, 0.691_367, 0.303_900],
];

/// Full-severity Machado (2009) dichromacy matrices applied in linear RGB.
#[derive(Debug, Clone, Copy, Default)]
pub struct MachadoSimulator;

impl MachadoSimulator {
    const fn matrix(kind: SimulationType) -> Option<&'static [[f64; 3]; 3]> {
        match kind {
            SimulationType::Normal => None,
            SimulationType::Protan => Some(&PROTAN),
            SimulationType::Deutan => Some(&DEUTAN),
            SimulationType::Tritan => Some(&TRITAN),
        }
    }
}

impl Simulator for MachadoSimulator {
    fn try_simulate(&self, color: Color, kind: SimulationType) -> Result<Color, SimulationError> {
        let Some(m) = Self::matrix(kind) else {
            return Ok(color);
        };
        let [r, g, b] = color.to_linear();
        let out = [
            m[0][0] * r + m[0][1] * g + m[0][2] * b,
            m[1][0] * r + m[1][1] * g + m[1][2] * b,
            m[2][0] * r + m[2][1] * g + m[2][2] * b,
        ];
        if out.iter().any(|c| !c.is_finite()) {
            return Err(SimulationError::NonFinite { kind, input: color });
        }
        Ok(Color::from_linear(out.map(|c| c.clamp(0.0, 1.0))))
    }
}

/// Simulate `color` with the default model.
#[must_use]
pub fn simulate(color: Color, kind: SimulationType) -> Color {
    simulate_with(&MachadoSimulator, color, kind)
}

/// Simulate `color` with a custom model. Never fails: errors become black.
#[must_use]
pub fn simulate_with<S: Simulator + ?Sized>(simulator: &S, color: Color, kind: SimulationType) -> Color {
    if kind == SimulationType::Normal {
        return color;
    }
    match simulator.try_simulate(color, kind) {
        Ok(simulated) => simulated,
        Err(err) => {
            log::warn!(target: "hueforge::simulate", "{err}; falling back to black");
            Color::BLACK
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl Simulator for Broken {
        fn try_simulate(&self, _: Color, _: SimulationType) -> Result<Color, SimulationError> {
            Err(SimulationError::Model("broken".to_string()))
        }
    }

    #[test]
    fn test_normal_is_identity() {
        let c = Color::from_rgb(12, 34, 56);
        assert_eq!(simulate(c, SimulationType::Normal), c);
        assert_eq!(simulate_with(&Broken, c, SimulationType::Normal), c);
    }

    #[test]
    fn test_grays_survive_every_deficiency() {
        for kind in ALL_DEFICIENCIES {
            for gray in [Color::BLACK, Color::WHITE] {
                assert_eq!(simulate(gray, kind), gray, "{kind}");
            }
        }
    }

    #[test]
    fn test_protan_and_deutan_confuse_red_and_green() {
        let red = Color::from_rgb(220, 40, 40);
        let green = Color::from_rgb(40, 160, 40);
        let normal = red.contrast_ratio(green);
        let deutan = simulate(red, SimulationType::Deutan).contrast_ratio(simulate(green, SimulationType::Deutan));
        assert!(deutan < normal, "deutan {deutan} vs normal {normal}");
    }

    #[test]
    fn test_tritan_changes_blue() {
        let blue = Color::from_rgb(0, 0, 255);
        assert_ne!(simulate(blue, SimulationType::Tritan), blue);
    }

    #[test]
    fn test_failure_falls_back_to_black() {
        let c = Color::from_rgb(200, 100, 50);
        assert_eq!(simulate_with(&Broken, c, SimulationType::Protan), Color::BLACK);
    }

    #[test]
    fn test_parse_simulation_type() {
        assert_eq!("Protanopia".parse::<SimulationType>(), Ok(SimulationType::Protan));
        assert_eq!("deutan".parse::<SimulationType>(), Ok(SimulationType::Deutan));
        assert!("sepia".parse::<SimulationType>().is_err());
        assert_eq!(SimulationType::Tritan.to_string(), "tritan");
    }
}
