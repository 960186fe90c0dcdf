// Copyright (c) 2018-2022  Ministerio de Fomento
//                          Instituto de Ciencias de la Construcción Eduardo Torroja (IETcc-CSIC)

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

// Author(s): Rafael Villar Burke <pachi@ietcc.csic.es>

//! Medidas de rehabilitación (ECM)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Elemento de la envolvente afectado por una medida
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeElement {
    /// Opaque walls
    #[strum(to_string = "wall")]
    Wall,
    /// Roof
    #[strum(to_string = "roof")]
    Roof,
    /// Windows
    #[strum(to_string = "window")]
    Window,
}

/// Medida de mejora de la eficiencia energética
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
pub enum RenovationMeasure {
    /// External wall insulation
    #[strum(to_string = "wall_insulation")]
    WallInsulation,
    /// Roof insulation
    #[strum(to_string = "roof_insulation")]
    RoofInsulation,
    /// Window replacement
    #[strum(to_string = "window_replacement")]
    WindowReplacement,
    /// Ground floor insulation
    #[strum(to_string = "floor_insulation")]
    FloorInsulation,
    /// Heat pump replacing the heating system
    #[strum(to_string = "heat_pump")]
    HeatPump,
    /// Rooftop photovoltaics
    #[strum(to_string = "solar_pv")]
    SolarPv,
    /// Solar thermal collectors for hot water
    #[strum(to_string = "solar_thermal")]
    SolarThermal,
    /// Air tightness improvement
    #[strum(to_string = "air_sealing")]
    AirSealing,
}

/// Coste unitario de una medida
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MeasureCost {
    /// EUR per m2 of conditioned floor area
    PerFloorArea(f64),
    /// EUR per m2 of footprint (floor area / floors)
    PerFootprint(f64),
    /// Fixed cost per building [EUR]
    Fixed(f64),
}

impl RenovationMeasure {
    /// All measures
    pub const ALL: [RenovationMeasure; 8] = [
        RenovationMeasure::WallInsulation,
        RenovationMeasure::RoofInsulation,
        RenovationMeasure::WindowReplacement,
        RenovationMeasure::FloorInsulation,
        RenovationMeasure::HeatPump,
        RenovationMeasure::SolarPv,
        RenovationMeasure::SolarThermal,
        RenovationMeasure::AirSealing,
    ];

    /// Elemento y transmitancia objetivo [W/m2K] de las medidas que admite el simulador
    ///
    /// None for measures the simulation service cannot model.
    pub fn target_u_value(self) -> Option<(EnvelopeElement, f64)> {
        use RenovationMeasure::*;
        match self {
            WallInsulation => Some((EnvelopeElement::Wall, 0.25)),
            RoofInsulation => Some((EnvelopeElement::Roof, 0.20)),
            WindowReplacement => Some((EnvelopeElement::Window, 1.10)),
            _ => None,
        }
    }

    /// True if the simulation service models this measure
    pub fn is_simulated(self) -> bool {
        self.target_u_value().is_some()
    }

    /// Coste de referencia de la medida
    pub fn unit_cost(self) -> MeasureCost {
        use RenovationMeasure::*;
        match self {
            WallInsulation => MeasureCost::PerFloorArea(80.0),
            RoofInsulation => MeasureCost::PerFootprint(60.0),
            WindowReplacement => MeasureCost::PerFloorArea(45.0),
            FloorInsulation => MeasureCost::PerFootprint(35.0),
            HeatPump => MeasureCost::Fixed(12000.0),
            SolarPv => MeasureCost::Fixed(6000.0),
            SolarThermal => MeasureCost::Fixed(4000.0),
            AirSealing => MeasureCost::PerFloorArea(10.0),
        }
    }
}
