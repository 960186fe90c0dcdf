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

//! Escenarios de rehabilitación

use serde::{Deserialize, Serialize};

use super::{EnergyMix, EpcClass, EstimationResult};

/// Escenario comparable de situación actual o rehabilitada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenovationScenario {
    /// Scenario identifier ("current", "renovated")
    pub id: String,
    /// Display label
    pub label: String,
    /// Energy performance class
    pub epc_class: EpcClass,
    /// Annual energy need [kWh/an]
    pub annual_energy_need: f64,
    /// Annual energy cost [EUR/an]
    pub annual_energy_cost: f64,
    /// Heating + cooling need [kWh/an]
    pub heating_cooling_need: f64,
    /// Energy intensity [kWh/m2.an]
    pub energy_intensity: f64,
    /// Energy split by carrier
    pub energy_mix: EnergyMix,
    /// Comfort index [0, 100]
    pub comfort_index: f64,
    /// Flexibility index [0, 100]
    pub flexibility_index: f64,
    /// Names of the applied measures
    pub measures: Vec<String>,
}

impl RenovationScenario {
    /// Identificador del escenario de situación actual
    pub const CURRENT: &'static str = "current";
    /// Identificador del escenario rehabilitado
    pub const RENOVATED: &'static str = "renovated";

    /// Escenario de situación actual, copia de la estimación
    pub fn current(estimation: &EstimationResult) -> Self {
        Self {
            id: Self::CURRENT.into(),
            label: "Current building".into(),
            epc_class: estimation.epc_class,
            annual_energy_need: estimation.annual_energy_need,
            annual_energy_cost: estimation.annual_energy_cost,
            heating_cooling_need: estimation.heating_cooling_need,
            energy_intensity: estimation.energy_intensity,
            energy_mix: estimation.energy_mix,
            comfort_index: estimation.comfort_index,
            flexibility_index: estimation.flexibility_index,
            measures: vec![],
        }
    }

    /// True for the baseline scenario
    pub fn is_current(&self) -> bool {
        self.id == Self::CURRENT
    }
}
