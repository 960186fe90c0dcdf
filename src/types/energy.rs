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

//! Perfil energético del edificio

use std::ops::Add;

use serde::{Deserialize, Serialize};

use super::{ArchetypeInfo, EpcClass, HeatingTechnology, MatchLevel};

/// Reparto de energía entre electricidad y otros combustibles [kWh/an]
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CarrierSplit {
    /// Energy supplied as electricity
    pub electricity: f64,
    /// Energy supplied by other fuels (gas, oil, biomass, district heat)
    pub other_fuel: f64,
}

impl CarrierSplit {
    /// Reparte una cantidad de energía según la fracción eléctrica
    pub fn from_share(energy: f64, electricity_share: f64) -> Self {
        Self {
            electricity: energy * electricity_share,
            other_fuel: energy * (1.0 - electricity_share),
        }
    }

    /// Total energy
    pub fn total(self) -> f64 {
        self.electricity + self.other_fuel
    }

    /// Electricity share of the total, 0.0 for a zero total
    pub fn electricity_share(self) -> f64 {
        let tot = self.total();
        if tot == 0.0 {
            0.0
        } else {
            self.electricity / tot
        }
    }

    /// Energy by carrier as a vector (electricity, other fuel)
    pub fn to_vec(self) -> Vec<f64> {
        vec![self.electricity, self.other_fuel]
    }
}

impl Add for CarrierSplit {
    type Output = CarrierSplit;

    fn add(self, other: CarrierSplit) -> CarrierSplit {
        CarrierSplit {
            electricity: self.electricity + other.electricity,
            other_fuel: self.other_fuel + other.other_fuel,
        }
    }
}

/// Mezcla de vectores energéticos por servicio
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnergyMix {
    /// Heating
    pub heating: CarrierSplit,
    /// Cooling
    pub cooling: CarrierSplit,
    /// Heating + cooling
    pub overall: CarrierSplit,
}

impl EnergyMix {
    /// Mezcla energética para unas necesidades de calefacción y refrigeración [kWh/an]
    ///
    /// Heating is split with the share of the heating technology, cooling is electric.
    pub fn new(heating_need: f64, cooling_need: f64, heating: HeatingTechnology) -> Self {
        let heating = CarrierSplit::from_share(heating_need, heating.electricity_share());
        let cooling = CarrierSplit::from_share(cooling_need, 1.0);
        Self {
            heating,
            cooling,
            overall: heating + cooling,
        }
    }
}

/// Resultado de la estimación del perfil energético del edificio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    /// Energy performance class
    pub epc_class: EpcClass,
    /// Annual energy need (scaled HVAC total) [kWh/an]
    pub annual_energy_need: f64,
    /// Annual energy cost [EUR/an]
    pub annual_energy_cost: f64,
    /// Heating + cooling need [kWh/an]
    pub heating_cooling_need: f64,
    /// Heating need [kWh/an]
    pub heating_need: f64,
    /// Cooling need [kWh/an]
    pub cooling_need: f64,
    /// Energy intensity [kWh/m2.an]
    pub energy_intensity: f64,
    /// Energy split by carrier
    pub energy_mix: EnergyMix,
    /// Comfort index [0, 100]
    pub comfort_index: f64,
    /// Flexibility index [0, 100]
    pub flexibility_index: f64,
    /// Matched archetype
    pub archetype: Option<ArchetypeInfo>,
    /// Floor area of the archetype used for scaling [m2]
    pub archetype_floor_area: f64,
    /// Matching rule that selected the archetype
    pub match_level: Option<MatchLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_mix_split() {
        let mix = EnergyMix::new(1000.0, 200.0, HeatingTechnology::GasBoiler);
        assert!((mix.heating.electricity - 100.0).abs() < 1e-9);
        assert!((mix.heating.other_fuel - 900.0).abs() < 1e-9);
        assert_eq!(mix.cooling.electricity, 200.0);
        assert_eq!(mix.cooling.other_fuel, 0.0);
        assert!((mix.overall.total() - 1200.0).abs() < 1e-9);
        assert!((mix.overall.electricity_share() - 0.25).abs() < 1e-9);

        let mix = EnergyMix::new(1000.0, 0.0, HeatingTechnology::HeatPump);
        assert_eq!(mix.overall.other_fuel, 0.0);
        assert_eq!(mix.overall.electricity_share(), 1.0);
    }

    #[test]
    fn energy_mix_empty() {
        assert_eq!(CarrierSplit::default().electricity_share(), 0.0);
        assert_eq!(
            CarrierSplit::from_share(10.0, 0.3).to_vec().len(),
            2
        );
    }
}
