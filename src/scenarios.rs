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

/*!
Escenarios de rehabilitación
============================

Compares the current building with the building after applying a set of renovation
measures. The renovated building is simulated with the same archetype and scaled with the
same archetype floor area as the estimation, so that both scenarios are comparable.
*/

use tracing::{info, warn};

use crate::error::{RenovationError, Result};
use crate::estimator::{clamp_index, scale_to_building};
use crate::simulation::{
    AnnualTotals, EcmRequest, SimulationService, SimulationTarget, UValueTargets, WeatherSource,
};
use crate::types::{
    BuildingInfo, EnergyMix, EstimationResult, RenovationMeasure, RenovationScenario,
};

/// Mejora del índice de confort del escenario rehabilitado
pub const RENOVATED_COMFORT_BONUS: f64 = 5.0;

/// Evaluador de escenarios de rehabilitación
pub struct RenovationScenarioEvaluator<'a, S: ?Sized> {
    service: &'a S,
    weather: WeatherSource,
}

impl<'a, S: SimulationService + ?Sized> RenovationScenarioEvaluator<'a, S> {
    /// Constructor
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
            weather: WeatherSource::default(),
        }
    }

    /// Use another weather source for the simulations
    pub fn with_weather(mut self, weather: WeatherSource) -> Self {
        self.weather = weather;
        self
    }

    /// Escenarios actual y rehabilitado
    ///
    /// The "current" scenario is always first. Without any measure the simulation service
    /// can model, only the "current" scenario is returned.
    pub fn evaluate_scenarios(
        &self,
        building: &BuildingInfo,
        estimation: &EstimationResult,
        selected_measures: &[RenovationMeasure],
    ) -> Result<Vec<RenovationScenario>> {
        let current = RenovationScenario::current(estimation);

        let (simulated, skipped): (Vec<RenovationMeasure>, Vec<RenovationMeasure>) =
            selected_measures.iter().copied().partition(|m| m.is_simulated());
        if !skipped.is_empty() {
            warn!(
                "Measures not supported by the simulation service: {:?}",
                skipped
            );
        }
        if simulated.is_empty() {
            return Ok(vec![current]);
        }

        let archetype = estimation.archetype.as_ref().ok_or_else(|| {
            RenovationError::Validation(
                "the estimation has no archetype to simulate the renovation".into(),
            )
        })?;

        let request = EcmRequest {
            target: SimulationTarget::for_building(building, archetype),
            u_values: UValueTargets::from_measures(&simulated),
            weather: self.weather,
            single_scenario: true,
        };
        let response = self.service.simulate_ecm(&request)?;
        let ecm = response.scenarios.first().ok_or_else(|| {
            RenovationError::ApiResponse("measures simulation returned no scenarios".into())
        })?;
        let totals = AnnualTotals::from_hourly(&ecm.hourly)?;

        let scaled = scale_to_building(totals, building.floor_area, estimation.archetype_floor_area);
        info!(
            "Renovated scenario: {} -> {} ({:.1} -> {:.1} kWh/m2.an)",
            estimation.epc_class, scaled.epc_class, estimation.energy_intensity, scaled.intensity
        );

        let renovated = RenovationScenario {
            id: RenovationScenario::RENOVATED.into(),
            label: "After renovation".into(),
            epc_class: scaled.epc_class,
            annual_energy_need: scaled.totals.hvac,
            annual_energy_cost: scaled.cost(),
            heating_cooling_need: scaled.heating_cooling(),
            energy_intensity: scaled.intensity,
            energy_mix: EnergyMix::new(
                scaled.totals.heating,
                scaled.totals.cooling,
                building.heating,
            ),
            comfort_index: clamp_index(estimation.comfort_index + RENOVATED_COMFORT_BONUS),
            flexibility_index: estimation.flexibility_index,
            measures: simulated.iter().map(ToString::to_string).collect(),
        };

        Ok(vec![current, renovated])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::EnergyProfileEstimator;
    use crate::recorded::{RecordedEcm, RecordedService, RecordedSimulation};
    use crate::simulation::{EcmScenario, HourlyRecord};
    use crate::types::{
        ArchetypeInfo, ConstructionPeriod, CoolingTechnology, EpcClass, GlazingTechnology,
        HeatingTechnology, HotWaterTechnology,
    };
    use pretty_assertions::assert_eq;

    fn hourly(heating: f64, cooling: f64) -> Vec<HourlyRecord> {
        vec![
            HourlyRecord {
                heating,
                cooling,
                hvac: heating + cooling,
            };
            2
        ]
    }

    fn service(ecm_scenarios: Vec<EcmScenario>) -> RecordedService {
        let archetype = ArchetypeInfo::new("Single Family House", "ES", "SFH_ES_1");
        RecordedService {
            archetypes: vec![archetype.clone()],
            simulations: vec![RecordedSimulation {
                archetype: archetype.clone(),
                floor_area: Some(100.0),
                hourly: hourly(4.0e6, 1.0e6),
            }],
            ecm: vec![RecordedEcm {
                archetype,
                u_values: None,
                scenarios: ecm_scenarios,
            }],
        }
    }

    fn combined(floor_area: Option<f64>) -> EcmScenario {
        EcmScenario {
            name: "combined".into(),
            hourly: hourly(2.5e6, 0.75e6),
            floor_area,
        }
    }

    fn building() -> BuildingInfo {
        BuildingInfo {
            country: "ES".into(),
            lat: None,
            lng: None,
            category: "Single Family House".into(),
            construction_period: ConstructionPeriod::From1970To1989,
            floor_area: Some(120.0),
            floors: 2,
            heating: HeatingTechnology::GasBoiler,
            cooling: CoolingTechnology::SplitAirConditioner,
            hot_water: HotWaterTechnology::GasBoiler,
            glazing: GlazingTechnology::Double,
            custom_envelope: false,
            custom_systems: false,
        }
    }

    #[test]
    fn renovated_scaled_with_estimation_area() {
        // the measures simulation reports another floor area, ignored for scaling
        let service = service(vec![combined(Some(200.0))]);
        let building = building();
        let estimation = EnergyProfileEstimator::new(&service)
            .estimate(&building)
            .unwrap();
        assert_eq!(estimation.archetype_floor_area, 100.0);

        let scenarios = RenovationScenarioEvaluator::new(&service)
            .evaluate_scenarios(
                &building,
                &estimation,
                &[RenovationMeasure::WallInsulation, RenovationMeasure::SolarPv],
            )
            .unwrap();
        assert_eq!(scenarios.len(), 2);
        assert!(scenarios[0].is_current());
        let renovated = &scenarios[1];
        assert_eq!(renovated.id, RenovationScenario::RENOVATED);
        assert!((renovated.annual_energy_need - 7800.0).abs() < 1e-6);
        assert!((renovated.energy_intensity - 65.0).abs() < 1e-6);
        assert_eq!(renovated.epc_class, EpcClass::B);
        assert_eq!(
            renovated.comfort_index,
            clamp_index(estimation.comfort_index + RENOVATED_COMFORT_BONUS)
        );
        assert_eq!(renovated.flexibility_index, estimation.flexibility_index);
        assert_eq!(renovated.measures, vec!["wall_insulation".to_string()]);
    }

    #[test]
    fn only_current_without_simulated_measures() {
        let service = service(vec![combined(Some(100.0))]);
        let building = building();
        let estimation = EnergyProfileEstimator::new(&service)
            .estimate(&building)
            .unwrap();
        let scenarios = RenovationScenarioEvaluator::new(&service)
            .evaluate_scenarios(&building, &estimation, &[RenovationMeasure::HeatPump])
            .unwrap();
        assert_eq!(scenarios.len(), 1);
        assert!(scenarios[0].is_current());
    }

    #[test]
    fn estimation_without_archetype() {
        let service = service(vec![combined(Some(100.0))]);
        let building = building();
        let mut estimation = EnergyProfileEstimator::new(&service)
            .estimate(&building)
            .unwrap();
        estimation.archetype = None;
        let res = RenovationScenarioEvaluator::new(&service).evaluate_scenarios(
            &building,
            &estimation,
            &[RenovationMeasure::WallInsulation],
        );
        assert!(matches!(res, Err(RenovationError::Validation(_))));
    }

    #[test]
    fn measures_simulation_without_scenarios() {
        let service = service(vec![]);
        let building = building();
        let estimation = EnergyProfileEstimator::new(&service)
            .estimate(&building)
            .unwrap();
        let res = RenovationScenarioEvaluator::new(&service).evaluate_scenarios(
            &building,
            &estimation,
            &[RenovationMeasure::RoofInsulation],
        );
        assert!(matches!(res, Err(RenovationError::ApiResponse(_))));
    }
}
