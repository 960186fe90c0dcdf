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
Servicio de simulación grabado
==============================

Simulation service that answers from a JSON recording of previous responses of the remote
services. It makes the whole pipeline reproducible without network access.

Format:

```json
{
  "archetypes": [{ "category": "Single Family House", "country": "ES", "name": "SFH_ES_1" }],
  "simulations": [{ "archetype": { ... }, "floor_area": 100.0, "hourly": [ ... ] }],
  "ecm": [{ "archetype": { ... }, "u_values": { "wall": 0.25 }, "scenarios": [ ... ] }]
}
```

A request without a recorded answer fails as an unreachable endpoint would.
*/

use std::str;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RenovationError, Result};
use crate::simulation::{
    EcmRequest, EcmResponse, EcmScenario, HourlyRecord, SimulationRequest, SimulationResponse,
    SimulationService, UValueTargets,
};
use crate::types::ArchetypeInfo;

/// Simulación grabada del estado actual de un arquetipo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedSimulation {
    /// Simulated archetype
    pub archetype: ArchetypeInfo,
    /// Floor area of the archetype [m2]
    #[serde(default)]
    pub floor_area: Option<f64>,
    /// Hourly loads [Wh]
    pub hourly: Vec<HourlyRecord>,
}

/// Simulación grabada de medidas de mejora sobre un arquetipo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEcm {
    /// Simulated archetype
    pub archetype: ArchetypeInfo,
    /// Requested U-values. None answers any request for the archetype
    #[serde(default)]
    pub u_values: Option<UValueTargets>,
    /// Simulated scenarios
    pub scenarios: Vec<EcmScenario>,
}

/// Servicio que responde con simulaciones grabadas
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordedService {
    /// Archetype catalogue
    #[serde(default)]
    pub archetypes: Vec<ArchetypeInfo>,
    /// Current state simulations
    #[serde(default)]
    pub simulations: Vec<RecordedSimulation>,
    /// Measures simulations
    #[serde(default)]
    pub ecm: Vec<RecordedEcm>,
}

impl str::FromStr for RecordedService {
    type Err = RenovationError;

    fn from_str(s: &str) -> Result<RecordedService> {
        serde_json::from_str(s).map_err(|e| {
            RenovationError::Validation(format!("could not parse simulation recording: {}", e))
        })
    }
}

impl SimulationService for RecordedService {
    fn archetypes(&self) -> Result<Vec<ArchetypeInfo>> {
        Ok(self.archetypes.clone())
    }

    fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResponse> {
        let archetype = request.target.archetype();
        let recorded = self
            .simulations
            .iter()
            .find(|s| &s.archetype == archetype)
            .ok_or_else(|| {
                RenovationError::ApiConnection(format!(
                    "no recorded simulation for archetype {}",
                    archetype
                ))
            })?;
        debug!(
            "Recorded simulation for {}: {} hourly records",
            archetype,
            recorded.hourly.len()
        );
        Ok(SimulationResponse {
            hourly: recorded.hourly.clone(),
            floor_area: recorded.floor_area,
        })
    }

    fn simulate_ecm(&self, request: &EcmRequest) -> Result<EcmResponse> {
        let archetype = request.target.archetype();
        let recorded = self
            .ecm
            .iter()
            .find(|e| {
                &e.archetype == archetype
                    && e.u_values.map_or(true, |u| u == request.u_values)
            })
            .ok_or_else(|| {
                RenovationError::ApiConnection(format!(
                    "no recorded measures simulation for archetype {} and U-values {:?}",
                    archetype, request.u_values
                ))
            })?;
        let mut scenarios = recorded.scenarios.clone();
        if request.single_scenario {
            scenarios.truncate(1);
        }
        Ok(EcmResponse { scenarios })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{SimulationTarget, WeatherSource};
    use pretty_assertions::assert_eq;

    const RECORDING: &str = r#"{
        "archetypes": [
            { "category": "Single Family House", "country": "ES", "name": "SFH_ES_1" }
        ],
        "simulations": [{
            "archetype": { "category": "Single Family House", "country": "ES", "name": "SFH_ES_1" },
            "floor_area": 100.0,
            "hourly": [{ "heating": 4000000.0, "cooling": 1000000.0, "hvac": 5000000.0 }]
        }],
        "ecm": [{
            "archetype": { "category": "Single Family House", "country": "ES", "name": "SFH_ES_1" },
            "u_values": { "wall": 0.25, "roof": null, "window": null },
            "scenarios": [
                { "name": "combined", "floor_area": 100.0,
                  "hourly": [{ "heating": 2000000.0, "cooling": 500000.0, "hvac": 2500000.0 }] },
                { "name": "extra", "hourly": [] }
            ]
        }]
    }"#;

    fn target() -> SimulationTarget {
        SimulationTarget::Archetype {
            archetype: ArchetypeInfo::new("Single Family House", "ES", "SFH_ES_1"),
        }
    }

    #[test]
    fn recorded_parse() {
        let service: RecordedService = RECORDING.parse().unwrap();
        assert_eq!(service.archetypes().unwrap().len(), 1);
        assert!(matches!(
            "{ not json".parse::<RecordedService>(),
            Err(RenovationError::Validation(_))
        ));
    }

    #[test]
    fn recorded_simulate() {
        let service: RecordedService = RECORDING.parse().unwrap();
        let response = service
            .simulate(&SimulationRequest {
                target: target(),
                u_values: None,
                weather: WeatherSource::Pvgis,
            })
            .unwrap();
        assert_eq!(response.floor_area, Some(100.0));
        assert_eq!(response.hourly[0].hvac, 5_000_000.0);

        let missing = service.simulate(&SimulationRequest {
            target: SimulationTarget::Archetype {
                archetype: ArchetypeInfo::new("Apartment Block", "ES", "AB_ES_1"),
            },
            u_values: None,
            weather: WeatherSource::Pvgis,
        });
        assert!(matches!(missing, Err(RenovationError::ApiConnection(_))));
    }

    #[test]
    fn recorded_simulate_ecm() {
        let service: RecordedService = RECORDING.parse().unwrap();
        let mut request = EcmRequest {
            target: target(),
            u_values: UValueTargets {
                wall: Some(0.25),
                ..Default::default()
            },
            weather: WeatherSource::Pvgis,
            single_scenario: true,
        };
        let response = service.simulate_ecm(&request).unwrap();
        assert_eq!(response.scenarios.len(), 1);
        assert_eq!(response.scenarios[0].name, "combined");

        request.single_scenario = false;
        assert_eq!(service.simulate_ecm(&request).unwrap().scenarios.len(), 2);

        request.u_values.roof = Some(0.20);
        assert!(matches!(
            service.simulate_ecm(&request),
            Err(RenovationError::ApiConnection(_))
        ));
    }
}
