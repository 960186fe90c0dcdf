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
Servicios de simulación
=======================

Contract with the remote building energy simulation services:

- archetype catalogue query
- hourly simulation of an archetype (or of a customized archetype)
- hourly simulation of energy conservation measures (ECM) on an archetype

The crate doesn't implement any transport. A client implements [`SimulationService`] and
maps its transport failures to `ApiConnection` errors and unusable payloads to
`ApiResponse` errors.
*/

use std::cell::OnceCell;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{RenovationError, Result};
use crate::types::{
    ArchetypeInfo, BuildingInfo, ConstructionPeriod, CoolingTechnology, EnvelopeElement,
    GlazingTechnology, HeatingTechnology, HotWaterTechnology, RenovationMeasure,
};

/// Número de horas de un año de simulación
pub const HOURS_PER_YEAR: usize = 8760;
/// Conversión de la unidad de las cargas horarias (Wh) a kWh
pub const KWH_PER_WH: f64 = 0.001;
/// Superficie del arquetipo cuando la respuesta no la incluye [m2]
pub const ARCHETYPE_FLOOR_AREA_DEFAULT: f64 = 100.0;

/// Datos climáticos usados por la simulación
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherSource {
    /// Typical meteorological year from PVGIS for the archetype location
    Pvgis,
    /// EPW weather file bundled with the archetype
    Epw,
}

impl Default for WeatherSource {
    fn default() -> Self {
        WeatherSource::Pvgis
    }
}

/// Datos del edificio que sustituyen a los valores por defecto del arquetipo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingOverrides {
    /// Conditioned floor area [m2]
    pub floor_area: Option<f64>,
    /// Number of floors
    pub floors: u32,
    /// Construction period
    pub construction_period: ConstructionPeriod,
    /// Glazing
    pub glazing: GlazingTechnology,
    /// Heating system
    pub heating: HeatingTechnology,
    /// Cooling system
    pub cooling: CoolingTechnology,
    /// Hot water system
    pub hot_water: HotWaterTechnology,
}

impl From<&BuildingInfo> for BuildingOverrides {
    fn from(building: &BuildingInfo) -> Self {
        Self {
            floor_area: building.floor_area,
            floors: building.floors,
            construction_period: building.construction_period,
            glazing: building.glazing,
            heating: building.heating,
            cooling: building.cooling,
            hot_water: building.hot_water,
        }
    }
}

/// Edificio a simular
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimulationTarget {
    /// Archetype with its default definition
    Archetype {
        /// Archetype reference
        archetype: ArchetypeInfo,
    },
    /// Archetype with user modified envelope or systems
    Custom {
        /// Base archetype
        archetype: ArchetypeInfo,
        /// Values replacing the archetype defaults
        overrides: BuildingOverrides,
    },
}

impl SimulationTarget {
    /// Objetivo de simulación para un edificio y su arquetipo
    ///
    /// Uses the custom payload only when the user modified the archetype defaults.
    pub fn for_building(building: &BuildingInfo, archetype: &ArchetypeInfo) -> Self {
        if building.is_customized() {
            SimulationTarget::Custom {
                archetype: archetype.clone(),
                overrides: building.into(),
            }
        } else {
            SimulationTarget::Archetype {
                archetype: archetype.clone(),
            }
        }
    }

    /// Archetype of the target
    pub fn archetype(&self) -> &ArchetypeInfo {
        match self {
            SimulationTarget::Archetype { archetype } => archetype,
            SimulationTarget::Custom { archetype, .. } => archetype,
        }
    }
}

/// Transmitancias objetivo por elemento [W/m2K]
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UValueTargets {
    /// Walls
    #[serde(default)]
    pub wall: Option<f64>,
    /// Roof
    #[serde(default)]
    pub roof: Option<f64>,
    /// Windows
    #[serde(default)]
    pub window: Option<f64>,
}

impl UValueTargets {
    /// Transmitancias objetivo de las medidas admitidas por el simulador
    ///
    /// Measures without a target U-value are ignored.
    pub fn from_measures(measures: &[RenovationMeasure]) -> Self {
        let mut targets = UValueTargets::default();
        for (element, u_value) in measures.iter().filter_map(|m| m.target_u_value()) {
            match element {
                EnvelopeElement::Wall => targets.wall = Some(u_value),
                EnvelopeElement::Roof => targets.roof = Some(u_value),
                EnvelopeElement::Window => targets.window = Some(u_value),
            }
        }
        targets
    }

    /// True when no element is modified
    pub fn is_empty(&self) -> bool {
        self.wall.is_none() && self.roof.is_none() && self.window.is_none()
    }
}

/// Petición de simulación del estado actual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Building to simulate
    pub target: SimulationTarget,
    /// Optional U-value targets
    #[serde(default)]
    pub u_values: Option<UValueTargets>,
    /// Weather data
    #[serde(default)]
    pub weather: WeatherSource,
}

/// Petición de simulación de medidas de mejora (ECM)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcmRequest {
    /// Building to simulate
    pub target: SimulationTarget,
    /// U-value targets of all the requested measures
    pub u_values: UValueTargets,
    /// Weather data
    #[serde(default)]
    pub weather: WeatherSource,
    /// Return a single combined scenario instead of one scenario per measure
    pub single_scenario: bool,
}

/// Cargas de una hora de simulación [Wh]
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HourlyRecord {
    /// Heating load
    pub heating: f64,
    /// Cooling load
    pub cooling: f64,
    /// Combined HVAC load
    pub hvac: f64,
}

/// Respuesta de la simulación de un edificio
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationResponse {
    /// Hourly loads for a full year
    #[serde(default)]
    pub hourly: Vec<HourlyRecord>,
    /// Floor area of the simulated building [m2]
    #[serde(default)]
    pub floor_area: Option<f64>,
}

/// Escenario devuelto por la simulación de medidas
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EcmScenario {
    /// Scenario name
    pub name: String,
    /// Hourly loads for a full year
    #[serde(default)]
    pub hourly: Vec<HourlyRecord>,
    /// Floor area of the simulated building [m2]
    #[serde(default)]
    pub floor_area: Option<f64>,
}

/// Respuesta de la simulación de medidas
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EcmResponse {
    /// Simulated scenarios
    #[serde(default)]
    pub scenarios: Vec<EcmScenario>,
}

/// Servicios remotos de simulación energética
pub trait SimulationService {
    /// Catálogo de arquetipos disponibles
    fn archetypes(&self) -> Result<Vec<ArchetypeInfo>>;

    /// Simulación horaria de un arquetipo
    fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResponse>;

    /// Simulación horaria de medidas de mejora sobre un arquetipo
    fn simulate_ecm(&self, request: &EcmRequest) -> Result<EcmResponse>;
}

impl<'a, S: SimulationService + ?Sized> SimulationService for &'a S {
    fn archetypes(&self) -> Result<Vec<ArchetypeInfo>> {
        (**self).archetypes()
    }

    fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResponse> {
        (**self).simulate(request)
    }

    fn simulate_ecm(&self, request: &EcmRequest) -> Result<EcmResponse> {
        (**self).simulate_ecm(request)
    }
}

/// Servicio con catálogo de arquetipos memorizado
///
/// The archetype catalogue is fetched on first use and kept for the whole lifetime of
/// the wrapper. There is no expiry nor invalidation: archetypes are static reference data.
/// A failed fetch is not cached, so the next call tries again.
/// Simulation calls are always forwarded.
#[derive(Debug)]
pub struct CachedService<S> {
    inner: S,
    catalogue: OnceCell<Vec<ArchetypeInfo>>,
}

impl<S: SimulationService> CachedService<S> {
    /// Envuelve un servicio
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            catalogue: OnceCell::new(),
        }
    }

    /// Wrapped service
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Catálogo de arquetipos, consultado como mucho una vez
    pub fn catalogue(&self) -> Result<&[ArchetypeInfo]> {
        if self.catalogue.get().is_none() {
            let archetypes = self.inner.archetypes()?;
            debug!("Fetched catalogue with {} archetypes", archetypes.len());
            let _ = self.catalogue.set(archetypes);
        }
        self.catalogue
            .get()
            .map(Vec::as_slice)
            .ok_or_else(|| RenovationError::ApiResponse("archetype catalogue unavailable".into()))
    }
}

impl<S: SimulationService> SimulationService for CachedService<S> {
    fn archetypes(&self) -> Result<Vec<ArchetypeInfo>> {
        self.catalogue().map(<[ArchetypeInfo]>::to_vec)
    }

    fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResponse> {
        self.inner.simulate(request)
    }

    fn simulate_ecm(&self, request: &EcmRequest) -> Result<EcmResponse> {
        self.inner.simulate_ecm(request)
    }
}

/// Totales anuales de una simulación horaria [kWh/an]
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnualTotals {
    /// Heating
    pub heating: f64,
    /// Cooling
    pub cooling: f64,
    /// Combined HVAC
    pub hvac: f64,
}

impl AnnualTotals {
    /// Suma las cargas horarias [Wh] y convierte a kWh
    ///
    /// An empty record list, or any negative or non finite load, is an unusable response.
    pub fn from_hourly(hourly: &[HourlyRecord]) -> Result<Self> {
        if hourly.is_empty() {
            return Err(RenovationError::ApiResponse(
                "simulation response without hourly records".into(),
            ));
        }
        if hourly.len() != HOURS_PER_YEAR {
            warn!(
                "Simulation returned {} hourly records instead of {}",
                hourly.len(),
                HOURS_PER_YEAR
            );
        }
        if let Some((hour, _)) = hourly.iter().enumerate().find(|(_, r)| {
            [r.heating, r.cooling, r.hvac]
                .iter()
                .any(|v| !v.is_finite() || *v < 0.0)
        }) {
            return Err(RenovationError::ApiResponse(format!(
                "invalid load values in hourly record {}",
                hour
            )));
        }
        let totals = hourly.iter().fold(AnnualTotals::default(), |acc, r| AnnualTotals {
            heating: acc.heating + r.heating,
            cooling: acc.cooling + r.cooling,
            hvac: acc.hvac + r.hvac,
        });
        Ok(totals.scaled(KWH_PER_WH))
    }

    /// Multiply all totals by a factor
    pub fn scaled(self, factor: f64) -> Self {
        AnnualTotals {
            heating: self.heating * factor,
            cooling: self.cooling * factor,
            hvac: self.hvac * factor,
        }
    }
}

/// Superficie útil del arquetipo simulado
///
/// Uses the area in the response, or the default value when it is missing or not positive.
pub fn archetype_floor_area(floor_area: Option<f64>) -> f64 {
    match floor_area {
        Some(area) if area.is_finite() && area > 0.0 => area,
        _ => ARCHETYPE_FLOOR_AREA_DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingService {
        calls: Cell<usize>,
        fail: bool,
    }

    impl SimulationService for CountingService {
        fn archetypes(&self) -> Result<Vec<ArchetypeInfo>> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(RenovationError::ApiConnection("offline".into()))
            } else {
                Ok(vec![ArchetypeInfo::new("Single Family House", "ES", "SFH_ES")])
            }
        }

        fn simulate(&self, _request: &SimulationRequest) -> Result<SimulationResponse> {
            Ok(SimulationResponse::default())
        }

        fn simulate_ecm(&self, _request: &EcmRequest) -> Result<EcmResponse> {
            Ok(EcmResponse::default())
        }
    }

    #[test]
    fn cached_catalogue_fetched_once() {
        let service = CachedService::new(CountingService {
            calls: Cell::new(0),
            fail: false,
        });
        assert_eq!(service.catalogue().unwrap().len(), 1);
        assert_eq!(service.archetypes().unwrap().len(), 1);
        assert_eq!(service.catalogue().unwrap()[0].name, "SFH_ES");
        assert_eq!(service.inner().calls.get(), 1);
    }

    #[test]
    fn cached_catalogue_errors_not_cached() {
        let service = CachedService::new(CountingService {
            calls: Cell::new(0),
            fail: true,
        });
        assert!(matches!(
            service.catalogue(),
            Err(RenovationError::ApiConnection(_))
        ));
        assert!(service.catalogue().is_err());
        assert_eq!(service.inner().calls.get(), 2);
    }

    #[test]
    fn annual_totals() {
        let hourly = vec![
            HourlyRecord {
                heating: 1500.0,
                cooling: 500.0,
                hvac: 2000.0,
            };
            HOURS_PER_YEAR
        ];
        let totals = AnnualTotals::from_hourly(&hourly).unwrap();
        assert!((totals.heating - 13140.0).abs() < 1e-6);
        assert!((totals.cooling - 4380.0).abs() < 1e-6);
        assert!((totals.hvac - 17520.0).abs() < 1e-6);
    }

    #[test]
    fn annual_totals_invalid() {
        assert!(matches!(
            AnnualTotals::from_hourly(&[]),
            Err(RenovationError::ApiResponse(_))
        ));
        let hourly = vec![HourlyRecord {
            heating: std::f64::NAN,
            cooling: 0.0,
            hvac: 0.0,
        }];
        assert!(matches!(
            AnnualTotals::from_hourly(&hourly),
            Err(RenovationError::ApiResponse(_))
        ));
        let hourly = vec![HourlyRecord {
            heating: 0.0,
            cooling: -1.0,
            hvac: 0.0,
        }];
        assert!(AnnualTotals::from_hourly(&hourly).is_err());
    }

    #[test]
    fn u_values_from_measures() {
        let targets = UValueTargets::from_measures(&[
            RenovationMeasure::WallInsulation,
            RenovationMeasure::SolarPv,
            RenovationMeasure::WindowReplacement,
        ]);
        assert_eq!(
            targets,
            UValueTargets {
                wall: Some(0.25),
                roof: None,
                window: Some(1.10),
            }
        );
        assert!(UValueTargets::from_measures(&[RenovationMeasure::HeatPump]).is_empty());
    }

    #[test]
    fn floor_area_default() {
        assert_eq!(archetype_floor_area(Some(140.0)), 140.0);
        assert_eq!(archetype_floor_area(Some(0.0)), ARCHETYPE_FLOOR_AREA_DEFAULT);
        assert_eq!(archetype_floor_area(None), ARCHETYPE_FLOOR_AREA_DEFAULT);
    }
}
