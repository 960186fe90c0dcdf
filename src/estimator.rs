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
Estimación del perfil energético
================================

Estimates the energy profile of a building from the simulation of its reference
archetype:

1. match the building to an archetype of the catalogue (country / climate region and
   building category)
2. simulate the archetype and aggregate the hourly loads into annual totals
3. scale the totals with the ratio of floor areas of the building and the archetype
4. derive the energy performance class, cost, carrier mix and comfort and flexibility
   indices
*/

use tracing::{debug, info, warn};

use crate::error::{RenovationError, Result};
use crate::simulation::{
    archetype_floor_area, AnnualTotals, SimulationRequest, SimulationService, SimulationTarget,
    WeatherSource,
};
use crate::types::{
    ArchetypeInfo, BuildingInfo, ClimateRegion, ConstructionPeriod, EnergyMix, EpcClass,
    EstimationResult, GlazingTechnology, HeatingTechnology, HotWaterTechnology, MatchLevel,
};

/// Precio de la energía usado para el coste anual [EUR/kWh]
pub const ENERGY_PRICE: f64 = 0.25;
/// Valor inicial del índice de confort
pub const COMFORT_BASE: f64 = 60.0;
/// Valor inicial del índice de flexibilidad
pub const FLEXIBILITY_BASE: f64 = 40.0;

/// Selecciona el arquetipo más adecuado del catálogo
///
/// Rules, in order of priority (the first archetype of the catalogue satisfying a rule wins):
/// same country and category, same country, same climate region and category,
/// same climate region.
pub fn match_archetype(
    catalogue: &[ArchetypeInfo],
    country: &str,
    category: &str,
) -> Result<(ArchetypeInfo, MatchLevel)> {
    let region = ClimateRegion::from_country(country);
    let in_region = |a: &ArchetypeInfo| region.is_some() && a.region() == region;

    let found = catalogue
        .iter()
        .find(|a| a.is_in_country(country) && a.is_category(category))
        .map(|a| (a, MatchLevel::CountryAndCategory))
        .or_else(|| {
            catalogue
                .iter()
                .find(|a| a.is_in_country(country))
                .map(|a| (a, MatchLevel::Country))
        })
        .or_else(|| {
            catalogue
                .iter()
                .find(|a| in_region(a) && a.is_category(category))
                .map(|a| (a, MatchLevel::RegionAndCategory))
        })
        .or_else(|| {
            catalogue
                .iter()
                .find(|a| in_region(a))
                .map(|a| (a, MatchLevel::Region))
        });

    match found {
        Some((archetype, level)) => {
            if level.is_fallback() {
                warn!(
                    "No archetype for \"{}\" in {}. Using fallback archetype {} ({:?})",
                    category, country, archetype, level
                );
            }
            Ok((archetype.clone(), level))
        }
        None => Err(RenovationError::ArchetypeNotAvailable {
            country: country.into(),
            building_type: category.into(),
        }),
    }
}

/// Necesidades anuales escaladas a la superficie del edificio
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScaledEnergy {
    /// Scaled annual totals [kWh/an]
    pub totals: AnnualTotals,
    /// Floor area used for the intensity [m2]
    pub floor_area: f64,
    /// Energy intensity [kWh/m2.an]
    pub intensity: f64,
    /// Energy performance class
    pub epc_class: EpcClass,
}

impl ScaledEnergy {
    /// Heating + cooling [kWh/an]
    pub fn heating_cooling(&self) -> f64 {
        self.totals.heating + self.totals.cooling
    }

    /// Annual energy cost [EUR/an]
    pub fn cost(&self) -> f64 {
        self.totals.hvac * ENERGY_PRICE
    }
}

/// Escala los totales del arquetipo a la superficie del edificio
///
/// Without a building floor area the archetype area is used (scale factor 1).
pub fn scale_to_building(
    totals: AnnualTotals,
    building_floor_area: Option<f64>,
    archetype_floor_area: f64,
) -> ScaledEnergy {
    let floor_area = building_floor_area.unwrap_or(archetype_floor_area);
    let factor = floor_area / archetype_floor_area;
    let totals = totals.scaled(factor);
    let intensity = totals.hvac / floor_area;
    debug!(
        "Area scale factor {:.3} ({:.1} / {:.1} m2), intensity {:.1} kWh/m2.an",
        factor, floor_area, archetype_floor_area, intensity
    );
    ScaledEnergy {
        totals,
        floor_area,
        intensity,
        epc_class: EpcClass::from_intensity(intensity),
    }
}

/// Limita un índice al intervalo [0, 100]
pub fn clamp_index(value: f64) -> f64 {
    value.max(0.0).min(100.0)
}

fn glazing_comfort(glazing: GlazingTechnology) -> f64 {
    use GlazingTechnology::*;
    match glazing {
        Single => -10.0,
        Double => 0.0,
        DoubleLowE => 5.0,
        Triple => 10.0,
    }
}

fn period_comfort(period: ConstructionPeriod) -> f64 {
    use ConstructionPeriod::*;
    match period {
        Before1945 => -10.0,
        From1945To1969 => -6.0,
        From1970To1989 => -3.0,
        From1990To2005 => 0.0,
        After2005 => 6.0,
    }
}

// (comfort, flexibility)
fn heating_adjustments(heating: HeatingTechnology) -> (f64, f64) {
    use HeatingTechnology::*;
    match heating {
        HeatPump => (5.0, 20.0),
        ElectricResistance => (0.0, 10.0),
        GasBoiler => (0.0, 0.0),
        OilBoiler => (-2.0, -5.0),
        BiomassBoiler => (-2.0, -5.0),
        DistrictHeating => (2.0, -5.0),
    }
}

fn hot_water_flexibility(hot_water: HotWaterTechnology) -> f64 {
    match hot_water {
        HotWaterTechnology::ElectricWaterHeater | HotWaterTechnology::HeatPump => 5.0,
        _ => 0.0,
    }
}

/// Índice de confort del edificio [0, 100]
pub fn comfort_index(building: &BuildingInfo) -> f64 {
    let (heating, _) = heating_adjustments(building.heating);
    clamp_index(
        COMFORT_BASE
            + glazing_comfort(building.glazing)
            + period_comfort(building.construction_period)
            + heating,
    )
}

/// Índice de flexibilidad energética del edificio [0, 100]
pub fn flexibility_index(building: &BuildingInfo) -> f64 {
    let (_, heating) = heating_adjustments(building.heating);
    clamp_index(FLEXIBILITY_BASE + heating + hot_water_flexibility(building.hot_water))
}

/// Estimador del perfil energético a partir de arquetipos
pub struct EnergyProfileEstimator<'a, S: ?Sized> {
    service: &'a S,
    weather: WeatherSource,
}

impl<'a, S: SimulationService + ?Sized> EnergyProfileEstimator<'a, S> {
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

    /// Estima el perfil energético del edificio
    pub fn estimate(&self, building: &BuildingInfo) -> Result<EstimationResult> {
        building.validate()?;
        let country = building.country_code();

        let catalogue = self.service.archetypes()?;
        let (archetype, match_level) = match_archetype(&catalogue, &country, &building.category)?;
        info!("Building matched to archetype {}", archetype);

        let request = SimulationRequest {
            target: SimulationTarget::for_building(building, &archetype),
            u_values: None,
            weather: self.weather,
        };
        let response = self.service.simulate(&request)?;
        let totals = AnnualTotals::from_hourly(&response.hourly)?;
        let archetype_area = archetype_floor_area(response.floor_area);

        let scaled = scale_to_building(totals, building.floor_area, archetype_area);
        let energy_mix = EnergyMix::new(
            scaled.totals.heating,
            scaled.totals.cooling,
            building.heating,
        );

        Ok(EstimationResult {
            epc_class: scaled.epc_class,
            annual_energy_need: scaled.totals.hvac,
            annual_energy_cost: scaled.cost(),
            heating_cooling_need: scaled.heating_cooling(),
            heating_need: scaled.totals.heating,
            cooling_need: scaled.totals.cooling,
            energy_intensity: scaled.intensity,
            energy_mix,
            comfort_index: comfort_index(building),
            flexibility_index: flexibility_index(building),
            archetype: Some(archetype),
            archetype_floor_area: archetype_area,
            match_level: Some(match_level),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CoolingTechnology, HotWaterTechnology};

    fn catalogue() -> Vec<ArchetypeInfo> {
        vec![
            ArchetypeInfo::new("Apartment Block", "ES", "AB_ES_1"),
            ArchetypeInfo::new("Single Family House", "IT", "SFH_IT_1"),
            ArchetypeInfo::new("Apartment Block", "IT", "AB_IT_1"),
            ArchetypeInfo::new("Single Family House", "DE", "SFH_DE_1"),
            ArchetypeInfo::new("Single Family House", "ES", "SFH_ES_1"),
            ArchetypeInfo::new("Single Family House", "ES", "SFH_ES_2"),
        ]
    }

    #[test]
    fn match_country_and_category() {
        let (arch, level) = match_archetype(&catalogue(), "ES", "single family house").unwrap();
        assert_eq!(arch.name, "SFH_ES_1");
        assert_eq!(level, MatchLevel::CountryAndCategory);
    }

    #[test]
    fn match_country_any_category() {
        let (arch, level) = match_archetype(&catalogue(), "DE", "Apartment Block").unwrap();
        assert_eq!(arch.name, "SFH_DE_1");
        assert_eq!(level, MatchLevel::Country);
    }

    #[test]
    fn match_region() {
        // PT has no archetypes: mediterranean region
        let (arch, level) = match_archetype(&catalogue(), "PT", "Apartment Block").unwrap();
        assert_eq!(arch.name, "AB_ES_1");
        assert_eq!(level, MatchLevel::RegionAndCategory);

        let (arch, level) = match_archetype(&catalogue(), "GR", "Terraced House").unwrap();
        assert_eq!(arch.name, "AB_ES_1");
        assert_eq!(level, MatchLevel::Region);

        let (arch, level) = match_archetype(&catalogue(), "AT", "Apartment Block").unwrap();
        assert_eq!(arch.name, "SFH_DE_1");
        assert_eq!(level, MatchLevel::Region);
    }

    #[test]
    fn match_not_available() {
        let err = match_archetype(&catalogue(), "PL", "Single Family House").unwrap_err();
        assert_eq!(
            err,
            RenovationError::ArchetypeNotAvailable {
                country: "PL".into(),
                building_type: "Single Family House".into(),
            }
        );
        // countries without region only match by country
        assert!(match_archetype(&catalogue(), "US", "Single Family House").is_err());
        assert!(match_archetype(&[], "ES", "Single Family House").is_err());
    }

    #[test]
    fn scaling_to_building_area() {
        let totals = AnnualTotals {
            heating: 8000.0,
            cooling: 2000.0,
            hvac: 10000.0,
        };
        let scaled = scale_to_building(totals, Some(120.0), 100.0);
        assert!((scaled.totals.hvac - 12000.0).abs() < 1e-9);
        assert!((scaled.heating_cooling() - 12000.0).abs() < 1e-9);
        assert!((scaled.intensity - 100.0).abs() < 1e-9);
        assert_eq!(scaled.epc_class, EpcClass::C);
        assert!((scaled.cost() - 3000.0).abs() < 1e-9);

        let scaled = scale_to_building(totals, None, 100.0);
        assert_eq!(scaled.totals, totals);
        assert_eq!(scaled.floor_area, 100.0);
    }

    #[test]
    fn indices_are_clamped() {
        let mut building = BuildingInfo {
            country: "ES".into(),
            lat: None,
            lng: None,
            category: "Single Family House".into(),
            construction_period: ConstructionPeriod::After2005,
            floor_area: Some(100.0),
            floors: 1,
            heating: HeatingTechnology::HeatPump,
            cooling: CoolingTechnology::HeatPump,
            hot_water: HotWaterTechnology::HeatPump,
            glazing: GlazingTechnology::Triple,
            custom_envelope: false,
            custom_systems: false,
        };
        assert_eq!(comfort_index(&building), 81.0);
        assert_eq!(flexibility_index(&building), 65.0);

        building.glazing = GlazingTechnology::Single;
        building.construction_period = ConstructionPeriod::Before1945;
        building.heating = HeatingTechnology::OilBoiler;
        building.hot_water = HotWaterTechnology::OilBoiler;
        assert_eq!(comfort_index(&building), 38.0);
        assert_eq!(flexibility_index(&building), 35.0);

        assert_eq!(clamp_index(130.0), 100.0);
        assert_eq!(clamp_index(-4.0), 0.0);
    }
}
