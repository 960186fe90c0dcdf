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

//! Datos del edificio

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::{RenovationError, Result};

/// Periodo de construcción del edificio
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum ConstructionPeriod {
    /// Built before 1945
    #[serde(rename = "before_1945")]
    #[strum(to_string = "before_1945")]
    Before1945,
    /// 1945 - 1969
    #[serde(rename = "1945_1969")]
    #[strum(to_string = "1945_1969")]
    From1945To1969,
    /// 1970 - 1989
    #[serde(rename = "1970_1989")]
    #[strum(to_string = "1970_1989")]
    From1970To1989,
    /// 1990 - 2005
    #[serde(rename = "1990_2005")]
    #[strum(to_string = "1990_2005")]
    From1990To2005,
    /// Built after 2005
    #[serde(rename = "after_2005")]
    #[strum(to_string = "after_2005")]
    After2005,
}

/// Sistema de calefacción
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
pub enum HeatingTechnology {
    /// Electric heat pump
    #[strum(to_string = "heat_pump")]
    HeatPump,
    /// Electric resistance heaters
    #[strum(to_string = "electric_resistance")]
    ElectricResistance,
    /// Natural gas boiler
    #[strum(to_string = "gas_boiler")]
    GasBoiler,
    /// Oil boiler
    #[strum(to_string = "oil_boiler")]
    OilBoiler,
    /// Biomass boiler
    #[strum(to_string = "biomass_boiler")]
    BiomassBoiler,
    /// District heating network
    #[strum(to_string = "district_heating")]
    DistrictHeating,
}

impl HeatingTechnology {
    /// Fracción de la demanda de calefacción cubierta con electricidad
    ///
    /// Share of the heating load supplied by electricity. The remainder is supplied by
    /// the technology's own fuel (gas, oil, biomass, district heat).
    pub fn electricity_share(self) -> f64 {
        use HeatingTechnology::*;
        match self {
            HeatPump | ElectricResistance => 1.0,
            GasBoiler | OilBoiler => 0.1,
            BiomassBoiler | DistrictHeating => 0.3,
        }
    }

    /// True for technologies fully supplied by electricity
    pub fn is_electric(self) -> bool {
        self.electricity_share() >= 1.0
    }
}

/// Sistema de refrigeración
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
pub enum CoolingTechnology {
    /// No cooling system
    #[strum(to_string = "none")]
    None,
    /// Split air conditioner
    #[strum(to_string = "split_air_conditioner")]
    SplitAirConditioner,
    /// Reversible heat pump
    #[strum(to_string = "heat_pump")]
    HeatPump,
    /// Central chiller
    #[strum(to_string = "central_chiller")]
    CentralChiller,
}

/// Sistema de agua caliente sanitaria
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
pub enum HotWaterTechnology {
    /// Electric water heater with storage tank
    #[strum(to_string = "electric_water_heater")]
    ElectricWaterHeater,
    /// Heat pump water heater
    #[strum(to_string = "heat_pump")]
    HeatPump,
    /// Gas boiler
    #[strum(to_string = "gas_boiler")]
    GasBoiler,
    /// Oil boiler
    #[strum(to_string = "oil_boiler")]
    OilBoiler,
    /// Biomass boiler
    #[strum(to_string = "biomass_boiler")]
    BiomassBoiler,
    /// Solar thermal collectors with backup
    #[strum(to_string = "solar_thermal")]
    SolarThermal,
    /// District heating network
    #[strum(to_string = "district_heating")]
    DistrictHeating,
}

/// Tipo de acristalamiento
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
pub enum GlazingTechnology {
    /// Single glazing
    #[strum(to_string = "single")]
    Single,
    /// Double glazing
    #[strum(to_string = "double")]
    Double,
    /// Double glazing with low emissivity coating
    #[strum(to_string = "double_low_e")]
    DoubleLowE,
    /// Triple glazing
    #[strum(to_string = "triple")]
    Triple,
}

/// Descripción del edificio introducida por el usuario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingInfo {
    /// Country code (ISO 3166 alpha-2)
    pub country: String,
    /// Latitude [deg]
    #[serde(default)]
    pub lat: Option<f64>,
    /// Longitude [deg]
    #[serde(default)]
    pub lng: Option<f64>,
    /// Building category, e.g. "Single Family House"
    pub category: String,
    /// Construction period
    pub construction_period: ConstructionPeriod,
    /// Conditioned floor area [m2]
    #[serde(default)]
    pub floor_area: Option<f64>,
    /// Number of floors above ground
    pub floors: u32,
    /// Heating system
    pub heating: HeatingTechnology,
    /// Cooling system
    pub cooling: CoolingTechnology,
    /// Domestic hot water system
    pub hot_water: HotWaterTechnology,
    /// Glazing of the windows
    pub glazing: GlazingTechnology,
    /// The user modified the envelope defaults of the archetype
    #[serde(default)]
    pub custom_envelope: bool,
    /// The user modified the system defaults of the archetype
    #[serde(default)]
    pub custom_systems: bool,
}

impl BuildingInfo {
    /// Comprueba la coherencia de los datos del edificio
    pub fn validate(&self) -> Result<()> {
        if let Some(area) = self.floor_area {
            if !area.is_finite() || area <= 0.0 {
                return Err(RenovationError::Validation(format!(
                    "floor area must be strictly positive (got {})",
                    area
                )));
            }
        }
        if self.floors == 0 {
            return Err(RenovationError::Validation(
                "number of floors must be at least 1".into(),
            ));
        }
        if self.country.trim().is_empty() {
            return Err(RenovationError::Validation("missing country code".into()));
        }
        Ok(())
    }

    /// Código de país normalizado (mayúsculas, sin espacios)
    pub fn country_code(&self) -> String {
        self.country.trim().to_uppercase()
    }

    /// True when the user overrode archetype defaults
    pub fn is_customized(&self) -> bool {
        self.custom_envelope || self.custom_systems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn sample_building() -> BuildingInfo {
        BuildingInfo {
            country: "es".into(),
            lat: Some(40.4),
            lng: Some(-3.7),
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
    fn building_validate() {
        let building = sample_building();
        assert!(building.validate().is_ok());
        assert_eq!(building.country_code(), "ES");

        let mut bad = building.clone();
        bad.floor_area = Some(0.0);
        assert!(bad.validate().is_err());

        let mut bad = building.clone();
        bad.floor_area = Some(std::f64::INFINITY);
        assert!(bad.validate().is_err());

        let mut bad = building;
        bad.floors = 0;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn building_enum_names() {
        assert_eq!(HeatingTechnology::HeatPump.to_string(), "heat_pump");
        assert_eq!(
            GlazingTechnology::from_str("double_low_e").unwrap(),
            GlazingTechnology::DoubleLowE
        );
        assert_eq!(
            ConstructionPeriod::from_str("1945_1969").unwrap(),
            ConstructionPeriod::From1945To1969
        );
        assert!(CoolingTechnology::from_str("absorption").is_err());
    }

    #[test]
    fn building_from_json() {
        let building: BuildingInfo = serde_json::from_str(
            r#"{
                "country": "IT",
                "category": "Multi family House",
                "construction_period": "before_1945",
                "floor_area": 85.5,
                "floors": 4,
                "heating": "district_heating",
                "cooling": "none",
                "hot_water": "solar_thermal",
                "glazing": "single"
            }"#,
        )
        .unwrap();
        assert_eq!(building.floor_area, Some(85.5));
        assert_eq!(building.lat, None);
        assert_eq!(building.heating, HeatingTechnology::DistrictHeating);
        assert!(!building.is_customized());
    }
}
