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

//! Arquetipos de referencia y regiones climáticas

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Edificio de referencia usado para la simulación
///
/// The (category, country, name) triple identifies a reference building in the
/// simulation catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArchetypeInfo {
    /// Building category of the archetype
    pub category: String,
    /// Country code of the archetype
    pub country: String,
    /// Archetype name in the catalogue
    pub name: String,
}

impl ArchetypeInfo {
    /// Constructor
    pub fn new(category: &str, country: &str, name: &str) -> Self {
        Self {
            category: category.into(),
            country: country.into(),
            name: name.into(),
        }
    }

    /// Same country code (case insensitive)
    pub fn is_in_country(&self, country: &str) -> bool {
        self.country.trim().eq_ignore_ascii_case(country.trim())
    }

    /// Same building category (case insensitive, surrounding blanks ignored)
    pub fn is_category(&self, category: &str) -> bool {
        self.category.trim().to_lowercase() == category.trim().to_lowercase()
    }

    /// Climate region of the archetype country
    pub fn region(&self) -> Option<ClimateRegion> {
        ClimateRegion::from_country(&self.country)
    }
}

impl fmt::Display for ArchetypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.category, self.country)
    }
}

/// Agrupación de países por región climática
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
pub enum ClimateRegion {
    /// Southern Europe
    #[strum(to_string = "mediterranean")]
    Mediterranean,
    /// Western and central Europe
    #[strum(to_string = "central")]
    Central,
    /// Nordic countries
    #[strum(to_string = "northern")]
    Northern,
    /// Eastern Europe and Baltic countries
    #[strum(to_string = "eastern")]
    Eastern,
}

impl ClimateRegion {
    const MEDITERRANEAN: [&'static str; 7] = ["ES", "PT", "IT", "GR", "CY", "MT", "HR"];
    const CENTRAL: [&'static str; 11] = [
        "FR", "DE", "AT", "BE", "NL", "LU", "CH", "CZ", "SI", "IE", "GB",
    ];
    const NORTHERN: [&'static str; 5] = ["SE", "FI", "DK", "NO", "IS"];
    const EASTERN: [&'static str; 8] = ["PL", "HU", "RO", "BG", "SK", "LT", "LV", "EE"];

    /// Región climática de un país. None si el país no pertenece a ninguna región
    pub fn from_country(country: &str) -> Option<Self> {
        let code = country.trim().to_uppercase();
        let code = code.as_str();
        if Self::MEDITERRANEAN.contains(&code) {
            Some(ClimateRegion::Mediterranean)
        } else if Self::CENTRAL.contains(&code) {
            Some(ClimateRegion::Central)
        } else if Self::NORTHERN.contains(&code) {
            Some(ClimateRegion::Northern)
        } else if Self::EASTERN.contains(&code) {
            Some(ClimateRegion::Eastern)
        } else {
            None
        }
    }
}

/// Regla de selección que produjo el arquetipo
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchLevel {
    /// Same country and building category
    CountryAndCategory,
    /// Same country, other category
    Country,
    /// Same climate region and building category
    RegionAndCategory,
    /// Same climate region, other category
    Region,
}

impl MatchLevel {
    /// True for fallback matches (anything but an exact country and category match)
    pub fn is_fallback(self) -> bool {
        self != MatchLevel::CountryAndCategory
    }
}
