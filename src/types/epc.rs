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

//! Clase de eficiencia energética (EPC)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Clase de eficiencia energética
///
/// Ordinal letter grade, ordered from worst (G) to best (A+).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum EpcClass {
    /// > 450 kWh/m2.an
    G,
    /// <= 450 kWh/m2.an
    F,
    /// <= 330 kWh/m2.an
    E,
    /// <= 230 kWh/m2.an
    D,
    /// <= 150 kWh/m2.an
    C,
    /// <= 90 kWh/m2.an
    B,
    /// <= 50 kWh/m2.an
    A,
    /// <= 30 kWh/m2.an
    #[serde(rename = "A+")]
    #[strum(to_string = "A+")]
    APlus,
}

impl EpcClass {
    /// Upper limits of intensity for each class, from best to worst [kWh/m2.an]
    pub const LIMITS: [(f64, EpcClass); 7] = [
        (30.0, EpcClass::APlus),
        (50.0, EpcClass::A),
        (90.0, EpcClass::B),
        (150.0, EpcClass::C),
        (230.0, EpcClass::D),
        (330.0, EpcClass::E),
        (450.0, EpcClass::F),
    ];

    /// Clase correspondiente a una intensidad energética [kWh/m2.an]
    ///
    /// Limits are inclusive: an intensity equal to a limit gets the better class.
    pub fn from_intensity(intensity: f64) -> Self {
        Self::LIMITS
            .iter()
            .find(|(limit, _)| intensity <= *limit)
            .map(|(_, class)| *class)
            .unwrap_or(EpcClass::G)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn epc_boundaries() {
        assert_eq!(EpcClass::from_intensity(0.0), EpcClass::APlus);
        assert_eq!(EpcClass::from_intensity(30.0), EpcClass::APlus);
        assert_eq!(EpcClass::from_intensity(50.0), EpcClass::A);
        assert_eq!(EpcClass::from_intensity(50.0001), EpcClass::B);
        assert_eq!(EpcClass::from_intensity(100.0), EpcClass::C);
        assert_eq!(EpcClass::from_intensity(450.0), EpcClass::F);
        assert_eq!(EpcClass::from_intensity(450.1), EpcClass::G);
    }

    #[test]
    fn epc_order_and_names() {
        assert!(EpcClass::G < EpcClass::F);
        assert!(EpcClass::A < EpcClass::APlus);
        assert_eq!(EpcClass::APlus.to_string(), "A+");
        assert_eq!(EpcClass::from_str("A+").unwrap(), EpcClass::APlus);
        assert_eq!(EpcClass::from_str("C").unwrap(), EpcClass::C);
        assert_eq!(serde_json::to_string(&EpcClass::APlus).unwrap(), "\"A+\"");
    }
}
