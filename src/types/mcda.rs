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

//! Perfiles de usuario y resultados del análisis multicriterio

use serde::{Deserialize, Serialize};

use crate::error::{RenovationError, Result};

/// Pesos de los criterios de decisión
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CriteriaWeights {
    /// Financial performance
    pub financial: f64,
    /// Energy efficiency
    pub energy_efficiency: f64,
    /// User comfort
    pub user_comfort: f64,
    /// Sustainability (emissions)
    pub sustainability: f64,
    /// Renewable energy integration
    pub renewable_integration: f64,
}

impl CriteriaWeights {
    /// Number of criteria
    pub const LEN: usize = 5;
    /// Accepted deviation of the sum of weights from 1.0
    pub const SUM_TOLERANCE: f64 = 0.01;

    /// Constructor, in criteria order
    pub const fn new(
        financial: f64,
        energy_efficiency: f64,
        user_comfort: f64,
        sustainability: f64,
        renewable_integration: f64,
    ) -> Self {
        Self {
            financial,
            energy_efficiency,
            user_comfort,
            sustainability,
            renewable_integration,
        }
    }

    /// Weights in criteria order
    pub fn to_vec(self) -> Vec<f64> {
        vec![
            self.financial,
            self.energy_efficiency,
            self.user_comfort,
            self.sustainability,
            self.renewable_integration,
        ]
    }

    /// Sum of weights
    pub fn sum(self) -> f64 {
        self.to_vec().iter().sum()
    }

    /// Comprueba que los pesos son no negativos y suman 1.0 (± 0.01)
    pub fn validate(self) -> Result<()> {
        let weights = self.to_vec();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(RenovationError::Validation(format!(
                "criteria weights must be finite and not negative ({:?})",
                weights
            )));
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(RenovationError::Validation(format!(
                "criteria weights must sum 1.0 (got {:.3})",
                sum
            )));
        }
        Ok(())
    }
}

/// Perfil de prioridades de usuario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McdaPersona {
    /// Identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Criteria weights
    pub weights: CriteriaWeights,
}

/// Posición de un escenario en la clasificación
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McdaRankingResult {
    /// Scenario identifier
    pub scenario_id: String,
    /// Rank, 1 is best
    pub rank: usize,
    /// Relative closeness to the ideal solution [0, 1], 2 decimals
    pub closeness: f64,
}
