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
Análisis multicriterio (TOPSIS)
===============================

Ranks renovation alternatives with the Technique for Order of Preference by Similarity to
Ideal Solution (TOPSIS), weighting five criteria with the priorities of a user persona:

- financial performance
- energy efficiency
- user comfort
- sustainability
- renewable energy integration

All criteria are extracted so that higher values are better.
*/

use std::cmp::Ordering;
use std::collections::BTreeMap;

use itertools::Itertools;
use tracing::debug;

use crate::error::{check_finite, RenovationError, Result};
use crate::types::{
    CriteriaWeights, FinancialResult, McdaPersona, McdaRankingResult, RenovationScenario,
};
use crate::vecops::{matcol, vecdist, veckmul, vecnormalize, vecvecmax, vecvecmin};

/// Horizonte de referencia del criterio económico para el periodo de retorno [años]
pub const PAYBACK_HORIZON: f64 = 50.0;
/// Factor de emisión de la electricidad [kg_CO2e/kWh]
pub const CO2_ELECTRICITY: f64 = 0.23;
/// Factor de emisión de otros combustibles [kg_CO2e/kWh]
pub const CO2_OTHER_FUEL: f64 = 0.27;

// id, name, weights (financial, efficiency, comfort, sustainability, renewables)
const PERSONAS: [(&str, &str, CriteriaWeights); 5] = [
    (
        "cost_conscious",
        "Cost-conscious owner",
        CriteriaWeights::new(0.50, 0.20, 0.10, 0.10, 0.10),
    ),
    (
        "eco_champion",
        "Environmental champion",
        CriteriaWeights::new(0.10, 0.25, 0.10, 0.35, 0.20),
    ),
    (
        "comfort_seeker",
        "Comfort seeker",
        CriteriaWeights::new(0.15, 0.20, 0.45, 0.10, 0.10),
    ),
    (
        "balanced",
        "Balanced decision maker",
        CriteriaWeights::new(0.20, 0.20, 0.20, 0.20, 0.20),
    ),
    (
        "tech_enthusiast",
        "Technology enthusiast",
        CriteriaWeights::new(0.15, 0.20, 0.10, 0.15, 0.40),
    ),
];

/// Perfiles de usuario disponibles
pub fn personas() -> Vec<McdaPersona> {
    PERSONAS
        .iter()
        .map(|(id, name, weights)| McdaPersona {
            id: (*id).into(),
            name: (*name).into(),
            weights: *weights,
        })
        .collect()
}

/// Perfil de usuario a partir de su identificador
pub fn persona(id: &str) -> Result<McdaPersona> {
    personas()
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| RenovationError::Validation(format!("unknown persona \"{}\"", id)))
}

fn emissions(scenario: &RenovationScenario) -> f64 {
    let mix = scenario.energy_mix.overall;
    mix.electricity * CO2_ELECTRICITY + mix.other_fuel * CO2_OTHER_FUEL
}

// 1 - value / reference, 0.0 for a zero reference
fn relative_reduction(value: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        0.0
    } else {
        1.0 - value / reference
    }
}

/// Criterio económico compuesto
///
/// 0.5 * NPV / capex + 0.3 * IRR + 0.2 * (1 - min(discounted payback, 50) / 50)
pub fn financial_score(result: &FinancialResult) -> f64 {
    let profitability = if result.capex > 0.0 {
        result.npv / result.capex
    } else {
        0.0
    };
    let payback = 1.0 - result.discounted_payback.min(PAYBACK_HORIZON) / PAYBACK_HORIZON;
    0.5 * profitability + 0.3 * result.irr + 0.2 * payback
}

/// Matriz de decisión (una fila por alternativa, una columna por criterio)
///
/// Energy need and emissions are compared to the baseline scenario. Without a baseline,
/// the largest value among the alternatives is used as reference.
pub fn criteria_matrix(
    alternatives: &[&RenovationScenario],
    baseline: Option<&RenovationScenario>,
    financial_results: &BTreeMap<String, FinancialResult>,
) -> Result<Vec<Vec<f64>>> {
    let max_of = |f: fn(&RenovationScenario) -> f64| {
        alternatives.iter().map(|s| f(s)).fold(0.0, f64::max)
    };
    let need_reference = baseline
        .map(|b| b.annual_energy_need)
        .unwrap_or_else(|| max_of(|s| s.annual_energy_need));
    let emissions_reference = baseline
        .map(emissions)
        .unwrap_or_else(|| max_of(emissions));

    alternatives
        .iter()
        .map(|scenario| {
            let financial = financial_results.get(&scenario.id).ok_or_else(|| {
                RenovationError::Validation(format!(
                    "missing financial result for scenario \"{}\"",
                    scenario.id
                ))
            })?;
            let row = vec![
                financial_score(financial),
                relative_reduction(scenario.annual_energy_need, need_reference),
                scenario.comfort_index,
                relative_reduction(emissions(scenario), emissions_reference),
                0.6 * scenario.energy_mix.overall.electricity_share()
                    + 0.4 * scenario.flexibility_index / 100.0,
            ];
            Ok(row)
        })
        .collect()
}

/// Proximidad relativa a la solución ideal de cada alternativa (TOPSIS)
///
/// The matrix has one row per alternative and one column per weight. Columns are vector
/// normalized (a zero column stays zero) and weighted. The closeness is
/// d- / (d+ + d-), or 0.5 when both distances are zero.
pub fn topsis(matrix: &[Vec<f64>], weights: &[f64]) -> Result<Vec<f64>> {
    if let Some(row) = matrix.iter().find(|row| row.len() != weights.len()) {
        return Err(RenovationError::Validation(format!(
            "decision matrix rows must have {} criteria (got {})",
            weights.len(),
            row.len()
        )));
    }
    for value in matrix.iter().flatten().chain(weights.iter()) {
        check_finite(&[("criteria value", *value)])?;
    }
    if matrix.is_empty() {
        return Ok(vec![]);
    }

    // weighted normalized columns
    let columns: Vec<Vec<f64>> = weights
        .iter()
        .enumerate()
        .map(|(jj, w)| veckmul(&vecnormalize(&matcol(matrix, jj)), *w))
        .collect();
    let weighted: Vec<Vec<f64>> = (0..matrix.len()).map(|ii| matcol(&columns, ii)).collect();

    let ideal = weighted[1..]
        .iter()
        .fold(weighted[0].clone(), |acc, row| vecvecmax(&acc, row));
    let negative_ideal = weighted[1..]
        .iter()
        .fold(weighted[0].clone(), |acc, row| vecvecmin(&acc, row));

    Ok(weighted
        .iter()
        .map(|row| {
            let to_ideal = vecdist(row, &ideal);
            let to_negative = vecdist(row, &negative_ideal);
            if to_ideal + to_negative == 0.0 {
                0.5
            } else {
                to_negative / (to_ideal + to_negative)
            }
        })
        .collect())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Clasificación de escenarios con unos pesos de criterios
///
/// The "current" scenario is not ranked. Ranks follow the unrounded closeness, ties keep
/// the input order.
pub fn rank_with_weights(
    scenarios: &[RenovationScenario],
    financial_results: &BTreeMap<String, FinancialResult>,
    weights: &CriteriaWeights,
) -> Result<Vec<McdaRankingResult>> {
    weights.validate()?;
    let baseline = scenarios.iter().find(|s| s.is_current());
    let alternatives: Vec<&RenovationScenario> =
        scenarios.iter().filter(|s| !s.is_current()).collect();
    if alternatives.is_empty() {
        return Ok(vec![]);
    }

    let matrix = criteria_matrix(&alternatives, baseline, financial_results)?;
    let scores = topsis(&matrix, &weights.to_vec())?;
    debug!("TOPSIS closeness: {:?}", scores);

    Ok((0..alternatives.len())
        .sorted_by(|a, b| scores[*b].partial_cmp(&scores[*a]).unwrap_or(Ordering::Equal))
        .enumerate()
        .map(|(pos, idx)| McdaRankingResult {
            scenario_id: alternatives[idx].id.clone(),
            rank: pos + 1,
            closeness: round2(scores[idx]),
        })
        .collect())
}

/// Clasificación de escenarios para un perfil de usuario
pub fn rank(
    scenarios: &[RenovationScenario],
    financial_results: &BTreeMap<String, FinancialResult>,
    persona_id: &str,
) -> Result<Vec<McdaRankingResult>> {
    let persona = persona(persona_id)?;
    rank_with_weights(scenarios, financial_results, &persona.weights)
}
