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

//! Salida en formato de texto simple

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::finance::PAYBACK_NEVER;
use crate::types::*;

// ==================== Conversión a formato simple

/// Muestra en formato simple
///
/// Esta función usa un formato simple y compacto para representar los resultados del
/// análisis de rehabilitación
pub trait AsPlain {
    /// Get in plain format
    fn to_plain(&self) -> String;
}

/// Informe completo de un plan de rehabilitación
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    /// Building data
    pub building: BuildingInfo,
    /// Energy profile of the current building
    pub estimation: EstimationResult,
    /// Evaluated scenarios, "current" first
    pub scenarios: Vec<RenovationScenario>,
    /// Financial results by scenario id
    pub financial: BTreeMap<String, FinancialResult>,
    /// Persona used for the ranking
    pub persona: String,
    /// Ranking of the renovation scenarios
    pub ranking: Vec<McdaRankingResult>,
}

// ================= Implementaciones ====================

/// Muestra un periodo de retorno, o un guion si la inversión no se recupera
fn years_or_dash(v: f64) -> String {
    if v >= PAYBACK_NEVER {
        "-".to_string()
    } else {
        format!("{:.1}", v)
    }
}

fn mix2string(mix: &CarrierSplit) -> String {
    format!(
        "electricidad {:.1}, otros {:.1} ({:.0} % eléctrico)",
        mix.electricity,
        mix.other_fuel,
        mix.electricity_share() * 100.0
    )
}

impl AsPlain for EstimationResult {
    fn to_plain(&self) -> String {
        let archetype = match (&self.archetype, self.match_level) {
            (Some(archetype), Some(level)) => format!("{} [{:?}]", archetype, level),
            (Some(archetype), None) => archetype.to_string(),
            _ => "-".to_string(),
        };
        let epc_class = self.epc_class;
        let intensity = self.energy_intensity;
        let need = self.annual_energy_need;
        let heating = self.heating_need;
        let cooling = self.cooling_need;
        let cost = self.annual_energy_cost;
        let comfort = self.comfort_index;
        let flexibility = self.flexibility_index;
        let mix = mix2string(&self.energy_mix.overall);

        format!(
            "** Perfil energético

Arquetipo: {archetype}
Clase energética: {epc_class}
Intensidad energética: {intensity:.1} [kWh/m2.an]
Necesidades de energía: {need:.1} [kWh/an]

- calefacción: {heating:.1}
- refrigeración: {cooling:.1}

Vectores [kWh/an]: {mix}
Coste energético: {cost:.2} [EUR/an]
Índice de confort: {comfort:.0}
Índice de flexibilidad: {flexibility:.0}
"
        )
    }
}

impl AsPlain for RenovationScenario {
    fn to_plain(&self) -> String {
        let measures = if self.measures.is_empty() {
            "-".to_string()
        } else {
            self.measures.iter().join(", ")
        };
        format!(
            "- {} ({}): clase {}, {:.1} kWh/m2.an, {:.1} kWh/an, {:.2} EUR/an, confort {:.0}, medidas: {}",
            self.label,
            self.id,
            self.epc_class,
            self.energy_intensity,
            self.annual_energy_need,
            self.annual_energy_cost,
            self.comfort_index,
            measures
        )
    }
}

impl AsPlain for FinancialResult {
    fn to_plain(&self) -> String {
        let loan = if self.loan_amount > 0.0 {
            format!(
                "\nPréstamo: {:.2} [EUR], cuota anual {:.2} [EUR/an]",
                self.loan_amount, self.loan_annual_payment
            )
        } else {
            String::new()
        };
        format!(
            "Inversión: {:.2} [EUR]
Ahorro anual: {:.2} [EUR/an]
VAN: {:.2} [EUR]
TIR: {:.2} [%]
ROI: {:.2} [%]
Retorno simple: {} [años]
Retorno descontado: {} [años]{}",
            self.capex,
            self.annual_savings,
            self.npv,
            self.irr * 100.0,
            self.roi * 100.0,
            years_or_dash(self.simple_payback),
            years_or_dash(self.discounted_payback),
            loan
        )
    }
}

impl AsPlain for PlanReport {
    fn to_plain(&self) -> String {
        let estimation = self.estimation.to_plain();
        let scenarios = self.scenarios.iter().map(AsPlain::to_plain).join("\n");
        let financial = if self.financial.is_empty() {
            "Sin escenarios de rehabilitación".to_string()
        } else {
            self.financial
                .iter()
                .map(|(id, result)| format!("* {}\n\n{}", id, result.to_plain()))
                .join("\n\n")
        };
        let persona = &self.persona;
        let ranking = if self.ranking.is_empty() {
            "-".to_string()
        } else {
            self.ranking
                .iter()
                .map(|r| format!("{}. {} ({:.2})", r.rank, r.scenario_id, r.closeness))
                .join("\n")
        };

        format!(
            "{estimation}
** Escenarios

{scenarios}

** Indicadores económicos

{financial}

** Clasificación (perfil {persona})

{ranking}
"
        )
    }
}
