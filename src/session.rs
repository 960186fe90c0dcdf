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
Sesión de planificación
=======================

Holds the user inputs of a renovation plan and the results derived from them. Results are
computed on demand and kept until an input they depend on changes:

- estimation <- building
- scenarios, financial results <- estimation, measures, funding
- financial results <- financial parameters
- ranking <- scenarios, financial results, persona

The session owns the memoized simulation service, so the archetype catalogue is fetched at
most once per session.
*/

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::asplain::PlanReport;
use crate::error::{RenovationError, Result};
use crate::estimator::EnergyProfileEstimator;
use crate::finance::{estimate_investment, evaluate_financials, FinancialParams};
use crate::mcda;
use crate::scenarios::RenovationScenarioEvaluator;
use crate::simulation::{CachedService, SimulationService, WeatherSource};
use crate::types::{
    BuildingInfo, EstimationResult, FinancialResult, FundingOptions, McdaRankingResult,
    RenovationMeasure, RenovationScenario,
};

/// Perfil de usuario por defecto
pub const DEFAULT_PERSONA: &str = "balanced";

/// Sesión de planificación de la rehabilitación de un edificio
#[derive(Debug)]
pub struct PlanningSession<S> {
    service: CachedService<S>,
    weather: WeatherSource,
    params: FinancialParams,
    building: Option<BuildingInfo>,
    measures: Vec<RenovationMeasure>,
    funding: FundingOptions,
    persona: String,
    estimation: Option<EstimationResult>,
    scenarios: Option<Vec<RenovationScenario>>,
    financial_results: Option<BTreeMap<String, FinancialResult>>,
    ranking: Option<Vec<McdaRankingResult>>,
}

impl<S: SimulationService> PlanningSession<S> {
    /// Nueva sesión sobre un servicio de simulación
    pub fn new(service: S) -> Self {
        Self {
            service: CachedService::new(service),
            weather: WeatherSource::default(),
            params: FinancialParams::default(),
            building: None,
            measures: vec![],
            funding: FundingOptions::default(),
            persona: DEFAULT_PERSONA.into(),
            estimation: None,
            scenarios: None,
            financial_results: None,
            ranking: None,
        }
    }

    /// Use another weather source for the simulations
    pub fn with_weather(mut self, weather: WeatherSource) -> Self {
        self.weather = weather;
        self.clear_estimation();
        self
    }

    /// Simulation service of the session
    pub fn service(&self) -> &CachedService<S> {
        &self.service
    }

    // Invalidation, from the most downstream result
    fn clear_ranking(&mut self) {
        self.ranking = None;
    }

    fn clear_financials(&mut self) {
        self.financial_results = None;
        self.clear_ranking();
    }

    fn clear_scenarios(&mut self) {
        self.scenarios = None;
        self.clear_financials();
    }

    fn clear_estimation(&mut self) {
        self.estimation = None;
        self.clear_scenarios();
    }

    /// Fija los datos del edificio
    pub fn set_building(&mut self, building: BuildingInfo) -> Result<()> {
        building.validate()?;
        self.building = Some(building);
        self.clear_estimation();
        Ok(())
    }

    /// Fija las medidas de mejora seleccionadas
    pub fn set_measures(&mut self, measures: &[RenovationMeasure]) {
        self.measures = measures.to_vec();
        self.clear_scenarios();
    }

    /// Fija la financiación de la inversión
    pub fn set_funding(&mut self, funding: FundingOptions) {
        self.funding = funding;
        self.clear_scenarios();
    }

    /// Fija los parámetros de la evaluación económica
    pub fn set_financial_params(&mut self, params: FinancialParams) -> Result<()> {
        params.validate()?;
        self.params = params;
        self.clear_financials();
        Ok(())
    }

    /// Fija el perfil de usuario de la clasificación
    pub fn set_persona(&mut self, persona_id: &str) -> Result<()> {
        mcda::persona(persona_id)?;
        self.persona = persona_id.into();
        self.clear_ranking();
        Ok(())
    }

    /// Building data
    pub fn building(&self) -> Option<&BuildingInfo> {
        self.building.as_ref()
    }

    /// Selected measures
    pub fn measures(&self) -> &[RenovationMeasure] {
        &self.measures
    }

    /// Funding options
    pub fn funding(&self) -> &FundingOptions {
        &self.funding
    }

    /// Financial parameters
    pub fn financial_params(&self) -> &FinancialParams {
        &self.params
    }

    /// Persona identifier
    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// Current estimation, if computed
    pub fn estimation(&self) -> Option<&EstimationResult> {
        self.estimation.as_ref()
    }

    /// Current scenarios, if computed
    pub fn scenarios(&self) -> Option<&[RenovationScenario]> {
        self.scenarios.as_deref()
    }

    /// Current financial results, if computed
    pub fn financial_results(&self) -> Option<&BTreeMap<String, FinancialResult>> {
        self.financial_results.as_ref()
    }

    /// Current ranking, if computed
    pub fn ranking(&self) -> Option<&[McdaRankingResult]> {
        self.ranking.as_deref()
    }

    fn require_building(&self) -> Result<&BuildingInfo> {
        self.building
            .as_ref()
            .ok_or_else(|| RenovationError::Validation("missing building data".into()))
    }

    fn require_estimation(&self) -> Result<&EstimationResult> {
        self.estimation
            .as_ref()
            .ok_or_else(|| RenovationError::Validation("estimation not available".into()))
    }

    /// Estima el perfil energético del edificio
    pub fn run_estimation(&mut self) -> Result<&EstimationResult> {
        if self.estimation.is_none() {
            let building = self.require_building()?;
            let estimation = EnergyProfileEstimator::new(&self.service)
                .with_weather(self.weather)
                .estimate(building)?;
            info!(
                "Estimated energy profile: class {}, {:.0} kWh/an",
                estimation.epc_class, estimation.annual_energy_need
            );
            self.estimation = Some(estimation);
        }
        self.require_estimation()
    }

    /// Evalúa los escenarios de rehabilitación y sus indicadores económicos
    ///
    /// The investment is estimated for the measures applied to the renovated scenario.
    /// Scenarios are kept when only the financial evaluation fails.
    pub fn run_evaluation(&mut self) -> Result<&[RenovationScenario]> {
        self.run_estimation()?;
        if self.scenarios.is_none() {
            let building = self.require_building()?;
            let estimation = self.require_estimation()?;
            let scenarios = RenovationScenarioEvaluator::new(&self.service)
                .with_weather(self.weather)
                .evaluate_scenarios(building, estimation, &self.measures)?;
            self.scenarios = Some(scenarios);
        }
        if self.financial_results.is_none() {
            let building = self.require_building()?;
            let estimation = self.require_estimation()?;
            let scenarios = self.scenarios.as_deref().unwrap_or_default();
            let financial_results = if scenarios.iter().any(|s| !s.is_current()) {
                let applied: Vec<RenovationMeasure> = self
                    .measures
                    .iter()
                    .copied()
                    .filter(|m| m.is_simulated())
                    .collect();
                let capex =
                    estimate_investment(building, estimation.archetype_floor_area, &applied)?;
                debug!("Investment of {:?}: {:.2} EUR", applied, capex);
                evaluate_financials(scenarios, capex, &self.funding, &self.params)?
            } else {
                BTreeMap::new()
            };
            self.financial_results = Some(financial_results);
        }
        self.scenarios
            .as_deref()
            .ok_or_else(|| RenovationError::Validation("scenarios not available".into()))
    }

    /// Clasifica los escenarios de rehabilitación para el perfil de usuario
    pub fn run_ranking(&mut self) -> Result<&[McdaRankingResult]> {
        if self.ranking.is_none() {
            self.run_evaluation()?;
            let scenarios = self.scenarios.as_deref().unwrap_or_default();
            let empty = BTreeMap::new();
            let financial_results = self.financial_results.as_ref().unwrap_or(&empty);
            let ranking = mcda::rank(scenarios, financial_results, &self.persona)?;
            self.ranking = Some(ranking);
        }
        self.ranking
            .as_deref()
            .ok_or_else(|| RenovationError::Validation("ranking not available".into()))
    }

    /// Informe con todos los resultados de la sesión, calculando los que falten
    pub fn report(&mut self) -> Result<PlanReport> {
        let ranking = self.run_ranking()?.to_vec();
        let building = self.require_building()?.clone();
        let estimation = self
            .estimation
            .clone()
            .ok_or_else(|| RenovationError::Validation("estimation not available".into()))?;
        Ok(PlanReport {
            building,
            estimation,
            scenarios: self.scenarios.clone().unwrap_or_default(),
            financial: self.financial_results.clone().unwrap_or_default(),
            persona: self.persona.clone(),
            ranking,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn service() -> RecordedService {
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
                scenarios: vec![EcmScenario {
                    name: "combined".into(),
                    hourly: hourly(2.5e6, 0.75e6),
                    floor_area: Some(100.0),
                }],
            }],
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

    fn session() -> PlanningSession<RecordedService> {
        let mut session = PlanningSession::new(service());
        session.set_building(building()).unwrap();
        session.set_measures(&[RenovationMeasure::WallInsulation]);
        session
    }

    #[test]
    fn session_pipeline() {
        let mut session = session();
        let estimation = session.run_estimation().unwrap();
        assert_eq!(estimation.epc_class, EpcClass::C);
        assert!((estimation.annual_energy_need - 12000.0).abs() < 1e-6);

        let scenarios = session.run_evaluation().unwrap();
        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[1].epc_class, EpcClass::B);
        assert!((scenarios[1].annual_energy_need - 7800.0).abs() < 1e-6);

        let financial = &session.financial_results().unwrap()["renovated"];
        assert!((financial.capex - 9600.0).abs() < 1e-6);
        assert!((financial.annual_savings - 1050.0).abs() < 1e-6);

        let ranking = session.run_ranking().unwrap();
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].scenario_id, "renovated");
        assert_eq!(ranking[0].rank, 1);
        assert_eq!(ranking[0].closeness, 0.5);

        let report = session.report().unwrap();
        assert_eq!(report.scenarios.len(), 2);
        assert_eq!(report.persona, "balanced");
        assert_eq!(report.ranking.len(), 1);
    }

    #[test]
    fn session_without_building() {
        let mut session = PlanningSession::new(service());
        assert!(matches!(
            session.run_estimation(),
            Err(RenovationError::Validation(_))
        ));
        assert!(session.run_ranking().is_err());
    }

    #[test]
    fn session_without_simulated_measures() {
        let mut session = session();
        session.set_measures(&[RenovationMeasure::SolarPv]);
        assert_eq!(session.run_evaluation().unwrap().len(), 1);
        assert!(session.financial_results().unwrap().is_empty());
        assert!(session.run_ranking().unwrap().is_empty());
    }

    #[test]
    fn session_without_floor_area() {
        let mut session = session();
        let mut building = building();
        building.floor_area = None;
        session.set_building(building).unwrap();

        let estimation = session.run_estimation().unwrap();
        assert!((estimation.annual_energy_need - 10000.0).abs() < 1e-6);
        assert_eq!(estimation.epc_class, EpcClass::C);

        let scenarios = session.run_evaluation().unwrap();
        assert!((scenarios[1].annual_energy_need - 6500.0).abs() < 1e-6);
        // wall insulation over the 100 m2 archetype area
        let financial = &session.financial_results().unwrap()["renovated"];
        assert!((financial.capex - 8000.0).abs() < 1e-6);

        let report = session.report().unwrap();
        assert_eq!(report.ranking.len(), 1);
        assert_eq!(report.building.floor_area, None);
    }

    #[test]
    fn session_keeps_scenarios_when_financials_fail() {
        let mut session = session();
        session.set_funding(FundingOptions::Loan {
            percentage: 150.0,
            duration_years: 10,
            interest_rate: 0.03,
        });
        assert!(matches!(
            session.run_evaluation(),
            Err(RenovationError::Validation(_))
        ));
        assert_eq!(session.scenarios().map(|s| s.len()), Some(2));
        assert!(session.financial_results().is_none());

        session
            .set_financial_params(FinancialParams::default())
            .unwrap();
        assert!(session.run_evaluation().is_err());
        assert!(session.scenarios().is_some());
    }

    #[test]
    fn session_invalidation() {
        let mut session = session();
        session.run_ranking().unwrap();

        session.set_persona("eco_champion").unwrap();
        assert!(session.ranking().is_none());
        assert!(session.financial_results().is_some());
        assert!(session.scenarios().is_some());

        session.run_ranking().unwrap();
        session.set_financial_params(FinancialParams {
            discount_rate: 0.06,
            ..FinancialParams::default()
        })
        .unwrap();
        assert!(session.ranking().is_none());
        assert!(session.financial_results().is_none());
        assert!(session.scenarios().is_some());

        session.run_ranking().unwrap();
        session.set_funding(FundingOptions::Loan {
            percentage: 80.0,
            duration_years: 10,
            interest_rate: 0.03,
        });
        assert!(session.scenarios().is_none());
        assert!(session.financial_results().is_none());
        assert!(session.estimation().is_some());

        session.run_ranking().unwrap();
        session.set_measures(&[RenovationMeasure::RoofInsulation]);
        assert!(session.scenarios().is_none());
        assert!(session.estimation().is_some());

        session.run_ranking().unwrap();
        session.set_building(building()).unwrap();
        assert!(session.estimation().is_none());
        assert!(session.scenarios().is_none());
        assert!(session.ranking().is_none());
    }

    #[test]
    fn session_financial_params_only_recompute_financials() {
        let mut session = session();
        session.run_evaluation().unwrap();
        let before = session.financial_results().unwrap()["renovated"];
        session
            .set_financial_params(FinancialParams {
                discount_rate: 0.0,
                ..FinancialParams::default()
            })
            .unwrap();
        session.run_evaluation().unwrap();
        let after = session.financial_results().unwrap()["renovated"];
        assert!(after.npv > before.npv);
        assert_eq!(after.capex, before.capex);
    }

    #[test]
    fn session_rejects_bad_inputs() {
        let mut session = session();
        assert!(session.set_persona("nobody").is_err());
        assert_eq!(session.persona(), DEFAULT_PERSONA);
        let mut bad = building();
        bad.floors = 0;
        assert!(session.set_building(bad).is_err());
        assert_eq!(session.building(), Some(&building()));
    }
}
