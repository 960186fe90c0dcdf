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
Indicadores económicos
======================

Financial appraisal of a renovation investment with constant annual savings:

- net present value (NPV) and internal rate of return (IRR)
- simple and discounted payback periods
- return on investment (ROI)
- funding breakdown (own funds / loan) and loan instalments

All calculators reject non finite inputs before computing anything.
*/

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::{check_finite, RenovationError, Result};
use crate::types::{
    BuildingInfo, FinancialResult, FundingBreakdown, FundingOptions, MeasureCost,
    RenovationMeasure, RenovationScenario,
};

/// Periodo de retorno que representa una inversión que no se recupera [años]
pub const PAYBACK_NEVER: f64 = 999.0;
/// Horizonte máximo para el cálculo del periodo de retorno descontado [años]
pub const DISCOUNTED_PAYBACK_MAX_YEARS: u32 = 50;
/// Valor inicial de la TIR para el método de Newton-Raphson
pub const IRR_GUESS: f64 = 0.1;
/// Tolerancia del cálculo de la TIR
pub const IRR_TOLERANCE: f64 = 1e-4;
/// Número máximo de iteraciones del cálculo de la TIR
pub const IRR_MAX_ITERATIONS: usize = 100;

/// Parámetros de la evaluación económica
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialParams {
    /// Discount rate (fraction)
    pub discount_rate: f64,
    /// Appraisal period [years]
    pub analysis_years: u32,
    /// Energy prices by carrier (electricity, other fuel) [EUR/kWh].
    /// When missing, the annual energy cost of the scenarios is used.
    pub carrier_prices: Option<Vec<f64>>,
}

/// Parámetros definidos por el usuario. Los valores ausentes toman el valor por defecto
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserFinancialParams {
    /// Discount rate (fraction)
    pub discount_rate: Option<f64>,
    /// Appraisal period [years]
    pub analysis_years: Option<u32>,
    /// Energy prices by carrier (electricity, other fuel) [EUR/kWh]
    pub carrier_prices: Option<Vec<f64>>,
}

/// Valores por defecto de los parámetros económicos
pub const FINANCIAL_PARAMS_DEFAULT: FinancialParams = FinancialParams {
    discount_rate: 0.04,
    analysis_years: 25,
    carrier_prices: None,
};

impl Default for FinancialParams {
    fn default() -> Self {
        FINANCIAL_PARAMS_DEFAULT
    }
}

impl FinancialParams {
    /// Parámetros de usuario completados con valores por defecto
    pub fn from_user(user: UserFinancialParams, defaults: &FinancialParams) -> Result<Self> {
        let params = FinancialParams {
            discount_rate: user.discount_rate.unwrap_or(defaults.discount_rate),
            analysis_years: user.analysis_years.unwrap_or(defaults.analysis_years),
            carrier_prices: user.carrier_prices.or_else(|| defaults.carrier_prices.clone()),
        };
        params.validate()?;
        Ok(params)
    }

    /// Comprueba la validez de los parámetros
    pub fn validate(&self) -> Result<()> {
        check_finite(&[("discount rate", self.discount_rate)])?;
        if self.discount_rate <= -1.0 {
            return Err(RenovationError::Validation(format!(
                "discount rate must be greater than -1 (got {})",
                self.discount_rate
            )));
        }
        if self.analysis_years == 0 {
            return Err(RenovationError::Validation(
                "appraisal period must be at least 1 year".into(),
            ));
        }
        if let Some(prices) = &self.carrier_prices {
            if prices.len() != 2 {
                return Err(RenovationError::Validation(format!(
                    "expected 2 carrier prices (electricity, other fuel), got {}",
                    prices.len()
                )));
            }
        }
        Ok(())
    }
}

/// Valor actual neto (VAN)
///
/// NPV = -I + sum_{t=1..years} A / (1 + r)^t
pub fn npv(
    initial_investment: f64,
    annual_cash_flow: f64,
    discount_rate: f64,
    years: u32,
) -> Result<f64> {
    check_finite(&[
        ("initial investment", initial_investment),
        ("annual cash flow", annual_cash_flow),
        ("discount rate", discount_rate),
    ])?;
    Ok(npv_unchecked(initial_investment, annual_cash_flow, discount_rate, years))
}

fn npv_unchecked(initial_investment: f64, annual_cash_flow: f64, rate: f64, years: u32) -> f64 {
    (1..=years).fold(-initial_investment, |acc, t| {
        acc + annual_cash_flow / (1.0 + rate).powi(t as i32)
    })
}

// d(NPV)/dr = sum_{t=1..years} -t A / (1 + r)^(t + 1)
fn npv_derivative(annual_cash_flow: f64, rate: f64, years: u32) -> f64 {
    (1..=years).fold(0.0, |acc, t| {
        acc - t as f64 * annual_cash_flow / (1.0 + rate).powi(t as i32 + 1)
    })
}

/// Tasa interna de retorno (TIR)
///
/// Newton-Raphson from IRR_GUESS. Iteration stops when the derivative or the step are
/// smaller than IRR_TOLERANCE or after IRR_MAX_ITERATIONS. A step beyond r = -1 is
/// shortened to half the distance to -1. Negative rates are reported as 0.0, and so are
/// investments without cost or without positive cash flows.
pub fn irr(initial_investment: f64, annual_cash_flow: f64, years: u32) -> Result<f64> {
    check_finite(&[
        ("initial investment", initial_investment),
        ("annual cash flow", annual_cash_flow),
    ])?;
    if initial_investment <= 0.0 || annual_cash_flow <= 0.0 || years == 0 {
        return Ok(0.0);
    }
    let mut rate = IRR_GUESS;
    for iteration in 0..IRR_MAX_ITERATIONS {
        let value = npv_unchecked(initial_investment, annual_cash_flow, rate, years);
        let derivative = npv_derivative(annual_cash_flow, rate, years);
        if derivative.abs() < IRR_TOLERANCE {
            break;
        }
        let mut next = rate - value / derivative;
        if !next.is_finite() {
            debug!("IRR iteration {} diverged", iteration);
            break;
        }
        if next <= -1.0 {
            next = (rate - 1.0) / 2.0;
        }
        let step = (next - rate).abs();
        rate = next;
        if step < IRR_TOLERANCE {
            break;
        }
    }
    Ok(rate.max(0.0))
}

/// Periodo de retorno simple [años]
///
/// PAYBACK_NEVER when there are no savings.
pub fn simple_payback(investment: f64, annual_savings: f64) -> Result<f64> {
    check_finite(&[("investment", investment), ("annual savings", annual_savings)])?;
    if annual_savings > 0.0 {
        Ok(investment / annual_savings)
    } else {
        Ok(PAYBACK_NEVER)
    }
}

/// Periodo de retorno descontado [años]
///
/// Accumulates the discounted savings year by year and interpolates linearly inside the
/// year where the investment is recovered. PAYBACK_NEVER when it is not recovered within
/// max_years.
pub fn discounted_payback(
    investment: f64,
    annual_savings: f64,
    discount_rate: f64,
    max_years: u32,
) -> Result<f64> {
    check_finite(&[
        ("investment", investment),
        ("annual savings", annual_savings),
        ("discount rate", discount_rate),
    ])?;
    if investment <= 0.0 {
        return Ok(0.0);
    }
    if annual_savings <= 0.0 {
        return Ok(PAYBACK_NEVER);
    }
    let mut cumulative = 0.0;
    for year in 1..=max_years {
        let previous = cumulative;
        cumulative += annual_savings / (1.0 + discount_rate).powi(year as i32);
        if cumulative >= investment {
            let fraction = (investment - previous) / (cumulative - previous);
            return Ok(f64::from(year - 1) + fraction);
        }
    }
    Ok(PAYBACK_NEVER)
}

/// Rentabilidad de la inversión (ROI)
///
/// (total savings - investment) / investment, 0.0 without investment.
pub fn roi(investment: f64, total_savings: f64) -> Result<f64> {
    check_finite(&[("investment", investment), ("total savings", total_savings)])?;
    if investment <= 0.0 {
        Ok(0.0)
    } else {
        Ok((total_savings - investment) / investment)
    }
}

/// Coste efectivo de la inversión e importe financiado
///
/// A loan doesn't reduce the investment cost, it only covers a share of it.
pub fn apply_funding_reduction(
    total_cost: f64,
    funding: &FundingOptions,
) -> Result<FundingBreakdown> {
    check_finite(&[("total cost", total_cost)])?;
    if total_cost < 0.0 {
        return Err(RenovationError::Validation(format!(
            "total cost must not be negative (got {})",
            total_cost
        )));
    }
    match *funding {
        FundingOptions::SelfFunded => Ok(FundingBreakdown {
            effective_cost: total_cost,
            loan_amount: 0.0,
        }),
        FundingOptions::Loan {
            percentage,
            duration_years,
            interest_rate,
        } => {
            validate_loan(percentage, duration_years, interest_rate)?;
            Ok(FundingBreakdown {
                effective_cost: total_cost,
                loan_amount: total_cost * (percentage / 100.0),
            })
        }
    }
}

fn validate_loan(percentage: f64, duration_years: u32, interest_rate: f64) -> Result<()> {
    check_finite(&[
        ("loan percentage", percentage),
        ("loan interest rate", interest_rate),
    ])?;
    if !(0.0..=100.0).contains(&percentage) {
        return Err(RenovationError::Validation(format!(
            "loan percentage must be between 0 and 100 (got {})",
            percentage
        )));
    }
    if duration_years < 1 {
        return Err(RenovationError::Validation(
            "loan duration must be at least 1 year".into(),
        ));
    }
    if !(0.0..=1.0).contains(&interest_rate) {
        return Err(RenovationError::Validation(format!(
            "loan interest rate must be between 0 and 1 (got {})",
            interest_rate
        )));
    }
    Ok(())
}

/// Cuota anual de un préstamo (sistema francés)
///
/// principal * r / (1 - (1 + r)^-years), principal / years for a zero rate.
pub fn loan_annual_payment(principal: f64, interest_rate: f64, years: u32) -> Result<f64> {
    check_finite(&[("principal", principal), ("interest rate", interest_rate)])?;
    if years == 0 {
        return Err(RenovationError::Validation(
            "loan duration must be at least 1 year".into(),
        ));
    }
    if principal <= 0.0 {
        return Ok(0.0);
    }
    if interest_rate == 0.0 {
        return Ok(principal / f64::from(years));
    }
    Ok(principal * interest_rate / (1.0 - (1.0 + interest_rate).powi(-(years as i32))))
}

/// Coste de la energía por vectores energéticos [EUR]
///
/// Energy and prices are given in the same carrier order and must have the same length.
pub fn energy_cost_by_carrier(energy: &[f64], prices: &[f64]) -> Result<f64> {
    if energy.is_empty() || energy.len() != prices.len() {
        return Err(RenovationError::Validation(format!(
            "energy mix and energy prices must have the same, non zero, length ({} != {})",
            energy.len(),
            prices.len()
        )));
    }
    if let Some(v) = energy
        .iter()
        .chain(prices.iter())
        .find(|v| !v.is_finite() || **v < 0.0)
    {
        return Err(RenovationError::Validation(format!(
            "energy quantities and prices must be finite and not negative (got {})",
            v
        )));
    }
    Ok(energy.iter().zip(prices.iter()).map(|(e, p)| e * p).sum())
}

/// Estimación del coste de inversión de un conjunto de medidas [EUR]
///
/// Without a building floor area the reference area (the archetype area of the estimation)
/// is used, as in the energy estimate.
pub fn estimate_investment(
    building: &BuildingInfo,
    reference_floor_area: f64,
    measures: &[RenovationMeasure],
) -> Result<f64> {
    building.validate()?;
    let floor_area = building.floor_area.unwrap_or(reference_floor_area);
    if !floor_area.is_finite() || floor_area <= 0.0 {
        return Err(RenovationError::Validation(format!(
            "floor area must be strictly positive to estimate the investment (got {})",
            floor_area
        )));
    }
    let footprint = floor_area / f64::from(building.floors);
    Ok(measures
        .iter()
        .map(|m| match m.unit_cost() {
            MeasureCost::PerFloorArea(cost) => cost * floor_area,
            MeasureCost::PerFootprint(cost) => cost * footprint,
            MeasureCost::Fixed(cost) => cost,
        })
        .sum())
}

/// Indicadores económicos de una inversión con ahorros anuales constantes
pub fn financial_result(
    capex: f64,
    annual_savings: f64,
    funding: &FundingOptions,
    params: &FinancialParams,
) -> Result<FinancialResult> {
    params.validate()?;
    let breakdown = apply_funding_reduction(capex, funding)?;
    let investment = breakdown.effective_cost;
    let years = params.analysis_years;
    let rate = params.discount_rate;

    let loan_annual_payment = match *funding {
        FundingOptions::Loan {
            duration_years,
            interest_rate,
            ..
        } => loan_annual_payment(breakdown.loan_amount, interest_rate, duration_years)?,
        FundingOptions::SelfFunded => 0.0,
    };

    Ok(FinancialResult {
        npv: npv(investment, annual_savings, rate, years)?,
        irr: irr(investment, annual_savings, years)?,
        roi: roi(investment, annual_savings * f64::from(years))?,
        simple_payback: simple_payback(investment, annual_savings)?,
        discounted_payback: discounted_payback(
            investment,
            annual_savings,
            rate,
            DISCOUNTED_PAYBACK_MAX_YEARS,
        )?,
        capex: investment,
        loan_amount: breakdown.loan_amount,
        annual_savings,
        loan_annual_payment,
    })
}

fn scenario_cost(scenario: &RenovationScenario, params: &FinancialParams) -> Result<f64> {
    match &params.carrier_prices {
        Some(prices) => energy_cost_by_carrier(&scenario.energy_mix.overall.to_vec(), prices),
        None => Ok(scenario.annual_energy_cost),
    }
}

/// Indicadores económicos de los escenarios de rehabilitación
///
/// Savings of each renovated scenario are computed against the "current" scenario.
/// The baseline itself gets no result.
pub fn evaluate_financials(
    scenarios: &[RenovationScenario],
    capex: f64,
    funding: &FundingOptions,
    params: &FinancialParams,
) -> Result<BTreeMap<String, FinancialResult>> {
    let baseline = scenarios.iter().find(|s| s.is_current()).ok_or_else(|| {
        RenovationError::Validation("missing \"current\" scenario for the financial appraisal".into())
    })?;
    let baseline_cost = scenario_cost(baseline, params)?;

    let mut results = BTreeMap::new();
    for scenario in scenarios.iter().filter(|s| !s.is_current()) {
        let annual_savings = baseline_cost - scenario_cost(scenario, params)?;
        if annual_savings <= 0.0 {
            warn!(
                "Scenario \"{}\" doesn't reduce the energy cost ({:.2} EUR/an)",
                scenario.id, annual_savings
            );
        }
        let result = financial_result(capex, annual_savings, funding, params)?;
        debug!(
            "Scenario \"{}\": NPV {:.2}, IRR {:.4}, payback {:.1}",
            scenario.id, result.npv, result.irr, result.simple_payback
        );
        results.insert(scenario.id.clone(), result);
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EPS: f64 = 1e-6;

    #[test]
    fn npv_zero_rate() {
        assert!((npv(10000.0, 1500.0, 0.0, 10).unwrap() - 5000.0).abs() < EPS);
        assert!((npv(10000.0, 1500.0, 0.0, 0).unwrap() + 10000.0).abs() < EPS);
    }

    #[test]
    fn npv_decreasing_in_rate() {
        let mut last = npv(10000.0, 1500.0, 0.001, 20).unwrap();
        for r in &[0.01, 0.03, 0.05, 0.1, 0.2, 0.5] {
            let value = npv(10000.0, 1500.0, *r, 20).unwrap();
            assert!(value < last);
            last = value;
        }
    }

    #[test]
    fn npv_rejects_non_finite() {
        assert!(matches!(
            npv(std::f64::NAN, 1500.0, 0.05, 10),
            Err(RenovationError::Validation(_))
        ));
        assert!(npv(1000.0, std::f64::INFINITY, 0.05, 10).is_err());
    }

    #[test]
    fn irr_fixed_point() {
        for (investment, savings, years) in &[
            (10000.0, 1500.0, 20),
            (30000.0, 2400.0, 25),
            (5000.0, 2000.0, 5),
        ] {
            let rate = irr(*investment, *savings, *years).unwrap();
            assert!(rate > 0.0);
            let value = npv(*investment, *savings, rate, *years).unwrap();
            assert!(value.abs() < IRR_TOLERANCE * investment, "NPV({}) = {}", rate, value);
        }
    }

    #[test]
    fn irr_clamped_to_zero() {
        // savings never recover the investment
        assert_eq!(irr(10000.0, 300.0, 10).unwrap(), 0.0);
        assert_eq!(irr(10000.0, 0.0, 10).unwrap(), 0.0);
        assert_eq!(irr(10000.0, -200.0, 10).unwrap(), 0.0);
    }

    #[test]
    fn payback_periods() {
        assert_eq!(simple_payback(10000.0, 2000.0).unwrap(), 5.0);
        assert_eq!(simple_payback(10000.0, 0.0).unwrap(), PAYBACK_NEVER);
        assert_eq!(simple_payback(10000.0, -10.0).unwrap(), PAYBACK_NEVER);

        // no discount: same as simple payback
        assert!((discounted_payback(10000.0, 2000.0, 0.0, 50).unwrap() - 5.0).abs() < EPS);
        assert!((discounted_payback(10000.0, 3000.0, 0.0, 50).unwrap() - 3.333_333).abs() < 1e-5);
        assert_eq!(discounted_payback(0.0, 3000.0, 0.05, 50).unwrap(), 0.0);
        assert_eq!(
            discounted_payback(10000.0, 300.0, 0.05, 50).unwrap(),
            PAYBACK_NEVER
        );
    }

    #[test]
    fn discounted_payback_not_shorter() {
        for (investment, savings) in &[(10000.0, 2000.0), (30000.0, 1800.0), (1000.0, 999.0)] {
            let simple = simple_payback(*investment, *savings).unwrap();
            for r in &[0.01, 0.04, 0.08] {
                let discounted = discounted_payback(*investment, *savings, *r, 50).unwrap();
                assert!(discounted >= simple);
            }
        }
    }

    #[test]
    fn roi_values() {
        assert!((roi(10000.0, 25000.0).unwrap() - 1.5).abs() < EPS);
        assert_eq!(roi(0.0, 25000.0).unwrap(), 0.0);
        assert!((roi(10000.0, 5000.0).unwrap() + 0.5).abs() < EPS);
    }

    #[test]
    fn funding_breakdown() {
        let loan = FundingOptions::Loan {
            percentage: 80.0,
            duration_years: 10,
            interest_rate: 0.04,
        };
        assert_eq!(
            apply_funding_reduction(30000.0, &loan).unwrap(),
            FundingBreakdown {
                effective_cost: 30000.0,
                loan_amount: 24000.0,
            }
        );
        assert_eq!(
            apply_funding_reduction(30000.0, &FundingOptions::SelfFunded).unwrap(),
            FundingBreakdown {
                effective_cost: 30000.0,
                loan_amount: 0.0,
            }
        );
        let bad = FundingOptions::Loan {
            percentage: 120.0,
            duration_years: 10,
            interest_rate: 0.04,
        };
        assert!(apply_funding_reduction(30000.0, &bad).is_err());
        let bad = FundingOptions::Loan {
            percentage: 50.0,
            duration_years: 0,
            interest_rate: 0.04,
        };
        assert!(apply_funding_reduction(30000.0, &bad).is_err());
        assert!(apply_funding_reduction(-1.0, &FundingOptions::SelfFunded).is_err());
    }

    #[test]
    fn loan_payment() {
        assert!((loan_annual_payment(12000.0, 0.0, 10).unwrap() - 1200.0).abs() < EPS);
        // 10000 at 5% during 10 years
        assert!((loan_annual_payment(10000.0, 0.05, 10).unwrap() - 1295.045_75).abs() < 1e-4);
        assert_eq!(loan_annual_payment(0.0, 0.05, 10).unwrap(), 0.0);
        assert!(loan_annual_payment(1000.0, 0.05, 0).is_err());
    }

    #[test]
    fn carrier_costs() {
        assert!(
            (energy_cost_by_carrier(&[1000.0, 2000.0], &[0.3, 0.1]).unwrap() - 500.0).abs() < EPS
        );
        assert!(energy_cost_by_carrier(&[1000.0, 2000.0], &[0.3]).is_err());
        assert!(energy_cost_by_carrier(&[], &[]).is_err());
        assert!(energy_cost_by_carrier(&[1000.0, std::f64::NAN], &[0.3, 0.1]).is_err());
        assert!(energy_cost_by_carrier(&[1000.0, 10.0], &[0.3, -0.1]).is_err());
    }

    #[test]
    fn user_params_over_defaults() {
        let params = FinancialParams::from_user(
            UserFinancialParams {
                discount_rate: Some(0.06),
                ..Default::default()
            },
            &FINANCIAL_PARAMS_DEFAULT,
        )
        .unwrap();
        assert_eq!(params.discount_rate, 0.06);
        assert_eq!(params.analysis_years, 25);
        assert_eq!(params.carrier_prices, None);

        let bad = UserFinancialParams {
            carrier_prices: Some(vec![0.2]),
            ..Default::default()
        };
        assert!(FinancialParams::from_user(bad, &FINANCIAL_PARAMS_DEFAULT).is_err());
        let bad = UserFinancialParams {
            analysis_years: Some(0),
            ..Default::default()
        };
        assert!(FinancialParams::from_user(bad, &FINANCIAL_PARAMS_DEFAULT).is_err());
    }

    #[test]
    fn investment_estimate() {
        use crate::types::{
            ConstructionPeriod, CoolingTechnology, GlazingTechnology, HeatingTechnology,
            HotWaterTechnology,
        };
        let mut building = BuildingInfo {
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
        };
        let measures = [
            RenovationMeasure::WallInsulation,
            RenovationMeasure::RoofInsulation,
            RenovationMeasure::HeatPump,
        ];
        // 80 * 120 + 60 * 60 + 12000
        let capex = estimate_investment(&building, 100.0, &measures).unwrap();
        assert!((capex - 25200.0).abs() < EPS);

        // reference area without a building area: 80 * 100 + 60 * 50 + 12000
        building.floor_area = None;
        let capex = estimate_investment(&building, 100.0, &measures).unwrap();
        assert!((capex - 23000.0).abs() < EPS);

        assert!(estimate_investment(&building, 0.0, &measures).is_err());
        assert_eq!(estimate_investment(&building, 100.0, &[]).unwrap(), 0.0);
    }

    #[test]
    fn financial_result_with_loan() {
        let loan = FundingOptions::Loan {
            percentage: 50.0,
            duration_years: 10,
            interest_rate: 0.0,
        };
        let params = FinancialParams {
            discount_rate: 0.0,
            analysis_years: 10,
            carrier_prices: None,
        };
        let res = financial_result(20000.0, 2500.0, &loan, &params).unwrap();
        assert_eq!(res.capex, 20000.0);
        assert_eq!(res.loan_amount, 10000.0);
        assert!((res.loan_annual_payment - 1000.0).abs() < EPS);
        assert!((res.npv - 5000.0).abs() < EPS);
        assert!((res.roi - 0.25).abs() < EPS);
        assert!((res.simple_payback - 8.0).abs() < EPS);
        assert!((res.discounted_payback - 8.0).abs() < EPS);
        assert!(res.irr > 0.0);
    }
}
