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

//! Financiación y resultados económicos

use serde::{Deserialize, Serialize};

/// Modo de financiación de la inversión
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "financing_type", rename_all = "snake_case")]
pub enum FundingOptions {
    /// Paid with own funds
    SelfFunded,
    /// Partially or fully financed with a loan
    Loan {
        /// Share of the cost financed [0, 100]
        percentage: f64,
        /// Loan duration [years], at least 1
        duration_years: u32,
        /// Annual interest rate, as a fraction [0, 1]
        interest_rate: f64,
    },
}

impl Default for FundingOptions {
    fn default() -> Self {
        FundingOptions::SelfFunded
    }
}

/// Coste efectivo de la inversión y parte financiada
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FundingBreakdown {
    /// Investment cost used in the appraisal [EUR]
    pub effective_cost: f64,
    /// Amount covered by a loan [EUR]
    pub loan_amount: f64,
}

/// Indicadores económicos de un escenario
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialResult {
    /// Net present value [EUR]
    pub npv: f64,
    /// Internal rate of return (fraction, not negative)
    pub irr: f64,
    /// Return on investment (fraction)
    pub roi: f64,
    /// Simple payback period [years]
    pub simple_payback: f64,
    /// Discounted payback period [years]
    pub discounted_payback: f64,
    /// Capital expenditure [EUR]
    pub capex: f64,
    /// Loan amount [EUR]
    pub loan_amount: f64,
    /// Annual energy cost savings [EUR/an]
    pub annual_savings: f64,
    /// Annual loan instalment [EUR/an]
    pub loan_annual_payment: f64,
}
