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
RenoPlan
========

This crate provides a library and binary that **supports decisions on the energy renovation of
residential buildings**.

From a short description of a building (country, category, construction period, floor area and
technical systems) it:

- estimates the energy profile of the building using the hourly simulation of a reference
  building (archetype) of the same country and category, scaled to the building floor area
- evaluates a renovation scenario, built from the selected energy conservation measures,
  against the current state of the building
- computes the financial indicators of the renovation (NPV, IRR, ROI, simple and discounted
  payback), including loan funding
- ranks the renovation scenarios with a multi-criteria analysis (TOPSIS), using the priorities
  of a user persona

The building simulations are provided by remote services, abstracted by the
[`SimulationService`](simulation::SimulationService) trait. The crate includes a service that
answers from a JSON recording of the remote services
([`RecordedService`](recorded::RecordedService)).

Este *crate* proporciona una biblioteca y un programa para **la toma de decisiones sobre la
rehabilitación energética de edificios residenciales**: estimación del perfil energético a
partir de arquetipos, evaluación de escenarios de rehabilitación, indicadores económicos y
clasificación multicriterio de las alternativas (TOPSIS).

# Ejemplo

```rust
use std::fs::read_to_string;
use renoplan::*;

// Servicio de simulación grabado
let service = read_to_string("test_data/simulations.json")
    .unwrap()
    .parse::<RecordedService>()
    .unwrap();

// Datos del edificio
let building: BuildingInfo =
    serde_json::from_str(&read_to_string("test_data/building.json").unwrap()).unwrap();

// Sesión de planificación
let mut session = PlanningSession::new(service);
session.set_building(building).unwrap();
session.set_measures(&[RenovationMeasure::WallInsulation]);
session.set_persona("cost_conscious").unwrap();

// Estimación, escenarios, indicadores económicos y clasificación
let report = session.report().unwrap();
assert_eq!(report.estimation.epc_class, EpcClass::C);

// Visualización compacta
println!("{}", report.to_plain());
```

*/

#![deny(missing_docs)]

mod vecops;

pub mod asplain;
pub mod error;
pub mod estimator;
pub mod finance;
pub mod mcda;
pub mod recorded;
pub mod scenarios;
pub mod session;
pub mod simulation;
pub mod types;

pub use asplain::{AsPlain, PlanReport};
pub use error::RenovationError;
pub use estimator::EnergyProfileEstimator;
pub use finance::{FinancialParams, UserFinancialParams};
pub use recorded::RecordedService;
pub use scenarios::RenovationScenarioEvaluator;
pub use session::PlanningSession;
pub use simulation::{CachedService, SimulationService};
pub use types::*;

/// Número de versión de la librería
///
/// Version number
pub static VERSION: &str = env!("CARGO_PKG_VERSION");
