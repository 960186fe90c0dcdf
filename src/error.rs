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

//! Errores de la librería
//!
//! Library errors

use std::fmt;

/// Errores en la estimación, evaluación y clasificación de escenarios
///
/// Errors raised by the estimation, evaluation and ranking stages.
#[derive(Debug, Clone, PartialEq)]
pub enum RenovationError {
    /// No archetype available for the country / building category combination
    ArchetypeNotAvailable {
        /// Country code of the building
        country: String,
        /// Building category of the building
        building_type: String,
    },
    /// Transport failure reaching a simulation collaborator
    ApiConnection(String),
    /// Collaborator response that cannot be used (missing or malformed hourly data)
    ApiResponse(String),
    /// Malformed input data
    Validation(String),
}

impl fmt::Display for RenovationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use RenovationError::*;
        match self {
            ArchetypeNotAvailable {
                country,
                building_type,
            } => write!(
                f,
                "No archetype available for country \"{}\" and building type \"{}\"",
                country, building_type
            ),
            ApiConnection(desc) => write!(f, "Could not reach simulation service: {}", desc),
            ApiResponse(desc) => write!(f, "Invalid simulation service response: {}", desc),
            Validation(desc) => write!(f, "Invalid input: {}", desc),
        }
    }
}

impl std::error::Error for RenovationError {}

/// Resultado de las operaciones de la librería
pub type Result<T> = std::result::Result<T, RenovationError>;

/// Comprueba que los valores numéricos de entrada son finitos
///
/// Returns a validation error naming the first non finite value.
pub(crate) fn check_finite(values: &[(&str, f64)]) -> Result<()> {
    match values.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, v)) => Err(RenovationError::Validation(format!(
            "{} must be a finite number (got {})",
            name, v
        ))),
        None => Ok(()),
    }
}
