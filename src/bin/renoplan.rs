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

#[macro_use]
extern crate clap;

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::process::exit;
use std::str::FromStr;

use clap::{App, AppSettings, Arg};
use failure::Error;
use failure::ResultExt;
use tracing::{debug, Level};
use tracing_subscriber::{prelude::*, EnvFilter};

use renoplan::finance::FINANCIAL_PARAMS_DEFAULT;
use renoplan::*;

// Funciones auxiliares -----------------------------------------------------------------------

fn readfile(path: &Path) -> Result<String, Error> {
    let mut f = File::open(path).context(format!("Archivo {} no encontrado", path.display()))?;
    let mut contents = String::new();
    f.read_to_string(&mut contents)
        .context("Error al leer el archivo")?;
    Ok(contents)
}

fn writefile(path: &Path, content: &[u8]) {
    let result = File::create(&path).and_then(|mut file| file.write_all(content));
    if let Err(err) = result {
        eprintln!(
            "ERROR: no se ha podido escribir en \"{}\": {}",
            path.display(),
            err
        );
        exit(exitcode::IOERR);
    }
}

/// Registro de eventos en stderr. RUST_LOG permite afinar el nivel indicado con -v
fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());
    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("AVISO: no se ha podido configurar el registro de eventos: {}", err);
    }
}

/// Código de salida para un error de la librería
fn exit_code(error: &RenovationError) -> i32 {
    match error {
        RenovationError::Validation(_) => exitcode::DATAERR,
        RenovationError::ArchetypeNotAvailable { .. }
        | RenovationError::ApiConnection(_)
        | RenovationError::ApiResponse(_) => exitcode::UNAVAILABLE,
    }
}

fn fail(msg: &str, error: &RenovationError) -> ! {
    eprintln!("ERROR: {} ({})", msg, error);
    exit(exit_code(error));
}

/// Carga un archivo JSON de entrada o termina con el código de error adecuado
fn load_file(path: &Path, descr: &str) -> String {
    match readfile(path) {
        Ok(content) => {
            println!("{}: \"{}\"", descr, path.display());
            content
        }
        Err(err) => {
            eprintln!(
                "ERROR: No se ha podido leer el archivo \"{}\" -> {}",
                path.display(),
                err.as_fail()
            );
            exit(exitcode::IOERR);
        }
    }
}

fn get_building(path: &Path) -> BuildingInfo {
    let content = load_file(path, "Edificio");
    serde_json::from_str(&content).unwrap_or_else(|err| {
        eprintln!(
            "ERROR: Formato incorrecto del archivo del edificio \"{}\" ({})",
            path.display(),
            err
        );
        exit(exitcode::DATAERR);
    })
}

fn get_service(path: &Path) -> RecordedService {
    let content = load_file(path, "Simulaciones");
    content
        .parse::<RecordedService>()
        .unwrap_or_else(|err| fail("Formato incorrecto del archivo de simulaciones", &err))
}

fn get_measures(values: Option<clap::Values<'_>>) -> Vec<RenovationMeasure> {
    values
        .map(|values| {
            values
                .flat_map(|v| v.split(','))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| {
                    RenovationMeasure::from_str(v).unwrap_or_else(|_| {
                        eprintln!("ERROR: Medida de mejora desconocida \"{}\"", v);
                        exit(exitcode::DATAERR);
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn get_funding(values: Option<clap::Values<'_>>) -> FundingOptions {
    let values: Vec<&str> = match values {
        Some(values) => values.collect(),
        None => return FundingOptions::SelfFunded,
    };
    let number = |v: &str| {
        f64::from_str(v.trim()).unwrap_or_else(|_| {
            eprintln!("ERROR: Valor no numérico en los datos del préstamo \"{}\"", v);
            exit(exitcode::DATAERR);
        })
    };
    let years = u32::from_str(values[1].trim()).unwrap_or_else(|_| {
        eprintln!(
            "ERROR: La duración del préstamo debe ser un número entero de años \"{}\"",
            values[1]
        );
        exit(exitcode::DATAERR);
    });
    FundingOptions::Loan {
        percentage: number(values[0]),
        duration_years: years,
        interest_rate: number(values[2]),
    }
}

fn get_financial_params(matches: &clap::ArgMatches<'_>) -> FinancialParams {
    let discount_rate = if matches.is_present("discount") {
        Some(value_t!(matches, "discount", f64).unwrap_or_else(|_| {
            eprintln!("ERROR: La tasa de descuento indicada no es un valor numérico válido");
            exit(exitcode::DATAERR);
        }))
    } else {
        None
    };
    let analysis_years = if matches.is_present("years") {
        Some(value_t!(matches, "years", u32).unwrap_or_else(|_| {
            eprintln!("ERROR: El periodo de análisis debe ser un número entero de años");
            exit(exitcode::DATAERR);
        }))
    } else {
        None
    };
    let user = UserFinancialParams {
        discount_rate,
        analysis_years,
        carrier_prices: None,
    };
    FinancialParams::from_user(user, &FINANCIAL_PARAMS_DEFAULT)
        .unwrap_or_else(|err| fail("Parámetros económicos incorrectos", &err))
}

// Función principal ------------------------------------------------------------------------------

fn main() {
    let personas = mcda::personas();
    let persona_ids: Vec<&str> = personas.iter().map(|p| p.id.as_str()).collect();

    let matches = App::new("RenoPlan")
        .bin_name("renoplan")
        .version(env!("CARGO_PKG_VERSION"))
        .author("
Copyright (c) 2018-2022 Ministerio de Fomento,
                        Instituto de CC. de la Construcción Eduardo Torroja (IETcc-CSIC)

Autores: Rafael Villar Burke <pachi@ietcc.csic.es>

Licencia: Publicado bajo licencia MIT.

")
        .about("RenoPlan - Rehabilitación energética de edificios residenciales.")
        .setting(AppSettings::NextLineHelp)
        .arg(Arg::with_name("building")
            .short("b")
            .long("building")
            .value_name("ARCHIVO_EDIFICIO")
            .required(true)
            .help("Archivo JSON con la descripción del edificio")
            .takes_value(true)
            .display_order(1))
        .arg(Arg::with_name("simulations")
            .short("s")
            .long("simulations")
            .value_name("ARCHIVO_SIMULACIONES")
            .required(true)
            .help("Archivo JSON con el catálogo de arquetipos y las simulaciones grabadas")
            .takes_value(true)
            .display_order(2))
        .arg(Arg::with_name("measures")
            .short("m")
            .long("measures")
            .value_name("MEDIDAS")
            .help("Medidas de mejora, separadas por comas.\nP.e.: -m wall_insulation,roof_insulation")
            .takes_value(true)
            .multiple(true)
            .display_order(3))
        .arg(Arg::with_name("loan")
            .long("loan")
            .value_names(&["PORCENTAJE", "AÑOS", "INTERES"])
            .help("Financiación con préstamo (porcentaje financiado, duración, tipo de interés).\nP.e.: --loan 80 10 0.03")
            .takes_value(true)
            .number_of_values(3)
            .display_order(4))
        .arg(Arg::with_name("persona")
            .short("p")
            .long("persona")
            .value_name("PERFIL")
            .default_value(session::DEFAULT_PERSONA)
            .possible_values(&persona_ids)
            .help("Perfil de usuario para la clasificación de escenarios")
            .takes_value(true)
            .display_order(5))
        .arg(Arg::with_name("discount")
            .short("r")
            .long("discount")
            .value_name("TASA")
            .help("Tasa de descuento (fracción)")
            .takes_value(true)
            .display_order(6))
        .arg(Arg::with_name("years")
            .short("n")
            .long("years")
            .value_name("AÑOS")
            .help("Periodo de análisis [años]")
            .takes_value(true)
            .display_order(7))
        .arg(Arg::with_name("archivo_salida_json")
            .long("json")
            .value_name("ARCHIVO_SALIDA_JSON")
            .help("Archivo de salida de resultados detallados en formato JSON")
            .takes_value(true))
        .arg(Arg::with_name("v")
            .short("v")
            .multiple(true)
            .help("Sets the level of verbosity"))
        .get_matches();

    // Prólogo ------------------------------------------------------------------------------------

    let verbosity = matches.occurrences_of("v");
    init_logging(verbosity);
    debug!("Opciones indicadas: {:#?}", matches);

    println!("** Datos de entrada");

    let building = get_building(Path::new(matches.value_of_os("building").unwrap_or_default()));
    let service = get_service(Path::new(
        matches.value_of_os("simulations").unwrap_or_default(),
    ));
    let measures = get_measures(matches.values_of("measures"));
    let funding = get_funding(matches.values_of("loan"));
    let params = get_financial_params(&matches);
    let persona = matches.value_of("persona").unwrap_or(session::DEFAULT_PERSONA);

    if !measures.is_empty() {
        println!(
            "Medidas: {}",
            measures.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        );
    }
    if let FundingOptions::Loan {
        percentage,
        duration_years,
        interest_rate,
    } = funding
    {
        println!(
            "Préstamo: {:.1} %, {} años, interés {:.3}",
            percentage, duration_years, interest_rate
        );
    }
    println!(
        "Tasa de descuento: {:.3}, periodo de análisis: {} años",
        params.discount_rate, params.analysis_years
    );

    // Cálculo ------------------------------------------------------------------------------------

    let mut session = PlanningSession::new(service);
    if let Err(err) = session.set_building(building) {
        fail("Datos del edificio incorrectos", &err);
    }
    session.set_measures(&measures);
    session.set_funding(funding);
    if let Err(err) = session.set_financial_params(params) {
        fail("Parámetros económicos incorrectos", &err);
    }
    if let Err(err) = session.set_persona(persona) {
        fail("Perfil de usuario incorrecto", &err);
    }

    let report = session
        .report()
        .unwrap_or_else(|err| fail("No se ha podido completar el análisis", &err));

    // Salida de resultados ------------------------------------------------------------------------

    if let Some(path) = matches.value_of_os("archivo_salida_json") {
        let path = Path::new(path);
        if verbosity > 0 {
            println!("Resultados en formato JSON: {:?}", path.display());
        }
        let json = serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            eprintln!(
                "ERROR: No se han podido convertir los resultados al formato JSON ({})",
                error
            );
            exit(exitcode::DATAERR);
        });
        writefile(path, json.as_bytes());
    }

    println!();
    println!("{}", report.to_plain());
}
