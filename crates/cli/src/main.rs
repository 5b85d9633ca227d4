// planta CLI - judicial roster pairing from the terminal

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use planta_core::{Error, Result, TipoActo};
use planta_engine::{
    actos, avance, carga, consolidado, emparejar, encuesta, FilasRegistro, Filtro, Filtros,
    SolicitudEnlaceActo,
};
use planta_store::Store;

const EXIT_ERROR: u8 = 1;
const EXIT_VALIDATION: u8 = 2;
const EXIT_NOT_FOUND: u8 = 3;
const EXIT_CONFLICT: u8 = 4;

#[derive(Parser)]
#[command(name = "planta")]
#[command(about = "Pairing of the UDAE roster against the CSJ and DEAJ registries")]
#[command(version)]
struct Cli {
    /// Database file
    #[arg(long, global = true, default_value = "planta.db", env = "PLANTA_DB")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database file and its schema
    Init,

    /// Load a registry extract or reference list from CSV
    #[command(after_help = "\
Examples:
  planta cargar udae planta_udae.csv
  planta cargar csj extracto_csj.csv
  planta cargar actos acuerdos.csv")]
    Cargar {
        /// Which dataset the file holds
        #[arg(value_enum)]
        conjunto: Conjunto,

        /// CSV file with a header row of exported field names
        archivo: PathBuf,
    },

    /// List and confirm pairing candidates
    Emparejar {
        #[command(subcommand)]
        comando: ComandoEmparejar,
    },

    /// Manage administrative acts and the act linkage
    Acto {
        #[command(subcommand)]
        comando: ComandoActo,
    },

    /// Export the consolidated report
    Consolidado {
        /// Output format
        #[arg(long, short = 't', value_enum, default_value_t = Formato::Csv)]
        formato: Formato,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        salida: Option<PathBuf>,
    },

    /// Show the progress card
    Avance {
        /// Also list offices with pending surveys
        #[arg(long)]
        despachos: bool,
    },

    /// Show the survey form data for a position
    Encuesta {
        /// UDAE row id
        udae_id: String,
    },
}

#[derive(Subcommand)]
enum ComandoEmparejar {
    /// List unlinked rows on both sides, with optional filters
    #[command(after_help = "\
Examples:
  planta emparejar listar --registro csj
  planta emparejar listar --registro csj --filtro-udae municipioSedeFisica=Tunja
  planta emparejar listar --registro deaj --filtro claseNombramiento=provisionalidad")]
    Listar {
        #[arg(long, value_enum)]
        registro: RegistroArg,

        /// UDAE-side filter, column=value. Repeatable.
        #[arg(long = "filtro-udae", value_name = "COLUMNA=VALOR")]
        filtros_udae: Vec<String>,

        /// Registry-side filter, column=value. Repeatable.
        #[arg(long = "filtro", value_name = "COLUMNA=VALOR")]
        filtros_registro: Vec<String>,
    },

    /// Confirm a pair; fails if either row is already linked
    Confirmar {
        #[arg(long, value_enum)]
        registro: RegistroArg,

        /// UDAE row id
        udae_id: String,

        /// Registry row id
        registro_id: String,

        /// Operator recorded on the link
        #[arg(long)]
        operador: String,
    },
}

#[derive(Subcommand)]
enum ComandoActo {
    /// Register an administrative act
    Crear {
        #[arg(long, value_enum)]
        tipo: TipoActoArg,
        #[arg(long)]
        anio: String,
        #[arg(long)]
        numero: String,
        #[arg(long, default_value = "")]
        url: String,
    },

    /// List registered acts
    Listar,

    /// Link a position to an act, with citation detail
    Enlazar {
        /// UDAE row id
        udae_id: String,
        /// Act id
        acto_id: String,
        #[arg(long)]
        articulo: String,
        #[arg(long, default_value = "")]
        literal: String,
        #[arg(long, default_value = "")]
        numeral: String,
        #[arg(long = "perfil-cargo", default_value = "")]
        perfil_cargo: String,
        /// Operator recorded on the linkage
        #[arg(long)]
        operador: String,
    },

    /// Propose an act matching the position's own citation
    Sugerir {
        /// UDAE row id
        udae_id: String,
    },

    /// Remove an act linkage (idempotent)
    Quitar {
        /// Linkage id
        enlace_id: String,
    },

    /// Delete an act; blocked while linkages reference it
    Eliminar {
        /// Act id
        acto_id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Conjunto {
    Udae,
    Csj,
    Deaj,
    Actos,
    Despachos,
}

#[derive(Clone, Copy, ValueEnum)]
enum RegistroArg {
    Csj,
    Deaj,
}

impl From<RegistroArg> for emparejar::Registro {
    fn from(arg: RegistroArg) -> Self {
        match arg {
            RegistroArg::Csj => Self::Csj,
            RegistroArg::Deaj => Self::Deaj,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TipoActoArg {
    Acuerdo,
    Decreto,
    Ley,
}

impl From<TipoActoArg> for TipoActo {
    fn from(arg: TipoActoArg) -> Self {
        match arg {
            TipoActoArg::Acuerdo => Self::Acuerdo,
            TipoActoArg::Decreto => Self::Decreto,
            TipoActoArg::Ley => Self::Ley,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Formato {
    Csv,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match ejecutar(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(codigo_de_salida(&err))
        }
    }
}

fn codigo_de_salida(err: &Error) -> u8 {
    match err {
        Error::Validation(_) => EXIT_VALIDATION,
        Error::NotFound { .. } => EXIT_NOT_FOUND,
        Error::AlreadyLinked(_) | Error::ReferentialConflict(_) => EXIT_CONFLICT,
        Error::Storage(_) => EXIT_ERROR,
    }
}

fn ejecutar(cli: Cli) -> Result<()> {
    let mut store = Store::abrir(&cli.db)?;
    match cli.command {
        Commands::Init => {
            println!("database ready at {}", cli.db.display());
            Ok(())
        }
        Commands::Cargar { conjunto, archivo } => cargar(&mut store, conjunto, &archivo),
        Commands::Emparejar { comando } => match comando {
            ComandoEmparejar::Listar { registro, filtros_udae, filtros_registro } => {
                let filtros = Filtros {
                    udae: parsear_filtros(&filtros_udae)?,
                    registro: parsear_filtros(&filtros_registro)?,
                };
                listar_candidatos(&store, registro.into(), &filtros)
            }
            ComandoEmparejar::Confirmar { registro, udae_id, registro_id, operador } => {
                emparejar::confirmar(&mut store, registro.into(), &udae_id, &registro_id, &operador)?;
                println!("linked {udae_id} <-> {registro_id}");
                Ok(())
            }
        },
        Commands::Acto { comando } => ejecutar_acto(&mut store, comando),
        Commands::Consolidado { formato, salida } => exportar_consolidado(&store, formato, salida),
        Commands::Avance { despachos } => {
            let datos = avance::calcular(&store)?;
            imprimir_json(&datos)?;
            if despachos {
                imprimir_json(&avance::despachos_incompletos(&store)?)?;
            }
            Ok(())
        }
        Commands::Encuesta { udae_id } => {
            let form = encuesta::formulario(&store, &udae_id)?;
            imprimir_json(&serde_json::json!({
                "udae": form.udae,
                "encuesta": form.encuesta,
                "despachos": form.despachos,
                "actos": form.actos,
            }))
        }
    }
}

fn cargar(store: &mut Store, conjunto: Conjunto, archivo: &Path) -> Result<()> {
    let origen = File::open(archivo).map_err(Error::storage)?;
    let total = match conjunto {
        Conjunto::Udae => {
            let filas = carga::leer_udae(origen)?;
            store.cargar_udae(&filas)?;
            filas.len()
        }
        Conjunto::Csj => {
            let filas = carga::leer_csj(origen)?;
            store.cargar_csj(&filas)?;
            filas.len()
        }
        Conjunto::Deaj => {
            let filas = carga::leer_deaj(origen)?;
            store.cargar_deaj(&filas)?;
            filas.len()
        }
        Conjunto::Actos => {
            let actos = carga::leer_actos(origen)?;
            for acto in &actos {
                store.guardar_acto(acto)?;
            }
            actos.len()
        }
        Conjunto::Despachos => {
            let filas = carga::leer_despachos(origen)?;
            store.cargar_despachos(&filas)?;
            filas.len()
        }
    };
    println!("loaded {total} rows from {}", archivo.display());
    Ok(())
}

fn listar_candidatos(
    store: &Store,
    registro: emparejar::Registro,
    filtros: &Filtros,
) -> Result<()> {
    let listado = emparejar::candidatos(store, registro, filtros)?;
    let filas = match &listado.filas {
        FilasRegistro::Csj(filas) => serde_json::to_value(filas),
        FilasRegistro::Deaj(filas) => serde_json::to_value(filas),
    }
    .map_err(Error::storage)?;
    imprimir_json(&serde_json::json!({
        "columnasUdae": listado.columnas_udae,
        "datosUdae": listado.datos_udae,
        "columnasRegistro": listado.columnas_registro,
        "filas": filas,
    }))
}

fn ejecutar_acto(store: &mut Store, comando: ComandoActo) -> Result<()> {
    match comando {
        ComandoActo::Crear { tipo, anio, numero, url } => {
            let acto = actos::guardar_acto(store, None, tipo.into(), &anio, &numero, &url)?;
            println!("created act {} ({} {} de {})", acto.id, acto.tipo, acto.numero, acto.anio);
            Ok(())
        }
        ComandoActo::Listar => imprimir_json(&store.listar_actos()?),
        ComandoActo::Enlazar { udae_id, acto_id, articulo, literal, numeral, perfil_cargo, operador } => {
            let solicitud = SolicitudEnlaceActo {
                datos_udae_id: udae_id,
                acto_administrativo_id: acto_id,
                articulo,
                literal,
                numeral,
                perfil_cargo,
            };
            let enlace = actos::guardar_enlace(store, &solicitud, &operador)?;
            let veredicto = if enlace.acto_correcto { "matches" } else { "does not match" };
            println!("linked, the act {veredicto} the roster citation");
            Ok(())
        }
        ComandoActo::Sugerir { udae_id } => match actos::sugerir_acto(store, &udae_id)? {
            Some(acto) => imprimir_json(&acto),
            None => {
                println!("no act matches the roster citation");
                Ok(())
            }
        },
        ComandoActo::Quitar { enlace_id } => {
            actos::quitar_enlace(store, &enlace_id)?;
            println!("linkage removed");
            Ok(())
        }
        ComandoActo::Eliminar { acto_id } => {
            actos::quitar_acto(store, &acto_id)?;
            println!("act deleted");
            Ok(())
        }
    }
}

fn exportar_consolidado(store: &Store, formato: Formato, salida: Option<PathBuf>) -> Result<()> {
    let reporte = consolidado::generar(store)?;
    match (formato, salida) {
        (Formato::Csv, Some(ruta)) => {
            reporte.escribir_csv(File::create(&ruta).map_err(Error::storage)?)?;
            eprintln!("wrote {} rows to {}", reporte.registros.len(), ruta.display());
            Ok(())
        }
        (Formato::Csv, None) => reporte.escribir_csv(io::stdout().lock()),
        (Formato::Json, Some(ruta)) => {
            let archivo = File::create(&ruta).map_err(Error::storage)?;
            serde_json::to_writer_pretty(archivo, &reporte).map_err(Error::storage)?;
            eprintln!("wrote {} rows to {}", reporte.registros.len(), ruta.display());
            Ok(())
        }
        (Formato::Json, None) => imprimir_json(&reporte),
    }
}

fn parsear_filtros(crudos: &[String]) -> Result<Vec<Filtro>> {
    crudos.iter().map(|c| parsear_filtro(c)).collect()
}

fn parsear_filtro(crudo: &str) -> Result<Filtro> {
    match crudo.split_once('=') {
        Some((columna, valor)) if !columna.trim().is_empty() => {
            Ok(Filtro::nuevo(columna.trim(), valor.trim()))
        }
        _ => Err(Error::Validation(format!("filter {crudo:?} must be COLUMNA=VALOR"))),
    }
}

fn imprimir_json<T: serde::Serialize>(valor: &T) -> Result<()> {
    let texto = serde_json::to_string_pretty(valor).map_err(Error::storage)?;
    println!("{texto}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filtro_valido_se_parsea() {
        let filtro = parsear_filtro("municipioSedeFisica=Tunja").unwrap();
        assert_eq!(filtro.columna, "municipioSedeFisica");
        assert_eq!(filtro.valor, "Tunja");

        // Values may contain '='.
        let filtro = parsear_filtro("observaciones=a=b").unwrap();
        assert_eq!(filtro.valor, "a=b");
    }

    #[test]
    fn filtro_sin_igual_se_rechaza() {
        assert!(matches!(parsear_filtro("municipio"), Err(Error::Validation(_))));
        assert!(matches!(parsear_filtro("=x"), Err(Error::Validation(_))));
    }

    #[test]
    fn la_linea_de_comandos_se_verifica() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
