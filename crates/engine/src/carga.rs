//! CSV ingest for the registry extracts and reference lists.
//!
//! Each reader takes the extract as delivered (header row with the exported
//! camelCase field names), parses classification values at the boundary and
//! assigns row ids when the extract carries none. Unknown columns are
//! ignored; missing columns read as empty.

use std::io::Read;

use chrono::NaiveDate;
use csv::StringRecord;

use planta_core::{
    ActoAdministrativo, ClaseNombramiento, DatosCsj, DatosDeaj, DatosUdae, Despacho, Error,
    EstadoCsj, Result, TipoActo,
};
use planta_store::nuevo_id;

fn campo(cabecera: &StringRecord, fila: &StringRecord, nombre: &str) -> String {
    cabecera
        .iter()
        .position(|h| h == nombre)
        .and_then(|i| fila.get(i))
        .unwrap_or("")
        .trim()
        .to_string()
}

fn id_o_nuevo(cabecera: &StringRecord, fila: &StringRecord) -> String {
    let id = campo(cabecera, fila, "id");
    if id.is_empty() { nuevo_id() } else { id }
}

/// Row number column: the extract's own value when present and numeric,
/// the 1-based position in the file otherwise.
fn numero(cabecera: &StringRecord, fila: &StringRecord, posicion: usize) -> Result<i64> {
    let crudo = campo(cabecera, fila, "numero");
    if crudo.is_empty() {
        return Ok(posicion as i64 + 1);
    }
    crudo
        .parse()
        .map_err(|_| Error::Validation(format!("row {}: numero {crudo:?} is not a number", posicion + 1)))
}

fn filas<R: Read>(origen: R) -> Result<(StringRecord, Vec<StringRecord>)> {
    let mut lector = csv::Reader::from_reader(origen);
    let cabecera = lector.headers().map_err(Error::storage)?.clone();
    let mut registros = Vec::new();
    for fila in lector.records() {
        registros.push(fila.map_err(Error::storage)?);
    }
    Ok((cabecera, registros))
}

/// Read a UDAE roster extract.
pub fn leer_udae<R: Read>(origen: R) -> Result<Vec<DatosUdae>> {
    let (cabecera, registros) = filas(origen)?;
    registros
        .iter()
        .enumerate()
        .map(|(i, fila)| {
            Ok(DatosUdae {
                id: id_o_nuevo(&cabecera, fila),
                numero: numero(&cabecera, fila, i)?,
                jurisdiccion: campo(&cabecera, fila, "jurisdiccion"),
                distrito_judicial: campo(&cabecera, fila, "distritoJudicial"),
                circuito_judicial: campo(&cabecera, fila, "circuitoJudicial"),
                municipio_sede_fisica: campo(&cabecera, fila, "municipioSedeFisica"),
                nombre_despacho: campo(&cabecera, fila, "nombreDespacho"),
                descripcion_cargo: campo(&cabecera, fila, "descripcionCargo"),
                grado_cargo: campo(&cabecera, fila, "gradoCargo"),
                especialidad: campo(&cabecera, fila, "especialidad"),
                tipo_acto_administrativo: campo(&cabecera, fila, "tipoActoAdministrativo"),
                anio_acto_administrativo: campo(&cabecera, fila, "anioActoAdministrativo"),
                numero_acto_administrativo: campo(&cabecera, fila, "numeroActoAdministrativo"),
            })
        })
        .collect()
}

/// Read a CSJ occupancy extract.
pub fn leer_csj<R: Read>(origen: R) -> Result<Vec<DatosCsj>> {
    let (cabecera, registros) = filas(origen)?;
    registros
        .iter()
        .enumerate()
        .map(|(i, fila)| {
            Ok(DatosCsj {
                id: id_o_nuevo(&cabecera, fila),
                numero: numero(&cabecera, fila, i)?,
                codigo_despacho: campo(&cabecera, fila, "codigoDespacho"),
                municipio: campo(&cabecera, fila, "municipio"),
                despacho: campo(&cabecera, fila, "despacho"),
                cargo: campo(&cabecera, fila, "cargo"),
                grado: campo(&cabecera, fila, "grado"),
                estado_actual: EstadoCsj::parse(&campo(&cabecera, fila, "estadoActual")),
                propiedad: campo(&cabecera, fila, "propiedad"),
                cedula: campo(&cabecera, fila, "cedula"),
                observaciones: campo(&cabecera, fila, "observaciones"),
            })
        })
        .collect()
}

/// Read a DEAJ payroll extract. Unparseable end dates read as absent; the
/// extract mixes date formats and an unreadable date must not drop the row.
pub fn leer_deaj<R: Read>(origen: R) -> Result<Vec<DatosDeaj>> {
    let (cabecera, registros) = filas(origen)?;
    registros
        .iter()
        .enumerate()
        .map(|(i, fila)| {
            Ok(DatosDeaj {
                id: id_o_nuevo(&cabecera, fila),
                numero: numero(&cabecera, fila, i)?,
                sede: campo(&cabecera, fila, "sede"),
                dependencia: campo(&cabecera, fila, "dependencia"),
                cargo: campo(&cabecera, fila, "cargo"),
                servidor: campo(&cabecera, fila, "servidor"),
                num_documento: campo(&cabecera, fila, "numDocumento"),
                clase_nombramiento: ClaseNombramiento::parse(&campo(
                    &cabecera,
                    fila,
                    "claseNombramiento",
                )),
                fecha_terminacion: NaiveDate::parse_from_str(
                    &campo(&cabecera, fila, "fechaTerminacion"),
                    "%Y-%m-%d",
                )
                .ok(),
            })
        })
        .collect()
}

/// Read the administrative act reference list. An unrecognized tipo is a
/// validation error here, not a silent default.
pub fn leer_actos<R: Read>(origen: R) -> Result<Vec<ActoAdministrativo>> {
    let (cabecera, registros) = filas(origen)?;
    registros
        .iter()
        .enumerate()
        .map(|(i, fila)| {
            let crudo = campo(&cabecera, fila, "tipo");
            let tipo = TipoActo::parse(&crudo).ok_or_else(|| {
                Error::Validation(format!("row {}: unknown act tipo {crudo:?}", i + 1))
            })?;
            Ok(ActoAdministrativo {
                id: id_o_nuevo(&cabecera, fila),
                tipo,
                anio: campo(&cabecera, fila, "anio"),
                numero: campo(&cabecera, fila, "numero"),
                url: campo(&cabecera, fila, "url"),
            })
        })
        .collect()
}

/// Read the office contact directory.
pub fn leer_despachos<R: Read>(origen: R) -> Result<Vec<Despacho>> {
    let (cabecera, registros) = filas(origen)?;
    registros
        .iter()
        .map(|fila| {
            Ok(Despacho {
                id: id_o_nuevo(&cabecera, fila),
                codigo: campo(&cabecera, fila, "codigo"),
                nombre: campo(&cabecera, fila, "nombre"),
                email: campo(&cabecera, fila, "email"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn udae_con_columnas_en_cualquier_orden() {
        let csv = "nombreDespacho,numero,municipioSedeFisica\n\
                   Juzgado 1 Civil,3,Tunja\n";
        let filas = leer_udae(csv.as_bytes()).unwrap();
        assert_eq!(filas.len(), 1);
        assert_eq!(filas[0].numero, 3);
        assert_eq!(filas[0].nombre_despacho, "Juzgado 1 Civil");
        assert_eq!(filas[0].municipio_sede_fisica, "Tunja");
        assert!(!filas[0].id.is_empty());
        assert_eq!(filas[0].jurisdiccion, "");
    }

    #[test]
    fn numero_ausente_usa_la_posicion() {
        let csv = "nombreDespacho\nuno\ndos\n";
        let filas = leer_udae(csv.as_bytes()).unwrap();
        assert_eq!(filas[0].numero, 1);
        assert_eq!(filas[1].numero, 2);
    }

    #[test]
    fn numero_no_numerico_se_rechaza() {
        let csv = "numero\nabc\n";
        let err = leer_udae(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn csj_parsea_estado() {
        let csv = "estadoActual,propiedad,cedula\n\
                   PROPIEDAD,Juan Carlos Perez Gomez,80111222\n\
                   ENCARGO,,\n";
        let filas = leer_csj(csv.as_bytes()).unwrap();
        assert_eq!(filas[0].estado_actual, EstadoCsj::Propiedad);
        assert_eq!(filas[1].estado_actual, EstadoCsj::SinClasificar);
    }

    #[test]
    fn deaj_fecha_invalida_queda_ausente() {
        let csv = "claseNombramiento,fechaTerminacion\n\
                   Provisionalidad,2025-06-30\n\
                   Provisionalidad,30/06/2025\n\
                   Propiedad,\n";
        let filas = leer_deaj(csv.as_bytes()).unwrap();
        assert_eq!(filas[0].fecha_terminacion, NaiveDate::from_ymd_opt(2025, 6, 30));
        assert!(filas[1].fecha_terminacion.is_none());
        assert!(filas[2].clase_nombramiento.es_propiedad());
    }

    #[test]
    fn actos_con_tipo_desconocido_fallan() {
        let csv = "tipo,anio,numero\nAcuerdo,2020,45\n";
        let actos = leer_actos(csv.as_bytes()).unwrap();
        assert_eq!(actos[0].tipo, TipoActo::Acuerdo);

        let csv = "tipo,anio,numero\nResolucion,2020,45\n";
        assert!(matches!(leer_actos(csv.as_bytes()).unwrap_err(), Error::Validation(_)));
    }

    #[test]
    fn despachos_basico() {
        let csv = "codigo,nombre,email\n\
                   050011,Juzgado 1 Civil,j01civil@cendoj.ramajudicial.gov.co\n";
        let despachos = leer_despachos(csv.as_bytes()).unwrap();
        assert_eq!(despachos[0].codigo, "050011");
        assert_eq!(despachos[0].email, "j01civil@cendoj.ramajudicial.gov.co");
    }
}
