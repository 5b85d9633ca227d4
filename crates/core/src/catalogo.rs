//! Static column catalogue for the consolidated export and the pairing
//! tables.
//!
//! The source system enumerated entity fields through runtime schema
//! reflection; here every exported column is declared statically, in the
//! exact order the export contract fixes. Column identity on the wire is
//! `"{modelName}.{name}"`; renaming a column is a contract change.

use serde::Serialize;

/// Entity a column reads from. `DatosActo` is the act linkage (citation
/// detail), distinct from the act itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Modelo {
    DatosUdae,
    DatosCsj,
    DatosDeaj,
    ActoAdministrativo,
    DatosActo,
    DatosEncuesta,
}

impl std::fmt::Display for Modelo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::DatosUdae => "DatosUdae",
            Self::DatosCsj => "DatosCsj",
            Self::DatosDeaj => "DatosDeaj",
            Self::ActoAdministrativo => "ActoAdministrativo",
            Self::DatosActo => "DatosActo",
            Self::DatosEncuesta => "DatosEncuesta",
        };
        write!(f, "{s}")
    }
}

/// Scalar type tag carried by every exported cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TipoDato {
    Texto,
    Entero,
    Fecha,
}

impl TipoDato {
    /// Wire spelling of the type tag.
    pub fn nombre(self) -> &'static str {
        match self {
            Self::Texto => "String",
            Self::Entero => "Int",
            Self::Fecha => "DateTime",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Columna {
    #[serde(rename = "modelName", serialize_with = "modelo_como_texto")]
    pub modelo: Modelo,
    #[serde(rename = "name")]
    pub nombre: &'static str,
    #[serde(rename = "prettyName")]
    pub titulo: &'static str,
    #[serde(rename = "type", serialize_with = "tipo_como_texto")]
    pub tipo: TipoDato,
}

fn modelo_como_texto<S: serde::Serializer>(m: &Modelo, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&m.to_string())
}

fn tipo_como_texto<S: serde::Serializer>(t: &TipoDato, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(t.nombre())
}

impl Columna {
    /// Export key: `"{modelName}.{name}"`.
    pub fn clave(&self) -> String {
        format!("{}.{}", self.modelo, self.nombre)
    }
}

const fn col(modelo: Modelo, nombre: &'static str, titulo: &'static str, tipo: TipoDato) -> Columna {
    Columna { modelo, nombre, titulo, tipo }
}

use Modelo::*;
use TipoDato::*;

/// Columns shown for the UDAE side of a pairing table.
pub static COLUMNAS_UDAE: &[Columna] = &[
    col(DatosUdae, "id", "Id", Texto),
    col(DatosUdae, "numero", "Numero", Entero),
    col(DatosUdae, "jurisdiccion", "Jurisdiccion", Texto),
    col(DatosUdae, "distritoJudicial", "Distrito Judicial", Texto),
    col(DatosUdae, "circuitoJudicial", "Circuito Judicial", Texto),
    col(DatosUdae, "municipioSedeFisica", "Municipio Sede Fisica", Texto),
    col(DatosUdae, "nombreDespacho", "Nombre Despacho", Texto),
    col(DatosUdae, "descripcionCargo", "Descripcion Cargo", Texto),
    col(DatosUdae, "gradoCargo", "Grado Cargo", Texto),
    col(DatosUdae, "especialidad", "Especialidad", Texto),
    col(DatosUdae, "tipoActoAdministrativo", "Tipo Acto Administrativo", Texto),
    col(DatosUdae, "anioActoAdministrativo", "Anio Acto Administrativo", Texto),
    col(DatosUdae, "numeroActoAdministrativo", "Numero Acto Administrativo", Texto),
];

/// Columns shown for the CSJ side of a pairing table.
pub static COLUMNAS_CSJ: &[Columna] = &[
    col(DatosCsj, "id", "Id", Texto),
    col(DatosCsj, "numero", "Numero", Entero),
    col(DatosCsj, "codigoDespacho", "Codigo Despacho", Texto),
    col(DatosCsj, "municipio", "Municipio", Texto),
    col(DatosCsj, "despacho", "Despacho", Texto),
    col(DatosCsj, "cargo", "Cargo", Texto),
    col(DatosCsj, "grado", "Grado", Texto),
    col(DatosCsj, "estadoActual", "Estado Actual", Texto),
    col(DatosCsj, "propiedad", "Propiedad", Texto),
    col(DatosCsj, "cedula", "Cedula", Texto),
    col(DatosCsj, "observaciones", "Observaciones", Texto),
];

/// Columns shown for the DEAJ side of a pairing table.
pub static COLUMNAS_DEAJ: &[Columna] = &[
    col(DatosDeaj, "id", "Id", Texto),
    col(DatosDeaj, "numero", "Numero", Entero),
    col(DatosDeaj, "sede", "Sede", Texto),
    col(DatosDeaj, "dependencia", "Dependencia", Texto),
    col(DatosDeaj, "cargo", "Cargo", Texto),
    col(DatosDeaj, "servidor", "Servidor", Texto),
    col(DatosDeaj, "numDocumento", "Num Documento", Texto),
    col(DatosDeaj, "claseNombramiento", "Clase Nombramiento", Texto),
    col(DatosDeaj, "fechaTerminacion", "Fecha Terminacion", Fecha),
];

/// The consolidated export catalogue, in contract order. The leading
/// `DatosUdae.id` pseudo-column is always present and carries the UDAE row
/// id.
///
/// `tieneFechaTerminacion`, `estadoProvision` and the `*Corregido` citation
/// columns do not exist on any entity; the projection derives them.
pub static CONSOLIDADO: &[Columna] = &[
    col(DatosUdae, "id", "Id", Texto),
    col(DatosUdae, "numero", "Numero", Entero),
    col(DatosUdae, "jurisdiccion", "Jurisdiccion", Texto),
    col(DatosUdae, "distritoJudicial", "Distrito Judicial", Texto),
    col(DatosUdae, "circuitoJudicial", "Circuito Judicial", Texto),
    col(DatosUdae, "municipioSedeFisica", "Municipio Sede Fisica", Texto),
    col(DatosUdae, "nombreDespacho", "Nombre Despacho", Texto),
    col(DatosUdae, "descripcionCargo", "Descripcion Cargo", Texto),
    col(DatosUdae, "gradoCargo", "Grado Cargo", Texto),
    col(DatosUdae, "especialidad", "Especialidad", Texto),
    col(DatosUdae, "tipoActoAdministrativo", "Tipo Acto Administrativo", Texto),
    col(DatosUdae, "anioActoAdministrativo", "Anio Acto Administrativo", Texto),
    col(DatosUdae, "numeroActoAdministrativo", "Numero Acto Administrativo", Texto),
    col(DatosCsj, "numero", "Numero", Entero),
    col(DatosCsj, "codigoDespacho", "Codigo Despacho", Texto),
    col(DatosCsj, "municipio", "Municipio", Texto),
    col(DatosCsj, "despacho", "Despacho", Texto),
    col(DatosCsj, "cargo", "Cargo", Texto),
    col(DatosCsj, "grado", "Grado", Texto),
    col(DatosCsj, "estadoActual", "Estado Actual", Texto),
    col(DatosCsj, "propiedad", "Propiedad", Texto),
    col(DatosCsj, "cedula", "Cedula", Texto),
    col(DatosDeaj, "numero", "Numero", Entero),
    col(DatosDeaj, "sede", "Sede", Texto),
    col(DatosDeaj, "dependencia", "Dependencia", Texto),
    col(DatosDeaj, "cargo", "Cargo", Texto),
    col(DatosDeaj, "servidor", "Servidor", Texto),
    col(DatosDeaj, "numDocumento", "Num Documento", Texto),
    col(DatosDeaj, "claseNombramiento", "Clase Nombramiento", Texto),
    col(DatosDeaj, "fechaTerminacion", "Fecha Terminacion", Fecha),
    col(DatosDeaj, "tieneFechaTerminacion", "Tiene Fecha Terminacion", Texto),
    col(ActoAdministrativo, "tipo", "Tipo", Texto),
    col(ActoAdministrativo, "anio", "Anio", Texto),
    col(ActoAdministrativo, "numero", "Numero", Texto),
    col(DatosActo, "articulo", "Articulo", Texto),
    col(DatosActo, "literal", "Literal", Texto),
    col(DatosActo, "numeral", "Numeral", Texto),
    col(DatosActo, "articuloCorregido", "Articulo Corregido", Texto),
    col(DatosActo, "literalCorregido", "Literal Corregido", Texto),
    col(DatosActo, "numeralCorregido", "Numeral Corregido", Texto),
    col(DatosActo, "perfilCargo", "Perfil Cargo", Texto),
    col(DatosActo, "actoCorrecto", "Acto Correcto", Texto),
    col(DatosEncuesta, "cargoExiste", "Cargo Existe", Texto),
    col(DatosEncuesta, "estadoProvision", "Estado Provision", Texto),
    col(DatosEncuesta, "tieneServidorProp", "Tiene Servidor Prop", Texto),
    col(DatosEncuesta, "tipoDocumento", "Tipo Documento", Texto),
    col(DatosEncuesta, "documento", "Documento", Texto),
    col(DatosEncuesta, "nombres", "Nombres", Texto),
    col(DatosEncuesta, "apellidos", "Apellidos", Texto),
    col(DatosEncuesta, "nivelEscolaridad", "Nivel Escolaridad", Texto),
    col(DatosEncuesta, "familiaresDependientes", "Familiares Dependientes", Entero),
    col(DatosEncuesta, "profesion1", "Profesion1", Texto),
    col(DatosEncuesta, "profesion2", "Profesion2", Texto),
    col(DatosEncuesta, "profesion3", "Profesion3", Texto),
    col(DatosEncuesta, "tieneServidorProv", "Tiene Servidor Prov", Texto),
    col(DatosEncuesta, "tipoDocumentoProv", "Tipo Documento Prov", Texto),
    col(DatosEncuesta, "documentoProv", "Documento Prov", Texto),
    col(DatosEncuesta, "nombresProv", "Nombres Prov", Texto),
    col(DatosEncuesta, "apellidosProv", "Apellidos Prov", Texto),
    col(DatosEncuesta, "observacionesNovedad", "Observaciones Novedad", Texto),
];

/// The consolidated catalogue in contract order.
pub fn columnas_consolidado() -> &'static [Columna] {
    CONSOLIDADO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_siempre_presente_y_primero() {
        let cols = columnas_consolidado();
        assert_eq!(cols[0].modelo, Modelo::DatosUdae);
        assert_eq!(cols[0].nombre, "id");
        assert_eq!(cols[0].clave(), "DatosUdae.id");
    }

    #[test]
    fn claves_unicas() {
        let mut claves: Vec<String> = columnas_consolidado().iter().map(|c| c.clave()).collect();
        let total = claves.len();
        claves.sort();
        claves.dedup();
        assert_eq!(claves.len(), total, "duplicate column keys in catalogue");
    }

    #[test]
    fn orden_estable() {
        // The export contract fixes the order; spot-check block boundaries.
        let claves: Vec<String> = columnas_consolidado().iter().map(|c| c.clave()).collect();
        let pos = |k: &str| claves.iter().position(|c| c == k).unwrap();
        assert!(pos("DatosUdae.numero") < pos("DatosCsj.numero"));
        assert!(pos("DatosCsj.cedula") < pos("DatosDeaj.numero"));
        assert!(pos("DatosDeaj.tieneFechaTerminacion") < pos("ActoAdministrativo.tipo"));
        assert!(pos("ActoAdministrativo.numero") < pos("DatosActo.articulo"));
        assert!(pos("DatosActo.actoCorrecto") < pos("DatosEncuesta.cargoExiste"));
    }

    #[test]
    fn serializa_con_nombres_de_contrato() {
        let json = serde_json::to_value(columnas_consolidado()[0]).unwrap();
        assert_eq!(json["modelName"], "DatosUdae");
        assert_eq!(json["name"], "id");
        assert_eq!(json["prettyName"], "Id");
        assert_eq!(json["type"], "String");
    }
}
