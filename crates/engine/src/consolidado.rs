//! The consolidated reporting projection.
//!
//! One denormalized row per UDAE position that has at least one confirmed
//! registry link, cells keyed by the export-contract column key. The
//! projection is recomputed in full on every call and the derivation rules
//! are re-applied every time; nothing here is cached or persisted.

use std::collections::BTreeMap;

use serde::Serialize;

use planta_core::{
    catalogo, separar_nombre, Campos, ClaseNombramiento, Columna, Error, Modelo, RegistroCompleto,
    Result, TipoDato,
};
use planta_store::Store;

/// One exported cell: the column's type tag plus the stringified value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Celda {
    #[serde(rename = "type", serialize_with = "tipo_como_texto")]
    pub tipo: TipoDato,
    #[serde(rename = "value")]
    pub valor: String,
}

fn tipo_como_texto<S: serde::Serializer>(t: &TipoDato, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(t.nombre())
}

/// One consolidated row, keyed `"{modelName}.{name}"`.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct RegistroConsolidado {
    celdas: BTreeMap<String, Celda>,
}

impl RegistroConsolidado {
    pub fn celda(&self, clave: &str) -> Option<&Celda> {
        self.celdas.get(clave)
    }

    /// Cell value by export key, empty string when the key is absent.
    pub fn valor(&self, clave: &str) -> &str {
        self.celdas.get(clave).map(|c| c.valor.as_str()).unwrap_or("")
    }
}

/// The full consolidated report: the fixed column catalogue plus one row per
/// eligible position.
#[derive(Debug, Serialize)]
pub struct Consolidado {
    pub columnas: &'static [Columna],
    pub registros: Vec<RegistroConsolidado>,
}

impl Consolidado {
    /// Write the report as CSV, header row of pretty names first, cells in
    /// catalogue order.
    pub fn escribir_csv<W: std::io::Write>(&self, destino: W) -> Result<()> {
        let mut escritor = csv::Writer::from_writer(destino);
        escritor
            .write_record(self.columnas.iter().map(|c| c.titulo))
            .map_err(Error::storage)?;
        for registro in &self.registros {
            escritor
                .write_record(self.columnas.iter().map(|c| registro.valor(&c.clave())))
                .map_err(Error::storage)?;
        }
        escritor.flush().map_err(Error::storage)
    }
}

/// Build the consolidated report from the current store state.
pub fn generar(store: &Store) -> Result<Consolidado> {
    let registros = store.registros_completos()?.iter().map(proyectar).collect();
    Ok(Consolidado { columnas: catalogo::columnas_consolidado(), registros })
}

fn proyectar(registro: &RegistroCompleto) -> RegistroConsolidado {
    let mut celdas = BTreeMap::new();
    for columna in catalogo::columnas_consolidado() {
        let valor = valor_columna(registro, columna);
        celdas.insert(columna.clave(), Celda { tipo: columna.tipo, valor });
    }
    RegistroConsolidado { celdas }
}

fn valor_columna(r: &RegistroCompleto, columna: &Columna) -> String {
    let nombre = columna.nombre;
    match columna.modelo {
        Modelo::DatosUdae => r.udae.campo(nombre),
        Modelo::DatosCsj => r.csj.as_ref().map(|c| c.campo(nombre)).unwrap_or_default(),
        Modelo::DatosDeaj => match nombre {
            "tieneFechaTerminacion" => tiene_fecha_terminacion(r),
            _ => r.deaj.as_ref().map(|d| d.campo(nombre)).unwrap_or_default(),
        },
        // The canonical act's own fields only appear when the linkage marks
        // the denormalized citation as wrong.
        Modelo::ActoAdministrativo => match (&r.enlace_acto, &r.acto) {
            (Some(enlace), Some(acto)) if !enlace.acto_correcto => acto.campo(nombre),
            _ => String::new(),
        },
        Modelo::DatosActo => valor_datos_acto(r, nombre),
        Modelo::DatosEncuesta => valor_encuesta(r, nombre),
    }
}

/// Citation columns gated on `acto_correcto`: the as-submitted columns carry
/// the citation only when the linkage confirms it, the `*Corregido` columns
/// only when it refutes it.
fn valor_datos_acto(r: &RegistroCompleto, nombre: &str) -> String {
    let Some(enlace) = &r.enlace_acto else {
        return String::new();
    };
    match nombre {
        "actoCorrecto" => si_no(enlace.acto_correcto),
        "perfilCargo" => enlace.perfil_cargo.clone(),
        "articulo" | "literal" | "numeral" => {
            if enlace.acto_correcto {
                enlace.campo(nombre)
            } else {
                String::new()
            }
        }
        "articuloCorregido" | "literalCorregido" | "numeralCorregido" => {
            if enlace.acto_correcto {
                String::new()
            } else {
                enlace.campo(nombre.trim_end_matches("Corregido"))
            }
        }
        _ => String::new(),
    }
}

fn valor_encuesta(r: &RegistroCompleto, nombre: &str) -> String {
    match nombre {
        "estadoProvision" => estado_provision(r),
        "tieneServidorProv" => match &r.deaj {
            Some(d) => si_no(!d.clase_nombramiento.es_propiedad()),
            None => crudo_encuesta(r, nombre),
        },
        "nombres" => con_respaldo(r, nombre, || separar_nombre(&nombre_titular(r)).nombres),
        "apellidos" => con_respaldo(r, nombre, || separar_nombre(&nombre_titular(r)).apellidos),
        "nombresProv" => con_respaldo(r, nombre, || separar_nombre(&nombre_provisional(r)).nombres),
        "apellidosProv" => {
            con_respaldo(r, nombre, || separar_nombre(&nombre_provisional(r)).apellidos)
        }
        "documento" => con_respaldo(r, nombre, || documento_titular(r)),
        "documentoProv" => con_respaldo(r, nombre, || documento_provisional(r)),
        "tipoDocumento" => tipo_documento(r, nombre, || documento_titular(r)),
        "tipoDocumentoProv" => tipo_documento(r, nombre, || documento_provisional(r)),
        "profesion1" | "profesion2" | "profesion3" => profesion(r, nombre),
        _ => crudo_encuesta(r, nombre),
    }
}

fn crudo_encuesta(r: &RegistroCompleto, nombre: &str) -> String {
    r.encuesta.as_ref().map(|e| e.campo(nombre)).unwrap_or_default()
}

/// Survey answer when one was given, registry-derived value otherwise.
fn con_respaldo(r: &RegistroCompleto, nombre: &str, derivado: impl FnOnce() -> String) -> String {
    let crudo = crudo_encuesta(r, nombre);
    if crudo.is_empty() {
        derivado()
    } else {
        crudo
    }
}

/// The only document type ever inferred is the national id card; any other
/// type must come from the survey.
fn tipo_documento(r: &RegistroCompleto, nombre: &str, documento: impl FnOnce() -> String) -> String {
    let crudo = crudo_encuesta(r, nombre);
    if !crudo.is_empty() {
        crudo
    } else if !con_respaldo(r, documento_de(nombre), documento).is_empty() {
        "Cédula de ciudadanía".into()
    } else {
        String::new()
    }
}

fn documento_de(nombre_tipo: &str) -> &'static str {
    if nombre_tipo.ends_with("Prov") {
        "documentoProv"
    } else {
        "documento"
    }
}

/// Tenured incumbent's full name: the CSJ registry's recorded name when one
/// exists, else the DEAJ incumbent unless the appointment is provisional.
fn nombre_titular(r: &RegistroCompleto) -> String {
    if let Some(csj) = &r.csj {
        if !csj.propiedad.trim().is_empty() {
            return csj.propiedad.clone();
        }
    }
    if let Some(deaj) = &r.deaj {
        if deaj.clase_nombramiento != ClaseNombramiento::Provisionalidad {
            return deaj.servidor.clone();
        }
    }
    String::new()
}

/// Provisional incumbent's full name, blank when the DEAJ appointment is in
/// Propiedad.
fn nombre_provisional(r: &RegistroCompleto) -> String {
    match &r.deaj {
        Some(d) if !d.clase_nombramiento.es_propiedad() => d.servidor.clone(),
        _ => String::new(),
    }
}

fn documento_titular(r: &RegistroCompleto) -> String {
    if let Some(csj) = &r.csj {
        if !csj.cedula.trim().is_empty() {
            return csj.cedula.clone();
        }
    }
    if let Some(deaj) = &r.deaj {
        if deaj.clase_nombramiento.es_propiedad() {
            return deaj.num_documento.clone();
        }
    }
    String::new()
}

fn documento_provisional(r: &RegistroCompleto) -> String {
    match &r.deaj {
        Some(d) if !d.clase_nombramiento.es_propiedad() => d.num_documento.clone(),
        _ => String::new(),
    }
}

fn tiene_fecha_terminacion(r: &RegistroCompleto) -> String {
    match &r.deaj {
        None => String::new(),
        Some(d) if d.clase_nombramiento.es_propiedad() => String::new(),
        Some(d) => si_no(d.fecha_terminacion.is_some()),
    }
}

fn estado_provision(r: &RegistroCompleto) -> String {
    match &r.encuesta {
        None => String::new(),
        Some(e) if e.tiene_servidor_prov => "En provisionalidad".into(),
        Some(e) if e.tiene_servidor_prop => "En propiedad".into(),
        Some(_) => "Cargo vacante".into(),
    }
}

fn si_no(v: bool) -> String {
    if v { "Si".into() } else { "No".into() }
}

fn profesion(r: &RegistroCompleto, nombre: &str) -> String {
    let Some(encuesta) = &r.encuesta else {
        return String::new();
    };
    let info = if encuesta.tiene_servidor_prov {
        encuesta.servidor_provisionalidad.clone()
    } else {
        encuesta.servidor_propiedad.clone()
    }
    .unwrap_or_default();
    match nombre {
        "profesion1" => info.profesion1,
        "profesion2" => info.profesion2,
        "profesion3" => info.profesion3,
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use planta_core::{
        CargoExiste, DatosCsj, DatosDeaj, DatosEncuesta, DatosUdae, EnlaceActo, EstadoCsj,
        ServidorInfo,
    };

    fn registro_base() -> RegistroCompleto {
        RegistroCompleto {
            udae: DatosUdae { id: "u1".into(), numero: 7, ..DatosUdae::default() },
            ..RegistroCompleto::default()
        }
    }

    fn deaj(clase: ClaseNombramiento) -> DatosDeaj {
        DatosDeaj {
            id: "d1".into(),
            servidor: "Luz Marina Rojas Pinzon".into(),
            num_documento: "52123456".into(),
            clase_nombramiento: clase,
            ..DatosDeaj::default()
        }
    }

    #[test]
    fn nombre_titular_prefiere_csj_y_lo_divide() {
        let mut r = registro_base();
        r.csj = Some(DatosCsj {
            id: "c1".into(),
            estado_actual: EstadoCsj::Propiedad,
            propiedad: "Juan Carlos Perez Gomez".into(),
            ..DatosCsj::default()
        });
        let fila = proyectar(&r);
        assert_eq!(fila.valor("DatosEncuesta.nombres"), "Juan Carlos");
        assert_eq!(fila.valor("DatosEncuesta.apellidos"), "Perez Gomez");
    }

    #[test]
    fn nombre_titular_cae_a_deaj_solo_sin_provisionalidad() {
        let mut r = registro_base();
        r.deaj = Some(deaj(ClaseNombramiento::Propiedad));
        let fila = proyectar(&r);
        assert_eq!(fila.valor("DatosEncuesta.nombres"), "Luz Marina");
        assert_eq!(fila.valor("DatosEncuesta.apellidos"), "Rojas Pinzon");

        r.deaj = Some(deaj(ClaseNombramiento::Provisionalidad));
        let fila = proyectar(&r);
        assert_eq!(fila.valor("DatosEncuesta.nombres"), "");
        assert_eq!(fila.valor("DatosEncuesta.nombresProv"), "Luz Marina");
        assert_eq!(fila.valor("DatosEncuesta.apellidosProv"), "Rojas Pinzon");
    }

    #[test]
    fn documento_e_inferencia_de_tipo() {
        let mut r = registro_base();
        r.csj = Some(DatosCsj { id: "c1".into(), cedula: "80111222".into(), ..DatosCsj::default() });
        let fila = proyectar(&r);
        assert_eq!(fila.valor("DatosEncuesta.documento"), "80111222");
        assert_eq!(fila.valor("DatosEncuesta.tipoDocumento"), "Cédula de ciudadanía");
        assert_eq!(fila.valor("DatosEncuesta.tipoDocumentoProv"), "");

        r.csj = None;
        r.deaj = Some(deaj(ClaseNombramiento::Provisionalidad));
        let fila = proyectar(&r);
        assert_eq!(fila.valor("DatosEncuesta.documento"), "");
        assert_eq!(fila.valor("DatosEncuesta.documentoProv"), "52123456");
        assert_eq!(fila.valor("DatosEncuesta.tipoDocumentoProv"), "Cédula de ciudadanía");
    }

    #[test]
    fn fecha_terminacion_en_blanco_para_propiedad() {
        let mut r = registro_base();
        r.deaj = Some(DatosDeaj {
            fecha_terminacion: NaiveDate::from_ymd_opt(2025, 6, 30),
            ..deaj(ClaseNombramiento::Propiedad)
        });
        assert_eq!(proyectar(&r).valor("DatosDeaj.tieneFechaTerminacion"), "");

        r.deaj = Some(DatosDeaj {
            fecha_terminacion: NaiveDate::from_ymd_opt(2025, 6, 30),
            ..deaj(ClaseNombramiento::Provisionalidad)
        });
        assert_eq!(proyectar(&r).valor("DatosDeaj.tieneFechaTerminacion"), "Si");
        assert_eq!(proyectar(&r).valor("DatosEncuesta.tieneServidorProv"), "Si");

        r.deaj = Some(deaj(ClaseNombramiento::Provisionalidad));
        assert_eq!(proyectar(&r).valor("DatosDeaj.tieneFechaTerminacion"), "No");
    }

    fn enlace_acto(correcto: bool) -> EnlaceActo {
        EnlaceActo {
            id: "e1".into(),
            datos_udae_id: "u1".into(),
            acto_administrativo_id: "a1".into(),
            articulo: "12".into(),
            literal: "b".into(),
            numeral: "3".into(),
            perfil_cargo: "Profesional".into(),
            acto_correcto: correcto,
            user_id: "op1".into(),
            created_at: String::new(),
        }
    }

    #[test]
    fn cita_correcta_va_en_columnas_tal_cual() {
        let mut r = registro_base();
        r.enlace_acto = Some(enlace_acto(true));
        let fila = proyectar(&r);
        assert_eq!(fila.valor("DatosActo.actoCorrecto"), "Si");
        assert_eq!(fila.valor("DatosActo.articulo"), "12");
        assert_eq!(fila.valor("DatosActo.articuloCorregido"), "");
        assert_eq!(fila.valor("ActoAdministrativo.anio"), "");
    }

    #[test]
    fn cita_incorrecta_va_en_columnas_corregidas() {
        let mut r = registro_base();
        r.enlace_acto = Some(enlace_acto(false));
        r.acto = Some(planta_core::ActoAdministrativo {
            id: "a1".into(),
            tipo: planta_core::TipoActo::Acuerdo,
            anio: "2019".into(),
            numero: "101".into(),
            url: String::new(),
        });
        let fila = proyectar(&r);
        assert_eq!(fila.valor("DatosActo.actoCorrecto"), "No");
        assert_eq!(fila.valor("DatosActo.articulo"), "");
        assert_eq!(fila.valor("DatosActo.articuloCorregido"), "12");
        assert_eq!(fila.valor("DatosActo.literalCorregido"), "b");
        assert_eq!(fila.valor("ActoAdministrativo.anio"), "2019");
        assert_eq!(fila.valor("ActoAdministrativo.numero"), "101");
    }

    #[test]
    fn estado_provision_desde_banderas_de_encuesta() {
        let mut r = registro_base();
        assert_eq!(proyectar(&r).valor("DatosEncuesta.estadoProvision"), "");

        let mut encuesta = DatosEncuesta { cargo_existe: CargoExiste::Si, ..DatosEncuesta::default() };
        r.encuesta = Some(encuesta.clone());
        assert_eq!(proyectar(&r).valor("DatosEncuesta.estadoProvision"), "Cargo vacante");

        encuesta.tiene_servidor_prop = true;
        r.encuesta = Some(encuesta.clone());
        assert_eq!(proyectar(&r).valor("DatosEncuesta.estadoProvision"), "En propiedad");

        encuesta.tiene_servidor_prov = true;
        r.encuesta = Some(encuesta);
        assert_eq!(proyectar(&r).valor("DatosEncuesta.estadoProvision"), "En provisionalidad");
    }

    #[test]
    fn la_encuesta_tiene_precedencia_sobre_lo_derivado() {
        let mut r = registro_base();
        r.csj = Some(DatosCsj {
            id: "c1".into(),
            propiedad: "Juan Carlos Perez Gomez".into(),
            cedula: "80111222".into(),
            ..DatosCsj::default()
        });
        r.encuesta = Some(DatosEncuesta {
            tiene_servidor_prop: true,
            servidor_propiedad: Some(ServidorInfo {
                tipo_documento: "Pasaporte".into(),
                documento: "AB123".into(),
                nombres: "Juan C.".into(),
                apellidos: "Perez".into(),
                profesion1: "Abogado".into(),
                ..ServidorInfo::default()
            }),
            ..DatosEncuesta::default()
        });
        let fila = proyectar(&r);
        assert_eq!(fila.valor("DatosEncuesta.nombres"), "Juan C.");
        assert_eq!(fila.valor("DatosEncuesta.documento"), "AB123");
        assert_eq!(fila.valor("DatosEncuesta.tipoDocumento"), "Pasaporte");
        assert_eq!(fila.valor("DatosEncuesta.profesion1"), "Abogado");
    }

    #[test]
    fn profesiones_desde_el_subregistro_indicado() {
        let mut r = registro_base();
        r.encuesta = Some(DatosEncuesta {
            tiene_servidor_prov: true,
            servidor_propiedad: Some(ServidorInfo {
                profesion1: "Contador".into(),
                ..ServidorInfo::default()
            }),
            servidor_provisionalidad: Some(ServidorInfo {
                profesion1: "Ingeniera".into(),
                ..ServidorInfo::default()
            }),
            ..DatosEncuesta::default()
        });
        assert_eq!(proyectar(&r).valor("DatosEncuesta.profesion1"), "Ingeniera");
    }

    #[test]
    fn generar_solo_incluye_posiciones_enlazadas() {
        let mut store = Store::en_memoria().unwrap();
        store
            .cargar_udae(&[
                DatosUdae { id: "u1".into(), numero: 1, ..DatosUdae::default() },
                DatosUdae { id: "u2".into(), numero: 2, ..DatosUdae::default() },
            ])
            .unwrap();
        store
            .cargar_csj(&[DatosCsj { id: "c1".into(), numero: 1, ..DatosCsj::default() }])
            .unwrap();
        store.crear_enlace_csj("u1", "c1", "op1").unwrap();

        let consolidado = generar(&store).unwrap();
        assert_eq!(consolidado.registros.len(), 1);
        assert_eq!(consolidado.registros[0].valor("DatosUdae.id"), "u1");

        let mut csv_bytes = Vec::new();
        consolidado.escribir_csv(&mut csv_bytes).unwrap();
        let texto = String::from_utf8(csv_bytes).unwrap();
        assert!(texto.starts_with("Id,Numero,"));
        assert_eq!(texto.lines().count(), 2);
    }

    #[test]
    fn cada_celda_se_serializa_con_tipo_y_valor() {
        let mut r = registro_base();
        r.deaj = Some(DatosDeaj {
            fecha_terminacion: NaiveDate::from_ymd_opt(2025, 6, 30),
            ..deaj(ClaseNombramiento::Provisionalidad)
        });
        let json = serde_json::to_value(proyectar(&r)).unwrap();

        assert_eq!(json["DatosUdae.id"]["type"], "String");
        assert_eq!(json["DatosUdae.id"]["value"], "u1");
        assert_eq!(json["DatosUdae.numero"]["type"], "Int");
        assert_eq!(json["DatosUdae.numero"]["value"], "7");
        assert_eq!(json["DatosDeaj.fechaTerminacion"]["type"], "DateTime");
        assert_eq!(json["DatosDeaj.fechaTerminacion"]["value"], "2025-06-30");

        // One `{type, value}` object per catalogue column, no extra keys.
        let objeto = json.as_object().unwrap();
        assert_eq!(objeto.len(), catalogo::columnas_consolidado().len());
        assert!(objeto
            .values()
            .all(|c| c["type"].is_string() && c["value"].is_string()));
    }
}
