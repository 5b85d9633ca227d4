use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Closed enumerations
//
// The registries deliver these as free text; parsing happens at the ingest
// boundary so the engine never string-matches classification values.
// ---------------------------------------------------------------------------

/// Kind of administrative act that creates or modifies a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoActo {
    Acuerdo,
    Decreto,
    Ley,
}

impl TipoActo {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "acuerdo" => Some(Self::Acuerdo),
            "decreto" => Some(Self::Decreto),
            "ley" => Some(Self::Ley),
            _ => None,
        }
    }
}

impl std::fmt::Display for TipoActo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Acuerdo => write!(f, "Acuerdo"),
            Self::Decreto => write!(f, "Decreto"),
            Self::Ley => write!(f, "Ley"),
        }
    }
}

/// Current occupancy status reported by the CSJ registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoCsj {
    Propiedad,
    Provisionalidad,
    Vacante,
    SinClasificar,
}

impl EstadoCsj {
    /// The CSJ extract spells statuses in uppercase; anything unrecognized
    /// collapses to `SinClasificar` rather than failing the load.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "PROPIEDAD" => Self::Propiedad,
            "PROVISIONALIDAD" => Self::Provisionalidad,
            "VACANTE" => Self::Vacante,
            _ => Self::SinClasificar,
        }
    }

    pub fn es_propiedad(self) -> bool {
        self == Self::Propiedad
    }
}

impl std::fmt::Display for EstadoCsj {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Propiedad => write!(f, "PROPIEDAD"),
            Self::Provisionalidad => write!(f, "PROVISIONALIDAD"),
            Self::Vacante => write!(f, "VACANTE"),
            Self::SinClasificar => Ok(()),
        }
    }
}

/// Appointment class reported by the DEAJ payroll extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaseNombramiento {
    Propiedad,
    Provisionalidad,
    SinClasificar,
}

impl ClaseNombramiento {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "propiedad" => Self::Propiedad,
            "provisionalidad" => Self::Provisionalidad,
            _ => Self::SinClasificar,
        }
    }

    pub fn es_propiedad(self) -> bool {
        self == Self::Propiedad
    }
}

impl std::fmt::Display for ClaseNombramiento {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Propiedad => write!(f, "Propiedad"),
            Self::Provisionalidad => write!(f, "Provisionalidad"),
            Self::SinClasificar => Ok(()),
        }
    }
}

/// Survey answer: does the position still exist as described.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CargoExiste {
    Si,
    No,
    SiConNovedad,
}

impl CargoExiste {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "si" => Some(Self::Si),
            "no" => Some(Self::No),
            "si con novedad" => Some(Self::SiConNovedad),
            _ => None,
        }
    }
}

impl std::fmt::Display for CargoExiste {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Si => write!(f, "Si"),
            Self::No => write!(f, "No"),
            Self::SiConNovedad => write!(f, "Si con novedad"),
        }
    }
}

// ---------------------------------------------------------------------------
// Registry entities
// ---------------------------------------------------------------------------

/// One authorized position in the UDAE reference roster.
///
/// The `*_acto_administrativo` fields are the denormalized citation of the
/// creating act as captured in the source spreadsheet; they are free text and
/// are only validated later through the act linkage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatosUdae {
    pub id: String,
    pub numero: i64,
    pub jurisdiccion: String,
    pub distrito_judicial: String,
    pub circuito_judicial: String,
    pub municipio_sede_fisica: String,
    pub nombre_despacho: String,
    pub descripcion_cargo: String,
    pub grado_cargo: String,
    pub especialidad: String,
    pub tipo_acto_administrativo: String,
    pub anio_acto_administrativo: String,
    pub numero_acto_administrativo: String,
}

/// One row of the CSJ occupancy extract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatosCsj {
    pub id: String,
    pub numero: i64,
    pub codigo_despacho: String,
    pub municipio: String,
    pub despacho: String,
    pub cargo: String,
    pub grado: String,
    pub estado_actual: EstadoCsj,
    /// Full name of the tenured incumbent, when one is recorded.
    pub propiedad: String,
    pub cedula: String,
    pub observaciones: String,
}

impl Default for DatosCsj {
    fn default() -> Self {
        Self {
            id: String::new(),
            numero: 0,
            codigo_despacho: String::new(),
            municipio: String::new(),
            despacho: String::new(),
            cargo: String::new(),
            grado: String::new(),
            estado_actual: EstadoCsj::SinClasificar,
            propiedad: String::new(),
            cedula: String::new(),
            observaciones: String::new(),
        }
    }
}

/// One row of the DEAJ payroll extract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatosDeaj {
    pub id: String,
    pub numero: i64,
    pub sede: String,
    pub dependencia: String,
    pub cargo: String,
    /// Full name of the serving incumbent.
    pub servidor: String,
    pub num_documento: String,
    pub clase_nombramiento: ClaseNombramiento,
    /// End date of a provisional appointment, when one was reported.
    pub fecha_terminacion: Option<NaiveDate>,
}

impl Default for DatosDeaj {
    fn default() -> Self {
        Self {
            id: String::new(),
            numero: 0,
            sede: String::new(),
            dependencia: String::new(),
            cargo: String::new(),
            servidor: String::new(),
            num_documento: String::new(),
            clase_nombramiento: ClaseNombramiento::SinClasificar,
            fecha_terminacion: None,
        }
    }
}

/// Reference entity: an administrative act (acuerdo, decreto or ley).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActoAdministrativo {
    pub id: String,
    pub tipo: TipoActo,
    pub anio: String,
    pub numero: String,
    pub url: String,
}

/// Office contact record from the public directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Despacho {
    pub id: String,
    pub codigo: String,
    pub nombre: String,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

/// Confirmed UDAE ↔ CSJ association. One per side, never updated or removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnlaceCsj {
    pub id: String,
    pub datos_udae_id: String,
    pub datos_csj_id: String,
    pub user_id: String,
    pub created_at: String,
}

/// Confirmed UDAE ↔ DEAJ association. Same contract as [`EnlaceCsj`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnlaceDeaj {
    pub id: String,
    pub datos_udae_id: String,
    pub datos_deaj_id: String,
    pub user_id: String,
    pub created_at: String,
}

/// UDAE ↔ administrative-act association with citation detail.
///
/// Unlike the registry links this one is mutable: it can be re-pointed to a
/// different act or have its citation corrected, and it can be removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnlaceActo {
    pub id: String,
    pub datos_udae_id: String,
    pub acto_administrativo_id: String,
    pub articulo: String,
    pub literal: String,
    pub numeral: String,
    pub perfil_cargo: String,
    /// Whether the act's (anio, numero) agree with the denormalized citation
    /// on the UDAE row. The act's tipo is not part of the comparison.
    pub acto_correcto: bool,
    pub user_id: String,
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Survey
// ---------------------------------------------------------------------------

/// Person detail captured by the survey for one incumbency state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServidorInfo {
    pub tipo_documento: String,
    pub documento: String,
    pub nombres: String,
    pub apellidos: String,
    pub nivel_escolaridad: String,
    pub familiares_dependientes: i64,
    pub profesion1: String,
    pub profesion2: String,
    pub profesion3: String,
}

/// Post-link survey record. At most one per UDAE row; replaced wholesale on
/// every save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatosEncuesta {
    pub id: String,
    pub datos_udae_id: String,
    pub cargo_existe: CargoExiste,
    pub tipo_novedad: String,
    pub tipo_traslado: String,
    pub despacho_traslado_destino_id: String,
    pub acto_traslado_id: String,
    pub observaciones_novedad: String,
    pub observaciones_despacho: String,
    pub observaciones_clasificacion: String,
    pub tiene_servidor_prop: bool,
    pub servidor_propiedad: Option<ServidorInfo>,
    pub tiene_servidor_prov: bool,
    pub servidor_provisionalidad: Option<ServidorInfo>,
    pub user_id: String,
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Eager-loaded projection input
// ---------------------------------------------------------------------------

/// One UDAE row with every linked and optional child record resolved.
/// This is the unit the consolidation projection works from.
#[derive(Debug, Clone, Default)]
pub struct RegistroCompleto {
    pub udae: DatosUdae,
    pub csj: Option<DatosCsj>,
    pub deaj: Option<DatosDeaj>,
    pub enlace_acto: Option<EnlaceActo>,
    pub acto: Option<ActoAdministrativo>,
    pub encuesta: Option<DatosEncuesta>,
}

impl Default for DatosEncuesta {
    fn default() -> Self {
        Self {
            id: String::new(),
            datos_udae_id: String::new(),
            cargo_existe: CargoExiste::Si,
            tipo_novedad: String::new(),
            tipo_traslado: String::new(),
            despacho_traslado_destino_id: String::new(),
            acto_traslado_id: String::new(),
            observaciones_novedad: String::new(),
            observaciones_despacho: String::new(),
            observaciones_clasificacion: String::new(),
            tiene_servidor_prop: false,
            servidor_propiedad: None,
            tiene_servidor_prov: false,
            servidor_provisionalidad: None,
            user_id: String::new(),
            created_at: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Field access by wire name
// ---------------------------------------------------------------------------

/// Read a field as a display string by its exported (camelCase) name.
///
/// This replaces the runtime schema reflection the source system used: every
/// exported field is enumerated explicitly, and an unknown name is an empty
/// string. Used by the pairing filters and the consolidation projection.
pub trait Campos {
    fn campo(&self, nombre: &str) -> String;
}

impl Campos for DatosUdae {
    fn campo(&self, nombre: &str) -> String {
        match nombre {
            "id" => self.id.clone(),
            "numero" => self.numero.to_string(),
            "jurisdiccion" => self.jurisdiccion.clone(),
            "distritoJudicial" => self.distrito_judicial.clone(),
            "circuitoJudicial" => self.circuito_judicial.clone(),
            "municipioSedeFisica" => self.municipio_sede_fisica.clone(),
            "nombreDespacho" => self.nombre_despacho.clone(),
            "descripcionCargo" => self.descripcion_cargo.clone(),
            "gradoCargo" => self.grado_cargo.clone(),
            "especialidad" => self.especialidad.clone(),
            "tipoActoAdministrativo" => self.tipo_acto_administrativo.clone(),
            "anioActoAdministrativo" => self.anio_acto_administrativo.clone(),
            "numeroActoAdministrativo" => self.numero_acto_administrativo.clone(),
            _ => String::new(),
        }
    }
}

impl Campos for DatosCsj {
    fn campo(&self, nombre: &str) -> String {
        match nombre {
            "id" => self.id.clone(),
            "numero" => self.numero.to_string(),
            "codigoDespacho" => self.codigo_despacho.clone(),
            "municipio" => self.municipio.clone(),
            "despacho" => self.despacho.clone(),
            "cargo" => self.cargo.clone(),
            "grado" => self.grado.clone(),
            "estadoActual" => self.estado_actual.to_string(),
            "propiedad" => self.propiedad.clone(),
            "cedula" => self.cedula.clone(),
            "observaciones" => self.observaciones.clone(),
            _ => String::new(),
        }
    }
}

impl Campos for DatosDeaj {
    fn campo(&self, nombre: &str) -> String {
        match nombre {
            "id" => self.id.clone(),
            "numero" => self.numero.to_string(),
            "sede" => self.sede.clone(),
            "dependencia" => self.dependencia.clone(),
            "cargo" => self.cargo.clone(),
            "servidor" => self.servidor.clone(),
            "numDocumento" => self.num_documento.clone(),
            "claseNombramiento" => self.clase_nombramiento.to_string(),
            "fechaTerminacion" => self
                .fecha_terminacion
                .map(|f| f.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }
}

impl Campos for ActoAdministrativo {
    fn campo(&self, nombre: &str) -> String {
        match nombre {
            "id" => self.id.clone(),
            "tipo" => self.tipo.to_string(),
            "anio" => self.anio.clone(),
            "numero" => self.numero.clone(),
            "url" => self.url.clone(),
            _ => String::new(),
        }
    }
}

impl Campos for EnlaceActo {
    fn campo(&self, nombre: &str) -> String {
        match nombre {
            "id" => self.id.clone(),
            "articulo" => self.articulo.clone(),
            "literal" => self.literal.clone(),
            "numeral" => self.numeral.clone(),
            "perfilCargo" => self.perfil_cargo.clone(),
            "actoCorrecto" => si_no(self.acto_correcto),
            _ => String::new(),
        }
    }
}

impl Campos for DatosEncuesta {
    fn campo(&self, nombre: &str) -> String {
        let prop = self.servidor_propiedad.clone().unwrap_or_default();
        let prov = self.servidor_provisionalidad.clone().unwrap_or_default();
        match nombre {
            "id" => self.id.clone(),
            "cargoExiste" => self.cargo_existe.to_string(),
            "tipoNovedad" => self.tipo_novedad.clone(),
            "tipoTraslado" => self.tipo_traslado.clone(),
            "observacionesNovedad" => self.observaciones_novedad.clone(),
            "observacionesDespacho" => self.observaciones_despacho.clone(),
            "observacionesClasificacion" => self.observaciones_clasificacion.clone(),
            "tieneServidorProp" => si_no(self.tiene_servidor_prop),
            "tipoDocumento" => prop.tipo_documento,
            "documento" => prop.documento,
            "nombres" => prop.nombres,
            "apellidos" => prop.apellidos,
            "nivelEscolaridad" => prop.nivel_escolaridad,
            "familiaresDependientes" => prop.familiares_dependientes.to_string(),
            "profesion1" => prop.profesion1,
            "profesion2" => prop.profesion2,
            "profesion3" => prop.profesion3,
            "tieneServidorProv" => si_no(self.tiene_servidor_prov),
            "tipoDocumentoProv" => prov.tipo_documento,
            "documentoProv" => prov.documento,
            "nombresProv" => prov.nombres,
            "apellidosProv" => prov.apellidos,
            "nivelEscolaridadProv" => prov.nivel_escolaridad,
            "familiaresDependientesProv" => prov.familiares_dependientes.to_string(),
            "profesion1Prov" => prov.profesion1,
            "profesion2Prov" => prov.profesion2,
            "profesion3Prov" => prov.profesion3,
            _ => String::new(),
        }
    }
}

impl Campos for Despacho {
    fn campo(&self, nombre: &str) -> String {
        match nombre {
            "id" => self.id.clone(),
            "codigo" => self.codigo.clone(),
            "nombre" => self.nombre.clone(),
            "email" => self.email.clone(),
            _ => String::new(),
        }
    }
}

pub(crate) fn si_no(v: bool) -> String {
    if v { "Si".into() } else { "No".into() }
}
