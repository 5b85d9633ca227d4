//! Database schema.
//!
//! The `UNIQUE` constraints on the link tables are the authoritative
//! uniqueness mechanism for the pairing engine: concurrent confirm attempts
//! race on the insert, and the loser gets a constraint violation. The
//! engine-level pre-checks only exist for friendlier messages.

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS datos_udae (
    id TEXT PRIMARY KEY,
    numero INTEGER NOT NULL,
    jurisdiccion TEXT NOT NULL DEFAULT '',
    distrito_judicial TEXT NOT NULL DEFAULT '',
    circuito_judicial TEXT NOT NULL DEFAULT '',
    municipio_sede_fisica TEXT NOT NULL DEFAULT '',
    nombre_despacho TEXT NOT NULL DEFAULT '',
    descripcion_cargo TEXT NOT NULL DEFAULT '',
    grado_cargo TEXT NOT NULL DEFAULT '',
    especialidad TEXT NOT NULL DEFAULT '',
    tipo_acto_administrativo TEXT NOT NULL DEFAULT '',
    anio_acto_administrativo TEXT NOT NULL DEFAULT '',
    numero_acto_administrativo TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS datos_csj (
    id TEXT PRIMARY KEY,
    numero INTEGER NOT NULL,
    codigo_despacho TEXT NOT NULL DEFAULT '',
    municipio TEXT NOT NULL DEFAULT '',
    despacho TEXT NOT NULL DEFAULT '',
    cargo TEXT NOT NULL DEFAULT '',
    grado TEXT NOT NULL DEFAULT '',
    estado_actual TEXT NOT NULL DEFAULT '',
    propiedad TEXT NOT NULL DEFAULT '',
    cedula TEXT NOT NULL DEFAULT '',
    observaciones TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS datos_deaj (
    id TEXT PRIMARY KEY,
    numero INTEGER NOT NULL,
    sede TEXT NOT NULL DEFAULT '',
    dependencia TEXT NOT NULL DEFAULT '',
    cargo TEXT NOT NULL DEFAULT '',
    servidor TEXT NOT NULL DEFAULT '',
    num_documento TEXT NOT NULL DEFAULT '',
    clase_nombramiento TEXT NOT NULL DEFAULT '',
    fecha_terminacion TEXT
);

CREATE TABLE IF NOT EXISTS actos_administrativos (
    id TEXT PRIMARY KEY,
    tipo TEXT NOT NULL,
    anio TEXT NOT NULL,
    numero TEXT NOT NULL,
    url TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS enlaces_csj (
    id TEXT PRIMARY KEY,
    datos_udae_id TEXT NOT NULL UNIQUE REFERENCES datos_udae(id),
    datos_csj_id TEXT NOT NULL UNIQUE REFERENCES datos_csj(id),
    user_id TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS enlaces_deaj (
    id TEXT PRIMARY KEY,
    datos_udae_id TEXT NOT NULL UNIQUE REFERENCES datos_udae(id),
    datos_deaj_id TEXT NOT NULL UNIQUE REFERENCES datos_deaj(id),
    user_id TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS enlaces_acto (
    id TEXT PRIMARY KEY,
    datos_udae_id TEXT NOT NULL UNIQUE REFERENCES datos_udae(id),
    acto_administrativo_id TEXT NOT NULL REFERENCES actos_administrativos(id),
    articulo TEXT NOT NULL,
    literal TEXT NOT NULL DEFAULT '',
    numeral TEXT NOT NULL DEFAULT '',
    perfil_cargo TEXT NOT NULL DEFAULT '',
    acto_correcto INTEGER NOT NULL,
    user_id TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS datos_encuesta (
    id TEXT PRIMARY KEY,
    datos_udae_id TEXT NOT NULL UNIQUE REFERENCES datos_udae(id),
    cargo_existe TEXT NOT NULL,
    tipo_novedad TEXT NOT NULL DEFAULT '',
    tipo_traslado TEXT NOT NULL DEFAULT '',
    despacho_traslado_destino_id TEXT NOT NULL DEFAULT '',
    acto_traslado_id TEXT NOT NULL DEFAULT '',
    observaciones_novedad TEXT NOT NULL DEFAULT '',
    observaciones_despacho TEXT NOT NULL DEFAULT '',
    observaciones_clasificacion TEXT NOT NULL DEFAULT '',
    tiene_servidor_prop INTEGER NOT NULL DEFAULT 0,
    tipo_documento TEXT NOT NULL DEFAULT '',
    documento TEXT NOT NULL DEFAULT '',
    nombres TEXT NOT NULL DEFAULT '',
    apellidos TEXT NOT NULL DEFAULT '',
    nivel_escolaridad TEXT NOT NULL DEFAULT '',
    familiares_dependientes INTEGER NOT NULL DEFAULT 0,
    profesion1 TEXT NOT NULL DEFAULT '',
    profesion2 TEXT NOT NULL DEFAULT '',
    profesion3 TEXT NOT NULL DEFAULT '',
    tiene_servidor_prov INTEGER NOT NULL DEFAULT 0,
    tipo_documento_prov TEXT NOT NULL DEFAULT '',
    documento_prov TEXT NOT NULL DEFAULT '',
    nombres_prov TEXT NOT NULL DEFAULT '',
    apellidos_prov TEXT NOT NULL DEFAULT '',
    nivel_escolaridad_prov TEXT NOT NULL DEFAULT '',
    familiares_dependientes_prov INTEGER NOT NULL DEFAULT 0,
    profesion1_prov TEXT NOT NULL DEFAULT '',
    profesion2_prov TEXT NOT NULL DEFAULT '',
    profesion3_prov TEXT NOT NULL DEFAULT '',
    user_id TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS despachos (
    id TEXT PRIMARY KEY,
    codigo TEXT NOT NULL DEFAULT '',
    nombre TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT ''
);
"#;
