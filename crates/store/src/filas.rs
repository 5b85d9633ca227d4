//! Row → entity mappers. Column order follows each table's schema.

use chrono::NaiveDate;
use rusqlite::Row;

use planta_core::{
    ActoAdministrativo, CargoExiste, ClaseNombramiento, DatosCsj, DatosDeaj, DatosEncuesta,
    DatosUdae, Despacho, EnlaceActo, EstadoCsj, ServidorInfo, TipoActo,
};

pub fn udae(row: &Row) -> rusqlite::Result<DatosUdae> {
    Ok(DatosUdae {
        id: row.get("id")?,
        numero: row.get("numero")?,
        jurisdiccion: row.get("jurisdiccion")?,
        distrito_judicial: row.get("distrito_judicial")?,
        circuito_judicial: row.get("circuito_judicial")?,
        municipio_sede_fisica: row.get("municipio_sede_fisica")?,
        nombre_despacho: row.get("nombre_despacho")?,
        descripcion_cargo: row.get("descripcion_cargo")?,
        grado_cargo: row.get("grado_cargo")?,
        especialidad: row.get("especialidad")?,
        tipo_acto_administrativo: row.get("tipo_acto_administrativo")?,
        anio_acto_administrativo: row.get("anio_acto_administrativo")?,
        numero_acto_administrativo: row.get("numero_acto_administrativo")?,
    })
}

pub fn csj(row: &Row) -> rusqlite::Result<DatosCsj> {
    let estado: String = row.get("estado_actual")?;
    Ok(DatosCsj {
        id: row.get("id")?,
        numero: row.get("numero")?,
        codigo_despacho: row.get("codigo_despacho")?,
        municipio: row.get("municipio")?,
        despacho: row.get("despacho")?,
        cargo: row.get("cargo")?,
        grado: row.get("grado")?,
        estado_actual: EstadoCsj::parse(&estado),
        propiedad: row.get("propiedad")?,
        cedula: row.get("cedula")?,
        observaciones: row.get("observaciones")?,
    })
}

pub fn deaj(row: &Row) -> rusqlite::Result<DatosDeaj> {
    let clase: String = row.get("clase_nombramiento")?;
    let fecha: Option<String> = row.get("fecha_terminacion")?;
    Ok(DatosDeaj {
        id: row.get("id")?,
        numero: row.get("numero")?,
        sede: row.get("sede")?,
        dependencia: row.get("dependencia")?,
        cargo: row.get("cargo")?,
        servidor: row.get("servidor")?,
        num_documento: row.get("num_documento")?,
        clase_nombramiento: ClaseNombramiento::parse(&clase),
        fecha_terminacion: fecha.and_then(|f| NaiveDate::parse_from_str(&f, "%Y-%m-%d").ok()),
    })
}

pub fn acto(row: &Row) -> rusqlite::Result<ActoAdministrativo> {
    let tipo: String = row.get("tipo")?;
    Ok(ActoAdministrativo {
        id: row.get("id")?,
        // Acts are validated on save; an unparseable stored value means the
        // file was edited outside the application.
        tipo: TipoActo::parse(&tipo).unwrap_or(TipoActo::Acuerdo),
        anio: row.get("anio")?,
        numero: row.get("numero")?,
        url: row.get("url")?,
    })
}

pub fn enlace_acto(row: &Row) -> rusqlite::Result<EnlaceActo> {
    Ok(EnlaceActo {
        id: row.get("id")?,
        datos_udae_id: row.get("datos_udae_id")?,
        acto_administrativo_id: row.get("acto_administrativo_id")?,
        articulo: row.get("articulo")?,
        literal: row.get("literal")?,
        numeral: row.get("numeral")?,
        perfil_cargo: row.get("perfil_cargo")?,
        acto_correcto: row.get::<_, i64>("acto_correcto")? != 0,
        user_id: row.get("user_id")?,
        created_at: row.get("created_at")?,
    })
}

pub fn encuesta(row: &Row) -> rusqlite::Result<DatosEncuesta> {
    let cargo_existe: String = row.get("cargo_existe")?;
    let tiene_prop = row.get::<_, i64>("tiene_servidor_prop")? != 0;
    let tiene_prov = row.get::<_, i64>("tiene_servidor_prov")? != 0;

    let servidor_propiedad = if tiene_prop {
        Some(ServidorInfo {
            tipo_documento: row.get("tipo_documento")?,
            documento: row.get("documento")?,
            nombres: row.get("nombres")?,
            apellidos: row.get("apellidos")?,
            nivel_escolaridad: row.get("nivel_escolaridad")?,
            familiares_dependientes: row.get("familiares_dependientes")?,
            profesion1: row.get("profesion1")?,
            profesion2: row.get("profesion2")?,
            profesion3: row.get("profesion3")?,
        })
    } else {
        None
    };

    let servidor_provisionalidad = if tiene_prov {
        Some(ServidorInfo {
            tipo_documento: row.get("tipo_documento_prov")?,
            documento: row.get("documento_prov")?,
            nombres: row.get("nombres_prov")?,
            apellidos: row.get("apellidos_prov")?,
            nivel_escolaridad: row.get("nivel_escolaridad_prov")?,
            familiares_dependientes: row.get("familiares_dependientes_prov")?,
            profesion1: row.get("profesion1_prov")?,
            profesion2: row.get("profesion2_prov")?,
            profesion3: row.get("profesion3_prov")?,
        })
    } else {
        None
    };

    Ok(DatosEncuesta {
        id: row.get("id")?,
        datos_udae_id: row.get("datos_udae_id")?,
        cargo_existe: CargoExiste::parse(&cargo_existe).unwrap_or(CargoExiste::Si),
        tipo_novedad: row.get("tipo_novedad")?,
        tipo_traslado: row.get("tipo_traslado")?,
        despacho_traslado_destino_id: row.get("despacho_traslado_destino_id")?,
        acto_traslado_id: row.get("acto_traslado_id")?,
        observaciones_novedad: row.get("observaciones_novedad")?,
        observaciones_despacho: row.get("observaciones_despacho")?,
        observaciones_clasificacion: row.get("observaciones_clasificacion")?,
        tiene_servidor_prop: tiene_prop,
        servidor_propiedad,
        tiene_servidor_prov: tiene_prov,
        servidor_provisionalidad,
        user_id: row.get("user_id")?,
        created_at: row.get("created_at")?,
    })
}

pub fn despacho(row: &Row) -> rusqlite::Result<Despacho> {
    Ok(Despacho {
        id: row.get("id")?,
        codigo: row.get("codigo")?,
        nombre: row.get("nombre")?,
        email: row.get("email")?,
    })
}
