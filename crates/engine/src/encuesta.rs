//! The post-link survey: validation, wholesale save, and the pre-populated
//! edit form.

use planta_core::{
    separar_nombre, ActoAdministrativo, CargoExiste, DatosEncuesta, DatosUdae, Despacho, Error,
    RegistroCompleto, Result, ServidorInfo,
};
use planta_store::{nuevo_id, Store};

/// Input for [`guardar`]. Everything except the identity and audit fields,
/// which the save assigns.
#[derive(Debug, Clone)]
pub struct SolicitudEncuesta {
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
}

/// Data backing the survey form: the position, its current or pre-populated
/// survey record, and the reference lists the transfer fields select from.
#[derive(Debug, Clone)]
pub struct FormularioEncuesta {
    pub udae: DatosUdae,
    pub encuesta: DatosEncuesta,
    pub despachos: Vec<Despacho>,
    pub actos: Vec<ActoAdministrativo>,
}

/// Validate and save a survey record, replacing any previous one for the
/// same position.
pub fn guardar(store: &mut Store, solicitud: &SolicitudEncuesta, user_id: &str) -> Result<DatosEncuesta> {
    if user_id.is_empty() {
        return Err(Error::Validation("operator id must not be empty".into()));
    }
    if solicitud.tiene_servidor_prop && solicitud.servidor_propiedad.is_none() {
        return Err(Error::Validation(
            "servidor en propiedad marked present but no detail given".into(),
        ));
    }
    if solicitud.tiene_servidor_prov && solicitud.servidor_provisionalidad.is_none() {
        return Err(Error::Validation(
            "servidor en provisionalidad marked present but no detail given".into(),
        ));
    }
    if solicitud.cargo_existe == CargoExiste::SiConNovedad && solicitud.tipo_novedad.trim().is_empty()
    {
        return Err(Error::Validation("tipo de novedad is required for 'Si con novedad'".into()));
    }

    store
        .udae_por_id(&solicitud.datos_udae_id)?
        .ok_or_else(|| Error::not_found("datos UDAE", &solicitud.datos_udae_id))?;
    if !solicitud.acto_traslado_id.is_empty()
        && store.acto_por_id(&solicitud.acto_traslado_id)?.is_none()
    {
        return Err(Error::not_found("acto administrativo", &solicitud.acto_traslado_id));
    }

    let encuesta = DatosEncuesta {
        id: nuevo_id(),
        datos_udae_id: solicitud.datos_udae_id.clone(),
        cargo_existe: solicitud.cargo_existe,
        tipo_novedad: solicitud.tipo_novedad.clone(),
        tipo_traslado: solicitud.tipo_traslado.clone(),
        despacho_traslado_destino_id: solicitud.despacho_traslado_destino_id.clone(),
        acto_traslado_id: solicitud.acto_traslado_id.clone(),
        observaciones_novedad: solicitud.observaciones_novedad.clone(),
        observaciones_despacho: solicitud.observaciones_despacho.clone(),
        observaciones_clasificacion: solicitud.observaciones_clasificacion.clone(),
        tiene_servidor_prop: solicitud.tiene_servidor_prop,
        // A sub-record with its flag off is dropped, not stored.
        servidor_propiedad: solicitud
            .servidor_propiedad
            .clone()
            .filter(|_| solicitud.tiene_servidor_prop),
        tiene_servidor_prov: solicitud.tiene_servidor_prov,
        servidor_provisionalidad: solicitud
            .servidor_provisionalidad
            .clone()
            .filter(|_| solicitud.tiene_servidor_prov),
        user_id: user_id.to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    store.guardar_encuesta(&encuesta)?;
    Ok(encuesta)
}

/// Load the survey form for a position. When no survey has been saved yet the
/// record comes pre-populated from the linked registry rows, so the operator
/// confirms instead of re-typing.
pub fn formulario(store: &Store, udae_id: &str) -> Result<FormularioEncuesta> {
    let udae = store
        .udae_por_id(udae_id)?
        .ok_or_else(|| Error::not_found("datos UDAE", udae_id))?;

    let encuesta = match store.encuesta_por_udae(udae_id)? {
        Some(existente) => existente,
        None => {
            let registro = store
                .registros_completos()?
                .into_iter()
                .find(|r| r.udae.id == udae_id)
                .unwrap_or_default();
            predeterminada(udae_id, &registro)
        }
    };

    Ok(FormularioEncuesta {
        udae,
        encuesta,
        despachos: store.listar_despachos()?,
        actos: store.listar_actos()?,
    })
}

/// Pre-populated survey record for a position with no saved survey. The
/// incumbency flags and person details come from the linked registry rows,
/// using the same selection rules the consolidated projection applies.
fn predeterminada(udae_id: &str, registro: &RegistroCompleto) -> DatosEncuesta {
    let estado_csj = registro.csj.as_ref().map(|c| c.estado_actual);
    let clase_deaj = registro.deaj.as_ref().map(|d| d.clase_nombramiento);

    let tiene_prop = estado_csj.map(|e| e.es_propiedad()).unwrap_or(false)
        || clase_deaj.map(|c| c.es_propiedad()).unwrap_or(false);
    let tiene_prov = clase_deaj
        .map(|c| c == planta_core::ClaseNombramiento::Provisionalidad)
        .unwrap_or(false);

    let servidor_propiedad = tiene_prop.then(|| {
        let nombre = registro
            .csj
            .as_ref()
            .map(|c| c.propiedad.clone())
            .filter(|n| !n.trim().is_empty())
            .or_else(|| registro.deaj.as_ref().map(|d| d.servidor.clone()))
            .unwrap_or_default();
        let partido = separar_nombre(&nombre);
        let documento = registro
            .csj
            .as_ref()
            .map(|c| c.cedula.clone())
            .filter(|c| !c.trim().is_empty())
            .or_else(|| registro.deaj.as_ref().map(|d| d.num_documento.clone()))
            .unwrap_or_default();
        persona(partido.nombres, partido.apellidos, documento)
    });

    let servidor_provisionalidad = tiene_prov.then(|| {
        let deaj = registro.deaj.as_ref();
        let partido = separar_nombre(&deaj.map(|d| d.servidor.clone()).unwrap_or_default());
        let documento = deaj.map(|d| d.num_documento.clone()).unwrap_or_default();
        persona(partido.nombres, partido.apellidos, documento)
    });

    DatosEncuesta {
        datos_udae_id: udae_id.to_string(),
        tiene_servidor_prop: tiene_prop,
        servidor_propiedad,
        tiene_servidor_prov: tiene_prov,
        servidor_provisionalidad,
        ..DatosEncuesta::default()
    }
}

fn persona(nombres: String, apellidos: String, documento: String) -> ServidorInfo {
    let tipo_documento = if documento.trim().is_empty() {
        String::new()
    } else {
        "Cédula de ciudadanía".into()
    };
    ServidorInfo { tipo_documento, documento, nombres, apellidos, ..ServidorInfo::default() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planta_core::{ClaseNombramiento, DatosCsj, DatosDeaj, EstadoCsj};

    fn solicitud_basica() -> SolicitudEncuesta {
        SolicitudEncuesta {
            datos_udae_id: "u1".into(),
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
        }
    }

    fn store_con_udae() -> Store {
        let mut store = Store::en_memoria().unwrap();
        store
            .cargar_udae(&[DatosUdae { id: "u1".into(), numero: 1, ..DatosUdae::default() }])
            .unwrap();
        store
    }

    #[test]
    fn guardar_reemplaza_el_registro_anterior() {
        let mut store = store_con_udae();
        let primero = guardar(&mut store, &solicitud_basica(), "op1").unwrap();

        let mut cambio = solicitud_basica();
        cambio.observaciones_despacho = "sede nueva".into();
        let segundo = guardar(&mut store, &cambio, "op1").unwrap();

        assert_ne!(primero.id, segundo.id);
        let actual = store.encuesta_por_udae("u1").unwrap().unwrap();
        assert_eq!(actual.id, segundo.id);
        assert_eq!(actual.observaciones_despacho, "sede nueva");
    }

    #[test]
    fn bandera_sin_detalle_se_rechaza() {
        let mut store = store_con_udae();
        let mut solicitud = solicitud_basica();
        solicitud.tiene_servidor_prov = true;
        let err = guardar(&mut store, &solicitud, "op1").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn novedad_requiere_tipo() {
        let mut store = store_con_udae();
        let mut solicitud = solicitud_basica();
        solicitud.cargo_existe = CargoExiste::SiConNovedad;
        let err = guardar(&mut store, &solicitud, "op1").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        solicitud.tipo_novedad = "Traslado".into();
        guardar(&mut store, &solicitud, "op1").unwrap();
    }

    #[test]
    fn acto_de_traslado_debe_existir() {
        let mut store = store_con_udae();
        let mut solicitud = solicitud_basica();
        solicitud.acto_traslado_id = "a-falta".into();
        let err = guardar(&mut store, &solicitud, "op1").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn formulario_prellenado_desde_registros_enlazados() {
        let mut store = store_con_udae();
        store
            .cargar_csj(&[DatosCsj {
                id: "c1".into(),
                numero: 1,
                estado_actual: EstadoCsj::Propiedad,
                propiedad: "Juan Carlos Perez Gomez".into(),
                cedula: "80111222".into(),
                ..DatosCsj::default()
            }])
            .unwrap();
        store
            .cargar_deaj(&[DatosDeaj {
                id: "d1".into(),
                numero: 1,
                servidor: "Luz Marina Rojas Pinzon".into(),
                num_documento: "52123456".into(),
                clase_nombramiento: ClaseNombramiento::Provisionalidad,
                ..DatosDeaj::default()
            }])
            .unwrap();
        store.crear_enlace_csj("u1", "c1", "op1").unwrap();
        store.crear_enlace_deaj("u1", "d1", "op1").unwrap();

        let form = formulario(&store, "u1").unwrap();
        assert!(form.encuesta.tiene_servidor_prop);
        assert!(form.encuesta.tiene_servidor_prov);

        let prop = form.encuesta.servidor_propiedad.unwrap();
        assert_eq!(prop.nombres, "Juan Carlos");
        assert_eq!(prop.apellidos, "Perez Gomez");
        assert_eq!(prop.documento, "80111222");
        assert_eq!(prop.tipo_documento, "Cédula de ciudadanía");

        let prov = form.encuesta.servidor_provisionalidad.unwrap();
        assert_eq!(prov.nombres, "Luz Marina");
        assert_eq!(prov.documento, "52123456");
    }

    #[test]
    fn formulario_con_encuesta_guardada_la_devuelve() {
        let mut store = store_con_udae();
        let guardada = guardar(&mut store, &solicitud_basica(), "op1").unwrap();
        let form = formulario(&store, "u1").unwrap();
        assert_eq!(form.encuesta.id, guardada.id);
    }
}
