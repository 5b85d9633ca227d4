//! Act linkage: associate a UDAE position with the administrative act that
//! created it, with citation detail.
//!
//! Unlike registry links this association is mutable: the operator can
//! re-point it to another act, correct the citation, or remove it.

use planta_core::{
    ActoAdministrativo, DatosUdae, EnlaceActo, Error, Result, TipoActo,
};
use planta_store::{nuevo_id, Store};

/// Input for [`guardar_enlace`].
#[derive(Debug, Clone)]
pub struct SolicitudEnlaceActo {
    pub datos_udae_id: String,
    pub acto_administrativo_id: String,
    pub articulo: String,
    pub literal: String,
    pub numeral: String,
    pub perfil_cargo: String,
}

/// Data backing the linkage edit form: the position's descriptive and
/// citation fields plus its current linkage, if any. Read-only.
#[derive(Debug, Clone)]
pub struct FormularioEnlaceActo {
    pub udae: DatosUdae,
    pub enlace: Option<EnlaceActo>,
    pub acto: Option<ActoAdministrativo>,
}

/// Create or update the act linkage for a position. An update keeps the
/// linkage's identity and replaces its values.
///
/// `acto_correcto` compares the act's (anio, numero) against the position's
/// denormalized citation; the citation does not record the act's tipo, so
/// tipo is left out of the comparison.
pub fn guardar_enlace(
    store: &mut Store,
    solicitud: &SolicitudEnlaceActo,
    user_id: &str,
) -> Result<EnlaceActo> {
    if solicitud.articulo.trim().is_empty() {
        return Err(Error::Validation("articulo is required".into()));
    }
    if user_id.is_empty() {
        return Err(Error::Validation("operator id must not be empty".into()));
    }

    let udae = store
        .udae_por_id(&solicitud.datos_udae_id)?
        .ok_or_else(|| Error::not_found("datos UDAE", &solicitud.datos_udae_id))?;
    let acto = store
        .acto_por_id(&solicitud.acto_administrativo_id)?
        .ok_or_else(|| Error::not_found("acto administrativo", &solicitud.acto_administrativo_id))?;

    let acto_correcto = acto.anio == udae.anio_acto_administrativo
        && acto.numero == udae.numero_acto_administrativo;

    let existente = store.enlace_acto_por_udae(&udae.id)?;
    let enlace = EnlaceActo {
        id: existente.as_ref().map(|e| e.id.clone()).unwrap_or_else(nuevo_id),
        datos_udae_id: udae.id.clone(),
        acto_administrativo_id: acto.id.clone(),
        articulo: solicitud.articulo.trim().to_string(),
        literal: solicitud.literal.clone(),
        numeral: solicitud.numeral.clone(),
        perfil_cargo: solicitud.perfil_cargo.clone(),
        acto_correcto,
        user_id: user_id.to_string(),
        created_at: existente
            .as_ref()
            .map(|e| e.created_at.clone())
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
    };
    store.guardar_enlace_acto(&enlace)?;
    Ok(enlace)
}

/// Remove an act linkage. Idempotent: removing a linkage that does not exist
/// succeeds.
pub fn quitar_enlace(store: &mut Store, id: &str) -> Result<()> {
    store.quitar_enlace_acto(id)
}

/// Load the edit-form data for a position.
pub fn formulario_edicion(store: &Store, udae_id: &str) -> Result<FormularioEnlaceActo> {
    let udae = store
        .udae_por_id(udae_id)?
        .ok_or_else(|| Error::not_found("datos UDAE", udae_id))?;
    let enlace = store.enlace_acto_por_udae(udae_id)?;
    let acto = match &enlace {
        Some(e) => store.acto_por_id(&e.acto_administrativo_id)?,
        None => None,
    };
    Ok(FormularioEnlaceActo { udae, enlace, acto })
}

/// Propose a default act by matching the position's denormalized citation
/// (tipo, anio, numero) against the act registry. Advisory only; the
/// operator's explicit selection always wins.
pub fn sugerir_acto(store: &Store, udae_id: &str) -> Result<Option<ActoAdministrativo>> {
    let udae = store
        .udae_por_id(udae_id)?
        .ok_or_else(|| Error::not_found("datos UDAE", udae_id))?;
    let tipo = TipoActo::parse(&udae.tipo_acto_administrativo);

    let sugerido = store.listar_actos()?.into_iter().find(|acto| {
        tipo == Some(acto.tipo)
            && acto.anio == udae.anio_acto_administrativo
            && acto.numero == udae.numero_acto_administrativo
    });
    Ok(sugerido)
}

/// Create or update an administrative act. Thin CRUD kept here for the
/// referential-conflict contract around deletion.
pub fn guardar_acto(
    store: &mut Store,
    id: Option<String>,
    tipo: TipoActo,
    anio: &str,
    numero: &str,
    url: &str,
) -> Result<ActoAdministrativo> {
    if anio.trim().is_empty() || numero.trim().is_empty() {
        return Err(Error::Validation("anio and numero are required".into()));
    }
    let acto = ActoAdministrativo {
        id: id.unwrap_or_else(nuevo_id),
        tipo,
        anio: anio.trim().to_string(),
        numero: numero.trim().to_string(),
        url: url.to_string(),
    };
    store.guardar_acto(&acto)?;
    Ok(acto)
}

/// Delete an act. Fails with [`Error::ReferentialConflict`] while linkages or
/// survey transfer citations still reference it.
pub fn quitar_acto(store: &mut Store, id: &str) -> Result<()> {
    store.quitar_acto(id)
}
