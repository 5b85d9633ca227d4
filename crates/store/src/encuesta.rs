//! Survey persistence. One record per UDAE row, replaced wholesale on save.

use rusqlite::{params, OptionalExtension};

use planta_core::{DatosEncuesta, Result};

use crate::{filas, sql_err, Store};

impl Store {
    /// Replace the survey record for `encuesta.datos_udae_id`: delete any
    /// previous record and insert the new one in a single transaction.
    pub fn guardar_encuesta(&mut self, encuesta: &DatosEncuesta) -> Result<()> {
        let prop = encuesta.servidor_propiedad.clone().unwrap_or_default();
        let prov = encuesta.servidor_provisionalidad.clone().unwrap_or_default();

        let tx = self.conn_mut().transaction().map_err(sql_err)?;
        tx.execute(
            "DELETE FROM datos_encuesta WHERE datos_udae_id = ?1",
            params![encuesta.datos_udae_id],
        )
        .map_err(sql_err)?;
        tx.execute(
            "INSERT INTO datos_encuesta (id, datos_udae_id, cargo_existe, tipo_novedad,
                 tipo_traslado, despacho_traslado_destino_id, acto_traslado_id,
                 observaciones_novedad, observaciones_despacho, observaciones_clasificacion,
                 tiene_servidor_prop, tipo_documento, documento, nombres, apellidos,
                 nivel_escolaridad, familiares_dependientes, profesion1, profesion2, profesion3,
                 tiene_servidor_prov, tipo_documento_prov, documento_prov, nombres_prov,
                 apellidos_prov, nivel_escolaridad_prov, familiares_dependientes_prov,
                 profesion1_prov, profesion2_prov, profesion3_prov, user_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                     ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20,
                     ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31, ?32)",
            params![
                encuesta.id,
                encuesta.datos_udae_id,
                encuesta.cargo_existe.to_string(),
                encuesta.tipo_novedad,
                encuesta.tipo_traslado,
                encuesta.despacho_traslado_destino_id,
                encuesta.acto_traslado_id,
                encuesta.observaciones_novedad,
                encuesta.observaciones_despacho,
                encuesta.observaciones_clasificacion,
                encuesta.tiene_servidor_prop as i64,
                prop.tipo_documento,
                prop.documento,
                prop.nombres,
                prop.apellidos,
                prop.nivel_escolaridad,
                prop.familiares_dependientes,
                prop.profesion1,
                prop.profesion2,
                prop.profesion3,
                encuesta.tiene_servidor_prov as i64,
                prov.tipo_documento,
                prov.documento,
                prov.nombres,
                prov.apellidos,
                prov.nivel_escolaridad,
                prov.familiares_dependientes,
                prov.profesion1,
                prov.profesion2,
                prov.profesion3,
                encuesta.user_id,
                encuesta.created_at,
            ],
        )
        .map_err(sql_err)?;
        tx.commit().map_err(sql_err)
    }

    pub fn encuesta_por_udae(&self, udae_id: &str) -> Result<Option<DatosEncuesta>> {
        self.conn()
            .query_row(
                "SELECT * FROM datos_encuesta WHERE datos_udae_id = ?1",
                params![udae_id],
                |r| filas::encuesta(r),
            )
            .optional()
            .map_err(sql_err)
    }
}
