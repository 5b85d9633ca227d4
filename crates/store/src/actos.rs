//! Act-linkage persistence. One linkage per UDAE row, mutable in place.

use rusqlite::{params, OptionalExtension};

use planta_core::{EnlaceActo, Result};

use crate::{filas, sql_err, Store};

impl Store {
    /// Upsert the act linkage for a UDAE row. An existing linkage keeps its
    /// row identity; only its values change.
    pub fn guardar_enlace_acto(&mut self, enlace: &EnlaceActo) -> Result<()> {
        self.conn()
            .execute(
                "INSERT INTO enlaces_acto (id, datos_udae_id, acto_administrativo_id,
                     articulo, literal, numeral, perfil_cargo, acto_correcto,
                     user_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 ON CONFLICT(datos_udae_id) DO UPDATE SET
                     acto_administrativo_id = excluded.acto_administrativo_id,
                     articulo = excluded.articulo,
                     literal = excluded.literal,
                     numeral = excluded.numeral,
                     perfil_cargo = excluded.perfil_cargo,
                     acto_correcto = excluded.acto_correcto,
                     user_id = excluded.user_id",
                params![
                    enlace.id,
                    enlace.datos_udae_id,
                    enlace.acto_administrativo_id,
                    enlace.articulo,
                    enlace.literal,
                    enlace.numeral,
                    enlace.perfil_cargo,
                    enlace.acto_correcto as i64,
                    enlace.user_id,
                    enlace.created_at,
                ],
            )
            .map_err(sql_err)?;
        Ok(())
    }

    pub fn enlace_acto_por_udae(&self, udae_id: &str) -> Result<Option<EnlaceActo>> {
        self.conn()
            .query_row(
                "SELECT * FROM enlaces_acto WHERE datos_udae_id = ?1",
                params![udae_id],
                |r| filas::enlace_acto(r),
            )
            .optional()
            .map_err(sql_err)
    }

    /// Delete an act linkage by id. Idempotent: deleting a linkage that does
    /// not exist is a no-op.
    pub fn quitar_enlace_acto(&mut self, id: &str) -> Result<()> {
        self.conn()
            .execute("DELETE FROM enlaces_acto WHERE id = ?1", params![id])
            .map_err(sql_err)?;
        Ok(())
    }
}
