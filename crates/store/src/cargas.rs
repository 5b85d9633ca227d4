//! Bulk loaders and simple reads for the registry entities.

use rusqlite::{params, OptionalExtension};

use planta_core::{
    ActoAdministrativo, DatosCsj, DatosDeaj, DatosUdae, Despacho, Error, Result,
};

use crate::{filas, sql_err, Store};

impl Store {
    /// Bulk-load UDAE rows inside one transaction.
    pub fn cargar_udae(&mut self, filas: &[DatosUdae]) -> Result<()> {
        let tx = self.conn_mut().transaction().map_err(sql_err)?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO datos_udae (id, numero, jurisdiccion, distrito_judicial,
                         circuito_judicial, municipio_sede_fisica, nombre_despacho,
                         descripcion_cargo, grado_cargo, especialidad,
                         tipo_acto_administrativo, anio_acto_administrativo,
                         numero_acto_administrativo)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                )
                .map_err(sql_err)?;
            for f in filas {
                stmt.execute(params![
                    f.id,
                    f.numero,
                    f.jurisdiccion,
                    f.distrito_judicial,
                    f.circuito_judicial,
                    f.municipio_sede_fisica,
                    f.nombre_despacho,
                    f.descripcion_cargo,
                    f.grado_cargo,
                    f.especialidad,
                    f.tipo_acto_administrativo,
                    f.anio_acto_administrativo,
                    f.numero_acto_administrativo,
                ])
                .map_err(sql_err)?;
            }
        }
        tx.commit().map_err(sql_err)
    }

    /// Bulk-load CSJ rows inside one transaction.
    pub fn cargar_csj(&mut self, filas: &[DatosCsj]) -> Result<()> {
        let tx = self.conn_mut().transaction().map_err(sql_err)?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO datos_csj (id, numero, codigo_despacho, municipio, despacho,
                         cargo, grado, estado_actual, propiedad, cedula, observaciones)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                )
                .map_err(sql_err)?;
            for f in filas {
                stmt.execute(params![
                    f.id,
                    f.numero,
                    f.codigo_despacho,
                    f.municipio,
                    f.despacho,
                    f.cargo,
                    f.grado,
                    f.estado_actual.to_string(),
                    f.propiedad,
                    f.cedula,
                    f.observaciones,
                ])
                .map_err(sql_err)?;
            }
        }
        tx.commit().map_err(sql_err)
    }

    /// Bulk-load DEAJ rows inside one transaction.
    pub fn cargar_deaj(&mut self, filas: &[DatosDeaj]) -> Result<()> {
        let tx = self.conn_mut().transaction().map_err(sql_err)?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO datos_deaj (id, numero, sede, dependencia, cargo, servidor,
                         num_documento, clase_nombramiento, fecha_terminacion)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                )
                .map_err(sql_err)?;
            for f in filas {
                stmt.execute(params![
                    f.id,
                    f.numero,
                    f.sede,
                    f.dependencia,
                    f.cargo,
                    f.servidor,
                    f.num_documento,
                    f.clase_nombramiento.to_string(),
                    f.fecha_terminacion.map(|d| d.to_string()),
                ])
                .map_err(sql_err)?;
            }
        }
        tx.commit().map_err(sql_err)
    }

    /// Bulk-load office contact records inside one transaction.
    pub fn cargar_despachos(&mut self, filas: &[Despacho]) -> Result<()> {
        let tx = self.conn_mut().transaction().map_err(sql_err)?;
        {
            let mut stmt = tx
                .prepare("INSERT INTO despachos (id, codigo, nombre, email) VALUES (?1, ?2, ?3, ?4)")
                .map_err(sql_err)?;
            for f in filas {
                stmt.execute(params![f.id, f.codigo, f.nombre, f.email])
                    .map_err(sql_err)?;
            }
        }
        tx.commit().map_err(sql_err)
    }

    /// Create or update an administrative act (upsert by id).
    pub fn guardar_acto(&mut self, acto: &ActoAdministrativo) -> Result<()> {
        self.conn()
            .execute(
                "INSERT INTO actos_administrativos (id, tipo, anio, numero, url)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(id) DO UPDATE SET
                     tipo = excluded.tipo, anio = excluded.anio,
                     numero = excluded.numero, url = excluded.url",
                params![acto.id, acto.tipo.to_string(), acto.anio, acto.numero, acto.url],
            )
            .map_err(sql_err)?;
        Ok(())
    }

    /// Delete an act. Blocked while act linkages or survey transfer
    /// citations still reference it.
    pub fn quitar_acto(&mut self, id: &str) -> Result<()> {
        let enlaces: i64 = self
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM enlaces_acto WHERE acto_administrativo_id = ?1",
                params![id],
                |r| r.get(0),
            )
            .map_err(sql_err)?;
        let traslados: i64 = self
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM datos_encuesta WHERE acto_traslado_id = ?1",
                params![id],
                |r| r.get(0),
            )
            .map_err(sql_err)?;
        if enlaces > 0 || traslados > 0 {
            return Err(Error::ReferentialConflict(format!(
                "acto '{id}' is referenced by {enlaces} enlace(s) and {traslados} traslado(s)"
            )));
        }

        let borrados = self
            .conn()
            .execute("DELETE FROM actos_administrativos WHERE id = ?1", params![id])
            .map_err(sql_err)?;
        if borrados == 0 {
            return Err(Error::not_found("acto administrativo", id));
        }
        Ok(())
    }

    pub fn udae_por_id(&self, id: &str) -> Result<Option<DatosUdae>> {
        self.conn()
            .query_row("SELECT * FROM datos_udae WHERE id = ?1", params![id], |r| {
                filas::udae(r)
            })
            .optional()
            .map_err(sql_err)
    }

    pub fn csj_por_id(&self, id: &str) -> Result<Option<DatosCsj>> {
        self.conn()
            .query_row("SELECT * FROM datos_csj WHERE id = ?1", params![id], |r| {
                filas::csj(r)
            })
            .optional()
            .map_err(sql_err)
    }

    pub fn deaj_por_id(&self, id: &str) -> Result<Option<DatosDeaj>> {
        self.conn()
            .query_row("SELECT * FROM datos_deaj WHERE id = ?1", params![id], |r| {
                filas::deaj(r)
            })
            .optional()
            .map_err(sql_err)
    }

    pub fn acto_por_id(&self, id: &str) -> Result<Option<ActoAdministrativo>> {
        self.conn()
            .query_row(
                "SELECT * FROM actos_administrativos WHERE id = ?1",
                params![id],
                |r| filas::acto(r),
            )
            .optional()
            .map_err(sql_err)
    }

    /// All acts, most recent first.
    pub fn listar_actos(&self) -> Result<Vec<ActoAdministrativo>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT * FROM actos_administrativos ORDER BY anio DESC, numero DESC")
            .map_err(sql_err)?;
        let actos = stmt
            .query_map([], |r| filas::acto(r))
            .map_err(sql_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_err)?;
        Ok(actos)
    }

    /// All office contact records, by name.
    pub fn listar_despachos(&self) -> Result<Vec<Despacho>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT * FROM despachos ORDER BY nombre ASC")
            .map_err(sql_err)?;
        let despachos = stmt
            .query_map([], |r| filas::despacho(r))
            .map_err(sql_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_err)?;
        Ok(despachos)
    }
}
