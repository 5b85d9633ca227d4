//! Read queries for the pairing engine, the consolidation projection and the
//! progress aggregator.

use std::collections::HashMap;

use planta_core::{DatosCsj, DatosDeaj, DatosUdae, RegistroCompleto, Result};

use crate::{filas, sql_err, Store};

/// Per-office roll-up used by the incomplete-office report.
#[derive(Debug, Clone)]
pub struct ResumenDespacho {
    pub nombre_despacho: String,
    pub total_cargos: i64,
    pub con_encuesta: i64,
}

/// Raw counters behind the progress percentages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConteosAvance {
    pub total_udae: i64,
    pub enlaces_csj: i64,
    pub enlaces_deaj: i64,
    /// DEAJ rows in Provisionalidad, the denominator for the DEAJ
    /// percentage. Not the UDAE total.
    pub deaj_elegibles: i64,
    pub enlaces_acto: i64,
    pub encuestas: i64,
}

impl Store {
    /// UDAE rows with no CSJ link, in pairing order.
    pub fn udae_sin_enlace_csj(&self) -> Result<Vec<DatosUdae>> {
        self.udae_sin_enlace("enlaces_csj")
    }

    /// UDAE rows with no DEAJ link, in pairing order.
    pub fn udae_sin_enlace_deaj(&self) -> Result<Vec<DatosUdae>> {
        self.udae_sin_enlace("enlaces_deaj")
    }

    fn udae_sin_enlace(&self, tabla_enlace: &str) -> Result<Vec<DatosUdae>> {
        let sql = format!(
            "SELECT u.* FROM datos_udae u
             WHERE NOT EXISTS (SELECT 1 FROM {tabla_enlace} e WHERE e.datos_udae_id = u.id)
             ORDER BY u.municipio_sede_fisica, u.nombre_despacho, u.descripcion_cargo"
        );
        let mut stmt = self.conn().prepare(&sql).map_err(sql_err)?;
        let filas = stmt
            .query_map([], |r| filas::udae(r))
            .map_err(sql_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_err)?;
        Ok(filas)
    }

    /// CSJ rows with no link, in the registry's own natural order.
    pub fn csj_sin_enlace(&self) -> Result<Vec<DatosCsj>> {
        let mut stmt = self
            .conn()
            .prepare(
                "SELECT c.* FROM datos_csj c
                 WHERE NOT EXISTS (SELECT 1 FROM enlaces_csj e WHERE e.datos_csj_id = c.id)
                 ORDER BY c.municipio, c.despacho, c.cargo",
            )
            .map_err(sql_err)?;
        let filas = stmt
            .query_map([], |r| filas::csj(r))
            .map_err(sql_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_err)?;
        Ok(filas)
    }

    /// DEAJ rows with no link, in the registry's own natural order.
    pub fn deaj_sin_enlace(&self) -> Result<Vec<DatosDeaj>> {
        let mut stmt = self
            .conn()
            .prepare(
                "SELECT d.* FROM datos_deaj d
                 WHERE NOT EXISTS (SELECT 1 FROM enlaces_deaj e WHERE e.datos_deaj_id = d.id)
                 ORDER BY d.sede, d.dependencia, d.cargo",
            )
            .map_err(sql_err)?;
        let filas = stmt
            .query_map([], |r| filas::deaj(r))
            .map_err(sql_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_err)?;
        Ok(filas)
    }

    /// Every UDAE row holding at least one registry link, with all linked and
    /// optional child records resolved. The projection recomputes from this
    /// on every call; nothing here is cached.
    pub fn registros_completos(&self) -> Result<Vec<RegistroCompleto>> {
        let mut stmt = self
            .conn()
            .prepare(
                "SELECT u.* FROM datos_udae u
                 WHERE EXISTS (SELECT 1 FROM enlaces_csj e WHERE e.datos_udae_id = u.id)
                    OR EXISTS (SELECT 1 FROM enlaces_deaj e WHERE e.datos_udae_id = u.id)
                 ORDER BY u.numero",
            )
            .map_err(sql_err)?;
        let udaes = stmt
            .query_map([], |r| filas::udae(r))
            .map_err(sql_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_err)?;

        // One pass per child table, joined in memory by udae id.
        let csj_por_udae = self.mapa_csj()?;
        let deaj_por_udae = self.mapa_deaj()?;

        let mut registros = Vec::with_capacity(udaes.len());
        for udae in udaes {
            let enlace_acto = self.enlace_acto_por_udae(&udae.id)?;
            let acto = match &enlace_acto {
                Some(e) => self.acto_por_id(&e.acto_administrativo_id)?,
                None => None,
            };
            let encuesta = self.encuesta_por_udae(&udae.id)?;
            registros.push(RegistroCompleto {
                csj: csj_por_udae.get(&udae.id).cloned(),
                deaj: deaj_por_udae.get(&udae.id).cloned(),
                enlace_acto,
                acto,
                encuesta,
                udae,
            });
        }
        Ok(registros)
    }

    fn mapa_csj(&self) -> Result<HashMap<String, DatosCsj>> {
        let mut stmt = self
            .conn()
            .prepare(
                "SELECT e.datos_udae_id AS udae_id, c.*
                 FROM enlaces_csj e JOIN datos_csj c ON c.id = e.datos_csj_id",
            )
            .map_err(sql_err)?;
        let pares = stmt
            .query_map([], |r| Ok((r.get::<_, String>("udae_id")?, filas::csj(r)?)))
            .map_err(sql_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_err)?;
        Ok(pares.into_iter().collect())
    }

    fn mapa_deaj(&self) -> Result<HashMap<String, DatosDeaj>> {
        let mut stmt = self
            .conn()
            .prepare(
                "SELECT e.datos_udae_id AS udae_id, d.*
                 FROM enlaces_deaj e JOIN datos_deaj d ON d.id = e.datos_deaj_id",
            )
            .map_err(sql_err)?;
        let pares = stmt
            .query_map([], |r| Ok((r.get::<_, String>("udae_id")?, filas::deaj(r)?)))
            .map_err(sql_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_err)?;
        Ok(pares.into_iter().collect())
    }

    /// Raw progress counters in one sweep.
    pub fn conteos_avance(&self) -> Result<ConteosAvance> {
        let contar = |sql: &str| -> Result<i64> {
            self.conn()
                .query_row(sql, [], |r| r.get(0))
                .map_err(sql_err)
        };
        Ok(ConteosAvance {
            total_udae: contar("SELECT COUNT(*) FROM datos_udae")?,
            enlaces_csj: contar("SELECT COUNT(*) FROM enlaces_csj")?,
            enlaces_deaj: contar("SELECT COUNT(*) FROM enlaces_deaj")?,
            deaj_elegibles: contar(
                "SELECT COUNT(*) FROM datos_deaj WHERE clase_nombramiento = 'Provisionalidad'",
            )?,
            enlaces_acto: contar("SELECT COUNT(*) FROM enlaces_acto")?,
            encuestas: contar("SELECT COUNT(*) FROM datos_encuesta")?,
        })
    }

    /// Positions and collected surveys grouped by office name.
    pub fn resumen_despachos(&self) -> Result<Vec<ResumenDespacho>> {
        let mut stmt = self
            .conn()
            .prepare(
                "SELECT u.nombre_despacho,
                        COUNT(*) AS total_cargos,
                        COUNT(e.id) AS con_encuesta
                 FROM datos_udae u
                 LEFT JOIN datos_encuesta e ON e.datos_udae_id = u.id
                 GROUP BY u.nombre_despacho
                 ORDER BY u.nombre_despacho",
            )
            .map_err(sql_err)?;
        let filas = stmt
            .query_map([], |r| {
                Ok(ResumenDespacho {
                    nombre_despacho: r.get(0)?,
                    total_cargos: r.get(1)?,
                    con_encuesta: r.get(2)?,
                })
            })
            .map_err(sql_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_err)?;
        Ok(filas)
    }
}
