//! `planta-store`: SQLite persistence for the roster registries, links,
//! act linkages and survey records.
//!
//! Every multi-statement write runs inside a transaction; link uniqueness is
//! enforced by the schema, not by application code.

use std::path::Path;

use rusqlite::Connection;

use planta_core::{Error, Result};

mod actos;
mod cargas;
mod consultas;
mod encuesta;
mod enlaces;
mod esquema;
mod filas;

pub use consultas::{ConteosAvance, ResumenDespacho};

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if needed) a roster database at `path`.
    pub fn abrir(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(Error::storage)?;
        Self::preparar(conn)
    }

    /// Fresh in-memory database. Used by tests and dry runs.
    pub fn en_memoria() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(Error::storage)?;
        Self::preparar(conn)
    }

    fn preparar(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(Error::storage)?;
        // Concurrent confirm attempts from separate connections block on the
        // write lock instead of failing immediately.
        conn.busy_timeout(std::time::Duration::from_secs(5))
            .map_err(Error::storage)?;
        conn.execute_batch(esquema::SCHEMA).map_err(Error::storage)?;
        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

/// Fresh id for a newly created row.
pub fn nuevo_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Creation timestamp recorded on links and survey rows.
pub(crate) fn ahora() -> String {
    chrono::Utc::now().to_rfc3339()
}

pub(crate) fn sql_err(e: rusqlite::Error) -> Error {
    Error::storage(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planta_core::{DatosCsj, DatosDeaj, DatosEncuesta, DatosUdae, EnlaceActo, Error};

    fn udae(id: &str, numero: i64) -> DatosUdae {
        DatosUdae {
            id: id.into(),
            numero,
            municipio_sede_fisica: "Tunja".into(),
            nombre_despacho: "Juzgado 1 Civil".into(),
            descripcion_cargo: "Juez".into(),
            ..DatosUdae::default()
        }
    }

    fn csj(id: &str) -> DatosCsj {
        DatosCsj { id: id.into(), numero: 1, municipio: "Tunja".into(), ..DatosCsj::default() }
    }

    fn deaj(id: &str) -> DatosDeaj {
        DatosDeaj { id: id.into(), numero: 1, sede: "Tunja".into(), ..DatosDeaj::default() }
    }

    fn store_con_datos() -> Store {
        let mut store = Store::en_memoria().unwrap();
        store.cargar_udae(&[udae("u1", 1), udae("u2", 2)]).unwrap();
        store.cargar_csj(&[csj("c1"), csj("c2")]).unwrap();
        store.cargar_deaj(&[deaj("d1")]).unwrap();
        store
    }

    #[test]
    fn enlace_csj_unico_por_ambos_lados() {
        let mut store = store_con_datos();
        store.crear_enlace_csj("u1", "c1", "op1").unwrap();

        let err = store.crear_enlace_csj("u1", "c2", "op2").unwrap_err();
        assert!(matches!(err, Error::AlreadyLinked(_)), "udae side: {err}");

        let err = store.crear_enlace_csj("u2", "c1", "op2").unwrap_err();
        assert!(matches!(err, Error::AlreadyLinked(_)), "csj side: {err}");

        store.crear_enlace_csj("u2", "c2", "op2").unwrap();
    }

    #[test]
    fn enlace_requiere_filas_existentes() {
        let mut store = store_con_datos();
        let err = store.crear_enlace_csj("u9", "c1", "op1").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        let err = store.crear_enlace_deaj("u1", "d9", "op1").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn candidatos_excluyen_filas_enlazadas() {
        let mut store = store_con_datos();
        assert_eq!(store.udae_sin_enlace_csj().unwrap().len(), 2);
        assert_eq!(store.csj_sin_enlace().unwrap().len(), 2);

        store.crear_enlace_csj("u1", "c1", "op1").unwrap();
        assert_eq!(store.udae_sin_enlace_csj().unwrap().len(), 1);
        assert_eq!(store.csj_sin_enlace().unwrap().len(), 1);
        // The DEAJ candidate sets are unaffected by a CSJ link.
        assert_eq!(store.udae_sin_enlace_deaj().unwrap().len(), 2);
        assert_eq!(store.deaj_sin_enlace().unwrap().len(), 1);
    }

    #[test]
    fn quitar_enlace_acto_es_idempotente() {
        let mut store = store_con_datos();
        store.quitar_enlace_acto("no-existe").unwrap();
    }

    #[test]
    fn encuesta_se_reemplaza_completa() {
        let mut store = store_con_datos();
        let primera = DatosEncuesta {
            id: nuevo_id(),
            datos_udae_id: "u1".into(),
            observaciones_despacho: "primera".into(),
            user_id: "op1".into(),
            created_at: ahora(),
            ..DatosEncuesta::default()
        };
        store.guardar_encuesta(&primera).unwrap();

        let segunda = DatosEncuesta {
            id: nuevo_id(),
            observaciones_despacho: "segunda".into(),
            ..primera.clone()
        };
        store.guardar_encuesta(&segunda).unwrap();

        let guardada = store.encuesta_por_udae("u1").unwrap().unwrap();
        assert_eq!(guardada.id, segunda.id);
        assert_eq!(guardada.observaciones_despacho, "segunda");
    }

    #[test]
    fn quitar_acto_bloqueado_por_referencias() {
        let mut store = store_con_datos();
        store
            .guardar_acto(&planta_core::ActoAdministrativo {
                id: "a1".into(),
                tipo: planta_core::TipoActo::Acuerdo,
                anio: "2020".into(),
                numero: "45".into(),
                url: String::new(),
            })
            .unwrap();
        store
            .guardar_enlace_acto(&EnlaceActo {
                id: nuevo_id(),
                datos_udae_id: "u1".into(),
                acto_administrativo_id: "a1".into(),
                articulo: "1".into(),
                literal: String::new(),
                numeral: String::new(),
                perfil_cargo: String::new(),
                acto_correcto: false,
                user_id: "op1".into(),
                created_at: ahora(),
            })
            .unwrap();

        let err = store.quitar_acto("a1").unwrap_err();
        assert!(matches!(err, Error::ReferentialConflict(_)));

        let enlace_id = store.enlace_acto_por_udae("u1").unwrap().unwrap().id;
        store.quitar_enlace_acto(&enlace_id).unwrap();
        store.quitar_acto("a1").unwrap();
        assert!(store.acto_por_id("a1").unwrap().is_none());
    }
}
