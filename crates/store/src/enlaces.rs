//! Registry link confirmation.
//!
//! The existence and already-linked pre-checks run inside the same immediate
//! transaction as the insert, so a concurrent confirm against either side
//! resolves at the UNIQUE constraint: exactly one attempt commits, the other
//! maps to [`Error::AlreadyLinked`].

use rusqlite::{params, OptionalExtension, Transaction, TransactionBehavior};

use planta_core::{EnlaceCsj, EnlaceDeaj, Error, Result};

use crate::{ahora, nuevo_id, sql_err, Store};

impl Store {
    /// Confirm a UDAE ↔ CSJ pair. Irreversible.
    pub fn crear_enlace_csj(
        &mut self,
        udae_id: &str,
        csj_id: &str,
        user_id: &str,
    ) -> Result<EnlaceCsj> {
        let enlace = EnlaceCsj {
            id: nuevo_id(),
            datos_udae_id: udae_id.to_string(),
            datos_csj_id: csj_id.to_string(),
            user_id: user_id.to_string(),
            created_at: ahora(),
        };

        let tx = self
            .conn_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(sql_err)?;

        verificar_existe(&tx, "datos_udae", "datos UDAE", udae_id)?;
        verificar_existe(&tx, "datos_csj", "registro CSJ", csj_id)?;
        verificar_sin_enlace(&tx, "enlaces_csj", "datos_udae_id", "UDAE row", udae_id)?;
        verificar_sin_enlace(&tx, "enlaces_csj", "datos_csj_id", "CSJ row", csj_id)?;

        tx.execute(
            "INSERT INTO enlaces_csj (id, datos_udae_id, datos_csj_id, user_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                enlace.id,
                enlace.datos_udae_id,
                enlace.datos_csj_id,
                enlace.user_id,
                enlace.created_at
            ],
        )
        .map_err(mapear_insercion)?;

        tx.commit().map_err(sql_err)?;
        Ok(enlace)
    }

    /// Confirm a UDAE ↔ DEAJ pair. Irreversible.
    pub fn crear_enlace_deaj(
        &mut self,
        udae_id: &str,
        deaj_id: &str,
        user_id: &str,
    ) -> Result<EnlaceDeaj> {
        let enlace = EnlaceDeaj {
            id: nuevo_id(),
            datos_udae_id: udae_id.to_string(),
            datos_deaj_id: deaj_id.to_string(),
            user_id: user_id.to_string(),
            created_at: ahora(),
        };

        let tx = self
            .conn_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(sql_err)?;

        verificar_existe(&tx, "datos_udae", "datos UDAE", udae_id)?;
        verificar_existe(&tx, "datos_deaj", "registro DEAJ", deaj_id)?;
        verificar_sin_enlace(&tx, "enlaces_deaj", "datos_udae_id", "UDAE row", udae_id)?;
        verificar_sin_enlace(&tx, "enlaces_deaj", "datos_deaj_id", "DEAJ row", deaj_id)?;

        tx.execute(
            "INSERT INTO enlaces_deaj (id, datos_udae_id, datos_deaj_id, user_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                enlace.id,
                enlace.datos_udae_id,
                enlace.datos_deaj_id,
                enlace.user_id,
                enlace.created_at
            ],
        )
        .map_err(mapear_insercion)?;

        tx.commit().map_err(sql_err)?;
        Ok(enlace)
    }
}

fn verificar_existe(tx: &Transaction, tabla: &str, entidad: &'static str, id: &str) -> Result<()> {
    let existe: Option<i64> = tx
        .query_row(
            &format!("SELECT 1 FROM {tabla} WHERE id = ?1"),
            params![id],
            |r| r.get(0),
        )
        .optional()
        .map_err(sql_err)?;
    if existe.is_none() {
        return Err(Error::not_found(entidad, id));
    }
    Ok(())
}

fn verificar_sin_enlace(
    tx: &Transaction,
    tabla: &str,
    columna: &str,
    lado: &str,
    id: &str,
) -> Result<()> {
    let existe: Option<i64> = tx
        .query_row(
            &format!("SELECT 1 FROM {tabla} WHERE {columna} = ?1"),
            params![id],
            |r| r.get(0),
        )
        .optional()
        .map_err(sql_err)?;
    if existe.is_some() {
        return Err(Error::AlreadyLinked(format!("{lado} '{id}' already has a link")));
    }
    Ok(())
}

/// An insert that fails on a UNIQUE constraint lost a confirm race: the
/// pre-checks passed but another transaction committed first.
fn mapear_insercion(e: rusqlite::Error) -> Error {
    match &e {
        rusqlite::Error::SqliteFailure(f, _)
            if f.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Error::AlreadyLinked("row was linked by a concurrent confirm".into())
        }
        _ => sql_err(e),
    }
}
