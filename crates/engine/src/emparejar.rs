//! The pairing engine: candidate listing and link confirmation.
//!
//! Matching is entirely human-driven. The engine narrows candidates with the
//! operator's filters and executes the confirm as one atomic store write;
//! there is no scoring and no automatic matching. Confirmed registry links
//! are permanent; no unlink operation exists.

use planta_core::{
    catalogo, Columna, DatosCsj, DatosDeaj, DatosUdae, EnlaceCsj, EnlaceDeaj, Error, Result,
};
use planta_store::Store;

use crate::filtro::{filtrar, Filtro};

/// Which comparison registry a pairing operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registro {
    Csj,
    Deaj,
}

impl std::fmt::Display for Registro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csj => write!(f, "CSJ"),
            Self::Deaj => write!(f, "DEAJ"),
        }
    }
}

/// Per-side filter predicates for one listing call.
#[derive(Debug, Clone, Default)]
pub struct Filtros {
    pub udae: Vec<Filtro>,
    pub registro: Vec<Filtro>,
}

/// Comparison-side candidate rows, one variant per registry.
#[derive(Debug)]
pub enum FilasRegistro {
    Csj(Vec<DatosCsj>),
    Deaj(Vec<DatosDeaj>),
}

impl FilasRegistro {
    pub fn len(&self) -> usize {
        match self {
            Self::Csj(v) => v.len(),
            Self::Deaj(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The two candidate sets for one registry, already filtered, plus the
/// column descriptors each side renders with.
#[derive(Debug)]
pub struct Emparejamiento {
    pub datos_udae: Vec<DatosUdae>,
    pub columnas_udae: &'static [Columna],
    pub filas: FilasRegistro,
    pub columnas_registro: &'static [Columna],
}

/// A confirmed link, one variant per registry.
#[derive(Debug, Clone)]
pub enum Enlace {
    Csj(EnlaceCsj),
    Deaj(EnlaceDeaj),
}

/// List pairing candidates: UDAE rows without a link of this registry's type
/// on one side, unlinked comparison rows on the other. Both sides come back
/// in their stable listing order with the operator's filters applied.
pub fn candidatos(store: &Store, registro: Registro, filtros: &Filtros) -> Result<Emparejamiento> {
    match registro {
        Registro::Csj => {
            let udae = store.udae_sin_enlace_csj()?;
            let csj = store.csj_sin_enlace()?;
            Ok(Emparejamiento {
                datos_udae: filtrar(&udae, &filtros.udae),
                columnas_udae: catalogo::COLUMNAS_UDAE,
                filas: FilasRegistro::Csj(filtrar(&csj, &filtros.registro)),
                columnas_registro: catalogo::COLUMNAS_CSJ,
            })
        }
        Registro::Deaj => {
            let udae = store.udae_sin_enlace_deaj()?;
            let deaj = store.deaj_sin_enlace()?;
            Ok(Emparejamiento {
                datos_udae: filtrar(&udae, &filtros.udae),
                columnas_udae: catalogo::COLUMNAS_UDAE,
                filas: FilasRegistro::Deaj(filtrar(&deaj, &filtros.registro)),
                columnas_registro: catalogo::COLUMNAS_DEAJ,
            })
        }
    }
}

/// Confirm a pair. Fails with [`Error::AlreadyLinked`] when either side
/// already holds a link of this registry's type, including the case where a
/// concurrent operator confirmed first. Candidate lists computed before this
/// call are stale afterwards and must be re-listed.
pub fn confirmar(
    store: &mut Store,
    registro: Registro,
    udae_id: &str,
    registro_id: &str,
    user_id: &str,
) -> Result<Enlace> {
    if udae_id.is_empty() || registro_id.is_empty() {
        return Err(Error::Validation("row ids must not be empty".into()));
    }
    if user_id.is_empty() {
        return Err(Error::Validation("operator id must not be empty".into()));
    }

    match registro {
        Registro::Csj => Ok(Enlace::Csj(store.crear_enlace_csj(udae_id, registro_id, user_id)?)),
        Registro::Deaj => Ok(Enlace::Deaj(store.crear_enlace_deaj(udae_id, registro_id, user_id)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn udae(id: &str, municipio: &str) -> DatosUdae {
        DatosUdae {
            id: id.into(),
            numero: 1,
            municipio_sede_fisica: municipio.into(),
            ..DatosUdae::default()
        }
    }

    fn csj(id: &str, municipio: &str) -> DatosCsj {
        DatosCsj { id: id.into(), numero: 1, municipio: municipio.into(), ..DatosCsj::default() }
    }

    fn store_con_datos() -> Store {
        let mut store = Store::en_memoria().unwrap();
        store
            .cargar_udae(&[udae("u1", "Tunja"), udae("u2", "Duitama")])
            .unwrap();
        store.cargar_csj(&[csj("c1", "Tunja"), csj("c2", "Duitama")]).unwrap();
        store
    }

    #[test]
    fn filtros_por_lado_son_independientes() {
        let store = store_con_datos();
        let filtros = Filtros {
            udae: vec![Filtro::nuevo("municipioSedeFisica", "tunja")],
            registro: vec![],
        };
        let listado = candidatos(&store, Registro::Csj, &filtros).unwrap();
        assert_eq!(listado.datos_udae.len(), 1);
        assert_eq!(listado.filas.len(), 2);
    }

    #[test]
    fn confirmar_retira_ambas_filas_del_listado() {
        let mut store = store_con_datos();
        confirmar(&mut store, Registro::Csj, "u1", "c1", "op1").unwrap();

        let listado = candidatos(&store, Registro::Csj, &Filtros::default()).unwrap();
        assert_eq!(listado.datos_udae.len(), 1);
        assert_eq!(listado.datos_udae[0].id, "u2");
        match listado.filas {
            FilasRegistro::Csj(filas) => {
                assert_eq!(filas.len(), 1);
                assert_eq!(filas[0].id, "c2");
            }
            FilasRegistro::Deaj(_) => panic!("expected CSJ rows"),
        }
    }

    #[test]
    fn entradas_vacias_se_rechazan_antes_del_store() {
        let mut store = store_con_datos();
        let err = confirmar(&mut store, Registro::Csj, "", "c1", "op1").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        let err = confirmar(&mut store, Registro::Csj, "u1", "c1", "").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
