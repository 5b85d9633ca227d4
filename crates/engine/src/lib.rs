//! `planta-engine`: record-linkage engine for the judicial staffing roster.
//!
//! Operator-driven pairing of the UDAE reference roster against the CSJ and
//! DEAJ registries, the mutable act linkage, the consolidated reporting
//! projection and the progress aggregator. All state lives in the store;
//! every operation here is a bounded synchronous read or a single atomic
//! write.

pub mod actos;
pub mod avance;
pub mod carga;
pub mod consolidado;
pub mod emparejar;
pub mod encuesta;
pub mod filtro;

pub use actos::{FormularioEnlaceActo, SolicitudEnlaceActo};
pub use avance::{DatosAvance, DespachoIncompleto};
pub use consolidado::{Celda, Consolidado, RegistroConsolidado};
pub use emparejar::{Emparejamiento, Enlace, FilasRegistro, Filtros, Registro};
pub use encuesta::{FormularioEncuesta, SolicitudEncuesta};
pub use filtro::Filtro;
