//! `planta-core`: domain types for the judicial staffing roster.
//!
//! Pure types crate: roster entities, cross-registry links, the static
//! consolidated column catalogue and the shared error taxonomy. No IO
//! dependencies.

pub mod catalogo;
pub mod error;
pub mod modelo;
pub mod nombre;

pub use catalogo::{columnas_consolidado, Columna, Modelo, TipoDato};
pub use error::{Error, Result};
pub use modelo::{
    ActoAdministrativo, Campos, CargoExiste, ClaseNombramiento, DatosCsj, DatosDeaj,
    DatosEncuesta, DatosUdae, Despacho, EnlaceActo, EnlaceCsj, EnlaceDeaj, EstadoCsj,
    RegistroCompleto, ServidorInfo, TipoActo,
};
pub use nombre::{separar_nombre, NombrePartido};
