//! Operator-supplied attribute filters for the pairing tables.

use serde::Deserialize;

use planta_core::Campos;

/// One predicate: the named column must contain `valor`, case-insensitively.
#[derive(Debug, Clone, Deserialize)]
pub struct Filtro {
    pub columna: String,
    pub valor: String,
}

impl Filtro {
    pub fn nuevo(columna: &str, valor: &str) -> Self {
        Self { columna: columna.into(), valor: valor.into() }
    }
}

/// Keep the rows that satisfy every predicate. An empty predicate list keeps
/// everything. Filters hold no state; each listing re-applies them from
/// scratch.
pub fn filtrar<T: Campos + Clone>(filas: &[T], filtros: &[Filtro]) -> Vec<T> {
    filas
        .iter()
        .filter(|fila| {
            filtros.iter().all(|filtro| {
                fila.campo(&filtro.columna)
                    .to_lowercase()
                    .contains(&filtro.valor.to_lowercase())
            })
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use planta_core::DatosUdae;

    fn fila(municipio: &str, cargo: &str) -> DatosUdae {
        DatosUdae {
            id: format!("{municipio}-{cargo}"),
            municipio_sede_fisica: municipio.into(),
            descripcion_cargo: cargo.into(),
            ..DatosUdae::default()
        }
    }

    #[test]
    fn sin_filtros_pasa_todo() {
        let filas = vec![fila("Tunja", "Juez"), fila("Duitama", "Secretario")];
        assert_eq!(filtrar(&filas, &[]).len(), 2);
    }

    #[test]
    fn subcadena_sin_distinguir_mayusculas() {
        let filas = vec![fila("Tunja", "Juez"), fila("Duitama", "Secretario")];
        let filtros = vec![Filtro::nuevo("municipioSedeFisica", "tun")];
        let filtradas = filtrar(&filas, &filtros);
        assert_eq!(filtradas.len(), 1);
        assert_eq!(filtradas[0].municipio_sede_fisica, "Tunja");
    }

    #[test]
    fn todos_los_predicados_deben_cumplirse() {
        let filas = vec![
            fila("Tunja", "Juez"),
            fila("Tunja", "Secretario"),
            fila("Duitama", "Juez"),
        ];
        let filtros = vec![
            Filtro::nuevo("municipioSedeFisica", "tunja"),
            Filtro::nuevo("descripcionCargo", "juez"),
        ];
        let filtradas = filtrar(&filas, &filtros);
        assert_eq!(filtradas.len(), 1);
        assert_eq!(filtradas[0].id, "Tunja-Juez");
    }

    #[test]
    fn columna_desconocida_solo_pasa_predicado_vacio() {
        let filas = vec![fila("Tunja", "Juez")];
        // An unknown column reads as "", which contains only the empty string.
        assert_eq!(filtrar(&filas, &[Filtro::nuevo("noExiste", "")]).len(), 1);
        assert_eq!(filtrar(&filas, &[Filtro::nuevo("noExiste", "x")]).len(), 0);
    }
}
