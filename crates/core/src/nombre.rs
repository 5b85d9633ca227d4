//! Full-name splitting for registry incumbent names.

/// Result of [`separar_nombre`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NombrePartido {
    pub nombres: String,
    pub apellidos: String,
}

/// Split a full name into given names and a two-token surname.
///
/// Algorithm, as inherited from the registry conventions: collapse
/// whitespace, take the last two tokens joined by a space as `apellidos`,
/// and remove that substring (first occurrence) from the full name to get
/// `nombres`.
///
/// Known lossy edge: names with fewer than three tokens end up entirely in
/// `apellidos` (`"Ana"` → nombres `""`, apellidos `"Ana"`), and single-token
/// surnames are mis-split. This mirrors the registry data-entry convention
/// and is asserted as-is by the tests; changing it would desynchronize the
/// consolidated export from historic data.
pub fn separar_nombre(nombre_completo: &str) -> NombrePartido {
    let tokens: Vec<&str> = nombre_completo.split_whitespace().collect();
    if tokens.is_empty() {
        return NombrePartido::default();
    }

    let completo = tokens.join(" ");
    let inicio = tokens.len().saturating_sub(2);
    let apellidos = tokens[inicio..].join(" ");
    let nombres = completo.replacen(&apellidos, "", 1).trim().to_string();

    NombrePartido { nombres, apellidos }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuatro_tokens() {
        let p = separar_nombre("Juan Carlos Pérez Gómez");
        assert_eq!(p.nombres, "Juan Carlos");
        assert_eq!(p.apellidos, "Pérez Gómez");
    }

    #[test]
    fn tres_tokens() {
        let p = separar_nombre("Ana Pérez Gómez");
        assert_eq!(p.nombres, "Ana");
        assert_eq!(p.apellidos, "Pérez Gómez");
    }

    #[test]
    fn un_token_queda_en_apellidos() {
        // Documented edge: a single token is taken as the surname.
        let p = separar_nombre("Ana");
        assert_eq!(p.nombres, "");
        assert_eq!(p.apellidos, "Ana");
    }

    #[test]
    fn dos_tokens_quedan_en_apellidos() {
        let p = separar_nombre("Ana Pérez");
        assert_eq!(p.nombres, "");
        assert_eq!(p.apellidos, "Ana Pérez");
    }

    #[test]
    fn espacios_redundantes() {
        let p = separar_nombre("  Juan   Carlos  Pérez   Gómez ");
        assert_eq!(p.nombres, "Juan Carlos");
        assert_eq!(p.apellidos, "Pérez Gómez");
    }

    #[test]
    fn vacio() {
        assert_eq!(separar_nombre(""), NombrePartido::default());
        assert_eq!(separar_nombre("   "), NombrePartido::default());
    }

    #[test]
    fn apellidos_repetidos_remueve_primera_ocurrencia() {
        let p = separar_nombre("Pérez Gómez Pérez Gómez");
        assert_eq!(p.apellidos, "Pérez Gómez");
        assert_eq!(p.nombres, "Pérez Gómez");
    }
}
