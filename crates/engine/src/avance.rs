//! Progress aggregation over the pairing work.

use serde::Serialize;

use planta_core::Result;
use planta_store::Store;

/// Counters and percentages for the progress card.
///
/// `total_deaj` counts the DEAJ rows in Provisionalidad, not the UDAE total;
/// its percentage can exceed 100 when links outrun that subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatosAvance {
    pub total_udae: i64,
    pub avance_csj: i64,
    pub porc_csj: f64,
    pub total_deaj: i64,
    pub avance_deaj: i64,
    pub porc_deaj: f64,
    pub total_actos: i64,
    pub porc_actos: f64,
    pub total_info_trabajadores: i64,
    pub porc_info_trabajadores: f64,
}

/// An office whose survey coverage is short of its position count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DespachoIncompleto {
    pub nombre_despacho: String,
    pub email: String,
    pub total_cargos: i64,
    pub con_encuesta: i64,
}

/// Percentage with a defined zero-denominator sentinel of 0.0.
fn porcentaje(avance: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        avance as f64 / total as f64 * 100.0
    }
}

/// Compute the progress card from the current store state.
pub fn calcular(store: &Store) -> Result<DatosAvance> {
    let conteos = store.conteos_avance()?;
    Ok(DatosAvance {
        total_udae: conteos.total_udae,
        avance_csj: conteos.enlaces_csj,
        porc_csj: porcentaje(conteos.enlaces_csj, conteos.total_udae),
        total_deaj: conteos.deaj_elegibles,
        avance_deaj: conteos.enlaces_deaj,
        porc_deaj: porcentaje(conteos.enlaces_deaj, conteos.deaj_elegibles),
        total_actos: conteos.enlaces_acto,
        porc_actos: porcentaje(conteos.enlaces_acto, conteos.total_udae),
        total_info_trabajadores: conteos.encuestas,
        porc_info_trabajadores: porcentaje(conteos.encuestas, conteos.total_udae),
    })
}

const DOMINIOS_JUDICATURA: &[&str] = &["@cendoj.ramajudicial.gov.co", "@cndj.gov.co"];

fn correo_de_judicatura(email: &str) -> bool {
    let email = email.trim().to_lowercase();
    DOMINIOS_JUDICATURA.iter().any(|d| email.ends_with(d))
}

/// Offices with pending surveys and a reachable judiciary mailbox, for
/// follow-up. Offices without a directory contact, or whose contact is
/// outside the judiciary mail domains, are left out.
pub fn despachos_incompletos(store: &Store) -> Result<Vec<DespachoIncompleto>> {
    let contactos = store.listar_despachos()?;
    let mut incompletos = Vec::new();
    for resumen in store.resumen_despachos()? {
        if resumen.con_encuesta >= resumen.total_cargos {
            continue;
        }
        let contacto = contactos.iter().find(|d| d.nombre == resumen.nombre_despacho);
        let Some(contacto) = contacto else { continue };
        if !correo_de_judicatura(&contacto.email) {
            continue;
        }
        incompletos.push(DespachoIncompleto {
            nombre_despacho: resumen.nombre_despacho,
            email: contacto.email.clone(),
            total_cargos: resumen.total_cargos,
            con_encuesta: resumen.con_encuesta,
        });
    }
    Ok(incompletos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planta_core::{DatosCsj, DatosEncuesta, DatosUdae, Despacho};

    #[test]
    fn porcentaje_con_denominador_cero_es_cero() {
        assert_eq!(porcentaje(0, 0), 0.0);
        assert_eq!(porcentaje(5, 0), 0.0);
    }

    #[test]
    fn porcentaje_puede_superar_cien() {
        assert_eq!(porcentaje(3, 2), 150.0);
    }

    #[test]
    fn calcular_sobre_almacen_vacio() {
        let store = Store::en_memoria().unwrap();
        let avance = calcular(&store).unwrap();
        assert_eq!(avance.total_udae, 0);
        assert_eq!(avance.porc_csj, 0.0);
        assert_eq!(avance.porc_deaj, 0.0);
    }

    #[test]
    fn calcular_cuenta_enlaces_y_encuestas() {
        let mut store = Store::en_memoria().unwrap();
        store
            .cargar_udae(&[
                DatosUdae { id: "u1".into(), numero: 1, ..DatosUdae::default() },
                DatosUdae { id: "u2".into(), numero: 2, ..DatosUdae::default() },
            ])
            .unwrap();
        store
            .cargar_csj(&[DatosCsj { id: "c1".into(), numero: 1, ..DatosCsj::default() }])
            .unwrap();
        store.crear_enlace_csj("u1", "c1", "op1").unwrap();
        store
            .guardar_encuesta(&DatosEncuesta {
                id: "q1".into(),
                datos_udae_id: "u1".into(),
                ..DatosEncuesta::default()
            })
            .unwrap();

        let avance = calcular(&store).unwrap();
        assert_eq!(avance.total_udae, 2);
        assert_eq!(avance.avance_csj, 1);
        assert_eq!(avance.porc_csj, 50.0);
        assert_eq!(avance.total_info_trabajadores, 1);
        assert_eq!(avance.porc_info_trabajadores, 50.0);
    }

    #[test]
    fn despachos_incompletos_filtra_por_dominio() {
        let mut store = Store::en_memoria().unwrap();
        store
            .cargar_udae(&[
                DatosUdae {
                    id: "u1".into(),
                    numero: 1,
                    nombre_despacho: "Juzgado 1 Civil".into(),
                    ..DatosUdae::default()
                },
                DatosUdae {
                    id: "u2".into(),
                    numero: 2,
                    nombre_despacho: "Juzgado 2 Penal".into(),
                    ..DatosUdae::default()
                },
            ])
            .unwrap();
        store
            .cargar_despachos(&[
                Despacho {
                    id: "dp1".into(),
                    codigo: "050011".into(),
                    nombre: "Juzgado 1 Civil".into(),
                    email: "j01civil@cendoj.ramajudicial.gov.co".into(),
                },
                Despacho {
                    id: "dp2".into(),
                    codigo: "050012".into(),
                    nombre: "Juzgado 2 Penal".into(),
                    email: "j02penal@example.com".into(),
                },
            ])
            .unwrap();

        let incompletos = despachos_incompletos(&store).unwrap();
        assert_eq!(incompletos.len(), 1);
        assert_eq!(incompletos[0].nombre_despacho, "Juzgado 1 Civil");
        assert_eq!(incompletos[0].con_encuesta, 0);
        assert_eq!(incompletos[0].total_cargos, 1);
    }

    #[test]
    fn despacho_completo_no_aparece() {
        let mut store = Store::en_memoria().unwrap();
        store
            .cargar_udae(&[DatosUdae {
                id: "u1".into(),
                numero: 1,
                nombre_despacho: "Juzgado 1 Civil".into(),
                ..DatosUdae::default()
            }])
            .unwrap();
        store
            .cargar_despachos(&[Despacho {
                id: "dp1".into(),
                codigo: "050011".into(),
                nombre: "Juzgado 1 Civil".into(),
                email: "j01civil@cndj.gov.co".into(),
            }])
            .unwrap();
        store
            .guardar_encuesta(&DatosEncuesta {
                id: "q1".into(),
                datos_udae_id: "u1".into(),
                ..DatosEncuesta::default()
            })
            .unwrap();

        assert!(despachos_incompletos(&store).unwrap().is_empty());
    }
}
