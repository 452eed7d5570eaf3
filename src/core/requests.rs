//! Boundary checks for request bodies, run before anything is written.
//!
//! Each validator reads the untyped JSON body, gathers human-readable
//! messages into [`ValidationErrors`] and, when nothing is wrong, returns a
//! typed payload. `Err` is reserved for the lookup port failing.

use crate::core::fields::{combine_date_time, parse_id, validate_date, validate_time};
use crate::core::numeric::check_float;
use crate::core::rut::{validate_rut, Rut};
use crate::domain::model::{
    CargaUpdate, ConductorMaquinaUpdate, NewBitacora, NewCarga, NewCargaBitacora,
    NewConductorMaquina, NumericInput, Outcome, PersonalChanges, Table, ValidationErrors,
    ValidationSettings,
};
use crate::domain::ports::ReferenceLookup;
use crate::utils::error::Result;
use chrono::NaiveDateTime;
use serde_json::{Map, Value};

pub const INVALID_DATA_TYPE: &str = "Tipo de datos inválido";
pub const INCOMPLETE_DATA: &str = "Datos incompletos o inválidos";
pub const INVALID_BITACORA_DATA: &str = "Tipo de datos inválido en bitácora";
pub const INVALID_DATE_FORMAT: &str = "El formato de la fecha es inválido. Debe ser dd-mm-aaaa";
pub const INVALID_RUT: &str = "RUT inválido";

const MEASUREMENT_FIELDS: [&str; 6] = [
    "km_salida",
    "km_llegada",
    "hmetro_salida",
    "hmetro_llegada",
    "hbomba_salida",
    "hbomba_llegada",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalMode {
    Create,
    Update,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key)
}

/// Field that is set to something truthy.
fn present<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    field(object, key).filter(|v| is_truthy(v))
}

fn rejected<T>(message: &str) -> Result<Outcome<T>> {
    Ok(Outcome::Invalid(ValidationErrors::single(message)))
}

async fn require_reference(
    references: &dyn ReferenceLookup,
    table: Table,
    id: Option<i64>,
    message: &str,
    errors: &mut ValidationErrors,
) -> Result<()> {
    let found = match id {
        Some(id) => references.exists(table, id).await?,
        None => false,
    };
    if !found {
        errors.push(message);
    }
    Ok(())
}

/// Date and time sent as separate `dd-mm-aaaa` / `HH:mm` fields. Only
/// checked when both are present; an invalid pair records `message`.
fn date_time_pair(
    object: &Map<String, Value>,
    date_key: &str,
    time_key: &str,
    message: &str,
    errors: &mut ValidationErrors,
) -> Option<NaiveDateTime> {
    let date = present(object, date_key)?;
    let time = present(object, time_key)?;

    let parsed = date
        .as_str()
        .and_then(validate_date)
        .zip(time.as_str().and_then(validate_time));
    match parsed {
        Some((date, time)) => Some(combine_date_time(date, time)),
        None => {
            errors.push(message);
            None
        }
    }
}

/// Fuel load for a service log that already exists. Stops at the first
/// failed check; the log is looked up before the amounts are type-checked.
pub async fn validate_new_carga(body: &Value, references: &dyn ReferenceLookup) -> Result<Outcome<NewCarga>> {
    let Some(bitacora_id) = body.get("bitacora_id").and_then(parse_id) else {
        return rejected("Bitácora no existe o está eliminada");
    };
    if !references.exists(Table::Bitacora, bitacora_id).await? {
        return rejected("Bitácora no existe o está eliminada");
    }

    let litros = body.get("litros").and_then(Value::as_f64);
    let valor_mon = body.get("valor_mon").and_then(Value::as_f64);
    let (Some(litros), Some(valor_mon)) = (litros, valor_mon) else {
        return rejected(INVALID_DATA_TYPE);
    };

    Ok(Outcome::Valid(NewCarga {
        bitacora_id,
        litros,
        valor_mon,
    }))
}

/// Fuel load created together with the service log it belongs to.
pub async fn validate_new_carga_bitacora(
    body: &Value,
    references: &dyn ReferenceLookup,
    settings: &ValidationSettings,
) -> Result<Outcome<NewCargaBitacora>> {
    let bitacora = body.get("bitacora").and_then(Value::as_object);
    let litros = body.get("litros").and_then(Value::as_f64);
    let valor_mon = body.get("valor_mon").and_then(Value::as_f64);

    let (Some(bitacora), Some(litros), Some(valor_mon)) = (bitacora, litros, valor_mon) else {
        return Ok(Outcome::Invalid(ValidationErrors::single(INCOMPLETE_DATA)));
    };

    let mut errors = ValidationErrors::new();

    let compania_id = field(bitacora, "compania_id").and_then(parse_id);
    let conductor_id = field(bitacora, "conductor_id").and_then(parse_id);
    let maquina_id = field(bitacora, "maquina_id").and_then(parse_id);
    let clave_id = field(bitacora, "clave_id").and_then(parse_id);
    let direccion = field(bitacora, "direccion").and_then(Value::as_str);

    if compania_id.is_none()
        || conductor_id.is_none()
        || maquina_id.is_none()
        || clave_id.is_none()
        || direccion.is_none()
    {
        errors.push(INVALID_BITACORA_DATA);
    }

    let fh_salida = date_time_pair(
        bitacora,
        "f_salida",
        "h_salida",
        "El formato de la fecha o la hora de salida es inválido. Deben ser dd-mm-aaaa y HH:mm",
        &mut errors,
    );
    let fh_llegada = date_time_pair(
        bitacora,
        "f_llegada",
        "h_llegada",
        "El formato de la fecha o la hora de llegada es inválido. Deben ser dd-mm-aaaa y HH:mm",
        &mut errors,
    );

    require_reference(references, Table::Compania, compania_id, "Compañía no existe o está eliminada", &mut errors).await?;
    require_reference(references, Table::ConductorMaquina, conductor_id, "Conductor no existe o está eliminado", &mut errors).await?;
    require_reference(references, Table::Maquina, maquina_id, "Máquina no existe o está eliminada", &mut errors).await?;
    require_reference(references, Table::Clave, clave_id, "Clave no existe o está eliminada", &mut errors).await?;

    let mut measurements = [None; MEASUREMENT_FIELDS.len()];
    for (slot, name) in measurements.iter_mut().zip(MEASUREMENT_FIELDS) {
        let Some(value) = field(bitacora, name) else {
            continue;
        };
        match check_float(&NumericInput::from_json(value), settings.float_parsing) {
            Ok(parsed) => *slot = Some(parsed),
            Err(e) => errors.push(format!("{}: {}", name, e)),
        }
    }

    if litros <= 0.0 {
        errors.push("Ingrese valor válido para 'litros'");
    }
    if valor_mon <= 0.0 {
        errors.push("Ingrese valor válido para 'valor_mon'");
    }

    let ids = compania_id.zip(conductor_id).zip(maquina_id.zip(clave_id));
    match (ids, direccion) {
        (Some(((compania_id, conductor_id), (maquina_id, clave_id))), Some(direccion)) if errors.is_empty() => {
            let [km_salida, km_llegada, hmetro_salida, hmetro_llegada, hbomba_salida, hbomba_llegada] = measurements;
            let obs = field(bitacora, "obs")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string);

            Ok(Outcome::Valid(NewCargaBitacora {
                bitacora: NewBitacora {
                    compania_id,
                    conductor_id,
                    maquina_id,
                    clave_id,
                    direccion: direccion.to_string(),
                    fh_salida,
                    fh_llegada,
                    km_salida,
                    km_llegada,
                    hmetro_salida,
                    hmetro_llegada,
                    hbomba_salida,
                    hbomba_llegada,
                    obs,
                },
                litros,
                valor_mon,
            }))
        }
        _ => {
            tracing::debug!("Fuel load with service log rejected: {} errors", errors.len());
            Ok(Outcome::Invalid(errors))
        }
    }
}

/// Partial update of a fuel load; absent fields stay unchanged.
pub async fn validate_carga_update(
    body: &Value,
    references: &dyn ReferenceLookup,
    settings: &ValidationSettings,
) -> Result<Outcome<CargaUpdate>> {
    let Some(body) = body.as_object() else {
        return Ok(Outcome::Invalid(ValidationErrors::single(INVALID_DATA_TYPE)));
    };

    let mut errors = ValidationErrors::new();
    let mut update = CargaUpdate::default();

    if let Some(value) = field(body, "bitacora_id") {
        match parse_id(value) {
            Some(id) => {
                require_reference(references, Table::Bitacora, Some(id), "Bitácora no existe o está eliminada", &mut errors).await?;
                update.bitacora_id = Some(id);
            }
            None => errors.push("Tipo de datos inválido para bitácora"),
        }
    }

    if let Some(value) = field(body, "litros") {
        match check_float(&NumericInput::from_json(value), settings.float_parsing) {
            Ok(litros) => update.litros = Some(litros),
            Err(e) => errors.push(format!("litros: {}", e)),
        }
    }

    if let Some(value) = field(body, "valor_mon") {
        match value.as_f64() {
            Some(valor_mon) => update.valor_mon = Some(valor_mon),
            None => errors.push("Tipo de datos inválido para valor_mon"),
        }
    }

    if errors.is_empty() {
        Ok(Outcome::Valid(update))
    } else {
        tracing::debug!("Fuel load update rejected: {} errors", errors.len());
        Ok(Outcome::Invalid(errors))
    }
}

/// Driver-to-vehicle assignment. Stops at the first failed check.
pub async fn validate_new_conductor_maquina(
    body: &Value,
    references: &dyn ReferenceLookup,
) -> Result<Outcome<NewConductorMaquina>> {
    let personal_id = body.get("personal_id").and_then(parse_id);
    let maquina_id = body.get("maquina_id").and_then(parse_id);
    let tipo_maquina_id = body.get("tipo_maquina_id").and_then(parse_id);
    let ven_licencia = body.get("ven_licencia").and_then(Value::as_str);

    let (Some(personal_id), Some(maquina_id), Some(tipo_maquina_id), Some(ven_licencia)) =
        (personal_id, maquina_id, tipo_maquina_id, ven_licencia)
    else {
        return Ok(Outcome::Invalid(ValidationErrors::single(INVALID_DATA_TYPE)));
    };

    let checks = [
        (Table::Personal, personal_id, "ID de personal no válido"),
        (Table::Maquina, maquina_id, "ID de máquina no válido"),
        (Table::TipoMaquina, tipo_maquina_id, "ID de tipo de máquina no válido"),
    ];
    for (table, id, message) in checks {
        if !references.exists(table, id).await? {
            return Ok(Outcome::Invalid(ValidationErrors::single(message)));
        }
    }

    let Some(ven_licencia) = validate_date(ven_licencia) else {
        return Ok(Outcome::Invalid(ValidationErrors::single(INVALID_DATE_FORMAT)));
    };

    Ok(Outcome::Valid(NewConductorMaquina {
        personal_id,
        maquina_id,
        tipo_maquina_id,
        ven_licencia,
    }))
}

/// Partial update of a driver-to-vehicle assignment. Falsy fields (`0`,
/// `""`, `null`) are left unchanged. Stops at the first failed check.
pub async fn validate_conductor_maquina_update(
    body: &Value,
    references: &dyn ReferenceLookup,
) -> Result<Outcome<ConductorMaquinaUpdate>> {
    let Some(body) = body.as_object() else {
        return rejected(INVALID_DATA_TYPE);
    };

    let mut ids = [None; 4];
    for (slot, key) in ids
        .iter_mut()
        .zip(["personal_id", "rol_personal_id", "maquina_id", "tipo_maquina_id"])
    {
        let Some(value) = present(body, key) else {
            continue;
        };
        match Some(value).filter(|v| v.is_number()).and_then(parse_id) {
            Some(id) => *slot = Some(id),
            None => return rejected(INVALID_DATA_TYPE),
        }
    }
    let [personal_id, rol_personal_id, maquina_id, tipo_maquina_id] = ids;

    let ven_licencia = match present(body, "ven_licencia") {
        Some(value) => match value.as_str() {
            Some(text) => Some(text),
            None => return rejected(INVALID_DATA_TYPE),
        },
        None => None,
    };

    let checks = [
        (Table::Personal, personal_id, "ID de personal no válido"),
        (Table::Maquina, maquina_id, "ID de máquina no válido"),
        (Table::TipoMaquina, tipo_maquina_id, "ID de tipo de máquina no válido"),
    ];
    for (table, id, message) in checks {
        if let Some(id) = id {
            if !references.exists(table, id).await? {
                return rejected(message);
            }
        }
    }

    let ven_licencia = match ven_licencia {
        Some(text) => match validate_date(text) {
            Some(date) => Some(date),
            None => return rejected(INVALID_DATE_FORMAT),
        },
        None => None,
    };

    Ok(Outcome::Valid(ConductorMaquinaUpdate {
        personal_id,
        rol_personal_id,
        maquina_id,
        tipo_maquina_id,
        ven_licencia,
    }))
}

fn text_field(
    body: &Map<String, Value>,
    key: &str,
    mode: PersonalMode,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match field(body, key) {
        None => {
            if mode == PersonalMode::Create {
                errors.push(format!("{} es requerido", key));
            }
            None
        }
        Some(value) => match value.as_str().map(str::trim).filter(|s| !s.is_empty()) {
            Some(text) => Some(text.to_string()),
            None => {
                errors.push(format!("Tipo de datos inválido para {}", key));
                None
            }
        },
    }
}

async fn reference_field(
    body: &Map<String, Value>,
    key: &str,
    table: Table,
    missing_message: &str,
    mode: PersonalMode,
    references: &dyn ReferenceLookup,
    errors: &mut ValidationErrors,
) -> Result<Option<i64>> {
    let Some(value) = field(body, key) else {
        if mode == PersonalMode::Create {
            errors.push(format!("{} es requerido", key));
        }
        return Ok(None);
    };

    let Some(id) = parse_id(value) else {
        errors.push(format!("Tipo de datos inválido para {}", key));
        return Ok(None);
    };

    require_reference(references, table, Some(id), missing_message, errors).await?;
    Ok(Some(id))
}

/// Personnel record. On create every field is required; on update only the
/// fields present are checked.
pub async fn validate_personal(
    body: &Value,
    references: &dyn ReferenceLookup,
    mode: PersonalMode,
) -> Result<Outcome<PersonalChanges>> {
    let Some(body) = body.as_object() else {
        return Ok(Outcome::Invalid(ValidationErrors::single(INVALID_DATA_TYPE)));
    };

    let mut errors = ValidationErrors::new();
    let mut changes = PersonalChanges::default();

    match field(body, "rut") {
        None if mode == PersonalMode::Create => errors.push("rut es requerido"),
        None => {}
        Some(value) => match value
            .as_str()
            .filter(|rut| validate_rut(rut))
            .and_then(|rut| rut.parse::<Rut>().ok())
        {
            Some(rut) => changes.rut = Some(rut),
            None => errors.push(INVALID_RUT),
        },
    }

    changes.nombre = text_field(body, "nombre", mode, &mut errors);
    changes.apellido = text_field(body, "apellido", mode, &mut errors);

    changes.compania_id = reference_field(
        body,
        "compania_id",
        Table::Compania,
        "Compañía no existe o está eliminada",
        mode,
        references,
        &mut errors,
    )
    .await?;
    changes.rol_personal_id = reference_field(
        body,
        "rol_personal_id",
        Table::RolPersonal,
        "Rol de personal no existe o está eliminado",
        mode,
        references,
        &mut errors,
    )
    .await?;

    if errors.is_empty() {
        Ok(Outcome::Valid(changes))
    } else {
        tracing::debug!("Personnel request rejected: {} errors", errors.len());
        Ok(Outcome::Invalid(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_truthy_follows_loose_semantics() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!("05-03-2024")));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_date_time_pair_needs_both_halves() {
        let mut errors = ValidationErrors::new();
        let only_date = json!({"f_salida": "05-03-2024"});
        let pair = date_time_pair(only_date.as_object().unwrap(), "f_salida", "h_salida", "bad", &mut errors);
        assert_eq!(pair, None);
        assert!(errors.is_empty());

        let bad_time = json!({"f_salida": "05-03-2024", "h_salida": "25:00"});
        let pair = date_time_pair(bad_time.as_object().unwrap(), "f_salida", "h_salida", "bad", &mut errors);
        assert_eq!(pair, None);
        assert_eq!(errors.errors, vec!["bad".to_string()]);
    }
}
