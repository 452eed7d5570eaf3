use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A measurement as it arrives in a request body: either a JSON string or a
/// JSON number.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericInput {
    Text(String),
    Number(f64),
}

impl NumericInput {
    /// Maps any JSON value onto the two accepted shapes. Values that are
    /// neither strings nor numbers keep their JSON rendering as text, which
    /// never parses as a number.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => NumericInput::Text(s.clone()),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => NumericInput::Number(f),
                None => NumericInput::Text(n.to_string()),
            },
            other => NumericInput::Text(other.to_string()),
        }
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::Text(value)
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Number(value as f64)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatParsing {
    /// Accept the longest numeric prefix, so `"12.5abc"` reads as `12.5`.
    #[default]
    Loose,
    /// The whole trimmed text must be a number.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationDefaults {
    pub default_page_size: u32,
    pub max_page_size: Option<u32>,
}

impl Default for PaginationDefaults {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSettings {
    pub float_parsing: FloatParsing,
    pub pagination: PaginationDefaults,
}

/// Tables whose rows are referenced by foreign keys in request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Compania,
    Personal,
    Maquina,
    TipoMaquina,
    ConductorMaquina,
    Clave,
    Bitacora,
    RolPersonal,
}

impl Table {
    pub const ALL: [Table; 8] = [
        Table::Compania,
        Table::Personal,
        Table::Maquina,
        Table::TipoMaquina,
        Table::ConductorMaquina,
        Table::Clave,
        Table::Bitacora,
        Table::RolPersonal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Compania => "compania",
            Table::Personal => "personal",
            Table::Maquina => "maquina",
            Table::TipoMaquina => "tipo_maquina",
            Table::ConductorMaquina => "conductor_maquina",
            Table::Clave => "clave",
            Table::Bitacora => "bitacora",
            Table::RolPersonal => "rol_personal",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Table::ALL
            .into_iter()
            .find(|table| table.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| format!("unknown table '{}'", name))
    }
}

/// Request bodies the validators know how to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum PayloadKind {
    /// Fuel load for an existing service log
    Carga,
    /// Fuel load created together with its service log
    CargaBitacora,
    /// Partial update of a fuel load
    CargaUpdate,
    /// Driver-to-vehicle assignment
    Conductor,
    /// Partial update of a driver-to-vehicle assignment
    ConductorUpdate,
    PersonalCreate,
    PersonalUpdate,
}

/// Every message gathered while checking one request body, in the order
/// the checks ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn contains(&self, message: &str) -> bool {
        self.errors.iter().any(|e| e == message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Valid(T),
    Invalid(ValidationErrors),
}

impl<T> Outcome<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid(_))
    }

    pub fn valid(self) -> Option<T> {
        match self {
            Outcome::Valid(value) => Some(value),
            Outcome::Invalid(_) => None,
        }
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            Outcome::Valid(_) => None,
            Outcome::Invalid(errors) => Some(errors),
        }
    }
}

/// Service log embedded in a fuel-load creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBitacora {
    pub compania_id: i64,
    pub conductor_id: i64,
    pub maquina_id: i64,
    pub clave_id: i64,
    pub direccion: String,
    pub fh_salida: Option<NaiveDateTime>,
    pub fh_llegada: Option<NaiveDateTime>,
    pub km_salida: Option<f64>,
    pub km_llegada: Option<f64>,
    pub hmetro_salida: Option<f64>,
    pub hmetro_llegada: Option<f64>,
    pub hbomba_salida: Option<f64>,
    pub hbomba_llegada: Option<f64>,
    pub obs: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCargaBitacora {
    pub bitacora: NewBitacora,
    pub litros: f64,
    pub valor_mon: f64,
}

/// Fuel load attached to a service log that already exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCarga {
    pub bitacora_id: i64,
    pub litros: f64,
    pub valor_mon: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CargaUpdate {
    pub bitacora_id: Option<i64>,
    pub litros: Option<f64>,
    pub valor_mon: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewConductorMaquina {
    pub personal_id: i64,
    pub maquina_id: i64,
    pub tipo_maquina_id: i64,
    pub ven_licencia: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConductorMaquinaUpdate {
    pub personal_id: Option<i64>,
    pub rol_personal_id: Option<i64>,
    pub maquina_id: Option<i64>,
    pub tipo_maquina_id: Option<i64>,
    pub ven_licencia: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonalChanges {
    pub rut: Option<crate::core::rut::Rut>,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub compania_id: Option<i64>,
    pub rol_personal_id: Option<i64>,
}
