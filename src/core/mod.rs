pub mod engine;
pub mod fields;
pub mod numeric;
pub mod pagination;
pub mod requests;
pub mod rut;

pub use crate::domain::model::{NumericInput, Outcome, Table, ValidationErrors};
pub use crate::domain::ports::ReferenceLookup;
pub use crate::utils::error::Result;
