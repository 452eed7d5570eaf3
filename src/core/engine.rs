use crate::core::requests::{
    validate_carga_update, validate_conductor_maquina_update, validate_new_carga,
    validate_new_carga_bitacora, validate_new_conductor_maquina, validate_personal, PersonalMode,
};
use crate::domain::model::{Outcome, PayloadKind, ValidationSettings};
use crate::domain::ports::ReferenceLookup;
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::Value;

/// Runs the request validators against one reference source with fixed
/// settings.
pub struct ValidationEngine<R: ReferenceLookup> {
    references: R,
    settings: ValidationSettings,
}

impl<R: ReferenceLookup> ValidationEngine<R> {
    pub fn new(references: R) -> Self {
        Self::with_settings(references, ValidationSettings::default())
    }

    pub fn with_settings(references: R, settings: ValidationSettings) -> Self {
        Self {
            references,
            settings,
        }
    }

    pub fn settings(&self) -> &ValidationSettings {
        &self.settings
    }

    pub fn references(&self) -> &R {
        &self.references
    }

    /// Validates `body` as the given kind of request and renders the
    /// accepted payload as JSON.
    pub async fn check(&self, kind: PayloadKind, body: &Value) -> Result<Outcome<Value>> {
        tracing::debug!("Validating {:?} payload", kind);

        let references: &dyn ReferenceLookup = &self.references;
        let outcome = match kind {
            PayloadKind::Carga => to_json(validate_new_carga(body, references).await?)?,
            PayloadKind::CargaBitacora => {
                to_json(validate_new_carga_bitacora(body, references, &self.settings).await?)?
            }
            PayloadKind::CargaUpdate => {
                to_json(validate_carga_update(body, references, &self.settings).await?)?
            }
            PayloadKind::Conductor => to_json(validate_new_conductor_maquina(body, references).await?)?,
            PayloadKind::ConductorUpdate => {
                to_json(validate_conductor_maquina_update(body, references).await?)?
            }
            PayloadKind::PersonalCreate => {
                to_json(validate_personal(body, references, PersonalMode::Create).await?)?
            }
            PayloadKind::PersonalUpdate => {
                to_json(validate_personal(body, references, PersonalMode::Update).await?)?
            }
        };

        match &outcome {
            Outcome::Valid(_) => tracing::info!("{:?} payload accepted", kind),
            Outcome::Invalid(errors) => {
                tracing::info!("{:?} payload rejected with {} errors", kind, errors.len())
            }
        }

        Ok(outcome)
    }
}

fn to_json<T: Serialize>(outcome: Outcome<T>) -> Result<Outcome<Value>> {
    Ok(match outcome {
        Outcome::Valid(payload) => Outcome::Valid(serde_json::to_value(payload)?),
        Outcome::Invalid(errors) => Outcome::Invalid(errors),
    })
}
