use anyhow::Result;
use flota_validation::core::pagination::Pagination;
use flota_validation::domain::model::FloatParsing;
use flota_validation::utils::validation::Validate;
use flota_validation::{FlotaError, InMemoryReferences, PayloadKind, TomlConfig, ValidationEngine};
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_config_and_reference_file_drive_the_engine() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let refs_path = temp_dir.path().join("refs.csv");
    tokio::fs::write(
        &refs_path,
        "table,id\npersonal,20\nmaquina,7\ntipo_maquina,4\nbitacora,11\n",
    )
    .await?;

    let normalized_path = refs_path.to_str().unwrap().replace('\\', "/");
    let config_content = format!(
        r#"
[validation]
float_parsing = "strict"

[pagination]
default_page_size = 25
max_page_size = 50

[references]
path = "{}"
"#,
        normalized_path
    );
    let config_path = temp_dir.path().join("flota.toml");
    tokio::fs::write(&config_path, config_content).await?;

    let config = TomlConfig::from_file(&config_path)?;
    config.validate()?;
    assert_eq!(config.float_parsing(), FloatParsing::Strict);

    let references = InMemoryReferences::from_csv_file(config.references_path().unwrap())?;
    assert_eq!(references.len(), 4);

    let engine = ValidationEngine::with_settings(references, config.settings());

    let assignment = json!({"personal_id": 20, "maquina_id": 7, "tipo_maquina_id": 4, "ven_licencia": "15-01-2027"});
    assert!(engine.check(PayloadKind::Conductor, &assignment).await?.is_valid());

    let update = json!({"bitacora_id": 11, "litros": "12.5 litros"});
    let outcome = engine.check(PayloadKind::CargaUpdate, &update).await?;
    assert_eq!(
        outcome.errors().map(|e| e.errors.clone()),
        Some(vec!["litros: El valor debe ser un número válido.".to_string()])
    );

    let page = Pagination::from_query(Some("2"), Some("100"), &engine.settings().pagination).unwrap();
    assert_eq!((page.limit(), page.offset), (50, 50));
    Ok(())
}

#[test]
fn test_missing_reference_file_is_io_error() {
    let err = InMemoryReferences::from_csv_file("/nonexistent/flota/refs.csv").unwrap_err();
    assert!(matches!(err, FlotaError::IoError(_)));
}
