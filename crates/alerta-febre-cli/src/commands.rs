//! Command handlers.

use std::sync::Arc;

use anyhow::{bail, Context};
use tracing::debug;

use alerta_febre_core::config::Settings;
use alerta_febre_core::display::{
    medication_flag_label, record_address, summary_line, temperature_line,
};
use alerta_febre_core::intake::{RecordFields, ValidationError};
use alerta_febre_core::location::{DeniedLocation, FixedLocation, LocationProvider};
use alerta_febre_core::models::{MedicationStatus, Record, RecordId};
use alerta_febre_core::store::StoreError;
use alerta_febre_core::workflow::{IntakeError, RecordIntake};
use alerta_febre_geo::Coordinates;

use crate::cli::{Command, RegistrarArgs};

pub async fn run(command: Command, settings: &Settings) -> anyhow::Result<()> {
    match command {
        Command::Registrar(args) => registrar(args, settings).await,
        Command::Listar => listar(&open_store(settings)?).await,
        Command::Ver { id } => ver(&open_store(settings)?, id).await,
        Command::Editar(args) => {
            let intake = open_store(settings)?;
            let stored = intake
                .get(&RecordId::new(args.id.clone()))
                .await
                .map_err(user_facing)?;

            let fields = args.apply(RecordFields::from_record(&stored));
            let updated = intake.edit(&stored, &fields).await.map_err(user_facing)?;
            println!("Registro atualizado.");
            print_card(&updated);
            Ok(())
        }
        Command::Apagar { id, sim } => {
            if !sim {
                bail!("Confirme a exclusão do registro {} com --sim", id);
            }
            let intake = open_store(settings)?;
            intake
                .remove(&RecordId::new(id))
                .await
                .map_err(user_facing)?;
            println!("Registro apagado.");
            println!();
            listar(&intake).await
        }
    }
}

fn open(settings: &Settings, provider: Arc<dyn LocationProvider>) -> anyhow::Result<RecordIntake> {
    debug!(base_url = %settings.api.base_url, "Opening record registry");
    RecordIntake::from_settings(settings, provider).context("Failed to set up the registry client")
}

/// Registry access for commands that never resolve a location.
fn open_store(settings: &Settings) -> anyhow::Result<RecordIntake> {
    debug!(base_url = %settings.api.base_url, "Opening record registry");
    RecordIntake::without_location(settings).context("Failed to set up the registry client")
}

/// Position given on the command line, or none (treated as a refused
/// permission).
fn location_provider(args: &RegistrarArgs) -> Arc<dyn LocationProvider> {
    match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Arc::new(FixedLocation::new(Coordinates::new(lat, lon))),
        _ => Arc::new(DeniedLocation),
    }
}

async fn registrar(args: RegistrarArgs, settings: &Settings) -> anyhow::Result<()> {
    let intake = open(settings, location_provider(&args))?;

    let submission = intake
        .submit(&args.to_fields())
        .await
        .map_err(user_facing)?;

    if submission.permission_denied() {
        eprintln!("Permissão de localização negada; registro enviado sem localização.");
    }
    println!("Registro enviado com sucesso!");
    print_card(&submission.record);
    Ok(())
}

async fn listar(intake: &RecordIntake) -> anyhow::Result<()> {
    let records = intake.list().await.map_err(user_facing)?;
    if records.is_empty() {
        println!("Nenhum registro encontrado.");
        return Ok(());
    }
    for record in &records {
        print_card(record);
        println!();
    }
    Ok(())
}

async fn ver(intake: &RecordIntake, id: String) -> anyhow::Result<()> {
    let record = intake.get(&RecordId::new(id)).await.map_err(user_facing)?;
    print_card(&record);
    if let MedicationStatus::Taken(details) = &record.medicacao {
        println!(
            "  Remédio: {} {} às {}",
            details.nome, details.dosagem, details.hora
        );
    }
    if let Some(location) = &record.localizacao {
        println!("  Coordenadas: {}, {}", location.latitude, location.longitude);
    }
    Ok(())
}

fn print_card(record: &Record) {
    let id = record.id.as_ref().map(RecordId::as_str).unwrap_or("-");
    println!("[{}] {}", id, summary_line(record));
    println!("  {}", temperature_line(record));
    println!("  Tomou remédio: {}", medication_flag_label(record));
    println!("  {}", record_address(record));
}

/// Message shown for a failed action.
fn describe(err: &IntakeError) -> String {
    match err {
        IntakeError::Validation(ValidationError::MissingRequiredField(field)) => {
            format!("Preencha todos os campos obrigatórios ({}).", field)
        }
        IntakeError::Validation(ValidationError::InvalidMedicationFlag(flag)) => {
            format!("Valor inválido para tomouRemedio: {:?}", flag)
        }
        IntakeError::Store(StoreError::Network(_)) => {
            "Não foi possível conectar ao servidor.".to_string()
        }
        IntakeError::Store(e) if e.is_not_found() => "Registro não encontrado.".to_string(),
        IntakeError::Store(StoreError::Remote { status, .. }) => {
            format!("O servidor recusou a operação (HTTP {}).", status)
        }
        other => other.to_string(),
    }
}

fn user_facing(err: IntakeError) -> anyhow::Error {
    let message = describe(&err);
    anyhow::Error::new(err).context(message)
}
