//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use alerta_febre_core::intake::RecordFields;

#[derive(Parser, Debug)]
#[command(name = "alerta-febre", version, about = "Registro de febre e medicação")]
pub struct Cli {
    /// Settings file (defaults to ./alerta-febre.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Registry address, overriding settings
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a new record
    Registrar(RegistrarArgs),
    /// List all records
    Listar,
    /// Show one record
    Ver { id: String },
    /// Edit a record; omitted fields keep their stored values
    Editar(EditarArgs),
    /// Delete a record
    Apagar {
        id: String,
        /// Confirm deletion
        #[arg(long)]
        sim: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Sim,
    Nao,
}

impl Flag {
    pub fn as_wire(&self) -> &'static str {
        match self {
            Flag::Sim => "sim",
            Flag::Nao => "nao",
        }
    }
}

#[derive(Args, Debug)]
pub struct RegistrarArgs {
    #[arg(long, default_value = "")]
    pub nome: String,
    #[arg(long, default_value = "")]
    pub idade: String,
    /// Temperature in °C
    #[arg(long, default_value = "")]
    pub temperatura: String,
    #[arg(long, value_enum)]
    pub tomou_remedio: Option<Flag>,
    /// Medication name
    #[arg(long, default_value = "")]
    pub remedio: String,
    #[arg(long, default_value = "")]
    pub dosagem: String,
    /// Time taken (e.g. 14:00)
    #[arg(long, default_value = "")]
    pub hora: String,
    /// Latitude; without coordinates the record is sent without location
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

impl RegistrarArgs {
    pub fn to_fields(&self) -> RecordFields {
        RecordFields {
            nome: self.nome.clone(),
            idade: self.idade.clone(),
            temperatura: self.temperatura.clone(),
            tomou_remedio: self.tomou_remedio.map(|f| f.as_wire().to_string()),
            nome_remedio: self.remedio.clone(),
            dosagem: self.dosagem.clone(),
            hora: self.hora.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct EditarArgs {
    pub id: String,
    #[arg(long)]
    pub nome: Option<String>,
    #[arg(long)]
    pub idade: Option<String>,
    #[arg(long)]
    pub temperatura: Option<String>,
    #[arg(long, value_enum)]
    pub tomou_remedio: Option<Flag>,
    #[arg(long)]
    pub remedio: Option<String>,
    #[arg(long)]
    pub dosagem: Option<String>,
    #[arg(long)]
    pub hora: Option<String>,
}

impl EditarArgs {
    /// Overlay the given options on the stored form values.
    pub fn apply(&self, mut fields: RecordFields) -> RecordFields {
        fn set(target: &mut String, value: &Option<String>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        set(&mut fields.nome, &self.nome);
        set(&mut fields.idade, &self.idade);
        set(&mut fields.temperatura, &self.temperatura);
        set(&mut fields.nome_remedio, &self.remedio);
        set(&mut fields.dosagem, &self.dosagem);
        set(&mut fields.hora, &self.hora);
        if let Some(flag) = self.tomou_remedio {
            fields.tomou_remedio = Some(flag.as_wire().to_string());
        }
        fields
    }
}
