//! # Ficha CLI
//!
//! Usage:
//!   ficha render record.json -o ficha.pdf
//!   ficha batch records.json --date 2025-03-05
//!   ficha example > record.json
//!
//! Input `-` reads from stdin. Without `-o` the output is named after the
//! folio (single record) or the date (batch). Set `RUST_LOG=debug` for
//! per-page logging.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ficha::{FichaConfig, FichaEngine, FichaError, FormRecord};

#[derive(Parser)]
#[command(name = "ficha")]
#[command(about = "Print pre-registration fichas: original and copy on one Letter page")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a single record (one page)
    Render(RenderArgs),

    /// Render every record of a JSON array, one page each
    Batch(RenderArgs),

    /// Print a sample record as JSON
    Example,
}

#[derive(Args)]
struct RenderArgs {
    /// Input JSON file, or `-` for stdin
    input: PathBuf,

    /// Output PDF path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Branding configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Date printed as "today" (yyyy-mm-dd); defaults to the local date
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected yyyy-mm-dd: {e}"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Render(args) => run(&args, false),
        Commands::Batch(args) => run(&args, true),
        Commands::Example => print_example(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &RenderArgs, batch: bool) -> Result<(), FichaError> {
    let config = match &args.config {
        Some(path) => FichaConfig::load(path)?,
        None => FichaConfig::default(),
    };
    let today = args.date.unwrap_or_else(|| Local::now().date_naive());
    let engine = FichaEngine::with_today(config, today);

    let input = read_input(&args.input)?;
    let records = if batch {
        ficha::parse_records(&input)?
    } else {
        vec![serde_json::from_str::<FormRecord>(&input)?]
    };

    let output = match (&args.output, records.as_slice()) {
        (Some(path), _) => path.clone(),
        (None, [single]) if !batch => PathBuf::from(ficha::record_file_name(single)),
        (None, _) => PathBuf::from(ficha::batch_file_name(today)),
    };

    let pdf = ficha::render_batch(&records, &engine)?;
    fs::write(&output, &pdf)?;
    info!(
        records = records.len(),
        bytes = pdf.len(),
        output = %output.display(),
        "written"
    );
    Ok(())
}

fn read_input(path: &Path) -> Result<String, FichaError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn print_example() -> Result<(), FichaError> {
    let record: FormRecord = serde_json::from_str(EXAMPLE_RECORD)?;
    let pretty = serde_json::to_string_pretty(&record)?;
    println!("{pretty}");
    Ok(())
}

const EXAMPLE_RECORD: &str = r#"{
  "folio": "PRE-2025-0001",
  "created_at": "2025-03-05T10:20:30-06:00",
  "nombre": "Ana Sofía",
  "apellido_paterno": "García",
  "apellido_materno": "López",
  "curp": "GALA080515MMNRPN09",
  "sexo": "Mujer",
  "fecha_nacimiento": "2008-05-15",
  "estado_civil": "Soltera",
  "telefono": "4431234567",
  "correo": "ana.garcia@example.com",
  "lugar_nacimiento": "Morelia, Michoacán",
  "domicilio": "Av. Madero Poniente 120",
  "colonia": "Centro",
  "municipio": "Morelia",
  "codigo_postal": "58000",
  "carrera_nombre": "Técnico en Programación",
  "segunda_opcion_carrera": "Técnico Agropecuario",
  "tercera_opcion_carrera": null,
  "escuela_tipo": "Pública",
  "escuela_nombre": "Escuela Secundaria Técnica No. 5",
  "escuela_municipio": "Morelia",
  "promedio_general": 9.2,
  "tutor_nombre": "Rosa López Martínez",
  "tutor_parentesco": "Madre",
  "tutor_curp": "LOMR800101MMNPRS01",
  "tutor_ocupacion": "Comerciante",
  "tutor_grado_estudios": "Preparatoria",
  "tutor_telefono": "4437654321"
}"#;
