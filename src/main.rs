use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::{CredentialError, Result};
use qr_credentials::{cli, commands, config, error};
use qr_credentials_common::{
    importer, public_lookup, verify_scan, LookupOutcome, QrPayload, ScanOutcome,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG が優先、なければ --verbose で info
    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load()?;

    // 設定・テンプレートはストア不要
    match &cli.command {
        Commands::Config { set_base_path, show } => {
            if let Some(path) = set_base_path {
                config.set_base_path(path.clone())?;
                println!("✔ Ruta base configurada: {}", path);
            }

            if *show || set_base_path.is_none() {
                println!("Configuración:");
                println!("  Archivo: {}", Config::config_path()?.display());
                let base_path = config.base_path().unwrap_or_else(|| "(sin configurar)".into());
                println!("  Ruta base: {}", base_path);
                println!("  Datos estáticos: {}", config.dataset_file);
                println!("  Clave de almacenamiento: {}", config.storage_key);
                println!("  Directorio de datos: {}", config.data_dir()?.display());
            }
            return Ok(());
        }
        Commands::Template { output } => {
            let bytes = importer::write_template()?;
            std::fs::write(output, bytes)?;
            println!("✔ Plantilla guardada: {}", output.display());
            return Ok(());
        }
        _ => {}
    }

    let data_dir = match cli.data_dir.clone() {
        Some(dir) => dir,
        None => config.data_dir()?,
    };
    let (mut store, outcome) = commands::open_store(&config, data_dir).await;
    if let Some(notice) = outcome.notice() {
        eprintln!("⚠ {}", notice);
    }

    match cli.command {
        Commands::Import { file } => {
            let report = commands::import_file(&mut store, &file)?;
            println!("✔ {}", report.notice());
            if !report.duplicate_ids.is_empty() {
                eprintln!("⚠ IDs duplicados: {}", report.duplicate_ids.join(", "));
            }
        }

        Commands::List { search } => {
            let records = store.filter(search.as_deref().unwrap_or(""));
            println!(
                "{:<12} {:<12} {:<28} {:<18} {:<10} Foto",
                "ID", "Cédula", "Nombre", "Cargo", "Brigada"
            );
            for record in &records {
                println!("{}", commands::format_record_line(record));
            }
            println!("\n{} de {} registros", records.len(), store.len());
        }

        Commands::Lookup { query } => match public_lookup(&store, &query) {
            LookupOutcome::Found(record) => {
                println!("✔ Registro encontrado\n");
                print!("{}", commands::format_record_card(record));
            }
            LookupOutcome::NotFound => {
                println!("No se encontró ningún registro para \"{}\"", query.trim());
            }
            LookupOutcome::NotSearched => {
                println!("Ingrese un número de Cédula de Identidad");
            }
        },

        Commands::Verify { payload } => match verify_scan(&store, &payload) {
            ScanOutcome::Verified(record) => {
                println!("✔ Personal verificado correctamente\n");
                print!("{}", commands::format_record_card(record));
            }
            ScanOutcome::NotFound(id) => {
                println!("✘ ID no encontrado en la base de datos: {}", id);
            }
        },

        Commands::Qr { id } => {
            let record = store
                .find_by_id(&id)
                .ok_or_else(|| CredentialError::RecordNotFound(id.clone()))?;
            let payload = QrPayload::for_record(record);
            println!("{}", record.nombre);
            println!("  Contenido: {}", payload.text);
            println!("  Corrección de errores: {}", payload.error_correction.letter());
        }

        Commands::Photo { id, image } => {
            if commands::attach_photo_file(&mut store, &id, &image)? {
                println!("✔ Foto actualizada");
            }
        }

        Commands::Export { output } => {
            let output = output.unwrap_or_else(|| PathBuf::from(&config.export_file));
            let count = commands::export_to(&store, &output)?;
            println!(
                "✔ Copia de seguridad descargada: {} ({} registros)",
                output.display(),
                count
            );
        }

        Commands::Restore { input } => {
            let count = commands::restore_from(&mut store, &input)?;
            println!("✔ Se restauraron {} registros", count);
        }

        Commands::Clear { yes } => {
            if commands::clear_with_prompt(&mut store, yes)? {
                println!("✔ Datos eliminados");
            }
        }

        // 処理済み
        Commands::Config { .. } | Commands::Template { .. } => {}
    }

    Ok(())
}
