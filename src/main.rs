use anyhow::{Context, Result};
use aurora::cli::{Cli, Command};
use aurora::config::Config;
use aurora::dashboard::{self, Summary};
use aurora::{Error, OutageLog, clock, generator, heartbeat, pulse, scheduler};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Inicializa o sistema de logging (tracing), sempre em stderr
    tracing_subscriber::fmt()
        .with_env_filter(cli.env_filter())
        .with_writer(std::io::stderr)
        .init();

    // Configuração explícita: padrões, arquivo, ambiente e linha de comando
    let config = Config::load(cli.config.as_deref())
        .context("falha ao carregar a configuração")?
        .with_overrides(cli.overrides());
    config.validate()?;
    debug!(?config, "Configuração carregada");

    let clock = clock::system();

    match cli.command {
        Command::Pulse { watch, every } => {
            if !watch && every.is_none() {
                let at = pulse::write_pulse(&config.pulse_path, clock.as_ref())?;
                println!(
                    "Pulso gravado em {}: {}",
                    config.pulse_path.display(),
                    dashboard::format_local(&at)
                );
                return Ok(());
            }

            let period = every
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.pulse_interval());
            let shutdown = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    error!("Erro ao aguardar Ctrl-C: {:?}", e);
                }
            };
            let beats =
                scheduler::run_pulse_scheduler(config.pulse_path.clone(), period, clock, shutdown)
                    .await;
            info!(beats, "Loop de pulso encerrado");
        }

        Command::LogOutage => {
            let record = heartbeat::log_outage(
                &config.pulse_path,
                &config.log_path,
                config.max_age(),
                clock,
            )
            .with_context(|| {
                format!(
                    "falha ao registrar queda (pulso {}, log {})",
                    config.pulse_path.display(),
                    config.log_path.display()
                )
            })?;
            println!(
                "Queda registrada de {} até {}, duração {}",
                dashboard::format_local(&record.start),
                dashboard::format_local(&record.end),
                dashboard::format_span(record.duration())
            );
        }

        Command::Generate { amount, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let log = generator::generate(amount, config.max_age(), clock, &mut rng);
            log.save_to_file(&config.log_path)?;
            println!(
                "{} queda(s) sintética(s) gravadas em {}",
                log.count(),
                config.log_path.display()
            );
        }

        Command::Status { json } => {
            let log = load_existing(&config)?;
            let summary = Summary::from_log(&log);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", dashboard::render_summary(&summary));
            }
        }

        Command::List { page } => {
            let log = load_existing(&config)?;
            let pages = dashboard::page_count(log.count(), config.page_size);
            let page = match page {
                Some(p) => usize::try_from(p - 1)?,
                None => pages - 1,
            };
            print!(
                "{}",
                dashboard::render_page(&log, page, config.page_size)?
            );
        }
    }

    Ok(())
}

/// Os front-ends de exibição não criam arquivos: log ausente é erro.
fn load_existing(config: &Config) -> Result<OutageLog> {
    if !config.log_path.exists() {
        return Err(Error::NotFound(config.log_path.clone()).into());
    }
    let log = OutageLog::load_from_file(&config.log_path, config.max_age())
        .with_context(|| format!("falha ao carregar {}", config.log_path.display()))?;
    Ok(log)
}
