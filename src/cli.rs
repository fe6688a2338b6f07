use crate::config::Overrides;
use crate::generator::DEFAULT_AMOUNT;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Aurora: registro de quedas e estatísticas de uptime de um alvo monitorado.
///
/// O processo de heartbeat grava pulsos enquanto o alvo está no ar e, quando
/// ele volta, registra a queda do último pulso até agora.
#[derive(Debug, Parser)]
#[command(version, about, long_about)]
pub struct Cli {
    /// Arquivo de configuração (padrão: `aurora.*` opcional no diretório atual).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Arquivo do log de quedas.
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    /// Arquivo de pulso.
    #[arg(long, global = true)]
    pub pulse: Option<PathBuf>,

    /// Horizonte de admissão em dias.
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_age_days: Option<u32>,

    /// Mais detalhes no log (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Menos detalhes no log.
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Grava um pulso (uma vez, ou periodicamente com --watch/--every).
    Pulse {
        /// Repete no intervalo configurado até Ctrl-C.
        #[arg(long)]
        watch: bool,

        /// Repete a cada N segundos até Ctrl-C.
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        every: Option<u64>,
    },

    /// Registra a queda do último pulso até agora.
    LogOutage,

    /// Gera um histórico sintético e sobrescreve o log.
    Generate {
        #[arg(long, default_value_t = DEFAULT_AMOUNT)]
        amount: usize,

        /// Semente para uma geração reprodutível.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Resumo de uptime/downtime.
    Status {
        /// Saída em JSON.
        #[arg(long)]
        json: bool,
    },

    /// Lista as quedas, uma página por vez (padrão: a última).
    List {
        /// Página, a partir de 1.
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        page: Option<u64>,
    },
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            log_path: self.log.clone(),
            pulse_path: self.pulse.clone(),
            max_age_days: self.max_age_days,
        }
    }

    /// `RUST_LOG` tem precedência; senão o nível vem de -v/-q.
    pub fn env_filter(&self) -> EnvFilter {
        let level = match (self.verbose, self.quiet) {
            (0, 0) => "warn",
            (0, _) => "error",
            (1, _) => "info",
            (2, _) => "debug",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }
}
