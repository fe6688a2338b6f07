use crate::error::{Error, Result};
use chrono::TimeDelta;
use config as config_crate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Nome base do arquivo de configuração opcional (qualquer formato suportado).
pub const DEFAULT_CONFIG_NAME: &str = "aurora";

/// Prefixo das variáveis de ambiente (`AURORA_LOG_PATH`, ...).
pub const ENV_PREFIX: &str = "AURORA";

/// Maior horizonte aceito (100 anos).
pub const MAX_AGE_DAYS_LIMIT: u32 = 36_500;

/// Configuração operacional, passada explicitamente a quem precisa.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    /// Arquivo do log de quedas.
    pub log_path: PathBuf,
    /// Arquivo de pulso (último instante em que o alvo respondeu).
    pub pulse_path: PathBuf,
    /// Horizonte de admissão em dias.
    pub max_age_days: u32,
    /// Linhas por página na listagem.
    pub page_size: usize,
    /// Intervalo entre pulsos em segundos.
    pub pulse_interval_secs: u64,
}

/// Valores vindos da linha de comando, aplicados por cima do resto.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_path: Option<PathBuf>,
    pub pulse_path: Option<PathBuf>,
    pub max_age_days: Option<u32>,
}

impl Config {
    /// Padrões → arquivo (`file` ou `aurora.*` opcional) → ambiente `AURORA_*`.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let file_source = match file {
            Some(path) => config_crate::File::from(path).required(true),
            None => config_crate::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = config_crate::Config::builder()
            .set_default("log_path", "Default.aurlog")?
            .set_default("pulse_path", "Pulse.aurlog")?
            .set_default("max_age_days", 365_i64)?
            .set_default("page_size", 19_i64)?
            .set_default("pulse_interval_secs", 60_i64)?
            .add_source(file_source)
            .add_source(config_crate::Environment::with_prefix(ENV_PREFIX))
            .build()?;
        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(path) = overrides.log_path {
            self.log_path = path;
        }
        if let Some(path) = overrides.pulse_path {
            self.pulse_path = path;
        }
        if let Some(days) = overrides.max_age_days {
            self.max_age_days = days;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_age_days == 0 {
            return Err(Error::InvalidConfig(
                "max_age_days deve ser maior que zero".into(),
            ));
        }
        if self.max_age_days > MAX_AGE_DAYS_LIMIT {
            return Err(Error::InvalidConfig(format!(
                "max_age_days deve ser no máximo {MAX_AGE_DAYS_LIMIT}"
            )));
        }
        if self.page_size == 0 {
            return Err(Error::InvalidConfig("page_size deve ser maior que zero".into()));
        }
        if self.pulse_interval_secs == 0 {
            return Err(Error::InvalidConfig(
                "pulse_interval_secs deve ser maior que zero".into(),
            ));
        }
        Ok(())
    }

    pub fn max_age(&self) -> TimeDelta {
        TimeDelta::days(i64::from(self.max_age_days))
    }

    pub fn pulse_interval(&self) -> Duration {
        Duration::from_secs(self.pulse_interval_secs)
    }
}
