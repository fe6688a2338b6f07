use std::path::PathBuf;

/// Falha ao converter uma linha persistida em `OutageRecord`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("campo obrigatório ausente: {0}")]
    MissingField(&'static str),

    #[error("timestamp inválido em `{field}`: {value:?} ({reason})")]
    Timestamp {
        field: &'static str,
        value: String,
        reason: chrono::ParseError,
    },
}

/// Erros do núcleo (registro de quedas, persistência, pulso).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("linha {line} do log de quedas é inválida: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("erro de I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("índice {index} fora do intervalo (tamanho {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("o log de quedas está vazio")]
    Empty,

    #[error("arquivo de pulso inválido: {0}")]
    Pulse(String),

    #[error("arquivo não encontrado: {0}")]
    NotFound(PathBuf),

    #[error("erro de configuração: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("configuração inválida: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
