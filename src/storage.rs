//! storage.rs - Persistência do log de quedas em arquivo texto (uma queda por linha)

use crate::clock::{self, SharedClock};
use crate::error::{Error, Result};
use crate::outage::OutageLog;
use crate::types::OutageRecord;
use chrono::TimeDelta;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;
use tracing::{debug, info};

impl OutageLog {
    /// Carrega um log de quedas com o relógio do sistema.
    pub fn load_from_file(path: impl AsRef<Path>, max_age: TimeDelta) -> Result<Self> {
        Self::load_from_file_with_clock(path, max_age, clock::system())
    }

    /// Lê o arquivo inteiro e alimenta `add_outage` na ordem das linhas.
    ///
    /// Uma linha inválida (inclusive uma linha em branco no meio do arquivo)
    /// aborta a carga toda; não há recuperação parcial. Só as quebras de
    /// linha finais são toleradas.
    pub fn load_from_file_with_clock(
        path: impl AsRef<Path>,
        max_age: TimeDelta,
        clock: SharedClock,
    ) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let mut log = Self::with_clock(max_age, clock);
        for (number, line) in contents.trim_end_matches(['\r', '\n']).lines().enumerate() {
            let record = OutageRecord::deserialize(line).map_err(|source| Error::Parse {
                line: number + 1,
                source,
            })?;
            log.add_outage(record);
        }

        info!(
            path = %path.display(),
            outages = log.count(),
            "Log de quedas carregado"
        );
        Ok(log)
    }

    /// Como `load_from_file_with_clock`, mas um arquivo inexistente vira log vazio.
    pub fn load_or_default(
        path: impl AsRef<Path>,
        max_age: TimeDelta,
        clock: SharedClock,
    ) -> Result<Self> {
        let path = path.as_ref();
        match Self::load_from_file_with_clock(path, max_age, clock.clone()) {
            Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Log de quedas inexistente, iniciando vazio");
                Ok(Self::with_clock(max_age, clock))
            }
            other => other,
        }
    }

    /// Sobrescreve `path` com todas as quedas retidas, em ordem de início.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        for record in self {
            writeln!(writer, "{}", record.serialize())?;
        }
        writer.flush()?;

        info!(
            path = %path.display(),
            outages = self.count(),
            "Log de quedas salvo"
        );
        Ok(())
    }
}
