//! pulse.rs - Arquivo de pulso: último instante conhecido em que o alvo estava no ar

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::types::DISPLAY_FORMAT;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Tamanho do timestamp no início da última linha (`MM-dd-yyyy HH:mm:ss`).
pub const PULSE_TIMESTAMP_LEN: usize = 19;

/// Sobrescreve o arquivo de pulso com o instante atual em hora local.
pub fn write_pulse(path: impl AsRef<Path>, clock: &dyn Clock) -> Result<DateTime<Utc>> {
    let now = clock.now();
    let stamp = now.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    fs::write(path.as_ref(), &stamp)?;
    debug!(path = %path.as_ref().display(), pulse = %stamp, "Pulso gravado");
    Ok(now)
}

/// Lê o timestamp dos 19 primeiros caracteres da última linha não vazia.
pub fn read_pulse(path: impl AsRef<Path>) -> Result<DateTime<Utc>> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_pulse(&contents)
}

pub fn parse_pulse(contents: &str) -> Result<DateTime<Utc>> {
    let last = contents
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| Error::Pulse("arquivo vazio".into()))?;

    let stamp = last
        .get(..PULSE_TIMESTAMP_LEN)
        .ok_or_else(|| Error::Pulse(format!("linha curta demais: {last:?}")))?;

    let naive = NaiveDateTime::parse_from_str(stamp, DISPLAY_FORMAT)
        .map_err(|e| Error::Pulse(format!("timestamp {stamp:?} inválido: {e}")))?;

    // no recuo do horário de verão fica a primeira ocorrência
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|ts| ts.with_timezone(&Utc))
        .ok_or_else(|| Error::Pulse(format!("horário local inexistente: {stamp}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use tempfile::tempdir;

    fn local(stamp: &str) -> DateTime<Utc> {
        let naive = NaiveDateTime::parse_from_str(stamp, DISPLAY_FORMAT).unwrap();
        Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn uses_last_non_empty_line() {
        let parsed = parse_pulse("01-01-2024 10:00:00\n03-15-2024 08:30:15 ok\n\n").unwrap();
        assert_eq!(parsed, local("03-15-2024 08:30:15"));
    }

    #[test]
    fn rejects_bad_contents() {
        assert!(matches!(parse_pulse(""), Err(Error::Pulse(_))));
        assert!(matches!(parse_pulse("01-01-2024"), Err(Error::Pulse(_))));
        assert!(matches!(
            parse_pulse("2024-01-01T10:00:00Z"),
            Err(Error::Pulse(_))
        ));
    }

    #[test]
    fn write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Pulse.aurlog");
        let clock = FixedClock(local("06-01-2024 12:00:00"));

        let written = write_pulse(&path, &clock).unwrap();
        assert_eq!(read_pulse(&path).unwrap(), written);
    }
}
