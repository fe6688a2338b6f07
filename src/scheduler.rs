// src/scheduler.rs

use crate::clock::SharedClock;
use crate::pulse;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info};

/// Loop de pulso: grava o pulso a cada `period` até `shutdown` resolver.
///
/// A escrita roda em `spawn_blocking`, fora das threads do runtime.
/// Falhas de escrita são registradas e o loop segue para o próximo tick.
/// Retorna o número de pulsos gravados com sucesso.
pub async fn run_pulse_scheduler(
    pulse_path: PathBuf,
    period: Duration,
    clock: SharedClock,
    shutdown: impl Future<Output = ()>,
) -> u64 {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    info!(
        "[PULSO] Iniciando pulsos em {} a cada {:?}.",
        pulse_path.display(),
        period
    );

    let mut beats: u64 = 0;
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("[PULSO] Encerrando após {} pulso(s).", beats);
                return beats;
            }
            _ = ticker.tick() => {
                let path = pulse_path.clone();
                let clock = clock.clone();
                let written =
                    task::spawn_blocking(move || pulse::write_pulse(&path, clock.as_ref())).await;
                match written {
                    Ok(Ok(at)) => {
                        beats += 1;
                        debug!("[PULSO {}] Pulso gravado em {}.", beats, at);
                    }
                    Ok(Err(e)) => error!(
                        "[PULSO] Erro ao gravar pulso em {}: {:?}",
                        pulse_path.display(),
                        e
                    ),
                    Err(e) => error!("[PULSO] Tarefa de escrita do pulso falhou: {:?}", e),
                }
            }
        }
    }
}
