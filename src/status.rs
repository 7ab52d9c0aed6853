// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LOG DE STATUS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Log append-only de progresso, seguro para append concorrente durante o
// fan-out. Qualquer superfície de progresso ao vivo se inscreve via
// StatusSink injetado; não existe singleton de processo.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::sync::{Arc, RwLock};

/// Quantas entradas recentes são espelhadas para o sink.
const SINK_TAIL: usize = 5;

/// Superfície de progresso ao vivo.
///
/// Recebe as últimas entradas do log a cada atualização. Implementações
/// devem ser baratas; o log completo fica disponível no `QueryResult`.
pub trait StatusSink: Send + Sync {
    /// Chamado após cada append com a cauda recente do log.
    fn on_status(&self, recent: &[String]);
}

/// Sink que espelha o progresso no logger.
#[derive(Debug, Default)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn on_status(&self, recent: &[String]) {
        if let Some(last) = recent.last() {
            log::info!("{}", last);
        }
    }
}

/// Log de status append-only com timestamps.
///
/// Resetado no início de cada query; as entradas carregam prefixo
/// `[HH:MM:SS]`. O lock cobre apenas o append, então workers concorrentes
/// podem registrar progresso sem ordem garantida entre si.
#[derive(Default)]
pub struct StatusLog {
    entries: RwLock<Vec<String>>,
    sink: Option<Arc<dyn StatusSink>>,
}

impl StatusLog {
    /// Cria um log sem sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cria um log espelhando para o sink fornecido.
    pub fn with_sink(sink: Arc<dyn StatusSink>) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            sink: Some(sink),
        }
    }

    /// Adiciona uma entrada timestampada e notifica o sink com a cauda.
    pub fn push(&self, message: impl AsRef<str>) {
        let stamped = format!(
            "[{}] {}",
            chrono::Local::now().format("%H:%M:%S"),
            message.as_ref()
        );

        let tail = {
            let mut entries = self
                .entries
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            entries.push(stamped);
            let start = entries.len().saturating_sub(SINK_TAIL);
            entries[start..].to_vec()
        };

        if let Some(sink) = &self.sink {
            sink.on_status(&tail);
        }
    }

    /// Descarta todas as entradas (início de uma nova query).
    pub fn reset(&self) {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    /// Cópia de todas as entradas acumuladas.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Número de entradas no log.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Se o log está vazio.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Sink de teste que acumula cada cauda recebida.
    #[derive(Default)]
    struct VecSink {
        seen: Mutex<Vec<Vec<String>>>,
    }

    impl StatusSink for VecSink {
        fn on_status(&self, recent: &[String]) {
            self.seen.lock().unwrap().push(recent.to_vec());
        }
    }

    #[test]
    fn test_push_stamps_entries() {
        let status = StatusLog::new();
        status.push("🚀 Starting");

        let entries = status.snapshot();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].starts_with('['));
        assert!(entries[0].ends_with("🚀 Starting"));
    }

    #[test]
    fn test_reset_clears_entries() {
        let status = StatusLog::new();
        status.push("one");
        status.push("two");
        status.reset();
        assert!(status.is_empty());
    }

    #[test]
    fn test_sink_receives_capped_tail() {
        let sink = Arc::new(VecSink::default());
        let status = StatusLog::with_sink(sink.clone());

        for i in 0..8 {
            status.push(format!("event {}", i));
        }

        let seen = sink.seen.lock().unwrap();
        assert_eq!(seen.len(), 8);
        // Espelho limitado às últimas 5 entradas
        let last = seen.last().unwrap();
        assert_eq!(last.len(), 5);
        assert!(last[4].ends_with("event 7"));
        // ...mas o log completo é retido
        assert_eq!(status.len(), 8);
    }

    #[test]
    fn test_concurrent_append_is_safe() {
        let status = Arc::new(StatusLog::new());
        let mut handles = Vec::new();

        for worker in 0..4 {
            let status = status.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..25 {
                    status.push(format!("worker {} step {}", worker, i));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(status.len(), 100);
    }
}
