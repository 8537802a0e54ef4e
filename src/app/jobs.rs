//! Hintergrund-Jobs (Speichern, Grundriss-Export) auf Worker-Threads.
//!
//! Der UI-Thread startet Jobs und pollt deren Ergebnisse ohne zu blockieren.
//! Solange ein Job läuft, ist der Einstieg in Drag/Rotate gesperrt.

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Art eines Hintergrund-Jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    /// Szene speichern
    SaveScene,
    /// Grundriss extrudieren, exportieren und hochladen
    ExportFloorplan,
}

impl JobKind {
    fn thread_name(self) -> &'static str {
        match self {
            JobKind::SaveScene => "scene-save",
            JobKind::ExportFloorplan => "floorplan-export",
        }
    }
}

/// Ergebnis eines abgeschlossenen Jobs
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// Szene wurde gespeichert
    SceneSaved {
        /// Projekt-ID
        project_id: String,
        /// Anzahl gespeicherter Elemente
        element_count: usize,
    },
    /// Modell wurde exportiert und hochgeladen
    ModelUploaded {
        /// Referenz des Stores auf das Modell
        reference: String,
        /// Dateiname des Modells
        file_name: String,
        /// Größe des Modells in Bytes
        byte_len: usize,
    },
    /// Job ist fehlgeschlagen
    Failed {
        /// Art des Jobs
        kind: JobKind,
        /// Fehlermeldung für die Anzeige
        message: String,
    },
}

struct PendingJob {
    kind: JobKind,
    rx: mpsc::Receiver<JobOutcome>,
}

/// Laufende Hintergrund-Jobs.
#[derive(Default)]
pub struct JobQueue {
    pending: Vec<PendingJob>,
}

impl JobQueue {
    /// Erstellt eine leere Job-Queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Startet `work` auf einem eigenen Thread.
    pub fn spawn<F>(&mut self, kind: JobKind, work: F)
    where
        F: FnOnce() -> JobOutcome + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let fallback_tx = tx.clone();
        let spawned = thread::Builder::new()
            .name(kind.thread_name().to_string())
            .spawn(move || {
                // Empfänger kann bereits verworfen sein (Szene verlassen)
                let _ = tx.send(work());
            });
        if let Err(e) = spawned {
            log::error!("Hintergrund-Job {:?} konnte nicht gestartet werden: {}", kind, e);
            let _ = fallback_tx.send(JobOutcome::Failed {
                kind,
                message: format!("Job konnte nicht gestartet werden: {e}"),
            });
        }
        log::debug!("Hintergrund-Job {:?} gestartet", kind);
        self.pending.push(PendingJob { kind, rx });
    }

    /// Gibt `true` zurück, solange mindestens ein Job läuft.
    pub fn is_busy(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Anzahl laufender Jobs.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Ob ein Job der angegebenen Art läuft.
    pub fn is_running(&self, kind: JobKind) -> bool {
        self.pending.iter().any(|job| job.kind == kind)
    }

    /// Sammelt alle abgeschlossenen Jobs ein, ohne zu blockieren.
    pub fn poll(&mut self) -> Vec<JobOutcome> {
        let mut finished = Vec::new();
        self.pending.retain(|job| match job.rx.try_recv() {
            Ok(outcome) => {
                finished.push(outcome);
                false
            }
            Err(mpsc::TryRecvError::Empty) => true,
            Err(mpsc::TryRecvError::Disconnected) => {
                finished.push(JobOutcome::Failed {
                    kind: job.kind,
                    message: "Hintergrund-Job unerwartet beendet".into(),
                });
                false
            }
        });
        finished
    }

    /// Wartet höchstens `timeout` auf alle laufenden Jobs (Headless-Betrieb, Tests).
    pub fn wait_all(&mut self, timeout: Duration) -> Vec<JobOutcome> {
        let deadline = Instant::now() + timeout;
        let mut finished = Vec::new();
        while self.is_busy() && Instant::now() < deadline {
            finished.extend(self.poll());
            if self.is_busy() {
                thread::sleep(Duration::from_millis(2));
            }
        }
        finished
    }

    /// Verwirft alle laufenden Jobs; ihre Ergebnisse werden nie zugestellt.
    pub fn discard_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_job_is_busy_until_polled() {
        let mut jobs = JobQueue::new();
        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        jobs.spawn(JobKind::SaveScene, move || {
            gate_rx.recv().ok();
            JobOutcome::SceneSaved {
                project_id: "p".into(),
                element_count: 0,
            }
        });

        assert!(jobs.is_busy());
        assert!(jobs.is_running(JobKind::SaveScene));
        assert!(jobs.poll().is_empty());

        gate_tx.send(()).unwrap();
        let outcomes = jobs.wait_all(Duration::from_secs(5));
        assert_eq!(outcomes.len(), 1);
        assert!(!jobs.is_busy());
    }

    #[test]
    fn discarded_jobs_never_deliver() {
        let mut jobs = JobQueue::new();
        jobs.spawn(JobKind::ExportFloorplan, || JobOutcome::Failed {
            kind: JobKind::ExportFloorplan,
            message: "x".into(),
        });
        assert_eq!(jobs.discard_all(), 1);
        assert!(jobs.poll().is_empty());
        assert!(!jobs.is_busy());
    }
}
