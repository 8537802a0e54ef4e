//! Begrenztes Protokoll ausgeführter Commands samt Ergebnis.
//!
//! Dient der Diagnose abgelehnter Bearbeitungen (gesperrte Elemente,
//! laufende Hintergrund-Jobs) und der Prüfung von Command-Folgen in Tests.

use super::AppCommand;
use std::collections::VecDeque;

/// Ergebnis eines ausgeführten Commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Command wurde angewendet
    Applied,
    /// Command wurde mit der enthaltenen Meldung abgelehnt
    Rejected(String),
}

/// Ein protokollierter Command.
#[derive(Debug, Clone)]
pub struct LoggedCommand {
    pub command: AppCommand,
    pub outcome: CommandOutcome,
}

/// Ringpuffer der zuletzt ausgeführten Commands.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: VecDeque<LoggedCommand>,
}

impl CommandLog {
    const CAPACITY: usize = 512;

    /// Erstellt ein leeres Command-Log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Protokolliert einen Command. Ist der Puffer voll, fällt der älteste Eintrag heraus.
    pub fn record(&mut self, command: AppCommand, outcome: CommandOutcome) {
        if let CommandOutcome::Rejected(reason) = &outcome {
            log::debug!("Command {:?} abgelehnt: {}", command, reason);
        }
        if self.entries.len() == Self::CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(LoggedCommand { command, outcome });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Alle protokollierten Commands, älteste zuerst.
    pub fn commands(&self) -> impl Iterator<Item = &AppCommand> + '_ {
        self.entries.iter().map(|e| &e.command)
    }

    /// Die letzten `count` Commands, älteste zuerst.
    pub fn recent(&self, count: usize) -> Vec<&AppCommand> {
        let skip = self.entries.len().saturating_sub(count);
        self.commands().skip(skip).collect()
    }

    /// Abgelehnte Commands, älteste zuerst.
    pub fn rejected(&self) -> impl Iterator<Item = &LoggedCommand> + '_ {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, CommandOutcome::Rejected(_)))
    }

    /// Letzter Eintrag.
    pub fn last(&self) -> Option<&LoggedCommand> {
        self.entries.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DeleteScope;

    #[test]
    fn full_log_drops_oldest_entry_first() {
        let mut log = CommandLog::new();
        log.record(AppCommand::Undo, CommandOutcome::Applied);
        for _ in 0..CommandLog::CAPACITY {
            log.record(AppCommand::ToggleOverlay, CommandOutcome::Applied);
        }

        assert_eq!(log.len(), CommandLog::CAPACITY);
        assert!(log.commands().all(|c| matches!(c, AppCommand::ToggleOverlay)));
    }

    #[test]
    fn rejected_entries_keep_their_reason() {
        let mut log = CommandLog::new();
        log.record(AppCommand::DuplicateSelection, CommandOutcome::Applied);
        log.record(
            AppCommand::DeleteSelection {
                scope: DeleteScope::Single,
            },
            CommandOutcome::Rejected("Auswahl ist leer".into()),
        );
        log.record(AppCommand::ClearSelection, CommandOutcome::Applied);

        let rejected: Vec<_> = log.rejected().collect();
        assert_eq!(rejected.len(), 1);
        assert!(matches!(
            rejected[0].command,
            AppCommand::DeleteSelection { .. }
        ));
        assert_eq!(
            rejected[0].outcome,
            CommandOutcome::Rejected("Auswahl ist leer".into())
        );
        assert!(matches!(
            log.recent(2).as_slice(),
            [AppCommand::DeleteSelection { .. }, AppCommand::ClearSelection]
        ));
        assert!(log.last().is_some_and(|e| e.outcome == CommandOutcome::Applied));
    }
}
