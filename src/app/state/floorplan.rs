use crate::floorplan::Floorplan;

/// Zustand der Grundriss-Bearbeitung.
#[derive(Debug, Clone, Default)]
pub struct FloorplanState {
    /// Aktuell bearbeiteter Grundriss
    pub plan: Floorplan,
    /// Store-Referenz des zuletzt hochgeladenen Modells
    pub last_upload: Option<String>,
}

impl FloorplanState {
    /// Erstellt einen leeren Grundriss-Zustand.
    pub fn new() -> Self {
        Self::default()
    }
}
