//! Fehlerarten der Szenen- und Grundriss-Engine.

use super::ElementId;
use thiserror::Error;

/// Domänenfehler. Wird über `anyhow` propagiert und bleibt per `downcast_ref` prüfbar.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// Positions-/Rotationsänderung an einem gesperrten Element
    #[error("Element {0} ist gesperrt")]
    LockedElement(ElementId),
    /// Move/Rotate auf einer Selektion mit mindestens einem gesperrten Element
    #[error("Selektion enthält gesperrtes Element {0}")]
    SelectionContainsLockedElement(ElementId),
    /// Löschen blockiert, solange eine Buchung auf das Element verweist
    #[error("Element {element} gehört zur Buchung von Service '{service}' und kann nicht gelöscht werden")]
    CannotDeleteBookedElement {
        /// Betroffenes Element
        element: ElementId,
        /// Referenzierter Service
        service: String,
    },
    /// parentId zeigt auf ein fehlendes Element (wird durch Abkoppeln geheilt)
    #[error("Element {child} verweist auf fehlendes Eltern-Element {parent}")]
    OrphanedParentReference {
        /// Kind mit ungültiger Referenz
        child: ElementId,
        /// Fehlender Parent
        parent: ElementId,
    },
    /// Grundriss enthält keinen geschlossenen Raum
    #[error("Grundriss enthält keinen geschlossenen Raum")]
    OpenFloorplan,
    /// Export ohne Geometrie
    #[error("Keine Geometrie zum Exportieren vorhanden")]
    EmptyGeometry,
    /// Stapel-Ziel ist kein Host oder würde einen Zyklus erzeugen
    #[error("Element {0} ist kein gültiges Stapel-Ziel")]
    InvalidStackingTarget(ElementId),
    /// Element darf nicht gestapelt werden
    #[error("Element {0} ist nicht stapelbar")]
    NotStackable(ElementId),
    /// Unbekannte Element-ID
    #[error("Element {0} existiert nicht")]
    ElementNotFound(ElementId),
    /// Befehl benötigt eine nicht-leere Selektion
    #[error("Keine Elemente selektiert")]
    EmptySelection,
    /// Service-Tag nur für genau ein Tisch-Element
    #[error("Service-Zuordnung nur für genau ein Tisch-Element möglich")]
    InvalidServiceTarget,
    /// Wand verweist auf identische oder fehlende Ecken
    #[error("Ungültige Wand zwischen Ecke {0} und Ecke {1}")]
    InvalidWall(u64, u64),
    /// Unbekannte Ecke im Grundriss
    #[error("Ecke {0} existiert nicht")]
    UnknownCorner(u64),
    /// Geometrie mit nicht-endlichen Werten oder kaputten Indizes
    #[error("Fehlerhafte Geometrie: {0}")]
    MalformedGeometry(String),
    /// Katalog-Eintrag nicht gefunden
    #[error("Katalog-Eintrag '{0}' nicht gefunden")]
    UnknownCatalogItem(String),
    /// Interaktion gesperrt, solange Speichern/Export läuft
    #[error("Bearbeitung gesperrt, solange Speichern/Export läuft")]
    InteractionDisabled,
}
