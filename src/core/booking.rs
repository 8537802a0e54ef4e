//! Buchungsstatus-Projektion: Service-Tag → Status, Farbe und Label.
//!
//! Reine Lesesicht, mutiert nie ein [`SceneElement`].

use super::SceneElement;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Buchungsstatus eines Services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Nicht gebucht
    #[default]
    NotBooked,
    /// Wartet auf Bestätigung durch den Vendor
    PendingConfirmation,
    /// Wartet auf Anzahlung
    PendingDeposit,
    /// Bestätigt
    Confirmed,
    /// Wartet auf Restzahlung
    PendingFinalPayment,
    /// Abgeschlossen
    Completed,
}

impl BookingStatus {
    /// Alle Status in Anzeige-Reihenfolge (Legende).
    pub const ALL: [BookingStatus; 6] = [
        BookingStatus::NotBooked,
        BookingStatus::PendingConfirmation,
        BookingStatus::PendingDeposit,
        BookingStatus::Confirmed,
        BookingStatus::PendingFinalPayment,
        BookingStatus::Completed,
    ];

    /// Feste Anzeigefarbe als Hex-String.
    pub fn color_hex(self) -> &'static str {
        match self {
            BookingStatus::NotBooked => "#94a3b8",
            BookingStatus::PendingConfirmation => "#fbbf24",
            BookingStatus::PendingDeposit => "#fb923c",
            BookingStatus::Confirmed => "#34d399",
            BookingStatus::PendingFinalPayment => "#60a5fa",
            BookingStatus::Completed => "#a3a3a3",
        }
    }

    /// Anzeigefarbe als RGBA (0.0–1.0) für den Renderer.
    pub fn color_rgba(self) -> [f32; 4] {
        hex_to_rgba(self.color_hex())
    }

    /// Anzeige-Label.
    pub fn label(self) -> &'static str {
        match self {
            BookingStatus::NotBooked => "Not booked",
            BookingStatus::PendingConfirmation => "Pending confirmation",
            BookingStatus::PendingDeposit => "Pending deposit",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::PendingFinalPayment => "Pending final payment",
            BookingStatus::Completed => "Completed",
        }
    }
}

fn hex_to_rgba(hex: &str) -> [f32; 4] {
    let digits = hex.trim_start_matches('#');
    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .map_or(0.0, |v| v as f32 / 255.0)
    };
    [channel(0), channel(2), channel(4), 1.0]
}

/// Buchungsdatensatz eines Services (vom Persistenz-Collaborator geliefert).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Anzeigename des Services
    pub service_name: String,
    /// Aktueller Status
    pub status: BookingStatus,
    /// Storniert
    #[serde(default)]
    pub cancelled: bool,
}

impl BookingRecord {
    /// Ob die Buchung das Löschen verknüpfter Elemente blockiert.
    pub fn is_active(&self) -> bool {
        !self.cancelled && self.status != BookingStatus::NotBooked
    }
}

/// Index Service-ID → Buchungsdatensatz.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingIndex {
    records: HashMap<String, BookingRecord>,
}

impl BookingIndex {
    /// Erstellt einen leeren Index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt einen Datensatz ein oder ersetzt ihn.
    pub fn insert(&mut self, service_id: impl Into<String>, record: BookingRecord) {
        self.records.insert(service_id.into(), record);
    }

    /// Liefert den Datensatz eines Services.
    pub fn get(&self, service_id: &str) -> Option<&BookingRecord> {
        self.records.get(service_id)
    }

    /// Ob der Service aktiv (nicht storniert) gebucht ist.
    pub fn has_active_booking(&self, service_id: &str) -> bool {
        self.records.get(service_id).is_some_and(BookingRecord::is_active)
    }
}

/// Ergebnis der Status-Abfrage eines Elements.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBadge {
    /// Status (ohne Tag oder ohne Datensatz: `NotBooked`)
    pub status: BookingStatus,
    /// Hex-Farbe
    pub color: &'static str,
    /// Label
    pub label: &'static str,
    /// Service-Name, falls getaggt und bekannt
    pub service_name: Option<String>,
}

/// Ermittelt Farbe und Label eines Elements aus dem Buchungsindex.
pub fn status_of(element: &SceneElement, index: &BookingIndex) -> StatusBadge {
    let record = element
        .service_tag
        .as_deref()
        .and_then(|tag| index.get(tag));
    let status = match record {
        Some(r) if !r.cancelled => r.status,
        _ => BookingStatus::NotBooked,
    };
    StatusBadge {
        status,
        color: status.color_hex(),
        label: status.label(),
        service_name: record.map(|r| r.service_name.clone()),
    }
}
