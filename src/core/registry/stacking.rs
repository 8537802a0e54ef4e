//! Eltern-Kind-Bindung (Stapeln): Host-Erkennung, Binden, Lösen.
//!
//! Ein gebundenes Kind speichert sein Offset relativ zum Host-Frame zum
//! Bindungszeitpunkt. Die Welttransformation ergibt sich immer aus
//! `compose(host_world, offset)`, dadurch entsteht bei wiederholten
//! Host-Bewegungen keine Drift.

use super::ElementRegistry;
use crate::core::transform::relative_to;
use crate::core::{ElementId, Footprint, SceneError, Transform};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Auswahlregel, wenn mehrere Hosts unter dem Ablagepunkt liegen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostTieBreak {
    /// Kleinste Grundfläche gewinnt (spezifischster Container)
    #[default]
    SmallestFootprint,
    /// Höchste Oberkante gewinnt
    Topmost,
}

impl ElementRegistry {
    /// Sucht den Host, auf dem `element_id` beim Ablegen an `drop_point` gestapelt würde.
    ///
    /// Kandidaten sind Hosts (`stackable_host`), deren Grundfläche `drop_point` enthält.
    /// Das Element selbst, seine Nachfahren und `excluded` kommen nie in Frage.
    /// Ist das Element nicht stapelbar, gibt es keinen Host.
    pub fn find_stacking_host(
        &self,
        element_id: ElementId,
        drop_point: Vec2,
        excluded: &HashSet<ElementId>,
        tie_break: HostTieBreak,
    ) -> Option<ElementId> {
        let element = self.get(element_id)?;
        if !element.stackable {
            return None;
        }

        let descendants: HashSet<ElementId> = self.descendants(element_id).into_iter().collect();

        self.iter()
            .filter(|host| {
                host.stackable_host
                    && host.id != element_id
                    && !descendants.contains(&host.id)
                    && !excluded.contains(&host.id)
            })
            .map(|host| (host, Footprint::of(host)))
            .filter(|(_, footprint)| footprint.contains(drop_point))
            .min_by(|(a, fa), (b, fb)| {
                let primary = match tie_break {
                    HostTieBreak::SmallestFootprint => fa.area().total_cmp(&fb.area()),
                    HostTieBreak::Topmost => b.top_elevation().total_cmp(&a.top_elevation()),
                };
                primary.then(a.id.cmp(&b.id))
            })
            .map(|(host, _)| host.id)
    }

    /// Bindet `child` an `host`. Die absolute Transformation des Kindes bleibt unverändert.
    ///
    /// Fehler: [`SceneError::InvalidStackingTarget`] wenn `host` kein Host ist oder
    /// die Bindung einen Zyklus erzeugen würde, [`SceneError::NotStackable`] wenn
    /// `child` nicht stapelbar ist.
    pub fn bind(&mut self, child: ElementId, host: ElementId) -> Result<(), SceneError> {
        let child_element = self.get(child).ok_or(SceneError::ElementNotFound(child))?;
        let host_element = self.get(host).ok_or(SceneError::ElementNotFound(host))?;

        if !host_element.stackable_host || host == child || self.is_descendant_of(host, child) {
            return Err(SceneError::InvalidStackingTarget(host));
        }
        if !child_element.stackable {
            return Err(SceneError::NotStackable(child));
        }
        if child_element.parent_id == Some(host) {
            return Ok(());
        }

        let child_world = child_element.world;
        let host_world = host_element.world;
        let same_bundle = child_element.bundle_id.is_some()
            && child_element.bundle_id == host_element.bundle_id;

        if let Some(element) = self.get_mut(child) {
            element.parent_id = Some(host);
            element.local = relative_to(&child_world, &host_world);
            element.bound_within_bundle = same_bundle;
        }
        self.propagate_from(child);
        log::debug!("Element {} auf Host {} gestapelt", child, host);
        Ok(())
    }

    /// Löst die Bindung und übernimmt die aktuelle Welttransformation als autoritativ.
    ///
    /// Gibt die eingebrannte Welttransformation zurück. Ungebundene Elemente bleiben unverändert.
    pub fn unbind(&mut self, child: ElementId) -> Result<Transform, SceneError> {
        let element = self.get(child).ok_or(SceneError::ElementNotFound(child))?;
        if element.parent_id.is_none() {
            return Ok(element.world);
        }
        self.detach_in_place(child);
        self.propagate_from(child);
        log::debug!("Element {} vom Host gelöst", child);
        self.world_transform(child)
            .ok_or(SceneError::ElementNotFound(child))
    }

    /// Relatives Offset eines gebundenen Kindes im Host-Frame.
    pub fn relative_offset(&self, child: ElementId) -> Option<Transform> {
        let element = self.get(child)?;
        element.parent_id.map(|_| element.local)
    }
}
