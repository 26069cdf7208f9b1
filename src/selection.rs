//! Selection Store
//!
//! Holds the user's current buoy/webcam pick plus the static catalogs the
//! picks come from. The store is pure bookkeeping: it never validates
//! identifiers (an unknown id surfaces as a downstream fetch error) and
//! never talks to the controllers itself; the dashboard reads the
//! [`SelectionChange`] out of a set call and drives controller lifecycles.

use serde::{Deserialize, Serialize};

/// One selectable buoy station.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Buoy {
    pub id: String,
    pub name: String,
}

/// One selectable webcam feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Webcam {
    pub id: String,
    pub name: String,
    pub location: String,
}

/// The current identifier pair. Either side may be empty, meaning "no feed
/// active". Mutated only by explicit user action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub buoy_id: Option<String>,
    pub webcam_id: Option<String>,
}

/// Outcome of a set call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    /// The value was already current. Callers must not restart polling or
    /// re-fire teardown side effects.
    Unchanged,
    /// A real edit; `previous` is the identifier being replaced.
    Changed { previous: Option<String> },
}

/// Catalog-backed store of the two current feed identifiers.
pub struct SelectionStore {
    buoys: Vec<Buoy>,
    webcams: Vec<Webcam>,
    selection: Selection,
}

impl SelectionStore {
    /// Create a store with injected catalogs and nothing selected.
    pub fn new(buoys: Vec<Buoy>, webcams: Vec<Webcam>) -> Self {
        Self {
            buoys,
            webcams,
            selection: Selection::default(),
        }
    }

    /// Available buoy stations.
    pub fn buoys(&self) -> &[Buoy] {
        &self.buoys
    }

    /// Available webcam feeds.
    pub fn webcams(&self) -> &[Webcam] {
        &self.webcams
    }

    /// The current identifier pair.
    pub fn current(&self) -> Selection {
        self.selection.clone()
    }

    /// Set the buoy identifier. Same-value sets are no-ops.
    pub fn set_buoy(&mut self, buoy_id: Option<&str>) -> SelectionChange {
        if self.selection.buoy_id.as_deref() == buoy_id {
            return SelectionChange::Unchanged;
        }
        let previous = self.selection.buoy_id.take();
        self.selection.buoy_id = buoy_id.map(str::to_owned);
        SelectionChange::Changed { previous }
    }

    /// Set the webcam identifier. Same-value sets are no-ops.
    pub fn set_webcam(&mut self, webcam_id: Option<&str>) -> SelectionChange {
        if self.selection.webcam_id.as_deref() == webcam_id {
            return SelectionChange::Unchanged;
        }
        let previous = self.selection.webcam_id.take();
        self.selection.webcam_id = webcam_id.map(str::to_owned);
        SelectionChange::Changed { previous }
    }
}
