//! Location Registry
//!
//! Static lookup of monitored sites. Loaded once, read-only afterwards;
//! the engine consults it but does not own it.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One monitored site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub key: String,
    pub name: String,
    pub state: String,
    #[serde(rename = "type")]
    pub site_type: String,
    pub lat: f64,
    pub lon: f64,
}

impl LocationEntry {
    pub fn new(key: &str, name: &str, state: &str, site_type: &str, lat: f64, lon: f64) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            state: state.to_string(),
            site_type: site_type.to_string(),
            lat,
            lon,
        }
    }

    fn validate(&self) -> EngineResult<()> {
        let lat_ok = (-90.0..=90.0).contains(&self.lat);
        let lon_ok = (-180.0..=180.0).contains(&self.lon);
        if !lat_ok || !lon_ok {
            return Err(EngineError::InvalidCoordinates {
                key: self.key.clone(),
                lat: self.lat,
                lon: self.lon,
            });
        }
        Ok(())
    }
}

/// Ordered, immutable set of sites
#[derive(Debug, Clone)]
pub struct LocationRegistry {
    entries: Vec<LocationEntry>,
}

impl LocationRegistry {
    /// Build from entries, rejecting bad coordinates and duplicate keys
    pub fn new(entries: Vec<LocationEntry>) -> EngineResult<Self> {
        for (i, entry) in entries.iter().enumerate() {
            entry.validate()?;
            if entries[..i].iter().any(|e| e.key == entry.key) {
                return Err(EngineError::DuplicateLocation(entry.key.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Built-in North-East India strategic sites
    pub fn northeast_india() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&LocationEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Like `get`, but unknown keys are an error
    pub fn resolve(&self, key: &str) -> EngineResult<&LocationEntry> {
        self.get(key)
            .ok_or_else(|| EngineError::LocationNotFound(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in registry order
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn entries(&self) -> &[LocationEntry] {
        &self.entries
    }

    pub fn by_state(&self, state: &str) -> Vec<&LocationEntry> {
        self.entries
            .iter()
            .filter(|e| e.state.eq_ignore_ascii_case(state))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LocationRegistry {
    fn default() -> Self {
        Self::northeast_india()
    }
}

fn builtin_entries() -> Vec<LocationEntry> {
    vec![
        LocationEntry::new("Guwahati_Airport", "Guwahati Airport Road, Assam", "Assam", "Critical Infrastructure", 26.1061, 91.5859),
        LocationEntry::new("Imphal_City", "Imphal City Center, Manipur", "Manipur", "Urban Center", 24.8170, 93.9368),
        LocationEntry::new("Kohima_NH29", "Kohima NH-29, Nagaland", "Nagaland", "Highway", 25.6747, 94.1078),
        LocationEntry::new("Shillong_Bypass", "Shillong Bypass Road, Meghalaya", "Meghalaya", "Highway", 25.5788, 91.8933),
        LocationEntry::new("Agartala_Station", "Agartala Railway Station, Tripura", "Tripura", "Critical Infrastructure", 23.8315, 91.2868),
        LocationEntry::new("Itanagar_Zero", "Itanagar Zero Point, Arunachal Pradesh", "Arunachal Pradesh", "Urban Center", 27.0844, 93.6053),
        LocationEntry::new("Aizawl_NH54", "Aizawl NH-54, Mizoram", "Mizoram", "Highway", 23.7271, 92.7176),
        LocationEntry::new("Dimapur_Junction", "Dimapur Junction, Nagaland", "Nagaland", "Critical Infrastructure", 25.9097, 93.7267),
        LocationEntry::new("Silchar_Medical", "Silchar Medical College Road, Assam", "Assam", "Medical Facility", 24.8333, 92.7789),
        LocationEntry::new("Tinsukia_Border", "Tinsukia Border Checkpoint, Assam", "Assam", "Border Area", 27.4900, 95.3600),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_is_valid() {
        let registry = LocationRegistry::northeast_india();
        assert_eq!(registry.len(), 10);
        assert!(LocationRegistry::new(registry.entries().to_vec()).is_ok());
        assert_eq!(registry.keys()[0], "Guwahati_Airport");
    }

    #[test]
    fn test_lookup() {
        let registry = LocationRegistry::default();
        let entry = registry.get("Kohima_NH29").unwrap();
        assert_eq!(entry.state, "Nagaland");
        assert_eq!(entry.site_type, "Highway");
        assert!(registry.get("Atlantis").is_none());
        assert!(matches!(
            registry.resolve("Atlantis"),
            Err(EngineError::LocationNotFound(key)) if key == "Atlantis"
        ));
    }

    #[test]
    fn test_by_state() {
        let registry = LocationRegistry::default();
        assert_eq!(registry.by_state("assam").len(), 3);
        assert_eq!(registry.by_state("Nagaland").len(), 2);
    }

    #[test]
    fn test_rejects_bad_coordinates() {
        let entries = vec![LocationEntry::new("X", "X", "S", "T", 91.0, 0.0)];
        assert!(matches!(
            LocationRegistry::new(entries),
            Err(EngineError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let entries = vec![
            LocationEntry::new("X", "X", "S", "T", 10.0, 10.0),
            LocationEntry::new("X", "Y", "S", "T", 11.0, 11.0),
        ];
        assert!(matches!(
            LocationRegistry::new(entries),
            Err(EngineError::DuplicateLocation(_))
        ));
    }

    #[test]
    fn test_serializes_type_field() {
        let registry = LocationRegistry::default();
        let json = serde_json::to_value(registry.get("Silchar_Medical").unwrap()).unwrap();
        assert_eq!(json["type"], "Medical Facility");
    }
}
