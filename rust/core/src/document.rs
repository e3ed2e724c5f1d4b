// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model documents and their geometry payloads.
//!
//! A model document is a JSON description of a building model: a flat,
//! ordered collection of elements (walls, rooms, shades, ...), each with an
//! identifier, a type discriminator, optional display geometry, and optional
//! energy properties. Documents are validated strictly here, at the
//! boundary, so downstream code never has to defend against missing keys.

use crate::error::{Error, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// An RGB color attached to a display face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A single planar face of an element's display geometry.
///
/// The boundary is an ordered loop of `[x, y, z]` vertices. Extra keys in
/// the source payload are ignored; a boundary with fewer than three vertices
/// is rejected at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub boundary: Vec<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// A uniquely identified unit within a model document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub identifier: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(rename = "type")]
    pub element_type: String,
    /// Display geometry. Absent for elements with no drawable faces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Vec<Face>>,
    /// Opaque energy properties blob. Compared structurally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<serde_json::Value>,
}

/// A parsed and validated building-model document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    pub identifier: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl ModelDocument {
    /// Parse a document from a JSON string, validating element uniqueness
    /// and face shapes. Malformed input is fatal for that input; the user
    /// must resupply it.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let doc: ModelDocument =
            serde_json::from_str(content).map_err(|e| Error::ParseFailed(e.to_string()))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Parse a document from an already-deserialized JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let doc: ModelDocument =
            serde_json::from_value(value).map_err(|e| Error::ParseFailed(e.to_string()))?;
        doc.validate()?;
        Ok(doc)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for element in &self.elements {
            if element.identifier.is_empty() {
                return Err(Error::ParseFailed(
                    "element with empty identifier".to_string(),
                ));
            }
            if !seen.insert(element.identifier.as_str()) {
                return Err(Error::ParseFailed(format!(
                    "duplicate element identifier '{}'",
                    element.identifier
                )));
            }
            if let Some(faces) = &element.geometry {
                for face in faces {
                    if face.boundary.len() < 3 {
                        return Err(Error::ParseFailed(format!(
                            "element '{}' has a face with fewer than 3 boundary vertices",
                            element.identifier
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Iterate elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Look up an element by identifier.
    pub fn find(&self, identifier: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.identifier == identifier)
    }

    /// Serialize the document back to JSON (merge output, fingerprinting).
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_minimal_document() {
        let doc = ModelDocument::from_value(json!({
            "identifier": "model_a",
            "display_name": "Model A",
            "elements": [
                {
                    "identifier": "wall_1",
                    "display_name": "North Wall",
                    "type": "Wall",
                    "geometry": [
                        { "boundary": [[0.0, 0.0, 0.0], [5.0, 0.0, 0.0], [5.0, 0.0, 3.0]] }
                    ]
                }
            ]
        }))
        .unwrap();

        assert_eq!(doc.elements.len(), 1);
        assert_eq!(doc.elements[0].element_type, "Wall");
        assert!(doc.find("wall_1").is_some());
        assert!(doc.find("wall_2").is_none());
    }

    #[test]
    fn duplicate_identifiers_rejected() {
        let result = ModelDocument::from_value(json!({
            "identifier": "model_a",
            "elements": [
                { "identifier": "wall_1", "type": "Wall" },
                { "identifier": "wall_1", "type": "Wall" }
            ]
        }));

        assert!(matches!(result, Err(Error::ParseFailed(_))));
    }

    #[test]
    fn degenerate_face_rejected() {
        let result = ModelDocument::from_value(json!({
            "identifier": "model_a",
            "elements": [
                {
                    "identifier": "wall_1",
                    "type": "Wall",
                    "geometry": [ { "boundary": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]] } ]
                }
            ]
        }));

        assert!(matches!(result, Err(Error::ParseFailed(_))));
    }

    #[test]
    fn malformed_json_is_parse_failed() {
        let result = ModelDocument::from_json_str("{ not json");
        assert!(matches!(result, Err(Error::ParseFailed(_))));
    }

    #[test]
    fn elements_without_geometry_are_valid() {
        let doc = ModelDocument::from_value(json!({
            "identifier": "model_a",
            "elements": [
                { "identifier": "room_1", "type": "Room", "energy": { "program": "Office" } }
            ]
        }))
        .unwrap();

        assert!(doc.elements[0].geometry.is_none());
        assert!(doc.elements[0].energy.is_some());
    }
}
