//! Fill styles for map backgrounds and entity bodies
//!
//! Level files reference special fills through placeholder keys such as
//! `"%style.fillStyle%"`. The loader resolves every style string through a
//! [`FillTable`]; strings that are not keys are plain colors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Image repeat mode for pattern fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Repeat {
    #[default]
    Repeat,
    NoRepeat,
    RepeatX,
    RepeatY,
}

/// One color stop of a gradient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f32,
    pub color: String,
}

/// A resolved fill, handed to the renderer as data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    Color(String),
    Pattern {
        image: String,
        #[serde(default)]
        repeat: Repeat,
    },
    LinearGradient {
        from: [f32; 2],
        to: [f32; 2],
        stops: Vec<ColorStop>,
    },
}

/// Placeholder key → fill lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FillTable(HashMap<String, Fill>);

impl FillTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, fill: Fill) {
        self.0.insert(key.into(), fill);
    }

    /// Resolve a style string: a known key yields its fill, anything else is
    /// taken as a literal color.
    pub fn resolve(&self, raw: &str) -> Fill {
        match self.0.get(raw) {
            Some(fill) => fill.clone(),
            None => {
                if raw.starts_with('%') {
                    log::warn!("Unresolved fill placeholder {raw}, using it as a color");
                }
                Fill::Color(raw.to_string())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
