//! Branding and wording printed on every ficha.
//!
//! Only text is configurable. Geometry, palette and page size are fixed so
//! that the overflow bound proven in [`crate::layout::geometry`] holds for
//! every configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FichaError;
use crate::model::Metadata;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FichaConfig {
    pub institution: Institution,
    pub labels: CopyLabels,
    /// Text of the caption band at the top of each copy; the copy label is
    /// appended to it.
    pub form_caption: String,
    /// Caption printed under the cut line.
    pub cut_caption: String,
    pub metadata: Metadata,
}

impl Default for FichaConfig {
    fn default() -> Self {
        Self {
            institution: Institution::default(),
            labels: CopyLabels::default(),
            form_caption: "FORMATO DE FICHA DE PRE-REGISTRO".to_string(),
            cut_caption: "Recorte aqu\u{ed} y conserve la COPIA".to_string(),
            metadata: Metadata {
                title: Some("Ficha de Pre-Registro".to_string()),
                author: Some("CBTa 134".to_string()),
                subject: Some("Ficha de pre-registro de nuevo ingreso".to_string()),
            },
        }
    }
}

impl FichaConfig {
    /// Load a configuration file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FichaError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| FichaError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
            .map_err(|e| FichaError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Who issues the ficha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Institution {
    pub name: String,
    /// Used in the footer disclaimer line.
    pub short_name: String,
    /// Up to two short lines printed inside the logo box.
    pub logo_lines: Vec<String>,
    pub document_title: String,
    pub disclaimer: String,
}

impl Default for Institution {
    fn default() -> Self {
        Self {
            name: "CENTRO DE BACHILLERATO TECNOL\u{d3}GICO AGROPECUARIO No. 134".to_string(),
            short_name: "CBTa 134".to_string(),
            logo_lines: vec!["CBTa".to_string(), "134".to_string()],
            document_title: "FICHA DE PRE-REGISTRO DE NUEVO INGRESO".to_string(),
            disclaimer: "No tiene validez sin sello institucional".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyLabels {
    pub original: String,
    pub copy: String,
}

impl Default for CopyLabels {
    fn default() -> Self {
        Self {
            original: "ORIGINAL".to_string(),
            copy: "COPIA".to_string(),
        }
    }
}
