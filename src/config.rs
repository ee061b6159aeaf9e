//! Export configuration.
//!
//! Options come from three places, later ones winning: the defaults below,
//! an optional YAML file, and the command line (which also reads
//! `TEXOVERLAY_*` environment variables).

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::TexOverlayError;
use crate::export::PdfCompatibility;

/// Layer that holds the text to export unless configured otherwise.
pub const DEFAULT_TEXT_LAYER: &str = "Text";

/// What to export and where.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOptions {
    /// Name of the layer holding the text.
    pub layer: String,

    /// Where to write the picture. Defaults to the drawing's path with a
    /// `.tex` extension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Save the drawing as PDF after writing the picture.
    pub save_pdf: bool,

    /// Save the drawing as EPS after writing the picture.
    pub save_eps: bool,

    /// Compatibility level of the saved PDF.
    pub pdf_compatibility: PdfCompatibility,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            layer: DEFAULT_TEXT_LAYER.to_string(),
            output: None,
            save_pdf: false,
            save_eps: false,
            pdf_compatibility: PdfCompatibility::Acrobat4,
        }
    }
}

/// Reads export options from a YAML file. Missing keys keep their defaults.
///
/// # Errors
/// Returns an error if the file cannot be opened or is not valid YAML for
/// [`ExportOptions`].
pub fn read_config(path: &Path) -> Result<ExportOptions, TexOverlayError> {
    let file = File::open(path).map_err(TexOverlayError::Io)?;
    serde_yaml::from_reader(BufReader::new(file)).map_err(|source| TexOverlayError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses export options from a YAML string.
pub fn from_yaml_str(yaml: &str) -> Result<ExportOptions, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_host_script_layout() {
        let opts = ExportOptions::default();
        assert_eq!(opts.layer, "Text");
        assert!(opts.output.is_none());
        assert!(!opts.save_pdf);
        assert!(!opts.save_eps);
        assert_eq!(opts.pdf_compatibility, PdfCompatibility::Acrobat4);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let opts = from_yaml_str("save_pdf: true\n").expect("parse yaml");
        assert!(opts.save_pdf);
        assert_eq!(opts.layer, "Text");
    }

    #[test]
    fn full_yaml() {
        let yaml = "layer: Labels\noutput: out/figure.tex\nsave_pdf: false\nsave_eps: true\n";
        let opts = from_yaml_str(yaml).expect("parse yaml");
        assert_eq!(opts.layer, "Labels");
        assert_eq!(opts.output, Some(PathBuf::from("out/figure.tex")));
        assert!(opts.save_eps);
    }

    #[test]
    fn pdf_compatibility_level() {
        let opts = from_yaml_str("pdf_compatibility: acrobat7\n").expect("parse yaml");
        assert_eq!(opts.pdf_compatibility, PdfCompatibility::Acrobat7);
        assert!(from_yaml_str("pdf_compatibility: acrobat9\n").is_err());
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(from_yaml_str("layers: Text\n").is_err());
    }

    #[test]
    fn read_config_reports_path_on_parse_error() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("texoverlay.yaml");
        std::fs::write(&path, "save_pdf: [not, a, bool]\n").expect("write config");

        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, TexOverlayError::ConfigParse { .. }));
        assert!(err.to_string().contains("texoverlay.yaml"));
    }
}
