//! Encrypted secret emission.
//!
//! Three mutually exclusive output forms. File-backed forms land in the
//! `security` subdirectory of the working directory and overwrite any prior
//! output; there are no append semantics.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::core::constants;
use crate::core::context::Context;
use crate::error::Result;

/// Output form, selected by case-insensitive label. Unrecognized labels
/// select the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Console,
    File,
    K8,
}

impl OutputKind {
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("k8") {
            Self::K8
        } else if label.eq_ignore_ascii_case("file") {
            Self::File
        } else {
            Self::Console
        }
    }
}

/// What an emission produced, for the command layer to report.
#[derive(Debug)]
pub enum Emission {
    /// Pairs were printed; nothing persisted.
    Console,
    /// A properties file was written.
    PropertiesFile(PathBuf),
    /// A Kubernetes Secret manifest was written with default name and
    /// namespace; the operator may need to edit them before applying.
    Manifest(PathBuf),
}

#[derive(Serialize)]
struct SecretManifest<'a> {
    #[serde(rename = "apiVersion")]
    api_version: &'static str,
    kind: &'static str,
    metadata: Metadata,
    #[serde(rename = "stringData")]
    string_data: &'a BTreeMap<String, String>,
    #[serde(rename = "type")]
    manifest_type: &'static str,
}

#[derive(Serialize)]
struct Metadata {
    name: &'static str,
    namespace: &'static str,
}

/// Emit the encrypted mapping in the chosen form.
pub fn emit(ctx: &Context, secrets: &BTreeMap<String, String>, output: OutputKind) -> Result<Emission> {
    match output {
        OutputKind::Console => {
            for (alias, value) in secrets {
                println!("{alias} : {value}");
            }
            Ok(Emission::Console)
        }
        OutputKind::File => {
            let path = super::output_path(ctx, constants::SECRET_PROPERTIES_FILE)?;
            debug!(path = %path.display(), "writing secret properties file");
            crate::core::properties::write(&path, secrets)?;
            Ok(Emission::PropertiesFile(path))
        }
        OutputKind::K8 => {
            let manifest = SecretManifest {
                api_version: "v1",
                kind: "Secret",
                metadata: Metadata {
                    name: constants::SECRET_MANIFEST_NAME,
                    namespace: constants::SECRET_MANIFEST_NAMESPACE,
                },
                string_data: secrets,
                manifest_type: "Opaque",
            };
            let path = super::output_path(ctx, constants::SECRET_MANIFEST_FILE)?;
            debug!(path = %path.display(), "writing secret manifest");
            let yaml = serde_yaml::to_string(&manifest)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            std::fs::write(&path, yaml)?;
            Ok(Emission::Manifest(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn secrets() -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("db".to_string(), "Y2lwaGVydGV4dA==".to_string());
        map.insert("api".to_string(), "b3RoZXI=".to_string());
        map
    }

    #[test]
    fn output_kind_labels_are_case_insensitive() {
        assert_eq!(OutputKind::from_label("K8"), OutputKind::K8);
        assert_eq!(OutputKind::from_label("k8"), OutputKind::K8);
        assert_eq!(OutputKind::from_label("FILE"), OutputKind::File);
        assert_eq!(OutputKind::from_label("console"), OutputKind::Console);
        assert_eq!(OutputKind::from_label("anything"), OutputKind::Console);
    }

    #[test]
    fn file_output_writes_properties_lines() {
        let work = TempDir::new().unwrap();
        let ctx = Context::new("/cfg", work.path());

        let emission = emit(&ctx, &secrets(), OutputKind::File).unwrap();
        let Emission::PropertiesFile(path) = emission else {
            panic!("expected properties file");
        };
        assert_eq!(path, work.path().join("security/wso2mi-secrets.properties"));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("db=Y2lwaGVydGV4dA==\n"));
        assert!(contents.contains("api=b3RoZXI=\n"));
    }

    #[test]
    fn k8_output_has_fixed_manifest_shape() {
        let work = TempDir::new().unwrap();
        let ctx = Context::new("/cfg", work.path());

        let emission = emit(&ctx, &secrets(), OutputKind::K8).unwrap();
        let Emission::Manifest(path) = emission else {
            panic!("expected manifest");
        };
        assert_eq!(path, work.path().join("security/wso2mi-secrets.yaml"));

        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(yaml["apiVersion"], "v1");
        assert_eq!(yaml["kind"], "Secret");
        assert_eq!(yaml["type"], "Opaque");
        assert_eq!(yaml["metadata"]["name"], "wso2misecret");
        assert_eq!(yaml["metadata"]["namespace"], "default");
        assert_eq!(yaml["stringData"]["db"], "Y2lwaGVydGV4dA==");
    }

    #[test]
    fn rerun_overwrites_prior_output() {
        let work = TempDir::new().unwrap();
        let ctx = Context::new("/cfg", work.path());

        emit(&ctx, &secrets(), OutputKind::File).unwrap();
        let mut second = BTreeMap::new();
        second.insert("only".to_string(), "b25l".to_string());
        emit(&ctx, &second, OutputKind::File).unwrap();

        let contents =
            std::fs::read_to_string(work.path().join("security/wso2mi-secrets.properties"))
                .unwrap();
        assert_eq!(contents, "only=b25l\n");
    }
}
