//! Where a description comes from, how to fetch it and how to decode it.

use std::path::{Component, Path, PathBuf};

use log::debug;
use reqwest::Url;
use serde_json::{Map, Number, Value};

use super::LoadError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    File(PathBuf),
    Uri(Url),
}

impl SpecSource {
    /// `http`/`https` URLs become URI sources; anything else is a file path,
    /// made absolute against the working directory.
    pub fn parse(arg: &str) -> Result<Self, LoadError> {
        if let Ok(url) = Url::parse(arg) {
            if matches!(url.scheme(), "http" | "https") {
                return Ok(SpecSource::Uri(url));
            }
        }
        let path = std::path::absolute(arg)
            .map_err(|e| LoadError::Io(format!("{arg}: {e}")))?;
        Ok(SpecSource::File(normalize(&path)))
    }

    /// Identity used to cache referenced documents.
    pub fn key(&self) -> String {
        match self {
            SpecSource::File(path) => path.display().to_string(),
            SpecSource::Uri(url) => {
                let mut url = url.clone();
                url.set_fragment(None);
                url.to_string()
            }
        }
    }

    /// Last path segment, for the status bar.
    pub fn file_name(&self) -> String {
        match self {
            SpecSource::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            SpecSource::Uri(url) => url
                .path_segments()
                .and_then(|mut s| s.next_back().map(str::to_string))
                .filter(|s| !s.is_empty())
                .or_else(|| url.host_str().map(str::to_string))
                .unwrap_or_default(),
        }
    }

    fn extension(&self) -> Option<String> {
        let name = match self {
            SpecSource::File(path) => path.to_string_lossy().into_owned(),
            SpecSource::Uri(url) => url.path().to_string(),
        };
        Path::new(&name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
    }

    /// Resolve `reference` (the document part of a `$ref`) against this source.
    pub fn join(&self, reference: &str) -> Result<SpecSource, LoadError> {
        match self {
            SpecSource::File(path) => {
                let base = path.parent().unwrap_or_else(|| Path::new("/"));
                Ok(SpecSource::File(normalize(&base.join(reference))))
            }
            SpecSource::Uri(url) => url
                .join(reference)
                .map(SpecSource::Uri)
                .map_err(|e| LoadError::Reference(format!("{reference}: {e}"))),
        }
    }

    pub async fn fetch(&self, client: &reqwest::Client) -> Result<String, LoadError> {
        match self {
            SpecSource::File(path) => {
                debug!("reading {}", path.display());
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| LoadError::Io(format!("{}: {e}", path.display())))
            }
            SpecSource::Uri(url) => {
                debug!("fetching {url}");
                let response = client
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(|e| LoadError::Http(format!("{url}: {e}")))?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Http(format!("{url}: HTTP {}", status.as_u16())));
                }
                response
                    .text()
                    .await
                    .map_err(|e| LoadError::Http(format!("{url}: {e}")))
            }
        }
    }

    /// Decode `text` by this source's extension: JSON, YAML, or JSON then YAML.
    pub fn decode(&self, text: &str) -> Result<Value, LoadError> {
        match self.extension().as_deref() {
            Some("json") => decode_json(text).map_err(|e| self.decode_error(&e)),
            Some("yaml") | Some("yml") => decode_yaml(text).map_err(|e| self.decode_error(&e)),
            _ => decode_json(text)
                .or_else(|_| decode_yaml(text))
                .map_err(|e| self.decode_error(&e)),
        }
    }

    fn decode_error(&self, message: &str) -> LoadError {
        LoadError::Decode(format!("{}: {message}", self.key()))
    }
}

impl std::fmt::Display for SpecSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Lexically fold `.` and `..` so two spellings of one file share a cache key.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

fn decode_json(text: &str) -> Result<Value, String> {
    serde_json::from_str(text).map_err(|e| e.to_string())
}

fn decode_yaml(text: &str) -> Result<Value, String> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
    yaml_to_json(yaml)
}

/// YAML allows non-string keys (`200:` under `responses`); JSON doesn't.
/// Scalar keys are stringified, anything else is rejected.
fn yaml_to_json(yaml: serde_yaml::Value) -> Result<Value, String> {
    Ok(match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::new();
            for (k, v) in mapping {
                let key = match k {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Null => "null".to_string(),
                    other => return Err(format!("unsupported mapping key {other:?}")),
                };
                map.insert(key, yaml_to_json(v)?);
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}
