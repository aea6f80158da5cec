//! Raw POM model, deserialized without inheritance or interpolation.
//!
//! Only the elements the version-management helpers need are modeled; the
//! rewriter itself never goes through this model, it works on the original
//! bytes.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::errors::PomError;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub model_version: Option<String>,
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,
    pub parent: Option<Parent>,
    pub modules: Option<Modules>,
    pub properties: Option<BTreeMap<String, String>>,
    pub dependencies: Option<Dependencies>,
    pub dependency_management: Option<DependencyManagement>,
    pub build: Option<Build>,
    pub reporting: Option<Reporting>,
    pub profiles: Option<Profiles>,
}

impl Project {
    /// Parse a POM document into the raw model.
    pub fn parse(xml: &str) -> Result<Self, PomError> {
        Ok(quick_xml::de::from_str(xml)?)
    }

    /// Read and parse a POM file (UTF-8).
    pub fn from_path(path: &Path) -> Result<Self, PomError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Profiles declared in the POM, or an empty slice.
    pub fn profile_list(&self) -> &[Profile] {
        self.profiles
            .as_ref()
            .map(|p| p.profiles.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Parent {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub relative_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Modules {
    #[serde(default, rename = "module")]
    pub modules: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Dependencies {
    #[serde(default, rename = "dependency")]
    pub dependencies: Vec<Dependency>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dependency {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    #[serde(rename = "type")]
    pub dependency_type: Option<String>,
    pub classifier: Option<String>,
    pub scope: Option<String>,
    pub optional: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DependencyManagement {
    pub dependencies: Option<Dependencies>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Build {
    pub plugins: Option<Plugins>,
    pub plugin_management: Option<PluginManagement>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PluginManagement {
    pub plugins: Option<Plugins>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Plugins {
    #[serde(default, rename = "plugin")]
    pub plugins: Vec<Plugin>,
}

/// A build, managed or report plugin declaration. Report plugins carry no
/// nested dependencies, so that field simply stays `None` for them.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Plugin {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub dependencies: Option<Dependencies>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Reporting {
    pub plugins: Option<Plugins>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Profiles {
    #[serde(default, rename = "profile")]
    pub profiles: Vec<Profile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub id: Option<String>,
    pub modules: Option<Modules>,
    pub properties: Option<BTreeMap<String, String>>,
    pub dependencies: Option<Dependencies>,
    pub dependency_management: Option<DependencyManagement>,
    pub build: Option<Build>,
    pub reporting: Option<Reporting>,
}
