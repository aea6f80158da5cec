//! Discovery of properties that control artifact versions.
//!
//! A property is *associated* with an artifact when some dependency, plugin
//! or report-plugin declaration spells its version as a placeholder
//! referencing that property (`<version>${foo.version}</version>`). Callers
//! use the resulting mapping to answer "which properties drive versions in
//! this build" before deciding what to rewrite.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use super::coord::ArtifactCoords;
use super::model::{Dependency, Plugin, Project};
use super::scope::APACHE_MAVEN_PLUGINS_GROUP_ID;

/// A property name together with every artifact whose version declaration
/// references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAssociations {
    name: String,
    profile_id: Option<String>,
    associations: BTreeSet<ArtifactAssociation>,
}

/// A recorded link between a property and one artifact coordinate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArtifactAssociation {
    pub coords: ArtifactCoords,
    /// Whether the artifact is resolved against plugin repositories.
    pub via_plugin_repositories: bool,
}

impl PropertyAssociations {
    fn new(profile_id: Option<&str>, name: &str) -> Self {
        Self {
            name: name.to_string(),
            profile_id: profile_id.map(str::to_string),
            associations: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The profile the property was declared in, if any.
    pub fn profile_id(&self) -> Option<&str> {
        self.profile_id.as_deref()
    }

    pub fn associations(&self) -> &BTreeSet<ArtifactAssociation> {
        &self.associations
    }

    pub fn add_association(&mut self, coords: ArtifactCoords, via_plugin_repositories: bool) {
        self.associations.insert(ArtifactAssociation {
            coords,
            via_plugin_repositories,
        });
    }

    pub fn remove_association(&mut self, coords: &ArtifactCoords, via_plugin_repositories: bool) {
        self.associations.remove(&ArtifactAssociation {
            coords: coords.clone(),
            via_plugin_repositories,
        });
    }

    pub fn is_associated(&self) -> bool {
        !self.associations.is_empty()
    }

    /// Whether a version literal references this property by placeholder.
    fn referenced_by(&self, version: &str) -> bool {
        version.contains(&format!("${{{}}}", self.name))
    }
}

/// Examine a raw project model and report every property that is bound to
/// the version of at least one declared artifact.
///
/// Profile-scoped declarations are considered only for the profiles named in
/// `active_profiles`. Profile properties are registered before project-level
/// ones, since they override them at build time; the first registration of a
/// name wins. Properties with no referencing declaration are discarded.
pub fn associated_properties(
    project: &Project,
    active_profiles: &[&str],
) -> Vec<PropertyAssociations> {
    let mut result: BTreeMap<String, PropertyAssociations> = BTreeMap::new();

    for profile in project.profile_list() {
        let Some(id) = profile.id.as_deref() else {
            continue;
        };
        if !active_profiles.contains(&id) {
            continue;
        }
        add_properties(&mut result, Some(id), profile.properties.as_ref());
        if let Some(management) = &profile.dependency_management {
            if let Some(deps) = &management.dependencies {
                add_dependency_associations(&mut result, &deps.dependencies, false);
            }
        }
        if let Some(deps) = &profile.dependencies {
            add_dependency_associations(&mut result, &deps.dependencies, false);
        }
        if let Some(build) = &profile.build {
            if let Some(management) = &build.plugin_management {
                if let Some(plugins) = &management.plugins {
                    add_plugin_associations(&mut result, &plugins.plugins);
                }
            }
            if let Some(plugins) = &build.plugins {
                add_plugin_associations(&mut result, &plugins.plugins);
            }
        }
        if let Some(reporting) = &profile.reporting {
            if let Some(plugins) = &reporting.plugins {
                add_plugin_associations(&mut result, &plugins.plugins);
            }
        }
    }

    add_properties(&mut result, None, project.properties.as_ref());
    if let Some(management) = &project.dependency_management {
        if let Some(deps) = &management.dependencies {
            add_dependency_associations(&mut result, &deps.dependencies, false);
        }
    }
    if let Some(deps) = &project.dependencies {
        add_dependency_associations(&mut result, &deps.dependencies, false);
    }
    if let Some(build) = &project.build {
        if let Some(management) = &build.plugin_management {
            if let Some(plugins) = &management.plugins {
                add_plugin_associations(&mut result, &plugins.plugins);
            }
        }
        if let Some(plugins) = &build.plugins {
            add_plugin_associations(&mut result, &plugins.plugins);
        }
    }
    if let Some(reporting) = &project.reporting {
        if let Some(plugins) = &reporting.plugins {
            add_plugin_associations(&mut result, &plugins.plugins);
        }
    }

    result.retain(|_, property| property.is_associated());
    debug!("found {} version-controlling properties", result.len());
    result.into_values().collect()
}

fn add_properties(
    result: &mut BTreeMap<String, PropertyAssociations>,
    profile_id: Option<&str>,
    properties: Option<&BTreeMap<String, String>>,
) {
    let Some(properties) = properties else {
        return;
    };
    for name in properties.keys() {
        result
            .entry(name.clone())
            .or_insert_with(|| PropertyAssociations::new(profile_id, name));
    }
}

fn add_dependency_associations(
    result: &mut BTreeMap<String, PropertyAssociations>,
    dependencies: &[Dependency],
    via_plugin_repositories: bool,
) {
    for dependency in dependencies {
        let Some(version) = dependency.version.as_deref() else {
            continue;
        };
        if !has_placeholder(version) {
            continue;
        }
        for property in result.values_mut() {
            if !property.referenced_by(version) {
                continue;
            }
            // missing coordinates mean a malformed declaration; skip it
            let Some(group_id) = nonempty(dependency.group_id.as_deref()) else {
                continue;
            };
            let Some(artifact_id) = nonempty(dependency.artifact_id.as_deref()) else {
                continue;
            };
            property.add_association(
                ArtifactCoords::new(group_id, artifact_id, version),
                via_plugin_repositories,
            );
        }
    }
}

fn add_plugin_associations(
    result: &mut BTreeMap<String, PropertyAssociations>,
    plugins: &[Plugin],
) {
    for plugin in plugins {
        if let Some(version) = plugin.version.as_deref() {
            if has_placeholder(version) {
                for property in result.values_mut() {
                    if !property.referenced_by(version) {
                        continue;
                    }
                    // plugins fall back to Maven's default group
                    let group_id = nonempty(plugin.group_id.as_deref())
                        .unwrap_or(APACHE_MAVEN_PLUGINS_GROUP_ID);
                    let Some(artifact_id) = nonempty(plugin.artifact_id.as_deref()) else {
                        continue;
                    };
                    property.add_association(
                        ArtifactCoords::new(group_id, artifact_id, version),
                        true,
                    );
                }
            }
        }
        if let Some(deps) = &plugin.dependencies {
            add_dependency_associations(result, &deps.dependencies, true);
        }
    }
}

fn has_placeholder(version: &str) -> bool {
    version.contains("${") && version.contains('}')
}

fn nonempty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Project {
        Project::parse(xml).unwrap()
    }

    #[test]
    fn property_bound_to_dependency_version() {
        let project = parse(
            "<project><properties><foo.version>1.2</foo.version><unused>x</unused></properties>\
             <dependencies><dependency><groupId>g</groupId><artifactId>a</artifactId>\
             <version>${foo.version}</version></dependency></dependencies></project>",
        );
        let properties = associated_properties(&project, &[]);
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].name(), "foo.version");
        assert_eq!(properties[0].profile_id(), None);
        let associations: Vec<_> = properties[0].associations().iter().collect();
        assert_eq!(associations.len(), 1);
        assert_eq!(
            associations[0].coords,
            ArtifactCoords::new("g", "a", "${foo.version}")
        );
        assert!(!associations[0].via_plugin_repositories);
    }

    #[test]
    fn unreferenced_properties_are_purged() {
        let project = parse(
            "<project><properties><lonely>1</lonely></properties>\
             <dependencies><dependency><groupId>g</groupId><artifactId>a</artifactId>\
             <version>1.0</version></dependency></dependencies></project>",
        );
        assert!(associated_properties(&project, &[]).is_empty());
    }

    #[test]
    fn plugin_association_defaults_group_and_flags_repositories() {
        let project = parse(
            "<project><properties><p.version>2</p.version></properties>\
             <build><plugins><plugin><artifactId>maven-compiler-plugin</artifactId>\
             <version>${p.version}</version></plugin></plugins></build></project>",
        );
        let properties = associated_properties(&project, &[]);
        assert_eq!(properties.len(), 1);
        let association = properties[0].associations().iter().next().unwrap();
        assert_eq!(association.coords.group_id, APACHE_MAVEN_PLUGINS_GROUP_ID);
        assert!(association.via_plugin_repositories);
    }

    #[test]
    fn plugin_nested_dependencies_use_plugin_repositories() {
        let project = parse(
            "<project><properties><d.version>3</d.version></properties>\
             <build><plugins><plugin><artifactId>p</artifactId><version>1</version>\
             <dependencies><dependency><groupId>g</groupId><artifactId>a</artifactId>\
             <version>${d.version}</version></dependency></dependencies>\
             </plugin></plugins></build></project>",
        );
        let properties = associated_properties(&project, &[]);
        assert_eq!(properties.len(), 1);
        let association = properties[0].associations().iter().next().unwrap();
        assert_eq!(association.coords.artifact_id, "a");
        assert!(association.via_plugin_repositories);
    }

    #[test]
    fn inactive_profiles_are_skipped() {
        let project = parse(
            "<project><profiles><profile><id>dev</id>\
             <properties><dev.version>1</dev.version></properties>\
             <dependencies><dependency><groupId>g</groupId><artifactId>a</artifactId>\
             <version>${dev.version}</version></dependency></dependencies>\
             </profile></profiles></project>",
        );
        assert!(associated_properties(&project, &[]).is_empty());

        let properties = associated_properties(&project, &["dev"]);
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].profile_id(), Some("dev"));
    }

    #[test]
    fn profile_registration_wins_over_project() {
        let project = parse(
            "<project><properties><foo>1</foo></properties>\
             <profiles><profile><id>dev</id>\
             <properties><foo>2</foo></properties>\
             <dependencies><dependency><groupId>g</groupId><artifactId>a</artifactId>\
             <version>${foo}</version></dependency></dependencies>\
             </profile></profiles></project>",
        );
        let properties = associated_properties(&project, &["dev"]);
        assert_eq!(properties.len(), 1);
        // first registration (the profile's) keeps its scope
        assert_eq!(properties[0].profile_id(), Some("dev"));
    }

    #[test]
    fn malformed_declarations_are_skipped() {
        let project = parse(
            "<project><properties><foo>1</foo></properties>\
             <dependencies><dependency><artifactId>a</artifactId>\
             <version>${foo}</version></dependency></dependencies></project>",
        );
        assert!(associated_properties(&project, &[]).is_empty());
    }

    #[test]
    fn association_add_and_remove() {
        let mut property = PropertyAssociations::new(None, "foo");
        let coords = ArtifactCoords::new("g", "a", "1");
        property.add_association(coords.clone(), false);
        assert!(property.is_associated());
        property.remove_association(&coords, false);
        assert!(!property.is_associated());
    }
}
