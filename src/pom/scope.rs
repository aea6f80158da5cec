//! Compiled path patterns delimiting where a replacement may happen.
//!
//! A *scope* pattern names the container element within which one replacement
//! decision is evaluated; a *target* pattern names the leaf whose text is the
//! replacement candidate. Patterns are matched against the full `/`-joined
//! element path, anchored at both ends.

use std::sync::LazyLock;

use regex::Regex;

/// The default groupId Maven assumes for plugins that do not declare one.
pub const APACHE_MAVEN_PLUGINS_GROUP_ID: &str = "org.apache.maven.plugins";

/// Any `<dependency>` container: plain dependencies, dependencyManagement,
/// or plugin-nested dependencies, each optionally inside a profile.
const DEPENDENCY_CONTAINER: &str = "/project(/profiles/profile)?\
((/dependencyManagement)|(/build(/pluginManagement)?/plugins/plugin))?\
/dependencies/dependency";

/// Any `<plugin>` container: build plugins, managed plugins, or report
/// plugins, each optionally inside a profile.
const PLUGIN_CONTAINER: &str =
    "/project(/profiles/profile)?((/build(/pluginManagement)?)|(/reporting))/plugins/plugin";

const COORDINATE_LEAVES: &str = "((/groupId)|(/artifactId)|(/version))";

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^{pattern}$")).unwrap()
}

pub static DEPENDENCY_SCOPE: LazyLock<Regex> = LazyLock::new(|| anchored(DEPENDENCY_CONTAINER));

pub static DEPENDENCY_TARGET: LazyLock<Regex> =
    LazyLock::new(|| anchored(&format!("{DEPENDENCY_CONTAINER}{COORDINATE_LEAVES}")));

pub static PLUGIN_SCOPE: LazyLock<Regex> = LazyLock::new(|| anchored(PLUGIN_CONTAINER));

pub static PLUGIN_TARGET: LazyLock<Regex> =
    LazyLock::new(|| anchored(&format!("{PLUGIN_CONTAINER}{COORDINATE_LEAVES}")));

pub static PROJECT_VERSION: LazyLock<Regex> = LazyLock::new(|| anchored("/project/version"));

pub static PARENT_VERSION: LazyLock<Regex> = LazyLock::new(|| anchored("/project/parent/version"));

pub static PARENT_COORDINATES: LazyLock<Regex> =
    LazyLock::new(|| anchored(&format!("/project/parent{COORDINATE_LEAVES}")));

pub static PROPERTIES_SCOPE: LazyLock<Regex> = LazyLock::new(|| anchored("/project/properties"));

pub static PROFILE_SCOPE: LazyLock<Regex> =
    LazyLock::new(|| anchored("/project/profiles/profile"));

pub static PROFILE_ID: LazyLock<Regex> =
    LazyLock::new(|| anchored("/project/profiles/profile/id"));

/// Target pattern for a named property, at project level or nested in a
/// profile. The property name is escaped, so names containing regex
/// metacharacters (`foo.version`) match only themselves.
pub fn property_target(profile_scoped: bool, property: &str) -> Regex {
    let prefix = if profile_scoped {
        "/project/profiles/profile"
    } else {
        "/project"
    };
    anchored(&format!(
        "{prefix}/properties/{}",
        regex::escape(property)
    ))
}
