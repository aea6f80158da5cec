//! Child-module enumeration over the raw model.

use std::collections::BTreeSet;
use std::path::Path;

use log::debug;

use super::model::Project;

/// All child modules of a project, including modules declared in profiles,
/// ignoring profile activation.
pub fn child_modules(project: &Project) -> BTreeSet<String> {
    let mut modules: BTreeSet<String> = project
        .modules
        .as_ref()
        .map(|m| m.modules.iter().cloned().collect())
        .unwrap_or_default();
    for profile in project.profile_list() {
        if let Some(profile_modules) = &profile.modules {
            modules.extend(profile_modules.modules.iter().cloned());
        }
    }
    debug!("child modules: {modules:?}");
    modules
}

/// Drop modules which cannot be found relative to `basedir`.
///
/// A module entry survives when it names a directory containing a `pom.xml`
/// or is a direct path to a pom file.
pub fn remove_missing_modules(basedir: &Path, modules: &mut BTreeSet<String>) {
    modules.retain(|module| {
        let path = basedir.join(module);
        if path.is_dir() && path.join("pom.xml").is_file() {
            return true;
        }
        if path.is_file() {
            return true;
        }
        debug!("removing missing child module {module}");
        false
    });
}
