use std::fs;
use std::path::Path;

use log::debug;
use regex::Regex;

use crate::edit::{atomic_write, SpanEdit};

use super::coord::ArtifactCoords;
use super::errors::PomError;
use super::scope::{
    property_target, APACHE_MAVEN_PLUGINS_GROUP_ID, DEPENDENCY_SCOPE, DEPENDENCY_TARGET,
    PARENT_COORDINATES, PARENT_VERSION, PLUGIN_SCOPE, PLUGIN_TARGET, PROFILE_ID, PROFILE_SCOPE,
    PROJECT_VERSION, PROPERTIES_SCOPE,
};
use super::stream::{EventCursor, Marks, StepKind};

/// Formatting-preserving rewriter for a single POM document.
///
/// The document is held as one UTF-8 string. Every operation scans the whole
/// event stream from offset zero, stages at most one [`SpanEdit`] and applies
/// it once the scan has completed. Bytes outside the replaced span are never
/// touched, so comments, indentation, attribute order and entity encoding all
/// survive verbatim.
///
/// A rewriter is built per rewrite-and-persist cycle; operations may be
/// chained on the same instance, each one re-scanning the current buffer.
/// When several scope instances would qualify, only the first one encountered
/// commits per call.
pub struct PomRewriter {
    content: String,
}

impl PomRewriter {
    /// Parse the document, verifying well-formedness before any operation
    /// can run. The input bytes are kept verbatim.
    pub fn parse(content: impl Into<String>) -> Result<Self, PomError> {
        let content = content.into();
        check_well_formed(&content)?;
        Ok(Self { content })
    }

    /// Read a POM file (UTF-8) into a rewriter.
    pub fn from_path(path: &Path) -> Result<Self, PomError> {
        Self::parse(fs::read_to_string(path)?)
    }

    /// The current document text.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Consume the rewriter, returning the document text.
    pub fn into_inner(self) -> String {
        self.content
    }

    /// Persist the buffer with an atomic tempfile + rename write.
    pub fn save(&self, path: &Path) -> Result<(), PomError> {
        atomic_write(path, self.content.as_bytes())?;
        Ok(())
    }

    /// Redefine `property` to `value`, optionally scoped to the profile with
    /// the given id. Returns `true` if a replacement was made.
    pub fn set_property_value(
        &mut self,
        profile_id: Option<&str>,
        property: &str,
        value: &str,
    ) -> Result<bool, PomError> {
        require_nonempty("property", property)?;

        let profile_scoped = profile_id.is_some();
        let target = property_target(profile_scoped, property);
        let scope: &Regex = if profile_scoped {
            &PROFILE_SCOPE
        } else {
            &PROPERTIES_SCOPE
        };

        let staged = {
            let mut cursor = EventCursor::new(&self.content);
            let mut marks = Marks::default();
            let mut in_scope = false;
            let mut staged = None;
            loop {
                let step = cursor.next_step()?;
                match step.kind {
                    StepKind::Start { inner_start } => {
                        if target.is_match(&step.path) {
                            marks.start = Some(inner_start);
                        } else if scope.is_match(&step.path) {
                            // a new scope instance resets any partial match
                            in_scope = !profile_scoped;
                            marks.clear();
                        } else if profile_scoped && PROFILE_ID.is_match(&step.path) {
                            let candidate = cursor.read_leaf_text()?;
                            in_scope =
                                profile_id.is_some_and(|id| id.trim() == candidate.trim());
                        }
                    }
                    StepKind::End { inner_end } => {
                        if target.is_match(&step.path) {
                            marks.end = Some(inner_end);
                        } else if scope.is_match(&step.path) {
                            if in_scope {
                                if let Some((start, end)) = marks.range() {
                                    staged = Some(self.stage(start, end, value));
                                    break;
                                }
                            }
                            marks.clear();
                            in_scope = false;
                        }
                    }
                    StepKind::Empty | StepKind::Other => {}
                    StepKind::Eof => break,
                }
            }
            staged
        };
        self.commit(staged)
    }

    /// Redefine the project version. Returns `true` if a replacement was
    /// made; `false` when `/project/version` is absent (inherited).
    pub fn set_project_version(&mut self, value: &str) -> Result<bool, PomError> {
        let staged = self.stage_leaf_replacement(&PROJECT_VERSION, value)?;
        self.commit(staged)
    }

    /// The project version, or `None` when it is inherited from the parent.
    pub fn project_version(&self) -> Result<Option<String>, PomError> {
        self.read_leaf(&PROJECT_VERSION)
    }

    /// Redefine the parent version. Returns `true` if a replacement was made.
    pub fn set_parent_version(&mut self, value: &str) -> Result<bool, PomError> {
        let staged = self.stage_leaf_replacement(&PARENT_VERSION, value)?;
        self.commit(staged)
    }

    /// The parent's coordinates, or `None` unless all of groupId, artifactId
    /// and version are declared under `/project/parent`.
    pub fn parent_coordinates(&self) -> Result<Option<ArtifactCoords>, PomError> {
        let mut cursor = EventCursor::new(&self.content);
        let mut group_id = None;
        let mut artifact_id = None;
        let mut version = None;
        loop {
            let step = cursor.next_step()?;
            match step.kind {
                StepKind::Start { .. } if PARENT_COORDINATES.is_match(&step.path) => {
                    let text = cursor.read_leaf_text()?.trim().to_string();
                    match step.name.as_str() {
                        "groupId" => group_id = Some(text),
                        "artifactId" => artifact_id = Some(text),
                        "version" => version = Some(text),
                        _ => {}
                    }
                }
                StepKind::Eof => break,
                _ => {}
            }
        }
        Ok(match (group_id, artifact_id, version) {
            (Some(group_id), Some(artifact_id), Some(version)) => Some(ArtifactCoords {
                group_id,
                artifact_id,
                version,
            }),
            _ => None,
        })
    }

    /// Redefine the version of the dependency matching the given coordinates.
    ///
    /// The existing version text is compared against `old_version` with all
    /// whitespace stripped, so incidental formatting inside the literal does
    /// not defeat the match; the replacement `new_version` is inserted as-is.
    pub fn set_dependency_version(
        &mut self,
        group_id: &str,
        artifact_id: &str,
        old_version: &str,
        new_version: &str,
    ) -> Result<bool, PomError> {
        require_nonempty("groupId", group_id)?;
        require_nonempty("artifactId", artifact_id)?;
        require_nonempty("oldVersion", old_version)?;

        let staged = {
            let mut cursor = EventCursor::new(&self.content);
            let mut marks = Marks::default();
            let mut in_scope = false;
            let mut have_group_id = false;
            let mut have_artifact_id = false;
            let mut have_old_version = false;
            let mut staged = None;
            loop {
                let step = cursor.next_step()?;
                match step.kind {
                    StepKind::Start { inner_start } => {
                        if DEPENDENCY_SCOPE.is_match(&step.path) {
                            // a new scope instance resets any partial match
                            in_scope = true;
                            marks.clear();
                            have_group_id = false;
                            have_artifact_id = false;
                            have_old_version = false;
                        } else if in_scope && DEPENDENCY_TARGET.is_match(&step.path) {
                            match step.name.as_str() {
                                "groupId" => {
                                    have_group_id =
                                        cursor.read_leaf_text()?.trim() == group_id;
                                }
                                "artifactId" => {
                                    have_artifact_id =
                                        cursor.read_leaf_text()?.trim() == artifact_id;
                                }
                                "version" => marks.start = Some(inner_start),
                                _ => {}
                            }
                        }
                    }
                    StepKind::End { inner_end } => {
                        if step.name == "version" && DEPENDENCY_TARGET.is_match(&step.path) {
                            marks.end = Some(inner_end);
                            if let Some((start, end)) = marks.range() {
                                have_old_version =
                                    delete_whitespace(self.content[start..end].trim())
                                        == delete_whitespace(old_version);
                            }
                        } else if DEPENDENCY_SCOPE.is_match(&step.path) {
                            if in_scope && have_group_id && have_artifact_id && have_old_version
                            {
                                if let Some((start, end)) = marks.range() {
                                    staged = Some(self.stage(start, end, new_version));
                                    break;
                                }
                            }
                            marks.clear();
                            have_group_id = false;
                            have_artifact_id = false;
                            have_old_version = false;
                            in_scope = false;
                        }
                    }
                    StepKind::Empty | StepKind::Other => {}
                    StepKind::Eof => break,
                }
            }
            staged
        };
        self.commit(staged)
    }

    /// Redefine the version of the plugin matching the given coordinates.
    ///
    /// The groupId predicate is skipped when the requested group is Maven's
    /// default plugin group (`org.apache.maven.plugins`), matching Maven's
    /// own shorthand for plugins that omit a groupId. Unlike the dependency
    /// operation, the old-version comparison is exact after trimming.
    pub fn set_plugin_version(
        &mut self,
        group_id: &str,
        artifact_id: &str,
        old_version: &str,
        new_version: &str,
    ) -> Result<bool, PomError> {
        require_nonempty("groupId", group_id)?;
        require_nonempty("artifactId", artifact_id)?;
        require_nonempty("oldVersion", old_version)?;

        let need_group_id = group_id != APACHE_MAVEN_PLUGINS_GROUP_ID;

        let staged = {
            let mut cursor = EventCursor::new(&self.content);
            let mut marks = Marks::default();
            let mut in_scope = false;
            let mut have_group_id = false;
            let mut have_artifact_id = false;
            let mut have_old_version = false;
            let mut staged = None;
            loop {
                let step = cursor.next_step()?;
                match step.kind {
                    StepKind::Start { inner_start } => {
                        if PLUGIN_SCOPE.is_match(&step.path) {
                            in_scope = true;
                            marks.clear();
                            have_group_id = false;
                            have_artifact_id = false;
                            have_old_version = false;
                        } else if in_scope && PLUGIN_TARGET.is_match(&step.path) {
                            match step.name.as_str() {
                                "groupId" => {
                                    have_group_id =
                                        cursor.read_leaf_text()?.trim() == group_id;
                                }
                                "artifactId" => {
                                    have_artifact_id =
                                        cursor.read_leaf_text()?.trim() == artifact_id;
                                }
                                "version" => marks.start = Some(inner_start),
                                _ => {}
                            }
                        }
                    }
                    StepKind::End { inner_end } => {
                        if step.name == "version" && PLUGIN_TARGET.is_match(&step.path) {
                            marks.end = Some(inner_end);
                            if let Some((start, end)) = marks.range() {
                                have_old_version =
                                    self.content[start..end].trim() == old_version;
                            }
                        } else if PLUGIN_SCOPE.is_match(&step.path) {
                            if in_scope
                                && (have_group_id || !need_group_id)
                                && have_artifact_id
                                && have_old_version
                            {
                                if let Some((start, end)) = marks.range() {
                                    staged = Some(self.stage(start, end, new_version));
                                    break;
                                }
                            }
                            marks.clear();
                            have_group_id = false;
                            have_artifact_id = false;
                            have_old_version = false;
                            in_scope = false;
                        }
                    }
                    StepKind::Empty | StepKind::Other => {}
                    StepKind::Eof => break,
                }
            }
            staged
        };
        self.commit(staged)
    }

    /// Scan for a single fixed leaf and stage replacing its text span.
    fn stage_leaf_replacement(
        &self,
        pattern: &Regex,
        value: &str,
    ) -> Result<Option<SpanEdit>, PomError> {
        let mut cursor = EventCursor::new(&self.content);
        let mut marks = Marks::default();
        loop {
            let step = cursor.next_step()?;
            match step.kind {
                StepKind::Start { inner_start } if pattern.is_match(&step.path) => {
                    marks.start = Some(inner_start);
                }
                StepKind::End { inner_end } if pattern.is_match(&step.path) => {
                    marks.end = Some(inner_end);
                    if let Some((start, end)) = marks.range() {
                        return Ok(Some(self.stage(start, end, value)));
                    }
                    marks.clear();
                }
                StepKind::Eof => return Ok(None),
                _ => {}
            }
        }
    }

    /// Scan for a single fixed leaf and return its trimmed text.
    fn read_leaf(&self, pattern: &Regex) -> Result<Option<String>, PomError> {
        let mut cursor = EventCursor::new(&self.content);
        let mut marks = Marks::default();
        loop {
            let step = cursor.next_step()?;
            match step.kind {
                StepKind::Start { inner_start } if pattern.is_match(&step.path) => {
                    marks.start = Some(inner_start);
                }
                StepKind::End { inner_end } if pattern.is_match(&step.path) => {
                    marks.end = Some(inner_end);
                    if let Some((start, end)) = marks.range() {
                        return Ok(Some(self.content[start..end].trim().to_string()));
                    }
                    marks.clear();
                }
                StepKind::Eof => return Ok(None),
                _ => {}
            }
        }
    }

    fn stage(&self, byte_start: usize, byte_end: usize, new_text: &str) -> SpanEdit {
        SpanEdit::new(
            byte_start,
            byte_end,
            new_text,
            &self.content[byte_start..byte_end],
        )
    }

    fn commit(&mut self, staged: Option<SpanEdit>) -> Result<bool, PomError> {
        match staged {
            Some(edit) => {
                debug!(
                    "replacing bytes {}..{} with {:?}",
                    edit.byte_start, edit.byte_end, edit.new_text
                );
                let _ = edit.apply_to(&mut self.content)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Walk the whole event stream once, surfacing any structural parse error.
fn check_well_formed(content: &str) -> Result<(), PomError> {
    let mut cursor = EventCursor::new(content);
    loop {
        if matches!(cursor.next_step()?.kind, StepKind::Eof) {
            return Ok(());
        }
    }
}

fn delete_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn require_nonempty(name: &str, value: &str) -> Result<(), PomError> {
    if value.trim().is_empty() {
        return Err(PomError::InvalidArgument {
            message: format!("{name} must not be empty"),
        });
    }
    Ok(())
}
