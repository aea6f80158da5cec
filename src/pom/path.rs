use super::errors::PomError;

/// Stack of element local names from the document root to the current open
/// element.
///
/// The `/`-joined rendering is maintained incrementally so scope patterns can
/// be matched on every event without re-joining the segments. Invariant: the
/// stack depth always equals the current nesting depth of the scan.
#[derive(Debug, Clone, Default)]
pub struct ElementPath {
    segments: Vec<String>,
    joined: String,
}

impl ElementPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the local name of a newly opened element.
    pub fn push(&mut self, name: &str) {
        self.joined.push('/');
        self.joined.push_str(name);
        self.segments.push(name.to_string());
    }

    /// Pop the innermost element. Popping past the document root means the
    /// scan saw an end tag it never opened.
    pub fn pop(&mut self) -> Result<String, PomError> {
        let name = self.segments.pop().ok_or(PomError::PathUnderflow)?;
        self.joined.truncate(self.joined.len() - name.len() - 1);
        Ok(name)
    }

    /// The `/`-joined path, e.g. `/project/dependencies/dependency`.
    pub fn as_str(&self) -> &str {
        &self.joined
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_builds_joined_path() {
        let mut path = ElementPath::new();
        path.push("project");
        path.push("dependencies");
        path.push("dependency");
        assert_eq!(path.as_str(), "/project/dependencies/dependency");
        assert!(!path.is_empty());
    }

    #[test]
    fn pop_restores_parent_path() {
        let mut path = ElementPath::new();
        path.push("project");
        path.push("version");
        assert_eq!(path.pop().unwrap(), "version");
        assert_eq!(path.as_str(), "/project");
        assert_eq!(path.pop().unwrap(), "project");
        assert_eq!(path.as_str(), "");
        assert!(path.is_empty());
    }

    #[test]
    fn pop_past_root_is_an_error() {
        let mut path = ElementPath::new();
        assert!(matches!(path.pop(), Err(PomError::PathUnderflow)));
    }
}
