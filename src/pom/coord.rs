use std::fmt;

/// A Maven artifact coordinate: `groupId:artifactId:version`.
///
/// Version text is kept verbatim, including property placeholders like
/// `${foo.version}`; resolving those is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtifactCoords {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl ArtifactCoords {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ArtifactCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_colon_joined() {
        let coords = ArtifactCoords::new("org.example", "widget", "1.2.3");
        assert_eq!(coords.to_string(), "org.example:widget:1.2.3");
    }

    #[test]
    fn ordering_is_by_group_then_artifact() {
        let a = ArtifactCoords::new("a", "z", "1");
        let b = ArtifactCoords::new("b", "a", "1");
        assert!(a < b);
    }
}
