use pomver::PomRewriter;
use proptest::prelude::*;

proptest! {
    // A request that can never qualify must return false and leave every
    // byte of the document alone, whatever the surrounding formatting.
    #[test]
    fn no_match_leaves_bytes_unchanged(
        group in "[a-z]{1,8}",
        artifact in "[a-z]{1,8}",
        indent in "[ \t]{0,4}",
    ) {
        let input = format!(
            "<project>\n{indent}<!-- pinned -->\n{indent}<dependencies>\n\
             {indent}<dependency><groupId>{group}</groupId>\
             <artifactId>{artifact}</artifactId><version>1.0</version></dependency>\n\
             {indent}</dependencies>\n</project>\n"
        );
        let mut pom = PomRewriter::parse(input.as_str()).unwrap();
        // the requested artifactId is extended, so the predicate never holds
        let changed = pom
            .set_dependency_version(&group, &format!("{artifact}x"), "1.0", "2.0")
            .unwrap();
        prop_assert!(!changed);
        prop_assert_eq!(pom.as_str(), input.as_str());
    }

    // Incidental whitespace inside the version literal must not defeat the
    // old-version comparison; the whole padded span is replaced.
    #[test]
    fn whitespace_padding_does_not_defeat_dependency_match(
        pad_left in "[ \t\n]{0,3}",
        pad_right in "[ \t\n]{0,3}",
    ) {
        let input = format!(
            "<project><dependencies><dependency>\
             <groupId>g</groupId><artifactId>a</artifactId>\
             <version>{pad_left}1.0{pad_right}</version>\
             </dependency></dependencies></project>"
        );
        let mut pom = PomRewriter::parse(input.as_str()).unwrap();
        prop_assert!(pom.set_dependency_version("g", "a", "1.0", "2.0").unwrap());
        prop_assert_eq!(
            pom.as_str(),
            "<project><dependencies><dependency>\
             <groupId>g</groupId><artifactId>a</artifactId>\
             <version>2.0</version>\
             </dependency></dependencies></project>"
        );
    }
}
