//! Offset-preserving pull cursor over the original POM bytes.
//!
//! The cursor never re-serializes anything: each step carries the source
//! offsets needed to bookmark a text span, and everything outside a committed
//! span stays byte-identical by construction.

use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;

use super::errors::PomError;
use super::path::ElementPath;

/// One lexical step through the document.
#[derive(Debug)]
pub(crate) struct Step {
    /// Element path at the time of the event. For `End` steps the path still
    /// includes the closed element; the cursor pops afterwards.
    pub path: String,
    /// Local name of the element, empty for non-element steps.
    pub name: String,
    pub kind: StepKind,
}

#[derive(Debug)]
pub(crate) enum StepKind {
    /// A start tag; `inner_start` is the byte offset just after its `>`.
    Start { inner_start: usize },
    /// An end tag; `inner_end` is the byte offset of its `<`.
    End { inner_end: usize },
    /// A self-closing element. It has no inner span, so it can never be
    /// bookmarked as a replacement target.
    Empty,
    /// Text, CDATA, comments, declarations, processing instructions.
    Other,
    Eof,
}

/// The two positional bookmarks delimiting a candidate replacement span.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Marks {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl Marks {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The bookmarked span, when both marks are set and well-ordered.
    pub fn range(&self) -> Option<(usize, usize)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start <= end => Some((start, end)),
            _ => None,
        }
    }
}

pub(crate) struct EventCursor<'a> {
    reader: Reader<&'a [u8]>,
    path: ElementPath,
    /// Qualified name of the most recent start tag, for `read_leaf_text`.
    current: Vec<u8>,
}

impl<'a> EventCursor<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            reader: Reader::from_str(content),
            path: ElementPath::new(),
            current: Vec::new(),
        }
    }

    /// Advance to the next event, maintaining the element path.
    pub fn next_step(&mut self) -> Result<Step, PomError> {
        let before = self.reader.buffer_position() as usize;
        let event = self.reader.read_event()?;
        let after = self.reader.buffer_position() as usize;

        match event {
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                self.current = start.name().as_ref().to_vec();
                self.path.push(&name);
                Ok(Step {
                    path: self.path.as_str().to_string(),
                    name,
                    kind: StepKind::Start { inner_start: after },
                })
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.local_name().as_ref()).into_owned();
                let path = self.path.as_str().to_string();
                self.path.pop()?;
                Ok(Step {
                    path,
                    name,
                    kind: StepKind::End { inner_end: before },
                })
            }
            Event::Empty(start) => {
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                self.path.push(&name);
                let path = self.path.as_str().to_string();
                self.path.pop()?;
                Ok(Step {
                    path,
                    name,
                    kind: StepKind::Empty,
                })
            }
            Event::Eof => {
                // the reader flags mismatched end tags on its own, but a
                // truncated document just runs out of input
                if !self.path.is_empty() {
                    return Err(PomError::UnclosedElement {
                        path: self.path.as_str().to_string(),
                    });
                }
                Ok(Step {
                    path: String::new(),
                    name: String::new(),
                    kind: StepKind::Eof,
                })
            }
            _ => Ok(Step {
                path: self.path.as_str().to_string(),
                name: String::new(),
                kind: StepKind::Other,
            }),
        }
    }

    /// Read the text content of the element whose start tag was just
    /// returned, consuming through its end tag. The path is popped, since
    /// text extraction terminates the element early.
    pub fn read_leaf_text(&mut self) -> Result<String, PomError> {
        let name = std::mem::take(&mut self.current);
        let text = self.reader.read_text(QName(&name))?;
        self.path.pop()?;
        Ok(text.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_steps(content: &str) -> Vec<(String, String)> {
        let mut cursor = EventCursor::new(content);
        let mut steps = Vec::new();
        loop {
            let step = cursor.next_step().unwrap();
            match step.kind {
                StepKind::Start { .. } => steps.push(("start".to_string(), step.path)),
                StepKind::End { .. } => steps.push(("end".to_string(), step.path)),
                StepKind::Empty => steps.push(("empty".to_string(), step.path)),
                StepKind::Other => {}
                StepKind::Eof => break,
            }
        }
        steps
    }

    #[test]
    fn paths_mirror_nesting() {
        let steps = collect_steps("<project><build><plugins/></build></project>");
        assert_eq!(
            steps,
            vec![
                ("start".to_string(), "/project".to_string()),
                ("start".to_string(), "/project/build".to_string()),
                ("empty".to_string(), "/project/build/plugins".to_string()),
                ("end".to_string(), "/project/build".to_string()),
                ("end".to_string(), "/project".to_string()),
            ]
        );
    }

    #[test]
    fn inner_offsets_delimit_text_exactly() {
        let content = "<project><version> 1.0 </version></project>";
        let mut cursor = EventCursor::new(content);
        let mut start = None;
        let mut end = None;
        loop {
            let step = cursor.next_step().unwrap();
            match step.kind {
                StepKind::Start { inner_start } if step.path == "/project/version" => {
                    start = Some(inner_start);
                }
                StepKind::End { inner_end } if step.path == "/project/version" => {
                    end = Some(inner_end);
                }
                StepKind::Eof => break,
                _ => {}
            }
        }
        let (start, end) = (start.unwrap(), end.unwrap());
        assert_eq!(&content[start..end], " 1.0 ");
    }

    #[test]
    fn leaf_text_pops_the_path() {
        let content = "<project><parent><groupId>g</groupId><version>1</version></parent></project>";
        let mut cursor = EventCursor::new(content);
        loop {
            let step = cursor.next_step().unwrap();
            match step.kind {
                StepKind::Start { .. } if step.name == "groupId" => {
                    assert_eq!(cursor.read_leaf_text().unwrap(), "g");
                    // next element step must be version's start, at parent depth
                    let next = cursor.next_step().unwrap();
                    assert_eq!(next.path, "/project/parent/version");
                    return;
                }
                StepKind::Eof => panic!("groupId not found"),
                _ => {}
            }
        }
    }

    #[test]
    fn mismatched_end_tag_is_fatal() {
        let mut cursor = EventCursor::new("<project><version>1.0</oops></project>");
        let result = loop {
            match cursor.next_step() {
                Ok(step) => {
                    if matches!(step.kind, StepKind::Eof) {
                        break Ok(());
                    }
                }
                Err(err) => break Err(err),
            }
        };
        assert!(result.is_err());
    }

    #[test]
    fn eof_with_open_elements_is_fatal() {
        let mut cursor = EventCursor::new("<project><properties><foo>1</foo></properties>");
        let result = loop {
            match cursor.next_step() {
                Ok(step) => {
                    if matches!(step.kind, StepKind::Eof) {
                        break Ok(());
                    }
                }
                Err(err) => break Err(err),
            }
        };
        assert!(matches!(
            result,
            Err(PomError::UnclosedElement { ref path }) if path == "/project"
        ));
    }

    #[test]
    fn marks_require_both_bookmarks() {
        let mut marks = Marks::default();
        assert!(marks.range().is_none());
        marks.start = Some(4);
        assert!(marks.range().is_none());
        marks.end = Some(9);
        assert_eq!(marks.range(), Some((4, 9)));
        marks.clear();
        assert!(marks.range().is_none());
    }
}
