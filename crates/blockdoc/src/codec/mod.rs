// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Markup codec: escaped text + annotation spans <-> inline tags.

mod decode;
mod encode;

pub use decode::{decode, Decoded};
pub use encode::encode;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Annotation;
    use crate::model::AnnotationKind::{Anchor, Bold, Italic, Strike, Underline};
    use crate::tree::ContentNode;

    /// Parse the inline tags `encode` emits back into a content tree. Only
    /// handles well-nested output, which is all these tests produce.
    fn to_tree(html: &str) -> ContentNode {
        let mut stack = vec![(String::from("p"), Vec::new())];
        let mut rest = html;
        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix("</") {
                let close = after.find('>').unwrap();
                let (tag, children) = stack.pop().unwrap();
                assert_eq!(tag, &after[..close]);
                stack
                    .last_mut()
                    .unwrap()
                    .1
                    .push(ContentNode::element(tag, children));
                rest = &after[close + 1..];
            } else if let Some(after) = rest.strip_prefix('<') {
                let close = after.find('>').unwrap();
                stack.push((after[..close].to_owned(), Vec::new()));
                rest = &after[close + 1..];
            } else {
                let next = rest.find('<').unwrap_or(rest.len());
                let text = html_escape::decode_html_entities(&rest[..next]);
                stack.last_mut().unwrap().1.push(ContentNode::text(text));
                rest = &rest[next..];
            }
        }
        let (tag, children) = stack.pop().unwrap();
        assert!(stack.is_empty());
        ContentNode::element(tag, children)
    }

    fn sorted(mut annotations: Vec<Annotation>) -> Vec<Annotation> {
        annotations.sort_by_key(|a| (a.start, a.end, a.kind.tag()));
        annotations
    }

    fn assert_round_trips(text: &str, annotations: Vec<Annotation>) {
        let html = encode(text, &annotations).unwrap();
        let decoded = decode(&to_tree(&html));
        assert_eq!(decoded.text, text, "text of {html}");
        assert_eq!(
            sorted(decoded.annotations),
            sorted(annotations),
            "annotations of {html}"
        );
    }

    #[test]
    fn disjoint_spans_round_trip() {
        assert_round_trips(
            "hello world",
            vec![Annotation::new(Bold, 0, 5), Annotation::new(Italic, 6, 11)],
        );
    }

    #[test]
    fn nested_spans_round_trip_in_any_input_order() {
        assert_round_trips(
            "abcdef",
            vec![
                Annotation::new(Italic, 2, 4),
                Annotation::new(Bold, 0, 6),
                Annotation::new(Underline, 2, 3),
            ],
        );
    }

    #[test]
    fn escaped_text_round_trips() {
        assert_round_trips(
            "1 &lt; 2 &amp;&amp; 3 &gt; 2",
            vec![Annotation::new(Strike, 0, 8), Annotation::new(Anchor, 9, 19)],
        );
    }

    #[test]
    fn adjacent_and_empty_spans_round_trip() {
        assert_round_trips(
            "ab",
            vec![
                Annotation::new(Bold, 0, 1),
                Annotation::new(Italic, 1, 2),
                Annotation::new(Underline, 2, 2),
            ],
        );
    }

    #[cfg(feature = "sys")]
    fn reparsed(text: &str, annotations: &[Annotation]) -> Decoded {
        let html = encode(text, annotations).unwrap();
        let nodes = crate::parser::parse_html(&format!("<p>{html}</p>"))
            .unwrap_or_else(|e| panic!("{html} did not parse: {e}"));
        decode(&nodes[0])
    }

    #[cfg(feature = "sys")]
    #[test]
    fn parsed_nested_markup_encodes_back_unchanged() {
        let nodes =
            crate::parser::parse_html("<p><b>a<i>b</i></b></p>").unwrap();
        let decoded = decode(&nodes[0]);
        assert_eq!(
            decoded.annotations,
            vec![Annotation::new(Bold, 0, 2), Annotation::new(Italic, 1, 2)]
        );
        assert_eq!(
            encode(&decoded.text, &decoded.annotations).unwrap(),
            "<b>a<i>b</i></b>"
        );
    }

    #[cfg(feature = "sys")]
    #[test]
    fn spans_sharing_an_end_survive_parsing() {
        let annotations = vec![
            Annotation::new(Underline, 0, 4),
            Annotation::new(Bold, 1, 4),
            Annotation::new(Italic, 3, 4),
        ];
        let decoded = reparsed("abcd", &annotations);
        assert_eq!(decoded.text, "abcd");
        assert_eq!(decoded.annotations, annotations);
    }

    #[cfg(feature = "sys")]
    #[test]
    fn spans_with_identical_ranges_survive_parsing() {
        let annotations = vec![
            Annotation::new(Bold, 0, 2),
            Annotation::new(Italic, 0, 2),
            Annotation::new(Strike, 0, 2),
        ];
        let decoded = reparsed("ab", &annotations);
        assert_eq!(decoded.annotations, annotations);
    }
}
