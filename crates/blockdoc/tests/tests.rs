// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use blockdoc::{
    apply_delta, block_candidates, compute_delta, decode, encode,
    extract_document, Annotation, AnnotationKind, Block, BlockKind,
    ContentNode, Delta, DeltaError, Document, ElementNode, MarkupError,
    Operation, RevisionHistory, ToHtml,
};
use indoc::indoc;
use speculoos::prelude::*;

fn block(
    id: &str,
    kind: BlockKind,
    text: &str,
    spans: &[(AnnotationKind, usize, usize)],
) -> Block {
    let annotations = spans
        .iter()
        .map(|&(kind, start, end)| Annotation::new(kind, start, end))
        .collect();
    Block::new(id, kind, text, annotations)
}

fn ids(document: &Document) -> Vec<&str> {
    document.blocks.iter().map(|b| b.id.as_str()).collect()
}

#[test]
fn nested_annotations_survive_encode_and_decode() {
    let text = "bold and italic";
    let annotations = vec![
        Annotation::new(AnnotationKind::Bold, 0, 15),
        Annotation::new(AnnotationKind::Italic, 9, 15),
    ];
    let markup = encode(text, &annotations).unwrap();
    assert_eq!(markup, "<b>bold and <i>italic</i></b>");

    let italic =
        ElementNode::new("i", Vec::new(), [ContentNode::text("italic")]);
    let bold = ElementNode::new(
        "b",
        Vec::new(),
        [ContentNode::text("bold and "), ContentNode::from(italic)],
    );
    let node = ContentNode::element("p", [ContentNode::from(bold)]);
    let decoded = decode(&node);
    assert_eq!(decoded.text, text);
    assert_eq!(decoded.annotations, annotations);
}

#[test]
fn annotation_past_the_end_is_a_structural_error() {
    let result = encode(
        "hello",
        &[Annotation::new(AnnotationKind::Underline, 1, 10)],
    );
    assert_that!(result)
        .is_err()
        .is_equal_to(MarkupError::Unterminated {
            open: vec![AnnotationKind::Underline],
        });
}

#[test]
fn touching_spans_close_before_they_open() {
    let result = encode(
        "ab",
        &[
            Annotation::new(AnnotationKind::Bold, 0, 1),
            Annotation::new(AnnotationKind::Italic, 1, 2),
        ],
    );
    assert_that!(result).is_ok().is_equal_to("<b>a</b><i>b</i>".to_owned());
}

#[test]
fn rendered_document_can_be_snapshotted_again() {
    let document = Document::new(vec![
        block("t", BlockKind::Heading1, "Title", &[]),
        block(
            "p",
            BlockKind::Paragraph,
            "Fish &amp; chips",
            &[(AnnotationKind::Bold, 0, 4), (AnnotationKind::Strike, 5, 10)],
        ),
        block("e", BlockKind::Quote, "", &[]),
    ]);

    let html = document.to_html().unwrap();
    let snapshot = Document::from_html(&html).unwrap();
    assert_eq!(snapshot, document);
}

#[test]
fn blocks_with_coinciding_spans_can_be_snapshotted_again() {
    let document = Document::new(vec![
        block(
            "same",
            BlockKind::Paragraph,
            "ab",
            &[(AnnotationKind::Bold, 0, 2), (AnnotationKind::Italic, 0, 2)],
        ),
        block(
            "shared-end",
            BlockKind::Heading2,
            "abc",
            &[
                (AnnotationKind::Anchor, 0, 3),
                (AnnotationKind::Underline, 1, 3),
            ],
        ),
    ]);

    let html = document.to_html().unwrap();
    assert_that!(html.as_str()).contains("<b><i>ab</i></b>");
    assert_that!(html.as_str()).contains("<a>a<u>bc</u></a>");
    assert_that!(Document::from_html(&html))
        .is_ok()
        .is_equal_to(document);
}

#[test]
fn snapshot_ignores_content_outside_blocks() {
    let html = indoc! {r#"
        <div>
            <h2 name="h" class="se-elem se-elem--h2">Heading</h2>
            <span>not a block</span>
            <p class="se-elem se-elem--p">no id</p>
            <p name="p" class="se-elem se-elem--p"><i>Lean</i> text</p>
        </div>
    "#};
    let snapshot = Document::from_html(html).unwrap();
    assert_eq!(ids(&snapshot), vec!["h", "p"]);
    assert_eq!(snapshot.blocks[0].kind, BlockKind::Heading2);
    assert_eq!(
        snapshot.blocks[1],
        block(
            "p",
            BlockKind::Paragraph,
            "Lean text",
            &[(AnnotationKind::Italic, 0, 4)]
        )
    );
}

#[test]
fn candidates_can_be_extracted_from_a_hand_built_tree() {
    let nodes = vec![ContentNode::element(
        "section",
        [ContentNode::from(
            ElementNode::new("p", Vec::new(), [ContentNode::text("x")])
                .with_attr("name", "only")
                .with_attr("class", "se-elem se-elem--p"),
        )],
    )];
    let document = extract_document(block_candidates(&nodes));
    assert_eq!(ids(&document), vec!["only"]);
}

#[test]
fn editing_session_replays_through_history() {
    let first = Document::from_html(indoc! {r#"
        <h1 name="a" class="se-elem se-elem--h1">Notes</h1>
        <p name="b" class="se-elem se-elem--p">one</p>
        <p name="c" class="se-elem se-elem--p">two</p>
    "#})
    .unwrap();
    let second = Document::from_html(indoc! {r#"
        <h1 name="a" class="se-elem se-elem--h1">Notes</h1>
        <p name="c" class="se-elem se-elem--p"><b>two</b></p>
        <blockquote name="d" class="se-elem se-elem--blockquote">three</blockquote>
    "#})
    .unwrap();
    let third = Document::from_html(indoc! {r#"
        <blockquote name="d" class="se-elem se-elem--blockquote">three</blockquote>
    "#})
    .unwrap();

    let mut history = RevisionHistory::new(first.clone());
    assert_eq!(history.commit(second.clone()), Some(1));
    assert_eq!(history.commit(second.clone()), None);
    assert_eq!(history.commit(third.clone()), Some(2));

    let revisions = history.revisions();
    assert_eq!(
        revisions[0].delta.operations,
        vec![
            Operation::Delete { index: 1 },
            Operation::Update {
                index: 1,
                block: second.blocks[1].clone()
            },
            Operation::Create {
                index: 2,
                block: second.blocks[2].clone()
            },
        ]
    );

    let at_first =
        history.document_at(&revisions[0].delta.revision_id).unwrap();
    let at_second =
        history.document_at(&revisions[1].delta.revision_id).unwrap();
    assert_eq!(at_first, Some(second));
    assert_eq!(at_second.as_ref(), Some(&third));
    assert_eq!(
        at_second.unwrap().to_html().unwrap(),
        "<blockquote name='d' class='se-elem se-elem--blockquote'>three</blockquote>"
    );
}

#[test]
fn empty_delta_returns_the_source_unchanged() {
    let mut document =
        Document::new(vec![block("a", BlockKind::Paragraph, "x", &[])]);
    let expected = document.clone();
    let delta = compute_delta(&document, &expected);
    assert!(delta.is_empty());
    let result = apply_delta(&mut document, &delta).unwrap();
    assert_eq!(*result, expected);
}

#[test]
fn delete_indices_are_valid_during_replay() {
    let mut source = Document::new(vec![
        block("a", BlockKind::Paragraph, "1", &[]),
        block("b", BlockKind::Paragraph, "2", &[]),
        block("c", BlockKind::Paragraph, "3", &[]),
    ]);
    let target =
        Document::new(vec![block("b", BlockKind::Paragraph, "2", &[])]);
    let delta = compute_delta(&source, &target);
    assert_eq!(
        delta.operations,
        vec![Operation::Delete { index: 0 }, Operation::Delete { index: 1 }]
    );
    apply_delta(&mut source, &delta).unwrap();
    assert_eq!(source, target);
}

#[test]
fn update_one_past_the_end_is_an_index_error() {
    let mut source = Document::new(vec![
        block("a", BlockKind::Paragraph, "1", &[]),
        block("b", BlockKind::Paragraph, "2", &[]),
    ]);
    let delta = Delta::new(vec![Operation::Update {
        index: 2,
        block: block("z", BlockKind::Paragraph, "", &[]),
    }]);
    assert_that!(apply_delta(&mut source, &delta))
        .is_err()
        .matches(|e| {
            matches!(e, DeltaError::IndexOutOfRange { index: 2, len: 2, .. })
        });
}

#[test]
fn stored_deltas_replay_like_computed_ones() {
    let source =
        Document::new(vec![block("a", BlockKind::Paragraph, "old", &[])]);
    let target = Document::new(vec![
        block(
            "a",
            BlockKind::Heading2,
            "new",
            &[(AnnotationKind::Anchor, 0, 3)],
        ),
        block("b", BlockKind::Paragraph, "more", &[]),
    ]);
    let delta_json = compute_delta(&source, &target).to_json().unwrap();
    let source_json = source.to_json().unwrap();

    let replayed =
        blockdoc::apply_delta_json(&source_json, &delta_json).unwrap();
    assert_eq!(replayed, target);
}
