use std::path::PathBuf;

use taskboard_docs::decoration::PageNumber;
use taskboard_docs::documents::{DocumentKind, Publication};
use taskboard_docs::fonts;
use taskboard_docs::{
    Anchor, ContentBuilder, DecorationPlan, PageChrome, RenderError, Renderer, StyleError, StyleSheet,
    TextStyle,
};
use sha2::{Digest, Sha256};

const SKIP_HINT: &str =
    "fonts missing. Set TASKBOARD_DOCS_FONTS_DIR or copy Roboto into assets/fonts";

fn body_sheet() -> StyleSheet {
    let mut sheet = StyleSheet::new();
    sheet
        .define("Body", TextStyle::new().with_size(11).with_leading(14.0))
        .unwrap();
    sheet
        .define(
            "Heading",
            TextStyle::new().bold().with_size(16).with_space_after(8.0),
        )
        .unwrap();
    sheet
}

fn numbered_plan() -> DecorationPlan {
    DecorationPlan::new(
        PageChrome::blank(),
        PageChrome::blank().with_page_number(PageNumber::new(TextStyle::new().with_size(9))),
    )
}

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("taskboard_docs_{}_{}.pdf", name, std::process::id()))
}

fn render_sample_pdf() -> Option<Vec<u8>> {
    if !fonts::fonts_available() {
        return None;
    }

    let sheet = body_sheet();
    let mut builder = ContentBuilder::new(&sheet);
    builder
        .heading("Heading", "Sample")
        .unwrap()
        .paragraph("Body", "Hello, <b>PDF</b>!")
        .unwrap();
    let content = builder.finish();

    let rendered = Renderer::default()
        .with_title("Sample")
        .render(&sheet, &content, &numbered_plan())
        .expect("render sample pdf");
    Some(rendered.bytes)
}

/// Volatile PDF fields: creation/modification stamps, file identifiers and XMP ids.
const VOLATILE_FIELDS: &[(&[u8], &[u8])] = &[
    (b"/CreationDate(", b")"),
    (b"/ModDate(", b")"),
    (b"/Producer(", b")"),
    (b"/ID[", b"]"),
    (b"<xmp:CreateDate>", b"</xmp:CreateDate>"),
    (b"<xmp:ModifyDate>", b"</xmp:ModifyDate>"),
    (b"<xmp:MetadataDate>", b"</xmp:MetadataDate>"),
    (b"<xmpMM:DocumentID>", b"</xmpMM:DocumentID>"),
    (b"<xmpMM:InstanceID>", b"</xmpMM:InstanceID>"),
    (b"<xmpMM:VersionID>", b"</xmpMM:VersionID>"),
];

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|position| from + position)
}

/// Overwrites the value of every volatile field with zeros, keeping delimiters and whitespace
/// so byte offsets stay valid.
fn normalize_pdf(bytes: &[u8]) -> Vec<u8> {
    let mut normalized = bytes.to_vec();
    for (open, close) in VOLATILE_FIELDS {
        let mut cursor = 0;
        while let Some(start) = find(&normalized, open, cursor) {
            let value_start = start + open.len();
            let Some(value_end) = find(&normalized, close, value_start) else {
                break;
            };
            normalized[value_start..value_end]
                .iter_mut()
                .filter(|byte| !matches!(**byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r'))
                .for_each(|byte| *byte = b'0');
            cursor = value_end + close.len();
        }
    }
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(normalize_pdf(bytes)).into()
}

fn page_count(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes)
        .expect("parse rendered pdf")
        .get_pages()
        .len()
}

#[test]
fn dangling_style_is_rejected_while_building() {
    let mut sheet = StyleSheet::new();
    sheet.define("Body", TextStyle::new()).unwrap();
    let mut builder = ContentBuilder::new(&sheet);
    let err = builder.paragraph("Title", "Welcome").unwrap_err();
    assert_eq!(err, StyleError::Undefined("Title".to_owned()));
    assert!(builder.is_empty());
}

#[test]
fn dangling_style_fails_before_any_output() {
    let authoring = body_sheet();
    let mut builder = ContentBuilder::new(&authoring);
    builder.paragraph("Heading", "Welcome").unwrap();
    let content = builder.finish();

    let mut rendering = StyleSheet::new();
    rendering.define("Body", TextStyle::new()).unwrap();

    let path = scratch_path("dangling");
    let err = Renderer::default()
        .render_to_file(&rendering, &content, &DecorationPlan::plain(), &path)
        .unwrap_err();
    assert!(matches!(
        err,
        RenderError::Style(StyleError::Undefined(ref name)) if name == "Heading"
    ));
    assert!(!path.exists());
}

#[test]
fn empty_content_writes_nothing() {
    let sheet = body_sheet();
    let content = ContentBuilder::new(&sheet).finish();
    let path = scratch_path("empty");
    let err = Renderer::default()
        .render_to_file(&sheet, &content, &DecorationPlan::plain(), &path)
        .unwrap_err();
    assert!(matches!(err, RenderError::EmptyDocument));
    assert!(!path.exists());
}

#[test]
fn volatile_metadata_is_zeroed() {
    let pdf = b"<</CreationDate(D:20240101) /ID[<ab12> <cd34>]>> <xmp:CreateDate>2024</xmp:CreateDate>";
    let normalized = normalize_pdf(pdf);
    assert_eq!(
        normalized,
        b"<</CreationDate(0000000000) /ID[<0000> <0000>]>> <xmp:CreateDate>0000</xmp:CreateDate>"
            .to_vec()
    );
}

#[test]
fn single_paragraph_fits_one_unnumbered_page() {
    if !fonts::fonts_available() {
        eprintln!("Skipping single_paragraph_fits_one_unnumbered_page: {}", SKIP_HINT);
        return;
    }

    let sheet = body_sheet();
    let mut builder = ContentBuilder::new(&sheet);
    builder.heading("Body", "Hello").unwrap();
    let content = builder.finish();

    let rendered = Renderer::default()
        .render(&sheet, &content, &numbered_plan())
        .expect("render hello");
    assert_eq!(rendered.report.page_count, 1);
    assert!(rendered.report.numbered_pages.is_empty());
    assert_eq!(
        rendered.report.anchors,
        vec![Anchor {
            title: "Hello".to_owned(),
            page: 1
        }]
    );

    let document = lopdf::Document::load_mem(&rendered.bytes).expect("parse rendered pdf");
    let pages = document.get_pages();
    assert_eq!(pages.len(), 1);
    let page_id = pages[&1];
    let operations = document
        .get_and_decode_page_content(page_id)
        .expect("decode page content")
        .operations;
    assert!(
        operations
            .iter()
            .any(|op| op.operator == "Tj" || op.operator == "TJ"),
        "page should show the paragraph text"
    );
}

#[test]
fn numbering_starts_on_second_page_and_anchors_advance() {
    if !fonts::fonts_available() {
        eprintln!(
            "Skipping numbering_starts_on_second_page_and_anchors_advance: {}",
            SKIP_HINT
        );
        return;
    }

    let sheet = body_sheet();
    let mut builder = ContentBuilder::new(&sheet);
    for chapter in 1..=4 {
        builder
            .heading("Heading", format!("Chapter {}", chapter))
            .unwrap();
        for line in 0..30 {
            builder
                .paragraph("Body", format!("Chapter {} line {}", chapter, line))
                .unwrap();
        }
        if chapter % 2 == 0 {
            builder.page_break().unwrap();
        }
    }
    let content = builder.finish();

    let rendered = Renderer::default()
        .render(&sheet, &content, &numbered_plan())
        .expect("render chapters");
    let report = rendered.report;

    assert!(report.page_count > 1);
    assert_eq!(report.page_count, page_count(&rendered.bytes));
    assert_eq!(
        report.numbered_pages,
        (2..=report.page_count).collect::<Vec<_>>()
    );

    let titles: Vec<&str> = report.anchors.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, ["Chapter 1", "Chapter 2", "Chapter 3", "Chapter 4"]);
    assert_eq!(report.anchors[0].page, 1);
    assert!(report
        .anchors
        .windows(2)
        .all(|pair| pair[0].page <= pair[1].page));
}

#[test]
fn rendering_is_deterministic() {
    let (Some(bytes_a), Some(bytes_b)) = (render_sample_pdf(), render_sample_pdf()) else {
        eprintln!("Skipping rendering_is_deterministic: {}", SKIP_HINT);
        return;
    };

    assert_eq!(bytes_a.len(), bytes_b.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&bytes_a),
        normalized_hash(&bytes_b),
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn built_in_documents_render() {
    if !fonts::fonts_available() {
        eprintln!("Skipping built_in_documents_render: {}", SKIP_HINT);
        return;
    }

    for kind in DocumentKind::ALL {
        let publication = Publication::build(kind).unwrap();
        let rendered = publication
            .renderer()
            .render(&publication.sheet, &publication.content, &publication.plan)
            .unwrap_or_else(|err| panic!("render {}: {}", kind, err));
        let report = rendered.report;

        assert!(report.page_count > 2, "{} is too short", kind);
        let expected_numbers = match kind {
            DocumentKind::Whitepaper => (2..=report.page_count).collect::<Vec<_>>(),
            DocumentKind::Guide => Vec::new(),
        };
        assert_eq!(report.numbered_pages, expected_numbers, "{} numbering", kind);
        assert_eq!(
            report.anchors.len(),
            publication.content.outline().count(),
            "every {} section should land on a page",
            kind
        );
        assert!(report
            .anchors
            .windows(2)
            .all(|pair| pair[0].page <= pair[1].page));
    }
}
