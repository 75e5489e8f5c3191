//! Integration tests for hierarchy reconstruction and outline persistence.

use sectionize::{
    extract_with_options, load_outline, Alignment, Attributes, Error, ExtractOptions, FontSize,
    FormatTag, LayoutDocument, Outline, Page, Section, Span,
};

fn bold(text: &str, size: f32, top: f32) -> Span {
    Span::new(text, [50.0, top, 250.0, top + size], size, "Helvetica-Bold").bold()
}

fn body(text: &str, top: f32) -> Span {
    Span::new(text, [50.0, top, 550.0, top + 10.0], 10.0, "Helvetica")
}

/// Headings of sizes 16, 14, 14, 16 across two pages.
fn layout() -> LayoutDocument {
    let mut doc = LayoutDocument::new();

    let mut first = Page::new(1);
    first.add_line(vec![bold("Medical Plan", 16.0, 60.0)]);
    first.add_line(vec![body("the medical plan covers hospital care", 90.0)]);
    first.add_line(vec![bold("In Network", 14.0, 120.0)]);
    first.add_line(vec![body("network providers bill the plan", 150.0)]);
    doc.add_page(first);

    let mut second = Page::new(2);
    second.add_line(vec![bold("Out of Network", 14.0, 60.0)]);
    second.add_line(vec![body("other providers bill you", 90.0)]);
    second.add_line(vec![bold("Dental Plan", 16.0, 120.0)]);
    second.add_line(vec![body("cleanings twice a year", 150.0)]);
    doc.add_page(second);

    doc
}

fn options() -> ExtractOptions {
    ExtractOptions::new().with_heading_repetition(2, 2)
}

fn section(heading: &str, attributes: Attributes, sequence: u32) -> Section {
    Section::new(heading, attributes, sequence)
}

fn sized(size: f32) -> Attributes {
    Attributes {
        size: FontSize::from_points(size),
        alignment: Alignment::Left,
        page: 1,
        ..Default::default()
    }
}

fn breadcrumbs(outline: &Outline) -> Vec<&str> {
    outline
        .sections
        .iter()
        .map(|s| s.breadcrumb.as_deref().unwrap_or(""))
        .collect()
}

// ==================== Reconstruction ====================

#[test]
fn test_sizes_16_14_14_16_from_layout() {
    let outline = extract_with_options(&layout(), options()).unwrap();

    assert_eq!(
        breadcrumbs(&outline),
        vec![
            "Medical Plan",
            "Medical Plan -> In Network",
            "Medical Plan -> Out of Network",
            "Dental Plan"
        ]
    );
    assert_eq!(outline.sections[1].parent, Some(1));
    assert_eq!(outline.sections[2].parent, Some(1));
    assert_eq!(outline.sections[3].parent, None);
}

#[test]
fn test_custom_separator() {
    let outline =
        extract_with_options(&layout(), options().with_separator(" / ")).unwrap();
    assert_eq!(
        outline.sections[2].breadcrumb.as_deref(),
        Some("Medical Plan / Out of Network")
    );
    assert_eq!(outline.separator, " / ");
}

#[test]
fn test_caps_outranks_same_size() {
    let mut caps = sized(14.0);
    caps.formatting.insert(FormatTag::AllCaps);

    let mut outline = Outline::new(vec![
        section("Benefits", sized(14.0), 1),
        section("EXCLUSIONS", caps.clone(), 2),
        section("Cosmetic", sized(14.0), 3),
    ]);
    outline.build_hierarchy().unwrap();

    assert_eq!(
        breadcrumbs(&outline),
        vec!["Benefits", "EXCLUSIONS", "EXCLUSIONS -> Cosmetic"]
    );
}

#[test]
fn test_centered_outranks_left_and_indentation_breaks_ties() {
    let mut centered = sized(12.0);
    centered.alignment = Alignment::Center;
    let mut indented = sized(12.0);
    indented.indentation = 70;

    let mut outline = Outline::new(vec![
        section("Part One", centered.clone(), 1),
        section("Rules", sized(12.0), 2),
        section("Exceptions", indented, 3),
        section("Part Two", centered, 4),
    ]);
    outline.build_hierarchy().unwrap();

    assert_eq!(
        breadcrumbs(&outline),
        vec![
            "Part One",
            "Part One -> Rules",
            "Part One -> Rules -> Exceptions",
            "Part Two"
        ]
    );
}

// ==================== Index and Context ====================

#[test]
fn test_section_index_and_context() {
    let outline = extract_with_options(&layout(), options()).unwrap();
    let index = outline.index().unwrap();

    assert_eq!(index.roots(), &[1, 4]);
    assert_eq!(index.children(1), &[2, 3]);

    let ctx = outline.context(3).unwrap();
    assert_eq!(ctx.section.heading, "Out of Network");
    assert_eq!(ctx.parent_heading(), Some("Medical Plan"));

    assert!(matches!(outline.context(42), Err(Error::SectionNotFound(42))));
}

#[test]
fn test_flat_outline_has_no_index() {
    let outline = extract_with_options(&layout(), options().flat()).unwrap();
    assert!(matches!(outline.index(), Err(Error::HierarchyNotBuilt)));
}

// ==================== Idempotence ====================

#[test]
fn test_second_reconstruction_is_skipped() {
    let mut outline = extract_with_options(&layout(), options()).unwrap();
    let before: Vec<String> = breadcrumbs(&outline).iter().map(|s| s.to_string()).collect();

    assert!(!outline.build_hierarchy().unwrap());
    assert_eq!(breadcrumbs(&outline), before);
}

#[test]
fn test_reloaded_outline_is_not_rebuilt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("outline.json");

    let outline = extract_with_options(&layout(), options()).unwrap();
    outline.save(&path).unwrap();

    // A reload with a different separator must keep the stored breadcrumbs
    let reloaded = load_outline(&path, &options().with_separator(" | ")).unwrap();
    assert_eq!(breadcrumbs(&reloaded), breadcrumbs(&outline));
    assert_eq!(reloaded.generated_at, outline.generated_at);
}

#[test]
fn test_flat_outline_built_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat.json");

    let outline = extract_with_options(&layout(), options().flat()).unwrap();
    outline.save(&path).unwrap();

    let loaded = load_outline(&path, &options()).unwrap();
    assert!(loaded.hierarchy_built);
    assert_eq!(loaded.sections[1].path, vec!["Medical Plan", "In Network"]);
}
