use super::*;

// Golden fixtures for the description pipeline. These outputs are the
// regression surface: every vector in the description space depends on them.

#[test]
fn test_desc_basic_clean() {
    assert_eq!(
        normalize_description("This is a test description."),
        "thi is a test descript"
    );
}

#[test]
fn test_desc_foreign_truncation_colon_marker() {
    assert_eq!(
        normalize_description("English part. Spanish:[spoiler] Spanish part."),
        "english part "
    );
}

#[test]
fn test_desc_foreign_truncation_blank_line() {
    assert_eq!(
        normalize_description("English part. \n\nFrench part starts here."),
        "english part "
    );
}

#[test]
fn test_desc_unicode_normalization() {
    assert_eq!(
        normalize_description("Café, jalapeño, résumé."),
        "cafe jalapeno resum"
    );
}

#[test]
fn test_desc_newline_handling() {
    assert_eq!(
        normalize_description("Line 1.\nLine 2.\r\nLine 3."),
        "line 1 line 2 line 3"
    );
}

#[test]
fn test_desc_english_label_removal() {
    assert_eq!(
        normalize_description("[b][u]English: This is the description."),
        " thi is the descript"
    );
}

#[test]
fn test_desc_bbcode_removal() {
    assert_eq!(
        normalize_description("This is [b]bold[/b] and [u]underlined[/u]."),
        "thi is bold and underlin"
    );
}

#[test]
fn test_desc_bracket_aside_removal() {
    assert_eq!(
        normalize_description("Description with [useless info]."),
        "descript with "
    );
}

#[test]
fn test_desc_source_removal() {
    assert_eq!(
        normalize_description("Description (source: mangaupdates)."),
        "descript "
    );
}

#[test]
fn test_desc_html_removal() {
    assert_eq!(
        normalize_description("<p>Paragraph 1</p><br>Paragraph 2"),
        " paragraph 1 paragraph 2"
    );
}

#[test]
fn test_desc_url_in_middle_loses_only_symbols() {
    assert_eq!(
        normalize_description("Check http://example.com and https://test.org for more."),
        "check httpexamplecom and httpstestorg for more"
    );
}

#[test]
fn test_desc_leading_url_wipes_everything() {
    assert_eq!(normalize_description("http://example.com is a link."), " ");
}

#[test]
fn test_desc_email_removal() {
    assert_eq!(
        normalize_description("Contact us at support@example.com."),
        "contact us at "
    );
}

#[test]
fn test_desc_contraction_expansion() {
    assert_eq!(
        normalize_description("I don't think it's fair."),
        "i do not think it is fair"
    );
}

#[test]
fn test_desc_symbol_removal() {
    assert_eq!(
        normalize_description("Hello! How are you? @#$%^"),
        "hello how ar you "
    );
}

#[test]
fn test_desc_multiple_spaces() {
    assert_eq!(
        normalize_description("Too    many     spaces."),
        "too mani space"
    );
}

#[test]
fn test_desc_stemming() {
    assert_eq!(
        normalize_description("Running walking played categories"),
        "run walk plai categori"
    );
}

#[test]
fn test_desc_mixed_case() {
    assert_eq!(normalize_description("MiXeD CaSe TeXt"), "mix case text");
}

#[test]
fn test_desc_curly_apostrophe() {
    assert_eq!(normalize_description("I don\u{2019}t know"), "i do not know");
}

#[test]
fn test_desc_empty() {
    assert_eq!(normalize_description(""), "");
}

// Title pipeline.

#[test]
fn test_title_basic() {
    assert_eq!(normalize_title("The Long Voyage"), "the long voyag");
}

#[test]
fn test_title_strips_punctuation() {
    assert_eq!(normalize_title("Re:Start! (Promo)"), "restart promo");
}

#[test]
fn test_title_fully_non_ascii_is_empty() {
    assert_eq!(normalize_title("日本語のタイトル"), "");
}

#[test]
fn test_title_whitespace_only_is_single_space() {
    assert_eq!(normalize_title("   "), " ");
    assert_eq!(normalize_title("\t\n"), " ");
}

#[test]
fn test_title_tabs_become_spaces() {
    assert_eq!(normalize_title("a\tb"), "a b");
}

// Tag pipeline.

#[test]
fn test_tag_strips_everything_but_alphanumerics() {
    assert_eq!(normalize_tag("4-Koma"), "4Koma");
    assert_eq!(normalize_tag("Sexual Violence"), "SexualViolence");
    assert_eq!(normalize_tag("Boys' Love"), "BoysLove");
    assert_eq!(normalize_tag("Sci-Fi"), "SciFi");
}

#[test]
fn test_tag_keeps_case() {
    assert_eq!(normalize_tag("Isekai"), "Isekai");
}

#[test]
fn test_tag_non_ascii_dropped() {
    assert_eq!(normalize_tag("恋愛"), "");
}
