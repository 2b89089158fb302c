use docmark::config::NumberingOptions;
use docmark::document::annotate_markup;

const MARKUP: &str = "<h1>Mission</h1>\
                      <p>First directive paragraph.</p>\
                      <h2>Execution</h2>\
                      <p style=\"margin-left: 20px\">Second directive paragraph.</p>";

#[cfg(test)]
mod attribute_tests {
    use super::*;

    #[test]
    fn all_metadata_families_are_injected() {
        let output = annotate_markup(MARKUP, &NumberingOptions::default());

        assert!(output.contains("data-section=\"1\""), "output: {output}");
        assert!(output.contains("data-level=\"1\""));
        assert!(output.contains("data-section=\"1.1\""));
        assert!(output.contains("data-level=\"2\""));
        assert!(output.contains("data-paragraph=\"1.1\""));
        assert!(output.contains("data-paragraph=\"1.1.1\""));
        assert!(output.contains("data-line-start=\"1\""));
        assert!(output.contains("data-page=\"1\""));
    }

    #[test]
    fn heading_prefixes_appear_in_the_text() {
        let output = annotate_markup(MARKUP, &NumberingOptions::default());
        assert!(output.contains(">1. Mission</h1>"));
        assert!(output.contains(">1.1 Execution</h2>"));
    }

    #[test]
    fn author_styling_is_preserved() {
        let output = annotate_markup(MARKUP, &NumberingOptions::default());
        assert!(output.contains("style=\"margin-left: 20px\""));
    }
}

#[cfg(test)]
mod option_gating_tests {
    use super::*;

    #[test]
    fn disabling_paragraph_numbers_drops_addresses_and_prefixes() {
        let options = NumberingOptions {
            enable_paragraph_numbers: false,
            ..Default::default()
        };
        let output = annotate_markup(MARKUP, &options);
        assert!(!output.contains("data-paragraph"));
        assert!(!output.contains("data-section"));
        assert!(output.contains(">Mission</h1>"), "heading text stays untouched");
        assert!(output.contains("data-line-start"), "line pass still runs");
    }

    #[test]
    fn disabling_line_numbers_keeps_addresses() {
        let options = NumberingOptions {
            enable_line_numbers: false,
            ..Default::default()
        };
        let output = annotate_markup(MARKUP, &options);
        assert!(!output.contains("data-line-start"));
        assert!(!output.contains("numbered-line"));
        assert!(output.contains("data-paragraph=\"1.1\""));
    }

    #[test]
    fn disabling_page_numbers_drops_page_tags_and_markers() {
        let options = NumberingOptions {
            enable_page_numbers: false,
            lines_per_page: 1,
            ..Default::default()
        };
        let output = annotate_markup(MARKUP, &options);
        assert!(!output.contains("data-page"));
        assert!(!output.contains("page-marker"));
    }

    #[test]
    fn degenerate_input_passes_through() {
        let options = NumberingOptions::default();
        assert_eq!(annotate_markup("", &options), "");
        assert_eq!(
            annotate_markup("plain text, no tags", &options),
            "plain text, no tags"
        );
    }
}
