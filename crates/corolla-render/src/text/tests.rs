use super::*;

fn style(font_size: f64, weight: &str) -> TextStyle {
    TextStyle {
        font_family: Some("'Segoe UI', sans-serif".to_string()),
        font_size,
        font_weight: Some(weight.to_string()),
    }
}

#[test]
fn deterministic_measurer_scales_with_font_and_weight() {
    let measurer = DeterministicTextMeasurer::default();
    let regular = measurer.measure("Quality", &style(10.0, "normal")).unwrap();
    assert!((regular.width - 42.0).abs() < 1e-9);
    assert_eq!(regular.line_count, 1);

    let bold = measurer.measure("Quality", &style(10.0, "600")).unwrap();
    assert!((bold.width - 46.2).abs() < 1e-9);
}

#[test]
fn wide_glyphs_count_two_columns() {
    let measurer = DeterministicTextMeasurer {
        char_width_factor: 1.0,
        ..Default::default()
    };
    let m = measurer.measure("日本", &style(10.0, "normal")).unwrap();
    assert_eq!(m.width, 40.0);
}

#[test]
fn unavailable_measurer_falls_back_to_char_estimate() {
    let width = measure_width_or_estimate(
        &UnavailableTextMeasurer,
        "Customer",
        &style(8.0, "normal"),
        6.0,
    );
    assert_eq!(width, 48.0);
}

#[test]
fn wrap_splits_between_words_when_too_wide() {
    let lines = wrap_words_greedy(
        "Customer Satisfaction",
        &UnavailableTextMeasurer,
        &style(8.0, "normal"),
        40.0,
        6.0,
    );
    assert_eq!(lines, vec!["Customer", "Satisfaction"]);
}

#[test]
fn wrap_keeps_short_names_on_one_line() {
    for name in ["Quality", "Goal Clarity", "Time to market"] {
        let lines = wrap_words_greedy(
            name,
            &UnavailableTextMeasurer,
            &style(8.0, "normal"),
            500.0,
            6.0,
        );
        assert_eq!(lines, vec![name.to_string()]);
    }
}

#[test]
fn wrap_never_breaks_inside_a_word() {
    let name = "Cross-functional collaboration across many distributed teams";
    let lines = wrap_words_greedy_with(name, 30.0, |s| s.len() as f64 * 5.0);
    assert!(lines.len() > 1);

    let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
    let original: Vec<&str> = name.split_whitespace().collect();
    assert_eq!(rejoined, original);
}

#[test]
fn wrap_fills_lines_greedily() {
    // 5px per char, 60px limit: "aa bb cc" = 40, "aa bb cc dd" = 55, "+ ee" = 70.
    let lines = wrap_words_greedy_with("aa bb cc dd ee ff", 60.0, |s| s.len() as f64 * 5.0);
    assert_eq!(lines, vec!["aa bb cc dd", "ee ff"]);
}

#[test]
fn wrap_of_blank_text_is_empty() {
    assert!(wrap_words_greedy_with("", 10.0, |_| 0.0).is_empty());
    assert!(wrap_words_greedy_with(" \t\n ", 10.0, |_| 0.0).is_empty());
}

#[test]
fn wrap_with_zero_width_puts_each_word_on_its_own_line() {
    let lines = wrap_words_greedy_with("Innovation Outcomes", 0.0, |s| s.len() as f64);
    assert_eq!(lines, vec!["Innovation", "Outcomes"]);
}

#[test]
fn bold_detection_accepts_keywords_and_numeric_weights() {
    assert!(style(10.0, "bold").is_bold());
    assert!(style(10.0, "600").is_bold());
    assert!(!style(10.0, "400").is_bold());
    assert!(!style(10.0, "normal").is_bold());
    assert!(!TextStyle::default().is_bold());
}
