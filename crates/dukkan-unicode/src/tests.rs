// this_file: crates/dukkan-unicode/src/tests.rs

use super::*;

#[test]
fn test_empty_text() {
    assert_eq!(shape(""), "");
}

#[test]
fn test_plain_latin_unchanged() {
    let text = "Invoice #12 (paid) - total: 495.5";
    assert_eq!(shape(text), text);
}

#[test]
fn test_arabic_word_shaped_and_reversed() {
    // "marhaban": presentation forms, drawn right to left
    assert_eq!(
        shape("مرحبا"),
        "\u{FE8E}\u{FE92}\u{FEA3}\u{FEAE}\u{FEE3}"
    );
}

#[test]
fn test_lam_alef_ligature_in_visual_order() {
    assert_eq!(shape("سلام"), "\u{FEE1}\u{FEFC}\u{FEB3}");
}

#[test]
fn test_digits_keep_reading_order() {
    let shaped = shape("قميص × 12 = 3600 ج.م");
    assert!(shaped.contains("12"));
    assert!(shaped.contains("3600"));
    assert!(!shaped.contains("21"));
    assert!(!shaped.contains("0063"));
}

#[test]
fn test_quantity_line_layout() {
    // "baa x 3": the number sits between the reversed words
    let shaped = shape("ب × 3");
    assert_eq!(shaped, "3 × \u{FE8F}");
}

#[test]
fn test_latin_run_inside_arabic_keeps_order() {
    let shaped = shape("الهاتف: Omar 0100");
    assert!(shaped.contains("Omar 0100"));
}

#[test]
fn test_emoji_passes_through() {
    let shaped = shape("🎉 شكرا 🎉");
    assert_eq!(shaped.chars().filter(|c| *c == '🎉').count(), 2);
}

#[test]
fn test_shaper_is_deterministic() {
    let shaper = ArabicShaper::default();
    let text = "الإجمالي: 550 ج.م";
    assert_eq!(shaper.shape(text), shaper.shape(text));
    assert_eq!(shaper.name(), "arabic-bidi");
}

#[test]
fn test_options_are_honoured() {
    let shaper = ArabicShaper::new(ShapeOptions {
        delete_harakat: true,
        ligatures: false,
    });
    assert_eq!(shaper.shape("لا"), "\u{FE8E}\u{FEDF}");
    assert!(!shaper.options().ligatures);
}

#[test]
fn test_multiline_shaped_per_line() {
    let shaped = shape("ب\nA");
    assert_eq!(shaped, "\u{FE8F}\nA");
}
