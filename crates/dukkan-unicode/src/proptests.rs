use super::*;
use proptest::prelude::*;

// Property: text without right-to-left characters comes back unchanged
proptest! {
    #[test]
    fn prop_ltr_text_unchanged(s in "[ -~]{0,64}") {
        prop_assert_eq!(shape(&s), s);
    }
}

// Property: digit runs embedded in Arabic keep their left-to-right order
proptest! {
    #[test]
    fn prop_digits_survive_inside_arabic(n in 10u32..1_000_000) {
        let digits = n.to_string();
        let shaped = shape(&format!("الكمية × {} = المجموع", digits));
        prop_assert!(shaped.contains(&digits));
    }
}

// Property: shaping never changes the number of non-Arabic characters
proptest! {
    #[test]
    fn prop_non_arabic_chars_preserved(s in "[a-z0-9 ]{0,16}", word in "[ابتثجحخدذرزسشصضطظعغفقكمنهوي]{1,8}") {
        let text = format!("{} {}", word, s);
        let shaped = shape(&text);
        let count = |t: &str, c: char| t.chars().filter(|x| *x == c).count();
        for c in s.chars() {
            prop_assert_eq!(count(&shaped, c), count(&text, c));
        }
    }
}

// Property: empty input stays empty whatever the options
proptest! {
    #[test]
    fn prop_empty_stays_empty(delete_harakat in any::<bool>(), ligatures in any::<bool>()) {
        let shaper = ArabicShaper::new(ShapeOptions { delete_harakat, ligatures });
        prop_assert_eq!(shaper.shape(""), "");
    }
}
