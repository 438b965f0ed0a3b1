// this_file: crates/dukkan-unicode/src/joining.rs

//! Contextual reshaping of Arabic letters into presentation forms
//!
//! Each letter is swapped for its isolated, final, initial or medial glyph
//! depending on whether its neighbours connect to it. Diacritics are
//! transparent: they sit on a letter without breaking the join.

use dukkan_core::types::ShapeOptions;

/// How a letter connects to its neighbours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joining {
    /// Never connects (hamza)
    None,
    /// Connects only to the letter before it (alef, dal, reh, waw...)
    Right,
    /// Connects on both sides
    Dual,
    /// Tatweel: forces a connection, has no forms of its own
    Causing,
}

impl Joining {
    fn joins_next(self) -> bool {
        matches!(self, Joining::Dual | Joining::Causing)
    }

    fn joins_prev(self) -> bool {
        matches!(self, Joining::Right | Joining::Dual | Joining::Causing)
    }
}

/// Presentation forms of one letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forms {
    pub isolated: char,
    pub final_form: char,
    pub initial: Option<char>,
    pub medial: Option<char>,
}

impl Forms {
    const fn single(isolated: char) -> Self {
        Self {
            isolated,
            final_form: isolated,
            initial: None,
            medial: None,
        }
    }

    const fn right(isolated: char, final_form: char) -> Self {
        Self {
            isolated,
            final_form,
            initial: None,
            medial: None,
        }
    }

    const fn dual(isolated: char, final_form: char, initial: char, medial: char) -> Self {
        Self {
            isolated,
            final_form,
            initial: Some(initial),
            medial: Some(medial),
        }
    }

    fn select(&self, joins_prev: bool, joins_next: bool) -> char {
        match (joins_prev, joins_next) {
            (true, true) => self.medial.unwrap_or(self.final_form),
            (true, false) => self.final_form,
            (false, true) => self.initial.unwrap_or(self.isolated),
            (false, false) => self.isolated,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Letter {
    ch: char,
    joining: Joining,
    forms: Forms,
}

const fn letter(ch: char, joining: Joining, forms: Forms) -> Letter {
    Letter { ch, joining, forms }
}

use Joining::{Causing, Dual, None as NonJoining, Right};

/// Sorted by code point for binary search
static LETTERS: &[Letter] = &[
    letter('\u{0621}', NonJoining, Forms::single('\u{FE80}')),
    letter('\u{0622}', Right, Forms::right('\u{FE81}', '\u{FE82}')),
    letter('\u{0623}', Right, Forms::right('\u{FE83}', '\u{FE84}')),
    letter('\u{0624}', Right, Forms::right('\u{FE85}', '\u{FE86}')),
    letter('\u{0625}', Right, Forms::right('\u{FE87}', '\u{FE88}')),
    letter('\u{0626}', Dual, Forms::dual('\u{FE89}', '\u{FE8A}', '\u{FE8B}', '\u{FE8C}')),
    letter('\u{0627}', Right, Forms::right('\u{FE8D}', '\u{FE8E}')),
    letter('\u{0628}', Dual, Forms::dual('\u{FE8F}', '\u{FE90}', '\u{FE91}', '\u{FE92}')),
    letter('\u{0629}', Right, Forms::right('\u{FE93}', '\u{FE94}')),
    letter('\u{062A}', Dual, Forms::dual('\u{FE95}', '\u{FE96}', '\u{FE97}', '\u{FE98}')),
    letter('\u{062B}', Dual, Forms::dual('\u{FE99}', '\u{FE9A}', '\u{FE9B}', '\u{FE9C}')),
    letter('\u{062C}', Dual, Forms::dual('\u{FE9D}', '\u{FE9E}', '\u{FE9F}', '\u{FEA0}')),
    letter('\u{062D}', Dual, Forms::dual('\u{FEA1}', '\u{FEA2}', '\u{FEA3}', '\u{FEA4}')),
    letter('\u{062E}', Dual, Forms::dual('\u{FEA5}', '\u{FEA6}', '\u{FEA7}', '\u{FEA8}')),
    letter('\u{062F}', Right, Forms::right('\u{FEA9}', '\u{FEAA}')),
    letter('\u{0630}', Right, Forms::right('\u{FEAB}', '\u{FEAC}')),
    letter('\u{0631}', Right, Forms::right('\u{FEAD}', '\u{FEAE}')),
    letter('\u{0632}', Right, Forms::right('\u{FEAF}', '\u{FEB0}')),
    letter('\u{0633}', Dual, Forms::dual('\u{FEB1}', '\u{FEB2}', '\u{FEB3}', '\u{FEB4}')),
    letter('\u{0634}', Dual, Forms::dual('\u{FEB5}', '\u{FEB6}', '\u{FEB7}', '\u{FEB8}')),
    letter('\u{0635}', Dual, Forms::dual('\u{FEB9}', '\u{FEBA}', '\u{FEBB}', '\u{FEBC}')),
    letter('\u{0636}', Dual, Forms::dual('\u{FEBD}', '\u{FEBE}', '\u{FEBF}', '\u{FEC0}')),
    letter('\u{0637}', Dual, Forms::dual('\u{FEC1}', '\u{FEC2}', '\u{FEC3}', '\u{FEC4}')),
    letter('\u{0638}', Dual, Forms::dual('\u{FEC5}', '\u{FEC6}', '\u{FEC7}', '\u{FEC8}')),
    letter('\u{0639}', Dual, Forms::dual('\u{FEC9}', '\u{FECA}', '\u{FECB}', '\u{FECC}')),
    letter('\u{063A}', Dual, Forms::dual('\u{FECD}', '\u{FECE}', '\u{FECF}', '\u{FED0}')),
    letter('\u{0640}', Causing, Forms::single('\u{0640}')),
    letter('\u{0641}', Dual, Forms::dual('\u{FED1}', '\u{FED2}', '\u{FED3}', '\u{FED4}')),
    letter('\u{0642}', Dual, Forms::dual('\u{FED5}', '\u{FED6}', '\u{FED7}', '\u{FED8}')),
    letter('\u{0643}', Dual, Forms::dual('\u{FED9}', '\u{FEDA}', '\u{FEDB}', '\u{FEDC}')),
    letter('\u{0644}', Dual, Forms::dual('\u{FEDD}', '\u{FEDE}', '\u{FEDF}', '\u{FEE0}')),
    letter('\u{0645}', Dual, Forms::dual('\u{FEE1}', '\u{FEE2}', '\u{FEE3}', '\u{FEE4}')),
    letter('\u{0646}', Dual, Forms::dual('\u{FEE5}', '\u{FEE6}', '\u{FEE7}', '\u{FEE8}')),
    letter('\u{0647}', Dual, Forms::dual('\u{FEE9}', '\u{FEEA}', '\u{FEEB}', '\u{FEEC}')),
    letter('\u{0648}', Right, Forms::right('\u{FEED}', '\u{FEEE}')),
    letter('\u{0649}', Dual, Forms::dual('\u{FEEF}', '\u{FEF0}', '\u{FBE8}', '\u{FBE9}')),
    letter('\u{064A}', Dual, Forms::dual('\u{FEF1}', '\u{FEF2}', '\u{FEF3}', '\u{FEF4}')),
    letter('\u{0671}', Right, Forms::right('\u{FB50}', '\u{FB51}')),
    letter('\u{067E}', Dual, Forms::dual('\u{FB56}', '\u{FB57}', '\u{FB58}', '\u{FB59}')),
    letter('\u{0686}', Dual, Forms::dual('\u{FB7A}', '\u{FB7B}', '\u{FB7C}', '\u{FB7D}')),
    letter('\u{0698}', Right, Forms::right('\u{FB8A}', '\u{FB8B}')),
    letter('\u{06A9}', Dual, Forms::dual('\u{FB8E}', '\u{FB8F}', '\u{FB90}', '\u{FB91}')),
    letter('\u{06AF}', Dual, Forms::dual('\u{FB92}', '\u{FB93}', '\u{FB94}', '\u{FB95}')),
    letter('\u{06CC}', Dual, Forms::dual('\u{FBFC}', '\u{FBFD}', '\u{FBFE}', '\u{FBFF}')),
];

const LAM: char = '\u{0644}';

/// Lam followed by one of the alefs fuses into a single right-joining glyph
fn lam_alef(alef: char) -> Option<Forms> {
    match alef {
        '\u{0622}' => Some(Forms::right('\u{FEF5}', '\u{FEF6}')),
        '\u{0623}' => Some(Forms::right('\u{FEF7}', '\u{FEF8}')),
        '\u{0625}' => Some(Forms::right('\u{FEF9}', '\u{FEFA}')),
        '\u{0627}' => Some(Forms::right('\u{FEFB}', '\u{FEFC}')),
        _ => None,
    }
}

fn lookup(ch: char) -> Option<&'static Letter> {
    LETTERS
        .binary_search_by_key(&ch, |letter| letter.ch)
        .ok()
        .map(|index| &LETTERS[index])
}

/// Arabic diacritics and Quranic annotation marks
pub fn is_harakah(ch: char) -> bool {
    matches!(ch, '\u{0610}'..='\u{061A}' | '\u{064B}'..='\u{065F}' | '\u{0670}')
}

/// Whether the shaper has presentation forms for this character
pub fn is_joining_letter(ch: char) -> bool {
    lookup(ch).is_some()
}

#[derive(Debug, Clone, Copy)]
enum Unit {
    /// Passed through and breaks any join
    Plain(char),
    /// Passed through without breaking a join
    Mark(char),
    Letter { joining: Joining, forms: Forms },
}

impl Unit {
    fn joining(&self) -> Option<Joining> {
        match self {
            Unit::Letter { joining, .. } => Some(*joining),
            _ => None,
        }
    }
}

fn itemize(text: &str, options: &ShapeOptions) -> Vec<Unit> {
    let mut units = Vec::with_capacity(text.len());
    let mut chars = text
        .chars()
        .filter(|ch| !(options.delete_harakat && is_harakah(*ch)))
        .peekable();

    while let Some(ch) = chars.next() {
        if is_harakah(ch) {
            units.push(Unit::Mark(ch));
            continue;
        }

        if options.ligatures && ch == LAM {
            if let Some(forms) = chars.peek().and_then(|next| lam_alef(*next)) {
                chars.next();
                units.push(Unit::Letter {
                    joining: Joining::Right,
                    forms,
                });
                continue;
            }
        }

        match lookup(ch) {
            Some(letter) => units.push(Unit::Letter {
                joining: letter.joining,
                forms: letter.forms,
            }),
            None => units.push(Unit::Plain(ch)),
        }
    }

    units
}

/// Nearest non-mark neighbour's joining type, if it is a letter
fn neighbour(units: &[Unit], mut indices: impl Iterator<Item = usize>) -> Option<Joining> {
    indices
        .find(|&i| !matches!(units[i], Unit::Mark(_)))
        .and_then(|i| units[i].joining())
}

/// Replaces Arabic letters with their contextual presentation forms
///
/// Output stays in logical order; everything that is not an Arabic letter
/// passes through untouched.
pub fn reshape(text: &str, options: &ShapeOptions) -> String {
    if text.is_empty() {
        return String::new();
    }

    let units = itemize(text, options);
    let mut shaped = String::with_capacity(text.len());

    for (index, unit) in units.iter().enumerate() {
        match unit {
            Unit::Plain(ch) | Unit::Mark(ch) => shaped.push(*ch),
            Unit::Letter { joining, forms } => {
                let joins_prev = joining.joins_prev()
                    && neighbour(&units, (0..index).rev()).is_some_and(Joining::joins_next);
                let joins_next = joining.joins_next()
                    && neighbour(&units, index + 1..units.len()).is_some_and(Joining::joins_prev);
                shaped.push(forms.select(joins_prev, joins_next));
            },
        }
    }

    shaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reshape_default(text: &str) -> String {
        reshape(text, &ShapeOptions::default())
    }

    #[test]
    fn table_is_sorted_for_binary_search() {
        assert!(LETTERS.windows(2).all(|pair| pair[0].ch < pair[1].ch));
    }

    #[test]
    fn single_letter_is_isolated() {
        assert_eq!(reshape_default("ب"), "\u{FE8F}");
        assert_eq!(reshape_default("ء"), "\u{FE80}");
    }

    #[test]
    fn word_takes_initial_medial_final_forms() {
        // baa, taa, baa: initial, medial, final
        assert_eq!(reshape_default("بتب"), "\u{FE91}\u{FE98}\u{FE90}");
    }

    #[test]
    fn right_joining_letter_breaks_following_join() {
        // meem, reh, hah, beh, alef
        assert_eq!(
            reshape_default("مرحبا"),
            "\u{FEE3}\u{FEAE}\u{FEA3}\u{FE92}\u{FE8E}"
        );
    }

    #[test]
    fn lam_alef_becomes_ligature() {
        assert_eq!(reshape_default("لا"), "\u{FEFB}");
        assert_eq!(reshape_default("سلام"), "\u{FEB3}\u{FEFC}\u{FEE1}");
        assert_eq!(reshape_default("لأ"), "\u{FEF7}");
    }

    #[test]
    fn ligatures_can_be_disabled() {
        let options = ShapeOptions {
            ligatures: false,
            ..Default::default()
        };
        assert_eq!(reshape("لا", &options), "\u{FEDF}\u{FE8E}");
    }

    #[test]
    fn harakat_are_removed_by_default() {
        assert_eq!(reshape_default("بَب"), "\u{FE91}\u{FE90}");
    }

    #[test]
    fn kept_harakat_do_not_break_joining() {
        let options = ShapeOptions {
            delete_harakat: false,
            ..Default::default()
        };
        assert_eq!(reshape("بَب", &options), "\u{FE91}\u{064E}\u{FE90}");
    }

    #[test]
    fn tatweel_forces_connection() {
        assert_eq!(reshape_default("بـ"), "\u{FE91}\u{0640}");
    }

    #[test]
    fn spaces_and_digits_break_words() {
        assert_eq!(reshape_default("ب 1ب"), "\u{FE8F} 1\u{FE8F}");
    }

    #[test]
    fn latin_passes_through() {
        assert_eq!(reshape_default("Hello, 42!"), "Hello, 42!");
        assert_eq!(reshape_default(""), "");
    }

    #[test]
    fn persian_letters_are_shaped() {
        // peh, gaf
        assert_eq!(reshape_default("پگ"), "\u{FB58}\u{FB93}");
    }
}
