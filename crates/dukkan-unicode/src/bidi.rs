// this_file: crates/dukkan-unicode/src/bidi.rs

//! Logical to visual reordering for left-to-right-only painters

use unicode_bidi::BidiInfo;

/// Paired punctuation swaps sides inside a right-to-left run
fn mirror(ch: char) -> char {
    match ch {
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '<' => '>',
        '>' => '<',
        '«' => '»',
        '»' => '«',
        '‹' => '›',
        '›' => '‹',
        _ => ch,
    }
}

/// Reorders text into the sequence a left-to-right painter must draw
///
/// Right-to-left runs come out reversed and mirrored; digits and Latin
/// embedded in them keep their own left-to-right order. Each `\n`
/// separated line is resolved as its own paragraph.
pub fn visual_order(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut visual = String::with_capacity(text.len());
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            visual.push('\n');
        }
        reorder_line(line, &mut visual);
    }
    visual
}

fn reorder_line(line: &str, visual: &mut String) {
    if line.is_empty() {
        return;
    }

    let bidi = BidiInfo::new(line, None);
    if !bidi.has_rtl() {
        visual.push_str(line);
        return;
    }

    for paragraph in &bidi.paragraphs {
        let (levels, runs) = bidi.visual_runs(paragraph, paragraph.range.clone());

        for run in runs {
            if run.start >= run.end {
                continue;
            }
            let level = levels.get(run.start).copied().unwrap_or(paragraph.level);
            let fragment = &line[run];
            if level.is_rtl() {
                visual.extend(fragment.chars().rev().map(mirror));
            } else {
                visual.push_str(fragment);
            }
        }
    }
}
