//! Appearance streams for label annotations

use super::annotations::LABEL_FONT_NAME;
use crate::constants::LABEL_LINE_SPACING;
use crate::types::Color;

/// Approximate glyph advance for Helvetica, relative to font size
const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Minimum inset of text from the box edge (points)
const TEXT_PADDING: f32 = 2.0;

/// Content stream for a label box: white fill, thin colored frame, and
/// the lines centered inside.
pub fn label_appearance(lines: &[String], width: f32, height: f32, color: Color, font_size: f32) -> String {
    let [r, g, b] = color.components();
    let mut ops = String::new();

    ops.push_str("q\n");

    // Box
    ops.push_str("1 1 1 rg\n");
    ops.push_str(&format!("0 0 {} {} re f\n", width, height));
    ops.push_str(&format!("{} {} {} RG\n", r, g, b));
    ops.push_str("0.5 w\n");
    ops.push_str(&format!(
        "0.25 0.25 {} {} re S\n",
        width - 0.5,
        height - 0.5
    ));

    // Text, block centered vertically
    let line_height = font_size * LABEL_LINE_SPACING;
    let block_height = line_height * lines.len() as f32;
    let mut baseline = (height + block_height) / 2.0 - font_size;

    ops.push_str("BT\n");
    ops.push_str(&format!("/{} {} Tf\n", LABEL_FONT_NAME, font_size));
    ops.push_str(&format!("{} {} {} rg\n", r, g, b));
    for line in lines {
        let text_width = line.chars().count() as f32 * font_size * HELVETICA_CHAR_WIDTH_RATIO;
        let x = ((width - text_width) / 2.0).max(TEXT_PADDING);
        ops.push_str(&format!(
            "1 0 0 1 {} {} Tm ({}) Tj\n",
            x,
            baseline,
            escape_pdf_string(line)
        ));
        baseline -= line_height;
    }
    ops.push_str("ET\n");

    ops.push_str("Q\n");
    ops
}

/// Escape a literal string for use inside `( )` in a content stream
fn escape_pdf_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '(' | ')' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            c if c.is_ascii() && !c.is_ascii_control() => escaped.push(c),
            _ => escaped.push('?'),
        }
    }
    escaped
}
