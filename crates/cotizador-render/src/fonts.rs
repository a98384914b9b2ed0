//! # Built-in Fonts
//!
//! Metrics and text encoding for the standard Helvetica faces every PDF
//! viewer ships. No font file is embedded.
//!
//! Widths are in thousandths of the font size (AFM units) and cover the
//! printable ASCII range; accented Latin-1 letters take the width of their
//! base letter.

/// Font faces used on the quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
    Oblique,
}

impl Face {
    /// Resource name inside the page.
    pub const fn resource(&self) -> &'static str {
        match self {
            Face::Regular => "F1",
            Face::Bold => "F2",
            Face::Oblique => "F3",
        }
    }

    /// PostScript name of the standard font.
    pub const fn base_font(&self) -> &'static str {
        match self {
            Face::Regular => "Helvetica",
            Face::Bold => "Helvetica-Bold",
            Face::Oblique => "Helvetica-Oblique",
        }
    }

    pub const ALL: [Face; 3] = [Face::Regular, Face::Bold, Face::Oblique];
}

// Widths for ' ' (0x20) through '~' (0x7E).
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // sp - /
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0 - 9
    278, 278, 584, 584, 584, 556, 1015, // : - @
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A - M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N - Z
    278, 278, 278, 469, 556, 333, // [ - `
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a - m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n - z
    334, 260, 334, 584, // { - ~
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // sp - /
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0 - 9
    333, 333, 584, 584, 584, 611, 975, // : - @
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A - M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N - Z
    333, 278, 333, 584, 556, 333, // [ - `
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a - m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n - z
    389, 280, 389, 584, // { - ~
];

/// Width of a single character in AFM units.
pub fn char_width(face: Face, c: char) -> u16 {
    let table = match face {
        Face::Bold => &HELVETICA_BOLD,
        // Oblique shares the regular metrics
        Face::Regular | Face::Oblique => &HELVETICA,
    };

    let c = base_letter(c);
    match c as u32 {
        0x20..=0x7E => table[(c as u32 - 0x20) as usize],
        _ => match c {
            '¿' => 611,
            '¡' => 333,
            _ => 556,
        },
    }
}

/// Width of `text` in points at `size`.
pub fn text_width(face: Face, size: f64, text: &str) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(face, c))).sum();
    f64::from(units) * size / 1000.0
}

/// Greedy word wrap to lines no wider than `max_width` points.
///
/// A single word wider than the line is kept whole on its own line.
pub fn wrap(face: Face, size: f64, text: &str, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if current.is_empty() || text_width(face, size, &candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Encodes text as WinAnsi bytes for a built-in font.
///
/// Latin-1 maps straight through; a handful of typographic marks map into
/// the 0x80–0x9F block; anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            _ => match c {
                '€' => 0x80,
                '‘' => 0x91,
                '’' => 0x92,
                '“' => 0x93,
                '”' => 0x94,
                '•' => 0x95,
                '–' => 0x96,
                '—' => 0x97,
                _ => b'?',
            },
        })
        .collect()
}

fn base_letter(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ñ' => 'N',
        'Ç' => 'C',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(char_width(Face::Regular, ' '), 278);
        assert_eq!(char_width(Face::Regular, 'W'), 944);
        assert_eq!(char_width(Face::Regular, '~'), 584);
        assert_eq!(char_width(Face::Bold, 'b'), 611);
        assert_eq!(char_width(Face::Regular, 'í'), char_width(Face::Regular, 'i'));
        assert_eq!(char_width(Face::Oblique, 'ñ'), 556);
    }

    #[test]
    fn test_text_width() {
        // "ab" = 556 + 556 units at 10pt
        assert!((text_width(Face::Regular, 10.0, "ab") - 11.12).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "uno dos tres cuatro cinco seis siete ocho nueve diez";
        let lines = wrap(Face::Regular, 12.0, text, 80.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(Face::Regular, 12.0, line) <= 80.0 || !line.contains(' '));
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_keeps_long_word() {
        let lines = wrap(Face::Regular, 12.0, "Motoconformadora", 10.0);
        assert_eq!(lines, ["Motoconformadora"]);
        assert!(wrap(Face::Regular, 12.0, "   ", 10.0).is_empty());
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Día"), vec![b'D', 0xED, b'a']);
        assert_eq!(encode_win_ansi("Teléfono")[3], 0xE9);
        assert_eq!(encode_win_ansi("ñ€"), vec![0xF1, 0x80]);
        assert_eq!(encode_win_ansi("📥"), vec![b'?']);
    }
}
