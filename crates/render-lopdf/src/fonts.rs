//! The two standard Type1 fonts receipts are set in, with their advance widths.
//!
//! Standard-14 fonts need no embedding, but layout still needs their metrics
//! to right-align amounts and clip long text. Widths are the Adobe AFM values
//! in thousandths of an em for the printable ASCII range.

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Approximate advance for the Latin-1 supplement, which the tables above don't cover.
const LATIN1_WIDTH: u16 = 556;

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

/// Text cut to fit a width, with flags telling whether anything was lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FittedText {
    pub text: String,
    pub clipped: bool,
    /// Some characters have no WinAnsi code and will print as `?`.
    pub substituted: bool,
}

impl StandardFont {
    pub const ALL: [StandardFont; 2] = [StandardFont::Helvetica, StandardFont::HelveticaBold];

    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Name of the font in the page resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
        }
    }

    /// Advance width of `c` in thousandths of an em, as it will be encoded.
    pub fn advance(self, c: char) -> u16 {
        let table = match self {
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        match win_ansi_byte(c) {
            b @ 0x20..=0x7E => table[(b - 0x20) as usize],
            _ => LATIN1_WIDTH,
        }
    }

    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.advance(c))).sum();
        units as f32 * size / 1000.0
    }

    /// Cuts `text` so it fits `max_width`, ending clipped text with "...".
    pub fn fit(self, text: &str, size: f32, max_width: f32) -> FittedText {
        let substituted = unencodable(text).next().is_some();
        if self.text_width(text, size) <= max_width {
            return FittedText {
                text: text.to_string(),
                clipped: false,
                substituted,
            };
        }

        let budget = max_width - self.text_width(ELLIPSIS, size);
        let mut kept = String::new();
        let mut width = 0.0;
        for c in text.chars() {
            let advance = f32::from(self.advance(c)) * size / 1000.0;
            if width + advance > budget {
                break;
            }
            width += advance;
            kept.push(c);
        }

        let kept = kept.trim_end();
        let text = if budget < 0.0 {
            String::new()
        } else {
            format!("{}{}", kept, ELLIPSIS)
        };
        FittedText {
            text,
            clipped: true,
            substituted,
        }
    }
}

/// The WinAnsiEncoding byte for `c`, if there is one.
pub fn to_win_ansi(c: char) -> Option<u8> {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => Some(c as u8),
        _ => match c {
            '€' => Some(0x80),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '–' => Some(0x96),
            '—' => Some(0x97),
            _ => None,
        },
    }
}

/// Maps `c` to its WinAnsiEncoding byte; unmappable characters become `?`.
pub fn win_ansi_byte(c: char) -> u8 {
    to_win_ansi(c).unwrap_or(b'?')
}

/// The characters of `text` the standard fonts cannot print.
pub fn unencodable(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|&c| to_win_ansi(c).is_none())
}

pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        assert_eq!(StandardFont::Helvetica.advance('A'), 667);
        assert_eq!(StandardFont::HelveticaBold.advance('A'), 722);
        assert_eq!(StandardFont::Helvetica.advance('i'), 222);
        assert_eq!(StandardFont::Helvetica.advance('~'), 584);
        assert_eq!(StandardFont::Helvetica.advance('0'), 556);
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let w10 = StandardFont::Helvetica.text_width("1500.00", 10.0);
        let w20 = StandardFont::Helvetica.text_width("1500.00", 20.0);
        // six digits and a period
        assert!((w10 - (6.0 * 5.56 + 2.78)).abs() < 0.001);
        assert!((w20 - 2.0 * w10).abs() < 0.001);
    }

    #[test]
    fn test_fit_leaves_short_text_alone() {
        let fitted = StandardFont::Helvetica.fit("Tuition", 10.0, 200.0);
        assert_eq!(fitted.text, "Tuition");
        assert!(!fitted.clipped);
    }

    #[test]
    fn test_fit_clips_with_ellipsis() {
        let long = "Advanced Diploma in Computer Applications - second installment";
        let fitted = StandardFont::Helvetica.fit(long, 10.0, 100.0);
        assert!(fitted.clipped);
        assert!(fitted.text.ends_with("..."));
        assert!(StandardFont::Helvetica.text_width(&fitted.text, 10.0) <= 100.0);
        assert!(long.starts_with(fitted.text.trim_end_matches("...")));
    }

    #[test]
    fn test_fit_into_nothing_is_empty() {
        let fitted = StandardFont::Helvetica.fit("Tuition", 10.0, 2.0);
        assert!(fitted.clipped);
        assert!(fitted.text.is_empty());
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Jane Doe"), b"Jane Doe".to_vec());
        assert_eq!(encode_win_ansi("Café €5"), vec![b'C', b'a', b'f', 0xE9, b' ', 0x80, b'5']);
        assert_eq!(encode_win_ansi("₹"), b"?".to_vec());
        assert_eq!(StandardFont::Helvetica.advance('₹'), StandardFont::Helvetica.advance('?'));
    }

    #[test]
    fn test_unencodable_characters_are_reported() {
        assert_eq!(unencodable("Café – €5").count(), 0);
        assert_eq!(unencodable("R-\u{0967}\u{0968}").collect::<Vec<_>>(), vec!['\u{0967}', '\u{0968}']);

        let fitted = StandardFont::Helvetica.fit("\u{091C}\u{0947}\u{0928}", 10.0, 200.0);
        assert!(fitted.substituted);
        assert!(!fitted.clipped);
        assert!(!StandardFont::Helvetica.fit("Jane Doe", 10.0, 200.0).substituted);
    }
}
