use owo_colors::{OwoColorize, Style as OwoStyle};

use crate::codec::render_checksum;

/// Styles the pieces of a charge report for the terminal.
#[derive(Debug)]
pub(crate) struct Painter {
    use_colour: bool,
}

impl Painter {
    pub(crate) fn new(use_colour: bool) -> Self {
        Self { use_colour }
    }

    pub(crate) fn heading<T: AsRef<str>>(&self, text: T) -> String {
        self.paint(text.as_ref(), OwoStyle::new().bold().cyan())
    }

    /// Left-hand column of a field table.
    pub(crate) fn field_name(&self, name: &str) -> String {
        self.paint(name, OwoStyle::new().dimmed())
    }

    /// A checksum that matched its content, e.g. `1D3D ok`.
    pub(crate) fn verified_checksum(&self, checksum: u16) -> String {
        let text = format!("{} ok", render_checksum(checksum));
        self.paint(&text, OwoStyle::new().bold().green())
    }

    /// Something the reader should act on or be aware of, such as an
    /// open amount or a missing profile.
    pub(crate) fn notice<T: AsRef<str>>(&self, text: T) -> String {
        self.paint(text.as_ref(), OwoStyle::new().bold().yellow())
    }

    /// Copy-and-paste payload text. Bold only, so terminals that strip
    /// escapes on copy still yield the exact payload.
    pub(crate) fn payload(&self, payload: &str) -> String {
        self.paint(payload, OwoStyle::new().bold())
    }

    fn paint(&self, text: &str, style: OwoStyle) -> String {
        if self.use_colour {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::manual_sample(0x1D3D, "1D3D ok")]
    #[case::zero_led(0x0DE8, "0DE8 ok")]
    fn verified_checksum_is_padded_uppercase_hex(#[case] checksum: u16, #[case] expected: &str) {
        assert_eq!(expected, Painter::new(false).verified_checksum(checksum));
    }

    #[test]
    fn plain_painter_leaves_payload_untouched() {
        let payload = "00020126580014br.gov.bcb.pix";
        let painter = Painter::new(false);
        assert_eq!(payload, painter.payload(payload));
        assert_eq!("key", painter.field_name("key"));
        assert_eq!("Pix charge", painter.heading("Pix charge"));
    }

    #[test]
    fn colour_painter_keeps_text_inside_escapes() {
        let painter = Painter::new(true);
        let checksum = painter.verified_checksum(0x73AA);
        assert!(checksum.starts_with('\u{1b}'));
        assert!(checksum.contains("73AA ok"));

        let notice = painter.notice("open (payer chooses)");
        assert_ne!("open (payer chooses)", notice);
        assert!(notice.contains("open (payer chooses)"));
    }
}
