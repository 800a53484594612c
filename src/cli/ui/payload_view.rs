use std::fmt::{self, Display, Formatter};

use crate::codec::DecodedPayload;

use super::painter::Painter;
use super::table::FieldTable;

/// Pretty rendering of a decoded payload, optionally followed by the payload
/// text itself.
pub(crate) struct PayloadView<'a> {
    decoded: &'a DecodedPayload,
    payload: Option<&'a str>,
    painter: &'a Painter,
}

impl<'a> PayloadView<'a> {
    pub(crate) fn new(decoded: &'a DecodedPayload, painter: &'a Painter) -> Self {
        Self {
            decoded,
            payload: None,
            painter,
        }
    }

    pub(crate) fn with_payload(mut self, payload: &'a str) -> Self {
        self.payload = Some(payload);
        self
    }
}

impl Display for PayloadView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let decoded = self.decoded;
        let painter = self.painter;
        let amount = decoded
            .amount()
            .map_or_else(|| painter.notice("open (payer chooses)"), |amount| amount.to_string());

        let rows = vec![
            ("key", decoded.key().to_string()),
            ("name", decoded.name().to_string()),
            ("city", decoded.city().to_string()),
            ("amount", amount),
            ("currency", decoded.currency().to_string()),
            ("country", decoded.country_code().to_string()),
            ("category", decoded.merchant_category_code().to_string()),
            (
                "reference",
                decoded.reference_label().unwrap_or("-").to_string(),
            ),
            ("checksum", painter.verified_checksum(decoded.checksum())),
        ];

        writeln!(f, "{}", painter.heading("Pix charge"))?;
        write!(f, "{}", FieldTable::new(painter, rows))?;
        if let Some(payload) = self.payload {
            write!(
                f,
                "\n\n{}\n{}",
                painter.heading("Copy and paste"),
                painter.payload(payload)
            )?;
        }
        Ok(())
    }
}
