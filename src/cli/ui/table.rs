use std::fmt::{self, Display, Formatter};

use tabled::{builder::Builder, settings::Style as TableStyle};

use super::painter::Painter;

/// Two-column field/value table rendered via `Display`.
#[derive(Debug)]
pub(crate) struct FieldTable {
    rows: Vec<[String; 2]>,
}

impl FieldTable {
    /// Creates a table with muted field names.
    pub(crate) fn new(painter: &Painter, rows: Vec<(&str, String)>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|(field, value)| [painter.field_name(field), value])
                .collect(),
        }
    }
}

impl Display for FieldTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut builder = Builder::default();
        builder.push_record(["field", "value"]);
        for row in &self.rows {
            builder.push_record(row);
        }
        let mut table = builder.build();
        table.with(TableStyle::rounded());
        write!(f, "{table}")
    }
}
