use std::fmt::{self, Display, Formatter};
use std::path::Path;

use crate::profile::MerchantProfile;

use super::painter::Painter;
use super::table::FieldTable;

/// Pretty rendering of the saved merchant profile.
pub(crate) struct ProfileView<'a> {
    path: &'a Path,
    profile: Option<&'a MerchantProfile>,
    painter: &'a Painter,
}

impl<'a> ProfileView<'a> {
    pub(crate) fn new(
        path: &'a Path,
        profile: Option<&'a MerchantProfile>,
        painter: &'a Painter,
    ) -> Self {
        Self {
            path,
            profile,
            painter,
        }
    }
}

impl Display for ProfileView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let painter = self.painter;
        writeln!(f, "{}", painter.heading("Merchant profile"))?;

        let Some(profile) = self.profile else {
            return write!(
                f,
                "{} {}",
                painter.notice("No profile saved at"),
                self.path.display()
            );
        };

        let rows = vec![
            ("path", self.path.display().to_string()),
            ("key", profile.key().to_string()),
            ("name", profile.display_name().to_string()),
            ("city", profile.display_city().to_string()),
        ];
        write!(f, "{}", FieldTable::new(painter, rows))
    }
}
