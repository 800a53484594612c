mod painter;
mod payload_view;
mod profile_view;
mod table;

pub(crate) use self::painter::Painter;
pub(crate) use self::payload_view::PayloadView;
pub(crate) use self::profile_view::ProfileView;
