//! Hashnav core: pure router state machine and view-model helpers.
mod effect;
mod msg;
mod route;
mod scroll;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, PageKind};
pub use msg::{ArticleRef, Msg};
pub use route::{
    page_of, page_title, theme_of, validate_page, InvalidArgument, Route, Theme, HOME_PAGE,
};
pub use scroll::{clamp_offset, ScrollHistory, TOP_OFFSET};
pub use state::{Epoch, JobId, NavConfig, RouterState};
pub use update::update;
pub use view_model::NavViewModel;
