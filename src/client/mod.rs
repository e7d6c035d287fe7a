//! Page client: list, form and dialogs over a resource's HTTP surface.

pub mod api;
pub mod controller;
pub mod render;
pub mod state;

pub use api::{ClientError, HttpResourceApi, Lookup, Reply, ResourceApi};
pub use controller::{Confirmation, Notice, NoticeKind, PageController, Prompter};
pub use state::{FormState, Mode, ViewState};
