//! Top-level application assembly.

use axum::Router;
use tower_http::trace::TraceLayer;

use reserva_core::AppResult;

use crate::selector::VersionSelector;
use crate::state::AppState;
use crate::{v1, v2};

/// Build the complete HTTP application.
///
/// With the v1 generation enabled the version selector fronts both
/// sub-applications; otherwise the v2 sub-application serves alone and
/// handles the version endpoints itself.
pub fn build_app(state: AppState) -> AppResult<Router> {
    let v2_app = v2::app::build_v2_app(state.clone())?;

    let router = if state.config.api.enable_v1 {
        let v1_app = v1::app::build_v1_app(state);
        VersionSelector::new(v1_app, v2_app).into_router()
    } else {
        v2_app
    };

    Ok(router.layer(TraceLayer::new_for_http()))
}
