//! Configuration diagnosis endpoint.
//!
//! Reports resolved endpoints, path templates, and auth *presence* --
//! never key material -- so a misconfigured deployment can be debugged
//! from a browser.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct DiagResponse {
    pub ok: bool,
    pub time: chrono::DateTime<chrono::Utc>,
    pub default_provider: &'static str,
    pub kie: KieDiag,
    pub fal: FalDiag,
    pub fast_model: String,
    pub quality_model: String,
    pub eleven_key_present: bool,
    pub mux_enabled: bool,
}

#[derive(Serialize)]
pub struct KieDiag {
    pub prefix: String,
    pub fast_path: String,
    pub quality_path: String,
    pub result_paths: Vec<String>,
    pub has_auth: bool,
}

#[derive(Serialize)]
pub struct FalDiag {
    pub base: String,
    pub submit_path: String,
    pub result_base: String,
    pub has_auth: bool,
}

/// GET /diag
pub async fn diag(State(state): State<AppState>) -> Json<DiagResponse> {
    let kie = state.kie.config();
    let fal = state.fal.config();

    Json(DiagResponse {
        ok: true,
        time: chrono::Utc::now(),
        default_provider: state.config.default_provider.as_str(),
        kie: KieDiag {
            prefix: kie.api_prefix.clone(),
            fast_path: kie.fast_path.clone(),
            quality_path: kie.quality_path.clone(),
            result_paths: kie.result_paths.clone(),
            has_auth: !kie.api_key.is_empty(),
        },
        fal: FalDiag {
            base: fal.base_url.clone(),
            submit_path: fal.submit_path.clone(),
            result_base: fal.result_base.clone(),
            has_auth: fal.credentials.is_some(),
        },
        fast_model: kie.models.fast.clone(),
        quality_model: kie.models.quality.clone(),
        eleven_key_present: state.eleven.has_credentials(),
        mux_enabled: state.config.enable_mux,
    })
}
