use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::db::clear_all_data;
use crate::errors::AppError;
use crate::state::AppState;

/// DELETE /api/v1/admin/reset
///
/// Wipes every table. Only available when ENABLE_DATABASE_RESET is set.
pub async fn handle_reset_database(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    if !state.config.enable_database_reset {
        return Err(AppError::Forbidden(
            "Database reset is disabled".to_string(),
        ));
    }

    warn!("Database reset requested");
    clear_all_data(&state.db).await?;

    Ok(Json(json!({
        "success": true,
        "message": "All data cleared"
    })))
}
