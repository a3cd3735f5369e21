//! Session lifecycle.
//!
//! A stored session is reused while it is younger than `api-timeout-mins`.
//! Otherwise leafctl logs in again and persists the new identifiers. There
//! is no retry: a failed login ends the run.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::core::api::{Credentials, Session, VehicleApi};
use crate::error::Result;
use crate::storage::{SessionRecord, Settings};

/// How the session for this run was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Stored identifiers were young enough to reuse.
    Reused,
    /// A login call produced new identifiers.
    Refreshed,
}

/// Session identifiers plus how they were obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstablishedSession {
    pub session: Session,
    pub outcome: SessionOutcome,
}

/// Reuse the stored session or log in, updating `settings` in memory.
///
/// Does not touch the remote service when the stored session is fresh.
pub async fn establish_session(
    api: &dyn VehicleApi,
    settings: &mut Settings,
    now: DateTime<Utc>,
) -> Result<EstablishedSession> {
    let timeout_mins = settings.api.timeout_mins;
    let elapsed = settings.session.elapsed_minutes(now);

    if !settings.session.is_stale(now, timeout_mins) {
        tracing::debug!(elapsed_mins = elapsed, timeout_mins, "Reusing stored session");
        return Ok(EstablishedSession {
            session: Session {
                session_id: settings.session.session_id.clone(),
                vin: settings.session.vin.clone(),
            },
            outcome: SessionOutcome::Reused,
        });
    }

    tracing::info!("Logging in, please wait...");
    tracing::debug!(elapsed_mins = elapsed, timeout_mins, "Stored session is stale");
    let credentials = Credentials {
        username: settings.api.username.clone(),
        password: settings.api.password.clone(),
    };
    let session = api.login(&credentials).await?;
    tracing::info!("Logged in.");

    #[allow(clippy::cast_precision_loss)]
    let last_login_time = now.timestamp_millis() as f64 / 1000.0;
    settings.set_session(SessionRecord {
        last_login_time,
        session_id: session.session_id.clone(),
        vin: session.vin.clone(),
        ..SessionRecord::default()
    });

    Ok(EstablishedSession {
        session,
        outcome: SessionOutcome::Refreshed,
    })
}

/// Establish a session and persist it to `path` if it was refreshed.
pub async fn open_session(
    api: &dyn VehicleApi,
    settings: &mut Settings,
    path: &Path,
    now: DateTime<Utc>,
) -> Result<EstablishedSession> {
    let established = establish_session(api, settings, now).await?;
    if established.outcome == SessionOutcome::Refreshed {
        settings.save_to(path)?;
    }
    Ok(established)
}
