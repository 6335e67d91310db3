//! Moderator actions on user accounts.

use crate::error::TransportError;
use crate::transport::Transport;

/// Path of the message-send endpoint.
pub const MESSAGE_SAVE_PATH: &str = "/users/message/save";

/// Path of the annotation endpoint for `user_id`.
#[must_use]
pub fn annotate_path(user_id: u64) -> String {
    format!("/admin/users/{user_id}/annotate")
}

/// Path of the account deletion endpoint for `user_id`.
#[must_use]
pub fn delete_path(user_id: u64) -> String {
    format!("/admin/users/{user_id}/delete")
}

/// Path of a user's profile, which redirects to the canonical URL.
#[must_use]
pub fn profile_path(user_id: u64) -> String {
    format!("/users/{user_id}")
}

/// Path of the message composer for `user_id`.
#[must_use]
pub fn message_create_path(user_id: u64) -> String {
    format!("/users/message/create/{user_id}")
}

async fn post_expecting_ok<T: Transport>(
    transport: &T,
    path: &str,
    fields: &[(String, String)],
) -> Result<(), TransportError> {
    let response = transport.post_form(path, fields).await?;
    if response.status == 200 {
        Ok(())
    } else {
        Err(TransportError::Status {
            path: path.to_string(),
            status: response.status,
        })
    }
}

/// Adds an annotation to a user's profile. Only HTTP 200 counts as success.
pub async fn annotate_user<T: Transport>(
    transport: &T,
    fkey: &str,
    user_id: u64,
    annotation: &str,
) -> Result<(), TransportError> {
    let path = annotate_path(user_id);
    tracing::debug!(user_id, "annotating user");
    let fields = [
        ("fkey".to_string(), fkey.to_string()),
        ("annotation".to_string(), annotation.to_string()),
    ];
    post_expecting_ok(transport, &path, &fields).await
}

/// Deletes a user account. Only HTTP 200 counts as success.
pub async fn delete_user<T: Transport>(
    transport: &T,
    fkey: &str,
    user_id: u64,
    reason: &str,
    details: &str,
) -> Result<(), TransportError> {
    let path = delete_path(user_id);
    tracing::debug!(user_id, reason, "deleting user");
    let fields = [
        ("fkey".to_string(), fkey.to_string()),
        ("deleteReason".to_string(), reason.to_string()),
        ("deleteReasonDetails".to_string(), details.to_string()),
    ];
    post_expecting_ok(transport, &path, &fields).await
}

/// Resolves the canonical profile URL of a user.
pub async fn profile_url<T: Transport>(
    transport: &T,
    user_id: u64,
) -> Result<String, TransportError> {
    transport.resolve_url(&profile_path(user_id)).await
}
