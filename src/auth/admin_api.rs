use serde::Deserialize;

use crate::{models::AuthUserRecord, AppError};

const PAGE_SIZE: usize = 1000;

#[derive(Debug, Deserialize)]
struct UserPage {
    #[serde(default)]
    users: Vec<AuthUserRecord>,
}

/// Lists every user in the Supabase auth directory, following pagination.
pub async fn list_auth_users(
    client: &reqwest::Client,
    supabase_url: &str,
    service_role_key: &str,
) -> Result<Vec<AuthUserRecord>, AppError> {
    let url = format!("{}/auth/v1/admin/users", supabase_url);
    let mut users = Vec::new();
    let mut page = 1usize;

    loop {
        tracing::debug!(page, "Listing Supabase auth users");

        let response = client
            .get(&url)
            .query(&[("page", page), ("per_page", PAGE_SIZE)])
            .header("apikey", service_role_key)
            .header("Authorization", format!("Bearer {}", service_role_key))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, page, "Failed to call Supabase admin API");
                AppError::Upstream(format!("Failed to list users: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body, "Supabase admin API returned error");
            return Err(AppError::Upstream(format!(
                "Supabase admin API error: {}",
                status
            )));
        }

        let batch: UserPage = response.json().await.map_err(|e| {
            tracing::error!(error = %e, page, "Failed to parse Supabase admin API response");
            AppError::Upstream(format!("Failed to parse user list: {}", e))
        })?;

        let fetched = batch.users.len();
        users.extend(batch.users);

        if fetched < PAGE_SIZE {
            break;
        }
        page += 1;
    }

    tracing::debug!(count = users.len(), "Supabase auth users listed");
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_admin_user_page() {
        let page: UserPage = serde_json::from_value(serde_json::json!({
            "users": [
                {
                    "id": "9b2f3c1e-8a4d-4a57-9d1e-0f6f1c2b7a11",
                    "aud": "authenticated",
                    "email": "dev@example.com",
                    "created_at": "2026-09-30T08:15:02.123456Z",
                    "app_metadata": {"provider": "email"}
                }
            ],
            "aud": "authenticated"
        }))
        .unwrap();

        assert_eq!(page.users.len(), 1);
        assert_eq!(
            page.users[0].created_at.date_naive(),
            chrono::NaiveDate::from_ymd_opt(2026, 9, 30).unwrap()
        );
    }

    #[tokio::test]
    #[ignore] // Needs SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY
    async fn test_list_users_live() {
        let url = std::env::var("SUPABASE_URL").unwrap();
        let key = std::env::var("SUPABASE_SERVICE_ROLE_KEY").unwrap();
        let users = list_auth_users(&reqwest::Client::new(), &url, &key).await;

        assert!(users.is_ok());
    }
}
