use anyhow::{bail, Result};

use crate::client::{ClientError, SessionClient};

/// Open a session, narrating the login. A refused login is fatal for the
/// command since nothing after it can succeed.
pub fn connect(base_url: &str, email: &str, password: &str) -> Result<SessionClient> {
    println!("Logging in to {} as {}...", base_url.trim_end_matches('/'), email);

    match SessionClient::connect(base_url, email, password) {
        Ok(client) => {
            println!("Login successful!");
            Ok(client)
        }
        Err(ClientError::LoginRejected { status, body }) => {
            bail!("Login failed: {}\n{}", status, body)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn run(base_url: &str, email: &str, password: &str) -> Result<()> {
    let client = connect(base_url, email, password)?;
    println!("Session established against {}", client.base_url());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockServer;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;

    #[test]
    fn test_run_succeeds() {
        let server = MockServer::start(Router::new());
        assert!(run(&server.base_url, "manager@example.com", "pw").is_ok());
    }

    #[test]
    fn test_connect_reports_rejection() {
        let server = MockServer::start_with_login(
            Router::new(),
            post(|| async { (StatusCode::FORBIDDEN, "locked out") }),
        );

        let result = connect(&server.base_url, "manager@example.com", "pw");
        let message = result.err().unwrap().to_string();
        assert!(message.contains("Login failed: 403"));
        assert!(message.contains("locked out"));
    }

    #[test]
    fn test_connect_transport_failure() {
        let result = connect("http://127.0.0.1:1", "manager@example.com", "pw");
        assert!(result.is_err());
    }
}
