// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 HD Notes

//! # Outbound Mail Module
//!
//! Delivers OTP codes by email through a transactional-mail HTTP API.
//! The [`Mailer`] trait is the seam: handlers depend on the trait, the
//! binary wires in [`HttpApiMailer`], and tests substitute a recording mock.
//!
//! Dispatch is a blocking external call with no retry. A failed send fails
//! the enclosing request; the caller can re-request a code.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Error type for mail dispatch.
#[derive(Debug, Error)]
pub enum MailError {
    /// The request to the mail API could not be completed
    #[error("mail dispatch failed: {0}")]
    Transport(String),
    /// The mail API rejected the send
    #[error("mail API returned status {status}: {body}")]
    Api { status: u16, body: String },
}

/// Sends OTP codes to users.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a one-time code to `to_email`.
    async fn send_otp(
        &self,
        to_email: &str,
        to_name: Option<&str>,
        code: &str,
    ) -> Result<(), MailError>;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct MailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMailBody {
    sender: MailAddress,
    to: Vec<MailAddress>,
    subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    html_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_content: Option<String>,
}

/// Connection settings for the transactional-mail API.
#[derive(Debug, Clone)]
pub struct MailSettings {
    /// Endpoint accepting the JSON send-mail payload.
    pub api_url: String,
    /// API credential, sent in the `api-key` header.
    pub api_key: String,
    /// Sender address shown to recipients.
    pub sender_email: String,
    /// Optional sender display name.
    pub sender_name: Option<String>,
}

/// Production mailer posting to a transactional-mail HTTP API.
pub struct HttpApiMailer {
    client: reqwest::Client,
    settings: MailSettings,
}

impl HttpApiMailer {
    /// Create a new mailer with the given settings.
    pub fn new(settings: MailSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }
}

#[async_trait]
impl Mailer for HttpApiMailer {
    async fn send_otp(
        &self,
        to_email: &str,
        to_name: Option<&str>,
        code: &str,
    ) -> Result<(), MailError> {
        let body = SendMailBody {
            sender: MailAddress {
                email: self.settings.sender_email.clone(),
                name: self.settings.sender_name.clone(),
            },
            to: vec![MailAddress {
                email: to_email.to_string(),
                name: to_name.map(|s| s.to_string()),
            }],
            subject: "Your OTP Code".to_string(),
            html_content: Some(format!(
                "<b>Your OTP code is {code}</b>. It will expire in 10 minutes."
            )),
            text_content: Some(format!(
                "Your OTP code is {code}. It will expire in 10 minutes."
            )),
        };

        let response = self
            .client
            .post(&self.settings.api_url)
            .header("api-key", &self.settings.api_key)
            .header("accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(MailError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

/// Recording mailer for tests.
#[cfg(test)]
pub struct MockMailer {
    sent: std::sync::Mutex<Vec<SentOtp>>,
    fail: std::sync::atomic::AtomicBool,
}

/// A captured outgoing OTP mail.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct SentOtp {
    pub to: String,
    pub code: String,
}

#[cfg(test)]
impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: std::sync::Mutex::new(Vec::new()),
            fail: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Make subsequent sends fail with a transport error.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// All mails sent so far.
    pub fn sent(&self) -> Vec<SentOtp> {
        self.sent.lock().unwrap().clone()
    }

    /// The code from the most recent mail.
    pub fn last_code(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|m| m.code.clone())
    }
}

#[cfg(test)]
#[async_trait]
impl Mailer for MockMailer {
    async fn send_otp(
        &self,
        to_email: &str,
        _to_name: Option<&str>,
        code: &str,
    ) -> Result<(), MailError> {
        if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(MailError::Transport("mock failure".to_string()));
        }

        self.sent.lock().unwrap().push(SentOtp {
            to: to_email.to_string(),
            code: code.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_mail_body_serializes_camel_case() {
        let body = SendMailBody {
            sender: MailAddress {
                email: "noreply@example.com".to_string(),
                name: Some("HD Notes App".to_string()),
            },
            to: vec![MailAddress {
                email: "alice@example.com".to_string(),
                name: None,
            }],
            subject: "Your OTP Code".to_string(),
            html_content: None,
            text_content: Some("Your OTP code is 123456. It will expire in 10 minutes.".to_string()),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["sender"]["email"], "noreply@example.com");
        assert_eq!(
            json["textContent"],
            "Your OTP code is 123456. It will expire in 10 minutes."
        );
        // Absent optional fields are omitted entirely.
        assert!(json.get("htmlContent").is_none());
        assert!(json["to"][0].get("name").is_none());
    }

    #[tokio::test]
    async fn mock_mailer_records_sends() {
        let mailer = MockMailer::new();
        mailer
            .send_otp("alice@example.com", Some("Alice"), "123456")
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "alice@example.com");
        assert_eq!(mailer.last_code(), Some("123456".to_string()));
    }

    #[tokio::test]
    async fn mock_mailer_can_fail() {
        let mailer = MockMailer::new();
        mailer.set_fail(true);

        let result = mailer.send_otp("alice@example.com", None, "123456").await;
        assert!(matches!(result, Err(MailError::Transport(_))));
        assert!(mailer.sent().is_empty());
    }
}
