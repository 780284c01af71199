use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use spdlog::{error, info};

use crate::config::EmailConfig;
use crate::error::ContactError;

pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";
pub const DEFAULT_SUBJECT: &str = "New Contact Form Message";
pub const SENT_MESSAGE: &str = "Thank you! Your message has been sent successfully. I'll get back to you soon!";

/// Fields posted by the contact form. Missing fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub subject: String,
    pub message: String,
    pub to_email: String,
    pub to_name: String,
    pub reply_to: String,
}

/// Body of an EmailJS send request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailRequest {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub template_params: TemplateParams,
}

#[derive(Debug, PartialEq)]
pub enum ContactStatus {
    Sent,
    Failed(ContactError),
}

impl ContactStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ContactStatus::Sent)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ContactStatus::Sent => "Message Sent!",
            ContactStatus::Failed(_) => "Oops! Something went wrong",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ContactStatus::Sent => SENT_MESSAGE.to_string(),
            ContactStatus::Failed(e) => e.to_string(),
        }
    }
}

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

impl ContactForm {
    pub fn from_body(body: &[u8]) -> ContactForm {
        serde_urlencoded::from_bytes(body).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ContactError> {
        let required = [&self.name, &self.email, &self.message];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(ContactError::MissingFields);
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(())
    }

    pub fn to_request(&self, config: &EmailConfig) -> Result<EmailRequest, ContactError> {
        let Some((service_id, template_id, public_key)) = config.credentials() else {
            return Err(ContactError::NotConfigured);
        };

        let subject = match self.subject.trim() {
            "" => DEFAULT_SUBJECT.to_string(),
            subject => subject.to_string(),
        };
        let email = self.email.trim().to_string();

        Ok(EmailRequest {
            service_id: service_id.to_string(),
            template_id: template_id.to_string(),
            user_id: public_key.to_string(),
            template_params: TemplateParams {
                from_name: self.name.trim().to_string(),
                from_email: email.clone(),
                subject,
                message: self.message.trim().to_string(),
                to_email: config.to_email.clone().unwrap_or_default(),
                to_name: config.to_name.clone().unwrap_or_default(),
                reply_to: email,
            },
        })
    }
}

/// Delivers contact messages.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, request: &EmailRequest) -> Result<(), ContactError>;
}

pub struct EmailJsClient {
    client: reqwest::Client,
    endpoint: String,
}

impl EmailJsClient {
    pub fn new(timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(EmailJsClient {
            client,
            endpoint: EMAILJS_ENDPOINT.to_string(),
        })
    }
}

#[async_trait]
impl Mailer for EmailJsClient {
    async fn send(&self, request: &EmailRequest) -> Result<(), ContactError> {
        let response = self.client.post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ContactError::Delivery(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(ContactError::Delivery(format!("{}: {}", status.as_u16(), body)))
    }
}

/// Validates the form and hands it to `mailer`. Nothing here fails the request:
/// every outcome ends up as a status shown to the visitor.
pub async fn submit(form: &ContactForm, config: Option<&EmailConfig>, mailer: &dyn Mailer) -> ContactStatus {
    if let Err(e) = form.validate() {
        return ContactStatus::Failed(e);
    }

    let request = match config.map(|cfg| form.to_request(cfg)) {
        Some(Ok(request)) => request,
        Some(Err(e)) => return ContactStatus::Failed(e),
        None => return ContactStatus::Failed(ContactError::NotConfigured),
    };

    match mailer.send(&request).await {
        Ok(()) => {
            info!("Contact message from {} delivered", request.template_params.from_email);
            ContactStatus::Sent
        }
        Err(e) => {
            if let ContactError::Delivery(ref reason) = e {
                error!("Error sending contact message: {}", reason);
            }
            ContactStatus::Failed(e)
        }
    }
}
