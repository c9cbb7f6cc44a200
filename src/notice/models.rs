use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Details of a legal notice as submitted by the caller.
///
/// Missing text fields deserialize to empty strings and are caught by
/// validation, so a partial body still produces a structured failure.
/// `amount` must be present but may be blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NoticeRequest {
    #[schema(example = "Breach of Contract")]
    #[serde(default)]
    pub notice_type: String,
    #[schema(example = "john doe")]
    #[serde(default)]
    pub sender_name: String,
    #[schema(example = "123 main st")]
    #[serde(default)]
    pub sender_address: String,
    #[schema(example = "jane roe")]
    #[serde(default)]
    pub recipient_name: String,
    #[schema(example = "456 oak ave")]
    #[serde(default)]
    pub recipient_address: String,
    #[schema(example = "Failure to deliver goods")]
    #[serde(default)]
    pub issue_description: String,
    #[schema(example = "50000")]
    pub amount: String,
    #[schema(example = "2024-01-15")]
    #[serde(default)]
    pub incident_date: String,
}

/// Envelope returned by `POST /generate`.
///
/// Always sent with HTTP 200; `success` tells the outcome apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_b64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateResponse {
    pub fn download(notice: String, pdf_url: String) -> Self {
        Self {
            success: true,
            notice: Some(notice),
            pdf_url: Some(pdf_url),
            pdf_b64: None,
            error: None,
        }
    }

    pub fn inline(notice: String, pdf_b64: String) -> Self {
        Self {
            success: true,
            notice: Some(notice),
            pdf_url: None,
            pdf_b64: Some(pdf_b64),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            notice: None,
            pdf_url: None,
            pdf_b64: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub delivery: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialization() {
        let json = r#"{
            "notice_type": "Breach of Contract",
            "sender_name": "john doe",
            "sender_address": "123 main st",
            "recipient_name": "jane roe",
            "recipient_address": "456 oak ave",
            "issue_description": "Failure to deliver goods",
            "amount": "50000",
            "incident_date": "2024-01-15"
        }"#;

        let request: NoticeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.sender_name, "john doe");
        assert_eq!(request.amount, "50000");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let request: NoticeRequest =
            serde_json::from_str(r#"{"notice_type": "Eviction", "amount": ""}"#).unwrap();
        assert_eq!(request.notice_type, "Eviction");
        assert!(request.sender_name.is_empty());
        assert!(request.incident_date.is_empty());
        assert!(request.amount.is_empty());
    }

    #[test]
    fn test_amount_key_is_required() {
        let err = serde_json::from_str::<NoticeRequest>(r#"{"notice_type": "Eviction"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("amount"));
    }

    #[test]
    fn test_failure_serialization_omits_payload() {
        let json = serde_json::to_value(GenerateResponse::failure("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "boom"}));
    }

    #[test]
    fn test_download_serialization() {
        let response = GenerateResponse::download("text".into(), "/download/abc".into());
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["notice"], "text");
        assert_eq!(json["pdf_url"], "/download/abc");
        assert!(json.get("pdf_b64").is_none());
        assert!(json.get("error").is_none());
    }
}
