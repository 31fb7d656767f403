use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct BlogRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogResponse {
    pub content: String,
}

/// Topic-driven variant of [`BlogRequest`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogBriefRequest {
    #[serde(default)]
    pub topic: String,
    pub word_count: Option<u32>,
    pub tone: Option<String>,
}

/// Trip-planning request shape. Not routed.
#[derive(Debug, Deserialize)]
pub struct TripRequest {
    pub destination: String,
    pub days: u32,
    /// "low", "medium" or "high" by convention; not validated.
    pub budget: String,
    pub month: Option<String>,
    pub travelers: Option<String>,
}

/// One candidate produced by a generation pipeline, prompt echo included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    pub name: String,
    pub model_id: String,
    pub dtype: String,
    pub size_bytes: u64,
    pub device: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blog_request_requires_prompt() {
        let req: BlogRequest = serde_json::from_str(r#"{"prompt":"Write about coffee"}"#).unwrap();
        assert_eq!(req.prompt, "Write about coffee");
        assert!(serde_json::from_str::<BlogRequest>("{}").is_err());
        assert!(serde_json::from_str::<BlogRequest>(r#"{"prompt":3}"#).is_err());
    }

    #[test]
    fn brief_request_uses_camel_case() {
        let req: BlogBriefRequest =
            serde_json::from_str(r#"{"topic":"Rust","wordCount":300,"tone":"casual"}"#).unwrap();
        assert_eq!(req.topic, "Rust");
        assert_eq!(req.word_count, Some(300));
        assert_eq!(req.tone.as_deref(), Some("casual"));

        let bare: BlogBriefRequest = serde_json::from_str("{}").unwrap();
        assert!(bare.topic.is_empty());
        assert_eq!(bare.word_count, None);
    }

    #[test]
    fn trip_request_optional_fields() {
        let req: TripRequest = serde_json::from_str(
            r#"{"destination":"Kyoto","days":5,"budget":"lavish"}"#,
        )
        .unwrap();
        assert_eq!(req.destination, "Kyoto");
        assert_eq!(req.days, 5);
        assert_eq!(req.budget, "lavish");
        assert!(req.month.is_none());
        assert!(req.travelers.is_none());
        assert!(serde_json::from_str::<TripRequest>(r#"{"destination":"Kyoto"}"#).is_err());
    }

    #[test]
    fn blog_response_shape() {
        let body = serde_json::to_value(BlogResponse {
            content: "Coffee is...".into(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "content": "Coffee is..." }));
    }
}
