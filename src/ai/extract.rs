//! Parsing of free-form provider output into typed payloads.
//!
//! Text models wrap their JSON in prose, so plan and vision extraction
//! scans for the outermost `{...}` span before deserializing. A response
//! that parses but misses required fields counts as malformed and demotes
//! the provider, same as a transport failure.

use super::{baseline, ChatPayload, Landmark, PlanPayload, ProviderError, VisionPayload};

/// Required top-level fields for a travel plan.
const PLAN_FIELDS: &[&str] = &[
    "title",
    "destination",
    "duration_days",
    "daily_routes",
    "cost_estimate",
];

/// Slice out the outermost JSON object embedded in generated text.
fn json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}

/// Parse a travel plan from generated text.
pub fn plan_from_text(text: &str) -> Result<PlanPayload, ProviderError> {
    let span = json_span(text)
        .ok_or_else(|| ProviderError::Malformed("no JSON object in output".to_string()))?;

    let value: serde_json::Value = serde_json::from_str(span)
        .map_err(|e| ProviderError::Malformed(format!("invalid JSON: {e}")))?;

    for field in PLAN_FIELDS {
        if value.get(field).is_none() {
            return Err(ProviderError::Malformed(format!(
                "plan missing required field '{field}'"
            )));
        }
    }

    serde_json::from_value(value)
        .map_err(|e| ProviderError::Malformed(format!("plan schema mismatch: {e}")))
}

/// Parse a landmark analysis from generated text.
pub fn vision_from_text(text: &str) -> Result<VisionPayload, ProviderError> {
    let span = json_span(text)
        .ok_or_else(|| ProviderError::Malformed("no JSON object in output".to_string()))?;

    let value: serde_json::Value = serde_json::from_str(span)
        .map_err(|e| ProviderError::Malformed(format!("invalid JSON: {e}")))?;

    if value.get("landmarks").is_none() {
        return Err(ProviderError::Malformed(
            "vision result missing 'landmarks'".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| ProviderError::Malformed(format!("vision schema mismatch: {e}")))
}

/// Turn a raw model answer into a chat payload.
///
/// Strips any echoed prompt up to the `Jawaban:` marker and rejects
/// answers too short to be useful.
pub fn chat_from_text(text: &str) -> Result<ChatPayload, ProviderError> {
    let mut answer = text.trim();
    if let Some(idx) = answer.rfind("Jawaban:") {
        answer = answer[idx + "Jawaban:".len()..].trim();
    }

    if answer.len() < 10 {
        return Err(ProviderError::Malformed(
            "answer too short to be useful".to_string(),
        ));
    }

    Ok(ChatPayload {
        answer: answer.to_string(),
        confidence: 0.8,
        suggestions: baseline::suggestions_for(answer),
    })
}

/// Known Indonesian landmarks matched against caption text.
const LANDMARKS: &[(&str, &str, &str, &str)] = &[
    ("monas", "Monumen Nasional", "Jakarta", "monument"),
    ("borobudur", "Candi Borobudur", "Yogyakarta", "temple"),
    ("prambanan", "Candi Prambanan", "Yogyakarta", "temple"),
    ("uluwatu", "Pura Uluwatu", "Bali", "temple"),
    ("bromo", "Gunung Bromo", "Jawa Timur", "mountain"),
    ("toba", "Danau Toba", "Sumatera Utara", "lake"),
    ("komodo", "Pulau Komodo", "Nusa Tenggara Timur", "island"),
    ("raja ampat", "Raja Ampat", "Papua Barat", "marine"),
];

/// Build a vision payload from a plain-text image description.
///
/// Captioning models return prose rather than structured output, so known
/// landmark names are matched by keyword; an unmatched description still
/// yields a generic tourism landmark rather than a failure.
pub fn vision_from_description(description: &str) -> Result<VisionPayload, ProviderError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(ProviderError::Malformed("empty image description".to_string()));
    }

    let lowered = description.to_lowercase();
    let mut landmarks: Vec<Landmark> = LANDMARKS
        .iter()
        .filter(|(keyword, ..)| lowered.contains(keyword))
        .map(|(_, name, location, category)| Landmark {
            name: name.to_string(),
            description: format!("Landmark terkenal di {location}"),
            location: Some(location.to_string()),
            category: Some(category.to_string()),
            confidence: 0.7,
        })
        .collect();

    if landmarks.is_empty() {
        landmarks.push(Landmark {
            name: "Tempat wisata Indonesia".to_string(),
            description: "Lokasi wisata yang menarik di Indonesia".to_string(),
            location: Some("Indonesia".to_string()),
            category: Some("tourism".to_string()),
            confidence: 0.4,
        });
    }

    let confidence = landmarks
        .iter()
        .map(|l| l.confidence)
        .fold(0.0_f64, f64::max);

    Ok(VisionPayload {
        summary: format!("Terdeteksi {} landmark dalam gambar", landmarks.len()),
        landmarks,
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_from_text_with_surrounding_prose() {
        let text = r#"Berikut rencananya:
        {
            "title": "Perjalanan 2 Hari ke Bali",
            "destination": "Bali",
            "duration_days": 2,
            "daily_routes": [
                {
                    "day": 1,
                    "date": "2024-06-01",
                    "activities": [],
                    "estimated_cost": 300000
                }
            ],
            "cost_estimate": { "total": 600000 }
        }
        Semoga membantu!"#;

        let plan = plan_from_text(text).unwrap();
        assert_eq!(plan.destination, "Bali");
        assert_eq!(plan.duration_days, 2);
        assert_eq!(plan.cost_estimate.total, 600000.0);
        assert_eq!(plan.cost_estimate.currency, "IDR");
    }

    #[test]
    fn test_plan_from_text_missing_field_is_malformed() {
        let text = r#"{"title": "x", "destination": "Bali"}"#;
        let err = plan_from_text(text).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn test_plan_from_text_no_json() {
        let err = plan_from_text("maaf, tidak bisa").unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn test_vision_from_text() {
        let text = r#"{
            "landmarks": [
                {"name": "Candi Borobudur", "description": "Candi Buddha", "confidence": 0.9}
            ],
            "summary": "Teridentifikasi Candi Borobudur",
            "confidence": 0.9
        }"#;

        let vision = vision_from_text(text).unwrap();
        assert_eq!(vision.landmarks.len(), 1);
        assert_eq!(vision.landmarks[0].name, "Candi Borobudur");
    }

    #[test]
    fn test_chat_from_text_strips_prompt_echo() {
        let text = "Pertanyaan: apa?\nJawaban: Bali terkenal dengan pantainya yang indah.";
        let chat = chat_from_text(text).unwrap();
        assert_eq!(chat.answer, "Bali terkenal dengan pantainya yang indah.");
    }

    #[test]
    fn test_chat_from_text_rejects_short_answers() {
        assert!(chat_from_text("ok").is_err());
        assert!(chat_from_text("  ").is_err());
    }

    #[test]
    fn test_vision_from_description_matches_known_landmark() {
        let vision =
            vision_from_description("a tall white monument, looks like Monas in Jakarta").unwrap();
        assert_eq!(vision.landmarks[0].name, "Monumen Nasional");
        assert_eq!(vision.confidence, 0.7);
    }

    #[test]
    fn test_vision_from_description_unknown_is_generic() {
        let vision = vision_from_description("a busy street market").unwrap();
        assert_eq!(vision.landmarks[0].name, "Tempat wisata Indonesia");
        assert_eq!(vision.confidence, 0.4);
    }

    #[test]
    fn test_vision_from_description_rejects_empty() {
        assert!(vision_from_description("   ").is_err());
    }
}
