//! Indonesian prompt templates shared by the provider clients.
//!
//! The travel-plan prompt includes the JSON schema the extraction layer
//! expects, so any provider answering in that shape parses the same way.

use super::{BudgetRange, PlanRequest};

fn budget_label(budget: BudgetRange) -> &'static str {
    match budget {
        BudgetRange::Murah => "murah",
        BudgetRange::Sedang => "sedang",
        BudgetRange::Mahal => "mahal",
    }
}

/// Build the travel-planning prompt for a request.
pub fn travel_plan(request: &PlanRequest) -> String {
    let preferences = if request.preferences.is_empty() {
        "Tidak ada".to_string()
    } else {
        request.preferences.join(", ")
    };

    format!(
        r#"Buatkan rencana perjalanan wisata {duration} hari ke {destination} dengan budget {budget}.

Preferensi khusus: {preferences}

Format respons dalam JSON:
{{
    "title": "Judul perjalanan",
    "destination": "{destination}",
    "duration_days": {duration},
    "daily_routes": [
        {{
            "day": 1,
            "date": "2024-01-01",
            "activities": [
                {{
                    "time": "09:00",
                    "activity": "Nama aktivitas",
                    "location": "Lokasi",
                    "description": "Deskripsi singkat",
                    "estimated_cost": 100000
                }}
            ],
            "estimated_cost": 300000
        }}
    ],
    "cost_estimate": {{
        "accommodation": 500000,
        "food": 300000,
        "transport": 200000,
        "activities": 400000,
        "total": 1400000,
        "currency": "IDR"
    }},
    "confidence": 0.8
}}

Berikan rekomendasi yang realistis dan sesuai dengan budget serta preferensi yang diminta."#,
        duration = request.duration_days,
        destination = request.destination,
        budget = budget_label(request.budget_range),
        preferences = preferences,
    )
}

/// Build the chat-assistant prompt for a user message.
pub fn chat(message: &str) -> String {
    format!(
        r#"Anda adalah asisten wisata AI yang membantu wisatawan merencanakan perjalanan di Indonesia.
Berikan jawaban yang informatif, ramah, dan dalam bahasa Indonesia.

Fokus pada:
- Destinasi wisata populer di Indonesia
- Estimasi biaya perjalanan
- Tips perjalanan praktis
- Kuliner lokal
- Transportasi
- Akomodasi

Pertanyaan: {message}

Jawaban:"#
    )
}

/// Prompt asking a text model to identify landmarks in an image.
pub fn vision() -> &'static str {
    r#"Analisis gambar ini dan identifikasi landmark atau tempat wisata yang terlihat.
Berikan respons dalam format JSON:
{
    "landmarks": [
        {
            "name": "Nama landmark",
            "description": "Deskripsi singkat",
            "location": "Lokasi",
            "confidence": 0.8
        }
    ],
    "summary": "Ringkasan analisis gambar",
    "confidence": 0.8
}"#
}
