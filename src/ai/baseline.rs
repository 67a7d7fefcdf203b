//! Deterministic baseline responses used when every provider fails.
//!
//! Chat answers come from an ordered `(trigger, response)` rule table:
//! case-insensitive substring match, first hit wins, with a generic reply
//! when nothing matches. Plans and vision results are fixed synthesized
//! structures. Requests that end up here still return HTTP 200.

use chrono::{Duration, Utc};

use super::{
    Activity, ChatPayload, CostEstimate, DailyRoute, Landmark, PlanPayload, PlanRequest,
    VisionPayload,
};

/// Chat rule table, evaluated top to bottom. Keep destination rules above
/// the topical ones so "liburan ke Bali dengan budget hemat" answers about
/// Bali rather than budgeting.
const CHAT_RULES: &[(&str, &str)] = &[
    (
        "bali",
        "Bali terkenal dengan pantai Kuta dan Seminyak, pura-pura ikonik seperti Uluwatu dan Tanah Lot, serta sawah terasering di Ubud. Waktu terbaik berkunjung adalah April-Oktober di musim kemarau.",
    ),
    (
        "yogyakarta",
        "Yogyakarta menawarkan Candi Borobudur dan Prambanan, wisata budaya Keraton, serta kuliner gudeg yang khas. Jalan Malioboro wajib dikunjungi untuk oleh-oleh dan batik.",
    ),
    (
        "jogja",
        "Yogyakarta menawarkan Candi Borobudur dan Prambanan, wisata budaya Keraton, serta kuliner gudeg yang khas. Jalan Malioboro wajib dikunjungi untuk oleh-oleh dan batik.",
    ),
    (
        "jakarta",
        "Jakarta memiliki Monumen Nasional (Monas), Kota Tua, dan Taman Mini Indonesia Indah. Gunakan TransJakarta atau MRT untuk menghindari kemacetan.",
    ),
    (
        "bandung",
        "Bandung cocok untuk wisata alam seperti Tangkuban Perahu dan Kawah Putih, ditambah belanja di factory outlet. Bawa jaket karena udaranya sejuk.",
    ),
    (
        "lombok",
        "Lombok menawarkan Gili Islands untuk snorkeling, Gunung Rinjani untuk pendakian, dan pantai-pantai yang masih alami. Siapkan uang tunai untuk di Gili.",
    ),
    (
        "kuliner",
        "Kuliner Indonesia sangat beragam: rendang di Padang, gudeg di Yogyakarta, pempek di Palembang, dan coto di Makassar. Warung lokal biasanya lebih autentik dan hemat.",
    ),
    (
        "budget",
        "Untuk perjalanan hemat, gunakan transportasi umum, menginap di guesthouse, dan makan di warung lokal. Budget Rp 300-500 ribu per hari sudah cukup nyaman di banyak kota.",
    ),
    (
        "biaya",
        "Untuk perjalanan hemat, gunakan transportasi umum, menginap di guesthouse, dan makan di warung lokal. Budget Rp 300-500 ribu per hari sudah cukup nyaman di banyak kota.",
    ),
    (
        "transportasi",
        "Antar kota besar tersedia kereta api, bus, dan penerbangan domestik. Di dalam kota, aplikasi ojek online adalah cara termudah untuk berkeliling.",
    ),
    (
        "hotel",
        "Pilih akomodasi dekat pusat kota atau objek wisata utama untuk menghemat waktu dan biaya transportasi. Guesthouse dan homestay cocok untuk budget terbatas.",
    ),
];

const GENERIC_CHAT_ANSWER: &str = "Maaf, saya sedang mengalami gangguan teknis. Untuk informasi wisata Indonesia, Anda bisa mengunjungi website resmi Kementerian Pariwisata atau menghubungi customer service kami.";

const DEFAULT_SUGGESTIONS: &[&str] = &[
    "Tanyakan tentang destinasi wisata populer",
    "Minta estimasi budget perjalanan",
    "Tips perjalanan untuk pemula",
];

/// Answer a chat message from the rule table.
pub fn chat_reply(message: &str) -> ChatPayload {
    let lowered = message.to_lowercase();

    for (trigger, response) in CHAT_RULES {
        if lowered.contains(trigger) {
            return ChatPayload {
                answer: response.to_string(),
                confidence: 0.6,
                suggestions: suggestions_for(response),
            };
        }
    }

    ChatPayload {
        answer: GENERIC_CHAT_ANSWER.to_string(),
        confidence: 0.1,
        suggestions: DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
    }
}

/// Derive up to three follow-up suggestions from an answer's keywords.
pub fn suggestions_for(answer: &str) -> Vec<String> {
    let lowered = answer.to_lowercase();
    let mut suggestions = Vec::new();

    if ["jakarta", "bandung", "yogyakarta", "bali", "lombok"]
        .iter()
        .any(|w| lowered.contains(w))
    {
        suggestions.push("Tanyakan tentang transportasi antar kota".to_string());
    }
    if ["budget", "biaya", "harga"].iter().any(|w| lowered.contains(w)) {
        suggestions.push("Minta tips menghemat biaya perjalanan".to_string());
    }
    if ["kuliner", "makanan", "restoran", "warung"]
        .iter()
        .any(|w| lowered.contains(w))
    {
        suggestions.push("Rekomendasi makanan khas daerah lain".to_string());
    }
    if ["hotel", "penginapan", "akomodasi", "guesthouse"]
        .iter()
        .any(|w| lowered.contains(w))
    {
        suggestions.push("Tips memilih akomodasi yang aman".to_string());
    }

    if suggestions.is_empty() {
        suggestions = DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect();
    }

    suggestions.truncate(3);
    suggestions
}

/// Per-activity and per-day cost constants by budget tier.
fn tier_costs(request: &PlanRequest) -> (f64, f64) {
    match request.budget_range {
        super::BudgetRange::Murah => (100_000.0, 150_000.0),
        super::BudgetRange::Sedang => (200_000.0, 300_000.0),
        super::BudgetRange::Mahal => (500_000.0, 750_000.0),
    }
}

/// Synthesize a simple day-by-day itinerary.
pub fn travel_plan(request: &PlanRequest) -> PlanPayload {
    let (activity_cost, day_cost) = tier_costs(request);
    let start = Utc::now();

    let daily_routes: Vec<DailyRoute> = (1..=request.duration_days)
        .map(|day| DailyRoute {
            day,
            date: (start + Duration::days(day as i64 - 1))
                .format("%Y-%m-%d")
                .to_string(),
            activities: vec![Activity {
                time: "09:00".to_string(),
                activity: format!("Jelajahi {} - Hari {}", request.destination, day),
                location: request.destination.clone(),
                description: "Kunjungi tempat wisata populer di sekitar area".to_string(),
                estimated_cost: activity_cost,
            }],
            estimated_cost: day_cost,
        })
        .collect();

    let total: f64 = daily_routes.iter().map(|d| d.estimated_cost).sum();

    PlanPayload {
        title: format!(
            "Perjalanan {} Hari ke {}",
            request.duration_days, request.destination
        ),
        destination: request.destination.clone(),
        duration_days: request.duration_days,
        daily_routes,
        cost_estimate: CostEstimate {
            accommodation: total * 0.4,
            food: total * 0.3,
            transport: total * 0.2,
            activities: total * 0.1,
            total,
            currency: "IDR".to_string(),
        },
        confidence: 0.6,
    }
}

/// Fixed low-confidence response for unidentifiable images.
pub fn vision() -> VisionPayload {
    VisionPayload {
        landmarks: vec![Landmark {
            name: "Landmark tidak dikenali".to_string(),
            description: "Mohon coba dengan gambar yang lebih jelas atau dari sudut yang berbeda"
                .to_string(),
            location: None,
            category: None,
            confidence: 0.1,
        }],
        summary: "Tidak dapat mengidentifikasi landmark dalam gambar".to_string(),
        confidence: 0.1,
    }
}

/// Demo chat payload returned by `/api/chat/demo`, fixed regardless of
/// provider availability.
pub fn demo_chat() -> ChatPayload {
    ChatPayload {
        answer: "Selamat datang di AI Travel Guide! Saya siap membantu Anda merencanakan perjalanan wisata di Indonesia. Anda bisa bertanya tentang destinasi wisata, estimasi biaya, transportasi, akomodasi, atau kuliner lokal. Mau mulai dari mana?".to_string(),
        confidence: 0.95,
        suggestions: vec![
            "Rekomendasi destinasi wisata populer".to_string(),
            "Estimasi budget untuk liburan 3 hari".to_string(),
            "Tips perjalanan hemat untuk backpacker".to_string(),
        ],
    }
}

/// Demo vision payload for `/api/vision/demo` (Monas, Jakarta).
pub fn demo_vision() -> VisionPayload {
    VisionPayload {
        landmarks: vec![Landmark {
            name: "Monumen Nasional (Monas)".to_string(),
            description: "Monumen setinggi 132 meter yang menjadi simbol kemerdekaan Indonesia, terletak di Jakarta Pusat".to_string(),
            location: Some("Jakarta Pusat, DKI Jakarta".to_string()),
            category: Some("monument".to_string()),
            confidence: 0.92,
        }],
        summary: "Teridentifikasi Monumen Nasional (Monas), landmark ikonik Jakarta yang merupakan simbol kemerdekaan Indonesia".to_string(),
        confidence: 0.92,
    }
}

/// Demo plan for `/api/demo-plan`: a fixed 3-day Jakarta-Bandung trip.
pub fn demo_plan() -> PlanPayload {
    let day = |day, date: &str, activities: Vec<Activity>, cost| DailyRoute {
        day,
        date: date.to_string(),
        activities,
        estimated_cost: cost,
    };
    let act = |time: &str, activity: &str, location: &str, description: &str, cost| Activity {
        time: time.to_string(),
        activity: activity.to_string(),
        location: location.to_string(),
        description: description.to_string(),
        estimated_cost: cost,
    };

    PlanPayload {
        title: "Perjalanan 3 Hari Jakarta-Bandung".to_string(),
        destination: "Bandung".to_string(),
        duration_days: 3,
        daily_routes: vec![
            day(
                1,
                "2024-01-15",
                vec![
                    act(
                        "08:00",
                        "Keberangkatan dari Jakarta",
                        "Jakarta",
                        "Perjalanan menuju Bandung dengan kereta api atau mobil",
                        150_000.0,
                    ),
                    act(
                        "12:00",
                        "Makan siang di Gedung Sate",
                        "Gedung Sate, Bandung",
                        "Menikmati kuliner khas Bandung sambil melihat arsitektur bersejarah",
                        75_000.0,
                    ),
                    act(
                        "14:00",
                        "Jalan-jalan di Jalan Braga",
                        "Jalan Braga, Bandung",
                        "Menjelajahi kawasan bersejarah dengan bangunan Art Deco",
                        50_000.0,
                    ),
                ],
                275_000.0,
            ),
            day(
                2,
                "2024-01-16",
                vec![
                    act(
                        "09:00",
                        "Wisata ke Tangkuban Perahu",
                        "Tangkuban Perahu",
                        "Melihat kawah vulkan dan menikmati pemandangan alam",
                        100_000.0,
                    ),
                    act(
                        "13:00",
                        "Belanja di Factory Outlet",
                        "Dago, Bandung",
                        "Berbelanja pakaian dengan harga terjangkau",
                        200_000.0,
                    ),
                ],
                300_000.0,
            ),
            day(
                3,
                "2024-01-17",
                vec![
                    act(
                        "10:00",
                        "Wisata kuliner di Kampung Gajah",
                        "Kampung Gajah, Lembang",
                        "Menikmati wahana dan kuliner di kawasan wisata",
                        150_000.0,
                    ),
                    act(
                        "15:00",
                        "Kembali ke Jakarta",
                        "Bandung - Jakarta",
                        "Perjalanan pulang ke Jakarta",
                        150_000.0,
                    ),
                ],
                300_000.0,
            ),
        ],
        cost_estimate: CostEstimate {
            accommodation: 600_000.0,
            food: 450_000.0,
            transport: 300_000.0,
            activities: 525_000.0,
            total: 1_875_000.0,
            currency: "IDR".to_string(),
        },
        confidence: 0.95,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::BudgetRange;

    fn request(destination: &str, days: u32, budget: BudgetRange) -> PlanRequest {
        PlanRequest {
            destination: destination.to_string(),
            duration_days: days,
            budget_range: budget,
            preferences: vec![],
            departure_city: None,
        }
    }

    #[test]
    fn test_chat_rule_match_is_case_insensitive() {
        let reply = chat_reply("Liburan ke Bali");
        assert!(reply.answer.contains("Bali"));
        assert!(reply.confidence > 0.1);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // Message mentions both Bali and budget; the Bali rule comes first.
        let reply = chat_reply("liburan ke bali dengan budget hemat");
        assert!(reply.answer.contains("pantai Kuta"));
    }

    #[test]
    fn test_unmatched_message_falls_through_to_generic() {
        let reply = chat_reply("halo apa kabar");
        assert_eq!(reply.answer, GENERIC_CHAT_ANSWER);
        assert_eq!(reply.confidence, 0.1);
        assert_eq!(reply.suggestions.len(), 3);
    }

    #[test]
    fn test_jogja_alias_matches() {
        let reply = chat_reply("mau ke jogja minggu depan");
        assert!(reply.answer.contains("Borobudur"));
    }

    #[test]
    fn test_suggestions_capped_at_three() {
        let suggestions =
            suggestions_for("kuliner dan hotel di jakarta dengan budget murah serta warung");
        assert!(suggestions.len() <= 3);
    }

    #[test]
    fn test_travel_plan_day_count_and_totals() {
        let plan = travel_plan(&request("Lombok", 4, BudgetRange::Sedang));
        assert_eq!(plan.daily_routes.len(), 4);
        assert_eq!(plan.duration_days, 4);
        assert_eq!(plan.cost_estimate.total, 4.0 * 300_000.0);
        assert_eq!(plan.cost_estimate.currency, "IDR");

        let breakdown = plan.cost_estimate.accommodation
            + plan.cost_estimate.food
            + plan.cost_estimate.transport
            + plan.cost_estimate.activities;
        assert!((breakdown - plan.cost_estimate.total).abs() < 1.0);
    }

    #[test]
    fn test_travel_plan_budget_tiers_scale_costs() {
        let cheap = travel_plan(&request("Bali", 3, BudgetRange::Murah));
        let expensive = travel_plan(&request("Bali", 3, BudgetRange::Mahal));
        assert!(expensive.cost_estimate.total > cheap.cost_estimate.total);
    }

    #[test]
    fn test_vision_baseline_is_low_confidence() {
        let vision = vision();
        assert_eq!(vision.confidence, 0.1);
        assert_eq!(vision.landmarks.len(), 1);
    }
}
