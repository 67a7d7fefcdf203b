//! Natural-language travel request parsing for `/api/chat-plan`.
//!
//! Extracts destination, duration, budget tier, and interests from a
//! free-form Indonesian message using ordered keyword tables and a couple
//! of regexes. All tables are evaluated in order; first substring match
//! wins for the destination.

use regex::Regex;
use std::sync::OnceLock;

use super::{BudgetRange, PlanRequest};

/// Keyword → canonical city table, evaluated in order.
const DESTINATIONS: &[(&str, &str)] = &[
    ("bali", "Bali"),
    ("denpasar", "Bali"),
    ("ubud", "Bali"),
    ("canggu", "Bali"),
    ("seminyak", "Bali"),
    ("kuta", "Bali"),
    ("jakarta", "Jakarta"),
    ("depok", "Jakarta"),
    ("bekasi", "Jakarta"),
    ("tangerang", "Jakarta"),
    ("bogor", "Jakarta"),
    ("yogyakarta", "Yogyakarta"),
    ("yogya", "Yogyakarta"),
    ("jogja", "Yogyakarta"),
    ("bandung", "Bandung"),
    ("lombok", "Lombok"),
    ("mataram", "Lombok"),
    ("surabaya", "Surabaya"),
    ("banjarmasin", "Banjarmasin"),
    ("balikpapan", "Balikpapan"),
    ("medan", "Medan"),
    ("palembang", "Palembang"),
    ("padang", "Padang"),
    ("makassar", "Makassar"),
    ("manado", "Manado"),
    ("semarang", "Semarang"),
    ("solo", "Solo"),
    ("malang", "Malang"),
    ("aceh", "Banda Aceh"),
    ("kupang", "Kupang"),
    ("ambon", "Ambon"),
];

/// Written Indonesian numbers accepted as durations.
const NUMBER_WORDS: &[(&str, u32)] = &[
    ("satu", 1),
    ("dua", 2),
    ("tiga", 3),
    ("empat", 4),
    ("lima", 5),
    ("enam", 6),
    ("tujuh", 7),
    ("delapan", 8),
    ("sembilan", 9),
    ("sepuluh", 10),
    ("seminggu", 7),
    ("sehari", 1),
];

/// Keyword → interest tags.
const INTERESTS: &[(&str, &[&str])] = &[
    ("kuliner", &["food", "culinary"]),
    ("makanan", &["food", "culinary"]),
    ("restoran", &["food", "culinary"]),
    ("warung", &["food", "culinary"]),
    ("pantai", &["beach", "relaxation"]),
    ("laut", &["beach", "relaxation"]),
    ("snorkeling", &["beach", "adventure"]),
    ("diving", &["beach", "adventure"]),
    ("budaya", &["culture", "history"]),
    ("sejarah", &["culture", "history"]),
    ("museum", &["culture", "history"]),
    ("candi", &["culture", "history"]),
    ("pura", &["culture", "history"]),
    ("hiking", &["adventure", "nature"]),
    ("trekking", &["adventure", "nature"]),
    ("gunung", &["adventure", "nature"]),
    ("alam", &["adventure", "nature"]),
    ("belanja", &["shopping", "city"]),
    ("mall", &["shopping", "city"]),
    ("pasar", &["shopping", "culture"]),
    ("foto", &["photography", "scenic"]),
    ("pemandangan", &["photography", "scenic"]),
];

fn duration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*hari").expect("valid regex"))
}

fn budget_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+(?:[.,]\d+)?)\s*juta").expect("valid regex"))
}

/// Parsed travel intent with defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelIntent {
    pub destination: String,
    pub duration_days: u32,
    pub budget_range: BudgetRange,
    pub interests: Vec<String>,
}

impl TravelIntent {
    /// Convert into a plan request for the resolver.
    pub fn into_plan_request(self) -> PlanRequest {
        PlanRequest {
            destination: self.destination,
            duration_days: self.duration_days,
            budget_range: self.budget_range,
            preferences: self.interests,
            departure_city: None,
        }
    }
}

/// Parse a free-form message into a travel intent.
pub fn parse(message: &str) -> TravelIntent {
    let lowered = message.to_lowercase();

    TravelIntent {
        destination: detect_destination(message, &lowered),
        duration_days: detect_duration(&lowered),
        budget_range: detect_budget(&lowered),
        interests: detect_interests(&lowered),
    }
}

fn detect_destination(original: &str, lowered: &str) -> String {
    for (keyword, city) in DESTINATIONS {
        if lowered.contains(keyword) {
            return city.to_string();
        }
    }

    // Fall back to the first capitalized word, which is often a city name
    // the table does not know about.
    original
        .split_whitespace()
        .find(|word| {
            let mut chars = word.chars();
            matches!(chars.next(), Some(c) if c.is_uppercase())
                && chars.all(|c| c.is_lowercase())
        })
        .map(|w| w.to_string())
        .unwrap_or_else(|| "Jakarta".to_string())
}

/// Longest trip an itinerary is synthesized for; matches the validation
/// on the structured plan endpoint.
const MAX_DURATION_DAYS: u32 = 14;

fn detect_duration(lowered: &str) -> u32 {
    if let Some(caps) = duration_re().captures(lowered) {
        if let Ok(days) = caps[1].parse::<u32>() {
            return days.clamp(1, MAX_DURATION_DAYS);
        }
    }

    if lowered.contains("hari") || lowered.contains("seminggu") {
        for (word, days) in NUMBER_WORDS {
            if lowered.contains(word) {
                return *days;
            }
        }
    }

    3
}

fn detect_budget(lowered: &str) -> BudgetRange {
    if let Some(caps) = budget_re().captures(lowered) {
        let amount: f64 = caps[1].replace(',', ".").parse().unwrap_or(2.0);
        return if amount <= 1.5 {
            BudgetRange::Murah
        } else if amount <= 4.0 {
            BudgetRange::Sedang
        } else {
            BudgetRange::Mahal
        };
    }

    if ["hemat", "murah", "terbatas"].iter().any(|w| lowered.contains(w)) {
        BudgetRange::Murah
    } else if ["premium", "mewah", "mahal", "luxury", "eksklusif"]
        .iter()
        .any(|w| lowered.contains(w))
    {
        BudgetRange::Mahal
    } else {
        BudgetRange::Sedang
    }
}

fn detect_interests(lowered: &str) -> Vec<String> {
    let mut interests: Vec<String> = Vec::new();

    for (keyword, tags) in INTERESTS {
        if lowered.contains(keyword) {
            for tag in *tags {
                if !interests.iter().any(|t| t == tag) {
                    interests.push(tag.to_string());
                }
            }
        }
    }

    if interests.is_empty() {
        interests = vec!["culture".to_string(), "food".to_string()];
    }

    interests
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_message() {
        let intent = parse("Liburan ke jogja 5 hari budget hemat, mau lihat candi");
        assert_eq!(intent.destination, "Yogyakarta");
        assert_eq!(intent.duration_days, 5);
        assert_eq!(intent.budget_range, BudgetRange::Murah);
        assert!(intent.interests.contains(&"culture".to_string()));
        assert!(intent.interests.contains(&"history".to_string()));
    }

    #[test]
    fn test_destination_alias_first_match_wins() {
        // "ubud" maps to Bali even though Ubud is also a place name.
        let intent = parse("mau staycation di ubud");
        assert_eq!(intent.destination, "Bali");
    }

    #[test]
    fn test_unknown_destination_falls_back_to_capitalized_word() {
        let intent = parse("jalan-jalan ke Ternate minggu depan");
        assert_eq!(intent.destination, "Ternate");
    }

    #[test]
    fn test_duration_from_written_number() {
        assert_eq!(parse("ke bali dua hari").duration_days, 2);
        assert_eq!(parse("ke bali seminggu hari apa saja").duration_days, 7);
    }

    #[test]
    fn test_duration_defaults_to_three() {
        assert_eq!(parse("ke bali kapan saja").duration_days, 3);
    }

    #[test]
    fn test_duration_clamped_to_supported_range() {
        // An absurd day count must not drive an equally absurd itinerary.
        assert_eq!(parse("liburan ke bali 2000000000 hari").duration_days, 14);
        assert_eq!(parse("ke bali 30 hari").duration_days, 14);
        assert_eq!(parse("ke bali 0 hari").duration_days, 1);
    }

    #[test]
    fn test_budget_from_juta_amount() {
        assert_eq!(parse("ke bali budget 1 juta").budget_range, BudgetRange::Murah);
        assert_eq!(parse("ke bali budget 3 juta").budget_range, BudgetRange::Sedang);
        assert_eq!(parse("ke bali budget 10 juta").budget_range, BudgetRange::Mahal);
        assert_eq!(parse("ke bali budget 1,5 juta").budget_range, BudgetRange::Murah);
    }

    #[test]
    fn test_budget_keywords() {
        assert_eq!(parse("liburan mewah ke bali").budget_range, BudgetRange::Mahal);
        assert_eq!(parse("liburan ke bali").budget_range, BudgetRange::Sedang);
    }

    #[test]
    fn test_interests_deduplicated_with_defaults() {
        let intent = parse("wisata kuliner dan makanan di bandung");
        let food_count = intent.interests.iter().filter(|t| *t == "food").count();
        assert_eq!(food_count, 1);

        let fallback = parse("ke bandung saja");
        assert_eq!(fallback.interests, vec!["culture", "food"]);
    }
}
