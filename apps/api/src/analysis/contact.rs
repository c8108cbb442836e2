//! Contact field extraction — independent pattern matchers over normalized
//! text. Each extractor is a pure function; none depends on another's output.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Everything the extractors found. Populated once per analysis, never
/// mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub linkedin: Vec<String>,
    pub github: Vec<String>,
    /// Best-guess location, or empty when none of the heuristics matched.
    pub location: String,
}

impl ContactInfo {
    pub fn has_email(&self) -> bool {
        !self.emails.is_empty()
    }

    pub fn has_phone(&self) -> bool {
        !self.phones.is_empty()
    }

    pub fn has_linkedin(&self) -> bool {
        !self.linkedin.is_empty()
    }

    pub fn has_github(&self) -> bool {
        !self.github.is_empty()
    }

    pub fn has_location(&self) -> bool {
        !self.location.is_empty()
    }
}

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

/// International shape plus the two common North-American shapes. Matches are
/// unioned and deduplicated in first-seen order.
static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\+?\d{1,4}[-.\s]?\(?\d{1,3}\)?[-.\s]?\d{1,4}[-.\s]?\d{1,4}[-.\s]?\d{1,9}",
        r"\(\d{3}\)\s*\d{3}-\d{4}",
        r"\d{3}-\d{3}-\d{4}",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static LINKEDIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[\w-]+").unwrap());

static GITHUB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/[\w-]+").unwrap());

/// "Capitalized, Capitalized" pairs — candidate "City, Country" mentions,
/// accepted only when the second component is a known country.
static CITY_COUNTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Z][a-zàâäéèêëïîôùûü\s\-'.]+)[,\-]\s*([A-Z][a-zàâäéèêëïîôùûü\s]+)").unwrap()
});

/// Country gazetteer (MENA, Sub-Saharan Africa, and other frequent countries;
/// English and French spellings).
const COUNTRIES: &[&str] = &[
    // MENA
    "tunisia", "tunisie", "morocco", "maroc", "algeria", "algérie", "egypt", "égypte", "libya",
    "libye", "mauritania", "mauritanie", "lebanon", "liban", "jordan", "jordanie", "syria",
    "syrie", "iraq", "irak", "saudi arabia", "arabie saoudite", "uae", "emirates", "kuwait",
    "koweït", "qatar", "oman", "bahrain", "bahrein", "yemen", "yémen", "palestine", "israel",
    "israël",
    // Sub-Saharan Africa
    "nigeria", "nigéria", "ethiopia", "éthiopie", "kenya", "ghana", "tanzania", "tanzanie",
    "uganda", "ouganda", "south africa", "afrique du sud", "senegal", "sénégal", "ivory coast",
    "côte d'ivoire", "cameroon", "cameroun", "madagascar", "mali", "burkina faso", "niger",
    "rwanda", "somalia", "somalie", "zimbabwe", "zambia", "zambie", "mozambique", "botswana",
    "namibia", "namibie", "gabon", "angola", "congo", "democratic republic of congo", "rdc",
    "benin", "bénin", "togo", "chad", "tchad",
    // Other frequent countries
    "france", "canada", "usa", "united states", "états-unis", "uk", "united kingdom",
    "royaume-uni", "germany", "allemagne", "spain", "espagne", "italy", "italie", "belgium",
    "belgique", "switzerland", "suisse", "netherlands", "pays-bas",
];

/// Major-city gazetteer (MENA and Sub-Saharan Africa).
const MAJOR_CITIES: &[&str] = &[
    // Tunisia
    "tunis", "sfax", "sousse", "bizerte", "kairouan", "gabès", "ariana",
    // Morocco
    "casablanca", "rabat", "fès", "marrakech", "agadir", "tanger", "meknès",
    // Algeria
    "algiers", "alger", "oran", "constantine", "annaba", "blida",
    // Egypt
    "cairo", "le caire", "alexandria", "alexandrie", "giza", "shubra el-kheima",
    // Nigeria
    "lagos", "abuja", "kano", "ibadan", "port harcourt",
    // Kenya
    "nairobi", "mombasa", "kisumu", "nakuru",
    // South Africa
    "johannesburg", "cape town", "le cap", "durban", "pretoria",
    // Ghana
    "accra", "kumasi", "tamale", "takoradi",
    // Senegal
    "dakar", "touba", "thiès", "saint-louis",
    // Cameroon
    "yaoundé", "douala", "garoua", "bamenda",
    // Ethiopia
    "addis ababa", "dire dawa", "mekelle",
    // Tanzania
    "dar es salaam", "dodoma", "mwanza", "arusha",
    // Uganda
    "kampala", "gulu", "lira", "mbarara",
];

static CITY_MENTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", MAJOR_CITIES.join("|"))).unwrap()
});

static COUNTRY_MENTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", COUNTRIES.join("|"))).unwrap()
});

/// Runs every contact extractor over the normalized text.
pub fn extract_all(text: &str) -> ContactInfo {
    ContactInfo {
        emails: extract_emails(text),
        phones: extract_phones(text),
        linkedin: extract_linkedin(text),
        github: extract_github(text),
        location: extract_location(text),
    }
}

pub fn extract_emails(text: &str) -> Vec<String> {
    EMAIL.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

pub fn extract_phones(text: &str) -> Vec<String> {
    let mut phones = Vec::new();
    for pattern in PHONE_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            let found = m.as_str().to_string();
            if !phones.contains(&found) {
                phones.push(found);
            }
        }
    }
    phones
}

pub fn extract_linkedin(text: &str) -> Vec<String> {
    LINKEDIN.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

pub fn extract_github(text: &str) -> Vec<String> {
    GITHUB.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Best-effort location heuristic. Pass 1: "City, Country" pairs whose
/// country is in the gazetteer. Pass 2: bare major-city mention. Pass 3:
/// bare country mention. First pass with a hit wins; within a pass, the
/// earliest match in the text wins. Returns an empty string on no match —
/// never an error.
pub fn extract_location(text: &str) -> String {
    for caps in CITY_COUNTRY.captures_iter(text) {
        let city = caps[1].trim();
        let country = caps[2].trim();
        if COUNTRIES.contains(&country.to_lowercase().as_str()) {
            return format!("{city}, {country}");
        }
    }

    if let Some(m) = CITY_MENTION.find(text) {
        return title_case(m.as_str());
    }

    if let Some(m) = COUNTRY_MENTION.find(text) {
        return title_case(m.as_str());
    }

    String::new()
}

/// Capitalizes the first letter of each whitespace-separated word.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_email_basic() {
        let emails = extract_emails("Contact: jane.doe@example.com or admin@dev.io");
        assert_eq!(emails, vec!["jane.doe@example.com", "admin@dev.io"]);
    }

    #[test]
    fn test_extract_email_case_insensitive_tld() {
        let emails = extract_emails("Jane.Doe@Example.COM");
        assert_eq!(emails.len(), 1);
    }

    #[test]
    fn test_extract_phone_north_american() {
        let phones = extract_phones("Call (555) 123-4567 or 555-987-6543");
        assert!(phones.iter().any(|p| p.contains("123-4567")));
        assert!(phones.iter().any(|p| p.contains("987-6543")));
    }

    #[test]
    fn test_extract_phone_international() {
        let phones = extract_phones("Mobile: +216 71 123 456");
        assert!(!phones.is_empty());
    }

    #[test]
    fn test_extract_phone_deduplicates() {
        let phones = extract_phones("555-123-4567 and again 555-123-4567");
        let exact: Vec<_> = phones.iter().filter(|p| *p == "555-123-4567").collect();
        assert_eq!(exact.len(), 1);
    }

    #[test]
    fn test_extract_linkedin_variants() {
        assert_eq!(
            extract_linkedin("https://www.linkedin.com/in/jane-doe"),
            vec!["https://www.linkedin.com/in/jane-doe"]
        );
        assert_eq!(
            extract_linkedin("LINKEDIN.COM/in/jane_doe").len(),
            1
        );
    }

    #[test]
    fn test_extract_github_without_scheme() {
        assert_eq!(extract_github("github.com/janedoe"), vec!["github.com/janedoe"]);
    }

    #[test]
    fn test_location_city_country_pair() {
        let loc = extract_location("Based in Sousse, Tunisia. Open to relocation");
        assert_eq!(loc, "Sousse, Tunisia");
    }

    #[test]
    fn test_location_pair_rejected_when_country_unknown() {
        // "Narnia" is not in the gazetteer, so pass 1 yields nothing and the
        // scan falls through to bare-country detection.
        let loc = extract_location("Lived in Springfield, Narnia and in France");
        assert_eq!(loc, "France");
    }

    #[test]
    fn test_location_bare_city_mention() {
        let loc = extract_location("Experience in Tunis, worked with clients in Morocco");
        assert!(loc == "Tunis" || loc == "Morocco");
        assert!(!loc.is_empty());
    }

    #[test]
    fn test_location_multi_word_city_title_cased() {
        assert_eq!(extract_location("office near addis ababa airport"), "Addis Ababa");
    }

    #[test]
    fn test_location_none_found_is_empty() {
        assert_eq!(extract_location("Senior Software Engineer, 10 years"), "");
    }

    #[test]
    fn test_extract_all_populates_every_field() {
        let text = "jane@example.com 555-123-4567 linkedin.com/in/jane github.com/jane Lagos";
        let info = extract_all(text);
        assert!(info.has_email());
        assert!(info.has_phone());
        assert!(info.has_linkedin());
        assert!(info.has_github());
        assert_eq!(info.location, "Lagos");
    }
}
