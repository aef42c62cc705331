//! Dutch stopword list.

/// Common Dutch function words (the standard Snowball/NLTK list).
pub const DUTCH_STOPWORDS: &[&str] = &[
    "de", "en", "van", "ik", "te", "dat", "die", "in", "een", "hij", "het", "niet", "zijn",
    "is", "was", "op", "aan", "met", "als", "voor", "had", "er", "maar", "om", "hem", "dan",
    "zou", "of", "wat", "mijn", "men", "dit", "zo", "door", "over", "ze", "zich", "bij", "ook",
    "tot", "je", "mij", "uit", "der", "daar", "haar", "naar", "heb", "hoe", "heeft", "hebben",
    "deze", "u", "want", "nog", "zal", "me", "zij", "nu", "ge", "geen", "omdat", "iets",
    "worden", "toch", "al", "waren", "veel", "meer", "doen", "toen", "moet", "ben", "zonder",
    "kan", "hun", "dus", "alles", "onder", "ja", "eens", "hier", "wie", "werd", "altijd",
    "doch", "wordt", "wezen", "kunnen", "ons", "zelf", "tegen", "na", "reeds", "wil", "kon",
    "niets", "uw", "iemand", "geweest", "andere",
];

/// Dataset-specific tokens dropped alongside the stopwords: lowercased
/// redaction placeholders and the ticket-system marker `dtx`.
pub const DATASET_STOPWORDS: &[&str] = &[
    "<email>",
    "<datum>",
    "<date>",
    "<phone>",
    "<postalcode>",
    "<<email>>",
    "dtx",
];

/// Negations; dropping them loses "niet goed" vs "goed".
pub const NEGATIONS: &[&str] = &["niet", "geen"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_sizes() {
        assert_eq!(DUTCH_STOPWORDS.len(), 101);
        assert!(NEGATIONS.iter().all(|n| DUTCH_STOPWORDS.contains(n)));
    }

    #[test]
    fn test_lowercase() {
        for word in DUTCH_STOPWORDS.iter().chain(DATASET_STOPWORDS) {
            assert_eq!(*word, word.to_lowercase());
        }
    }
}
