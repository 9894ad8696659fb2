//! Query parameter encoding for recognize requests.
//!
//! Only the keys in [`ENCODED_PARAMS`] reach the query string, and they are
//! always sent, even at their zero values. The fields named in
//! [`NOT_ENCODED_PARAMS`] are part of [`RecognitionConfig`] but are not
//! transmitted.

use url::Url;

use super::config::RecognitionConfig;

/// Keys written to the query string, in wire order.
pub const ENCODED_PARAMS: [&str; 5] = [
    "keywords",
    "keywords_threshold",
    "max_alternatives",
    "model",
    "word_confidence",
];

/// Configuration fields that are not sent.
// TODO: confirm the query names the recognize endpoint accepts for these before encoding them
pub const NOT_ENCODED_PARAMS: [&str; 4] = [
    "continuous",
    "inactivity_timeout",
    "word_alternatives_threshold",
    "timestamps",
];

/// Keywords joined with commas and wrapped in literal double quotes.
///
/// An empty list still yields the two-character token `""`.
pub fn encode_keywords(keywords: &[String]) -> String {
    format!("\"{}\"", keywords.join(","))
}

/// Threshold with exactly one digit after the decimal point.
///
/// Non-finite values are spelled `+Inf`, `-Inf` and `NaN`.
pub fn format_threshold(threshold: f64) -> String {
    if threshold.is_nan() {
        "NaN".to_string()
    } else if threshold == f64::INFINITY {
        "+Inf".to_string()
    } else if threshold == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{threshold:.1}")
    }
}

/// Key/value pairs for the query string, in wire order.
pub fn encode_query(config: &RecognitionConfig) -> Vec<(&'static str, String)> {
    vec![
        ("keywords", encode_keywords(&config.keywords)),
        ("keywords_threshold", format_threshold(config.keywords_threshold)),
        ("max_alternatives", config.max_alternatives.to_string()),
        ("model", config.model.clone()),
        ("word_confidence", config.word_confidence.to_string()),
    ]
}

/// Append form-urlencoded pairs to `url`.
pub fn append_query(url: &mut Url, params: &[(&'static str, String)]) {
    let mut pairs = url.query_pairs_mut();
    for (key, value) in params {
        pairs.append_pair(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_keywords() {
        assert_eq!(encode_keywords(&[]), "\"\"");
        assert_eq!(
            encode_keywords(&["a".to_string(), "b".to_string()]),
            "\"a,b\""
        );
        assert_eq!(
            encode_keywords(&["hello world".to_string()]),
            "\"hello world\""
        );
    }

    #[test]
    fn test_format_threshold() {
        assert_eq!(format_threshold(0.5), "0.5");
        assert_eq!(format_threshold(0.0), "0.0");
        assert_eq!(format_threshold(1.0), "1.0");
        assert_eq!(format_threshold(0.26), "0.3");
        // Out-of-range values pass through unvalidated
        assert_eq!(format_threshold(7.0), "7.0");
        assert_eq!(format_threshold(-0.0), "-0.0");
        assert_eq!(format_threshold(0.25), "0.2");
    }

    #[test]
    fn test_format_threshold_non_finite() {
        assert_eq!(format_threshold(f64::INFINITY), "+Inf");
        assert_eq!(format_threshold(f64::NEG_INFINITY), "-Inf");
        assert_eq!(format_threshold(f64::NAN), "NaN");
    }

    #[test]
    fn test_encode_query_zero_values_still_sent() {
        let pairs = encode_query(&RecognitionConfig::default());
        assert_eq!(
            pairs,
            vec![
                ("keywords", "\"\"".to_string()),
                ("keywords_threshold", "0.0".to_string()),
                ("max_alternatives", "0".to_string()),
                ("model", String::new()),
                ("word_confidence", "false".to_string()),
            ]
        );
    }

    #[test]
    fn test_encode_query_keys_match_allow_list() {
        let keys: Vec<&str> = encode_query(&RecognitionConfig::default())
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, ENCODED_PARAMS);
        for key in NOT_ENCODED_PARAMS {
            assert!(!keys.contains(&key));
        }
    }

    #[test]
    fn test_append_query_form_encodes() {
        let config = RecognitionConfig {
            model: "en-US_BroadbandModel".to_string(),
            keywords: vec!["a".to_string(), "b c".to_string()],
            keywords_threshold: 0.5,
            max_alternatives: 3,
            word_confidence: true,
            ..Default::default()
        };

        let mut url = Url::parse("https://example.com/v1/recognize").unwrap();
        append_query(&mut url, &encode_query(&config));

        assert_eq!(
            url.query(),
            Some(
                "keywords=%22a%2Cb+c%22&keywords_threshold=0.5&max_alternatives=3\
                 &model=en-US_BroadbandModel&word_confidence=true"
            )
        );
    }
}
