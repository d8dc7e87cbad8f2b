//! Lexical feature extraction for URLs.
//!
//! Maps a raw URL string to the fixed-order numeric vector the classifier
//! was trained on. Extraction is total: every sub-extractor returns a
//! concrete value for every input, including empty and malformed strings.

use regex::{Regex, RegexSet};
use url::Url;

/// Number of entries in a feature vector.
pub const FEATURE_COUNT: usize = 20;

/// Special-character substrings counted in training order.
///
/// `//` is a two-character substring counted as non-overlapping occurrences,
/// distinct from the single-character counts.
pub const SPECIAL_CHARS: [&str; 13] = [
    "@", "?", "-", "=", ".", "#", "%", "+", "$", "!", "*", ",", "//",
];

/// Known URL-shortener domains. Matched as literal substrings anywhere in
/// the URL, not as exact host equality.
const SHORTENING_SERVICES: &[&str] = &[
    "bit.ly",
    "goo.gl",
    "shorte.st",
    "go2l.ink",
    "x.co",
    "ow.ly",
    "t.co",
    "tinyurl",
    "tr.im",
    "is.gd",
    "cli.gs",
    "yfrog.com",
    "migre.me",
    "ff.im",
    "tiny.cc",
    "url4.eu",
    "twit.ac",
    "su.pr",
    "twurl.nl",
    "snipurl.com",
    "short.to",
    "BudURL.com",
    "ping.fm",
    "post.ly",
    "Just.as",
    "bkite.com",
    "snipr.com",
    "fic.kr",
    "loopt.us",
    "doiop.com",
    "short.ie",
    "kl.am",
    "wp.me",
    "rubyurl.com",
    "om.ly",
    "to.ly",
    "bit.do",
    "lnkd.in",
    "db.tt",
    "qr.ae",
    "adf.ly",
    "bitly.com",
    "cur.lv",
    "tinyurl.com",
    "ity.im",
    "q.gs",
    "po.st",
    "bc.vc",
    "twitthis.com",
    "u.to",
    "j.mp",
    "buzurl.com",
    "cutt.us",
    "u.bb",
    "yourls.org",
    "prettylinkpro.com",
    "scrnch.me",
    "filoops.info",
    "vzturl.com",
    "qr.net",
    "1url.com",
    "tweez.me",
    "v.gd",
    "link.zip.net",
];

/// IP-literal shapes recognized by the `has_ip` heuristic.
///
/// Substring search, so a quad followed by a port, a slash, or other
/// trailing text still matches. Heuristic signal, not address validation.
const IP_PATTERNS: &[&str] = &[
    // Dotted-quad IPv4
    r"(?:(?:25[0-5]|2[0-4]\d|[01]?\d\d?)\.){3}(?:25[0-5]|2[0-4]\d|[01]?\d\d?)",
    // Hex-octet IPv4 (0xAB.0xCD.0xEF.0x01)
    r"(?:0x[0-9a-fA-F]{1,2}\.){3}0x[0-9a-fA-F]{1,2}",
    // Full-form IPv6
    r"(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}",
];

/// Fixed-order feature vector for a single URL.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector([f32; FEATURE_COUNT]);

impl FeatureVector {
    /// Index of the URL length feature.
    pub const URL_LENGTH: usize = 0;
    /// Index of the abnormal-URL flag.
    pub const ABNORMAL_URL: usize = 14;
    /// Index of the HTTPS flag.
    pub const HTTPS: usize = 15;
    /// Index of the digit count.
    pub const DIGIT_COUNT: usize = 16;
    /// Index of the letter count.
    pub const LETTER_COUNT: usize = 17;
    /// Index of the shortening-service flag.
    pub const SHORTENING_SERVICE: usize = 18;
    /// Index of the IP-literal flag.
    pub const HAS_IP: usize = 19;

    /// Returns the features as a slice in training order.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Consumes the vector, returning the raw array.
    pub fn into_inner(self) -> [f32; FEATURE_COUNT] {
        self.0
    }
}

/// Extracts the fixed-order feature vector from URL strings.
///
/// Pattern tables are compiled once at construction; extraction itself is
/// a pure `&self` operation with no I/O.
pub struct FeatureExtractor {
    shortener: Regex,
    ip_shapes: RegexSet,
}

impl FeatureExtractor {
    /// Creates an extractor with the default pattern tables.
    pub fn new() -> Self {
        let shortener_alternation = SHORTENING_SERVICES
            .iter()
            .map(|d| regex::escape(d))
            .collect::<Vec<_>>()
            .join("|");

        Self {
            shortener: Regex::new(&shortener_alternation).expect("Invalid shortener patterns"),
            ip_shapes: RegexSet::new(IP_PATTERNS).expect("Invalid IP patterns"),
        }
    }

    /// Computes the feature vector for the given URL string.
    ///
    /// Never fails: malformed, scheme-less, and empty inputs map to the
    /// per-field defaults rather than errors.
    pub fn extract(&self, url: &str) -> FeatureVector {
        let mut features = [0.0f32; FEATURE_COUNT];
        let mut i = 0;

        features[i] = url.chars().count() as f32;
        i += 1;

        for pattern in &SPECIAL_CHARS {
            features[i] = url.matches(pattern).count() as f32;
            i += 1;
        }

        features[i] = abnormal_url(url) as f32;
        i += 1;

        features[i] = https_flag(url) as f32;
        i += 1;

        features[i] = url.chars().filter(|c| c.is_ascii_digit()).count() as f32;
        i += 1;

        features[i] = url.chars().filter(|c| c.is_alphabetic()).count() as f32;
        i += 1;

        features[i] = self.shortener.is_match(url) as u32 as f32;
        i += 1;

        features[i] = self.ip_shapes.is_match(url) as u32 as f32;

        FeatureVector(features)
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns 1 if the parsed hostname is missing or does not occur verbatim
/// in the URL text, 0 otherwise.
fn abnormal_url(url: &str) -> u32 {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) if !host.is_empty() && url.contains(host) => 0,
            _ => 1,
        },
        Err(_) => 1,
    }
}

/// Returns 1 if the parsed scheme is exactly `https`, 0 otherwise.
fn https_flag(url: &str) -> u32 {
    match Url::parse(url) {
        Ok(parsed) => (parsed.scheme() == "https") as u32,
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> FeatureExtractor {
        FeatureExtractor::new()
    }

    #[test]
    fn vector_has_fixed_length() {
        let v = extractor().extract("https://www.wikipedia.org");
        assert_eq!(v.as_slice().len(), FEATURE_COUNT);
    }

    #[test]
    fn extraction_is_total() {
        let ex = extractor();
        for s in [
            "",
            "not a url",
            "example.com/no-scheme",
            "http://",
            "https://пример.рф/путь",
            "http://example.com/emoji/🦀",
            "ftp:///missing-host",
            "   ",
        ] {
            let v = ex.extract(s);
            assert_eq!(v.as_slice().len(), FEATURE_COUNT, "input: {:?}", s);
        }
    }

    #[test]
    fn extraction_is_idempotent() {
        let ex = extractor();
        let url = "https://login.example-bank.com/verify?user=1&token=a%20b";
        assert_eq!(ex.extract(url), ex.extract(url));
    }

    #[test]
    fn url_length_counts_characters() {
        let v = extractor().extract("http://ab.cd");
        assert_eq!(v.as_slice()[FeatureVector::URL_LENGTH], 12.0);
    }

    #[test]
    fn special_char_counts_in_order() {
        // One of each: @ ? - = . # % + $ ! * ,
        let url = "http://a.b/@?-=.#%+$!*,";
        let v = extractor().extract(url);
        // Index 1 is '@', index 5 is '.', index 13 is '//'.
        assert_eq!(v.as_slice()[1], 1.0, "@ count");
        assert_eq!(v.as_slice()[5], 2.0, ". count");
        assert_eq!(v.as_slice()[13], 1.0, "// count");
    }

    #[test]
    fn double_slash_counted_as_substring() {
        let v = extractor().extract("http://example.com//redirect//x");
        assert_eq!(v.as_slice()[13], 3.0);
    }

    #[test]
    fn abnormal_url_zero_for_plain_host() {
        assert_eq!(abnormal_url("http://example.com/path"), 0);
    }

    #[test]
    fn abnormal_url_one_for_unparseable() {
        assert_eq!(abnormal_url("not a url"), 1);
        assert_eq!(abnormal_url(""), 1);
    }

    #[test]
    fn abnormal_url_one_when_host_not_verbatim() {
        // Parser lowercases the host; the original casing never matches.
        assert_eq!(abnormal_url("http://EXAMPLE.COM/path"), 1);
    }

    #[test]
    fn https_flag_set_only_for_https_scheme() {
        assert_eq!(https_flag("https://example.com"), 1);
        assert_eq!(https_flag("http://example.com"), 0);
        assert_eq!(https_flag("ftp://example.com"), 0);
        assert_eq!(https_flag("no scheme here"), 0);
    }

    #[test]
    fn digit_and_letter_counts() {
        let v = extractor().extract("http://abc123.com");
        assert_eq!(v.as_slice()[FeatureVector::DIGIT_COUNT], 3.0);
        // h t t p a b c c o m
        assert_eq!(v.as_slice()[FeatureVector::LETTER_COUNT], 10.0);
    }

    #[test]
    fn letter_count_includes_non_ascii() {
        let v = extractor().extract("привет");
        assert_eq!(v.as_slice()[FeatureVector::LETTER_COUNT], 6.0);
    }

    #[test]
    fn detects_shortening_service() {
        let ex = extractor();
        let v = ex.extract("http://bit.ly/abc123");
        assert_eq!(v.as_slice()[FeatureVector::SHORTENING_SERVICE], 1.0);

        let v = ex.extract("http://example.com");
        assert_eq!(v.as_slice()[FeatureVector::SHORTENING_SERVICE], 0.0);
    }

    #[test]
    fn shortener_matches_anywhere_in_string() {
        let v = extractor().extract("http://evil.com/redirect?to=tinyurl.com/x");
        assert_eq!(v.as_slice()[FeatureVector::SHORTENING_SERVICE], 1.0);
    }

    #[test]
    fn detects_dotted_quad_ip() {
        let ex = extractor();
        let v = ex.extract("http://192.168.1.1/login");
        assert_eq!(v.as_slice()[FeatureVector::HAS_IP], 1.0);

        let v = ex.extract("http://example.com");
        assert_eq!(v.as_slice()[FeatureVector::HAS_IP], 0.0);
    }

    #[test]
    fn detects_ip_with_port() {
        let v = extractor().extract("http://10.0.0.5:8080/admin");
        assert_eq!(v.as_slice()[FeatureVector::HAS_IP], 1.0);
    }

    #[test]
    fn detects_hex_octet_ip() {
        let v = extractor().extract("http://0xC0.0xA8.0x01.0x01/");
        assert_eq!(v.as_slice()[FeatureVector::HAS_IP], 1.0);
    }

    #[test]
    fn detects_full_form_ipv6() {
        let v = extractor().extract("http://[2001:0db8:85a3:0000:0000:8a2e:0370:7334]/");
        assert_eq!(v.as_slice()[FeatureVector::HAS_IP], 1.0);
    }

    #[test]
    fn partial_octets_do_not_match() {
        let v = extractor().extract("http://example.com/v1.2.3");
        assert_eq!(v.as_slice()[FeatureVector::HAS_IP], 0.0);
    }

    #[test]
    fn empty_string_yields_defaults() {
        let v = extractor().extract("");
        let s = v.as_slice();
        assert_eq!(s[FeatureVector::URL_LENGTH], 0.0);
        assert_eq!(s[FeatureVector::ABNORMAL_URL], 1.0);
        assert_eq!(s[FeatureVector::HTTPS], 0.0);
        assert_eq!(s[FeatureVector::SHORTENING_SERVICE], 0.0);
        assert_eq!(s[FeatureVector::HAS_IP], 0.0);
    }
}
