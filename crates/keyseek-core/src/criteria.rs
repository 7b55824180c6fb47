use serde::{Deserialize, Serialize};

use crate::error::{KeyseekError, Result};

/// Target audience for the generated keywords. Drives both the prompt's
/// audience framing and the geo parameter of trend-check links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[default]
    Viet,
    Foreign,
}

impl Audience {
    /// Two-letter Google Trends region code.
    pub fn geo(&self) -> &'static str {
        match self {
            Audience::Viet => "VN",
            Audience::Foreign => "US",
        }
    }

    /// Human-readable label used in the CSV metadata block.
    pub fn label(&self) -> &'static str {
        match self {
            Audience::Viet => "View Việt",
            Audience::Foreign => "View Ngoại",
        }
    }

    pub fn toggle(&self) -> Audience {
        match self {
            Audience::Viet => Audience::Foreign,
            Audience::Foreign => Audience::Viet,
        }
    }
}

impl std::fmt::Display for Audience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The complete set of user-specified parameters for one generation request.
/// Immutable once built; held for the lifetime of the request/response cycle
/// and for CSV export afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub language: String,
    pub topic: String,
    pub main_keyword: Option<String>,
    pub audience: Audience,
    pub competitor_url: Option<String>,
    pub keyword_count: u8,
}

impl SearchCriteria {
    /// Package raw form values into a validated criteria value.
    ///
    /// The topic is the only mandatory field: empty or whitespace-only input
    /// is rejected here, before any network call can be attempted. Optional
    /// fields collapse to `None` when blank; the count is clamped to [1, 50].
    pub fn new(
        language: impl Into<String>,
        topic: impl Into<String>,
        main_keyword: Option<String>,
        audience: Audience,
        competitor_url: Option<String>,
        keyword_count: u8,
    ) -> Result<Self> {
        let topic = topic.into().trim().to_string();
        if topic.is_empty() {
            return Err(KeyseekError::Validation("topic must not be empty".into()));
        }
        let language = language.into();
        if language.trim().is_empty() {
            return Err(KeyseekError::Validation(
                "language must not be empty".into(),
            ));
        }
        Ok(Self {
            language,
            topic,
            main_keyword: main_keyword.filter(|s| !s.trim().is_empty()),
            audience,
            competitor_url: competitor_url.filter(|s| !s.trim().is_empty()),
            keyword_count: keyword_count.clamp(1, 50),
        })
    }

    /// Whether the target language is Vietnamese. Controls the
    /// translation-instruction clause in the prompt.
    pub fn is_vietnamese(&self) -> bool {
        self.language.eq_ignore_ascii_case("vietnamese")
    }
}

/// One generated suggestion plus optional translation.
///
/// The translation should only be populated when the target language is not
/// Vietnamese, but that is an instruction to the generator, not a local
/// invariant — the type tolerates violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordResult {
    pub keyword: String,

    #[serde(
        rename = "vietnameseTranslation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub vietnamese_translation: Option<String>,
}

/// Languages offered by the form selector. Free-form entry is also accepted.
pub const LANGUAGE_OPTIONS: &[&str] = &[
    "Vietnamese",
    "English",
    "Spanish",
    "Portuguese",
    "Hindi",
    "Indonesian",
    "Japanese",
    "Korean",
    "French",
    "German",
];

/// Fixed topic ideas offered by the suggestion picker overlay. Selecting one
/// overwrites the topic field — a convenience, not a generation input.
pub const TOPIC_SUGGESTIONS: &[&str] = &[
    "Sinh tồn hoang dã",
    "Mukbang AI",
    "Nấu ăn dã chiến",
    "Xây nhà trú ẩn",
    "Ẩm thực đường phố",
    "Du lịch khám phá",
    "Thử thách 24 giờ",
    "Đồ ăn siêu cay",
    "Câu cá sông nước",
    "Làm vườn sân thượng",
    "Review đồ công nghệ",
    "Kể chuyện lịch sử",
    "Khoa học vũ trụ",
    "Động vật hoang dã",
    "Săn mây trên núi",
    "Đời sống nông thôn",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_topic_is_rejected() {
        let err = SearchCriteria::new("Vietnamese", "", None, Audience::Viet, None, 10)
            .expect_err("empty topic must fail");
        assert!(matches!(err, KeyseekError::Validation(_)));
    }

    #[test]
    fn whitespace_topic_is_rejected() {
        let err = SearchCriteria::new("English", "   \t ", None, Audience::Foreign, None, 10)
            .expect_err("whitespace topic must fail");
        assert!(matches!(err, KeyseekError::Validation(_)));
    }

    #[test]
    fn topic_is_trimmed_and_optionals_collapse() {
        let c = SearchCriteria::new(
            "English",
            "  Mukbang AI  ",
            Some("  ".to_string()),
            Audience::Viet,
            Some(String::new()),
            10,
        )
        .unwrap();
        assert_eq!(c.topic, "Mukbang AI");
        assert_eq!(c.main_keyword, None);
        assert_eq!(c.competitor_url, None);
    }

    #[test]
    fn count_is_clamped() {
        let c =
            SearchCriteria::new("English", "topic", None, Audience::Viet, None, 0).unwrap();
        assert_eq!(c.keyword_count, 1);
        let c =
            SearchCriteria::new("English", "topic", None, Audience::Viet, None, 200).unwrap();
        assert_eq!(c.keyword_count, 50);
    }

    #[test]
    fn vietnamese_detection_is_case_insensitive() {
        let c = SearchCriteria::new("vietnamese", "t", None, Audience::Viet, None, 5).unwrap();
        assert!(c.is_vietnamese());
        let c = SearchCriteria::new("English", "t", None, Audience::Viet, None, 5).unwrap();
        assert!(!c.is_vietnamese());
    }

    #[test]
    fn keyword_result_wire_names() {
        let json = r#"{"keyword":"mukbang cay","vietnameseTranslation":"spicy mukbang"}"#;
        let r: KeywordResult = serde_json::from_str(json).unwrap();
        assert_eq!(r.keyword, "mukbang cay");
        assert_eq!(r.vietnamese_translation.as_deref(), Some("spicy mukbang"));

        let bare: KeywordResult = serde_json::from_str(r#"{"keyword":"sinh tồn rừng"}"#).unwrap();
        assert_eq!(bare.vietnamese_translation, None);
        assert!(!serde_json::to_string(&bare)
            .unwrap()
            .contains("vietnameseTranslation"));
    }
}
