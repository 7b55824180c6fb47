//! Natural-language instruction assembly for the generation call.

use keyseek_core::{Audience, SearchCriteria};

/// Build the full instruction text for one generation request.
///
/// Embeds the topic, optional main keyword, target language, audience
/// framing, optional competitor URL, and the requested count, followed by
/// the formatting rules. The Vietnamese-translation rule is emitted only
/// when the target language is not Vietnamese.
pub fn build_prompt(criteria: &SearchCriteria) -> String {
    let audience_clause = match criteria.audience {
        Audience::Viet => "focus on the Vietnamese audience and market.",
        Audience::Foreign => "focus on the international (primarily English-speaking) audience.",
    };

    let mut out = String::with_capacity(2048);

    out.push_str(
        "As a YouTube SEO expert, your task is to generate a list of high-potential \
         YouTube keywords based on the provided criteria. The final keywords should be \
         suitable for creating AI-generated video content.\n\n",
    );

    out.push_str("User criteria:\n");
    out.push_str(&format!("- Topic: \"{}\"\n", criteria.topic));
    if let Some(ref main_keyword) = criteria.main_keyword {
        out.push_str(&format!(
            "- Main keyword (to focus the search): \"{}\"\n",
            main_keyword
        ));
    }
    out.push_str(&format!("- Target language: {}\n", criteria.language));
    out.push_str(&format!("- Target audience: {}\n", audience_clause));
    out.push_str(&format!(
        "- Competitor video URL (for analysis): {}\n",
        criteria.competitor_url.as_deref().unwrap_or("N/A")
    ));
    out.push_str(&format!(
        "- Number of keywords to generate: {}\n",
        criteria.keyword_count
    ));

    out.push_str("\nAnalysis and generation instructions:\n");
    out.push_str(&format!(
        "1. Your primary goal is to find keywords within the broad topic: \"{}\".\n",
        criteria.topic
    ));
    if let Some(ref main_keyword) = criteria.main_keyword {
        out.push_str(&format!(
            "2. Use the main keyword \"{}\" to narrow your focus and find highly relevant sub-topics.\n",
            main_keyword
        ));
    }
    if let Some(ref url) = criteria.competitor_url {
        out.push_str(&format!(
            "3. Analyze the content, title, description, and tags from the competitor video URL ({}) \
             to understand what makes it successful and to extract keyword ideas.\n",
            url
        ));
    }
    out.push_str(
        "4. Combine these inputs to generate a list of keywords highly relevant for the \
         specified target audience.\n",
    );
    out.push_str(&format!(
        "5. Generate exactly {} keywords in the {} language.\n",
        criteria.keyword_count, criteria.language
    ));
    out.push_str("6. Each keyword MUST be 2-3 words long.\n");
    out.push_str(
        "7. CRITICAL: Each keyword must have high search volume potential on YouTube and a \
         strong, rising search trend on Google Trends over the last 30-90 days.\n",
    );
    if !criteria.is_vietnamese() {
        out.push_str(
            "8. Translation rule: since the target language is NOT Vietnamese, you MUST also \
             provide a Vietnamese translation for each keyword in the `vietnameseTranslation` \
             field.\n",
        );
    }

    out.push_str(
        "\nProvide the output in the specified JSON format. Do not include justification \
         or trend scores.",
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(language: &str) -> SearchCriteria {
        SearchCriteria::new(
            language,
            "Sinh tồn hoang dã",
            Some("xây nhà trú ẩn".to_string()),
            Audience::Viet,
            Some("https://youtube.com/watch?v=abc".to_string()),
            25,
        )
        .unwrap()
    }

    #[test]
    fn prompt_embeds_topic_language_and_count_verbatim() {
        let p = build_prompt(&criteria("English"));
        assert!(p.contains("Sinh tồn hoang dã"));
        assert!(p.contains("English"));
        assert!(p.contains("exactly 25 keywords"));
        assert!(p.contains("xây nhà trú ẩn"));
        assert!(p.contains("https://youtube.com/watch?v=abc"));
    }

    #[test]
    fn translation_clause_present_iff_not_vietnamese() {
        let english = build_prompt(&criteria("English"));
        assert!(english.contains("vietnameseTranslation"));

        let vietnamese = build_prompt(&criteria("Vietnamese"));
        assert!(!vietnamese.contains("vietnameseTranslation"));

        // Case-insensitive language matching.
        let lowercase = build_prompt(&criteria("vietnamese"));
        assert!(!lowercase.contains("vietnameseTranslation"));
    }

    #[test]
    fn audience_clause_switches_on_audience() {
        let mut c = criteria("English");
        assert!(build_prompt(&c).contains("Vietnamese audience and market"));
        c.audience = Audience::Foreign;
        assert!(build_prompt(&c).contains("international (primarily English-speaking)"));
    }

    #[test]
    fn optional_clauses_are_omitted_when_absent() {
        let c = SearchCriteria::new("English", "topic", None, Audience::Foreign, None, 10)
            .unwrap();
        let p = build_prompt(&c);
        assert!(!p.contains("Main keyword"));
        assert!(p.contains("Competitor video URL (for analysis): N/A"));
        assert!(!p.contains("3. Analyze the content"));
    }
}
