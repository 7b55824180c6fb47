//! CSV export of a result set plus the criteria that produced it.
//!
//! The file is UTF-8 with a leading BOM so spreadsheet applications pick up
//! the encoding, every field is quoted (internal quotes doubled), and the
//! layout is: metadata block, blank separator row, column header row, one
//! data row per result.

use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use unidecode::unidecode;

use crate::criteria::{KeywordResult, SearchCriteria};
use crate::error::{KeyseekError, Result};
use crate::trends::trend_url;

/// UTF-8 byte-order mark.
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Fallback file stem when the topic slugifies to nothing.
const DEFAULT_STEM: &str = "ket_qua_tim_kiem";

/// Derive a filesystem-safe slug from a human-readable topic: transliterate
/// diacritics (đ/Đ become d), lowercase, drop anything outside
/// `[a-z0-9\s-]`, and collapse whitespace runs to single underscores.
pub fn slugify(topic: &str) -> String {
    let ascii = unidecode(topic).to_lowercase();
    let cleaned: String = ascii
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join("_")
}

/// CSV file name for a topic, with the fixed fallback for empty slugs.
pub fn file_name(topic: &str) -> String {
    let stem = slugify(topic);
    let stem = if stem.is_empty() { DEFAULT_STEM } else { &stem };
    format!("{stem}.csv")
}

/// Serialize one block of records with full quoting.
fn csv_block(rows: &[Vec<String>]) -> Result<String> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());
    for row in rows {
        wtr.write_record(row)
            .map_err(|e| KeyseekError::Io(std::io::Error::other(e)))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| KeyseekError::Io(std::io::Error::other(e)))?;
    String::from_utf8(bytes).map_err(|e| KeyseekError::Io(std::io::Error::other(e)))
}

/// Build the complete CSV body (BOM included).
///
/// The translation column is all-or-nothing: it appears in the header and in
/// every data row iff at least one result carries a translation.
pub fn build_csv(criteria: &SearchCriteria, results: &[KeywordResult]) -> Result<Vec<u8>> {
    let na = "N/A".to_string();

    let info_rows: Vec<Vec<String>> = vec![
        vec!["Thông tin tìm kiếm".to_string()],
        vec!["Chủ đề".to_string(), criteria.topic.clone()],
        vec![
            "Từ khóa chính".to_string(),
            criteria.main_keyword.clone().unwrap_or_else(|| na.clone()),
        ],
        vec!["Đối tượng".to_string(), criteria.audience.label().to_string()],
        vec!["Ngôn ngữ".to_string(), criteria.language.clone()],
        vec![
            "Link đối thủ".to_string(),
            criteria.competitor_url.clone().unwrap_or(na),
        ],
    ];

    let has_translations = results.iter().any(|r| r.vietnamese_translation.is_some());

    let mut header = vec!["Từ khóa".to_string()];
    if has_translations {
        header.push("Bản dịch Tiếng Việt".to_string());
    }
    header.push("Link Kiểm Tra Trend".to_string());

    let mut table_rows: Vec<Vec<String>> = vec![header];
    for result in results {
        let mut row = vec![result.keyword.clone()];
        if has_translations {
            row.push(result.vietnamese_translation.clone().unwrap_or_default());
        }
        row.push(trend_url(&result.keyword, criteria.audience));
        table_rows.push(row);
    }

    let mut out = Vec::with_capacity(1024);
    out.extend_from_slice(BOM);
    out.extend_from_slice(csv_block(&info_rows)?.as_bytes());
    out.push(b'\n'); // blank separator row
    out.extend_from_slice(csv_block(&table_rows)?.as_bytes());
    Ok(out)
}

/// Write the export into `dir`, returning the full path of the created file.
pub fn write_csv(
    dir: &Path,
    criteria: &SearchCriteria,
    results: &[KeywordResult],
) -> Result<PathBuf> {
    let path = dir.join(file_name(&criteria.topic));
    let body = build_csv(criteria, results)?;
    std::fs::write(&path, body)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::Audience;

    fn criteria(topic: &str) -> SearchCriteria {
        SearchCriteria::new("English", topic, None, Audience::Viet, None, 10).unwrap()
    }

    fn kw(keyword: &str, translation: Option<&str>) -> KeywordResult {
        KeywordResult {
            keyword: keyword.to_string(),
            vietnamese_translation: translation.map(str::to_string),
        }
    }

    #[test]
    fn slugify_strips_diacritics_and_punctuation() {
        assert_eq!(slugify("Đi Săn Ở Rừng!"), "di_san_o_rung");
        assert_eq!(slugify("Mukbang AI"), "mukbang_ai");
        assert_eq!(slugify("  nhiều   khoảng   trắng  "), "nhieu_khoang_trang");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn file_name_falls_back_when_slug_is_empty() {
        assert_eq!(file_name("???"), "ket_qua_tim_kiem.csv");
        assert_eq!(file_name("Đi Săn Ở Rừng!"), "di_san_o_rung.csv");
    }

    #[test]
    fn translation_column_is_all_or_nothing_when_mixed() {
        let results = vec![
            kw("sinh tồn rừng", None),
            kw("mukbang cay", Some("spicy mukbang")),
        ];
        let body = build_csv(&criteria("Mukbang AI"), &results).unwrap();
        let text = String::from_utf8(body[3..].to_vec()).unwrap();

        assert!(text.contains(r#""Từ khóa","Bản dịch Tiếng Việt","Link Kiểm Tra Trend""#));
        // First row lacks a translation but still carries an empty quoted field.
        assert!(text.contains(r#""sinh tồn rừng","","https://trends.google.com"#));
        assert!(text.contains(r#""mukbang cay","spicy mukbang","https://trends.google.com"#));
    }

    #[test]
    fn translation_column_absent_when_no_result_has_one() {
        let results = vec![kw("sinh tồn rừng", None), kw("câu cá đêm", None)];
        let body = build_csv(&criteria("Sinh tồn"), &results).unwrap();
        let text = String::from_utf8(body[3..].to_vec()).unwrap();

        assert!(!text.contains("Bản dịch Tiếng Việt"));
        assert!(text.contains(r#""Từ khóa","Link Kiểm Tra Trend""#));
        assert!(text.contains(r#""sinh tồn rừng","https://trends.google.com"#));
    }

    #[test]
    fn body_starts_with_bom_and_has_blank_separator() {
        let body = build_csv(&criteria("Mukbang AI"), &[kw("a b", None)]).unwrap();
        assert_eq!(&body[..3], b"\xEF\xBB\xBF");
        let text = String::from_utf8(body[3..].to_vec()).unwrap();
        assert!(text.contains("\"N/A\"\n\n\"Từ khóa\""));
    }

    #[test]
    fn metadata_block_reflects_criteria() {
        let c = SearchCriteria::new(
            "English",
            "Mukbang AI",
            Some("ăn đồ siêu cay".to_string()),
            Audience::Foreign,
            Some("https://youtube.com/watch?v=x".to_string()),
            10,
        )
        .unwrap();
        let text =
            String::from_utf8(build_csv(&c, &[]).unwrap()[3..].to_vec()).unwrap();
        assert!(text.starts_with("\"Thông tin tìm kiếm\"\n"));
        assert!(text.contains(r#""Chủ đề","Mukbang AI""#));
        assert!(text.contains(r#""Từ khóa chính","ăn đồ siêu cay""#));
        assert!(text.contains(r#""Đối tượng","View Ngoại""#));
        assert!(text.contains(r#""Ngôn ngữ","English""#));
        assert!(text.contains(r#""Link đối thủ","https://youtube.com/watch?v=x""#));
    }

    #[test]
    fn fields_are_quoted_and_inner_quotes_doubled() {
        let results = vec![kw(r#"say "cheese""#, None)];
        let text = String::from_utf8(
            build_csv(&criteria("quotes"), &results).unwrap()[3..].to_vec(),
        )
        .unwrap();
        assert!(text.contains(r#""say ""cheese""""#));
    }

    #[test]
    fn write_csv_creates_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), &criteria("Đi Săn Ở Rừng!"), &[kw("a", None)]).unwrap();
        assert_eq!(path.file_name().unwrap(), "di_san_o_rung.csv");
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], b"\xEF\xBB\xBF");
    }
}
