//! 結果テーブルとエクスポート行の生成
//!
//! どちらもスキーマの固定列順に従う純粋関数。

use crate::record::ExtractedRecord;
use crate::schema::{header_row, EXTRACTION_FIELDS, FIELD_COUNT};
use serde_json::Value;

/// 空のときの案内文
pub const EMPTY_TABLE_MESSAGE: &str =
    "No data extracted yet. Upload a document image and click Extract.";

/// 欠損セルの表示
pub const NOT_AVAILABLE: &str = "N/A";

/// テーブル本体
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    /// 全列を結合した案内行1行
    Placeholder { colspan: usize, message: &'static str },
    Rows(Vec<Vec<String>>),
}

impl Default for TableBody {
    fn default() -> Self {
        render_results(&[])
    }
}

/// ResultSet をテーブル本体に変換
pub fn render_results(records: &[ExtractedRecord]) -> TableBody {
    if records.is_empty() {
        return TableBody::Placeholder {
            colspan: FIELD_COUNT,
            message: EMPTY_TABLE_MESSAGE,
        };
    }

    let rows = records
        .iter()
        .map(|record| {
            EXTRACTION_FIELDS
                .iter()
                .map(|field| {
                    record
                        .display(field.name)
                        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
                })
                .collect()
        })
        .collect();

    TableBody::Rows(rows)
}

/// スプレッドシートに書き込む値（見出し行 + データ行）
///
/// 欠損は空文字。数値は数値のまま渡し、プロバイダ側の型解釈に任せる。
pub fn export_rows(records: &[ExtractedRecord]) -> Vec<Vec<Value>> {
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(header_row().into_iter().map(Value::String).collect());

    for record in records {
        rows.push(
            EXTRACTION_FIELDS
                .iter()
                .map(|field| {
                    record
                        .get(field.name)
                        .cloned()
                        .unwrap_or_else(|| Value::String(String::new()))
                })
                .collect(),
        );
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ExtractedRecord {
        [("serialNo", json!("1")), ("weight", json!(12.5))]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_empty_renders_placeholder() {
        let body = render_results(&[]);
        assert_eq!(
            body,
            TableBody::Placeholder { colspan: 17, message: EMPTY_TABLE_MESSAGE }
        );
    }

    #[test]
    fn test_missing_fields_render_na() {
        let TableBody::Rows(rows) = render_results(&[sample()]) else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.len(), 17);
        for (i, cell) in row.iter().enumerate() {
            match EXTRACTION_FIELDS[i].name {
                "serialNo" => assert_eq!(cell, "1"),
                "weight" => assert_eq!(cell, "12.5"),
                _ => assert_eq!(cell, "N/A"),
            }
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let records = vec![sample(), ExtractedRecord::default()];
        assert_eq!(render_results(&records), render_results(&records));
    }

    #[test]
    fn test_export_rows_header_and_blanks() {
        let rows = export_rows(&[sample()]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], json!("Booking Office Gstin"));
        assert_eq!(rows[1][6], json!("1"));
        assert_eq!(rows[1][9], json!(12.5));
        assert_eq!(rows[1][0], json!(""));
    }

    #[test]
    fn test_export_rows_empty_records_only_header() {
        let rows = export_rows(&[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), FIELD_COUNT);
    }
}
