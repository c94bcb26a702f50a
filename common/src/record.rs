//! 抽出レコードとAIレスポンスのパース
//!
//! レコードはフィールド名→スカラー値のマップ。型や必須性は検証しない。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// 抽出された1行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedRecord(Map<String, Value>);

impl ExtractedRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// フィールド値（null は欠損扱い）
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    /// 表示用文字列（欠損なら None）
    pub fn display(&self, field: &str) -> Option<String> {
        self.get(field).map(display_value)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ExtractedRecord {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// 値のデフォルト文字列化（数値は10進表記、整数値の浮動小数は小数点なし）
///
/// 指数表記にはしない。1e21 以上の値は JavaScript の `String()`（`1e+21`）と一致せず、
/// 全桁の10進表記になる。
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        other => other.to_string(),
    }
}

fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// レスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の [...] 配列
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7;
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    if let Some(start) = response.find('[') {
        if let Some(end) = response.rfind(']') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("no JSON array found in response".into()))
}

/// 抽出レスポンスをレコード配列にパース
///
/// responseSchema 指定時は素のJSONが返るが、念のためコードフェンス付きにも対応する。
pub fn parse_records(response: &str) -> Result<Vec<ExtractedRecord>> {
    let value: Value = match serde_json::from_str(response.trim()) {
        Ok(value) => value,
        Err(_) => serde_json::from_str(extract_json(response)?)?,
    };

    let Value::Array(items) = value else {
        return Err(Error::Parse("expected a JSON array of records".into()));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(ExtractedRecord(map)),
            _ => Err(Error::Parse(format!("record {} is not an object", i))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_plain_array() {
        let records = parse_records(r#"[{"serialNo":"1","weight":12.5}]"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].display("serialNo").as_deref(), Some("1"));
        assert_eq!(records[0].display("weight").as_deref(), Some("12.5"));
    }

    #[test]
    fn test_parse_fenced_block() {
        let response = "Here you go:\n```json\n[{\"customerName\": \"ACME\"}]\n```";
        let records = parse_records(response).unwrap();
        assert_eq!(records[0].display("customerName").as_deref(), Some("ACME"));
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_object() {
        let result = parse_records(r#"{"serialNo":"1"}"#);
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_rejects_non_object_items() {
        let result = parse_records(r#"[{"serialNo":"1"}, 42]"#);
        match result {
            Err(Error::Parse(msg)) => assert!(msg.contains("record 1")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_malformed() {
        assert!(parse_records("not json at all").is_err());
        assert!(parse_records("[{\"a\": ]").is_err());
    }

    #[test]
    fn test_null_is_missing() {
        let record: ExtractedRecord = [("remarks", Value::Null)].into_iter().collect();
        assert_eq!(record.get("remarks"), None);
        assert_eq!(record.display("remarks"), None);
    }

    #[test]
    fn test_display_numbers() {
        assert_eq!(display_value(&json!(12.5)), "12.5");
        assert_eq!(display_value(&json!(12)), "12");
        assert_eq!(display_value(&json!(12.0)), "12");
        assert_eq!(display_value(&json!(-0.25)), "-0.25");
    }

    #[test]
    fn test_display_large_numbers_without_exponent() {
        assert_eq!(display_value(&json!(1e15)), "1000000000000000");
        assert_eq!(display_value(&json!(1e21)), "1000000000000000000000");
    }

    #[test]
    fn test_display_other_scalars() {
        assert_eq!(display_value(&json!("abc")), "abc");
        assert_eq!(display_value(&json!(true)), "true");
    }
}
