//! 抽出スキーマ定義
//!
//! AIに返させるレコードの形（17フィールド、固定順序）。
//! 表示列順・エクスポート列順・responseSchema はすべてここから導出する。

use serde_json::{json, Map, Value};

/// フィールドの型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
}

impl FieldType {
    /// Gemini responseSchema の型名
    pub fn schema_type(&self) -> &'static str {
        match self {
            FieldType::String => "STRING",
            FieldType::Number => "NUMBER",
        }
    }
}

/// スキーマの1フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub field_type: FieldType,
}

const fn string(name: &'static str) -> Field {
    Field { name, field_type: FieldType::String }
}

const fn number(name: &'static str) -> Field {
    Field { name, field_type: FieldType::Number }
}

/// 抽出フィールド（表示・出力の列順）
pub const EXTRACTION_FIELDS: [Field; 17] = [
    string("senderGstin"),
    string("bookingOfficeGstin"),
    string("customerId"),
    string("contractId"),
    string("customerName"),
    string("bookingRefId"),
    string("serialNo"),
    string("articleNumber"),
    string("productType"),
    number("weight"),
    string("senderName"),
    string("receiverName"),
    number("baseTariff"),
    string("remarks"),
    string("createdBy"),
    string("createdOn"),
    string("bulkReference"),
];

/// 列数
pub const FIELD_COUNT: usize = EXTRACTION_FIELDS.len();

/// フィールド名を見出しに変換
///
/// 先頭以外の大文字の前に空白を入れ、先頭を大文字にする。
/// `bookingOfficeGstin` → `Booking Office Gstin`
pub fn humanize_field_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
            continue;
        }
        if ch.is_uppercase() {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// 見出し行
pub fn header_row() -> Vec<String> {
    EXTRACTION_FIELDS
        .iter()
        .map(|field| humanize_field_name(field.name))
        .collect()
}

/// Gemini の responseSchema（レコード配列）
pub fn response_schema() -> Value {
    let mut properties = Map::new();
    for field in &EXTRACTION_FIELDS {
        properties.insert(
            field.name.to_string(),
            json!({ "type": field.field_type.schema_type() }),
        );
    }
    let ordering: Vec<&str> = EXTRACTION_FIELDS.iter().map(|f| f.name).collect();

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": properties,
            "propertyOrdering": ordering,
        }
    })
}
