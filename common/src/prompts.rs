//! プロンプト定義
//!
//! 出力形式は responseSchema で拘束するので、プロンプトは抽出対象の説明に留める。

use crate::schema::EXTRACTION_FIELDS;

/// 抽出指示
pub fn build_extraction_prompt() -> String {
    let fields = EXTRACTION_FIELDS
        .iter()
        .map(|f| f.name)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are a data entry assistant reading a scanned booking register.
The image contains a table of postal/parcel bookings. Extract every data row of the table as one JSON object.

Rules:
- Output one object per table row, in the order the rows appear.
- Use exactly these keys: {fields}
- weight and baseTariff are numbers without units or currency symbols.
- Copy identifiers (GSTIN, IDs, article numbers) exactly as printed.
- If a value is not present or unreadable, omit the key or use null. Do not guess.
- Ignore headers, footers, totals and signatures."#
    )
}
