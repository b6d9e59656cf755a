/// Arrow schema definitions for tabular views of search output.
pub mod results {
    use arrow::datatypes::{DataType, Field, Schema};

    /// Schema for a ranked result table: one row per result with its score breakdown.
    pub fn ranked_results_schema() -> Schema {
        Schema::new(vec![
            Field::new("rank", DataType::UInt32, false),
            Field::new("document", DataType::Utf8, false),
            Field::new("category", DataType::Utf8, false),
            Field::new("section", DataType::Utf8, false),
            Field::new("section_title", DataType::Utf8, false),
            Field::new("exact", DataType::UInt32, false),
            Field::new("keyword", DataType::UInt32, false),
            Field::new("amount", DataType::UInt32, false),
            Field::new("procedure", DataType::UInt32, false),
            Field::new("category_bonus", DataType::UInt32, false),
            Field::new("total", DataType::UInt32, false),
        ])
    }
}
