use quiz_core::model::{QuestionDraft, QuestionField};

use super::LoadError;

pub const COL_PROMPT: &str = "cau_hoi";
pub const COL_OPTION_A: &str = "tra_loi_a";
pub const COL_OPTION_B: &str = "tra_loi_b";
pub const COL_OPTION_C: &str = "tra_loi_c";
pub const COL_OPTION_D: &str = "tra_loi_d";
pub const COL_CORRECT: &str = "dap_an_dung";
pub const COL_EXPLANATION: &str = "giai_thich";

pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_PROMPT,
    COL_OPTION_A,
    COL_OPTION_B,
    COL_OPTION_C,
    COL_CORRECT,
];

/// Spreadsheet column holding a question field.
#[must_use]
pub const fn column_for(field: QuestionField) -> &'static str {
    match field {
        QuestionField::Prompt => COL_PROMPT,
        QuestionField::OptionA => COL_OPTION_A,
        QuestionField::OptionB => COL_OPTION_B,
        QuestionField::OptionC => COL_OPTION_C,
        QuestionField::OptionD => COL_OPTION_D,
        QuestionField::CorrectLabel => COL_CORRECT,
        QuestionField::Explanation => COL_EXPLANATION,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RawRow {
    number: usize,
    cells: Vec<String>,
}

/// Header row plus data rows, as text, with blank rows dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawTable {
    headers: Vec<String>,
    header_row: usize,
    rows: Vec<RawRow>,
}

impl RawTable {
    /// Table whose header sits on the first spreadsheet row.
    pub(crate) fn new(headers: Vec<String>, rows: impl IntoIterator<Item = Vec<String>>) -> Self {
        Self::with_header_row(1, headers, rows)
    }

    /// Data rows are numbered from the line under `header_row` (1-based), matching
    /// what a spreadsheet shows. Rows whose cells are all blank are skipped but still counted.
    pub(crate) fn with_header_row(
        header_row: usize,
        headers: Vec<String>,
        rows: impl IntoIterator<Item = Vec<String>>,
    ) -> Self {
        let headers = headers.iter().map(|header| normalize_header(header)).collect();
        let rows = rows
            .into_iter()
            .enumerate()
            .filter(|(_, cells)| cells.iter().any(|cell| !cell.trim().is_empty()))
            .map(|(offset, cells)| RawRow {
                number: header_row + offset + 1,
                cells,
            })
            .collect();
        Self {
            headers,
            header_row,
            rows,
        }
    }

    /// Spreadsheet row number of the record at `index`.
    pub(crate) fn row_number(&self, index: usize) -> usize {
        self.rows
            .get(index)
            .map_or(self.header_row + index + 1, |row| row.number)
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_ascii_lowercase()
}

/// Map table rows to drafts by column name.
///
/// # Errors
///
/// Returns `LoadError::MissingColumns` listing every absent required column.
pub(crate) fn drafts_from_table(table: &RawTable) -> Result<Vec<QuestionDraft>, LoadError> {
    let missing: Vec<&'static str> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|name| table.column_index(name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns { columns: missing });
    }

    let prompt = table.column_index(COL_PROMPT);
    let a = table.column_index(COL_OPTION_A);
    let b = table.column_index(COL_OPTION_B);
    let c = table.column_index(COL_OPTION_C);
    let d = table.column_index(COL_OPTION_D);
    let correct = table.column_index(COL_CORRECT);
    let explanation = table.column_index(COL_EXPLANATION);

    let drafts = table
        .rows
        .iter()
        .map(|row| {
            let cell = |column: Option<usize>| {
                column.and_then(|idx| row.cells.get(idx)).cloned()
            };
            QuestionDraft {
                prompt: cell(prompt),
                option_a: cell(a),
                option_b: cell(b),
                option_c: cell(c),
                option_d: cell(d),
                correct_label: cell(correct),
                explanation: cell(explanation),
            }
        })
        .collect();

    Ok(drafts)
}
