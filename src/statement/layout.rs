/// Where the transaction table lives inside an exported workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub sheet_name: String,
    /// Rows above the header row, counted from the top of the sheet.
    pub skip_rows: u32,
    pub date_column: String,
    pub name_column: String,
    pub amount_column: String,
}

impl Default for SheetLayout {
    /// SEB account export. The posting date header is stored as UTF-8
    /// `Bokförd` in the workbook XML.
    fn default() -> Self {
        SheetLayout {
            sheet_name: "Sheet1".to_string(),
            skip_rows: 7,
            date_column: "Bokförd".to_string(),
            name_column: "Text".to_string(),
            amount_column: "Belopp".to_string(),
        }
    }
}

impl SheetLayout {
    /// Absolute, 0-based index of the header row. calamine ranges start at
    /// the first used cell, so leading blank rows still count towards
    /// `skip_rows` and the row is addressed by absolute position.
    pub fn header_row(&self) -> u32 {
        self.skip_rows
    }
}
