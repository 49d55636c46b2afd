use time::Month;

#[derive(Debug, Clone, PartialEq)]
pub struct AddExpenseCommand {
    pub description: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteExpenseCommand {
    pub id: i64,
}

/// `month: None` totals every record.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryQuery {
    pub month: Option<Month>,
}
