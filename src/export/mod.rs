/// Report writers: the Excel workbook with its native chart, and flat
/// CSV / JSON dumps of the results table.
pub mod table;
pub mod xlsx;
