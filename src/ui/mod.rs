/// UI widgets for the survey form
///
/// This module contains:
/// - The product picker dropdown (product_select.rs)

pub mod product_select;
