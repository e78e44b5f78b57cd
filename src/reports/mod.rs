//! Reports module for balance-digest

pub mod balance_change;

pub use balance_change::{
    render_report, BalanceChangeReport, CategorySection, Direction, SubcategoryLine,
};
