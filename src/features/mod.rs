pub mod auth;
pub mod bills;
pub mod new_bill;
pub mod receipts;
